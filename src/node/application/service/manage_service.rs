//! The reconcile use case: locate, compare, mutate only when needed.

use crate::{
    core::{
        domain::{
            error::OrionResult,
            model::{
                client_config::ClientConfig, desired_state::DesiredState,
                manage_outcome::ManageOutcome,
            },
        },
        infrastructure::swis_api::SwisApi,
    },
    node::application::{
        request::manage_request::ManageRequest,
        service::{
            locator_service::LocatorService,
            mutator_service::{MutatorService, remanage_message, unmanage_message},
        },
    },
};
use tracing::info;

/// Brings one node to its desired management state.
///
/// At most one mutating verb is invoked per call. Running the same request
/// twice invokes nothing the second time.
#[derive(Debug, Default)]
pub struct ManageService {
    locator: LocatorService,
    mutator: MutatorService,
    check_mode: bool,
}

impl ManageService {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            locator: LocatorService::new(config.lookup_policy),
            mutator: MutatorService::new(),
            check_mode: config.check_mode,
        }
    }

    pub async fn ensure<A>(&self, api: &A, request: &ManageRequest) -> OrionResult<ManageOutcome>
    where
        A: SwisApi + ?Sized,
    {
        let node = self.locator.execute(api, &request.identifier).await?;
        let summary = node.summary();

        if request.desired.is_satisfied_by(&node) {
            info!(
                node_id = node.node_id,
                state = request.desired.label(),
                "node already in desired state"
            );
            let msg = match &request.desired {
                DesiredState::Managed => format!("{} is already managed", summary.caption),
                DesiredState::Unmanaged(window) => {
                    format!("{} is already unmanaged {}", summary.caption, window)
                }
            };
            return Ok(ManageOutcome::unchanged(summary, msg));
        }

        info!(
            node_id = node.node_id,
            state = request.desired.label(),
            check_mode = self.check_mode,
            "node requires a state change"
        );

        if self.check_mode {
            let msg = match &request.desired {
                DesiredState::Managed => format!("(check mode) {}", remanage_message(&node)),
                DesiredState::Unmanaged(window) => {
                    format!("(check mode) {}", unmanage_message(&node, window))
                }
            };
            return Ok(ManageOutcome::changed(summary, msg));
        }

        let msg = match &request.desired {
            DesiredState::Managed => self.mutator.remanage(api, &node).await?,
            DesiredState::Unmanaged(window) => self.mutator.unmanage(api, &node, window).await?,
        };
        Ok(ManageOutcome::changed(summary, msg))
    }
}
