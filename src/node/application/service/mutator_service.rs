use crate::core::{
    domain::{
        error::OrionResult,
        model::{desired_state::UnmanageWindow, node_record::NodeRecord},
        value_object::serde_helpers::format_timestamp,
    },
    infrastructure::swis_api::SwisApi,
};
use serde_json::Value;
use tracing::info;

const NODES_ENTITY: &str = "Orion.Nodes";

/// Issues the `Orion.Nodes` management verbs.
///
/// Each call fires one invoke and reports on its immediate acknowledgement;
/// it never waits for the transition to show up in later queries.
#[derive(Debug, Default)]
pub struct MutatorService;

impl MutatorService {
    pub fn new() -> Self {
        Self
    }

    /// Clears the unmanage state of `node`, returning it to active monitoring.
    ///
    /// Returns the confirmation message.
    pub async fn remanage<A>(&self, api: &A, node: &NodeRecord) -> OrionResult<String>
    where
        A: SwisApi + ?Sized,
    {
        api.invoke(
            NODES_ENTITY,
            "Remanage",
            vec![Value::from(node.net_object_id())],
        )
        .await?;
        info!(node_id = node.node_id, "node remanaged");
        Ok(remanage_message(node))
    }

    /// Arms (or re-arms) the unmanage window of `node`.
    ///
    /// Returns the confirmation message.
    pub async fn unmanage<A>(
        &self,
        api: &A,
        node: &NodeRecord,
        window: &UnmanageWindow,
    ) -> OrionResult<String>
    where
        A: SwisApi + ?Sized,
    {
        api.invoke(
            NODES_ENTITY,
            "Unmanage",
            vec![
                Value::from(node.net_object_id()),
                Value::from(format_timestamp(&window.from)),
                Value::from(format_timestamp(&window.until)),
                Value::from(window.is_relative),
            ],
        )
        .await?;
        info!(node_id = node.node_id, %window, "node unmanaged");
        Ok(unmanage_message(node, window))
    }
}

pub(crate) fn remanage_message(node: &NodeRecord) -> String {
    format!("{} has been remanaged", node.display_name())
}

pub(crate) fn unmanage_message(node: &NodeRecord, window: &UnmanageWindow) -> String {
    format!(
        "{} will be unmanaged from {} until {}",
        node.display_name(),
        format_timestamp(&window.from),
        format_timestamp(&window.scheduled_until())
    )
}
