use crate::core::domain::model::node_record::NodeSummary;
use serde::Serialize;

/// Result record of one reconcile invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManageOutcome {
    /// True when a mutating verb was invoked (or would be, in check mode).
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<NodeSummary>,
}

impl ManageOutcome {
    pub fn unchanged(node: NodeSummary, msg: impl Into<String>) -> Self {
        Self {
            changed: false,
            msg: Some(msg.into()),
            node: Some(node),
        }
    }

    pub fn changed(node: NodeSummary, msg: impl Into<String>) -> Self {
        Self {
            changed: true,
            msg: Some(msg.into()),
            node: Some(node),
        }
    }
}
