//! Domain model for a row of the `Orion.Nodes` entity.

use crate::core::domain::value_object::serde_helpers::swis_datetime_opt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// The management-relevant columns of one `Orion.Nodes` row.
///
/// Built fresh from the lookup query of each invocation and never persisted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeRecord {
    #[serde(rename = "NodeID", deserialize_with = "node_id_from_number_or_string")]
    pub node_id: u64,
    #[serde(rename = "Caption", default)]
    pub caption: Option<String>,
    #[serde(rename = "Unmanaged", default)]
    pub unmanaged: bool,
    #[serde(rename = "UnManageFrom", default, with = "swis_datetime_opt")]
    pub unmanage_from: Option<DateTime<Utc>>,
    #[serde(rename = "UnManageUntil", default, with = "swis_datetime_opt")]
    pub unmanage_until: Option<DateTime<Utc>>,
}

impl NodeRecord {
    /// The net-object reference the `Orion.Nodes` verbs expect, e.g. `N:123`.
    pub fn net_object_id(&self) -> String {
        format!("N:{}", self.node_id)
    }

    /// The caption, falling back to the net-object id for uncaptioned nodes.
    pub fn display_name(&self) -> String {
        match self.caption.as_deref().map(str::trim) {
            Some(caption) if !caption.is_empty() => caption.to_string(),
            _ => self.net_object_id(),
        }
    }

    pub fn summary(&self) -> NodeSummary {
        NodeSummary {
            node_id: self.node_id,
            caption: self.display_name(),
            net_object_id: self.net_object_id(),
        }
    }
}

/// Identifying fields of a node, as echoed back in results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSummary {
    pub node_id: u64,
    pub caption: String,
    pub net_object_id: String,
}

fn node_id_from_number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(id) => Ok(id),
        Raw::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid NodeID '{}'", text))),
    }
}
