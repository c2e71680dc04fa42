use crate::core::domain::model::node_identifier::NodeIdentifier;
use serde_json::{Map, Value};

const NODE_COLUMNS: &str = "NodeID, Caption, Unmanaged, UnManageFrom, UnManageUntil";

/// A parameterised SWQL lookup against `Orion.Nodes`.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeQuery {
    pub query: String,
    pub parameters: Map<String, Value>,
}

impl NodeQuery {
    /// Builds the lookup for one identifier. Values are always bound as
    /// parameters, never spliced into the SWQL text.
    pub fn for_identifier(identifier: &NodeIdentifier) -> Self {
        let query = format!(
            "SELECT {} FROM Orion.Nodes WHERE {} = @{}",
            NODE_COLUMNS,
            identifier.column(),
            identifier.parameter()
        );
        let mut parameters = Map::new();
        parameters.insert(
            identifier.parameter().to_string(),
            identifier.parameter_value(),
        );
        Self { query, parameters }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_per_identifier() {
        let query = NodeQuery::for_identifier(&NodeIdentifier::DnsName("sw01".to_string()));
        assert_eq!(
            query.query,
            "SELECT NodeID, Caption, Unmanaged, UnManageFrom, UnManageUntil FROM Orion.Nodes WHERE DNS = @dns_name"
        );
        assert_eq!(query.parameters.get("dns_name"), Some(&Value::from("sw01")));

        let query = NodeQuery::for_identifier(&NodeIdentifier::Id(9));
        assert!(query.query.ends_with("WHERE NodeID = @node_id"));
        assert_eq!(query.parameters.get("node_id"), Some(&Value::from(9)));
    }
}
