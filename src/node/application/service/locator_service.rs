use crate::{
    core::{
        domain::{
            error::{OrionError, OrionResult},
            model::{
                client_config::LookupPolicy, node_identifier::NodeIdentifier,
                node_record::NodeRecord,
            },
        },
        infrastructure::swis_api::SwisApi,
    },
    node::application::request::node_query::NodeQuery,
};
use tracing::{debug, warn};

/// Resolves a node identifier to the node's current management record.
#[derive(Debug, Default)]
pub struct LocatorService {
    policy: LookupPolicy,
}

impl LocatorService {
    pub fn new(policy: LookupPolicy) -> Self {
        Self { policy }
    }

    /// Runs one read-only lookup query.
    ///
    /// # Errors
    ///
    /// * `OrionError::NotFound` when no row matches
    /// * `OrionError::AmbiguousNode` when several rows match under `LookupPolicy::Strict`
    /// * `OrionError::Connection` when the query fails or a row cannot be decoded
    pub async fn execute<A>(&self, api: &A, identifier: &NodeIdentifier) -> OrionResult<NodeRecord>
    where
        A: SwisApi + ?Sized,
    {
        let lookup = NodeQuery::for_identifier(identifier);
        let rows = api.query(&lookup.query, lookup.parameters).await?;
        debug!(%identifier, rows = rows.len(), "node lookup finished");

        let mut nodes = rows
            .into_iter()
            .map(|row| {
                serde_json::from_value::<NodeRecord>(row).map_err(|e| {
                    OrionError::Connection(format!("Failed to decode Orion.Nodes row: {}", e))
                })
            })
            .collect::<OrionResult<Vec<_>>>()?;

        match nodes.len() {
            0 => Err(OrionError::NotFound(format!(
                "no Orion node matches {}",
                identifier
            ))),
            1 => Ok(nodes.remove(0)),
            _ => {
                let node_ids: Vec<u64> = nodes.iter().map(|n| n.node_id).collect();
                match self.policy {
                    LookupPolicy::Strict => Err(OrionError::AmbiguousNode {
                        identifier: identifier.to_string(),
                        node_ids,
                    }),
                    LookupPolicy::FirstMatch => {
                        warn!(
                            %identifier,
                            chosen = node_ids[0],
                            ignored = ?&node_ids[1..],
                            "identifier matches several nodes; using the first"
                        );
                        Ok(nodes.remove(0))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{domain::error::ErrorKind, infrastructure::swis_api::MockSwisApi};
    use serde_json::{Value, json};

    fn row(id: u64, caption: &str) -> Value {
        json!({
            "NodeID": id,
            "Caption": caption,
            "Unmanaged": false,
            "UnManageFrom": null,
            "UnManageUntil": null
        })
    }

    fn api_returning(rows: Vec<Value>) -> MockSwisApi {
        let mut api = MockSwisApi::new();
        api.expect_query()
            .times(1)
            .returning(move |_, _| Ok(rows.clone()));
        api
    }

    #[tokio::test]
    async fn test_single_match() {
        let mut api = MockSwisApi::new();
        api.expect_query()
            .withf(|query, parameters| {
                query.ends_with("WHERE IPAddress = @ip_addr")
                    && parameters.get("ip_addr") == Some(&Value::from("10.0.0.1"))
            })
            .times(1)
            .returning(|_, _| Ok(vec![row(3, "core-sw")]));

        let identifier = NodeIdentifier::IpAddress("10.0.0.1".parse().unwrap());
        let node = LocatorService::default()
            .execute(&api, &identifier)
            .await
            .unwrap();
        assert_eq!(node.node_id, 3);
        assert_eq!(node.display_name(), "core-sw");
    }

    #[tokio::test]
    async fn test_no_match_is_not_found() {
        let api = api_returning(vec![]);
        let err = LocatorService::default()
            .execute(&api, &NodeIdentifier::Id(404))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Node not found: no Orion node matches node_id 404");
    }

    #[tokio::test]
    async fn test_strict_policy_rejects_ambiguity() {
        let api = api_returning(vec![row(3, "a"), row(8, "b")]);
        let err = LocatorService::new(LookupPolicy::Strict)
            .execute(&api, &NodeIdentifier::DnsName("dup.local".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        match err {
            OrionError::AmbiguousNode { node_ids, .. } => assert_eq!(node_ids, vec![3, 8]),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_first_match_policy_takes_first_row() {
        let api = api_returning(vec![row(3, "a"), row(8, "b")]);
        let node = LocatorService::new(LookupPolicy::FirstMatch)
            .execute(&api, &NodeIdentifier::DnsName("dup.local".to_string()))
            .await
            .unwrap();
        assert_eq!(node.node_id, 3);
    }

    #[tokio::test]
    async fn test_undecodable_row() {
        let api = api_returning(vec![json!({"Caption": "no id"})]);
        let err = LocatorService::default()
            .execute(&api, &NodeIdentifier::Id(1))
            .await
            .unwrap_err();
        assert!(matches!(err, OrionError::Connection(_)));
    }
}
