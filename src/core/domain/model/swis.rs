//! Wire shapes of the SWIS JSON API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST Query`.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest<'a> {
    pub query: &'a str,
    pub parameters: &'a Map<String, Value>,
}

/// Body returned by `POST Query`.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<Value>,
}

/// Fault document SWIS returns with non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SwisFault {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub exception_type: Option<String>,
    #[serde(default)]
    pub full_exception: Option<String>,
}

impl SwisFault {
    /// Parses a fault body; bodies that are not SWIS faults yield `None`.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str::<SwisFault>(body)
            .ok()
            .filter(|fault| fault.message.is_some())
    }

    /// The most specific diagnostic detail available.
    pub fn detail(&self) -> Option<String> {
        self.full_exception
            .clone()
            .or_else(|| self.exception_type.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fault() {
        let body = r#"{"Message":"Node not unmanageable","ExceptionType":"SolarWinds.Data.SWISException","FullException":"SolarWinds.Data.SWISException: Node not unmanageable\r\n   at ..."}"#;
        let fault = SwisFault::parse(body).unwrap();
        assert_eq!(fault.message.as_deref(), Some("Node not unmanageable"));
        assert!(fault.detail().unwrap().starts_with("SolarWinds.Data.SWISException:"));
    }

    #[test]
    fn test_parse_non_fault() {
        assert!(SwisFault::parse("<html>Bad Gateway</html>").is_none());
        assert!(SwisFault::parse("{}").is_none());
    }

    #[test]
    fn test_query_request_shape() {
        let mut parameters = Map::new();
        parameters.insert("node_id".into(), Value::from(5));
        let body = serde_json::to_value(QueryRequest {
            query: "SELECT 1",
            parameters: &parameters,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"query": "SELECT 1", "parameters": {"node_id": 5}})
        );
    }
}
