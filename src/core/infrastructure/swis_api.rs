use crate::core::domain::error::OrionResult;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// The two SWIS operations the reconciler needs.
///
/// `ApiClient` is the HTTP implementation; use-case tests mock this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SwisApi: Send + Sync {
    /// Runs a read-only SWQL query and returns its result rows.
    async fn query(&self, query: &str, parameters: Map<String, Value>) -> OrionResult<Vec<Value>>;

    /// Invokes a verb on a SWIS entity with positional arguments.
    async fn invoke(&self, entity: &str, verb: &str, args: Vec<Value>) -> OrionResult<Value>;
}
