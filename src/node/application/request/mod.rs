pub mod manage_request;
pub mod node_query;
