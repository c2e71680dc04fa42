pub mod api_client;
pub mod swis_api;
