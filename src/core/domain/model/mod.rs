pub mod client_config;
pub mod clock;
pub mod desired_state;
pub mod manage_outcome;
pub mod node_identifier;
pub mod node_record;
pub mod orion_connection;
pub mod swis;
