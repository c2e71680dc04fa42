pub mod locator_service;
pub mod manage_service;
pub mod mutator_service;
