pub mod probe_service;
