// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod display;
pub mod http_response;
pub mod memory_repository;
pub mod palette;
