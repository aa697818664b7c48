// Application layer - Value pipeline, use cases and collaborator traits
pub mod color_resolver;
pub mod display_processor;
pub mod expression;
pub mod gauge;
pub mod migration;
pub mod panel_repository;
pub mod panel_service;
pub mod series_reducer;
pub mod sparkline;
pub mod table_extractor;
