pub mod account_service;
pub mod analytics_service;
pub mod denomination_service;
pub mod plan_service;
pub mod progress_service;
pub mod tile_service;
pub mod tree;
