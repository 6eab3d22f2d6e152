pub mod account;
pub mod chart;
pub mod denomination;
pub mod plan;
pub mod progress;
pub mod recommendation;
pub mod settings;
pub mod tile;
pub mod user_data;
