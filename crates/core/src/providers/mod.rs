pub mod registry;
pub mod traits;

// Advisor implementations
pub mod heuristic;
pub mod remote;
