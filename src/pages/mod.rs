pub mod analytics;
pub mod energy;
pub mod help;
pub mod not_found;
pub mod performance;
pub mod protocols;
pub mod simulation;
pub mod topology;
pub mod trends;
