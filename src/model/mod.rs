//! Browser-independent dashboard logic.

pub mod charts;
pub mod export;
pub mod protocol;
pub mod simulation;
pub mod topology;

pub use protocol::Protocol;
