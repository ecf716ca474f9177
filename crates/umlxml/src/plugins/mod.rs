//! Plugin implementations
//!
//! The class diagram plugin implements the core traits; the orchestrator
//! runs it as one pipeline.

pub mod class;
pub mod orchestrator;

pub use class::*;
pub use orchestrator::*;
