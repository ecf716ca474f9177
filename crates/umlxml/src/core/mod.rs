//! Core abstractions for diagram processing
//!
//! This module defines the fundamental traits every diagram type implements
//! (detector, parser, database, renderer) plus the shared error, logging and
//! combinator helpers.

pub mod chumsky_utils;
mod database;
mod detector;
mod diagram;
mod error;
pub mod logging;
mod parser;
mod renderer;

pub use database::*;
pub use detector::*;
pub use diagram::*;
pub use error::*;
pub use logging::*;
pub use parser::*;
pub use renderer::*;
