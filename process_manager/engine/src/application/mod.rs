//! Application Layer
//!
//! Wires domain services together behind the single entry point the
//! console talks to.

pub mod dispatcher;

pub use dispatcher::{CommandDispatcher, Reply};
