//! Process table engine: enumeration, lookup, lifecycle control, audit and
//! export for the `procctl` console.

pub mod application;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::{CommandDispatcher, Reply};
pub use domain::{
    ActionKind, ActionOutcome, Command, DomainError, ErrorKind, LifecycleAction, Pid,
    ProcessRecord,
};
