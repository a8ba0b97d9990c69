pub mod commands;
pub mod error;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use commands::{ActionKind, Command, LifecycleAction};
pub use error::{DomainError, ErrorKind, Result};
pub use services::{LifecycleController, ProcessResolver, ProcessTableReader};
pub use value_objects::{ActionOutcome, Pid, ProcessRecord, MAX_PID};
