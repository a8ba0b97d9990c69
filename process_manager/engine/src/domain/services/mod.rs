pub mod lifecycle_controller;
pub mod process_resolver;
pub mod process_table_reader;

pub use lifecycle_controller::LifecycleController;
pub use process_resolver::ProcessResolver;
pub use process_table_reader::ProcessTableReader;
