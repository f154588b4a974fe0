//! Logging abstractions
//!
//! Components take an `Arc<dyn Logger>` instead of writing to a global sink,
//! so binaries, tests and embedders each choose where messages go.

mod traits;
mod noop;
mod console;
mod memory;

pub use traits::{LogLevel, Logger};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
pub use memory::MemoryLogger;
