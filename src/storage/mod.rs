//! The storage substrates tasks can be persisted into
//!
//! [`file::FileStorage`] is the durable substrate the application uses. \
//! [`memory::MemoryStorage`] keeps everything in memory; it is mostly useful for tests,
//! where it can also be tweaked to inject storage failures.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;
