//! Tree storage providers

mod json_file;
mod memory;

pub use json_file::{JsonFileTreeStorage, FORMAT_VERSION};
pub use memory::MemoryTreeStorage;
