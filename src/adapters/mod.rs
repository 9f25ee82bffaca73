// Adapters layer: concrete implementations of the domain ports (storage backends, data sources).

pub mod console;
pub mod memory;
pub mod storage;
