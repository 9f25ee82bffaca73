pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{console::ConsoleSource, memory::MemoryStorage, storage::LocalStorage};
pub use config::toml_config::TomlConfig;
pub use crate::core::{
    etl::EtlEngine, ledger::ReservationLedger, partitioner::DestinationPartitioner,
    processor::ReservationProcessor,
};
pub use domain::model::{
    Destination, FieldKind, ProcessSummary, ReservationClass, ReservationRecord, Schema,
};
pub use utils::error::{ReservationError, Result};
