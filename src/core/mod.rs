pub mod etl;
pub mod ledger;
pub mod partitioner;
pub mod processor;
pub mod reader;
pub mod report;
pub mod validator;
pub mod writer;

pub use crate::domain::model::{FieldKind, RawRow, ReservationRecord, Schema};
pub use crate::domain::ports::{ConfigProvider, Pipeline, ReservationSource, Storage};
pub use crate::utils::error::Result;
