use crate::domain::model::{PartitionPlan, ProcessSummary, RawRow, ReservationRecord, Schema};
use crate::utils::error::Result;
use std::path::PathBuf;

/// 檔案存取介面；路徑皆相對於實作的根目錄
pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    /// 覆寫
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
    fn append_file(&self, path: &str, data: &[u8]) -> Result<()>;
    fn exists(&self, path: &str) -> bool;
    fn resolve(&self, path: &str) -> PathBuf;
}

pub trait ConfigProvider {
    fn data_dir(&self) -> &str;
    fn master_file(&self) -> &str;
    fn error_log(&self) -> &str;
    fn output_prefix(&self) -> &str;
    fn schema(&self) -> Schema;
}

/// 訂位資料來源，取代互動式對話框。`Ok(None)` 表示沒有更多資料。
pub trait ReservationSource {
    fn next_reservation(&mut self) -> Result<Option<ReservationRecord>>;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<RawRow>>;
    fn transform(&self, rows: Vec<RawRow>) -> Result<PartitionPlan>;
    fn load(&self, plan: PartitionPlan) -> Result<ProcessSummary>;
}
