use crate::domain::model::RawRow;
use crate::utils::error::Result;
use csv::ReaderBuilder;

/// 以逗號切分每一行；不支援引號跳脫，欄數不一致的列照樣保留給後續驗證。
/// 無法以 UTF-8 解碼的位元組換成替代字元，交給欄位驗證拒絕該列。
/// 空白行由 csv 直接略過，不算一列。
pub fn parse_rows(data: &[u8]) -> Result<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(data);

    let mut rows = Vec::new();
    for (index, record) in reader.byte_records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 1);
        let fields = record
            .iter()
            .map(|field| String::from_utf8_lossy(field).into_owned())
            .collect();
        rows.push(RawRow::new(line, fields));
    }

    tracing::debug!("Parsed {} rows", rows.len());
    Ok(rows)
}
