use crate::domain::model::{DestinationGroup, FileCount};
use crate::domain::ports::Storage;
use crate::utils::error::{ReservationError, Result};
use crate::utils::validation::validate_file_name;

/// 寫出前先檢查所有目標檔名：必須留在資料目錄內，且不可覆蓋輸入檔或錯誤紀錄
pub fn check_targets(prefix: &str, groups: &[DestinationGroup], protected: &[&str]) -> Result<()> {
    for group in groups {
        let file_name = group.file_name(prefix);
        validate_file_name("output file", &file_name)?;

        if protected.contains(&file_name.as_str()) {
            return Err(ReservationError::ConfigError {
                message: format!(
                    "output file '{}' for '{}' would overwrite an input file; use another output_prefix",
                    file_name, group.label
                ),
            });
        }
    }
    Ok(())
}

/// 每個分組寫一個檔案（覆寫）：標題列加上各資料列
pub fn write_groups<S: Storage>(
    storage: &S,
    prefix: &str,
    header: &str,
    groups: &[DestinationGroup],
    protected: &[&str],
) -> Result<Vec<FileCount>> {
    check_targets(prefix, groups, protected)?;

    let mut files = Vec::with_capacity(groups.len());

    for group in groups {
        let file_name = group.file_name(prefix);
        let mut content = String::with_capacity(header.len() + 1 + group.rows.len() * 48);
        content.push_str(header);
        content.push('\n');
        for row in &group.rows {
            content.push_str(&row.output_line());
            content.push('\n');
        }

        storage.write_file(&file_name, content.as_bytes())?;
        tracing::info!(
            "📁 {} -> {} ({} reservations)",
            group.label,
            storage.resolve(&file_name).display(),
            group.rows.len()
        );

        files.push(FileCount {
            file_name,
            destination: group.label.clone(),
            count: group.rows.len(),
        });
    }

    Ok(files)
}
