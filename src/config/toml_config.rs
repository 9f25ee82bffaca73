use crate::core::processor::{DEFAULT_ERROR_LOG, DEFAULT_OUTPUT_PREFIX};
use crate::domain::model::Schema;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ReservationError, Result};
use crate::utils::validation::{validate_file_name, validate_non_empty_string, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_MASTER_FILE: &str = "reservas_maestro.txt";

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub schema: SchemaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub data_dir: String,
    pub master_file: String,
    pub error_log: String,
    pub output_prefix: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            data_dir: ".".to_string(),
            master_file: DEFAULT_MASTER_FILE.to_string(),
            error_log: DEFAULT_ERROR_LOG.to_string(),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub has_destination: bool,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            has_destination: true,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ReservationError::from_io(path.as_ref(), e))?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ReservationError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定者保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl ConfigProvider for TomlConfig {
    fn data_dir(&self) -> &str {
        &self.files.data_dir
    }

    fn master_file(&self) -> &str {
        &self.files.master_file
    }

    fn error_log(&self) -> &str {
        &self.files.error_log
    }

    fn output_prefix(&self) -> &str {
        &self.files.output_prefix
    }

    fn schema(&self) -> Schema {
        Schema {
            has_destination: self.schema.has_destination,
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("files.data_dir", &self.files.data_dir)?;
        validate_file_name("files.master_file", &self.files.master_file)?;
        validate_file_name("files.error_log", &self.files.error_log)?;
        validate_non_empty_string("files.output_prefix", &self.files.output_prefix)?;

        if self.files.output_prefix.contains(['/', '\\']) {
            return Err(ReservationError::InvalidConfigValueError {
                field: "files.output_prefix".to_string(),
                value: self.files.output_prefix.clone(),
                reason: "Prefix must not contain path separators".to_string(),
            });
        }

        Ok(())
    }
}
