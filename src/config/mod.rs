pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

#[cfg(feature = "cli")]
mod cli {
    use super::toml_config::TomlConfig;
    use crate::domain::model::{Destination, FieldKind, ReservationClass};
    use crate::utils::error::Result;
    use clap::{Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "reservas")]
    #[command(about = "Flight reservation files: capture, validate and split by destination")]
    pub struct CliConfig {
        /// Directory holding the reservation files (overrides the config file)
        #[arg(long, global = true)]
        pub dir: Option<String>,

        /// Path to a TOML configuration file
        #[arg(short, long, global = true)]
        pub config: Option<String>,

        /// Work with three-column files (no destination)
        #[arg(long, global = true)]
        pub no_destination: bool,

        /// Enable verbose output
        #[arg(short, long, global = true)]
        pub verbose: bool,

        /// Print run summaries as JSON
        #[arg(long, global = true)]
        pub json: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Create the reservation file and write its header
        Init {
            #[arg(long)]
            file: Option<String>,
        },
        /// Capture reservations from standard input and append them
        Add {
            #[arg(long)]
            file: Option<String>,

            #[arg(short = 'n', long, default_value_t = 1)]
            count: usize,
        },
        /// Validate every row, log rejects and write one file per destination
        Process {
            #[arg(long)]
            input: Option<String>,

            /// Expected number of columns (3 or 4)
            #[arg(long)]
            width: Option<usize>,
        },
        /// Split the master file by a column after validating each group
        Partition {
            #[arg(long)]
            file: Option<String>,

            #[arg(long, default_value = "DESTINATION")]
            by: FieldKind,
        },
        /// Print the reservations of a file with basic counts
        Report {
            #[arg(long)]
            file: Option<String>,

            /// Count passengers in this class
            #[arg(long)]
            class: Option<ReservationClass>,
        },
        /// Print the partition file of one destination
        Show { destination: Destination },
    }

    impl CliConfig {
        /// 載入 TOML 配置（若有）並套用命令列覆蓋設定
        pub fn resolve(&self) -> Result<TomlConfig> {
            let mut config = match &self.config {
                Some(path) => TomlConfig::from_file(path)?,
                None => TomlConfig::default(),
            };

            if let Some(dir) = &self.dir {
                config.files.data_dir = dir.clone();
            }
            if self.no_destination {
                config.schema.has_destination = false;
            }

            Ok(config)
        }
    }

}
