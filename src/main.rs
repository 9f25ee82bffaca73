use clap::Parser;
use reservas_etl::core::report::{render_summary, show_destination, ReservationReport};
use reservas_etl::domain::ports::ConfigProvider;
use reservas_etl::utils::error::ErrorSeverity;
use reservas_etl::utils::{logger, validation::Validate};
use reservas_etl::{
    CliConfig, Command, ConsoleSource, DestinationPartitioner, EtlEngine, LocalStorage,
    ProcessSummary, ReservationLedger, ReservationProcessor, Result, TomlConfig,
};

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting reservas CLI");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli) {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn run(cli: &CliConfig) -> Result<()> {
    let config = cli.resolve()?;
    config.validate()?;

    let storage = LocalStorage::new(config.data_dir());
    let schema = config.schema();

    match &cli.command {
        Command::Init { file } => {
            let ledger = ReservationLedger::new(storage, file_or_master(file, &config), schema);
            let path = ledger.create()?;
            if ledger.write_headers()? {
                tracing::info!("Header written to {}", path.display());
            }
            println!("✅ {}", path.display());
        }
        Command::Add { file, count } => {
            let ledger = ReservationLedger::new(storage, file_or_master(file, &config), schema);
            ledger.create()?;
            ledger.write_headers()?;

            let stdin = std::io::stdin();
            let mut source = ConsoleSource::new(stdin.lock(), std::io::stderr(), schema);
            let written = ledger.capture(&mut source, *count)?;
            println!("✅ {} reservations added to {}", written, ledger.file_name());
        }
        Command::Process { input, width } => {
            let input = file_or_master(input, &config);
            let width = width.unwrap_or_else(|| schema.width());
            let processor = ReservationProcessor::from_config(storage, &config, input, width);
            let summary = EtlEngine::new(processor).run()?;
            print_summary(cli, &summary)?;
        }
        Command::Partition { file, by } => {
            let master = file_or_master(file, &config);
            let partitioner = DestinationPartitioner::new(storage, master, *by, schema)?
                .with_output_prefix(config.output_prefix());
            let summary = EtlEngine::new(partitioner).run()?;
            print_summary(cli, &summary)?;
        }
        Command::Report { file, class } => {
            let file = file_or_master(file, &config);
            let report = ReservationReport::load(&storage, &file, schema.has_destination, *class)?;
            print!("{}", report.render());
            println!();
            println!("🎯 Done");
        }
        Command::Show { destination } => {
            match show_destination(&storage, config.output_prefix(), *destination)? {
                Some(report) => print!("{}", report.render()),
                None => println!("❌ No reservations file for {}", destination),
            }
        }
    }

    Ok(())
}

fn file_or_master(file: &Option<String>, config: &TomlConfig) -> String {
    file.clone()
        .unwrap_or_else(|| config.master_file().to_string())
}

fn print_summary(cli: &CliConfig, summary: &ProcessSummary) -> Result<()> {
    if cli.json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        print!("{}", render_summary(summary));
    }
    Ok(())
}
