use clap::Parser;
use shannon_core::config::TrialConfig;
use shannon_core::logging::init_logging;
use shannon_core::persistence::save_report;
use shannon_core::trials::TrialRunner;
use std::path::PathBuf;

/// Runs guessing-game trials over a set of corpora and phrases.
#[derive(Debug, Parser)]
#[command(name = "trials", version, about = "Shannon game trial harness")]
struct Cli {
    /// Path to the JSON trial configuration.
    #[arg(short, long, value_name = "FILE", default_value = "trials.json")]
    config: PathBuf,

    /// Override the report output path.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Exit after validating the configuration.
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = TrialConfig::from_path(&cli.config)?;
    if let Some(report) = cli.report {
        config.report = Some(report);
    }
    init_logging(config.level());

    println!(
        "Loaded {} corpora and {} phrases from {}",
        config.corpora.len(),
        config.phrases.len(),
        cli.config.display()
    );
    if cli.validate_only {
        println!("Validation-only mode: trials skipped.");
        return Ok(());
    }

    let report_path = config.report.clone();
    let report = TrialRunner::new(config)?.run()?;
    print!("{report}");

    if let Some(path) = report_path {
        save_report(&path, &report)?;
        println!("Report written to {}", path.display());
    }
    Ok(())
}
