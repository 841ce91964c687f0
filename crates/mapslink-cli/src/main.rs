mod input;
mod output;
mod run;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mapslink")]
#[command(about = "Resolve place names and coordinates from Google Maps links")]
struct Cli {
    /// Newline-delimited list of links (overrides `MAPSLINK_INPUT_PATH`).
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Directory for the CSV and the failure log (overrides `MAPSLINK_OUTPUT_DIR`).
    #[arg(long, short)]
    output_dir: Option<PathBuf>,
}

impl Cli {
    fn apply(self, config: &mut mapslink_core::AppConfig) {
        if let Some(input) = self.input {
            config.input_path = input;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = mapslink_core::load_app_config()?;
    cli.apply(&mut config);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let summary = run::run(&config).await?;

    println!(
        "\nGenerated: {} (';' separator; coordinates as xx.xx)",
        summary.csv_path.display()
    );
    println!(
        "Processed: {} | with failures: {} (listed in {})",
        summary.processed,
        summary.failed,
        summary.failures_path.display()
    );

    Ok(())
}
