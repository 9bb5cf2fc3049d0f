use clap::Parser;
use novel_gen::config::Cli;
use novel_gen::source::MySqlChapterSource;
use novel_gen::{generate, output};
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Static assets mirrored into the output root, relative to the working
/// directory.
const STATIC_DIR: &str = "static";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli) {
        Ok(()) => {
            info!("Novel static site generator finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr so the run summary on stdout stays clean.
/// `RUST_LOG` overrides the default `info` level.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting novel static site generator");

    let config = cli.into_config()?;
    info!(
        "Configuration loaded. Output directory: {}",
        config.output_dir.display()
    );

    info!("Connecting to {}", config.display_target());
    let mut source = MySqlChapterSource::connect(&config.connect_options())?;
    let generated =
        generate::generate_from_source(&mut source, &config.output_dir, Path::new(STATIC_DIR));
    source.close();

    if let Some(report) = generated? {
        output::print_generate_output(&report);
    }
    Ok(())
}
