//! role-fixture CLI: writes the fold-3 role-labeling dataset to disk.

use clap::Parser;
use miette::Result;

use role_fixture::materializer::{MaterializerConfig, materialize};

/// Takes no arguments; `--help` and `--version` only.
#[derive(Parser)]
#[command(
    name = "role-fixture",
    version,
    about = "Write the role-labeling fixture dataset to data_fold3.bin"
)]
struct Cli {}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let Cli {} = Cli::parse();

    let report = materialize(&MaterializerConfig::default())?;
    println!("{report}");

    Ok(())
}
