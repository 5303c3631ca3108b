//! simplesynth - render one note and preview it in the terminal
//!
//! Run with: cargo run -- osc_1=Sawtooth osc_2=Square mix=0.3 cutoff=2000 note=220

mod app;
mod cli;
mod player;
mod ui;

use cli::{Invocation, USAGE};
use tracing_subscriber::EnvFilter;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{USAGE}");
        return Ok(());
    }

    app::run(Invocation::parse(&args)?)
}
