// Licensed under the Apache-2.0 license

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::path::PathBuf;

mod header_gen;

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "libopencm3 EFM32 register header tasks",
    version
)]
struct Xtask {
    #[command(subcommand)]
    xtask: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the C headers listed in a directory's generate.yaml
    HeaderGen {
        /// Directory holding generate.yaml, generate-license.yaml and the descriptions
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Fail if a header on disk differs from the generated one; write nothing
        #[arg(long, default_value_t = false)]
        check: bool,

        /// Log every register as it is written
        #[arg(short, long, default_value_t = false)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Xtask::parse();
    match cli.xtask {
        Commands::HeaderGen {
            dir,
            check,
            verbose,
        } => {
            let level = if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            };
            SimpleLogger::new().with_level(level).init()?;
            header_gen::generate(&dir, check)
        }
    }
}
