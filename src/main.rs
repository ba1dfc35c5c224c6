//! Sort the translation units of a TMX file.
//!
//! Reads a TMX 1.4b document, orders its `<tu>` entries by the normalized text
//! of their first variant and prints the result to standard output (or to the
//! file given with `--output`). Diagnostics go to standard error; set
//! `RUST_LOG=info` to see progress.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::debug;

use tmx_sort::builder::{SortConfig, TmxBuilder, DEFAULT_INPUT_PATH};

#[derive(Clone, Debug, Parser)]
#[command(name = "tmx-sort", version, about = "Sort TMX translation units by their source text")]
struct Args {
    /// The TMX file to sort.
    #[arg(id = "input.tmx", default_value = DEFAULT_INPUT_PATH)]
    input: PathBuf,
    /// Write the sorted document to this file instead of standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Log the sort keys of the first N units after sorting.
    #[arg(long, value_name = "N", default_value_t = 0)]
    preview: usize,
}

impl From<Args> for SortConfig {
    fn from(args: Args) -> Self {
        SortConfig {
            input_path: args.input,
            output_file: args.output,
            preview: args.preview,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = SortConfig::from(Args::parse());
    match TmxBuilder::new(&config).run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("{:?}", e);
            eprintln!("tmx-sort: {}", e);
            ExitCode::FAILURE
        }
    }
}
