//! CLI for classifying a query against partitioned training data.

mod commands;
mod data;
mod utils;

use std::path::PathBuf;

use clap::Parser;

use commands::Commands;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The directory to write logs into.
    #[arg(long, default_value = "logs")]
    logs_dir: PathBuf,

    /// The name of the log file.
    #[arg(short('l'), long, default_value = "knn-shell")]
    log_name: String,

    /// Log at debug level.
    #[arg(short('v'), long, default_value_t = false)]
    verbose: bool,

    /// The subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    let (_guard, log_path) = utils::configure_logger(&args.logs_dir, &args.log_name, args.verbose)?;
    ftlog::info!("{args:?}");
    ftlog::info!("Log file: {log_path:?}");

    match args.command {
        Commands::Classify {
            inputs,
            num_partitions,
            mode,
        } => commands::classify::run(&inputs, num_partitions, mode),
        Commands::Linear { inputs } => commands::linear::run(&inputs),
    }
}
