mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{analyze, AnalyzeArgs};

/// Propscan CLI - recover component prop shapes from typed source
#[derive(Parser, Debug)]
#[command(name = "propscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze source files and report each component's props shape
    Analyze(AnalyzeArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Analyze(args) => analyze(args),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
