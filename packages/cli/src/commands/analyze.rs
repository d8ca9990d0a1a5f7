use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use propscan_analysis::{
    analyze_files, AnalyzeOptions, NullProgress, Progress, ProgressEvent, ResolvedShape,
};
use propscan_semantics::FileLoader;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Source files to analyze
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Maximum resolution depth for nested prop types
    #[arg(short, long, default_value_t = 2)]
    pub depth: usize,

    /// Module specifier the ref-forwarding wrapper is imported from
    #[arg(short, long, default_value = "react")]
    pub module: String,

    /// Emit the full report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn analyze(args: AnalyzeArgs) -> Result<()> {
    let mut options = AnalyzeOptions::with_max_depth(args.depth);
    options.ui_module = args.module.clone();

    let loader = FileLoader;

    if args.json {
        let reports = analyze_files(&loader, &args.files, &options, &mut NullProgress);
        if reports.is_empty() {
            return Err(anyhow!("No files could be analyzed"));
        }
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    println!(
        "{}",
        "🔍 Analyzing component props...".bright_blue().bold()
    );
    println!();

    let mut reporter = ConsoleReporter::default();
    let reports = analyze_files(&loader, &args.files, &options, &mut reporter);

    println!();
    if reporter.failed == 0 {
        println!(
            "{} Analyzed {} files: {} components, {} skipped",
            "✅".green(),
            reports.len(),
            reporter.components,
            reporter.skipped
        );
    } else {
        println!(
            "{} Analyzed {} files, {} failed: {} components, {} skipped",
            "⚠️".yellow(),
            reports.len(),
            reporter.failed,
            reporter.components,
            reporter.skipped
        );
    }

    if reports.is_empty() {
        return Err(anyhow!("No files could be analyzed"));
    }
    Ok(())
}

/// Prints each file's results as analysis completes
#[derive(Debug, Default)]
struct ConsoleReporter {
    components: usize,
    skipped: usize,
    failed: usize,
}

impl Progress for ConsoleReporter {
    fn on_event(&mut self, event: ProgressEvent<'_>) {
        match event {
            ProgressEvent::FileStarted { path } => {
                println!("{}", path.bold());
            }
            ProgressEvent::ComponentResolved { .. } => {}
            ProgressEvent::DeclarationSkipped { name, .. } => {
                println!("  {} {}", "-".dimmed(), format!("{} (skipped)", name).dimmed());
            }
            ProgressEvent::FileAnalyzed { report, .. } => {
                for (name, shape) in report.components() {
                    println!("  {} {}", "✓".green(), name);
                    println!("{}", indent(&render_shape(shape), 6));
                }
                self.components += report.len();
                self.skipped += report.skipped;
            }
            ProgressEvent::FileFailed { message, .. } => {
                println!("  {} {}", "✗".red(), message.red());
                self.failed += 1;
            }
        }
    }
}

fn render_shape(shape: &ResolvedShape) -> String {
    serde_json::to_string_pretty(shape).unwrap_or_else(|_| "<unprintable>".to_string())
}

fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| format!("{}{}", pad, line))
        .collect::<Vec<_>>()
        .join("\n")
}
