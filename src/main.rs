use anyhow::Result;
use clap::{CommandFactory, Parser, ValueHint};
use clap_complete::{generate, Shell};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

mod analysis;
mod interpret;
mod output;
mod parser;
mod types;

use interpret::VariantInterpreter;
use output::{ExportFormat, ReportGenerator};
use parser::GenomeParser;

/// Raw genotype report decoder
#[derive(Parser, Debug)]
#[command(
    name = "genome-decoder",
    version,
    about = "Decode raw genotype reports into summary statistics and variant interpretations",
    long_about = r#"
Parses four-column tab-separated raw genotype reports (23andMe-style
downloads, plain or gzipped) and prints:
- Totals with genotyped and no-call rates
- Per-chromosome marker distribution in karyotype order
- Genotype frequency table and homozygous/heterozygous split
- Interpretations for a panel of notable markers, including the joint
  APOE haplotype derived from rs429358 and rs7412
"#
)]
struct Cli {
    /// Raw genotype file (plain text or gzipped)
    #[arg(short, long, value_name = "FILE", default_value = "genome.txt", value_hint = ValueHint::FilePath)]
    file: PathBuf,

    /// Also write a condensed statistics export
    #[arg(short, long)]
    export: bool,

    /// Export destination
    #[arg(long, value_name = "FILE", default_value = "genome_stats.txt")]
    export_path: PathBuf,

    /// Export format
    #[arg(long, value_enum, default_value = "text")]
    export_format: ExportArg,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Generate shell completions
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum ExportArg {
    #[default]
    Text,
    Json,
}

impl From<ExportArg> for ExportFormat {
    fn from(format: ExportArg) -> ExportFormat {
        match format {
            ExportArg::Text => ExportFormat::Text,
            ExportArg::Json => ExportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        generate_completions(shell);
        return Ok(());
    }

    init_logging(cli.verbose);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Parsing genome file: {}", cli.file.display()));

    let parser = GenomeParser::new();
    let scan = parser.parse(&cli.file)?;

    pb.finish_and_clear();

    println!("Parsing genome file: {}", cli.file.display());
    println!("Successfully parsed {} SNPs", scan.total_snps);
    if scan.skipped_lines > 0 {
        info!("Skipped {} malformed lines", scan.skipped_lines);
    }

    let reporter = ReportGenerator::new();
    reporter.print_summary(&scan);

    let interpreter = VariantInterpreter::new();
    let report = interpreter.interpret(&scan.records);
    reporter.print_interpretations(&report);

    if cli.export {
        reporter.export(
            &scan,
            &cli.file.to_string_lossy(),
            &cli.export_path,
            cli.export_format.into(),
        )?;
        println!(
            "\n{} Statistics exported to: {}",
            style("✓").green().bold(),
            style(cli.export_path.display()).cyan()
        );
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("genome_decoder={}", level))
        .init();
}
