use anyhow::{Context, Result};
use chrono::Local;
use console::style;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::analysis::{percent, sorted_chromosomes, top_genotypes, zygosity_split};
use crate::interpret::{ApoeStatus, InterpretationReport};
use crate::parser::GenomeScan;

/// Supported renditions of the condensed statistics export
#[derive(Debug, Clone, Copy)]
pub enum ExportFormat {
    Text,
    Json,
}

/// Condensed statistics written by the export flag
#[derive(Debug, Serialize)]
struct StatsExport<'a> {
    file: &'a str,
    generated: String,
    total_snps: u64,
    genotyped: u64,
    no_calls: u64,
    chromosome_counts: BTreeMap<&'a str, u64>,
}

/// Renders scan results for the console and the optional export file
pub struct ReportGenerator;

impl ReportGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Print the summary statistics section to stdout
    pub fn print_summary(&self, scan: &GenomeScan) {
        println!();
        println!("{}", style("=".repeat(60)).cyan());
        println!("{}", style("GENOME SUMMARY STATISTICS").bold().cyan());
        println!("{}", style("=".repeat(60)).cyan());

        println!();
        println!("Total SNPs analyzed: {}", scan.total_snps);
        println!(
            "Successfully genotyped: {} ({:.2}%)",
            scan.genotyped(),
            percent(scan.genotyped(), scan.total_snps)
        );
        println!(
            "No-calls (--): {} ({:.2}%)",
            scan.no_calls,
            percent(scan.no_calls, scan.total_snps)
        );

        self.print_chromosome_distribution(scan);
        self.print_genotype_distribution(scan);
    }

    fn print_section(&self, title: &str) {
        println!();
        println!("{}", style("-".repeat(40)).dim());
        println!("{}", style(title).bold());
        println!("{}", style("-".repeat(40)).dim());
    }

    fn print_chromosome_distribution(&self, scan: &GenomeScan) {
        self.print_section("CHROMOSOME DISTRIBUTION");

        for (chromosome, count) in sorted_chromosomes(scan) {
            let share = percent(count, scan.total_snps);
            let bar = "█".repeat((share * 2.0) as usize);
            println!(
                "Chr {:>2}: {:>8} SNPs ({:>5.2}%) {}",
                chromosome, count, share, bar
            );
        }
    }

    fn print_genotype_distribution(&self, scan: &GenomeScan) {
        self.print_section("GENOTYPE DISTRIBUTION");

        let split = zygosity_split(scan);
        println!(
            "Homozygous variants: {} ({:.2}%)",
            split.homozygous,
            percent(split.homozygous, split.called())
        );
        println!(
            "Heterozygous variants: {} ({:.2}%)",
            split.heterozygous,
            percent(split.heterozygous, split.called())
        );

        self.print_section("TOP 10 MOST COMMON GENOTYPES");
        for (genotype, count) in top_genotypes(scan, 10) {
            println!(
                "{:>3}: {:>8} ({:>5.2}%)",
                genotype,
                count,
                percent(count, scan.total_snps)
            );
        }
    }

    /// Print the notable-marker section to stdout
    pub fn print_interpretations(&self, report: &InterpretationReport) {
        self.print_section("GENETIC VARIANT ANALYSIS WITH INTERPRETATIONS");

        if report.is_empty() {
            println!("None of the notable markers were found in this dataset.");
            return;
        }

        for finding in &report.findings {
            println!();
            println!(
                "{}: {}",
                style(&finding.rsid).green().bold(),
                finding.label
            );
            println!(
                "  Location: Chromosome {}, Position {}",
                finding.chromosome, finding.position
            );
            println!("  Your genotype: {}", finding.genotype);
            if let Some(interpretation) = finding.interpretation {
                println!("  Interpretation: {}", interpretation);
            }
        }

        self.print_apoe(&report.apoe);
    }

    fn print_apoe(&self, apoe: &ApoeStatus) {
        match apoe {
            ApoeStatus::Typed {
                rs429358,
                rs7412,
                haplotype,
                summary,
            } => {
                println!();
                println!(
                    "{}",
                    style("APOE Status (combined rs429358 and rs7412):").bold()
                );
                println!("  rs429358: {}, rs7412: {}", rs429358, rs7412);
                println!("  APOE type: {} - {}", haplotype, summary);
            }
            ApoeStatus::Undetermined { rs429358, rs7412 } => {
                println!();
                println!(
                    "{}",
                    style("APOE Status (combined rs429358 and rs7412):").bold()
                );
                println!("  rs429358: {}, rs7412: {}", rs429358, rs7412);
                println!("  APOE type: Unable to determine from these genotypes");
            }
            ApoeStatus::Incomplete => {
                println!();
                println!("APOE Status: Incomplete (need both rs429358 and rs7412 to determine)");
            }
            ApoeStatus::Absent => {}
        }
    }

    /// Write the condensed statistics to `path` in the requested format
    pub fn export(
        &self,
        scan: &GenomeScan,
        source: &str,
        path: &Path,
        format: ExportFormat,
    ) -> Result<()> {
        let stats = StatsExport {
            file: source,
            generated: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            total_snps: scan.total_snps,
            genotyped: scan.genotyped(),
            no_calls: scan.no_calls,
            chromosome_counts: scan
                .chromosome_counts
                .iter()
                .map(|(label, count)| (label.as_str(), *count))
                .collect(),
        };

        let contents = match format {
            ExportFormat::Text => render_text(&stats),
            ExportFormat::Json => {
                serde_json::to_string_pretty(&stats).context("Failed to serialize statistics")?
            }
        };

        fs::write(path, contents)
            .with_context(|| format!("Failed to write statistics to {}", path.display()))?;

        Ok(())
    }
}

fn render_text(stats: &StatsExport) -> String {
    let mut out = String::new();

    out.push_str("Genome Statistics Report\n");
    out.push_str(&"=".repeat(40));
    out.push('\n');
    out.push_str(&format!("File: {}\n", stats.file));
    out.push_str(&format!("Generated: {}\n", stats.generated));
    out.push_str(&format!("Total SNPs: {}\n", stats.total_snps));
    out.push_str(&format!("Successfully genotyped: {}\n", stats.genotyped));
    out.push_str(&format!("No-calls: {}\n\n", stats.no_calls));

    out.push_str("Chromosome Distribution:\n");
    for (chromosome, count) in &stats.chromosome_counts {
        out.push_str(&format!("  Chr {}: {} SNPs\n", chromosome, count));
    }

    out
}
