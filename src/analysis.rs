use std::collections::HashMap;

use crate::parser::GenomeScan;
use crate::types::Zygosity;

/// Sort key giving the conventional karyotype display order: autosomes by
/// number, then X, then Y, then any remaining contig label.
pub fn chromosome_sort_key(chromosome: &str) -> (u32, String) {
    if chromosome.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(number) = chromosome.parse::<u32>() {
            return (number, String::new());
        }
    }

    match chromosome {
        "X" => (100, String::new()),
        "Y" => (101, String::new()),
        other => (102, other.to_string()),
    }
}

/// Chromosome labels with their marker counts, in display order
pub fn sorted_chromosomes(scan: &GenomeScan) -> Vec<(String, u64)> {
    let mut chromosomes: Vec<(String, u64)> = scan
        .chromosome_counts
        .iter()
        .map(|(label, count)| (label.clone(), *count))
        .collect();
    chromosomes.sort_by_key(|(label, _)| chromosome_sort_key(label));
    chromosomes
}

/// Homozygous/heterozygous totals over called genotypes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ZygositySplit {
    pub homozygous: u64,
    pub heterozygous: u64,
}

impl ZygositySplit {
    pub fn called(&self) -> u64 {
        self.homozygous + self.heterozygous
    }
}

/// Split observed genotypes into homozygous and heterozygous totals.
/// No-calls and genotypes that are not two characters long count toward
/// neither side.
pub fn zygosity_split(scan: &GenomeScan) -> ZygositySplit {
    let mut split = ZygositySplit::default();

    for (genotype, count) in &scan.genotype_counts {
        match Zygosity::classify(genotype) {
            Some(Zygosity::Homozygous) => split.homozygous += count,
            Some(Zygosity::Heterozygous) => split.heterozygous += count,
            None => {}
        }
    }

    split
}

/// The `n` most common genotypes. Ties rank by first appearance in the
/// input so the listing is stable across runs.
pub fn top_genotypes(scan: &GenomeScan, n: usize) -> Vec<(String, u64)> {
    let first_seen: HashMap<&str, usize> = scan
        .genotype_order
        .iter()
        .enumerate()
        .map(|(index, genotype)| (genotype.as_str(), index))
        .collect();

    let mut ranked: Vec<(String, u64)> = scan
        .genotype_counts
        .iter()
        .map(|(genotype, count)| (genotype.clone(), *count))
        .collect();
    ranked.sort_by(|(a, a_count), (b, b_count)| {
        b_count
            .cmp(a_count)
            .then_with(|| first_seen.get(a.as_str()).cmp(&first_seen.get(b.as_str())))
    });
    ranked.truncate(n);
    ranked
}

/// Percentage of `part` in `total`, zero when nothing was counted
pub fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}
