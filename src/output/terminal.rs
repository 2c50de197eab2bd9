// Colored terminal output for filtered term lists, variants and alignment
// candidates. The main.rs commands delegate here.

use colored::Colorize;

use crate::alignment::aligner::AlignmentCandidate;
use crate::graph::term::Term;
use crate::scoring::filter::FilterReport;
use crate::scoring::model::ScoredModel;

/// Display the filter summary and the top terms of a filtered model.
pub fn display_scored_terms(model: &ScoredModel, report: &FilterReport, top: usize) {
    println!(
        "\n{}",
        format!("=== Scored Terms ({} kept of {}) ===", report.terms_after, report.terms_before).bold()
    );
    println!(
        "  Removed {} terms and {} variants",
        report.removed_term_count().to_string().red(),
        report.removed_variation_count().to_string().red(),
    );
    println!();

    if model.is_empty() {
        println!("No terms survived filtering. Check the thresholds in your .env file.");
        return;
    }

    println!(
        "  {:>4}  {:<40} {:>8}  {:>6}  {:>6}  {:>8}",
        "Rank".dimmed(),
        "Term".dimmed(),
        "WR".dimmed(),
        "Ortho".dimmed(),
        "Indep".dimmed(),
        "Variants".dimmed(),
    );
    println!("  {}", "-".repeat(82).dimmed());

    for (i, term) in model.terms().iter().take(top).enumerate() {
        println!(
            "  {:>4}. {:<40} {:>8.3}  {:>6.2}  {:>6.2}  {:>8}",
            i + 1,
            super::truncate_chars(&term.grouping_key, 40),
            term.wr_log,
            term.orthographic_score,
            term.independence_score,
            term.variations.len(),
        );
        for v in term.variations.iter().take(3) {
            println!(
                "        {} {} [{}] {:.3}",
                "->".dimmed(),
                super::truncate_chars(&v.variant_key, 40),
                v.kind,
                v.variation_score
            );
        }
    }
    println!();
}

/// Display variants reached from a term, one per line.
pub fn display_variants(origin: &Term, depth: usize, variants: &[&Term]) {
    println!(
        "\n{}",
        format!("=== Variants of {} (depth {}) ===", origin.grouping_key, depth).bold()
    );
    if variants.is_empty() {
        println!("  {}", "no variants".dimmed());
        return;
    }
    for v in variants {
        println!(
            "  {:<40} freq {:>6} ({:>6.2}%)  wr {:>8.3}",
            super::truncate_chars(&v.grouping_key, 40),
            v.frequency,
            v.frequency_norm * 100.0,
            v.specificity
        );
    }
    println!();
}

/// Display ranked translation candidates.
pub fn display_alignment(source_key: &str, candidates: &[AlignmentCandidate]) {
    println!(
        "\n{}",
        format!("=== Translation candidates for {} ===", source_key).bold()
    );
    if candidates.is_empty() {
        println!("  No candidate shares context with the translated vector.");
        return;
    }
    for (i, c) in candidates.iter().enumerate() {
        println!(
            "  {:>3}. {:<40} {}",
            i + 1,
            super::truncate_chars(&c.grouping_key, 40),
            colorize_similarity(c.similarity)
        );
    }
    println!();
}

fn colorize_similarity(similarity: f64) -> colored::ColoredString {
    let s = format!("{similarity:.3}");
    if similarity >= 0.5 {
        s.bright_green()
    } else if similarity >= 0.2 {
        s.bright_yellow()
    } else {
        s.dimmed()
    }
}
