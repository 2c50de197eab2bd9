use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use termkit::alignment::{BilingualAligner, InMemoryDictionary, TranslationStrategy};
use termkit::config::Config;
use termkit::graph::TermProperty;
use termkit::output::terminal;
use termkit::scoring::{FlatScorifier, ScoredModel};
use termkit::snapshot::CorpusSnapshot;
use termkit::vectors::SimilarityMeasure;

/// termkit: term scoring, context vectors and bilingual alignment.
///
/// Works on the output of a terminology-extraction pipeline: scored term
/// lists and corpus snapshots in JSON.
#[derive(Parser)]
#[command(name = "termkit", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter and sort a scored term list
    Filter {
        /// Scored terms (JSON array)
        #[arg(long)]
        input: PathBuf,

        /// Write the filtered list here as JSON
        #[arg(long)]
        output: Option<PathBuf>,

        /// Number of terms to display (default: 20)
        #[arg(long, default_value = "20")]
        top: usize,
    },

    /// List the variants reachable from a term
    Variants {
        /// Corpus snapshot (JSON)
        #[arg(long)]
        snapshot: PathBuf,

        /// Grouping key of the term
        #[arg(long)]
        term: String,

        /// Maximum number of variant hops (default: 2)
        #[arg(long, default_value = "2")]
        depth: usize,
    },

    /// Rank target terms as translations of a source term
    Align {
        /// Source-language corpus snapshot (JSON)
        #[arg(long)]
        source: PathBuf,

        /// Target-language corpus snapshot (JSON)
        #[arg(long)]
        target: PathBuf,

        /// Bilingual dictionary: JSON object of source lemma -> target lemmas
        #[arg(long)]
        dictionary: PathBuf,

        /// Grouping key of the source term
        #[arg(long)]
        term: String,

        /// Translation strategy (overrides TERMKIT_TRANSLATION_STRATEGY)
        #[arg(long)]
        strategy: Option<String>,

        /// Compare vectors with weighted Jaccard instead of cosine
        #[arg(long)]
        jaccard: bool,

        /// Number of candidates to display (default: 10)
        #[arg(long, default_value = "10")]
        top: usize,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("termkit=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Filter { input, output, top } => {
            let raw = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let mut model: ScoredModel = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse scored terms in {}", input.display()))?;

            let scorifier = FlatScorifier::new(config.thresholds.clone());
            let report = scorifier.run(&mut model);
            terminal::display_scored_terms(&model, &report, top);

            if let Some(path) = output {
                let json = serde_json::to_string_pretty(&model)?;
                std::fs::write(&path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Filtered terms written to {}", path.display());
            }
        }

        Commands::Variants {
            snapshot,
            term,
            depth,
        } => {
            let index = CorpusSnapshot::load(&snapshot)?.to_index()?;
            let origin = index
                .term_by_grouping_key(&term)
                .with_context(|| format!("Term {term:?} not found in {}", snapshot.display()))?;
            let variants = index.get_variants(origin.id, depth, TermProperty::Frequency.comparator(true));
            terminal::display_variants(origin, depth, &variants);
        }

        Commands::Align {
            source,
            target,
            dictionary,
            term,
            strategy,
            jaccard,
            top,
        } => {
            let strategy: TranslationStrategy = match strategy {
                Some(s) => s.parse()?,
                None => config.translation_strategy,
            };
            let builder = config.context_builder();
            let measure = config.association_measure.rate();

            println!("Building source context vectors...");
            let source_index = CorpusSnapshot::load(&source)?.to_index_with_vectors(&builder, measure)?;
            println!("Building target context vectors...");
            let target_index = CorpusSnapshot::load(&target)?.to_index_with_vectors(&builder, measure)?;

            let raw = std::fs::read_to_string(&dictionary)
                .with_context(|| format!("Failed to read {}", dictionary.display()))?;
            let dico: InMemoryDictionary = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse dictionary {}", dictionary.display()))?;
            info!(entries = dico.len(), "Loaded bilingual dictionary");

            let source_id = source_index
                .id_of(&term)
                .with_context(|| format!("Term {term:?} not found in {}", source.display()))?;

            let similarity = if jaccard {
                SimilarityMeasure::WeightedJaccard
            } else {
                SimilarityMeasure::Cosine
            };
            let aligner = BilingualAligner::new(&source_index, &target_index, &dico)
                .with_strategy(strategy)
                .with_similarity(similarity);
            let candidates = aligner.align(source_id, top)?;

            terminal::display_alignment(&term, &candidates);
            println!(
                "{}",
                format!("Strategy: {strategy}, measure: {}", measure.name()).dimmed()
            );
        }
    }

    Ok(())
}
