use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::alignment::strategy::TranslationStrategy;
use crate::scoring::filter::FilterThresholds;
use crate::vectors::builder::ContextBuilder;
use crate::vectors::cross_table::AssociationMeasure;

/// Central configuration loaded from environment variables.
///
/// Every value has a default, so an empty environment gives a working
/// setup. The .env file is loaded at startup by the binary via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Term and variant filter thresholds
    pub thresholds: FilterThresholds,
    /// How translated entries are spread over candidate translations
    pub translation_strategy: TranslationStrategy,
    /// Measure used to turn cooccurrence counts into association rates
    pub association_measure: AssociationMeasure,
    /// Window half-width for context vectors
    pub context_scope: usize,
    /// Context entries counted fewer times than this are dropped
    pub min_cooccurrences: u32,
    /// Fold co-terms onto their class heads
    pub use_term_classes: bool,
}

impl Default for Config {
    fn default() -> Self {
        let builder = ContextBuilder::default();
        Self {
            thresholds: FilterThresholds::default(),
            translation_strategy: TranslationStrategy::default(),
            association_measure: AssociationMeasure::LogLikelihood,
            context_scope: builder.scope,
            min_cooccurrences: builder.min_cooccurrences,
            use_term_classes: builder.use_term_classes,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to the
    /// defaults for unset ones. A set but malformed value is an error.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();
        let th = defaults.thresholds;

        let thresholds = FilterThresholds {
            orthographic_score_th: parse_var("TERMKIT_ORTHOGRAPHIC_SCORE_TH", th.orthographic_score_th)?,
            term_independence_th: parse_var("TERMKIT_TERM_INDEPENDENCE_TH", th.term_independence_th)?,
            variant_independence_th: parse_var(
                "TERMKIT_VARIANT_INDEPENDENCE_TH",
                th.variant_independence_th,
            )?,
            variation_score_th: parse_var("TERMKIT_VARIATION_SCORE_TH", th.variation_score_th)?,
            extension_gain_th: parse_var("TERMKIT_EXTENSION_GAIN_TH", th.extension_gain_th)?,
            extension_spec_th: parse_var("TERMKIT_EXTENSION_SPEC_TH", th.extension_spec_th)?,
        };

        Ok(Self {
            thresholds,
            translation_strategy: parse_var(
                "TERMKIT_TRANSLATION_STRATEGY",
                defaults.translation_strategy,
            )?,
            association_measure: parse_var(
                "TERMKIT_ASSOCIATION_MEASURE",
                defaults.association_measure,
            )?,
            context_scope: parse_var("TERMKIT_CONTEXT_SCOPE", defaults.context_scope)?,
            min_cooccurrences: parse_var("TERMKIT_MIN_COOCCURRENCES", defaults.min_cooccurrences)?,
            use_term_classes: parse_var("TERMKIT_USE_TERM_CLASSES", defaults.use_term_classes)?,
        })
    }

    /// The context vector builder these settings describe.
    pub fn context_builder(&self) -> ContextBuilder {
        ContextBuilder {
            scope: self.context_scope,
            min_cooccurrences: self.min_cooccurrences,
            use_term_classes: self.use_term_classes,
        }
    }
}

/// Read `name` from the environment and parse it, or return `default` when
/// unset or empty.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Invalid value for {name}: {raw:?}")),
        _ => Ok(default),
    }
}
