// Unit tests for bilingual alignment.
//
// Covers the translation strategies on small hand-built vectors, strategy
// parsing, and candidate ranking by the aligner.

use termkit::alignment::{
    translate_vector, BilingualAligner, InMemoryDictionary, TranslationStrategy,
};
use termkit::graph::{TermId, TermIndex};
use termkit::vectors::{ContextVector, SimilarityMeasure};
use termkit::TermError;

/// Source vector of `owner`, with one entry per (lemma, count, rate).
fn source_with(entries: &[(&str, u32, f64)]) -> (TermIndex, ContextVector) {
    let mut index = TermIndex::new();
    let owner = index.add_term("n: chat", "chat", 20);
    let mut v = ContextVector::for_term(owner, false);
    for &(lemma, count, rate) in entries {
        let id = index.add_term(&format!("x: {lemma}"), lemma, 5);
        v.add_entry(index.get(id).unwrap(), count, rate).unwrap();
    }
    (index, v)
}

fn target_with(terms: &[(&str, u32)]) -> TermIndex {
    let mut index = TermIndex::new();
    for &(lemma, freq) in terms {
        index.add_term(lemma, lemma, freq);
    }
    index
}

// ============================================================
// Strategies
// ============================================================

#[test]
fn prorata_splits_by_target_frequency() {
    let (source, v) = source_with(&[("noir", 10, 0.6)]);
    let target = target_with(&[("black", 35), ("dark", 15)]);
    let dico = InMemoryDictionary::from_pairs([("noir", "black"), ("noir", "dark")]);

    let t = translate_vector(&v, &source, &dico, TranslationStrategy::Prorata, &target).unwrap();
    let black = target.id_of("black").unwrap();
    let dark = target.id_of("dark").unwrap();
    assert_eq!(t.nb_cooccs(black), 7);
    assert_eq!(t.nb_cooccs(dark), 3);
    // rate is copied to every candidate
    assert!((t.assoc_rate(black) - 0.6).abs() < 1e-9);
    assert!((t.assoc_rate(dark) - 0.6).abs() < 1e-9);
    assert!(t.term().is_none());
}

#[test]
fn equi_repartition_over_three_candidates() {
    let (source, v) = source_with(&[("mot", 3, 1.0)]);
    let target = target_with(&[("word", 1), ("term", 1), ("token", 1)]);
    let dico = InMemoryDictionary::from_pairs([("mot", "word"), ("mot", "term"), ("mot", "token")]);

    let t = translate_vector(&v, &source, &dico, TranslationStrategy::EquiRepartition, &target).unwrap();
    assert_eq!(t.len(), 3);
    for id in target.ids() {
        assert_eq!(t.nb_cooccs(id), 1);
        assert!((t.assoc_rate(id) - 1.0 / 3.0).abs() < 1e-9);
    }
}

#[test]
fn equi_repartition_rounds_counts_down() {
    let (source, v) = source_with(&[("mot", 2, 0.9)]);
    let target = target_with(&[("word", 1), ("term", 1), ("token", 1)]);
    let dico = InMemoryDictionary::from_pairs([("mot", "word"), ("mot", "term"), ("mot", "token")]);

    let t = translate_vector(&v, &source, &dico, TranslationStrategy::EquiRepartition, &target).unwrap();
    assert_eq!(t.total_cooccurrences(), 0);
    assert!((t.assoc_rate(target.id_of("word").unwrap()) - 0.3).abs() < 1e-9);
}

#[test]
fn colliding_translations_accumulate() {
    let (source, v) = source_with(&[("sombre", 4, 0.25), ("noir", 6, 0.5)]);
    let target = target_with(&[("dark", 10)]);
    let dico = InMemoryDictionary::from_pairs([("sombre", "dark"), ("noir", "dark")]);

    let t = translate_vector(&v, &source, &dico, TranslationStrategy::MostFrequent, &target).unwrap();
    let dark = target.id_of("dark").unwrap();
    assert_eq!(t.len(), 1);
    assert_eq!(t.nb_cooccs(dark), 10);
    assert!((t.assoc_rate(dark) - 0.75).abs() < 1e-9);
}

#[test]
fn lemma_missing_from_target_is_skipped() {
    let (source, v) = source_with(&[("noir", 10, 0.5)]);
    let target = target_with(&[("black", 35)]);
    let dico = InMemoryDictionary::from_pairs([("noir", "black"), ("noir", "dark")]);

    let t = translate_vector(&v, &source, &dico, TranslationStrategy::EquiRepartition, &target).unwrap();
    assert_eq!(t.len(), 1);
    assert_eq!(t.nb_cooccs(target.id_of("black").unwrap()), 10);
}

// ============================================================
// Strategy parsing
// ============================================================

#[test]
fn strategy_round_trips_through_display() {
    for strategy in TranslationStrategy::ALL {
        assert_eq!(strategy.to_string().parse::<TranslationStrategy>(), Ok(strategy));
    }
}

#[test]
fn unknown_strategy_is_rejected() {
    assert_eq!(
        "weighted".parse::<TranslationStrategy>(),
        Err(TermError::InvalidStrategy("weighted".to_string()))
    );
    assert!(matches!(
        TranslationStrategy::from_code(0),
        Err(TermError::InvalidStrategy(_))
    ));
}

// ============================================================
// BilingualAligner
// ============================================================

struct AlignFixture {
    source: TermIndex,
    target: TermIndex,
    dico: InMemoryDictionary,
    chat: TermId,
}

// chat <noir: 1.0>; targets cat <black: 1.0>, kitten <black: 0.5, road: 0.5>,
// car <road: 1.0>
fn align_fixture() -> AlignFixture {
    let (mut source, v) = source_with(&[("noir", 10, 1.0)]);
    let chat = source.id_of("n: chat").unwrap();
    source.set_context_vector(chat, v).unwrap();

    let mut target = target_with(&[("black", 30), ("road", 10), ("cat", 5), ("kitten", 2), ("car", 8)]);
    let black = target.id_of("black").unwrap();
    let road = target.id_of("road").unwrap();
    for (key, entries) in [
        ("cat", vec![(black, 1.0)]),
        ("kitten", vec![(black, 0.5), (road, 0.5)]),
        ("car", vec![(road, 1.0)]),
    ] {
        let id = target.id_of(key).unwrap();
        let mut v = ContextVector::for_term(id, false);
        for (co, rate) in entries {
            let co_term = target.get(co).unwrap().clone();
            v.add_entry(&co_term, 1, rate).unwrap();
        }
        target.set_context_vector(id, v).unwrap();
    }

    AlignFixture {
        source,
        target,
        dico: InMemoryDictionary::from_pairs([("noir", "black")]),
        chat,
    }
}

#[test]
fn aligner_ranks_by_similarity() {
    let f = align_fixture();
    let aligner = BilingualAligner::new(&f.source, &f.target, &f.dico);
    let candidates = aligner.align(f.chat, 10).unwrap();

    let keys: Vec<&str> = candidates.iter().map(|c| c.grouping_key.as_str()).collect();
    assert_eq!(keys, vec!["cat", "kitten"]);
    assert!((candidates[0].similarity - 1.0).abs() < 1e-9);
    assert!((candidates[1].similarity - 0.5_f64.sqrt()).abs() < 1e-9);
}

#[test]
fn aligner_truncates_to_top_n() {
    let f = align_fixture();
    let aligner = BilingualAligner::new(&f.source, &f.target, &f.dico)
        .with_similarity(SimilarityMeasure::WeightedJaccard);
    let candidates = aligner.align(f.chat, 1).unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].grouping_key, "cat");
}

#[test]
fn aligner_requires_source_vector() {
    let f = align_fixture();
    let noir = f.source.id_of("x: noir").unwrap();
    let aligner = BilingualAligner::new(&f.source, &f.target, &f.dico);
    assert_eq!(
        aligner.align(noir, 5),
        Err(TermError::MissingContextVector("x: noir".to_string()))
    );
}
