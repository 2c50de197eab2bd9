// Orthographic well-formedness of a lemma.
//
// Candidates extracted from noisy text often carry digits, markup debris or
// stray punctuation. The score is the share of characters that can appear
// in a regular multi-word term: letters, spaces, hyphens and apostrophes.

/// Score in [0, 1]. An empty lemma scores 0.
pub fn orthographic_score(lemma: &str) -> f64 {
    let mut total = 0usize;
    let mut regular = 0usize;
    for c in lemma.chars() {
        total += 1;
        if c.is_alphabetic() || c == ' ' || c == '-' || c == '\'' || c == '\u{2019}' {
            regular += 1;
        }
    }
    if total == 0 {
        0.0
    } else {
        regular as f64 / total as f64
    }
}
