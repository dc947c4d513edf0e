//! Approximate string similarity on a 0–100 scale.
//!
//! [`WeightedRatio`] blends a character-level indel ratio with two token-based ratios so that
//! reordered or partially typed titles still resolve. Only a case-insensitive exact match reaches
//! a perfect score; titles that differ only in punctuation or spacing come just below it.

use super::title_resolver::TitleMatcher;
use std::collections::BTreeSet;
use unicode_normalization::UnicodeNormalization;

/// Scale applied to token-based ratios so they never tie with a direct match.
const TOKEN_RATIO_WEIGHT: f64 = 0.95;

/// Score for strings equal only after punctuation and whitespace folding.
const FOLDED_MATCH_SCORE: f64 = 99.0;

/// Default [`TitleMatcher`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedRatio;

impl TitleMatcher for WeightedRatio {
    fn similarity(&self, query: &str, title: &str) -> f64 {
        let exact = query.trim().to_lowercase() == title.trim().to_lowercase();
        let query = normalize(query);
        let title = normalize(title);

        if query.is_empty() || title.is_empty() {
            return 0.0;
        }
        if query == title {
            return if exact { 100.0 } else { FOLDED_MATCH_SCORE };
        }

        ratio(&query, &title)
            .max(TOKEN_RATIO_WEIGHT * token_sort_ratio(&query, &title))
            .max(TOKEN_RATIO_WEIGHT * token_set_ratio(&query, &title))
    }
}

/// NFKC, lowercase, punctuation to spaces, collapsed whitespace.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .nfkc()
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Indel similarity: `100 * 2 * LCS / (|a| + |b|)`, counted in chars.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    100.0 * (2 * longest_common_subsequence(&a, &b)) as f64 / total as f64
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut prev_row = vec![0usize; b.len() + 1];
    let mut curr_row = vec![0usize; b.len() + 1];

    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr_row[j + 1] = if ca == cb {
                prev_row[j] + 1
            } else {
                prev_row[j + 1].max(curr_row[j])
            };
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len()]
}

pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn sorted_tokens(text: &str) -> String {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Compares the shared tokens against each side's full token set, so a query that is a
/// subset of a title ("great gatsby" vs "the great gatsby") scores highly.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    let join = |tokens: Vec<&str>| tokens.join(" ");
    let intersection = join(tokens_a.intersection(&tokens_b).copied().collect());
    let only_a = join(tokens_a.difference(&tokens_b).copied().collect());
    let only_b = join(tokens_b.difference(&tokens_a).copied().collect());

    let combined_a = [intersection.as_str(), only_a.as_str()].join(" ");
    let combined_b = [intersection.as_str(), only_b.as_str()].join(" ");
    let combined_a = combined_a.trim();
    let combined_b = combined_b.trim();

    let mut best = ratio(combined_a, combined_b);
    if !intersection.is_empty() {
        best = best
            .max(ratio(&intersection, combined_a))
            .max(ratio(&intersection, combined_b));
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-3
    }

    #[test]
    fn normalize_folds_case_punctuation_and_spacing() {
        assert_eq!(normalize("  The GREAT   Gatsby! "), "the great gatsby");
        assert_eq!(normalize("J.R.R. Tolkien"), "j r r tolkien");
        assert_eq!(normalize("Cien años"), "cien años");
    }

    #[test]
    fn ratio_counts_common_subsequence() {
        assert!(close(ratio("kitten", "sitting"), 61.538));
        assert!(close(ratio("", ""), 100.0));
        assert!(close(ratio("abc", ""), 0.0));
    }

    #[test]
    fn token_ratios_ignore_order_and_extra_tokens() {
        assert!(close(token_sort_ratio("gatsby great", "great gatsby"), 100.0));
        assert!(close(token_set_ratio("great gatsby", "the great gatsby"), 100.0));
    }

    #[test]
    fn identical_titles_score_perfectly() {
        let m = WeightedRatio;
        assert_eq!(m.similarity("THE GREAT GATSBY", "The Great Gatsby"), 100.0);
        assert_eq!(m.similarity("  the hobbit ", "The Hobbit"), 100.0);
    }

    #[test]
    fn punctuation_only_differences_fall_short_of_exact() {
        let m = WeightedRatio;
        assert_eq!(m.similarity("Persuasion!", "Persuasion!"), 100.0);
        assert_eq!(m.similarity("Persuasion!", "Persuasion"), 99.0);
        assert_eq!(m.similarity("the hobbit", "The  Hobbit."), 99.0);
    }

    #[test]
    fn near_matches_stay_below_perfect() {
        let m = WeightedRatio;
        assert!(close(m.similarity("great gatsby", "The Great Gatsby"), 95.0));
        assert!(close(m.similarity("great gatsby", "Great Expectations"), 60.0));
        assert!(close(m.similarity("Great Expectation", "Great Expectations"), 97.143));
        assert!(m.similarity("Gatsby The Great", "The Great Gatsby") < 100.0);
    }

    #[test]
    fn unrelated_text_scores_low() {
        let m = WeightedRatio;
        assert!(m.similarity("Xyzzy Nonexistent Title", "The Great Gatsby") < 50.0);
        assert_eq!(m.similarity("zzz", "The Hobbit"), 0.0);
        assert_eq!(m.similarity("!!!", "The Hobbit"), 0.0);
    }
}
