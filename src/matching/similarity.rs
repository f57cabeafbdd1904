//! Fuzzy string similarity for statement descriptions
//!
//! Bank descriptions and ledger descriptions rarely agree on casing, word
//! order, or extra detail ("COFFEE SHOP - CARD 1234" vs "Coffee shop"). The
//! token-set ratio compares the whitespace-delimited token sets of the two
//! strings, so shared vocabulary scores high regardless of ordering or
//! repetition. This is the most expensive sub-score in the pipeline and is
//! only computed for candidates that survive the cheap amount/date filters.

/// Token-set similarity between two strings, in `[0.0, 1.0]`.
///
/// Tokenizes both sides on whitespace (case-insensitive), then compares the
/// three canonical combinations of the shared and distinct token sets with a
/// Levenshtein ratio, keeping the best. A string with no tokens scores 0.0
/// against anything, which degrades ranking but never blocks a run.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a = tokenize(a);
    let tokens_b = tokenize(b);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = tokens_a
        .iter()
        .filter(|t| tokens_b.contains(*t))
        .map(String::as_str)
        .collect();
    let only_a: Vec<&str> = tokens_a
        .iter()
        .filter(|t| !tokens_b.contains(*t))
        .map(String::as_str)
        .collect();
    let only_b: Vec<&str> = tokens_b
        .iter()
        .filter(|t| !tokens_a.contains(*t))
        .map(String::as_str)
        .collect();

    let base = intersection.join(" ");
    let combined_a = join_parts(&base, &only_a);
    let combined_b = join_parts(&base, &only_b);

    let ratio = levenshtein_ratio(&base, &combined_a)
        .max(levenshtein_ratio(&base, &combined_b))
        .max(levenshtein_ratio(&combined_a, &combined_b));
    ratio.clamp(0.0, 1.0)
}

/// Lowercased whitespace tokens as a sorted, deduplicated set.
///
/// Sorting makes the joined comparison strings stable for identical inputs,
/// which the matcher relies on for idempotent runs.
fn tokenize(s: &str) -> Vec<String> {
    let mut tokens: Vec<String> = s.split_whitespace().map(str::to_lowercase).collect();
    tokens.sort();
    tokens.dedup();
    tokens
}

fn join_parts(base: &str, rest: &[&str]) -> String {
    if rest.is_empty() {
        base.to_string()
    } else if base.is_empty() {
        rest.join(" ")
    } else {
        format!("{} {}", base, rest.join(" "))
    }
}

/// Levenshtein similarity in `[0.0, 1.0]`
fn levenshtein_ratio(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - (levenshtein_distance(a, b) as f64 / max_len as f64)
}

/// Classic two-row dynamic-programming edit distance
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(token_set_ratio("COFFEE SHOP", "COFFEE SHOP"), 1.0);
    }

    #[test]
    fn comparison_is_case_insensitive() {
        assert_eq!(token_set_ratio("Coffee Shop", "COFFEE SHOP"), 1.0);
    }

    #[test]
    fn token_order_does_not_matter() {
        assert_eq!(token_set_ratio("SHOP COFFEE", "coffee shop"), 1.0);
    }

    #[test]
    fn subset_descriptions_score_full() {
        // One side being a token subset of the other compares the shared
        // base against itself, so the extra card detail costs nothing.
        let score = token_set_ratio("COFFEE SHOP - CARD 1234", "coffee shop");
        assert_eq!(score, 1.0);
    }

    #[test]
    fn disjoint_descriptions_score_low() {
        let score = token_set_ratio("GROCERY MART", "PAYROLL DEPOSIT");
        assert!(score < 0.5, "score was {score}");
    }

    #[test]
    fn empty_side_scores_zero() {
        assert_eq!(token_set_ratio("", "COFFEE SHOP"), 0.0);
        assert_eq!(token_set_ratio("COFFEE SHOP", "   "), 0.0);
        assert_eq!(token_set_ratio("", ""), 0.0);
    }

    #[test]
    fn duplicate_tokens_collapse() {
        assert_eq!(token_set_ratio("coffee coffee shop", "coffee shop"), 1.0);
    }

    #[test]
    fn ratio_is_bounded() {
        for (a, b) in [
            ("AMAZON MKTPLACE PMTS", "Amazon order"),
            ("HYDRO BILL", "City of Calgary utilities"),
            ("x", "yyyyyyyyyyyy"),
        ] {
            let score = token_set_ratio(a, b);
            assert!((0.0..=1.0).contains(&score), "score was {score}");
        }
    }

    #[test]
    fn stable_for_identical_pairs() {
        let a = "INTERAC E-TRF SENT";
        let b = "e-transfer to landlord";
        assert_eq!(token_set_ratio(a, b), token_set_ratio(a, b));
    }

    #[test]
    fn distance_basics() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
    }
}
