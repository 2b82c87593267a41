use std::collections::HashSet;

use crate::core::types::MatchTier;

/// Score how well `candidate` matches `query`, from 0 to 100.
///
/// Both strings are trimmed and lower-cased. The first rule that applies wins:
///
/// | Rule | Score |
/// |------|-------|
/// | equal | 100 |
/// | one starts with the other | 90 |
/// | one ends with the other | 80 |
/// | every word of the shorter is a word of the longer | 70 |
/// | at least one word in common | 60 |
/// | one contains the other | 50 |
/// | otherwise | 0 |
///
/// Every rule is symmetric, so argument order does not change the score.
/// An empty string is a prefix of everything: `match_score("", "Squat")` is 90.
///
/// # Examples
///
/// ```
/// use workout_log::matching::scoring::match_score;
///
/// assert_eq!(match_score("Squat", "squat "), 100);
/// assert_eq!(match_score("Bench", "Bench Press"), 90);
/// assert_eq!(match_score("Press", "Bench Press"), 80);
/// assert_eq!(match_score("Squat", "Bench Press"), 0);
/// ```
#[must_use]
pub fn match_score(query: &str, candidate: &str) -> u8 {
    match_tier(query, candidate).score()
}

/// Like [`match_score`], but returns the rule that matched
#[must_use]
pub fn match_tier(query: &str, candidate: &str) -> MatchTier {
    let q = query.trim().to_lowercase();
    let c = candidate.trim().to_lowercase();

    if q == c {
        return MatchTier::Exact;
    }
    if q.starts_with(&c) || c.starts_with(&q) {
        return MatchTier::Prefix;
    }
    if q.ends_with(&c) || c.ends_with(&q) {
        return MatchTier::Suffix;
    }

    let q_words: HashSet<&str> = q.split_whitespace().collect();
    let c_words: HashSet<&str> = c.split_whitespace().collect();

    if is_word_subset(&q, &q_words, &c, &c_words) {
        return MatchTier::WordSubset;
    }
    if !q_words.is_disjoint(&c_words) {
        return MatchTier::SharedWord;
    }
    if q.contains(&c) || c.contains(&q) {
        return MatchTier::Substring;
    }

    MatchTier::NoMatch
}

/// All words of the shorter string appear in the longer one.
/// Equal lengths check both directions.
fn is_word_subset(a: &str, a_words: &HashSet<&str>, b: &str, b_words: &HashSet<&str>) -> bool {
    let (a_len, b_len) = (a.chars().count(), b.chars().count());
    (a_len <= b_len && a_words.is_subset(b_words)) || (b_len <= a_len && b_words.is_subset(a_words))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact() {
        assert_eq!(match_score("Squat", "Squat"), 100);
        assert_eq!(match_score("  SQUAT", "squat  "), 100);
        assert_eq!(match_score("Panca Piana", "panca piana"), 100);
    }

    #[test]
    fn test_prefix() {
        assert_eq!(match_score("Bench", "Bench Press"), 90);
        assert_eq!(match_score("Bench Press", "Bench"), 90);
    }

    #[test]
    fn test_suffix() {
        assert_eq!(match_score("Press", "Bench Press"), 80);
        assert_eq!(match_score("Incline Bench Press", "bench press"), 80);
    }

    #[test]
    fn test_word_subset() {
        // Words out of order: not a prefix, suffix or substring
        assert_eq!(match_score("Press Bench", "Incline Bench Press"), 70);
    }

    #[test]
    fn test_word_subset_uses_shorter_string() {
        // The longer side's words are all present in the shorter one, but
        // not the other way round.
        assert_eq!(match_score("row row row row", "upright row"), 60);
    }

    #[test]
    fn test_shared_word() {
        assert_eq!(match_score("Bench Press", "Leg Press Machine"), 60);
    }

    #[test]
    fn test_substring() {
        assert_eq!(match_score("curl", "Hammercurls"), 50);
        assert_eq!(match_score("Deadlift", "romanian deadlifts"), 50);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(match_score("Squat", "Bench Press"), 0);
    }

    #[test]
    fn test_empty_strings() {
        assert_eq!(match_score("", ""), 100);
        assert_eq!(match_score("", "Squat"), 90);
        assert_eq!(match_score("Squat", "   "), 90);
    }

    #[test]
    fn test_symmetric() {
        let names = [
            "Bench Press",
            "bench",
            "Press",
            "Incline Bench Press",
            "Press Bench",
            "Squat",
            "Back Squat",
            "Hammercurls",
            "curl",
            "row row row row",
            "upright row",
            "",
        ];
        for a in names {
            for b in names {
                assert_eq!(match_score(a, b), match_score(b, a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn test_scores_are_tiers() {
        let allowed = [0, 50, 60, 70, 80, 90, 100];
        for (a, b) in [("a b", "c a"), ("xyz", "wxyz1"), ("leg", "leg press")] {
            assert!(allowed.contains(&match_score(a, b)));
        }
    }

    #[test]
    fn test_match_tier() {
        assert_eq!(match_tier("Bench", "Bench Press"), MatchTier::Prefix);
        assert_eq!(match_tier("Squat", "Bench Press"), MatchTier::NoMatch);
    }
}
