use serde::Serialize;
use tracing::debug;

use crate::core::types::{MatchSource, MatchTier};
use crate::matching::engine::{ExerciseFieldScores, ExerciseMatch};

/// Minimum score for a fuzzy match to be used for filtering
pub const PATH_MATCH_THRESHOLD: u8 = 70;

/// Score of an exact (case-insensitive) match
const EXACT_SCORE: u8 = 100;

/// How a log is filtered for an exercise query, with the data each method needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum FilterStrategy {
    /// An exercise field equals the query
    ExerciseFieldExact { key: String },
    /// A file basename equals the query
    FilenameExact { matches: Vec<ExerciseMatch> },
    /// Best fuzzy match is an exercise field
    ExerciseField { key: String, score: u8 },
    /// Best fuzzy match is a file basename
    Filename { matches: Vec<ExerciseMatch> },
    /// Nothing matched well enough
    None,
}

impl FilterStrategy {
    /// Stable name of the strategy
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::ExerciseFieldExact { .. } => "exercise_field_exact",
            Self::FilenameExact { .. } => "filename_exact",
            Self::ExerciseField { .. } => "exercise_field",
            Self::Filename { .. } => "filename",
            Self::None => "none",
        }
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Where the winning candidate came from
    #[must_use]
    pub fn source(&self) -> Option<MatchSource> {
        match self {
            Self::ExerciseFieldExact { .. } | Self::ExerciseField { .. } => {
                Some(MatchSource::ExerciseField)
            }
            Self::FilenameExact { .. } | Self::Filename { .. } => Some(MatchSource::Filename),
            Self::None => None,
        }
    }

    /// Score of the winning candidate
    #[must_use]
    pub fn score(&self) -> Option<u8> {
        match self {
            Self::ExerciseFieldExact { .. } => Some(EXACT_SCORE),
            Self::ExerciseField { score, .. } => Some(*score),
            Self::FilenameExact { matches } | Self::Filename { matches } => {
                matches.first().map(|m| m.score)
            }
            Self::None => None,
        }
    }

    /// Tier of the winning candidate's score
    #[must_use]
    pub fn tier(&self) -> MatchTier {
        self.score().map_or(MatchTier::NoMatch, MatchTier::from_score)
    }
}

/// Pick the filtering strategy for an exercise query.
///
/// In exact mode an exercise field scoring 100 wins, then file basenames
/// scoring 100, otherwise nothing.
///
/// In fuzzy mode the best filename score and the best exercise-field score
/// are compared. Filenames win when they reach [`PATH_MATCH_THRESHOLD`] and
/// are at least as good as the best field; a tie goes to filenames.
#[must_use]
pub fn select_strategy(
    file_matches: &[ExerciseMatch],
    field_scores: &ExerciseFieldScores,
    exact_match_requested: bool,
    query: &str,
) -> FilterStrategy {
    let strategy = if exact_match_requested {
        select_exact(file_matches, field_scores)
    } else {
        select_fuzzy(file_matches, field_scores)
    };

    debug!(
        query,
        exact_match = exact_match_requested,
        strategy = strategy.tag(),
        "selected exercise filter strategy"
    );
    strategy
}

fn select_fuzzy(file_matches: &[ExerciseMatch], field_scores: &ExerciseFieldScores) -> FilterStrategy {
    let best_file_score = file_matches.iter().map(|m| m.score).max().unwrap_or(0);
    let best_field = field_scores.best();
    let best_field_score = best_field.map_or(0, |(_, s)| s);

    if best_file_score >= PATH_MATCH_THRESHOLD && best_file_score >= best_field_score {
        let matches = file_matches
            .iter()
            .filter(|m| m.score == best_file_score)
            .cloned()
            .collect();
        return FilterStrategy::Filename { matches };
    }

    match best_field {
        Some((key, score)) if score >= PATH_MATCH_THRESHOLD => FilterStrategy::ExerciseField {
            key: key.to_string(),
            score,
        },
        _ => FilterStrategy::None,
    }
}

fn select_exact(file_matches: &[ExerciseMatch], field_scores: &ExerciseFieldScores) -> FilterStrategy {
    if let Some((key, _)) = field_scores.iter().find(|&(_, score)| score == EXACT_SCORE) {
        return FilterStrategy::ExerciseFieldExact {
            key: key.to_string(),
        };
    }

    let mut matches: Vec<ExerciseMatch> = file_matches
        .iter()
        .filter(|m| m.score == EXACT_SCORE)
        .cloned()
        .collect();
    if matches.is_empty() {
        return FilterStrategy::None;
    }

    // Stable: ties keep scan order
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    FilterStrategy::FilenameExact { matches }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_match(name: &str, score: u8, path: &str) -> ExerciseMatch {
        ExerciseMatch {
            candidate_name: name.to_string(),
            score,
            source_file_path: path.to_string(),
            strategy_tag: MatchSource::Filename,
        }
    }

    fn fields(entries: &[(&str, u8)]) -> ExerciseFieldScores {
        let mut scores = ExerciseFieldScores::new();
        for (key, score) in entries {
            scores.insert(*key, *score);
        }
        scores
    }

    #[test]
    fn test_exact_prefers_field() {
        let files = vec![file_match("Squat", 100, "a/Squat.md")];
        let scores = fields(&[("Back Squat", 80), ("squat", 100)]);

        let strategy = select_strategy(&files, &scores, true, "Squat");
        assert_eq!(
            strategy,
            FilterStrategy::ExerciseFieldExact {
                key: "squat".to_string()
            }
        );
    }

    #[test]
    fn test_exact_falls_back_to_filename() {
        let files = vec![
            file_match("Squat", 100, "a/Squat.md"),
            file_match("Squat Jump", 90, "a/Squat Jump.md"),
            file_match("squat", 100, "b/squat.md"),
        ];
        let scores = fields(&[("Back Squat", 80)]);

        let strategy = select_strategy(&files, &scores, true, "Squat");
        let FilterStrategy::FilenameExact { matches } = strategy else {
            panic!("expected filename_exact, got {strategy:?}");
        };
        let paths: Vec<_> = matches.iter().map(|m| m.source_file_path.as_str()).collect();
        assert_eq!(paths, vec!["a/Squat.md", "b/squat.md"]);
    }

    #[test]
    fn test_exact_without_exact_candidates_is_none() {
        let files = vec![file_match("Bench Press", 90, "a/Bench Press.md")];
        let scores = fields(&[("Bench Press", 90)]);
        assert_eq!(
            select_strategy(&files, &scores, true, "Bench"),
            FilterStrategy::None
        );
    }

    #[test]
    fn test_fuzzy_filename_wins_tie() {
        let files = vec![
            file_match("Bench Press", 90, "a/Bench Press.md"),
            file_match("Bench", 100, "a/Bench.md"),
        ];
        let scores = fields(&[("Bench", 100)]);

        let strategy = select_strategy(&files, &scores, false, "Bench");
        assert_eq!(
            strategy,
            FilterStrategy::Filename {
                matches: vec![file_match("Bench", 100, "a/Bench.md")]
            }
        );
    }

    #[test]
    fn test_fuzzy_field_beats_weaker_filename() {
        let files = vec![file_match("Bench Press", 80, "a/Bench Press.md")];
        let scores = fields(&[("Press", 90), ("Bench Press", 90)]);

        let strategy = select_strategy(&files, &scores, false, "Press");
        assert_eq!(
            strategy,
            FilterStrategy::ExerciseField {
                key: "Press".to_string(),
                score: 90
            }
        );
    }

    #[test]
    fn test_fuzzy_below_threshold_is_none() {
        let files = vec![file_match("Leg Press Machine", 60, "a/Leg Press Machine.md")];
        let scores = fields(&[("Hammercurls", 50)]);
        assert!(select_strategy(&files, &scores, false, "curl").is_none());
    }

    #[test]
    fn test_fuzzy_filename_below_threshold_falls_to_field() {
        let files = vec![file_match("Press", 60, "a/Press.md")];
        let scores = fields(&[("Bench Press", 70)]);
        assert_eq!(
            select_strategy(&files, &scores, false, "Press Bench").tag(),
            "exercise_field"
        );
    }

    #[test]
    fn test_source_score_and_tier() {
        let field = FilterStrategy::ExerciseField {
            key: "Bench Press".to_string(),
            score: 90,
        };
        assert_eq!(field.source(), Some(MatchSource::ExerciseField));
        assert_eq!(field.score(), Some(90));
        assert_eq!(field.tier(), MatchTier::Prefix);

        let exact = FilterStrategy::ExerciseFieldExact {
            key: "Squat".to_string(),
        };
        assert_eq!(exact.tier(), MatchTier::Exact);

        let files = FilterStrategy::Filename {
            matches: vec![file_match("Squat Jump", 80, "a/Squat Jump.md")],
        };
        assert_eq!(files.source(), Some(MatchSource::Filename));
        assert_eq!(files.tier(), MatchTier::Suffix);

        assert_eq!(FilterStrategy::None.source(), None);
        assert_eq!(FilterStrategy::None.tier(), MatchTier::NoMatch);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(select_strategy(&[], &ExerciseFieldScores::new(), false, "Squat").is_none());
        assert!(select_strategy(&[], &ExerciseFieldScores::new(), true, "Squat").is_none());
    }
}
