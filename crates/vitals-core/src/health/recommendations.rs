//! Recommendation list construction

use super::types::Metric;

/// Generic tips appended when few metrics need attention.
///
/// Each entry is `(keyword, text)`; a filler is skipped when any collected
/// recommendation already mentions its keyword.
pub const FILLER_RECOMMENDATIONS: [(&str, &str); 3] = [
    (
        "automat",
        "Set up automatic transfers to your savings account to make saving easier",
    ),
    (
        "budget",
        "Create a detailed budget to track and control your spending",
    ),
    (
        "review",
        "Review your subscriptions and recurring expenses to identify potential savings",
    ),
];

/// Build the ranked recommendation list.
///
/// Collects the recommendation of every non-good metric in metric order,
/// keeping repeated texts so each flagged metric contributes one entry. When
/// fewer than `min` were collected, fillers not already covered are appended.
/// The result is truncated to `max` entries. Deterministic and
/// order-preserving for identical input.
pub fn build_recommendations<'a, I>(metrics: I, min: usize, max: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a Metric>,
{
    let mut flagged: Vec<&Metric> = metrics
        .into_iter()
        .filter(|m| !m.status.is_good())
        .collect();
    flagged.sort_by_key(|m| m.kind);

    let mut recommendations: Vec<String> = flagged
        .into_iter()
        .map(|m| m.recommendation.clone())
        .collect();

    if recommendations.len() < min {
        for (keyword, text) in FILLER_RECOMMENDATIONS {
            let covered = recommendations
                .iter()
                .any(|r| r == text || r.to_lowercase().contains(keyword));
            if !covered {
                recommendations.push(text.to_string());
            }
        }
    }

    recommendations.truncate(max);
    recommendations
}
