use crate::model::category::Category;
use crate::model::rules::ScoringRules;
use crate::model::team::TeamId;
use crate::pipeline::round2;
use crate::store::ResultsStore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonTotal {
    /// Mean of the round scores after dropping the worst one.
    pub rounds: f64,
    pub static_score: f64,
    pub penalty: f64,
    pub total: f64,
}

/// Drops exactly one instance of the lowest score and averages the rest.
pub fn total_score(round_scores: &[f64]) -> f64 {
    match round_scores {
        [] => 0.0,
        [single] => *single,
        _ => {
            let mut worst = 0usize;
            for (i, score) in round_scores.iter().enumerate() {
                if *score < round_scores[worst] {
                    worst = i;
                }
            }
            let kept = round_scores
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != worst)
                .map(|(_, s)| *s)
                .sum::<f64>();
            round2(kept / (round_scores.len() - 1) as f64)
        }
    }
}

/// Static score and penalty apply once at season level.
pub fn season_total(round_scores: &[f64], static_score: f64, penalty: f64) -> SeasonTotal {
    let rounds = total_score(round_scores);
    SeasonTotal {
        rounds,
        static_score,
        penalty,
        total: round2(rounds + static_score - penalty),
    }
}

/// Static score recorded for the team, or the category default.
pub fn resolve_static_score(
    store: &ResultsStore,
    category: Category,
    team: TeamId,
    rules: &ScoringRules,
) -> f64 {
    store
        .static_score(category, team)
        .unwrap_or_else(|| rules.static_score_default.get(category))
}

pub fn resolve_penalty(store: &ResultsStore, category: Category, team: TeamId) -> f64 {
    store.penalty(category, team).unwrap_or(0.0)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_season.rs"]
mod tests;
