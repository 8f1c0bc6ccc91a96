use std::cmp::Ordering;

use crate::input::Roster;
use crate::model::baselines::Baselines;
use crate::model::category::Category;
use crate::model::rules::ScoringRules;
use crate::model::team::TeamId;
use crate::pipeline::stage1_baselines::baselines_by_round;
use crate::pipeline::stage2_round_score::compute_round_score;
use crate::pipeline::stage3_season::{
    SeasonTotal, resolve_penalty, resolve_static_score, season_total,
};
use crate::store::ResultsStore;

/// A derived round score to be written back into the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreUpdate {
    pub team: TeamId,
    pub round: usize,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct Recomputed {
    pub category: Category,
    pub baselines: Vec<Baselines>,
    /// Score per team per stored round, in round order.
    pub team_scores: Vec<(TeamId, Vec<(usize, f64)>)>,
    pub updates: Vec<ScoreUpdate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankingRow {
    pub rank: usize,
    pub team_id: TeamId,
    pub name: String,
    pub organization: String,
    /// Indexed by round; `None` where the team has no entry.
    pub round_scores: Vec<Option<f64>>,
    pub season: SeasonTotal,
    pub penalty_reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CategoryRanking {
    pub category: Category,
    pub round_count: usize,
    pub baselines: Vec<Baselines>,
    pub rows: Vec<RankingRow>,
    pub updates: Vec<ScoreUpdate>,
}

/// Rescores every stored round of `category` against that round's
/// baselines. Pure: the store is not touched. Entries without inputs keep
/// their cached score; entries missing a required field fall back to it.
pub fn recompute_category(
    store: &ResultsStore,
    category: Category,
    rules: &ScoringRules,
) -> Recomputed {
    let baselines = baselines_by_round(store, category);
    let mut team_scores = Vec::with_capacity(store.team_count(category));
    let mut updates = Vec::new();

    for (team, rounds) in store.teams(category) {
        let mut scores = Vec::with_capacity(rounds.len());
        for entry in rounds {
            let cached = entry.score.unwrap_or(0.0);
            if !entry.has_inputs() {
                scores.push((entry.round, cached));
                continue;
            }
            let round_baselines = baselines
                .get(entry.round)
                .copied()
                .unwrap_or(Baselines::NEUTRAL);
            match compute_round_score(&entry.inputs, category, &round_baselines, rules) {
                Ok(score) => {
                    scores.push((entry.round, score));
                    updates.push(ScoreUpdate {
                        team,
                        round: entry.round,
                        score,
                    });
                }
                Err(err) => {
                    tracing::warn!(
                        %category,
                        team,
                        round = entry.round,
                        "{err}; using cached score {cached:.2}"
                    );
                    scores.push((entry.round, cached));
                }
            }
        }
        team_scores.push((team, scores));
    }

    Recomputed {
        category,
        baselines,
        team_scores,
        updates,
    }
}

/// Writes recomputed scores into the store's cached score fields and
/// returns how many entries changed.
pub fn persist_scores(store: &mut ResultsStore, category: Category, updates: &[ScoreUpdate]) -> usize {
    let mut changed = 0usize;
    for u in updates {
        let before = store
            .round_entry(category, u.team, u.round)
            .and_then(|r| r.score);
        if before != Some(u.score) && store.set_score(category, u.team, u.round, u.score) {
            changed += 1;
        }
    }
    tracing::info!(%category, changed, total = updates.len(), "persisted recomputed round scores");
    changed
}

/// Season standings for the roster teams of `category`, best first.
pub fn rank_category(
    store: &ResultsStore,
    roster: &Roster,
    category: Category,
    rules: &ScoringRules,
) -> CategoryRanking {
    let recomputed = recompute_category(store, category, rules);
    let round_count = recomputed.baselines.len();

    for (team, _) in &recomputed.team_scores {
        if roster.find(category, *team).is_none() {
            tracing::debug!(%category, team, "results recorded for a team missing from the roster");
        }
    }

    let mut rows = Vec::with_capacity(roster.teams(category).len());
    for team in roster.teams(category) {
        let scores = recomputed
            .team_scores
            .iter()
            .find(|(id, _)| *id == team.id)
            .map(|(_, s)| s.as_slice())
            .unwrap_or(&[]);

        let mut round_scores = vec![None; round_count];
        for (round, score) in scores {
            if let Some(slot) = round_scores.get_mut(*round) {
                *slot = Some(*score);
            }
        }
        let flat = scores.iter().map(|(_, s)| *s).collect::<Vec<_>>();
        let season = season_total(
            &flat,
            resolve_static_score(store, category, team.id, rules),
            resolve_penalty(store, category, team.id),
        );

        rows.push(RankingRow {
            rank: 0,
            team_id: team.id,
            name: team.name.clone(),
            organization: team.organization.clone(),
            round_scores,
            season,
            penalty_reason: store
                .penalty_reason(category, team.id)
                .map(str::to_string),
        });
    }

    rows.sort_by(|a, b| descending(a.season.total, b.season.total));
    let totals = rows.iter().map(|r| r.season.total).collect::<Vec<_>>();
    for (row, rank) in rows.iter_mut().zip(competition_ranks(&totals)) {
        row.rank = rank;
    }

    CategoryRanking {
        category,
        round_count,
        baselines: recomputed.baselines,
        rows,
        updates: recomputed.updates,
    }
}

pub fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Standard competition ranking over totals already sorted best first:
/// equal totals share a rank, the next lower total takes its 1-based
/// position (`[100, 100, 80]` -> `[1, 1, 3]`).
pub fn competition_ranks(sorted_totals: &[f64]) -> Vec<usize> {
    let mut ranks = Vec::with_capacity(sorted_totals.len());
    let mut current = 1usize;
    for (idx, total) in sorted_totals.iter().enumerate() {
        if idx > 0 && *total < sorted_totals[idx - 1] {
            current = idx + 1;
        }
        ranks.push(current);
    }
    ranks
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_ranking.rs"]
mod tests;
