use std::cmp::Ordering;

use crate::input::Roster;
use crate::model::baselines::Baselines;
use crate::model::category::Category;
use crate::model::round::RoundInputs;
use crate::model::rules::ScoringRules;
use crate::model::team::TeamId;
use crate::pipeline::stage1_baselines::get_best_values;
use crate::pipeline::stage2_round_score::{ScoreBreakdown, compute_round_breakdown};
use crate::pipeline::stage4_ranking::{competition_ranks, descending};
use crate::store::ResultsStore;

#[derive(Debug, Clone, PartialEq)]
pub struct RoundDetailRow {
    pub rank: usize,
    pub team_id: TeamId,
    pub name: String,
    pub organization: String,
    /// `None` when the team has no entry or the entry is incomplete.
    pub breakdown: Option<ScoreBreakdown>,
    pub total: f64,
    pub inputs: Option<RoundInputs>,
}

#[derive(Debug, Clone)]
pub struct RoundDetails {
    pub category: Category,
    pub round: usize,
    pub baselines: Baselines,
    pub rows: Vec<RoundDetailRow>,
}

/// Per-round table for `category`: every roster team's sub-scores and
/// total for `round`, ranked by round total.
pub fn round_details(
    store: &ResultsStore,
    roster: &Roster,
    category: Category,
    round: usize,
    rules: &ScoringRules,
) -> RoundDetails {
    let baselines = get_best_values(store, category, round);

    let mut rows = roster
        .teams(category)
        .iter()
        .map(|team| {
            let entry = store.round_entry(category, team.id, round);
            let breakdown = entry
                .and_then(|e| e.inputs.require().ok())
                .map(|m| compute_round_breakdown(&m, category, &baselines, rules));
            let total = match (breakdown, entry) {
                (Some(b), _) => b.total,
                (None, Some(e)) => e.score.unwrap_or(0.0),
                (None, None) => 0.0,
            };
            RoundDetailRow {
                rank: 0,
                team_id: team.id,
                name: team.name.clone(),
                organization: team.organization.clone(),
                breakdown,
                total,
                inputs: entry.filter(|e| e.has_inputs()).map(|e| e.inputs.clone()),
            }
        })
        .collect::<Vec<_>>();

    rows.sort_by(|a, b| descending(a.total, b.total));
    let totals = rows.iter().map(|r| r.total).collect::<Vec<_>>();
    for (row, rank) in rows.iter_mut().zip(competition_ranks(&totals)) {
        row.rank = rank;
    }

    RoundDetails {
        category,
        round,
        baselines,
        rows,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderEntry {
    pub team_id: TeamId,
    pub name: String,
    pub value: f64,
}

/// Top performers per raw metric for one round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundLeaders {
    pub category: Category,
    pub round: usize,
    pub payload: Vec<LeaderEntry>,
    pub circuit: Vec<LeaderEntry>,
    pub glide: Vec<LeaderEntry>,
    pub loading: Vec<LeaderEntry>,
}

/// Payload and glide rank highest first, circuit and loading time lowest
/// first. Teams without a value for a metric are left out of that list.
pub fn round_leaders(
    store: &ResultsStore,
    roster: &Roster,
    category: Category,
    round: usize,
    limit: usize,
) -> RoundLeaders {
    let entries = roster
        .teams(category)
        .iter()
        .filter_map(|team| {
            store
                .round_entry(category, team.id, round)
                .map(|e| (team, &e.inputs))
        })
        .collect::<Vec<_>>();

    let top = |pick: fn(&RoundInputs) -> Option<f64>, highest_first: bool| {
        let mut list = entries
            .iter()
            .filter_map(|(team, inputs)| {
                pick(inputs).map(|value| LeaderEntry {
                    team_id: team.id,
                    name: team.name.clone(),
                    value,
                })
            })
            .collect::<Vec<_>>();
        list.sort_by(|a, b| {
            let ord = a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal);
            if highest_first { ord.reverse() } else { ord }
        });
        list.truncate(limit);
        list
    };

    RoundLeaders {
        category,
        round,
        payload: top(|i| i.unloaded_payload, true),
        circuit: top(|i| i.circuit_time, false),
        glide: top(|i| i.glide_time, true),
        loading: top(|i| i.loading_time, false),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_round_details.rs"]
mod tests;
