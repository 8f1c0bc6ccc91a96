use std::collections::BTreeMap;

use super::*;
use crate::model::round::{RoundInputs, RoundResult};
use crate::model::team::Team;

fn team(id: TeamId, name: &str) -> Team {
    Team {
        id,
        name: name.to_string(),
        organization: String::new(),
    }
}

fn roster(category: Category, teams: Vec<Team>) -> Roster {
    let mut map = BTreeMap::new();
    map.insert(category, teams);
    Roster::new(map)
}

fn cached(round: usize, score: f64) -> RoundResult {
    let mut r = RoundResult::new(round, RoundInputs::default());
    r.score = Some(score);
    r
}

fn complete(payload: f64) -> RoundInputs {
    RoundInputs {
        unloaded_payload: Some(payload),
        requested_payload: Some(payload),
        circuit_time: Some(60.0),
        glide_time: Some(10.0),
        altitude: Some(0.0),
        loading_time: Some(30.0),
        takeoff_distance: Some(60.0),
        team_pilot: Some(true),
        legal_flight: Some(true),
        good_landing: Some(true),
        no_replacement_parts: Some(true),
    }
}

#[test]
fn test_competition_ranks() {
    assert_eq!(competition_ranks(&[100.0, 100.0, 80.0]), vec![1, 1, 3]);
    assert_eq!(competition_ranks(&[90.0, 80.0, 80.0, 70.0]), vec![1, 2, 2, 4]);
    assert!(competition_ranks(&[]).is_empty());
}

#[test]
fn test_rank_category_with_tie() {
    let mut store = ResultsStore::new();
    store.upsert_round(Category::Clubs, 1, cached(0, 100.0));
    store.upsert_round(Category::Clubs, 2, cached(0, 100.0));
    store.upsert_round(Category::Clubs, 3, cached(0, 80.0));
    let roster = roster(
        Category::Clubs,
        vec![team(3, "Gamma"), team(1, "Alpha"), team(2, "Beta")],
    );

    let ranking = rank_category(&store, &roster, Category::Clubs, &ScoringRules::default_v1());
    let ranks = ranking
        .rows
        .iter()
        .map(|r| (r.team_id, r.rank, r.season.total))
        .collect::<Vec<_>>();
    assert_eq!(ranks[2], (3, 3, 80.0));
    assert_eq!(ranks[0].1, 1);
    assert_eq!(ranks[1].1, 1);
    assert_eq!(ranking.round_count, 1);
    assert!(ranking.updates.is_empty());
}

#[test]
fn test_rank_category_adds_static_and_penalty() {
    let mut store = ResultsStore::new();
    store.upsert_round(Category::Academic, 5, cached(0, 300.0));
    store.upsert_round(Category::Academic, 5, cached(1, 500.0));
    store.set_penalty(Category::Academic, 5, 20.0, Some("late".to_string()));
    let roster = roster(Category::Academic, vec![team(5, "Falcon"), team(6, "Idle")]);

    let ranking = rank_category(&store, &roster, Category::Academic, &ScoringRules::default_v1());
    let first = &ranking.rows[0];
    assert_eq!(first.team_id, 5);
    assert_eq!(first.round_scores, vec![Some(300.0), Some(500.0)]);
    assert_eq!(first.season.total, 500.0 + 250.0 - 20.0);
    assert_eq!(first.penalty_reason.as_deref(), Some("late"));

    let idle = &ranking.rows[1];
    assert_eq!(idle.round_scores, vec![None, None]);
    assert_eq!(idle.season.total, 250.0);
}

#[test]
fn test_teams_outside_roster_are_not_ranked() {
    let mut store = ResultsStore::new();
    store.upsert_round(Category::Clubs, 99, cached(0, 900.0));
    let roster = roster(Category::Clubs, vec![team(1, "Alpha")]);
    let ranking = rank_category(&store, &roster, Category::Clubs, &ScoringRules::default_v1());
    assert_eq!(ranking.rows.len(), 1);
    assert_eq!(ranking.rows[0].team_id, 1);
}

#[test]
fn test_recompute_uses_round_baselines() {
    let mut store = ResultsStore::new();
    store.upsert_round(Category::Academic, 1, RoundResult::new(0, complete(400.0)));
    store.upsert_round(Category::Academic, 2, RoundResult::new(0, complete(200.0)));

    let rules = ScoringRules::default_v1();
    let recomputed = recompute_category(&store, Category::Academic, &rules);
    assert_eq!(recomputed.updates.len(), 2);
    let score_of = |id: TeamId| {
        recomputed
            .team_scores
            .iter()
            .find(|(t, _)| *t == id)
            .map(|(_, s)| s[0].1)
            .unwrap()
    };
    assert!(score_of(1) > score_of(2));
    // leader: 150 + 150 + 100 + 0 + 100 at takeoff 60 m
    assert_eq!(score_of(1), 500.0);
}

#[test]
fn test_incomplete_entry_falls_back_to_cached_score() {
    let mut store = ResultsStore::new();
    let mut inputs = complete(400.0);
    inputs.glide_time = None;
    let mut entry = RoundResult::new(0, inputs);
    entry.score = Some(321.0);
    store.upsert_round(Category::Academic, 1, entry);

    let recomputed = recompute_category(&store, Category::Academic, &ScoringRules::default_v1());
    assert!(recomputed.updates.is_empty());
    assert_eq!(recomputed.team_scores[0].1, vec![(0, 321.0)]);
}

#[test]
fn test_persist_scores_counts_changes() {
    let mut store = ResultsStore::new();
    store.upsert_round(Category::Clubs, 1, RoundResult::new(0, complete(400.0)));
    let rules = ScoringRules::default_v1();

    let first = recompute_category(&store, Category::Clubs, &rules);
    assert_eq!(persist_scores(&mut store, Category::Clubs, &first.updates), 1);
    let cached = store.round_entry(Category::Clubs, 1, 0).and_then(|r| r.score);
    assert_eq!(cached, Some(first.updates[0].score));

    let second = recompute_category(&store, Category::Clubs, &rules);
    assert_eq!(persist_scores(&mut store, Category::Clubs, &second.updates), 0);
}
