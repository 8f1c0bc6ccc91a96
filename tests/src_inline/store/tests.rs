use super::*;

fn entry(round: usize, payload: f64) -> RoundResult {
    let mut inputs = RoundInputs::default();
    inputs.unloaded_payload = Some(payload);
    RoundResult::new(round, inputs)
}

#[test]
fn test_new_store_has_both_categories_empty() {
    let store = ResultsStore::new();
    for category in Category::ALL {
        assert_eq!(store.team_count(category), 0);
        assert_eq!(store.round_count(category), 0);
    }
}

#[test]
fn test_upsert_replaces_same_round_index() {
    let mut store = ResultsStore::new();
    assert!(!store.upsert_round(Category::Academic, 1, entry(0, 100.0)));
    assert!(store.upsert_round(Category::Academic, 1, entry(0, 250.0)));
    let rounds = store.team_rounds(Category::Academic, 1);
    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0].inputs.unloaded_payload, Some(250.0));
}

#[test]
fn test_upsert_keeps_round_order() {
    let mut store = ResultsStore::new();
    store.upsert_round(Category::Clubs, 7, entry(2, 1.0));
    store.upsert_round(Category::Clubs, 7, entry(0, 1.0));
    store.upsert_round(Category::Clubs, 7, entry(1, 1.0));
    let order = store
        .team_rounds(Category::Clubs, 7)
        .iter()
        .map(|r| r.round)
        .collect::<Vec<_>>();
    assert_eq!(order, vec![0, 1, 2]);
    assert_eq!(store.round_count(Category::Clubs), 3);
}

#[test]
fn test_round_entries_skip_teams_without_that_round() {
    let mut store = ResultsStore::new();
    store.upsert_round(Category::Academic, 1, entry(0, 1.0));
    store.upsert_round(Category::Academic, 2, entry(1, 1.0));
    let ids = store
        .round_entries(Category::Academic, 1)
        .map(|(id, _)| id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![2]);
}

#[test]
fn test_update_round_merges_and_clears_cached_score() {
    let mut store = ResultsStore::new();
    let mut e = entry(0, 100.0);
    e.score = Some(42.0);
    store.upsert_round(Category::Academic, 3, e);

    let mut change = RoundInputs::default();
    change.glide_time = Some(9.0);
    let updated = store
        .update_round(Category::Academic, 3, 0, &change)
        .unwrap();
    assert_eq!(updated.inputs.unloaded_payload, Some(100.0));
    assert_eq!(updated.inputs.glide_time, Some(9.0));
    assert_eq!(updated.score, None);
}

#[test]
fn test_update_and_delete_missing_round() {
    let mut store = ResultsStore::new();
    let err = store
        .update_round(Category::Clubs, 9, 4, &RoundInputs::default())
        .unwrap_err();
    assert!(matches!(err, StoreError::RoundNotFound { round: 4, .. }));
    assert!(store.delete_round(Category::Clubs, 9, 0).is_err());
}

#[test]
fn test_delete_round() {
    let mut store = ResultsStore::new();
    store.upsert_round(Category::Academic, 1, entry(0, 1.0));
    store.upsert_round(Category::Academic, 1, entry(1, 2.0));
    let removed = store.delete_round(Category::Academic, 1, 0).unwrap();
    assert_eq!(removed.round, 0);
    assert_eq!(store.team_rounds(Category::Academic, 1).len(), 1);
    assert_eq!(store.team_rounds(Category::Academic, 1)[0].round, 1);
}

#[test]
fn test_static_scores_and_penalties() {
    let mut store = ResultsStore::new();
    store.set_static_score(Category::Academic, 4, 230.0);
    store.set_penalty(Category::Academic, 4, 15.0, Some("late report".to_string()));
    assert_eq!(store.static_score(Category::Academic, 4), Some(230.0));
    assert_eq!(store.static_score(Category::Clubs, 4), None);
    assert_eq!(store.penalty(Category::Academic, 4), Some(15.0));
    assert_eq!(store.penalty_reason(Category::Academic, 4), Some("late report"));

    store.set_penalty(Category::Academic, 4, 5.0, None);
    assert_eq!(store.penalty(Category::Academic, 4), Some(5.0));
    assert_eq!(store.penalty_reason(Category::Academic, 4), None);

    store.clear_penalty(Category::Academic, 4);
    assert_eq!(store.penalty(Category::Academic, 4), None);
    assert_eq!(store.side_map_team_ids(Category::Academic), vec![4]);
}

#[test]
fn test_memory_repository_round_trip() {
    let repo = MemoryRepository::default();
    let mut store = repo.load().unwrap();
    store.upsert_round(Category::Clubs, 2, entry(0, 80.0));
    repo.save(&store).unwrap();
    assert_eq!(repo.load().unwrap(), store);
}
