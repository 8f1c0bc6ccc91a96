use super::*;

#[test]
fn test_total_score_edge_cases() {
    assert_eq!(total_score(&[]), 0.0);
    assert_eq!(total_score(&[412.5]), 412.5);
    assert_eq!(total_score(&[10.0, 20.0, 30.0]), 25.0);
}

#[test]
fn test_total_score_drops_only_one_tied_lowest() {
    assert_eq!(total_score(&[10.0, 10.0, 40.0]), 25.0);
    assert_eq!(total_score(&[50.0, 50.0]), 50.0);
}

#[test]
fn test_total_score_rounds_to_cents() {
    assert_eq!(total_score(&[0.0, 100.0, 100.0, 101.0]), 100.33);
}

#[test]
fn test_season_total_applies_static_and_penalty_once() {
    let s = season_total(&[600.0, 500.0, 700.0], 250.0, 30.0);
    assert_eq!(s.rounds, 650.0);
    assert_eq!(s.static_score, 250.0);
    assert_eq!(s.penalty, 30.0);
    assert_eq!(s.total, 870.0);
}

#[test]
fn test_resolve_static_and_penalty_defaults() {
    let rules = ScoringRules::default_v1();
    let mut store = ResultsStore::new();
    assert_eq!(resolve_static_score(&store, Category::Academic, 1, &rules), 250.0);
    assert_eq!(resolve_static_score(&store, Category::Clubs, 1, &rules), 0.0);
    assert_eq!(resolve_penalty(&store, Category::Clubs, 1), 0.0);

    store.set_static_score(Category::Academic, 1, 180.0);
    store.set_penalty(Category::Clubs, 1, 12.0, None);
    assert_eq!(resolve_static_score(&store, Category::Academic, 1, &rules), 180.0);
    assert_eq!(resolve_penalty(&store, Category::Clubs, 1), 12.0);
}
