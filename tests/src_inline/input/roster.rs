use super::*;

const ROSTER: &str = r#"{
    "Academic": [
        {"id": 1, "name": "Falcon", "organization": "North Tech"},
        {"id": 4, "name": "Kestrel"}
    ],
    "clubs": [
        {"id": 2, "name": "Sky Riders", "organization": "Valley Aero Club"}
    ]
}"#;

#[test]
fn test_parse_roster_keeps_order_per_category() {
    let roster = parse_roster(ROSTER, Path::new("teams.json")).unwrap();
    let academic = roster.teams(Category::Academic);
    assert_eq!(academic.len(), 2);
    assert_eq!(academic[0].name, "Falcon");
    assert_eq!(academic[1].id, 4);
    assert_eq!(academic[1].organization, "");
    assert_eq!(roster.teams(Category::Clubs)[0].organization, "Valley Aero Club");
}

#[test]
fn test_find_and_require() {
    let roster = parse_roster(ROSTER, Path::new("teams.json")).unwrap();
    assert_eq!(roster.find(Category::Clubs, 2).map(|t| t.name.as_str()), Some("Sky Riders"));
    assert!(roster.find(Category::Clubs, 1).is_none());
    let err = roster.require(Category::Academic, 9).unwrap_err();
    assert!(matches!(
        err,
        InputError::UnknownTeam {
            category: Category::Academic,
            team: 9
        }
    ));
}

#[test]
fn test_missing_category_is_empty() {
    let roster = parse_roster(r#"{"Academic": []}"#, Path::new("teams.json")).unwrap();
    assert!(roster.teams(Category::Clubs).is_empty());
}

#[test]
fn test_duplicate_team_id_rejected() {
    let text = r#"{"Clubs": [{"id": 3, "name": "A"}, {"id": 3, "name": "B"}]}"#;
    let err = parse_roster(text, Path::new("teams.json")).unwrap_err();
    match err {
        InputError::Parse { reason, .. } => assert!(reason.contains("duplicate team id 3")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_category_rejected() {
    let err = parse_roster(r#"{"Open": []}"#, Path::new("teams.json")).unwrap_err();
    assert!(matches!(err, InputError::Parse { .. }));
}

#[test]
fn test_load_roster_missing_file() {
    let path = std::env::temp_dir().join(format!(
        "uav_scorekeeper_no_roster_{}.json",
        std::process::id()
    ));
    let err = load_roster(&path).unwrap_err();
    assert!(matches!(err, InputError::Io { .. }));
}
