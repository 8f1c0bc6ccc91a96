use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::input::{InputError, read_text};
use crate::model::category::Category;
use crate::model::team::{Team, TeamId};

/// Teams per category, in roster order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    teams: BTreeMap<Category, Vec<Team>>,
}

impl Roster {
    pub fn new(teams: BTreeMap<Category, Vec<Team>>) -> Self {
        Self { teams }
    }

    pub fn teams(&self, category: Category) -> &[Team] {
        self.teams.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find(&self, category: Category, id: TeamId) -> Option<&Team> {
        self.teams(category).iter().find(|t| t.id == id)
    }

    pub fn require(&self, category: Category, id: TeamId) -> Result<&Team, InputError> {
        self.find(category, id)
            .ok_or(InputError::UnknownTeam { category, team: id })
    }
}

pub fn load_roster(path: &Path) -> Result<Roster, InputError> {
    let text = read_text(path)?;
    let roster = parse_roster(&text, path)?;
    tracing::debug!(
        path = %path.display(),
        academic = roster.teams(Category::Academic).len(),
        clubs = roster.teams(Category::Clubs).len(),
        "loaded roster"
    );
    Ok(roster)
}

pub fn parse_roster(text: &str, path: &Path) -> Result<Roster, InputError> {
    let parse_err = |reason: String| InputError::Parse {
        path: path.to_path_buf(),
        reason,
    };
    let raw: BTreeMap<String, Vec<Team>> =
        serde_json::from_str(text).map_err(|e| parse_err(e.to_string()))?;

    let mut teams = BTreeMap::new();
    for (key, list) in raw {
        let category = key.parse::<Category>().map_err(parse_err)?;
        let mut seen = BTreeSet::new();
        for team in &list {
            if !seen.insert(team.id) {
                return Err(parse_err(format!(
                    "duplicate team id {} in {category}",
                    team.id
                )));
            }
        }
        teams.insert(category, list);
    }
    Ok(Roster::new(teams))
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/roster.rs"]
mod tests;
