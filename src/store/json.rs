use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::category::Category;
use crate::model::round::{RoundInputs, RoundResult};
use crate::model::team::TeamId;
use crate::store::{ResultsRepository, ResultsStore, StoreError};

/// Results store persisted as one pretty-printed JSON document, read whole
/// and rewritten whole.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ResultsRepository for JsonFileRepository {
    fn load(&self) -> Result<ResultsStore, StoreError> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "results store not found; starting empty");
            return Ok(ResultsStore::new());
        }
        let text = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let store = parse_document(&text, &self.path)?;
        tracing::debug!(
            path = %self.path.display(),
            academic_teams = store.team_count(Category::Academic),
            clubs_teams = store.team_count(Category::Clubs),
            "loaded results store"
        );
        Ok(store)
    }

    fn save(&self, store: &ResultsStore) -> Result<(), StoreError> {
        let json = render_document(store)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), "saved results store");
        Ok(())
    }
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    static_scores: BTreeMap<String, BTreeMap<String, f64>>,
    #[serde(default)]
    penalties: BTreeMap<String, BTreeMap<String, f64>>,
    #[serde(default)]
    penalty_reasons: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(flatten)]
    categories: BTreeMap<String, BTreeMap<String, Vec<RawEntry>>>,
}

/// Older documents stored a bare score per round.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Score(f64),
    Record(RawRecord),
}

#[derive(Deserialize)]
struct RawRecord {
    #[serde(default)]
    round: Option<usize>,
    #[serde(default)]
    inputs: RoundInputs,
    #[serde(default)]
    score: Option<f64>,
}

#[derive(Serialize)]
struct DocumentOut<'a> {
    #[serde(flatten)]
    categories: BTreeMap<&'static str, BTreeMap<TeamId, &'a [RoundResult]>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    static_scores: BTreeMap<&'static str, BTreeMap<TeamId, f64>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    penalties: BTreeMap<&'static str, BTreeMap<TeamId, f64>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    penalty_reasons: BTreeMap<&'static str, BTreeMap<TeamId, &'a str>>,
}

pub fn parse_document(text: &str, path: &Path) -> Result<ResultsStore, StoreError> {
    let corrupt = |reason: String| StoreError::Corrupt {
        path: path.to_path_buf(),
        reason,
    };
    let raw: RawDocument = serde_json::from_str(text).map_err(|e| corrupt(e.to_string()))?;

    let mut store = ResultsStore::new();
    for (category_key, teams) in raw.categories {
        let category = category_key.parse::<Category>().map_err(corrupt)?;
        for (team_key, entries) in teams {
            let team = parse_team_id(&team_key).map_err(corrupt)?;
            for (position, entry) in entries.into_iter().enumerate() {
                let result = match entry {
                    RawEntry::Score(score) => RoundResult {
                        round: position,
                        inputs: RoundInputs::default(),
                        score: Some(score),
                    },
                    RawEntry::Record(record) => RoundResult {
                        round: record.round.unwrap_or(position),
                        inputs: record.inputs,
                        score: record.score,
                    },
                };
                let round = result.round;
                if store.upsert_round(category, team, result) {
                    tracing::warn!(
                        %category,
                        team,
                        round,
                        "duplicate round entry in results store; keeping the later one"
                    );
                }
            }
        }
    }

    for (category_key, scores) in raw.static_scores {
        let category = category_key.parse::<Category>().map_err(corrupt)?;
        for (team_key, score) in scores {
            let team = parse_team_id(&team_key).map_err(corrupt)?;
            store.set_static_score(category, team, score);
        }
    }

    let mut reasons = BTreeMap::new();
    for (category_key, by_team) in raw.penalty_reasons {
        let category = category_key.parse::<Category>().map_err(corrupt)?;
        for (team_key, reason) in by_team {
            let team = parse_team_id(&team_key).map_err(corrupt)?;
            reasons.insert((category, team), reason);
        }
    }

    for (category_key, amounts) in raw.penalties {
        let category = category_key.parse::<Category>().map_err(corrupt)?;
        for (team_key, amount) in amounts {
            let team = parse_team_id(&team_key).map_err(corrupt)?;
            let reason = reasons.remove(&(category, team));
            store.set_penalty(category, team, amount, reason);
        }
    }
    if !reasons.is_empty() {
        tracing::debug!(dropped = reasons.len(), "penalty reasons without a penalty ignored");
    }

    Ok(store)
}

pub fn render_document(store: &ResultsStore) -> Result<String, StoreError> {
    let mut doc = DocumentOut {
        categories: BTreeMap::new(),
        static_scores: BTreeMap::new(),
        penalties: BTreeMap::new(),
        penalty_reasons: BTreeMap::new(),
    };
    for category in Category::ALL {
        let teams = store.teams(category).collect::<BTreeMap<_, _>>();
        doc.categories.insert(category.name(), teams);

        let mut statics = BTreeMap::new();
        let mut penalties = BTreeMap::new();
        let mut reasons = BTreeMap::new();
        for team in store_team_ids(store, category) {
            if let Some(score) = store.static_score(category, team) {
                statics.insert(team, score);
            }
            if let Some(amount) = store.penalty(category, team) {
                penalties.insert(team, amount);
            }
            if let Some(reason) = store.penalty_reason(category, team) {
                reasons.insert(team, reason);
            }
        }
        if !statics.is_empty() {
            doc.static_scores.insert(category.name(), statics);
        }
        if !penalties.is_empty() {
            doc.penalties.insert(category.name(), penalties);
        }
        if !reasons.is_empty() {
            doc.penalty_reasons.insert(category.name(), reasons);
        }
    }
    Ok(serde_json::to_string_pretty(&doc)?)
}

fn store_team_ids(store: &ResultsStore, category: Category) -> Vec<TeamId> {
    let mut ids = store.teams(category).map(|(id, _)| id).collect::<Vec<_>>();
    ids.extend(store.side_map_team_ids(category));
    ids.sort_unstable();
    ids.dedup();
    ids
}

fn parse_team_id(key: &str) -> Result<TeamId, String> {
    key.trim()
        .parse::<TeamId>()
        .map_err(|_| format!("invalid team id key: {key:?}"))
}

#[cfg(test)]
#[path = "../../tests/src_inline/store/json.rs"]
mod tests;
