use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::category::Category;
use crate::model::round::{RoundInputs, RoundResult};
use crate::model::team::TeamId;

pub mod json;

pub use json::JsonFileRepository;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("results store {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },
    #[error("failed to serialize results store: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("no round {round} recorded for team {team} in {category}")]
    RoundNotFound {
        category: Category,
        team: TeamId,
        round: usize,
    },
}

/// Load/save boundary for the results store. Callers read the whole store,
/// mutate the in-memory copy and save it back; last writer wins.
pub trait ResultsRepository {
    fn load(&self) -> Result<ResultsStore, StoreError>;
    fn save(&self, store: &ResultsStore) -> Result<(), StoreError>;
}

/// In-memory results: category -> team -> rounds ordered by round index,
/// plus static score and penalty side maps keyed the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsStore {
    results: BTreeMap<Category, BTreeMap<TeamId, Vec<RoundResult>>>,
    static_scores: BTreeMap<Category, BTreeMap<TeamId, f64>>,
    penalties: BTreeMap<Category, BTreeMap<TeamId, f64>>,
    penalty_reasons: BTreeMap<Category, BTreeMap<TeamId, String>>,
}

impl Default for ResultsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultsStore {
    pub fn new() -> Self {
        let mut results = BTreeMap::new();
        for category in Category::ALL {
            results.insert(category, BTreeMap::new());
        }
        Self {
            results,
            static_scores: BTreeMap::new(),
            penalties: BTreeMap::new(),
            penalty_reasons: BTreeMap::new(),
        }
    }

    pub fn teams(&self, category: Category) -> impl Iterator<Item = (TeamId, &[RoundResult])> {
        self.results
            .get(&category)
            .into_iter()
            .flat_map(|teams| teams.iter().map(|(id, rounds)| (*id, rounds.as_slice())))
    }

    pub fn team_count(&self, category: Category) -> usize {
        self.results.get(&category).map_or(0, BTreeMap::len)
    }

    pub fn team_rounds(&self, category: Category, team: TeamId) -> &[RoundResult] {
        self.results
            .get(&category)
            .and_then(|teams| teams.get(&team))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn round_entry(&self, category: Category, team: TeamId, round: usize) -> Option<&RoundResult> {
        self.team_rounds(category, team)
            .iter()
            .find(|r| r.round == round)
    }

    /// Every team's entry at `round` in `category`.
    pub fn round_entries(
        &self,
        category: Category,
        round: usize,
    ) -> impl Iterator<Item = (TeamId, &RoundResult)> {
        self.teams(category).filter_map(move |(id, rounds)| {
            rounds.iter().find(|r| r.round == round).map(|r| (id, r))
        })
    }

    /// Number of round columns: one past the highest round index recorded.
    pub fn round_count(&self, category: Category) -> usize {
        self.teams(category)
            .flat_map(|(_, rounds)| rounds.iter().map(|r| r.round + 1))
            .max()
            .unwrap_or(0)
    }

    /// Inserts `entry`, replacing any entry with the same round index.
    /// Returns true when an existing entry was replaced.
    pub fn upsert_round(&mut self, category: Category, team: TeamId, entry: RoundResult) -> bool {
        let rounds = self
            .results
            .entry(category)
            .or_default()
            .entry(team)
            .or_default();
        match rounds.binary_search_by_key(&entry.round, |r| r.round) {
            Ok(pos) => {
                rounds[pos] = entry;
                true
            }
            Err(pos) => {
                rounds.insert(pos, entry);
                false
            }
        }
    }

    pub fn update_round(
        &mut self,
        category: Category,
        team: TeamId,
        round: usize,
        inputs: &RoundInputs,
    ) -> Result<&mut RoundResult, StoreError> {
        let entry = self
            .entry_mut(category, team, round)
            .ok_or(StoreError::RoundNotFound {
                category,
                team,
                round,
            })?;
        entry.inputs.merge(inputs);
        entry.score = None;
        Ok(entry)
    }

    pub fn delete_round(
        &mut self,
        category: Category,
        team: TeamId,
        round: usize,
    ) -> Result<RoundResult, StoreError> {
        let rounds = self
            .results
            .get_mut(&category)
            .and_then(|teams| teams.get_mut(&team));
        let pos = rounds
            .as_ref()
            .and_then(|rounds| rounds.iter().position(|r| r.round == round));
        match (rounds, pos) {
            (Some(rounds), Some(pos)) => Ok(rounds.remove(pos)),
            _ => Err(StoreError::RoundNotFound {
                category,
                team,
                round,
            }),
        }
    }

    /// Writes a derived score into the cached `score` field. Returns false
    /// when no entry exists for that round.
    pub fn set_score(&mut self, category: Category, team: TeamId, round: usize, score: f64) -> bool {
        match self.entry_mut(category, team, round) {
            Some(entry) => {
                entry.score = Some(score);
                true
            }
            None => false,
        }
    }

    pub fn static_score(&self, category: Category, team: TeamId) -> Option<f64> {
        self.static_scores
            .get(&category)
            .and_then(|m| m.get(&team))
            .copied()
    }

    pub fn set_static_score(&mut self, category: Category, team: TeamId, score: f64) {
        self.static_scores
            .entry(category)
            .or_default()
            .insert(team, score);
    }

    pub fn penalty(&self, category: Category, team: TeamId) -> Option<f64> {
        self.penalties
            .get(&category)
            .and_then(|m| m.get(&team))
            .copied()
    }

    pub fn penalty_reason(&self, category: Category, team: TeamId) -> Option<&str> {
        self.penalty_reasons
            .get(&category)
            .and_then(|m| m.get(&team))
            .map(String::as_str)
    }

    pub fn set_penalty(&mut self, category: Category, team: TeamId, amount: f64, reason: Option<String>) {
        self.penalties
            .entry(category)
            .or_default()
            .insert(team, amount);
        let reasons = self.penalty_reasons.entry(category).or_default();
        match reason {
            Some(reason) => {
                reasons.insert(team, reason);
            }
            None => {
                reasons.remove(&team);
            }
        }
    }

    pub fn clear_penalty(&mut self, category: Category, team: TeamId) {
        if let Some(m) = self.penalties.get_mut(&category) {
            m.remove(&team);
        }
        if let Some(m) = self.penalty_reasons.get_mut(&category) {
            m.remove(&team);
        }
    }

    /// Teams with a static score, penalty or penalty reason recorded.
    pub fn side_map_team_ids(&self, category: Category) -> Vec<TeamId> {
        let mut ids = Vec::new();
        if let Some(m) = self.static_scores.get(&category) {
            ids.extend(m.keys().copied());
        }
        if let Some(m) = self.penalties.get(&category) {
            ids.extend(m.keys().copied());
        }
        if let Some(m) = self.penalty_reasons.get(&category) {
            ids.extend(m.keys().copied());
        }
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    fn entry_mut(&mut self, category: Category, team: TeamId, round: usize) -> Option<&mut RoundResult> {
        self.results
            .get_mut(&category)
            .and_then(|teams| teams.get_mut(&team))
            .and_then(|rounds| rounds.iter_mut().find(|r| r.round == round))
    }
}

/// Repository kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    store: RefCell<ResultsStore>,
}

impl MemoryRepository {
    pub fn new(store: ResultsStore) -> Self {
        Self {
            store: RefCell::new(store),
        }
    }
}

impl ResultsRepository for MemoryRepository {
    fn load(&self) -> Result<ResultsStore, StoreError> {
        Ok(self.store.borrow().clone())
    }

    fn save(&self, store: &ResultsStore) -> Result<(), StoreError> {
        *self.store.borrow_mut() = store.clone();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/store/tests.rs"]
mod tests;
