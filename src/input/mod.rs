use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::category::Category;
use crate::model::team::TeamId;

pub mod form;
pub mod roster;
pub mod rules;

pub use form::{parse_assignment, parse_round_form};
pub use roster::{Roster, load_roster};
pub use rules::load_rules;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse error in {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
    #[error("invalid number for {field}: {value:?}")]
    InvalidNumeric { field: String, value: String },
    #[error("invalid flag for {field}: {value:?} (use yes/no, true/false or 1/0)")]
    InvalidFlag { field: String, value: String },
    #[error("invalid takeoff distance {value:?} (use 20, 40 or 60)")]
    InvalidTakeoff { value: String },
    #[error("unknown input field: {0}")]
    UnknownField(String),
    #[error("malformed assignment {0:?} (expected KEY=VALUE)")]
    MalformedAssignment(String),
    #[error("team {team} is not in the {category} roster")]
    UnknownTeam { category: Category, team: TeamId },
}

pub(crate) fn read_text(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })
}
