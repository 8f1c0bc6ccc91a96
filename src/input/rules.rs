use std::path::Path;

use crate::input::{InputError, read_text};
use crate::model::rules::ScoringRules;

/// Reads a JSON rule profile. Absent keys take the `default_v1` values.
pub fn load_rules(path: &Path) -> Result<ScoringRules, InputError> {
    let text = read_text(path)?;
    let rules = serde_json::from_str::<ScoringRules>(&text).map_err(|e| InputError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    tracing::info!(path = %path.display(), "loaded scoring rules");
    Ok(rules)
}
