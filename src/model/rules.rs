use serde::Deserialize;

use crate::model::category::Category;

/// Scoring rule profile. Altitude treatment and flag multipliers differ
/// between rulebook revisions; `default_v1` is the revision in use.
/// A profile file only needs the keys it changes, down to a single category.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RulesFile")]
pub struct ScoringRules {
    pub altitude: PerCategory<AltitudeRule>,
    pub flags: FlagMultipliers,
    pub static_score_default: PerCategory<f64>,
    pub leader_limits: PerCategory<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerCategory<T> {
    pub academic: T,
    pub clubs: T,
}

impl<T: Copy> PerCategory<T> {
    pub fn get(&self, category: Category) -> T {
        match category {
            Category::Academic => self.academic,
            Category::Clubs => self.clubs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AltitudeRounding {
    #[default]
    None,
    /// Round up to one decimal place.
    CeilTenth,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AltitudeRule {
    pub rounding: AltitudeRounding,
    pub cap: Option<f64>,
}

impl AltitudeRule {
    pub fn apply(&self, raw: f64) -> f64 {
        let rounded = match self.rounding {
            AltitudeRounding::None => raw,
            AltitudeRounding::CeilTenth => (raw * 10.0).ceil() / 10.0,
        };
        match self.cap {
            Some(cap) => rounded.min(cap),
            None => rounded,
        }
    }
}

/// Factors applied to the round total when a flag is in its unfavourable
/// state (external pilot, illegal flight, crash landing, replacement parts).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlagMultipliers {
    pub external_pilot: f64,
    pub illegal_flight: f64,
    pub crash_landing: f64,
    pub replacement_parts: f64,
}

impl FlagMultipliers {
    pub fn neutral() -> Self {
        Self {
            external_pilot: 1.0,
            illegal_flight: 1.0,
            crash_landing: 1.0,
            replacement_parts: 1.0,
        }
    }

    pub fn strict() -> Self {
        Self {
            external_pilot: 0.75,
            illegal_flight: 0.0,
            crash_landing: 0.5,
            replacement_parts: 1.0,
        }
    }
}

impl Default for FlagMultipliers {
    fn default() -> Self {
        Self::neutral()
    }
}

impl ScoringRules {
    pub fn default_v1() -> Self {
        Self {
            altitude: PerCategory {
                academic: AltitudeRule::default(),
                clubs: AltitudeRule::default(),
            },
            flags: FlagMultipliers::neutral(),
            static_score_default: PerCategory {
                academic: 250.0,
                clubs: 0.0,
            },
            leader_limits: PerCategory {
                academic: 10,
                clubs: 3,
            },
        }
    }

    pub fn with_strict_flags(mut self) -> Self {
        self.flags = FlagMultipliers::strict();
        self
    }
}

#[derive(Deserialize)]
struct RulesFile {
    altitude: Option<PartialPerCategory<AltitudeRule>>,
    flags: Option<FlagMultipliers>,
    static_score_default: Option<PartialPerCategory<f64>>,
    leader_limits: Option<PartialPerCategory<usize>>,
}

#[derive(Deserialize)]
struct PartialPerCategory<T> {
    academic: Option<T>,
    clubs: Option<T>,
}

fn overlay<T>(patch: Option<PartialPerCategory<T>>, base: PerCategory<T>) -> PerCategory<T> {
    match patch {
        Some(p) => PerCategory {
            academic: p.academic.unwrap_or(base.academic),
            clubs: p.clubs.unwrap_or(base.clubs),
        },
        None => base,
    }
}

impl From<RulesFile> for ScoringRules {
    fn from(file: RulesFile) -> Self {
        let base = Self::default_v1();
        Self {
            altitude: overlay(file.altitude, base.altitude),
            flags: file.flags.unwrap_or(base.flags),
            static_score_default: overlay(file.static_score_default, base.static_score_default),
            leader_limits: overlay(file.leader_limits, base.leader_limits),
        }
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self::default_v1()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/rules.rs"]
mod tests;
