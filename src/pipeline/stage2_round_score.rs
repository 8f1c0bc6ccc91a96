use crate::model::baselines::Baselines;
use crate::model::category::Category;
use crate::model::round::{Measurements, MissingFieldError, RoundInputs};
use crate::model::rules::ScoringRules;
use crate::pipeline::round2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub payload: f64,
    pub circuit: f64,
    pub glide: f64,
    pub altitude: f64,
    pub loading: f64,
    pub takeoff_multiplier: f64,
    /// Product of the pilot, legal-flight, landing and replacement factors.
    pub flag_multiplier: f64,
    /// Rounded to 2 decimals.
    pub total: f64,
}

pub fn compute_round_score(
    inputs: &RoundInputs,
    category: Category,
    baselines: &Baselines,
    rules: &ScoringRules,
) -> Result<f64, MissingFieldError> {
    let m = inputs.require()?;
    Ok(compute_round_breakdown(&m, category, baselines, rules).total)
}

pub fn compute_round_breakdown(
    m: &Measurements,
    category: Category,
    baselines: &Baselines,
    rules: &ScoringRules,
) -> ScoreBreakdown {
    let w = category.weights();

    let payload = if m.requested_payload > 0.0 && baselines.payload > 0.0 {
        w.payload * (m.unloaded_payload / baselines.payload) * (m.unloaded_payload / m.requested_payload)
    } else {
        0.0
    };

    let circuit = if m.circuit_time > 0.0 && baselines.circuit_time > 0.0 {
        w.circuit * (baselines.circuit_time / m.circuit_time)
    } else {
        0.0
    };

    let glide = if baselines.glide_time > 0.0 {
        w.glide * (m.glide_time / baselines.glide_time)
    } else {
        0.0
    };

    let loading = loading_score(m, baselines, w.loading);

    let altitude = rules
        .altitude
        .get(category)
        .apply(category.altitude_polynomial().eval(m.altitude));

    let takeoff = takeoff_multiplier(m.takeoff_distance);

    let f = &rules.flags;
    let legal = if m.legal_flight { 1.0 } else { f.illegal_flight };
    let landing = if m.good_landing { 1.0 } else { f.crash_landing };
    let pilot = if m.team_pilot { 1.0 } else { f.external_pilot };
    let replacement = if m.no_replacement_parts {
        1.0
    } else {
        f.replacement_parts
    };

    let base = payload + circuit + glide + altitude;
    let total = ((base * legal * landing + loading) * takeoff) * pilot * replacement;

    ScoreBreakdown {
        payload,
        circuit,
        glide,
        altitude,
        loading,
        takeoff_multiplier: takeoff,
        flag_multiplier: legal * landing * pilot * replacement,
        total: round2(total),
    }
}

fn loading_score(m: &Measurements, baselines: &Baselines, weight: f64) -> f64 {
    if m.loading_time <= 0.0 || baselines.loading_time <= 0.0 {
        return 0.0;
    }
    let efficiency = m.unloaded_payload / m.loading_time.sqrt();
    let best_efficiency = baselines.payload / baselines.loading_time.sqrt();
    if best_efficiency > 0.0 {
        weight * (efficiency / best_efficiency)
    } else {
        0.0
    }
}

/// 1.25 up to 20 m, 1.125 up to 40 m, 1.0 beyond.
pub fn takeoff_multiplier(distance: f64) -> f64 {
    if distance <= 20.0 {
        1.25
    } else if distance <= 40.0 {
        1.125
    } else {
        1.0
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_round_score.rs"]
mod tests;
