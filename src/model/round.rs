use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("missing required input: {}", .field.key())]
pub struct MissingFieldError {
    pub field: InputField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    UnloadedPayload,
    RequestedPayload,
    CircuitTime,
    GlideTime,
    Altitude,
    LoadingTime,
    TakeoffDistance,
    Pilot,
    LegalFlight,
    GoodLanding,
    ReplacementParts,
}

impl InputField {
    pub const ALL: [InputField; 11] = [
        InputField::UnloadedPayload,
        InputField::RequestedPayload,
        InputField::CircuitTime,
        InputField::GlideTime,
        InputField::Altitude,
        InputField::LoadingTime,
        InputField::TakeoffDistance,
        InputField::Pilot,
        InputField::LegalFlight,
        InputField::GoodLanding,
        InputField::ReplacementParts,
    ];

    /// Key used in the persisted results document.
    pub fn key(self) -> &'static str {
        match self {
            InputField::UnloadedPayload => "Unloaded Payload",
            InputField::RequestedPayload => "Requested Payload",
            InputField::CircuitTime => "Time Circuit",
            InputField::GlideTime => "Time Glide",
            InputField::Altitude => "Altitude",
            InputField::LoadingTime => "Loading Time",
            InputField::TakeoffDistance => "Takeoff Distance",
            InputField::Pilot => "Pilot",
            InputField::LegalFlight => "Legal Flight",
            InputField::GoodLanding => "Good Landing",
            InputField::ReplacementParts => "Replacement Parts",
        }
    }

    pub fn is_flag(self) -> bool {
        matches!(
            self,
            InputField::Pilot
                | InputField::LegalFlight
                | InputField::GoodLanding
                | InputField::ReplacementParts
        )
    }

    /// Accepts the document key in any case, or its snake/kebab form
    /// (`unloaded_payload`, `time-circuit`).
    pub fn from_key(key: &str) -> Option<InputField> {
        let wanted = normalize_key(key);
        InputField::ALL
            .into_iter()
            .find(|f| normalize_key(f.key()) == wanted)
            .or_else(|| match wanted.as_str() {
                "circuittime" => Some(InputField::CircuitTime),
                "glidetime" => Some(InputField::GlideTime),
                "takeoff" => Some(InputField::TakeoffDistance),
                "replacements" => Some(InputField::ReplacementParts),
                _ => None,
            })
    }
}

fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Raw measurements of one team in one round, as recorded. Every field is
/// optional here; scoring goes through [`RoundInputs::require`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundInputs {
    #[serde(
        rename = "Unloaded Payload",
        default,
        deserialize_with = "de_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub unloaded_payload: Option<f64>,
    #[serde(
        rename = "Requested Payload",
        default,
        deserialize_with = "de_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub requested_payload: Option<f64>,
    #[serde(
        rename = "Time Circuit",
        default,
        deserialize_with = "de_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub circuit_time: Option<f64>,
    #[serde(
        rename = "Time Glide",
        default,
        deserialize_with = "de_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub glide_time: Option<f64>,
    #[serde(
        rename = "Altitude",
        default,
        deserialize_with = "de_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub altitude: Option<f64>,
    #[serde(
        rename = "Loading Time",
        default,
        deserialize_with = "de_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub loading_time: Option<f64>,
    #[serde(
        rename = "Takeoff Distance",
        default,
        deserialize_with = "de_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub takeoff_distance: Option<f64>,
    /// true when the pilot is a team member.
    #[serde(
        rename = "Pilot",
        default,
        deserialize_with = "de_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub team_pilot: Option<bool>,
    #[serde(
        rename = "Legal Flight",
        default,
        deserialize_with = "de_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub legal_flight: Option<bool>,
    #[serde(
        rename = "Good Landing",
        default,
        deserialize_with = "de_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub good_landing: Option<bool>,
    /// Stored inverted: true means the airframe flew without replacement parts.
    #[serde(
        rename = "Replacement Parts",
        default,
        deserialize_with = "de_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub no_replacement_parts: Option<bool>,
}

/// A fully specified input set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurements {
    pub unloaded_payload: f64,
    pub requested_payload: f64,
    pub circuit_time: f64,
    pub glide_time: f64,
    pub altitude: f64,
    pub loading_time: f64,
    pub takeoff_distance: f64,
    pub team_pilot: bool,
    pub legal_flight: bool,
    pub good_landing: bool,
    pub no_replacement_parts: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Flag(bool),
}

impl RoundInputs {
    pub fn is_empty(&self) -> bool {
        InputField::ALL.into_iter().all(|f| self.get(f).is_none())
    }

    pub fn get(&self, field: InputField) -> Option<FieldValue> {
        match field {
            InputField::UnloadedPayload => self.unloaded_payload.map(FieldValue::Number),
            InputField::RequestedPayload => self.requested_payload.map(FieldValue::Number),
            InputField::CircuitTime => self.circuit_time.map(FieldValue::Number),
            InputField::GlideTime => self.glide_time.map(FieldValue::Number),
            InputField::Altitude => self.altitude.map(FieldValue::Number),
            InputField::LoadingTime => self.loading_time.map(FieldValue::Number),
            InputField::TakeoffDistance => self.takeoff_distance.map(FieldValue::Number),
            InputField::Pilot => self.team_pilot.map(FieldValue::Flag),
            InputField::LegalFlight => self.legal_flight.map(FieldValue::Flag),
            InputField::GoodLanding => self.good_landing.map(FieldValue::Flag),
            InputField::ReplacementParts => self.no_replacement_parts.map(FieldValue::Flag),
        }
    }

    /// Stores `value` under `field`. A number written to a flag field is
    /// truthy when non-zero; a flag written to a numeric field becomes 1/0.
    pub fn set(&mut self, field: InputField, value: FieldValue) {
        let number = match value {
            FieldValue::Number(v) => v,
            FieldValue::Flag(b) => f64::from(u8::from(b)),
        };
        let flag = match value {
            FieldValue::Number(v) => v != 0.0,
            FieldValue::Flag(b) => b,
        };
        match field {
            InputField::UnloadedPayload => self.unloaded_payload = Some(number),
            InputField::RequestedPayload => self.requested_payload = Some(number),
            InputField::CircuitTime => self.circuit_time = Some(number),
            InputField::GlideTime => self.glide_time = Some(number),
            InputField::Altitude => self.altitude = Some(number),
            InputField::LoadingTime => self.loading_time = Some(number),
            InputField::TakeoffDistance => self.takeoff_distance = Some(number),
            InputField::Pilot => self.team_pilot = Some(flag),
            InputField::LegalFlight => self.legal_flight = Some(flag),
            InputField::GoodLanding => self.good_landing = Some(flag),
            InputField::ReplacementParts => self.no_replacement_parts = Some(flag),
        }
    }

    /// Overlays every field present in `other`.
    pub fn merge(&mut self, other: &RoundInputs) {
        for field in InputField::ALL {
            if let Some(v) = other.get(field) {
                self.set(field, v);
            }
        }
    }

    pub fn require(&self) -> Result<Measurements, MissingFieldError> {
        let num = |field: InputField, v: Option<f64>| v.ok_or(MissingFieldError { field });
        let flag = |field: InputField, v: Option<bool>| v.ok_or(MissingFieldError { field });
        Ok(Measurements {
            unloaded_payload: num(InputField::UnloadedPayload, self.unloaded_payload)?,
            requested_payload: num(InputField::RequestedPayload, self.requested_payload)?,
            circuit_time: num(InputField::CircuitTime, self.circuit_time)?,
            glide_time: num(InputField::GlideTime, self.glide_time)?,
            altitude: num(InputField::Altitude, self.altitude)?,
            loading_time: num(InputField::LoadingTime, self.loading_time)?,
            takeoff_distance: num(InputField::TakeoffDistance, self.takeoff_distance)?,
            team_pilot: flag(InputField::Pilot, self.team_pilot)?,
            legal_flight: flag(InputField::LegalFlight, self.legal_flight)?,
            good_landing: flag(InputField::GoodLanding, self.good_landing)?,
            no_replacement_parts: flag(InputField::ReplacementParts, self.no_replacement_parts)?,
        })
    }
}

impl From<Measurements> for RoundInputs {
    fn from(m: Measurements) -> Self {
        Self {
            unloaded_payload: Some(m.unloaded_payload),
            requested_payload: Some(m.requested_payload),
            circuit_time: Some(m.circuit_time),
            glide_time: Some(m.glide_time),
            altitude: Some(m.altitude),
            loading_time: Some(m.loading_time),
            takeoff_distance: Some(m.takeoff_distance),
            team_pilot: Some(m.team_pilot),
            legal_flight: Some(m.legal_flight),
            good_landing: Some(m.good_landing),
            no_replacement_parts: Some(m.no_replacement_parts),
        }
    }
}

/// One team's entry for one round. `score` caches the last computed total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundResult {
    pub round: usize,
    pub inputs: RoundInputs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl RoundResult {
    pub fn new(round: usize, inputs: RoundInputs) -> Self {
        Self {
            round,
            inputs,
            score: None,
        }
    }

    pub fn has_inputs(&self) -> bool {
        !self.inputs.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScalarRepr {
    Bool(bool),
    Number(f64),
    Text(String),
}

fn de_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<ScalarRepr>::deserialize(deserializer)?;
    Ok(match raw {
        None => None,
        Some(ScalarRepr::Number(v)) => Some(v),
        Some(ScalarRepr::Bool(b)) => Some(f64::from(u8::from(b))),
        Some(ScalarRepr::Text(s)) => {
            let v = s.trim().parse::<f64>().map_err(serde::de::Error::custom)?;
            Some(v)
        }
    })
}

fn de_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<ScalarRepr>::deserialize(deserializer)?;
    Ok(match raw {
        None => None,
        Some(ScalarRepr::Bool(b)) => Some(b),
        Some(ScalarRepr::Number(v)) => Some(v != 0.0),
        Some(ScalarRepr::Text(s)) => Some(
            parse_flag_text(&s)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid flag value: {s}")))?,
        ),
    })
}

pub fn parse_flag_text(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/round.rs"]
mod tests;
