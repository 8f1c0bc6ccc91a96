use crate::input::InputError;
use crate::model::round::{FieldValue, InputField, RoundInputs, parse_flag_text};

pub const TAKEOFF_BUCKETS: [f64; 3] = [20.0, 40.0, 60.0];

/// Splits `KEY=VALUE`. Keys may contain spaces (`Unloaded Payload=500`).
pub fn parse_assignment(text: &str) -> Result<(String, String), InputError> {
    let (key, value) = text
        .split_once('=')
        .ok_or_else(|| InputError::MalformedAssignment(text.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(InputError::MalformedAssignment(text.to_string()));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Converts user-entered text into a typed input record. Parse failures are
/// rejected here and never reach the scoring stages. Fields not mentioned
/// stay unset.
pub fn parse_round_form<K, V>(pairs: &[(K, V)]) -> Result<RoundInputs, InputError>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut inputs = RoundInputs::default();
    for (key, value) in pairs {
        let (key, value) = (key.as_ref(), value.as_ref().trim());
        let field =
            InputField::from_key(key).ok_or_else(|| InputError::UnknownField(key.to_string()))?;
        inputs.set(field, parse_field(field, value)?);
    }
    Ok(inputs)
}

fn parse_field(field: InputField, value: &str) -> Result<FieldValue, InputError> {
    if field.is_flag() {
        return parse_flag_text(value)
            .map(FieldValue::Flag)
            .ok_or_else(|| InputError::InvalidFlag {
                field: field.key().to_string(),
                value: value.to_string(),
            });
    }
    if field == InputField::TakeoffDistance {
        return parse_takeoff(value).map(FieldValue::Number);
    }
    parse_number(field, value).map(FieldValue::Number)
}

fn parse_number(field: InputField, value: &str) -> Result<f64, InputError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| InputError::InvalidNumeric {
            field: field.key().to_string(),
            value: value.to_string(),
        })
}

fn parse_takeoff(value: &str) -> Result<f64, InputError> {
    let trimmed = value.trim_end_matches(['m', 'M']).trim();
    let invalid = || InputError::InvalidTakeoff {
        value: value.to_string(),
    };
    let distance = trimmed.parse::<f64>().map_err(|_| invalid())?;
    if TAKEOFF_BUCKETS.contains(&distance) {
        Ok(distance)
    } else {
        Err(invalid())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/form.rs"]
mod tests;
