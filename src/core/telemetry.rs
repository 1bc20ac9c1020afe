//! Telemetry payload interpretation.

use serde::Deserialize;
use serde_json::Value;
use serde_with::{DisplayFromStr, PickFirst, serde_as};

use crate::{prelude::*, quantity::percent::Percent};

/// Keys that may carry the state of charge, in order of precedence.
const KEYS: [&str; 4] = ["soc", "SoC", "SOC", "stateOfCharge"];

/// Either a number or a numeric string.
#[serde_as]
#[derive(Deserialize)]
#[serde(transparent)]
struct Reading(#[serde_as(as = "PickFirst<(_, DisplayFromStr)>")] f64);

/// Extract the state of charge from a telemetry message.
///
/// The message must be a JSON object, and the first present key of [`KEYS`] wins.
/// Anything else, including malformed and out-of-range values, yields [`None`].
#[must_use]
pub fn parse_state_of_charge(payload: &[u8]) -> Option<Percent> {
    let object = match serde_json::from_slice::<Value>(payload) {
        Ok(Value::Object(object)) => object,
        Ok(_) => {
            debug!("ignoring the message: not an object");
            return None;
        }
        Err(error) => {
            debug!("ignoring the message: {error:#}");
            return None;
        }
    };
    let (key, value) = KEYS.iter().find_map(|key| object.get(*key).map(|value| (key, value)))?;
    let Reading(value) = match Reading::deserialize(value) {
        Ok(reading) => reading,
        Err(error) => {
            debug!(%key, "ignoring the malformed state of charge: {error:#}");
            return None;
        }
    };
    let state_of_charge = Percent::new(value);
    if state_of_charge.is_none() {
        debug!(value, "ignoring the out-of-range state of charge");
    }
    state_of_charge
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(payload: &str) -> Option<f64> {
        parse_state_of_charge(payload.as_bytes()).map(Percent::get)
    }

    #[test]
    fn test_number() {
        assert_eq!(parse(r#"{"soc": 87.5}"#), Some(87.5));
        assert_eq!(parse(r#"{"soc": 100}"#), Some(100.0));
    }

    #[test]
    fn test_string() {
        assert_eq!(parse(r#"{"soc": "42"}"#), Some(42.0));
    }

    #[test]
    fn test_aliases() {
        assert_eq!(parse(r#"{"SoC": 10}"#), Some(10.0));
        assert_eq!(parse(r#"{"SOC": 11}"#), Some(11.0));
        assert_eq!(parse(r#"{"stateOfCharge": 12, "power": -300}"#), Some(12.0));
    }

    #[test]
    fn test_first_present_key_wins() {
        assert_eq!(parse(r#"{"soc": 50, "SOC": 60}"#), Some(50.0));
        assert_eq!(parse(r#"{"stateOfCharge": 70, "SoC": "65"}"#), Some(65.0));
        assert_eq!(parse(r#"{"soc": "full", "SOC": 60}"#), None);
    }

    #[test]
    fn test_other_shapes_are_ignored() {
        assert_eq!(parse(r#"{"power": 1200}"#), None);
        assert_eq!(parse("42"), None);
        assert_eq!(parse("[42]"), None);
        assert_eq!(parse(r#"["soc", 42]"#), None);
        assert_eq!(parse("not even json"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn test_malformed_soc_is_ignored() {
        assert_eq!(parse(r#"{"soc": "full"}"#), None);
        assert_eq!(parse(r#"{"soc": null}"#), None);
        assert_eq!(parse(r#"{"soc": 101}"#), None);
        assert_eq!(parse(r#"{"soc": -1}"#), None);
    }
}
