//! Train-fleet domain model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Speed below which a train is flagged for maintenance, in km/h.
pub const SLOW_SPEED_KPH: f64 = 60.0;

/// A train's reported location and speed at a point in time.
///
/// Wire format is JSON with camelCase field names. Producers may omit
/// everything except `speedKph`; a record without a speed is malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainPosition {
    /// Identifies the train.
    #[serde(default)]
    pub train_id: Option<String>,
    /// Current speed.
    pub speed_kph: f64,
    /// Last known latitude.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Last known longitude.
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Average speed of one train over a closed window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainAverageSpeed {
    /// The train the average belongs to.
    pub train_id: String,
    /// Mean of the speed samples seen in the window.
    pub average_speed: f64,
}

/// Maintenance alert raised for a slowing train.
///
/// Carries the offending record's fields verbatim; the [`fmt::Display`]
/// rendering substitutes `unknown` for fields the record did not carry.
#[derive(Debug, Clone, PartialEq)]
pub struct SlowTrainAlert {
    /// Train the alert concerns, if the record carried an id.
    pub train_id: Option<String>,
    /// Speed that triggered the alert.
    pub speed_kph: f64,
    /// Last known latitude.
    pub latitude: Option<f64>,
    /// Last known longitude.
    pub longitude: Option<f64>,
}

impl fmt::Display for SlowTrainAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.train_id {
            Some(id) => write!(f, "Train {id} is slowing! ")?,
            None => write!(f, "Train unknown is slowing! ")?,
        }
        f.write_str("Last known location: (")?;
        match self.latitude {
            Some(lat) => write!(f, "{lat}")?,
            None => f.write_str("unknown")?,
        }
        f.write_str(", ")?;
        match self.longitude {
            Some(lon) => write!(f, "{lon}")?,
            None => f.write_str("unknown")?,
        }
        f.write_str(")")
    }
}

/// Flags a position whose speed is below [`SLOW_SPEED_KPH`].
///
/// Pure and stateless; repeated slow readings raise repeated alerts.
#[inline]
pub fn evaluate(position: &TrainPosition) -> Option<SlowTrainAlert> {
    evaluate_below(position, SLOW_SPEED_KPH)
}

/// Same rule with the threshold promoted to a parameter. Strict less-than:
/// a reading exactly at the threshold raises no alert.
pub fn evaluate_below(position: &TrainPosition, threshold: f64) -> Option<SlowTrainAlert> {
    if position.speed_kph < threshold {
        Some(SlowTrainAlert {
            train_id: position.train_id.clone(),
            speed_kph: position.speed_kph,
            latitude: position.latitude,
            longitude: position.longitude,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn position(train_id: Option<&str>, speed_kph: f64) -> TrainPosition {
        TrainPosition {
            train_id: train_id.map(str::to_owned),
            speed_kph,
            latitude: Some(52.1),
            longitude: Some(4.3),
        }
    }

    #[rstest]
    #[case(45.0, true)]
    #[case(59.9, true)]
    #[case(60.0, false)]
    #[case(60.1, false)]
    #[case(80.0, false)]
    fn threshold_is_strict_less_than(#[case] speed: f64, #[case] alerts: bool) {
        assert_eq!(evaluate(&position(Some("T1"), speed)).is_some(), alerts);
    }

    #[test]
    fn alert_carries_record_fields_verbatim() {
        let alert = evaluate(&position(Some("T-45B"), 12.5)).unwrap();
        assert_eq!(alert.train_id.as_deref(), Some("T-45B"));
        assert_eq!(alert.speed_kph, 12.5);
        assert_eq!(alert.latitude, Some(52.1));
        assert_eq!(alert.longitude, Some(4.3));
    }

    #[test]
    fn slow_reading_renders_alert_line() {
        let input = r#"{"trainId":"T1","speedKph":45,"latitude":52.1,"longitude":4.3}"#;
        let position: TrainPosition = serde_json::from_str(input).unwrap();
        let alert = evaluate(&position).unwrap();
        assert_eq!(
            alert.to_string(),
            "Train T1 is slowing! Last known location: (52.1, 4.3)"
        );
    }

    #[test]
    fn fast_reading_raises_nothing() {
        let input = r#"{"trainId":"T2","speedKph":80,"latitude":52.2,"longitude":4.4}"#;
        let position: TrainPosition = serde_json::from_str(input).unwrap();
        assert_eq!(evaluate(&position), None);
    }

    #[test]
    fn missing_fields_still_alert() {
        let position: TrainPosition = serde_json::from_str(r#"{"speedKph":30}"#).unwrap();
        let alert = evaluate(&position).unwrap();
        assert_eq!(alert.train_id, None);
        assert_eq!(
            alert.to_string(),
            "Train unknown is slowing! Last known location: (unknown, unknown)"
        );
    }

    #[test]
    fn null_fields_still_alert() {
        let input = r#"{"trainId":null,"speedKph":30,"latitude":null,"longitude":null}"#;
        let position: TrainPosition = serde_json::from_str(input).unwrap();
        assert!(evaluate(&position).is_some());
    }

    #[test]
    fn missing_speed_is_a_decode_error() {
        let err = serde_json::from_str::<TrainPosition>(r#"{"trainId":"T1"}"#).unwrap_err();
        assert!(err.to_string().contains("speedKph"));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let slow = position(Some("T1"), 45.0);
        assert_eq!(evaluate(&slow), evaluate(&slow));
        let fast = position(Some("T2"), 80.0);
        assert_eq!(evaluate(&fast), evaluate(&fast));
    }

    #[test]
    fn configured_threshold_overrides_default() {
        let creeping = position(Some("T1"), 65.0);
        assert!(evaluate(&creeping).is_none());
        assert!(evaluate_below(&creeping, 70.0).is_some());
    }

    #[test]
    fn average_speed_uses_wire_names() {
        let avg = TrainAverageSpeed {
            train_id: "T-81A".to_owned(),
            average_speed: 92.5,
        };
        assert_eq!(
            serde_json::to_string(&avg).unwrap(),
            r#"{"trainId":"T-81A","averageSpeed":92.5}"#
        );
    }
}
