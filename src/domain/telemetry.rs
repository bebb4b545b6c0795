// Eye telemetry domain models
use super::error::ValidationError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_SENSITIVITY: f64 = 1.0;

/// A validated eye report as posted by the sensing device
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EyeReport {
    pub status: String,
    #[serde(default, deserialize_with = "lenient_duration")]
    pub duration: f64,
    #[serde(default, deserialize_with = "lenient_label")]
    pub alert_level: Option<String>,
    #[serde(default, deserialize_with = "lenient_label")]
    pub alert_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_label")]
    pub alert_message: Option<String>,
    #[serde(default = "default_sensitivity", deserialize_with = "lenient_sensitivity")]
    pub sensitivity: f64,
}

impl EyeReport {
    /// Parse a raw request body. The status is lower-cased before it is returned.
    pub fn parse(body: &[u8]) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| ValidationError::InvalidJson)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        let fields = value.as_object().ok_or(ValidationError::NotAnObject)?;
        match fields.get("status") {
            None | Some(Value::Null) => return Err(ValidationError::MissingStatus),
            Some(_) => {}
        }

        let mut report: EyeReport = serde_json::from_value(value)
            .map_err(|e| ValidationError::Malformed(e.to_string()))?;
        report.status = report.status.to_lowercase();
        Ok(report)
    }

    /// Alert level that counts toward alert transitions (present and non-empty)
    pub fn effective_alert_level(&self) -> Option<&str> {
        self.alert_level.as_deref().filter(|level| !level.is_empty())
    }
}

/// The most recent observation, replaced in full on every ingest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetrySnapshot {
    pub status: String,
    pub duration: f64,
    pub alert_level: Option<String>,
    pub alert_type: Option<String>,
    pub alert_message: Option<String>,
    pub sensitivity: f64,
    pub ear_value: f64,
    pub timestamp: String,
}

impl TelemetrySnapshot {
    /// State before the first report arrives
    pub fn initial(timestamp: String) -> Self {
        Self {
            status: "open".to_string(),
            duration: 0.0,
            alert_level: None,
            alert_type: None,
            alert_message: None,
            sensitivity: DEFAULT_SENSITIVITY,
            ear_value: 0.0,
            timestamp,
        }
    }

    pub fn from_report(report: &EyeReport, ear_value: f64, timestamp: String) -> Self {
        Self {
            status: report.status.clone(),
            duration: report.duration,
            alert_level: report.alert_level.clone(),
            alert_type: report.alert_type.clone(),
            alert_message: report.alert_message.clone(),
            sensitivity: report.sensitivity,
            ear_value,
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub status: String,
    pub duration: f64,
    pub ear_value: f64,
    pub alert_level: Option<String>,
    pub alert_type: Option<String>,
}

impl HistoryEntry {
    pub fn new(report: &EyeReport, ear_value: f64, timestamp: String) -> Self {
        Self {
            timestamp,
            status: report.status.clone(),
            duration: report.duration,
            ear_value,
            alert_level: report.alert_level.clone(),
            alert_type: report.alert_type.clone(),
        }
    }
}

fn default_sensitivity() -> f64 {
    DEFAULT_SENSITIVITY
}

/// Numeric coercion in the spirit of `float(x)`: numbers, numeric strings and booleans
fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

fn lenient_duration<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value)
        .filter(|d| d.is_finite() && *d >= 0.0)
        .unwrap_or(0.0))
}

fn lenient_sensitivity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value)
        .filter(|s| s.is_finite())
        .unwrap_or(DEFAULT_SENSITIVITY))
}

fn lenient_label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_report() {
        let body = br#"{
            "status": "Closed",
            "duration": 2.5,
            "alert_level": "warning",
            "alert_type": "drowsy",
            "alert_message": "Eyes closed too long",
            "sensitivity": 1.5
        }"#;
        let report = EyeReport::parse(body).unwrap();

        assert_eq!(report.status, "closed");
        assert_eq!(report.duration, 2.5);
        assert_eq!(report.alert_level.as_deref(), Some("warning"));
        assert_eq!(report.alert_type.as_deref(), Some("drowsy"));
        assert_eq!(report.alert_message.as_deref(), Some("Eyes closed too long"));
        assert_eq!(report.sensitivity, 1.5);
    }

    #[test]
    fn test_parse_applies_defaults() {
        let report = EyeReport::parse(br#"{"status": "open"}"#).unwrap();
        assert_eq!(report.duration, 0.0);
        assert_eq!(report.alert_level, None);
        assert_eq!(report.sensitivity, 1.0);
    }

    #[test]
    fn test_malformed_duration_falls_back_to_zero() {
        for raw in [r#""abc""#, "null", "-3.0", "[1]", r#"{"s": 1}"#] {
            let body = format!(r#"{{"status": "closed", "duration": {}}}"#, raw);
            let report = EyeReport::parse(body.as_bytes()).unwrap();
            assert_eq!(report.duration, 0.0, "duration {}", raw);
        }
        let report = EyeReport::parse(br#"{"status": "closed", "duration": "4.25"}"#).unwrap();
        assert_eq!(report.duration, 4.25);
    }

    #[test]
    fn test_malformed_sensitivity_falls_back_to_default() {
        let report = EyeReport::parse(br#"{"status": "open", "sensitivity": "high"}"#).unwrap();
        assert_eq!(report.sensitivity, 1.0);
    }

    #[test]
    fn test_rejections() {
        assert_eq!(EyeReport::parse(b"not json"), Err(ValidationError::InvalidJson));
        assert_eq!(EyeReport::parse(b"[1, 2]"), Err(ValidationError::NotAnObject));
        assert_eq!(
            EyeReport::parse(br#"{"duration": 1.0}"#),
            Err(ValidationError::MissingStatus)
        );
        assert_eq!(
            EyeReport::parse(br#"{"status": null}"#),
            Err(ValidationError::MissingStatus)
        );
        assert!(matches!(
            EyeReport::parse(br#"{"status": 42}"#),
            Err(ValidationError::Malformed(_))
        ));
    }

    #[test]
    fn test_non_string_labels_are_kept_as_text() {
        let report = EyeReport::parse(br#"{"status": "open", "alert_level": 2}"#).unwrap();
        assert_eq!(report.alert_level.as_deref(), Some("2"));
    }

    #[test]
    fn test_empty_alert_level_is_not_effective() {
        let report = EyeReport::parse(br#"{"status": "open", "alert_level": ""}"#).unwrap();
        assert_eq!(report.alert_level.as_deref(), Some(""));
        assert_eq!(report.effective_alert_level(), None);
    }
}
