// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — ESIV Turn Record (time-series row)
// ─────────────────────────────────────────────────────────────────────
//! One row of the per-agent governance time series.
//!
//! The column layout is frozen: recorded history files written by
//! earlier versions must stay readable even though the formulas that
//! produce each value have changed. Add new signals elsewhere, never
//! here.

use serde::{Deserialize, Serialize};

use crate::error::{GovernorError, GovernorResult};

/// Column names in file order.
pub const COLUMNS: [&str; 8] = [
    "time",
    "E",
    "I",
    "S",
    "V",
    "lambda1",
    "coherence",
    "void_event",
];

/// Output of one governance turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Collaborator-supplied timestamp (seconds).
    pub time: f64,
    /// Energy used for this turn, in [0, 1].
    #[serde(rename = "E")]
    pub energy: f64,
    /// Integrity, in [0, 1].
    #[serde(rename = "I")]
    pub integrity: f64,
    /// Surprise after clamping, in [0, 1].
    #[serde(rename = "S")]
    pub surprise: f64,
    /// Void accumulator after this turn.
    #[serde(rename = "V")]
    pub void: f64,
    /// Adaptive gain λ after this turn.
    #[serde(rename = "lambda1")]
    pub lambda: f64,
    /// Coherence ρ supplied for this turn.
    #[serde(rename = "coherence")]
    pub rho: f64,
    pub void_event: bool,
}

/// Header line for a CSV time series.
pub fn header_line() -> String {
    COLUMNS.join(",")
}

/// Check a CSV header line against [`COLUMNS`].
pub fn parse_header(line: &str) -> GovernorResult<()> {
    let found: Vec<&str> = line.trim().split(',').map(str::trim).collect();
    if found != COLUMNS {
        return Err(GovernorError::Schema(format!(
            "header mismatch: expected `{}`, got `{}`",
            header_line(),
            line.trim()
        )));
    }
    Ok(())
}

fn parse_f64(name: &str, raw: &str) -> GovernorResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| GovernorError::Schema(format!("column {name}: `{raw}`: {e}")))
}

fn parse_flag(raw: &str) -> GovernorResult<bool> {
    match raw.trim() {
        "True" | "true" | "1" => Ok(true),
        "False" | "false" | "0" => Ok(false),
        other => Err(GovernorError::Schema(format!(
            "column void_event: `{other}` is not a boolean"
        ))),
    }
}

impl TurnRecord {
    /// Format as one CSV line (no trailing newline).
    ///
    /// `void_event` is written as `True`/`False`, matching history
    /// files produced by the Python monitor.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{}",
            self.time,
            self.energy,
            self.integrity,
            self.surprise,
            self.void,
            self.lambda,
            self.rho,
            if self.void_event { "True" } else { "False" },
        )
    }

    /// Parse one CSV line written in [`COLUMNS`] order.
    pub fn from_csv_row(line: &str) -> GovernorResult<Self> {
        let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split(',').collect();
        if fields.len() != COLUMNS.len() {
            return Err(GovernorError::Schema(format!(
                "expected {} columns, got {}",
                COLUMNS.len(),
                fields.len()
            )));
        }
        Ok(Self {
            time: parse_f64(COLUMNS[0], fields[0])?,
            energy: parse_f64(COLUMNS[1], fields[1])?,
            integrity: parse_f64(COLUMNS[2], fields[2])?,
            surprise: parse_f64(COLUMNS[3], fields[3])?,
            void: parse_f64(COLUMNS[4], fields[4])?,
            lambda: parse_f64(COLUMNS[5], fields[5])?,
            rho: parse_f64(COLUMNS[6], fields[6])?,
            void_event: parse_flag(fields[7])?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TurnRecord {
        TurnRecord {
            time: 12.5,
            energy: 0.6,
            integrity: 0.9,
            surprise: 0.1,
            void: -0.3,
            lambda: 0.132,
            rho: 1.0,
            void_event: false,
        }
    }

    #[test]
    fn test_header_order() {
        assert_eq!(header_line(), "time,E,I,S,V,lambda1,coherence,void_event");
    }

    #[test]
    fn test_parse_header_accepts_canonical() {
        assert!(parse_header("time,E,I,S,V,lambda1,coherence,void_event\n").is_ok());
        assert!(parse_header(" time, E ,I,S,V,lambda1,coherence,void_event").is_ok());
    }

    #[test]
    fn test_parse_header_rejects_reordered() {
        let err = parse_header("time,I,E,S,V,lambda1,coherence,void_event").unwrap_err();
        assert!(matches!(err, GovernorError::Schema(_)));
    }

    #[test]
    fn test_parse_header_rejects_extra_column() {
        assert!(parse_header("time,E,I,S,V,lambda1,coherence,void_event,extra").is_err());
    }

    #[test]
    fn test_csv_row_format() {
        assert_eq!(sample().to_csv_row(), "12.5,0.6,0.9,0.1,-0.3,0.132,1,False");
    }

    #[test]
    fn test_csv_row_parses_back() {
        let rec = sample();
        assert_eq!(TurnRecord::from_csv_row(&rec.to_csv_row()).unwrap(), rec);
    }

    #[test]
    fn test_csv_row_accepts_lowercase_flag() {
        let rec = TurnRecord::from_csv_row("0,0.5,0.5,0.5,0.001,0.1,0.9,true\r\n").unwrap();
        assert!(rec.void_event);
    }

    #[test]
    fn test_csv_row_wrong_width() {
        let err = TurnRecord::from_csv_row("0,0.5,0.5").unwrap_err();
        assert!(err.to_string().contains("expected 8 columns"));
    }

    #[test]
    fn test_csv_row_bad_number() {
        let err = TurnRecord::from_csv_row("0,abc,0.5,0.5,0,0.1,1,False").unwrap_err();
        assert!(err.to_string().contains("column E"));
    }

    #[test]
    fn test_csv_row_bad_flag() {
        assert!(TurnRecord::from_csv_row("0,0.5,0.5,0.5,0,0.1,1,maybe").is_err());
    }

    #[test]
    fn test_json_uses_column_names() {
        let json = serde_json::to_value(sample()).unwrap();
        let obj = json.as_object().unwrap();
        for col in COLUMNS {
            assert!(obj.contains_key(col), "missing column {col}");
        }
        assert_eq!(obj.len(), COLUMNS.len());
    }
}
