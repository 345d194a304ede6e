//! Short human-readable rendering of large magnitudes ("1.2M").

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactOptions {
    /// Decimal places kept after scaling.
    pub precision: usize,
    pub lowercase: bool,
    /// Put a space between the number and its suffix.
    pub space: bool,
    /// Suffixes for successive powers of 1000, starting at 10^0.
    pub units: Vec<String>,
}

impl Default for CompactOptions {
    fn default() -> Self {
        CompactOptions {
            precision: 1,
            lowercase: false,
            space: false,
            units: ["", "K", "M", "B", "T", "P", "E"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompactFormatter {
    options: CompactOptions,
}

fn round_to(v: f64, precision: usize) -> f64 {
    let f = 10f64.powi(precision as i32);
    (v * f).round() / f
}

fn trim_zeros(s: String) -> String {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

impl CompactFormatter {
    pub fn new(options: CompactOptions) -> Self {
        CompactFormatter { options }
    }

    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        let opts = &self.options;
        let last_unit = opts.units.len().saturating_sub(1);
        let mut magnitude = value.abs();
        let mut unit = 0;
        while magnitude >= 1000.0 && unit < last_unit {
            magnitude /= 1000.0;
            unit += 1;
        }
        let mut rounded = round_to(magnitude, opts.precision);
        if rounded >= 1000.0 && unit < last_unit {
            rounded = round_to(rounded / 1000.0, opts.precision);
            unit += 1;
        }
        let digits = trim_zeros(format!("{:.*}", opts.precision, rounded));
        let sign = if value < 0.0 && digits != "0" { "-" } else { "" };
        let suffix = opts.units.get(unit).map(String::as_str).unwrap_or("");
        let suffix = if opts.lowercase {
            suffix.to_lowercase()
        } else {
            suffix.to_string()
        };
        let gap = if opts.space && !suffix.is_empty() { " " } else { "" };
        format!("{sign}{digits}{gap}{suffix}")
    }
}
