//! CLI-facing value types parsed from command-line strings.

use crate::error::{ProjError, Result};
use std::fmt;
use std::str::FromStr;

/// One per-source weight override, parsed from `source_N=WEIGHT`.
///
/// # Examples
///
/// ```rust
/// use nflproj::cli::types::WeightSpec;
///
/// let spec: WeightSpec = "source_0=2.5".parse().unwrap();
/// assert_eq!(spec.source, "source_0");
/// assert_eq!(spec.weight, 2.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WeightSpec {
    pub source: String,
    pub weight: f64,
}

impl fmt::Display for WeightSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.source, self.weight)
    }
}

impl FromStr for WeightSpec {
    type Err = ProjError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ProjError::InvalidWeight {
            spec: s.to_string(),
        };

        let (source, weight) = s.split_once('=').ok_or_else(invalid)?;
        if source.is_empty() {
            return Err(invalid());
        }
        let weight: f64 = weight.parse().map_err(|_| invalid())?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(invalid());
        }

        Ok(Self {
            source: source.to_string(),
            weight,
        })
    }
}
