//! Risk appetite.
//!
//! Maps the baseline's scalar risk estimate to a subtractive penalty scaled
//! by how much variance the player is willing to accept.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Risk appetite profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskProfile {
    Greedy,
    #[default]
    Balanced,
    Safe,
}

impl RiskProfile {
    /// Multiplier applied to the clamped risk scalar.
    pub const fn factor(self) -> f64 {
        match self {
            RiskProfile::Greedy => 0.10,
            RiskProfile::Balanced => 0.35,
            RiskProfile::Safe => 0.75,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            RiskProfile::Greedy => "greedy",
            RiskProfile::Balanced => "balanced",
            RiskProfile::Safe => "safe",
        }
    }

    /// Parses a mode name, ignoring case and surrounding whitespace.
    /// Unrecognized names fall back to `Balanced`.
    pub fn from_mode(mode: &str) -> RiskProfile {
        match mode.trim().to_ascii_lowercase().as_str() {
            "greedy" => RiskProfile::Greedy,
            "safe" => RiskProfile::Safe,
            _ => RiskProfile::Balanced,
        }
    }
}

impl From<String> for RiskProfile {
    fn from(s: String) -> Self {
        RiskProfile::from_mode(&s)
    }
}

impl From<RiskProfile> for String {
    fn from(p: RiskProfile) -> Self {
        p.name().to_string()
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Penalty for a raw risk estimate under `profile`. Risk is clamped to
/// [0, 1] first; NaN counts as no risk.
pub fn penalty(risk: f64, profile: RiskProfile) -> f64 {
    let r = if risk.is_nan() { 0.0 } else { risk.clamp(0.0, 1.0) };
    profile.factor() * r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factors() {
        assert!((penalty(1.0, RiskProfile::Greedy) - 0.10).abs() < 1e-12);
        assert!((penalty(1.0, RiskProfile::Balanced) - 0.35).abs() < 1e-12);
        assert!((penalty(1.0, RiskProfile::Safe) - 0.75).abs() < 1e-12);
        assert!((penalty(0.5, RiskProfile::Safe) - 0.375).abs() < 1e-12);
    }

    #[test]
    fn clamps_input() {
        assert_eq!(penalty(3.0, RiskProfile::Safe), penalty(1.0, RiskProfile::Safe));
        assert_eq!(penalty(-1.0, RiskProfile::Greedy), 0.0);
        assert_eq!(penalty(f64::NAN, RiskProfile::Balanced), 0.0);
    }

    #[test]
    fn zero_risk_is_free_for_every_profile() {
        for p in [RiskProfile::Greedy, RiskProfile::Balanced, RiskProfile::Safe] {
            assert_eq!(penalty(0.0, p), 0.0);
        }
    }

    #[test]
    fn unknown_mode_is_balanced() {
        assert_eq!(RiskProfile::from_mode("reckless"), RiskProfile::Balanced);
        assert_eq!(RiskProfile::from_mode(""), RiskProfile::Balanced);
        assert_eq!(RiskProfile::from_mode("SAFE"), RiskProfile::Safe);
        assert_eq!(RiskProfile::from_mode(" Greedy\n"), RiskProfile::Greedy);
    }

    #[test]
    fn serde_uses_mode_strings() {
        let p: RiskProfile = serde_json::from_str("\"greedy\"").unwrap();
        assert_eq!(p, RiskProfile::Greedy);
        let q: RiskProfile = serde_json::from_str("\"yolo\"").unwrap();
        assert_eq!(q, RiskProfile::Balanced);
        assert_eq!(serde_json::to_string(&RiskProfile::Safe).unwrap(), "\"safe\"");
    }
}
