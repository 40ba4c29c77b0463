//! Action scores.
//!
//! A score carries the expected victory points of an action, a scalar risk
//! estimate and an open `details` mapping. The baseline evaluator fills the
//! open entries; phase valuation adds a structured breakdown under the stable
//! `valuation` key without touching anything else.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::valuation::explain::{ValuationBreakdown, VALUATION_KEY};

/// Score of a single candidate action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub expected_vp: f64,
    /// Conceptually in [0, 1]; clamped when read by the risk model, not on write.
    #[serde(default)]
    pub risk: f64,
    #[serde(default)]
    pub details: Details,
}

impl Score {
    pub fn new(expected_vp: f64, risk: f64) -> Self {
        Score {
            expected_vp,
            risk,
            details: Details::default(),
        }
    }

    /// Returns this score with a baseline detail entry set.
    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details.insert(key, value);
        self
    }

    /// Risk clamped to [0, 1]; NaN reads as 0.
    pub fn risk_clamped(&self) -> f64 {
        if self.risk.is_nan() {
            return 0.0;
        }
        self.risk.clamp(0.0, 1.0)
    }
}

/// Open explain mapping plus the structured valuation breakdown.
///
/// Serializes as a single flat object: baseline keys side by side with an
/// optional `valuation` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Details {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valuation: Option<ValuationBreakdown>,
    #[serde(flatten)]
    pub entries: Map<String, Value>,
}

impl Details {
    /// Sets a baseline entry. A `valuation` object is folded into the
    /// typed section; any other `valuation` value is ignored.
    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        if key == VALUATION_KEY {
            self.absorb_valuation(value);
        } else {
            self.entries.insert(key.to_string(), value);
        }
    }

    pub(crate) fn absorb_valuation(&mut self, value: Value) {
        let Value::Object(raw) = value else {
            return;
        };
        let section = self.valuation.get_or_insert_with(ValuationBreakdown::default);
        for (key, v) in raw {
            section.absorb(key, v);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Numeric entry. Numbers, booleans and numeric strings are accepted;
    /// anything else reads as absent.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.entries.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|v| v.is_finite())
    }

    /// Truthiness of an entry; absent reads as false.
    pub fn flag(&self, key: &str) -> bool {
        match self.entries.get(key) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(a)) => !a.is_empty(),
            Some(Value::Object(o)) => !o.is_empty(),
        }
    }
}
