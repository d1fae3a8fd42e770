//! Weighting strategies.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The four weight slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightKey {
    Urgency,
    Importance,
    Effort,
    Dependency,
}

impl WeightKey {
    /// All keys in explanation order.
    pub const ALL: [WeightKey; 4] = [
        WeightKey::Urgency,
        WeightKey::Importance,
        WeightKey::Effort,
        WeightKey::Dependency,
    ];

    /// Wire name of the key.
    pub fn name(self) -> &'static str {
        match self {
            WeightKey::Urgency => "urgency",
            WeightKey::Importance => "importance",
            WeightKey::Effort => "effort",
            WeightKey::Dependency => "dependency",
        }
    }

    /// Resolves a wire name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

/// Effective factor weights.
///
/// Weights are used as given: they need not sum to 1 and are never
/// renormalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependency: f64,
}

impl Weights {
    /// Creates a weight set.
    pub fn new(urgency: f64, importance: f64, effort: f64, dependency: f64) -> Self {
        Self {
            urgency,
            importance,
            effort,
            dependency,
        }
    }

    /// Weight of a slot.
    pub fn get(&self, key: WeightKey) -> f64 {
        match key {
            WeightKey::Urgency => self.urgency,
            WeightKey::Importance => self.importance,
            WeightKey::Effort => self.effort,
            WeightKey::Dependency => self.dependency,
        }
    }

    /// Replaces the weight of one slot.
    pub fn with(mut self, key: WeightKey, weight: f64) -> Self {
        match key {
            WeightKey::Urgency => self.urgency = weight,
            WeightKey::Importance => self.importance = weight,
            WeightKey::Effort => self.effort = weight,
            WeightKey::Dependency => self.dependency = weight,
        }
        self
    }

    /// Applies a partial override map. Unrecognized keys and non-finite
    /// values are ignored.
    pub fn with_overrides(self, overrides: &HashMap<String, f64>) -> Self {
        overrides
            .iter()
            .filter_map(|(name, &w)| WeightKey::from_name(name).map(|k| (k, w)))
            .filter(|&(key, w)| {
                if !w.is_finite() {
                    tracing::warn!(weight = key.name(), value = w, "ignoring non-finite weight");
                }
                w.is_finite()
            })
            .fold(self, |acc, (key, w)| acc.with(key, w))
    }

    /// Sum of all four weights.
    pub fn total(&self) -> f64 {
        self.urgency + self.importance + self.effort + self.dependency
    }
}

impl Default for Weights {
    fn default() -> Self {
        Strategy::default().base_weights()
    }
}

/// Named weighting presets.
///
/// | strategy | urgency | importance | effort | dependency |
/// |---|---|---|---|---|
/// | smart_balance | 0.35 | 0.30 | 0.20 | 0.15 |
/// | fastest_wins | 0.20 | 0.15 | 0.55 | 0.10 |
/// | high_impact | 0.20 | 0.60 | 0.10 | 0.10 |
/// | deadline_driven | 0.60 | 0.20 | 0.10 | 0.10 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Balanced mix of all factors.
    #[default]
    SmartBalance,
    /// Quick wins first.
    FastestWins,
    /// Importance dominates.
    HighImpact,
    /// Deadlines dominate.
    DeadlineDriven,
}

impl Strategy {
    /// All presets.
    pub const ALL: [Strategy; 4] = [
        Strategy::SmartBalance,
        Strategy::FastestWins,
        Strategy::HighImpact,
        Strategy::DeadlineDriven,
    ];

    /// Wire name of the preset.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::SmartBalance => "smart_balance",
            Strategy::FastestWins => "fastest_wins",
            Strategy::HighImpact => "high_impact",
            Strategy::DeadlineDriven => "deadline_driven",
        }
    }

    /// Resolves a preset name, falling back to [`Strategy::SmartBalance`]
    /// for anything unrecognized.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(strategy = name, "unknown strategy, using smart_balance");
            Strategy::default()
        })
    }

    /// Preset weights before overrides.
    pub fn base_weights(self) -> Weights {
        match self {
            Strategy::SmartBalance => Weights::new(0.35, 0.30, 0.20, 0.15),
            Strategy::FastestWins => Weights::new(0.20, 0.15, 0.55, 0.10),
            Strategy::HighImpact => Weights::new(0.20, 0.60, 0.10, 0.10),
            Strategy::DeadlineDriven => Weights::new(0.60, 0.20, 0.10, 0.10),
        }
    }

    /// Preset weights with a partial override applied.
    pub fn weights(self, overrides: &HashMap<String, f64>) -> Weights {
        self.base_weights().with_overrides(overrides)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognized strategy name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStrategy(pub String);

impl fmt::Display for UnknownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown strategy '{}'", self.0)
    }
}

impl std::error::Error for UnknownStrategy {}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.name() == s)
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_preset_weights() {
        assert_eq!(
            Strategy::SmartBalance.base_weights(),
            Weights::new(0.35, 0.30, 0.20, 0.15)
        );
        assert_eq!(
            Strategy::FastestWins.base_weights(),
            Weights::new(0.20, 0.15, 0.55, 0.10)
        );
        assert_eq!(
            Strategy::HighImpact.base_weights(),
            Weights::new(0.20, 0.60, 0.10, 0.10)
        );
        assert_eq!(
            Strategy::DeadlineDriven.base_weights(),
            Weights::new(0.60, 0.20, 0.10, 0.10)
        );
    }

    #[test]
    fn test_override_single_key() {
        let w = Strategy::SmartBalance.weights(&overrides(&[("importance", 0.9)]));
        assert_eq!(w, Weights::new(0.35, 0.9, 0.20, 0.15));
    }

    #[test]
    fn test_override_ignores_unknown_keys() {
        let w = Strategy::HighImpact.weights(&overrides(&[("fun", 1.0), ("effort", 0.0)]));
        assert_eq!(w, Weights::new(0.20, 0.60, 0.0, 0.10));
    }

    #[test]
    fn test_override_skips_non_finite() {
        let w = Strategy::SmartBalance.weights(&overrides(&[
            ("urgency", f64::NAN),
            ("dependency", f64::INFINITY),
            ("effort", 0.5),
        ]));
        assert_eq!(w, Weights::new(0.35, 0.30, 0.5, 0.15));
    }

    #[test]
    fn test_no_renormalization() {
        let w = Strategy::SmartBalance.weights(&overrides(&[("urgency", 2.0)]));
        assert!((w.total() - 2.65).abs() < 1e-12);
    }

    #[test]
    fn test_strategy_names() {
        for st in Strategy::ALL {
            assert_eq!(st.name().parse::<Strategy>(), Ok(st));
            assert_eq!(st.to_string(), st.name());
        }
        assert!("balanced".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_unknown_strategy_falls_back() {
        assert_eq!(
            Strategy::from_name_or_default("whatever"),
            Strategy::SmartBalance
        );
        assert_eq!(
            Strategy::from_name_or_default("deadline_driven"),
            Strategy::DeadlineDriven
        );
    }

    #[test]
    fn test_strategy_serde() {
        let json = serde_json::to_string(&Strategy::FastestWins).unwrap();
        assert_eq!(json, "\"fastest_wins\"");
    }

    #[test]
    fn test_weight_key_names() {
        for key in WeightKey::ALL {
            assert_eq!(WeightKey::from_name(key.name()), Some(key));
        }
        assert_eq!(WeightKey::from_name("speed"), None);
    }
}
