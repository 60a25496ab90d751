//! Feature and weight vectors
//!
//! Both vectors map a [`Feature`] to a real value. A role's features and
//! weights must cover exactly the same keys; [`FeatureVector::dot`] refuses to
//! score vectors that disagree instead of treating missing keys as zero.

use std::fmt;

use capture_core::{Distancer, Team};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Named feature of a successor state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    NearestFoodDistance,
    FoodsLeft,
    GhostThreat,
    DesireToReturn,
    Invaders,
    InvaderDistance,
    DefendBorder,
}

impl Feature {
    pub fn name(self) -> &'static str {
        match self {
            Feature::NearestFoodDistance => "nearestFoodDistance",
            Feature::FoodsLeft => "foodsLeft",
            Feature::GhostThreat => "ghostThreat",
            Feature::DesireToReturn => "desireToReturn",
            Feature::Invaders => "invaders",
            Feature::InvaderDistance => "invaderDistance",
            Feature::DefendBorder => "defendBorder",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a feature extractor knows about the deciding agent
#[derive(Clone, Copy, Debug)]
pub struct FeatureContext<'a> {
    pub index: usize,
    pub team: Team,
    /// Food carried in the state the decision is made from (not the successor)
    pub carrying: u32,
    pub distancer: &'a Distancer,
}

// ============================================================================
// VECTORS
// ============================================================================

/// Feature values of one candidate successor
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector {
    values: FxHashMap<Feature, f64>,
}

/// Linear weights, one per feature
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightVector {
    values: FxHashMap<Feature, f64>,
}

macro_rules! feature_map_impl {
    ($ty:ident) => {
        impl $ty {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn get(&self, feature: Feature) -> Option<f64> {
                self.values.get(&feature).copied()
            }

            pub fn insert(&mut self, feature: Feature, value: f64) {
                self.values.insert(feature, value);
            }

            pub fn len(&self) -> usize {
                self.values.len()
            }

            pub fn is_empty(&self) -> bool {
                self.values.is_empty()
            }

            /// Keys in a stable order
            pub fn keys(&self) -> Vec<Feature> {
                let mut keys: Vec<Feature> = self.values.keys().copied().collect();
                keys.sort();
                keys
            }

            /// Entries in key order
            pub fn entries(&self) -> Vec<(Feature, f64)> {
                self.keys()
                    .into_iter()
                    .map(|k| (k, self.values[&k]))
                    .collect()
            }

            /// First key that differs from `schema`, if any
            pub fn schema_mismatch(&self, schema: &[Feature]) -> Option<Feature> {
                if let Some(&missing) = schema.iter().find(|&&f| !self.values.contains_key(&f)) {
                    return Some(missing);
                }
                self.keys().into_iter().find(|k| !schema.contains(k))
            }
        }

        impl FromIterator<(Feature, f64)> for $ty {
            fn from_iter<I: IntoIterator<Item = (Feature, f64)>>(iter: I) -> Self {
                Self {
                    values: iter.into_iter().collect(),
                }
            }
        }
    };
}

feature_map_impl!(FeatureVector);
feature_map_impl!(WeightVector);

impl FeatureVector {
    /// Inner product over the shared key set.
    ///
    /// Terms are summed in key order so equal inputs give bit-identical scores.
    /// Returns the offending feature when the key sets differ.
    pub fn dot(&self, weights: &WeightVector) -> Result<f64, Feature> {
        if let Some(feature) = self.schema_mismatch(&weights.keys()) {
            return Err(feature);
        }
        Ok(self
            .entries()
            .into_iter()
            .map(|(feature, value)| value * weights.values[&feature])
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights() -> WeightVector {
        [(Feature::Invaders, -100.0), (Feature::DefendBorder, -1.0)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_dot_product() {
        let features: FeatureVector = [(Feature::Invaders, 2.0), (Feature::DefendBorder, 4.0)]
            .into_iter()
            .collect();
        assert_eq!(features.dot(&weights()), Ok(-204.0));
    }

    #[test]
    fn test_dot_rejects_missing_key() {
        let features: FeatureVector = [(Feature::Invaders, 2.0)].into_iter().collect();
        assert_eq!(features.dot(&weights()), Err(Feature::DefendBorder));
    }

    #[test]
    fn test_dot_rejects_extra_key() {
        let features: FeatureVector = [
            (Feature::Invaders, 2.0),
            (Feature::DefendBorder, 4.0),
            (Feature::FoodsLeft, 1.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(features.dot(&weights()), Err(Feature::FoodsLeft));
    }

    #[test]
    fn test_feature_names() {
        assert_eq!(Feature::NearestFoodDistance.to_string(), "nearestFoodDistance");
        assert_eq!(Feature::DefendBorder.name(), "defendBorder");
    }

    #[test]
    fn test_serde_uses_feature_names() {
        let features: FeatureVector = [(Feature::GhostThreat, 0.5)].into_iter().collect();
        let json = serde_json::to_string(&features).unwrap();
        assert_eq!(json, r#"{"ghostThreat":0.5}"#);
    }
}
