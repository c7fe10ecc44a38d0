use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::engine::guard::DEFAULT_LIMIT;
use crate::error::FlameError;
use serde::{Deserialize, Serialize};

/// Run-level knobs of the chaos game. Genome content (xforms, transition
/// matrix, symmetry, trig convention) lives in the flat `[genome]` key
/// table, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Independent chaos-game walkers.
    pub particles: usize,
    /// Steps each walker runs once started.
    pub steps_per_particle: usize,
    /// Optional accepted-point budget across all walkers, checked at
    /// particle granularity.
    pub max_points: Option<u64>,
    /// Base random seed. A set seed makes the emitted point set
    /// reproducible across thread counts; unset draws a fresh seed per run.
    pub seed: Option<u64>,
    /// Divergence bound on the point norm.
    pub limit: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            particles: 64,
            steps_per_particle: 10_000,
            max_points: None,
            seed: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ConfigSection for RunConfig {
    fn section_name() -> &'static str {
        "run"
    }

    fn validate(&self) -> Result<(), FlameError> {
        if self.particles == 0 {
            return Err(FlameError::Configuration(
                "Particle count must be at least 1".to_string(),
            ));
        }
        if self.steps_per_particle == 0 {
            return Err(FlameError::Configuration(
                "Steps per particle must be at least 1".to_string(),
            ));
        }
        if self.max_points == Some(0) {
            return Err(FlameError::Configuration(
                "Point budget must be at least 1 when set".to_string(),
            ));
        }
        if !self.limit.is_finite() || self.limit <= 0.0 {
            return Err(FlameError::Configuration(
                "Divergence limit must be a positive finite number".to_string(),
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: Self::section_name().to_string(),
            fields: vec![
                FieldManifest {
                    name: "particles".to_string(),
                    field_type: "usize".to_string(),
                    default: serde_json::json!(64),
                    min: Some(1.0),
                    max: None,
                    description: "Number of independent chaos-game walkers".to_string(),
                },
                FieldManifest {
                    name: "steps_per_particle".to_string(),
                    field_type: "usize".to_string(),
                    default: serde_json::json!(10_000),
                    min: Some(1.0),
                    max: None,
                    description: "Iteration budget per walker".to_string(),
                },
                FieldManifest {
                    name: "max_points".to_string(),
                    field_type: "Option<u64>".to_string(),
                    default: serde_json::Value::Null,
                    min: Some(1.0),
                    max: None,
                    description: "Total accepted-point budget across all walkers".to_string(),
                },
                FieldManifest {
                    name: "seed".to_string(),
                    field_type: "Option<u64>".to_string(),
                    default: serde_json::Value::Null,
                    min: None,
                    max: None,
                    description: "Base random seed for reproducible runs".to_string(),
                },
                FieldManifest {
                    name: "limit".to_string(),
                    field_type: "f64".to_string(),
                    default: serde_json::json!(DEFAULT_LIMIT),
                    min: Some(f64::MIN_POSITIVE),
                    max: None,
                    description: "Divergence bound on the point norm".to_string(),
                },
            ],
        }
    }
}
