use crate::error::{FlameError, Result};
use crate::types::Affine;
use crate::variations::{Precalc, VariationType};

/// Maximum weighted variation slots per xform.
pub const MAX_SLOTS: usize = 4;

/// One weighted variation with its parameter vector and, for the five
/// cache-carrying types, the derived auxiliary values. The cache is pure
/// derived state; [`VariationSlot::finalize`] recomputes it and must be
/// called after any parameter change.
#[derive(Debug, Clone)]
pub struct VariationSlot {
    pub var: VariationType,
    pub weight: f64,
    pub params: Vec<f64>,
    pub precalc: Option<Precalc>,
}

impl VariationSlot {
    pub fn new(var: VariationType, weight: f64, params: Vec<f64>) -> Result<Self> {
        if params.len() != var.arity() {
            return Err(FlameError::Genome(format!(
                "variation {} expects {} parameter(s), got {}",
                var.name(),
                var.arity(),
                params.len()
            )));
        }
        let mut slot = Self {
            var,
            weight,
            params,
            precalc: None,
        };
        slot.finalize();
        Ok(slot)
    }

    /// Recompute the parameter-derived cache.
    pub fn finalize(&mut self) {
        self.precalc = Precalc::derive(self.var, &self.params);
    }

    pub fn is_active(&self) -> bool {
        self.weight != 0.0
    }
}

/// One configured transform of the flame: affine pre-map, up to four
/// weighted variations, optional post-affine and post-variation, color and
/// opacity.
#[derive(Debug, Clone)]
pub struct Xform {
    pub weight: f64,
    pub color: f64,
    pub color_speed: f64,
    pub alpha: f64,
    pub pre_blur: f64,
    pub pre_affine: Affine,
    pub post_affine: Option<Affine>,
    pub slots: Vec<VariationSlot>,
    pub post_slot: Option<VariationSlot>,

    /// Precomputed color blend coefficients; see [`Xform::finalize`].
    pub speed_weight: f64,
    pub one_minus_weight: f64,
}

impl Default for Xform {
    fn default() -> Self {
        Self {
            weight: 1.0,
            color: 0.0,
            color_speed: 0.0,
            alpha: 1.0,
            pre_blur: 0.0,
            pre_affine: Affine::IDENTITY,
            post_affine: None,
            slots: Vec::new(),
            post_slot: None,
            speed_weight: 0.0,
            one_minus_weight: 1.0,
        }
    }
}

impl Xform {
    /// Plain xform carrying a single variation at full weight.
    pub fn with_variation(var: VariationType, weight: f64) -> Result<Self> {
        let mut xf = Xform::default();
        xf.slots.push(VariationSlot::new(var, weight, vec![0.0; var.arity()])?);
        xf.finalize();
        Ok(xf)
    }

    /// Recompute all derived state: color blend coefficients and slot
    /// caches. `color_speed == 0` yields `(0, 1)` so the running color is
    /// left untouched.
    pub fn finalize(&mut self) {
        self.speed_weight = self.color_speed;
        self.one_minus_weight = 1.0 - self.color_speed;
        for slot in &mut self.slots {
            slot.finalize();
        }
        if let Some(post) = &mut self.post_slot {
            post.finalize();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.weight < 0.0 {
            return Err(FlameError::Genome(format!(
                "xform weight must be non-negative, got {}",
                self.weight
            )));
        }
        if !(0.0..=1.0).contains(&self.color) {
            return Err(FlameError::Genome(format!(
                "color coordinate must lie in [0,1], got {}",
                self.color
            )));
        }
        if !(-1.0..=1.0).contains(&self.color_speed) {
            return Err(FlameError::Genome(format!(
                "color speed must lie in [-1,1], got {}",
                self.color_speed
            )));
        }
        if self.pre_blur < 0.0 {
            return Err(FlameError::Genome(
                "pre-blur weight must be non-negative".to_string(),
            ));
        }
        if self.slots.len() > MAX_SLOTS {
            return Err(FlameError::Genome(format!(
                "at most {} variation slots per xform, got {}",
                MAX_SLOTS,
                self.slots.len()
            )));
        }
        Ok(())
    }

    /// True when no variation slot contributes; the engine then passes the
    /// affine-transformed point through unchanged.
    pub fn is_identity_blend(&self) -> bool {
        !self.slots.iter().any(VariationSlot::is_active)
    }
}
