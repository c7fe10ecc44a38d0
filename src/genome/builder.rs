//! Staged construction of a [`Genome`], either programmatically or from a
//! flat parameter namespace.
//!
//! Key scheme read by [`GenomeBuilder::from_params`]:
//!
//! ```text
//! xform.count                       number of xforms (required)
//! xform.{i}.weight                  selection weight        (default 1)
//! xform.{i}.color                   palette coordinate      (default 0)
//! xform.{i}.color_speed             blend speed             (default 0)
//! xform.{i}.alpha                   opacity                 (default 1)
//! xform.{i}.pre_blur                pre-blur weight         (default 0)
//! xform.{i}.coefs.{a..f}            pre-affine              (default identity)
//! xform.{i}.post.{a..f}             post-affine, enabled by presence of `.a`
//! xform.{i}.var.{s}.type            variation code, s in 0..4
//! xform.{i}.var.{s}.weight          slot weight             (default 1)
//! xform.{i}.var.{s}.p{0..5}         slot parameters, arity of the type
//! xform.{i}.post_var.type|weight|p{k}   post-variation
//! final.enabled                     final xform on/off
//! final.*                           same layout as one xform, minus weight
//! xaos.{i}.{j}                      transition weight; presence of xaos.0.0
//!                                   enables the matrix, all cells required
//! symmetry                          0, 3 or 5
//! trig_scaled                       boolean trig convention switch
//! global.{a..f}                     global affine, enabled by presence of `.a`
//! ```

use super::params::ParamSource;
use super::xform::{VariationSlot, Xform, MAX_SLOTS};
use super::{Genome, TransitionMatrix};
use crate::error::{FlameError, Result};
use crate::types::{Affine, SymmetryMode, TrigMode};
use crate::variations::VariationType;

#[derive(Debug, Default)]
pub struct GenomeBuilder {
    xforms: Vec<Xform>,
    final_xform: Option<Xform>,
    symmetry: SymmetryMode,
    global_transform: Option<Affine>,
    trig_mode: TrigMode,
    xaos: Option<TransitionMatrix>,
}

impl GenomeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_xform(mut self, xform: Xform) -> Self {
        self.xforms.push(xform);
        self
    }

    pub fn final_xform(mut self, xform: Xform) -> Self {
        self.final_xform = Some(xform);
        self
    }

    pub fn symmetry(mut self, mode: SymmetryMode) -> Self {
        self.symmetry = mode;
        self
    }

    pub fn global_transform(mut self, affine: Affine) -> Self {
        self.global_transform = Some(affine);
        self
    }

    pub fn trig_mode(mut self, mode: TrigMode) -> Self {
        self.trig_mode = mode;
        self
    }

    pub fn xaos(mut self, matrix: TransitionMatrix) -> Self {
        self.xaos = Some(matrix);
        self
    }

    /// Validate and freeze. Every xform is finalized here, so callers can
    /// hand in xforms with stale derived state.
    pub fn build(mut self) -> Result<Genome> {
        for xf in &mut self.xforms {
            xf.finalize();
        }
        if let Some(f) = &mut self.final_xform {
            f.finalize();
        }
        Genome::assemble(
            self.xforms,
            self.final_xform,
            self.symmetry,
            self.global_transform,
            self.trig_mode,
            self.xaos,
        )
    }

    /// Populate a builder from the flat key namespace.
    pub fn from_params(src: &impl ParamSource) -> Result<Self> {
        let count = src
            .get_i64("xform.count")
            .ok_or_else(|| FlameError::Genome("missing key 'xform.count'".to_string()))?;
        if count < 1 {
            return Err(FlameError::Genome(format!(
                "'xform.count' must be at least 1, got {}",
                count
            )));
        }

        let mut builder = GenomeBuilder::new();
        for i in 0..count as usize {
            builder = builder.add_xform(read_xform(src, &format!("xform.{}", i), true)?);
        }

        if src.get_bool("final.enabled").unwrap_or(false) {
            builder = builder.final_xform(read_xform(src, "final", false)?);
        }

        if src.get("xaos.0.0").is_some() {
            let n = count as usize;
            let mut rows = Vec::with_capacity(n);
            for i in 0..n {
                let mut row = Vec::with_capacity(n);
                for j in 0..n {
                    let key = format!("xaos.{}.{}", i, j);
                    let w = src.get_f64(&key).ok_or_else(|| {
                        FlameError::Genome(format!("incomplete transition matrix: missing '{}'", key))
                    })?;
                    row.push(w);
                }
                rows.push(row);
            }
            builder = builder.xaos(TransitionMatrix::new(rows)?);
        }

        match src.get_i64("symmetry").unwrap_or(0) {
            0 => {}
            3 => builder = builder.symmetry(SymmetryMode::Rotational3),
            5 => builder = builder.symmetry(SymmetryMode::Rotational5),
            other => {
                return Err(FlameError::Genome(format!(
                    "'symmetry' must be 0, 3 or 5, got {}",
                    other
                )))
            }
        }

        if src.get_bool("trig_scaled").unwrap_or(false) {
            builder = builder.trig_mode(TrigMode::Scaled);
        }

        if let Some(affine) = read_affine(src, "global")? {
            builder = builder.global_transform(affine);
        }

        Ok(builder)
    }
}

/// Read one xform under `prefix`. The final xform takes no selection
/// weight, so `with_weight` is false for it.
fn read_xform(src: &impl ParamSource, prefix: &str, with_weight: bool) -> Result<Xform> {
    let mut xf = Xform::default();

    if with_weight {
        if let Some(w) = src.get_f64(&format!("{}.weight", prefix)) {
            xf.weight = w;
        }
    }
    if let Some(c) = src.get_f64(&format!("{}.color", prefix)) {
        xf.color = c;
    }
    if let Some(cs) = src.get_f64(&format!("{}.color_speed", prefix)) {
        xf.color_speed = cs;
    }
    if let Some(a) = src.get_f64(&format!("{}.alpha", prefix)) {
        xf.alpha = a;
    }
    if let Some(pb) = src.get_f64(&format!("{}.pre_blur", prefix)) {
        xf.pre_blur = pb;
    }

    if let Some(affine) = read_affine(src, &format!("{}.coefs", prefix))? {
        xf.pre_affine = affine;
    }
    xf.post_affine = read_affine(src, &format!("{}.post", prefix))?;

    for s in 0..MAX_SLOTS {
        match read_slot(src, &format!("{}.var.{}", prefix, s))? {
            Some(slot) => xf.slots.push(slot),
            None => break,
        }
    }
    xf.post_slot = read_slot(src, &format!("{}.post_var", prefix))?;

    Ok(xf)
}

/// Read a variation slot under `prefix`; `None` when no `.type` key exists.
fn read_slot(src: &impl ParamSource, prefix: &str) -> Result<Option<VariationSlot>> {
    let code = match src.get_i64(&format!("{}.type", prefix)) {
        Some(c) => c,
        None => return Ok(None),
    };
    if code < 0 || code > u32::MAX as i64 {
        return Err(FlameError::Genome(format!(
            "'{}.type' is out of range: {}",
            prefix, code
        )));
    }
    let var = VariationType::from_code(code as u32).ok_or_else(|| {
        FlameError::Genome(format!("'{}.type' is not a known variation code: {}", prefix, code))
    })?;

    let weight = src.get_f64(&format!("{}.weight", prefix)).unwrap_or(1.0);
    let mut params = Vec::with_capacity(var.arity());
    for k in 0..var.arity() {
        let key = format!("{}.p{}", prefix, k);
        let v = src.get_f64(&key).ok_or_else(|| {
            FlameError::Genome(format!(
                "variation {} needs {} parameter(s): missing '{}'",
                var.name(),
                var.arity(),
                key
            ))
        })?;
        params.push(v);
    }

    VariationSlot::new(var, weight, params).map(Some)
}

/// Read an affine under `prefix`; `None` when `.a` is absent, all six
/// coefficients required otherwise.
fn read_affine(src: &impl ParamSource, prefix: &str) -> Result<Option<Affine>> {
    if src.get(&format!("{}.a", prefix)).is_none() {
        return Ok(None);
    }
    let mut c = [0.0; 6];
    for (slot, name) in c.iter_mut().zip(["a", "b", "c", "d", "e", "f"]) {
        let key = format!("{}.{}", prefix, name);
        *slot = src.get_f64(&key).ok_or_else(|| {
            FlameError::Genome(format!("incomplete affine: missing '{}'", key))
        })?;
    }
    Ok(Some(Affine::new(c[0], c[1], c[2], c[3], c[4], c[5])))
}
