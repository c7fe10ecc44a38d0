//! The static per-run configuration: xforms, the optional final xform,
//! symmetry, trig convention and the XAOS transition matrix. Built once,
//! immutable afterwards, safe to share by reference across workers.

pub mod builder;
pub mod params;
pub mod xform;

pub use builder::GenomeBuilder;
pub use params::{MapParams, ParamSource};
pub use xform::{VariationSlot, Xform, MAX_SLOTS};

use crate::error::{FlameError, Result};
use crate::types::{Affine, SymmetryMode, TrigMode};

/// Square matrix of non-negative transition weights; row `i` is the
/// unnormalized distribution over the next xform when leaving xform `i`.
#[derive(Debug, Clone)]
pub struct TransitionMatrix {
    rows: Vec<Vec<f64>>,
}

impl TransitionMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(FlameError::Genome(format!(
                    "transition matrix must be square: row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            if row.iter().any(|&w| w < 0.0 || !w.is_finite()) {
                return Err(FlameError::Genome(format!(
                    "transition matrix row {} contains a negative or non-finite weight",
                    i
                )));
            }
            if row.iter().sum::<f64>() <= 0.0 {
                return Err(FlameError::Genome(format!(
                    "transition matrix row {} sums to zero",
                    i
                )));
            }
        }
        Ok(Self { rows })
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.rows[i]
    }
}

/// Immutable flame genome. Selection CDFs are precomputed at build time so
/// the per-step selector only consumes one uniform draw.
#[derive(Debug, Clone)]
pub struct Genome {
    pub xforms: Vec<Xform>,
    pub final_xform: Option<Xform>,
    pub symmetry: SymmetryMode,
    pub global_transform: Option<Affine>,
    pub trig_mode: TrigMode,

    weight_cdf: Vec<f64>,
    xaos_cdf: Option<Vec<Vec<f64>>>,
}

impl Genome {
    pub fn xform_count(&self) -> usize {
        self.xforms.len()
    }

    /// Cumulative xform weights; last entry is the (positive) total.
    pub(crate) fn weight_cdf(&self) -> &[f64] {
        &self.weight_cdf
    }

    /// Cumulative transition row for xform `i`, when XAOS is configured.
    pub(crate) fn xaos_row_cdf(&self, i: usize) -> Option<&[f64]> {
        self.xaos_cdf.as_deref().map(|rows| rows[i].as_slice())
    }

    pub fn has_xaos(&self) -> bool {
        self.xaos_cdf.is_some()
    }

    /// Assemble and validate; only [`GenomeBuilder`] calls this.
    pub(crate) fn assemble(
        xforms: Vec<Xform>,
        final_xform: Option<Xform>,
        symmetry: SymmetryMode,
        global_transform: Option<Affine>,
        trig_mode: TrigMode,
        xaos: Option<TransitionMatrix>,
    ) -> Result<Self> {
        if xforms.is_empty() {
            return Err(FlameError::Genome(
                "genome needs at least one xform".to_string(),
            ));
        }
        for xf in &xforms {
            xf.validate()?;
        }
        if let Some(f) = &final_xform {
            f.validate()?;
        }

        let weight_cdf = cumulative(xforms.iter().map(|x| x.weight));
        if *weight_cdf.last().expect("non-empty") <= 0.0 {
            return Err(FlameError::Genome(
                "total xform weight must be positive".to_string(),
            ));
        }

        let xaos_cdf = match xaos {
            None => None,
            Some(m) => {
                if m.size() != xforms.len() {
                    return Err(FlameError::Genome(format!(
                        "transition matrix is {}x{} but genome has {} xforms",
                        m.size(),
                        m.size(),
                        xforms.len()
                    )));
                }
                Some(
                    (0..m.size())
                        .map(|i| cumulative(m.row(i).iter().copied()))
                        .collect(),
                )
            }
        };

        Ok(Self {
            xforms,
            final_xform,
            symmetry,
            global_transform,
            trig_mode,
            weight_cdf,
            xaos_cdf,
        })
    }
}

fn cumulative(weights: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut acc = 0.0;
    weights
        .map(|w| {
            acc += w;
            acc
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_matrix_rejects_non_square() {
        assert!(TransitionMatrix::new(vec![vec![1.0, 0.0], vec![1.0]]).is_err());
    }

    #[test]
    fn transition_matrix_rejects_zero_row() {
        let err = TransitionMatrix::new(vec![vec![1.0, 0.0], vec![0.0, 0.0]]);
        assert!(err.is_err());
    }

    #[test]
    fn transition_matrix_rejects_negative_weight() {
        assert!(TransitionMatrix::new(vec![vec![1.0, -0.5], vec![0.5, 0.5]]).is_err());
    }
}
