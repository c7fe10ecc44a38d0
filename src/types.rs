use serde::{Deserialize, Serialize};

/// 2x2 linear map plus offset: (x, y) -> (a*x + b*y + c, d*x + e*y + f).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 0.0,
        e: 1.0,
        f: 0.0,
    };

    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Build from two basis vectors and an offset.
    pub fn from_basis(x_axis: (f64, f64), y_axis: (f64, f64), offset: (f64, f64)) -> Self {
        Self {
            a: x_axis.0,
            b: y_axis.0,
            c: offset.0,
            d: x_axis.1,
            e: y_axis.1,
            f: offset.1,
        }
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.b * y + self.c,
            self.d * x + self.e * y + self.f,
        )
    }

    pub fn is_identity(&self) -> bool {
        *self == Affine::IDENTITY
    }
}

impl Default for Affine {
    fn default() -> Self {
        Affine::IDENTITY
    }
}

/// Rotational symmetry applied once per step, probabilistically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SymmetryMode {
    #[default]
    None,
    /// Rotate by 0, 120 or 240 degrees, 1/3 each.
    Rotational3,
    /// Rotate by k * 72 degrees, k drawn uniformly from 0..5 (1/5 no-op).
    Rotational5,
}

/// Selects between the two closed forms of the trig-family variations.
/// `Scaled` pre-multiplies the input by pi/2 (circular family) or pi/4
/// (hyperbolic family). Run-global, threaded through the genome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrigMode {
    #[default]
    Standard,
    Scaled,
}

/// One accepted chaos-game point, handed to the accumulation sink.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmittedPoint {
    pub x: f64,
    pub y: f64,
    pub color: f64,
    pub alpha: f64,
}

/// Value in the flat genome parameter namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Float(f64),
    Integer(i64),
    Bool(bool),
}

impl ParamValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            ParamValue::Integer(v) => Some(*v as f64),
            ParamValue::Bool(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Integer(v) => Some(*v),
            ParamValue::Float(v) if v.fract() == 0.0 => Some(*v as i64),
            _ => None,
        }
    }
}
