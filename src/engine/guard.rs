//! Numerical guard utilities: epsilon clamps and the single validity
//! predicate the engine applies after every full step.

/// Epsilon added to radial denominators. Part of the output contract:
/// changing it changes rendered points.
pub const EPS: f64 = 1e-10;

/// Default divergence bound on the point norm.
pub const DEFAULT_LIMIT: f64 = 1000.0;

/// Coordinate magnitude beyond which a value is treated as runaway even
/// when still finite.
const BAD_VALUE: f64 = 1e10;

/// True when `x` is unusable: non-finite or runaway.
pub fn bad_value(x: f64) -> bool {
    !x.is_finite() || x.abs() > BAD_VALUE
}

/// Epsilon-guarded reciprocal: never divides by zero.
pub fn safe_recip(x: f64) -> f64 {
    if x == 0.0 {
        1.0 / EPS
    } else {
        1.0 / x
    }
}

/// Tangent with a guarded cosine denominator.
pub fn safe_tan(x: f64) -> f64 {
    let c = x.cos();
    if c == 0.0 {
        x.sin() / EPS
    } else {
        x.sin() / c
    }
}

/// The one place divergence is judged: false on zero alpha, any non-finite
/// coordinate, or a norm beyond `limit`.
pub fn is_valid(x: f64, y: f64, alpha: f64, limit: f64) -> bool {
    if alpha == 0.0 {
        return false;
    }
    if !x.is_finite() || !y.is_finite() {
        return false;
    }
    (x * x + y * y).sqrt() <= limit
}
