//! Variation kernels that consume draws from the particle's random stream.
//! Draw count and order are part of the contract: given a fixed seed the
//! downstream point, color and validity are fully determined.

use std::f64::consts::PI;

use rand::Rng;

use super::state::VarState;
use crate::engine::guard::{bad_value, EPS};

pub fn julia<R: Rng>(w: f64, s: &mut VarState, rng: &mut R) {
    let mut a = 0.5 * s.atan();
    if rng.gen::<f64>() < 0.5 {
        a += PI;
    }
    let r = w * s.r().sqrt();
    let (sa, ca) = a.sin_cos();
    s.p0 += r * ca;
    s.p1 += r * sa;
}

pub fn noise<R: Rng>(w: f64, s: &mut VarState, rng: &mut R) {
    let a = rng.gen::<f64>() * 2.0 * PI;
    let (sa, ca) = a.sin_cos();
    let r = w * rng.gen::<f64>();
    s.p0 += s.tx * r * ca;
    s.p1 += s.ty * r * sa;
}

/// p = [power, dist]. A zero power divides through and the guard discards
/// the resulting non-finite point.
pub fn julian<R: Rng>(w: f64, p: &[f64], s: &mut VarState, rng: &mut R) {
    let power = p[0];
    let r_n = power.abs();
    let cn = p[1] / power / 2.0;
    let t_rnd = (r_n * rng.gen::<f64>()).trunc();
    let a = (s.atanyx() + 2.0 * PI * t_rnd) / power;
    let r = w * s.sumsq().powf(cn);
    let (sa, ca) = a.sin_cos();
    s.p0 += r * ca;
    s.p1 += r * sa;
}

/// p = [power, dist]
pub fn juliascope<R: Rng>(w: f64, p: &[f64], s: &mut VarState, rng: &mut R) {
    let power = p[0];
    let r_n = power.abs();
    let cn = p[1] / power / 2.0;
    let t_rnd = (r_n * rng.gen::<f64>()).trunc();
    let a = if (t_rnd as i64) & 1 == 0 {
        (2.0 * PI * t_rnd + s.atanyx()) / power
    } else {
        (2.0 * PI * t_rnd - s.atanyx()) / power
    };
    let (sa, ca) = a.sin_cos();
    let r = w * s.sumsq().powf(cn);
    s.p0 += r * ca;
    s.p1 += r * sa;
}

pub fn blur<R: Rng>(w: f64, s: &mut VarState, rng: &mut R) {
    let a = rng.gen::<f64>() * 2.0 * PI;
    let (sa, ca) = a.sin_cos();
    let r = w * rng.gen::<f64>();
    s.p0 += r * ca;
    s.p1 += r * sa;
}

/// p = [angle]. Four uniform draws form the pseudo-gaussian.
pub fn radial_blur<R: Rng>(w: f64, p: &[f64], s: &mut VarState, rng: &mut R) {
    let (spinvar, zoomvar) = (p[0] * PI / 2.0).sin_cos();
    let rnd = w
        * (rng.gen::<f64>() + rng.gen::<f64>() + rng.gen::<f64>() + rng.gen::<f64>() - 2.0);
    let ra = s.r();
    let a = s.atanyx() + spinvar * rnd;
    let (sa, ca) = a.sin_cos();
    let rz = zoomvar * rnd - 1.0;
    s.p0 += ra * ca + rz * s.tx;
    s.p1 += ra * sa + rz * s.ty;
}

/// Angle draw first, then the four-draw pseudo-gaussian radius.
pub fn gaussian_blur<R: Rng>(w: f64, s: &mut VarState, rng: &mut R) {
    let a = rng.gen::<f64>() * 2.0 * PI;
    let (sa, ca) = a.sin_cos();
    let r = w
        * (rng.gen::<f64>() + rng.gen::<f64>() + rng.gen::<f64>() + rng.gen::<f64>() - 2.0);
    s.p0 += r * ca;
    s.p1 += r * sa;
}

/// p = [slices, rotation, thickness]
pub fn pie<R: Rng>(w: f64, p: &[f64], s: &mut VarState, rng: &mut R) {
    let sl = (rng.gen::<f64>() * p[0] + 0.5).trunc();
    let a = p[1] + 2.0 * PI * (sl + rng.gen::<f64>() * p[2]) / p[0];
    let r = w * rng.gen::<f64>();
    let (sa, ca) = a.sin_cos();
    s.p0 += r * ca;
    s.p1 += r * sa;
}

pub fn arch<R: Rng>(w: f64, s: &mut VarState, rng: &mut R) {
    let a = rng.gen::<f64>() * w * PI;
    let (sa, ca) = a.sin_cos();
    s.p0 += w * sa;
    s.p1 += w * sa * sa / ca;
}

pub fn square<R: Rng>(w: f64, s: &mut VarState, rng: &mut R) {
    s.p0 += w * (rng.gen::<f64>() - 0.5);
    s.p1 += w * (rng.gen::<f64>() - 0.5);
}

pub fn rays<R: Rng>(w: f64, s: &mut VarState, rng: &mut R) {
    let a = w * rng.gen::<f64>() * PI;
    let r = w / (s.sumsq() + EPS);
    let tanr = w * a.tan() * r;
    s.p0 += tanr * s.tx.cos();
    s.p1 += tanr * s.ty.sin();
}

pub fn blade<R: Rng>(w: f64, s: &mut VarState, rng: &mut R) {
    let r = rng.gen::<f64>() * w * s.r();
    let (sr, cr) = r.sin_cos();
    s.p0 += w * s.tx * (cr + sr);
    s.p1 += w * s.tx * (cr - sr);
}

/// p = [petals, holes]
pub fn flower<R: Rng>(w: f64, p: &[f64], s: &mut VarState, rng: &mut R) {
    let theta = s.atanyx();
    let r = w * (rng.gen::<f64>() - p[1]) * (p[0] * theta).cos() / (s.r() + EPS);
    s.p0 += r * s.tx;
    s.p1 += r * s.ty;
}

/// p = [eccentricity, holes]
pub fn conic<R: Rng>(w: f64, p: &[f64], s: &mut VarState, rng: &mut R) {
    let r = s.r() + EPS;
    let ct = s.tx / r;
    let rr = w * (rng.gen::<f64>() - p[1]) * p[0] / (1.0 + p[0] * ct) / r;
    s.p0 += rr * s.tx;
    s.p1 += rr * s.ty;
}

/// p = [height, width]. Two draws, x then y.
pub fn parabola<R: Rng>(w: f64, p: &[f64], s: &mut VarState, rng: &mut R) {
    let r = s.r();
    let (sr, cr) = r.sin_cos();
    s.p0 += p[0] * w * sr * sr * rng.gen::<f64>();
    s.p1 += p[1] * w * cr * rng.gen::<f64>();
}

pub fn boarders<R: Rng>(w: f64, s: &mut VarState, rng: &mut R) {
    let round_x = s.tx.round();
    let round_y = s.ty.round();
    let offset_x = s.tx - round_x;
    let offset_y = s.ty - round_y;

    if rng.gen::<f64>() >= 0.75 {
        s.p0 += w * (offset_x * 0.5 + round_x);
        s.p1 += w * (offset_y * 0.5 + round_y);
    } else if offset_x.abs() >= offset_y.abs() {
        if offset_x >= 0.0 {
            s.p0 += w * (offset_x * 0.5 + round_x + 0.25);
            s.p1 += w * (offset_y * 0.5 + round_y + 0.25 * offset_y / offset_x);
        } else {
            s.p0 += w * (offset_x * 0.5 + round_x - 0.25);
            s.p1 += w * (offset_y * 0.5 + round_y - 0.25 * offset_y / offset_x);
        }
    } else if offset_y >= 0.0 {
        s.p1 += w * (offset_y * 0.5 + round_y + 0.25);
        s.p0 += w * (offset_x * 0.5 + round_x + offset_x / offset_y * 0.25);
    } else {
        s.p1 += w * (offset_y * 0.5 + round_y - 0.25);
        s.p0 += w * (offset_x * 0.5 + round_x - offset_x / offset_y * 0.25);
    }
}

/// p = [r, i, power]
pub fn cpow<R: Rng>(w: f64, p: &[f64], s: &mut VarState, rng: &mut R) {
    let power = p[2];
    let a = s.atanyx();
    let lnr = 0.5 * s.sumsq().ln();
    let va = 2.0 * PI / power;
    let vc = p[0] / power;
    let vd = p[1] / power;
    let ang = vc * a + vd * lnr + va * (power * rng.gen::<f64>()).trunc();
    let m = w * (vc * lnr - vd * a).exp();
    let (sa, ca) = ang.sin_cos();
    s.p0 += m * ca;
    s.p1 += m * sa;
}

pub fn twintrian<R: Rng>(w: f64, s: &mut VarState, rng: &mut R) {
    let r = rng.gen::<f64>() * w * s.r();
    let (sr, cr) = r.sin_cos();
    let mut diff = (sr * sr).log10() + cr;
    if bad_value(diff) {
        diff = -30.0;
    }
    s.p0 += w * s.tx * diff;
    s.p1 += w * s.tx * (diff - sr * PI);
}

/// p = [x0, y0, x1, y1, scatter_area, zero]. Points outside the rectangle
/// are either zeroed or jittered back inside (two draws, x then y).
pub fn crop<R: Rng>(w: f64, p: &[f64], s: &mut VarState, rng: &mut R) {
    let (x0, y0, x1, y1) = (p[0].min(p[2]), p[1].min(p[3]), p[0].max(p[2]), p[1].max(p[3]));
    let scatter = p[4].clamp(-1.0, 1.0);
    let mut x = s.tx;
    let mut y = s.ty;
    if x < x0 || x > x1 || y < y0 || y > y1 {
        if p[5] != 0.0 {
            x = 0.0;
            y = 0.0;
        } else {
            let xd = (x1 - x0) * 0.5;
            let yd = (y1 - y0) * 0.5;
            x = x0 + xd + rng.gen::<f64>() * xd * 2.0 * scatter - xd * scatter;
            y = y0 + yd + rng.gen::<f64>() * yd * 2.0 * scatter - yd * scatter;
        }
    }
    s.p0 += w * x;
    s.p1 += w * y;
}

pub fn glynnia<R: Rng>(w: f64, s: &mut VarState, rng: &mut R) {
    // sqrt(2) / 2
    let vvar2 = w * 0.7071067811865476;
    let r = s.r();
    if r >= 1.0 {
        if rng.gen::<f64>() > 0.5 {
            let d = (r + s.tx).sqrt() + EPS;
            s.p0 += vvar2 * d;
            s.p1 -= vvar2 / d * s.ty;
        } else {
            let d = r + s.tx;
            let dn = (r * (s.ty * s.ty + d * d)).sqrt() + EPS;
            let rr = w / dn;
            s.p0 += rr * d;
            s.p1 += rr * s.ty;
        }
    } else if rng.gen::<f64>() > 0.5 {
        let d = (r + s.tx).sqrt() + EPS;
        s.p0 -= vvar2 * d;
        s.p1 -= vvar2 / d * s.ty;
    } else {
        let d = r + s.tx;
        let dn = (r * (s.ty * s.ty + d * d)).sqrt() + EPS;
        let rr = w / dn;
        s.p0 -= rr * d;
        s.p1 += rr * s.ty;
    }
}

/// p = [order, centre_x, centre_y]. One draw picks the rotation sector.
pub fn point_symmetry<R: Rng>(w: f64, p: &[f64], s: &mut VarState, rng: &mut R) {
    let order = if p[0] < 1.0 { 1.0 } else { p[0].trunc() };
    let k = (rng.gen::<f64>() * order).trunc();
    let a = 2.0 * PI * k / order;
    let (sa, ca) = a.sin_cos();
    let dx = s.tx - p[1];
    let dy = s.ty - p[2];
    s.p0 += w * (p[1] + dx * ca - dy * sa);
    s.p1 += w * (p[2] + dx * sa + dy * ca);
}

/// Hard-coded pre-blur (reserved type code 65): perturbs the incoming point
/// in place before the pre-affine. Pseudo-gaussian radius (four draws minus
/// two) first, then the angle draw.
pub fn pre_blur<R: Rng>(weight: f64, x: &mut f64, y: &mut f64, rng: &mut R) {
    let rnd_g = weight
        * (rng.gen::<f64>() + rng.gen::<f64>() + rng.gen::<f64>() + rng.gen::<f64>() - 2.0);
    let rnd_a = rng.gen::<f64>() * 2.0 * PI;
    let (sa, ca) = rnd_a.sin_cos();
    *x += rnd_g * ca;
    *y += rnd_g * sa;
}
