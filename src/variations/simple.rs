//! Parameterless variation kernels. Each adds its weighted output to the
//! state's accumulator; radial quantities come from the shared lazy cache.

use std::f64::consts::{FRAC_1_PI, FRAC_PI_2, PI};

use super::state::VarState;
use crate::engine::guard::{safe_recip, safe_tan, EPS};

pub fn linear(w: f64, s: &mut VarState) {
    s.p0 += w * s.tx;
    s.p1 += w * s.ty;
}

pub fn sinusoidal(w: f64, s: &mut VarState) {
    s.p0 += w * s.tx.sin();
    s.p1 += w * s.ty.sin();
}

pub fn spherical(w: f64, s: &mut VarState) {
    let r2 = w / (s.sumsq() + EPS);
    s.p0 += r2 * s.tx;
    s.p1 += r2 * s.ty;
}

pub fn swirl(w: f64, s: &mut VarState) {
    let r2 = s.sumsq();
    let (sr, cr) = r2.sin_cos();
    s.p0 += w * (cr * s.tx - sr * s.ty);
    s.p1 += w * (sr * s.tx + cr * s.ty);
}

pub fn horseshoe(w: f64, s: &mut VarState) {
    let r = w / (s.r() + EPS);
    s.p0 += (s.tx - s.ty) * (s.tx + s.ty) * r;
    s.p1 += 2.0 * s.tx * s.ty * r;
}

pub fn polar(w: f64, s: &mut VarState) {
    let nx = s.atan() * FRAC_1_PI;
    let ny = s.r() - 1.0;
    s.p0 += w * nx;
    s.p1 += w * ny;
}

pub fn handkerchief(w: f64, s: &mut VarState) {
    let a = s.atan();
    let r = s.r();
    s.p0 += w * r * (a + r).sin();
    s.p1 += w * r * (a - r).cos();
}

pub fn heart(w: f64, s: &mut VarState) {
    let a = s.r() * s.atan();
    let r = w * s.r();
    let (sa, ca) = a.sin_cos();
    s.p0 += r * sa;
    s.p1 -= r * ca;
}

pub fn disc(w: f64, s: &mut VarState) {
    let a = s.atan() * FRAC_1_PI;
    let r = PI * s.r();
    let (sr, cr) = r.sin_cos();
    s.p0 += w * sr * a;
    s.p1 += w * cr * a;
}

pub fn spiral(w: f64, s: &mut VarState) {
    let r = s.r() + EPS;
    let r1 = w / r;
    let (sr, cr) = r.sin_cos();
    let (sina, cosa) = (s.sina(), s.cosa());
    s.p0 += r1 * (cosa + sr);
    s.p1 += r1 * (sina - cr);
}

pub fn hyperbolic(w: f64, s: &mut VarState) {
    let r = s.r() + EPS;
    let (sina, cosa) = (s.sina(), s.cosa());
    s.p0 += w * sina / r;
    s.p1 += w * cosa * r;
}

pub fn diamond(w: f64, s: &mut VarState) {
    let r = s.r();
    let (sr, cr) = r.sin_cos();
    let (sina, cosa) = (s.sina(), s.cosa());
    s.p0 += w * sina * cr;
    s.p1 += w * cosa * sr;
}

pub fn ex(w: f64, s: &mut VarState) {
    let a = s.atan();
    let r = s.r();
    let n0 = (a + r).sin();
    let n1 = (a - r).cos();
    let m0 = n0 * n0 * n0 * r;
    let m1 = n1 * n1 * n1 * r;
    s.p0 += w * (m0 + m1);
    s.p1 += w * (m0 - m1);
}

pub fn bent(w: f64, s: &mut VarState) {
    let mut nx = s.tx;
    let mut ny = s.ty;
    if nx < 0.0 {
        nx *= 2.0;
    }
    if ny < 0.0 {
        ny /= 2.0;
    }
    s.p0 += w * nx;
    s.p1 += w * ny;
}

pub fn fisheye(w: f64, s: &mut VarState) {
    // Note the x/y swap relative to eyefish; kept for compatibility.
    let r = 2.0 * w / (s.r() + 1.0);
    s.p0 += r * s.ty;
    s.p1 += r * s.tx;
}

pub fn exponential(w: f64, s: &mut VarState) {
    let dx = w * (s.tx - 1.0).exp();
    let dy = PI * s.ty;
    let (sdy, cdy) = dy.sin_cos();
    s.p0 += dx * cdy;
    s.p1 += dx * sdy;
}

pub fn power(w: f64, s: &mut VarState) {
    let (sina, cosa) = (s.sina(), s.cosa());
    let r = w * s.r().powf(sina);
    s.p0 += r * cosa;
    s.p1 += r * sina;
}

pub fn cosine(w: f64, s: &mut VarState) {
    let a = s.tx * PI;
    let (sa, ca) = a.sin_cos();
    s.p0 += w * ca * s.ty.cosh();
    s.p1 -= w * sa * s.ty.sinh();
}

pub fn eyefish(w: f64, s: &mut VarState) {
    let r = (w * 2.0) / (s.r() + 1.0);
    s.p0 += r * s.tx;
    s.p1 += r * s.ty;
}

pub fn bubble(w: f64, s: &mut VarState) {
    let r = w / (0.25 * s.sumsq() + 1.0);
    s.p0 += r * s.tx;
    s.p1 += r * s.ty;
}

pub fn cylinder(w: f64, s: &mut VarState) {
    s.p0 += w * s.tx.sin();
    s.p1 += w * s.ty;
}

pub fn tangent(w: f64, s: &mut VarState) {
    s.p0 += w * s.tx.sin() * safe_recip(s.ty.cos());
    s.p1 += w * safe_tan(s.ty);
}

pub fn secant2(w: f64, s: &mut VarState) {
    let r = w * s.r();
    let cr = r.cos();
    let icr = safe_recip(cr);
    s.p0 += w * s.tx;
    if cr < 0.0 {
        s.p1 += w * (icr + 1.0);
    } else {
        s.p1 += w * (icr - 1.0);
    }
}

pub fn butterfly(w: f64, s: &mut VarState) {
    // 4 / sqrt(3 * pi)
    let wx = w * 1.3029400317411197;
    let y2 = s.ty * 2.0;
    let r = wx * ((s.ty * s.tx).abs() / (EPS + s.tx * s.tx + y2 * y2)).sqrt();
    s.p0 += r * s.tx;
    s.p1 += r * y2;
}

pub fn edisc(w: f64, s: &mut VarState) {
    let tmp = s.sumsq() + 1.0;
    let tmp2 = 2.0 * s.tx;
    let r1 = (tmp + tmp2).sqrt();
    let r2 = (tmp - tmp2).sqrt();
    let xmax = (r1 + r2) * 0.5;
    let a1 = (xmax + (xmax - 1.0).sqrt()).ln();
    let a2 = -(s.tx / xmax).acos();
    let wd = w / 11.57034632;
    let (mut snv, csv) = a1.sin_cos();
    let snhu = a2.sinh();
    let cshu = a2.cosh();
    if s.ty > 0.0 {
        snv = -snv;
    }
    s.p0 += wd * cshu * csv;
    s.p1 += wd * snhu * snv;
}

pub fn elliptic(w: f64, s: &mut VarState) {
    let tmp = s.sumsq() + 1.0;
    let x2 = 2.0 * s.tx;
    let xmax = 0.5 * ((tmp + x2).sqrt() + (tmp - x2).sqrt());
    let a = s.tx / xmax;
    let mut b = 1.0 - a * a;
    let mut ssx = xmax - 1.0;
    let wd = w / FRAC_PI_2;
    b = if b < 0.0 { 0.0 } else { b.sqrt() };
    ssx = if ssx < 0.0 { 0.0 } else { ssx.sqrt() };
    s.p0 += wd * a.atan2(b);
    if s.ty > 0.0 {
        s.p1 += wd * (xmax + ssx).ln();
    } else {
        s.p1 -= wd * (xmax + ssx).ln();
    }
}

pub fn foci(w: f64, s: &mut VarState) {
    let expx = s.tx.exp() * 0.5;
    let expnx = 0.25 / expx;
    let (sn, cn) = s.ty.sin_cos();
    let tmp = w / (expx + expnx - cn);
    s.p0 += tmp * (expx - expnx);
    s.p1 += tmp * sn;
}

pub fn loonie(w: f64, s: &mut VarState) {
    let r2 = s.sumsq();
    let w2 = w * w;
    if r2 < w2 {
        let r = w * (w2 / r2 - 1.0).sqrt();
        s.p0 += r * s.tx;
        s.p1 += r * s.ty;
    } else {
        s.p0 += w * s.tx;
        s.p1 += w * s.ty;
    }
}

pub fn polar2(w: f64, s: &mut VarState) {
    let p2v = w / PI;
    s.p0 += p2v * s.atan();
    s.p1 += p2v / 2.0 * s.sumsq().ln();
}

pub fn scry(w: f64, s: &mut VarState) {
    let t = s.sumsq();
    let r = 1.0 / (s.r() * (t + 1.0 / (w + EPS)));
    s.p0 += s.tx * r;
    s.p1 += s.ty * r;
}

pub fn cross(w: f64, s: &mut VarState) {
    let d = s.tx * s.tx - s.ty * s.ty;
    let r = w * (1.0 / (d * d + EPS)).sqrt();
    s.p0 += s.tx * r;
    s.p1 += s.ty * r;
}

pub fn hemisphere(w: f64, s: &mut VarState) {
    let t = w / (s.sumsq() + 1.0).sqrt();
    s.p0 += s.tx * t;
    s.p1 += s.ty * t;
}

pub fn exp(w: f64, s: &mut VarState) {
    let e = s.tx.exp();
    let (es, ec) = s.ty.sin_cos();
    s.p0 += w * e * ec;
    s.p1 += w * e * es;
}

pub fn log(w: f64, s: &mut VarState) {
    s.p0 += w * 0.5 * s.sumsq().ln();
    s.p1 += w * s.atanyx();
}

pub fn unpolar(w: f64, s: &mut VarState) {
    let vvar = w * 0.5 * FRAC_1_PI;
    let r = s.ty.exp();
    let (sn, cn) = s.tx.sin_cos();
    s.p0 += vvar * r * sn;
    s.p1 += vvar * r * cn;
}
