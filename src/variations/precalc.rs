//! Parameter-derived auxiliary caches for the five variations that carry
//! one (disc2, super_shape, wedge_julia, perspective, bwraps), plus their
//! kernels. A cache is pure derived state: it is recomputed whenever the
//! owning slot's parameters change, and every kernel accepts `None` and
//! derives the same values inline, so the direct and cached paths agree to
//! the last bit.

use std::f64::consts::{FRAC_1_PI, FRAC_PI_4, PI};

use rand::Rng;

use super::state::VarState;
use super::VariationType;
use crate::engine::guard::EPS;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Precalc {
    Disc2 {
        timespi: f64,
        cosadd: f64,
        sinadd: f64,
    },
    SuperShape {
        pm4: f64,
        pneg1_n1: f64,
    },
    WedgeJulia {
        cf: f64,
        r_n: f64,
        cn: f64,
    },
    Perspective {
        vsin: f64,
        vfcos: f64,
    },
    Bwraps {
        g2: f64,
        r2: f64,
        rfactor: f64,
    },
}

impl Precalc {
    /// Derive the cache for `var` from its parameter vector. Returns `None`
    /// for types without a cache.
    pub fn derive(var: VariationType, p: &[f64]) -> Option<Precalc> {
        match var {
            VariationType::Disc2 => Some(derive_disc2(p)),
            VariationType::SuperShape => Some(derive_super_shape(p)),
            VariationType::WedgeJulia => Some(derive_wedge_julia(p)),
            VariationType::Perspective => Some(derive_perspective(p)),
            VariationType::Bwraps => Some(derive_bwraps(p)),
            _ => None,
        }
    }
}

/// p = [rotate, twist]
fn derive_disc2(p: &[f64]) -> Precalc {
    let add = p[1];
    let timespi = p[0] * PI;
    let (mut sinadd, mut cosadd) = add.sin_cos();
    cosadd -= 1.0;
    if add > 2.0 * PI {
        let k = 1.0 + add - 2.0 * PI;
        cosadd *= k;
        sinadd *= k;
    }
    if add < -2.0 * PI {
        let k = 1.0 + add + 2.0 * PI;
        cosadd *= k;
        sinadd *= k;
    }
    Precalc::Disc2 {
        timespi,
        cosadd,
        sinadd,
    }
}

/// p = [rnd, m, n1, n2, n3, holes]
fn derive_super_shape(p: &[f64]) -> Precalc {
    let n1 = if p[2] == 0.0 { EPS } else { p[2] };
    Precalc::SuperShape {
        pm4: p[1] / 4.0,
        pneg1_n1: -1.0 / n1,
    }
}

/// p = [angle, count, power, dist]. A zero power divides through; the
/// guard discards the non-finite output downstream.
fn derive_wedge_julia(p: &[f64]) -> Precalc {
    let power = p[2];
    Precalc::WedgeJulia {
        cf: 1.0 - p[0] * p[1] * FRAC_1_PI * 0.5,
        r_n: power.abs(),
        cn: p[3] / power / 2.0,
    }
}

/// p = [angle, distance]
fn derive_perspective(p: &[f64]) -> Precalc {
    let ang = p[0] * PI / 2.0;
    Precalc::Perspective {
        vsin: ang.sin(),
        vfcos: p[1] * ang.cos(),
    }
}

/// p = [cellsize, gap, inner_twist, outer_twist]
fn derive_bwraps(p: &[f64]) -> Precalc {
    let radius = 0.5 * p[0];
    let g2 = p[1] * p[1] + EPS;
    let mut max_bubble = g2 * radius;
    if max_bubble > 2.0 {
        max_bubble = 1.0;
    } else {
        max_bubble *= 1.0 / (max_bubble * max_bubble / 4.0 + 1.0);
    }
    Precalc::Bwraps {
        g2,
        r2: radius * radius,
        rfactor: radius / (max_bubble + EPS),
    }
}

pub fn disc2(w: f64, p: &[f64], pre: Option<&Precalc>, s: &mut VarState) {
    let (timespi, cosadd, sinadd) = match pre {
        Some(Precalc::Disc2 {
            timespi,
            cosadd,
            sinadd,
        }) => (*timespi, *cosadd, *sinadd),
        _ => match derive_disc2(p) {
            Precalc::Disc2 {
                timespi,
                cosadd,
                sinadd,
            } => (timespi, cosadd, sinadd),
            _ => unreachable!(),
        },
    };

    let t = timespi * (s.tx + s.ty);
    let (sr, cr) = t.sin_cos();
    let r = w * s.atan() / PI;
    s.p0 += (sr + cosadd) * r;
    s.p1 += (cr + sinadd) * r;
}

/// One random draw (the `rnd` blend), always taken.
pub fn super_shape<R: Rng>(
    w: f64,
    p: &[f64],
    pre: Option<&Precalc>,
    s: &mut VarState,
    rng: &mut R,
) {
    let (pm4, pneg1_n1) = match pre {
        Some(Precalc::SuperShape { pm4, pneg1_n1 }) => (*pm4, *pneg1_n1),
        _ => match derive_super_shape(p) {
            Precalc::SuperShape { pm4, pneg1_n1 } => (pm4, pneg1_n1),
            _ => unreachable!(),
        },
    };

    let theta = pm4 * s.atanyx() + FRAC_PI_4;
    let (st, ct) = theta.sin_cos();
    let t1 = ct.abs().powf(p[3]);
    let t2 = st.abs().powf(p[4]);
    let myrnd = p[0];
    let rr = s.r() + EPS;
    let r = w * ((myrnd * rng.gen::<f64>() + (1.0 - myrnd) * rr) - p[5])
        * (t1 + t2).powf(pneg1_n1)
        / rr;
    s.p0 += r * s.tx;
    s.p1 += r * s.ty;
}

/// One random draw (the sector pick), always taken.
pub fn wedge_julia<R: Rng>(
    w: f64,
    p: &[f64],
    pre: Option<&Precalc>,
    s: &mut VarState,
    rng: &mut R,
) {
    let (cf, r_n, cn) = match pre {
        Some(Precalc::WedgeJulia { cf, r_n, cn }) => (*cf, *r_n, *cn),
        _ => match derive_wedge_julia(p) {
            Precalc::WedgeJulia { cf, r_n, cn } => (cf, r_n, cn),
            _ => unreachable!(),
        },
    };

    let power = p[2];
    let r = w * s.sumsq().powf(cn);
    let t_rnd = (r_n * rng.gen::<f64>()).trunc();
    let mut a = (s.atanyx() + 2.0 * PI * t_rnd) / power;
    let c = ((p[1] * a + PI) * FRAC_1_PI * 0.5).floor();
    a = a * cf + c * p[0];
    let (sa, ca) = a.sin_cos();
    s.p0 += r * ca;
    s.p1 += r * sa;
}

pub fn perspective(w: f64, p: &[f64], pre: Option<&Precalc>, s: &mut VarState) {
    let (vsin, vfcos) = match pre {
        Some(Precalc::Perspective { vsin, vfcos }) => (*vsin, *vfcos),
        _ => match derive_perspective(p) {
            Precalc::Perspective { vsin, vfcos } => (vsin, vfcos),
            _ => unreachable!(),
        },
    };

    let t = 1.0 / (p[1] - s.ty * vsin);
    s.p0 += w * p[1] * s.tx * t;
    s.p1 += w * vfcos * s.ty * t;
}

pub fn bwraps(w: f64, p: &[f64], pre: Option<&Precalc>, s: &mut VarState) {
    let (g2, r2, rfactor) = match pre {
        Some(Precalc::Bwraps { g2, r2, rfactor }) => (*g2, *r2, *rfactor),
        _ => match derive_bwraps(p) {
            Precalc::Bwraps { g2, r2, rfactor } => (g2, r2, rfactor),
            _ => unreachable!(),
        },
    };

    let cellsize = p[0];
    if cellsize == 0.0 {
        s.p0 += w * s.tx;
        s.p1 += w * s.ty;
        return;
    }

    let cx = ((s.tx / cellsize).floor() + 0.5) * cellsize;
    let cy = ((s.ty / cellsize).floor() + 0.5) * cellsize;
    let mut lx = s.tx - cx;
    let mut ly = s.ty - cy;

    if lx * lx + ly * ly > r2 {
        s.p0 += w * s.tx;
        s.p1 += w * s.ty;
        return;
    }

    lx *= g2;
    ly *= g2;
    let r = rfactor / ((lx * lx + ly * ly) / 4.0 + 1.0);
    lx *= r;
    ly *= r;
    let r = (lx * lx + ly * ly) / r2;
    let theta = p[2] * (1.0 - r) + p[3] * r;
    let (st, ct) = theta.sin_cos();
    s.p0 += w * (cx + ct * lx + st * ly);
    s.p1 += w * (cy - st * lx + ct * ly);
}
