//! The twelve compatibility-dependent trig-family kernels. Each has two
//! closed forms selected by the run-global [`TrigMode`]: `Standard` operates
//! on the raw coordinates, `Scaled` pre-multiplies the input by pi/2
//! (circular family) or pi/4 (hyperbolic family). The flag is threaded in
//! identically everywhere; it is never a hidden global.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use super::state::VarState;
use crate::types::TrigMode;

fn input(mode: TrigMode, scale: f64, s: &VarState) -> (f64, f64) {
    match mode {
        TrigMode::Standard => (s.tx, s.ty),
        TrigMode::Scaled => (s.tx * scale, s.ty * scale),
    }
}

pub fn sin(w: f64, mode: TrigMode, s: &mut VarState) {
    let (tx, ty) = input(mode, FRAC_PI_2, s);
    let (sx, cx) = tx.sin_cos();
    s.p0 += w * sx * ty.cosh();
    s.p1 += w * cx * ty.sinh();
}

pub fn cos(w: f64, mode: TrigMode, s: &mut VarState) {
    let (tx, ty) = input(mode, FRAC_PI_2, s);
    let (sx, cx) = tx.sin_cos();
    s.p0 += w * cx * ty.cosh();
    s.p1 -= w * sx * ty.sinh();
}

pub fn tan(w: f64, mode: TrigMode, s: &mut VarState) {
    let (tx, ty) = input(mode, FRAC_PI_2, s);
    let (s2x, c2x) = (2.0 * tx).sin_cos();
    let den = 1.0 / (c2x + (2.0 * ty).cosh());
    s.p0 += w * den * s2x;
    s.p1 += w * den * (2.0 * ty).sinh();
}

pub fn sec(w: f64, mode: TrigMode, s: &mut VarState) {
    let (tx, ty) = input(mode, FRAC_PI_2, s);
    let (sx, cx) = tx.sin_cos();
    let den = 2.0 / ((2.0 * tx).cos() + (2.0 * ty).cosh());
    s.p0 += w * den * cx * ty.cosh();
    s.p1 += w * den * sx * ty.sinh();
}

pub fn csc(w: f64, mode: TrigMode, s: &mut VarState) {
    let (tx, ty) = input(mode, FRAC_PI_2, s);
    let (sx, cx) = tx.sin_cos();
    let den = 2.0 / ((2.0 * ty).cosh() - (2.0 * tx).cos());
    s.p0 += w * den * sx * ty.cosh();
    s.p1 -= w * den * cx * ty.sinh();
}

pub fn cot(w: f64, mode: TrigMode, s: &mut VarState) {
    let (tx, ty) = input(mode, FRAC_PI_2, s);
    let (s2x, c2x) = (2.0 * tx).sin_cos();
    let den = 1.0 / ((2.0 * ty).cosh() - c2x);
    s.p0 += w * den * s2x;
    s.p1 -= w * den * (2.0 * ty).sinh();
}

pub fn sinh(w: f64, mode: TrigMode, s: &mut VarState) {
    let (tx, ty) = input(mode, FRAC_PI_4, s);
    let (sy, cy) = ty.sin_cos();
    s.p0 += w * tx.sinh() * cy;
    s.p1 += w * tx.cosh() * sy;
}

pub fn cosh(w: f64, mode: TrigMode, s: &mut VarState) {
    let (tx, ty) = input(mode, FRAC_PI_4, s);
    let (sy, cy) = ty.sin_cos();
    s.p0 += w * tx.cosh() * cy;
    s.p1 += w * tx.sinh() * sy;
}

pub fn tanh(w: f64, mode: TrigMode, s: &mut VarState) {
    let (tx, ty) = input(mode, FRAC_PI_4, s);
    let (s2y, c2y) = (2.0 * ty).sin_cos();
    let den = 1.0 / (c2y + (2.0 * tx).cosh());
    s.p0 += w * den * (2.0 * tx).sinh();
    s.p1 += w * den * s2y;
}

pub fn sech(w: f64, mode: TrigMode, s: &mut VarState) {
    let (tx, ty) = input(mode, FRAC_PI_4, s);
    let (sy, cy) = ty.sin_cos();
    let den = 2.0 / ((2.0 * ty).cos() + (2.0 * tx).cosh());
    s.p0 += w * den * cy * tx.cosh();
    s.p1 -= w * den * sy * tx.sinh();
}

pub fn csch(w: f64, mode: TrigMode, s: &mut VarState) {
    let (tx, ty) = input(mode, FRAC_PI_4, s);
    let (sy, cy) = ty.sin_cos();
    let den = 2.0 / ((2.0 * tx).cosh() - (2.0 * ty).cos());
    s.p0 += w * den * tx.sinh() * cy;
    s.p1 -= w * den * tx.cosh() * sy;
}

pub fn coth(w: f64, mode: TrigMode, s: &mut VarState) {
    let (tx, ty) = input(mode, FRAC_PI_4, s);
    let (s2y, c2y) = (2.0 * ty).sin_cos();
    let den = 1.0 / ((2.0 * tx).cosh() - c2y);
    s.p0 += w * den * (2.0 * tx).sinh();
    s.p1 += w * den * s2y;
}
