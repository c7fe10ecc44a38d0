//! Parametric variation kernels. `p` is the slot's parameter vector; its
//! arity is validated at genome build, so indexing here is safe.

use std::f64::consts::{FRAC_1_PI, FRAC_2_PI, FRAC_PI_2, PI};

use super::state::VarState;
use crate::engine::guard::EPS;

/// p = [x_scale, y_scale, x_damp, y_damp]
pub fn waves(w: f64, p: &[f64], s: &mut VarState) {
    let dx2 = 1.0 / (p[2] * p[2] + EPS);
    let dy2 = 1.0 / (p[3] * p[3] + EPS);
    let nx = s.tx + p[0] * (s.ty * dx2).sin();
    let ny = s.ty + p[1] * (s.tx * dy2).sin();
    s.p0 += w * nx;
    s.p1 += w * ny;
}

/// p = [x_coeff, y_coeff]
pub fn popcorn(w: f64, p: &[f64], s: &mut VarState) {
    let dx = (3.0 * s.ty).tan();
    let dy = (3.0 * s.tx).tan();
    s.p0 += w * (s.tx + p[0] * dx.sin());
    s.p1 += w * (s.ty + p[1] * dy.sin());
}

/// p = [val]
pub fn rings(w: f64, p: &[f64], s: &mut VarState) {
    let dx = p[0] * p[0] + EPS;
    let r = s.r();
    let rr = w * (((r + dx) % (2.0 * dx)) - dx + r * (1.0 - dx));
    s.p0 += rr * s.cosa();
    s.p1 += rr * s.sina();
}

/// p = [x, y]
pub fn fan(w: f64, p: &[f64], s: &mut VarState) {
    let dx = PI * (p[0] * p[0] + EPS);
    let dy = p[1];
    let dx2 = 0.5 * dx;
    let mut a = s.atan();
    let r = w * s.r();
    a += if ((a + dy) % dx) > dx2 { -dx2 } else { dx2 };
    let (sa, ca) = a.sin_cos();
    s.p0 += r * ca;
    s.p1 += r * sa;
}

/// p = [low, high, waves]
pub fn blob(w: f64, p: &[f64], s: &mut VarState) {
    let a = s.atan();
    let bdiff = p[1] - p[0];
    let r = s.r() * (p[0] + bdiff * (0.5 + 0.5 * (p[2] * a).sin()));
    s.p0 += w * s.sina() * r;
    s.p1 += w * s.cosa() * r;
}

/// p = [a, b, c, d]
pub fn pdj(w: f64, p: &[f64], s: &mut VarState) {
    let nx1 = (p[1] * s.tx).cos();
    let nx2 = (p[2] * s.tx).sin();
    let ny1 = (p[0] * s.ty).sin();
    let ny2 = (p[3] * s.ty).cos();
    s.p0 += w * (ny1 - nx1);
    s.p1 += w * (nx2 - ny2);
}

/// p = [x, y]
pub fn fan2(w: f64, p: &[f64], s: &mut VarState) {
    let dy = p[1];
    let dx = PI * (p[0] * p[0] + EPS);
    let dx2 = 0.5 * dx;
    let mut a = s.atan();
    let r = w * s.r();
    let t = a + dy - dx * ((a + dy) / dx).trunc();
    if t > dx2 {
        a -= dx2;
    } else {
        a += dx2;
    }
    let (sa, ca) = a.sin_cos();
    s.p0 += r * sa;
    s.p1 += r * ca;
}

/// p = [val]
pub fn rings2(w: f64, p: &[f64], s: &mut VarState) {
    let mut r = s.r();
    let dx = p[0] * p[0] + EPS;
    r += -2.0 * dx * ((r + dx) / (2.0 * dx)).trunc() + r * (1.0 - dx);
    s.p0 += w * s.sina() * r;
    s.p1 += w * s.cosa() * r;
}

/// p = [inside, outside]. Uses the weight as the whorl radius.
pub fn whorl(w: f64, p: &[f64], s: &mut VarState) {
    let r = s.r();
    let a = if r < w {
        s.atanyx() + p[0] / (w - r)
    } else {
        s.atanyx() + p[1] / (w - r)
    };
    let (sa, ca) = a.sin_cos();
    s.p0 += w * r * ca;
    s.p1 += w * r * sa;
}

/// p = [sides, power, circle, corners]
pub fn ngon(w: f64, p: &[f64], s: &mut VarState) {
    let r_factor = s.sumsq().powf(p[1] / 2.0);
    let theta = s.atanyx();
    let b = 2.0 * PI / p[0];
    let mut phi = theta - b * (theta / b).floor();
    if phi > b / 2.0 {
        phi -= b;
    }
    let mut amp = p[3] * (1.0 / (phi.cos() + EPS) - 1.0) + p[2];
    amp /= r_factor + EPS;
    s.p0 += w * s.tx * amp;
    s.p1 += w * s.ty * amp;
}

/// p = [c1, c2]
pub fn curl(w: f64, p: &[f64], s: &mut VarState) {
    let re = 1.0 + p[0] * s.tx + p[1] * (s.tx * s.tx - s.ty * s.ty);
    let im = p[0] * s.ty + 2.0 * p[1] * s.tx * s.ty;
    let r = w / (re * re + im * im);
    s.p0 += (s.tx * re + s.ty * im) * r;
    s.p1 += (s.ty * re - s.tx * im) * r;
}

/// p = [x, y]
pub fn rectangles(w: f64, p: &[f64], s: &mut VarState) {
    if p[0] == 0.0 {
        s.p0 += w * s.tx;
    } else {
        s.p0 += w * ((2.0 * (s.tx / p[0]).floor() + 1.0) * p[0] - s.tx);
    }
    if p[1] == 0.0 {
        s.p1 += w * s.ty;
    } else {
        s.p1 += w * ((2.0 * (s.ty / p[1]).floor() + 1.0) * p[1] - s.ty);
    }
}

/// p = [x, y]
pub fn bent2(w: f64, p: &[f64], s: &mut VarState) {
    let mut nx = s.tx;
    let mut ny = s.ty;
    if nx < 0.0 {
        nx *= p[0];
    }
    if ny < 0.0 {
        ny *= p[1];
    }
    s.p0 += w * nx;
    s.p1 += w * ny;
}

/// p = [shift]
pub fn bipolar(w: f64, p: &[f64], s: &mut VarState) {
    let x2y2 = s.sumsq();
    let t = x2y2 + 1.0;
    let x2 = 2.0 * s.tx;
    let ps = -FRAC_PI_2 * p[0];
    let mut y = 0.5 * (2.0 * s.ty).atan2(x2y2 - 1.0) + ps;
    if y > FRAC_PI_2 {
        y = -FRAC_PI_2 + ((y + FRAC_PI_2) % PI);
    } else if y < -FRAC_PI_2 {
        y = FRAC_PI_2 - ((FRAC_PI_2 - y) % PI);
    }
    s.p0 += w * 0.25 * FRAC_2_PI * ((t + x2) / (t - x2)).ln();
    s.p1 += w * FRAC_2_PI * y;
}

/// p = [size]
pub fn cell(w: f64, p: &[f64], s: &mut VarState) {
    let inv = 1.0 / p[0];
    let mut x = (s.tx * inv).floor() as i64;
    let mut y = (s.ty * inv).floor() as i64;
    let dx = s.tx - x as f64 * p[0];
    let dy = s.ty - y as f64 * p[0];
    if y >= 0 {
        if x >= 0 {
            y *= 2;
            x *= 2;
        } else {
            y *= 2;
            x = -(2 * x + 1);
        }
    } else if x >= 0 {
        y = -(2 * y + 1);
        x *= 2;
    } else {
        y = -(2 * y + 1);
        x = -(2 * x + 1);
    }
    s.p0 += w * (dx + x as f64 * p[0]);
    s.p1 -= w * (dy + y as f64 * p[0]);
}

/// p = [x_amp, y_amp, x_length, y_length]
pub fn curve(w: f64, p: &[f64], s: &mut VarState) {
    let mut xlen = p[2] * p[2];
    let mut ylen = p[3] * p[3];
    if xlen < 1e-20 {
        xlen = 1e-20;
    }
    if ylen < 1e-20 {
        ylen = 1e-20;
    }
    s.p0 += w * (s.tx + p[0] * (-s.ty * s.ty / xlen).exp());
    s.p1 += w * (s.ty + p[1] * (-s.tx * s.tx / ylen).exp());
}

/// p = [beta]
pub fn escher(w: f64, p: &[f64], s: &mut VarState) {
    let a = s.atanyx();
    let lnr = 0.5 * s.sumsq().ln();
    let (seb, ceb) = p[0].sin_cos();
    let vc = 0.5 * (1.0 + ceb);
    let vd = 0.5 * seb;
    let m = w * (vc * lnr - vd * a).exp();
    let n = vc * a + vd * lnr;
    let (sn, cn) = n.sin_cos();
    s.p0 += m * cn;
    s.p1 += m * sn;
}

/// p = [spin, space, twist]; centered at the origin, radius is the weight.
pub fn lazysusan(w: f64, p: &[f64], s: &mut VarState) {
    let x = s.tx;
    let y = s.ty;
    let mut r = (x * x + y * y).sqrt();
    if r < w {
        let a = y.atan2(x) + p[0] + p[2] * (w - r);
        let (sa, ca) = a.sin_cos();
        r *= w;
        s.p0 += r * ca;
        s.p1 += r * sa;
    } else {
        r = w * (1.0 + p[1] / r);
        s.p0 += r * x;
        s.p1 += r * y;
    }
}

/// p = [x, y]
pub fn modulus(w: f64, p: &[f64], s: &mut VarState) {
    let xr = 2.0 * p[0];
    let yr = 2.0 * p[1];
    if s.tx > p[0] {
        s.p0 += w * (-p[0] + (s.tx + p[0]) % xr);
    } else if s.tx < -p[0] {
        s.p0 += w * (p[0] - (p[0] - s.tx) % xr);
    } else {
        s.p0 += w * s.tx;
    }
    if s.ty > p[1] {
        s.p1 += w * (-p[1] + (s.ty + p[1]) % yr);
    } else if s.ty < -p[1] {
        s.p1 += w * (p[1] - (p[1] - s.ty) % yr);
    } else {
        s.p1 += w * s.ty;
    }
}

/// p = [separation, frequency, amplitude, damping]
pub fn oscilloscope(w: f64, p: &[f64], s: &mut VarState) {
    let tpf = 2.0 * PI * p[1];
    let t = if p[3] == 0.0 {
        p[2] * (tpf * s.tx).cos() + p[0]
    } else {
        p[2] * (-s.tx.abs() * p[3]).exp() * (tpf * s.tx).cos() + p[0]
    };
    if s.ty.abs() <= t {
        s.p0 += w * s.tx;
        s.p1 -= w * s.ty;
    } else {
        s.p0 += w * s.tx;
        s.p1 += w * s.ty;
    }
}

/// p = [x, y, c]
pub fn popcorn2(w: f64, p: &[f64], s: &mut VarState) {
    s.p0 += w * (s.tx + p[0] * (s.ty * p[2]).tan().sin());
    s.p1 += w * (s.ty + p[1] * (s.tx * p[2]).tan().sin());
}

/// p = [x, x_inside, y, y_inside]
pub fn separation(w: f64, p: &[f64], s: &mut VarState) {
    let sx2 = p[0] * p[0];
    let sy2 = p[2] * p[2];
    if s.tx > 0.0 {
        s.p0 += w * ((s.tx * s.tx + sx2).sqrt() - s.tx * p[1]);
    } else {
        s.p0 -= w * ((s.tx * s.tx + sx2).sqrt() + s.tx * p[1]);
    }
    if s.ty > 0.0 {
        s.p1 += w * ((s.ty * s.ty + sy2).sqrt() - s.ty * p[3]);
    } else {
        s.p1 -= w * ((s.ty * s.ty + sy2).sqrt() + s.ty * p[3]);
    }
}

/// p = [x_size, y_size]
pub fn split(w: f64, p: &[f64], s: &mut VarState) {
    if (s.tx * p[0] * PI).cos() >= 0.0 {
        s.p1 += w * s.ty;
    } else {
        s.p1 -= w * s.ty;
    }
    if (s.ty * p[1] * PI).cos() >= 0.0 {
        s.p0 += w * s.tx;
    } else {
        s.p0 -= w * s.tx;
    }
}

/// p = [x, y]
pub fn splits(w: f64, p: &[f64], s: &mut VarState) {
    if s.tx >= 0.0 {
        s.p0 += w * (s.tx + p[0]);
    } else {
        s.p0 += w * (s.tx - p[0]);
    }
    if s.ty >= 0.0 {
        s.p1 += w * (s.ty + p[1]);
    } else {
        s.p1 += w * (s.ty - p[1]);
    }
}

/// p = [space, warp]
pub fn stripes(w: f64, p: &[f64], s: &mut VarState) {
    let roundx = (s.tx + 0.5).floor();
    let offsetx = s.tx - roundx;
    s.p0 += w * (offsetx * (1.0 - p[0]) + roundx);
    s.p1 += w * (s.ty + offsetx * offsetx * p[1]);
}

/// p = [angle, hole, count, swirl]
pub fn wedge(w: f64, p: &[f64], s: &mut VarState) {
    let mut r = s.r();
    let mut a = s.atanyx() + p[3] * r;
    let c = ((p[2] * a + PI) * FRAC_1_PI * 0.5).floor();
    let comp_fac = 1.0 - p[0] * p[2] * FRAC_1_PI * 0.5;
    a = a * comp_fac + c * p[0];
    let (sa, ca) = a.sin_cos();
    r = w * (r + p[1]);
    s.p0 += r * ca;
    s.p1 += r * sa;
}

/// p = [angle, hole, count, swirl]
pub fn wedge_sph(w: f64, p: &[f64], s: &mut VarState) {
    let mut r = 1.0 / (s.r() + EPS);
    let mut a = s.atanyx() + p[3] * r;
    let c = ((p[2] * a + PI) * FRAC_1_PI * 0.5).floor();
    let comp_fac = 1.0 - p[0] * p[2] * FRAC_1_PI * 0.5;
    a = a * comp_fac + c * p[0];
    let (sa, ca) = a.sin_cos();
    r = w * (r + p[1]);
    s.p0 += r * ca;
    s.p1 += r * sa;
}

/// p = [x_scale, y_scale, x_frequency, y_frequency]
pub fn waves2(w: f64, p: &[f64], s: &mut VarState) {
    s.p0 += w * (s.tx + p[0] * (s.ty * p[2]).sin());
    s.p1 += w * (s.ty + p[1] * (s.tx * p[3]).sin());
}

/// p = [frequency, strength, scale, symmetry]
pub fn auger(w: f64, p: &[f64], s: &mut VarState) {
    let sv = (p[0] * s.tx).sin();
    let tv = (p[0] * s.ty).sin();
    let dy = s.ty + p[1] * (p[2] * sv / 2.0 + s.ty.abs() * sv);
    let dx = s.tx + p[1] * (p[2] * tv / 2.0 + s.tx.abs() * tv);
    s.p0 += w * (s.tx + p[3] * (dx - s.tx));
    s.p1 += w * dy;
}

/// p = [spread]. Uses the weight inside the closed form.
pub fn flux(w: f64, p: &[f64], s: &mut VarState) {
    let xpw = s.tx + w;
    let xmw = s.tx - w;
    let yy = s.ty * s.ty;
    let avgr =
        w * (2.0 + p[0]) * ((yy + xpw * xpw).sqrt() / (yy + xmw * xmw).sqrt()).sqrt();
    let avga = (s.ty.atan2(xmw) - s.ty.atan2(xpw)) * 0.5;
    s.p0 += avgr * avga.cos();
    s.p1 += avgr * avga.sin();
}

/// p = [powx, powy, lcx, lcy]
pub fn polynomial(w: f64, p: &[f64], s: &mut VarState) {
    let xp = s.tx.abs().powf(p[0]) * w;
    let yp = s.ty.abs().powf(p[1]) * w;
    s.p0 += xp.copysign(s.tx) + p[2];
    s.p1 += yp.copysign(s.ty) + p[3];
}

/// p = [re_a, re_b, re_c, re_d] -- a Moebius map with real coefficients.
pub fn mobius(w: f64, p: &[f64], s: &mut VarState) {
    let re_u = p[0] * s.tx + p[1];
    let im_u = p[0] * s.ty;
    let re_v = p[2] * s.tx + p[3];
    let im_v = p[2] * s.ty;
    let rad_v = w / (re_v * re_v + im_v * im_v + EPS);
    s.p0 += rad_v * (re_u * re_v + im_u * im_v);
    s.p1 += rad_v * (im_u * re_v - re_u * im_v);
}
