//! Reference checks for the kernel library, evaluated through the public
//! dispatch path so the type-code routing is exercised too. A handful of
//! hand-computed vectors anchor the simplest kernels; the exhaustive check
//! mirrors every kernel as straight-line math over a fixed input point,
//! replaying the same random draws for the stochastic ones, so the
//! dispatch, the lazy radial cache and each transcribed formula are
//! verified together.

use std::f64::consts::{FRAC_1_PI, FRAC_2_PI, FRAC_PI_2, FRAC_PI_4, PI};

use flamecore::engine::{is_valid, DEFAULT_LIMIT};
use flamecore::variations::{self, VarState, VariationType, ALL_VARIATIONS};
use flamecore::TrigMode;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EPS: f64 = 1e-10;

fn eval_seeded(
    var: VariationType,
    weight: f64,
    params: &[f64],
    x: f64,
    y: f64,
    seed: u64,
) -> (f64, f64) {
    let mut state = VarState::new(x, y);
    let mut rng = StdRng::seed_from_u64(seed);
    variations::apply(
        var,
        weight,
        params,
        None,
        TrigMode::Standard,
        &mut state,
        &mut rng,
    );
    (state.p0, state.p1)
}

fn eval(var: VariationType, weight: f64, params: &[f64], x: f64, y: f64) -> (f64, f64) {
    eval_seeded(var, weight, params, x, y, 0)
}

fn assert_close(actual: (f64, f64), expected: (f64, f64)) {
    assert!(
        (actual.0 - expected.0).abs() < 1e-6 && (actual.1 - expected.1).abs() < 1e-6,
        "got {:?}, expected {:?}",
        actual,
        expected
    );
}

#[test]
fn linear_scales_by_weight() {
    assert_close(eval(VariationType::Linear, 2.0, &[], 0.3, -0.5), (0.6, -1.0));
}

#[test]
fn spherical_divides_by_squared_radius() {
    // r^2 = 2 at (1,1)
    assert_close(eval(VariationType::Spherical, 1.0, &[], 1.0, 1.0), (0.5, 0.5));
    assert_close(eval(VariationType::Spherical, 1.0, &[], 2.0, 0.0), (0.5, 0.0));
}

#[test]
fn swirl_rotates_by_squared_radius() {
    let expected = (1.0f64.cos(), 1.0f64.sin());
    assert_close(eval(VariationType::Swirl, 1.0, &[], 1.0, 0.0), expected);
}

#[test]
fn horseshoe_on_the_unit_axis() {
    assert_close(eval(VariationType::Horseshoe, 1.0, &[], 1.0, 0.0), (1.0, 0.0));
}

#[test]
fn polar_maps_angle_and_radius() {
    // atan2(x, y) = pi/2 on the positive x axis, r = 1
    assert_close(eval(VariationType::Polar, 1.0, &[], 1.0, 0.0), (0.5, 0.0));
}

#[test]
fn bent_halves_negative_y_and_doubles_negative_x() {
    assert_close(eval(VariationType::Bent, 1.0, &[], -1.0, -2.0), (-2.0, -1.0));
    assert_close(eval(VariationType::Bent, 1.0, &[], 1.0, 2.0), (1.0, 2.0));
}

#[test]
fn bubble_fixes_the_origin_and_shrinks_far_points() {
    assert_close(eval(VariationType::Bubble, 2.0, &[], 0.0, 0.0), (0.0, 0.0));
    assert_close(eval(VariationType::Bubble, 1.0, &[], 2.0, 0.0), (1.0, 0.0));
}

#[test]
fn eyefish_and_fisheye_are_swapped_twins() {
    let a = eval(VariationType::Eyefish, 1.0, &[], 0.7, -0.2);
    let b = eval(VariationType::Fisheye, 1.0, &[], 0.7, -0.2);
    assert_close((a.0, a.1), (b.1, b.0));
}

#[test]
fn curl_with_zero_coefficients_is_linear() {
    let p = [0.0, 0.0];
    assert_close(
        eval(VariationType::Curl, 1.5, &p, 0.4, -0.9),
        (0.6, -1.35),
    );
}

#[test]
fn rectangles_folds_into_cells() {
    // x cell 1.0: (2*floor(0.3/1)+1)*1 - 0.3 = 0.7
    let p = [1.0, 1.0];
    assert_close(
        eval(VariationType::Rectangles, 1.0, &p, 0.3, 1.2),
        (0.7, 1.8),
    );
    // a zero cell size passes the coordinate through
    let p = [0.0, 1.0];
    assert_close(
        eval(VariationType::Rectangles, 1.0, &p, 0.3, 1.2),
        (0.3, 1.8),
    );
}

#[test]
fn waves_with_unit_cells() {
    // nx = x + p0 * sin(y / (p2^2)), ny = y + p1 * sin(x / (p3^2))
    let p = [0.5, 0.25, 1.0, 1.0];
    let expected = (
        0.2 + 0.5 * 0.8f64.sin(),
        0.8 + 0.25 * 0.2f64.sin(),
    );
    assert_close(eval(VariationType::Waves, 1.0, &p, 0.2, 0.8), expected);
}

#[test]
fn trig_mode_selects_a_different_closed_form() {
    let mut standard = VarState::new(0.8, 0.3);
    let mut scaled = VarState::new(0.8, 0.3);
    let mut rng = StdRng::seed_from_u64(0);
    variations::apply(
        VariationType::Sin,
        1.0,
        &[],
        None,
        TrigMode::Standard,
        &mut standard,
        &mut rng,
    );
    variations::apply(
        VariationType::Sin,
        1.0,
        &[],
        None,
        TrigMode::Scaled,
        &mut scaled,
        &mut rng,
    );
    assert_ne!((standard.p0, standard.p1), (scaled.p0, scaled.p1));
}

#[test]
fn random_kernels_are_deterministic_under_a_fixed_seed() {
    for var in [
        VariationType::Julia,
        VariationType::Noise,
        VariationType::Blur,
        VariationType::GaussianBlur,
        VariationType::Square,
    ] {
        let run = || eval_seeded(var, 1.0, &[], 0.4, 0.6, 77);
        assert_eq!(run(), run());
    }
}

#[test]
fn julia_coin_flip_selects_between_two_branches() {
    // julia draws one coin flip; across many seeds both branches appear
    let mut seen_low = false;
    let mut seen_high = false;
    for seed in 0..64 {
        let (p0, _) = eval_seeded(VariationType::Julia, 1.0, &[], 1.0, 0.0, seed);
        if p0 > 0.0 {
            seen_low = true;
        } else {
            seen_high = true;
        }
    }
    assert!(seen_low && seen_high);
}

#[test]
fn every_arity_matches_the_manifest() {
    for info in variations::manifest() {
        let var = VariationType::from_code(info.code).unwrap();
        assert_eq!(var.arity(), info.arity, "{}", info.name);
        assert!(
            matches!(info.arity, 0 | 1 | 2 | 3 | 4 | 6),
            "{} has unexpected arity {}",
            info.name,
            info.arity
        );
    }
}

#[test]
fn zero_power_parameters_propagate_to_the_validity_guard() {
    // A zero power parameter divides through to a non-finite point; the
    // step guard is what rejects it, not the kernel.
    let cases: [(VariationType, &[f64]); 4] = [
        (VariationType::Julian, &[0.0, 1.0]),
        (VariationType::Juliascope, &[0.0, 1.0]),
        (VariationType::Cpow, &[1.0, 0.2, 0.0]),
        (VariationType::WedgeJulia, &[0.5, 3.0, 0.0, 1.0]),
    ];
    for (var, p) in cases {
        let (x, y) = eval_seeded(var, 1.0, p, 0.35, -0.45, 5);
        assert!(
            !is_valid(x, y, 1.0, DEFAULT_LIMIT),
            "{} should diverge on a zero power, got ({}, {})",
            var.name(),
            x,
            y
        );
    }
}

/// Well-conditioned parameters for each parametric type, away from branch
/// boundaries at the shared reference input.
fn reference_params(var: VariationType) -> &'static [f64] {
    use VariationType::*;
    match var {
        Rings | Rings2 => &[0.6],
        Bipolar => &[0.3],
        Cell => &[0.8],
        Escher => &[0.4],
        RadialBlur => &[0.5],
        Flux => &[0.25],
        Popcorn => &[0.3, 0.2],
        Fan | Fan2 => &[0.5, 0.3],
        Whorl => &[0.4, 0.2],
        Julian | Juliascope => &[3.0, 1.0],
        Curl => &[0.4, 0.2],
        Rectangles => &[0.7, 0.9],
        Disc2 => &[0.7, 1.3],
        Flower => &[3.0, 0.2],
        Conic => &[0.8, 0.2],
        Parabola => &[1.2, 0.8],
        Bent2 => &[1.5, 0.5],
        Modulus => &[0.3, 0.2],
        Split => &[0.8, 0.6],
        Splits => &[0.3, 0.2],
        Stripes => &[0.4, 0.3],
        Perspective => &[0.35, 2.0],
        Blob => &[0.4, 1.2, 4.0],
        Pie => &[6.0, 0.3, 0.4],
        Cpow => &[1.0, 0.2, 3.0],
        Popcorn2 => &[0.3, 0.2, 2.0],
        LazySusan => &[0.3, 0.4, 0.2],
        PointSymmetry => &[4.0, 0.1, -0.1],
        Waves => &[0.5, 0.25, 1.0, 1.0],
        Pdj => &[0.7, 1.3, 2.1, 0.9],
        Ngon => &[5.0, 3.0, 1.0, 0.5],
        Curve => &[0.4, 0.3, 0.8, 0.9],
        Oscilloscope => &[0.5, 1.2, 0.7, 0.3],
        Separation => &[0.4, 0.2, 0.5, 0.3],
        Wedge | WedgeSph => &[0.5, 0.2, 3.0, 0.1],
        WedgeJulia => &[0.5, 3.0, 2.0, 1.0],
        Waves2 => &[0.4, 0.3, 2.0, 1.5],
        Auger => &[2.0, 0.5, 0.3, 0.6],
        Bwraps => &[1.0, 0.4, 0.2, -0.3],
        Polynomial => &[1.5, 2.0, 0.1, -0.1],
        Mobius => &[0.8, 0.3, 0.2, 1.1],
        SuperShape => &[0.25, 4.0, 1.5, 1.0, 1.0, 0.0],
        Crop => &[-0.5, -0.5, 0.5, 0.5, 0.5, 0.0],
        _ => &[],
    }
}

/// The expected output of one kernel at (x, y), written as straight-line
/// math with no shared cache. `rng` must be seeded identically to the run
/// under test; draws happen in the kernel's documented order.
#[allow(clippy::too_many_lines)]
fn reference_point(
    var: VariationType,
    w: f64,
    p: &[f64],
    x: f64,
    y: f64,
    rng: &mut StdRng,
) -> (f64, f64) {
    let r2 = x * x + y * y;
    let r = r2.sqrt();
    let theta = x.atan2(y);
    let phi = y.atan2(x);
    let sina = x / r;
    let cosa = y / r;

    use VariationType::*;
    match var {
        Linear => (w * x, w * y),
        Sinusoidal => (w * x.sin(), w * y.sin()),
        Spherical => {
            let k = w / (r2 + EPS);
            (k * x, k * y)
        }
        Swirl => {
            let (sr, cr) = r2.sin_cos();
            (w * (cr * x - sr * y), w * (sr * x + cr * y))
        }
        Horseshoe => {
            let k = w / (r + EPS);
            ((x - y) * (x + y) * k, 2.0 * x * y * k)
        }
        Polar => (w * theta * FRAC_1_PI, w * (r - 1.0)),
        Handkerchief => (w * r * (theta + r).sin(), w * r * (theta - r).cos()),
        Heart => {
            let a = r * theta;
            (w * r * a.sin(), -(w * r * a.cos()))
        }
        Disc => {
            let an = theta * FRAC_1_PI;
            let rp = PI * r;
            (w * rp.sin() * an, w * rp.cos() * an)
        }
        Spiral => {
            let re = r + EPS;
            let r1 = w / re;
            let (sr, cr) = re.sin_cos();
            (r1 * (cosa + sr), r1 * (sina - cr))
        }
        Hyperbolic => {
            let re = r + EPS;
            (w * sina / re, w * cosa * re)
        }
        Diamond => {
            let (sr, cr) = r.sin_cos();
            (w * sina * cr, w * cosa * sr)
        }
        Ex => {
            let n0 = (theta + r).sin();
            let n1 = (theta - r).cos();
            let m0 = n0 * n0 * n0 * r;
            let m1 = n1 * n1 * n1 * r;
            (w * (m0 + m1), w * (m0 - m1))
        }
        Julia => {
            let mut a = 0.5 * theta;
            if rng.gen::<f64>() < 0.5 {
                a += PI;
            }
            let rr = w * r.sqrt();
            (rr * a.cos(), rr * a.sin())
        }
        Bent => {
            let nx = if x < 0.0 { x * 2.0 } else { x };
            let ny = if y < 0.0 { y / 2.0 } else { y };
            (w * nx, w * ny)
        }
        Waves => {
            let dx2 = 1.0 / (p[2] * p[2] + EPS);
            let dy2 = 1.0 / (p[3] * p[3] + EPS);
            (
                w * (x + p[0] * (y * dx2).sin()),
                w * (y + p[1] * (x * dy2).sin()),
            )
        }
        Fisheye => {
            let k = 2.0 * w / (r + 1.0);
            (k * y, k * x)
        }
        Popcorn => (
            w * (x + p[0] * (3.0 * y).tan().sin()),
            w * (y + p[1] * (3.0 * x).tan().sin()),
        ),
        Exponential => {
            let dx = w * (x - 1.0).exp();
            let dy = PI * y;
            (dx * dy.cos(), dx * dy.sin())
        }
        Power => {
            let rr = w * r.powf(sina);
            (rr * cosa, rr * sina)
        }
        Cosine => {
            let ax = x * PI;
            (w * ax.cos() * y.cosh(), -(w * ax.sin() * y.sinh()))
        }
        Rings => {
            let dx = p[0] * p[0] + EPS;
            let rr = w * (((r + dx) % (2.0 * dx)) - dx + r * (1.0 - dx));
            (rr * cosa, rr * sina)
        }
        Fan => {
            let dx = PI * (p[0] * p[0] + EPS);
            let dx2 = 0.5 * dx;
            let rr = w * r;
            let a = theta + if ((theta + p[1]) % dx) > dx2 { -dx2 } else { dx2 };
            (rr * a.cos(), rr * a.sin())
        }
        Blob => {
            let bdiff = p[1] - p[0];
            let rr = r * (p[0] + bdiff * (0.5 + 0.5 * (p[2] * theta).sin()));
            (w * sina * rr, w * cosa * rr)
        }
        Pdj => (
            w * ((p[0] * y).sin() - (p[1] * x).cos()),
            w * ((p[2] * x).sin() - (p[3] * y).cos()),
        ),
        Fan2 => {
            let dx = PI * (p[0] * p[0] + EPS);
            let dx2 = 0.5 * dx;
            let rr = w * r;
            let t = theta + p[1] - dx * ((theta + p[1]) / dx).trunc();
            let a = if t > dx2 { theta - dx2 } else { theta + dx2 };
            (rr * a.sin(), rr * a.cos())
        }
        Rings2 => {
            let dx = p[0] * p[0] + EPS;
            let rr = r - 2.0 * dx * ((r + dx) / (2.0 * dx)).trunc() + r * (1.0 - dx);
            (w * sina * rr, w * cosa * rr)
        }
        Eyefish => {
            let k = 2.0 * w / (r + 1.0);
            (k * x, k * y)
        }
        Bubble => {
            let k = w / (0.25 * r2 + 1.0);
            (k * x, k * y)
        }
        Cylinder => (w * x.sin(), w * y),
        Whorl => {
            let a = if r < w {
                phi + p[0] / (w - r)
            } else {
                phi + p[1] / (w - r)
            };
            (w * r * a.cos(), w * r * a.sin())
        }
        Noise => {
            let a = rng.gen::<f64>() * 2.0 * PI;
            let rr = w * rng.gen::<f64>();
            (x * rr * a.cos(), y * rr * a.sin())
        }
        Julian => {
            let power = p[0];
            let t = (power.abs() * rng.gen::<f64>()).trunc();
            let a = (phi + 2.0 * PI * t) / power;
            let rr = w * r2.powf(p[1] / power / 2.0);
            (rr * a.cos(), rr * a.sin())
        }
        Juliascope => {
            let power = p[0];
            let t = (power.abs() * rng.gen::<f64>()).trunc();
            let a = if (t as i64) & 1 == 0 {
                (2.0 * PI * t + phi) / power
            } else {
                (2.0 * PI * t - phi) / power
            };
            let rr = w * r2.powf(p[1] / power / 2.0);
            (rr * a.cos(), rr * a.sin())
        }
        Blur => {
            let a = rng.gen::<f64>() * 2.0 * PI;
            let rr = w * rng.gen::<f64>();
            (rr * a.cos(), rr * a.sin())
        }
        RadialBlur => {
            let (spinvar, zoomvar) = (p[0] * PI / 2.0).sin_cos();
            let rnd = w
                * (rng.gen::<f64>() + rng.gen::<f64>() + rng.gen::<f64>() + rng.gen::<f64>()
                    - 2.0);
            let a = phi + spinvar * rnd;
            let rz = zoomvar * rnd - 1.0;
            (r * a.cos() + rz * x, r * a.sin() + rz * y)
        }
        GaussianBlur => {
            let a = rng.gen::<f64>() * 2.0 * PI;
            let rr = w
                * (rng.gen::<f64>() + rng.gen::<f64>() + rng.gen::<f64>() + rng.gen::<f64>()
                    - 2.0);
            (rr * a.cos(), rr * a.sin())
        }
        Pie => {
            let sl = (rng.gen::<f64>() * p[0] + 0.5).trunc();
            let a = p[1] + 2.0 * PI * (sl + rng.gen::<f64>() * p[2]) / p[0];
            let rr = w * rng.gen::<f64>();
            (rr * a.cos(), rr * a.sin())
        }
        Ngon => {
            let r_factor = r2.powf(p[1] / 2.0);
            let b = 2.0 * PI / p[0];
            let mut ph = phi - b * (phi / b).floor();
            if ph > b / 2.0 {
                ph -= b;
            }
            let mut amp = p[3] * (1.0 / (ph.cos() + EPS) - 1.0) + p[2];
            amp /= r_factor + EPS;
            (w * x * amp, w * y * amp)
        }
        Curl => {
            let re = 1.0 + p[0] * x + p[1] * (x * x - y * y);
            let im = p[0] * y + 2.0 * p[1] * x * y;
            let rr = w / (re * re + im * im);
            ((x * re + y * im) * rr, (y * re - x * im) * rr)
        }
        Rectangles => {
            let px = if p[0] == 0.0 {
                w * x
            } else {
                w * ((2.0 * (x / p[0]).floor() + 1.0) * p[0] - x)
            };
            let py = if p[1] == 0.0 {
                w * y
            } else {
                w * ((2.0 * (y / p[1]).floor() + 1.0) * p[1] - y)
            };
            (px, py)
        }
        Arch => {
            let a = rng.gen::<f64>() * w * PI;
            (w * a.sin(), w * a.sin() * a.sin() / a.cos())
        }
        Tangent => (w * x.sin() / y.cos(), w * y.tan()),
        Square => (
            w * (rng.gen::<f64>() - 0.5),
            w * (rng.gen::<f64>() - 0.5),
        ),
        Rays => {
            let a = w * rng.gen::<f64>() * PI;
            let rr = w / (r2 + EPS);
            let tanr = w * a.tan() * rr;
            (tanr * x.cos(), tanr * y.sin())
        }
        Blade => {
            let rr = rng.gen::<f64>() * w * r;
            let (sr, cr) = rr.sin_cos();
            (w * x * (cr + sr), w * x * (cr - sr))
        }
        Secant2 => {
            let rr = w * r;
            let cr = rr.cos();
            let icr = 1.0 / cr;
            let py = if cr < 0.0 { w * (icr + 1.0) } else { w * (icr - 1.0) };
            (w * x, py)
        }
        Disc2 => {
            let timespi = p[0] * PI;
            let (mut sinadd, mut cosadd) = p[1].sin_cos();
            cosadd -= 1.0;
            if p[1] > 2.0 * PI {
                let k = 1.0 + p[1] - 2.0 * PI;
                cosadd *= k;
                sinadd *= k;
            }
            if p[1] < -2.0 * PI {
                let k = 1.0 + p[1] + 2.0 * PI;
                cosadd *= k;
                sinadd *= k;
            }
            let t = timespi * (x + y);
            let rr = w * theta / PI;
            ((t.sin() + cosadd) * rr, (t.cos() + sinadd) * rr)
        }
        SuperShape => {
            let n1 = if p[2] == 0.0 { EPS } else { p[2] };
            let pm4 = p[1] / 4.0;
            let pneg = -1.0 / n1;
            let th = pm4 * phi + FRAC_PI_4;
            let (st, ct) = th.sin_cos();
            let t1 = ct.abs().powf(p[3]);
            let t2 = st.abs().powf(p[4]);
            let rr0 = r + EPS;
            let rr = w * ((p[0] * rng.gen::<f64>() + (1.0 - p[0]) * rr0) - p[5])
                * (t1 + t2).powf(pneg)
                / rr0;
            (rr * x, rr * y)
        }
        Flower => {
            let rr = w * (rng.gen::<f64>() - p[1]) * (p[0] * phi).cos() / (r + EPS);
            (rr * x, rr * y)
        }
        Conic => {
            let re = r + EPS;
            let ct = x / re;
            let rr = w * (rng.gen::<f64>() - p[1]) * p[0] / (1.0 + p[0] * ct) / re;
            (rr * x, rr * y)
        }
        Parabola => {
            let (sr, cr) = r.sin_cos();
            (
                p[0] * w * sr * sr * rng.gen::<f64>(),
                p[1] * w * cr * rng.gen::<f64>(),
            )
        }
        Bent2 => {
            let nx = if x < 0.0 { x * p[0] } else { x };
            let ny = if y < 0.0 { y * p[1] } else { y };
            (w * nx, w * ny)
        }
        Bipolar => {
            let t = r2 + 1.0;
            let x2 = 2.0 * x;
            let ps = -FRAC_PI_2 * p[0];
            let mut yv = 0.5 * (2.0 * y).atan2(r2 - 1.0) + ps;
            if yv > FRAC_PI_2 {
                yv = -FRAC_PI_2 + ((yv + FRAC_PI_2) % PI);
            } else if yv < -FRAC_PI_2 {
                yv = FRAC_PI_2 - ((FRAC_PI_2 - yv) % PI);
            }
            (
                w * 0.25 * FRAC_2_PI * ((t + x2) / (t - x2)).ln(),
                w * FRAC_2_PI * yv,
            )
        }
        Boarders => {
            let round_x = x.round();
            let round_y = y.round();
            let ox = x - round_x;
            let oy = y - round_y;
            if rng.gen::<f64>() >= 0.75 {
                (w * (ox * 0.5 + round_x), w * (oy * 0.5 + round_y))
            } else if ox.abs() >= oy.abs() {
                if ox >= 0.0 {
                    (
                        w * (ox * 0.5 + round_x + 0.25),
                        w * (oy * 0.5 + round_y + 0.25 * oy / ox),
                    )
                } else {
                    (
                        w * (ox * 0.5 + round_x - 0.25),
                        w * (oy * 0.5 + round_y - 0.25 * oy / ox),
                    )
                }
            } else if oy >= 0.0 {
                (
                    w * (ox * 0.5 + round_x + ox / oy * 0.25),
                    w * (oy * 0.5 + round_y + 0.25),
                )
            } else {
                (
                    w * (ox * 0.5 + round_x - ox / oy * 0.25),
                    w * (oy * 0.5 + round_y - 0.25),
                )
            }
        }
        Butterfly => {
            let wx = w * 1.3029400317411197;
            let y2 = y * 2.0;
            let rr = wx * ((y * x).abs() / (EPS + x * x + y2 * y2)).sqrt();
            (rr * x, rr * y2)
        }
        Cell => {
            let inv = 1.0 / p[0];
            let mut cx = (x * inv).floor() as i64;
            let mut cy = (y * inv).floor() as i64;
            let dx = x - cx as f64 * p[0];
            let dy = y - cy as f64 * p[0];
            if cy >= 0 {
                if cx >= 0 {
                    cy *= 2;
                    cx *= 2;
                } else {
                    cy *= 2;
                    cx = -(2 * cx + 1);
                }
            } else if cx >= 0 {
                cy = -(2 * cy + 1);
                cx *= 2;
            } else {
                cy = -(2 * cy + 1);
                cx = -(2 * cx + 1);
            }
            (
                w * (dx + cx as f64 * p[0]),
                -(w * (dy + cy as f64 * p[0])),
            )
        }
        Cpow => {
            let power = p[2];
            let lnr = 0.5 * r2.ln();
            let va = 2.0 * PI / power;
            let vc = p[0] / power;
            let vd = p[1] / power;
            let ang = vc * phi + vd * lnr + va * (power * rng.gen::<f64>()).trunc();
            let m = w * (vc * lnr - vd * phi).exp();
            (m * ang.cos(), m * ang.sin())
        }
        Curve => {
            let xlen = (p[2] * p[2]).max(1e-20);
            let ylen = (p[3] * p[3]).max(1e-20);
            (
                w * (x + p[0] * (-y * y / xlen).exp()),
                w * (y + p[1] * (-x * x / ylen).exp()),
            )
        }
        Edisc => {
            let tmp = r2 + 1.0;
            let tmp2 = 2.0 * x;
            let ra = (tmp + tmp2).sqrt();
            let rb = (tmp - tmp2).sqrt();
            let xmax = (ra + rb) * 0.5;
            let a1 = (xmax + (xmax - 1.0).sqrt()).ln();
            let a2 = -(x / xmax).acos();
            let wd = w / 11.57034632;
            let (mut snv, csv) = a1.sin_cos();
            if y > 0.0 {
                snv = -snv;
            }
            (wd * a2.cosh() * csv, wd * a2.sinh() * snv)
        }
        Elliptic => {
            let t = r2 + 1.0;
            let x2 = 2.0 * x;
            let xmax = 0.5 * ((t + x2).sqrt() + (t - x2).sqrt());
            let a = x / xmax;
            let b = (1.0 - a * a).max(0.0).sqrt();
            let ssx = (xmax - 1.0).max(0.0).sqrt();
            let wd = w / FRAC_PI_2;
            let py = wd * (xmax + ssx).ln();
            (wd * a.atan2(b), if y > 0.0 { py } else { -py })
        }
        Escher => {
            let lnr = 0.5 * r2.ln();
            let (seb, ceb) = p[0].sin_cos();
            let vc = 0.5 * (1.0 + ceb);
            let vd = 0.5 * seb;
            let m = w * (vc * lnr - vd * phi).exp();
            let n = vc * phi + vd * lnr;
            (m * n.cos(), m * n.sin())
        }
        Foci => {
            let expx = x.exp() * 0.5;
            let expnx = 0.25 / expx;
            let (sn, cn) = y.sin_cos();
            let tmp = w / (expx + expnx - cn);
            (tmp * (expx - expnx), tmp * sn)
        }
        LazySusan => {
            if r < w {
                let a = y.atan2(x) + p[0] + p[2] * (w - r);
                let rw = r * w;
                (rw * a.cos(), rw * a.sin())
            } else {
                let rw = w * (1.0 + p[1] / r);
                (rw * x, rw * y)
            }
        }
        Loonie => {
            let w2 = w * w;
            if r2 < w2 {
                let rr = w * (w2 / r2 - 1.0).sqrt();
                (rr * x, rr * y)
            } else {
                (w * x, w * y)
            }
        }
        Modulus => {
            let xr = 2.0 * p[0];
            let yr = 2.0 * p[1];
            let px = if x > p[0] {
                w * (-p[0] + (x + p[0]) % xr)
            } else if x < -p[0] {
                w * (p[0] - (p[0] - x) % xr)
            } else {
                w * x
            };
            let py = if y > p[1] {
                w * (-p[1] + (y + p[1]) % yr)
            } else if y < -p[1] {
                w * (p[1] - (p[1] - y) % yr)
            } else {
                w * y
            };
            (px, py)
        }
        Oscilloscope => {
            let tpf = 2.0 * PI * p[1];
            let t = if p[3] == 0.0 {
                p[2] * (tpf * x).cos() + p[0]
            } else {
                p[2] * (-x.abs() * p[3]).exp() * (tpf * x).cos() + p[0]
            };
            if y.abs() <= t {
                (w * x, -(w * y))
            } else {
                (w * x, w * y)
            }
        }
        Polar2 => {
            let p2v = w / PI;
            (p2v * theta, p2v / 2.0 * r2.ln())
        }
        Popcorn2 => (
            w * (x + p[0] * (y * p[2]).tan().sin()),
            w * (y + p[1] * (x * p[2]).tan().sin()),
        ),
        Scry => {
            let rr = 1.0 / (r * (r2 + 1.0 / (w + EPS)));
            (x * rr, y * rr)
        }
        Separation => {
            let sx2 = p[0] * p[0];
            let sy2 = p[2] * p[2];
            let px = if x > 0.0 {
                w * ((x * x + sx2).sqrt() - x * p[1])
            } else {
                -(w * ((x * x + sx2).sqrt() + x * p[1]))
            };
            let py = if y > 0.0 {
                w * ((y * y + sy2).sqrt() - y * p[3])
            } else {
                -(w * ((y * y + sy2).sqrt() + y * p[3]))
            };
            (px, py)
        }
        Split => {
            let py = if (x * p[0] * PI).cos() >= 0.0 { w * y } else { -(w * y) };
            let px = if (y * p[1] * PI).cos() >= 0.0 { w * x } else { -(w * x) };
            (px, py)
        }
        Splits => {
            let px = if x >= 0.0 { w * (x + p[0]) } else { w * (x - p[0]) };
            let py = if y >= 0.0 { w * (y + p[1]) } else { w * (y - p[1]) };
            (px, py)
        }
        Stripes => {
            let roundx = (x + 0.5).floor();
            let offsetx = x - roundx;
            (
                w * (offsetx * (1.0 - p[0]) + roundx),
                w * (y + offsetx * offsetx * p[1]),
            )
        }
        Wedge => {
            let mut a = phi + p[3] * r;
            let c = ((p[2] * a + PI) * FRAC_1_PI * 0.5).floor();
            let comp_fac = 1.0 - p[0] * p[2] * FRAC_1_PI * 0.5;
            a = a * comp_fac + c * p[0];
            let rr = w * (r + p[1]);
            (rr * a.cos(), rr * a.sin())
        }
        WedgeJulia => {
            let power = p[2];
            let cf = 1.0 - p[0] * p[1] * FRAC_1_PI * 0.5;
            let rr = w * r2.powf(p[3] / power / 2.0);
            let t = (power.abs() * rng.gen::<f64>()).trunc();
            let mut a = (phi + 2.0 * PI * t) / power;
            let c = ((p[1] * a + PI) * FRAC_1_PI * 0.5).floor();
            a = a * cf + c * p[0];
            (rr * a.cos(), rr * a.sin())
        }
        WedgeSph => {
            let ri = 1.0 / (r + EPS);
            let mut a = phi + p[3] * ri;
            let c = ((p[2] * a + PI) * FRAC_1_PI * 0.5).floor();
            let comp_fac = 1.0 - p[0] * p[2] * FRAC_1_PI * 0.5;
            a = a * comp_fac + c * p[0];
            let rr = w * (ri + p[1]);
            (rr * a.cos(), rr * a.sin())
        }
        Twintrian => {
            let rr = rng.gen::<f64>() * w * r;
            let (sr, cr) = rr.sin_cos();
            let mut diff = (sr * sr).log10() + cr;
            if !diff.is_finite() || diff.abs() > 1e10 {
                diff = -30.0;
            }
            (w * x * diff, w * x * (diff - sr * PI))
        }
        Cross => {
            let d = x * x - y * y;
            let rr = w * (1.0 / (d * d + EPS)).sqrt();
            (x * rr, y * rr)
        }
        Hemisphere => {
            let t = w / (r2 + 1.0).sqrt();
            (x * t, y * t)
        }
        Waves2 => (
            w * (x + p[0] * (y * p[2]).sin()),
            w * (y + p[1] * (x * p[3]).sin()),
        ),
        Exp => {
            let e = x.exp();
            (w * e * y.cos(), w * e * y.sin())
        }
        Log => (w * 0.5 * r2.ln(), w * phi),
        Sin => (w * x.sin() * y.cosh(), w * x.cos() * y.sinh()),
        Cos => (w * x.cos() * y.cosh(), -(w * x.sin() * y.sinh())),
        Tan => {
            let den = 1.0 / ((2.0 * x).cos() + (2.0 * y).cosh());
            (w * den * (2.0 * x).sin(), w * den * (2.0 * y).sinh())
        }
        Sec => {
            let den = 2.0 / ((2.0 * x).cos() + (2.0 * y).cosh());
            (w * den * x.cos() * y.cosh(), w * den * x.sin() * y.sinh())
        }
        Csc => {
            let den = 2.0 / ((2.0 * y).cosh() - (2.0 * x).cos());
            (
                w * den * x.sin() * y.cosh(),
                -(w * den * x.cos() * y.sinh()),
            )
        }
        Cot => {
            let den = 1.0 / ((2.0 * y).cosh() - (2.0 * x).cos());
            (w * den * (2.0 * x).sin(), -(w * den * (2.0 * y).sinh()))
        }
        Sinh => (w * x.sinh() * y.cos(), w * x.cosh() * y.sin()),
        Cosh => (w * x.cosh() * y.cos(), w * x.sinh() * y.sin()),
        Tanh => {
            let den = 1.0 / ((2.0 * y).cos() + (2.0 * x).cosh());
            (w * den * (2.0 * x).sinh(), w * den * (2.0 * y).sin())
        }
        Sech => {
            let den = 2.0 / ((2.0 * y).cos() + (2.0 * x).cosh());
            (
                w * den * y.cos() * x.cosh(),
                -(w * den * y.sin() * x.sinh()),
            )
        }
        Csch => {
            let den = 2.0 / ((2.0 * x).cosh() - (2.0 * y).cos());
            (
                w * den * x.sinh() * y.cos(),
                -(w * den * x.cosh() * y.sin()),
            )
        }
        Coth => {
            let den = 1.0 / ((2.0 * x).cosh() - (2.0 * y).cos());
            (w * den * (2.0 * x).sinh(), w * den * (2.0 * y).sin())
        }
        Auger => {
            let sv = (p[0] * x).sin();
            let tv = (p[0] * y).sin();
            let dy = y + p[1] * (p[2] * sv / 2.0 + y.abs() * sv);
            let dx = x + p[1] * (p[2] * tv / 2.0 + x.abs() * tv);
            (w * (x + p[3] * (dx - x)), w * dy)
        }
        Flux => {
            let xpw = x + w;
            let xmw = x - w;
            let yy = y * y;
            let avgr = w
                * (2.0 + p[0])
                * ((yy + xpw * xpw).sqrt() / (yy + xmw * xmw).sqrt()).sqrt();
            let avga = (y.atan2(xmw) - y.atan2(xpw)) * 0.5;
            (avgr * avga.cos(), avgr * avga.sin())
        }
        Perspective => {
            let ang = p[0] * PI / 2.0;
            let vsin = ang.sin();
            let vfcos = p[1] * ang.cos();
            let t = 1.0 / (p[1] - y * vsin);
            (w * p[1] * x * t, w * vfcos * y * t)
        }
        Bwraps => {
            let radius = 0.5 * p[0];
            let g2 = p[1] * p[1] + EPS;
            let mut max_bubble = g2 * radius;
            if max_bubble > 2.0 {
                max_bubble = 1.0;
            } else {
                max_bubble *= 1.0 / (max_bubble * max_bubble / 4.0 + 1.0);
            }
            let br2 = radius * radius;
            let rfactor = radius / (max_bubble + EPS);
            let cx = ((x / p[0]).floor() + 0.5) * p[0];
            let cy = ((y / p[0]).floor() + 0.5) * p[0];
            let mut lx = x - cx;
            let mut ly = y - cy;
            if lx * lx + ly * ly > br2 {
                (w * x, w * y)
            } else {
                lx *= g2;
                ly *= g2;
                let rr = rfactor / ((lx * lx + ly * ly) / 4.0 + 1.0);
                lx *= rr;
                ly *= rr;
                let rn = (lx * lx + ly * ly) / br2;
                let th = p[2] * (1.0 - rn) + p[3] * rn;
                let (st, ct) = th.sin_cos();
                (w * (cx + ct * lx + st * ly), w * (cy - st * lx + ct * ly))
            }
        }
        Unpolar => {
            let vvar = w * 0.5 * FRAC_1_PI;
            let rr = y.exp();
            (vvar * rr * x.sin(), vvar * rr * x.cos())
        }
        Polynomial => (
            (x.abs().powf(p[0]) * w).copysign(x) + p[2],
            (y.abs().powf(p[1]) * w).copysign(y) + p[3],
        ),
        Crop => {
            let (x0, y0, x1, y1) =
                (p[0].min(p[2]), p[1].min(p[3]), p[0].max(p[2]), p[1].max(p[3]));
            let scatter = p[4].clamp(-1.0, 1.0);
            let mut cx = x;
            let mut cy = y;
            if cx < x0 || cx > x1 || cy < y0 || cy > y1 {
                if p[5] != 0.0 {
                    cx = 0.0;
                    cy = 0.0;
                } else {
                    let xd = (x1 - x0) * 0.5;
                    let yd = (y1 - y0) * 0.5;
                    cx = x0 + xd + rng.gen::<f64>() * xd * 2.0 * scatter - xd * scatter;
                    cy = y0 + yd + rng.gen::<f64>() * yd * 2.0 * scatter - yd * scatter;
                }
            }
            (w * cx, w * cy)
        }
        Glynnia => {
            let vvar2 = w * 0.7071067811865476;
            if r >= 1.0 {
                if rng.gen::<f64>() > 0.5 {
                    let d = (r + x).sqrt() + EPS;
                    (vvar2 * d, -(vvar2 / d * y))
                } else {
                    let d = r + x;
                    let dn = (r * (y * y + d * d)).sqrt() + EPS;
                    let rr = w / dn;
                    (rr * d, rr * y)
                }
            } else if rng.gen::<f64>() > 0.5 {
                let d = (r + x).sqrt() + EPS;
                (-(vvar2 * d), -(vvar2 / d * y))
            } else {
                let d = r + x;
                let dn = (r * (y * y + d * d)).sqrt() + EPS;
                let rr = w / dn;
                (-(rr * d), rr * y)
            }
        }
        PointSymmetry => {
            let order = if p[0] < 1.0 { 1.0 } else { p[0].trunc() };
            let k = (rng.gen::<f64>() * order).trunc();
            let a = 2.0 * PI * k / order;
            let (sa, ca) = a.sin_cos();
            let dx = x - p[1];
            let dy = y - p[2];
            (w * (p[1] + dx * ca - dy * sa), w * (p[2] + dx * sa + dy * ca))
        }
        Mobius => {
            let re_u = p[0] * x + p[1];
            let im_u = p[0] * y;
            let re_v = p[2] * x + p[3];
            let im_v = p[2] * y;
            let rad_v = w / (re_v * re_v + im_v * im_v + EPS);
            (
                rad_v * (re_u * re_v + im_u * im_v),
                rad_v * (im_u * re_v - re_u * im_v),
            )
        }
    }
}

#[test]
fn every_kernel_matches_its_closed_form() {
    // One fixed off-axis input, one weight, parameters per type; the
    // stochastic kernels replay the exact draw sequence under the shared
    // seed, so direct and dispatched evaluation must agree everywhere.
    let (x, y) = (0.35, -0.45);
    for var in ALL_VARIATIONS {
        let p = reference_params(var);
        let seed = 1000 + u64::from(var.code());
        let actual = eval_seeded(var, 0.75, p, x, y, seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let expected = reference_point(var, 0.75, p, x, y, &mut rng);
        assert!(
            (actual.0 - expected.0).abs() < 1e-6 && (actual.1 - expected.1).abs() < 1e-6,
            "{}: got {:?}, expected {:?}",
            var.name(),
            actual,
            expected
        );
    }
}
