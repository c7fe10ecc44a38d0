//! The per-particle chaos-game step: selection, pre-blur, affine maps,
//! additive variation blend, color update, final xform, symmetry and the
//! validity check. One function, one step, no hidden state beyond the
//! particle itself.

use rand::Rng;

use super::guard::is_valid;
use super::selector;
use crate::genome::{Genome, Xform};
use crate::types::{EmittedPoint, SymmetryMode, TrigMode};
use crate::variations::{self, random, VarState};

/// Transient chaos-game walker state.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub color: f64,
    pub current: usize,
}

impl Particle {
    /// Fresh walker: position uniform in [-1,1]^2 (x drawn before y), then
    /// one draw for the color coordinate, then the initial xform pick.
    pub fn seed<R: Rng>(genome: &Genome, rng: &mut R) -> Self {
        let x = rng.gen_range(-1.0..1.0);
        let y = rng.gen_range(-1.0..1.0);
        let color = rng.gen::<f64>();
        let current = selector::select_initial(genome, rng);
        Self {
            x,
            y,
            color,
            current,
        }
    }
}

/// Advance `particle` by one full step. Returns the emitted point, or
/// `None` when the step produced an invalid point, in which case the
/// particle has been reseeded from a fresh random start.
pub fn step<R: Rng>(
    genome: &Genome,
    particle: &mut Particle,
    limit: f64,
    rng: &mut R,
) -> Option<EmittedPoint> {
    let next = selector::select_next(particle.current, genome, rng);
    let xf = &genome.xforms[next];

    let (mut x, mut y) = (particle.x, particle.y);
    if xf.pre_blur > 0.0 {
        random::pre_blur(xf.pre_blur, &mut x, &mut y, rng);
    }

    let (x, y) = xf.pre_affine.apply(x, y);
    let (mut x, mut y) = blend(xf, x, y, genome.trig_mode, rng);

    if let Some(post) = &xf.post_affine {
        (x, y) = post.apply(x, y);
    }
    if let Some(slot) = &xf.post_slot {
        if slot.is_active() {
            let mut s = VarState::new(x, y);
            variations::apply(
                slot.var,
                slot.weight,
                &slot.params,
                slot.precalc.as_ref(),
                genome.trig_mode,
                &mut s,
                rng,
            );
            (x, y) = (s.p0, s.p1);
        }
    }

    let mut color = particle.color * xf.one_minus_weight + xf.color * xf.speed_weight;
    let mut alpha = xf.alpha;

    if let Some(fx) = &genome.final_xform {
        let (fx_x, fx_y) = fx.pre_affine.apply(x, y);
        (x, y) = blend(fx, fx_x, fx_y, genome.trig_mode, rng);
        if let Some(post) = &fx.post_affine {
            (x, y) = post.apply(x, y);
        }
        color = color * fx.one_minus_weight + fx.color * fx.speed_weight;
        alpha *= fx.alpha;
    }

    (x, y) = apply_symmetry(genome.symmetry, x, y, rng);
    if let Some(global) = &genome.global_transform {
        (x, y) = global.apply(x, y);
    }

    if !is_valid(x, y, alpha, limit) {
        *particle = Particle::seed(genome, rng);
        return None;
    }

    particle.x = x;
    particle.y = y;
    particle.color = color;
    particle.current = next;
    Some(EmittedPoint {
        x,
        y,
        color,
        alpha,
    })
}

/// Additive blend of every active slot against the same input point. Zero
/// active slots degenerate to identity.
fn blend<R: Rng>(xf: &Xform, tx: f64, ty: f64, trig: TrigMode, rng: &mut R) -> (f64, f64) {
    if xf.is_identity_blend() {
        return (tx, ty);
    }
    let mut s = VarState::new(tx, ty);
    for slot in &xf.slots {
        if slot.is_active() {
            variations::apply(
                slot.var,
                slot.weight,
                &slot.params,
                slot.precalc.as_ref(),
                trig,
                &mut s,
                rng,
            );
        }
    }
    (s.p0, s.p1)
}

// Rotation by k * (tau / n), k uniform. k == 0 keeps the point untouched,
// which gives Rotational3 its 1/3 and Rotational5 its 1/5 no-op branch.
fn apply_symmetry<R: Rng>(mode: SymmetryMode, x: f64, y: f64, rng: &mut R) -> (f64, f64) {
    let order = match mode {
        SymmetryMode::None => return (x, y),
        SymmetryMode::Rotational3 => 3,
        SymmetryMode::Rotational5 => 5,
    };
    let k = rng.gen_range(0..order);
    if k == 0 {
        return (x, y);
    }
    let angle = k as f64 * std::f64::consts::TAU / order as f64;
    let (sa, ca) = angle.sin_cos();
    (x * ca - y * sa, x * sa + y * ca)
}
