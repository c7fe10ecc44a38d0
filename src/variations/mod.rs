//! The variation kernel library: ~100 pure nonlinear 2D vector fields,
//! dispatched over a closed enum keyed by the genome's integer type codes.
//!
//! Evaluation semantics: every active slot of an xform is evaluated against
//! the same affine-transformed input point held in a [`VarState`], and its
//! weighted output is summed into the state's accumulator (additive blend,
//! not a pipeline).

pub mod parametric;
pub mod precalc;
pub mod random;
pub mod simple;
pub mod state;
pub mod trig;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::TrigMode;
pub use precalc::Precalc;
pub use state::VarState;

/// Type code reserved for the hard-coded pre-blur; never selectable.
pub const PRE_BLUR_CODE: u32 = 65;

/// Closed set of selectable variation kernels. Discriminants are the wire
/// type codes; code 65 is the reserved pre-blur and has no variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum VariationType {
    Linear = 0,
    Sinusoidal = 1,
    Spherical = 2,
    Swirl = 3,
    Horseshoe = 4,
    Polar = 5,
    Handkerchief = 6,
    Heart = 7,
    Disc = 8,
    Spiral = 9,
    Hyperbolic = 10,
    Diamond = 11,
    Ex = 12,
    Julia = 13,
    Bent = 14,
    Waves = 15,
    Fisheye = 16,
    Popcorn = 17,
    Exponential = 18,
    Power = 19,
    Cosine = 20,
    Rings = 21,
    Fan = 22,
    Blob = 23,
    Pdj = 24,
    Fan2 = 25,
    Rings2 = 26,
    Eyefish = 27,
    Bubble = 28,
    Cylinder = 29,
    Whorl = 30,
    Noise = 31,
    Julian = 32,
    Juliascope = 33,
    Blur = 34,
    RadialBlur = 35,
    GaussianBlur = 36,
    Pie = 37,
    Ngon = 38,
    Curl = 39,
    Rectangles = 40,
    Arch = 41,
    Tangent = 42,
    Square = 43,
    Rays = 44,
    Blade = 45,
    Secant2 = 46,
    Disc2 = 47,
    SuperShape = 48,
    Flower = 49,
    Conic = 50,
    Parabola = 51,
    Bent2 = 52,
    Bipolar = 53,
    Boarders = 54,
    Butterfly = 55,
    Cell = 56,
    Cpow = 57,
    Curve = 58,
    Edisc = 59,
    Elliptic = 60,
    Escher = 61,
    Foci = 62,
    LazySusan = 63,
    Loonie = 64,
    Modulus = 66,
    Oscilloscope = 67,
    Polar2 = 68,
    Popcorn2 = 69,
    Scry = 70,
    Separation = 71,
    Split = 72,
    Splits = 73,
    Stripes = 74,
    Wedge = 75,
    WedgeJulia = 76,
    WedgeSph = 77,
    Twintrian = 78,
    Cross = 79,
    Hemisphere = 80,
    Waves2 = 81,
    Exp = 82,
    Log = 83,
    Sin = 84,
    Cos = 85,
    Tan = 86,
    Sec = 87,
    Csc = 88,
    Cot = 89,
    Sinh = 90,
    Cosh = 91,
    Tanh = 92,
    Sech = 93,
    Csch = 94,
    Coth = 95,
    Auger = 96,
    Flux = 97,
    Perspective = 98,
    Bwraps = 99,
    Unpolar = 100,
    Polynomial = 101,
    Crop = 102,
    Glynnia = 103,
    PointSymmetry = 104,
    Mobius = 105,
}

/// All selectable variations, in code order.
pub const ALL_VARIATIONS: [VariationType; 105] = {
    use VariationType::*;
    [
        Linear, Sinusoidal, Spherical, Swirl, Horseshoe, Polar, Handkerchief, Heart, Disc,
        Spiral, Hyperbolic, Diamond, Ex, Julia, Bent, Waves, Fisheye, Popcorn, Exponential,
        Power, Cosine, Rings, Fan, Blob, Pdj, Fan2, Rings2, Eyefish, Bubble, Cylinder, Whorl,
        Noise, Julian, Juliascope, Blur, RadialBlur, GaussianBlur, Pie, Ngon, Curl, Rectangles,
        Arch, Tangent, Square, Rays, Blade, Secant2, Disc2, SuperShape, Flower, Conic, Parabola,
        Bent2, Bipolar, Boarders, Butterfly, Cell, Cpow, Curve, Edisc, Elliptic, Escher, Foci,
        LazySusan, Loonie, Modulus, Oscilloscope, Polar2, Popcorn2, Scry, Separation, Split,
        Splits, Stripes, Wedge, WedgeJulia, WedgeSph, Twintrian, Cross, Hemisphere, Waves2,
        Exp, Log, Sin, Cos, Tan, Sec, Csc, Cot, Sinh, Cosh, Tanh, Sech, Csch, Coth, Auger,
        Flux, Perspective, Bwraps, Unpolar, Polynomial, Crop, Glynnia, PointSymmetry, Mobius,
    ]
};

impl VariationType {
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        if code == PRE_BLUR_CODE || code > 105 {
            return None;
        }
        ALL_VARIATIONS.iter().copied().find(|v| v.code() == code)
    }

    pub fn name(self) -> &'static str {
        use VariationType::*;
        match self {
            Linear => "linear",
            Sinusoidal => "sinusoidal",
            Spherical => "spherical",
            Swirl => "swirl",
            Horseshoe => "horseshoe",
            Polar => "polar",
            Handkerchief => "handkerchief",
            Heart => "heart",
            Disc => "disc",
            Spiral => "spiral",
            Hyperbolic => "hyperbolic",
            Diamond => "diamond",
            Ex => "ex",
            Julia => "julia",
            Bent => "bent",
            Waves => "waves",
            Fisheye => "fisheye",
            Popcorn => "popcorn",
            Exponential => "exponential",
            Power => "power",
            Cosine => "cosine",
            Rings => "rings",
            Fan => "fan",
            Blob => "blob",
            Pdj => "pdj",
            Fan2 => "fan2",
            Rings2 => "rings2",
            Eyefish => "eyefish",
            Bubble => "bubble",
            Cylinder => "cylinder",
            Whorl => "whorl",
            Noise => "noise",
            Julian => "julian",
            Juliascope => "juliascope",
            Blur => "blur",
            RadialBlur => "radial_blur",
            GaussianBlur => "gaussian_blur",
            Pie => "pie",
            Ngon => "ngon",
            Curl => "curl",
            Rectangles => "rectangles",
            Arch => "arch",
            Tangent => "tangent",
            Square => "square",
            Rays => "rays",
            Blade => "blade",
            Secant2 => "secant2",
            Disc2 => "disc2",
            SuperShape => "super_shape",
            Flower => "flower",
            Conic => "conic",
            Parabola => "parabola",
            Bent2 => "bent2",
            Bipolar => "bipolar",
            Boarders => "boarders",
            Butterfly => "butterfly",
            Cell => "cell",
            Cpow => "cpow",
            Curve => "curve",
            Edisc => "edisc",
            Elliptic => "elliptic",
            Escher => "escher",
            Foci => "foci",
            LazySusan => "lazysusan",
            Loonie => "loonie",
            Modulus => "modulus",
            Oscilloscope => "oscilloscope",
            Polar2 => "polar2",
            Popcorn2 => "popcorn2",
            Scry => "scry",
            Separation => "separation",
            Split => "split",
            Splits => "splits",
            Stripes => "stripes",
            Wedge => "wedge",
            WedgeJulia => "wedge_julia",
            WedgeSph => "wedge_sph",
            Twintrian => "twintrian",
            Cross => "cross",
            Hemisphere => "hemisphere",
            Waves2 => "waves2",
            Exp => "exp",
            Log => "log",
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Sec => "sec",
            Csc => "csc",
            Cot => "cot",
            Sinh => "sinh",
            Cosh => "cosh",
            Tanh => "tanh",
            Sech => "sech",
            Csch => "csch",
            Coth => "coth",
            Auger => "auger",
            Flux => "flux",
            Perspective => "perspective",
            Bwraps => "bwraps",
            Unpolar => "unpolar",
            Polynomial => "polynomial",
            Crop => "crop",
            Glynnia => "glynnia",
            PointSymmetry => "point_symmetry",
            Mobius => "mobius",
        }
    }

    /// Fixed parameter-vector arity for this type (0, 1, 2, 3, 4 or 6).
    pub fn arity(self) -> usize {
        use VariationType::*;
        match self {
            Rings | Rings2 | Bipolar | Cell | Escher | RadialBlur | Flux => 1,
            Popcorn | Fan | Fan2 | Whorl | Julian | Juliascope | Curl | Rectangles | Disc2
            | Flower | Conic | Parabola | Bent2 | Modulus | Split | Splits | Stripes
            | Perspective => 2,
            Blob | Pie | Cpow | Popcorn2 | LazySusan | PointSymmetry => 3,
            Waves | Pdj | Ngon | Curve | Oscilloscope | Separation | Wedge | WedgeJulia
            | WedgeSph | Waves2 | Auger | Bwraps | Polynomial | Mobius => 4,
            SuperShape | Crop => 6,
            _ => 0,
        }
    }

    /// Whether the kernel consumes draws from the particle's random stream.
    pub fn uses_rng(self) -> bool {
        use VariationType::*;
        matches!(
            self,
            Julia
                | Noise
                | Julian
                | Juliascope
                | Blur
                | RadialBlur
                | GaussianBlur
                | Pie
                | Arch
                | Square
                | Rays
                | Blade
                | SuperShape
                | Flower
                | Conic
                | Parabola
                | Boarders
                | Cpow
                | Twintrian
                | WedgeJulia
                | Crop
                | Glynnia
                | PointSymmetry
        )
    }

    /// Whether this type carries a parameter-derived precalc cache.
    pub fn has_precalc(self) -> bool {
        use VariationType::*;
        matches!(self, Disc2 | SuperShape | WedgeJulia | Perspective | Bwraps)
    }
}

/// One row of the variation manifest, exported for hosts and the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct VariationInfo {
    pub code: u32,
    pub name: &'static str,
    pub arity: usize,
    pub uses_rng: bool,
}

/// Metadata for every selectable variation, in code order.
pub fn manifest() -> Vec<VariationInfo> {
    ALL_VARIATIONS
        .iter()
        .map(|v| VariationInfo {
            code: v.code(),
            name: v.name(),
            arity: v.arity(),
            uses_rng: v.uses_rng(),
        })
        .collect()
}

/// Evaluate one variation slot against `state`, accumulating the weighted
/// output into the state's `p0`/`p1`. `precalc` must be `None` or the cache
/// derived from exactly these `params`; both paths agree to the ULP.
pub fn apply<R: Rng>(
    var: VariationType,
    weight: f64,
    params: &[f64],
    pre: Option<&Precalc>,
    trig: TrigMode,
    state: &mut VarState,
    rng: &mut R,
) {
    use VariationType::*;
    match var {
        Linear => simple::linear(weight, state),
        Sinusoidal => simple::sinusoidal(weight, state),
        Spherical => simple::spherical(weight, state),
        Swirl => simple::swirl(weight, state),
        Horseshoe => simple::horseshoe(weight, state),
        Polar => simple::polar(weight, state),
        Handkerchief => simple::handkerchief(weight, state),
        Heart => simple::heart(weight, state),
        Disc => simple::disc(weight, state),
        Spiral => simple::spiral(weight, state),
        Hyperbolic => simple::hyperbolic(weight, state),
        Diamond => simple::diamond(weight, state),
        Ex => simple::ex(weight, state),
        Julia => random::julia(weight, state, rng),
        Bent => simple::bent(weight, state),
        Waves => parametric::waves(weight, params, state),
        Fisheye => simple::fisheye(weight, state),
        Popcorn => parametric::popcorn(weight, params, state),
        Exponential => simple::exponential(weight, state),
        Power => simple::power(weight, state),
        Cosine => simple::cosine(weight, state),
        Rings => parametric::rings(weight, params, state),
        Fan => parametric::fan(weight, params, state),
        Blob => parametric::blob(weight, params, state),
        Pdj => parametric::pdj(weight, params, state),
        Fan2 => parametric::fan2(weight, params, state),
        Rings2 => parametric::rings2(weight, params, state),
        Eyefish => simple::eyefish(weight, state),
        Bubble => simple::bubble(weight, state),
        Cylinder => simple::cylinder(weight, state),
        Whorl => parametric::whorl(weight, params, state),
        Noise => random::noise(weight, state, rng),
        Julian => random::julian(weight, params, state, rng),
        Juliascope => random::juliascope(weight, params, state, rng),
        Blur => random::blur(weight, state, rng),
        RadialBlur => random::radial_blur(weight, params, state, rng),
        GaussianBlur => random::gaussian_blur(weight, state, rng),
        Pie => random::pie(weight, params, state, rng),
        Ngon => parametric::ngon(weight, params, state),
        Curl => parametric::curl(weight, params, state),
        Rectangles => parametric::rectangles(weight, params, state),
        Arch => random::arch(weight, state, rng),
        Tangent => simple::tangent(weight, state),
        Square => random::square(weight, state, rng),
        Rays => random::rays(weight, state, rng),
        Blade => random::blade(weight, state, rng),
        Secant2 => simple::secant2(weight, state),
        Disc2 => precalc::disc2(weight, params, pre, state),
        SuperShape => precalc::super_shape(weight, params, pre, state, rng),
        Flower => random::flower(weight, params, state, rng),
        Conic => random::conic(weight, params, state, rng),
        Parabola => random::parabola(weight, params, state, rng),
        Bent2 => parametric::bent2(weight, params, state),
        Bipolar => parametric::bipolar(weight, params, state),
        Boarders => random::boarders(weight, state, rng),
        Butterfly => simple::butterfly(weight, state),
        Cell => parametric::cell(weight, params, state),
        Cpow => random::cpow(weight, params, state, rng),
        Curve => parametric::curve(weight, params, state),
        Edisc => simple::edisc(weight, state),
        Elliptic => simple::elliptic(weight, state),
        Escher => parametric::escher(weight, params, state),
        Foci => simple::foci(weight, state),
        LazySusan => parametric::lazysusan(weight, params, state),
        Loonie => simple::loonie(weight, state),
        Modulus => parametric::modulus(weight, params, state),
        Oscilloscope => parametric::oscilloscope(weight, params, state),
        Polar2 => simple::polar2(weight, state),
        Popcorn2 => parametric::popcorn2(weight, params, state),
        Scry => simple::scry(weight, state),
        Separation => parametric::separation(weight, params, state),
        Split => parametric::split(weight, params, state),
        Splits => parametric::splits(weight, params, state),
        Stripes => parametric::stripes(weight, params, state),
        Wedge => parametric::wedge(weight, params, state),
        WedgeJulia => precalc::wedge_julia(weight, params, pre, state, rng),
        WedgeSph => parametric::wedge_sph(weight, params, state),
        Twintrian => random::twintrian(weight, state, rng),
        Cross => simple::cross(weight, state),
        Hemisphere => simple::hemisphere(weight, state),
        Waves2 => parametric::waves2(weight, params, state),
        Exp => simple::exp(weight, state),
        Log => simple::log(weight, state),
        Sin => trig::sin(weight, trig, state),
        Cos => trig::cos(weight, trig, state),
        Tan => trig::tan(weight, trig, state),
        Sec => trig::sec(weight, trig, state),
        Csc => trig::csc(weight, trig, state),
        Cot => trig::cot(weight, trig, state),
        Sinh => trig::sinh(weight, trig, state),
        Cosh => trig::cosh(weight, trig, state),
        Tanh => trig::tanh(weight, trig, state),
        Sech => trig::sech(weight, trig, state),
        Csch => trig::csch(weight, trig, state),
        Coth => trig::coth(weight, trig, state),
        Auger => parametric::auger(weight, params, state),
        Flux => parametric::flux(weight, params, state),
        Perspective => precalc::perspective(weight, params, pre, state),
        Bwraps => precalc::bwraps(weight, params, pre, state),
        Unpolar => simple::unpolar(weight, state),
        Polynomial => parametric::polynomial(weight, params, state),
        Crop => random::crop(weight, params, state, rng),
        Glynnia => random::glynnia(weight, state, rng),
        PointSymmetry => random::point_symmetry(weight, params, state, rng),
        Mobius => parametric::mobius(weight, params, state),
    }
}
