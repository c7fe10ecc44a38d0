//! Core numerical engine of a fractal-flame generator: a chaos-game
//! iterated-function-system with a library of ~100 nonlinear variation
//! kernels, weighted xform transitions (XAOS) and parallel point
//! accumulation.
//!
//! The crate stops at the emitted-point stream; image compositing, tone
//! mapping and display belong to the host.

pub mod config;
pub mod engine;
pub mod error;
pub mod genome;
pub mod types;
pub mod variations;

pub use config::{ConfigManager, FlameConfig, RunConfig};
pub use engine::{render, CollectSink, Histogram, HistogramSink, PointSink, RenderStats};
pub use error::{FlameError, Result};
pub use genome::{Genome, GenomeBuilder, MapParams, ParamSource, TransitionMatrix, Xform};
pub use types::{Affine, EmittedPoint, SymmetryMode, TrigMode};
pub use variations::{VariationType, PRE_BLUR_CODE};
