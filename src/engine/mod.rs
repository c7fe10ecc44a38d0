//! The chaos-game iteration engine: xform selection, the per-particle step
//! loop, numerical guards and the parallel render driver.

pub mod chaos;
pub mod guard;
pub mod renderer;
pub mod selector;
pub mod sink;

pub use chaos::Particle;
pub use guard::{is_valid, DEFAULT_LIMIT, EPS};
pub use renderer::{render, RenderStats};
pub use sink::{CollectSink, Histogram, HistogramSink, PointSink};
