//! Accumulation targets for emitted points. The engine only needs the
//! thread-safe accumulate-only seam; the concrete sinks here cover tests,
//! the CLI and a basic density/color histogram.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::types::EmittedPoint;

/// Write-only accumulation seam shared by all workers. Increments are
/// associative and commutative, so implementations are free to shard
/// internally and reduce later.
pub trait PointSink: Send + Sync {
    fn accept(&self, point: EmittedPoint);
}

/// Collects every emitted point in order of arrival. Per-particle
/// chronological order is preserved; cross-particle interleaving is not.
#[derive(Debug, Default)]
pub struct CollectSink {
    points: Mutex<Vec<EmittedPoint>>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.lock().expect("sink lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_points(self) -> Vec<EmittedPoint> {
        self.points.into_inner().expect("sink lock")
    }
}

impl PointSink for CollectSink {
    fn accept(&self, point: EmittedPoint) {
        self.points.lock().expect("sink lock").push(point);
    }
}

/// Square density/color histogram over a centered view window. Bins are
/// plain counters plus running color and alpha sums, mergeable across
/// worker-local copies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Histogram {
    size: usize,
    half_extent: f64,
    density: Vec<u64>,
    color_sum: Vec<f64>,
    alpha_sum: Vec<f64>,
}

impl Histogram {
    pub fn new(size: usize, half_extent: f64) -> Self {
        Self {
            size,
            half_extent,
            density: vec![0; size * size],
            color_sum: vec![0.0; size * size],
            alpha_sum: vec![0.0; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn record(&mut self, point: &EmittedPoint) {
        if let Some(bin) = self.bin_index(point.x, point.y) {
            self.density[bin] += 1;
            self.color_sum[bin] += point.color;
            self.alpha_sum[bin] += point.alpha;
        }
    }

    pub fn merge(&mut self, other: &Histogram) {
        debug_assert_eq!(self.size, other.size);
        for (d, o) in self.density.iter_mut().zip(&other.density) {
            *d += o;
        }
        for (c, o) in self.color_sum.iter_mut().zip(&other.color_sum) {
            *c += o;
        }
        for (a, o) in self.alpha_sum.iter_mut().zip(&other.alpha_sum) {
            *a += o;
        }
    }

    pub fn density_at(&self, col: usize, row: usize) -> u64 {
        self.density[row * self.size + col]
    }

    pub fn occupied_bins(&self) -> usize {
        self.density.iter().filter(|&&d| d > 0).count()
    }

    pub fn total_hits(&self) -> u64 {
        self.density.iter().sum()
    }

    fn bin_index(&self, x: f64, y: f64) -> Option<usize> {
        let scale = self.size as f64 / (2.0 * self.half_extent);
        let col = ((x + self.half_extent) * scale).floor();
        let row = ((y + self.half_extent) * scale).floor();
        if col < 0.0 || row < 0.0 || col >= self.size as f64 || row >= self.size as f64 {
            return None;
        }
        Some(row as usize * self.size + col as usize)
    }
}

/// [`Histogram`] behind the sink seam, so `render` can bin points as they
/// arrive. One lock guards the grid; runs that outgrow the contention can
/// record into per-worker histograms and `merge` instead.
#[derive(Debug)]
pub struct HistogramSink {
    inner: Mutex<Histogram>,
}

impl HistogramSink {
    pub fn new(size: usize, half_extent: f64) -> Self {
        Self {
            inner: Mutex::new(Histogram::new(size, half_extent)),
        }
    }

    pub fn into_histogram(self) -> Histogram {
        self.inner.into_inner().expect("sink lock")
    }
}

impl PointSink for HistogramSink {
    fn accept(&self, point: EmittedPoint) {
        self.inner.lock().expect("sink lock").record(&point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64) -> EmittedPoint {
        EmittedPoint {
            x,
            y,
            color: 0.5,
            alpha: 1.0,
        }
    }

    #[test]
    fn collect_sink_preserves_points() {
        let sink = CollectSink::new();
        sink.accept(point(0.1, 0.2));
        sink.accept(point(-0.3, 0.4));
        let points = sink.into_points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].x, 0.1);
    }

    #[test]
    fn histogram_bins_and_ignores_out_of_window() {
        let mut h = Histogram::new(4, 1.0);
        h.record(&point(0.0, 0.0));
        h.record(&point(0.0, 0.0));
        h.record(&point(5.0, 0.0));
        assert_eq!(h.total_hits(), 2);
        assert_eq!(h.density_at(2, 2), 2);
    }

    #[test]
    fn histogram_sink_bins_through_the_shared_seam() {
        let sink = HistogramSink::new(4, 1.0);
        {
            let seam: &dyn PointSink = &sink;
            seam.accept(point(0.0, 0.0));
            seam.accept(point(0.0, 0.0));
            seam.accept(point(5.0, 0.0));
        }
        let h = sink.into_histogram();
        assert_eq!(h.total_hits(), 2);
        assert_eq!(h.density_at(2, 2), 2);
    }

    #[test]
    fn merge_adds_counts() {
        let mut a = Histogram::new(4, 1.0);
        let mut b = Histogram::new(4, 1.0);
        a.record(&point(0.0, 0.0));
        b.record(&point(0.0, 0.0));
        b.record(&point(-0.9, -0.9));
        a.merge(&b);
        assert_eq!(a.total_hits(), 3);
        assert_eq!(a.occupied_bins(), 2);
    }
}
