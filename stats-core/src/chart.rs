//! # Chart Geometry Module
//!
//! Renderer-independent layout for the stats charts. The GUI canvases only
//! scale these unit coordinates to their bounds and paint them.
//!
//! ## Radar layout
//! - One spoke per category, at `START_ANGLE + 2π·i/N`
//! - Values are plotted in category order and the polygon is closed by
//!   repeating the first vertex
//! - Coordinates are in the unit circle, with y pointing down like screen space
//!
//! Neither layout mutates the stats it is given, and both accept an empty set.

use std::f32::consts::{FRAC_PI_2, TAU};

use crate::document::FlatStats;

/// Angle of the first spoke; it points straight up.
pub const START_ANGLE: f32 = -FRAC_PI_2;

/// Number of concentric grid rings drawn behind the polygon.
pub const RING_LEVELS: usize = 4;

/// Values are expected in 0..=100; larger values stretch the scale.
pub const DEFAULT_SCALE: f64 = 100.0;

/// Largest finite value, never below `DEFAULT_SCALE`.
pub fn chart_scale(stats: &FlatStats) -> f64 {
    stats
        .values()
        .copied()
        .filter(|v| v.is_finite())
        .fold(DEFAULT_SCALE, f64::max)
}

/// Fraction of the scale a value covers, clamped to `0.0..=1.0`.
fn fraction(value: f64, scale: f64) -> f32 {
    if !value.is_finite() || scale <= 0.0 {
        return 0.0;
    }
    (value / scale).clamp(0.0, 1.0) as f32
}

/// One axis of the radar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Spoke {
    pub label: String,
    pub value: f64,
    /// Radians, measured clockwise on screen from the positive x axis.
    pub angle: f32,
    /// Unit vector along the spoke.
    pub direction: (f32, f32),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RadarLayout {
    pub spokes: Vec<Spoke>,
    /// Closed polygon in unit coordinates; empty when there are no categories.
    pub polygon: Vec<(f32, f32)>,
    pub scale: f64,
}

impl RadarLayout {
    pub fn compute(stats: &FlatStats) -> Self {
        let scale = chart_scale(stats);
        let n = stats.len();
        if n == 0 {
            return Self {
                spokes: Vec::new(),
                polygon: Vec::new(),
                scale,
            };
        }

        let spokes: Vec<Spoke> = stats
            .iter()
            .enumerate()
            .map(|(i, (label, &value))| {
                let angle = START_ANGLE + TAU * i as f32 / n as f32;
                Spoke {
                    label: label.clone(),
                    value,
                    angle,
                    direction: (angle.cos(), angle.sin()),
                }
            })
            .collect();

        let mut polygon: Vec<(f32, f32)> = spokes
            .iter()
            .map(|s| {
                let r = fraction(s.value, scale);
                (s.direction.0 * r, s.direction.1 * r)
            })
            .collect();
        polygon.push(polygon[0]);

        Self {
            spokes,
            polygon,
            scale,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.spokes.is_empty()
    }

    /// Grid ring radii as fractions of the full radius, innermost first.
    pub fn rings(&self) -> Vec<f32> {
        (1..=RING_LEVELS)
            .map(|level| level as f32 / RING_LEVELS as f32)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    /// Bar height as a fraction of the plot height.
    pub height: f32,
}

/// Vertical bar layout, one bar per category in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarLayout {
    pub bars: Vec<Bar>,
    pub scale: f64,
}

impl BarLayout {
    pub fn compute(stats: &FlatStats) -> Self {
        let scale = chart_scale(stats);
        let bars = stats
            .iter()
            .map(|(label, &value)| Bar {
                label: label.clone(),
                value,
                height: fraction(value, scale),
            })
            .collect();
        Self { bars, scale }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn stats(pairs: &[(&str, f64)]) -> FlatStats {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn empty_stats_give_empty_layout() {
        let layout = RadarLayout::compute(&FlatStats::new());
        assert!(layout.is_empty());
        assert!(layout.polygon.is_empty());
        assert!(BarLayout::compute(&FlatStats::new()).is_empty());
    }

    #[test]
    fn spokes_are_evenly_spaced_from_the_top() {
        let layout = RadarLayout::compute(&stats(&[("a", 0.0), ("b", 0.0), ("c", 0.0), ("d", 0.0)]));
        let angles: Vec<f32> = layout.spokes.iter().map(|s| s.angle).collect();
        for (i, angle) in angles.iter().enumerate() {
            assert!((angle - (START_ANGLE + FRAC_PI_2 * i as f32)).abs() < EPS);
        }
        let up = layout.spokes[0].direction;
        assert!(up.0.abs() < EPS && (up.1 + 1.0).abs() < EPS);
    }

    #[test]
    fn polygon_is_closed_and_follows_category_order() {
        let input = stats(&[("a", 100.0), ("b", 50.0), ("c", 25.0)]);
        let layout = RadarLayout::compute(&input);

        assert_eq!(layout.polygon.len(), 4);
        assert_eq!(layout.polygon.first(), layout.polygon.last());
        let radius = |p: (f32, f32)| (p.0 * p.0 + p.1 * p.1).sqrt();
        assert!((radius(layout.polygon[0]) - 1.0).abs() < EPS);
        assert!((radius(layout.polygon[1]) - 0.5).abs() < EPS);
        assert!((radius(layout.polygon[2]) - 0.25).abs() < EPS);
    }

    #[test]
    fn large_values_stretch_the_scale() {
        let layout = RadarLayout::compute(&stats(&[("a", 200.0), ("b", 100.0)]));
        assert_eq!(layout.scale, 200.0);
        let bars = BarLayout::compute(&stats(&[("a", 200.0), ("b", 100.0)]));
        assert!((bars.bars[1].height - 0.5).abs() < EPS);
    }

    #[test]
    fn negative_values_clamp_to_center() {
        let layout = RadarLayout::compute(&stats(&[("a", -10.0)]));
        assert_eq!(layout.polygon[0], (0.0, 0.0));
    }

    #[test]
    fn layout_does_not_touch_input() {
        let input = stats(&[("a", 10.0), ("b", 20.0)]);
        let before = input.clone();
        let _ = RadarLayout::compute(&input);
        let _ = BarLayout::compute(&input);
        assert_eq!(input, before);
    }

    #[test]
    fn rings_end_at_full_radius() {
        let rings = RadarLayout::default().rings();
        assert_eq!(rings.len(), RING_LEVELS);
        assert_eq!(rings.last(), Some(&1.0));
    }
}
