use crate::{ClusterAssignment, Palette, Point, Primitive, palette};
use plotters::style::{RGBColor, BLACK};
use std::ops::Range;

/// A single plotted circle.
///
/// ## Fields
/// - **x**, **y**: Position in data coordinates
/// - **radius**: Radius in typographic points (1/72 inch), scaled with the export resolution
/// - **color**: Fill color
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: RGBColor
}

/// In-memory scene, as produced by the [`Renderer`].
///
/// ## Fields
/// - **sequence**: 0 for the raw observations, 1..N for the iterations in order
/// - **figure_size**: Physical (width, height) of the figure in inches
/// - **markers**: Markers in drawing order
#[derive(Clone, Debug, PartialEq)]
pub struct VisualArtifact {
    pub sequence: usize,
    pub figure_size: (f64, f64),
    pub markers: Vec<Marker>
}
impl VisualArtifact {
    /// Data-space ranges covering all finite markers, padded by 5% per side.
    /// A degenerate (zero-width) range is widened to ±1 around its value.
    pub fn bounds(&self) -> (Range<f64>, Range<f64>) {
        let finite = || self.markers.iter().filter(|m| m.x.is_finite() && m.y.is_finite());
        let axis = |values: &mut dyn Iterator<Item = f64>| {
            let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
            if lo > hi {
                -1.0..1.0
            } else if hi - lo == 0.0 {
                (lo - 1.0)..(hi + 1.0)
            } else {
                let pad = (hi - lo) * 0.05;
                (lo - pad)..(hi + pad)
            }
        };
        (axis(&mut finite().map(|m| m.x)), axis(&mut finite().map(|m| m.y)))
    }
}

/// Visual style shared by all rendered figures.
///
/// ## Fields
/// - **figure_size**: Physical (width, height) of each figure in inches
/// - **observation_radius**: Marker radius of observations, in points
/// - **centroid_radius**: Marker radius of centroids, in points
/// - **observation_color**: Color of the observations in the raw observation figure
/// - **assigned_palette**: Colors of observations, by assigned cluster
/// - **self_palette**: Colors of the centroids, by cluster
#[derive(Clone, Debug)]
pub struct RenderStyle {
    pub figure_size: (f64, f64),
    pub observation_radius: f64,
    pub centroid_radius: f64,
    pub observation_color: RGBColor,
    pub assigned_palette: Palette,
    pub self_palette: Palette
}
impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            figure_size: (6.4, 4.8),
            observation_radius: 50f64.sqrt() / 2.0,
            centroid_radius: 200f64.sqrt() / 2.0,
            observation_color: BLACK,
            assigned_palette: palette::default_assigned(),
            self_palette: palette::default_self()
        }
    }
}

/// Builds [`VisualArtifact`]s. Does no I/O, no axes are drawn.
pub struct Renderer<'a> {
    style: &'a RenderStyle
}
impl<'a> Renderer<'a> {
    pub fn new(style: &'a RenderStyle) -> Self { Self { style } }

    /// Figure of the raw observations (sequence number 0), all in the same size and color.
    pub fn render_observations<T: Primitive>(&self, observations: &[Point<T>]) -> VisualArtifact {
        let markers = observations.iter()
            .map(|o| self.marker(o, self.style.observation_radius, self.style.observation_color))
            .collect();
        VisualArtifact { sequence: 0, figure_size: self.style.figure_size, markers }
    }

    /// Figure of one iteration.
    ///
    /// Observations are colored by their assigned cluster, followed by the (larger) centroids in
    /// their own palette, so that the centroids are drawn on top.
    pub fn render_iteration<T: Primitive>(&self, sequence: usize, observations: &[Point<T>], centroids: &[Point<T>],
                                          assignment: &ClusterAssignment<T>) -> VisualArtifact {
        let style = self.style;
        let mut markers = Vec::with_capacity(observations.len() + centroids.len());
        markers.extend(observations.iter().zip(assignment.assignments.iter())
            .map(|(o, &ci)| self.marker(o, style.observation_radius, style.assigned_palette.color(ci))));
        markers.extend(centroids.iter().enumerate()
            .map(|(ci, c)| self.marker(c, style.centroid_radius, style.self_palette.color(ci))));
        VisualArtifact { sequence, figure_size: style.figure_size, markers }
    }

    fn marker<T: Primitive>(&self, p: &Point<T>, radius: f64, color: RGBColor) -> Marker {
        let (x, y) = p.to_f64();
        Marker { x, y, radius, color }
    }
}
