use crate::{error::{Error, Result}, VisualArtifact};
use log::debug;
use plotters::{coord::Shift, prelude::*};
use std::path::PathBuf;

/// Typographic points per inch. Marker radii are given in points.
const POINTS_PER_INCH: f64 = 72.0;

/// The two export resolutions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageSize {
    Small,
    Large
}
impl ImageSize {
    pub const ALL: [ImageSize; 2] = [ImageSize::Small, ImageSize::Large];

    pub fn tag(&self) -> &'static str {
        match self {
            ImageSize::Small => "small",
            ImageSize::Large => "large"
        }
    }
}

/// One written image file.
///
/// ## Fields
/// - **path**: Location of the written file
/// - **size**: Which of the two resolutions this is
/// - **dpi**: Resolution (pixels per inch) the figure was rasterized with
/// - **pixels**: (width, height) of the image in pixels
#[derive(Clone, Debug, PartialEq)]
pub struct ImageExport {
    pub path: PathBuf,
    pub size: ImageSize,
    pub dpi: f64,
    pub pixels: (u32, u32)
}

/// Resolution that maps the largest physical dimension of **figure_size** onto **target_pixels**.
pub fn resolution(target_pixels: u32, figure_size: (f64, f64)) -> f64 {
    target_pixels as f64 / figure_size.0.max(figure_size.1)
}

/// Writes each [`VisualArtifact`] as a small and a large image.
///
/// Files are named `<directory>/<name>_<small|large><sequence><extension>`. Existing files are
/// overwritten, the directory has to exist. An `.svg` extension produces vector output, every other
/// extension is rasterized (format chosen by extension).
#[derive(Clone, Debug)]
pub struct Exporter {
    pub directory: PathBuf,
    pub name: String,
    pub extension: String,
    pub small_pixels: u32,
    pub large_pixels: u32
}
impl Exporter {
    pub fn target_pixels(&self, size: ImageSize) -> u32 {
        match size {
            ImageSize::Small => self.small_pixels,
            ImageSize::Large => self.large_pixels
        }
    }

    pub fn path(&self, size: ImageSize, sequence: usize) -> PathBuf {
        self.directory.join(format!("{}_{}{}{}", self.name, size.tag(), sequence, self.extension))
    }

    /// Write the small and the large image of **artifact**.
    pub fn export(&self, artifact: &VisualArtifact) -> Result<Vec<ImageExport>> {
        ImageSize::ALL.iter()
            .map(|&size| self.export_size(artifact, size))
            .collect()
    }

    /// Write a single image of **artifact**.
    pub fn export_size(&self, artifact: &VisualArtifact, size: ImageSize) -> Result<ImageExport> {
        let (w, h) = artifact.figure_size;
        if !(w > 0.0 && h > 0.0) {
            return Err(Error::invalid("figure_size", format!("must be positive, got {}x{}", w, h)));
        }
        let dpi = resolution(self.target_pixels(size), artifact.figure_size);
        let pixels = (((w * dpi).round() as u32).max(1), ((h * dpi).round() as u32).max(1));
        let path = self.path(size, artifact.sequence);
        debug!("Writing {} ({}x{} px, {:.2} dpi)", path.display(), pixels.0, pixels.1, dpi);

        let is_svg = self.extension.trim_start_matches('.').eq_ignore_ascii_case("svg");
        let drawn = if is_svg {
            draw(SVGBackend::new(&path, pixels).into_drawing_area(), artifact, dpi)
        } else {
            draw(BitMapBackend::new(&path, pixels).into_drawing_area(), artifact, dpi)
        };
        drawn.map_err(|message| Error::Render { path: path.clone(), message })?;
        Ok(ImageExport { path, size, dpi, pixels })
    }
}

fn draw<DB: DrawingBackend>(root: DrawingArea<DB, Shift>, artifact: &VisualArtifact, dpi: f64) -> std::result::Result<(), String> {
    let (x_range, y_range) = artifact.bounds();
    root.fill(&WHITE).map_err(|e| e.to_string())?;
    {
        let mut chart = ChartBuilder::on(&root)
            .margin(0)
            .build_cartesian_2d(x_range, y_range)
            .map_err(|e| e.to_string())?;
        chart.draw_series(artifact.markers.iter()
                .filter(|m| m.x.is_finite() && m.y.is_finite())
                .map(|m| Circle::new((m.x, m.y), pixel_radius(m.radius, dpi), m.color.filled())))
            .map_err(|e| e.to_string())?;
    }
    root.present().map_err(|e| e.to_string())
}

fn pixel_radius(radius: f64, dpi: f64) -> u32 {
    (radius * dpi / POINTS_PER_INCH).round().max(1.0) as u32
}
