//! # kmeans-visualizer - API documentation
//!
//! Kmeans-visualizer is a small rust library that turns the iteration history of a k-means run into
//! a series of images.
//!
//! ## Design target
//! The clustering itself is not done by this crate. It is delegated to an external program (see
//! [`ClusteringBackend`] / [`ExternalProcess`]), which reads a file of observations and writes the
//! cluster centers after every iteration, all concatenated into one file. This crate covers everything
//! around that: it draws synthetic observations from a gaussian mixture, writes and reads the exchanged
//! point files, splits the centroid stream into iterations, colors the observations by nearest centroid
//! and exports one figure per iteration in two resolutions.
//!
//! ## Pipeline
//! 1. Draw observations from the configured [`DistributionSpec`]s
//! 2. Write them to the observation file
//! 3. Run the clustering backend (blocking)
//! 4. Read the centroid stream, and split it into iterations of `k` centroids
//! 5. Render the raw observations (figure 0) and every iteration (figures 1..N)
//! 6. Write every figure as `<name>_small<N><ext>` and `<name>_large<N><ext>`
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust,no_run
//! use kmeans_visualizer::*;
//! use rand::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let conf = PipelineConfig::<f64>::build()
//!         .random_generator(StdRng::seed_from_u64(1337))
//!         .distributions(vec![
//!             DistributionSpec::new((0.0, 0.0), (10.0, 10.0), 300),
//!             DistributionSpec::new((-20.0, 20.0), (5.0, 5.0), 100),
//!         ])
//!         .cluster_count(2)
//!         .stage_done(&|stage| println!("{:?}", stage))
//!         .build();
//!
//!     let pipeline = Pipeline::new(conf, SquaredEuclideanDistance)?;
//!     let report = pipeline.run(&ExternalProcess::new("../bin/kmeans-demo").max_iterations(10))?;
//!     println!("{} iterations, {} images", report.iterations, report.exports.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`Pipeline`] struct, configured by a [`PipelineConfig`]. Its stages are
//! also available as separate building blocks:
//! - [`sampler::sample`]: Gaussian mixture sampling with an injectable random generator
//! - [`codec`]: Reading / writing point files
//! - [`segmenter::segment`]: Splitting a centroid stream into iterations
//! - [`NearestCentroid`]: Assigning observations to centroids, generic over the [`DistanceFunction`]
//! - [`Renderer`]: Building in-memory figures ([`VisualArtifact`])
//! - [`Exporter`]: Writing figures as image files

#[macro_use] mod helpers;
mod api;
mod backend;
mod classifier;
mod distances;
mod error;
mod exporter;
mod palette;
mod point;
mod remainder_strategy;
mod renderer;
pub mod codec;
pub mod sampler;
pub mod segmenter;

pub use api::{DistanceFunction, Pipeline, PipelineConfig, PipelineConfigBuilder, PipelineReport, Stage};
pub use backend::{ClusteringBackend, ExternalProcess};
pub use classifier::{ClusterAssignment, NearestCentroid};
pub use distances::{ManhattanDistance, SquaredEuclideanDistance};
pub use error::{Error, Result};
pub use exporter::{resolution, Exporter, ImageExport, ImageSize};
pub use palette::Palette;
pub use point::{Point, Primitive};
pub use remainder_strategy::RemainderStrategy;
pub use renderer::{Marker, RenderStyle, Renderer, VisualArtifact};
pub use sampler::DistributionSpec;

/// Re-exported color type of the palettes.
pub use plotters::style::RGBColor;
