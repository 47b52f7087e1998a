use crate::{
    backend::ClusteringBackend, codec, error::{Error, Result}, exporter::{ImageExport, ImageSize, Exporter},
    sampler::{self, DistributionSpec}, segmenter, NearestCentroid, Palette, Point, Primitive, RemainderStrategy,
    RenderStyle, Renderer, VisualArtifact
};
use log::{info, warn};
use plotters::style::RGBColor;
use rand::prelude::*;
use rayon::prelude::*;
use std::{cell::RefCell, ops::DerefMut, path::{Path, PathBuf}};

/// Distance metric used by the [`NearestCentroid`] classifier.
pub trait DistanceFunction<T: Primitive>: Sync + Send {
    fn distance(&self, a: &Point<T>, b: &Point<T>) -> T;
}

/// Progress of a running [`Pipeline`], as passed to the `stage_done` callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Observations were drawn, carries their count
    ObservationsGenerated(usize),
    /// The observation file was written (or the write failed with a warning)
    ObservationsWritten,
    /// The clustering backend returned successfully
    ClusteringDone,
    /// The centroid stream was read, carries the record count
    CentroidsRead(usize),
    /// All figures were rendered, carries the figure count
    Plotted(usize),
    /// All images were written, carries the count of successfully written files
    ImagesSaved(usize)
}

pub type StageDoneCallbackFn<'a> = &'a dyn Fn(Stage);

/// This is a structure holding all parameters of a [`Pipeline`] run: file locations, the observation mixture,
/// the visual style and the random number generator used for sampling.
///
/// For a more detailed information about all possible options, have a look at [`PipelineConfigBuilder`].
pub struct PipelineConfig<'a, T: Primitive> {
    /// Callback that is called after each pipeline stage
    pub(crate) stage_done: StageDoneCallbackFn<'a>,
    /// Random number generator to use for sampling observations
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    /// How to handle a centroid stream that does not split into whole iterations
    pub(crate) remainder_strategy: RemainderStrategy,
    pub(crate) distributions: Vec<DistributionSpec<T>>,
    pub(crate) cluster_count: usize,
    pub(crate) observations_path: PathBuf,
    pub(crate) centroids_path: PathBuf,
    pub(crate) exporter: Exporter,
    pub(crate) style: RenderStyle
}
impl<'a, T: Primitive> Default for PipelineConfig<'a, T> {
    fn default() -> Self {
        let t = |v: f64| T::from(v).unwrap_or_else(T::nan);
        Self {
            stage_done: &|_| {},
            rnd: Box::new(RefCell::new(rand::thread_rng())),
            remainder_strategy: RemainderStrategy::default(),
            distributions: vec![
                DistributionSpec::new((t(0.0), t(0.0)), (t(10.0), t(10.0)), 300),
                DistributionSpec::new((t(-20.0), t(20.0)), (t(5.0), t(5.0)), 100),
                DistributionSpec::new((t(20.0), t(20.0)), (t(5.0), t(5.0)), 100)
            ],
            cluster_count: 3,
            observations_path: PathBuf::from("../data/demo_observations.csv"),
            centroids_path: PathBuf::from("../data/demo_means.csv"),
            exporter: Exporter {
                directory: PathBuf::from("./visuals/"),
                name: "demo".to_string(),
                extension: ".png".to_string(),
                small_pixels: 300,
                large_pixels: 800
            },
            style: RenderStyle::default()
        }
    }
}
impl<'a, T: Primitive> PipelineConfig<'a, T> {
    /// Use the [`PipelineConfigBuilder`] to build a [`PipelineConfig`] instance.
    pub fn build() -> PipelineConfigBuilder<'a, T> {
        PipelineConfigBuilder { config: PipelineConfig::default() }
    }

    pub fn cluster_count(&self) -> usize { self.cluster_count }
    pub fn observations_path(&self) -> &Path { &self.observations_path }
    pub fn centroids_path(&self) -> &Path { &self.centroids_path }
    pub fn exporter(&self) -> &Exporter { &self.exporter }
    pub fn style(&self) -> &RenderStyle { &self.style }
}
impl<'a, T: Primitive> std::fmt::Debug for PipelineConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("remainder_strategy", &self.remainder_strategy)
            .field("distributions", &self.distributions)
            .field("cluster_count", &self.cluster_count)
            .field("observations_path", &self.observations_path)
            .field("centroids_path", &self.centroids_path)
            .field("exporter", &self.exporter)
            .field("style", &self.style)
            .finish()
    }
}

pub struct PipelineConfigBuilder<'a, T: Primitive> {
    config: PipelineConfig<'a, T>
}
impl<'a, T: Primitive> PipelineConfigBuilder<'a, T> {
    /// Set the callback that should be called after each stage of a running pipeline.
    pub fn stage_done(mut self, stage_done: StageDoneCallbackFn<'a>) -> Self {
        self.config.stage_done = stage_done; self
    }
    /// Set the random number generator that should be used to sample observations.
    /// Use a seeded generator for deterministically repeatable observations.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// Set the strategy for centroid streams with a partial trailing iteration.
    /// ## Default
    /// [`RemainderStrategy::Reject`]
    pub fn remainder_strategy(mut self, remainder_strategy: RemainderStrategy) -> Self {
        self.config.remainder_strategy = remainder_strategy; self
    }
    /// Set the gaussian components the observations are drawn from.
    pub fn distributions(mut self, distributions: Vec<DistributionSpec<T>>) -> Self {
        self.config.distributions = distributions; self
    }
    /// Set the amount of clusters (centroids per iteration).
    pub fn cluster_count(mut self, k: usize) -> Self {
        self.config.cluster_count = k; self
    }
    /// Set the file the observations are written to (input of the clustering backend).
    pub fn observations_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.observations_path = path.into(); self
    }
    /// Set the file the clustering backend writes the centroid stream to.
    pub fn centroids_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.centroids_path = path.into(); self
    }
    /// Set the (existing) directory images are written to.
    pub fn image_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.config.exporter.directory = directory.into(); self
    }
    /// Set the common file name prefix of all images.
    pub fn image_name(mut self, name: impl Into<String>) -> Self {
        self.config.exporter.name = name.into(); self
    }
    /// Set the image file extension (including the dot), which also selects the image format.
    pub fn image_extension(mut self, extension: impl Into<String>) -> Self {
        self.config.exporter.extension = extension.into(); self
    }
    /// Set the target pixel count of the largest image dimension, for small and large images.
    pub fn image_sizes(mut self, small: u32, large: u32) -> Self {
        self.config.exporter.small_pixels = small;
        self.config.exporter.large_pixels = large;
        self
    }
    /// Set the physical figure size (width, height) in inches.
    pub fn figure_size(mut self, width: f64, height: f64) -> Self {
        self.config.style.figure_size = (width, height); self
    }
    /// Set the marker radii (in points) of observations and centroids.
    pub fn marker_radii(mut self, observation: f64, centroid: f64) -> Self {
        self.config.style.observation_radius = observation;
        self.config.style.centroid_radius = centroid;
        self
    }
    /// Set the color of observations in the raw observation figure.
    pub fn observation_color(mut self, color: RGBColor) -> Self {
        self.config.style.observation_color = color; self
    }
    /// Set the palette of observations, indexed by assigned cluster.
    pub fn assigned_palette(mut self, palette: Palette) -> Self {
        self.config.style.assigned_palette = palette; self
    }
    /// Set the palette of the centroids, indexed by cluster.
    pub fn self_palette(mut self, palette: Palette) -> Self {
        self.config.style.self_palette = palette; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> PipelineConfig<'a, T> { self.config }
}


/// Summary of a finished [`Pipeline::run`].
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineReport {
    pub observations: usize,
    pub iterations: usize,
    pub exports: Vec<ImageExport>
}


/// Entrypoint of this crate's API-Surface.
///
/// A pipeline run generates observations, hands them to a [`ClusteringBackend`], reads back the
/// centroid stream and writes one figure for the observations plus one figure per iteration,
/// each in two resolutions.
///
/// ## Example
/// ```rust,no_run
/// use kmeans_visualizer::*;
/// use rand::prelude::*;
///
/// fn main() -> Result<()> {
///     let conf = PipelineConfig::<f64>::build()
///         .random_generator(StdRng::seed_from_u64(1337))
///         .image_directory("visuals")
///         .build();
///     let pipeline = Pipeline::new(conf, SquaredEuclideanDistance)?;
///     let report = pipeline.run(&ExternalProcess::new("../bin/kmeans-demo"))?;
///     println!("Wrote {} images", report.exports.len());
///     Ok(())
/// }
/// ```
pub struct Pipeline<'a, T: Primitive, D> {
    config: PipelineConfig<'a, T>,
    classifier: NearestCentroid<D>
}
impl<'a, T: Primitive, D: DistanceFunction<T>> Pipeline<'a, T, D> {
    /// Create a new pipeline, classifying observations for coloring with the **distance** metric.
    ///
    /// ## Errors
    /// [`Error::InvalidParameter`] for a zero cluster count, zero image sizes, a non-positive figure size
    /// or negative marker radii.
    pub fn new(config: PipelineConfig<'a, T>, distance: D) -> Result<Self> {
        if config.cluster_count == 0 {
            return Err(Error::invalid("cluster_count", "must be > 0"));
        }
        if config.exporter.small_pixels == 0 || config.exporter.large_pixels == 0 {
            return Err(Error::invalid("image_sizes", "target pixel sizes must be > 0"));
        }
        let (w, h) = config.style.figure_size;
        if !(w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite()) {
            return Err(Error::invalid("figure_size", format!("must be positive, got {}x{}", w, h)));
        }
        let radii = [config.style.observation_radius, config.style.centroid_radius];
        if !radii.iter().all(|r| *r >= 0.0 && r.is_finite()) {
            return Err(Error::invalid("marker_radii", format!("must be >= 0, got {:?}", radii)));
        }
        Ok(Self { config, classifier: NearestCentroid::new(distance) })
    }

    pub fn config(&self) -> &PipelineConfig<'a, T> { &self.config }

    /// Run all stages in order. Each stage completes before the next one starts, the clustering
    /// backend is called blocking.
    ///
    /// ## Errors
    /// - Invalid distributions (see [`sampler::sample`])
    /// - Any error of the clustering backend
    /// - [`Error::EmptyCentroidStream`] when the backend produced no centroids
    /// - [`Error::StructuralMismatch`] for a partial trailing iteration, depending on the [`RemainderStrategy`]
    ///
    /// Failing to write the observation file or single images is only reported as warning.
    pub fn run<B: ClusteringBackend + ?Sized>(&self, backend: &B) -> Result<PipelineReport> {
        let conf = &self.config;

        info!("Generating observations...");
        let observations = self.generate()?;
        (conf.stage_done)(Stage::ObservationsGenerated(observations.len()));

        info!("Saving to CSV...");
        if let Err(e) = codec::write_points(&observations, &conf.observations_path) {
            warn!("Could not open file for writing: {}", e);
        }
        (conf.stage_done)(Stage::ObservationsWritten);

        info!("Running kmeans...");
        backend.run(conf.cluster_count, &conf.observations_path, &conf.centroids_path)?;
        (conf.stage_done)(Stage::ClusteringDone);

        info!("Reading output...");
        let centroids = codec::read_points::<T>(&conf.centroids_path);
        if centroids.is_empty() {
            return Err(Error::EmptyCentroidStream { path: conf.centroids_path.clone() });
        }
        (conf.stage_done)(Stage::CentroidsRead(centroids.len()));

        info!("Plotting data...");
        let artifacts = self.visualize(&observations, &centroids)?;
        (conf.stage_done)(Stage::Plotted(artifacts.len()));

        info!("Saving images...");
        let exports = self.save_images(&artifacts);
        (conf.stage_done)(Stage::ImagesSaved(exports.len()));

        info!("Done! See {} for images.", conf.exporter.directory.display());
        Ok(PipelineReport { observations: observations.len(), iterations: artifacts.len() - 1, exports })
    }

    /// Draw a new observation set, using the configured random generator.
    pub fn generate(&self) -> Result<Vec<Point<T>>> {
        let mut rnd = self.config.rnd.borrow_mut();
        sampler::sample(&self.config.distributions, rnd.deref_mut())
    }

    /// Render the observation figure (sequence number 0), followed by one figure per iteration of the
    /// **centroids** stream (sequence numbers 1..N).
    ///
    /// Iterations are classified and rendered in parallel, the result is in iteration order.
    pub fn visualize(&self, observations: &[Point<T>], centroids: &[Point<T>]) -> Result<Vec<VisualArtifact>> {
        let k = self.config.cluster_count;
        self.config.remainder_strategy.check(centroids.len(), k)?;
        let iterations = segmenter::segment(centroids, k)?;

        let renderer = Renderer::new(&self.config.style);
        let classifier = &self.classifier;
        let mut artifacts = Vec::with_capacity(iterations.len() + 1);
        artifacts.push(renderer.render_observations(observations));
        artifacts.extend(iterations.par_iter().enumerate()
            .map(|(i, iteration)| {
                let assignment = classifier.assign(observations, iteration)?;
                Ok(renderer.render_iteration(i + 1, observations, iteration, &assignment))
            })
            .collect::<Result<Vec<_>>>()?);
        Ok(artifacts)
    }

    /// Write every artifact in small and large resolution. Images that fail to be written are
    /// reported as warning and skipped.
    pub fn save_images(&self, artifacts: &[VisualArtifact]) -> Vec<ImageExport> {
        let exporter = &self.config.exporter;
        let jobs: Vec<_> = artifacts.iter()
            .flat_map(|a| ImageSize::ALL.into_iter().map(move |size| (a, size)))
            .collect();
        jobs.par_iter()
            .map(|&(a, size)| exporter.export_size(a, size))
            .collect::<Vec<_>>()
            .into_iter()
            .filter_map(|result| match result {
                Ok(export) => Some(export),
                Err(e) => { warn!("{}", e); None }
            })
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::SquaredEuclideanDistance;
    use std::cell::Cell;

    #[test]
    fn default_configuration() {
        let conf = PipelineConfig::<f64>::default();
        assert_eq!(conf.cluster_count(), 3);
        assert_eq!(conf.distributions.iter().map(|d| d.count).sum::<usize>(), 500);
        assert_eq!(conf.exporter().small_pixels, 300);
        assert_eq!(conf.exporter().large_pixels, 800);
        assert_eq!(conf.exporter().path(ImageSize::Large, 2), Path::new("./visuals/").join("demo_large2.png"));
        assert_eq!(conf.remainder_strategy, RemainderStrategy::Reject);
    }

    #[test] fn default_distributions_f32() { default_distributions::<f32>(); }
    #[test] fn default_distributions_f64() { default_distributions::<f64>(); }

    fn default_distributions<T: Primitive>() {
        let conf = PipelineConfig::<T>::default();
        let first = &conf.distributions[0];
        assert_eq!(first.mean, Point::new(T::zero(), T::zero()));
        assert_approx_eq!(first.stddev.x, T::from(10.0).unwrap(), T::epsilon());
        let second = &conf.distributions[1];
        assert_approx_eq!(second.mean.x, T::from(-20.0).unwrap(), T::epsilon());
        assert_approx_eq!(second.mean.y, T::from(20.0).unwrap(), T::epsilon());
        assert!(conf.distributions.iter().all(|d| d.mean.x.is_finite() && d.stddev.y.is_finite()));
    }

    #[test]
    fn invalid_configurations() {
        let build = || PipelineConfig::<f64>::build();
        assert!(Pipeline::new(build().cluster_count(0).build(), SquaredEuclideanDistance).is_err());
        assert!(Pipeline::new(build().image_sizes(0, 800).build(), SquaredEuclideanDistance).is_err());
        assert!(Pipeline::new(build().figure_size(0.0, 4.8).build(), SquaredEuclideanDistance).is_err());
        assert!(Pipeline::new(build().marker_radii(-1.0, 7.0).build(), SquaredEuclideanDistance).is_err());
        assert!(Pipeline::new(build().build(), SquaredEuclideanDistance).is_ok());
    }

    #[test] fn seeded_generation_f32() { seeded_generation::<f32>(); }
    #[test] fn seeded_generation_f64() { seeded_generation::<f64>(); }

    fn seeded_generation<T: Primitive>() {
        let pipeline = |seed| Pipeline::new(
            PipelineConfig::<T>::build().random_generator(StdRng::seed_from_u64(seed)).build(),
            SquaredEuclideanDistance
        ).unwrap();
        let (a, b) = (pipeline(1337), pipeline(1337));
        let first = a.generate().unwrap();
        assert_eq!(first.len(), 500);
        assert_eq!(first, b.generate().unwrap());
        // the generator keeps its state between runs
        assert_ne!(first, a.generate().unwrap());
    }

    #[test]
    fn visualize_iterations() {
        let pipeline = Pipeline::new(PipelineConfig::<f64>::build().cluster_count(2).build(), SquaredEuclideanDistance).unwrap();
        let observations = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let centroids = vec![
            Point::new(1.0, 0.0), Point::new(2.0, 0.0),
            Point::new(0.0, 0.0), Point::new(10.0, 0.0),
            Point::new(9.0, 0.0), Point::new(1.0, 0.0)
        ];
        let artifacts = pipeline.visualize(&observations, &centroids).unwrap();
        assert_eq!(artifacts.iter().map(|a| a.sequence).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(artifacts[0].markers.len(), 2);
        let style = pipeline.config().style();
        for a in &artifacts[1..] {
            assert_eq!(a.markers.len(), 4);
        }
        assert_eq!(artifacts[1].markers[1].color, style.assigned_palette.color(1));
        assert_eq!(artifacts[2].markers[1].color, style.assigned_palette.color(1));
        assert_eq!(artifacts[3].markers[0].color, style.assigned_palette.color(1));
        assert_eq!(artifacts[3].markers[1].color, style.assigned_palette.color(0));
    }

    #[test]
    fn visualize_remainder() {
        let observations = vec![Point::new(0.0, 0.0)];
        let centroids = vec![Point::new(0.0f64, 0.0); 7];
        let pipeline = |strategy| Pipeline::new(
            PipelineConfig::<f64>::build().cluster_count(3).remainder_strategy(strategy).build(),
            SquaredEuclideanDistance
        ).unwrap();
        assert!(matches!(pipeline(RemainderStrategy::Reject).visualize(&observations, &centroids),
            Err(Error::StructuralMismatch { len: 7, k: 3 })));
        assert_eq!(pipeline(RemainderStrategy::Drop).visualize(&observations, &centroids).unwrap().len(), 3);
        assert_eq!(pipeline(RemainderStrategy::Warn).visualize(&observations, &centroids).unwrap().len(), 3);
    }

    #[test]
    fn stage_callback() {
        struct Failing;
        impl ClusteringBackend for Failing {
            fn run(&self, _: usize, _: &Path, output: &Path) -> Result<()> {
                Err(Error::MissingOutput { path: output.to_path_buf() })
            }
        }
        let dir = tempfile::tempdir().unwrap();
        let stages = Cell::new(0);
        let callback = |_: Stage| stages.set(stages.get() + 1);
        let conf = PipelineConfig::<f64>::build()
            .stage_done(&callback)
            .observations_path(dir.path().join("obs.csv"))
            .centroids_path(dir.path().join("means.csv"))
            .build();
        let pipeline = Pipeline::new(conf, SquaredEuclideanDistance).unwrap();
        assert!(matches!(pipeline.run(&Failing), Err(Error::MissingOutput { .. })));
        assert_eq!(stages.get(), 2);
        assert_eq!(codec::read_points::<f64>(&dir.path().join("obs.csv")).len(), 500);
    }
}
