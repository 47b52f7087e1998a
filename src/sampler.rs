use crate::{error::{Error, Result}, Point, Primitive};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// One gaussian component of the observation mixture.
///
/// ## Fields
/// - **mean**: Per-axis mean of the component
/// - **stddev**: Per-axis standard deviation of the component
/// - **count**: Amount of samples drawn from this component
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistributionSpec<T: Primitive> {
    pub mean: Point<T>,
    pub stddev: Point<T>,
    pub count: usize
}
impl<T: Primitive> DistributionSpec<T> {
    pub fn new(mean: (T, T), stddev: (T, T), count: usize) -> Self {
        Self { mean: mean.into(), stddev: stddev.into(), count }
    }
}

fn axis_distribution<T: Primitive>(name: &'static str, mean: T, stddev: T) -> Result<impl Distribution<f64>> {
    let (mean, stddev) = (mean.to_f64().unwrap_or(f64::NAN), stddev.to_f64().unwrap_or(f64::NAN));
    if !mean.is_finite() {
        return Err(Error::invalid(name, format!("mean must be finite, got {}", mean)));
    }
    if !(stddev >= 0.0) || !stddev.is_finite() {
        return Err(Error::invalid(name, format!("standard deviation must be finite and >= 0, got {}", stddev)));
    }
    Normal::new(mean, stddev).map_err(|e| Error::invalid(name, format!("{:?}", e)))
}

/// Draw the observation set of a gaussian mixture.
///
/// Each spec contributes `count` samples, where both axes are drawn independently. Samples are
/// concatenated in spec order, then in draw order. The caller provides the random generator, so
/// a seeded generator yields a reproducible observation set.
///
/// ## Errors
/// [`Error::InvalidParameter`] when a mean is not finite or a standard deviation is negative / not finite.
/// Nothing is drawn in that case.
pub fn sample<T: Primitive, R: Rng + ?Sized>(specs: &[DistributionSpec<T>], rnd: &mut R) -> Result<Vec<Point<T>>> {
    let axes = specs.iter()
        .map(|spec| Ok((
            axis_distribution("distribution.x", spec.mean.x, spec.stddev.x)?,
            axis_distribution("distribution.y", spec.mean.y, spec.stddev.y)?,
            spec.count
        )))
        .collect::<Result<Vec<_>>>()?;

    let mut observations = Vec::with_capacity(specs.iter().map(|s| s.count).sum());
    for (nx, ny, count) in axes {
        for _ in 0..count {
            let (x, y): (f64, f64) = (nx.sample(rnd), ny.sample(rnd));
            observations.push(Point::new(T::from(x).unwrap_or_else(T::nan), T::from(y).unwrap_or_else(T::nan)));
        }
    }
    Ok(observations)
}
