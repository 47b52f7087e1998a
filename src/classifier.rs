use crate::{error::{Error, Result}, DistanceFunction, Point, Primitive};
use rayon::prelude::*;

/// Assignment of observations to the centroids of one iteration.
///
/// ## Fields
/// - **assignments**: Vector mapping each observation to the index of its nearest centroid
/// - **centroid_distances**: Vector containing each observation's distance to its assigned centroid
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterAssignment<T: Primitive> {
    pub assignments: Vec<usize>,
    pub centroid_distances: Vec<T>
}

/// Nearest-centroid classifier, used to color observations by cluster.
///
/// This is an independent recomputation from the reported centroid positions, it does not need to
/// agree with the assignment the external program made internally.
#[derive(Clone, Copy, Debug, Default)]
pub struct NearestCentroid<D> {
    distance: D
}
impl<D> NearestCentroid<D> {
    pub fn new(distance: D) -> Self { Self { distance } }
}
impl<D> NearestCentroid<D> {
    /// Assign every observation to the nearest of the given centroids.
    ///
    /// On equal distances, the centroid with the smallest index wins.
    ///
    /// ## Errors
    /// [`Error::InvalidParameter`] when **centroids** is empty.
    pub fn assign<T>(&self, observations: &[Point<T>], centroids: &[Point<T>]) -> Result<ClusterAssignment<T>>
            where T: Primitive, D: DistanceFunction<T> {
        if centroids.is_empty() {
            return Err(Error::invalid("centroids", "at least one centroid is required"));
        }
        let (assignments, centroid_distances) = observations.par_iter()
            .map(|o| self.nearest(o, centroids))
            .unzip();
        Ok(ClusterAssignment { assignments, centroid_distances })
    }

    fn nearest<T>(&self, observation: &Point<T>, centroids: &[Point<T>]) -> (usize, T)
            where T: Primitive, D: DistanceFunction<T> {
        let mut best = (0, self.distance.distance(observation, &centroids[0]));
        for (idx, c) in centroids.iter().enumerate().skip(1) {
            let dist = self.distance.distance(observation, c);
            // strict comparison keeps the first of equally distant centroids
            if dist < best.1 {
                best = (idx, dist);
            }
        }
        best
    }
}
