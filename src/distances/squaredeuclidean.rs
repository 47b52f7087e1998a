use crate::{DistanceFunction, Point, Primitive};

/// Squared euclidean distance. Used as the default metric of the [`crate::NearestCentroid`] classifier.
#[derive(Clone, Copy, Debug, Default)]
pub struct SquaredEuclideanDistance;

impl<T: Primitive> DistanceFunction<T> for SquaredEuclideanDistance {
    #[inline(always)]
    fn distance(&self, a: &Point<T>, b: &Point<T>) -> T {
        let (dx, dy) = (a.x - b.x, a.y - b.y);
        dx * dx + dy * dy
    }
}
