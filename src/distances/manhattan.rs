use crate::{DistanceFunction, Point, Primitive};

/// Manhattan (L1) distance. Matches the `--distance-manhattan` mode of the external k-means program.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManhattanDistance;

impl<T: Primitive> DistanceFunction<T> for ManhattanDistance {
    #[inline(always)]
    fn distance(&self, a: &Point<T>, b: &Point<T>) -> T {
        (a.x - b.x).abs() + (a.y - b.y).abs()
    }
}
