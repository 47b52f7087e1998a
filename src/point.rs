use num::{NumCast, Zero, Float};
use std::{
    fmt::{Debug, Display, LowerExp}, iter::Sum, ops::{Add, AddAssign, Sub, SubAssign}, str::FromStr
};

/// Primitive type used for point coordinates.
/// Implemented for [`f32`] and [`f64`].
pub trait Primitive: Add + AddAssign + Sum + Sub + SubAssign + Zero + Float + NumCast + FromStr
                + PartialOrd + Copy + Default + Display + Debug + Sync + Send + LowerExp + 'static {}
impl Primitive for f32 {}
impl Primitive for f64 {}


/// A two-dimensional point.
///
/// Observations and centroids share this type, their role only depends on the collection
/// they are stored in.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point<T: Primitive> {
    pub x: T,
    pub y: T
}
impl<T: Primitive> Point<T> {
    pub fn new(x: T, y: T) -> Self { Self { x, y } }

    /// Lossy conversion into `f64` coordinates, as used by the renderer.
    pub fn to_f64(&self) -> (f64, f64) {
        (self.x.to_f64().unwrap_or(f64::NAN), self.y.to_f64().unwrap_or(f64::NAN))
    }
}
impl<T: Primitive> From<(T, T)> for Point<T> {
    fn from((x, y): (T, T)) -> Self { Self { x, y } }
}
