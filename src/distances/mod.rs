mod manhattan;
mod squaredeuclidean;

pub use manhattan::ManhattanDistance;
pub use squaredeuclidean::SquaredEuclideanDistance;
