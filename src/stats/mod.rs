//! Statistics module - reductions and error estimation for sample series.

mod blocking;
mod reductions;

pub use blocking::{block, BlockingEstimate};
pub use reductions::{mean, standard_error, std_dev, variance, variance_population};
