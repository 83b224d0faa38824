//! Problem oracles

mod entropy;
mod huber;
mod poisson;
mod chebyshev;
mod l1reg;

pub use entropy::*;
pub use huber::*;
pub use poisson::*;
pub use chebyshev::*;
pub use l1reg::*;
