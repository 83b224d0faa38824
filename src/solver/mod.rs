//! Solvers

mod solver_error;
mod linalg;
mod oracle;
mod param;
mod solution;
mod kkt;
pub mod line_search;
mod newton;
mod infeasible;
mod descent;
mod bfgs;
mod subgrad;
mod barrier;

pub use solver_error::*;
pub use linalg::*;
pub use oracle::*;
pub use param::*;
pub use solution::*;
pub use newton::*;
pub use infeasible::*;
pub use descent::*;
pub use bfgs::*;
pub use subgrad::*;
pub use barrier::*;
