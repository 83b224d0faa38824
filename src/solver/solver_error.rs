/// Solver errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolverError
{
    /// Size mismatch of supplied data.
    InvalidOp,
    /// Initial point outside the domain, infeasible, or with a non-finite gradient.
    InvalidInit,
    /// Breakdown of a linear solve or a non-finite value during iteration.
    NumericalFailure,
    /// Line search step length underflowed before its condition held.
    LineSearchStall,
    /// Hessian requested from an oracle that does not provide one.
    NoHessian,
}

impl core::fmt::Display for SolverError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", match &self {
            SolverError::InvalidOp        => "InvalidOp: size mismatch of supplied data",
            SolverError::InvalidInit      => "InvalidInit: initial point is not acceptable",
            SolverError::NumericalFailure => "NumericalFailure: singular system or non-finite value",
            SolverError::LineSearchStall  => "LineSearchStall: step length underflow in line search",
            SolverError::NoHessian        => "NoHessian: oracle does not provide a Hessian",
        })
    }
}

impl std::error::Error for SolverError {}
