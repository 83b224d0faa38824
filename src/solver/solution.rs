use num_traits::Float;

/// Termination status of a converging run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Status
{
    /// Stopping criterion is satisfied.
    Converged,
    /// Max iteration number is exceeded; the last (or best) iterate is returned.
    ExcessIter,
}

/// Per-iteration record.
///
/// The meaning of `crit` and `step` depends on the method:
///
/// | method | `crit` | `step` |
/// |---|---|---|
/// | `Newton` | Newton decrement | step length |
/// | `InfeasibleNewton` | residual norm | step length |
/// | `Bfgs`, `GradDescent` | gradient norm | step length |
/// | `Subgrad` | best objective value | step size \\(c/i\\) |
/// | `Barrier` | duality gap bound \\(m/s\\) | barrier weight \\(s\\) |
#[derive(Debug, Clone, PartialEq)]
pub struct IterLog<F: Float>
{
    /// Objective value after the iteration.
    pub value: F,
    /// Stopping statistic of the iteration.
    pub crit: F,
    /// Step of the iteration.
    pub step: F,
    /// Primal residual \\(\\|Ax-b\\|\\) after the iteration, zero without equality constraints.
    pub pri_res: F,
}

/// Result of a solver.
#[derive(Debug, Clone)]
pub struct Solution<F: Float>
{
    /// Termination status.
    pub status: Status,
    /// Solution variable.
    pub x: Vec<F>,
    /// Dual variable: one value per equality constraint,
    /// or per inequality constraint for the barrier method.
    pub dual: Vec<F>,
    /// Objective value at `x`.
    pub value: F,
    /// Number of iterations (inner iterations in total for the barrier method).
    pub iter: usize,
    /// Number of centering steps of the barrier method, zero otherwise.
    pub outer: usize,
    /// Duality gap bound of the barrier method.
    pub gap: Option<F>,
    /// Records of iterations.
    pub trace: Vec<IterLog<F>>,
}

impl<F: Float> Solution<F>
{
    pub(crate) fn new(status: Status, x: Vec<F>, dual: Vec<F>, value: F, iter: usize, trace: Vec<IterLog<F>>) -> Self
    {
        Solution {
            status, x, dual, value, iter,
            outer: 0,
            gap: None,
            trace,
        }
    }
}
