/*!
Newton, barrier, quasi-Newton and subgradient solvers for small dense convex optimization problems.

<script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
<script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>

# General usage

1. Express the objective of your problem as an [`solver::Oracle`]
   (value, gradient, and Hessian if any),
   or an inequality constrained problem as a [`solver::BarrierOracle`].
   Ready-made oracles are found in [`problem`].
1. Choose a [`solver::LinAlg`] implementation to use:
   [`FloatGeneric`] is `num::Float`-generic and written in pure Rust.
1. Construct matrices of the problem using [`MatBuild`].
1. Create a solver instance and optionally set its parameters:
   * [`solver::Newton`] - equality constrained, feasible start.
   * [`solver::InfeasibleNewton`] - equality constrained, infeasible start.
   * [`solver::Barrier`] - inequality constrained, by the log barrier.
   * [`solver::Bfgs`] - unconstrained, without a Hessian.
   * [`solver::GradDescent`] - unconstrained, with a gradient only.
   * [`solver::Subgrad`] - unconstrained and non-differentiable.
1. Invoke `solve` to get a [`solver::Solution`],
   whose [`solver::Status`] tells whether the stopping criterion was met.

# Examples

Entropy maximization:
\\[
\begin{array}{ll}
{\rm minimize} & x_0 \log x_0 + x_1 \log x_1 \\\\
{\rm subject \ to} & x_0 + x_1 = 1
\end{array}
\\]
The optimal solution is \\((0.5, 0.5)\\).

```
use float_eq::assert_float_eq;
use totsu_newton::prelude::*;
use totsu_newton::problem::ProbEntropy;

//env_logger::init(); // Use any logger crate as `totsu_newton` uses `log` crate.

type La = FloatGeneric<f64>;
type AMatBuild = MatBuild<La>;
type ASolver = Newton<La>;

let n = 2;
let p = 1;

let prob = ProbEntropy::<La>::new(n);

let mut mat_a = AMatBuild::new(p, n);
mat_a[(0, 0)] = 1.;
mat_a[(0, 1)] = 1.;

let vec_b = [1.];

let s = ASolver::new().par(|p| {
   p.max_iter = 100;
});
let rslt = s.solve(&prob, &mat_a, &vec_b, &[0.3, 0.7]).unwrap();

assert_eq!(rslt.status, Status::Converged);
assert_float_eq!(rslt.x.as_slice(), [0.5, 0.5].as_ref(), abs_all <= 1e-6);
```

## Other examples

You can find other tests of the problems in `tests/`.
*/

pub mod solver;
pub mod problem;

mod floatgeneric;
mod matbuild;
mod utils;

pub use floatgeneric::*;
pub use matbuild::*;

/// Prelude
pub mod prelude
{
    pub use crate::solver::{Newton, InfeasibleNewton, Barrier, Bfgs, Subgrad, GradDescent};
    pub use crate::solver::{SolverParam, BarrierParam, SubgradParam, Centering};
    pub use crate::solver::{SolverError, Solution, Status, IterLog};
    pub use crate::solver::{Oracle, BarrierOracle, LinAlg};
    pub use crate::{FloatGeneric, MatBuild};
}
