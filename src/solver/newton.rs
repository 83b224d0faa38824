//! Feasible start Newton's method

use num_traits::{Float, Zero, One};
use core::fmt::{Debug, LowerExp};
use crate::solver::{LinAlg, Oracle, SolverError, SolverParam, Solution, Status, IterLog};
use crate::solver::line_search::backtrack_descent;
use crate::solver::kkt::kkt_solve;
use crate::matbuild::MatBuild;

/// Feasible start Newton's method.
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// This struct abstracts a solver of an equality constrained problem:
/// \\[
/// \begin{array}{ll}
/// {\rm minimize} & f(x) \\\\
/// {\rm subject \ to} & A x = b,
/// \end{array}
/// \\]
/// where
/// * \\(f\\) is a twice differentiable convex function given by [`Oracle`]
/// * \\( A \in \mathbb{R}^{p \times n} \\) of full row rank and \\( b \in \mathbb{R}^p \\).
///
/// The initial point shall satisfy \\(A x_0 = b\\).
/// Each Newton step \\(\Delta x\\) satisfies \\(A \Delta x = 0\\), so every iterate stays feasible.
/// Stops when the squared Newton decrement \\(\Delta x^T \nabla^2 f(x) \Delta x\\) is less than `eps`,
/// or when the line search stalls with the decrement not larger than `eps_round` relative to \\(|f(x)|\\).
pub struct Newton<L: LinAlg>
{
    /// solver parameters.
    pub par: SolverParam<L::F>,
}

impl<L: LinAlg> Newton<L>
{
    /// Creates an instance.
    ///
    /// Returns [`Newton`] instance.
    pub fn new() -> Self
    {
        Newton {
            par: SolverParam::default(),
        }
    }

    /// Changes solver parameters.
    ///
    /// Returns [`Newton`] with its parameters changed.
    /// * `f` is a function to change parameters given by its argument.
    pub fn par<P>(mut self, f: P) -> Self
    where P: FnOnce(&mut SolverParam<L::F>)
    {
        f(&mut self.par);
        self
    }
}

impl<L: LinAlg> Default for Newton<L>
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl<L: LinAlg> Newton<L>
where L::F: Float + Debug + LowerExp
{
    /// Starts to solve an unconstrained problem.
    ///
    /// Same as [`Newton::solve`] with \\(p=0\\).
    pub fn solve_unconstrained<O>(&self, oracle: &O, x0: &[L::F])
    -> Result<Solution<L::F>, SolverError>
    where O: Oracle<L> + ?Sized
    {
        let mat_a = MatBuild::new(0, oracle.dim());

        self.solve(oracle, &mat_a, &[], x0)
    }

    /// Starts to solve an equality constrained problem.
    ///
    /// Returns `Ok` with [`Solution`], whose `dual` is the multiplier \\(w\\) of \\(Ax=b\\)
    /// and whose `trace` records the Newton decrement and \\(\\|Ax-b\\|\\) of each iteration,
    /// or `Err` with [`SolverError`] type.
    /// * `oracle` is \\(f\\).
    /// * `mat_a` is \\(A\\).
    /// * `vec_b` is \\(b\\).
    /// * `x0` is a feasible initial point in the domain of \\(f\\).
    pub fn solve<O>(&self, oracle: &O, mat_a: &MatBuild<L>, vec_b: &[L::F], x0: &[L::F])
    -> Result<Solution<L::F>, SolverError>
    where O: Oracle<L> + ?Sized
    {
        let f0 = L::F::zero();
        let f1 = L::F::one();
        let n = oracle.dim();
        let (p, n_a) = mat_a.size();

        if x0.len() != n || n_a != n || vec_b.len() != p {
            log::error!("Size mismatch: x0 {}, mat_a{:?}, vec_b {}, dim {}", x0.len(), mat_a.size(), vec_b.len(), n);
            return Err(SolverError::InvalidOp);
        }

        log::debug!("{:?}", self.par);

        if !oracle.in_domain(x0) {
            log::error!("Initial point out of domain");
            return Err(SolverError::InvalidInit);
        }

        let mut r_pri = vec_b.to_vec();
        mat_a.op(f1, x0, -f1, &mut r_pri);
        let pri_res0 = L::norm(&r_pri);
        if !(pri_res0 <= self.par.eps_feas * (f1 + L::norm(vec_b))) {
            log::error!("Infeasible initial point: |Ax-b| {:.2e}", pri_res0);
            return Err(SolverError::InvalidInit);
        }

        let mut x = x0.to_vec();
        let mut f_x = oracle.value(&x);
        let mut g = vec![f0; n];
        oracle.gradient(&x, &mut g);
        if !f_x.is_finite() || !g.iter().all(|v| v.is_finite()) {
            log::error!("Non-finite value or gradient at initial point");
            return Err(SolverError::InvalidInit);
        }

        let mut dx = vec![f0; n];
        let mut w = vec![f0; p];
        let mut r_dual = vec![f0; n];
        let mut x_new = vec![f0; n];
        let mut trace = Vec::new();

        log::info!("----- Started");
        let mut i = 0;
        loop {
            let log_trig = self.par.log_period > 0 && i % self.par.log_period == 0;

            if let Err(e) = kkt_solve::<L, O>(oracle, &x, mat_a, &g, None, &mut dx, &mut w) {
                log::error!("{}: {}", i, e);
                return Err(e);
            }

            // dx^T H dx = -dx^T (g + A^T w), whose second factor vanishes at the optimum
            L::copy(&g, &mut r_dual);
            mat_a.trans_op(f1, &w, f1, &mut r_dual);
            let decr = -L::dot(&dx, &r_dual);
            if !decr.is_finite() {
                log::error!("{}: non-finite Newton decrement", i);
                return Err(SolverError::NumericalFailure);
            }

            let term_conv = decr < self.par.eps;
            let excess_iter = i >= self.par.max_iter;

            if log_trig || term_conv || excess_iter {
                log::debug!("{}: value {:.6e} decr {:.2e}", i, f_x, decr);
            }
            else {
                log::trace!("{}: value {:.6e} decr {:.2e}", i, f_x, decr);
            }

            if term_conv {
                log::info!("----- Converged");
                return Ok(Solution::new(Status::Converged, x, w, f_x, i, trace));
            }
            else if excess_iter {
                log::warn!("----- ExcessIter");
                return Ok(Solution::new(Status::ExcessIter, x, w, f_x, i, trace));
            }

            let (t, f_new) = match backtrack_descent::<L, O>(&self.par, oracle, &x, f_x, -decr, &dx, &mut x_new) {
                Ok(r) => r,
                Err(SolverError::LineSearchStall) if decr <= self.par.eps_round * f_x.abs() => {
                    // decrease below rounding noise of f
                    log::debug!("{}: value {:.6e} decr {:.2e} stalled", i, f_x, decr);
                    log::info!("----- Converged");
                    return Ok(Solution::new(Status::Converged, x, w, f_x, i, trace));
                },
                Err(e) => {
                    log::error!("{}: {}", i, e);
                    return Err(e);
                },
            };
            core::mem::swap(&mut x, &mut x_new);
            f_x = f_new;

            oracle.gradient(&x, &mut g);
            if !g.iter().all(|v| v.is_finite()) {
                log::error!("{}: non-finite gradient", i);
                return Err(SolverError::NumericalFailure);
            }

            L::copy(vec_b, &mut r_pri);
            mat_a.op(f1, &x, -f1, &mut r_pri);

            trace.push(IterLog {
                value: f_x,
                crit: decr,
                step: t,
                pri_res: L::norm(&r_pri),
            });

            i += 1;
        }
    }
}
