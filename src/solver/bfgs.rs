//! BFGS quasi-Newton method

use num_traits::{Float, Zero, One};
use core::fmt::{Debug, LowerExp};
use crate::solver::{LinAlg, Oracle, SolverError, SolverParam, Solution, Status, IterLog};
use crate::solver::line_search::backtrack_descent;
use crate::matbuild::identity;

/// BFGS quasi-Newton method.
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Minimizes a differentiable convex function without its Hessian.
/// The approximate Hessian starts from \\(H_0 = I\\) and is updated by
/// \\[
/// H \leftarrow H + {y y^T \over y^T s} - {H s s^T H \over s^T H s},
/// \\]
/// where \\(s = x_{k+1} - x_k\\) and \\(y = \nabla f(x_{k+1}) - \nabla f(x_k)\\).
/// An update with \\(y^T s \le\\) `eps_zero` is skipped to keep \\(H\\) positive definite.
///
/// Stops when \\(|f(x_k) - f(x_{k+1})| <\\) `eps`, or \\(\\|\nabla f(x_k)\\|_2 \le\\) `eps`,
/// or when the line search stalls with the predicted decrease not larger than `eps_round` relative to \\(|f(x_k)|\\).
pub struct Bfgs<L: LinAlg>
{
    /// solver parameters.
    pub par: SolverParam<L::F>,
}

impl<L: LinAlg> Bfgs<L>
{
    /// Creates an instance.
    pub fn new() -> Self
    {
        Bfgs {
            par: SolverParam::default(),
        }
    }

    /// Changes solver parameters.
    pub fn par<P>(mut self, f: P) -> Self
    where P: FnOnce(&mut SolverParam<L::F>)
    {
        f(&mut self.par);
        self
    }
}

impl<L: LinAlg> Default for Bfgs<L>
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl<L: LinAlg> Bfgs<L>
where L::F: Float + Debug + LowerExp
{
    /// Starts to solve an unconstrained problem.
    ///
    /// Returns `Ok` with [`Solution`] or `Err` with [`SolverError`] type.
    /// * `oracle` is \\(f\\); [`Oracle::hessian`] is not used.
    /// * `x0` is an initial point in the domain of \\(f\\).
    pub fn solve<O>(&self, oracle: &O, x0: &[L::F])
    -> Result<Solution<L::F>, SolverError>
    where O: Oracle<L> + ?Sized
    {
        let f0 = L::F::zero();
        let f1 = L::F::one();
        let n = oracle.dim();

        if x0.len() != n {
            log::error!("Size mismatch: x0 {}, dim {}", x0.len(), n);
            return Err(SolverError::InvalidOp);
        }

        log::debug!("{:?}", self.par);

        if !oracle.in_domain(x0) {
            log::error!("Initial point out of domain");
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

        let mut h = identity::<L>(n);
        let mut h_fact = vec![f0; n * n];
        let mut dx = vec![f0; n];
        let mut x_new = vec![f0; n];
        let mut g_new = vec![f0; n];
        let mut s = vec![f0; n];
        let mut y = vec![f0; n];
        let mut hs = vec![f0; n];
        let mut trace = Vec::new();

        log::info!("----- Started");
        let mut i = 0;
        loop {
            let log_trig = self.par.log_period > 0 && i % self.par.log_period == 0;

            let norm_g = L::norm(&g);
            let excess_iter = i >= self.par.max_iter;

            if log_trig || excess_iter {
                log::debug!("{}: value {:.6e} grad {:.2e}", i, f_x, norm_g);
            }
            else {
                log::trace!("{}: value {:.6e} grad {:.2e}", i, f_x, norm_g);
            }

            if norm_g <= self.par.eps {
                log::info!("----- Converged");
                return Ok(Solution::new(Status::Converged, x, Vec::new(), f_x, i, trace));
            }
            else if excess_iter {
                log::warn!("----- ExcessIter");
                return Ok(Solution::new(Status::ExcessIter, x, Vec::new(), f_x, i, trace));
            }

            // H dx = -g
            L::copy(&h, &mut h_fact);
            if let Err(e) = L::chol_decomp(n, &mut h_fact) {
                log::error!("{}: {}", i, e);
                return Err(e);
            }
            L::copy(&g, &mut dx);
            L::scale(-f1, &mut dx);
            L::chol_solve(n, &h_fact, 1, &mut dx);

            let slope = L::dot(&g, &dx);
            if !(slope < f0) {
                log::error!("{}: not a descent direction", i);
                return Err(SolverError::NumericalFailure);
            }

            let (t, f_new) = match backtrack_descent::<L, O>(&self.par, oracle, &x, f_x, slope, &dx, &mut x_new) {
                Ok(r) => r,
                Err(SolverError::LineSearchStall) if -slope <= self.par.eps_round * f_x.abs() => {
                    log::debug!("{}: value {:.6e} slope {:.2e} stalled", i, f_x, slope);
                    log::info!("----- Converged");
                    return Ok(Solution::new(Status::Converged, x, Vec::new(), f_x, i, trace));
                },
                Err(e) => {
                    log::error!("{}: {}", i, e);
                    return Err(e);
                },
            };

            oracle.gradient(&x_new, &mut g_new);
            if !g_new.iter().all(|v| v.is_finite()) {
                log::error!("{}: non-finite gradient", i);
                return Err(SolverError::NumericalFailure);
            }

            L::copy(&x_new, &mut s);
            L::add(-f1, &x, &mut s);
            L::copy(&g_new, &mut y);
            L::add(-f1, &g, &mut y);

            let ys = L::dot(&y, &s);
            if ys > self.par.eps_zero {
                L::transform_ge(false, n, n, f1, &h, &s, f0, &mut hs);
                let shs = L::dot(&s, &hs);

                L::rank1_ge(n, n, ys.recip(), &y, &y, &mut h);
                L::rank1_ge(n, n, -shs.recip(), &hs, &hs, &mut h);
            }
            else {
                log::debug!("{}: skipped update, curvature {:.2e}", i, ys);
            }

            let diff = (f_x - f_new).abs();
            core::mem::swap(&mut x, &mut x_new);
            core::mem::swap(&mut g, &mut g_new);
            f_x = f_new;

            trace.push(IterLog {
                value: f_x,
                crit: norm_g,
                step: t,
                pri_res: f0,
            });

            i += 1;

            if diff < self.par.eps {
                log::debug!("{}: value {:.6e} diff {:.2e}", i, f_x, diff);
                log::info!("----- Converged");
                return Ok(Solution::new(Status::Converged, x, Vec::new(), f_x, i, trace));
            }
        }
    }
}
