//! Gradient descent method

use num_traits::{Float, Zero, One};
use core::fmt::{Debug, LowerExp};
use crate::solver::{LinAlg, Oracle, SolverError, SolverParam, Solution, Status, IterLog};
use crate::solver::line_search::backtrack_descent;

/// Gradient descent method with backtracking line search.
///
/// Stops when \\(\\|\nabla f(x)\\|_2 \le\\) `eps`,
/// or when the line search stalls with \\(\\|\nabla f(x)\\|_2^2\\) not larger than `eps_round` relative to \\(|f(x)|\\).
pub struct GradDescent<L: LinAlg>
{
    /// solver parameters.
    pub par: SolverParam<L::F>,
}

impl<L: LinAlg> GradDescent<L>
{
    /// Creates an instance.
    pub fn new() -> Self
    {
        GradDescent {
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

impl<L: LinAlg> Default for GradDescent<L>
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl<L: LinAlg> GradDescent<L>
where L::F: Float + Debug + LowerExp
{
    /// Starts to solve an unconstrained problem.
    ///
    /// Returns `Ok` with [`Solution`] or `Err` with [`SolverError`] type.
    /// * `oracle` is \\(f\\).
    /// * `x0` is an initial point in the domain of \\(f\\).
    pub fn solve<O>(&self, oracle: &O, x0: &[L::F])
    -> Result<Solution<L::F>, SolverError>
    where O: Oracle<L> + ?Sized
    {
        let f0 = L::F::zero();
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

        let mut dx = vec![f0; n];
        let mut x_new = vec![f0; n];
        let mut trace = Vec::new();

        log::info!("----- Started");
        let mut i = 0;
        loop {
            let log_trig = self.par.log_period > 0 && i % self.par.log_period == 0;

            let norm_g = L::norm(&g);
            let term_conv = norm_g <= self.par.eps;
            let excess_iter = i >= self.par.max_iter;

            if log_trig || term_conv || excess_iter {
                log::debug!("{}: value {:.6e} grad {:.2e}", i, f_x, norm_g);
            }
            else {
                log::trace!("{}: value {:.6e} grad {:.2e}", i, f_x, norm_g);
            }

            if term_conv {
                log::info!("----- Converged");
                return Ok(Solution::new(Status::Converged, x, Vec::new(), f_x, i, trace));
            }
            else if excess_iter {
                log::warn!("----- ExcessIter");
                return Ok(Solution::new(Status::ExcessIter, x, Vec::new(), f_x, i, trace));
            }

            L::copy(&g, &mut dx);
            L::scale(-L::F::one(), &mut dx);

            let slope = -norm_g * norm_g;
            let (t, f_new) = match backtrack_descent::<L, O>(&self.par, oracle, &x, f_x, slope, &dx, &mut x_new) {
                Ok(r) => r,
                Err(SolverError::LineSearchStall) if -slope <= self.par.eps_round * f_x.abs() => {
                    log::debug!("{}: value {:.6e} grad {:.2e} stalled", i, f_x, norm_g);
                    log::info!("----- Converged");
                    return Ok(Solution::new(Status::Converged, x, Vec::new(), f_x, i, trace));
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

            trace.push(IterLog {
                value: f_x,
                crit: norm_g,
                step: t,
                pri_res: f0,
            });

            i += 1;
        }
    }
}
