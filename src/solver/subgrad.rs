//! Subgradient method

use num_traits::{Float, Zero, NumCast};
use core::fmt::{Debug, LowerExp};
use crate::solver::{LinAlg, Oracle, SolverError, SubgradParam, Solution, Status, IterLog};

/// Subgradient method with diminishing step size.
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Iterates \\(x_{i+1} = x_i - {c \over i} g_i\\) with any subgradient \\(g_i \in \partial f(x_i)\\),
/// for \\(i = 1, 2, \ldots\\), and returns the best iterate found.
/// As the objective does not necessarily decrease, no line search is made
/// and \\({\bf dom} f = \mathbb{R}^n\\) is assumed.
///
/// The status is [`Status::Converged`] only if a zero subgradient is met;
/// otherwise the run ends with [`Status::ExcessIter`] after `max_iter` iterations.
pub struct Subgrad<L: LinAlg>
{
    /// solver parameters.
    pub par: SubgradParam<L::F>,
}

impl<L: LinAlg> Subgrad<L>
{
    /// Creates an instance.
    pub fn new() -> Self
    {
        Subgrad {
            par: SubgradParam::default(),
        }
    }

    /// Changes solver parameters.
    pub fn par<P>(mut self, f: P) -> Self
    where P: FnOnce(&mut SubgradParam<L::F>)
    {
        f(&mut self.par);
        self
    }
}

impl<L: LinAlg> Default for Subgrad<L>
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl<L: LinAlg> Subgrad<L>
where L::F: Float + Debug + LowerExp
{
    /// Starts to minimize a convex function.
    ///
    /// Returns `Ok` with [`Solution`] of the best iterate, whose `trace` records the best value so far,
    /// or `Err` with [`SolverError`] type.
    /// * `oracle` is \\(f\\) with a subgradient given by [`Oracle::gradient`].
    /// * `x0` is an initial point.
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

        let mut x = x0.to_vec();
        let mut f_x = oracle.value(&x);
        let mut g = vec![f0; n];
        let mut best_x = x.clone();
        let mut best_f = f_x;
        let mut trace = Vec::new();

        log::info!("----- Started");
        for i in 1..= self.par.max_iter {
            let log_trig = self.par.log_period > 0 && i % self.par.log_period == 0;

            oracle.gradient(&x, &mut g);
            if !g.iter().all(|v| v.is_finite()) {
                log::error!("{}: non-finite subgradient", i);
                return Err(SolverError::NumericalFailure);
            }

            if L::norm_inf(&g) == f0 {
                // x is optimal
                log::debug!("{}: value {:.6e} zero subgradient", i, f_x);
                log::info!("----- Converged");
                return Ok(Solution::new(Status::Converged, x, Vec::new(), f_x, i - 1, trace));
            }

            let step = self.par.step / <L::F as NumCast>::from(i).unwrap_or_else(L::F::max_value);
            L::add(-step, &g, &mut x);
            f_x = oracle.value(&x);

            if f_x < best_f {
                best_f = f_x;
                L::copy(&x, &mut best_x);
            }

            if log_trig {
                log::debug!("{}: value {:.6e} best {:.6e}", i, f_x, best_f);
            }
            else {
                log::trace!("{}: value {:.6e} best {:.6e}", i, f_x, best_f);
            }

            trace.push(IterLog {
                value: f_x,
                crit: best_f,
                step,
                pri_res: f0,
            });
        }

        log::warn!("----- ExcessIter");
        Ok(Solution::new(Status::ExcessIter, best_x, Vec::new(), best_f, self.par.max_iter, trace))
    }
}
