//! Infeasible start Newton's method

use num_traits::{Float, Zero, One};
use core::fmt::{Debug, LowerExp};
use crate::solver::{LinAlg, Oracle, SolverError, SolverParam, Solution, Status, IterLog};
use crate::solver::line_search::backtrack_residual;
use crate::solver::kkt::kkt_solve;
use crate::matbuild::MatBuild;

/// Infeasible start Newton's method.
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Solves the same problem as [`crate::solver::Newton`]
/// from an initial point which is in the domain of \\(f\\) but need not satisfy \\(Ax=b\\).
/// It drives the residual
/// \\[
/// r(x, \lambda) = \left[ \begin{array}{c} \nabla f(x) + A^T \lambda \\\\ A x - b \end{array} \right]
/// \\]
/// to zero, with a line search on \\(\\|r\\|\\).
/// Only the primal variable \\(x\\) is checked against the domain.
pub struct InfeasibleNewton<L: LinAlg>
{
    /// solver parameters.
    pub par: SolverParam<L::F>,
}

impl<L: LinAlg> InfeasibleNewton<L>
{
    /// Creates an instance.
    pub fn new() -> Self
    {
        InfeasibleNewton {
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

impl<L: LinAlg> Default for InfeasibleNewton<L>
{
    fn default() -> Self
    {
        Self::new()
    }
}

// dual residual and primal residual at (x, lmd)
fn residual<L, O>(oracle: &O, mat_a: &MatBuild<L>, vec_b: &[L::F],
    x: &[L::F], lmd: &[L::F], r_dual: &mut[L::F], r_pri: &mut[L::F])
-> L::F
where L: LinAlg, O: Oracle<L> + ?Sized
{
    let f1 = L::F::one();

    oracle.gradient(x, r_dual);
    mat_a.trans_op(f1, lmd, f1, r_dual);

    L::copy(vec_b, r_pri);
    mat_a.op(f1, x, -f1, r_pri);

    L::norm(r_dual).hypot(L::norm(r_pri))
}

impl<L: LinAlg> InfeasibleNewton<L>
where L::F: Float + Debug + LowerExp
{
    /// Starts to solve an equality constrained problem.
    ///
    /// Returns `Ok` with [`Solution`], whose `dual` is \\(\lambda\\)
    /// and whose `trace` records \\(\\|r\\|\\) and \\(\\|Ax-b\\|\\) of each iteration,
    /// or `Err` with [`SolverError`] type.
    /// * `oracle` is \\(f\\).
    /// * `mat_a` is \\(A\\).
    /// * `vec_b` is \\(b\\).
    /// * `x0` is an initial point in the domain of \\(f\\).
    /// * `lmd0` is an initial dual variable, zeros if `None`.
    pub fn solve<O>(&self, oracle: &O, mat_a: &MatBuild<L>, vec_b: &[L::F], x0: &[L::F], lmd0: Option<&[L::F]>)
    -> Result<Solution<L::F>, SolverError>
    where O: Oracle<L> + ?Sized
    {
        let f0 = L::F::zero();
        let f1 = L::F::one();
        let n = oracle.dim();
        let (p, n_a) = mat_a.size();

        if x0.len() != n || n_a != n || vec_b.len() != p || lmd0.map_or(false, |l| l.len() != p) {
            log::error!("Size mismatch: x0 {}, mat_a{:?}, vec_b {}, dim {}", x0.len(), mat_a.size(), vec_b.len(), n);
            return Err(SolverError::InvalidOp);
        }

        log::debug!("{:?}", self.par);

        if !oracle.in_domain(x0) {
            log::error!("Initial point out of domain");
            return Err(SolverError::InvalidInit);
        }

        let mut x = x0.to_vec();
        let mut lmd = lmd0.map_or_else(|| vec![f0; p], |l| l.to_vec());
        let mut r_dual = vec![f0; n];
        let mut r_pri = vec![f0; p];

        let mut norm_r = residual(oracle, mat_a, vec_b, &x, &lmd, &mut r_dual, &mut r_pri);
        if !norm_r.is_finite() {
            log::error!("Non-finite residual at initial point");
            return Err(SolverError::InvalidInit);
        }

        let mut g = vec![f0; n];
        let mut dx = vec![f0; n];
        let mut dlmd = vec![f0; p];
        let mut x_new = vec![f0; n];
        let mut lmd_new = vec![f0; p];
        let mut trace = Vec::new();

        log::info!("----- Started");
        let mut i = 0;
        loop {
            let log_trig = self.par.log_period > 0 && i % self.par.log_period == 0;

            let pri_res = L::norm(&r_pri);
            let term_conv = pri_res < self.par.eps && norm_r < self.par.eps;
            let excess_iter = i >= self.par.max_iter;

            if log_trig || term_conv || excess_iter {
                log::debug!("{}: res {:.2e} pri {:.2e}", i, norm_r, pri_res);
            }
            else {
                log::trace!("{}: res {:.2e} pri {:.2e}", i, norm_r, pri_res);
            }

            if term_conv || excess_iter {
                let f_x = oracle.value(&x);

                if term_conv {
                    log::info!("----- Converged");
                    return Ok(Solution::new(Status::Converged, x, lmd, f_x, i, trace));
                }
                else {
                    log::warn!("----- ExcessIter");
                    return Ok(Solution::new(Status::ExcessIter, x, lmd, f_x, i, trace));
                }
            }

            // (dx, lmd + dlmd) solves the KKT system with the primal residual
            oracle.gradient(&x, &mut g);
            if let Err(e) = kkt_solve::<L, O>(oracle, &x, mat_a, &g, Some(&r_pri), &mut dx, &mut dlmd) {
                log::error!("{}: {}", i, e);
                return Err(e);
            }
            L::add(-f1, &lmd, &mut dlmd);

            let (t, _) = {
                let mut rd = vec![f0; n];
                let mut rp = vec![f0; p];
                backtrack_residual::<L, O, _>(&self.par, oracle,
                    &x, &dx, &lmd, &dlmd, norm_r,
                    |xc, lc| residual(oracle, mat_a, vec_b, xc, lc, &mut rd, &mut rp),
                    &mut x_new, &mut lmd_new)?
            };
            core::mem::swap(&mut x, &mut x_new);
            core::mem::swap(&mut lmd, &mut lmd_new);

            norm_r = residual(oracle, mat_a, vec_b, &x, &lmd, &mut r_dual, &mut r_pri);

            trace.push(IterLog {
                value: oracle.value(&x),
                crit: norm_r,
                step: t,
                pri_res: L::norm(&r_pri),
            });

            i += 1;
        }
    }
}
