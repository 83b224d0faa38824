//! Barrier method

use num_traits::{Float, Zero, NumCast};
use core::marker::PhantomData;
use core::fmt::{Debug, LowerExp};
use crate::solver::{LinAlg, Oracle, BarrierOracle, SolverError, BarrierParam, Centering, Solution, Status, IterLog};
use crate::solver::{Newton, GradDescent};

// barrier function with a fixed weight s, as an unconstrained objective
struct Centered<'a, L, B>
where L: LinAlg, B: BarrierOracle<L> + ?Sized
{
    ph_l: PhantomData<L>,
    prob: &'a B,
    s: L::F,
}

impl<'a, L, B> Oracle<L> for Centered<'a, L, B>
where L: LinAlg, B: BarrierOracle<L> + ?Sized
{
    fn dim(&self) -> usize
    {
        self.prob.dim()
    }

    fn in_domain(&self, z: &[L::F]) -> bool
    {
        self.prob.in_domain(z)
    }

    fn value(&self, z: &[L::F]) -> L::F
    {
        self.prob.value(self.s, z)
    }

    fn gradient(&self, z: &[L::F], g: &mut[L::F])
    {
        self.prob.gradient(self.s, z, g)
    }

    fn hessian(&self, z: &[L::F], h: &mut[L::F]) -> Result<(), SolverError>
    {
        self.prob.hessian(self.s, z, h)
    }

    fn hessian_solve(&self, z: &[L::F], nrhs: usize, b: &mut[L::F]) -> Result<(), SolverError>
    {
        self.prob.hessian_solve(self.s, z, nrhs, b)
    }
}

//

/// Barrier method.
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// This struct abstracts a solver of an inequality constrained problem given by [`BarrierOracle`].
/// Each centering step minimizes \\(s f_0(z) - \sum_{i=0}^{m-1} \log(-f_i(z))\\)
/// from the previous center, then \\(s\\) is multiplied by \\(\mu\\)
/// until the duality gap bound \\(m / s\\) is less than `eps`.
///
/// At a center \\(z^\star(s)\\), \\(\lambda_i = -1 / (s f_i(z^\star(s)))\\) is dual feasible
/// and the duality gap is \\(m / s\\).
pub struct Barrier<L: LinAlg>
{
    /// solver parameters.
    pub par: BarrierParam<L::F>,
}

impl<L: LinAlg> Barrier<L>
{
    /// Creates an instance.
    pub fn new() -> Self
    {
        Barrier {
            par: BarrierParam::default(),
        }
    }

    /// Changes solver parameters.
    pub fn par<P>(mut self, f: P) -> Self
    where P: FnOnce(&mut BarrierParam<L::F>)
    {
        f(&mut self.par);
        self
    }
}

impl<L: LinAlg> Default for Barrier<L>
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl<L: LinAlg> Barrier<L>
where L::F: Float + Debug + LowerExp
{
    /// Starts to solve an inequality constrained problem.
    ///
    /// Returns `Ok` with [`Solution`], whose `dual` is \\(\lambda\\), `iter` is the total number of inner iterations
    /// and `trace` records \\(f_0\\), \\(m / s\\) and \\(s\\) of each centering step,
    /// or `Err` with [`SolverError`] type.
    /// * `prob` is the problem.
    /// * `z0` is a strictly feasible initial point.
    pub fn solve<B>(&self, prob: &B, z0: &[L::F])
    -> Result<Solution<L::F>, SolverError>
    where B: BarrierOracle<L> + ?Sized
    {
        let n = prob.dim();
        let m = prob.num_ineq();

        if z0.len() != n || m == 0 {
            log::error!("Size mismatch: z0 {}, dim {}, num_ineq {}", z0.len(), n, m);
            return Err(SolverError::InvalidOp);
        }

        log::debug!("{:?}", self.par);

        if !prob.in_domain(z0) {
            log::error!("Initial point not strictly feasible");
            return Err(SolverError::InvalidInit);
        }

        let f_m = <L::F as NumCast>::from(m).unwrap_or_else(L::F::max_value);
        let mut s = self.par.s_init;
        let mut s_last = s;
        let mut z = z0.to_vec();
        let mut iter = 0;
        let mut trace = Vec::new();
        let mut status = Status::ExcessIter;

        log::info!("----- Started");
        let mut outer = 0;
        while outer < self.par.max_outer {
            let centered = Centered {
                ph_l: PhantomData::<L>,
                prob,
                s,
            };

            let inner = match self.par.centering {
                Centering::Newton => {
                    Newton::<L>::new().par(|p| *p = self.par.inner.clone())
                                 .solve_unconstrained(&centered, &z)
                },
                Centering::GradDescent => {
                    GradDescent::<L>::new().par(|p| *p = self.par.inner.clone())
                                      .solve(&centered, &z)
                },
            };
            let inner = match inner {
                Ok(sol) => sol,
                Err(e) => {
                    log::error!("{}: centering failed, {}", outer, e);
                    return Err(e);
                },
            };

            z = inner.x;
            iter += inner.iter;
            outer += 1;
            s_last = s;

            let gap = f_m / s;
            let value = prob.objective(&z);
            log::debug!("{}: value {:.6e} gap {:.2e} inner {}", outer, value, gap, inner.iter);

            trace.push(IterLog {
                value,
                crit: gap,
                step: s,
                pri_res: L::F::zero(),
            });

            if inner.status == Status::ExcessIter {
                log::warn!("{}: centering exceeded max iterations", outer);
                break;
            }
            if gap < self.par.eps {
                status = Status::Converged;
                break;
            }

            s = s * self.par.mu;
        }

        let mut dual = vec![L::F::zero(); m];
        prob.ineq(&z, &mut dual);
        for v in dual.iter_mut() {
            *v = -(s_last * *v).recip();
        }

        if status == Status::Converged {
            log::info!("----- Converged");
        }
        else {
            log::warn!("----- ExcessIter");
        }

        let value = prob.objective(&z);
        let mut sol = Solution::new(status, z, dual, value, iter, trace);
        sol.outer = outer;
        sol.gap = Some(f_m / s_last);
        Ok(sol)
    }
}
