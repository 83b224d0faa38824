//! Oracles of objective functions

use num_traits::{Float, Zero, One};
use crate::solver::{LinAlg, SolverError};

/// Oracle of an objective function \\(f: \mathbb{R}^n \to \mathbb{R}\\).
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// An implementation owns its problem data and hyperparameters.
/// Solvers query it at points that [`Oracle::in_domain`] has accepted,
/// except [`crate::solver::Subgrad`] which assumes \\({\bf dom} f = \mathbb{R}^n\\).
pub trait Oracle<L: LinAlg>
{
    /// Dimension \\(n\\) of the variable.
    fn dim(&self) -> usize;

    /// Domain membership \\(x \in {\bf dom} f\\).
    ///
    /// Default is `true` everywhere.
    fn in_domain(&self, x: &[L::F]) -> bool
    {
        let _ = x;
        true
    }

    /// Objective value \\(f(x)\\).
    fn value(&self, x: &[L::F]) -> L::F;

    /// Gradient \\(\nabla f(x)\\), or any subgradient for a non-differentiable \\(f\\).
    ///
    /// * `g` is overwritten with the gradient.
    fn gradient(&self, x: &[L::F], g: &mut[L::F]);

    /// Hessian \\(\nabla^2 f(x)\\).
    ///
    /// Returns `Err` with [`SolverError::NoHessian`] by default.
    /// * `h` is overwritten with the Hessian, an `n * n` matrix in column-major.
    fn hessian(&self, x: &[L::F], h: &mut[L::F]) -> Result<(), SolverError>
    {
        let _ = (x, h);
        Err(SolverError::NoHessian)
    }

    /// Solves \\(\nabla^2 f(x) X = B\\).
    ///
    /// Default assembles the Hessian by [`Oracle::hessian`] and factorizes it by [`LinAlg::chol_decomp`].
    /// Implementations with a structured Hessian should override it.
    /// * `nrhs` is a number of columns of \\(B\\).
    /// * `b` is \\(B\\) in column-major before entry, \\(X\\) on exit.
    fn hessian_solve(&self, x: &[L::F], nrhs: usize, b: &mut[L::F]) -> Result<(), SolverError>
    {
        let n = self.dim();
        let mut h = vec![L::F::zero(); n * n];

        self.hessian(x, &mut h)?;
        L::chol_decomp(n, &mut h)?;
        L::chol_solve(n, &h, nrhs, b);

        Ok(())
    }
}

//

/// Oracle of an inequality constrained problem for [`crate::solver::Barrier`].
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// The problem is
/// \\[
/// \begin{array}{ll}
/// {\rm minimize} & f_0(z) \\\\
/// {\rm subject \ to} & f_i(z) \le 0 \quad (i = 0, \ldots, m - 1),
/// \end{array}
/// \\]
/// and the barrier method minimizes \\(s f_0(z) - \sum_i \log(-f_i(z))\\) for increasing \\(s\\).
pub trait BarrierOracle<L: LinAlg>
{
    /// Dimension of the variable \\(z\\).
    fn dim(&self) -> usize;

    /// Number \\(m\\) of the inequality constraints.
    fn num_ineq(&self) -> usize;

    /// Objective value \\(f_0(z)\\).
    fn objective(&self, z: &[L::F]) -> L::F;

    /// Inequality constraint values \\(f_i(z)\\).
    ///
    /// * `f` is overwritten with \\(f_i(z)\\), of length \\(m\\).
    fn ineq(&self, z: &[L::F], f: &mut[L::F]);

    /// Strict feasibility \\(f_i(z) < 0\\) for all \\(i\\).
    fn in_domain(&self, z: &[L::F]) -> bool
    {
        let mut f = vec![L::F::zero(); self.num_ineq()];
        self.ineq(z, &mut f);

        f.iter().all(|v| *v < L::F::zero())
    }

    /// Barrier function value \\(s f_0(z) - \sum_i \log(-f_i(z))\\).
    ///
    /// Returns infinity outside of the domain.
    fn value(&self, s: L::F, z: &[L::F]) -> L::F
    {
        let mut f = vec![L::F::zero(); self.num_ineq()];
        self.ineq(z, &mut f);

        let mut phi = L::F::zero();
        for v in f.iter() {
            if !(*v < L::F::zero()) {
                return L::F::infinity();
            }
            phi = phi - (-*v).ln();
        }

        s * self.objective(z) + phi
    }

    /// Gradient of the barrier function.
    fn gradient(&self, s: L::F, z: &[L::F], g: &mut[L::F]);

    /// Hessian of the barrier function, in column-major.
    fn hessian(&self, s: L::F, z: &[L::F], h: &mut[L::F]) -> Result<(), SolverError>;

    /// Solves (Hessian of the barrier function) \\(X = B\\).
    ///
    /// Default assembles the Hessian by [`BarrierOracle::hessian`] and factorizes it.
    fn hessian_solve(&self, s: L::F, z: &[L::F], nrhs: usize, b: &mut[L::F]) -> Result<(), SolverError>
    {
        let n = self.dim();
        let mut h = vec![L::F::zero(); n * n];

        self.hessian(s, z, &mut h)?;
        L::chol_decomp(n, &mut h)?;
        L::chol_solve(n, &h, nrhs, b);

        Ok(())
    }
}

/// Maximum of absolute differences between a gradient and its central finite difference.
///
/// Used to check oracle implementations.
pub fn check_gradient<L, O>(oracle: &O, x: &[L::F], delta: L::F) -> L::F
where L: LinAlg, O: Oracle<L> + ?Sized
{
    let n = oracle.dim();
    let two = L::F::one() + L::F::one();

    let mut g = vec![L::F::zero(); n];
    oracle.gradient(x, &mut g);

    let mut xd = x.to_vec();
    let mut err = L::F::zero();
    for i in 0.. n {
        xd[i] = x[i] + delta;
        let fp = oracle.value(&xd);
        xd[i] = x[i] - delta;
        let fm = oracle.value(&xd);
        xd[i] = x[i];

        err = err.max(((fp - fm) / (two * delta) - g[i]).abs());
    }
    err
}
