//! Backtracking line search
//!
//! Both searches first shrink the step until the candidate is in the domain of the oracle,
//! and only then evaluate the objective or the residual there.

use num_traits::{Float, One};
use core::fmt::LowerExp;
use crate::solver::{LinAlg, Oracle, SolverError, SolverParam};

// x_new = x + t dx; returns false if x_new == x
fn step_to<L: LinAlg>(x: &[L::F], t: L::F, dx: &[L::F], x_new: &mut[L::F]) -> bool
{
    L::copy(x, x_new);
    L::add(t, dx, x_new);

    x.iter().zip(x_new.iter()).any(|(u, v)| u != v)
}

/// Backtracking line search with the sufficient decrease condition.
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Starting from \\(t=1\\), multiplies \\(t\\) by \\(\beta\\) until \\(x+t\Delta x \in {\bf dom} f\\),
/// then until \\(f(x+t\Delta x) \le f(x) + \alpha t \nabla f(x)^T \Delta x\\)
/// allowing `eps_round` relative rounding noise of \\(f(x)\\).
///
/// Returns `Ok` with a tuple of \\(t\\) and \\(f(x+t\Delta x)\\),
/// or `Err` with [`SolverError::LineSearchStall`] if the candidate is no longer distinct from \\(x\\).
/// * `f_x` is \\(f(x)\\).
/// * `slope` is \\(\nabla f(x)^T \Delta x\\), which shall be negative.
/// * `x_new` is \\(x+t\Delta x\\) on exit.
pub fn backtrack_descent<L, O>(par: &SolverParam<L::F>, oracle: &O,
    x: &[L::F], f_x: L::F, slope: L::F, dx: &[L::F], x_new: &mut[L::F])
-> Result<(L::F, L::F), SolverError>
where L: LinAlg, L::F: LowerExp, O: Oracle<L> + ?Sized
{
    let mut t = L::F::one();

    let mut moved = step_to::<L>(x, t, dx, x_new);
    while !oracle.in_domain(x_new) {
        t = t * par.beta;
        moved = step_to::<L>(x, t, dx, x_new);
    }

    let tol = par.eps_round * f_x.abs();
    loop {
        if !moved {
            log::debug!("line search stalled at t {:.2e}", t);
            return Err(SolverError::LineSearchStall);
        }

        let f_new = oracle.value(x_new);
        if f_new <= f_x + par.alpha * t * slope + tol {
            log::trace!("line search t {:.2e}", t);
            return Ok((t, f_new));
        }

        t = t * par.beta;
        moved = step_to::<L>(x, t, dx, x_new);
    }
}

/// Backtracking line search with the residual norm decrease condition.
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Starting from \\(t=1\\), multiplies \\(t\\) by \\(\beta\\) until \\(x+t\Delta x \in {\bf dom} f\\),
/// then until \\(\\|r(x+t\Delta x, \lambda+t\Delta\lambda)\\| \le (1-\alpha t)\\|r(x, \lambda)\\|\\).
/// The domain is checked on the primal variable only.
///
/// Returns `Ok` with a tuple of \\(t\\) and the new residual norm,
/// or `Err` with [`SolverError::LineSearchStall`] if the candidate is no longer distinct from \\((x, \lambda)\\).
/// * `norm_r` is \\(\\|r(x, \lambda)\\|\\).
/// * `residual` calculates the residual norm at a candidate.
/// * `x_new` and `lmd_new` are the accepted candidate on exit.
pub fn backtrack_residual<L, O, R>(par: &SolverParam<L::F>, oracle: &O,
    x: &[L::F], dx: &[L::F], lmd: &[L::F], dlmd: &[L::F], norm_r: L::F,
    mut residual: R,
    x_new: &mut[L::F], lmd_new: &mut[L::F])
-> Result<(L::F, L::F), SolverError>
where L: LinAlg, L::F: LowerExp, O: Oracle<L> + ?Sized, R: FnMut(&[L::F], &[L::F]) -> L::F
{
    let f1 = L::F::one();
    let mut t = f1;

    let mut moved = step_to::<L>(x, t, dx, x_new);
    while !oracle.in_domain(x_new) {
        t = t * par.beta;
        moved = step_to::<L>(x, t, dx, x_new);
    }

    loop {
        moved = step_to::<L>(lmd, t, dlmd, lmd_new) || moved;
        if !moved {
            log::error!("line search stalled at t {:.2e}", t);
            return Err(SolverError::LineSearchStall);
        }

        let norm_new = residual(x_new, lmd_new);
        if norm_new <= (f1 - par.alpha * t) * norm_r {
            log::trace!("line search t {:.2e}", t);
            return Ok((t, norm_new));
        }

        t = t * par.beta;
        moved = step_to::<L>(x, t, dx, x_new);
    }
}

//

#[test]
fn test_backtrack1()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    // f(x) = -log(x) + x, dom f = (0, inf)
    struct Prob;
    impl Oracle<L> for Prob
    {
        fn dim(&self) -> usize {1}
        fn in_domain(&self, x: &[f64]) -> bool {x[0] > 0.}
        fn value(&self, x: &[f64]) -> f64 {-x[0].ln() + x[0]}
        fn gradient(&self, x: &[f64], g: &mut[f64]) {g[0] = -1. / x[0] + 1.}
    }

    let par = SolverParam::default();
    let x = [2.];
    let f_x = Prob.value(&x);
    // overshooting into the outside of the domain
    let dx = [-4.];
    let slope = -2.;
    let mut x_new = [0.];

    let (t, f_new) = backtrack_descent::<L, _>(&par, &Prob, &x, f_x, slope, &dx, &mut x_new).unwrap();
    assert_float_eq!(t, 0.25, abs <= 1e-15);
    assert_float_eq!(x_new[0], 1., abs <= 1e-15);
    assert!(f_new <= f_x + par.alpha * t * slope);
}

#[test]
fn test_backtrack2()
{
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    // f(x) = x
    struct Prob;
    impl Oracle<L> for Prob
    {
        fn dim(&self) -> usize {1}
        fn value(&self, x: &[f64]) -> f64 {x[0]}
        fn gradient(&self, _x: &[f64], g: &mut[f64]) {g[0] = 1.}
    }

    let par = SolverParam::default();
    let x = [0.];
    let mut x_new = [0.];

    // ascent direction never satisfies the condition
    let rslt = backtrack_descent::<L, _>(&par, &Prob, &x, 0., -1., &[1.], &mut x_new);
    assert_eq!(rslt, Err(SolverError::LineSearchStall));
}

#[test]
fn test_backtrack3()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    // f(x) = 1e6 + 1e-7 (x - 1)^2, a small variation on a large offset
    struct Prob;
    impl Oracle<L> for Prob
    {
        fn dim(&self) -> usize {1}
        fn value(&self, x: &[f64]) -> f64 {1e6 + 1e-7 * (x[0] - 1.) * (x[0] - 1.)}
        fn gradient(&self, x: &[f64], g: &mut[f64]) {g[0] = 2e-7 * (x[0] - 1.)}
    }

    let par = SolverParam::default();
    let x = [0.];
    let f_x = Prob.value(&x);
    let mut g = [0.];
    Prob.gradient(&x, &mut g);
    // t = 1 overshoots to x = 2.5 where f increases
    let dx = [2.5];
    let slope = g[0] * dx[0];
    let mut x_new = [0.];

    let (t, f_new) = backtrack_descent::<L, _>(&par, &Prob, &x, f_x, slope, &dx, &mut x_new).unwrap();
    assert_float_eq!(t, 0.5, abs <= 1e-15);
    assert!(f_new < f_x);
}
