use num_traits::Float;

/// Solver parameters shared by [`crate::solver::Newton`], [`crate::solver::InfeasibleNewton`],
/// [`crate::solver::Bfgs`] and [`crate::solver::GradDescent`].
#[derive(Debug, Clone, PartialEq)]
pub struct SolverParam<F: Float>
{
    /// Max iteration number.
    pub max_iter: usize,
    /// Tolerance of the stopping criterion of each method
    /// (Newton decrement, residual norm, objective difference or gradient norm).
    pub eps: F,
    /// Tolerance of the equality constraint at a feasible start, relative to \\(1+\\|b\\|\\).
    pub eps_feas: F,
    /// Tolerance of small positive value to avoid division by zero.
    pub eps_zero: F,
    /// Relative rounding noise of objective values.
    /// It is allowed in the sufficient decrease condition,
    /// and a predicted decrease below it stops the descent methods.
    pub eps_round: F,
    /// Sufficient decrease fraction \\(\alpha \in (0, 0.5)\\) of the line search.
    pub alpha: F,
    /// Step reduction factor \\(\beta \in (0, 1)\\) of the line search.
    pub beta: F,
    /// Period of iterations to output progress log(for debug/trace level).
    pub log_period: usize,
}

impl<F: Float> Default for SolverParam<F>
{
    fn default() -> Self
    {
        let ten = F::from(10).unwrap();

        SolverParam {
            max_iter: 1000,
            eps: ten.powi(-8),
            eps_feas: ten.powi(-6),
            eps_zero: ten.powi(-12),
            eps_round: F::epsilon() * F::from(4).unwrap(),
            alpha: ten.recip(),
            beta: F::from(0.5).unwrap(),
            log_period: 10,
        }
    }
}

//

/// Centering method of [`crate::solver::Barrier`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Centering
{
    /// Newton's method, requires a Hessian.
    Newton,
    /// Gradient descent, slow but requires only a gradient.
    GradDescent,
}

/// Barrier method parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct BarrierParam<F: Float>
{
    /// Tolerance of the duality gap bound \\(m/s\\).
    pub eps: F,
    /// Growth factor \\(\mu > 1\\) of the barrier weight \\(s\\).
    pub mu: F,
    /// Initial barrier weight.
    pub s_init: F,
    /// Max number of centering steps.
    pub max_outer: usize,
    /// Inner method of each centering step.
    pub centering: Centering,
    /// Parameters of the inner method.
    pub inner: SolverParam<F>,
}

impl<F: Float> Default for BarrierParam<F>
{
    fn default() -> Self
    {
        let ten = F::from(10).unwrap();

        BarrierParam {
            eps: ten.powi(-6),
            mu: F::from(20).unwrap(),
            s_init: F::one(),
            max_outer: 100,
            centering: Centering::Newton,
            inner: SolverParam::default(),
        }
    }
}

//

/// Subgradient method parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SubgradParam<F: Float>
{
    /// Number of iterations.
    pub max_iter: usize,
    /// Step size constant \\(c\\) of the diminishing step \\(c/i\\).
    pub step: F,
    /// Period of iterations to output progress log(for debug/trace level).
    pub log_period: usize,
}

impl<F: Float> Default for SubgradParam<F>
{
    fn default() -> Self
    {
        SubgradParam {
            max_iter: 10_000,
            step: F::from(0.1).unwrap(),
            log_period: 1000,
        }
    }
}

#[test]
fn test_param1()
{
    let par = SolverParam::<f64>::default();
    assert_eq!(par.max_iter, 1000);
    assert_eq!(par.alpha, 0.1);
    assert_eq!(par.beta, 0.5);
    assert_eq!(par.eps_round, 4. * f64::EPSILON);

    let par = BarrierParam::<f64>::default();
    assert_eq!(par.mu, 20.);
    assert_eq!(par.centering, Centering::Newton);
}
