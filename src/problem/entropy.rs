use num_traits::{Float, Zero, One};
use core::marker::PhantomData;
use crate::solver::{LinAlg, Oracle, SolverError};

/// Negative entropy
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// \\[
/// f(x) = \sum_{i=0}^{n-1} x_i \log x_i, \qquad {\bf dom} f = \mathbb{R}_{++}^n.
/// \\]
/// Minimizing it subject to \\(Ax=b\\) is the entropy maximization problem.
/// The Hessian \\({\bf diag}(1/x)\\) is diagonal and solved without factorization.
#[derive(Debug, Clone)]
pub struct ProbEntropy<L: LinAlg>
{
    ph_l: PhantomData<L>,
    n: usize,
}

impl<L: LinAlg> ProbEntropy<L>
{
    /// Creates an instance of dimension `n`.
    pub fn new(n: usize) -> Self
    {
        ProbEntropy {
            ph_l: PhantomData,
            n,
        }
    }
}

impl<L: LinAlg> Oracle<L> for ProbEntropy<L>
{
    fn dim(&self) -> usize
    {
        self.n
    }

    fn in_domain(&self, x: &[L::F]) -> bool
    {
        x.iter().all(|u| *u > L::F::zero())
    }

    fn value(&self, x: &[L::F]) -> L::F
    {
        let mut sum = L::F::zero();
        for u in x {
            sum = sum + *u * u.ln();
        }
        sum
    }

    fn gradient(&self, x: &[L::F], g: &mut[L::F])
    {
        for (v, u) in g.iter_mut().zip(x) {
            *v = u.ln() + L::F::one();
        }
    }

    fn hessian(&self, x: &[L::F], h: &mut[L::F]) -> Result<(), SolverError>
    {
        let n = self.n;
        L::scale(L::F::zero(), h);
        for (i, u) in x.iter().enumerate() {
            h[i * n + i] = u.recip();
        }
        Ok(())
    }

    fn hessian_solve(&self, x: &[L::F], _nrhs: usize, b: &mut[L::F]) -> Result<(), SolverError>
    {
        for col in b.chunks_mut(self.n) {
            for (v, u) in col.iter_mut().zip(x) {
                *v = *v * *u;
            }
        }
        Ok(())
    }
}

//

#[test]
fn test_entropy1()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;
    use crate::solver::check_gradient;

    type L = FloatGeneric<f64>;

    let prob = ProbEntropy::<L>::new(3);
    let x = [0.2, 1.0, 3.5];

    assert!(prob.in_domain(&x));
    assert!(!prob.in_domain(&[0.2, 0., 3.5]));
    assert!(check_gradient::<L, _>(&prob, &x, 1e-6) < 1e-6);

    // structured solve agrees with the dense Hessian
    let mut h = [0.; 9];
    prob.hessian(&x, &mut h).unwrap();
    let mut b = [1., 2., 3.];
    prob.hessian_solve(&x, 1, &mut b).unwrap();
    let mut hb = [0.; 3];
    L::transform_ge(false, 3, 3, 1., &h, &b, 0., &mut hb);
    assert_float_eq!(hb, [1., 2., 3.], abs_all <= 1e-12);
}
