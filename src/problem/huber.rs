use num_traits::{Float, Zero, One, NumCast};
use crate::solver::{LinAlg, Oracle};
use crate::matbuild::MatBuild;

/// Huber regression with a concomitant scale
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Jointly estimates coefficients \\(\beta \in \mathbb{R}^n\\) and a scale \\(\sigma > 0\\):
/// \\[
/// f(\beta, \sigma) = m \sigma + \sum_{i=0}^{m-1} \sigma H_\epsilon\left({y_i - a_i^T \beta \over \sigma}\right) + \gamma \\|\beta\\|_2^2,
/// \\]
/// where \\(a_i^T\\) is the \\(i\\)-th row of \\(A \in \mathbb{R}^{m \times n}\\) and
/// \\[
/// H_\epsilon(z) = \left\\{ \begin{array}{ll}
/// z^2 & |z| \le \epsilon \\\\
/// 2 \epsilon |z| - \epsilon^2 & |z| > \epsilon.
/// \end{array} \right.
/// \\]
/// The variable is \\(x = (\beta, \sigma) \in \mathbb{R}^{n+1}\\).
/// \\(f\\) is convex and differentiable but not twice differentiable,
/// so it is for [`crate::solver::Bfgs`] and has no Hessian.
#[derive(Debug, Clone)]
pub struct ProbHuber<L: LinAlg>
{
    mat_a: MatBuild<L>,
    vec_y: Vec<L::F>,
    epsilon: L::F,
    gamma: L::F,
}

impl<L: LinAlg> ProbHuber<L>
{
    /// Creates an instance with \\(\epsilon = 1.35\\) and \\(\gamma = 0\\).
    ///
    /// * `mat_a` is \\(A\\).
    /// * `vec_y` is \\(y\\), whose length shall be the number of rows of \\(A\\).
    pub fn new(mat_a: MatBuild<L>, vec_y: &[L::F]) -> Self
    {
        assert_eq!(mat_a.size().0, vec_y.len());

        ProbHuber {
            mat_a,
            vec_y: vec_y.to_vec(),
            epsilon: <L::F as NumCast>::from(1.35).unwrap_or_else(L::F::one),
            gamma: L::F::zero(),
        }
    }

    /// Changes the threshold \\(\epsilon > 0\\).
    pub fn epsilon(mut self, epsilon: L::F) -> Self
    {
        self.epsilon = epsilon;
        self
    }

    /// Changes the regularization weight \\(\gamma \ge 0\\).
    pub fn gamma(mut self, gamma: L::F) -> Self
    {
        self.gamma = gamma;
        self
    }

    // y - A beta
    fn residual(&self, beta: &[L::F]) -> Vec<L::F>
    {
        let mut r = self.vec_y.clone();
        self.mat_a.op(-L::F::one(), beta, L::F::one(), &mut r);
        r
    }
}

impl<L: LinAlg> Oracle<L> for ProbHuber<L>
{
    fn dim(&self) -> usize
    {
        self.mat_a.size().1 + 1
    }

    fn in_domain(&self, x: &[L::F]) -> bool
    {
        x[self.dim() - 1] > L::F::zero()
    }

    fn value(&self, x: &[L::F]) -> L::F
    {
        let (m, n) = self.mat_a.size();
        let (beta, sigma) = (&x[..n], x[n]);
        let two = L::F::one() + L::F::one();
        let eps = self.epsilon;

        let mut f = <L::F as NumCast>::from(m).unwrap_or_else(L::F::max_value) * sigma;
        for r in self.residual(beta) {
            // sigma H(r / sigma)
            if r.abs() <= eps * sigma {
                f = f + r * r / sigma;
            }
            else {
                f = f + two * eps * r.abs() - eps * eps * sigma;
            }
        }
        f + self.gamma * L::dot(beta, beta)
    }

    fn gradient(&self, x: &[L::F], g: &mut[L::F])
    {
        let (m, n) = self.mat_a.size();
        let (beta, sigma) = (&x[..n], x[n]);
        let two = L::F::one() + L::F::one();
        let eps = self.epsilon;

        let mut psi = self.residual(beta);
        let mut g_sigma = <L::F as NumCast>::from(m).unwrap_or_else(L::F::max_value);
        for r in psi.iter_mut() {
            let z = *r / sigma;
            if z.abs() <= eps {
                g_sigma = g_sigma - z * z;
                *r = two * z;
            }
            else {
                g_sigma = g_sigma - eps * eps;
                *r = two * eps * z.signum();
            }
        }

        let (g_beta, g_rest) = g.split_at_mut(n);
        L::copy(beta, g_beta);
        self.mat_a.trans_op(-L::F::one(), &psi, two * self.gamma, g_beta);
        g_rest[0] = g_sigma;
    }
}

//

#[test]
fn test_huber1()
{
    use crate::FloatGeneric;
    use crate::solver::{check_gradient, SolverError};

    type L = FloatGeneric<f64>;

    let mat_a = MatBuild::<L>::new(4, 2)
                .iter_rowmaj(&[
                    1.,  0.5,
                    1., -1. ,
                    1.,  2. ,
                    1.,  0. ,
                ]);
    let vec_y = [1., -0.2, 8., 0.3];
    let prob = ProbHuber::new(mat_a, &vec_y).gamma(0.1);

    // both inliers and outliers
    let x = [0.1, 0.4, 0.7];
    assert!(check_gradient::<L, _>(&prob, &x, 1e-6) < 1e-6);

    assert!(!prob.in_domain(&[0.1, 0.4, 0.]));
    assert_eq!(prob.hessian(&x, &mut [0.; 9]), Err(SolverError::NoHessian));
}
