use num_traits::{Float, Zero, One};
use crate::solver::{LinAlg, Oracle, SolverError};
use crate::matbuild::MatBuild;

/// Poisson regression with the identity link
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Negative log-likelihood of counts \\(y_i \sim {\rm Poisson}(\mu_i)\\), \\(\mu = A x\\), with a ridge term:
/// \\[
/// f(x) = \sum_{i=0}^{m-1} (\mu_i - y_i \log \mu_i) + \gamma \\|x\\|_2^2,
/// \qquad {\bf dom} f = \\{ x \mid A x \succ 0 \\}.
/// \\]
#[derive(Debug, Clone)]
pub struct ProbPoisson<L: LinAlg>
{
    mat_a: MatBuild<L>,
    vec_y: Vec<L::F>,
    gamma: L::F,
}

impl<L: LinAlg> ProbPoisson<L>
{
    /// Creates an instance with \\(\gamma = 0\\).
    ///
    /// * `mat_a` is \\(A\\).
    /// * `vec_y` is the non-negative counts \\(y\\), whose length shall be the number of rows of \\(A\\).
    pub fn new(mat_a: MatBuild<L>, vec_y: &[L::F]) -> Self
    {
        assert_eq!(mat_a.size().0, vec_y.len());

        ProbPoisson {
            mat_a,
            vec_y: vec_y.to_vec(),
            gamma: L::F::zero(),
        }
    }

    /// Changes the regularization weight \\(\gamma \ge 0\\).
    pub fn gamma(mut self, gamma: L::F) -> Self
    {
        self.gamma = gamma;
        self
    }

    fn mu(&self, x: &[L::F]) -> Vec<L::F>
    {
        let mut mu = vec![L::F::zero(); self.mat_a.size().0];
        self.mat_a.op(L::F::one(), x, L::F::zero(), &mut mu);
        mu
    }
}

impl<L: LinAlg> Oracle<L> for ProbPoisson<L>
{
    fn dim(&self) -> usize
    {
        self.mat_a.size().1
    }

    fn in_domain(&self, x: &[L::F]) -> bool
    {
        self.mu(x).iter().all(|u| *u > L::F::zero())
    }

    fn value(&self, x: &[L::F]) -> L::F
    {
        let mut f = self.gamma * L::dot(x, x);
        for (u, y) in self.mu(x).iter().zip(&self.vec_y) {
            f = f + *u - *y * u.ln();
        }
        f
    }

    fn gradient(&self, x: &[L::F], g: &mut[L::F])
    {
        let two = L::F::one() + L::F::one();

        let mut w = self.mu(x);
        for (u, y) in w.iter_mut().zip(&self.vec_y) {
            *u = L::F::one() - *y / *u;
        }

        L::copy(x, g);
        self.mat_a.trans_op(L::F::one(), &w, two * self.gamma, g);
    }

    fn hessian(&self, x: &[L::F], h: &mut[L::F]) -> Result<(), SolverError>
    {
        let n = self.dim();
        let two = L::F::one() + L::F::one();

        let mut w = self.mu(x);
        for (u, y) in w.iter_mut().zip(&self.vec_y) {
            *u = *y / (*u * *u);
        }

        L::scale(L::F::zero(), h);
        for i in 0.. n {
            h[i * n + i] = two * self.gamma;
        }
        self.mat_a.add_gram(L::F::one(), &w, h);
        Ok(())
    }
}

//

#[test]
fn test_poisson1()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;
    use crate::solver::check_gradient;

    type L = FloatGeneric<f64>;

    let mat_a = MatBuild::<L>::new(3, 2)
                .iter_rowmaj(&[
                    1., 0.5,
                    1., 2. ,
                    0.2, 1.,
                ]);
    let prob = ProbPoisson::new(mat_a, &[2., 7., 0.]).gamma(0.5);

    let x = [1.2, 0.9];
    assert!(check_gradient::<L, _>(&prob, &x, 1e-6) < 1e-6);
    assert!(!prob.in_domain(&[-1., 0.]));

    // Hessian by the finite difference of the gradient
    let mut h = [0.; 4];
    prob.hessian(&x, &mut h).unwrap();
    let delta = 1e-6;
    for j in 0.. 2 {
        let mut xp = x;
        let mut xm = x;
        xp[j] += delta;
        xm[j] -= delta;
        let mut gp = [0.; 2];
        let mut gm = [0.; 2];
        prob.gradient(&xp, &mut gp);
        prob.gradient(&xm, &mut gm);
        for i in 0.. 2 {
            assert_float_eq!(h[j * 2 + i], (gp[i] - gm[i]) / (2. * delta), abs <= 1e-5);
        }
    }
}
