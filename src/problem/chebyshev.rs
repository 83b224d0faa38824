use num_traits::{Float, Zero, One};
use crate::solver::{LinAlg, BarrierOracle, SolverError};
use crate::matbuild::MatBuild;
use crate::splitm_mut;

/// Chebyshev approximation
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Minimizes \\(\\|A x - b\\|_\infty\\) as an LP:
/// \\[
/// \begin{array}{ll}
/// {\rm minimize} & t \\\\
/// {\rm subject \ to} & -t \mathbb{1} \preceq A x - b \preceq t \mathbb{1},
/// \end{array}
/// \\]
/// with the variable \\(z = (x, t) \in \mathbb{R}^{n+1}\\) and \\(2m\\) inequality constraints
/// \\(a_i^T x - b_i - t \le 0\\) followed by \\(-a_i^T x + b_i - t \le 0\\).
#[derive(Debug, Clone)]
pub struct ProbChebyshev<L: LinAlg>
{
    mat_a: MatBuild<L>,
    vec_b: Vec<L::F>,
    margin: L::F,
}

impl<L: LinAlg> ProbChebyshev<L>
{
    /// Creates an instance.
    ///
    /// * `mat_a` is \\(A\\).
    /// * `vec_b` is \\(b\\), whose length shall be the number of rows of \\(A\\).
    pub fn new(mat_a: MatBuild<L>, vec_b: &[L::F]) -> Self
    {
        assert_eq!(mat_a.size().0, vec_b.len());

        ProbChebyshev {
            mat_a,
            vec_b: vec_b.to_vec(),
            margin: L::F::one(),
        }
    }

    /// Changes the margin of [`ProbChebyshev::start_point`], default 1.
    pub fn margin(mut self, margin: L::F) -> Self
    {
        self.margin = margin;
        self
    }

    /// Strictly feasible point \\((x, \\|Ax-b\\|_\infty + {\rm margin})\\).
    pub fn start_point(&self, x: &[L::F]) -> Vec<L::F>
    {
        let r = self.residual(x);

        let mut z = x.to_vec();
        z.push(L::norm_inf(&r) + self.margin);
        z
    }

    // A x - b
    fn residual(&self, x: &[L::F]) -> Vec<L::F>
    {
        let mut r = self.vec_b.clone();
        self.mat_a.op(L::F::one(), x, -L::F::one(), &mut r);
        r
    }

    // 1/(t - r), 1/(t + r)
    fn inv_slack(&self, z: &[L::F]) -> (Vec<L::F>, Vec<L::F>)
    {
        let n = self.mat_a.size().1;
        let t = z[n];

        let r = self.residual(&z[..n]);
        let u = r.iter().map(|ri| (t - *ri).recip()).collect();
        let v = r.iter().map(|ri| (t + *ri).recip()).collect();
        (u, v)
    }
}

impl<L: LinAlg> BarrierOracle<L> for ProbChebyshev<L>
{
    fn dim(&self) -> usize
    {
        self.mat_a.size().1 + 1
    }

    fn num_ineq(&self) -> usize
    {
        self.mat_a.size().0 * 2
    }

    fn objective(&self, z: &[L::F]) -> L::F
    {
        z[self.mat_a.size().1]
    }

    fn ineq(&self, z: &[L::F], f: &mut[L::F])
    {
        let (m, n) = self.mat_a.size();
        let t = z[n];
        let r = self.residual(&z[..n]);

        splitm_mut!(f, (f_pos; m), (f_neg; m));
        for ((fp, fm), ri) in f_pos.iter_mut().zip(f_neg.iter_mut()).zip(&r) {
            *fp = *ri - t;
            *fm = -*ri - t;
        }
    }

    fn in_domain(&self, z: &[L::F]) -> bool
    {
        let n = self.mat_a.size().1;
        let t = z[n];

        self.residual(&z[..n]).iter().all(|ri| ri.abs() < t)
    }

    fn gradient(&self, s: L::F, z: &[L::F], g: &mut[L::F])
    {
        let n = self.mat_a.size().1;
        let (u, v) = self.inv_slack(z);

        let mut uv = u.clone();
        L::add(-L::F::one(), &v, &mut uv);

        splitm_mut!(g, (g_x; n), (g_t; 1));
        self.mat_a.trans_op(L::F::one(), &uv, L::F::zero(), g_x);
        g_t[0] = s - L::abssum(&u) - L::abssum(&v);
    }

    fn hessian(&self, _s: L::F, z: &[L::F], h: &mut[L::F]) -> Result<(), SolverError>
    {
        let n = self.mat_a.size().1;
        let n1 = n + 1;
        let (u, v) = self.inv_slack(z);

        // u^2 + v^2, v^2 - u^2
        let w: Vec<L::F> = u.iter().zip(&v).map(|(ui, vi)| *ui * *ui + *vi * *vi).collect();
        let d: Vec<L::F> = u.iter().zip(&v).map(|(ui, vi)| *vi * *vi - *ui * *ui).collect();

        let mut h_xx = vec![L::F::zero(); n * n];
        self.mat_a.add_gram(L::F::one(), &w, &mut h_xx);

        let mut h_xt = vec![L::F::zero(); n];
        self.mat_a.trans_op(L::F::one(), &d, L::F::zero(), &mut h_xt);

        for c in 0.. n {
            L::copy(&h_xx[c * n .. (c + 1) * n], &mut h[c * n1 .. c * n1 + n]);
            h[c * n1 + n] = h_xt[c];
        }
        L::copy(&h_xt, &mut h[n * n1 .. n * n1 + n]);
        h[n * n1 + n] = L::abssum(&w);

        Ok(())
    }
}

//

#[test]
fn test_chebyshev1()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    let mat_a = MatBuild::<L>::new(3, 2)
                .iter_rowmaj(&[
                    1.,  0.5,
                    1., -1. ,
                    0.3, 2. ,
                ]);
    let prob = ProbChebyshev::new(mat_a.clone(), &[1., -0.2, 0.8]);

    let z = prob.start_point(&[0.4, 0.1]);
    assert!(prob.in_domain(&z));
    assert!(!prob.in_domain(&[0.4, 0.1, 0.]));
    assert_float_eq!(prob.objective(&z), 1.55, abs <= 1e-12);

    let prob_m = ProbChebyshev::new(mat_a, &[1., -0.2, 0.8]).margin(0.25);
    let z_m = prob_m.start_point(&[0.4, 0.1]);
    assert!(prob_m.in_domain(&z_m));
    assert_float_eq!(prob_m.objective(&z_m), 0.8, abs <= 1e-12);

    // gradient and Hessian by finite differences
    let s = 3.;
    let delta = 1e-6;
    let mut g = [0.; 3];
    let mut h = [0.; 9];
    prob.gradient(s, &z, &mut g);
    prob.hessian(s, &z, &mut h).unwrap();
    for j in 0.. 3 {
        let mut zp = z.clone();
        let mut zm = z.clone();
        zp[j] += delta;
        zm[j] -= delta;
        assert_float_eq!(g[j], (prob.value(s, &zp) - prob.value(s, &zm)) / (2. * delta), abs <= 1e-6);

        let mut gp = [0.; 3];
        let mut gm = [0.; 3];
        prob.gradient(s, &zp, &mut gp);
        prob.gradient(s, &zm, &mut gm);
        for i in 0.. 3 {
            assert_float_eq!(h[j * 3 + i], (gp[i] - gm[i]) / (2. * delta), abs <= 1e-5);
        }
    }
}
