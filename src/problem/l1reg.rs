use num_traits::{Float, Zero, One};
use crate::solver::{LinAlg, Oracle, BarrierOracle, SolverError};
use crate::matbuild::MatBuild;
use crate::{splitm, splitm_mut};

/// Robust L1 regression
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Minimizes \\(\\|A x - b\\|_1\\) as an LP:
/// \\[
/// \begin{array}{ll}
/// {\rm minimize} & \mathbb{1}^T t \\\\
/// {\rm subject \ to} & -t \preceq A x - b \preceq t,
/// \end{array}
/// \\]
/// with the variable \\(z = (x, t) \in \mathbb{R}^{n+m}\\) and \\(2m\\) inequality constraints
/// \\(a_i^T x - b_i - t_i \le 0\\) followed by \\(-a_i^T x + b_i - t_i \le 0\\).
///
/// The Hessian of the barrier function has a diagonal \\(t\\) block,
/// which [`BarrierOracle::hessian_solve`] eliminates so that only an \\(n \times n\\) system is factorized.
#[derive(Debug, Clone)]
pub struct ProbL1Reg<L: LinAlg>
{
    mat_a: MatBuild<L>,
    vec_b: Vec<L::F>,
    margin: L::F,
}

impl<L: LinAlg> ProbL1Reg<L>
{
    /// Creates an instance.
    ///
    /// * `mat_a` is \\(A\\).
    /// * `vec_b` is \\(b\\), whose length shall be the number of rows of \\(A\\).
    pub fn new(mat_a: MatBuild<L>, vec_b: &[L::F]) -> Self
    {
        assert_eq!(mat_a.size().0, vec_b.len());

        ProbL1Reg {
            mat_a,
            vec_b: vec_b.to_vec(),
            margin: L::F::one(),
        }
    }

    /// Changes the margin of [`ProbL1Reg::start_point`], default 1.
    pub fn margin(mut self, margin: L::F) -> Self
    {
        self.margin = margin;
        self
    }

    /// Strictly feasible point \\((x, |Ax-b| + {\rm margin})\\).
    pub fn start_point(&self, x: &[L::F]) -> Vec<L::F>
    {
        let mut z = x.to_vec();
        z.extend(self.residual(x).iter().map(|ri| ri.abs() + self.margin));
        z
    }

    /// The unconstrained objective \\(\\|Ax-b\\|_1\\) as an [`Oracle`] for [`crate::solver::Subgrad`].
    pub fn loss(&self) -> L1Loss<'_, L>
    {
        L1Loss {
            prob: self,
        }
    }

    /// Dual variable \\(\nu = \lambda_{0..m} - \lambda_{m..2m}\\) of
    /// \\[
    /// \begin{array}{ll}
    /// {\rm maximize} & -b^T \nu \\\\
    /// {\rm subject \ to} & A^T \nu = 0, \ -\mathbb{1} \preceq \nu \preceq \mathbb{1},
    /// \end{array}
    /// \\]
    /// from the dual variable \\(\lambda\\) of the barrier method.
    ///
    /// Returns a tuple of \\(\nu\\) and the dual objective value \\(-b^T \nu\\).
    pub fn dual_point(&self, dual: &[L::F]) -> (Vec<L::F>, L::F)
    {
        let m = self.mat_a.size().0;
        assert_eq!(dual.len(), m * 2);

        splitm!(dual, (lmd_pos; m), (lmd_neg; m));
        let mut nu = lmd_pos.to_vec();
        L::add(-L::F::one(), lmd_neg, &mut nu);

        let d = -L::dot(&self.vec_b, &nu);
        (nu, d)
    }

    /// Calculate \\(\alpha A^T \nu\\), to check dual feasibility.
    pub fn trans_op(&self, alpha: L::F, nu: &[L::F], y: &mut[L::F])
    {
        self.mat_a.trans_op(alpha, nu, L::F::zero(), y);
    }

    // A x - b
    fn residual(&self, x: &[L::F]) -> Vec<L::F>
    {
        let mut r = self.vec_b.clone();
        self.mat_a.op(L::F::one(), x, -L::F::one(), &mut r);
        r
    }
}

impl<L: LinAlg> BarrierOracle<L> for ProbL1Reg<L>
{
    fn dim(&self) -> usize
    {
        let (m, n) = self.mat_a.size();
        n + m
    }

    fn num_ineq(&self) -> usize
    {
        self.mat_a.size().0 * 2
    }

    fn objective(&self, z: &[L::F]) -> L::F
    {
        let n = self.mat_a.size().1;
        z[n..].iter().fold(L::F::zero(), |acc, ti| acc + *ti)
    }

    fn ineq(&self, z: &[L::F], f: &mut[L::F])
    {
        let (m, n) = self.mat_a.size();
        splitm!(z, (x; n), (t; m));
        let r = self.residual(x);

        splitm_mut!(f, (f_pos; m), (f_neg; m));
        for i in 0.. m {
            f_pos[i] = r[i] - t[i];
            f_neg[i] = -r[i] - t[i];
        }
    }

    fn in_domain(&self, z: &[L::F]) -> bool
    {
        let (m, n) = self.mat_a.size();
        splitm!(z, (x; n), (t; m));

        self.residual(x).iter().zip(t).all(|(ri, ti)| ri.abs() < *ti)
    }

    fn gradient(&self, s: L::F, z: &[L::F], g: &mut[L::F])
    {
        let (m, n) = self.mat_a.size();
        splitm!(z, (x; n), (t; m));
        let r = self.residual(x);

        splitm_mut!(g, (g_x; n), (g_t; m));
        let mut uv = vec![L::F::zero(); m];
        for i in 0.. m {
            let u = (t[i] - r[i]).recip();
            let v = (t[i] + r[i]).recip();
            uv[i] = u - v;
            g_t[i] = s - u - v;
        }
        self.mat_a.trans_op(L::F::one(), &uv, L::F::zero(), g_x);
    }

    fn hessian(&self, _s: L::F, z: &[L::F], h: &mut[L::F]) -> Result<(), SolverError>
    {
        let (m, n) = self.mat_a.size();
        let nm = n + m;
        splitm!(z, (x; n), (t; m));
        let r = self.residual(x);

        let mut w = vec![L::F::zero(); m];
        let mut a_i = vec![L::F::zero(); n];
        L::scale(L::F::zero(), h);
        for i in 0.. m {
            let u = (t[i] - r[i]).recip();
            let v = (t[i] + r[i]).recip();
            w[i] = u * u + v * v;

            // a_i (v^2 - u^2) in the x-t blocks
            self.mat_a.copy_row(i, &mut a_i);
            let c = v * v - u * u;
            for k in 0.. n {
                h[(n + i) * nm + k] = c * a_i[k];
                h[k * nm + n + i] = c * a_i[k];
            }
            h[(n + i) * nm + n + i] = w[i];
        }

        let mut h_xx = vec![L::F::zero(); n * n];
        self.mat_a.add_gram(L::F::one(), &w, &mut h_xx);
        for c in 0.. n {
            L::copy(&h_xx[c * n .. (c + 1) * n], &mut h[c * nm .. c * nm + n]);
        }

        Ok(())
    }

    fn hessian_solve(&self, _s: L::F, z: &[L::F], nrhs: usize, b: &mut[L::F]) -> Result<(), SolverError>
    {
        let (m, n) = self.mat_a.size();
        let f0 = L::F::zero();
        let f1 = L::F::one();
        let two = f1 + f1;
        splitm!(z, (x; n), (t; m));
        let r = self.residual(x);

        // H = [A^T D A, A^T C; C A, D] with D = diag(u^2 + v^2), C = diag(v^2 - u^2)
        let mut d = vec![f0; m];
        let mut c_d = vec![f0; m];
        let mut schur = vec![f0; m];
        for i in 0.. m {
            let u = (t[i] - r[i]).recip();
            let v = (t[i] + r[i]).recip();
            let sq = t[i] * t[i] + r[i] * r[i];
            d[i] = u * u + v * v;
            c_d[i] = -two * t[i] * r[i] / sq;
            schur[i] = two / sq;
        }

        // A^T (D - C D^-1 C) A
        let mut s = vec![f0; n * n];
        self.mat_a.add_gram(f1, &schur, &mut s);
        L::chol_decomp(n, &mut s)?;

        let mut tmp = vec![f0; m];
        for col in b.chunks_mut(n + m).take(nrhs) {
            splitm_mut!(col, (b_x; n), (b_t; m));

            // b_x - A^T C D^-1 b_t
            L::transform_di(f1, &c_d, b_t, f0, &mut tmp);
            self.mat_a.trans_op(-f1, &tmp, f1, b_x);
            L::chol_solve(n, &s, 1, b_x);

            // D^-1 (b_t - C A dx)
            self.mat_a.op(f1, b_x, f0, &mut tmp);
            for i in 0.. m {
                b_t[i] = b_t[i] / d[i] - c_d[i] * tmp[i];
            }
        }

        Ok(())
    }
}

//

/// \\(\\|Ax-b\\|_1\\) with the subgradient \\(A^T {\bf sign}(Ax-b)\\).
///
/// Created by [`ProbL1Reg::loss`].
pub struct L1Loss<'a, L: LinAlg>
{
    prob: &'a ProbL1Reg<L>,
}

impl<'a, L: LinAlg> Oracle<L> for L1Loss<'a, L>
{
    fn dim(&self) -> usize
    {
        self.prob.mat_a.size().1
    }

    fn value(&self, x: &[L::F]) -> L::F
    {
        L::abssum(&self.prob.residual(x))
    }

    fn gradient(&self, x: &[L::F], g: &mut[L::F])
    {
        let f0 = L::F::zero();
        let f1 = L::F::one();

        let mut sign = self.prob.residual(x);
        for v in sign.iter_mut() {
            *v = if *v > f0 {f1} else if *v < f0 {-f1} else {f0};
        }
        self.prob.mat_a.trans_op(f1, &sign, f0, g);
    }
}

//

#[test]
fn test_l1reg1()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    let mat_a = MatBuild::<L>::new(4, 2)
                .iter_rowmaj(&[
                    1.,  0.5,
                    1., -1. ,
                    0.3, 2. ,
                    1.,  0. ,
                ]);
    let prob = ProbL1Reg::new(mat_a, &[1., -0.2, 0.8, 0.3]);
    let z = prob.start_point(&[0.4, 0.1]);
    let s = 2.5;
    assert_eq!(z.len(), 6);
    assert!(prob.in_domain(&z));

    // structured solve agrees with the dense Hessian
    let mut h = vec![0.; 36];
    prob.hessian(s, &z, &mut h).unwrap();
    let rhs = [1., -2., 0.5, 0.3, -1., 2., 0., 1., 0., 0., -1., 0.5];
    let mut sol = rhs;
    prob.hessian_solve(s, &z, 2, &mut sol).unwrap();
    for k in 0.. 2 {
        let mut hx = [0.; 6];
        L::transform_ge(false, 6, 6, 1., &h, &sol[k * 6 .. (k + 1) * 6], 0., &mut hx);
        assert_float_eq!(hx[..], rhs[k * 6 .. (k + 1) * 6], abs_all <= 1e-10);
    }

    // gradient by finite differences
    let delta = 1e-6;
    let mut g = [0.; 6];
    prob.gradient(s, &z, &mut g);
    for j in 0.. 6 {
        let mut zp = z.clone();
        let mut zm = z.clone();
        zp[j] += delta;
        zm[j] -= delta;
        assert_float_eq!(g[j], (prob.value(s, &zp) - prob.value(s, &zm)) / (2. * delta), abs <= 1e-6);
    }
}

#[test]
fn test_l1reg2()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    let mat_a = MatBuild::<L>::new(3, 1).iter_colmaj(&[1., 1., 1.]);
    let prob = ProbL1Reg::new(mat_a.clone(), &[1., 2., 10.]);
    let loss = prob.loss();

    // median minimizes the sum of absolute deviations
    assert_float_eq!(loss.value(&[2.]), 9., abs <= 1e-12);
    let mut g = [0.];
    loss.gradient(&[2.], &mut g);
    assert_float_eq!(g[0], 0., abs <= 1e-12);
    loss.gradient(&[3.], &mut g);
    assert_float_eq!(g[0], 1., abs <= 1e-12);

    let z = ProbL1Reg::new(mat_a, &[1., 2., 10.]).margin(0.5).start_point(&[2.]);
    assert_float_eq!(z.as_slice(), [2., 1.5, 0.5, 8.5].as_ref(), abs_all <= 1e-12);
}
