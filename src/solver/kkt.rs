use num_traits::{Float, Zero, One};
use crate::solver::{LinAlg, Oracle, SolverError};
use crate::matbuild::MatBuild;
use crate::splitm;

/// Solves the KKT system
/// \\[
/// \left[ \begin{array}{cc} H & A^T \\\\ A & 0 \end{array} \right]
/// \left[ \begin{array}{c} \Delta x \\\\ w \end{array} \right]
/// = - \left[ \begin{array}{c} g \\\\ r \end{array} \right]
/// \\]
/// by block elimination:
/// \\([X\ y] = H^{-1} [A^T\ g]\\), \\(S = -A X\\), \\(S w = A y - r\\), \\(\Delta x = -(y + X w)\\).
///
/// `r` is zero if `r_pri` is `None`.
/// \\(-S = A H^{-1} A^T\\) is positive definite for \\(A\\) of full row rank,
/// so it is factorized by Cholesky with the sign flipped.
pub(crate) fn kkt_solve<L, O>(oracle: &O, x: &[L::F],
    mat_a: &MatBuild<L>, g: &[L::F], r_pri: Option<&[L::F]>,
    dx: &mut[L::F], w: &mut[L::F])
-> Result<(), SolverError>
where L: LinAlg, O: Oracle<L> + ?Sized
{
    let (p, n) = mat_a.size();
    assert_eq!(g.len(), n);
    assert_eq!(dx.len(), n);
    assert_eq!(w.len(), p);

    let f0 = L::F::zero();
    let f1 = L::F::one();

    // [A^T g]
    let mut xy = vec![f0; n * (p + 1)];
    for (r, col) in xy.chunks_mut(n).take(p).enumerate() {
        mat_a.copy_row(r, col);
    }
    L::copy(g, &mut xy[n * p..]);

    oracle.hessian_solve(x, p + 1, &mut xy)?;

    splitm!(xy, (mat_x; n * p), (y; n));

    if p > 0 {
        // A X
        let mut s = vec![f0; p * p];
        for (c, s_col) in s.chunks_mut(p).enumerate() {
            mat_a.op(f1, &mat_x[c * n .. (c + 1) * n], f0, s_col);
        }

        // r - A y
        mat_a.op(-f1, y, f0, w);
        if let Some(r) = r_pri {
            L::add(f1, r, w);
        }

        L::chol_decomp(p, &mut s)?;
        L::chol_solve(p, &s, 1, w);
    }

    L::copy(y, dx);
    L::transform_ge(false, n, p, f1, mat_x, w, f1, dx);
    L::scale(-f1, dx);

    if dx.iter().chain(w.iter()).all(|v| v.is_finite()) {
        Ok(())
    }
    else {
        log::debug!("kkt_solve: non-finite direction");
        Err(SolverError::NumericalFailure)
    }
}

//

#[test]
fn test_kkt1()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    // f(x) = x0^2 + 2 x1^2 + 3 x2^2
    struct Prob;
    impl Oracle<L> for Prob
    {
        fn dim(&self) -> usize {3}
        fn value(&self, x: &[f64]) -> f64 {x[0] * x[0] + 2. * x[1] * x[1] + 3. * x[2] * x[2]}
        fn gradient(&self, x: &[f64], g: &mut[f64]) {
            g[0] = 2. * x[0];
            g[1] = 4. * x[1];
            g[2] = 6. * x[2];
        }
        fn hessian(&self, _x: &[f64], h: &mut[f64]) -> Result<(), SolverError> {
            h.fill(0.);
            h[0] = 2.;
            h[4] = 4.;
            h[8] = 6.;
            Ok(())
        }
    }

    // x0 + x1 + x2 = 1
    let mat_a = MatBuild::<L>::new(1, 3).iter_rowmaj(&[1., 1., 1.]);
    let x = [1., 0., 0.];
    let mut g = [0.; 3];
    Prob.gradient(&x, &mut g);

    let mut dx = [0.; 3];
    let mut w = [0.; 1];
    kkt_solve::<L, _>(&Prob, &x, &mat_a, &g, None, &mut dx, &mut w).unwrap();

    // quadratic: one step reaches the optimum x = (6, 3, 2) / 11
    assert_float_eq!(dx[0] + dx[1] + dx[2], 0., abs <= 1e-12);
    assert_float_eq!([x[0] + dx[0], x[1] + dx[1], x[2] + dx[2]], [6. / 11., 3. / 11., 2. / 11.], abs_all <= 1e-12);
    assert_float_eq!(w[0], -12. / 11., abs <= 1e-12);
}
