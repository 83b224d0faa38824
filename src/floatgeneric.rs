use num_traits::Float;
use core::marker::PhantomData;
use crate::solver::{LinAlg, SolverError};

/// `num::Float`-generic [`LinAlg`] implementation
///
/// All numeric operations are written in pure Rust.
#[derive(Debug, Clone)]
pub struct FloatGeneric<F>
{
    ph_f: PhantomData<F>,
}

impl<F: Float> LinAlg for FloatGeneric<F>
{
    type F = F;

    fn norm(x: &[F]) -> F
    {
        let mut sum = F::zero();
        for u in x {
            sum = sum + *u * *u;
        }
        sum.sqrt()
    }

    fn norm_inf(x: &[F]) -> F
    {
        let mut max = F::zero();
        for u in x {
            // propagates NaN
            if !(u.abs() <= max) {
                max = u.abs();
            }
        }
        max
    }

    fn abssum(x: &[F]) -> F
    {
        let mut sum = F::zero();
        for u in x {
            sum = sum + u.abs();
        }
        sum
    }

    fn dot(x: &[F], y: &[F]) -> F
    {
        assert_eq!(x.len(), y.len());

        let mut sum = F::zero();
        for (u, v) in x.iter().zip(y) {
            sum = sum + *u * *v;
        }
        sum
    }

    fn copy(x: &[F], y: &mut[F])
    {
        assert_eq!(x.len(), y.len());

        for (u, v) in x.iter().zip(y) {
            *v = *u;
        }
    }

    fn scale(alpha: F, x: &mut[F])
    {
        for u in x {
            *u = alpha * *u;
        }
    }

    fn add(alpha: F, x: &[F], y: &mut[F])
    {
        assert_eq!(x.len(), y.len());

        for (u, v) in x.iter().zip(y) {
            *v = *v + alpha * *u;
        }
    }

    fn transform_di(alpha: F, mat: &[F], x: &[F], beta: F, y: &mut[F])
    {
        assert_eq!(mat.len(), x.len());
        assert_eq!(mat.len(), y.len());

        for (i, v) in y.iter_mut().enumerate() {
            *v = alpha * mat[i] * x[i] + beta * *v;
        }
    }

    fn transform_ge(transpose: bool, n_row: usize, n_col: usize, alpha: F, mat: &[F], x: &[F], beta: F, y: &mut[F])
    {
        assert_eq!(mat.len(), n_row * n_col);

        if !transpose {
            assert_eq!(x.len(), n_col);
            assert_eq!(y.len(), n_row);

            Self::scale(beta, y);
            for (c, u) in x.iter().enumerate() {
                let col = &mat[c * n_row .. (c + 1) * n_row];
                Self::add(alpha * *u, col, y);
            }
        }
        else {
            assert_eq!(x.len(), n_row);
            assert_eq!(y.len(), n_col);

            for (c, v) in y.iter_mut().enumerate() {
                let col = &mat[c * n_row .. (c + 1) * n_row];
                *v = alpha * Self::dot(col, x) + beta * *v;
            }
        }
    }

    fn rank1_ge(n_row: usize, n_col: usize, alpha: F, x: &[F], y: &[F], mat: &mut[F])
    {
        assert_eq!(x.len(), n_row);
        assert_eq!(y.len(), n_col);
        assert_eq!(mat.len(), n_row * n_col);

        for (c, v) in y.iter().enumerate() {
            let col = &mut mat[c * n_row .. (c + 1) * n_row];
            Self::add(alpha * *v, x, col);
        }
    }

    fn chol_decomp(n: usize, mat: &mut[F]) -> Result<(), SolverError>
    {
        assert_eq!(mat.len(), n * n);

        for j in 0.. n {
            let diag = mat[j * n + j];
            let mut d = diag;
            for k in 0.. j {
                let l = mat[k * n + j];
                d = d - l * l;
            }
            // also rejects NaN
            if !(d > F::epsilon() * diag.abs()) || !d.is_finite() {
                log::debug!("chol_decomp: pivot {} breaks down", j);
                return Err(SolverError::NumericalFailure);
            }
            let l_jj = d.sqrt();
            mat[j * n + j] = l_jj;

            for i in j + 1.. n {
                let mut v = mat[j * n + i];
                for k in 0.. j {
                    v = v - mat[k * n + i] * mat[k * n + j];
                }
                mat[j * n + i] = v / l_jj;
            }
        }

        Ok(())
    }

    fn chol_solve(n: usize, mat: &[F], nrhs: usize, b: &mut[F])
    {
        assert_eq!(mat.len(), n * n);
        assert_eq!(b.len(), n * nrhs);

        for col in b.chunks_mut(n) {
            // L z = b
            for i in 0.. n {
                let mut v = col[i];
                for k in 0.. i {
                    v = v - mat[k * n + i] * col[k];
                }
                col[i] = v / mat[i * n + i];
            }
            // L^T x = z
            for i in (0.. n).rev() {
                let mut v = col[i];
                for k in i + 1.. n {
                    v = v - mat[i * n + k] * col[k];
                }
                col[i] = v / mat[i * n + i];
            }
        }
    }
}

//

#[test]
fn test_transform_ge1()
{
    use float_eq::assert_float_eq;

    type L = FloatGeneric<f64>;

    // 2 x 3, column-major
    let mat = &[
        1., 4.,
        2., 5.,
        3., 6.,
    ];
    let x = &[1., 0., -1.];
    let mut y = [1., 1.];
    L::transform_ge(false, 2, 3, 2., mat, x, 1., &mut y);
    assert_float_eq!(y, [-3., -3.], abs_all <= 1e-12);

    let xt = &[1., -1.];
    let mut yt = [0.; 3];
    L::transform_ge(true, 2, 3, 1., mat, xt, 0., &mut yt);
    assert_float_eq!(yt, [-3., -3., -3.], abs_all <= 1e-12);
}

#[test]
fn test_chol1()
{
    use float_eq::assert_float_eq;

    type L = FloatGeneric<f64>;

    let ref_x = &[1., -2., 3.];

    // symmetric positive definite, column-major
    let s = [
        4., 2., 0.,
        2., 5., 1.,
        0., 1., 3.,
    ];
    let mut b = [0.; 3];
    L::transform_ge(false, 3, 3, 1., &s, ref_x, 0., &mut b);

    let mut f = s;
    L::chol_decomp(3, &mut f).unwrap();
    L::chol_solve(3, &f, 1, &mut b);
    assert_float_eq!(b, *ref_x, abs_all <= 1e-12);
}

#[test]
fn test_chol2()
{
    type L = FloatGeneric<f64>;

    // indefinite
    let mut s = [
        1., 2.,
        2., 1.,
    ];
    assert_eq!(L::chol_decomp(2, &mut s), Err(SolverError::NumericalFailure));

    let mut s_nan = [f64::NAN, 0., 0., 1.];
    assert_eq!(L::chol_decomp(2, &mut s_nan), Err(SolverError::NumericalFailure));
}
