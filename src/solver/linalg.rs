//! Linear algebra

use num_traits::Float;
use crate::solver::SolverError;

/// Linear algebra trait.
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// Vectors are slices of [`LinAlg::F`].
/// Matrices are slices of column-major data.
pub trait LinAlg
{
    /// Floating point data type used as scalars.
    type F: Float;

    /// Calculate 2-norm (or euclidean norm) \\(\\|x\\|_2=\sqrt{\sum_i x_i^2}\\).
    ///
    /// Returns the calculated norm.
    /// * `x` is a vector \\(x\\).
    fn norm(x: &[Self::F]) -> Self::F;

    /// Calculate infinity-norm \\(\\|x\\|_\infty=\max_i |x_i|\\).
    ///
    /// Returns the calculated norm, zero for an empty vector.
    /// * `x` is a vector \\(x\\).
    fn norm_inf(x: &[Self::F]) -> Self::F;

    /// Calculate 1-norm (or sum of absolute values) \\(\\|x\\|_1=\sum_i |x_i|\\).
    ///
    /// Returns the calculated norm.
    /// * `x` is a vector \\(x\\).
    fn abssum(x: &[Self::F]) -> Self::F;

    /// Calculate \\(x^T y\\).
    ///
    /// * `x` and `y` shall have the same length.
    fn dot(x: &[Self::F], y: &[Self::F]) -> Self::F;

    /// Copy from a vector to another vector.
    ///
    /// * `x` is a slice to copy.
    /// * `y` is a slice being copied to.
    ///   `x` and `y` shall have the same length.
    fn copy(x: &[Self::F], y: &mut[Self::F]);

    /// Calculate \\(\alpha x\\).
    ///
    /// * `alpha` is a scalar \\(\alpha\\).
    /// * `x` is a vector \\(x\\) before entry, \\(\alpha x\\) on exit.
    fn scale(alpha: Self::F, x: &mut[Self::F]);

    /// Calculate \\(\alpha x + y\\).
    ///
    /// * `alpha` is a scalar \\(\alpha\\).
    /// * `x` is a vector \\(x\\).
    /// * `y` is a vector \\(y\\) before entry, \\(\alpha x + y\\) on exit.
    ///   `x` and `y` shall have the same length.
    fn add(alpha: Self::F, x: &[Self::F], y: &mut[Self::F]);

    /// Calculate \\(\alpha D x + \beta y\\),
    /// where \\(D={\bf diag}(d)\\) is a diagonal matrix.
    ///
    /// * `alpha` is a scalar \\(\alpha\\).
    /// * `mat` is a diagonal vector \\(d\\) of \\(D\\).
    /// * `x` is a vector \\(x\\).
    /// * `beta` is a scalar \\(\beta\\).
    /// * `y` is a vector \\(y\\) before entry, \\(\alpha D x + \beta y\\) on exit.
    ///   `mat`, `x` and `y` shall have the same length.
    fn transform_di(alpha: Self::F, mat: &[Self::F], x: &[Self::F], beta: Self::F, y: &mut[Self::F]);

    /// Calculate \\(\alpha G x + \beta y\\).
    ///
    /// * If `transpose` is `true`, Calculate \\(\alpha G^T x + \beta y\\) instead.
    /// * `alpha` is a scalar \\(\alpha\\).
    /// * `n_row` is a number of rows of \\(G\\).
    /// * `n_col` is a number of columns of \\(G\\).
    /// * `mat` is a matrix \\(G\\), stored in column-major.
    ///   The length of `mat` shall be `n_row * n_col`.
    /// * `x` is a vector \\(x\\).
    ///   The length of `x` shall be `n_col` (or `n_row` if `transpose` is `true`).
    /// * `beta` is a scalar \\(\beta\\).
    /// * `y` is a vector \\(y\\) before entry,
    ///   \\(\alpha G x + \beta y\\) (or \\(\alpha G^T x + \beta y\\) if `transpose` is `true`) on exit.
    ///   The length of `y` shall be `n_row` (or `n_col` if `transpose` is `true`).
    fn transform_ge(transpose: bool, n_row: usize, n_col: usize, alpha: Self::F, mat: &[Self::F], x: &[Self::F], beta: Self::F, y: &mut[Self::F]);

    /// Calculate \\(G + \alpha x y^T\\).
    ///
    /// * `n_row` is a number of rows of \\(G\\), that is a length of `x`.
    /// * `n_col` is a number of columns of \\(G\\), that is a length of `y`.
    /// * `alpha` is a scalar \\(\alpha\\).
    /// * `mat` is a matrix \\(G\\) stored in column-major before entry,
    ///   \\(G + \alpha x y^T\\) on exit.
    fn rank1_ge(n_row: usize, n_col: usize, alpha: Self::F, x: &[Self::F], y: &[Self::F], mat: &mut[Self::F]);

    /// Cholesky factorization \\(S = L L^T\\) of a symmetric positive definite matrix.
    ///
    /// Returns `Err` with [`SolverError::NumericalFailure`]
    /// if \\(S\\) is not numerically positive definite or contains non-finite values.
    /// * `n` is a number of rows and columns of \\(S\\).
    /// * `mat` is \\(S\\) stored in column-major before entry; only its lower triangle is referenced.
    ///   On exit its lower triangle holds \\(L\\).
    fn chol_decomp(n: usize, mat: &mut[Self::F]) -> Result<(), SolverError>;

    /// Solve \\(L L^T X = B\\) with a factor given by [`LinAlg::chol_decomp`].
    ///
    /// * `n` is a number of rows and columns of \\(L\\).
    /// * `mat` is the factorized matrix.
    /// * `nrhs` is a number of columns of \\(B\\).
    /// * `b` is \\(B\\) stored in column-major before entry, \\(X\\) on exit.
    ///   The length of `b` shall be `n * nrhs`.
    fn chol_solve(n: usize, mat: &[Self::F], nrhs: usize, b: &mut[Self::F]);
}
