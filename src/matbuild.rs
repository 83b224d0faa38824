use std::ops::{Index, IndexMut, Deref};
use num_traits::{Float, Zero, One};
use crate::solver::LinAlg;

//

/// Matrix builder
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-svg.js"></script>
///
/// Dense matrix struct which owns a `Vec` of data array in column-major.
/// It holds problem data such as a constraint matrix \\(A\\) or a design matrix.
#[derive(Debug, Clone)]
pub struct MatBuild<L: LinAlg>
{
    n_row: usize,
    n_col: usize,
    array: Vec<L::F>,
}

impl<L: LinAlg> MatBuild<L>
{
    /// Creates an instance.
    ///
    /// Returns the [`MatBuild`] instance with zero data.
    /// * `n_row` is a number of rows.
    /// * `n_col` is a number of columns.
    pub fn new(n_row: usize, n_col: usize) -> Self
    {
        MatBuild {
            n_row,
            n_col,
            array: vec![L::F::zero(); n_row * n_col],
        }
    }

    /// Size of the matrix.
    ///
    /// Returns a tuple of a number of rows and columns.
    pub fn size(&self) -> (usize, usize)
    {
        (self.n_row, self.n_col)
    }

    /// Data by a function.
    ///
    /// * `func` takes a row and a column of the matrix and returns data of each element.
    pub fn set_by_fn<M>(&mut self, mut func: M)
    where M: FnMut(usize, usize) -> L::F
    {
        for c in 0.. self.n_col {
            for r in 0.. self.n_row {
                self[(r, c)] = func(r, c);
            }
        }
    }
    /// Builder pattern of [`MatBuild::set_by_fn`].
    pub fn by_fn<M>(mut self, func: M) -> Self
    where M: FnMut(usize, usize) -> L::F
    {
        self.set_by_fn(func);
        self
    }

    /// Data by an iterator in column-major.
    ///
    /// * `iter` iterates matrix data in column-major.
    pub fn set_iter_colmaj<T, I>(&mut self, iter: T)
    where T: IntoIterator<Item=I>, I: Deref<Target=L::F>
    {
        for (a, v) in self.array.iter_mut().zip(iter) {
            *a = *v;
        }
    }
    /// Builder pattern of [`MatBuild::set_iter_colmaj`].
    pub fn iter_colmaj<T, I>(mut self, iter: T) -> Self
    where T: IntoIterator<Item=I>, I: Deref<Target=L::F>
    {
        self.set_iter_colmaj(iter);
        self
    }

    /// Data by an iterator in row-major.
    ///
    /// * `iter` iterates matrix data in row-major.
    pub fn set_iter_rowmaj<T, I>(&mut self, iter: T)
    where T: IntoIterator<Item=I>, I: Deref<Target=L::F>
    {
        let mut i = iter.into_iter();
        let (nr, nc) = self.size();

        for r in 0.. nr {
            for c in 0.. nc {
                if let Some(v) = i.next() {
                    self[(r, c)] = *v;
                }
                else {
                    return;
                }
            }
        }
    }
    /// Builder pattern of [`MatBuild::set_iter_rowmaj`].
    pub fn iter_rowmaj<T, I>(mut self, iter: T) -> Self
    where T: IntoIterator<Item=I>, I: Deref<Target=L::F>
    {
        self.set_iter_rowmaj(iter);
        self
    }

    /// Copies a row of the matrix into `row`.
    pub fn copy_row(&self, r: usize, row: &mut[L::F])
    {
        assert_eq!(row.len(), self.n_col);

        for (c, v) in row.iter_mut().enumerate() {
            *v = self[(r, c)];
        }
    }

    /// Calculate \\(\alpha A x + \beta y\\).
    pub fn op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        L::transform_ge(false, self.n_row, self.n_col, alpha, &self.array, x, beta, y);
    }

    /// Calculate \\(\alpha A^T x + \beta y\\).
    pub fn trans_op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        L::transform_ge(true, self.n_row, self.n_col, alpha, &self.array, x, beta, y);
    }

    /// Calculate \\(S + \alpha A^T {\bf diag}(w) A\\).
    ///
    /// * `alpha` is a scalar \\(\alpha\\).
    /// * `w` is a diagonal weight vector of length of the number of rows.
    /// * `sym` is a square matrix \\(S\\) of the number of columns, in column-major,
    ///   before entry and \\(S + \alpha A^T {\bf diag}(w) A\\) on exit.
    pub fn add_gram(&self, alpha: L::F, w: &[L::F], sym: &mut[L::F])
    {
        let n = self.n_col;
        assert_eq!(w.len(), self.n_row);
        assert_eq!(sym.len(), n * n);

        let mut row = vec![L::F::zero(); n];
        for (r, wr) in w.iter().enumerate() {
            if *wr != L::F::zero() {
                self.copy_row(r, &mut row);
                L::rank1_ge(n, n, alpha * *wr, &row, &row, sym);
            }
        }
    }

    fn index(&self, (r, c): (usize, usize)) -> usize
    {
        assert!(r < self.n_row);
        assert!(c < self.n_col);

        c * self.n_row + r
    }
}

//

impl<L: LinAlg> Index<(usize, usize)> for MatBuild<L>
{
    type Output = L::F;
    fn index(&self, index: (usize, usize)) -> &Self::Output
    {
        let i = self.index(index);

        &self.array[i]
    }
}

impl<L: LinAlg> IndexMut<(usize, usize)> for MatBuild<L>
{
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output
    {
        let i = self.index(index);

        &mut self.array[i]
    }
}

//

impl<L: LinAlg> AsRef<[L::F]> for MatBuild<L>
{
    fn as_ref(&self) -> &[L::F]
    {
        &self.array
    }
}

//

impl<L: LinAlg> core::fmt::Display for MatBuild<L>
where L::F: Float + core::fmt::LowerExp
{
    fn fmt(&self, f: &mut core::fmt::Formatter) -> Result<(), core::fmt::Error>
    {
        let (nr, nc) = self.size();
        if nr == 0 || nc == 0 {
            write!(f, "[ ]")?;
        }
        else {
            write!(f, "[ {:.3e}", self[(0, 0)])?;
            if nc > 2 {
                write!(f, " ...")?;
            }
            if nc > 1 {
                write!(f, " {:.3e}", self[(0, nc - 1)])?;
            }

            if nr > 2 {
                writeln!(f)?;
                write!(f, "  ...")?;
            }

            if nr > 1 {
                writeln!(f)?;
                write!(f, "  {:.3e}", self[(nr - 1, 0)])?;
                if nc > 2 {
                    write!(f, " ...")?;
                }
                if nc > 1 {
                    write!(f, " {:.3e}", self[(nr - 1, nc - 1)])?;
                }
            }
            write!(f, " ]")?;
        }

        write!(f, " ({} x {})", nr, nc)
    }
}

/// Identity matrix of size `n`, stored in column-major.
pub(crate) fn identity<L: LinAlg>(n: usize) -> Vec<L::F>
{
    let mut mat = vec![L::F::zero(); n * n];
    for i in 0.. n {
        mat[i * n + i] = L::F::one();
    }
    mat
}

//

#[test]
fn test_matbuild1()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    let ref_array = &[ // column-major
        1., 4.,
        2., 5.,
        3., 6.,
    ];

    let m = MatBuild::<L>::new(2, 3)
            .iter_rowmaj(&[
                1., 2., 3.,
                4., 5., 6.,
            ]);

    let m_array: &[f64] = m.as_ref();
    assert_float_eq!(m_array, ref_array.as_ref(), abs_all <= 1e-12);
    assert_eq!(format!("{}", m), "[ 1.000e0 ... 3.000e0\n  4.000e0 ... 6.000e0 ] (2 x 3)");
}

#[test]
fn test_matbuild2()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    let m = MatBuild::<L>::new(3, 2)
            .iter_rowmaj(&[
                1., 0.,
                1., 1.,
                0., 2.,
            ]);

    // A^T diag(w) A
    let w = [1., 2., 3.];
    let mut sym = [0.; 4];
    m.add_gram(1., &w, &mut sym);
    assert_float_eq!(sym, [3., 2., 2., 14.], abs_all <= 1e-12);
}
