/// Splits a slice into consecutive sub-slices of given lengths.
///
/// `splitm!(z, (x; n), (t; m))` binds `x = &z[0..n]` and `t = &z[n..n+m]`.
#[macro_export]
macro_rules! splitm {
    ($slice:expr, $( ($var:ident; $len:expr) ),+ ) => {
        let (_, _splitm_rest) = $slice.split_at(0);
        $(
            let ($var, _splitm_rest) = _splitm_rest.split_at($len);
        )*
        let _ = _splitm_rest;
    };
}

/// Mutable version of [`splitm!`].
#[macro_export]
macro_rules! splitm_mut {
    ($slice:expr, $( ($var:ident; $len:expr) ),+ ) => {
        let (_, _splitm_rest) = $slice.split_at_mut(0);
        $(
            let ($var, _splitm_rest) = _splitm_rest.split_at_mut($len);
        )*
        let _ = _splitm_rest;
    };
}

//

#[test]
fn test_splitm1()
{
    let mut z = [1., 2., 3., 4., 5.];

    {
        splitm!(z, (x; 2), (t; 3));
        assert_eq!(x, &[1., 2.]);
        assert_eq!(t, &[3., 4., 5.]);
    }

    {
        splitm_mut!(z, (x; 2), (t; 2));
        x[0] = 0.;
        t[1] = 0.;
    }
    assert_eq!(z, [0., 2., 3., 0., 5.]);
}
