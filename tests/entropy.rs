use float_eq::assert_float_eq;
use totsu_newton::prelude::*;
use totsu_newton::problem::ProbEntropy;

use rand::prelude::*;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use rand_distr::StandardNormal;

type La = FloatGeneric<f64>;

type AMatBuild = MatBuild<La>;
type AProbEntropy = ProbEntropy<La>;
type ANewton = Newton<La>;
type AInfeasibleNewton = InfeasibleNewton<La>;

//

// A with standard normal entries, b = A x_hat with x_hat > 0
fn gen_data(n: usize, p: usize, seed: u64) -> (AMatBuild, Vec<f64>, Vec<f64>)
{
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);

    let mat_a = AMatBuild::new(p, n)
                .by_fn(|_, _| rng.sample(StandardNormal));
    let x_hat: Vec<f64> = (0.. n).map(|_| rng.gen_range(0.5..1.5)).collect();

    let mut vec_b = vec![0.; p];
    mat_a.op(1., &x_hat, 0., &mut vec_b);

    (mat_a, vec_b, x_hat)
}

fn norm(x: &[f64]) -> f64
{
    x.iter().map(|v| v * v).sum::<f64>().sqrt()
}

//

#[test]
fn test_entropy_feasible()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let n = 100;
    let p = 30;
    let (mat_a, vec_b, x_hat) = gen_data(n, p, 0);
    let prob = AProbEntropy::new(n);

    let s = ANewton::new();
    let rslt = s.solve(&prob, &mat_a, &vec_b, &x_hat).unwrap();
    println!("{:?}", rslt.trace);

    assert_eq!(rslt.status, Status::Converged);
    assert!(rslt.iter > 0);
    assert_eq!(rslt.trace.len(), rslt.iter);

    // every iterate stays feasible
    let tol_feas = 1e-8 * (1. + norm(&vec_b));
    for l in rslt.trace.iter() {
        assert!(l.pri_res <= tol_feas, "{} > {}", l.pri_res, tol_feas);
    }

    // monotone decrease
    let mut f_prev = prob.value(&x_hat);
    for l in rslt.trace.iter() {
        assert!(l.value <= f_prev + 1e-12 * f_prev.abs());
        f_prev = l.value;
    }
    assert!(rslt.x.iter().all(|v| *v > 0.));

    // optimality: log x + 1 + A^T w = 0
    let mut r_dual = vec![0.; n];
    prob.gradient(&rslt.x, &mut r_dual);
    mat_a.trans_op(1., &rslt.dual, 1., &mut r_dual);
    assert!(norm(&r_dual) <= 1e-3);

    // restarting from the solution terminates at once
    let rslt2 = s.solve(&prob, &mat_a, &vec_b, &rslt.x).unwrap();
    assert_eq!(rslt2.status, Status::Converged);
    assert!(rslt2.iter <= 1);
}

#[test]
fn test_entropy_agree()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let n = 100;
    let p = 30;
    let (mat_a, vec_b, x_hat) = gen_data(n, p, 1);
    let prob = AProbEntropy::new(n);

    let rslt_f = ANewton::new().par(|p| {
        p.eps = 1e-10;
    }).solve(&prob, &mat_a, &vec_b, &x_hat).unwrap();

    let rslt_i = AInfeasibleNewton::new().par(|p| {
        p.eps = 1e-10;
    }).solve(&prob, &mat_a, &vec_b, &vec![1.; n], None).unwrap();

    assert_eq!(rslt_f.status, Status::Converged);
    assert_eq!(rslt_i.status, Status::Converged);

    assert_float_eq!(rslt_f.x.as_slice(), rslt_i.x.as_slice(), rmax_all <= 1e-4);
    assert_float_eq!(rslt_f.value, rslt_i.value, rmax <= 1e-8);
    assert_float_eq!(rslt_f.dual.as_slice(), rslt_i.dual.as_slice(), abs_all <= 1e-4);
}

#[test]
fn test_entropy_infeasible()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let n = 100;
    let p = 30;
    let (mat_a, vec_b, _) = gen_data(n, p, 2);
    let prob = AProbEntropy::new(n);

    let s = AInfeasibleNewton::new();
    let rslt = s.solve(&prob, &mat_a, &vec_b, &vec![1.; n], None).unwrap();
    println!("{:?}", rslt.trace);

    assert_eq!(rslt.status, Status::Converged);

    // residual norm decreases by the line search condition
    for k in 1.. rslt.trace.len() {
        let (prev, cur) = (&rslt.trace[k - 1], &rslt.trace[k]);
        assert!(cur.crit <= (1. - s.par.alpha * cur.step) * prev.crit);
    }

    // a full step reaches the affine set and it is kept afterwards
    let k_full = rslt.trace.iter().position(|l| l.step == 1.).unwrap();
    for l in rslt.trace[k_full..].iter() {
        assert!(l.pri_res <= 1e-8 * (1. + norm(&vec_b)));
    }

    let mut r = vec_b.clone();
    mat_a.op(1., &rslt.x, -1., &mut r);
    assert!(norm(&r) < s.par.eps);
}

#[test]
fn test_entropy_boundary()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let n = 10;
    let p = 3;
    let (mat_a, vec_b, mut x_hat) = gen_data(n, p, 3);
    let prob = AProbEntropy::new(n);

    x_hat[4] = 0.;

    let rslt = ANewton::new().solve(&prob, &mat_a, &vec_b, &x_hat).unwrap_err();
    println!("{}", rslt);
    assert_eq!(rslt, SolverError::InvalidInit);

    let rslt = AInfeasibleNewton::new().solve(&prob, &mat_a, &vec_b, &x_hat, None).unwrap_err();
    assert_eq!(rslt, SolverError::InvalidInit);
}

#[test]
fn test_entropy_invalid()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let n = 10;
    let p = 3;
    let (mat_a, vec_b, _) = gen_data(n, p, 4);
    let prob = AProbEntropy::new(n);

    // not on the affine set
    let rslt = ANewton::new().solve(&prob, &mat_a, &vec_b, &vec![1.; n]).unwrap_err();
    assert_eq!(rslt, SolverError::InvalidInit);

    // size mismatch
    let rslt = ANewton::new().solve(&prob, &mat_a, &vec_b[..2], &vec![1.; n]).unwrap_err();
    assert_eq!(rslt, SolverError::InvalidOp);
    let rslt = AInfeasibleNewton::new().solve(&prob, &mat_a, &vec_b, &vec![1.; n], Some(&[0.; 2][..])).unwrap_err();
    assert_eq!(rslt, SolverError::InvalidOp);
}

#[test]
fn test_entropy_excess()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let n = 100;
    let p = 30;
    let (mat_a, vec_b, _) = gen_data(n, p, 5);
    let prob = AProbEntropy::new(n);

    let rslt = AInfeasibleNewton::new().par(|p| {
        p.max_iter = 1;
    }).solve(&prob, &mat_a, &vec_b, &vec![1.; n], None).unwrap();

    assert_eq!(rslt.status, Status::ExcessIter);
    assert_eq!(rslt.iter, 1);
    assert!(rslt.x.iter().all(|v| *v > 0.));
}

#[test]
fn test_entropy_singular()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let n = 10;
    let prob = AProbEntropy::new(n);

    // the second row duplicates the first, so A is rank deficient
    let mat_a = AMatBuild::new(3, n)
                .iter_rowmaj(&[
                    1., 1., 1., 1., 0., 0., 0., 0., 0., 0.,
                    1., 1., 1., 1., 0., 0., 0., 0., 0., 0.,
                    0., 0., 0., 0., 1., 1., 1., 1., 1., 1.,
                ]);
    println!("{}", mat_a);
    let x0 = vec![1.; n];

    let vec_b = [4., 4., 6.];
    let rslt = ANewton::new().solve(&prob, &mat_a, &vec_b, &x0).unwrap_err();
    assert_eq!(rslt, SolverError::NumericalFailure);

    let vec_b = [5., 5., 3.];
    let rslt = AInfeasibleNewton::new().solve(&prob, &mat_a, &vec_b, &x0, None).unwrap_err();
    assert_eq!(rslt, SolverError::NumericalFailure);
}
