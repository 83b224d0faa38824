use float_eq::assert_float_eq;
use totsu_newton::prelude::*;
use totsu_newton::problem::ProbL1Reg;

use rand::prelude::*;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use rand_distr::StandardNormal;

type La = FloatGeneric<f64>;

type AMatBuild = MatBuild<La>;
type AProbL1Reg = ProbL1Reg<La>;
type ABarrier = Barrier<La>;
type ASubgrad = Subgrad<La>;

//

// b = A x_true + noise, with an outlier of +10 in every 10th sample
fn gen_data(m: usize, n: usize, seed: u64) -> (AMatBuild, Vec<f64>)
{
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);

    let mat_a = AMatBuild::new(m, n)
                .by_fn(|_, _| rng.sample(StandardNormal));
    let x_true: Vec<f64> = (0.. n).map(|_| rng.sample(StandardNormal)).collect();

    let mut vec_b: Vec<f64> = (0.. m).map(|i| {
        let noise: f64 = rng.sample(StandardNormal);
        if i % 10 == 0 {noise + 10.} else {noise}
    }).collect();
    mat_a.op(1., &x_true, 1., &mut vec_b);

    (mat_a, vec_b)
}

//

#[test]
fn test_l1reg_barrier()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let m = 2000;
    let n = 5;
    let (mat_a, vec_b) = gen_data(m, n, 0);
    let prob = AProbL1Reg::new(mat_a, &vec_b);
    let z0 = prob.start_point(&[0.; 5]);

    let s = ABarrier::new().par(|p| {
        p.eps = 1e-4;
    });
    let rslt = s.solve(&prob, &z0).unwrap();
    println!("{:?}", rslt.trace);

    assert_eq!(rslt.status, Status::Converged);
    assert!(rslt.gap.unwrap() < 1e-4);
    assert_eq!(rslt.trace.len(), rslt.outer);
    assert_eq!(rslt.dual.len(), 2 * m);
    assert!(rslt.dual.iter().all(|v| *v > 0.));

    // primal and dual objectives
    let loss = prob.loss();
    let p_val = loss.value(&rslt.x[..n]);
    let (nu, d_val) = prob.dual_point(&rslt.dual);
    println!("primal {} dual {}", p_val, d_val);
    assert!(p_val <= rslt.value);
    assert_float_eq!(p_val, d_val, abs <= 1e-3);

    // nearly dual feasible
    assert!(nu.iter().all(|v| v.abs() <= 1. + 1e-6));
    let mut a_nu = [0.; 5];
    prob.trans_op(1., &nu, &mut a_nu);
    assert_float_eq!(a_nu, [0.; 5], abs_all <= 1e-4);

    // gap bound decreases by mu
    for k in 1.. rslt.trace.len() {
        assert_float_eq!(rslt.trace[k].crit * s.par.mu, rslt.trace[k - 1].crit, rmax <= 1e-12);
    }
}

#[test]
fn test_l1reg_subgrad()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let m = 2000;
    let n = 5;
    let (mat_a, vec_b) = gen_data(m, n, 0);
    let prob = AProbL1Reg::new(mat_a, &vec_b);

    let rslt_b = ABarrier::new().par(|p| {
        p.eps = 1e-4;
    }).solve(&prob, &prob.start_point(&[0.; 5])).unwrap();
    let p_star = prob.loss().value(&rslt_b.x[..n]);

    let s = ASubgrad::new().par(|p| {
        p.max_iter = 10_000;
        p.step = 0.1;
    });
    let rslt = s.solve(&prob.loss(), &[0.; 5]).unwrap();

    assert_eq!(rslt.status, Status::ExcessIter);
    assert_eq!(rslt.iter, 10_000);
    println!("subgrad {} barrier {}", rslt.value, p_star);
    assert_float_eq!(rslt.value, p_star, rmax <= 1e-2);

    // best value so far is non-increasing and returned
    for k in 1.. rslt.trace.len() {
        assert!(rslt.trace[k].crit <= rslt.trace[k - 1].crit);
    }
    assert_eq!(rslt.trace.last().map(|l| l.crit), Some(rslt.value));
    assert_float_eq!(prob.loss().value(&rslt.x), rslt.value, abs <= 1e-12);
}

#[test]
fn test_l1reg_lp()
{
    use totsu::prelude::MatType;

    type TLa = totsu::prelude::FloatGeneric<f64>;
    type TMatBuild = totsu::MatBuild<TLa>;
    type TProbLP = totsu::ProbLP<TLa>;
    type TSolver = totsu::prelude::Solver<TLa>;

    let _ = env_logger::builder().is_test(true).try_init();

    let m = 50;
    let n = 3;
    let (mat_a, vec_b) = gen_data(m, n, 1);

    // minimize 1^T t s.t. -t <= Ax - b <= t, z = (x, t)
    let vec_c = TMatBuild::new(MatType::General(n + m, 1))
                .by_fn(|r, _| if r < n {0.} else {1.});
    let mut mat_g = TMatBuild::new(MatType::General(2 * m, n + m));
    let mut vec_h = TMatBuild::new(MatType::General(2 * m, 1));
    for i in 0.. m {
        for j in 0.. n {
            mat_g[(i, j)] = mat_a[(i, j)];
            mat_g[(m + i, j)] = -mat_a[(i, j)];
        }
        mat_g[(i, n + i)] = -1.;
        mat_g[(m + i, n + i)] = -1.;
        vec_h[(i, 0)] = vec_b[i];
        vec_h[(m + i, 0)] = -vec_b[i];
    }
    let mat_a_lp = TMatBuild::new(MatType::General(0, n + m));
    let vec_b_lp = TMatBuild::new(MatType::General(0, 1));

    let s = TSolver::new().par(|p| {p.max_iter = Some(100_000)});
    let mut lp = TProbLP::new(vec_c, mat_g, vec_h, mat_a_lp, vec_b_lp);
    let rslt_lp = s.solve(lp.problem()).unwrap();

    let prob = AProbL1Reg::new(mat_a, &vec_b);
    let rslt = ABarrier::new().solve(&prob, &prob.start_point(&[0.; 3])).unwrap();

    assert_eq!(rslt.status, Status::Converged);
    let loss = prob.loss();
    assert_float_eq!(loss.value(&rslt.x[..n]), loss.value(&rslt_lp.0[..n]), abs <= 1e-3);
}

#[test]
fn test_l1reg_invalid()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let (mat_a, vec_b) = gen_data(20, 2, 2);
    let prob = AProbL1Reg::new(mat_a, &vec_b);

    // t on the boundary |Ax - b| = t
    let mut z0 = prob.start_point(&[0.; 2]);
    z0[2] = vec_b[0].abs();
    let rslt = ABarrier::new().solve(&prob, &z0).unwrap_err();
    assert_eq!(rslt, SolverError::InvalidInit);

    let rslt = ABarrier::new().solve(&prob, &z0[..5]).unwrap_err();
    assert_eq!(rslt, SolverError::InvalidOp);
}
