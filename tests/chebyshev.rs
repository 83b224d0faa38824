use float_eq::assert_float_eq;
use totsu_newton::prelude::*;
use totsu_newton::problem::ProbChebyshev;

use rand::prelude::*;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use rand_distr::StandardNormal;

type La = FloatGeneric<f64>;

type AMatBuild = MatBuild<La>;
type AProbChebyshev = ProbChebyshev<La>;
type ABarrier = Barrier<La>;

//

#[test]
fn test_chebyshev_lp()
{
    use totsu::prelude::MatType;

    type TLa = totsu::prelude::FloatGeneric<f64>;
    type TMatBuild = totsu::MatBuild<TLa>;
    type TProbLP = totsu::ProbLP<TLa>;
    type TSolver = totsu::prelude::Solver<TLa>;

    let _ = env_logger::builder().is_test(true).try_init();

    let m = 30;
    let n = 3;

    let mut rng = Xoshiro256StarStar::seed_from_u64(0);
    let mat_a = AMatBuild::new(m, n)
                .by_fn(|_, _| rng.sample(StandardNormal));
    let vec_b: Vec<f64> = (0.. m).map(|_| rng.sample(StandardNormal)).collect();
    println!("{}", mat_a);

    // minimize t s.t. -t 1 <= Ax - b <= t 1, z = (x, t)
    let vec_c = TMatBuild::new(MatType::General(n + 1, 1))
                .by_fn(|r, _| if r < n {0.} else {1.});
    let mut mat_g = TMatBuild::new(MatType::General(2 * m, n + 1));
    let mut vec_h = TMatBuild::new(MatType::General(2 * m, 1));
    for i in 0.. m {
        for j in 0.. n {
            mat_g[(i, j)] = mat_a[(i, j)];
            mat_g[(m + i, j)] = -mat_a[(i, j)];
        }
        mat_g[(i, n)] = -1.;
        mat_g[(m + i, n)] = -1.;
        vec_h[(i, 0)] = vec_b[i];
        vec_h[(m + i, 0)] = -vec_b[i];
    }
    let mat_a_lp = TMatBuild::new(MatType::General(0, n + 1));
    let vec_b_lp = TMatBuild::new(MatType::General(0, 1));

    let s = TSolver::new().par(|p| {p.max_iter = Some(100_000)});
    let mut lp = TProbLP::new(vec_c, mat_g, vec_h, mat_a_lp, vec_b_lp);
    let rslt_lp = s.solve(lp.problem()).unwrap();
    println!("{:?}", rslt_lp);

    let prob = AProbChebyshev::new(mat_a.clone(), &vec_b);
    let z0 = prob.start_point(&[0.; 3]);
    let s = ABarrier::new();
    let rslt = s.solve(&prob, &z0).unwrap();
    println!("{:?}", rslt.x);

    assert_eq!(rslt.status, Status::Converged);
    assert!(rslt.outer > 1);
    assert_float_eq!(rslt.value, rslt_lp.0[n], abs <= 1e-3);

    // t is the max residual at the optimum
    let mut r = vec_b.clone();
    mat_a.op(1., &rslt.x[..n], -1., &mut r);
    let r_max = r.iter().fold(0., |acc: f64, v| acc.max(v.abs()));
    assert!(r_max < rslt.value);
    assert_float_eq!(r_max, rslt.value, abs <= rslt.gap.unwrap() + 1e-6);

    // sum of duals equals 1 at a center: d/dt (s t - sum log(-f_i)) = 0
    let sum_dual: f64 = rslt.dual.iter().sum();
    assert_float_eq!(sum_dual, 1., abs <= 1e-3);
}

#[test]
fn test_chebyshev_graddescent()
{
    let _ = env_logger::builder().is_test(true).try_init();

    // minimize max |x - b_i|, whose optimum is x = t = 1.5
    let mat_a = AMatBuild::new(3, 1).iter_colmaj(&[1., 1., 1.]);
    let vec_b = [0., 1., 3.];
    let prob = AProbChebyshev::new(mat_a, &vec_b);
    let z0 = prob.start_point(&[0.]);

    let rslt_n = ABarrier::new().par(|p| {
        p.eps = 1.;
    }).solve(&prob, &z0).unwrap();

    let rslt_g = ABarrier::new().par(|p| {
        p.eps = 1.;
        p.centering = Centering::GradDescent;
        p.inner.eps = 1e-6;
        p.inner.max_iter = 100_000;
        p.inner.log_period = 10_000;
    }).solve(&prob, &z0).unwrap();

    assert_eq!(rslt_n.status, Status::Converged);
    assert_eq!(rslt_g.status, Status::Converged);
    assert_eq!(rslt_n.outer, rslt_g.outer);

    // the same centers
    assert_float_eq!(rslt_g.x.as_slice(), rslt_n.x.as_slice(), abs_all <= 1e-4);

    // within the gap bound of the optimum
    assert!(rslt_g.gap.unwrap() < 1.);
    assert_float_eq!(rslt_g.value, 1.5, abs <= rslt_g.gap.unwrap());
    assert_float_eq!(rslt_g.x[0], 1.5, abs <= rslt_g.gap.unwrap());
}

#[test]
fn test_chebyshev_excess()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let mat_a = AMatBuild::new(3, 1).iter_colmaj(&[1., 1., 1.]);
    let prob = AProbChebyshev::new(mat_a, &[0., 1., 3.]);

    let rslt = ABarrier::new().par(|p| {
        p.max_outer = 2;
    }).solve(&prob, &prob.start_point(&[0.])).unwrap();

    assert_eq!(rslt.status, Status::ExcessIter);
    assert_eq!(rslt.outer, 2);
    assert!(prob.in_domain(&rslt.x));
}
