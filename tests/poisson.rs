use float_eq::assert_float_eq;
use totsu_newton::prelude::*;
use totsu_newton::problem::ProbPoisson;

use rand::prelude::*;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use rand_distr::Poisson;

type La = FloatGeneric<f64>;

type AMatBuild = MatBuild<La>;
type AProbPoisson = ProbPoisson<La>;
type ANewton = Newton<La>;
type ABfgs = Bfgs<La>;

fn gen_data(m: usize, n: usize, seed: u64) -> (AMatBuild, Vec<f64>)
{
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);

    let mat_a = AMatBuild::new(m, n)
                .by_fn(|_, _| rng.gen_range(0.1..1.));
    let x: Vec<f64> = (0.. n).map(|_| rng.gen_range(1.0..2.)).collect();

    let mut mu = vec![0.; m];
    mat_a.op(1., &x, 0., &mut mu);
    let vec_y = mu.iter().map(|u| {
        let poisson = Poisson::new(*u).unwrap();
        rng.sample(poisson)
    }).collect();

    (mat_a, vec_y)
}

//

#[test]
fn test_poisson_agree()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let (m, n) = (100, 4);
    let (mat_a, vec_y) = gen_data(m, n, 0);
    let prob = AProbPoisson::new(mat_a, &vec_y).gamma(0.01);
    let x0 = vec![1.; n];

    let s = ANewton::new().par(|p| {
        p.eps = 1e-10;
    });
    let rslt_n = s.solve_unconstrained(&prob, &x0).unwrap();
    println!("{:?}", rslt_n.x);

    let s = ABfgs::new().par(|p| {
        p.eps = 1e-10;
    });
    let rslt_q = s.solve(&prob, &x0).unwrap();
    println!("{:?}", rslt_q.x);

    assert_eq!(rslt_n.status, Status::Converged);
    assert_eq!(rslt_q.status, Status::Converged);
    assert!(rslt_n.iter < rslt_q.iter);

    assert_float_eq!(rslt_q.x.as_slice(), rslt_n.x.as_slice(), abs_all <= 1e-3);
    assert_float_eq!(rslt_q.value, rslt_n.value, rmax <= 1e-8);
    assert!(prob.in_domain(&rslt_n.x));

    // BFGS decreases the objective on every step
    let mut f_prev = prob.value(&x0);
    for log in rslt_q.trace.iter() {
        assert!(log.value <= f_prev + 1e-12 * f_prev.abs());
        f_prev = log.value;
    }
}

#[test]
fn test_poisson_domain()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let (mat_a, vec_y) = gen_data(30, 2, 1);
    let prob = AProbPoisson::new(mat_a, &vec_y);

    // A x has no positive entry
    let rslt = ANewton::new().solve_unconstrained(&prob, &[-1., -1.]);
    assert_eq!(rslt.unwrap_err(), SolverError::InvalidInit);

    let rslt = ABfgs::new().solve(&prob, &[1., 1., 1.]);
    assert_eq!(rslt.unwrap_err(), SolverError::InvalidOp);
}
