use float_eq::assert_float_eq;
use totsu_newton::prelude::*;
use totsu_newton::problem::ProbHuber;

use rand::prelude::*;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use rand_distr::StandardNormal;

type La = FloatGeneric<f64>;

type AMatBuild = MatBuild<La>;
type AProbHuber = ProbHuber<La>;
type ABfgs = Bfgs<La>;
type ANewton = Newton<La>;

// y = A beta + noise, with an outlier on every 10th row if `outlier` is nonzero
fn gen_data(m: usize, n: usize, noise: f64, outlier: f64, seed: u64) -> (AMatBuild, Vec<f64>, Vec<f64>)
{
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);

    let mat_a = AMatBuild::new(m, n)
                .by_fn(|_, _| rng.sample(StandardNormal));
    let beta: Vec<f64> = (0.. n).map(|_| rng.sample(StandardNormal)).collect();

    let mut vec_y = vec![0.; m];
    mat_a.op(1., &beta, 0., &mut vec_y);
    for (i, y) in vec_y.iter_mut().enumerate() {
        let e: f64 = rng.sample(StandardNormal);
        *y += noise * e;
        if i % 10 == 0 {
            *y += outlier;
        }
    }

    (mat_a, vec_y, beta)
}

// least squares coefficients and the root mean square of their residual
fn least_squares(mat_a: &AMatBuild, vec_y: &[f64]) -> (Vec<f64>, f64)
{
    let (m, n) = mat_a.size();

    let mut ata = vec![0.; n * n];
    mat_a.add_gram(1., &vec![1.; m], &mut ata);
    let mut beta = vec![0.; n];
    mat_a.trans_op(1., vec_y, 0., &mut beta);
    La::chol_decomp(n, &mut ata).unwrap();
    La::chol_solve(n, &ata, 1, &mut beta);

    let mut r = vec_y.to_vec();
    mat_a.op(-1., &beta, 1., &mut r);
    let sigma = La::norm(&r) / (m as f64).sqrt();

    (beta, sigma)
}

fn max_diff(x: &[f64], y: &[f64]) -> f64
{
    x.iter().zip(y).fold(0., |acc: f64, (u, v)| acc.max((u - v).abs()))
}

//

#[test]
fn test_huber_ls()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let (m, n) = (50, 3);
    let (mat_a, vec_y, _) = gen_data(m, n, 1., 0., 1);
    let (beta_ls, sigma_ls) = least_squares(&mat_a, &vec_y);

    // no residual exceeds epsilon, then a least squares fit
    let prob = AProbHuber::new(mat_a, &vec_y).epsilon(1e6);

    let mut x0 = vec![0.; n];
    x0.push(1.);

    let s = ABfgs::new().par(|p| {
        p.eps = 1e-10;
    });
    let rslt = s.solve(&prob, &x0).unwrap();
    println!("{:?}", rslt.x);

    assert_eq!(rslt.status, Status::Converged);
    assert_float_eq!(rslt.x[..n], beta_ls[..], abs_all <= 1e-4);
    assert_float_eq!(rslt.x[n], sigma_ls, abs <= 1e-4);

    // monotone
    for w in rslt.trace.windows(2) {
        assert!(w[1].value <= w[0].value + 1e-12 * w[0].value.abs());
    }
}

#[test]
fn test_huber_outlier()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let (m, n) = (200, 3);
    let (mat_a, vec_y, beta) = gen_data(m, n, 0.1, 20., 2);
    let (beta_ls, _) = least_squares(&mat_a, &vec_y);

    let prob = AProbHuber::new(mat_a, &vec_y);

    let mut x0 = vec![0.; n];
    x0.push(1.);

    let s = ABfgs::new().par(|p| {
        p.eps = 1e-10;
    });
    let rslt = s.solve(&prob, &x0).unwrap();
    println!("{:?}", rslt.x);

    assert_eq!(rslt.status, Status::Converged);
    assert!(rslt.x[n] > 0.);

    let err_huber = max_diff(&rslt.x[..n], &beta);
    let err_ls = max_diff(&beta_ls, &beta);
    println!("huber {:.3e}, ls {:.3e}", err_huber, err_ls);
    assert!(err_huber < 0.05);
    assert!(err_huber < err_ls / 4.);
}

#[test]
fn test_huber_nohessian()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let (mat_a, vec_y, _) = gen_data(20, 2, 1., 0., 3);
    let prob = AProbHuber::new(mat_a, &vec_y);

    let rslt = ANewton::new().solve_unconstrained(&prob, &[0., 0., 1.]);
    assert_eq!(rslt.unwrap_err(), SolverError::NoHessian);

    // sigma out of domain
    let rslt = ABfgs::new().solve(&prob, &[0., 0., 0.]);
    assert_eq!(rslt.unwrap_err(), SolverError::InvalidInit);
}
