use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sm_matrix::{
    multiply, multiply_with_kernel, parallel_multiply, parallel_multiply_with, Kernel, Matrix,
    MatrixError, ParallelConfig, Strategy,
};

fn random_f64(width: usize, height: usize, seed: u64) -> Matrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut m = Matrix::new(width, height);
    for row in 0..height {
        for col in 0..width {
            m.set(row, col, rng.gen_range(-1.0..1.0)).unwrap();
        }
    }
    m
}

fn random_f32(width: usize, height: usize, seed: u64) -> Matrix<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..width * height).map(|_| rng.gen_range(-1.0f32..1.0)).collect();
    Matrix::from_vec(width, height, data).unwrap()
}

fn reference(a: &Matrix<f64>, b: &Matrix<f64>) -> Vec<f64> {
    let (m, k, n) = (a.height(), a.width(), b.width());
    let (a, b) = (a.as_slice(), b.as_slice());
    let mut c = vec![0.0; m * n];
    for i in 0..m {
        for p in 0..k {
            for j in 0..n {
                c[i * n + j] += a[i * k + p] * b[p * n + j];
            }
        }
    }
    c
}

#[test]
fn test_random_against_reference() {
    let test_cases = [
        (4, 4, 4),
        (3, 5, 4),
        (32, 64, 48),
        (13, 17, 19),
        (1, 33, 1),
        (50, 7, 3),
    ];

    for (i, (m, k, n)) in test_cases.into_iter().enumerate() {
        let a = random_f64(k, m, i as u64);
        let b = random_f64(n, k, 100 + i as u64);
        let want = reference(&a, &b);

        let seq = multiply(&a, &b).unwrap();
        let par = parallel_multiply(&a, &b).unwrap();
        assert_eq!((seq.width(), seq.height()), (n, m));
        assert_eq!((par.width(), par.height()), (n, m));

        for idx in 0..m * n {
            let (s, p) = (seq.as_slice()[idx], par.as_slice()[idx]);
            assert_relative_eq!(s, want[idx], epsilon = 1e-12, max_relative = 1e-9);
            assert_relative_eq!(p, s, epsilon = 1e-12, max_relative = 1e-9);
        }
    }
}

#[test]
fn test_f32_parallel_matches_sequential() {
    for (m, k, n) in [(3, 5, 4), (4, 4, 4), (64, 31, 9)] {
        let a = random_f32(k, m, 7);
        let b = random_f32(n, k, 8);
        let seq = multiply(&a, &b).unwrap();
        let par = parallel_multiply(&a, &b).unwrap();
        for (x, y) in par.as_slice().iter().zip(seq.as_slice()) {
            assert_relative_eq!(*x, *y, epsilon = 1e-5, max_relative = 1e-5);
        }
    }
}

#[test]
fn test_transpose_twice_is_exact() {
    let a = random_f64(9, 14, 42);
    assert_eq!(a.transpose().transpose(), a);

    let b = random_f32(3, 1, 43);
    assert_eq!(b.transpose().transpose(), b);
}

#[test]
fn test_identity_is_neutral() {
    let a = random_f64(11, 6, 5);
    let c = multiply(&Matrix::identity(6), &a).unwrap();
    for (x, y) in c.as_slice().iter().zip(a.as_slice()) {
        assert_relative_eq!(*x, *y, epsilon = 1e-12);
    }

    let c = parallel_multiply(&a, &Matrix::identity(11)).unwrap();
    for (x, y) in c.as_slice().iter().zip(a.as_slice()) {
        assert_relative_eq!(*x, *y, epsilon = 1e-12);
    }
}

#[test]
fn test_concrete_scenarios() {
    let a = Matrix::from_rows(&[vec![1.0f64, 2.0], vec![3.0, 4.0]]).unwrap();
    let b = Matrix::from_rows(&[vec![5.0f64, 6.0], vec![7.0, 8.0]]).unwrap();
    let c = a.matmul(&b, Strategy::Sequential).unwrap();
    assert_eq!(c.get(0, 0).unwrap(), 19.0);
    assert_eq!(c.get(0, 1).unwrap(), 22.0);
    assert_eq!(c.get(1, 0).unwrap(), 43.0);
    assert_eq!(c.get(1, 1).unwrap(), 50.0);

    let a = Matrix::from_rows(&[vec![1.0f32, 0.0, 0.0]]).unwrap();
    let b = Matrix::from_rows(&[vec![9.0f32], vec![8.0], vec![7.0]]).unwrap();
    for strategy in [Strategy::Sequential, Strategy::Parallel] {
        let c = a.matmul(&b, strategy).unwrap();
        assert_eq!((c.width(), c.height()), (1, 1));
        assert_eq!(c.get(0, 0).unwrap(), 9.0);
    }
}

#[test]
fn test_mismatch_fails_before_work() {
    let a = random_f64(5, 3, 1);
    let b = random_f64(3, 4, 2);
    let a_before = a.clone();
    let b_before = b.clone();

    for result in [
        multiply(&a, &b),
        parallel_multiply(&a, &b),
        parallel_multiply_with(&a, &b, &ParallelConfig::new().with_num_threads(2)),
    ] {
        assert_eq!(
            result.unwrap_err(),
            MatrixError::DimensionMismatch {
                a_height: 3,
                a_width: 5,
                b_height: 4,
                b_width: 3
            }
        );
    }
    assert_eq!(a, a_before);
    assert_eq!(b, b_before);
}

#[test]
fn test_kernels_agree() {
    let a = random_f64(29, 12, 11);
    let b = random_f64(15, 29, 12);
    let portable = multiply_with_kernel(&a, &b, Kernel::Portable).unwrap();

    if Kernel::Fma.is_available() {
        let fma = multiply_with_kernel(&a, &b, Kernel::Fma).unwrap();
        for (x, y) in fma.as_slice().iter().zip(portable.as_slice()) {
            assert_relative_eq!(*x, *y, epsilon = 1e-12, max_relative = 1e-9);
        }
    } else {
        assert_eq!(
            multiply_with_kernel(&a, &b, Kernel::Fma).unwrap_err(),
            MatrixError::KernelUnavailable("fma".to_string())
        );
    }
}

#[test]
fn test_many_workers_few_rows() {
    let a = random_f64(8, 2, 21);
    let b = random_f64(5, 8, 22);
    let config = ParallelConfig::new().with_num_threads(8);
    let par = parallel_multiply_with(&a, &b, &config).unwrap();
    let seq = multiply(&a, &b).unwrap();
    assert_eq!(par, seq);
}
