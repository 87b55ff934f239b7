//! Randomised checks of algebraic identities.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use redeem_linalg::{Matrix, Vector};

const TRIALS: usize = 50;

fn random_vector(rng: &mut StdRng, len: usize) -> Vector {
    (0..len).map(|_| rng.gen_range(-100.0..100.0)).collect()
}

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Matrix {
    let data = (0..rows * cols).map(|_| rng.gen_range(-100.0..100.0)).collect();
    Matrix::from_shape_vec((rows, cols), data).unwrap()
}

/// Small integer entries keep determinants and cofactors exact.
fn random_integer_matrix(rng: &mut StdRng, n: usize) -> Matrix {
    let data = (0..n * n).map(|_| rng.gen_range(-5..=5) as f64).collect();
    Matrix::from_shape_vec((n, n), data).unwrap()
}

#[test]
fn adding_the_negation_gives_zero() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..TRIALS {
        let len = rng.gen_range(0..8);
        let v = random_vector(&mut rng, len);
        let sum = v.add(&v.negate()).unwrap();
        assert!(sum.is_zero(), "{:?}", sum);
        assert_eq!(sum, Vector::zeros(len));
    }
}

#[test]
fn dot_is_commutative() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..TRIALS {
        let len = rng.gen_range(0..8);
        let u = random_vector(&mut rng, len);
        let v = random_vector(&mut rng, len);
        assert_eq!(u.dot(&v).unwrap(), v.dot(&u).unwrap());
    }
}

#[test]
fn double_transpose_is_exact() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..TRIALS {
        let rows = rng.gen_range(1..6);
        let cols = rng.gen_range(1..6);
        let a = random_matrix(&mut rng, rows, cols);
        let back = a.transpose().transpose();
        assert_eq!(back.shape(), a.shape());
        assert_eq!(back.as_slice(), a.as_slice());
    }
}

#[test]
fn matrix_times_inverse_is_identity() {
    let mut rng = StdRng::seed_from_u64(17);
    let mut checked = 0;
    for _ in 0..TRIALS {
        let n = rng.gen_range(1..6);
        let a = random_integer_matrix(&mut rng, n);
        if a.det().unwrap().abs() < 1.0 {
            continue;
        }
        let inv = a.inverse().unwrap();
        assert_eq!(a.mul(&inv).unwrap(), Matrix::identity(n), "a = {}", a);
        checked += 1;
    }
    assert!(checked > TRIALS / 2, "only {} invertible samples", checked);
}

#[test]
fn literal_round_trip_recovers_values() {
    let mut rng = StdRng::seed_from_u64(19);
    for _ in 0..TRIALS {
        let rows = rng.gen_range(1..5);
        let cols = rng.gen_range(1..5);
        let a = random_matrix(&mut rng, rows, cols);
        let back: Matrix = a.to_literal().parse().unwrap();
        assert_eq!(back, a);
    }
}

#[test]
fn det_of_transpose_matches() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..TRIALS {
        let n = rng.gen_range(1..6);
        let a = random_integer_matrix(&mut rng, n);
        assert_eq!(a.det().unwrap(), a.transpose().det().unwrap());
    }
}
