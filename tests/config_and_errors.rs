//! Integration tests for `LinalgConfig` and error categorisation.

use redeem_linalg::config::{COL_DELIMITER, DEFAULT_PRECISION, ROW_DELIMITER};
use redeem_linalg::{ErrorKind, LinalgConfig, LinalgError, Matrix, SingularPolicy, Vector, EPS};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn default_config_values() {
    let cfg = LinalgConfig::default();
    assert_eq!(cfg.tolerance, EPS);
    assert_eq!(cfg.tolerance, 1e-6);
    assert_eq!(cfg.precision, DEFAULT_PRECISION);
    assert_eq!(cfg.singular, SingularPolicy::Fail);
    assert_eq!(ROW_DELIMITER, ';');
    assert_eq!(COL_DELIMITER, ' ');
}

#[test]
fn singular_policy_from_str() {
    assert_eq!("fail".parse::<SingularPolicy>().unwrap(), SingularPolicy::Fail);
    assert_eq!(
        "Propagate".parse::<SingularPolicy>().unwrap(),
        SingularPolicy::Propagate
    );
    assert!("ignore".parse::<SingularPolicy>().is_err());
}

#[test]
fn config_from_json_fills_defaults() {
    let cfg = LinalgConfig::from_json("{}").unwrap();
    assert_eq!(cfg, LinalgConfig::default());

    let cfg = LinalgConfig::from_json(r#"{"tolerance": 0.001, "singular": "Propagate"}"#).unwrap();
    assert_eq!(cfg.tolerance, 0.001);
    assert_eq!(cfg.precision, DEFAULT_PRECISION);
    assert_eq!(cfg.singular, SingularPolicy::Propagate);
}

#[test]
fn config_from_json_rejects_bad_input() {
    assert!(LinalgConfig::from_json("not json").is_err());
    assert!(LinalgConfig::from_json(r#"{"tolerance": -1.0}"#).is_err());
}

#[test]
fn config_round_trips_json() {
    let cfg = LinalgConfig::new(1e-3, 5, SingularPolicy::Propagate);
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(json.contains("tolerance"));
    let back: LinalgConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn config_drives_comparison_and_rendering() {
    let cfg = LinalgConfig::new(0.01, 1, SingularPolicy::Fail);
    let a: Matrix = "[1 2]".parse().unwrap();
    let b: Matrix = "[1.005 2]".parse().unwrap();
    assert_ne!(a, b);
    assert!(a.approx_eq(&b, cfg.tolerance));
    assert_eq!(a.render(cfg.precision), "[[1.0 2.0]]");
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn every_failure_maps_to_its_kind() {
    let cases: Vec<(LinalgError, ErrorKind)> = vec![
        (Vector::zeros(1).get(3).unwrap_err(), ErrorKind::Index),
        (Matrix::zeros(1, 1).get(0, 1).unwrap_err(), ErrorKind::Index),
        (
            Vector::zeros(1).add(&Vector::zeros(2)).unwrap_err(),
            ErrorKind::SizeMismatch,
        ),
        (Matrix::zeros(2, 1).cofactor().unwrap_err(), ErrorKind::InvalidShape),
        (Vector::zeros(1).div_scalar(0.0).unwrap_err(), ErrorKind::DivideByZero),
        (Vector::zeros(2).normalize().unwrap_err(), ErrorKind::DegenerateInput),
        (Vector::zeros(0).max().unwrap_err(), ErrorKind::EmptyInput),
        ("[a]".parse::<Vector>().unwrap_err(), ErrorKind::Parse),
        (
            Matrix::zeros(1, 2).mul_vector(&Vector::zeros(2)).unwrap_err(),
            ErrorKind::UnsupportedShape,
        ),
        (
            Matrix::from_vectors_horizontal(&[]).unwrap_err(),
            ErrorKind::InvalidInput,
        ),
        (Matrix::zeros(2, 2).inverse().unwrap_err(), ErrorKind::Singular),
    ];
    for (err, kind) in cases {
        assert_eq!(err.kind(), kind, "{}", err);
    }
}

#[test]
fn error_messages_carry_context() {
    let err = Matrix::zeros(2, 2).get(5, 0).unwrap_err();
    assert_eq!(err.to_string(), "Cell (5, 0) out of bounds for 2x2 matrix");

    let err = Matrix::zeros(2, 2).add(&Matrix::zeros(3, 1)).unwrap_err();
    assert_eq!(err.to_string(), "Shape mismatch: 2x2 vs 3x1");

    let err = "[1 zz]".parse::<Vector>().unwrap_err();
    assert!(err.to_string().starts_with("Invalid numeric literal 'zz'"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn errors_convert_into_anyhow() {
    fn invert(literal: &str) -> anyhow::Result<Matrix> {
        let m: Matrix = literal.parse()?;
        Ok(m.inverse()?)
    }
    assert!(invert("[2 0; 0 2]").is_ok());
    let err = invert("[1 2; 2 4]").unwrap_err();
    assert_eq!(err.downcast_ref::<LinalgError>(), Some(&LinalgError::Singular));
}
