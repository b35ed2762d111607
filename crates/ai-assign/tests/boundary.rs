use ai_assign::{validate_assignments, Assignment, CandidateError};

#[test]
fn accepts_finite_and_infinite_costs() {
    let candidates = vec![
        Assignment::new(0, 0, 1.5),
        Assignment::new(0, 1, f64::INFINITY),
        Assignment::new(1, 0, 0.0),
    ];
    assert!(validate_assignments(&candidates).is_ok());
}

#[test]
fn rejects_nan_costs() {
    let candidates = vec![Assignment::new(2, 3, f64::NAN)];
    assert_eq!(
        validate_assignments(&candidates),
        Err(CandidateError::NanCost {
            character: 2,
            task: 3
        })
    );
}

#[test]
fn rejects_negative_costs() {
    let candidates = vec![Assignment::new(1, 0, -0.5)];
    assert!(matches!(
        validate_assignments(&candidates),
        Err(CandidateError::NegativeCost { .. })
    ));
}
