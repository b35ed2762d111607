//! Scalar cost composition for candidate pairings.

/// Factors folded into a single pairing cost.
///
/// Each character can view the same task differently, so every factor is
/// per-pairing. `..Default::default()` supplies the neutral value for any
/// factor the caller omits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostFactors {
    /// Time to reach the task location. Non-negative.
    pub travel_time: f64,
    /// Time to execute the task. Non-negative.
    pub work_time: f64,
    /// Probability that an attempt fails and must be redone, in `[0, 1]`.
    pub retry_risk: f64,
    /// Positive multiplier; a priority-2 task costs half as much as an
    /// identical priority-1 task.
    pub priority: f64,
}

impl Default for CostFactors {
    fn default() -> Self {
        Self {
            travel_time: 0.0,
            work_time: 0.0,
            retry_risk: 0.0,
            priority: 1.0,
        }
    }
}

/// Composes travel time, work time, retry risk, and priority into one cost.
///
/// Dividing by `1 - retry_risk` charges the expected number of attempts
/// under geometric retry; dividing by `priority` makes important tasks
/// cheaper. A retry risk of 1 or more, or a non-positive priority, yields
/// `f64::INFINITY`: the pairing is infeasible, which the solver treats as an
/// ordinary cost value rather than an error.
pub fn compute_cost(factors: CostFactors) -> f64 {
    let CostFactors {
        travel_time,
        work_time,
        retry_risk,
        priority,
    } = factors;
    debug_assert!(
        travel_time >= 0.0 && work_time >= 0.0,
        "travel and work times must be non-negative"
    );
    if retry_risk >= 1.0 || priority <= 0.0 {
        return f64::INFINITY;
    }
    (travel_time + work_time) / ((1.0 - retry_risk) * priority)
}
