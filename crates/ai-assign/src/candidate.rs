//! Candidate pairing records exchanged with the solver.

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dense character index.
///
/// Ids are used directly as array indices; callers map external keys
/// (strings, entity handles) to compact integers and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CharacterId(pub u32);

impl CharacterId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Dense task index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TaskId(pub u32);

impl TaskId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A proposed character-to-task pairing with its composed cost.
///
/// Costs are finite and non-negative, or `f64::INFINITY` for pairings that
/// must never be chosen. Candidate vectors are mutated in place by
/// [`limit_assignments`](crate::limit_assignments) and
/// [`optimize`](crate::optimize); survivor order is unspecified.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assignment {
    pub character: CharacterId,
    pub task: TaskId,
    pub cost: f64,
}

impl Assignment {
    pub fn new(character: u32, task: u32, cost: f64) -> Self {
        Self {
            character: CharacterId(character),
            task: TaskId(task),
            cost,
        }
    }
}

/// Candidate shapes rejected by [`validate_assignments`].
#[derive(Debug, Error, PartialEq)]
pub enum CandidateError {
    #[error("cost for character {character} / task {task} is NaN")]
    NanCost { character: u32, task: u32 },

    #[error("cost {cost} for character {character} / task {task} is negative")]
    NegativeCost {
        character: u32,
        task: u32,
        cost: f64,
    },
}

/// Checks a candidate set before it enters the hot path.
///
/// The solver itself only `debug_assert!`s these conditions and proceeds
/// silently in release builds; callers that cannot trust their cost sources
/// should validate at the boundary instead.
pub fn validate_assignments(assignments: &[Assignment]) -> Result<(), CandidateError> {
    for a in assignments {
        if a.cost.is_nan() {
            return Err(CandidateError::NanCost {
                character: a.character.0,
                task: a.task.0,
            });
        }
        if a.cost < 0.0 {
            return Err(CandidateError::NegativeCost {
                character: a.character.0,
                task: a.task.0,
                cost: a.cost,
            });
        }
    }
    Ok(())
}
