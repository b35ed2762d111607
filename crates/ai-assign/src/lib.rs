//! Optimal character-to-task assignment for colony-simulation AI.
//!
//! Callers build a list of candidate pairings (usually by iterating
//! characters x tasks and composing costs with [`compute_cost`]), optionally
//! prune it with [`limit_assignments`], and pass it to [`optimize`], which
//! reduces the list in place to a minimum-cost matching: at most one task per
//! character, at most one character per task. The pipeline is designed to be
//! re-run on every animation frame; a long-lived [`Optimizer`] reuses its
//! working buffers across calls.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod candidate;
pub mod cost;
pub mod filter;
pub mod solver;

pub use candidate::{validate_assignments, Assignment, CandidateError, CharacterId, TaskId};
pub use cost::{compute_cost, CostFactors};
pub use filter::limit_assignments;
pub use solver::{optimize, Optimizer};
