//! Candidate pruning that bounds solver density.

use crate::candidate::Assignment;

/// Keeps at most `per_character` pairings per character and `per_task`
/// pairings per task, preferring the cheapest.
///
/// Sorts by ascending cost (ties broken by character id, then task id) and
/// walks the sorted list, retaining a pairing only while both of its
/// counters are under the caps. O(E log E) in the candidate count.
///
/// Survivor order is unspecified. Pruning can leave the candidate graph
/// without a perfect matching; [`optimize`](crate::optimize) tolerates that
/// and leaves the affected characters or tasks unmatched.
pub fn limit_assignments(
    assignments: &mut Vec<Assignment>,
    per_character: usize,
    per_task: usize,
) {
    if assignments.is_empty() {
        return;
    }

    assignments.sort_by(|a, b| {
        a.cost
            .total_cmp(&b.cost)
            .then_with(|| a.character.cmp(&b.character))
            .then_with(|| a.task.cmp(&b.task))
    });

    let mut max_character = 0;
    let mut max_task = 0;
    for a in assignments.iter() {
        max_character = max_character.max(a.character.index());
        max_task = max_task.max(a.task.index());
    }

    // Counter slots are indexed directly by id; sparse ids over-allocate.
    let mut character_used = vec![0usize; max_character + 1];
    let mut task_used = vec![0usize; max_task + 1];

    assignments.retain(|a| {
        let c = &mut character_used[a.character.index()];
        let t = &mut task_used[a.task.index()];
        if *c >= per_character || *t >= per_task {
            return false;
        }
        *c += 1;
        *t += 1;
        true
    });
}
