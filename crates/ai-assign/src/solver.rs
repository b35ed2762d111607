//! Optimal matching over a candidate set (Kuhn-Munkres on a dense matrix).

use crate::candidate::Assignment;

/// Absolute tolerance for equality-subgraph membership. Calibrated to
/// game-scale costs (seconds, meters) and part of the observable contract.
const EQ_TOLERANCE: f64 = 1e-4;

/// Matrix entry for a (character, task) pair with no supplied candidate.
/// Real entries are never equal to it: finite costs map to values >= 1.0 and
/// infeasible costs map far below it.
const BASELINE: f64 = 0.0;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EQ_TOLERANCE
}

/// Minimum-cost assignment solver with reusable working buffers.
///
/// [`optimize`](Optimizer::optimize) reduces a candidate set in place to an
/// optimal matching: at most one task per character, at most one character
/// per task, total cost minimal over the supplied candidates. Buffers grow to
/// the largest problem seen and are reused, so a long-lived instance runs
/// every animation frame without heap churn. One instance per thread;
/// disjoint candidate sets may be solved concurrently.
pub struct Optimizer {
    /// Dense value matrix, `nx * ny`, row-major on the X side.
    value: Vec<f64>,
    /// Dual labels for X and Y.
    lx: Vec<f64>,
    ly: Vec<f64>,
    /// Current matching: `xy[x]` is the Y partner of x, `yx[y]` the reverse.
    xy: Vec<Option<usize>>,
    yx: Vec<Option<usize>>,
    /// Alternating-tree membership for the current phase.
    in_tree_x: Vec<bool>,
    in_tree_y: Vec<bool>,
    /// `slack[y]` = min over x in the tree of `lx[x] + ly[y] - value[x][y]`,
    /// with `slack_arg[y]` the x attaining it.
    slack: Vec<f64>,
    slack_arg: Vec<usize>,
    /// Predecessor of x in the alternating tree; `None` marks the root.
    parent: Vec<Option<usize>>,
    /// FIFO queue for the equality-subgraph BFS.
    queue: Vec<usize>,
}

impl Optimizer {
    pub fn new() -> Self {
        Self {
            value: Vec::new(),
            lx: Vec::new(),
            ly: Vec::new(),
            xy: Vec::new(),
            yx: Vec::new(),
            in_tree_x: Vec::new(),
            in_tree_y: Vec::new(),
            slack: Vec::new(),
            slack_arg: Vec::new(),
            parent: Vec::new(),
            queue: Vec::new(),
        }
    }

    /// Removes every candidate that is not part of an optimal matching.
    ///
    /// Infinite-cost candidates are selected only when the matrix shape
    /// forces them (no alternative partner exists); callers should detect
    /// the infinite cost in the result and ignore the pairing. Empty input
    /// returns immediately with empty output.
    pub fn optimize(&mut self, assignments: &mut Vec<Assignment>) {
        if assignments.is_empty() {
            return;
        }
        debug_assert!(
            assignments
                .iter()
                .all(|a| !a.cost.is_nan() && a.cost >= 0.0),
            "candidate costs must be non-negative and not NaN"
        );

        let mut max_character = 0usize;
        let mut max_task = 0usize;
        let mut max_cost = 0.0f64;
        for a in assignments.iter() {
            max_character = max_character.max(a.character.index());
            max_task = max_task.max(a.task.index());
            if a.cost.is_finite() {
                max_cost = max_cost.max(a.cost);
            }
        }

        // The augmenting loop requires |X| <= |Y|; the smaller id space
        // becomes the X side.
        let characters_on_x = max_task > max_character;
        let (nx, ny) = if characters_on_x {
            (max_character + 1, max_task + 1)
        } else {
            (max_task + 1, max_character + 1)
        };

        self.build_matrix(assignments, nx, ny, max_cost, characters_on_x);
        self.run(nx, ny);

        let candidates = assignments.len();
        let xy = &mut self.xy;
        assignments.retain(|a| {
            let (x, y) = if characters_on_x {
                (a.character.index(), a.task.index())
            } else {
                (a.task.index(), a.character.index())
            };
            if xy[x] == Some(y) {
                // One copy per selected pair survives.
                xy[x] = None;
                true
            } else {
                false
            }
        });

        tracing::debug!(
            characters = if characters_on_x { nx } else { ny },
            tasks = if characters_on_x { ny } else { nx },
            candidates,
            retained = assignments.len(),
            "assignments optimized"
        );
    }

    /// Converts min-cost candidates into a dense max-value matrix.
    ///
    /// Finite costs map to `max_cost - cost + 1.0`, always >= 1.0, so
    /// minimizing cost becomes maximizing value. Unsupplied pairs keep the
    /// [`BASELINE`]; the matching may still route through them when no real
    /// candidate exists, and such edges are filtered out afterwards.
    /// Infeasible (infinite-cost) pairs sit far enough below the baseline
    /// that a matching only crosses one when forced, but stay finite so the
    /// label arithmetic never produces NaN.
    fn build_matrix(
        &mut self,
        assignments: &[Assignment],
        nx: usize,
        ny: usize,
        max_cost: f64,
        characters_on_x: bool,
    ) {
        self.value.clear();
        self.value.resize(nx * ny, BASELINE);
        let infeasible = -((max_cost + 2.0) * (nx as f64 + 1.0));

        for a in assignments {
            let (x, y) = if characters_on_x {
                (a.character.index(), a.task.index())
            } else {
                (a.task.index(), a.character.index())
            };
            let v = if a.cost.is_finite() {
                max_cost - a.cost + 1.0
            } else {
                infeasible
            };
            let slot = &mut self.value[x * ny + y];
            // The baseline doubles as "unwritten"; duplicates keep the
            // cheapest copy.
            *slot = if *slot == BASELINE { v } else { slot.max(v) };
        }
    }

    /// Maximum-weight perfect matching on the X side of the value matrix.
    fn run(&mut self, nx: usize, ny: usize) {
        self.lx.clear();
        self.lx.resize(nx, 0.0);
        self.ly.clear();
        self.ly.resize(ny, 0.0);
        self.xy.clear();
        self.xy.resize(nx, None);
        self.yx.clear();
        self.yx.resize(ny, None);
        self.in_tree_x.resize(nx, false);
        self.in_tree_y.resize(ny, false);
        self.slack.resize(ny, 0.0);
        self.slack_arg.resize(ny, 0);
        self.parent.resize(nx, None);

        for x in 0..nx {
            let mut best = f64::NEG_INFINITY;
            for y in 0..ny {
                best = best.max(self.value[x * ny + y]);
            }
            self.lx[x] = best;
        }

        let mut matched = 0usize;
        while matched < nx {
            // Root the alternating tree at the unmatched x with the largest
            // label.
            let mut root = None;
            let mut best = f64::NEG_INFINITY;
            for x in 0..nx {
                if self.xy[x].is_none() && self.lx[x] > best {
                    best = self.lx[x];
                    root = Some(x);
                }
            }
            let Some(root) = root else { break };

            for x in 0..nx {
                self.in_tree_x[x] = false;
                self.parent[x] = None;
            }
            for y in 0..ny {
                self.in_tree_y[y] = false;
                self.slack[y] = self.lx[root] + self.ly[y] - self.value[root * ny + y];
                self.slack_arg[y] = root;
            }
            self.in_tree_x[root] = true;
            self.queue.clear();
            self.queue.push(root);
            let mut head = 0;

            let (end_x, end_y) = 'phase: loop {
                // BFS through the equality subgraph.
                while head < self.queue.len() {
                    let x = self.queue[head];
                    head += 1;
                    for y in 0..ny {
                        if self.in_tree_y[y]
                            || !approx_eq(self.value[x * ny + y], self.lx[x] + self.ly[y])
                        {
                            continue;
                        }
                        match self.yx[y] {
                            // An exposed Y vertex: augmenting path found.
                            None => break 'phase (x, y),
                            Some(partner) => {
                                self.in_tree_y[y] = true;
                                self.queue.push(partner);
                                self.add_to_tree(partner, x, ny);
                            }
                        }
                    }
                }

                // No augmenting path in the current equality subgraph:
                // shift the labels by the smallest slack outside the tree.
                let mut delta = f64::INFINITY;
                for y in 0..ny {
                    if !self.in_tree_y[y] {
                        delta = delta.min(self.slack[y]);
                    }
                }
                for x in 0..nx {
                    if self.in_tree_x[x] {
                        self.lx[x] -= delta;
                    }
                }
                for y in 0..ny {
                    if self.in_tree_y[y] {
                        self.ly[y] += delta;
                    } else {
                        self.slack[y] -= delta;
                    }
                }

                // Edges that just became tight either finish the phase or
                // grow the tree.
                self.queue.clear();
                head = 0;
                for y in 0..ny {
                    if self.in_tree_y[y] || !approx_eq(self.slack[y], 0.0) {
                        continue;
                    }
                    match self.yx[y] {
                        None => break 'phase (self.slack_arg[y], y),
                        Some(partner) => {
                            self.in_tree_y[y] = true;
                            if !self.in_tree_x[partner] {
                                self.queue.push(partner);
                                self.add_to_tree(partner, self.slack_arg[y], ny);
                            }
                        }
                    }
                }
            };

            // Flip matched and unmatched edges along the augmenting path,
            // walking predecessors back to the root.
            let mut cx = end_x;
            let mut cy = end_y;
            loop {
                let previous_partner = self.xy[cx];
                self.yx[cy] = Some(cx);
                self.xy[cx] = Some(cy);
                match (self.parent[cx], previous_partner) {
                    (Some(px), Some(py)) => {
                        cx = px;
                        cy = py;
                    }
                    _ => break,
                }
            }
            matched += 1;
        }
    }

    /// Adds x to the alternating tree under `parent` and refreshes slacks.
    fn add_to_tree(&mut self, x: usize, parent: usize, ny: usize) {
        self.in_tree_x[x] = true;
        self.parent[x] = Some(parent);
        for y in 0..ny {
            let gap = self.lx[x] + self.ly[y] - self.value[x * ny + y];
            if gap < self.slack[y] {
                self.slack[y] = gap;
                self.slack_arg[y] = x;
            }
        }
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs [`Optimizer::optimize`] on a throwaway solver instance.
///
/// Callers on a per-frame budget should hold a long-lived [`Optimizer`] and
/// reuse its buffers instead.
pub fn optimize(assignments: &mut Vec<Assignment>) {
    Optimizer::new().optimize(assignments);
}
