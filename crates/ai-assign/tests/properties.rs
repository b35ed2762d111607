//! Randomized invariants over the optimizer, checked against brute force
//! where the problem is small enough to enumerate.

use ai_assign::{optimize, Assignment};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Complete grid with integer-valued costs, so matching totals compare
/// exactly.
fn random_grid(rng: &mut StdRng, characters: u32, tasks: u32, max_cost: u32) -> Vec<Assignment> {
    let mut out = Vec::new();
    for c in 0..characters {
        for t in 0..tasks {
            out.push(Assignment::new(c, t, rng.random_range(0..=max_cost) as f64));
        }
    }
    out
}

/// Cheapest total over every way of giving each character a distinct task.
/// Requires `costs.len() <= costs[0].len()`.
fn brute_force_minimum(costs: &[Vec<f64>]) -> f64 {
    fn recurse(costs: &[Vec<f64>], c: usize, used: &mut Vec<bool>) -> f64 {
        if c == costs.len() {
            return 0.0;
        }
        let mut best = f64::INFINITY;
        for t in 0..used.len() {
            if used[t] {
                continue;
            }
            used[t] = true;
            let rest = recurse(costs, c + 1, used);
            used[t] = false;
            best = best.min(costs[c][t] + rest);
        }
        best
    }
    recurse(costs, 0, &mut vec![false; costs[0].len()])
}

#[test]
fn matches_brute_force_on_small_complete_grids() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let characters = rng.random_range(1..=5u32);
        let tasks = rng.random_range(characters..=6);
        let grid = random_grid(&mut rng, characters, tasks, 50);

        let costs: Vec<Vec<f64>> = (0..characters)
            .map(|c| {
                (0..tasks)
                    .map(|t| grid[(c * tasks + t) as usize].cost)
                    .collect()
            })
            .collect();
        let expected = brute_force_minimum(&costs);

        let mut candidates = grid.clone();
        optimize(&mut candidates);

        assert_eq!(candidates.len(), characters as usize);
        let actual: f64 = candidates.iter().map(|a| a.cost).sum();
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }
}

#[test]
fn output_is_a_matching_drawn_from_the_input() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..100 {
        let characters = rng.random_range(1..=12u32);
        let tasks = rng.random_range(1..=12u32);
        let mut candidates = Vec::new();
        for c in 0..characters {
            for t in 0..tasks {
                if rng.random_range(0.0..1.0) < 0.4 {
                    candidates.push(Assignment::new(c, t, rng.random_range(0..100) as f64));
                }
            }
        }
        let input = candidates.clone();
        optimize(&mut candidates);

        for (i, a) in candidates.iter().enumerate() {
            assert!(input.contains(a), "output pairing was present in the input");
            for b in &candidates[i + 1..] {
                assert_ne!(a.character, b.character);
                assert_ne!(a.task, b.task);
            }
        }
    }
}

#[test]
fn a_costlier_duplicate_candidate_cannot_raise_the_total() {
    let mut rng = StdRng::seed_from_u64(31);
    for _ in 0..100 {
        let characters = rng.random_range(1..=6u32);
        let tasks = rng.random_range(characters..=7);
        let grid = random_grid(&mut rng, characters, tasks, 40);

        let mut first = grid.clone();
        optimize(&mut first);
        let before: f64 = first.iter().map(|a| a.cost).sum();

        let worst = first.iter().map(|a| a.cost).fold(0.0, f64::max);
        let mut second = grid.clone();
        let c = rng.random_range(0..characters);
        let t = rng.random_range(0..tasks);
        second.push(Assignment::new(c, t, worst + rng.random_range(1..20) as f64));
        optimize(&mut second);
        let after: f64 = second.iter().map(|a| a.cost).sum();

        assert!(after <= before + 1e-6, "total went from {before} to {after}");
    }
}

#[test]
fn infinite_costs_stay_out_when_a_finite_matching_exists() {
    let mut rng = StdRng::seed_from_u64(43);
    for _ in 0..100 {
        let n = rng.random_range(2..=8u32);
        let mut candidates = Vec::new();
        for c in 0..n {
            for t in 0..n {
                // The diagonal stays finite, so a finite perfect matching
                // always exists no matter where infinities land.
                let cost = if c == t || rng.random_range(0.0..1.0) < 0.7 {
                    rng.random_range(0..50) as f64
                } else {
                    f64::INFINITY
                };
                candidates.push(Assignment::new(c, t, cost));
            }
        }
        optimize(&mut candidates);
        assert!(candidates.iter().all(|a| a.cost.is_finite()));
    }
}

#[test]
fn optimizing_twice_is_a_fixed_point() {
    let mut rng = StdRng::seed_from_u64(59);
    for _ in 0..100 {
        let characters = rng.random_range(1..=8u32);
        let tasks = rng.random_range(1..=8u32);
        let mut candidates = random_grid(&mut rng, characters, tasks, 30);
        optimize(&mut candidates);

        let mut again = candidates.clone();
        optimize(&mut again);

        candidates.sort_by_key(|a| a.character);
        again.sort_by_key(|a| a.character);
        assert_eq!(candidates, again);
    }
}
