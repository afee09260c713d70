use std::cmp::Ordering;

use tracing::{info, warn};

use crate::builder::CrateBuilder;
use crate::config::Config;
use crate::error::PackError;
use crate::types::{Item, Solution};

/// Lengths closer than this are treated as equal when seeding the queue.
pub const LENGTH_TIE: f64 = 5.0;

pub struct Solver {
    config: Config,
    items: Vec<Item>,
}

impl Solver {
    pub fn new(config: Config, items: Vec<Item>) -> Self {
        Self { config, items }
    }

    /// Fills crates one after another until every item is placed or a pass
    /// places nothing. Crates completed before a failure are kept.
    pub fn solve(&self) -> Solution {
        let items = &self.items;
        let builder = CrateBuilder::new(&self.config);

        let mut placed = vec![false; items.len()];
        let mut queue = seed_order(items);
        let mut crates = Vec::new();

        while !queue.is_empty() {
            let before = queue.len();
            let packed = builder.build(crates.len() + 1, items, &queue, &mut placed);

            let remaining: Vec<usize> = queue.iter().copied().filter(|&i| !placed[i]).collect();
            if remaining.len() == before {
                let error = PackError::FitFailure {
                    remaining: before,
                    first: items[queue[0]].uid.clone(),
                };
                warn!(crates = crates.len(), %error, "packing stopped");
                return Solution {
                    crates,
                    error: Some(error),
                };
            }

            crates.push(packed);
            queue = remaining;
        }

        info!(
            items = items.len(),
            crates = crates.len(),
            "packing complete"
        );
        Solution {
            crates,
            error: None,
        }
    }
}

pub fn pack(items: &[Item], config: &Config) -> Solution {
    Solver::new(*config, items.to_vec()).solve()
}

/// Longest first; lengths within `LENGTH_TIE` of each other go heaviest first.
fn seed_cmp(a: &Item, b: &Item) -> Ordering {
    let ord = if (b.length - a.length).abs() > LENGTH_TIE {
        b.length.partial_cmp(&a.length)
    } else {
        b.weight.partial_cmp(&a.weight)
    };
    ord.unwrap_or(Ordering::Equal)
}

/// Indices of `items` in packing order.
///
/// `seed_cmp` is not transitive (a chain of near-equal lengths can span more
/// than the tie window), so a stable insertion pass is used instead of
/// `sort_by`, which may panic on such comparators.
pub fn seed_order(items: &[Item]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    for i in 1..order.len() {
        let mut j = i;
        while j > 0 && seed_cmp(&items[order[j - 1]], &items[order[j]]) == Ordering::Greater {
            order.swap(j - 1, j);
            j -= 1;
        }
    }
    order
}
