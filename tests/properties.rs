//! Property-based tests for the packing invariants

use crate_optimizer::types::{Crate, Orientation};
use crate_optimizer::{Config, Item, pack};
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

fn item_strategy() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (1.0f64..30.0, 1.0f64..30.0, 10.0f64..240.0, 1.0f64..400.0)
}

fn manifest_strategy() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(item_strategy(), 1..40).prop_map(|dims| {
        dims.into_iter()
            .enumerate()
            .map(|(n, (height, width, length, weight))| Item {
                uid: format!("ITEM-{n}"),
                ..Item::new("ITEM", height, width, length, weight)
            })
            .collect()
    })
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (any::<bool>(), any::<bool>(), 500.0f64..3000.0).prop_map(
        |(add_bracing, allow_vertical, max_weight)| Config {
            add_bracing,
            allow_vertical,
            max_weight,
            ..Config::default()
        },
    )
}

/// Summed row footprints per crate, keyed by row floor.
fn row_widths(c: &Crate, config: &Config) -> Vec<f64> {
    let mut rows: BTreeMap<i64, (usize, f64, Orientation)> = BTreeMap::new();
    for p in &c.items {
        let floor = p.position.y - p.dims.y / 2.0;
        let entry = rows
            .entry((floor * 1e6).round() as i64)
            .or_insert((0, 0.0, p.orientation));
        entry.0 += 1;
        entry.1 += p.dims.x;
        assert_eq!(entry.2, p.orientation, "row mixes orientations");
    }
    rows.values()
        .map(|&(n, width, orientation)| match orientation {
            Orientation::Flat => width + (n + 1) as f64 * config.lumber_width,
            Orientation::Standing => width + n as f64 * 0.5,
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_crates_respect_limits(items in manifest_strategy(), config in config_strategy()) {
        let sol = pack(&items, &config);

        for c in &sol.crates {
            prop_assert!(!c.items.is_empty(), "crate {} placed nothing", c.id);
            prop_assert!(c.total_weight <= config.max_weight);
            for p in &c.items {
                prop_assert!(p.top() <= config.max_height + 1e-9);
                if p.orientation == Orientation::Standing {
                    let floor = p.position.y - p.dims.y / 2.0;
                    prop_assert!((floor - config.base_height()).abs() < 1e-9);
                }
            }
            for width in row_widths(c, &config) {
                prop_assert!(width <= config.effective_width() + 1e-9);
            }
        }
    }

    #[test]
    fn prop_items_conserved(items in manifest_strategy(), config in config_strategy()) {
        let sol = pack(&items, &config);

        let mut seen: HashMap<&str, usize> = HashMap::new();
        for p in sol.crates.iter().flat_map(|c| &c.items) {
            *seen.entry(p.item.uid.as_str()).or_default() += 1;
        }
        prop_assert!(seen.values().all(|&n| n == 1), "an item was placed twice");

        if sol.is_complete() {
            prop_assert_eq!(seen.len(), items.len());
        } else {
            prop_assert!(seen.len() < items.len());
        }
    }

    #[test]
    fn prop_deterministic(items in manifest_strategy(), config in config_strategy()) {
        let a = pack(&items, &config);
        let b = pack(&items, &config);
        prop_assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
