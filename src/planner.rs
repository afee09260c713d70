use crate::config::Config;
use crate::framing::Framer;
use crate::types::{Item, LumberPiece, Orientation, PlacedItem, Vec3};

/// Gap left beside each standing item in place of framing posts.
pub const STANDING_CLEARANCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowEntry {
    /// Position of the item in the run's item arena.
    pub index: usize,
    pub orientation: Orientation,
    pub dims: Vec3,
    /// Width claimed across the pallet, framing allowance included.
    pub footprint: f64,
}

/// Items accepted side by side across the pallet at one height.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub entries: Vec<RowEntry>,
    pub width_used: f64,
    pub max_height: f64,
    pub max_depth: f64,
}

impl Row {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Orientation class fixed by the first accepted item.
    pub fn orientation(&self) -> Option<Orientation> {
        self.entries.first().map(|e| e.orientation)
    }
}

pub struct Planner<'a> {
    config: &'a Config,
    framer: Framer<'a>,
}

impl<'a> Planner<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            framer: Framer::new(config),
        }
    }

    /// Greedily fills one row from `queue`, in order. Accepted items are
    /// marked in `placed` and their weight is added to `crate_weight` as
    /// soon as they are taken.
    pub fn fill_row(
        &self,
        items: &[Item],
        queue: &[usize],
        placed: &mut [bool],
        crate_weight: &mut f64,
        layer_y: f64,
    ) -> Row {
        let config = self.config;
        let eff_width = config.effective_width();
        let eff_length = config.effective_length();
        let on_base = layer_y <= config.base_height();
        let post = config.lumber_width;

        let mut row = Row::default();

        for &index in queue {
            if placed[index] {
                continue;
            }
            let item = &items[index];

            if *crate_weight + item.weight > config.max_weight {
                continue;
            }

            let orientation = Orientation::select(item, config);
            if orientation == Orientation::Standing && !on_base {
                continue;
            }
            if row.orientation().is_some_and(|o| o != orientation) {
                continue;
            }

            let dims = orientation.dims(item);
            let footprint = match orientation {
                Orientation::Flat if row.is_empty() => dims.x + 2.0 * post,
                Orientation::Flat => dims.x + post,
                Orientation::Standing => dims.x + STANDING_CLEARANCE,
            };

            // Standing items are not checked against the usable length.
            if orientation == Orientation::Flat && dims.z > eff_length {
                continue;
            }
            if layer_y + dims.y > config.max_height {
                continue;
            }
            if row.width_used + footprint > eff_width {
                continue;
            }

            row.entries.push(RowEntry {
                index,
                orientation,
                dims,
                footprint,
            });
            row.width_used += footprint;
            row.max_height = row.max_height.max(dims.y);
            row.max_depth = row.max_depth.max(dims.z);

            placed[index] = true;
            *crate_weight += item.weight;
        }

        row
    }

    /// Positions the row's items, centred across the pallet and along its
    /// length, and appends the cradle of every flat item to `lumber`.
    pub fn place_row(
        &self,
        items: &[Item],
        row: &Row,
        layer_y: f64,
        lumber: &mut Vec<LumberPiece>,
    ) -> Vec<PlacedItem> {
        let config = self.config;
        let post = config.lumber_width;
        let mid_z = config.pallet_length / 2.0;

        let mut cursor = (config.pallet_width - row.width_used) / 2.0;
        let mut placed = Vec::with_capacity(row.len());

        for entry in &row.entries {
            let dims = entry.dims;
            let left = match entry.orientation {
                Orientation::Flat => cursor + post,
                Orientation::Standing => cursor,
            };

            placed.push(PlacedItem {
                item: items[entry.index].clone(),
                position: Vec3::new(left + dims.x / 2.0, layer_y + dims.y / 2.0, mid_z),
                dims,
                orientation: entry.orientation,
            });

            match entry.orientation {
                Orientation::Flat => {
                    lumber.extend(self.framer.cradle(left, dims, layer_y));
                    cursor += dims.x + post;
                }
                Orientation::Standing => cursor += dims.x + STANDING_CLEARANCE,
            }
        }

        placed
    }

    /// Floor of the next layer after `row`. Flat rows leave room for their
    /// rung and the next layer's clearance; nothing is stacked on standing
    /// items beyond their own height.
    pub fn next_layer(&self, row: &Row, layer_y: f64) -> f64 {
        match row.orientation() {
            Some(Orientation::Standing) => layer_y + row.max_height,
            _ => layer_y + row.max_height + 2.0 * self.config.lumber_thick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(config: &Config, items: &[Item], layer_y: f64) -> (Row, Vec<bool>, f64) {
        let planner = Planner::new(config);
        let queue: Vec<usize> = (0..items.len()).collect();
        let mut placed = vec![false; items.len()];
        let mut weight = 0.0;
        let row = planner.fill_row(items, &queue, &mut placed, &mut weight, layer_y);
        (row, placed, weight)
    }

    #[test]
    fn test_flat_footprint_allowance() {
        let config = Config::default();
        let items = vec![
            Item::new("A", 4.0, 4.0, 120.0, 80.0),
            Item::new("B", 4.0, 4.0, 120.0, 80.0),
        ];
        let (row, placed, weight) = fill(&config, &items, config.base_height());
        assert_eq!(row.len(), 2);
        assert_eq!(row.entries[0].footprint, 4.0 + 7.0);
        assert_eq!(row.entries[1].footprint, 4.0 + 3.5);
        assert_eq!(row.width_used, 18.5);
        assert_eq!(placed, vec![true, true]);
        assert_eq!(weight, 160.0);
    }

    #[test]
    fn test_weight_gate_skips_heavy_item() {
        let config = Config {
            max_weight: 100.0,
            ..Config::default()
        };
        let items = vec![
            Item::new("A", 4.0, 4.0, 120.0, 80.0),
            Item::new("B", 4.0, 4.0, 120.0, 80.0),
            Item::new("C", 4.0, 4.0, 120.0, 20.0),
        ];
        let (row, placed, weight) = fill(&config, &items, config.base_height());
        assert_eq!(row.len(), 2);
        assert_eq!(placed, vec![true, false, true]);
        assert_eq!(weight, 100.0);
    }

    #[test]
    fn test_row_is_orientation_homogeneous() {
        let config = Config::default();
        let items = vec![
            Item::new("SHORT", 4.0, 4.0, 60.0, 45.0),
            Item::new("LONG", 4.0, 4.0, 120.0, 80.0),
            Item::new("SHORT", 4.0, 4.0, 60.0, 45.0),
        ];
        let (row, placed, _) = fill(&config, &items, config.base_height());
        assert_eq!(row.orientation(), Some(Orientation::Standing));
        assert_eq!(placed, vec![true, false, true]);
        assert_eq!(row.entries[0].footprint, 4.0 + STANDING_CLEARANCE);
    }

    #[test]
    fn test_standing_only_on_base_layer() {
        let config = Config::default();
        let items = vec![Item::new("SHORT", 4.0, 4.0, 60.0, 45.0)];
        let (row, placed, weight) = fill(&config, &items, 10.0);
        assert!(row.is_empty());
        assert_eq!(placed, vec![false]);
        assert_eq!(weight, 0.0);
    }

    #[test]
    fn test_rejects_flat_item_longer_than_pallet() {
        let config = Config::default();
        let items = vec![Item::new("LONG", 4.0, 4.0, 249.0, 80.0)];
        let (row, _, _) = fill(&config, &items, config.base_height());
        assert!(row.is_empty());
    }

    #[test]
    fn test_standing_item_ignores_usable_length() {
        let config = Config {
            pallet_length: 20.0,
            ..Config::default()
        };
        // Standing depth is the item's height: 30 against 18 usable.
        let items = vec![Item::new("S", 30.0, 4.0, 60.0, 10.0)];
        let (row, placed, _) = fill(&config, &items, config.base_height());
        assert_eq!(row.len(), 1);
        assert_eq!(row.orientation(), Some(Orientation::Standing));
        assert!(row.entries[0].dims.z > config.effective_length());
        assert_eq!(placed, vec![true]);

        let sol = crate::solver::pack(&items, &config);
        assert!(sol.is_complete());
        assert_eq!(sol.crates[0].items[0].orientation, Orientation::Standing);
    }

    #[test]
    fn test_rejects_item_over_max_height() {
        let config = Config::default();
        let items = vec![Item::new("TALL", 20.0, 4.0, 120.0, 80.0)];
        let (row, _, _) = fill(&config, &items, 65.0);
        assert!(row.is_empty());
        let (row, _, _) = fill(&config, &items, 60.0);
        assert_eq!(row.len(), 1);
    }

    #[test]
    fn test_rejects_width_overflow() {
        let config = Config::default();
        // 82 usable: first item takes 40 + 7, second would need 40 + 3.5.
        let items = vec![
            Item::new("A", 40.0, 40.0, 120.0, 80.0),
            Item::new("B", 40.0, 40.0, 120.0, 80.0),
        ];
        let (row, placed, _) = fill(&config, &items, config.base_height());
        assert_eq!(row.len(), 1);
        assert_eq!(placed, vec![true, false]);
    }

    #[test]
    fn test_place_row_centres_items() {
        let config = Config::default();
        let items = vec![Item::new("A", 4.0, 4.0, 120.0, 80.0)];
        let planner = Planner::new(&config);
        let (row, _, _) = fill(&config, &items, config.base_height());

        let mut lumber = Vec::new();
        let placed = planner.place_row(&items, &row, 1.5, &mut lumber);
        assert_eq!(placed.len(), 1);
        // Row is 11 wide, starts at 36.5, item sits one post in.
        assert_eq!(placed[0].position, Vec3::new(36.5 + 3.5 + 2.0, 3.5, 125.0));
        assert_eq!(placed[0].orientation, Orientation::Flat);
        assert!(!lumber.is_empty());
    }

    #[test]
    fn test_place_standing_row_adds_no_lumber() {
        let config = Config::default();
        let items = vec![
            Item::new("S", 4.0, 4.0, 60.0, 45.0),
            Item::new("S", 4.0, 4.0, 60.0, 45.0),
        ];
        let planner = Planner::new(&config);
        let (row, _, _) = fill(&config, &items, config.base_height());

        let mut lumber = Vec::new();
        let placed = planner.place_row(&items, &row, 1.5, &mut lumber);
        assert!(lumber.is_empty());
        assert_eq!(placed[1].position.x - placed[0].position.x, 4.5);
        assert_eq!(placed[0].position.y, 1.5 + 30.0);
    }

    #[test]
    fn test_next_layer() {
        let config = Config::default();
        let planner = Planner::new(&config);
        let flat = vec![Item::new("A", 6.0, 4.0, 120.0, 80.0)];
        let (row, _, _) = fill(&config, &flat, 1.5);
        assert_eq!(planner.next_layer(&row, 1.5), 1.5 + 6.0 + 3.0);

        let standing = vec![Item::new("S", 4.0, 4.0, 60.0, 45.0)];
        let (row, _, _) = fill(&config, &standing, 1.5);
        assert_eq!(planner.next_layer(&row, 1.5), 61.5);
    }
}
