use tracing::debug;

use crate::config::Config;
use crate::lumber::Lumber;
use crate::planner::{Planner, Row};
use crate::types::{Crate, Item, LumberPiece, PlacedItem};

/// Base runner positions as fractions of the pallet width.
pub const RUNNER_OFFSETS: [f64; 3] = [0.2, 0.5, 0.8];

/// Progress of one crate. Each step consumes the current state and yields
/// the next; `Closed` is terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum CrateState {
    Open,
    Filling { layer_y: f64 },
    RowClosed { layer_y: f64, row: Row },
    Closed { height: f64 },
}

#[derive(Debug, Default)]
struct Draft {
    items: Vec<PlacedItem>,
    lumber: Vec<LumberPiece>,
    weight: f64,
}

pub struct CrateBuilder<'a> {
    config: &'a Config,
    planner: Planner<'a>,
    lumber: Lumber,
}

impl<'a> CrateBuilder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            planner: Planner::new(config),
            lumber: Lumber::new(config),
        }
    }

    /// Fills one crate from the unplaced items of `queue`, marking every item
    /// it takes in `placed`.
    pub fn build(&self, id: usize, items: &[Item], queue: &[usize], placed: &mut [bool]) -> Crate {
        let mut draft = Draft::default();
        let mut state = CrateState::Open;

        loop {
            state = match state {
                CrateState::Closed { height } => return self.finish(id, draft, height),
                state => self.step(state, items, queue, placed, &mut draft),
            };
        }
    }

    fn step(
        &self,
        state: CrateState,
        items: &[Item],
        queue: &[usize],
        placed: &mut [bool],
        draft: &mut Draft,
    ) -> CrateState {
        match state {
            CrateState::Open => {
                draft.lumber.extend(self.base_runners());
                CrateState::Filling {
                    layer_y: self.config.base_height(),
                }
            }
            CrateState::Filling { layer_y } => {
                let row = self
                    .planner
                    .fill_row(items, queue, placed, &mut draft.weight, layer_y);
                if row.is_empty() {
                    CrateState::Closed { height: layer_y }
                } else {
                    CrateState::RowClosed { layer_y, row }
                }
            }
            CrateState::RowClosed { layer_y, row } => {
                let placed_row = self
                    .planner
                    .place_row(items, &row, layer_y, &mut draft.lumber);
                draft.items.extend(placed_row);
                let next = self.planner.next_layer(&row, layer_y);
                debug!(
                    layer_y,
                    next_layer_y = next,
                    items = row.len(),
                    width = row.width_used,
                    "row placed"
                );
                CrateState::Filling { layer_y: next }
            }
            closed @ CrateState::Closed { .. } => closed,
        }
    }

    fn base_runners(&self) -> Vec<LumberPiece> {
        RUNNER_OFFSETS
            .iter()
            .map(|f| {
                self.lumber
                    .base_runner(self.config.pallet_width * f, self.config.pallet_length)
            })
            .collect()
    }

    fn finish(&self, id: usize, draft: Draft, height: f64) -> Crate {
        let wood_usage = wood_usage(&draft.lumber);
        debug!(
            crate_id = id,
            items = draft.items.len(),
            lumber = draft.lumber.len(),
            weight = draft.weight,
            height,
            wood_usage,
            "crate closed"
        );
        Crate {
            id,
            items: draft.items,
            lumber: draft.lumber,
            total_weight: draft.weight,
            height,
            wood_usage,
        }
    }
}

/// Linear feet of stock, rounded to one decimal.
pub fn wood_usage(lumber: &[LumberPiece]) -> f64 {
    let inches: f64 = lumber.iter().map(|l| l.stock_length()).sum();
    (inches / 12.0 * 10.0).round() / 10.0
}
