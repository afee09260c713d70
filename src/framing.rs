use crate::config::Config;
use crate::lumber::Lumber;
use crate::types::{LumberPiece, Vec3};

/// Generates the cradle cage around a flat item: a pair of posts and a rung
/// at every cradle point, optional side diagonals between cradle points, and
/// a rail along each side.
pub struct Framer<'a> {
    config: &'a Config,
    lumber: Lumber,
}

impl<'a> Framer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            lumber: Lumber::new(config),
        }
    }

    /// `item_left` is the x of the item's left face; `dims` are its oriented
    /// dimensions and `layer_y` the floor of its layer.
    pub fn cradle(&self, item_left: f64, dims: Vec3, layer_y: f64) -> Vec<LumberPiece> {
        let lw = self.lumber.width;
        let lt = self.lumber.thick;
        let depth = dims.z;
        let spacing = self.config.framing_spacing;
        let pocket = dims.y + lt;

        let z_start = (self.config.pallet_length - depth) / 2.0;
        let left_x = item_left - lw / 2.0;
        let right_x = item_left + dims.x + lw / 2.0;
        let rung_span = right_x - left_x + lw;

        let mut pieces = Vec::new();
        for offset in cradle_offsets(depth, spacing) {
            let z = z_start + offset;

            pieces.push(self.lumber.post(left_x, layer_y, pocket, z));
            pieces.push(self.lumber.post(right_x, layer_y, pocket, z));
            pieces.push(
                self.lumber
                    .rung((left_x + right_x) / 2.0, layer_y + pocket, z, rung_span),
            );

            if self.config.add_bracing && offset + spacing <= depth {
                let next_z = z + spacing;
                for x in [left_x, right_x] {
                    pieces.push(self.lumber.brace(
                        Vec3::new(x, layer_y, z),
                        Vec3::new(x, layer_y + pocket, next_z),
                    ));
                }
            }
        }

        let rail_y = layer_y + pocket + lt;
        let mid_z = self.config.pallet_length / 2.0;
        pieces.push(self.lumber.rail(left_x, rail_y, mid_z, depth));
        pieces.push(self.lumber.rail(right_x, rail_y, mid_z, depth));

        pieces
    }
}

/// Offsets from the leading edge at which cradle points sit: every
/// `spacing`, up to and including `depth`.
pub fn cradle_offsets(depth: f64, spacing: f64) -> Vec<f64> {
    if !(spacing.is_finite() && spacing > 0.0) {
        return vec![0.0];
    }
    let steps = (depth / spacing).floor().max(0.0) as usize;
    (0..=steps).map(|k| k as f64 * spacing).collect()
}
