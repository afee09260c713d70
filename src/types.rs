use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::PackError;

/// Length below which an item may stand on end, regardless of `max_height`.
pub const STANDING_LENGTH_LIMIT: f64 = 90.0;

/// Board length, in feet, used for the bill-of-materials board count.
pub const BOARD_FEET: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &Vec3) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn max_component(&self) -> f64 {
        self.x.max(self.y).max(self.z)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}x{:.1}x{:.1}", self.x, self.y, self.z)
    }
}

/// One unit of a manifest line. Quantities are expanded before packing, so
/// every item here is a single physical piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub item_number: String,
    pub uid: String,
    pub height: f64,
    pub width: f64,
    pub length: f64,
    pub weight: f64,
    #[serde(default)]
    pub group: usize,
}

impl Item {
    pub fn new(item_number: &str, height: f64, width: f64, length: f64, weight: f64) -> Self {
        Self {
            item_number: item_number.to_string(),
            uid: format!("{item_number}-0"),
            height,
            width,
            length,
            weight,
            group: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Lying on its largest face, length running along the pallet.
    Flat,
    /// Standing on end, length pointing up.
    Standing,
}

impl Orientation {
    pub fn select(item: &Item, config: &Config) -> Self {
        if config.allow_vertical
            && item.length < config.max_height
            && item.length < STANDING_LENGTH_LIMIT
        {
            Orientation::Standing
        } else {
            Orientation::Flat
        }
    }

    /// Axis remap for this orientation: x across the pallet, y up, z along it.
    pub fn dims(self, item: &Item) -> Vec3 {
        match self {
            Orientation::Standing => Vec3::new(item.width, item.length, item.height),
            Orientation::Flat => Vec3::new(
                item.width.min(item.height),
                item.width.max(item.height),
                item.length,
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub item: Item,
    pub position: Vec3,
    pub dims: Vec3,
    pub orientation: Orientation,
}

impl PlacedItem {
    pub fn top(&self) -> f64 {
        self.position.y + self.dims.y / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LumberKind {
    BaseRunner,
    Post,
    Rung,
    Rail,
}

impl std::fmt::Display for LumberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LumberKind::BaseRunner => "base-runner",
            LumberKind::Post => "post",
            LumberKind::Rung => "rung",
            LumberKind::Rail => "rail",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub width: f64,
    pub thick: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum LumberPiece {
    Axial {
        kind: LumberKind,
        dims: Vec3,
        position: Vec3,
    },
    Diagonal {
        start: Vec3,
        end: Vec3,
        section: Section,
    },
}

impl LumberPiece {
    /// Linear stock consumed, in inches. An axial piece counts as one length
    /// of its longest side.
    pub fn stock_length(&self) -> f64 {
        match self {
            LumberPiece::Axial { dims, .. } => dims.max_component(),
            LumberPiece::Diagonal { start, end, .. } => start.distance(end),
        }
    }

    pub fn kind(&self) -> Option<LumberKind> {
        match self {
            LumberPiece::Axial { kind, .. } => Some(*kind),
            LumberPiece::Diagonal { .. } => None,
        }
    }

    pub fn is_diagonal(&self) -> bool {
        matches!(self, LumberPiece::Diagonal { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crate {
    pub id: usize,
    pub items: Vec<PlacedItem>,
    pub lumber: Vec<LumberPiece>,
    pub total_weight: f64,
    pub height: f64,
    /// Linear feet of lumber, rounded to one decimal.
    pub wood_usage: f64,
}

impl Crate {
    pub fn board_count(&self) -> u32 {
        (self.wood_usage / BOARD_FEET).ceil() as u32
    }

    pub fn lumber_count(&self, kind: LumberKind) -> usize {
        self.lumber.iter().filter(|l| l.kind() == Some(kind)).count()
    }

    pub fn diagonal_count(&self) -> usize {
        self.lumber.iter().filter(|l| l.is_diagonal()).count()
    }

    pub fn is_overweight(&self, config: &Config) -> bool {
        self.total_weight > config.max_weight
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub crates: Vec<Crate>,
    pub error: Option<PackError>,
}

impl Solution {
    pub fn crate_count(&self) -> usize {
        self.crates.len()
    }

    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    pub fn placed_count(&self) -> usize {
        self.crates.iter().map(|c| c.items.len()).sum()
    }

    pub fn total_weight(&self) -> f64 {
        self.crates.iter().map(|c| c.total_weight).sum()
    }

    pub fn total_wood_usage(&self) -> f64 {
        let total: f64 = self.crates.iter().map(|c| c.wood_usage).sum();
        (total * 10.0).round() / 10.0
    }

    pub fn total_boards(&self) -> u32 {
        self.crates.iter().map(|c| c.board_count()).sum()
    }
}
