//! Manifest lines and their expansion into unit items.
//!
//! The packing engine only ever sees unit items; everything here runs before
//! it and is where malformed input gets dropped or rejected.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ManifestError;
use crate::types::Item;

/// Number of distinct presentation groups; group indices wrap around.
pub const GROUP_COUNT: usize = 12;

/// Largest quantity a single manifest line may expand to.
pub const MAX_QTY: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestLine {
    pub item_number: String,
    pub height: f64,
    pub width: f64,
    pub length: f64,
    pub weight: f64,
    #[serde(default = "default_qty")]
    pub qty: u32,
}

fn default_qty() -> u32 {
    1
}

impl ManifestLine {
    pub fn new(
        item_number: &str,
        height: f64,
        width: f64,
        length: f64,
        weight: f64,
        qty: u32,
    ) -> Self {
        Self {
            item_number: item_number.to_string(),
            height,
            width,
            length,
            weight,
            qty,
        }
    }

    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.item_number.trim().is_empty() {
            return Err(ManifestError::EmptyLabel);
        }
        let fields = [
            ("height", self.height),
            ("width", self.width),
            ("length", self.length),
            ("weight", self.weight),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ManifestError::InvalidDimension {
                    item: self.item_number.clone(),
                    field,
                    value,
                });
            }
        }
        if self.qty > MAX_QTY {
            return Err(ManifestError::QuantityTooLarge {
                item: self.item_number.clone(),
                qty: self.qty,
                max: MAX_QTY,
            });
        }
        Ok(())
    }
}

/// One unit item per quantity count, in manifest order.
pub fn expand(lines: &[ManifestLine]) -> Vec<Item> {
    let mut items = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        for n in 0..line.qty {
            items.push(Item {
                item_number: line.item_number.clone(),
                uid: format!("{}-{}", line.item_number, n),
                height: line.height,
                width: line.width,
                length: line.length,
                weight: line.weight,
                group: idx % GROUP_COUNT,
            });
        }
    }
    items
}

/// Parses `item,height,width,length,weight,qty` rows. The first line is a
/// header. Rows that are short, unlabelled or carry non-numeric or
/// non-positive measurements are dropped.
pub fn parse_csv(text: &str) -> Vec<ManifestLine> {
    let mut lines = Vec::new();
    for (row_no, row) in text.lines().enumerate().skip(1) {
        let cells: Vec<&str> = row.split(',').map(str::trim).collect();
        if cells.len() < 6 || cells[0].is_empty() {
            continue;
        }
        match parse_row(&cells) {
            Some(line) => lines.push(line),
            None => debug!(row = row_no + 1, "dropping malformed manifest row"),
        }
    }
    lines
}

fn parse_row(cells: &[&str]) -> Option<ManifestLine> {
    let number = |s: &str| s.parse::<f64>().ok().filter(|v| v.is_finite());
    let line = ManifestLine {
        item_number: cells[0].to_string(),
        height: number(cells[1])?,
        width: number(cells[2])?,
        length: number(cells[3])?,
        weight: number(cells[4])?,
        qty: parse_qty(cells[5])?,
    };
    line.validate().ok()?;
    Some(line)
}

/// Missing or zero quantities count as one; negative ones drop the row.
fn parse_qty(cell: &str) -> Option<u32> {
    match cell.parse::<f64>() {
        Ok(q) if q < 0.0 => None,
        Ok(q) if q.is_finite() && q > 0.0 => Some(q.ceil() as u32),
        _ => Some(1),
    }
}

pub fn demo() -> Vec<ManifestLine> {
    vec![
        ManifestLine::new("PIPE-240-HVY", 4.5, 4.5, 240.0, 180.0, 4),
        ManifestLine::new("PIPE-120-STD", 4.0, 4.0, 120.0, 80.0, 6),
        ManifestLine::new("SHORT-POST-60", 4.0, 4.0, 60.0, 45.0, 15),
        ManifestLine::new("CURVED-96", 8.0, 12.0, 96.0, 65.0, 2),
    ]
}
