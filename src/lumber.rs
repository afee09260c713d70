use crate::config::Config;
use crate::types::{LumberKind, LumberPiece, Section, Vec3};

/// Builds lumber pieces of one stock section.
#[derive(Debug, Clone, Copy)]
pub struct Lumber {
    pub width: f64,
    pub thick: f64,
}

impl Lumber {
    pub fn new(config: &Config) -> Self {
        Self {
            width: config.lumber_width,
            thick: config.lumber_thick,
        }
    }

    pub fn axial(kind: LumberKind, dims: Vec3, position: Vec3) -> LumberPiece {
        LumberPiece::Axial {
            kind,
            dims,
            position,
        }
    }

    pub fn diagonal(start: Vec3, end: Vec3, section: Section) -> LumberPiece {
        LumberPiece::Diagonal {
            start,
            end,
            section,
        }
    }

    pub fn section(&self) -> Section {
        Section {
            width: self.width,
            thick: self.thick,
        }
    }

    /// Runner lying flat along the full pallet length, centred at `x`.
    pub fn base_runner(&self, x: f64, pallet_length: f64) -> LumberPiece {
        Self::axial(
            LumberKind::BaseRunner,
            Vec3::new(self.width, self.thick, pallet_length),
            Vec3::new(x, self.thick / 2.0, pallet_length / 2.0),
        )
    }

    /// Vertical post of `height` standing on `base_y`.
    pub fn post(&self, x: f64, base_y: f64, height: f64, z: f64) -> LumberPiece {
        Self::axial(
            LumberKind::Post,
            Vec3::new(self.width, height, self.width),
            Vec3::new(x, base_y + height / 2.0, z),
        )
    }

    /// Cross member spanning `span` across the pallet, centred at (`x`, `y`, `z`).
    pub fn rung(&self, x: f64, y: f64, z: f64, span: f64) -> LumberPiece {
        Self::axial(
            LumberKind::Rung,
            Vec3::new(span, self.thick, self.width),
            Vec3::new(x, y, z),
        )
    }

    /// Longitudinal rail of `length` centred at (`x`, `y`, `z`).
    pub fn rail(&self, x: f64, y: f64, z: f64, length: f64) -> LumberPiece {
        Self::axial(
            LumberKind::Rail,
            Vec3::new(self.width, self.thick, length),
            Vec3::new(x, y, z),
        )
    }

    pub fn brace(&self, start: Vec3, end: Vec3) -> LumberPiece {
        Self::diagonal(start, end, self.section())
    }
}
