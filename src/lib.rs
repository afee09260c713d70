pub mod builder;
pub mod config;
pub mod error;
pub mod framing;
pub mod lumber;
pub mod manifest;
pub mod planner;
pub mod render;
pub mod solver;
pub mod types;

pub use config::Config;
pub use error::{ConfigError, ManifestError, PackError};
pub use solver::{Solver, pack};
pub use types::{Crate, Item, LumberPiece, Orientation, PlacedItem, Solution};
