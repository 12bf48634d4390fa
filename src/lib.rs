pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::storage::LocalStorage;
pub use config::SkiAreaConfig;
pub use core::{importer::Importer, ski_area::SkiArea};
pub use domain::model::{ImportReport, Lift, LiftType, Parking, Slope};
pub use utils::error::{Result, SkiAreaError};
