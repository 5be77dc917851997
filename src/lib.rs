pub mod comparison;
pub mod config;
pub mod countries;
pub mod error;
pub mod report;
pub mod scenario;
pub mod simulator;
pub mod web;

pub use comparison::{Comparator, Comparison};
pub use config::AppConfig;
pub use error::ValidationError;
pub use simulator::{simulate, GrowthSimulator, Population, SimulationRequest, SimulationResult};
