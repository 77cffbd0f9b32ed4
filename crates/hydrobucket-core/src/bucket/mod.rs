/// Bucket: lumped single-store daily water balance.
///
/// Precipitation splits into direct runoff and infiltration; the store loses
/// water to evapotranspiration, linear baseflow and saturation excess; the
/// outlet receives runoff + baseflow + overflow, converted to m³/s.
pub mod constants;
pub mod fluxes;
pub mod mass_balance;
pub mod params;
pub mod processes;
pub mod run;
pub mod simulator;
pub mod state;

pub use fluxes::{DailyResult, DailyResultTimeseries};
pub use mass_balance::MassBalanceReport;
pub use params::{Advisory, Parameters};
pub use simulator::{Simulation, Simulator};
pub use state::State;
