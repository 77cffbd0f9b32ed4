/// hydrobucket: lumped single-store daily water balance in Rust.
///
/// Daily precipitation and potential evapotranspiration drive one soil store;
/// the outlet streamflow and the closing mass balance come out.
pub mod bucket;
pub mod error;
pub mod forcing;
pub mod metrics;
pub mod traits;

pub use bucket::{DailyResult, DailyResultTimeseries, MassBalanceReport, Parameters, Simulator};
pub use error::BucketError;
pub use forcing::{ForcingRecord, ForcingSeries};
