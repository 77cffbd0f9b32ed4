/// Bucket model outputs.
///
/// Two levels: `DailyResult` holds a single step, `DailyResultTimeseries`
/// (derived) holds the full run as one `Vec` per field. Depths are mm over
/// the step; with a one-day step they read directly as mm/day.
use hydrobucket_macros::Fluxes;

use crate::traits::FluxesTimeseriesOps;

/// Single-step outputs, returned by `step()`.
#[derive(Debug, Clone, Copy, PartialEq, Fluxes)]
pub struct DailyResult {
    pub precipitation_mm: f64,
    pub potential_evapotranspiration_mm: f64,
    pub runoff_mm: f64,
    pub infiltration_mm: f64,
    pub evapotranspiration_mm: f64,
    pub baseflow_mm: f64,
    /// Saturation excess drained over the step [mm], a depth rather than a
    /// rate; divide by `time_step` for mm/day.
    pub overflow_mm: f64,
    /// Store level at the end of the step.
    pub storage_mm: f64,
    /// runoff + baseflow + overflow
    pub streamflow_mm: f64,
    pub streamflow_m3_per_s: f64,
}

impl FluxesTimeseriesOps<DailyResult> for DailyResultTimeseries {
    fn with_capacity(n: usize) -> Self {
        DailyResultTimeseries::with_capacity(n)
    }

    fn push(&mut self, f: &DailyResult) {
        DailyResultTimeseries::push(self, f)
    }

    fn len(&self) -> usize {
        DailyResultTimeseries::len(self)
    }

    fn is_empty(&self) -> bool {
        DailyResultTimeseries::is_empty(self)
    }
}

impl FromIterator<DailyResult> for DailyResultTimeseries {
    fn from_iter<I: IntoIterator<Item = DailyResult>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut ts = DailyResultTimeseries::with_capacity(iter.size_hint().0);
        for r in iter {
            ts.push(&r);
        }
        ts
    }
}
