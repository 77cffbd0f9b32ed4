/// Closing mass balance over a completed run.
use super::constants::SECONDS_PER_DAY;
use super::fluxes::DailyResultTimeseries;
use super::params::Parameters;
use super::processes::depth_to_volume;

/// Volumetric water budget of a run, all in m³.
///
/// `residual_m3 = total_storage_change_m3 - (inflow - outflow)`, which is zero
/// for a conservative run up to rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassBalanceReport {
    pub total_precipitation_m3: f64,
    pub total_evapotranspiration_m3: f64,
    /// Outlet volume, integrated from the per-second discharge.
    pub total_runoff_m3: f64,
    pub total_storage_change_m3: f64,
    pub residual_m3: f64,
}

impl MassBalanceReport {
    /// Build the report from a finished run.
    ///
    /// Pure function of its inputs. An empty series has no storage change.
    pub fn compute(
        results: &DailyResultTimeseries,
        params: &Parameters,
        initial_storage: f64,
    ) -> Self {
        let area = params.catchment_area;
        let seconds_per_step = SECONDS_PER_DAY * params.time_step;

        let precip: f64 = results.precipitation_mm.iter().sum();
        let aet: f64 = results.evapotranspiration_mm.iter().sum();
        let discharge: f64 = results.streamflow_m3_per_s.iter().sum();
        let final_storage = results
            .storage_mm
            .last()
            .copied()
            .unwrap_or(initial_storage);

        let total_precipitation_m3 = depth_to_volume(precip, area);
        let total_evapotranspiration_m3 = depth_to_volume(aet, area);
        let total_runoff_m3 = discharge * seconds_per_step;
        let total_storage_change_m3 = depth_to_volume(final_storage - initial_storage, area);

        let residual_m3 = total_storage_change_m3
            - (total_precipitation_m3 - total_evapotranspiration_m3 - total_runoff_m3);

        Self {
            total_precipitation_m3,
            total_evapotranspiration_m3,
            total_runoff_m3,
            total_storage_change_m3,
            residual_m3,
        }
    }

    /// Residual relative to the largest term of the budget.
    ///
    /// Zero when every term is zero.
    pub fn relative_residual(&self) -> f64 {
        let scale = [
            self.total_precipitation_m3,
            self.total_evapotranspiration_m3,
            self.total_runoff_m3,
            self.total_storage_change_m3,
        ]
        .iter()
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));
        if scale == 0.0 {
            return self.residual_m3.abs();
        }
        self.residual_m3.abs() / scale
    }

    /// Returns `true` if the relative residual is within `tolerance`.
    pub fn is_closed(&self, tolerance: f64) -> bool {
        self.relative_residual() <= tolerance
    }
}
