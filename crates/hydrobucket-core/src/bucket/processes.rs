/// Bucket model process functions.
///
/// Pure functions for each stage of the daily water balance. Rates come in
/// as mm/day; every returned flux is a depth in mm over one step of
/// `time_step` days.
use super::constants::{MM_PER_M, SECONDS_PER_DAY};

/// Stage 1: Split precipitation into direct runoff and infiltration.
///
/// The runoff coefficient is used as given, even outside [0, 1].
/// Returns (runoff, infiltration).
pub fn partition_precipitation(precip: f64, runoff_coefficient: f64, time_step: f64) -> (f64, f64) {
    let runoff = runoff_coefficient * precip * time_step;
    let infiltration = (1.0 - runoff_coefficient) * precip * time_step;
    (runoff, infiltration)
}

/// Stage 2: Actual evapotranspiration, proportional to store fullness.
///
/// Capped at the water available so ET alone never drains the store below zero.
pub fn actual_evapotranspiration(storage: f64, pet: f64, max_storage: f64, time_step: f64) -> f64 {
    let demand = (storage / max_storage) * pet * time_step;
    demand.min(storage)
}

/// Stage 3: Linear-reservoir baseflow, drawn after ET.
pub fn baseflow(storage: f64, baseflow_coefficient: f64, time_step: f64) -> f64 {
    baseflow_coefficient * storage * time_step
}

/// Stage 4: Saturation excess.
///
/// Returns (storage, overflow): storage capped at `max_storage` and the
/// excess that spilled, as a depth over the whole step [mm].
pub fn saturation_excess(storage: f64, max_storage: f64) -> (f64, f64) {
    if storage > max_storage {
        (max_storage, storage - max_storage)
    } else {
        (storage, 0.0)
    }
}

/// Volume [m³] of a depth [mm] spread over `area` [m²].
pub fn depth_to_volume(depth: f64, area: f64) -> f64 {
    depth * area / MM_PER_M
}

/// Mean discharge [m³/s] of a depth [mm] over `area` [m²] leaving during
/// one step of `time_step` days.
pub fn depth_to_discharge(depth: f64, area: f64, time_step: f64) -> f64 {
    depth_to_volume(depth, area) / (SECONDS_PER_DAY * time_step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn partition_conserves_precipitation() {
        let (r, i) = partition_precipitation(20.0, 0.3, 1.0);
        assert_relative_eq!(r, 6.0);
        assert_relative_eq!(i, 14.0);
        assert_relative_eq!(r + i, 20.0);
    }

    #[test]
    fn partition_passes_negative_coefficient_through() {
        let (r, i) = partition_precipitation(10.0, -1.0, 1.0);
        assert_relative_eq!(r, -10.0);
        assert_relative_eq!(i, 20.0);
    }

    #[test]
    fn partition_scales_with_time_step() {
        let (r, i) = partition_precipitation(10.0, 0.5, 2.0);
        assert_relative_eq!(r, 10.0);
        assert_relative_eq!(i, 10.0);
    }

    #[test]
    fn et_proportional_to_fullness() {
        assert_relative_eq!(actual_evapotranspiration(100.0, 4.0, 200.0, 1.0), 2.0);
        assert_relative_eq!(actual_evapotranspiration(200.0, 4.0, 200.0, 1.0), 4.0);
    }

    #[test]
    fn et_capped_by_available_storage() {
        // Demand far above what the store holds
        let aet = actual_evapotranspiration(1.0, 500.0, 1.0, 1.0);
        assert_relative_eq!(aet, 1.0);
    }

    #[test]
    fn zero_pet_no_et() {
        assert_eq!(actual_evapotranspiration(150.0, 0.0, 200.0, 1.0), 0.0);
    }

    #[test]
    fn baseflow_linear_in_storage() {
        assert_relative_eq!(baseflow(50.0, 0.1, 1.0), 5.0);
        assert_relative_eq!(baseflow(0.0, 0.1, 1.0), 0.0);
    }

    #[test]
    fn saturation_excess_caps_store() {
        let (s, o) = saturation_excess(240.0, 200.0);
        assert_relative_eq!(s, 200.0);
        assert_relative_eq!(o, 40.0);
    }

    #[test]
    fn no_excess_below_capacity() {
        assert_eq!(saturation_excess(199.9, 200.0), (199.9, 0.0));
        assert_eq!(saturation_excess(200.0, 200.0), (200.0, 0.0));
    }

    #[test]
    fn discharge_conversion() {
        // 1 mm over 86.4 km² in one day is 1 m³/s
        assert_relative_eq!(depth_to_discharge(1.0, 86.4e6, 1.0), 1.0);
        assert_relative_eq!(depth_to_discharge(1.0, 86.4e6, 2.0), 0.5);
        assert_relative_eq!(depth_to_volume(5.0, 38.77e6), 193_850.0);
    }
}
