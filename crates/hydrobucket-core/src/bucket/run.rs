/// Bucket model orchestration functions.
///
/// - `step()`: Execute a single timestep → (State, DailyResult)
/// - `run()`: Execute over a forcing series → DailyResultTimeseries
use super::constants::SECONDS_PER_DAY;
use super::fluxes::{DailyResult, DailyResultTimeseries};
use super::params::Parameters;
use super::processes;
use super::state::State;
use crate::error::BucketError;
use crate::forcing::ForcingRecord;
use crate::traits::HydrologicalModel;

/// Run-constant unit conversion factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepContext {
    /// Outlet volume of one millimetre over the catchment [m³/mm].
    pub volume_per_mm: f64,
    /// Step duration [s].
    pub seconds_per_step: f64,
}

impl StepContext {
    pub fn new(params: &Parameters) -> Self {
        Self {
            volume_per_mm: processes::depth_to_volume(1.0, params.catchment_area),
            seconds_per_step: SECONDS_PER_DAY * params.time_step,
        }
    }
}

/// Execute one timestep of the bucket model.
///
/// Takes current state + forcing, returns new state + all fluxes. The order
/// is fixed: infiltration, then ET, then baseflow, then saturation excess.
pub fn step(
    state: &State,
    params: &Parameters,
    forcing: &ForcingRecord,
    context: &StepContext,
) -> (State, DailyResult) {
    let dt = params.time_step;
    let precip = forcing.precipitation;
    let pet = forcing.potential_evapotranspiration;

    // Stage 1: Runoff / infiltration split
    let (runoff, infiltration) =
        processes::partition_precipitation(precip, params.runoff_coefficient, dt);
    let s1 = state.storage + infiltration;

    // Stage 2: Actual ET
    let aet = processes::actual_evapotranspiration(s1, pet, params.max_storage, dt);
    let s2 = s1 - aet;

    // Stage 3: Baseflow
    let qb = processes::baseflow(s2, params.baseflow_coefficient, dt);
    let s3 = s2 - qb;

    // Stage 4: Saturation excess
    let (s_final, overflow) = processes::saturation_excess(s3, params.max_storage);

    let streamflow = runoff + qb + overflow;
    let streamflow_m3_per_s = streamflow * context.volume_per_mm / context.seconds_per_step;

    let new_state = State { storage: s_final };

    let result = DailyResult {
        precipitation_mm: precip * dt,
        potential_evapotranspiration_mm: pet * dt,
        runoff_mm: runoff,
        infiltration_mm: infiltration,
        evapotranspiration_mm: aet,
        baseflow_mm: qb,
        overflow_mm: overflow,
        storage_mm: s_final,
        streamflow_mm: streamflow,
        streamflow_m3_per_s,
    };

    (new_state, result)
}

/// The single-store bucket model.
pub struct Bucket;

impl HydrologicalModel for Bucket {
    type Params = Parameters;
    type State = State;
    type Forcing = ForcingRecord;
    type Fluxes = DailyResult;
    type FluxesTimeseries = DailyResultTimeseries;
    type Context = StepContext;

    fn prepare(params: &Parameters) -> StepContext {
        StepContext::new(params)
    }

    fn initialize_state(params: &Parameters) -> State {
        State::initialize(params)
    }

    fn step(
        state: &State,
        params: &Parameters,
        forcing: &ForcingRecord,
        context: &StepContext,
    ) -> (State, DailyResult) {
        step(state, params, forcing, context)
    }
}

/// Run the bucket model over a forcing series.
///
/// Parameters are validated first; an invalid set produces no results at all.
/// If no initial state is provided, starts from `params.initial_storage`.
pub fn run(
    params: &Parameters,
    forcing: &[ForcingRecord],
    initial_state: Option<&State>,
) -> Result<DailyResultTimeseries, BucketError> {
    params.validate()?;
    Ok(Bucket::run(params, forcing, initial_state))
}
