use crate::error::BucketError;

/// Core trait for lumped hydrological models.
///
/// Defines the interface a single-store model implements: prepare context,
/// initialize state, step, and run over a forcing series.
pub trait HydrologicalModel {
    type Params;
    type State: Clone;
    type Forcing: Copy;
    type Fluxes;
    type FluxesTimeseries: FluxesTimeseriesOps<Self::Fluxes>;
    /// Precomputed context derived from params, constant for a given run.
    type Context;

    /// Precompute any run-constant data from parameters (e.g., unit conversions).
    fn prepare(params: &Self::Params) -> Self::Context;

    /// Create the initial state from parameters.
    fn initialize_state(params: &Self::Params) -> Self::State;

    /// Execute one timestep: given state, params, forcing, and context,
    /// return the new state and fluxes.
    fn step(
        state: &Self::State,
        params: &Self::Params,
        forcing: &Self::Forcing,
        context: &Self::Context,
    ) -> (Self::State, Self::Fluxes);

    /// Run the model over a forcing series.
    ///
    /// Default implementation: prepare context, initialize/use provided state,
    /// loop over forcing calling step.
    fn run(
        params: &Self::Params,
        forcing: &[Self::Forcing],
        initial_state: Option<&Self::State>,
    ) -> Self::FluxesTimeseries {
        let context = Self::prepare(params);
        let mut state = match initial_state {
            Some(s) => s.clone(),
            None => Self::initialize_state(params),
        };

        let mut outputs = Self::FluxesTimeseries::with_capacity(forcing.len());

        for f in forcing {
            let (new_state, fluxes) = Self::step(&state, params, f, &context);
            outputs.push(&fluxes);
            state = new_state;
        }

        outputs
    }
}

/// Operations required on the timeseries collection type.
pub trait FluxesTimeseriesOps<F> {
    fn with_capacity(n: usize) -> Self;
    fn push(&mut self, f: &F);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
}

/// Flat-array conversion for parameter sets, in `PARAM_NAMES` order.
pub trait ModelParams: Sized {
    const N_PARAMS: usize;
    const PARAM_NAMES: &'static [&'static str];

    fn from_array(arr: &[f64]) -> Result<Self, BucketError>;
    fn to_array(&self) -> Vec<f64>;
}

/// Flat-array conversion for model state.
pub trait ModelState: Sized {
    fn to_vec(&self) -> Vec<f64>;
    fn from_slice(arr: &[f64]) -> Result<Self, BucketError>;
    fn array_len(&self) -> usize;
}
