use numpy::PyReadonlyArray1;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use hydrobucket_core::bucket::params::Parameters;
use hydrobucket_core::bucket::run::{self, StepContext};
use hydrobucket_core::bucket::state::State;
use hydrobucket_core::bucket::{MassBalanceReport, Simulator};
use hydrobucket_core::metrics::StreamflowComparison;
use hydrobucket_core::traits::ModelParams;
use hydrobucket_core::{ForcingRecord, ForcingSeries};

use crate::convert::{checked_slice, contiguous_slice, observations, value_error};

// ---------------------------------------------------------------------------
// Typed pyclass result objects
// ---------------------------------------------------------------------------

define_timeseries_result! {
    /// Bucket run results with typed numpy array attributes.
    pub struct BucketResult from hydrobucket_core::bucket::DailyResultTimeseries {
        precipitation_mm, potential_evapotranspiration_mm, runoff_mm, infiltration_mm,
        evapotranspiration_mm, baseflow_mm, overflow_mm, storage_mm, streamflow_mm,
        streamflow_m3_per_s,
    }
}

define_scalar_result! {
    /// Single-day bucket results.
    pub struct BucketStepResult from hydrobucket_core::bucket::DailyResult {
        precipitation_mm, potential_evapotranspiration_mm, runoff_mm, infiltration_mm,
        evapotranspiration_mm, baseflow_mm, overflow_mm, storage_mm, streamflow_mm,
        streamflow_m3_per_s,
    }
}

define_scalar_result! {
    /// Closing mass balance of a run [m³].
    pub struct MassBalance from MassBalanceReport {
        total_precipitation_m3, total_evapotranspiration_m3, total_runoff_m3,
        total_storage_change_m3, residual_m3,
    }
}

fn parse_params<'py>(params: &'py PyReadonlyArray1<'py, f64>) -> PyResult<Parameters> {
    let p_slice = checked_slice(params, Parameters::N_PARAMS, "params")?;
    Parameters::from_array(p_slice).map_err(value_error)
}

fn parse_forcing<'py>(
    precip: &'py PyReadonlyArray1<'py, f64>,
    pet: &'py PyReadonlyArray1<'py, f64>,
) -> PyResult<ForcingSeries> {
    ForcingSeries::from_columns(contiguous_slice(precip)?, contiguous_slice(pet)?)
        .map_err(value_error)
}

// ---------------------------------------------------------------------------
// Dict-returning functions
// ---------------------------------------------------------------------------

#[pyfunction]
#[pyo3(signature = (params, precip, pet, initial_storage=None))]
fn bucket_run<'py>(
    py: Python<'py>,
    params: PyReadonlyArray1<'py, f64>,
    precip: PyReadonlyArray1<'py, f64>,
    pet: PyReadonlyArray1<'py, f64>,
    initial_storage: Option<f64>,
) -> PyResult<Bound<'py, PyDict>> {
    let p = parse_params(&params)?;
    let forcing = parse_forcing(&precip, &pet)?;
    let state = initial_storage.map(|storage| State { storage });

    let result = run::run(&p, forcing.records(), state.as_ref()).map_err(value_error)?;

    let dict = timeseries_to_dict!(
        py, result,
        precipitation_mm, potential_evapotranspiration_mm, runoff_mm, infiltration_mm,
        evapotranspiration_mm, baseflow_mm, overflow_mm, storage_mm, streamflow_mm,
        streamflow_m3_per_s,
    );
    Ok(dict)
}

#[pyfunction]
fn bucket_step<'py>(
    py: Python<'py>,
    params: PyReadonlyArray1<'py, f64>,
    storage: f64,
    precip: f64,
    pet: f64,
) -> PyResult<(f64, Bound<'py, PyDict>)> {
    let p = parse_params(&params)?;
    let state = State { storage };
    let record = ForcingRecord::new(0, precip, pet);

    let (new_state, r) = run::step(&state, &p, &record, &StepContext::new(&p));

    let dict = record_to_dict!(
        py, r,
        precipitation_mm, potential_evapotranspiration_mm, runoff_mm, infiltration_mm,
        evapotranspiration_mm, baseflow_mm, overflow_mm, storage_mm, streamflow_mm,
        streamflow_m3_per_s,
    );
    Ok((new_state.storage, dict))
}

// ---------------------------------------------------------------------------
// Typed functions
// ---------------------------------------------------------------------------

/// Run, close the mass balance, and score against `observed` (NaN = missing).
#[pyfunction]
#[pyo3(signature = (params, precip, pet, observed=None))]
fn bucket_simulate<'py>(
    py: Python<'py>,
    params: PyReadonlyArray1<'py, f64>,
    precip: PyReadonlyArray1<'py, f64>,
    pet: PyReadonlyArray1<'py, f64>,
    observed: Option<PyReadonlyArray1<'py, f64>>,
) -> PyResult<(BucketResult, MassBalance, Option<Bound<'py, PyDict>>)> {
    let p = parse_params(&params)?;
    let forcing = parse_forcing(&precip, &pet)?;

    let mut sim = Simulator::initialize(p).map_err(value_error)?;
    let results = sim.run(&forcing);
    let report = sim.finalize(&results);

    let comparison = match &observed {
        Some(obs) => {
            let obs = checked_slice(obs, forcing.len(), "observed")?;
            match StreamflowComparison::compute(&observations(obs), &results.streamflow_m3_per_s) {
                Some(c) => {
                    let dict = record_to_dict!(py, c, nse, log_nse, kge, pbias, rmse, mae);
                    dict.set_item("n_days", c.n_days)?;
                    Some(dict)
                }
                None => None,
            }
        }
        None => None,
    };

    Ok((
        BucketResult::from_timeseries(py, results),
        MassBalance::from_core(&report),
        comparison,
    ))
}

#[pyfunction]
fn bucket_step_typed(
    params: PyReadonlyArray1<'_, f64>,
    storage: f64,
    precip: f64,
    pet: f64,
) -> PyResult<(f64, BucketStepResult)> {
    let p = parse_params(&params)?;
    let (new_state, r) = run::step(
        &State { storage },
        &p,
        &ForcingRecord::new(0, precip, pet),
        &StepContext::new(&p),
    );
    Ok((new_state.storage, BucketStepResult::from_core(&r)))
}

/// Non-fatal findings about a parameter array, as messages.
#[pyfunction]
fn bucket_advisories(params: PyReadonlyArray1<'_, f64>) -> PyResult<Vec<String>> {
    let p = parse_params(&params)?;
    Ok(p.advisories().iter().map(|a| a.to_string()).collect())
}

#[pyfunction]
fn param_names() -> Vec<&'static str> {
    Parameters::PARAM_NAMES.to_vec()
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    let m = PyModule::new(parent.py(), "bucket")?;
    m.add_function(wrap_pyfunction!(bucket_run, &m)?)?;
    m.add_function(wrap_pyfunction!(bucket_step, &m)?)?;
    m.add_function(wrap_pyfunction!(bucket_simulate, &m)?)?;
    m.add_function(wrap_pyfunction!(bucket_step_typed, &m)?)?;
    m.add_function(wrap_pyfunction!(bucket_advisories, &m)?)?;
    m.add_function(wrap_pyfunction!(param_names, &m)?)?;
    m.add_class::<BucketResult>()?;
    m.add_class::<BucketStepResult>()?;
    m.add_class::<MassBalance>()?;
    parent.add_submodule(&m)?;
    Ok(())
}
