use numpy::PyReadonlyArray1;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use hydrobucket_core::metrics::{self, StreamflowComparison};

use crate::convert::{checked_slice, contiguous_slice, observations};

/// Borrow both arrays, requiring equal lengths.
fn pair<'py>(
    observed: &'py PyReadonlyArray1<'py, f64>,
    simulated: &'py PyReadonlyArray1<'py, f64>,
) -> PyResult<(&'py [f64], &'py [f64])> {
    let obs = contiguous_slice(observed)?;
    let sim = checked_slice(simulated, obs.len(), "simulated")?;
    Ok((obs, sim))
}

#[pyfunction]
fn nse(observed: PyReadonlyArray1<'_, f64>, simulated: PyReadonlyArray1<'_, f64>) -> PyResult<f64> {
    let (o, s) = pair(&observed, &simulated)?;
    Ok(metrics::nse(o, s))
}

#[pyfunction]
fn log_nse(observed: PyReadonlyArray1<'_, f64>, simulated: PyReadonlyArray1<'_, f64>) -> PyResult<f64> {
    let (o, s) = pair(&observed, &simulated)?;
    Ok(metrics::log_nse(o, s))
}

#[pyfunction]
fn kge(observed: PyReadonlyArray1<'_, f64>, simulated: PyReadonlyArray1<'_, f64>) -> PyResult<f64> {
    let (o, s) = pair(&observed, &simulated)?;
    Ok(metrics::kge(o, s))
}

#[pyfunction]
fn pbias(observed: PyReadonlyArray1<'_, f64>, simulated: PyReadonlyArray1<'_, f64>) -> PyResult<f64> {
    let (o, s) = pair(&observed, &simulated)?;
    Ok(metrics::pbias(o, s))
}

#[pyfunction]
fn rmse(observed: PyReadonlyArray1<'_, f64>, simulated: PyReadonlyArray1<'_, f64>) -> PyResult<f64> {
    let (o, s) = pair(&observed, &simulated)?;
    Ok(metrics::rmse(o, s))
}

#[pyfunction]
fn mae(observed: PyReadonlyArray1<'_, f64>, simulated: PyReadonlyArray1<'_, f64>) -> PyResult<f64> {
    let (o, s) = pair(&observed, &simulated)?;
    Ok(metrics::mae(o, s))
}

/// All scores at once; NaN in `observed` marks a missing day.
#[pyfunction]
fn compare<'py>(
    py: Python<'py>,
    observed: PyReadonlyArray1<'py, f64>,
    simulated: PyReadonlyArray1<'py, f64>,
) -> PyResult<Option<Bound<'py, PyDict>>> {
    let (o, s) = pair(&observed, &simulated)?;
    let Some(c) = StreamflowComparison::compute(&observations(o), s) else {
        return Ok(None);
    };
    let dict = record_to_dict!(py, c, nse, log_nse, kge, pbias, rmse, mae);
    dict.set_item("n_days", c.n_days)?;
    Ok(Some(dict))
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    let m = PyModule::new(parent.py(), "metrics")?;
    m.add_function(wrap_pyfunction!(nse, &m)?)?;
    m.add_function(wrap_pyfunction!(log_nse, &m)?)?;
    m.add_function(wrap_pyfunction!(kge, &m)?)?;
    m.add_function(wrap_pyfunction!(pbias, &m)?)?;
    m.add_function(wrap_pyfunction!(rmse, &m)?)?;
    m.add_function(wrap_pyfunction!(mae, &m)?)?;
    m.add_function(wrap_pyfunction!(compare, &m)?)?;
    parent.add_submodule(&m)?;
    Ok(())
}
