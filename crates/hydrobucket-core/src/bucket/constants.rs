/// Bucket model numerical constants and model contract.
///
/// Centralises the fixed unit-conversion factors and the flat-array layout
/// shared by the Python bindings.

// -- Unit conversion --

/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Millimetres per metre: depth [mm] x area [m²] / 1000 = volume [m³].
pub const MM_PER_M: f64 = 1_000.0;

// -- Model contract constants --

/// Parameter names in flat-array order.
pub const PARAM_NAMES: &[&str] = &[
    "runoff_coefficient",
    "max_storage",
    "baseflow_coefficient",
    "catchment_area",
    "time_step",
    "initial_storage",
];

/// Number of parameters.
pub const N_PARAMS: usize = 6;

/// Number of elements in the state array representation.
pub const STATE_SIZE: usize = 1;

/// Default step length [days].
pub const DEFAULT_TIME_STEP: f64 = 1.0;

/// Relative tolerance used when judging whether a run conserved mass.
pub const MASS_BALANCE_TOLERANCE: f64 = 1e-6;
