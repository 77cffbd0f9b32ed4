/// Bucket model parameters.
///
/// - `runoff_coefficient`: share of precipitation routed straight to the outlet [-]
/// - `max_storage`: soil store capacity [mm]
/// - `baseflow_coefficient`: linear drainage rate of the store [1/day]
/// - `catchment_area`: contributing area, used only for unit conversion [m²]
/// - `time_step`: step length [days]
/// - `initial_storage`: store level before the first step [mm]
use std::fmt;

use serde::Deserialize;

use super::constants::{DEFAULT_TIME_STEP, N_PARAMS, PARAM_NAMES};
use crate::error::BucketError;
use crate::traits::ModelParams;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Parameters {
    pub runoff_coefficient: f64,
    pub max_storage: f64,
    pub baseflow_coefficient: f64,
    pub catchment_area: f64,
    #[serde(default = "default_time_step")]
    pub time_step: f64,
    pub initial_storage: f64,
}

fn default_time_step() -> f64 {
    DEFAULT_TIME_STEP
}

/// Non-fatal findings about a parameter set. The run proceeds unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Advisory {
    /// The first step's overflow rule drains the excess.
    InitialStorageExceedsCapacity { initial_storage: f64, max_storage: f64 },
    /// Passed through unclamped.
    RunoffCoefficientOutOfRange { runoff_coefficient: f64 },
    NegativeBaseflowCoefficient { baseflow_coefficient: f64 },
    /// `baseflow_coefficient * time_step > 1` withdraws more than the store holds.
    BaseflowDrainsStore { baseflow_coefficient: f64, time_step: f64 },
    NegativeInitialStorage { initial_storage: f64 },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::InitialStorageExceedsCapacity {
                initial_storage,
                max_storage,
            } => write!(
                f,
                "initial storage exceeds max soil water storage: {initial_storage:.2} > {max_storage:.2}"
            ),
            Advisory::RunoffCoefficientOutOfRange { runoff_coefficient } => write!(
                f,
                "runoff coefficient {runoff_coefficient} is outside [0, 1] and is used as given"
            ),
            Advisory::NegativeBaseflowCoefficient {
                baseflow_coefficient,
            } => write!(
                f,
                "baseflow coefficient {baseflow_coefficient} is negative"
            ),
            Advisory::BaseflowDrainsStore {
                baseflow_coefficient,
                time_step,
            } => write!(
                f,
                "baseflow coefficient {baseflow_coefficient} x time step {time_step} exceeds 1, storage can go negative"
            ),
            Advisory::NegativeInitialStorage { initial_storage } => {
                write!(f, "initial storage {initial_storage} is negative")
            }
        }
    }
}

impl Parameters {
    /// Create new Parameters, returning an error if a structural value is invalid.
    pub fn new(
        runoff_coefficient: f64,
        max_storage: f64,
        baseflow_coefficient: f64,
        catchment_area: f64,
        time_step: f64,
        initial_storage: f64,
    ) -> Result<Self, BucketError> {
        let p = Self::new_unchecked(
            runoff_coefficient,
            max_storage,
            baseflow_coefficient,
            catchment_area,
            time_step,
            initial_storage,
        );
        p.validate()?;
        Ok(p)
    }

    /// Create Parameters without validation.
    pub fn new_unchecked(
        runoff_coefficient: f64,
        max_storage: f64,
        baseflow_coefficient: f64,
        catchment_area: f64,
        time_step: f64,
        initial_storage: f64,
    ) -> Self {
        Self {
            runoff_coefficient,
            max_storage,
            baseflow_coefficient,
            catchment_area,
            time_step,
            initial_storage,
        }
    }

    /// Check the values every division in the model relies on.
    ///
    /// `max_storage`, `catchment_area` and `time_step` must be strictly
    /// positive; every value must be finite.
    pub fn validate(&self) -> Result<(), BucketError> {
        for (name, value) in PARAM_NAMES.iter().zip(self.to_array()) {
            if !value.is_finite() {
                return Err(BucketError::InvalidParameter {
                    name: *name,
                    value,
                    reason: "must be finite",
                });
            }
        }
        let positive = [
            ("max_storage", self.max_storage),
            ("catchment_area", self.catchment_area),
            ("time_step", self.time_step),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(BucketError::InvalidParameter {
                    name,
                    value,
                    reason: "must be greater than zero",
                });
            }
        }
        Ok(())
    }

    /// Collect the non-fatal findings for this parameter set.
    pub fn advisories(&self) -> Vec<Advisory> {
        let mut found = Vec::new();
        if self.initial_storage > self.max_storage {
            found.push(Advisory::InitialStorageExceedsCapacity {
                initial_storage: self.initial_storage,
                max_storage: self.max_storage,
            });
        }
        if self.initial_storage < 0.0 {
            found.push(Advisory::NegativeInitialStorage {
                initial_storage: self.initial_storage,
            });
        }
        if !(0.0..=1.0).contains(&self.runoff_coefficient) {
            found.push(Advisory::RunoffCoefficientOutOfRange {
                runoff_coefficient: self.runoff_coefficient,
            });
        }
        if self.baseflow_coefficient < 0.0 {
            found.push(Advisory::NegativeBaseflowCoefficient {
                baseflow_coefficient: self.baseflow_coefficient,
            });
        } else if self.baseflow_coefficient * self.time_step > 1.0 {
            found.push(Advisory::BaseflowDrainsStore {
                baseflow_coefficient: self.baseflow_coefficient,
                time_step: self.time_step,
            });
        }
        found
    }

    /// Convert to a flat array in `PARAM_NAMES` order.
    pub fn to_array(&self) -> [f64; N_PARAMS] {
        [
            self.runoff_coefficient,
            self.max_storage,
            self.baseflow_coefficient,
            self.catchment_area,
            self.time_step,
            self.initial_storage,
        ]
    }
}

impl ModelParams for Parameters {
    const N_PARAMS: usize = N_PARAMS;
    const PARAM_NAMES: &'static [&'static str] = PARAM_NAMES;

    fn from_array(arr: &[f64]) -> Result<Self, BucketError> {
        if arr.len() != N_PARAMS {
            return Err(BucketError::LengthMismatch {
                what: "parameters",
                expected: N_PARAMS,
                actual: arr.len(),
            });
        }
        Self::new(arr[0], arr[1], arr[2], arr[3], arr[4], arr[5])
    }

    fn to_array(&self) -> Vec<f64> {
        Parameters::to_array(self).to_vec()
    }
}
