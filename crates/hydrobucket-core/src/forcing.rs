/// Daily forcing records and their validated container.
use crate::error::BucketError;

/// One day of model input.
///
/// `observed_streamflow` [m³/s] rides along for comparison against the
/// simulated outlet flow; the simulation never reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForcingRecord {
    /// Ordinal (julian) day.
    pub day: u32,
    /// Precipitation [mm/day].
    pub precipitation: f64,
    /// Potential evapotranspiration [mm/day].
    pub potential_evapotranspiration: f64,
    /// Observed streamflow [m³/s], if measured.
    pub observed_streamflow: Option<f64>,
}

impl ForcingRecord {
    pub fn new(day: u32, precipitation: f64, potential_evapotranspiration: f64) -> Self {
        Self {
            day,
            precipitation,
            potential_evapotranspiration,
            observed_streamflow: None,
        }
    }

    pub fn with_observed(mut self, streamflow: f64) -> Self {
        self.observed_streamflow = Some(streamflow);
        self
    }
}

/// Validated, ordered forcing series.
///
/// Records are kept in the order given; one record per day, already aligned.
#[derive(Debug, Clone)]
pub struct ForcingSeries {
    records: Vec<ForcingRecord>,
}

impl ForcingSeries {
    /// Create a new ForcingSeries with validation.
    ///
    /// Validates:
    /// - the series is non-empty
    /// - precipitation and PET are finite and non-negative
    pub fn new(records: Vec<ForcingRecord>) -> Result<Self, BucketError> {
        if records.is_empty() {
            return Err(BucketError::malformed(0, "forcing series is empty"));
        }
        for (i, r) in records.iter().enumerate() {
            check_flux(i, "precipitation", r.precipitation)?;
            check_flux(i, "potential_evapotranspiration", r.potential_evapotranspiration)?;
        }
        Ok(Self { records })
    }

    /// Build a series from parallel precipitation and PET columns, numbering
    /// days from 1.
    pub fn from_columns(precip: &[f64], pet: &[f64]) -> Result<Self, BucketError> {
        if precip.len() != pet.len() {
            return Err(BucketError::malformed(
                precip.len().min(pet.len()),
                format!(
                    "precip length {} does not match pet length {}",
                    precip.len(),
                    pet.len()
                ),
            ));
        }
        let records = precip
            .iter()
            .zip(pet)
            .zip(1u32..)
            .map(|((&p, &e), day)| ForcingRecord::new(day, p, e))
            .collect();
        Self::new(records)
    }

    pub fn records(&self) -> &[ForcingRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForcingRecord> {
        self.records.iter()
    }

    /// Observed streamflow column, `None` where no observation exists.
    pub fn observed_streamflow(&self) -> Vec<Option<f64>> {
        self.records.iter().map(|r| r.observed_streamflow).collect()
    }

    /// Returns `true` if at least one record carries an observation.
    pub fn has_observations(&self) -> bool {
        self.records.iter().any(|r| r.observed_streamflow.is_some())
    }

    /// Number of days.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no days.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a ForcingSeries {
    type Item = &'a ForcingRecord;
    type IntoIter = std::slice::Iter<'a, ForcingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn check_flux(index: usize, name: &str, value: f64) -> Result<(), BucketError> {
    if !value.is_finite() {
        return Err(BucketError::malformed(
            index,
            format!("{name} is not finite ({value})"),
        ));
    }
    if value < 0.0 {
        return Err(BucketError::malformed(
            index,
            format!("{name} is negative ({value})"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_series() {
        let fs = ForcingSeries::from_columns(&[10.0, 0.0, 4.5], &[2.0, 3.0, 1.0]).unwrap();
        assert_eq!(fs.len(), 3);
        assert_eq!(fs.records()[0].day, 1);
        assert_eq!(fs.records()[2].day, 3);
        assert!(!fs.has_observations());
    }

    #[test]
    fn observations_are_carried() {
        let fs = ForcingSeries::new(vec![
            ForcingRecord::new(100, 5.0, 2.0).with_observed(1.2),
            ForcingRecord::new(101, 0.0, 2.0),
        ])
        .unwrap();
        assert!(fs.has_observations());
        assert_eq!(fs.observed_streamflow(), vec![Some(1.2), None]);
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = ForcingSeries::from_columns(&[10.0, 5.0], &[2.0]).unwrap_err();
        match err {
            BucketError::MalformedForcing { reason, .. } => {
                assert!(reason.contains("does not match"))
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_series() {
        assert!(ForcingSeries::new(vec![]).is_err());
        assert!(ForcingSeries::from_columns(&[], &[]).is_err());
    }

    #[test]
    fn rejects_nan_precipitation() {
        let err = ForcingSeries::from_columns(&[1.0, f64::NAN], &[1.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            BucketError::MalformedForcing {
                index: 1,
                reason: "precipitation is not finite (NaN)".to_string(),
            }
        );
    }

    #[test]
    fn rejects_negative_pet() {
        let err = ForcingSeries::from_columns(&[1.0, 2.0, 3.0], &[1.0, 1.0, -0.5]).unwrap_err();
        assert!(err.to_string().contains("record 2"));
        assert!(err.to_string().contains("negative"));
    }
}
