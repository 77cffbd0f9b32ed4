use hydrobucket_macros::Fluxes;

#[derive(Debug, Clone, Copy, PartialEq, Fluxes)]
pub struct StepRecord {
    pub precipitation_mm: f64,
    pub storage_mm: f64,
    pub streamflow_m3_per_s: f64,
}

fn main() {
    let f = StepRecord {
        precipitation_mm: 12.0,
        storage_mm: 80.0,
        streamflow_m3_per_s: 3.5,
    };
    let mut ts = StepRecordTimeseries::with_capacity(10);
    assert!(ts.last().is_none());
    ts.push(&f);
    assert_eq!(ts.len(), 1);
    assert!(!ts.is_empty());
    assert_eq!(ts.get(0), Some(f));
    assert_eq!(ts.get(1), None);
    assert_eq!(ts.last(), Some(f));
    assert_eq!(ts.column("storage_mm"), Some(&[80.0][..]));
    assert_eq!(ts.column("missing"), None);
    assert_eq!(StepRecord::FIELD_COUNT, 3);
    assert_eq!(
        StepRecord::field_names(),
        &["precipitation_mm", "storage_mm", "streamflow_m3_per_s"]
    );
    assert_eq!(f.values(), [12.0, 80.0, 3.5]);
}
