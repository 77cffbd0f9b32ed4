use hydrobucket_macros::Fluxes;

#[derive(Debug, Clone, Copy, Fluxes)]
#[fluxes(timeseries_name = "StoreSeries")]
pub struct StoreFluxes {
    pub baseflow_mm: f64,
    pub overflow_mm: f64,
}

fn main() {
    let f = StoreFluxes { baseflow_mm: 1.5, overflow_mm: 0.0 };
    let mut ts = StoreSeries::with_capacity(5);
    ts.push(&f);
    ts.push(&f);
    assert_eq!(ts.len(), 2);
    assert_eq!(ts.baseflow_mm.iter().sum::<f64>(), 3.0);
    assert_eq!(StoreFluxes::field_names(), &["baseflow_mm", "overflow_mm"]);
}
