use hydrobucket_macros::Fluxes;

#[derive(Fluxes)]
#[allow(dead_code)]
struct MixedFluxes {
    runoff_mm: f64,
    day: u32,
}

fn main() {}
