use hydrobucket_macros::Fluxes;

#[derive(Fluxes)]
#[allow(dead_code)]
struct Depths(f64, f64);

fn main() {}
