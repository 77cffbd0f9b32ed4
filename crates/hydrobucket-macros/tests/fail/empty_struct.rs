use hydrobucket_macros::Fluxes;

#[derive(Fluxes)]
#[allow(dead_code)]
struct NoFluxes {}

fn main() {}
