use approx::assert_relative_eq;

use hydrobucket_core::bucket::constants::MASS_BALANCE_TOLERANCE;
use hydrobucket_core::bucket::run;
use hydrobucket_core::{ForcingRecord, ForcingSeries, Parameters, Simulator};

const AREA: f64 = 38.77e6;

/// Simple LCG for deterministic forcing: dry spells, storms, seasonal PET.
fn make_forcing(n: usize, seed: u64) -> ForcingSeries {
    let mut state = seed;
    let mut next_f64 = || -> f64 {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as f64 / (1u64 << 31) as f64
    };

    let records = (0..n)
        .map(|i| {
            let wet = next_f64() < 0.35;
            let precip = if wet { next_f64() * 60.0 } else { 0.0 };
            let season = (i as f64 / 365.0 * std::f64::consts::TAU).sin();
            let pet = (3.0 + 2.5 * season + next_f64()).max(0.0);
            ForcingRecord::new(i as u32 + 1, precip, pet)
        })
        .collect();
    ForcingSeries::new(records).unwrap()
}

fn parameter_sets() -> Vec<Parameters> {
    vec![
        Parameters::new(0.3, 200.0, 0.1, AREA, 1.0, 50.0).unwrap(),
        Parameters::new(0.0, 80.0, 0.02, AREA, 1.0, 0.0).unwrap(),
        Parameters::new(1.0, 500.0, 0.3, 1.5e6, 1.0, 500.0).unwrap(),
        Parameters::new(0.15, 150.0, 0.05, 2.0e8, 1.0, 250.0).unwrap(),
        Parameters::new(0.4, 120.0, 0.2, AREA, 2.0, 60.0).unwrap(),
        Parameters::new(0.25, 300.0, 0.05, AREA, 0.5, 100.0).unwrap(),
    ]
}

#[test]
fn mass_is_conserved() {
    for (k, p) in parameter_sets().into_iter().enumerate() {
        let forcing = make_forcing(730, 42 + k as u64);
        let mut sim = Simulator::initialize(p).unwrap();
        let results = sim.run(&forcing);
        let report = sim.finalize(&results);
        let relative = report.residual_m3.abs() / report.total_precipitation_m3;
        assert!(
            relative < MASS_BALANCE_TOLERANCE,
            "set {k}: residual {} m³ ({relative:e} relative)",
            report.residual_m3
        );
        assert!(report.is_closed(MASS_BALANCE_TOLERANCE));
    }
}

#[test]
fn mass_is_conserved_with_negative_runoff_coefficient() {
    let p = Parameters::new(-1.0, 200.0, 0.1, AREA, 1.0, 50.0).unwrap();
    let forcing = make_forcing(365, 7);
    let mut sim = Simulator::initialize(p).unwrap();
    let results = sim.run(&forcing);
    let report = sim.finalize(&results);
    assert!(report.is_closed(MASS_BALANCE_TOLERANCE));
}

#[test]
fn storage_stays_within_bounds() {
    for p in parameter_sets() {
        let forcing = make_forcing(730, 3);
        let results = run::run(&p, forcing.records(), None).unwrap();
        for (t, &s) in results.storage_mm.iter().enumerate() {
            assert!(s >= 0.0, "negative storage {s} at t={t}");
            assert!(s <= p.max_storage, "storage {s} above capacity at t={t}");
        }
    }
}

#[test]
fn fluxes_are_non_negative() {
    for p in parameter_sets() {
        let forcing = make_forcing(730, 11);
        let results = run::run(&p, forcing.records(), None).unwrap();
        for t in 0..results.len() {
            assert!(results.evapotranspiration_mm[t] >= 0.0);
            assert!(results.overflow_mm[t] >= 0.0);
            assert!(results.baseflow_mm[t] >= 0.0);
            assert!(results.streamflow_m3_per_s[t] >= 0.0);
        }
    }
}

#[test]
fn one_result_per_record_in_order() {
    let p = parameter_sets()[0];
    let forcing = make_forcing(400, 5);
    let results = run::run(&p, forcing.records(), None).unwrap();
    assert_eq!(results.len(), forcing.len());
    for (t, record) in forcing.iter().enumerate() {
        assert_eq!(results.precipitation_mm[t], record.precipitation);
    }
}

#[test]
fn finalize_is_idempotent() {
    let p = parameter_sets()[3];
    let forcing = make_forcing(365, 9);
    let mut sim = Simulator::initialize(p).unwrap();
    let results = sim.run(&forcing);
    assert_eq!(sim.finalize(&results), sim.finalize(&results));
}

#[test]
fn runs_are_bit_identical() {
    let p = parameter_sets()[1];
    let forcing = make_forcing(1000, 21);
    let mut a = Simulator::initialize(p).unwrap();
    let mut b = Simulator::initialize(p).unwrap();
    let ra = a.run(&forcing);
    let rb = b.run(&forcing);
    for t in 0..ra.len() {
        assert_eq!(ra.storage_mm[t].to_bits(), rb.storage_mm[t].to_bits());
        assert_eq!(
            ra.streamflow_m3_per_s[t].to_bits(),
            rb.streamflow_m3_per_s[t].to_bits()
        );
    }
}

#[test]
fn simulator_and_pure_run_agree() {
    let p = parameter_sets()[4];
    let forcing = make_forcing(200, 13);
    let mut sim = Simulator::initialize(p).unwrap();
    assert_eq!(sim.run(&forcing), run::run(&p, forcing.records(), None).unwrap());
}

// -- Scenarios --

#[test]
fn scenario_single_day_zero_forcing() {
    let p = Parameters::new(0.3, 200.0, 0.1, AREA, 1.0, 50.0).unwrap();
    let mut sim = Simulator::initialize(p).unwrap();
    let r = sim.step(&ForcingRecord::new(1, 0.0, 0.0));

    assert_eq!(r.runoff_mm, 0.0);
    assert_eq!(r.infiltration_mm, 0.0);
    assert_eq!(r.evapotranspiration_mm, 0.0);
    assert_relative_eq!(r.baseflow_mm, 5.0);
    assert_relative_eq!(r.storage_mm, 45.0);
    assert_eq!(r.overflow_mm, 0.0);
    assert_relative_eq!(
        r.streamflow_m3_per_s,
        (0.0 + 5.0 + 0.0) * AREA / 1000.0 / 86400.0,
        max_relative = 1e-12
    );
}

#[test]
fn scenario_saturation() {
    let p = Parameters::new(0.0, 200.0, 0.0, AREA, 1.0, 195.0).unwrap();
    let mut sim = Simulator::initialize(p).unwrap();
    // PET chosen so ET takes 5 mm of the 245 mm: 245/200 * PET = 5
    let pet = 5.0 * 200.0 / 245.0;
    let r = sim.step(&ForcingRecord::new(1, 50.0, pet));
    assert_relative_eq!(r.infiltration_mm, 50.0);
    assert_relative_eq!(r.evapotranspiration_mm, 5.0, max_relative = 1e-12);
    assert_relative_eq!(r.overflow_mm, 40.0, max_relative = 1e-12);
    assert_eq!(r.storage_mm, 200.0);
}

#[test]
fn scenario_initial_storage_above_capacity() {
    let p = Parameters::new(0.3, 200.0, 0.1, AREA, 1.0, 250.0).unwrap();
    assert!(!p.advisories().is_empty());
    let mut sim = Simulator::initialize(p).unwrap();
    assert_eq!(sim.storage(), 250.0);
    let r = sim.step(&ForcingRecord::new(1, 0.0, 0.0));
    assert_eq!(r.storage_mm, 200.0);
    assert!(r.overflow_mm > 0.0);
}

#[test]
fn invalid_parameters_produce_no_results() {
    let p = Parameters::new_unchecked(0.3, 200.0, 0.1, AREA, -1.0, 50.0);
    assert!(Simulator::initialize(p).is_err());
    assert!(run::run(&p, make_forcing(10, 1).records(), None).is_err());
}
