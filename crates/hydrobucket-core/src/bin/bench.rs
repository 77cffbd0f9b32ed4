/// Pure Rust core benchmarks for the bucket model.
///
/// Uses std::time::Instant for timing, a deterministic LCG PRNG for data generation,
/// and std::hint::black_box to prevent dead-code elimination.
use std::hint::black_box;
use std::time::{Duration, Instant};

use hydrobucket_core::bucket::run;
use hydrobucket_core::{ForcingRecord, Parameters, Simulator};

const REPEATS: usize = 7;

/// Simple LCG PRNG for deterministic data generation.
fn make_forcing(n: usize, seed: u64) -> Vec<ForcingRecord> {
    let mut state = seed;
    let mut next_f64 = || -> f64 {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as f64 / (1u64 << 31) as f64
    };

    (0..n)
        .map(|i| {
            let precip = next_f64() * 10.0;
            let pet = 0.5 + next_f64() * 4.5;
            ForcingRecord::new(i as u32 + 1, precip, pet)
        })
        .collect()
}

/// Run a closure `REPEATS` times, return the median duration.
fn median_time<F: FnMut()>(mut f: F) -> Duration {
    let mut times: Vec<Duration> = (0..REPEATS)
        .map(|_| {
            let start = Instant::now();
            f();
            start.elapsed()
        })
        .collect();
    times.sort();
    times[REPEATS / 2]
}

fn bench_run(params: &Parameters, sizes: &[usize]) -> Vec<(&'static str, usize, Duration)> {
    let mut results = Vec::new();

    for &n in sizes {
        let forcing = make_forcing(n, 42);

        // Warmup
        black_box(run::run(params, &forcing, None).ok());

        let dur = median_time(|| {
            black_box(run::run(params, &forcing, None).ok());
        });
        results.push(("run", n, dur));
    }
    results
}

fn bench_simulator(params: &Parameters, sizes: &[usize]) -> Vec<(&'static str, usize, Duration)> {
    let mut results = Vec::new();

    for &n in sizes {
        let forcing = make_forcing(n, 42);

        let dur = median_time(|| {
            if let Ok(mut sim) = Simulator::initialize(*params) {
                let series = sim.run(&forcing);
                black_box(sim.finalize(&series));
            }
        });
        results.push(("simulator+balance", n, dur));
    }
    results
}

fn main() {
    let params = match Parameters::new(0.3, 200.0, 0.1, 38.77e6, 1.0, 50.0) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    println!("Bucket Model Benchmarks");
    println!("============================================================");
    println!("{:<18} {:>6}   {:>12}", "Path", "N", "Median (ms)");
    println!("--------------------------------------------");

    let mut all_results: Vec<(&str, usize, Duration)> = Vec::new();

    all_results.extend(bench_run(&params, &[3650, 36500, 365000]));
    all_results.extend(bench_simulator(&params, &[3650, 36500, 365000]));

    for (path, n, dur) in &all_results {
        let ms = dur.as_secs_f64() * 1000.0;
        println!("{:<18} {:>6}      {:>8.2}", path, n, ms);
    }

    println!("============================================================");
}
