/// Stateful simulator wrapping the pure step function.
///
/// One instance per run: it owns the store level and advances it strictly in
/// input order. Independent catchments or parameter sets use independent
/// instances.
use tracing::{debug, warn};

use super::fluxes::{DailyResult, DailyResultTimeseries};
use super::mass_balance::MassBalanceReport;
use super::params::Parameters;
use super::run::{self, StepContext};
use super::state::State;
use crate::error::BucketError;
use crate::forcing::ForcingRecord;

#[derive(Debug, Clone)]
pub struct Simulator {
    params: Parameters,
    context: StepContext,
    state: State,
    steps: usize,
}

impl Simulator {
    /// Validate `params` and set the store to `initial_storage`.
    ///
    /// Every advisory is logged as a warning; none of them alter the run.
    pub fn initialize(params: Parameters) -> Result<Self, BucketError> {
        params.validate()?;
        for advisory in params.advisories() {
            warn!("{advisory}");
        }
        Ok(Self {
            context: StepContext::new(&params),
            state: State::initialize(&params),
            params,
            steps: 0,
        })
    }

    /// Advance one day.
    pub fn step(&mut self, forcing: &ForcingRecord) -> DailyResult {
        let (state, result) = run::step(&self.state, &self.params, forcing, &self.context);
        self.state = state;
        self.steps += 1;
        result
    }

    /// Lazily step through `forcing`, yielding one result per record.
    ///
    /// Each result is computed only when pulled; dropping the iterator early
    /// leaves the simulator at the last day produced.
    pub fn simulate<'s, 'f, I>(&'s mut self, forcing: I) -> Simulation<'s, I::IntoIter>
    where
        I: IntoIterator<Item = &'f ForcingRecord>,
    {
        Simulation {
            simulator: self,
            forcing: forcing.into_iter(),
        }
    }

    /// Step through every record and collect the results.
    pub fn run<'f, I>(&mut self, forcing: I) -> DailyResultTimeseries
    where
        I: IntoIterator<Item = &'f ForcingRecord>,
    {
        let results: DailyResultTimeseries = self.simulate(forcing).collect();
        debug!(
            days = results.len(),
            storage_mm = self.state.storage,
            "bucket run complete"
        );
        results
    }

    /// Mass balance of `results` against this run's starting store.
    pub fn finalize(&self, results: &DailyResultTimeseries) -> MassBalanceReport {
        MassBalanceReport::compute(results, &self.params, self.params.initial_storage)
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Current store level [mm].
    pub fn storage(&self) -> f64 {
        self.state.storage
    }

    /// Number of days processed so far.
    pub fn steps(&self) -> usize {
        self.steps
    }
}

/// Lazy, finite, single-pass sequence of daily results.
pub struct Simulation<'s, I> {
    simulator: &'s mut Simulator,
    forcing: I,
}

impl<'f, I> Iterator for Simulation<'_, I>
where
    I: Iterator<Item = &'f ForcingRecord>,
{
    type Item = DailyResult;

    fn next(&mut self) -> Option<DailyResult> {
        let record = self.forcing.next()?;
        Some(self.simulator.step(record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.forcing.size_hint()
    }
}
