//! Interactive session: current inputs, last run, and the time-of-day cursor.
//!
//! Every mutating call recomputes synchronously, so readers never observe
//! samples and results from different runs. Rendering layers re-read the
//! session after each call.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::clock::TimeOfDay;
use super::constants::ModelConstants;
use super::engine::{SimulationOutput, simulate_with};
use super::kpi::Economics;
use super::types::{InputsPatch, SimulationDataPoint, SimulationInputs, SimulationResults};

/// How a cursor exactly `tolerance_hours` away from a sample is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupBoundary {
    /// Match only when strictly closer than the tolerance.
    #[default]
    Exclusive,
    /// Match at exactly the tolerance as well.
    Inclusive,
}

/// Nearest-sample lookup for the time cursor.
///
/// Samples are scanned in ascending `time` order and the first match wins,
/// so an equidistant pair resolves to the earlier hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentSampleLookup {
    /// Maximum distance between cursor and sample time (hours).
    pub tolerance_hours: f64,
    pub boundary: LookupBoundary,
}

impl Default for CurrentSampleLookup {
    fn default() -> Self {
        Self {
            tolerance_hours: 0.5,
            boundary: LookupBoundary::Exclusive,
        }
    }
}

impl CurrentSampleLookup {
    /// Returns `true` if a sample at `sample_hour` matches the cursor.
    pub fn matches(&self, sample_hour: u32, cursor: f64) -> bool {
        let distance = (f64::from(sample_hour) - cursor).abs();
        match self.boundary {
            LookupBoundary::Exclusive => distance < self.tolerance_hours,
            LookupBoundary::Inclusive => distance <= self.tolerance_hours,
        }
    }

    /// First sample within tolerance of `cursor`.
    pub fn find<'a>(
        &self,
        points: &'a [SimulationDataPoint],
        cursor: f64,
    ) -> Option<&'a SimulationDataPoint> {
        points.iter().find(|p| self.matches(p.time, cursor))
    }
}

/// Owned simulation session.
///
/// # Examples
///
/// ```
/// use cdth_sim::sim::Session;
/// use cdth_sim::sim::types::InputsPatch;
///
/// let mut session = Session::default();
/// let before = session.results().total_energy;
/// session.set_inputs(&InputsPatch::default().module_count(4000));
/// assert!((session.results().total_energy - 2.0 * before).abs() < 0.02);
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    inputs: SimulationInputs,
    constants: ModelConstants,
    lookup: CurrentSampleLookup,
    output: SimulationOutput,
    time_of_day: TimeOfDay,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(
            SimulationInputs::default(),
            ModelConstants::default(),
            CurrentSampleLookup::default(),
        )
    }
}

impl Session {
    /// Creates a session and runs the first simulation; the cursor starts at noon.
    pub fn new(
        inputs: SimulationInputs,
        constants: ModelConstants,
        lookup: CurrentSampleLookup,
    ) -> Self {
        let output = simulate_with(&inputs, &constants);
        Self {
            inputs,
            constants,
            lookup,
            output,
            time_of_day: TimeOfDay::NOON,
        }
    }

    /// Creates a session with default constants and lookup.
    pub fn with_inputs(inputs: SimulationInputs) -> Self {
        Self::new(inputs, ModelConstants::default(), CurrentSampleLookup::default())
    }

    /// Merges `patch` into the inputs and recomputes.
    pub fn set_inputs(&mut self, patch: &InputsPatch) {
        self.inputs.apply(patch);
        debug!(?patch, "session inputs changed");
        self.run_simulation();
    }

    /// Recomputes from the current inputs, replacing samples and results together.
    pub fn run_simulation(&mut self) {
        self.output = simulate_with(&self.inputs, &self.constants);
    }

    /// Moves the cursor to `hours`, wrapped into `[0, 24)`. Does not recompute.
    pub fn set_time_of_day(&mut self, hours: f64) {
        self.time_of_day = TimeOfDay::new(hours);
        trace!(time_of_day = self.time_of_day.hours(), "cursor set");
    }

    /// Advances the cursor by `delta` hours, restarting at midnight past 24:00.
    pub fn advance_time(&mut self, delta: f64) {
        self.time_of_day.advance(delta);
        trace!(time_of_day = self.time_of_day.hours(), "cursor advanced");
    }

    /// Sample nearest the cursor, if one lies within the lookup tolerance.
    pub fn current_data(&self) -> Option<&SimulationDataPoint> {
        self.lookup
            .find(&self.output.data_points, self.time_of_day.hours())
    }

    pub fn inputs(&self) -> &SimulationInputs {
        &self.inputs
    }

    pub fn constants(&self) -> &ModelConstants {
        &self.constants
    }

    pub fn lookup(&self) -> &CurrentSampleLookup {
        &self.lookup
    }

    /// Samples from the last run.
    pub fn data_points(&self) -> &[SimulationDataPoint] {
        &self.output.data_points
    }

    /// Aggregates from the last run.
    pub fn results(&self) -> &SimulationResults {
        &self.output.results
    }

    /// Unrounded breakdown from the last run.
    pub fn economics(&self) -> &Economics {
        &self.output.economics
    }

    /// Last run as a whole.
    pub fn output(&self) -> &SimulationOutput {
        &self.output
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        self.time_of_day
    }
}
