//! Page lifecycle tracking.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

/// Lifecycle phases of a page, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LifecyclePhase {
    /// Page object instantiated, no children yet.
    Construct,
    /// Page builds its control tree; route data is already attached.
    FrameworkInitialize,
    /// Tree construction complete.
    Load,
    /// Final adjustments before serialization.
    PreRender,
    /// Tree written to the output writer.
    Render,
    /// Page and tree released.
    Unload,
}

impl LifecyclePhase {
    /// All phases in execution order.
    pub const ALL: [LifecyclePhase; 6] = [
        LifecyclePhase::Construct,
        LifecyclePhase::FrameworkInitialize,
        LifecyclePhase::Load,
        LifecyclePhase::PreRender,
        LifecyclePhase::Render,
        LifecyclePhase::Unload,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecyclePhase::Construct => "construct",
            LifecyclePhase::FrameworkInitialize => "framework_initialize",
            LifecyclePhase::Load => "load",
            LifecyclePhase::PreRender => "pre_render",
            LifecyclePhase::Render => "render",
            LifecyclePhase::Unload => "unload",
        }
    }

    /// The phase that follows this one, if any.
    pub fn next(&self) -> Option<LifecyclePhase> {
        match self {
            LifecyclePhase::Construct => Some(LifecyclePhase::FrameworkInitialize),
            LifecyclePhase::FrameworkInitialize => Some(LifecyclePhase::Load),
            LifecyclePhase::Load => Some(LifecyclePhase::PreRender),
            LifecyclePhase::PreRender => Some(LifecyclePhase::Render),
            LifecyclePhase::Render => Some(LifecyclePhase::Unload),
            LifecyclePhase::Unload => None,
        }
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle events reported to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A phase has been entered.
    PhaseEntered(LifecyclePhase),
    /// A phase hook failed; remaining phases are skipped.
    Failed {
        phase: LifecyclePhase,
        message: String,
    },
    /// Markup produced successfully.
    Completed,
}

/// Wall-clock timings of one page run, per phase.
#[derive(Debug, Clone)]
pub struct TimingContext {
    start: Instant,
    phases: BTreeMap<LifecyclePhase, (Instant, Option<Instant>)>,
}

impl TimingContext {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            phases: BTreeMap::new(),
        }
    }

    /// Record that `phase` began now. Restarting a phase discards its end.
    pub fn phase_started(&mut self, phase: LifecyclePhase) {
        self.phases.insert(phase, (Instant::now(), None));
    }

    /// Record that `phase` finished now; ignored if it never started.
    pub fn phase_finished(&mut self, phase: LifecyclePhase) {
        if let Some((_, end)) = self.phases.get_mut(&phase) {
            *end = Some(Instant::now());
        }
    }

    /// Time since the run began.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time from the start of the run to the end of the render phase.
    pub fn time_to_render(&self) -> Option<Duration> {
        let (_, end) = self.phases.get(&LifecyclePhase::Render)?;
        end.map(|end| end.duration_since(self.start))
    }

    /// Timing of a finished phase.
    pub fn phase_timing(&self, phase: LifecyclePhase) -> Option<PhaseTiming> {
        let (started, finished) = self.phases.get(&phase)?;
        let finished = (*finished)?;
        Some(PhaseTiming {
            phase,
            start: started.duration_since(self.start),
            duration: finished.duration_since(*started),
        })
    }

    /// All finished phases in execution order.
    pub fn completed_phases(&self) -> Vec<PhaseTiming> {
        self.phases
            .keys()
            .filter_map(|phase| self.phase_timing(*phase))
            .collect()
    }
}

impl Default for TimingContext {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTiming {
    pub phase: LifecyclePhase,
    /// Offset from the start of the run.
    pub start: Duration,
    pub duration: Duration,
}

/// Receives the lifecycle events of every page run.
pub trait LifecycleObserver: Send + Sync {
    /// `elapsed` is measured from the start of the run.
    fn on_event(&self, event: &LifecycleEvent, elapsed: Duration);
}
