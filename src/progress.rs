/*!
 * Simulated long-running work.
 *
 * Two phases are simulated:
 * 1. **Progress cycle**: a deterministic task reported as 100 monotonic
 *    steps, modelled by the `ProgressCycle` state machine
 * 2. **Pending phase**: work that cannot be subdivided, shown as a single
 *    spinner for a fixed duration
 *
 * The state machine is driven by its caller. Waiting between steps goes
 * through the `Delay` trait; the application uses `ThreadDelay`, which
 * blocks the calling thread and cannot be interrupted.
 */

use std::time::Duration;

use log::{debug, trace};

use crate::errors::{AppError, DelayError};
use crate::surface::{PresentationSurface, ProgressHandle, PROGRESS_MAX};

/// Wait between two progress steps
pub const STEP_DELAY: Duration = Duration::from_millis(10);

/// Duration of the pending phase
pub const SPINNER_DELAY: Duration = Duration::from_secs(2);

/// Blocking wait primitive
pub trait Delay {
    /// Block for at least `duration`
    fn sleep(&self, duration: Duration) -> Result<(), DelayError>;
}

/// Delay backed by `std::thread::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn sleep(&self, duration: Duration) -> Result<(), DelayError> {
        std::thread::sleep(duration);
        Ok(())
    }
}

impl<D: Delay + ?Sized> Delay for &D {
    fn sleep(&self, duration: Duration) -> Result<(), DelayError> {
        (**self).sleep(duration)
    }
}

/// Where a progress cycle currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressPhase {
    /// Not started, nothing reported yet
    Idle,
    /// This many units out of `PROGRESS_MAX` are done
    Running(u8),
    /// All units done and completion reported
    Complete,
}

/// What a single step of the cycle produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressTransition {
    /// Moved to `Running(p)`; `p` has to be reported
    Advanced(u8),
    /// Moved from `Running(100)` to `Complete`
    Completed,
}

/// State machine for one progress cycle.
///
/// `Idle -> Running(1) -> ... -> Running(100) -> Complete`, one unit per
/// step. The label stays the same for the whole cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressCycle {
    phase: ProgressPhase,
    label: String,
}

impl ProgressCycle {
    pub fn new(label: &str) -> Self {
        Self {
            phase: ProgressPhase::Idle,
            label: label.to_string(),
        }
    }

    pub fn phase(&self) -> ProgressPhase {
        self.phase
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Completed units (0 while idle)
    pub fn current(&self) -> u8 {
        match self.phase {
            ProgressPhase::Idle => 0,
            ProgressPhase::Running(p) => p,
            ProgressPhase::Complete => PROGRESS_MAX,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase == ProgressPhase::Complete
    }

    /// Advance by one transition; `None` once the cycle is complete
    pub fn step(&mut self) -> Option<ProgressTransition> {
        let (next, transition) = match self.phase {
            ProgressPhase::Idle => (ProgressPhase::Running(1), ProgressTransition::Advanced(1)),
            ProgressPhase::Running(p) if p < PROGRESS_MAX => {
                (ProgressPhase::Running(p + 1), ProgressTransition::Advanced(p + 1))
            }
            ProgressPhase::Running(_) => (ProgressPhase::Complete, ProgressTransition::Completed),
            ProgressPhase::Complete => return None,
        };
        self.phase = next;
        Some(transition)
    }
}

impl Iterator for ProgressCycle {
    type Item = ProgressTransition;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}

/// Run a full progress cycle against `surface`.
///
/// The bar is shown at 0, each step waits `STEP_DELAY` before reporting
/// the new value, and `done_message` is rendered once the cycle completes.
pub fn run_progress_cycle<S, D>(
    surface: &mut S,
    delay: &D,
    label: &str,
    done_message: &str,
) -> Result<(), AppError>
where
    S: PresentationSurface + ?Sized,
    D: Delay + ?Sized,
{
    let mut cycle = ProgressCycle::new(label);
    let mut handle = surface.render_progress(cycle.current(), cycle.label())?;
    debug!("Progress cycle started: {}", label);

    while let Some(transition) = cycle.step() {
        match transition {
            ProgressTransition::Advanced(current) => {
                delay.sleep(STEP_DELAY)?;
                trace!("Progress {}/{}", current, PROGRESS_MAX);
                handle.update(current, cycle.label())?;
            }
            ProgressTransition::Completed => {
                drop(handle);
                surface.render_success(done_message)?;
                debug!("Progress cycle complete");
                return Ok(());
            }
        }
    }

    Ok(())
}

/// Run `work` while a spinner with `message` is shown.
///
/// The spinner is released on every exit path. `done_message` is only
/// rendered when `work` succeeds; its error is returned unchanged.
/// When `work` fails, no success indicator is rendered at all: the spinner
/// release is the last thing the surface sees.
pub fn run_pending<S, D, F>(
    surface: &mut S,
    delay: &D,
    message: &str,
    done_message: &str,
    work: F,
) -> Result<(), AppError>
where
    S: PresentationSurface + ?Sized,
    D: Delay + ?Sized,
    F: FnOnce(&D) -> Result<(), DelayError>,
{
    let spinner = surface.begin_spinner(message)?;
    debug!("Pending: {}", message);
    let outcome = work(delay);
    drop(spinner);

    outcome?;
    surface.render_success(done_message)?;
    debug!("Pending work done");
    Ok(())
}
