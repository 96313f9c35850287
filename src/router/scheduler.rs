//! Fixed-tick step scheduler.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;

use crate::error::Result;
use crate::motion::SpeedRamp;

use super::{Outcome, Router, Status};

impl<STEP, DIR, EN, LIM, PWM> Router<STEP, DIR, EN, LIM, PWM>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIM: InputPin,
    PWM: SetDutyCycle,
{
    /// Advance the live move by one virtual tick.
    ///
    /// Every axis accumulates the tick (scaled by the speed multiplier on
    /// accelerated moves) and emits each step that became due. The pacing
    /// axis updates the multiplier once per step. When no axis has steps
    /// left the router drops to [`Status::Idle`]; further ticks do nothing.
    ///
    /// A limit sensor on the travel side aborts the move into
    /// [`Status::Error`].
    pub fn tick(&mut self) -> Result<Status> {
        if self.status != Status::Processing {
            return Ok(self.status);
        }

        self.ticks_since_commit = self.ticks_since_commit.wrapping_add(1);

        if self.axes.iter().flatten().all(|axis| !axis.runtime().is_moving()) {
            self.status = Status::Idle;
            debug!("move complete after {} ticks", self.ticks_since_commit);
            return Ok(self.status);
        }

        if let Err(e) = self.check_limits() {
            self.stop(Status::Error)?;
            return Err(e);
        }
        if self.status == Status::Error {
            return Ok(self.status);
        }

        let elapsed = self.ramp.scale(self.settings.tick.0);
        let pacing = self.pacing_axis;
        let Self { axes, ramp, .. } = self;

        let mut result = Ok(());
        for axis in axes.iter_mut().flatten() {
            let advanced = if axis.id() == pacing {
                axis.advance(elapsed, |left| ramp.on_pacing_step(left))
            } else {
                axis.advance(elapsed, |_| {})
            };
            if let Err(e) = advanced {
                result = Err(e);
                break;
            }
        }

        if let Err(e) = result {
            warn!("step output failed, stopping all axes");
            self.stop(Status::Error)?;
            return Err(e);
        }

        Ok(self.status)
    }

    /// Stop immediately.
    ///
    /// Remaining steps are dropped, drivers are released and each axis keeps
    /// the position it actually reached. The prepared segment and corner
    /// continuity are discarded.
    pub fn abort(&mut self) -> Result<Outcome> {
        if self.status != Status::Processing && self.prepared.is_none() {
            return Ok(Outcome::IgnoredDegenerate);
        }

        let next = match self.status {
            Status::Processing => Status::Idle,
            other => other,
        };
        self.stop(next)?;
        info!("move aborted");
        Ok(Outcome::Accepted)
    }

    /// Leave [`Status::Error`] after a limit trip or hardware fault.
    pub fn clear_fault(&mut self) -> Outcome {
        if self.status != Status::Error {
            return Outcome::IgnoredDegenerate;
        }

        self.status = Status::Uninitialized;
        self.refresh_readiness();
        info!("fault cleared");
        Outcome::Accepted
    }

    fn check_limits(&mut self) -> Result<()> {
        let mut tripped = None;
        for axis in self.axes.iter_mut().flatten() {
            if axis.limit_hit()? {
                tripped = Some(axis.id());
                break;
            }
        }

        if let Some(id) = tripped {
            warn!("limit reached on axis {}", id);
            self.stop(Status::Error)?;
        }
        Ok(())
    }

    /// Halt every axis at its reached position and drop pending motion.
    /// All axes are halted even if one fails; the first error is returned.
    pub(super) fn stop(&mut self, next: Status) -> Result<()> {
        let mut first_error = None;
        for axis in self.axes.iter_mut().flatten() {
            let i = axis.id().index();
            match axis.halt() {
                Ok(reached) => self.planned[i] = reached,
                Err(e) => {
                    self.planned[i] = axis.runtime().position;
                    first_error.get_or_insert(e);
                }
            }
        }

        self.prepared = None;
        self.junction.reset();
        self.ramp = SpeedRamp::constant();
        self.status = next;

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
