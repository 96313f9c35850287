//! Prepare/commit: the double-buffered move pipeline.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;

use crate::error::Result;
use crate::motion::{LineRequest, Lookahead, MotionProfile, PlanInput, Point3};

use super::{Outcome, Router, Status};

impl<STEP, DIR, EN, LIM, PWM> Router<STEP, DIR, EN, LIM, PWM>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIM: InputPin,
    PWM: SetDutyCycle,
{
    /// Plan the next segment from the end of the last prepared one.
    ///
    /// May run while the previous move is still stepping. Holds one segment:
    /// a second call before [`commit`](Self::commit) is ignored as busy.
    /// A zero feed or zero-length segment is ignored as degenerate and
    /// leaves all prepared state untouched.
    pub fn prepare(&mut self, request: &LineRequest) -> Outcome {
        match self.status {
            Status::Uninitialized => {
                trace!("segment ignored: horizontal axes not configured");
                return Outcome::IgnoredDegenerate;
            }
            Status::Error => {
                trace!("segment ignored: busy, fault not cleared");
                return Outcome::IgnoredBusy;
            }
            Status::Idle | Status::Processing => {}
        }

        if self.prepared.is_some() {
            trace!("segment ignored: busy, lookahead slot full");
            return Outcome::IgnoredBusy;
        }

        let input = PlanInput {
            scales: self.scales(),
            origin: self.planned,
            request,
            max_start_speed: self.settings.max_start_speed.0,
            step_acceleration: self.settings.step_acceleration.0,
            epsilon: self.settings.epsilon,
        };

        match MotionProfile::plan(&input, &mut self.junction) {
            Some(profile) => {
                self.planned = profile.end_position();
                self.prepared = Some(profile);
                Outcome::Accepted
            }
            None => {
                trace!("segment ignored: degenerate");
                Outcome::IgnoredDegenerate
            }
        }
    }

    /// Promote the prepared segment into the live axes and start it.
    ///
    /// Writes direction and enable lines for every axis with steps to take.
    /// Ignored as busy while a move runs or a fault is pending, and as
    /// degenerate when nothing is prepared or the router is not configured.
    /// A pin failure stops every axis and leaves the router in
    /// [`Status::Error`].
    pub fn commit(&mut self) -> Result<Outcome> {
        match self.status {
            Status::Uninitialized => {
                trace!("commit ignored: horizontal axes not configured");
                return Ok(Outcome::IgnoredDegenerate);
            }
            Status::Processing | Status::Error => {
                trace!("commit ignored: busy");
                return Ok(Outcome::IgnoredBusy);
            }
            Status::Idle => {}
        }

        let Some(profile) = self.prepared.take() else {
            return Ok(Outcome::IgnoredDegenerate);
        };

        let loaded = self.load(&profile);
        if let Err(e) = loaded {
            warn!("commit failed, stopping all axes");
            self.stop(Status::Error)?;
            return Err(e);
        }

        self.ramp = profile.ramp;
        self.pacing_axis = profile.pacing_axis;
        self.ticks_since_commit = 0;
        self.status = Status::Processing;

        debug!(
            "committed {} steps on {}, multiplier {}",
            profile.total_steps,
            profile.pacing_axis,
            profile.ramp.multiplier
        );
        Ok(Outcome::Accepted)
    }

    /// Move to `target` at the commanded feed.
    ///
    /// Prepares the segment first unless one is already prepared, in which
    /// case the prepared one is committed and `target` is not used.
    pub fn line_to(&mut self, target: Point3, next: Option<Point3>) -> Result<Outcome> {
        if self.status == Status::Processing {
            trace!("segment ignored: busy, move in progress");
            return Ok(Outcome::IgnoredBusy);
        }

        if self.prepared.is_none() {
            let request = LineRequest {
                target,
                feed_rate: self.settings.feed_rate,
                next: next.map(|target| Lookahead {
                    target,
                    feed_rate: None,
                }),
            };
            let prepared = self.prepare(&request);
            if !prepared.is_accepted() {
                return Ok(prepared);
            }
        }

        self.commit()
    }

    fn load(&mut self, profile: &MotionProfile) -> Result<()> {
        for axis in self.axes.iter_mut().flatten() {
            axis.load(profile.axes[axis.id().index()])?;
        }
        Ok(())
    }
}
