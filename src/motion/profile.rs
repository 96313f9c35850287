//! Velocity profiling for one straight segment.
//!
//! Turns a line request into per-axis step counts and step intervals plus the
//! acceleration envelope, blending the entry speed with the previous segment's
//! exit and planning the exit toward the next corner.

use crate::axis::{AxisId, AxisRuntime, Direction};
use crate::config::AxisScale;

use super::junction::{junction_cosine, norm, JunctionContext};
use super::ramp::{SpeedRamp, MIN_SPEED_MULTIPLIER};
use super::request::LineRequest;

const MICROS_PER_SEC: f32 = 1_000_000.0;

/// Everything the profiler reads besides the continuity state.
#[derive(Debug, Clone, Copy)]
pub struct PlanInput<'a> {
    /// Scale per axis; `None` for an axis that is not enabled.
    pub scales: [Option<AxisScale>; 3],
    /// End position of the last prepared segment.
    pub origin: [f32; 3],
    /// The segment to plan.
    pub request: &'a LineRequest,
    /// Speed a move may start or stop at without ramping.
    pub max_start_speed: f32,
    /// Speed change per pacing step.
    pub step_acceleration: f32,
    /// Zero threshold for lengths and speeds.
    pub epsilon: f32,
}

/// A planned segment, ready to be committed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionProfile {
    /// Prepared counters per axis, indexed by [`AxisId::index`].
    pub axes: [AxisRuntime; 3],
    /// Axis with the most steps; drives the acceleration envelope.
    pub pacing_axis: AxisId,
    /// Step count of the pacing axis.
    pub total_steps: u32,
    /// Euclidean segment length, mm.
    pub length: f32,
    /// Traversal time at the commanded feed, µs.
    pub duration_us: f32,
    /// Cosine of the corner toward the next segment, `[0, 1]`.
    pub junction_cosine: f32,
    /// Planned entry speed, mm/s.
    pub start_speed: f32,
    /// Planned exit speed, mm/s.
    pub finish_speed: f32,
    /// Exit speed the envelope actually reaches, mm/s.
    pub achieved_finish_speed: f32,
    /// Pacing steps spent ramping up.
    pub acceleration_steps: u32,
    /// Envelope handed to the scheduler on commit.
    pub ramp: SpeedRamp,
}

impl MotionProfile {
    /// Plan a segment.
    ///
    /// Returns `None`, leaving `junction` untouched, unless both the feed rate
    /// and the segment length are finite and above `epsilon`. Otherwise records the corner
    /// cosine and achieved exit speed in `junction` for the next call.
    pub fn plan(input: &PlanInput<'_>, junction: &mut JunctionContext) -> Option<Self> {
        let request = input.request;
        let feed = request.feed_rate.0;
        let eps = input.epsilon;

        if !exceeds(feed, eps) {
            return None;
        }

        let target = request.target.to_array();
        let delta = masked_delta(&input.scales, input.origin, target);
        let length = norm(delta);
        if !exceeds(length, eps) {
            return None;
        }

        let duration_us = length / feed * MICROS_PER_SEC;

        let mut axes = [AxisRuntime::default(); 3];
        let mut pacing_axis = AxisId::X;
        let mut total_steps = 0;

        for id in AxisId::ALL {
            let i = id.index();
            axes[i] = AxisRuntime::at_rest(input.origin[i]);

            let Some(scale) = input.scales[i] else {
                continue;
            };

            let direction = Direction::from_delta(delta[i]);
            let steps = scale.mm_to_steps(delta[i]);

            let axis = &mut axes[i];
            axis.direction = direction;
            axis.steps_left = steps;
            axis.position = input.origin[i] + direction.sign() * scale.steps_to_mm(steps);
            axis.step_interval_us = if steps > 0 {
                duration_us / steps as f32
            } else {
                0.0
            };

            if steps > total_steps {
                total_steps = steps;
                pacing_axis = id;
            }
        }

        let min_start = input.max_start_speed;
        let start_speed = junction.start_speed(min_start);

        let (cosine, finish_speed) = match request.next {
            Some(next) => {
                let next_delta = masked_delta(&input.scales, target, next.target.to_array());
                let cosine = junction_cosine(delta, next_delta, eps);
                let exit_cap = match next.feed_rate {
                    Some(f) if exceeds(f.0, eps) => feed.min(f.0),
                    _ => feed,
                };
                (cosine, min_start + (exit_cap - min_start) * cosine)
            }
            None => (0.0, min_start),
        };

        let envelope = if feed > min_start {
            Envelope::accelerated(
                feed,
                start_speed,
                finish_speed,
                input.step_acceleration,
                total_steps,
            )
        } else {
            Envelope::flat(feed)
        };

        junction.carry(cosine, envelope.achieved_finish_speed);

        debug!(
            "planned {} mm over {} steps, pacing {}, decel at {}",
            length,
            total_steps,
            pacing_axis,
            envelope.ramp.deceleration_steps
        );

        Some(Self {
            axes,
            pacing_axis,
            total_steps,
            length,
            duration_us,
            junction_cosine: cosine,
            start_speed,
            finish_speed,
            achieved_finish_speed: envelope.achieved_finish_speed,
            acceleration_steps: envelope.acceleration_steps,
            ramp: envelope.ramp,
        })
    }

    /// Prepared counters for one axis.
    #[inline]
    pub fn axis(&self, id: AxisId) -> &AxisRuntime {
        &self.axes[id.index()]
    }

    /// End position of the segment.
    pub fn end_position(&self) -> [f32; 3] {
        [self.axes[0].position, self.axes[1].position, self.axes[2].position]
    }
}

struct Envelope {
    ramp: SpeedRamp,
    acceleration_steps: u32,
    achieved_finish_speed: f32,
}

impl Envelope {
    fn flat(feed: f32) -> Self {
        Self {
            ramp: SpeedRamp::constant(),
            acceleration_steps: 0,
            achieved_finish_speed: feed,
        }
    }

    fn accelerated(feed: f32, start: f32, finish: f32, step_acceleration: f32, total: u32) -> Self {
        let accel = steps_to_change(feed - start, step_acceleration);
        let mut decel = steps_to_change(feed - finish, step_acceleration);

        if u64::from(accel) + u64::from(decel) > u64::from(total) {
            // Triangle: ramp up and ramp down meet where both speeds agree.
            let meet = (i64::from(total) + i64::from(decel) - i64::from(accel)) / 2;
            decel = meet.clamp(0, i64::from(total)) as u32;
        }

        let multiplier = (start / feed).clamp(MIN_SPEED_MULTIPLIER, 1.0);
        let ramp_up_steps = total - decel;

        // The scheduler raises the multiplier on every pacing step before the
        // onset and lowers it on every step after, within its bounds.
        let peak = (multiplier * feed + ramp_up_steps as f32 * step_acceleration).min(feed);
        let achieved = (peak - decel as f32 * step_acceleration).max(MIN_SPEED_MULTIPLIER * feed);

        Self {
            ramp: SpeedRamp {
                accelerated: true,
                multiplier,
                increment: step_acceleration / feed,
                deceleration_steps: decel,
            },
            acceleration_steps: accel.min(ramp_up_steps),
            achieved_finish_speed: achieved,
        }
    }
}

/// NaN and infinities never exceed.
#[inline]
fn exceeds(value: f32, eps: f32) -> bool {
    value > eps && value.is_finite()
}

fn steps_to_change(speed_delta: f32, step_acceleration: f32) -> u32 {
    if speed_delta <= 0.0 {
        0
    } else {
        (speed_delta / step_acceleration) as u32
    }
}

fn masked_delta(scales: &[Option<AxisScale>; 3], from: [f32; 3], to: [f32; 3]) -> [f32; 3] {
    let mut delta = [0.0; 3];
    for i in 0..3 {
        if scales[i].is_some() {
            delta[i] = to[i] - from[i];
        }
    }
    delta
}
