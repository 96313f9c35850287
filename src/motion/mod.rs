//! Motion module for cnc-motion.
//!
//! Provides segment profiling, corner blending and the speed ramp the
//! scheduler applies while a move runs.

mod junction;
mod profile;
mod ramp;
mod request;

pub use junction::{junction_cosine, JunctionContext};
pub use profile::{MotionProfile, PlanInput};
pub use ramp::{MotionPhase, SpeedRamp, MIN_SPEED_MULTIPLIER};
pub use request::{LineRequest, Lookahead, Point3};
