//! Controller status and request outcomes.

/// Controller mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// X and Y are not both configured.
    #[default]
    Uninitialized,
    /// Ready; no steps remain.
    Idle,
    /// A move is running.
    Processing,
    /// A limit sensor tripped or an output failed mid-move.
    Error,
}

/// What the router did with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// The request took effect.
    Accepted,
    /// Nothing to do: zero-length segment, zero feed, invalid geometry,
    /// nothing prepared, or no output to drive.
    IgnoredDegenerate,
    /// The router is in a state that forbids the request right now.
    IgnoredBusy,
}

impl Outcome {
    /// Whether the request took effect.
    #[inline]
    pub fn is_accepted(self) -> bool {
        self == Outcome::Accepted
    }
}
