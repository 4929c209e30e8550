use thiserror::Error;

/// Errors raised while validating [`crate::config::SessionParams`]
/// during session build. Runtime degradation (missing ground, short
/// passenger spawns) is handled in place and never surfaces as an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The street grid needs at least two lines per axis to enclose a
    /// block.
    #[error("grid size {0} is too small; need at least 2 lines per axis")]
    GridTooSmall(usize),

    /// The passenger roster is capped at twelve.
    #[error("requested {0} passengers; the roster is capped at {max}", max = crate::spawner::PASSENGER_ROSTER_CAP)]
    TooManyPassengers(usize),

    /// Light timers are seeded uniformly inside the green window, so the
    /// green phase must be positive and no phase may be negative.
    #[error("light phases need a positive green window and non-negative yellow/red")]
    InvalidLightPhases,

    /// Building heights are sampled from `min..max`, which must be a
    /// non-empty range.
    #[error("building height range is empty; min must be below max")]
    EmptyHeightRange,
}
