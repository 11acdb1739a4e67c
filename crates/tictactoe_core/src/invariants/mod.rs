//! First-class invariants for tic-tac-toe.
//!
//! Invariants are logical properties that hold for every reachable state.
//! They are checked after each accepted move in debug builds and can be
//! tested independently.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for 2- and 3-tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check_one<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check_one::<S, I1>(state, &mut violations);
        check_one::<S, I2>(state, &mut violations);
        check_one::<S, I3>(state, &mut violations);
        collect(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check_one::<S, I1>(state, &mut violations);
        check_one::<S, I2>(state, &mut violations);
        collect(violations)
    }
}

pub mod balanced_marks;
pub mod history_monotonic;
pub mod move_count;
pub mod single_winner;

pub use balanced_marks::BalancedMarksInvariant;
pub use history_monotonic::HistoryMonotonicInvariant;
pub use move_count::MoveCountInvariant;
pub use single_winner::SingleWinnerInvariant;

/// All per-state invariants as a composable set.
pub type StateInvariants = (
    MoveCountInvariant,
    BalancedMarksInvariant,
    SingleWinnerInvariant,
);
