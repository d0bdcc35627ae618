/// Result of a conditional counter adjustment.
///
/// `Rejected` and `NotFound` are ordinary outcomes: an over-booked event or a
/// sold-out product is expected under load and is not a storage failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdjustOutcome<T> {
    /// The adjustment was committed; carries the row after the change.
    Applied(T),
    /// The constraint would have been violated; nothing was written. Carries
    /// the row as it was observed when the adjustment was refused.
    Rejected(T),
    NotFound,
}
