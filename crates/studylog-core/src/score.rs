//! Productivity score calculator.
//!
//! Maps one observation of distracted/studied minutes to a single
//! efficiency value:
//!
//! ```text
//! productivity = e^(-distracted / studied)
//! ```
//!
//! Properties:
//! - Range is the open-closed interval (0, 1]; exactly 1 iff no time was
//!   spent distracted.
//! - Strictly decreasing in `distracted_minutes`.
//! - Strictly increasing in `studied_minutes` when `distracted_minutes > 0`.

/// Compute the productivity score for one observation.
///
/// `distracted_minutes` must be finite and non-negative, `studied_minutes`
/// finite and strictly positive. Callers validate through
/// [`RecordDraft`](crate::record::RecordDraft) before invoking this; the
/// function itself is pure and stateless.
pub fn productivity_score(distracted_minutes: f64, studied_minutes: f64) -> f64 {
    debug_assert!(distracted_minutes >= 0.0);
    debug_assert!(studied_minutes > 0.0);
    (-distracted_minutes / studied_minutes).exp()
}
