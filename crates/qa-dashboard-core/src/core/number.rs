// crates/qa-dashboard-core/src/core/number.rs
// ============================================================================
// Module: Score Serialization
// Description: Wire form for numeric scores and metrics.
// Purpose: Emit whole-number scores as JSON integers.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Scores are held as `f64`, but hosts read `12` rather than `12.0` for
//! whole values. Fractional and non-finite values serialize unchanged.
//! Deserialization accepts either form through the plain `f64` impl.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serializer;

// ============================================================================
// SECTION: Serialization
// ============================================================================

/// Serializes a score, collapsing whole values to an integer.
#[allow(
    clippy::trivially_copy_pass_by_ref,
    reason = "serde serialize_with hands fields over by reference."
)]
pub(crate) fn serialize_score<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    // Display renders whole values without a fraction; anything else fails the parse.
    match value.to_string().parse::<i64>() {
        Ok(whole) => serializer.serialize_i64(whole),
        Err(_) => serializer.serialize_f64(*value),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
