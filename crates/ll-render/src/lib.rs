//! Terminal playback for lumaloop.
//!
//! Provides the glyph map, display surfaces, the fixed-rate ticker and the
//! player state machine.

pub mod cadence;
pub mod glyph;
pub mod player;
pub mod surface;
pub mod ticker;
