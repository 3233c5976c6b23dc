//! Artifact emission for lumaloop.
//!
//! Serializes a `VideoData` into the self-contained playback artifact and
//! reads it back for the player.

pub mod artifact;
