//! Quantization engine for lumaloop.
//!
//! Converts luminance frames to symbol sequences and assembles them into
//! a `VideoData`.

pub mod assembler;
pub mod encoder;
