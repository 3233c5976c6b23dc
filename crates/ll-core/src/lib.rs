//! Configuration, types, and shared structures for lumaloop.
//!
//! This crate contains the symbol alphabet, the frame and video types,
//! the encoder configuration and the error taxonomy shared across the
//! lumaloop workspace.
//!
//! ```
//! use ll_core::{Symbol, SymbolAlphabet, VideoData};
//! assert_eq!(SymbolAlphabet::standard().quantize(200), Symbol::D);
//! let video = VideoData { width: 1, height: 1, fps: 24, frames: vec!["D".parse().unwrap()] };
//! assert!(video.validate().is_ok());
//! ```

pub mod alphabet;
pub mod config;
pub mod error;
pub mod frame;
pub mod video;

pub use alphabet::{Symbol, SymbolAlphabet};
pub use config::{EncodeConfig, OutputHeight};
pub use error::CoreError;
pub use frame::{EncodedFrame, RawFrame};
pub use video::VideoData;
