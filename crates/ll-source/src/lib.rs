//! External collaborators of the lumaloop encoder: ffmpeg/ffprobe
//! subprocesses, frame discovery, image decoding, resizing and terminal
//! geometry.

pub mod frames;
pub mod geometry;
pub mod image;
pub mod resize;
pub mod video;
