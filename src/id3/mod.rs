// ID3v2 lyrics frame handling module

pub mod frames;
pub mod v2;

pub use v2::{find_frame, probe, FrameScanner, Id3v2Header, TagProbe};
