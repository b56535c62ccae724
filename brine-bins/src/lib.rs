//! Brine binaries: shared CLI setup and the replay feeds

pub mod common;
pub mod feed;
