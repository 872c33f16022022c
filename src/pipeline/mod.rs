//! The staged core: sampling first, then classification.

pub mod classify;
pub mod sample;
