//! Swatch color extraction and classification for product imagery.
//!
//! The core pipeline reduces an image to a single pixel (an exact
//! coordinate, the center, or a K-means dominant color), encodes it as
//! lowercase hex, and classifies it into a named color family, letting a
//! free-text description override the measurement. Around the core,
//! [`api`] carries the extract-color endpoint contract and [`catalog`]
//! stages product records for storage; crawling, HTTP serving and
//! persistence stay outside this crate.

pub mod api;
pub mod catalog;
pub mod cli;
pub mod color;
pub mod fetch;
pub mod pipeline;
