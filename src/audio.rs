//! Audio engine adapter and track metadata reader.
//!
//! The player only talks to the `AudioEngine` and `MetadataReader` traits;
//! `RodioEngine` and `LoftyMetadata` are the implementations used at runtime.

mod engine;
mod metadata;
mod rodio_engine;
mod sink;

pub use engine::AudioEngine;
pub use metadata::{LoftyMetadata, MetadataReader};
pub use rodio_engine::RodioEngine;
