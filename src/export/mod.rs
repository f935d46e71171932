//! Model artifact export and loading
//!
//! Provides the on-disk format for fitted model variants:
//! - Native binary format (bincode, checksummed)
//! - JSON format (portable, human-readable)

mod serializer;

pub use serializer::{
    ArtifactMetadata, ModelArtifact, SerializationFormat, DEFAULT_VARIANT_PREFERENCE,
};
