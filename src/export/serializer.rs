//! Model artifact serialization
//!
//! An artifact maps variant names to fitted text pipelines. Two encodings are
//! supported and picked from the file extension: `.json` for a readable
//! document, anything else for a checksummed bincode envelope.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{ClassifierError, Result};
use crate::models::TextPipeline;

/// Variant preference used when nothing else is configured
pub const DEFAULT_VARIANT_PREFERENCE: [&str; 2] = ["svc_final", "logreg_final"];

/// Serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SerializationFormat {
    /// Bincode payload inside a checksummed envelope
    Binary,
    /// JSON document (portable, human-readable)
    Json,
}

impl SerializationFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SerializationFormat::Json,
            _ => SerializationFormat::Binary,
        }
    }
}

/// Descriptive artifact metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub name: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    pub description: String,
}

/// Mapping of variant name to fitted pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub metadata: ArtifactMetadata,
    pub variants: BTreeMap<String, TextPipeline>,
}

/// Binary container around the bincode payload
#[derive(Debug, Serialize, Deserialize)]
struct ArtifactEnvelope {
    magic: [u8; 4],
    format_version: u32,
    checksum: u64,
    payload: Vec<u8>,
}

impl ModelArtifact {
    /// Magic bytes for binary artifacts
    const MAGIC: [u8; 4] = [b'F', b'N', b'C', b'M'];
    /// Current format version
    pub const FORMAT_VERSION: u32 = 1;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            format_version: Self::FORMAT_VERSION,
            metadata: ArtifactMetadata {
                name: name.into(),
                created_at: chrono::Utc::now().to_rfc3339(),
                description: String::new(),
            },
            variants: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.metadata.description = description.into();
        self
    }

    pub fn with_variant(mut self, name: impl Into<String>, pipeline: TextPipeline) -> Self {
        self.variants.insert(name.into(), pipeline);
        self
    }

    /// Pick the first variant from `preference` that the artifact contains.
    ///
    /// The chosen pipeline is validated; a present but inconsistent variant
    /// is an error rather than a reason to fall through to the next name.
    pub fn select<S: AsRef<str>>(&self, preference: &[S]) -> Result<(&str, &TextPipeline)> {
        for name in preference {
            if let Some((key, pipeline)) = self.variants.get_key_value(name.as_ref()) {
                pipeline.validate().map_err(|e| {
                    ClassifierError::InvalidArtifact(format!("variant {:?}: {}", key, e))
                })?;
                return Ok((key.as_str(), pipeline));
            }
        }

        Err(ClassifierError::VariantNotFound {
            looked_for: preference.iter().map(|s| s.as_ref().to_string()).collect(),
        })
    }

    /// Compute checksum using FNV-1a hash
    fn compute_checksum(data: &[u8]) -> u64 {
        const FNV_OFFSET: u64 = 14695981039346656037;
        const FNV_PRIME: u64 = 1099511628211;

        let mut hash = FNV_OFFSET;
        for byte in data {
            hash ^= *byte as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        hash
    }

    fn check_version(version: u32) -> Result<()> {
        if version != Self::FORMAT_VERSION {
            return Err(ClassifierError::InvalidArtifact(format!(
                "unsupported format version {} (expected {})",
                version,
                Self::FORMAT_VERSION
            )));
        }
        Ok(())
    }

    /// Encode as a binary envelope
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let payload = bincode::serialize(self)?;
        let envelope = ArtifactEnvelope {
            magic: Self::MAGIC,
            format_version: self.format_version,
            checksum: Self::compute_checksum(&payload),
            payload,
        };
        Ok(bincode::serialize(&envelope)?)
    }

    /// Decode a binary envelope, verifying magic, version and checksum
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let envelope: ArtifactEnvelope = bincode::deserialize(bytes)?;

        if envelope.magic != Self::MAGIC {
            return Err(ClassifierError::InvalidArtifact(
                "not a model artifact (bad magic bytes)".to_string(),
            ));
        }
        Self::check_version(envelope.format_version)?;
        if Self::compute_checksum(&envelope.payload) != envelope.checksum {
            return Err(ClassifierError::InvalidArtifact(
                "checksum verification failed - file may be corrupted".to_string(),
            ));
        }

        let artifact: ModelArtifact = bincode::deserialize(&envelope.payload)?;
        Self::check_version(artifact.format_version)?;
        Ok(artifact)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: ModelArtifact = serde_json::from_str(json)?;
        Self::check_version(artifact.format_version)?;
        Ok(artifact)
    }

    /// Save to file, choosing the encoding from the extension
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        match SerializationFormat::from_path(path) {
            SerializationFormat::Binary => writer.write_all(&self.to_bytes()?)?,
            SerializationFormat::Json => serde_json::to_writer_pretty(&mut writer, self)?,
        }

        writer.flush()?;
        Ok(())
    }

    /// Load from file, choosing the encoding from the extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        match SerializationFormat::from_path(path) {
            SerializationFormat::Binary => {
                let mut bytes = Vec::new();
                reader.read_to_end(&mut bytes)?;
                Self::from_bytes(&bytes)
            }
            SerializationFormat::Json => {
                let mut json = String::new();
                reader.read_to_string(&mut json)?;
                Self::from_json(&json)
            }
        }
    }
}
