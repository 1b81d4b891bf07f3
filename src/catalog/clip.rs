use std::{fs::File, io::BufReader, path::Path};

use crate::{
    content::model::Link,
    foundation::error::{KinetypeError, KinetypeResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One pre-converted background clip, as written by the offline conversion step.
pub struct Clip {
    /// Video URL.
    pub url: String,
    /// Still preview image URL.
    #[serde(alias = "imagePreviewUrl")]
    pub image: String,
    /// Probed duration in seconds.
    #[serde(alias = "durationSeconds")]
    pub duration: f64,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
/// Read-only clip catalog in manifest order.
///
/// Manifest order matters: clip selection samples from filtered lists by position.
pub struct ClipCatalog {
    clips: Vec<Clip>,
}

impl ClipCatalog {
    /// Wrap an ordered list of clips.
    pub fn new(clips: Vec<Clip>) -> Self {
        Self { clips }
    }

    /// Parse a manifest (JSON array of clips) from a reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> KinetypeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| KinetypeError::serde(format!("parse clip manifest JSON: {e}")))
    }

    /// Parse a manifest from a JSON string.
    pub fn from_json_str(s: &str) -> KinetypeResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| KinetypeError::serde(format!("parse clip manifest JSON: {e}")))
    }

    /// Parse a manifest from a JSON file on disk.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> KinetypeResult<Self> {
        let f = File::open(path).map_err(|e| {
            KinetypeError::validation(format!("open clip manifest '{}': {e}", path.display()))
        })?;
        let catalog = Self::from_reader(BufReader::new(f))?;
        tracing::debug!(clips = catalog.len(), "loaded clip manifest");
        Ok(catalog)
    }

    /// Validate per-clip invariants.
    pub fn validate(&self) -> KinetypeResult<()> {
        for (i, clip) in self.clips.iter().enumerate() {
            if clip.url.trim().is_empty() {
                return Err(KinetypeError::validation(format!(
                    "clip {i} url must be non-empty"
                )));
            }
            if !clip.duration.is_finite() || clip.duration < 0.0 {
                return Err(KinetypeError::validation(format!(
                    "clip '{}' duration must be finite and >= 0",
                    clip.url
                )));
            }
        }
        Ok(())
    }

    /// All clips in manifest order.
    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    /// Number of clips.
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Whether the catalog has no clips.
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Clips at least `min_duration` long whose url contains `filter` (when non-empty).
    pub fn candidates(&self, min_duration: f64, filter: Option<&str>) -> Vec<&Clip> {
        let filter = filter.filter(|f| !f.is_empty());
        self.clips
            .iter()
            .filter(|c| c.duration >= min_duration && filter.is_none_or(|f| c.url.contains(f)))
            .collect()
    }

    /// Clips belonging to `link`, in manifest order.
    pub fn clips_for_link(&self, link: &Link) -> Vec<&Clip> {
        self.clips
            .iter()
            .filter(|c| c.url.contains(&link.source_filter))
            .collect()
    }

    /// The thumbnail clip of `link`, if the catalog has one.
    pub fn thumbnail_for(&self, link: &Link) -> Option<&Clip> {
        self.clips.iter().find(|c| c.url.contains(&link.thumbnail))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/clip.rs"]
mod tests;
