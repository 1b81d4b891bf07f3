use std::{
    fs::File,
    hash::{Hash, Hasher},
    io::BufReader,
    path::Path,
    sync::Arc,
};

use crate::foundation::error::{KinetypeError, KinetypeResult};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Clickable destination attached to a film entry.
///
/// Identity is the `url`: two links with the same url are the same link.
pub struct Link {
    /// Player destination handed to the external player on click.
    pub url: String,
    /// Substring selecting the catalog clips that belong to this film.
    pub source_filter: String,
    /// Substring selecting the single clip used as the film's thumbnail.
    #[serde(alias = "thumbnailKey")]
    pub thumbnail: String,
}

impl PartialEq for Link {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for Link {}

impl Hash for Link {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One film entry shown in the header.
pub struct Film {
    /// Title used by the wide, two-column header.
    pub long_title: String,
    /// Title used by the stacked headers.
    pub short_title: String,
    /// Right-aligned annotation (e.g. running time).
    pub subtitle: String,
    /// Link when the film is playable; `None` renders as an inactive entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Arc<Link>>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Static copy laid out by the text engine.
///
/// Paragraph strings may contain the pause markers `[:]`, `[;]` and `[.]`, which expand to runs of
/// spaces whose widths depend on the layout breakpoint.
pub struct Content {
    /// Sequence title.
    pub title: String,
    /// Header film entries (two or more).
    pub films: Vec<Film>,
    /// Body paragraphs.
    #[serde(alias = "body")]
    pub body_paragraphs: Vec<String>,
    /// Credit paragraphs.
    #[serde(alias = "credits", default)]
    pub credit_paragraphs: Vec<String>,
}

impl Content {
    /// Parse content from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> KinetypeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| KinetypeError::serde(format!("parse content JSON: {e}")))
    }

    /// Parse content from a JSON string.
    pub fn from_json_str(s: &str) -> KinetypeResult<Self> {
        serde_json::from_str(s).map_err(|e| KinetypeError::serde(format!("parse content JSON: {e}")))
    }

    /// Parse content from a JSON file on disk.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> KinetypeResult<Self> {
        let f = File::open(path).map_err(|e| {
            KinetypeError::validation(format!("open content JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate structural invariants the layout engine relies on.
    pub fn validate(&self) -> KinetypeResult<()> {
        if self.title.trim().is_empty() {
            return Err(KinetypeError::validation("content title must be non-empty"));
        }
        if self.films.len() < 2 {
            return Err(KinetypeError::validation(
                "content must have at least two films",
            ));
        }
        for (i, film) in self.films.iter().enumerate() {
            if film.short_title.trim().is_empty() || film.long_title.trim().is_empty() {
                return Err(KinetypeError::validation(format!(
                    "film {i} must have non-empty long and short titles"
                )));
            }
            if let Some(link) = &film.link {
                for (name, value) in [
                    ("url", &link.url),
                    ("sourceFilter", &link.source_filter),
                    ("thumbnail", &link.thumbnail),
                ] {
                    if value.trim().is_empty() {
                        return Err(KinetypeError::validation(format!(
                            "film {i} link {name} must be non-empty"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Links of all playable films, in header order.
    pub fn links(&self) -> impl Iterator<Item = &Arc<Link>> {
        self.films.iter().filter_map(|f| f.link.as_ref())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/model.rs"]
mod tests;
