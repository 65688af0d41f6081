/// Catalog snapshot loading
use crate::error::{PlayerError, Result};
use std::path::Path;
use tempo_core::Catalog;
use tracing::info;

/// Read the catalog snapshot from a JSON file
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| PlayerError::Catalog(format!("{}: {e}", path.display())))?;

    let catalog: Catalog = serde_json::from_str(&text)
        .map_err(|e| PlayerError::Catalog(format!("{}: {e}", path.display())))?;

    info!(
        path = %path.display(),
        artists = catalog.artists.len(),
        albums = catalog.albums.len(),
        "Catalog loaded"
    );
    Ok(catalog)
}
