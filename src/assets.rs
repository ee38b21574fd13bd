//! Photo discovery on disk.
//!
//! Texture decoding belongs to the render collaborator; this module only
//! finds the files it should load.

use std::path::{Path, PathBuf};

use crate::error::EvergreenError;

/// Extensions recognised as photos (compared case-insensitively).
pub const PHOTO_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Whether `path` has a photo extension.
#[must_use]
pub fn is_photo(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            PHOTO_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// List the photo files directly inside `dir`, sorted by path.
///
/// Subdirectories are not searched. A missing directory is an I/O error;
/// an empty one yields an empty list.
pub fn discover_photos(dir: &Path) -> Result<Vec<PathBuf>, EvergreenError> {
    let mut photos = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_photo(&path) {
            photos.push(path);
        }
    }
    photos.sort();
    log::debug!("found {} photos in {}", photos.len(), dir.display());
    Ok(photos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_photos_case_insensitively_in_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.PNG", "a.jpg", "c.JpEg", "notes.txt", "d.gif", "noext"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.jpg")).unwrap();

        let found = discover_photos(dir.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .filter_map(|p| p.file_name()?.to_str())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.PNG", "c.JpEg"]);
    }

    #[test]
    fn empty_directory_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_photos(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_photos(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, EvergreenError::Io(_)));
    }
}
