//! Font loading utilities for the mast_report crate.
//!
//! Reports mix Latin and CJK text, so the document uses the Source Han Sans TC family.  Only the
//! regular and bold faces are shipped; the italic variants reuse them.

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use genpdf::error::Error;
use genpdf::fonts::{FontData, FontFamily};
use log::info;

/// Name of the bundled font family.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "SourceHanSansTC";

/// Environment variable naming a directory that contains the font files.
pub const FONTS_DIR_ENV: &str = "MAST_REPORT_FONTS_DIR";

const REGULAR_FONT_FILE: &str = "SourceHanSansTC-Regular.ttf";
const BOLD_FONT_FILE: &str = "SourceHanSansTC-Bold.ttf";
const FONT_FILES: &[&str] = &[REGULAR_FONT_FILE, BOLD_FONT_FILE];

/// Returns the `assets/fonts` directory of the crate sources.
pub fn bundled_fonts_source_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts")
}

fn font_directory_candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    let mut push_unique = |candidate: PathBuf| {
        if !candidates.iter().any(|existing| existing == &candidate) {
            candidates.push(candidate);
        }
    };

    if let Some(path) = explicit {
        push_unique(path.to_path_buf());
    }

    if let Ok(path) = env::var(FONTS_DIR_ENV) {
        if !path.trim().is_empty() {
            push_unique(PathBuf::from(path));
        }
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            push_unique(bin_dir.join("assets/fonts"));
        }
    }

    push_unique(bundled_fonts_source_dir());

    candidates
}

fn missing_font_files(path: &Path) -> Vec<PathBuf> {
    FONT_FILES
        .iter()
        .map(|name| path.join(name))
        .filter(|candidate| !candidate.is_file())
        .collect()
}

fn resolve_font_directory(explicit: Option<&Path>) -> Result<PathBuf, Error> {
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates(explicit) {
        let exists = candidate.is_dir();
        let missing = missing_font_files(&candidate);

        if exists && missing.is_empty() {
            return Ok(candidate);
        }

        let reason = if !exists {
            format!("directory missing at {}", candidate.display())
        } else {
            let missing_list = missing
                .iter()
                .map(|path| path.file_name().unwrap_or_default().to_string_lossy())
                .collect::<Vec<_>>()
                .join(", ");
            format!("missing files [{}]", missing_list)
        };

        attempts.push(format!("{} ({})", candidate.display(), reason));
    }

    Err(Error::new(
        format!(
            "Unable to locate the {} fonts. Checked: {}. See assets/fonts/README.md or set {}.",
            DEFAULT_FONT_FAMILY_NAME,
            attempts.join(", "),
            FONTS_DIR_ENV
        ),
        io::Error::new(io::ErrorKind::NotFound, "report fonts directory not found"),
    ))
}

fn load_font(directory: &Path, file: &str) -> Result<FontData, Error> {
    let path = directory.join(file);
    FontData::load(&path, None).map_err(|err| {
        Error::new(
            format!("Failed to load font {}: {}", path.display(), err),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

/// Loads the report font family from the first usable directory.
///
/// `explicit` is checked first, followed by the `MAST_REPORT_FONTS_DIR` environment variable,
/// `assets/fonts` next to the executable and `assets/fonts` in the crate sources.
pub fn load_font_family(explicit: Option<&Path>) -> Result<FontFamily<FontData>, Error> {
    let directory = resolve_font_directory(explicit)?;
    let regular = load_font(&directory, REGULAR_FONT_FILE)?;
    let bold = load_font(&directory, BOLD_FONT_FILE)?;
    info!(
        "Loaded '{}' font family from {}",
        DEFAULT_FONT_FAMILY_NAME,
        directory.display()
    );

    Ok(FontFamily {
        italic: regular.clone(),
        bold_italic: bold.clone(),
        regular,
        bold,
    })
}

/// Returns the default font family, searching the standard locations.
pub fn default_font_family() -> Result<FontFamily<FontData>, Error> {
    load_font_family(None)
}

/// Indicates whether the font files can be found in one of the standard locations.
pub fn default_fonts_available() -> bool {
    resolve_font_directory(None).is_ok()
}

/// Process-wide font registration.
///
/// The family is loaded on first use and reused by every later render.  A failed load is not
/// cached, so the next request tries again.  Each render receives its own in-memory copy of
/// the family, since a `genpdf` document owns its fonts.
#[derive(Default)]
pub struct FontStore {
    directory: Option<PathBuf>,
    family: OnceLock<FontFamily<FontData>>,
}

impl FontStore {
    /// Creates a store that prefers fonts from `directory`.
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self {
            directory,
            family: OnceLock::new(),
        }
    }

    /// Returns the font family, loading it on first use.
    pub fn family(&self) -> Result<FontFamily<FontData>, Error> {
        if let Some(family) = self.family.get() {
            return Ok(family.clone());
        }
        let loaded = load_font_family(self.directory.as_deref())?;
        Ok(self.family.get_or_init(|| loaded).clone())
    }

    /// Indicates whether the store can resolve its font directory.
    pub fn is_available(&self) -> bool {
        self.family.get().is_some() || resolve_font_directory(self.directory.as_deref()).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directory_is_searched_first() {
        let explicit = PathBuf::from("/__mast_report_explicit_fonts__");
        let candidates = font_directory_candidates(Some(&explicit));
        assert_eq!(candidates.first(), Some(&explicit));
        assert!(candidates.contains(&bundled_fonts_source_dir()));
    }

    #[test]
    fn reports_every_missing_font_file() {
        let missing = missing_font_files(Path::new("/__mast_report_missing_fonts__"));
        assert_eq!(missing.len(), FONT_FILES.len());
        assert!(missing[0].ends_with(REGULAR_FONT_FILE));
    }
}
