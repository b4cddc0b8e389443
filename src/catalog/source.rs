//! Catalog sources

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use crate::catalog::{Catalog, CatalogError};

/// Encoding of a catalog document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// `.json`
    Json,

    /// `.yml` / `.yaml`
    Yaml,
}

impl CatalogFormat {
    /// Pick a format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        match path.extension().and_then(OsStr::to_str) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(CatalogFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                Ok(CatalogFormat::Yaml)
            }
            _ => Err(CatalogError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Parse catalog text in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid catalog.
    pub fn parse(self, text: &str) -> Result<Catalog, CatalogError> {
        match self {
            CatalogFormat::Json => Catalog::from_json_str(text),
            CatalogFormat::Yaml => Catalog::from_yaml_str(text),
        }
    }
}

/// Somewhere a surface can fetch the full product collection from.
pub trait CatalogSource {
    /// Fetch the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is unreachable or malformed.
    fn load(&self) -> Result<Catalog, CatalogError>;
}

/// Catalog stored in a local JSON or YAML file.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    /// Source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path the catalog is read from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for FileCatalogSource {
    fn load(&self) -> Result<Catalog, CatalogError> {
        Catalog::from_path(&self.path)
    }
}

/// Catalog text bundled in memory.
#[derive(Debug, Clone)]
pub struct StaticCatalogSource {
    text: String,
    format: CatalogFormat,
}

impl StaticCatalogSource {
    /// Source parsing `text` as `format`.
    pub fn new(text: impl Into<String>, format: CatalogFormat) -> Self {
        Self {
            text: text.into(),
            format,
        }
    }
}

impl CatalogSource for StaticCatalogSource {
    fn load(&self) -> Result<Catalog, CatalogError> {
        self.format.parse(&self.text)
    }
}

/// What a surface knows about the catalog.
#[derive(Debug, Default)]
pub enum CatalogState {
    /// Not fetched yet
    #[default]
    Loading,

    /// Fetched successfully
    Ready(Catalog),

    /// Fetch failed; the surface shows an error state
    Failed(CatalogError),
}

impl CatalogState {
    /// Fetch from `source`, capturing failure as [`CatalogState::Failed`].
    pub fn resolve(source: &impl CatalogSource) -> Self {
        match source.load() {
            Ok(catalog) => CatalogState::Ready(catalog),
            Err(err) => {
                tracing::error!(error = %err, "failed to load catalog");

                CatalogState::Failed(err)
            }
        }
    }

    /// The catalog, once ready.
    pub fn catalog(&self) -> Option<&Catalog> {
        match self {
            CatalogState::Ready(catalog) => Some(catalog),
            CatalogState::Loading | CatalogState::Failed(_) => None,
        }
    }

    /// The load error, if fetching failed.
    pub fn error(&self) -> Option<&CatalogError> {
        match self {
            CatalogState::Failed(err) => Some(err),
            CatalogState::Loading | CatalogState::Ready(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn format_from_extension() -> TestResult {
        assert_eq!(CatalogFormat::from_path(Path::new("a.json"))?, CatalogFormat::Json);
        assert_eq!(CatalogFormat::from_path(Path::new("a.YML"))?, CatalogFormat::Yaml);
        assert_eq!(CatalogFormat::from_path(Path::new("a.yaml"))?, CatalogFormat::Yaml);

        Ok(())
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let result = CatalogFormat::from_path(Path::new("catalog.csv"));

        assert!(matches!(result, Err(CatalogError::UnsupportedFormat(_))));
    }

    #[test]
    fn static_source_resolves_ready() {
        let source = StaticCatalogSource::new(
            r#"{ "products": [{ "id": 1, "name": "Mug", "price": 249 }] }"#,
            CatalogFormat::Json,
        );

        let state = CatalogState::resolve(&source);

        assert_eq!(state.catalog().map(Catalog::len), Some(1));
        assert!(state.error().is_none());
    }

    #[test]
    fn missing_file_resolves_failed() -> TestResult {
        let dir = tempfile::tempdir()?;
        let source = FileCatalogSource::new(dir.path().join("missing.json"));

        let state = CatalogState::resolve(&source);

        assert!(matches!(state.error(), Some(CatalogError::Io(_))));
        assert!(state.catalog().is_none());

        Ok(())
    }

    #[test]
    fn file_source_reads_yaml() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("catalog.yml");
        fs::write(&path, "products:\n  - id: 5\n    name: Lamp\n    price: 999\n")?;

        let catalog = FileCatalogSource::new(&path).load()?;

        assert_eq!(catalog.len(), 1);

        Ok(())
    }

    #[test]
    fn default_state_is_loading() {
        assert!(matches!(CatalogState::default(), CatalogState::Loading));
    }
}
