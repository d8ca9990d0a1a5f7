use crate::unit::SourceUnit;
use propscan_analysis::{LoadError, UnitLoader};
use std::path::Path;

/// Loads units by reading and parsing files from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader;

impl UnitLoader for FileLoader {
    type Unit = SourceUnit;

    fn load(&self, path: &Path) -> Result<SourceUnit, LoadError> {
        SourceUnit::from_path(path).map_err(|err| LoadError::new(err.to_string()))
    }
}
