use crate::utils::error::Result;

/// Source of the text files fed to the importer.
pub trait Storage {
    fn read_to_string(&self, path: &str) -> Result<String>;
}
