//! City name list loader: a RON list of strings.

use std::path::Path;

use anyhow::Context;

use crate::loaders::{LoadResult, read_file};

pub struct CityNamesLoader;

impl CityNamesLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<String>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parses the list, trimming names and dropping blanks.
    pub fn parse(content: &str) -> LoadResult<Vec<String>> {
        let names: Vec<String> =
            ron::from_str(content).context("Failed to parse city names RON")?;
        Ok(names
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blanks_are_dropped() {
        let names = CityNamesLoader::parse(r#"["Ur", "  ", " Uruk "]"#).unwrap();
        assert_eq!(names, vec!["Ur".to_string(), "Uruk".to_string()]);
    }
}
