use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    /// Poster image link. Displayed only; never fetched.
    #[serde(default)]
    pub poster_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub movies: Vec<Movie>,
}

impl Category {
    /// Find a movie by title, ignoring ASCII case.
    #[must_use]
    pub fn find(&self, title: &str) -> Option<&Movie> {
        self.movies
            .iter()
            .find(|m| m.title.eq_ignore_ascii_case(title.trim()))
    }

    #[must_use]
    pub fn titles(&self) -> Vec<&str> {
        self.movies.iter().map(|m| m.title.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieCatalog {
    pub categories: Vec<Category>,
}

impl MovieCatalog {
    /// Find a category by name, ignoring ASCII case.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Find a movie by title across all categories, first match wins.
    #[must_use]
    pub fn find_movie(&self, title: &str) -> Option<(&Category, &Movie)> {
        self.categories
            .iter()
            .find_map(|c| c.find(title).map(|m| (c, m)))
    }

    #[must_use]
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Load and validate the movie catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<MovieCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_catalog(&content)
}

/// Parse and validate catalog YAML already in memory.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_catalog(content: &str) -> Result<MovieCatalog, ConfigError> {
    let catalog: MovieCatalog = serde_yaml::from_str(content)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

fn validate_catalog(catalog: &MovieCatalog) -> Result<(), ConfigError> {
    if catalog.categories.is_empty() {
        return Err(ConfigError::Validation(
            "catalog must contain at least one category".to_string(),
        ));
    }

    let mut seen_categories = HashSet::new();

    for category in &catalog.categories {
        if category.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category name must be non-empty".to_string(),
            ));
        }

        if !seen_categories.insert(category.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category: '{}'",
                category.name
            )));
        }

        if category.movies.is_empty() {
            return Err(ConfigError::Validation(format!(
                "category '{}' has no movies",
                category.name
            )));
        }

        let mut seen_titles = HashSet::new();
        for movie in &category.movies {
            if movie.title.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "category '{}' contains a movie with an empty title",
                    category.name
                )));
            }

            if !seen_titles.insert(movie.title.to_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate movie '{}' in category '{}'",
                    movie.title, category.name
                )));
            }

            if let Some(url) = &movie.poster_url {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigError::Validation(format!(
                        "movie '{}' has invalid poster_url '{url}'; must start with http:// or https://",
                        movie.title
                    )));
                }
            }
        }
    }

    Ok(())
}
