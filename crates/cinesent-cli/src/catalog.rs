//! Catalog lookups and listing.

use std::io::Write;

use cinesent_core::{Category, Movie, MovieCatalog};

/// Look up a category by name, listing valid names on failure.
pub(crate) fn resolve_category<'a>(
    catalog: &'a MovieCatalog,
    name: &str,
) -> anyhow::Result<&'a Category> {
    catalog.category(name).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown category '{name}'; choose one of: {}",
            catalog.category_names().join(", ")
        )
    })
}

/// Look up a movie, optionally restricted to one category.
pub(crate) fn resolve_movie<'a>(
    catalog: &'a MovieCatalog,
    category: Option<&str>,
    title: &str,
) -> anyhow::Result<&'a Movie> {
    match category {
        Some(name) => {
            let category = resolve_category(catalog, name)?;
            category.find(title).ok_or_else(|| {
                anyhow::anyhow!(
                    "movie '{title}' not found in {}; choose one of: {}",
                    category.name,
                    category.titles().join(", ")
                )
            })
        }
        None => catalog.find_movie(title).map(|(_, m)| m).ok_or_else(|| {
            let titles: Vec<&str> = catalog
                .categories
                .iter()
                .flat_map(Category::titles)
                .collect();
            anyhow::anyhow!("movie '{title}' not found; choose one of: {}", titles.join(", "))
        }),
    }
}

pub(crate) fn poster_line(movie: &Movie) -> String {
    match &movie.poster_url {
        Some(url) => format!("poster: {url}"),
        None => "poster not available".to_string(),
    }
}

/// Print every category (or just one) with its titles and poster links.
pub(crate) fn print_catalog(
    catalog: &MovieCatalog,
    category: Option<&str>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let categories: Vec<&Category> = match category {
        Some(name) => vec![resolve_category(catalog, name)?],
        None => catalog.categories.iter().collect(),
    };

    for category in categories {
        writeln!(out, "{}", category.name)?;
        for movie in &category.movies {
            writeln!(out, "  {:<28}{}", movie.title, poster_line(movie))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> MovieCatalog {
        cinesent_core::parse_catalog(
            r"
categories:
  - name: Hollywood
    movies:
      - title: Inception
        poster_url: https://image.example.com/inception.jpg
      - title: Joker
  - name: Bollywood
    movies:
      - title: Dangal
",
        )
        .unwrap()
    }

    #[test]
    fn resolve_movie_across_categories() {
        let catalog = catalog();
        assert_eq!(resolve_movie(&catalog, None, "dangal").unwrap().title, "Dangal");
    }

    #[test]
    fn resolve_movie_within_category() {
        let catalog = catalog();
        let err = resolve_movie(&catalog, Some("Hollywood"), "Dangal").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("not found in Hollywood"), "got: {message}");
        assert!(message.contains("Inception, Joker"), "got: {message}");
    }

    #[test]
    fn unknown_category_lists_choices() {
        let catalog = catalog();
        let err = resolve_movie(&catalog, Some("Tollywood"), "Dangal").unwrap_err();
        assert!(err.to_string().contains("Hollywood, Bollywood"));
    }

    #[test]
    fn poster_line_handles_missing_url() {
        let catalog = catalog();
        let joker = resolve_movie(&catalog, None, "Joker").unwrap();
        assert_eq!(poster_line(joker), "poster not available");
    }

    #[test]
    fn print_catalog_single_category() {
        let catalog = catalog();
        let mut out = Vec::new();
        print_catalog(&catalog, Some("bollywood"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Bollywood\n"));
        assert!(text.contains("Dangal"));
        assert!(!text.contains("Inception"));
    }
}
