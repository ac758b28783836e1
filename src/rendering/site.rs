//! Static site generation.
//!
//! Renders the catalog as an HTML movie grid and substitutes it into a
//! template containing [`TITLE_PLACEHOLDER`] and [`GRID_PLACEHOLDER`].

use crate::config::SiteConfig;
use crate::models::{Catalog, Movie};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error as ThisError;

/// Placeholder replaced by the page title.
pub const TITLE_PLACEHOLDER: &str = "__TEMPLATE_TITLE__";

/// Placeholder replaced by the rendered movie grid.
pub const GRID_PLACEHOLDER: &str = "__TEMPLATE_MOVIE_GRID__";

/// Errors raised while generating the site.
#[derive(Debug, ThisError)]
pub enum SiteError {
    /// The catalog document has no movie list.
    #[error("No movie data found.")]
    NoMovieData,

    /// The template file could not be read.
    #[error("template '{}' could not be read: {source}", path.display())]
    TemplateMissing {
        /// Template path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A record cannot be rendered.
    #[error("movie '{title}' cannot be rendered: {reason}")]
    MalformedRecord {
        /// Title of the offending movie.
        title: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The output file could not be written.
    #[error("website could not be written to '{}': {source}", path.display())]
    WriteFailed {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Renders the catalog into a static HTML page.
#[derive(Debug, Clone)]
pub struct SiteGenerator {
    template_path: PathBuf,
    output_path: PathBuf,
    title: String,
}

impl SiteGenerator {
    /// Creates a generator with the default page title.
    #[must_use]
    pub fn new(template_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
            output_path: output_path.into(),
            title: SiteConfig::default().title,
        }
    }

    /// Creates a generator from site settings.
    #[must_use]
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            template_path: config.template_path.clone(),
            output_path: config.output_path.clone(),
            title: config.title.clone(),
        }
    }

    /// Sets the page title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Returns the output path.
    #[must_use]
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Renders the page and writes it to the output path.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::NoMovieData`] if the document has no `movies`
    /// key, otherwise [`SiteError::TemplateMissing`],
    /// [`SiteError::MalformedRecord`] or [`SiteError::WriteFailed`]. Nothing
    /// is written unless every record renders.
    pub fn generate(&self, catalog: &Catalog) -> Result<(), SiteError> {
        if !catalog.has_movies_key() {
            return Err(SiteError::NoMovieData);
        }

        let template = self.load_template()?;
        let page = self.render_page(&template, &catalog.movies)?;

        fs::write(&self.output_path, page).map_err(|source| SiteError::WriteFailed {
            path: self.output_path.clone(),
            source,
        })?;

        tracing::info!(
            output = %self.output_path.display(),
            movies = catalog.len(),
            "Website generated"
        );
        Ok(())
    }

    /// Reads the template file.
    pub fn load_template(&self) -> Result<String, SiteError> {
        fs::read_to_string(&self.template_path).map_err(|source| SiteError::TemplateMissing {
            path: self.template_path.clone(),
            source,
        })
    }

    /// Substitutes the title and the rendered grid into `template`.
    pub fn render_page(&self, template: &str, movies: &[Movie]) -> Result<String, SiteError> {
        for placeholder in [TITLE_PLACEHOLDER, GRID_PLACEHOLDER] {
            if !template.contains(placeholder) {
                tracing::warn!(
                    template = %self.template_path.display(),
                    placeholder,
                    "Template is missing a placeholder"
                );
            }
        }

        let grid = render_grid(movies)?;
        Ok(template
            .replace(TITLE_PLACEHOLDER, &escape_html(&self.title))
            .replace(GRID_PLACEHOLDER, &grid))
    }
}

/// Renders every movie as a grid item, in catalog order.
pub fn render_grid(movies: &[Movie]) -> Result<String, SiteError> {
    let mut grid = String::new();
    for movie in movies {
        grid.push_str(&render_movie(movie)?);
    }
    Ok(grid)
}

/// Renders one movie as an HTML list item.
///
/// The rating bar is `rating * 10` percent wide.
pub fn render_movie(movie: &Movie) -> Result<String, SiteError> {
    let rating = movie
        .numeric_rating()
        .map_err(|e| SiteError::MalformedRecord {
            title: movie.title.clone(),
            reason: e.to_string(),
        })?;

    let title = escape_html(&movie.title);
    let poster = format!(
        r#"<img class="movie-poster" src="{}" alt="{title}">"#,
        escape_html(&movie.poster)
    );

    let mut item = String::from("<li>\n    <div class=\"movie\">\n");
    match movie.imdb_id.as_deref().filter(|id| !id.is_empty()) {
        Some(imdb_id) => {
            let _ = writeln!(
                item,
                r#"        <a href="https://www.imdb.com/title/{}/" target="_blank">"#,
                escape_html(imdb_id)
            );
            let _ = writeln!(item, "            {poster}");
            item.push_str("        </a>\n");
        },
        None => {
            let _ = writeln!(item, "        {poster}");
        },
    }
    let _ = writeln!(item, r#"        <div class="movie-title">{title}</div>"#);
    let _ = writeln!(
        item,
        r#"        <div class="movie-year">{}</div>"#,
        escape_html(&movie.year_label())
    );
    item.push_str("        <div class=\"rating-bar\">\n");
    let _ = writeln!(
        item,
        r#"            <div class="movie-rating" style="width: {}%;">"#,
        bar_width(rating)
    );
    let _ = writeln!(
        item,
        "                <span>{}/10</span>",
        escape_html(&movie.rating_label())
    );
    item.push_str("            </div>\n        </div>\n    </div>\n</li>\n");

    Ok(item)
}

/// Rating bar width in percent, rounded to one decimal place.
fn bar_width(rating: f64) -> f64 {
    (rating * 100.0).round() / 10.0
}

/// Escapes text for use in HTML content and attribute values.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
