//! Template rendering.
//!
//! Renders the catalog into a static HTML page by substituting a movie grid
//! into a template.

mod site;

pub use site::{
    GRID_PLACEHOLDER, SiteError, SiteGenerator, TITLE_PLACEHOLDER, render_grid, render_movie,
};
