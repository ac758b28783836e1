//! Catalog command handlers.
//!
//! Each handler prompts for what it needs, calls the service and prints the
//! result. Errors are returned to the menu loop, which reports them.

use crate::cli::Console;
use crate::metadata::MetadataProvider;
use crate::rendering::SiteGenerator;
use crate::services::{CatalogService, MIN_SEARCH_LENGTH, UpdateOutcome};
use crate::storage::CatalogBackend;
use crate::{Error, Result};

/// Reads a trimmed answer; end of input reads as an empty answer.
fn ask<C: Console + ?Sized>(console: &mut C, prompt: &str) -> Result<String> {
    Ok(console
        .read_line(prompt)?
        .map(|line| line.trim().to_string())
        .unwrap_or_default())
}

/// List command.
pub fn cmd_list<C, B, P>(console: &mut C, service: &CatalogService<B, P>) -> Result<()>
where
    C: Console + ?Sized,
    B: CatalogBackend,
    P: MetadataProvider,
{
    let movies = service.list_movies()?;
    console.print(&format!("{} movies found:", movies.len()));
    console.print("");
    for movie in &movies {
        console.print(&format!(
            "{}: {} ({})",
            movie.title,
            movie.rating_label(),
            movie.year_label()
        ));
    }
    Ok(())
}

/// Add command.
pub fn cmd_add<C, B, P>(console: &mut C, service: &CatalogService<B, P>) -> Result<()>
where
    C: Console + ?Sized,
    B: CatalogBackend,
    P: MetadataProvider,
{
    let title = ask(console, "Add movie name: ")?;
    let movie = service.add_movie(&title)?;
    console.print(&format!("Added movie: {}", movie.title));
    Ok(())
}

/// Delete command.
pub fn cmd_delete<C, B, P>(console: &mut C, service: &CatalogService<B, P>) -> Result<()>
where
    C: Console + ?Sized,
    B: CatalogBackend,
    P: MetadataProvider,
{
    let title = ask(console, "Which movie should be deleted? ")?;
    let movie = service.delete_movie(&title)?;
    console.print(&format!("Movie '{}' successfully deleted.", movie.title));
    Ok(())
}

/// Update command.
///
/// Shows the current rating before asking for the new one. A blank answer
/// cancels.
pub fn cmd_update<C, B, P>(console: &mut C, service: &CatalogService<B, P>) -> Result<()>
where
    C: Console + ?Sized,
    B: CatalogBackend,
    P: MetadataProvider,
{
    let title = ask(console, "Which movie would you like to update the rating for? ")?;
    let movie = service.find_movie(&title)?;
    console.print(&format!("Updating rating for movie: {}", movie.title));

    let new_rating = ask(
        console,
        &format!("Enter new rating (current: {}): ", movie.rating_label()),
    )?;
    match service.update_rating(&movie.title, &new_rating)? {
        UpdateOutcome::Updated { title, rating } => {
            console.print(&format!(
                "Rating for movie '{title}' successfully updated to {rating}."
            ));
        },
        UpdateOutcome::Cancelled { .. } => {
            console.print("No rating entered. Update canceled.");
        },
    }
    Ok(())
}

/// Status command.
pub fn cmd_status<C, B, P>(console: &mut C, service: &CatalogService<B, P>) -> Result<()>
where
    C: Console + ?Sized,
    B: CatalogBackend,
    P: MetadataProvider,
{
    let count = service.status()?;
    console.print(&format!("{count} movies in the database."));
    Ok(())
}

/// Random command.
pub fn cmd_random<C, B, P>(console: &mut C, service: &CatalogService<B, P>) -> Result<()>
where
    C: Console + ?Sized,
    B: CatalogBackend,
    P: MetadataProvider,
{
    match service.random_movie() {
        Ok(movie) => {
            console.print(&format!(
                "Random movie: '{}' ({})",
                movie.title,
                movie.year_label()
            ));
            Ok(())
        },
        Err(Error::EmptyCatalog) => {
            console.print("No movies in the database.");
            Ok(())
        },
        Err(e) => Err(e),
    }
}

/// Search command.
pub fn cmd_search<C, B, P>(console: &mut C, service: &CatalogService<B, P>) -> Result<()>
where
    C: Console + ?Sized,
    B: CatalogBackend,
    P: MetadataProvider,
{
    let query = ask(
        console,
        &format!("Search for a movie (at least {MIN_SEARCH_LENGTH} characters): "),
    )?;
    let movie = service.search(&query)?;
    console.print(&format!("Movie found: '{}'", movie.title));
    console.print(&format!("Year: {}", movie.year_label()));
    console.print(&format!("Rating: {}", movie.rating_label()));
    Ok(())
}

/// Sort-by-rating command.
pub fn cmd_sort<C, B, P>(console: &mut C, service: &CatalogService<B, P>) -> Result<()>
where
    C: Console + ?Sized,
    B: CatalogBackend,
    P: MetadataProvider,
{
    let movies = match service.sorted_by_rating() {
        Ok(movies) => movies,
        Err(Error::EmptyCatalog) => {
            console.print("No movies found in the database.");
            return Ok(());
        },
        Err(e) => return Err(e),
    };

    console.print("");
    console.print("Movies sorted by rating (high to low):");
    for movie in &movies {
        console.print(&format!(
            "{}: {} ({})",
            movie.rating_label(),
            movie.title,
            movie.year_label()
        ));
    }
    Ok(())
}

/// Website generation command.
pub fn cmd_generate_website<C, B, P>(
    console: &mut C,
    service: &CatalogService<B, P>,
    generator: &SiteGenerator,
) -> Result<()>
where
    C: Console + ?Sized,
    B: CatalogBackend,
    P: MetadataProvider,
{
    let path = service.generate_website(generator)?;
    tracing::info!(path = %path.display(), "Website generated");
    console.print("Website generated successfully.");
    Ok(())
}
