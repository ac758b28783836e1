//! Interactive menu.
//!
//! The program has a single state: awaiting a selection. A valid selection
//! runs one handler from [`crate::commands`] and comes back here; `0` (or end
//! of input) leaves the loop.
//!
//! | # | Command |
//! |---|---------|
//! | 0 | Exit |
//! | 1 | List movies |
//! | 2 | Add movie |
//! | 3 | Delete movie |
//! | 4 | Update movie |
//! | 5 | Status |
//! | 6 | Random movie |
//! | 7 | Search movie |
//! | 8 | Movies sorted by rating |
//! | 9 | Generate website |

mod console;
mod menu;

pub use console::{Console, ScriptedConsole, StdConsole};
pub use menu::{MenuCommand, PAUSE_PROMPT, RETURN_PROMPT, SelectionError, parse_selection};

use crate::Result;
use crate::commands;
use crate::metadata::MetadataProvider;
use crate::rendering::SiteGenerator;
use crate::services::CatalogService;
use crate::storage::CatalogBackend;

/// Banner printed above the menu.
pub const BANNER: &str = "**********  My Movies Database  **********";

/// Runs the menu until the user exits or input ends.
///
/// Handler errors are printed and logged; they never end the loop.
///
/// # Errors
///
/// Returns an error only if reading a menu selection fails.
pub fn run_menu<C, B, P>(
    console: &mut C,
    service: &CatalogService<B, P>,
    generator: &SiteGenerator,
) -> Result<()>
where
    C: Console + ?Sized,
    B: CatalogBackend,
    P: MetadataProvider,
{
    loop {
        console.print("");
        print_menu(console);

        let command = read_selection(console)?;
        if command == MenuCommand::Exit {
            console.print("Bye!");
            return Ok(());
        }

        tracing::debug!(command = command.description(), "Running menu command");
        if let Err(e) = dispatch(command, console, service, generator) {
            tracing::warn!(command = command.description(), error = %e, "Menu command failed");
            console.print(&format!("Error: {e}"));
        }

        if let Some(prompt) = command.pause_prompt() {
            console.print("");
            if console.read_line(prompt)?.is_none() {
                tracing::debug!("Input closed at pause prompt");
            }
        }
    }
}

/// Prints the banner and the numbered entries.
pub fn print_menu<C: Console + ?Sized>(console: &mut C) {
    console.print(BANNER);
    console.print("");
    console.print("Menu:");
    for command in MenuCommand::ALL {
        console.print(&command.to_string());
    }
}

/// Prompts until a valid selection is entered. End of input selects `Exit`.
fn read_selection<C: Console + ?Sized>(console: &mut C) -> Result<MenuCommand> {
    let prompt = format!("Enter choice (0-{}): ", MenuCommand::MAX_INDEX);
    loop {
        console.print("");
        let Some(input) = console.read_line(&prompt)? else {
            return Ok(MenuCommand::Exit);
        };
        match parse_selection(&input) {
            Ok(command) => return Ok(command),
            Err(e) => console.print(&e.to_string()),
        }
    }
}

fn dispatch<C, B, P>(
    command: MenuCommand,
    console: &mut C,
    service: &CatalogService<B, P>,
    generator: &SiteGenerator,
) -> Result<()>
where
    C: Console + ?Sized,
    B: CatalogBackend,
    P: MetadataProvider,
{
    match command {
        MenuCommand::Exit => Ok(()),
        MenuCommand::List => commands::cmd_list(console, service),
        MenuCommand::Add => commands::cmd_add(console, service),
        MenuCommand::Delete => commands::cmd_delete(console, service),
        MenuCommand::Update => commands::cmd_update(console, service),
        MenuCommand::Status => commands::cmd_status(console, service),
        MenuCommand::Random => commands::cmd_random(console, service),
        MenuCommand::Search => commands::cmd_search(console, service),
        MenuCommand::SortByRating => commands::cmd_sort(console, service),
        MenuCommand::GenerateWebsite => commands::cmd_generate_website(console, service, generator),
    }
}
