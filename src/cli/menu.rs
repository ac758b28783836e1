//! Menu commands and selection parsing.

use std::fmt;
use thiserror::Error;

/// Pause prompt after listing, delete, update and sort.
pub const PAUSE_PROMPT: &str = "Press Enter to return to the menu.";

/// Pause prompt after status, random and search.
pub const RETURN_PROMPT: &str = "Press Enter to return.";

/// An entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuCommand {
    /// Leave the program.
    Exit,
    /// List every movie.
    List,
    /// Add a movie from the metadata service.
    Add,
    /// Delete a movie.
    Delete,
    /// Change a movie's rating.
    Update,
    /// Show the number of movies.
    Status,
    /// Show a random movie.
    Random,
    /// Search by title.
    Search,
    /// List movies sorted by rating.
    SortByRating,
    /// Render the HTML page.
    GenerateWebsite,
}

impl MenuCommand {
    /// Every command, in menu order. The position is the selection number.
    pub const ALL: [Self; 10] = [
        Self::Exit,
        Self::List,
        Self::Add,
        Self::Delete,
        Self::Update,
        Self::Status,
        Self::Random,
        Self::Search,
        Self::SortByRating,
        Self::GenerateWebsite,
    ];

    /// Highest valid selection number.
    pub const MAX_INDEX: usize = Self::ALL.len() - 1;

    /// Menu label.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Exit => "Exit",
            Self::List => "List movies",
            Self::Add => "Add movie",
            Self::Delete => "Delete movie",
            Self::Update => "Update movie",
            Self::Status => "Status",
            Self::Random => "Random movie",
            Self::Search => "Search movie",
            Self::SortByRating => "Movies sorted by rating",
            Self::GenerateWebsite => "Generate website",
        }
    }

    /// Prompt to wait on after the command runs, if any.
    ///
    /// Adding a movie and generating the website go straight back to the
    /// menu.
    #[must_use]
    pub const fn pause_prompt(self) -> Option<&'static str> {
        match self {
            Self::Exit | Self::Add | Self::GenerateWebsite => None,
            Self::Status | Self::Random | Self::Search => Some(RETURN_PROMPT),
            Self::List | Self::Delete | Self::Update | Self::SortByRating => Some(PAUSE_PROMPT),
        }
    }

    /// Selection number of this command.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Looks a command up by selection number.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for MenuCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.index(), self.description())
    }
}

/// Why a menu selection was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The input is not an integer.
    #[error("Invalid input. Please enter a number.")]
    NotANumber,

    /// The number has no menu entry.
    #[error("Please choose a number between 0 and {}.", MenuCommand::MAX_INDEX)]
    OutOfRange(i64),
}

/// Parses a menu selection.
///
/// # Errors
///
/// Returns [`SelectionError::NotANumber`] for non-numeric input and
/// [`SelectionError::OutOfRange`] for numbers without a menu entry.
pub fn parse_selection(input: &str) -> Result<MenuCommand, SelectionError> {
    let number: i64 = input
        .trim()
        .parse()
        .map_err(|_| SelectionError::NotANumber)?;

    usize::try_from(number)
        .ok()
        .and_then(MenuCommand::from_index)
        .ok_or(SelectionError::OutOfRange(number))
}
