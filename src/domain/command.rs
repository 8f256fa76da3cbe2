//! The fixed catalog of `:` commands.
//!
//! Commands are not user-editable. Their order here is the order in which
//! suggestions are listed.

/// Dispatch tag for a catalog command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Show every bookmark and keep showing them after the query is cleared.
    List,
    /// Edit the settings bucket.
    Config,
    /// Edit the bookmarks bucket.
    Bookmark,
    /// Write settings and bookmarks to an export file.
    Export,
    /// Replace settings and bookmarks from an export file.
    Import,
    /// Toggle the help overlay.
    Help,
    /// Clear all stored data after confirmation.
    Reset,
}

/// A command offered in the suggestion list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    /// Name including the leading `:`.
    pub name: &'static str,
    pub description: &'static str,
    pub kind: CommandKind,
}

/// Every command, in suggestion order.
pub const COMMANDS: [Command; 7] = [
    Command {
        name: ":list",
        description: "Show all bookmarks",
        kind: CommandKind::List,
    },
    Command {
        name: ":config",
        description: "Open settings",
        kind: CommandKind::Config,
    },
    Command {
        name: ":bookmark",
        description: "Edit bookmarks",
        kind: CommandKind::Bookmark,
    },
    Command {
        name: ":export",
        description: "Export settings and bookmarks",
        kind: CommandKind::Export,
    },
    Command {
        name: ":import",
        description: "Import settings and bookmarks",
        kind: CommandKind::Import,
    },
    Command {
        name: ":help",
        description: "Show help",
        kind: CommandKind::Help,
    },
    Command {
        name: ":reset",
        description: "Reset all settings and bookmarks",
        kind: CommandKind::Reset,
    },
];

impl Command {
    /// Looks up a command by its exact name (case-sensitive, `:` included).
    ///
    /// # Examples
    ///
    /// ```
    /// use startpage::domain::{Command, CommandKind};
    ///
    /// assert_eq!(Command::lookup(":help").map(|c| c.kind), Some(CommandKind::Help));
    /// assert!(Command::lookup(":HELP").is_none());
    /// assert!(Command::lookup("help").is_none());
    /// ```
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        COMMANDS.iter().copied().find(|command| command.name == name)
    }
}
