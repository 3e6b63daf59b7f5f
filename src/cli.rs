use clap::{Parser, Subcommand};

use crate::background::SAVE_MENU_ID;
use crate::models::ExportFormat;
use crate::platform::ContextType;

#[derive(Debug, Parser)]
#[command(name = "lightnote", version, about = "Capture page selections as notes and export them")]
pub struct Cli {
    /// Never launch the system browser (pages are still written to disk)
    #[arg(
        long,
        global = true,
        env = "LIGHTNOTE_NO_BROWSER",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_browser: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Register the "Save to Note" context menu entry
    Install,

    /// Deliver a context menu click: save selected text from a page
    Capture {
        /// The selected text
        text: String,
        /// URL of the page the text was selected on
        #[arg(long)]
        url: String,
        /// Title of that page
        #[arg(long)]
        title: Option<String>,
        /// Context the menu was opened in
        #[arg(long, value_enum, default_value = "selection")]
        context: ContextType,
        /// Menu entry that was clicked
        #[arg(long, default_value = SAVE_MENU_ID)]
        menu_id: String,
    },

    /// Toolbar button: open the management page in a new tab
    Open,

    /// Print notes, newest first
    List,

    /// Print the management page HTML
    Render,

    /// Replace a note's text, as an inline edit would
    Edit { id: i64, content: String },

    /// Delete one note
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete every note
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Export all notes
    Export {
        #[arg(value_enum)]
        format: ExportFormat,
        /// Leave capture times out
        #[arg(long)]
        no_time: bool,
        /// Leave page sources out
        #[arg(long)]
        no_source: bool,
    },

    /// Show where notes are stored
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn capture_defaults_to_selection_and_save_menu() {
        let cli = Cli::parse_from(["lightnote", "capture", "text", "--url", "https://x.com"]);
        match cli.command {
            Commands::Capture {
                context, menu_id, title, ..
            } => {
                assert_eq!(context, ContextType::Selection);
                assert_eq!(menu_id, SAVE_MENU_ID);
                assert!(title.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn no_browser_env_accepts_numeric_and_word_values() {
        for (value, expected) in [("1", true), ("yes", true), ("on", true), ("0", false), ("off", false)] {
            std::env::set_var("LIGHTNOTE_NO_BROWSER", value);
            let parsed = Cli::try_parse_from(["lightnote", "path"]);
            std::env::remove_var("LIGHTNOTE_NO_BROWSER");
            assert_eq!(parsed.unwrap().no_browser, expected, "value {value}");
        }
    }

    #[test]
    fn no_browser_flag_without_env() {
        let cli = Cli::parse_from(["lightnote", "list", "--no-browser"]);
        assert!(cli.no_browser);
    }

    #[test]
    fn export_flags() {
        let cli = Cli::parse_from(["lightnote", "export", "word", "--no-source"]);
        match cli.command {
            Commands::Export {
                format,
                no_time,
                no_source,
            } => {
                assert_eq!(format, ExportFormat::Word);
                assert!(!no_time);
                assert!(no_source);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
