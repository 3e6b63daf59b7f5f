use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use clap::Parser;

mod app;
mod background;
mod cli;
mod config;
mod db;
mod error;
mod export;
mod models;
mod platform;
mod ui;

use app::{App, Outcome};
use background::{Background, BrowserEvent, MANAGER_PAGE, SAVE_MENU_ID, SAVE_MENU_TITLE};
use cli::{Cli, Commands};
use config::Config;
use db::{LocalStorageArea, Repository, StorageAccessor};
use error::Result;
use models::ExportFormat;
use platform::native::{BrowserPrinter, BrowserTabs, DirectoryDownloads, MenuRegistry, TerminalConfirm, PRINT_PAGE};
use platform::{OnClickData, PrintOutcome, Tab};
use ui::{AppAction, DomEvent, DomTarget};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging (only show warnings and errors by default)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load()?;
    if cli.no_browser {
        config.open_in_browser = false;
    }

    let host = Host::new(config);
    host.run(cli.command).await
}

/// Native implementations of the platform services, wired from config.
struct Host {
    config: Config,
    area: Arc<LocalStorageArea>,
    repository: Repository,
}

impl Host {
    fn new(config: Config) -> Self {
        let area = Arc::new(LocalStorageArea::new(&config.storage_path));
        let repository = Repository::new(StorageAccessor::new(area.clone()));
        Self {
            config,
            area,
            repository,
        }
    }

    fn menus(&self) -> MenuRegistry {
        MenuRegistry::new(self.config.storage_path.with_file_name("menus.json"))
    }

    fn background(&self) -> Background {
        Background::new(
            Arc::new(self.menus()),
            Arc::new(BrowserTabs::new(&self.config.pages_dir, self.config.open_in_browser)),
            self.repository.clone(),
        )
    }

    /// A management view with its notes loaded.
    async fn open_view(&self, assume_yes: bool) -> Result<App> {
        let mut app = App::new(
            self.repository.clone(),
            Arc::new(DirectoryDownloads::new(&self.config.downloads_dir)),
            Arc::new(BrowserPrinter::new(&self.config.pages_dir, self.config.open_in_browser)),
            Arc::new(TerminalConfirm::new(assume_yes)),
        );
        app.handle_action(AppAction::Load).await?;
        Ok(app)
    }

    fn manager_page_path(&self) -> PathBuf {
        self.config.pages_dir.join(MANAGER_PAGE)
    }

    async fn write_page(&self, app: &App) -> Result<()> {
        tokio::fs::create_dir_all(&self.config.pages_dir).await?;
        tokio::fs::write(self.manager_page_path(), app.page_html()).await?;
        Ok(())
    }

    /// Keep an already written management page in step with storage.
    async fn refresh_page(&self, app: &App) -> Result<()> {
        if self.manager_page_path().exists() {
            self.write_page(app).await?;
        }
        Ok(())
    }

    async fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Install => {
                self.background().dispatch(BrowserEvent::Installed).await?;
                println!("Registered context menu \"{SAVE_MENU_TITLE}\" ({SAVE_MENU_ID})");
            }

            Commands::Capture {
                text,
                url,
                title,
                context,
                menu_id,
            } => {
                // The browser only offers menu entries registered for the
                // context the user right-clicked in.
                if !self.menus().is_shown(&menu_id, context).await? {
                    println!("No menu entry \"{menu_id}\" in this context; run `lightnote install` first.");
                    return Ok(());
                }

                let info = OnClickData {
                    menu_item_id: menu_id,
                    context,
                    selection_text: Some(text),
                };
                let tab = Some(Tab { url, title });
                if let Some(note) = self.background().on_menu_clicked(info, tab, Local::now()).await {
                    println!("Saved note {}", note.id);
                }
            }

            Commands::Open => {
                let app = self.open_view(false).await?;
                self.write_page(&app).await?;
                self.background().dispatch(BrowserEvent::ActionClicked).await?;
                println!("{}", self.manager_page_path().display());
            }

            Commands::List => {
                let notes = self.repository.list().await?;
                if notes.is_empty() {
                    println!("No notes yet. Select text on a page and choose \"{SAVE_MENU_TITLE}\".");
                    return Ok(());
                }
                let wrap = textwrap::Options::new(76)
                    .initial_indent("    ")
                    .subsequent_indent("    ");
                for note in notes {
                    println!("{}  {}  {}", note.id, note.timestamp, note.display_title());
                    for line in textwrap::wrap(&note.content, &wrap) {
                        println!("{line}");
                    }
                }
            }

            Commands::Render => {
                let app = self.open_view(false).await?;
                print!("{}", app.page_html());
            }

            Commands::Edit { id, content } => {
                let mut app = self.open_view(false).await?;
                if !app.list.cards().iter().any(|card| card.note.id == id) {
                    return Err(anyhow::anyhow!("Note {id} not found").into());
                }

                app.dispatch(DomEvent::Focus(DomTarget::note_content(id, "")))
                    .await?;
                let outcome = app
                    .dispatch(DomEvent::Blur(DomTarget::note_content(id, &content)))
                    .await?;
                match outcome {
                    Outcome::Edited { written: true } => println!("Updated {id}"),
                    _ => println!("No changes to {id}"),
                }
                self.refresh_page(&app).await?;
            }

            Commands::Delete { id, yes } => {
                let mut app = self.open_view(yes).await?;
                if !app.list.cards().iter().any(|card| card.note.id == id) {
                    println!("Note {id} not found");
                    return Ok(());
                }

                match app.dispatch(DomEvent::Click(DomTarget::delete_button(id))).await? {
                    Outcome::Declined => println!("Nothing deleted."),
                    _ => println!("Deleted {id}"),
                }
                self.refresh_page(&app).await?;
            }

            Commands::Clear { yes } => {
                let mut app = self.open_view(yes).await?;
                match app.dispatch(DomEvent::Click(DomTarget::by_id("clear-all"))).await? {
                    Outcome::Declined => println!("Nothing deleted."),
                    _ => println!("Deleted all notes."),
                }
                self.refresh_page(&app).await?;
            }

            Commands::Export {
                format,
                no_time,
                no_source,
            } => {
                let mut app = self.open_view(false).await?;
                app.dispatch(DomEvent::Change(DomTarget::checkbox("export-include-time", !no_time)))
                    .await?;
                app.dispatch(DomEvent::Change(DomTarget::checkbox("export-include-source", !no_source)))
                    .await?;
                app.dispatch(DomEvent::Click(DomTarget::export_button())).await?;

                match app.dispatch(DomEvent::Click(DomTarget::export_option(format))).await? {
                    Outcome::Downloaded(path) => println!("Saved {}", path.display()),
                    Outcome::Printed(PrintOutcome::Completed) => {
                        println!("Opened the print dialog")
                    }
                    Outcome::Printed(PrintOutcome::Cancelled) => println!(
                        "Print preview written to {}",
                        self.config.pages_dir.join(PRINT_PAGE).display()
                    ),
                    _ if format == ExportFormat::Pdf => println!("Nothing printed."),
                    _ => println!("Nothing exported."),
                }
            }

            Commands::Path => {
                println!("{}", self.area.path().display());
            }
        }

        Ok(())
    }
}
