use anyhow::Result;
use std::path::PathBuf;

use super::command::{Input, MenuChoice, parse_input, parse_menu_choice};
use super::prompt::Prompter;
use super::ui;
use crate::cache::ResponseCache;
use crate::desktop::{self, ImageViewer, Launcher};
use crate::export::PdfExporter;
use crate::ui::Spinner;
use crate::wiki::{Locale, Transport, WikiClient, describe, print_locales};

/// Configuration for a lookup session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Locale the session starts in.
    pub locale: &'static Locale,
    /// Open fetched thumbnails in the default image viewer.
    pub show_images: bool,
    /// Directory PDF exports are written to.
    pub export_dir: PathBuf,
}

/// Search history and the current locale. Discarded on exit.
#[derive(Debug, Clone)]
pub struct SessionState {
    history: Vec<String>,
    locale: &'static Locale,
}

impl SessionState {
    pub const fn new(locale: &'static Locale) -> Self {
        Self {
            history: Vec::new(),
            locale,
        }
    }

    pub fn record(&mut self, topic: &str) {
        self.history.push(topic.to_string());
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub const fn locale(&self) -> &'static Locale {
        self.locale
    }

    /// Switches to `code` if it is supported; otherwise leaves the state alone.
    pub fn set_locale(&mut self, code: &str) -> Option<&'static Locale> {
        let locale = describe(code)?;
        self.locale = locale;
        Some(locale)
    }
}

enum State {
    AwaitingInput,
    ShowingMenu,
    DisplayingTopic(String),
    Exiting,
}

/// The interactive lookup loop.
///
/// Owns the response cache and session state; every component call gets
/// them passed in explicitly.
pub struct Session<T, P, L> {
    state: SessionState,
    cache: ResponseCache,
    client: WikiClient<T>,
    exporter: PdfExporter,
    prompter: P,
    launcher: L,
    viewer: ImageViewer,
    show_images: bool,
}

impl<T: Transport, P: Prompter, L: Launcher> Session<T, P, L> {
    pub fn new(config: SessionConfig, client: WikiClient<T>, prompter: P, launcher: L) -> Self {
        Self {
            state: SessionState::new(config.locale),
            cache: ResponseCache::new(),
            client,
            exporter: PdfExporter::new(config.export_dir),
            prompter,
            launcher,
            viewer: ImageViewer::new(),
            show_images: config.show_images,
        }
    }

    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    pub const fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Runs until the user exits or input is closed.
    ///
    /// Lookup, browser and export failures are reported and the loop goes
    /// on; only a broken input stream ends it with an error.
    pub async fn run(&mut self) -> Result<()> {
        ui::print_header(self.state.locale());

        let mut state = State::AwaitingInput;
        loop {
            state = match state {
                State::AwaitingInput => self.await_input()?,
                State::ShowingMenu => self.show_menu()?,
                State::DisplayingTopic(topic) => self.display_topic(&topic).await?,
                State::Exiting => break,
            };
        }

        ui::print_goodbye();
        Ok(())
    }

    fn await_input(&mut self) -> Result<State> {
        let Some(line) = self
            .prompter
            .read_line("Enter the Topic or Content (or 'menu' for options):")?
        else {
            return Ok(State::Exiting);
        };

        let next = match parse_input(&line) {
            Input::Exit => State::Exiting,
            Input::Menu => State::ShowingMenu,
            Input::Languages => {
                print_locales();
                State::AwaitingInput
            }
            Input::Empty => {
                ui::print_warning("Please enter a valid name of the topic you want to search.");
                State::AwaitingInput
            }
            Input::Topic(topic) => {
                self.state.record(&topic);
                State::DisplayingTopic(topic)
            }
        };
        Ok(next)
    }

    fn show_menu(&mut self) -> Result<State> {
        ui::print_menu();
        let Some(choice) = self.prompter.read_line("Enter your choice:")? else {
            return Ok(State::Exiting);
        };

        match parse_menu_choice(&choice) {
            MenuChoice::History => ui::print_history(self.state.history()),
            MenuChoice::ChangeLanguage => self.change_language()?,
            MenuChoice::ClearCache => {
                self.cache.clear();
                ui::print_success("Cache cleared.");
            }
            MenuChoice::Languages => print_locales(),
            MenuChoice::Invalid(_) => ui::print_warning("Invalid choice."),
        }
        Ok(State::AwaitingInput)
    }

    fn change_language(&mut self) -> Result<()> {
        let Some(code) = self
            .prompter
            .read_line("Enter the language code (e.g., 'en' for English, 'es' for Spanish):")?
        else {
            return Ok(());
        };

        match self.state.set_locale(code.trim()) {
            Some(locale) => ui::print_success(&format!(
                "Language set to {} (Code: {}).",
                locale.name, locale.code
            )),
            None => ui::print_warning("Invalid language code."),
        }
        Ok(())
    }

    async fn display_topic(&mut self, topic: &str) -> Result<State> {
        let locale = self.state.locale().code;

        let spinner = Spinner::new(&format!("Looking up {topic}..."));
        let summary = self.client.fetch_summary(&mut self.cache, topic, locale).await;
        spinner.stop();
        ui::print_summary(topic, &summary);

        let spinner = Spinner::new("Fetching image...");
        let image = self.client.fetch_image(&mut self.cache, topic, locale).await;
        spinner.stop();

        match &image {
            Some(image) => {
                ui::print_image_info(image);
                if self.show_images {
                    match self.viewer.show(&self.launcher, topic, locale, image) {
                        Ok(path) => crate::status!("Displaying image {}", path.display()),
                        Err(e) => ui::print_warning(&format!("{e:#}")),
                    }
                }
            }
            None => ui::print_warning("No image available."),
        }

        if self
            .prompter
            .confirm("Do you want to know more about this?")?
        {
            match desktop::open_page(&self.launcher, self.client.endpoints(), topic, locale) {
                Ok(url) => ui::print_success(&format!("Opening {url}")),
                Err(e) => ui::print_warning(&format!("{e:#}")),
            }
        }

        if self
            .prompter
            .confirm("Do you want to export this information to a PDF?")?
        {
            match self.exporter.export(topic, &summary, image.as_deref()) {
                Ok(path) => ui::print_success(&format!("Exported to {}", path.display())),
                Err(e) => ui::print_error(&format!("PDF export failed: {e:#}")),
            }
        }

        Ok(State::AwaitingInput)
    }
}
