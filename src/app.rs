//! The TUI application: terminal lifecycle, event loop, and the glue
//! between key events, the reducer, and the save coordinator.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use crate::config::Config;
use crate::draft::autosave::{SaveCoordinator, SaveKind};
use crate::draft::reducer::{reduce, Action};
use crate::draft::state::WizardState;
use crate::draft::store::{DraftStore, FileDraftStore};
use crate::remote::{self, RemoteClient};
use crate::ui::terminal_guard::{install_panic_hook, TerminalGuard};
use crate::ui::{ConfirmDialog, ConfirmOutcome, WizardEvent, WizardScreen};
use crate::validate;

enum ActiveDialog {
    Quit(ConfirmDialog),
    Reset(ConfirmDialog),
}

pub struct App {
    state: WizardState,
    screen: WizardScreen,
    coordinator: SaveCoordinator,
    dialog: Option<ActiveDialog>,
    tick_rate: Duration,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let store = Arc::new(FileDraftStore::new(&config.data_path()));
        let remote = remote::from_config(&config.remote);
        Self::with_parts(config, store, remote)
    }

    /// Wired explicitly so tests can inject a store and a remote
    pub fn with_parts(
        config: &Config,
        store: Arc<dyn DraftStore>,
        remote: Arc<dyn RemoteClient>,
    ) -> Self {
        let coordinator = SaveCoordinator::new(
            store,
            remote,
            Duration::from_millis(config.autosave.debounce_ms),
            config.save.manual_clears_dirty,
        );
        Self {
            state: WizardState::default(),
            screen: WizardScreen::new(),
            coordinator,
            dialog: None,
            tick_rate: Duration::from_millis(config.ui.refresh_rate_ms),
            should_quit: false,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        install_panic_hook();
        let _guard = TerminalGuard::new().context("Failed to initialize terminal")?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
            .context("Failed to create terminal")?;

        self.hydrate();

        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(self.tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            let actions = self.coordinator.tick(&self.state, Instant::now());
            self.apply(actions);
        }

        tracing::info!("exiting");
        Ok(())
    }

    fn hydrate(&mut self) {
        if let Some(action) = self.coordinator.hydrate() {
            self.dispatch(action);
            self.screen.sync_from(&self.state.data);
        }
    }

    fn dispatch(&mut self, action: Action) {
        self.state = reduce(&self.state, action);
    }

    fn apply(&mut self, actions: Vec<Action>) {
        for action in actions {
            self.dispatch(action);
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        self.screen.render(frame, &self.state);
        match &self.dialog {
            Some(ActiveDialog::Quit(dialog)) | Some(ActiveDialog::Reset(dialog)) => {
                dialog.render(frame);
            }
            None => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // An open dialog swallows every key
        if let Some(dialog) = &mut self.dialog {
            let outcome = match dialog {
                ActiveDialog::Quit(d) | ActiveDialog::Reset(d) => d.handle_key(key.code),
            };
            if let Some(outcome) = outcome {
                let confirmed = outcome == ConfirmOutcome::Confirmed;
                match self.dialog.take() {
                    Some(ActiveDialog::Quit(_)) if confirmed => self.should_quit = true,
                    Some(ActiveDialog::Reset(_)) if confirmed => self.reset_draft(),
                    _ => {}
                }
            }
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => {
                    self.request_quit();
                    return;
                }
                KeyCode::Char('s') => {
                    let actions = self.coordinator.request_save(&self.state, SaveKind::Manual);
                    self.apply(actions);
                    return;
                }
                KeyCode::Char('r') => {
                    self.dialog = Some(ActiveDialog::Reset(ConfirmDialog::reset_guard()));
                    return;
                }
                _ => {}
            }
        }

        match self.screen.handle_key(self.state.step, key) {
            Some(WizardEvent::Edited(path, value)) => {
                self.dispatch(Action::Change(path, value));
                self.coordinator.note_change(Instant::now());
            }
            Some(WizardEvent::Advance) => self.save_and_continue(),
            Some(WizardEvent::GoBack) => {
                let prev = self.state.step.prev();
                self.dispatch(Action::Navigate(prev));
            }
            Some(WizardEvent::QuitRequested) => self.request_quit(),
            None => {}
        }
    }

    /// Enter: validate the current step, then manual save and advance.
    /// Validation failure surfaces the message and neither saves nor moves.
    fn save_and_continue(&mut self) {
        if let Some(message) = validate::validate_step(self.state.step, &self.state.data) {
            self.dispatch(Action::SetError(Some(message.to_string())));
            return;
        }
        let actions = self.coordinator.request_save(&self.state, SaveKind::Manual);
        self.apply(actions);

        let next = self.state.step.next();
        if next != self.state.step {
            self.dispatch(Action::Navigate(next));
        }
    }

    fn request_quit(&mut self) {
        if self.state.dirty {
            self.dialog = Some(ActiveDialog::Quit(ConfirmDialog::quit_guard()));
        } else {
            self.should_quit = true;
        }
    }

    /// Confirmed start-over: drop the stored draft and rebuild from defaults
    fn reset_draft(&mut self) {
        if let Err(err) = self.coordinator.reset() {
            tracing::warn!(error = %err, "could not delete the stored draft");
            self.dispatch(Action::SetError(Some(err.to_string())));
            return;
        }
        self.state = WizardState::default();
        self.screen = WizardScreen::new();
        tracing::info!("draft reset");
    }
}
