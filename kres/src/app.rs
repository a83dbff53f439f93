//! Application state and the menu lifecycle.
//!
//! The host turns native notifications into [`Event`]s and feeds them to
//! [`App::dispatch`] one at a time. Per-menu state lives in [`State`] and is
//! replaced on every open, so a command can only ever be resolved against the
//! menu it came from.

use std::path::{Path, PathBuf};

use crate::apply::apply;
use crate::catalog::enumerate_supported;
use crate::display::DisplayModes;
use crate::menu::{project, MenuIndex, MenuModel, CONFIG_ID, EXIT_ID, RESOLUTION_BASE_ID};
use crate::resolution::Resolution;
use crate::selection::compute_offerable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Primary-button activation of the tray icon.
    MenuOpenRequested,
    CommandSelected(u32),
    ExitRequested,
    /// Anything the host could not classify, described for the log.
    Unhandled(String),
}

/// What the core needs from the windowing side.
pub trait Host {
    fn show_menu(&mut self, menu: &MenuModel);
    fn open_in_editor(&mut self, path: &Path);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Idle,
    /// Also held after a dismissed menu: no dismiss notification exists, and
    /// the next open or command replaces it.
    MenuOpen(MenuIndex),
    Terminated,
}

pub struct App<D> {
    config_path: PathBuf,
    configured: Vec<Resolution>,
    display: D,
    state: State,
}

impl<D: DisplayModes> App<D> {
    pub fn new(config_path: PathBuf, configured: Vec<Resolution>, display: D) -> Self {
        Self {
            config_path,
            configured,
            display,
            state: State::Idle,
        }
    }

    /// Load the configured list (writing defaults on first run) and start idle.
    pub fn startup(config_path: PathBuf, display: D) -> Self {
        let configured = crate::config::load_or_init(&config_path);
        Self::new(config_path, configured, display)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn configured(&self) -> &[Resolution] {
        &self.configured
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn dispatch(&mut self, event: Event, host: &mut impl Host) -> Flow {
        if self.state == State::Terminated {
            return Flow::Exit;
        }

        match event {
            Event::MenuOpenRequested => {
                let menu = self.build_menu();
                host.show_menu(&menu);
                // The chosen command, if any, is dispatched after this returns.
                self.state = State::MenuOpen(menu.into_index());
                Flow::Continue
            }
            Event::CommandSelected(EXIT_ID) | Event::ExitRequested => {
                log::info!("Exit requested");
                self.state = State::Terminated;
                Flow::Exit
            }
            Event::CommandSelected(CONFIG_ID) => {
                self.state = State::Idle;
                log::info!("Opening {}", self.config_path.display());
                host.open_in_editor(&self.config_path);
                Flow::Continue
            }
            Event::CommandSelected(id) => {
                self.select(id);
                Flow::Continue
            }
            Event::Unhandled(what) => {
                log::trace!("Ignoring {}", what);
                Flow::Continue
            }
        }
    }

    /// Fresh enumeration, filter and projection. Nothing carries over from
    /// the previous open.
    fn build_menu(&self) -> MenuModel {
        let available = enumerate_supported(&self.display);
        let offerable = compute_offerable(&self.configured, &available);
        log::debug!(
            "Offering {} of {} configured resolutions",
            offerable.len(),
            self.configured.len()
        );

        project(&offerable, RESOLUTION_BASE_ID).with_active(self.display.current())
    }

    fn select(&mut self, id: u32) {
        let resolution = match std::mem::replace(&mut self.state, State::Idle) {
            State::MenuOpen(index) => index.resolve(id),
            _ => None,
        };

        let Some(resolution) = resolution else {
            log::debug!("Ignoring stale or unknown menu id {}", id);
            return;
        };

        // A refusal leaves the display as it was.
        let _ = apply(&mut self.display, resolution);
    }
}
