use std::cell::RefCell;
use std::path::{Path, PathBuf};

use kres::app::State;
use kres::menu::{MenuEntry, MenuModel, CONFIG_ID, EXIT_ID, RESOLUTION_BASE_ID};
use kres::{res, App, ApplyError, DisplayModes, Event, Flow, Host, Resolution};

/// A display whose mode list can change between opens (hot-plug) and that
/// records every switch attempt.
struct FakeDisplay {
    modes: RefCell<Vec<Resolution>>,
    active: Resolution,
    refuse: Vec<Resolution>,
    requested: Vec<Resolution>,
}

impl FakeDisplay {
    fn new(modes: &[Resolution], active: Resolution) -> Self {
        Self {
            modes: RefCell::new(modes.to_vec()),
            active,
            refuse: Vec::new(),
            requested: Vec::new(),
        }
    }
}

impl DisplayModes for FakeDisplay {
    fn mode(&self, index: u32) -> Option<Resolution> {
        self.modes.borrow().get(index as usize).copied()
    }

    fn current(&self) -> Option<Resolution> {
        Some(self.active)
    }

    fn set_mode(&mut self, resolution: Resolution) -> Result<(), ApplyError> {
        self.requested.push(resolution);
        if self.refuse.contains(&resolution) {
            return Err(ApplyError::BadMode(resolution));
        }
        self.active = resolution;
        Ok(())
    }
}

#[derive(Default)]
struct RecordingHost {
    menus: Vec<MenuModel>,
    opened: Vec<PathBuf>,
}

impl RecordingHost {
    fn last_labels(&self) -> Vec<Option<String>> {
        self.menus
            .last()
            .unwrap()
            .entries
            .iter()
            .map(|entry| match entry {
                MenuEntry::Item(item) => Some(item.label.clone()),
                MenuEntry::Separator => None,
            })
            .collect()
    }

    fn last_checked(&self) -> Vec<String> {
        self.menus
            .last()
            .unwrap()
            .items()
            .filter(|item| item.checked)
            .map(|item| item.label.clone())
            .collect()
    }
}

impl Host for RecordingHost {
    fn show_menu(&mut self, menu: &MenuModel) {
        self.menus.push(menu.clone());
    }

    fn open_in_editor(&mut self, path: &Path) {
        self.opened.push(path.to_owned());
    }
}

fn app(configured: &[Resolution], display: FakeDisplay) -> App<FakeDisplay> {
    App::new(PathBuf::from("config.txt"), configured.to_vec(), display)
}

#[cfg(test)]
mod dispatch_tests {
    use super::*;

    #[test]
    fn test_menu_shows_only_available_configured_resolutions() {
        let display = FakeDisplay::new(&[res(2560, 1440), res(1280, 720)], res(1280, 720));
        let mut app = app(&[res(1920, 1080), res(2560, 1440)], display);
        let mut host = RecordingHost::default();

        assert_eq!(app.dispatch(Event::MenuOpenRequested, &mut host), Flow::Continue);

        assert_eq!(
            host.last_labels(),
            vec![
                Some("2560 x 1440".to_owned()),
                None,
                Some("Config".to_owned()),
                Some("Exit".to_owned()),
            ]
        );
        assert!(matches!(app.state(), State::MenuOpen(index) if index.len() == 1));
    }

    #[test]
    fn test_selecting_a_resolution_switches_the_display() {
        let display = FakeDisplay::new(&[res(2560, 1440), res(1920, 1080)], res(1920, 1080));
        let mut app = app(&[res(1920, 1080), res(2560, 1440)], display);
        let mut host = RecordingHost::default();

        app.dispatch(Event::MenuOpenRequested, &mut host);
        app.dispatch(Event::CommandSelected(RESOLUTION_BASE_ID + 1), &mut host);

        assert_eq!(app.display().requested, vec![res(2560, 1440)]);
        assert_eq!(app.display().active, res(2560, 1440));
        assert_eq!(app.state(), &State::Idle);

        app.dispatch(Event::MenuOpenRequested, &mut host);
        assert_eq!(host.last_checked(), vec!["2560 x 1440".to_owned()]);
    }

    #[test]
    fn test_out_of_range_id_is_ignored() {
        let display = FakeDisplay::new(&[res(2560, 1440)], res(2560, 1440));
        let mut app = app(&[res(1920, 1080), res(2560, 1440)], display);
        let mut host = RecordingHost::default();

        app.dispatch(Event::MenuOpenRequested, &mut host);
        let flow = app.dispatch(Event::CommandSelected(1001), &mut host);

        assert_eq!(flow, Flow::Continue);
        assert!(app.display().requested.is_empty());
        assert_eq!(app.state(), &State::Idle);
    }

    #[test]
    fn test_selection_without_open_menu_is_ignored() {
        let display = FakeDisplay::new(&[res(2560, 1440)], res(2560, 1440));
        let mut app = app(&[res(2560, 1440)], display);
        let mut host = RecordingHost::default();

        app.dispatch(Event::CommandSelected(RESOLUTION_BASE_ID), &mut host);

        assert!(app.display().requested.is_empty());
    }

    #[test]
    fn test_id_from_a_used_menu_does_not_resolve_again() {
        let display = FakeDisplay::new(&[res(2560, 1440), res(1920, 1080)], res(1920, 1080));
        let mut app = app(&[res(2560, 1440)], display);
        let mut host = RecordingHost::default();

        app.dispatch(Event::MenuOpenRequested, &mut host);
        app.dispatch(Event::CommandSelected(RESOLUTION_BASE_ID), &mut host);
        app.dispatch(Event::CommandSelected(RESOLUTION_BASE_ID), &mut host);

        assert_eq!(app.display().requested, vec![res(2560, 1440)]);
    }

    #[test]
    fn test_reopening_rebuilds_against_current_modes() {
        let display = FakeDisplay::new(&[res(2560, 1440), res(1920, 1080)], res(1920, 1080));
        let mut app = app(&[res(2560, 1440), res(1920, 1080)], display);
        let mut host = RecordingHost::default();

        app.dispatch(Event::MenuOpenRequested, &mut host);
        assert_eq!(host.menus.last().unwrap().index().len(), 2);

        // Monitor swapped while the first menu was dismissed.
        app.display().modes.replace(vec![res(1920, 1080)]);

        app.dispatch(Event::MenuOpenRequested, &mut host);
        assert_eq!(host.menus.len(), 2);
        assert_eq!(host.menus[1].index().len(), 1);
        assert_eq!(host.last_labels()[0], Some("1920 x 1080".to_owned()));
        assert!(matches!(app.state(), State::MenuOpen(index) if index.len() == 1));

        // Valid only in the first menu.
        app.dispatch(Event::CommandSelected(RESOLUTION_BASE_ID + 1), &mut host);

        assert!(app.display().requested.is_empty());
        assert_eq!(app.state(), &State::Idle);
    }

    #[test]
    fn test_refused_mode_leaves_display_unchanged() {
        let mut display = FakeDisplay::new(&[res(3440, 1440), res(1920, 1080)], res(1920, 1080));
        display.refuse.push(res(3440, 1440));
        let mut app = app(&[res(3440, 1440), res(1920, 1080)], display);
        let mut host = RecordingHost::default();

        app.dispatch(Event::MenuOpenRequested, &mut host);
        let flow = app.dispatch(Event::CommandSelected(RESOLUTION_BASE_ID), &mut host);

        assert_eq!(flow, Flow::Continue);
        assert_eq!(app.display().requested, vec![res(3440, 1440)]);

        app.dispatch(Event::MenuOpenRequested, &mut host);
        assert_eq!(host.last_checked(), vec!["1920 x 1080".to_owned()]);
    }

    #[test]
    fn test_config_command_opens_editor() {
        let display = FakeDisplay::new(&[], res(1920, 1080));
        let mut app = app(&[res(1920, 1080)], display);
        let mut host = RecordingHost::default();

        app.dispatch(Event::MenuOpenRequested, &mut host);
        let flow = app.dispatch(Event::CommandSelected(CONFIG_ID), &mut host);

        assert_eq!(flow, Flow::Continue);
        assert_eq!(host.opened, vec![PathBuf::from("config.txt")]);
        assert_eq!(app.state(), &State::Idle);
    }

    #[test]
    fn test_exit_command_terminates() {
        let display = FakeDisplay::new(&[res(1920, 1080)], res(1920, 1080));
        let mut app = app(&[res(1920, 1080)], display);
        let mut host = RecordingHost::default();

        app.dispatch(Event::MenuOpenRequested, &mut host);
        assert_eq!(app.dispatch(Event::CommandSelected(EXIT_ID), &mut host), Flow::Exit);
        assert_eq!(app.state(), &State::Terminated);

        // Nothing runs after termination.
        assert_eq!(app.dispatch(Event::MenuOpenRequested, &mut host), Flow::Exit);
        assert_eq!(host.menus.len(), 1);
    }

    #[test]
    fn test_exit_request_terminates() {
        let mut app = app(&[], FakeDisplay::new(&[], res(1920, 1080)));
        let mut host = RecordingHost::default();

        assert_eq!(app.dispatch(Event::ExitRequested, &mut host), Flow::Exit);
        assert_eq!(app.state(), &State::Terminated);
    }

    #[test]
    fn test_unhandled_events_are_ignored() {
        let mut app = app(&[res(1920, 1080)], FakeDisplay::new(&[res(1920, 1080)], res(1920, 1080)));
        let mut host = RecordingHost::default();

        assert_eq!(app.dispatch(Event::Unhandled("tray hover".to_owned()), &mut host), Flow::Continue);
        assert!(host.menus.is_empty());
        assert_eq!(app.state(), &State::Idle);
    }

    #[test]
    fn test_no_supported_modes_offers_only_controls() {
        let mut app = app(&[res(1920, 1080)], FakeDisplay::new(&[], res(1920, 1080)));
        let mut host = RecordingHost::default();

        app.dispatch(Event::MenuOpenRequested, &mut host);

        assert_eq!(
            host.last_labels(),
            vec![None, Some("Config".to_owned()), Some("Exit".to_owned())]
        );
    }

    #[test]
    fn test_startup_writes_defaults() {
        let dir = std::env::temp_dir().join(format!("kres-{}-startup", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let path = kres::config::config_path_in(&dir);

        let app = App::startup(path.clone(), FakeDisplay::new(&[], res(1920, 1080)));

        assert_eq!(app.configured(), &kres::config::DEFAULT_RESOLUTIONS);
        assert!(path.is_file());
    }
}
