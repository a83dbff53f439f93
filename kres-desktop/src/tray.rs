use std::error::Error;
use std::path::Path;

use kres::app::{App, Event, Flow, Host};
use kres::menu::{MenuEntry, MenuModel};
use kres::Resolution;
use muda::{CheckMenuItem, ContextMenu, Menu, MenuEvent, MenuItem, PredefinedMenuItem};
use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use tray_icon::{Icon, MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent};
use winit::event::Event as WinitEvent;
use winit::event_loop::{ControlFlow, EventLoopBuilder};
use winit::window::{Window, WindowBuilder};

use crate::icon;
use crate::win32::{self, GdiDisplay};

enum UserEvent {
    Tray(TrayIconEvent),
    Menu(MenuEvent),
}

/// Shows menus for, and receives commands through, a hidden message window.
struct TrayHost {
    hwnd: isize,
}

impl Host for TrayHost {
    fn show_menu(&mut self, model: &MenuModel) {
        let menu = match build_menu(model) {
            Ok(menu) => menu,
            Err(err) => {
                log::error!("Failed to build menu: {}", err);
                return;
            }
        };

        // Blocks until the menu closes; the chosen item arrives as a MenuEvent.
        unsafe {
            menu.show_context_menu_for_hwnd(self.hwnd, None);
        }
    }

    fn open_in_editor(&mut self, path: &Path) {
        win32::open_in_editor(path);
    }
}

pub fn run(mut app: App<GdiDisplay>) -> Result<(), Box<dyn Error>> {
    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build()?;

    let window = WindowBuilder::new()
        .with_title("KRes")
        .with_visible(false)
        .build(&event_loop)?;
    let mut host = TrayHost {
        hwnd: hwnd_of(&window)?,
    };

    let proxy = event_loop.create_proxy();
    TrayIconEvent::set_event_handler(Some(move |event| {
        let _ = proxy.send_event(UserEvent::Tray(event));
    }));
    let proxy = event_loop.create_proxy();
    MenuEvent::set_event_handler(Some(move |event| {
        let _ = proxy.send_event(UserEvent::Menu(event));
    }));

    let mut tray = Some(build_tray(app.display().current())?);
    log::info!("Tray icon ready");

    event_loop.run(move |event, elwt| {
        let _message_window = &window;
        elwt.set_control_flow(ControlFlow::Wait);

        let event = match event {
            WinitEvent::UserEvent(event) => translate(event),
            WinitEvent::LoopExiting => Event::ExitRequested,
            _ => return,
        };
        let is_command = matches!(event, Event::CommandSelected(_));

        if app.dispatch(event, &mut host) == Flow::Exit {
            // Dropping the icon removes it from the notification area
            drop(tray.take());
            elwt.exit();
            return;
        }

        if is_command {
            if let Some(tray) = &tray {
                if let Err(err) = tray.set_tooltip(Some(tooltip(app.display().current()))) {
                    log::debug!("Failed to update tooltip: {}", err);
                }
            }
        }
    })?;

    Ok(())
}

fn translate(event: UserEvent) -> Event {
    match event {
        UserEvent::Tray(TrayIconEvent::Click {
            button: MouseButton::Left,
            button_state: MouseButtonState::Up,
            ..
        }) => Event::MenuOpenRequested,
        UserEvent::Tray(event) => Event::Unhandled(format!("{:?}", event)),
        UserEvent::Menu(event) => match event.id.0.parse::<u32>() {
            Ok(id) => Event::CommandSelected(id),
            Err(_) => Event::Unhandled(format!("menu id {:?}", event.id.0)),
        },
    }
}

fn build_menu(model: &MenuModel) -> Result<Menu, muda::Error> {
    let menu = Menu::new();

    for entry in &model.entries {
        match entry {
            MenuEntry::Item(item) if item.checked => menu.append(&CheckMenuItem::with_id(
                item.id.to_string(),
                &item.label,
                item.enabled,
                true,
                None,
            ))?,
            MenuEntry::Item(item) => menu.append(&MenuItem::with_id(
                item.id.to_string(),
                &item.label,
                item.enabled,
                None,
            ))?,
            MenuEntry::Separator => menu.append(&PredefinedMenuItem::separator())?,
        }
    }

    Ok(menu)
}

fn build_tray(current: Option<Resolution>) -> Result<TrayIcon, Box<dyn Error>> {
    let image = icon::render(icon::ICON_SIZE);
    let (width, height) = image.dimensions();
    let icon = Icon::from_rgba(image.into_raw(), width, height)?;

    let tray = TrayIconBuilder::new()
        .with_icon(icon)
        .with_tooltip(tooltip(current))
        .build()?;
    Ok(tray)
}

fn tooltip(current: Option<Resolution>) -> String {
    match current {
        Some(resolution) => format!("KRes ({})", resolution),
        None => "KRes".to_owned(),
    }
}

fn hwnd_of(window: &Window) -> Result<isize, Box<dyn Error>> {
    match window.window_handle()?.as_raw() {
        RawWindowHandle::Win32(handle) => Ok(handle.hwnd.get()),
        _ => Err("message window has no Win32 handle".into()),
    }
}
