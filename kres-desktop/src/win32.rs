use std::ffi::OsStr;
use std::mem::{size_of, zeroed};
use std::os::windows::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use std::ptr::null;

use kres::config::{self, ConfigError};
use kres::{ApplyError, DisplayModes, Resolution};
use windows_sys::Win32::Graphics::Gdi::{
    ChangeDisplaySettingsW, EnumDisplaySettingsW, CDS_UPDATEREGISTRY, DEVMODEW,
    DISP_CHANGE_BADMODE, DISP_CHANGE_RESTART, DISP_CHANGE_SUCCESSFUL, DM_PELSHEIGHT,
    DM_PELSWIDTH, ENUM_CURRENT_SETTINGS,
};
use windows_sys::Win32::UI::Shell::ShellExecuteW;
use windows_sys::Win32::UI::WindowsAndMessaging::SW_SHOW;
use winreg::enums::HKEY_CURRENT_USER;
use winreg::RegKey;

const SHELL_FOLDERS: &str = r"Software\Microsoft\Windows\CurrentVersion\Explorer\Shell Folders";

/// The primary display, through the GDI display-settings API.
pub struct GdiDisplay;

impl GdiDisplay {
    fn settings(index: u32) -> Option<DEVMODEW> {
        unsafe {
            let mut mode: DEVMODEW = zeroed();
            mode.dmSize = size_of::<DEVMODEW>() as u16;
            mode.dmDriverExtra = 0;

            if EnumDisplaySettingsW(null(), index, &mut mode) == 0 {
                return None;
            }
            Some(mode)
        }
    }
}

impl DisplayModes for GdiDisplay {
    fn mode(&self, index: u32) -> Option<Resolution> {
        let mode = Self::settings(index)?;
        let resolution = Resolution::new(mode.dmPelsWidth, mode.dmPelsHeight);
        if resolution.is_none() {
            // Keep walking; a zero-sized entry is not the end of the list.
            log::debug!("Mode {} reports a zero-sized resolution", index);
        }
        resolution.or_else(|| self.mode(index + 1))
    }

    fn current(&self) -> Option<Resolution> {
        let mode = Self::settings(ENUM_CURRENT_SETTINGS)?;
        Resolution::new(mode.dmPelsWidth, mode.dmPelsHeight)
    }

    fn set_mode(&mut self, resolution: Resolution) -> Result<(), ApplyError> {
        let mut mode: DEVMODEW = unsafe { zeroed() };
        mode.dmSize = size_of::<DEVMODEW>() as u16;
        mode.dmFields = DM_PELSWIDTH | DM_PELSHEIGHT;
        mode.dmPelsWidth = resolution.width();
        mode.dmPelsHeight = resolution.height();

        match unsafe { ChangeDisplaySettingsW(&mode, CDS_UPDATEREGISTRY) } {
            DISP_CHANGE_SUCCESSFUL => Ok(()),
            DISP_CHANGE_RESTART => Err(ApplyError::RestartRequired(resolution)),
            DISP_CHANGE_BADMODE => Err(ApplyError::BadMode(resolution)),
            code => Err(ApplyError::Rejected { resolution, code }),
        }
    }
}

/// Open `path` in the user's default editor, falling back to the default
/// handler for the file type.
pub fn open_in_editor(path: &Path) {
    let file = wide(path.as_os_str());

    for verb in ["edit", "open"] {
        let operation = wide(OsStr::new(verb));
        let result = unsafe {
            ShellExecuteW(0, operation.as_ptr(), file.as_ptr(), null(), null(), SW_SHOW)
        };

        // Anything above 32 is success
        if result > 32 {
            return;
        }
        log::warn!("ShellExecuteW({}) failed for {} with {}", verb, path.display(), result);
    }
}

/// Config location from `LOCALAPPDATA`, or from the registry's shell folders
/// if the variable is missing.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    config::default_config_path().or_else(|err| {
        log::warn!("{}; falling back to the registry", err);
        registry_local_app_data()
            .map(config::config_path_in)
            .ok_or(err)
    })
}

fn registry_local_app_data() -> Option<PathBuf> {
    let key = RegKey::predef(HKEY_CURRENT_USER)
        .open_subkey(SHELL_FOLDERS)
        .ok()?;
    let value: String = key.get_value("Local AppData").ok()?;
    Some(PathBuf::from(value))
}

/// NUL-terminated UTF-16 for the W APIs.
fn wide(s: &OsStr) -> Vec<u16> {
    s.encode_wide().chain(Some(0)).collect()
}
