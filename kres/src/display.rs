use crate::resolution::Resolution;

/// Why the OS refused a display-mode change.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    #[error("{0} is not supported by the display")]
    BadMode(Resolution),

    #[error("{0} only takes effect after a restart")]
    RestartRequired(Resolution),

    #[error("the display driver rejected {resolution} (code {code})")]
    Rejected { resolution: Resolution, code: i32 },
}

/// The OS display subsystem, as seen by the core.
///
/// Implementations talk to the primary display of the current session.
pub trait DisplayModes {
    /// The mode at `index`, or `None` once `index` is past the last mode.
    fn mode(&self, index: u32) -> Option<Resolution>;

    /// The active resolution, if the backend can tell.
    fn current(&self) -> Option<Resolution> {
        None
    }

    /// Switch width and height only. Refresh rate and colour depth are left to
    /// the OS.
    fn set_mode(&mut self, resolution: Resolution) -> Result<(), ApplyError>;
}
