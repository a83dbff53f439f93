use crate::display::{ApplyError, DisplayModes};
use crate::resolution::Resolution;

/// Ask the OS to switch the active display to `resolution`.
///
/// A rejection is final for this attempt; the caller decides whether to care.
pub fn apply(display: &mut dyn DisplayModes, resolution: Resolution) -> Result<(), ApplyError> {
    log::info!("Switching display to {}", resolution);

    match display.set_mode(resolution) {
        Ok(()) => Ok(()),
        Err(err) => {
            log::warn!("Display mode change refused: {}", err);
            Err(err)
        }
    }
}
