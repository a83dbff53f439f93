use rustc_hash::FxHashSet;

use crate::display::DisplayModes;
use crate::resolution::Resolution;

/// Resolutions the display currently reports as switchable to.
pub type AvailableSet = FxHashSet<Resolution>;

/// Walk the display's mode list from index 0 until it runs out.
///
/// Modes that differ only in refresh rate or colour depth collapse into one
/// entry. Called fresh on every menu open; nothing is cached.
pub fn enumerate_supported(display: &dyn DisplayModes) -> AvailableSet {
    let available: AvailableSet = (0..)
        .map_while(|index| display.mode(index))
        .collect();

    log::debug!("Display reports {} distinct resolutions", available.len());
    available
}
