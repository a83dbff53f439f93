use crate::catalog::AvailableSet;
use crate::resolution::Resolution;

/// The configured resolutions the display can switch to right now, in
/// configured order. Duplicates in `configured` are kept.
pub fn compute_offerable(configured: &[Resolution], available: &AvailableSet) -> Vec<Resolution> {
    configured
        .iter()
        .filter(|r| available.contains(*r))
        .copied()
        .collect()
}

/// The entry at `index`, or `None` when `index` is negative or past the end.
pub fn resolve_selection(index: i64, offerable: &[Resolution]) -> Option<Resolution> {
    usize::try_from(index)
        .ok()
        .and_then(|i| offerable.get(i))
        .copied()
}
