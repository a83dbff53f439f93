//! Resolution-selection engine behind the KRes tray utility.
//!
//! The user keeps an ordered list of resolutions in a text file. Each time the
//! tray menu opens, that list is filtered down to what the display supports
//! right now and projected onto menu entries; picking an entry switches the
//! display mode. Everything OS-specific sits behind [`DisplayModes`] and
//! [`app::Host`].

pub mod app;
pub mod apply;
pub mod catalog;
pub mod config;
pub mod display;
pub mod menu;
pub mod resolution;
pub mod selection;

pub use app::{App, Event, Flow, Host};
pub use catalog::AvailableSet;
pub use display::{ApplyError, DisplayModes};
pub use resolution::{res, Resolution};
