//! Projection of the offerable resolutions onto a flat native menu.
//!
//! Resolution entries come first, in offerable order, with identifiers
//! `base_id + position`. They are followed by a separator and the two fixed
//! control entries, [`CONFIG_ID`] and [`EXIT_ID`].

use crate::resolution::Resolution;
use crate::selection::resolve_selection;

/// Open the config file in the user's editor.
pub const CONFIG_ID: u32 = 1;
/// Quit the application.
pub const EXIT_ID: u32 = 2;
/// First resolution identifier. Well clear of the reserved control ids.
pub const RESOLUTION_BASE_ID: u32 = 1000;

pub const CONFIG_LABEL: &str = "Config";
pub const EXIT_LABEL: &str = "Exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: u32,
    pub label: String,
    pub enabled: bool,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Item(MenuItem),
    Separator,
}

/// Identifier to resolution table for one open menu.
///
/// Identifiers are contiguous from `base_id`. A fresh index is built for every
/// projection, so an identifier from an older menu never resolves against a
/// newer list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuIndex {
    base_id: u32,
    resolutions: Vec<Resolution>,
}

impl MenuIndex {
    pub fn resolve(&self, id: u32) -> Option<Resolution> {
        resolve_selection(i64::from(id) - i64::from(self.base_id), &self.resolutions)
    }

    pub fn len(&self) -> usize {
        self.resolutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolutions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuModel {
    pub entries: Vec<MenuEntry>,
    index: MenuIndex,
}

impl MenuModel {
    pub fn index(&self) -> &MenuIndex {
        &self.index
    }

    pub fn into_index(self) -> MenuIndex {
        self.index
    }

    /// Check every entry showing `active`.
    pub fn with_active(mut self, active: Option<Resolution>) -> Self {
        let Some(active) = active else {
            return self;
        };

        for entry in &mut self.entries {
            if let MenuEntry::Item(item) = entry {
                item.checked = self.index.resolve(item.id) == Some(active);
            }
        }
        self
    }

    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.entries.iter().filter_map(|entry| match entry {
            MenuEntry::Item(item) => Some(item),
            MenuEntry::Separator => None,
        })
    }
}

/// Build the menu for `offerable`.
///
/// `base_id` must be above [`EXIT_ID`]; [`RESOLUTION_BASE_ID`] is the value the
/// application uses.
pub fn project(offerable: &[Resolution], base_id: u32) -> MenuModel {
    debug_assert!(base_id > EXIT_ID, "resolution ids would collide with control ids");

    // Entries that would overflow the id space are dropped.
    let resolutions: Vec<Resolution> = offerable
        .iter()
        .enumerate()
        .map_while(|(i, r)| {
            u32::try_from(i)
                .ok()
                .and_then(|i| base_id.checked_add(i))
                .map(|_| *r)
        })
        .collect();

    let mut entries: Vec<MenuEntry> = resolutions
        .iter()
        .enumerate()
        .map(|(i, r)| {
            MenuEntry::Item(MenuItem {
                id: base_id + i as u32,
                label: r.label(),
                enabled: true,
                checked: false,
            })
        })
        .collect();

    entries.push(MenuEntry::Separator);
    entries.push(control(CONFIG_ID, CONFIG_LABEL));
    entries.push(control(EXIT_ID, EXIT_LABEL));

    MenuModel {
        entries,
        index: MenuIndex {
            base_id,
            resolutions,
        },
    }
}

fn control(id: u32, label: &str) -> MenuEntry {
    MenuEntry::Item(MenuItem {
        id,
        label: label.to_owned(),
        enabled: true,
        checked: false,
    })
}
