//! Screen states and their ordered tables

use crate::config::{DeviceConfig, FieldBounds, NUM_LEDS_BOUNDS, UNIVERSE_BOUNDS};

/// Pages of the idle slideshow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusPage {
    /// Current IP address and addressing mode
    Ip,
    /// Link status, universe, first channels
    Link,
    /// Die temperature and uptime
    Sensors,
}

impl StatusPage {
    /// Slideshow order
    pub const ORDER: [StatusPage; 3] = [StatusPage::Ip, StatusPage::Link, StatusPage::Sensors];

    pub const FIRST: StatusPage = Self::ORDER[0];

    /// Following page, wrapping to the first
    pub fn next(self) -> Self {
        let index = Self::ORDER.iter().position(|&p| p == self).unwrap_or(0);
        Self::ORDER[(index + 1) % Self::ORDER.len()]
    }

    pub fn title(&self) -> &'static str {
        match self {
            StatusPage::Ip => "Network",
            StatusPage::Link => "DMX Input",
            StatusPage::Sensors => "System",
        }
    }
}

/// Main menu entries, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuItem {
    Exit,
    Universe,
    LedCount,
}

impl MenuItem {
    pub const ORDER: [MenuItem; 3] = [MenuItem::Exit, MenuItem::Universe, MenuItem::LedCount];

    pub const FIRST: MenuItem = Self::ORDER[0];

    pub fn index(self) -> usize {
        Self::ORDER.iter().position(|&i| i == self).unwrap_or(0)
    }

    /// Item at `index`, clamped to the last entry
    pub fn at(index: usize) -> Self {
        Self::ORDER[index.min(Self::ORDER.len() - 1)]
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Exit => "Exit",
            MenuItem::Universe => "Set Universe",
            MenuItem::LedCount => "Set LED Count",
        }
    }

    /// Editor opened by this item, if any
    pub fn field(&self) -> Option<EditField> {
        match self {
            MenuItem::Exit => None,
            MenuItem::Universe => Some(EditField::Universe),
            MenuItem::LedCount => Some(EditField::LedCount),
        }
    }
}

/// Numeric configuration fields editable from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditField {
    Universe,
    LedCount,
}

impl EditField {
    pub fn bounds(&self) -> FieldBounds {
        match self {
            EditField::Universe => UNIVERSE_BOUNDS,
            EditField::LedCount => NUM_LEDS_BOUNDS,
        }
    }

    pub fn get(&self, config: &DeviceConfig) -> u16 {
        match self {
            EditField::Universe => config.universe(),
            EditField::LedCount => config.num_leds(),
        }
    }

    /// Store `value` into `config`, clamped to the field's bounds
    pub fn set(&self, config: &mut DeviceConfig, value: u16) {
        match self {
            EditField::Universe => config.set_universe(value),
            EditField::LedCount => config.set_num_leds(value),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EditField::Universe => "Universe",
            EditField::LedCount => "LED Count",
        }
    }
}

/// What the display is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiScreen {
    /// Slideshow page
    Status(StatusPage),
    /// Main menu with the highlighted entry
    MainMenu { selected: MenuItem },
    /// Editing a field; `value` is the uncommitted value
    Edit { field: EditField, value: u16 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_pages_wrap() {
        assert_eq!(StatusPage::Ip.next(), StatusPage::Link);
        assert_eq!(StatusPage::Link.next(), StatusPage::Sensors);
        assert_eq!(StatusPage::Sensors.next(), StatusPage::Ip);
    }

    #[test]
    fn test_menu_item_table() {
        for (i, item) in MenuItem::ORDER.iter().enumerate() {
            assert_eq!(item.index(), i);
            assert_eq!(MenuItem::at(i), *item);
        }
        assert_eq!(MenuItem::at(99), MenuItem::LedCount);
        assert_eq!(MenuItem::Exit.field(), None);
        assert_eq!(MenuItem::LedCount.field(), Some(EditField::LedCount));
    }

    #[test]
    fn test_edit_field_set_clamps() {
        let mut config = DeviceConfig::default();
        EditField::LedCount.set(&mut config, 99);
        assert_eq!(EditField::LedCount.get(&config), 50);
        EditField::Universe.set(&mut config, 0);
        assert_eq!(EditField::Universe.get(&config), 1);
    }
}
