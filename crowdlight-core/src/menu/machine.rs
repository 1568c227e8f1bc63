//! Menu state machine
//!
//! ```text
//!   Status(Ip) -> Status(Link) -> Status(Sensors) -> Status(Ip) ...   (timer)
//!        |  any button
//!        v
//!   MainMenu { Exit | Set Universe | Set LED Count }
//!        |  Select
//!        +-- Exit       -> Status(Ip)
//!        +-- Universe   -> Edit(Universe)  -- Select --> MainMenu + commit
//!        +-- LedCount   -> Edit(LedCount)  -- Select --> MainMenu + commit
//! ```

use super::events::{ButtonEvent, MenuOutcome};
use super::screen::{MenuItem, StatusPage, UiScreen};
use crate::config::DeviceConfig;

/// Time each status page stays up before the slideshow advances
pub const SLIDESHOW_INTERVAL_MS: u64 = 3000;

/// Menu controller and the configuration it edits
#[derive(Debug, Clone)]
pub struct MenuMachine {
    screen: UiScreen,
    config: DeviceConfig,
    page_shown_at_ms: u64,
}

impl MenuMachine {
    /// Start on the first status page
    pub fn new(config: DeviceConfig, now_ms: u64) -> Self {
        Self {
            screen: UiScreen::Status(StatusPage::FIRST),
            config,
            page_shown_at_ms: now_ms,
        }
    }

    pub fn screen(&self) -> UiScreen {
        self.screen
    }

    /// Last committed configuration
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Advance the slideshow if its page has been up long enough
    ///
    /// Returns true when the screen changed. Menu and edit screens never
    /// time out.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let UiScreen::Status(page) = self.screen else {
            return false;
        };
        if now_ms.saturating_sub(self.page_shown_at_ms) < SLIDESHOW_INTERVAL_MS {
            return false;
        }
        self.screen = UiScreen::Status(page.next());
        self.page_shown_at_ms = now_ms;
        true
    }

    /// Apply one button press
    pub fn handle(&mut self, event: ButtonEvent, now_ms: u64) -> Option<MenuOutcome> {
        match self.screen {
            UiScreen::Status(_) => {
                self.screen = UiScreen::MainMenu {
                    selected: MenuItem::FIRST,
                };
                None
            }
            UiScreen::MainMenu { selected } => self.handle_menu(selected, event, now_ms),
            UiScreen::Edit { field, value } => match event {
                ButtonEvent::Up | ButtonEvent::Down => {
                    let delta = event.step().unwrap_or(0);
                    self.screen = UiScreen::Edit {
                        field,
                        value: field.bounds().step(value, delta),
                    };
                    None
                }
                ButtonEvent::Select => {
                    field.set(&mut self.config, value);
                    let selected = MenuItem::ORDER
                        .into_iter()
                        .find(|item| item.field() == Some(field))
                        .unwrap_or(MenuItem::FIRST);
                    self.screen = UiScreen::MainMenu { selected };
                    Some(MenuOutcome::CommitRequested(self.config))
                }
                ButtonEvent::Left | ButtonEvent::Right => None,
            },
        }
    }

    fn handle_menu(
        &mut self,
        selected: MenuItem,
        event: ButtonEvent,
        now_ms: u64,
    ) -> Option<MenuOutcome> {
        let index = selected.index();
        match event {
            ButtonEvent::Up => {
                self.screen = UiScreen::MainMenu {
                    selected: MenuItem::at(index.saturating_sub(1)),
                };
            }
            ButtonEvent::Down => {
                self.screen = UiScreen::MainMenu {
                    selected: MenuItem::at(index + 1),
                };
            }
            ButtonEvent::Select => match selected.field() {
                Some(field) => {
                    self.screen = UiScreen::Edit {
                        field,
                        value: field.get(&self.config),
                    };
                }
                None => {
                    self.screen = UiScreen::Status(StatusPage::FIRST);
                    self.page_shown_at_ms = now_ms;
                }
            },
            ButtonEvent::Left | ButtonEvent::Right => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::screen::EditField;

    fn machine() -> MenuMachine {
        MenuMachine::new(DeviceConfig::default(), 0)
    }

    #[test]
    fn test_starts_on_ip_page() {
        assert_eq!(machine().screen(), UiScreen::Status(StatusPage::Ip));
    }

    #[test]
    fn test_slideshow_advances_and_wraps() {
        let mut m = machine();
        assert!(!m.tick(2999));
        assert!(m.tick(3000));
        assert_eq!(m.screen(), UiScreen::Status(StatusPage::Link));
        assert!(m.tick(6000));
        assert_eq!(m.screen(), UiScreen::Status(StatusPage::Sensors));
        assert!(m.tick(9000));
        assert_eq!(m.screen(), UiScreen::Status(StatusPage::Ip));
    }

    #[test]
    fn test_any_button_opens_menu() {
        for event in ButtonEvent::ALL {
            let mut m = machine();
            m.tick(3000);
            assert_eq!(m.handle(event, 3100), None);
            assert_eq!(
                m.screen(),
                UiScreen::MainMenu {
                    selected: MenuItem::Exit
                }
            );
        }
    }

    #[test]
    fn test_menu_does_not_time_out() {
        let mut m = machine();
        m.handle(ButtonEvent::Select, 0);
        assert!(!m.tick(1_000_000));
        assert!(matches!(m.screen(), UiScreen::MainMenu { .. }));
    }

    #[test]
    fn test_menu_selection_clamps() {
        let mut m = machine();
        m.handle(ButtonEvent::Select, 0);

        m.handle(ButtonEvent::Up, 0);
        assert_eq!(m.screen(), UiScreen::MainMenu { selected: MenuItem::Exit });

        for _ in 0..5 {
            m.handle(ButtonEvent::Down, 0);
        }
        assert_eq!(
            m.screen(),
            UiScreen::MainMenu {
                selected: MenuItem::LedCount
            }
        );

        m.handle(ButtonEvent::Left, 0);
        m.handle(ButtonEvent::Right, 0);
        assert_eq!(
            m.screen(),
            UiScreen::MainMenu {
                selected: MenuItem::LedCount
            }
        );
    }

    #[test]
    fn test_exit_restarts_slideshow() {
        let mut m = machine();
        m.handle(ButtonEvent::Down, 0);
        m.handle(ButtonEvent::Select, 5000);
        assert_eq!(m.screen(), UiScreen::Status(StatusPage::Ip));
        assert!(!m.tick(7999));
        assert!(m.tick(8000));
    }

    #[test]
    fn test_edit_universe_commit() {
        let mut m = machine();
        m.handle(ButtonEvent::Select, 0);
        m.handle(ButtonEvent::Down, 0);
        m.handle(ButtonEvent::Select, 0);
        assert_eq!(
            m.screen(),
            UiScreen::Edit {
                field: EditField::Universe,
                value: 129
            }
        );

        m.handle(ButtonEvent::Up, 0);
        m.handle(ButtonEvent::Up, 0);
        m.handle(ButtonEvent::Down, 0);
        assert_eq!(m.config().universe(), 129);

        let outcome = m.handle(ButtonEvent::Select, 0);
        let mut expected = DeviceConfig::default();
        expected.set_universe(130);
        assert_eq!(outcome, Some(MenuOutcome::CommitRequested(expected)));
        assert_eq!(m.config().universe(), 130);
        assert_eq!(
            m.screen(),
            UiScreen::MainMenu {
                selected: MenuItem::Universe
            }
        );
    }

    #[test]
    fn test_edit_clamps_at_bounds() {
        let mut m = machine();
        m.handle(ButtonEvent::Select, 0);
        m.handle(ButtonEvent::Down, 0);
        m.handle(ButtonEvent::Down, 0);
        m.handle(ButtonEvent::Select, 0);

        for _ in 0..20 {
            m.handle(ButtonEvent::Down, 0);
        }
        assert_eq!(
            m.screen(),
            UiScreen::Edit {
                field: EditField::LedCount,
                value: 0
            }
        );
    }

    #[test]
    fn test_left_right_ignored_in_edit() {
        let mut m = machine();
        m.handle(ButtonEvent::Select, 0);
        m.handle(ButtonEvent::Down, 0);
        m.handle(ButtonEvent::Select, 0);
        let before = m.screen();
        assert_eq!(m.handle(ButtonEvent::Left, 0), None);
        assert_eq!(m.handle(ButtonEvent::Right, 0), None);
        assert_eq!(m.screen(), before);
    }
}
