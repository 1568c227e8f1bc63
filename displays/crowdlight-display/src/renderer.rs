//! Page rendering
//!
//! Builds a [`Screen`] for each UI state. Every screen shares a title row and
//! a rule; the last header cell blinks `*` while fresh DMX data arrives. The
//! menu marks the selected row with `>` and inverts it.

use core::fmt::Write;

use crowdlight_core::config::DeviceConfig;
use crowdlight_core::console::{Dashboard, SensorReadings};
use crowdlight_core::menu::{EditField, MenuItem, StatusPage, UiScreen};
use crowdlight_core::status::{LinkReport, LinkStatus};
use heapless::String;

use crate::screen::{Screen, SCREEN_COLS};

/// Title row of every status page
pub const HEADER_TITLE: &str = "CrowdLight DMX Node";

/// Shown in the last header cell when a new frame arrived this tick
pub const ACTIVITY_MARKER: char = '*';

const HEADER_ROW: usize = 0;
const RULE_ROW: usize = 1;
const BODY_ROW: usize = 2;

type Line = String<SCREEN_COLS>;

/// Screen renderer for the UI states
pub struct Renderer {
    screen: Screen,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            screen: Screen::new(),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Render the boot splash
    pub fn render_boot(&mut self) -> &Screen {
        self.screen.clear();
        self.screen.set_line(3, "   SYSTEM BOOT...");
        &self.screen
    }

    /// Render whatever the dashboard's current screen is
    pub fn render(&mut self, board: &Dashboard) -> &Screen {
        self.screen.clear();
        self.header(board.fresh);

        if let UiScreen::Status(page) = board.screen {
            self.screen.set_line(BODY_ROW, page.title());
        }

        match board.screen {
            UiScreen::Status(StatusPage::Ip) => self.ip_page(&board.config, &board.link),
            UiScreen::Status(StatusPage::Link) => self.link_page(board),
            UiScreen::Status(StatusPage::Sensors) => {
                self.sensors_page(&board.config, &board.sensors)
            }
            UiScreen::MainMenu { selected } => self.menu(selected),
            UiScreen::Edit { field, value } => self.editor(field, value),
        }

        &self.screen
    }

    fn header(&mut self, fresh: bool) {
        let mut line = Line::new();
        if fresh {
            let width = SCREEN_COLS - 1;
            let _ = write!(line, "{:<width$}{}", HEADER_TITLE, ACTIVITY_MARKER);
        } else {
            let _ = line.push_str(HEADER_TITLE);
        }
        self.screen.set_line(HEADER_ROW, &line);
        self.screen.set_rule(RULE_ROW);
    }

    fn ip_page(&mut self, config: &DeviceConfig, link: &LinkReport) {
        let mut line = Line::new();
        let address = match link.ip {
            Some(ip) => Some(ip),
            None if !config.use_dhcp() => Some(config.ip_octets()),
            None => None,
        };
        match address {
            Some([a, b, c, d]) => {
                let _ = write!(line, "IP: {}.{}.{}.{}", a, b, c, d);
            }
            None => {
                let _ = line.push_str("IP: waiting DHCP");
            }
        }
        self.screen.set_line(BODY_ROW + 1, &line);

        self.screen.set_line(
            BODY_ROW + 2,
            if config.use_dhcp() {
                "Mode: DHCP"
            } else {
                "Mode: Static /24"
            },
        );
        self.screen
            .set_line(BODY_ROW + 3, if link.up { "Link: UP" } else { "Link: DOWN" });
    }

    fn link_page(&mut self, board: &Dashboard) {
        let mut line = Line::new();
        let _ = write!(line, "Univ: {}", board.config.universe());
        self.screen.set_line(BODY_ROW + 1, &line);

        line.clear();
        let _ = write!(line, "STATUS: {}", board.status.label());
        self.screen.set_line(BODY_ROW + 2, &line);

        line.clear();
        match (board.status, board.rgb) {
            (LinkStatus::Active, Some([r, g, b])) => {
                let _ = write!(line, "LED 0: ({},{},{})", r, g, b);
            }
            _ => {
                let _ = line.push_str("Check E1.31 source");
            }
        }
        self.screen.set_line(BODY_ROW + 3, &line);

        if board.status.has_data() {
            line.clear();
            let _ = write!(line, "Ch: {}", board.channel_count);
            self.screen.set_line(BODY_ROW + 4, &line);
        }
    }

    fn sensors_page(&mut self, config: &DeviceConfig, sensors: &SensorReadings) {
        let mut line = Line::new();
        match sensors.temperature_x10 {
            Some(t) => {
                let sign = if t < 0 { "-" } else { "" };
                let t = t.unsigned_abs();
                let _ = write!(line, "Temp: {}{}.{}C", sign, t / 10, t % 10);
            }
            None => {
                let _ = line.push_str("Temp: --");
            }
        }
        self.screen.set_line(BODY_ROW + 1, &line);

        let up = sensors.uptime_s;
        line.clear();
        let _ = write!(
            line,
            "Up: {}:{:02}:{:02}",
            up / 3600,
            (up / 60) % 60,
            up % 60
        );
        self.screen.set_line(BODY_ROW + 2, &line);

        line.clear();
        let _ = write!(
            line,
            "LEDs: {} ({} ch)",
            config.num_leds(),
            config.bytes_to_forward()
        );
        self.screen.set_line(BODY_ROW + 3, &line);
    }

    fn menu(&mut self, selected: MenuItem) {
        self.screen.set_line(BODY_ROW, "--- MAIN MENU ---");

        for (i, item) in MenuItem::ORDER.iter().enumerate() {
            let row = BODY_ROW + 1 + i;
            let mut line = Line::new();
            let _ = line.push_str(if *item == selected { "> " } else { "  " });
            let _ = line.push_str(item.label());
            self.screen.set_line(row, &line);
            if *item == selected {
                self.screen.highlight_row(row);
            }
        }
    }

    fn editor(&mut self, field: EditField, value: u16) {
        let mut line = Line::new();
        let _ = write!(line, "--- {} ---", field.label());
        self.screen.set_line(BODY_ROW, &line);

        line.clear();
        let _ = write!(line, "    < {} >", value);
        self.screen.set_line(BODY_ROW + 2, &line);
        self.screen.highlight_row(BODY_ROW + 2);

        let bounds = field.bounds();
        line.clear();
        let _ = write!(line, "Range {}-{}", bounds.min, bounds.max);
        self.screen.set_line(BODY_ROW + 4, &line);
        self.screen.set_line(BODY_ROW + 5, "UP/DN edit SEL save");
    }
}
