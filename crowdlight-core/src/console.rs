//! Consumer side: menu, slideshow, and what the display should show

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::config::DeviceConfig;
use crate::menu::{ButtonEvent, MenuMachine, MenuOutcome, UiScreen};
use crate::shared::{LiveConfig, SharedChannelState};
use crate::status::{LinkReport, LinkStatus};

/// Board readings shown on the sensors page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReadings {
    /// Die temperature in 0.1 °C, if the ADC read succeeded
    pub temperature_x10: Option<i16>,
    /// Seconds since boot
    pub uptime_s: u32,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dashboard {
    pub screen: UiScreen,
    pub config: DeviceConfig,
    pub link: LinkReport,
    pub status: LinkStatus,
    /// Channels 1..=3 of the latest snapshot
    pub rgb: Option<[u8; 3]>,
    /// Channel count of the latest snapshot
    pub channel_count: usize,
    /// A new snapshot arrived since the previous frame
    pub fresh: bool,
    pub sensors: SensorReadings,
}

/// Menu machine bound to the shared state it reads and writes
pub struct Console<'a, M: RawMutex> {
    menu: MenuMachine,
    channels: &'a SharedChannelState<M>,
    live: &'a LiveConfig<M>,
}

impl<'a, M: RawMutex> Console<'a, M> {
    pub fn new(
        channels: &'a SharedChannelState<M>,
        live: &'a LiveConfig<M>,
        now_ms: u64,
    ) -> Self {
        Self {
            menu: MenuMachine::new(live.get(), now_ms),
            channels,
            live,
        }
    }

    pub fn screen(&self) -> UiScreen {
        self.menu.screen()
    }

    /// Apply a button press
    ///
    /// On commit the new configuration is made live for the producer and
    /// returned so the caller can persist it.
    pub fn handle_button(&mut self, event: ButtonEvent, now_ms: u64) -> Option<DeviceConfig> {
        match self.menu.handle(event, now_ms)? {
            MenuOutcome::CommitRequested(config) => {
                self.live.publish(config);
                Some(config)
            }
        }
    }

    /// Advance the slideshow and collect the frame to render
    pub fn tick(&mut self, now_ms: u64, sensors: SensorReadings) -> Dashboard {
        self.menu.tick(now_ms);

        let view = self.channels.consume();
        let link = self.channels.link();
        let status = LinkStatus::evaluate(link.up, view.received_at_ms, now_ms);
        let rgb = match view.data.as_slice() {
            [r, g, b, ..] => Some([*r, *g, *b]),
            _ => None,
        };

        Dashboard {
            screen: self.menu.screen(),
            config: *self.menu.config(),
            link,
            status,
            rgb,
            channel_count: view.len(),
            fresh: view.has_update,
            sensors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{MenuItem, StatusPage};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn test_dashboard_reflects_shared_state() {
        let channels = SharedChannelState::<NoopRawMutex>::new();
        let live = LiveConfig::<NoopRawMutex>::new(DeviceConfig::DEFAULT);
        let mut console = Console::new(&channels, &live, 0);

        let board = console.tick(100, SensorReadings::default());
        assert_eq!(board.status, LinkStatus::Down);
        assert_eq!(board.rgb, None);
        assert!(!board.fresh);

        channels.set_link(LinkReport {
            up: true,
            ip: Some([192, 168, 0, 100]),
        });
        channels.publish(&[255, 128, 0, 7], 150);

        let board = console.tick(200, SensorReadings::default());
        assert_eq!(board.status, LinkStatus::Active);
        assert_eq!(board.rgb, Some([255, 128, 0]));
        assert_eq!(board.channel_count, 4);
        assert!(board.fresh);

        let board = console.tick(2000, SensorReadings::default());
        assert_eq!(board.status, LinkStatus::Idle);
        assert!(!board.fresh);
        assert_eq!(board.screen, UiScreen::Status(StatusPage::Ip));
    }

    #[test]
    fn test_commit_publishes_live_config() {
        let channels = SharedChannelState::<NoopRawMutex>::new();
        let live = LiveConfig::<NoopRawMutex>::new(DeviceConfig::DEFAULT);
        let mut console = Console::new(&channels, &live, 0);

        assert_eq!(console.handle_button(ButtonEvent::Up, 0), None);
        assert_eq!(console.handle_button(ButtonEvent::Down, 0), None);
        assert_eq!(
            console.screen(),
            UiScreen::MainMenu {
                selected: MenuItem::Universe
            }
        );
        console.handle_button(ButtonEvent::Select, 0);
        console.handle_button(ButtonEvent::Down, 0);

        let saved = console.handle_button(ButtonEvent::Select, 0).unwrap();
        assert_eq!(saved.universe(), 128);
        assert_eq!(live.get(), saved);
        assert_eq!(live.snapshot().generation, 1);
    }
}
