//! End-to-end: button presses on the console change what the producer forwards

use crowdlight_core::bridge::Producer;
use crowdlight_core::config::DeviceConfig;
use crowdlight_core::console::Console;
use crowdlight_core::menu::ButtonEvent;
use crowdlight_core::shared::{LiveConfig, SharedChannelState};
use crowdlight_protocol::e131::{E131_HEADER_SIZE, PROPERTY_COUNT_OFFSET, UNIVERSE_OFFSET};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;

fn datagram(universe: u16, channels: &[u8]) -> Vec<u8> {
    let mut packet = vec![0u8; E131_HEADER_SIZE];
    packet[UNIVERSE_OFFSET..UNIVERSE_OFFSET + 2].copy_from_slice(&universe.to_be_bytes());
    let count = (channels.len() + 1) as u16;
    packet[PROPERTY_COUNT_OFFSET..PROPERTY_COUNT_OFFSET + 2].copy_from_slice(&count.to_be_bytes());
    packet.extend_from_slice(channels);
    packet
}

#[test]
fn led_count_commit_changes_forwarded_length() {
    let channels = SharedChannelState::<NoopRawMutex>::new();
    let live = LiveConfig::<NoopRawMutex>::new(DeviceConfig::DEFAULT);
    let mut producer = Producer::new(&channels, &live);
    let mut console = Console::new(&channels, &live, 0);

    let full: Vec<u8> = (0..512).map(|i| i as u8).collect();
    let packet = datagram(129, &full);
    assert_eq!(producer.handle(&packet, 0).unwrap().payload().len(), 30);

    // Slideshow -> menu, down to "Set LED Count", open editor
    let mut saves = Vec::new();
    let presses = [ButtonEvent::Select, ButtonEvent::Down, ButtonEvent::Down, ButtonEvent::Select]
        .into_iter()
        .chain(std::iter::repeat(ButtonEvent::Up).take(40))
        .chain([ButtonEvent::Select]);
    for event in presses {
        if let Some(config) = console.handle_button(event, 0) {
            saves.push(config);
        }
    }

    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].num_leds(), 50);

    let frame = producer.handle(&packet, 1).unwrap();
    assert_eq!(frame.payload(), &full[..150]);

    let short = datagram(129, &full[..90]);
    assert_eq!(producer.handle(&short, 2).unwrap().payload().len(), 90);
}

#[test]
fn universe_commit_retargets_producer() {
    let channels = SharedChannelState::<NoopRawMutex>::new();
    let live = LiveConfig::<NoopRawMutex>::new(DeviceConfig::DEFAULT);
    let mut producer = Producer::new(&channels, &live);
    let mut console = Console::new(&channels, &live, 0);

    let packet = datagram(130, &[1, 2, 3]);
    assert!(producer.handle(&packet, 0).is_err());

    for event in [
        ButtonEvent::Right,
        ButtonEvent::Down,
        ButtonEvent::Select,
        ButtonEvent::Up,
    ] {
        assert_eq!(console.handle_button(event, 0), None);
    }
    let saved = console.handle_button(ButtonEvent::Select, 0);
    assert_eq!(saved.map(|c| c.universe()), Some(130));

    assert!(producer.handle(&packet, 1).is_ok());
    assert!(console.tick(1, Default::default()).fresh);
}
