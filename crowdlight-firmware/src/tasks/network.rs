//! E1.31 receive task (core0)
//!
//! Owns the UDP socket and the producer side of the shared state. Each
//! datagram is validated, framed for the radio and published for the
//! console; the frame itself goes to the radio task through `RADIO_OUT`.

use defmt::*;
use embassy_net::udp::{PacketMetadata, UdpSocket};
use embassy_net::Stack;
use embassy_time::{with_timeout, Duration, Instant, Timer};

use crowdlight_core::bridge::{DropReason, Producer};
use crowdlight_core::retry::Backoff;
use crowdlight_core::status::LinkReport;
use crowdlight_protocol::e131::E131_MAX_PACKET_SIZE;

use crate::board;
use crate::channels::{CHANNELS, LIVE_CONFIG, RADIO_OUT};

/// Datagrams the socket may hold while the producer is busy
const RX_QUEUE_DEPTH: usize = 4;

/// Socket buffer; a few full-size E1.31 packets
const RX_BUFFER_SIZE: usize = RX_QUEUE_DEPTH * E131_MAX_PACKET_SIZE;

/// Current link state as the UI should see it
fn link_report(stack: Stack<'_>) -> LinkReport {
    if !stack.is_link_up() {
        return LinkReport::DOWN;
    }
    LinkReport {
        up: true,
        ip: stack.config_v4().map(|cfg| cfg.address.address().octets()),
    }
}

/// E1.31 producer loop
#[embassy_executor::task]
pub async fn network_task(stack: Stack<'static>) {
    info!("Network task started");

    let mut rx_meta = [PacketMetadata::EMPTY; RX_QUEUE_DEPTH];
    let mut rx_buffer = [0u8; RX_BUFFER_SIZE];
    let mut tx_meta = [PacketMetadata::EMPTY; 1];
    let mut tx_buffer = [0u8; 64];
    let mut socket = UdpSocket::new(
        stack,
        &mut rx_meta,
        &mut rx_buffer,
        &mut tx_meta,
        &mut tx_buffer,
    );

    let mut backoff = Backoff::new(board::RETRY_INITIAL_MS, board::RETRY_MAX_MS);
    while let Err(e) = socket.bind(board::UDP_PORT) {
        let delay = backoff.next_delay();
        warn!("Failed to bind UDP port {}: {:?}, retrying in {} ms", board::UDP_PORT, e, delay);
        Timer::after(Duration::from_millis(delay)).await;
    }
    info!("Listening for E1.31 on UDP {}", board::UDP_PORT);

    let mut producer = Producer::new(&CHANNELS, &LIVE_CONFIG);
    let mut datagram = [0u8; E131_MAX_PACKET_SIZE];
    let mut last_link: Option<LinkReport> = None;
    let mut stats_since = Instant::now();
    let stats_interval = Duration::from_secs(board::STATS_INTERVAL_S);
    let rx_timeout = Duration::from_millis(board::RX_TIMEOUT_MS);

    loop {
        if let Some(config) = producer.reconfigured() {
            info!(
                "Reconfigured: universe {}, {} LEDs",
                config.universe(),
                config.num_leds()
            );
        }

        let link = link_report(stack);
        if last_link != Some(link) {
            CHANNELS.set_link(link);
            match (link.up, link.ip) {
                (true, Some([a, b, c, d])) => info!("Ethernet up, IP {}.{}.{}.{}", a, b, c, d),
                (true, None) => info!("Ethernet up, waiting for address"),
                (false, _) => warn!("Ethernet link down"),
            }
            last_link = Some(link);
        }

        if !link.up {
            Timer::after(Duration::from_millis(board::LINK_DOWN_BACKOFF_MS)).await;
            continue;
        }

        match with_timeout(rx_timeout, socket.recv_from(&mut datagram)).await {
            Ok(Ok((len, _meta))) => {
                let now_ms = Instant::now().as_millis();
                match producer.handle(&datagram[..len], now_ms) {
                    Ok(frame) => RADIO_OUT.signal(frame),
                    Err(DropReason::Rejected(rejection)) if rejection.is_expected() => {
                        trace!("Ignoring datagram: {:?}", rejection);
                    }
                    Err(reason) => debug!("Dropped datagram ({} bytes): {:?}", len, reason),
                }
            }
            Ok(Err(e)) => debug!("UDP receive error: {:?}", e),
            Err(_) => {}
        }

        if stats_since.elapsed() >= stats_interval {
            let stats = producer.take_stats();
            debug!(
                "E1.31: {} received, {} forwarded, {} other universe, {} malformed",
                stats.received, stats.forwarded, stats.universe_mismatch, stats.malformed
            );
            stats_since = Instant::now();
        }
    }
}
