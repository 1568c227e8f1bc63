//! Build script for crowdlight-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates device.toml and generates `board_config.rs` from it

use std::env;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Baud rates the HC-12 firmware accepts via AT+Bxxxx
const HC12_BAUD_RATES: [i64; 8] = [1200, 2400, 4800, 9600, 19200, 38400, 57600, 115200];

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    setup_linker(&out_dir);
    generate_board_config(&out_dir);
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate device.toml and write constants to OUT_DIR/board_config.rs
fn generate_board_config(out_dir: &Path) {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");
    if !config_path.exists() {
        fail("device.toml not found", &["The firmware requires a device.toml in crowdlight-firmware/".to_string()]);
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read device.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in device.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    let mut out = String::from("// Generated from device.toml by build.rs\n\n");

    // [network]
    let mac = mac_address(&config, &mut errors);
    let _ = writeln!(
        out,
        "/// W5500 MAC address\npub const MAC_ADDRESS: [u8; 6] = {:?};",
        mac
    );
    let port = integer(&config, "network", "udp_port", 1, 65535, &mut errors);
    let _ = writeln!(out, "/// E1.31 UDP port\npub const UDP_PORT: u16 = {};", port);
    emit_u64(&mut out, &config, "network", "link_down_backoff_ms", "LINK_DOWN_BACKOFF_MS", 1, 10_000, &mut errors);
    emit_u64(&mut out, &config, "network", "rx_timeout_ms", "RX_TIMEOUT_MS", 1, 10_000, &mut errors);
    emit_u64(&mut out, &config, "network", "stats_interval_s", "STATS_INTERVAL_S", 1, 3600, &mut errors);
    emit_u64(&mut out, &config, "network", "retry_initial_ms", "RETRY_INITIAL_MS", 10, 60_000, &mut errors);
    emit_u64(&mut out, &config, "network", "retry_max_ms", "RETRY_MAX_MS", 10, 600_000, &mut errors);

    // [radio]
    let baud = integer(&config, "radio", "baud", 1200, 115200, &mut errors);
    if !HC12_BAUD_RATES.contains(&baud) {
        errors.push(format!(
            "[radio] baud {} is not an HC-12 rate {:?}",
            baud, HC12_BAUD_RATES
        ));
    }
    let _ = writeln!(out, "/// HC-12 UART baud rate\npub const RADIO_BAUD: u32 = {};", baud);
    emit_u64(&mut out, &config, "radio", "probe_settle_ms", "RADIO_PROBE_SETTLE_MS", 1, 5_000, &mut errors);
    emit_u64(&mut out, &config, "radio", "probe_timeout_ms", "RADIO_PROBE_TIMEOUT_MS", 1, 5_000, &mut errors);
    emit_u64(&mut out, &config, "radio", "resume_settle_ms", "RADIO_RESUME_SETTLE_MS", 1, 5_000, &mut errors);

    // [ui]
    emit_u64(&mut out, &config, "ui", "tick_ms", "UI_TICK_MS", 10, 1_000, &mut errors);
    emit_u64(&mut out, &config, "ui", "button_poll_ms", "BUTTON_POLL_MS", 5, 500, &mut errors);
    emit_u64(&mut out, &config, "ui", "boot_splash_ms", "BOOT_SPLASH_MS", 0, 10_000, &mut errors);
    emit_u64(&mut out, &config, "ui", "sensor_interval_ms", "SENSOR_INTERVAL_MS", 100, 60_000, &mut errors);

    if !errors.is_empty() {
        fail("Invalid device.toml", &errors);
    }

    fs::write(out_dir.join("board_config.rs"), out).unwrap();
}

fn mac_address(config: &toml::Value, errors: &mut Vec<String>) -> [u8; 6] {
    let mut mac = [0u8; 6];
    match config.get("network").and_then(|n| n.get("mac")) {
        Some(toml::Value::Array(bytes)) if bytes.len() == 6 => {
            for (i, byte) in bytes.iter().enumerate() {
                match byte.as_integer() {
                    Some(b) if (0..=255).contains(&b) => mac[i] = b as u8,
                    _ => errors.push(format!("[network] mac[{}] must be 0-255", i)),
                }
            }
            if mac[0] & 0x01 != 0 {
                errors.push("[network] mac must be unicast (first byte even)".to_string());
            }
        }
        Some(_) => errors.push("[network] mac must be an array of 6 bytes".to_string()),
        None => errors.push("[network] missing 'mac'".to_string()),
    }
    mac
}

fn integer(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> i64 {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => *v,
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
            min
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            min
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            min
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn emit_u64(
    out: &mut String,
    config: &toml::Value,
    section: &str,
    key: &str,
    name: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    let value = integer(config, section, key, min, max, errors);
    let _ = writeln!(out, "/// [{}] {}\npub const {}: u64 = {};", section, key, name, value);
}

/// Abort the build with a boxed error report
fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.chars().count() > 62 {
                format!("{}...", line.chars().take(59).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}
