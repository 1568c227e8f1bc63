//! Embassy async tasks
//!
//! core0 runs the network, radio and flash tasks; core1 runs the UI and
//! button tasks. They meet only through the statics in `crate::channels`.

pub mod buttons;
pub mod config_save;
pub mod ethernet;
pub mod network;
pub mod radio_tx;
pub mod ui;

pub use buttons::buttons_task;
pub use config_save::config_save_task;
pub use ethernet::{ethernet_task, net_stack_task, EthernetSpi};
pub use network::network_task;
pub use radio_tx::radio_tx_task;
pub use ui::{ui_task, Oled};
