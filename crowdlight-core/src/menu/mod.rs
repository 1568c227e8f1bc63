//! On-device menu
//!
//! Status slideshow, main menu, and numeric editors, driven by debounced
//! button events and a slideshow timer. The machine performs no I/O: a
//! commit is returned to the caller as [`MenuOutcome::CommitRequested`].

pub mod events;
pub mod machine;
pub mod screen;

pub use events::{ButtonEvent, MenuOutcome};
pub use machine::{MenuMachine, SLIDESHOW_INTERVAL_MS};
pub use screen::{EditField, MenuItem, StatusPage, UiScreen};
