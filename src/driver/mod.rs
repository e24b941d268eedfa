//! Terminal front end standing in for the controller and the line display.

mod cli;

pub use self::cli::{DriverSettings, KeyLatch, TerminalDriver, is_exit_key, key_to_button};
