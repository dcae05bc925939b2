// src/lib.rs

pub mod config;
pub mod fetch;
pub mod locale;
pub mod locate;
pub mod lookup;
pub mod prefs;
pub mod present;
pub mod record;

pub use config::Config;
pub use locate::{locate, locate_with};
pub use lookup::{FetchError, Lookup, Outcome};
pub use record::{Record, Score, Subject};
