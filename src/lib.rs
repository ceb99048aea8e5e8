//! Personal expense tracking with Vietnamese voice entry.
//!
//! The text-processing core is [`voice::parse_voice_input`] and the
//! [`suggest`] engine; [`store::Ledger`] owns persistence and the `cli`
//! module is the command-line front end.

pub mod cli;
pub mod db;
pub mod error;
pub mod fmt;
pub mod icons;
pub mod models;
pub mod reports;
pub mod settings;
pub mod store;
pub mod suggest;
pub mod voice;
