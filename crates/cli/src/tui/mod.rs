//! Full-screen ratatui front end for the terminal session.

pub mod action;
pub mod app;
mod confirm;
pub mod event;
mod scrollback;
mod settings_dialog;
mod status;
mod tab_bar;
pub mod theme;

pub use event::run_tui;
