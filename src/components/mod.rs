pub mod event_log;
pub mod header;
pub mod help;
pub mod owner_panel;
pub mod status_bar;
