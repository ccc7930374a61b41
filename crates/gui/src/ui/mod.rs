pub mod control_panel;
pub mod notifications;
pub mod status_bar;
