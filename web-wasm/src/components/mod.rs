pub mod header;
pub mod settings_panel;
pub mod assignment_view;
pub mod error_panel;
pub mod convocation_panel;
pub mod scan_panel;
pub mod event_list;
