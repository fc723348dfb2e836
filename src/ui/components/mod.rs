pub mod alert_modal;
pub mod input_panel;
pub mod tag_grid;
