// UI module - side panel with controls and the network diagram

mod nn;
mod ui;

pub use ui::{UIState, draw_ui, process_egui};
