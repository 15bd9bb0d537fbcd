use egui_macroquad::egui;
use selfdrive::simulation::world::World;

pub struct UIState {
    pub save_requested: bool,
    pub discard_requested: bool,
    pub reset_requested: bool,
    pub paused: bool,
    pub status_message: Option<String>,
}

impl UIState {
    pub fn new() -> Self {
        Self {
            save_requested: false,
            discard_requested: false,
            reset_requested: false,
            paused: false,
            status_message: None,
        }
    }
}

pub fn draw_ui(state: &mut UIState, world: &World) {
    egui_macroquad::ui(|egui_ctx| {
        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(egui::Color32::from_rgb(240, 240, 240));
        egui_ctx.set_visuals(visuals);

        draw_side_panel(egui_ctx, state, world);
    });
}

fn draw_side_panel(egui_ctx: &egui::Context, state: &mut UIState, world: &World) {
    egui::SidePanel::right("network_panel")
        .default_width(340.0)
        .show(egui_ctx, |ui| {
            ui.heading("Self-Driving Cars");

            ui.horizontal(|ui| {
                if ui.button("💾 Save").clicked() {
                    state.save_requested = true;
                }
                if ui.button("🗑 Discard").clicked() {
                    state.discard_requested = true;
                }
                if ui.button("🔄 Reset").clicked() {
                    state.reset_requested = true;
                }
                let pause_text = if state.paused { "▶ Resume" } else { "⏸ Pause" };
                if ui.button(pause_text).clicked() {
                    state.paused = !state.paused;
                }
            });

            if let Some(message) = &state.status_message {
                ui.label(message);
            }

            ui.separator();

            let damaged = world.cars.iter().filter(|car| car.is_damaged()).count();
            ui.label(format!("Tick: {}", world.tick));
            ui.label(format!("Cars: {} ({} damaged)", world.cars.len(), damaged));
            ui.label(format!("Traffic: {}", world.traffic.len()));

            let Some(best) = world.best_car() else {
                return;
            };
            ui.label(format!("Best distance: {:.0}", -best.pose.y));
            ui.label(format!("Best speed: {:.2}", best.pose.speed));

            ui.separator();
            super::nn::draw_neural_network(ui, best);
        });
}

pub fn process_egui() {
    egui_macroquad::draw();
}
