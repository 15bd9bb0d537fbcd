use egui_macroquad::egui;
use ndarray::Array1;
use selfdrive::simulation::car::Car;

const OUTPUT_LABELS: [&str; 4] = ["↑", "←", "→", "↓"];

pub(super) fn draw_neural_network(ui: &mut egui::Ui, car: &Car) {
    let Some(brain) = car.brain() else {
        ui.label("This car has no brain.");
        return;
    };

    // Replay the last sensor inputs to get live values at every layer
    let inputs = car
        .last_inputs()
        .cloned()
        .unwrap_or_else(|| Array1::zeros(brain.input_count()));
    let layer_activations = brain.activations(&inputs);

    ui.label(format!("Layers: {:?}", brain.layer_sizes()));

    let width = 320.0;
    let height = 420.0;
    let (response, painter) = ui.allocate_painter(egui::vec2(width, height), egui::Sense::hover());
    let rect = response.rect;

    let layer_count = layer_activations.len();
    let layer_spacing = rect.height() / (layer_count as f32 + 1.0);

    // Layers run bottom (inputs) to top (outputs)
    let layer_y = |layer_idx: usize| rect.bottom() - layer_spacing * (layer_idx + 1) as f32;
    let neuron_x = |neuron_idx: usize, neuron_count: usize| {
        rect.left() + rect.width() * (neuron_idx as f32 + 1.0) / (neuron_count as f32 + 1.0)
    };

    // Draw connections first so neurons sit on top
    for (level_idx, level) in brain.levels().iter().enumerate() {
        let input_activations = &layer_activations[level_idx];
        let y1 = layer_y(level_idx);
        let y2 = layer_y(level_idx + 1);

        for in_idx in 0..level.input_count() {
            let x1 = neuron_x(in_idx, level.input_count());
            for out_idx in 0..level.output_count() {
                let x2 = neuron_x(out_idx, level.output_count());
                let weight = level.weights[[in_idx, out_idx]];
                let signal_strength = (input_activations[in_idx] * weight).abs().min(1.0);

                let base_alpha = (weight.abs().min(1.0) * 120.0) as u8;
                let alpha = base_alpha.max((signal_strength * 200.0) as u8);
                let color = weight_color(weight, alpha);

                painter.line_segment(
                    [egui::pos2(x1, y1), egui::pos2(x2, y2)],
                    egui::Stroke::new(0.8 + signal_strength * 2.0, color),
                );
            }
        }
    }

    // Draw neurons: fill shows the activation, ring shows the bias
    for (layer_idx, activations) in layer_activations.iter().enumerate() {
        let y = layer_y(layer_idx);
        let neuron_count = activations.len();
        let is_output_layer = layer_idx == layer_count - 1;

        for (neuron_idx, &activation) in activations.iter().enumerate() {
            let x = neuron_x(neuron_idx, neuron_count);
            let center = egui::pos2(x, y);

            let intensity = (activation.clamp(0.0, 1.0) * 255.0) as u8;
            painter.circle_filled(center, 8.0, egui::Color32::from_rgb(intensity, intensity, 0));

            if layer_idx > 0 {
                let bias = brain.levels()[layer_idx - 1].biases[neuron_idx];
                let ring = weight_color(bias, (bias.abs().min(1.0) * 255.0) as u8);
                painter.circle_stroke(center, 10.0, egui::Stroke::new(2.0, ring));
            } else {
                painter.circle_stroke(center, 8.0, egui::Stroke::new(1.0, egui::Color32::WHITE));
            }

            if is_output_layer {
                if let Some(label) = OUTPUT_LABELS.get(neuron_idx) {
                    painter.text(
                        center,
                        egui::Align2::CENTER_CENTER,
                        label,
                        egui::FontId::proportional(11.0),
                        egui::Color32::BLACK,
                    );
                }
            }
        }
    }
}

/// Yellow for positive values, blue for negative.
fn weight_color(value: f32, alpha: u8) -> egui::Color32 {
    if value > 0.0 {
        egui::Color32::from_rgba_unmultiplied(255, 255, 0, alpha)
    } else {
        egui::Color32::from_rgba_unmultiplied(0, 120, 255, alpha)
    }
}
