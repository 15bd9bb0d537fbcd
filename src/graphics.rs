use geo::Coord;
use macroquad::prelude::*;
use selfdrive::simulation::car::Car;
use selfdrive::simulation::controls::ControlType;
use selfdrive::simulation::road::Road;
use selfdrive::simulation::world::World;

/// Fraction of the screen height at which the followed car is drawn.
const FOLLOW_HEIGHT: f32 = 0.7;
const DASH_LENGTH: f32 = 20.0;

/// Maps world coordinates to the screen, following a car along the road.
pub struct View {
    offset_x: f32,
    offset_y: f32,
}

impl View {
    pub fn following(world: &World) -> Self {
        let focus_y = world.best_car().map_or(0.0, |car| car.pose.y);
        Self {
            offset_x: 20.0 - world.road.left,
            offset_y: screen_height() * FOLLOW_HEIGHT - focus_y,
        }
    }

    fn top(&self) -> f32 {
        -self.offset_y
    }

    fn bottom(&self) -> f32 {
        screen_height() - self.offset_y
    }
}

trait ToScreen {
    fn to_screen(&self, view: &View) -> Vec2;
}

impl ToScreen for Coord<f32> {
    fn to_screen(&self, view: &View) -> Vec2 {
        vec2(self.x + view.offset_x, self.y + view.offset_y)
    }
}

pub fn draw_world(world: &World, view: &View) {
    draw_road(&world.road, view);

    for (i, car) in world.traffic.iter().enumerate() {
        draw_car(car, traffic_color(i), view);
    }

    let best = selfdrive::simulation::evolution::best_car_index(&world.cars);
    for (i, car) in world.cars.iter().enumerate() {
        if Some(i) != best {
            draw_car(car, Color::from_rgba(0, 80, 255, 50), view);
        }
    }
    if let Some(car) = best.map(|i| &world.cars[i]) {
        draw_sensor(car, view);
        let color = match car.control_type {
            ControlType::Keys => Color::from_rgba(220, 40, 40, 255),
            _ => Color::from_rgba(0, 80, 255, 255),
        };
        draw_car(car, color, view);
    }
}

fn draw_road(road: &Road, view: &View) {
    let top_left = Coord { x: road.left, y: view.top() }.to_screen(view);
    draw_rectangle(top_left.x, top_left.y, road.width, screen_height(), DARKGRAY);

    // dashes are anchored to world y so they scroll with the road
    let first_dash = (view.top() / (2.0 * DASH_LENGTH)).floor() * 2.0 * DASH_LENGTH;
    for x in road.lane_dividers() {
        let mut y = first_dash;
        while y < view.bottom() {
            let start = Coord { x, y }.to_screen(view);
            let end = Coord { x, y: y + DASH_LENGTH }.to_screen(view);
            draw_line(start.x, start.y, end.x, end.y, 5.0, WHITE);
            y += 2.0 * DASH_LENGTH;
        }
    }

    for border in road.borders() {
        let x = border.start.x + view.offset_x;
        draw_line(x, 0.0, x, screen_height(), 5.0, WHITE);
    }
}

fn draw_car(car: &Car, color: Color, view: &View) {
    let color = if car.is_damaged() {
        Color::new(0.5, 0.5, 0.5, color.a)
    } else {
        color
    };
    let corners: Vec<Vec2> = car.polygon().iter().map(|p| p.to_screen(view)).collect();
    if let &[a, b, c, d] = corners.as_slice() {
        draw_triangle(a, b, c, color);
        draw_triangle(a, c, d, color);
    }
}

fn draw_sensor(car: &Car, view: &View) {
    let Some(sensor) = car.sensor() else {
        return;
    };
    for (ray, reading) in sensor.rays().iter().zip(sensor.readings()) {
        let start = ray.start.to_screen(view);
        let end = ray.end.to_screen(view);
        let hit = reading.map_or(end, |touch| touch.point.to_screen(view));
        draw_line(start.x, start.y, hit.x, hit.y, 2.0, YELLOW);
        draw_line(hit.x, hit.y, end.x, end.y, 2.0, BLACK);
    }
}

fn traffic_color(index: usize) -> Color {
    let hue = (290.0 + index as f32 * 47.0) % 360.0 / 360.0;
    macroquad::color::hsl_to_rgb(hue, 1.0, 0.6)
}
