use eframe::egui::{self, Color32, Rect, Sense, Stroke};

pub fn setup_theme(ctx: &egui::Context) {
    ctx.set_visuals(egui::Visuals::dark());
}

pub fn window_title(tool: &str) -> String {
    format!("AeroHelper {tool} | Ver: {}", env!("CARGO_PKG_VERSION"))
}

/// Checkerboard behind an image so transparent pixels stay visible.
pub fn paint_checkerboard(painter: &egui::Painter, rect: Rect, square: f32) {
    let dark = Color32::from_gray(60);
    let light = Color32::from_gray(90);
    let mut y = rect.top();
    let mut row = 0;
    while y < rect.bottom() {
        let mut x = rect.left();
        let mut col = 0;
        while x < rect.right() {
            let r = Rect::from_min_size(egui::pos2(x, y), egui::vec2(square, square));
            let c = if (col + row) % 2 == 0 { light } else { dark };
            painter.rect_filled(r.intersect(rect), 0.0, c);
            x += square;
            col += 1;
        }
        y += square;
        row += 1;
    }
}

/// A 15x15 color swatch with a black border, for palette rows.
pub fn color_swatch(ui: &mut egui::Ui, color: Color32) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(15.0, 15.0), Sense::hover());
    let painter = ui.painter();
    paint_checkerboard(painter, rect, 5.0);
    painter.rect_filled(rect, 0.0, color);
    painter.rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::BLACK));
    response
}

/// Modal-ish error window; returns true once the user dismissed it.
pub fn error_window(ctx: &egui::Context, message: &str) -> bool {
    let mut dismissed = false;
    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(message);
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
    dismissed
}
