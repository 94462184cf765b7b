use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use eframe::egui::{self, Color32, Context, Key, Modifiers, Pos2, RichText, Sense, Stroke};
use egui_extras::{Column, TableBuilder};
use rfd::FileDialog;
use tracing::{info, warn};

use super::controller::{EditorListener, VertexEditor};
use crate::geometry::Point;
use crate::image_io::{IMAGE_EXTENSIONS, LoadedImage};
use crate::settings::SettingsStore;
use crate::widgets;

const BACKGROUND_COLOR: Color32 = Color32::from_rgb(0xFF, 0x19, 0xB9);
const ADD_DIALOG_TITLE: &str = "Enter name of data set";
const ADD_DIALOG_DESC: &str = "A data set name can contain any character except for spaces\n\
    as any will be removed upon creation. Multiple data sets\n\
    can be created by separating the names with a semicolon (';').";

/// Mirrors editor events into the status line.
struct StatusListener {
    status: Rc<RefCell<String>>,
}

impl EditorListener for StatusListener {
    fn on_region_selected(&mut self, name: &str) {
        *self.status.borrow_mut() = format!("Editing '{name}'");
    }

    fn on_point_added(&mut self, region: &str, index: usize, point: Point) {
        *self.status.borrow_mut() = format!("{region}: point {index} at ({}, {})", point.x, point.y);
    }

    fn on_point_moved(&mut self, region: &str, index: usize, point: Point) {
        *self.status.borrow_mut() = format!("{region}: moved point {index} to ({}, {})", point.x, point.y);
    }
}

pub struct VertexEditorApp {
    editor: VertexEditor,
    image: Option<LoadedImage>,
    image_path: Option<PathBuf>,
    settings: SettingsStore,
    zoom: f32,
    status: Rc<RefCell<String>>,
    /// Text of the "add data set" prompt while it is open.
    name_prompt: Option<String>,
    errors: Vec<String>,
}

impl VertexEditorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: SettingsStore) -> Self {
        widgets::setup_theme(&cc.egui_ctx);
        let status = Rc::new(RefCell::new(String::from("Load an image to begin (Ctrl+L)")));
        let mut editor = VertexEditor::new(settings.settings.point_radius);
        editor.add_listener(Box::new(StatusListener { status: status.clone() }));
        Self {
            editor,
            image: None,
            image_path: None,
            settings,
            zoom: 1.0,
            status,
            name_prompt: None,
            errors: Vec::new(),
        }
    }

    fn set_status(&self, text: impl Into<String>) {
        *self.status.borrow_mut() = text.into();
    }

    fn action_open_image(&mut self) {
        let mut dialog = FileDialog::new().set_title("Open Image").add_filter("Images", IMAGE_EXTENSIONS);
        if let Some(dir) = &self.settings.settings.last_opened_dir {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.pick_file() else { return };
        match LoadedImage::open(&path) {
            Ok(img) => {
                info!(path = %path.display(), frames = img.frames.len(), "opened image");
                self.set_status(format!("Loaded {}", path.display()));
                self.image = Some(img);
                self.settings.settings.remember_dir_of(&path);
                self.settings.save();
                self.image_path = Some(path);
            }
            Err(e) => {
                warn!(path = %path.display(), "could not open image: {e}");
                self.errors.push(format!("Could not open {}:\n{e}", path.display()));
            }
        }
    }

    fn submit_names(&mut self, input: &str) {
        for res in self.editor.add_data_sets(input) {
            if let Err(e) = res {
                self.errors.push(format!(
                    "{e}\nYou can either clear that data set, or delete it and add it again."
                ));
            }
        }
    }

    fn action_copy_points(&self, ctx: &Context) {
        if let Some(text) = self.editor.selected_as_float_list() {
            ctx.output_mut(|o| o.copied_text = text);
            self.set_status("Copied points to clipboard");
        }
    }

    fn ui_menu(&mut self, ui: &mut egui::Ui, ctx: &Context) {
        ui.menu_button("File", |ui| {
            if ui.button("Load Image...  (Ctrl+L)").clicked() {
                ui.close_menu();
                self.action_open_image();
            }
            ui.separator();
            if ui.button("Quit  (Ctrl+Q)").clicked() {
                ui.close_menu();
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
        ui.separator();
        ui.label(RichText::new(self.status.borrow().as_str()).color(Color32::LIGHT_GRAY));
    }

    fn ui_data_sets(&mut self, ui: &mut egui::Ui, ctx: &Context) {
        let has_selection = self.editor.selected().is_some();
        ui.vertical_centered_justified(|ui| {
            if ui.button("Add New Data Set").clicked() {
                self.name_prompt = Some(String::new());
            }
            if ui.add_enabled(has_selection, egui::Button::new("Clear Selected Data Set")).clicked() {
                self.editor.clear_selected();
            }
            if ui.button("Clear All Data Sets").clicked() {
                self.editor.clear_all();
            }
            if ui.add_enabled(has_selection, egui::Button::new("Delete Selected Data Set")).clicked() {
                self.editor.delete_selected();
            }
            if ui.button("Delete All Data Sets").clicked() {
                self.editor.delete_all();
            }
            if ui.add_enabled(has_selection, egui::Button::new("Copy Points")).clicked() {
                self.action_copy_points(ctx);
            }
        });
        ui.separator();

        let mut clicked: Option<String> = None;
        egui::ScrollArea::vertical().id_source("data_set_list").max_height(200.0).show(ui, |ui| {
            for name in self.editor.regions().names() {
                let selected = self.editor.selected() == Some(name);
                if ui.selectable_label(selected, name).clicked() {
                    clicked = Some(name.to_owned());
                }
            }
        });
        if let Some(name) = clicked {
            self.editor.select(&name);
        }
        ui.separator();
        self.ui_point_table(ui);
    }

    fn ui_point_table(&self, ui: &mut egui::Ui) {
        let points = self.editor.selected_region().map(|r| r.points()).unwrap_or(&[]);
        let highlight = self.editor.table_highlight();
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::remainder())
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("X");
                });
                header.col(|ui| {
                    ui.strong("Y");
                });
            })
            .body(|body| {
                body.rows(18.0, points.len(), |mut row| {
                    let p = points[row.index()];
                    row.set_selected(highlight == Some(row.index()));
                    row.col(|ui| {
                        ui.label(p.x.to_string());
                    });
                    row.col(|ui| {
                        ui.label(p.y.to_string());
                    });
                });
            });
    }

    fn ui_canvas(&mut self, ui: &mut egui::Ui) {
        let Some(img) = &mut self.image else {
            ui.centered_and_justified(|ui| {
                ui.label("Load an image (Ctrl+L) to start placing points");
            });
            return;
        };

        let image_size = img.size() * self.zoom;
        let desired = ui.available_size().max(image_size);
        let (rect, response) = ui.allocate_exact_size(desired, Sense::click_and_drag());
        let image_rect = egui::Rect::from_center_size(rect.center(), image_size);
        let painter = ui.painter_at(rect);

        painter.rect_filled(rect, 0.0, BACKGROUND_COLOR);
        widgets::paint_checkerboard(&painter, image_rect, 8.0_f32.max(self.zoom));
        let tex = img.texture(ui.ctx(), "vertex_image");
        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        painter.image(tex.id(), image_rect, uv, Color32::WHITE);

        let zoom = self.zoom;
        let to_image = |p: Pos2| Point::new((p.x - image_rect.min.x) / zoom, (p.y - image_rect.min.y) / zoom);
        let to_screen = |p: &Point| image_rect.min + egui::vec2(p.x * zoom, p.y * zoom);

        // keep the handle size constant on screen
        let screen_radius = self.settings.settings.point_radius;
        self.editor.set_radius(screen_radius / zoom);

        let (latest, pressed, released) = ui.input(|i| {
            (i.pointer.latest_pos(), i.pointer.primary_pressed(), i.pointer.primary_released())
        });
        if let Some(pos) = latest {
            if response.hovered() || response.dragged() {
                if pressed {
                    self.editor.pointer_pressed(to_image(pos));
                }
                self.editor.pointer_moved(to_image(pos));
            }
        }
        if released {
            self.editor.pointer_released();
        }

        let Some(region) = self.editor.selected_region() else { return };
        let pts: Vec<Pos2> = region.points().iter().map(to_screen).collect();
        let stroke = Stroke::new(1.0, Color32::WHITE);
        for w in pts.windows(2) {
            painter.line_segment([w[0], w[1]], stroke);
        }
        if pts.len() >= 3 {
            painter.line_segment([pts[pts.len() - 1], pts[0]], stroke);
        }
        let hovered = self.editor.hovered();
        for (i, p) in pts.iter().enumerate() {
            let fill = if hovered == Some(i) { Color32::BLACK } else { Color32::WHITE };
            painter.circle(*p, screen_radius / 2.0 + 1.0, fill, Stroke::new(1.0, Color32::DARK_GRAY));
        }
    }

    fn ui_name_prompt(&mut self, ctx: &Context) {
        let Some(text) = &mut self.name_prompt else { return };
        let mut submit = false;
        let mut cancel = false;
        egui::Window::new(ADD_DIALOG_TITLE)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(ADD_DIALOG_DESC);
                ui.text_edit_singleline(text).request_focus();
                if ui.input(|i| i.key_pressed(Key::Enter)) {
                    submit = true;
                }
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        submit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });
        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            cancel = true;
        }
        if submit {
            if let Some(input) = self.name_prompt.take() {
                self.submit_names(&input);
            }
        } else if cancel {
            self.name_prompt = None;
        }
    }
}

impl eframe::App for VertexEditorApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| self.ui_menu(ui, ctx));
        });

        egui::SidePanel::right("data_sets").resizable(true).min_width(275.0).show(ctx, |ui| {
            self.ui_data_sets(ui, ctx);
        });

        egui::TopBottomPanel::bottom("view").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Zoom");
                ui.add(egui::Slider::new(&mut self.zoom, 0.25..=12.0).logarithmic(true));
                if let Some(img) = &mut self.image {
                    let count = img.frames.len();
                    if count > 1 {
                        ui.separator();
                        ui.add(egui::Slider::new(&mut img.current, 0..=count - 1).text("Frame"));
                    }
                }
                if let Some(path) = &self.image_path {
                    ui.separator();
                    ui.label(path.display().to_string());
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| self.ui_canvas(ui));
        });

        self.ui_name_prompt(ctx);
        if let Some(msg) = self.errors.first() {
            if widgets::error_window(ctx, msg) {
                self.errors.remove(0);
            }
        }

        if ctx.input(|i| i.modifiers == Modifiers::CTRL && i.key_pressed(Key::L)) {
            self.action_open_image();
        }
        if ctx.input(|i| i.modifiers == Modifiers::CTRL && i.key_pressed(Key::Q)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}
