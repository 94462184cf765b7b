use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use eframe::egui::{self, Color32, Context, Key, Modifiers, RichText};
use eframe::egui::color_picker::{self, Alpha};
use eframe::egui::ecolor::Hsva;
use rfd::FileDialog;
use tracing::{info, warn};

use super::color::Color;
use super::converter::ConvertRequest;
use super::palette::{ColorList, EmbeddedPalettes};
use crate::image_io::{IMAGE_EXTENSIONS, LoadedImage};
use crate::settings::SettingsStore;
use crate::widgets;

/// Color picker state: `row` is `None` while adding a new color.
struct PickerState {
    row: Option<usize>,
    hsva: Hsva,
}

impl PickerState {
    fn new(row: Option<usize>, color: Color) -> Self {
        Self { row, hsva: Hsva::from_srgba_unmultiplied(color.to_array()) }
    }

    fn color(&self) -> Color {
        Color::from_array(self.hsva.to_srgba_unmultiplied())
    }
}

pub struct ColorConvertApp {
    palette: ColorList,
    selected: BTreeSet<usize>,
    picker: Option<PickerState>,
    presets: Vec<(String, ColorList)>,
    source: Option<(PathBuf, LoadedImage)>,
    converted: Option<(PathBuf, LoadedImage)>,
    settings: SettingsStore,
    status: String,
    errors: Vec<String>,
}

impl ColorConvertApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: SettingsStore) -> Self {
        widgets::setup_theme(&cc.egui_ctx);
        Self {
            palette: ColorList::new(),
            selected: BTreeSet::new(),
            picker: None,
            presets: EmbeddedPalettes::presets(),
            source: None,
            converted: None,
            settings,
            status: "Open an image and build a palette".into(),
            errors: Vec::new(),
        }
    }

    fn file_dialog(&self) -> FileDialog {
        let dialog = FileDialog::new();
        match &self.settings.settings.last_opened_dir {
            Some(dir) => dialog.set_directory(dir),
            None => dialog,
        }
    }

    fn remember(&mut self, path: &Path) {
        self.settings.settings.remember_dir_of(path);
        self.settings.save();
    }

    fn action_open_image(&mut self) {
        let Some(path) = self.file_dialog().add_filter("Images", IMAGE_EXTENSIONS).pick_file() else {
            return;
        };
        match LoadedImage::open(&path) {
            Ok(img) => {
                info!(path = %path.display(), "opened image");
                self.status = format!("Loaded {}", path.display());
                self.remember(&path);
                self.source = Some((path, img));
                self.converted = None;
            }
            Err(e) => self.errors.push(format!("Could not open {}:\n{e}", path.display())),
        }
    }

    fn action_import_palette(&mut self) {
        let Some(path) = self
            .file_dialog()
            .add_filter("Palettes", &["hex", "txt", "pal"])
            .pick_file()
        else {
            return;
        };
        match ColorList::load(&path) {
            Ok(list) => {
                self.status = format!("Imported {} colors from {}", list.len(), path.display());
                self.set_palette(list);
                self.remember(&path);
            }
            Err(e) => self.errors.push(format!("Could not import {}:\n{e}", path.display())),
        }
    }

    fn action_export_palette(&mut self) {
        let Some(path) = self
            .file_dialog()
            .add_filter("Hex palette", &["hex"])
            .set_file_name("palette.hex")
            .save_file()
        else {
            return;
        };
        match self.palette.save_hex(&path) {
            Ok(()) => self.status = format!("Saved palette to {}", path.display()),
            Err(e) => self.errors.push(format!("Could not save {}:\n{e}", path.display())),
        }
    }

    fn set_palette(&mut self, list: ColorList) {
        self.palette = list;
        self.selected.clear();
        self.picker = None;
    }

    fn delete_selected(&mut self) {
        let rows: Vec<usize> = self.selected.iter().copied().collect();
        self.palette.remove_rows(&rows);
        self.selected.clear();
    }

    fn action_convert(&mut self) {
        let Some((input, _)) = &self.source else {
            self.status = "Open an image first".into();
            return;
        };
        let req = ConvertRequest::new(
            self.settings.settings.converter_program.clone(),
            input,
            self.palette.clone(),
        );
        match req.run() {
            Ok(out) => match LoadedImage::open(&out) {
                Ok(img) => {
                    self.status = format!("Converted image written to {}", out.display());
                    self.converted = Some((out, img));
                }
                Err(e) => self.errors.push(format!("Could not open converted image:\n{e}")),
            },
            Err(e) => {
                warn!("conversion failed: {e}");
                self.errors.push(e.to_string());
            }
        }
    }

    fn ui_menu(&mut self, ui: &mut egui::Ui, ctx: &Context) {
        ui.menu_button("File", |ui| {
            if ui.button("Open Image...  (Ctrl+O)").clicked() {
                ui.close_menu();
                self.action_open_image();
            }
            ui.separator();
            if ui.button("Import Palette...").clicked() {
                ui.close_menu();
                self.action_import_palette();
            }
            if ui.add_enabled(!self.palette.is_empty(), egui::Button::new("Export Palette...")).clicked() {
                ui.close_menu();
                self.action_export_palette();
            }
            let mut chosen: Option<ColorList> = None;
            ui.menu_button("Built-in Palettes", |ui| {
                for (name, list) in &self.presets {
                    if ui.button(name.as_str()).clicked() {
                        chosen = Some(list.clone());
                        ui.close_menu();
                    }
                }
            });
            if let Some(list) = chosen {
                self.set_palette(list);
            }
            ui.separator();
            if ui.button("Quit  (Ctrl+Q)").clicked() {
                ui.close_menu();
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
        ui.separator();
        ui.label(RichText::new(&self.status).color(Color32::LIGHT_GRAY));
    }

    fn ui_palette(&mut self, ui: &mut egui::Ui) {
        ui.heading("Palette");
        ui.horizontal(|ui| {
            if ui.button("Add Color").clicked() {
                self.picker = Some(PickerState::new(None, Color::WHITE));
            }
            if ui.add_enabled(!self.selected.is_empty(), egui::Button::new("Delete Color")).clicked() {
                self.delete_selected();
            }
        });
        ui.separator();

        let ctrl = ui.input(|i| i.modifiers.command);
        let mut clicked: Option<usize> = None;
        let mut edit: Option<usize> = None;
        egui::ScrollArea::vertical().id_source("palette_list").show(ui, |ui| {
            for (row, color) in self.palette.iter().enumerate() {
                ui.horizontal(|ui| {
                    widgets::color_swatch(ui, color.to_color32());
                    let resp = ui
                        .selectable_label(self.selected.contains(&row), color.hex())
                        .on_hover_text(color.tooltip());
                    if resp.double_clicked() {
                        edit = Some(row);
                    } else if resp.clicked() {
                        clicked = Some(row);
                    }
                });
            }
        });
        if let Some(row) = clicked {
            if !ctrl {
                self.selected.clear();
                self.selected.insert(row);
            } else if !self.selected.remove(&row) {
                self.selected.insert(row);
            }
        }
        if let Some(row) = edit {
            if let Some(color) = self.palette.get(row) {
                self.picker = Some(PickerState::new(Some(row), color));
            }
        }
    }

    fn ui_picker(&mut self, ctx: &Context) {
        let Some(picker) = &mut self.picker else { return };
        let mut done = false;
        let mut cancel = false;
        let title = if picker.row.is_some() { "Edit Color" } else { "Add Color" };
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                color_picker::color_picker_hsva_2d(ui, &mut picker.hsva, Alpha::OnlyBlend);
                ui.label(picker.color().hex());
                ui.horizontal(|ui| {
                    done = ui.button("OK").clicked();
                    cancel = ui.button("Cancel").clicked();
                });
            });
        if done {
            let color = picker.color();
            match picker.row {
                Some(row) => {
                    self.palette.set(row, color);
                }
                None => {
                    self.palette.push(color);
                }
            }
            self.picker = None;
        } else if cancel {
            self.picker = None;
        }
    }

    fn ui_preview(ui: &mut egui::Ui, title: &str, image: &mut Option<(PathBuf, LoadedImage)>, width: f32) {
        ui.vertical(|ui| {
            ui.strong(title);
            let Some((path, img)) = image else {
                ui.label("(none)");
                return;
            };
            ui.label(path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default());
            let size = img.size();
            let scale = (width / size.x.max(1.0)).min(8.0);
            let (rect, _) = ui.allocate_exact_size(size * scale, egui::Sense::hover());
            widgets::paint_checkerboard(ui.painter(), rect, 8.0);
            let tex = img.texture(ui.ctx(), title);
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            ui.painter().image(tex.id(), rect, uv, Color32::WHITE);
        });
    }
}

impl eframe::App for ColorConvertApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| self.ui_menu(ui, ctx));
        });

        egui::SidePanel::left("palette").resizable(true).default_width(220.0).show(ctx, |ui| {
            self.ui_palette(ui);
        });

        egui::TopBottomPanel::bottom("convert").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Converter");
                let resp = ui.text_edit_singleline(&mut self.settings.settings.converter_program);
                if resp.lost_focus() {
                    self.settings.save();
                }
                let ready = self.source.is_some() && !self.palette.is_empty();
                if ui.add_enabled(ready, egui::Button::new("Convert")).clicked() {
                    self.action_convert();
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                let width = (ui.available_width() / 2.0 - 16.0).max(64.0);
                ui.horizontal_top(|ui| {
                    Self::ui_preview(ui, "Original", &mut self.source, width);
                    ui.separator();
                    Self::ui_preview(ui, "Converted", &mut self.converted, width);
                });
            });
        });

        self.ui_picker(ctx);
        if let Some(msg) = self.errors.first() {
            if widgets::error_window(ctx, msg) {
                self.errors.remove(0);
            }
        }

        let no_popup = self.picker.is_none() && self.errors.is_empty();
        if no_popup && ctx.input(|i| i.key_pressed(Key::Delete)) && !ctx.wants_keyboard_input() {
            self.delete_selected();
        }
        if ctx.input(|i| i.modifiers == Modifiers::CTRL && i.key_pressed(Key::O)) {
            self.action_open_image();
        }
        if ctx.input(|i| i.modifiers == Modifiers::CTRL && i.key_pressed(Key::Q)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}
