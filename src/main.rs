#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
use std::path::PathBuf;

use aerohelper::color_converter::ColorConvertApp;
use aerohelper::settings::{Settings, SettingsStore};
use aerohelper::vertex_editor::VertexEditorApp;
use aerohelper::{logging, widgets};
use clap::{Parser, ValueEnum};
use eframe::{NativeOptions, egui};
use tracing::info;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Tool {
    /// Palette editor driving the external color converter
    Color,
    /// Polygon editor for sprite images
    Vertex,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Sprite palette converter and vertex editor", long_about = None)]
struct Cli {
    /// Which tool window to open
    #[arg(value_enum, default_value_t = Tool::Color)]
    tool: Tool,

    /// Settings file (defaults to the user config directory)
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let settings = SettingsStore::load(cli.settings.or_else(Settings::default_path));
    let (title, size) = match cli.tool {
        Tool::Color => (widgets::window_title("Color Converter"), [900.0, 600.0]),
        Tool::Vertex => (widgets::window_title("Vertex Editor"), [1100.0, 720.0]),
    };
    info!(tool = ?cli.tool, "starting");

    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(size).with_title(&title),
        ..Default::default()
    };
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc: &eframe::CreationContext<'_>| -> Box<dyn eframe::App> {
            match cli.tool {
                Tool::Color => Box::new(ColorConvertApp::new(cc, settings)),
                Tool::Vertex => Box::new(VertexEditorApp::new(cc, settings)),
            }
        }),
    )
}
