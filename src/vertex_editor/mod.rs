//! Sprite vertex editor: click on an image to author named polygons.

pub mod app;
pub mod controller;

pub use app::VertexEditorApp;
pub use controller::{DragState, EditorListener, VertexEditor, parse_names};
