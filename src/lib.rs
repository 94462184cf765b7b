//! AeroHelper: two small sprite tools built on eframe/egui.
//!
//! - [`color_converter`]: build an RGBA palette and remap an image to it with
//!   an external converter program.
//! - [`vertex_editor`]: author named polygons (collision bounds and the like)
//!   by clicking on an image.
//!
//! The data structures behind both tools ([`regions`], [`geometry`],
//! [`color_converter::palette`]) do not depend on a running UI and are usable
//! on their own.

pub mod color_converter;
pub mod geometry;
pub mod image_io;
pub mod logging;
pub mod regions;
pub mod settings;
pub mod vertex_editor;
pub mod widgets;
