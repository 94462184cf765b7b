//! Palette editor that hands an image and a list of colors to an external
//! converter program and previews the result.

pub mod app;
pub mod color;
pub mod converter;
pub mod palette;

pub use app::ColorConvertApp;
pub use color::Color;
pub use converter::{ConvertError, ConvertRequest};
pub use palette::{ColorList, EmbeddedPalettes, PaletteError};
