use std::path::Path;

use rust_embed::RustEmbed;
use thiserror::Error;
use tracing::{debug, warn};

use super::color::Color;

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("failed to read palette: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: '{text}' is not a color")]
    BadLine { line: usize, text: String },
    #[error("PAL file too short: {0} bytes, expected 768")]
    ShortPal(usize),
    #[error("unsupported palette extension '{0}'")]
    UnsupportedExtension(String),
}

/// The user's palette, in the order colors were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorList {
    colors: Vec<Color>,
}

impl ColorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_colors(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<Color> {
        self.colors.get(row).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Color> + '_ {
        self.colors.iter()
    }

    pub fn push(&mut self, color: Color) -> usize {
        self.colors.push(color);
        self.colors.len() - 1
    }

    /// Inserts at `row`, clamped to the end of the list.
    pub fn insert(&mut self, row: usize, color: Color) {
        let row = row.min(self.colors.len());
        self.colors.insert(row, color);
    }

    pub fn set(&mut self, row: usize, color: Color) -> bool {
        match self.colors.get_mut(row) {
            Some(c) => {
                *c = color;
                true
            }
            None => false,
        }
    }

    /// Removes every row in `rows`; duplicates and out-of-range rows are ignored.
    pub fn remove_rows(&mut self, rows: &[usize]) {
        let mut rows = rows.to_vec();
        rows.sort_unstable();
        rows.dedup();
        // highest first so the remaining indices stay valid
        for row in rows.into_iter().rev() {
            if row < self.colors.len() {
                self.colors.remove(row);
            }
        }
    }

    /// Space-delimited hex codes of every color, empty for an empty palette.
    pub fn to_hex_string(&self) -> String {
        self.colors.iter().map(Color::hex).collect::<Vec<_>>().join(" ")
    }

    /// Parses a `.hex` palette: one color per line. Blank lines, lines
    /// starting with `;` or `//`, and `#` lines that are not a color are
    /// skipped.
    pub fn from_hex_text(text: &str) -> Result<Self, PaletteError> {
        let mut colors = Vec::new();
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with("//") {
                continue;
            }
            match Color::from_hex(line) {
                Some(color) => colors.push(color),
                None if line.starts_with('#') => continue,
                None => return Err(PaletteError::BadLine { line: i + 1, text: line.to_owned() }),
            }
        }
        Ok(Self { colors })
    }

    pub fn to_hex_text(&self) -> String {
        let mut out = String::new();
        for c in &self.colors {
            out.push_str(&format!("{:02x}{:02x}{:02x}{:02x}\n", c.r, c.g, c.b, c.a));
        }
        out
    }

    /// Builds a palette from the 768 bytes (RGB*256) of a `.pal` file.
    pub fn from_pal_bytes(bytes: &[u8]) -> Result<Self, PaletteError> {
        if bytes.len() < 256 * 3 {
            return Err(PaletteError::ShortPal(bytes.len()));
        }
        let colors = bytes[..256 * 3]
            .chunks_exact(3)
            .map(|c| Color::new(c[0], c[1], c[2], 255))
            .collect();
        Ok(Self { colors })
    }

    pub fn load(path: &Path) -> Result<Self, PaletteError> {
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("").to_ascii_lowercase();
        let list = match ext.as_str() {
            "hex" | "txt" => Self::from_hex_text(&std::fs::read_to_string(path)?)?,
            "pal" => Self::from_pal_bytes(&std::fs::read(path)?)?,
            _ => return Err(PaletteError::UnsupportedExtension(ext)),
        };
        debug!(path = %path.display(), colors = list.len(), "palette loaded");
        Ok(list)
    }

    pub fn save_hex(&self, path: &Path) -> Result<(), PaletteError> {
        std::fs::write(path, self.to_hex_text())?;
        Ok(())
    }
}

#[derive(RustEmbed)]
#[folder = "palettes"]
pub struct EmbeddedPalettes;

impl EmbeddedPalettes {
    /// Built-in `.hex` palettes as (name, palette), sorted by name.
    pub fn presets() -> Vec<(String, ColorList)> {
        let mut out = Vec::new();
        for f in EmbeddedPalettes::iter() {
            let path = f.as_ref();
            if !path.to_ascii_lowercase().ends_with(".hex") {
                continue;
            }
            let Some(file) = EmbeddedPalettes::get(path) else { continue };
            let text = String::from_utf8_lossy(file.data.as_ref());
            match ColorList::from_hex_text(&text) {
                Ok(list) => {
                    let name = Path::new(path)
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("palette")
                        .to_string();
                    out.push((name, list));
                }
                Err(e) => warn!(path, "skipping built-in palette: {e}"),
            }
        }
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color::new(r, g, b, 255)
    }

    #[test]
    fn hex_string_is_space_delimited() {
        assert_eq!(ColorList::new().to_hex_string(), "");
        let list = ColorList::from_colors(vec![rgb(255, 0, 0), Color::new(0, 0, 255, 128)]);
        assert_eq!(list.to_hex_string(), "0xFF0000FF 0x0000FF80");
    }

    #[test]
    fn remove_rows_handles_any_order() {
        let mut list = ColorList::from_colors((0..5).map(|i| rgb(i, 0, 0)).collect());
        list.remove_rows(&[3, 0, 3, 9]);
        let reds: Vec<u8> = list.iter().map(|c| c.r).collect();
        assert_eq!(reds, vec![1, 2, 4]);
    }

    #[test]
    fn set_and_insert() {
        let mut list = ColorList::new();
        assert_eq!(list.push(rgb(1, 1, 1)), 0);
        list.insert(0, rgb(2, 2, 2));
        list.insert(99, rgb(3, 3, 3));
        assert!(list.set(1, rgb(9, 9, 9)));
        assert!(!list.set(3, rgb(9, 9, 9)));
        assert_eq!(list.get(0), Some(rgb(2, 2, 2)));
        assert_eq!(list.get(1), Some(rgb(9, 9, 9)));
        assert_eq!(list.get(2), Some(rgb(3, 3, 3)));
    }

    #[test]
    fn hex_text_skips_comments() {
        let list = ColorList::from_hex_text("; lospec\n\nff0000\n// note\n#00ff0080\n").unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1), Some(Color::new(0, 255, 0, 128)));
        let err = ColorList::from_hex_text("ff0000\nnope\n").unwrap_err();
        assert!(matches!(err, PaletteError::BadLine { line: 2, .. }));
    }

    #[test]
    fn hash_title_line_is_a_comment() {
        let list = ColorList::from_hex_text("# Game Boy greens\n0f380f\n#306230\n# 4 colors\n").unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0), Some(rgb(0x0f, 0x38, 0x0f)));
        assert_eq!(list.get(1), Some(rgb(0x30, 0x62, 0x30)));
        let err = ColorList::from_hex_text("# title\n+f+f+f\n").unwrap_err();
        assert!(matches!(err, PaletteError::BadLine { line: 2, .. }));
    }

    #[test]
    fn pal_bytes_need_768() {
        assert!(matches!(ColorList::from_pal_bytes(&[0; 10]), Err(PaletteError::ShortPal(10))));
        let mut bytes = vec![0u8; 768];
        bytes[3..6].copy_from_slice(&[10, 20, 30]);
        let list = ColorList::from_pal_bytes(&bytes).unwrap();
        assert_eq!(list.len(), 256);
        assert_eq!(list.get(1), Some(rgb(10, 20, 30)));
    }

    #[test]
    fn presets_are_embedded() {
        let presets = EmbeddedPalettes::presets();
        assert!(presets.iter().any(|(n, p)| n == "gameboy" && p.len() == 4));
    }
}
