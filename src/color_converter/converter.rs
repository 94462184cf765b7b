//! Runs the external palette conversion tool.
//!
//! The tool is invoked as `program <input> <output> <color> <color> ...` where
//! each color is a `0xRRGGBBAA` hex code.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use thiserror::Error;
use tracing::{debug, info, instrument};

use super::palette::ColorList;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("the palette is empty, add at least one color")]
    EmptyPalette,
    #[error("could not start '{program}': {source}")]
    Spawn { program: String, source: std::io::Error },
    #[error("'{program}' exited with {status}: {stderr}")]
    Failed { program: String, status: ExitStatus, stderr: String },
}

#[derive(Debug, Clone)]
pub struct ConvertRequest {
    pub program: String,
    pub input: PathBuf,
    pub output: PathBuf,
    pub colors: ColorList,
}

/// `<dir>/<stem>_converted.png` next to `input`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("image");
    input.with_file_name(format!("{stem}_converted.png"))
}

impl ConvertRequest {
    pub fn new(program: impl Into<String>, input: &Path, colors: ColorList) -> Self {
        Self {
            program: program.into(),
            input: input.to_path_buf(),
            output: default_output_path(input),
            colors,
        }
    }

    pub fn args(&self) -> Vec<OsString> {
        let mut args = vec![self.input.clone().into_os_string(), self.output.clone().into_os_string()];
        args.extend(self.colors.iter().map(|c| OsString::from(c.hex())));
        args
    }

    /// Runs the tool to completion and returns the path of the converted image.
    #[instrument(skip(self), fields(program = %self.program, input = %self.input.display()))]
    pub fn run(&self) -> Result<PathBuf, ConvertError> {
        if self.colors.is_empty() {
            return Err(ConvertError::EmptyPalette);
        }
        debug!(colors = %self.colors.to_hex_string(), "starting converter");
        let out = Command::new(&self.program)
            .args(self.args())
            .output()
            .map_err(|source| ConvertError::Spawn { program: self.program.clone(), source })?;
        if !out.status.success() {
            return Err(ConvertError::Failed {
                program: self.program.clone(),
                status: out.status,
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_owned(),
            });
        }
        info!(output = %self.output.display(), "conversion finished");
        Ok(self.output.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color_converter::color::Color;

    #[test]
    fn output_sits_next_to_input() {
        assert_eq!(
            default_output_path(Path::new("/art/hero.gif")),
            PathBuf::from("/art/hero_converted.png")
        );
    }

    #[test]
    fn args_are_paths_then_colors() {
        let colors = ColorList::from_colors(vec![Color::new(255, 0, 0, 255), Color::new(0, 0, 0, 0)]);
        let req = ConvertRequest::new("cc", Path::new("in.png"), colors);
        let args: Vec<String> = req.args().into_iter().map(|a| a.into_string().unwrap()).collect();
        assert_eq!(args, vec!["in.png", "in_converted.png", "0xFF0000FF", "0x00000000"]);
    }

    #[test]
    fn empty_palette_is_rejected() {
        let req = ConvertRequest::new("cc", Path::new("in.png"), ColorList::new());
        assert!(matches!(req.run(), Err(ConvertError::EmptyPalette)));
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let colors = ColorList::from_colors(vec![Color::WHITE]);
        let req = ConvertRequest::new("aerohelper-no-such-program", Path::new("in.png"), colors);
        assert!(matches!(req.run(), Err(ConvertError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_reported() {
        let colors = ColorList::from_colors(vec![Color::WHITE]);
        let req = ConvertRequest::new("false", Path::new("in.png"), colors);
        assert!(matches!(req.run(), Err(ConvertError::Failed { .. })));
    }
}
