use std::path::{Path, PathBuf};

use crate::{
    assets::encode::write_image,
    foundation::{
        core::{FrameIndex, FrameRange},
        error::{KeyrasterError, KeyrasterResult},
    },
    raster::{grid::PixelGrid, pixel::Rgba},
    scene::store::{LayerId, Scene},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Frame driver configuration.
pub struct RenderSettings {
    /// Value every pixel is reset to before a frame is rendered.
    pub clear: Rgba,
    /// Extension of exported frame files; selects the image format.
    pub file_extension: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            clear: Rgba::BLACK,
            file_extension: "tif".to_owned(),
        }
    }
}

/// Render composite `comp` of `scene` at `time` into a new grid sized from its canvas.
#[tracing::instrument(skip(scene, settings))]
pub fn render_frame(
    scene: &Scene,
    comp: LayerId,
    time: f64,
    settings: &RenderSettings,
) -> KeyrasterResult<PixelGrid> {
    let canvas = scene.composite(comp)?.canvas();
    let mut grid = PixelGrid::filled(canvas.width, canvas.height, settings.clear);
    scene.render_layer(comp, &mut grid, time);
    Ok(grid)
}

/// File name of an exported frame: the zero-padded frame number plus `ext`.
pub fn frame_file_name(frame: FrameIndex, ext: &str) -> String {
    format!("{:04}.{ext}", frame.0)
}

/// Render every frame of `range` and write one image per frame into `dir`.
///
/// The range must not be empty. Returns the written paths in frame order.
#[tracing::instrument(skip(scene, dir, settings))]
pub fn render_frames_to_dir(
    scene: &Scene,
    comp: LayerId,
    range: FrameRange,
    dir: impl AsRef<Path>,
    settings: &RenderSettings,
) -> KeyrasterResult<Vec<PathBuf>> {
    if range.end.0 <= range.start.0 {
        return Err(KeyrasterError::validation(format!(
            "frame range end ({}) must be greater than start ({})",
            range.end.0, range.start.0
        )));
    }
    let canvas = scene.composite(comp)?.canvas();
    let dir = dir.as_ref();

    let mut grid = PixelGrid::new(canvas.width, canvas.height);
    let mut written = Vec::with_capacity(range.len_frames() as usize);
    for frame in range.frames() {
        grid.fill(settings.clear);
        scene.render_layer(comp, &mut grid, frame.as_time());

        let path = dir.join(frame_file_name(frame, &settings.file_extension));
        write_image(&grid, &path)?;
        tracing::debug!(frame = frame.0, path = %path.display(), "frame written");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
