use crate::bounds::Range;
use crate::layout::{LayoutConfig, LayoutMode};
use crate::view::ViewParams;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const FPS_MIN: u32 = 10;
pub const FPS_MAX: u32 = 240;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub size_range: [f64; 2],
    pub distance_range: [f64; 2],
    pub central_size: f64,
    pub layout: LayoutMode,
    pub flat_center: [f64; 2],
    /// 0 picks a fresh layout every run.
    pub seed: u64,
    pub camera_distance: f64,
    pub fov: f64,
    pub fov_min: f64,
    pub fov_max: f64,
    pub zoom_speed: f64,
    pub zoom_damping: f64,
    pub rotate_speed: f64,
    pub fps_cap: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            size_range: [0.2, 2.0],
            distance_range: [50.0, 200.0],
            central_size: 5.0,
            layout: LayoutMode::Spherical,
            flat_center: [0.0, 0.0],
            seed: 0,
            camera_distance: 150.0,
            fov: 75.0,
            fov_min: 10.0,
            fov_max: 100.0,
            zoom_speed: 1.0,
            zoom_damping: 0.1,
            rotate_speed: 0.005,
            fps_cap: 30,
        }
    }
}

impl Settings {
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            mode: self.layout,
            size_range: Range {
                min: self.size_range[0],
                max: self.size_range[1],
            },
            distance_range: Range {
                min: self.distance_range[0],
                max: self.distance_range[1],
            },
            flat_center: self.flat_center,
        }
    }

    /// `fps_cap` limited to [`FPS_MIN`, `FPS_MAX`].
    pub fn frame_rate(&self) -> u32 {
        let fps = self.fps_cap.clamp(FPS_MIN, FPS_MAX);
        if fps != self.fps_cap {
            warn!("fps cap {} out of range, using {}", self.fps_cap, fps);
        }
        fps
    }

    pub fn view_params(&self) -> ViewParams {
        ViewParams {
            camera_distance: self.camera_distance,
            fov: self.fov,
            fov_min: self.fov_min.min(self.fov_max),
            fov_max: self.fov_max.max(self.fov_min),
            zoom_speed: self.zoom_speed,
            zoom_damping: self.zoom_damping.clamp(0.0, 1.0),
            rotate_speed: self.rotate_speed,
        }
    }
}

pub fn default_settings_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from("com", "starmap", "Starmap")
        .context("could not resolve project directories")?;
    Ok(proj.config_dir().join("settings.json"))
}

/// Missing file means defaults; a broken one is logged and also means defaults.
pub fn load_settings(path: &Path) -> Settings {
    let Ok(s) = fs::read_to_string(path) else {
        return Settings::default();
    };
    match serde_json::from_str::<Settings>(&s) {
        Ok(v) => v,
        Err(e) => {
            warn!("ignoring settings at {}: {}", path.display(), e);
            Settings::default()
        }
    }
}
