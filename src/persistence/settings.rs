use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    // Distance from the canvas center to each task node
    pub layout_radius: f32,
    pub node_radius: f32,
    pub window_size: (f32, f32),
    // Start with the built-in tasks and links
    pub seed_sample_data: bool,
    // Falls back to export_default_dir()
    pub export_override: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            layout_radius: 200.0,
            node_radius: 30.0,
            window_size: (1000.0, 700.0),
            seed_sample_data: true,
            export_override: None,
        }
    }
}

impl AppSettings {
    const APP_DIR: &str = "Task-Network";

    #[cfg_attr(target_os = "windows", allow(dead_code))]
    fn home() -> PathBuf {
        std::env::var_os("HOME").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("~"))
    }

    // Where settings.json lives for the current platform
    fn config_dir() -> PathBuf {
        #[cfg(target_os = "macos")]
        {
            return Self::home().join("Library").join("Application Support").join(Self::APP_DIR);
        }
        #[cfg(target_os = "windows")]
        {
            return std::env::var_os("APPDATA")
                .map(|appdata| PathBuf::from(appdata).join(Self::APP_DIR))
                .unwrap_or_else(|| PathBuf::from(Self::APP_DIR));
        }
        #[cfg(all(unix, not(target_os = "macos")))]
        {
            return std::env::var_os("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|| Self::home().join(".config"))
                .join(Self::APP_DIR);
        }
    }

    /// Default location of `settings.json` in the per-user configuration directory.
    pub fn settings_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    // A missing file is not an error: defaults apply
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let mut f = fs::File::open(path)?;
        let mut s = String::new();
        f.read_to_string(&mut s)?;
        let v: Self = serde_json::from_str(&s)?;
        Ok(v.sanitized())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let s = serde_json::to_string_pretty(self)?;
        let mut f = fs::File::create(path)?;
        f.write_all(s.as_bytes())?;
        Ok(())
    }

    // Hand-edited files may carry nonsense geometry
    fn sanitized(mut self) -> Self {
        let d = Self::default();
        if !(self.layout_radius.is_finite() && self.layout_radius > 0.0) { self.layout_radius = d.layout_radius; }
        if !(self.node_radius.is_finite() && self.node_radius > 0.0) { self.node_radius = d.node_radius; }
        if !(self.window_size.0 > 0.0 && self.window_size.1 > 0.0) { self.window_size = d.window_size; }
        self
    }

    /// JSON and CSV snapshots land here unless `export_override` is set.
    pub fn export_default_dir() -> PathBuf {
        std::env::temp_dir().join(Self::APP_DIR).join("exports")
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_override.clone().unwrap_or_else(Self::export_default_dir)
    }
}
