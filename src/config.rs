// Optional settings file, read once on startup: <root>/plaidbeat.json
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "plaidbeat.json";
const MIN_CANVAS: u32 = 16;
const MAX_CANVAS: u32 = 4096;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sample_dir: PathBuf,  // relative paths resolve against the root dir
    pub seed: Option<u64>,    // fixed seed for reproducible plaids
    pub canvas_size: u32,     // side of the square plaid raster, in px
    pub log_file: PathBuf,
    pub frame_ms: u64,        // UI repaint interval
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_dir: PathBuf::from("assets/samples"),
            seed: None,
            canvas_size: 400,
            log_file: PathBuf::from("plaidbeat.log"),
            frame_ms: 16,
        }
    }
}

pub fn config_file_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

// Missing file means defaults; a file that exists but doesn't parse is an error.
pub fn load_config(root: &Path) -> anyhow::Result<Config> {
    let path = config_file_path(root);
    let data = match std::fs::read_to_string(&path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
    };
    let mut config: Config = serde_json::from_str(&data)
        .with_context(|| format!("parsing {}", path.display()))?;
    config.canvas_size = config.canvas_size.clamp(MIN_CANVAS, MAX_CANVAS);
    config.frame_ms = config.frame_ms.max(1);
    Ok(config)
}

impl Config {
    pub fn resolve(&self, root: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        }
    }

    pub fn sample_dir(&self, root: &Path) -> PathBuf {
        self.resolve(root, &self.sample_dir)
    }

    pub fn log_path(&self, root: &Path) -> PathBuf {
        self.resolve(root, &self.log_file)
    }
}
