//! Shared test utilities for integration tests
//!
//! Sample parts, plus serialized access to the XDG environment for tests that load the
//! global configuration file.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;
use weldsheet::host::MemoryHost;
use weldsheet::part::{CutlistItem, PartDescription};
use weldsheet::types::DocumentId;

/// Global mutex to serialize XDG environment variable access across all tests
static XDG_ENV_MUTEX: Mutex<()> = Mutex::new(());

struct EnvState {
    home: Option<String>,
    xdg_config_home: Option<String>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            home: std::env::var("HOME").ok(),
            xdg_config_home: std::env::var("XDG_CONFIG_HOME").ok(),
        }
    }

    fn restore(self) {
        match self.home {
            Some(orig) => std::env::set_var("HOME", orig),
            None => std::env::remove_var("HOME"),
        }
        match self.xdg_config_home {
            Some(orig) => std::env::set_var("XDG_CONFIG_HOME", orig),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME pointing into `test_dir`.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = XDG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_home).unwrap();

    std::env::set_var("HOME", test_home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", test_dir.path().to_str().unwrap());

    let result = f();

    env_state.restore();

    result
}

/// A frame with two legs, one rail and an empty cutlist folder between them.
pub fn frame_part() -> PartDescription {
    PartDescription {
        path: PathBuf::from("frame.sldprt"),
        bodies: vec![
            "Leg<1>".to_string(),
            "Leg<2>".to_string(),
            "Rail<1>".to_string(),
            "Brace<1>".to_string(),
        ],
        cutlists: vec![
            CutlistItem::new("SHS 50x50x3 - 600", &["Leg<1>", "Leg<2>"]),
            CutlistItem::new("empty folder", &[]),
            CutlistItem::new("RHS 100x50x4 - 1200", &["Rail<1>"]),
            CutlistItem::new("FB 50x6 - 300", &["Brace<1>"]),
        ],
    }
}

/// Host with `description` opened and active.
pub fn host_with(description: &PartDescription) -> (MemoryHost, DocumentId) {
    let mut host = MemoryHost::new();
    let part = host.open_part(description).id;
    (host, part)
}

/// Write `description` as TOML next to an empty part file, returning the description path.
pub fn write_part_description(dir: &Path, description: &PartDescription) -> PathBuf {
    std::fs::write(dir.join(&description.path), b"").unwrap();
    let file = dir.join("frame.toml");
    std::fs::write(&file, toml::to_string(description).unwrap()).unwrap();
    file
}
