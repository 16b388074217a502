//! Integration tests for Configuration System

use super::test_utils::with_xdg_env;
use tempfile::TempDir;
use weldsheet::config::ConfigLoader;
use weldsheet::drawing::{MissingViewPolicy, PaperSize};

fn write(path: &std::path::Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

#[test]
fn test_global_config_is_loaded() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    write(
        &test_dir.path().join("weldsheet").join("config.toml"),
        "[drawing]\npaper_size = \"A1\"\n",
    );

    let config = with_xdg_env(&test_dir, || {
        assert_eq!(
            ConfigLoader::global_config_path(),
            Some(test_dir.path().join("weldsheet").join("config.toml"))
        );
        ConfigLoader::load(workspace.path()).unwrap()
    });
    assert_eq!(config.drawing.paper_size, PaperSize::A1);
}

#[test]
fn test_workspace_config_overrides_global_config() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    write(
        &test_dir.path().join("weldsheet").join("config.toml"),
        "[drawing]\npaper_size = \"A1\"\nmissing_view_policy = \"abort\"\n",
    );
    write(
        &workspace.path().join("config").join("config.toml"),
        "[drawing]\npaper_size = \"A4\"\n",
    );

    let config = with_xdg_env(&test_dir, || ConfigLoader::load(workspace.path()).unwrap());
    assert_eq!(config.drawing.paper_size, PaperSize::A4);
    // Keys the workspace file does not set still come from the global file.
    assert_eq!(config.drawing.missing_view_policy, MissingViewPolicy::Abort);
}

#[test]
fn test_environment_file_and_variables() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    write(
        &workspace.path().join("config").join("shop.toml"),
        "[export]\npdf_all_sheets = false\n",
    );

    let config = with_xdg_env(&test_dir, || {
        std::env::set_var("WELDSHEET_ENV", "shop");
        std::env::set_var("WELDSHEET_DRAWING__PAPER_SIZE", "A2");
        let config = ConfigLoader::load(workspace.path());
        std::env::remove_var("WELDSHEET_ENV");
        std::env::remove_var("WELDSHEET_DRAWING__PAPER_SIZE");
        config.unwrap()
    });
    assert!(!config.export.pdf_all_sheets);
    assert_eq!(config.drawing.paper_size, PaperSize::A2);
}

#[test]
fn test_invalid_values_are_reported() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("bad.toml");
    write(&config_file, "[drawing]\nmissing_view_policy = \"retry\"\n");
    assert!(ConfigLoader::load_from_file(&config_file).is_err());

    write(&config_file, "[logging]\noutput = \"syslog\"\n");
    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().starts_with("Logging:"));
}
