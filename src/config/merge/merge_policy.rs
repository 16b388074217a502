//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Later sources override these key by key, so a workspace file that only sets
/// `drawing.paper_size` keeps the default template.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("drawing.template_path", crate::drawing::DEFAULT_TEMPLATE_PATH)?
        .set_default("drawing.paper_size", "A3")?
        .set_default("drawing.first_angle", false)?
        .set_default("drawing.missing_view_policy", "skip")?
        .set_default("export.pdf_all_sheets", true)?
        .set_default("system.storage.store_path", ".weldsheet/store")
}
