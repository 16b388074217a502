//! CLI parse: clap types for weldsheet. No behavior; definitions only.

use crate::notes::{ManufacturingMethod, SectionType, SurfaceTreatment};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// weldsheet - production drawings from weldment cutlists
#[derive(Parser)]
#[command(name = "weldsheet")]
#[command(about = "Generate one production drawing sheet per cutlist item of a weldment part")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Part commands
    Part {
        #[command(subcommand)]
        command: PartCommands,
    },
    /// Activate a loaded document by path or id
    Open {
        /// Document path or 16-character document id
        target: String,
    },
    /// Generate configurations and a drawing for the active part
    Generate {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Compose the manufacturing note and place it on the active drawing
    Annotate(AnnotateArgs),
    /// Export the active drawing
    Export {
        #[command(subcommand)]
        command: ExportCommands,
    },
    /// Show the documents in the session
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum PartCommands {
    /// Load a part description (TOML or JSON) and make it the active document
    Import {
        /// Part description file
        file: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum ExportCommands {
    /// Save the active drawing as PDF
    Pdf {
        /// Output path (default: the drawing path with a .pdf extension)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Save the active drawing as DXF (not available)
    Dxf,
}

#[derive(Args, Debug, Clone, Default)]
pub struct AnnotateArgs {
    /// Quantity required, inserted verbatim
    #[arg(long, default_value = "")]
    pub quantity: String,

    /// Manufacturing method (none, fabrication, lasercutting, machined-component)
    #[arg(long, default_value_t = ManufacturingMethod::None)]
    pub method: ManufacturingMethod,

    /// Section type (none, hollow, hot-rolled, machined-component, plate)
    #[arg(long, default_value_t = SectionType::None)]
    pub section: SectionType,

    /// Weld throat thickness; welding is required when given
    #[arg(long)]
    pub weld: Option<String>,

    /// Surface treatment (none, galvanised, cold-gal, painted, metal-spray)
    #[arg(long, default_value_t = SurfaceTreatment::None)]
    pub surface: SurfaceTreatment,

    /// Prompt for every selection, using the flags as defaults
    #[arg(long)]
    pub interactive: bool,

    /// Place the note on sheet N instead of the active sheet
    #[arg(long, value_name = "N")]
    pub sheet: Option<usize>,

    /// Print the composed note without placing it
    #[arg(long)]
    pub dry_run: bool,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,
}
