//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::{Commands, ExportCommands, PartCommands};

/// Command name string for logs (e.g. "generate", "export.pdf").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Part { command } => format!("part.{}", part_command_name(command)),
        Commands::Open { .. } => "open".to_string(),
        Commands::Generate { .. } => "generate".to_string(),
        Commands::Annotate(_) => "annotate".to_string(),
        Commands::Export { command } => format!("export.{}", export_command_name(command)),
        Commands::Status { .. } => "status".to_string(),
    }
}

pub fn part_command_name(command: &PartCommands) -> &'static str {
    match command {
        PartCommands::Import { .. } => "import",
    }
}

pub fn export_command_name(command: &ExportCommands) -> &'static str {
    match command {
        ExportCommands::Pdf { .. } => "pdf",
        ExportCommands::Dxf => "dxf",
    }
}

/// Whether the command changes session state; read-only commands skip the save.
pub fn mutates_session(command: &Commands) -> bool {
    match command {
        Commands::Status { .. } => false,
        Commands::Annotate(args) => !args.dry_run,
        Commands::Export {
            command: ExportCommands::Dxf,
        } => false,
        _ => true,
    }
}
