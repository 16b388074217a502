//! CLI route: single route table and run context. Dispatches to the orchestrator and
//! presentation.

use crate::cli::help::{command_name, mutates_session};
use crate::cli::parse::{AnnotateArgs, Commands, ExportCommands, PartCommands};
use crate::cli::presentation::{
    format_annotate_report, format_export_report, format_generate_report, format_import_result,
    format_note_preview, format_open_result, format_session_status, session_status,
};
use crate::config::{ConfigLoader, WeldsheetConfig};
use crate::drawing::sheet_name;
use crate::error::CommandError;
use crate::host::MemoryHost;
use crate::notes::{self, ManufacturingMethod, NoteSelection, SectionType, SurfaceTreatment, Welding};
use crate::orchestrator::Orchestrator;
use crate::part::PartDescription;
use crate::store::{load_host, save_host, SledSessionStore};
use crate::types::DocumentId;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime context for CLI execution: workspace, configuration and the session store.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    workspace_root: PathBuf,
    config: WeldsheetConfig,
    store: SledSessionStore,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, CommandError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Self::with_config(workspace_root, config)
    }

    /// Create run context from an already loaded configuration.
    pub fn with_config(workspace_root: PathBuf, config: WeldsheetConfig) -> Result<Self, CommandError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            CommandError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;

        let store_path = resolve(&workspace_root, &config.system.storage.store_path);
        std::fs::create_dir_all(&store_path)
            .map_err(|e| CommandError::Storage(crate::error::StorageError::IoError(e)))?;
        let store = SledSessionStore::new(&store_path)?;
        debug!(store = %store_path.display(), "Opened session store");

        Ok(Self {
            workspace_root,
            config,
            store,
        })
    }

    pub fn config(&self) -> &WeldsheetConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    ///
    /// The session is saved after every mutating command, failed ones included: the host
    /// keeps whatever a failed run created before it stopped.
    pub fn execute(&self, command: &Commands) -> Result<String, CommandError> {
        let name = command_name(command);
        info!(command = %name, "Executing command");

        let host = load_host(&self.store)?;
        let orchestrator = Orchestrator::new(host, self.config.pipeline_settings());
        let result = self.execute_inner(&orchestrator, command);

        if mutates_session(command) {
            let host = orchestrator.into_host();
            let saved = save_host(&self.store, &host);
            let output = result?;
            saved?;
            Ok(output)
        } else {
            result
        }
    }

    fn execute_inner(
        &self,
        orchestrator: &Orchestrator<MemoryHost>,
        command: &Commands,
    ) -> Result<String, CommandError> {
        match command {
            Commands::Part { command } => match command {
                PartCommands::Import { file } => self.handle_part_import(orchestrator, file),
            },
            Commands::Open { target } => self.handle_open(orchestrator, target),
            Commands::Generate { format } => {
                let report = orchestrator.generate()?;
                Ok(format_generate_report(&report, format))
            }
            Commands::Annotate(args) => self.handle_annotate(orchestrator, args),
            Commands::Export { command } => match command {
                ExportCommands::Pdf { output } => {
                    let output = output.as_deref().map(|p| resolve(&self.workspace_root, p));
                    let report = orchestrator.export_pdf(output.as_deref())?;
                    Ok(format_export_report(&report))
                }
                ExportCommands::Dxf => {
                    let report = orchestrator.export_dxf()?;
                    Ok(format_export_report(&report))
                }
            },
            Commands::Status { format } => {
                let status = orchestrator.with_host(|host| session_status(host))?;
                Ok(format_session_status(&status, format))
            }
        }
    }

    fn handle_part_import(
        &self,
        orchestrator: &Orchestrator<MemoryHost>,
        file: &Path,
    ) -> Result<String, CommandError> {
        let file = resolve(&self.workspace_root, file);
        let mut description = PartDescription::load(&file)?;

        // Part paths are relative to the description file.
        let base = file.parent().unwrap_or_else(|| Path::new("."));
        let part_path = resolve(base, &description.path);
        description.path = dunce::canonicalize(&part_path).unwrap_or(part_path);

        let part = orchestrator.with_host(|host| host.open_part(&description))?;
        info!(part = %part.id, path = %part.path.display(), "Imported part");
        Ok(format_import_result(
            &part,
            description.all_bodies().len(),
            description.cutlists.len(),
        ))
    }

    fn handle_open(
        &self,
        orchestrator: &Orchestrator<MemoryHost>,
        target: &str,
    ) -> Result<String, CommandError> {
        let path = resolve(&self.workspace_root, Path::new(target));
        let path = dunce::canonicalize(&path).unwrap_or(path);
        let document = orchestrator.with_host(|host| {
            let id = DocumentId::parse(target)
                .filter(|id| host.document(id).is_some())
                .or_else(|| host.find_by_path(&path).map(|d| d.id().clone()))
                .ok_or_else(|| {
                    CommandError::InvalidInput(format!("No loaded document matches '{}'", target))
                })?;
            host.activate(&id).map_err(CommandError::from)
        })??;
        Ok(format_open_result(&document))
    }

    fn handle_annotate(
        &self,
        orchestrator: &Orchestrator<MemoryHost>,
        args: &AnnotateArgs,
    ) -> Result<String, CommandError> {
        let selection = if args.interactive {
            prompt_note_selection(args)?
        } else {
            selection_from_args(args)
        };

        if args.dry_run {
            let text = notes::compose(&selection);
            return Ok(format_note_preview(&selection, &text, &args.format));
        }

        if args.interactive && !confirm_placement()? {
            return Ok("Annotation cancelled".to_string());
        }

        let sheet = args.sheet.map(sheet_name);
        let report = orchestrator.annotate(&selection, sheet.as_deref())?;
        Ok(format_annotate_report(&report, &args.format))
    }
}

/// Relative paths are taken from `base`.
fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

pub(crate) fn selection_from_args(args: &AnnotateArgs) -> NoteSelection {
    NoteSelection {
        quantity_required: args.quantity.clone(),
        manufacturing_method: args.method,
        section_type: args.section,
        welding: match &args.weld {
            Some(thickness) => Welding::required(thickness.clone()),
            None => Welding::None,
        },
        surface_treatment: args.surface,
    }
}

fn input_error(e: dialoguer::Error) -> CommandError {
    CommandError::InvalidInput(format!("Failed to get user input: {}", e))
}

/// Note dialog: one prompt per axis, defaults taken from the flags.
fn prompt_note_selection(args: &AnnotateArgs) -> Result<NoteSelection, CommandError> {
    use dialoguer::{Confirm, Input, Select};

    let quantity_required: String = Input::new()
        .with_prompt("Quantity required")
        .default(args.quantity.clone())
        .allow_empty(true)
        .interact_text()
        .map_err(input_error)?;

    let method = Select::new()
        .with_prompt("Manufacturing method")
        .items(&ManufacturingMethod::ALL.map(ManufacturingMethod::label))
        .default(position(&ManufacturingMethod::ALL, &args.method))
        .interact()
        .map_err(input_error)?;

    let section = Select::new()
        .with_prompt("Section type")
        .items(&SectionType::ALL.map(SectionType::label))
        .default(position(&SectionType::ALL, &args.section))
        .interact()
        .map_err(input_error)?;

    let welding_required = Confirm::new()
        .with_prompt("Welding required?")
        .default(args.weld.is_some())
        .interact()
        .map_err(input_error)?;
    let welding = if welding_required {
        let thickness: String = Input::new()
            .with_prompt("Weld throat thickness")
            .default(args.weld.clone().unwrap_or_default())
            .interact_text()
            .map_err(input_error)?;
        Welding::required(thickness)
    } else {
        Welding::None
    };

    let surface = Select::new()
        .with_prompt("Surface treatment")
        .items(&SurfaceTreatment::ALL.map(SurfaceTreatment::label))
        .default(position(&SurfaceTreatment::ALL, &args.surface))
        .interact()
        .map_err(input_error)?;

    Ok(NoteSelection {
        quantity_required,
        manufacturing_method: ManufacturingMethod::ALL[method],
        section_type: SectionType::ALL[section],
        welding,
        surface_treatment: SurfaceTreatment::ALL[surface],
    })
}

fn confirm_placement() -> Result<bool, CommandError> {
    dialoguer::Confirm::new()
        .with_prompt("Place note on the active drawing?")
        .default(true)
        .interact()
        .map_err(input_error)
}

fn position<T: PartialEq>(all: &[T], value: &T) -> usize {
    all.iter().position(|v| v == value).unwrap_or(0)
}
