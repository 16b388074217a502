//! CLI route table driven end to end through a persisted session

use super::test_utils::{frame_part, write_part_description};
use tempfile::TempDir;
use weldsheet::cli::{AnnotateArgs, Commands, ExportCommands, PartCommands, RunContext};
use weldsheet::config::WeldsheetConfig;
use weldsheet::error::CommandError;
use weldsheet::notes::{ManufacturingMethod, SurfaceTreatment};

fn context(workspace: &TempDir) -> RunContext {
    RunContext::with_config(workspace.path().to_path_buf(), WeldsheetConfig::default()).unwrap()
}

fn import(context: &RunContext, workspace: &TempDir) -> String {
    let file = write_part_description(workspace.path(), &frame_part());
    context
        .execute(&Commands::Part {
            command: PartCommands::Import { file },
        })
        .unwrap()
}

fn status_json(context: &RunContext) -> serde_json::Value {
    let out = context
        .execute(&Commands::Status {
            format: "json".to_string(),
        })
        .unwrap();
    serde_json::from_str(&out).unwrap()
}

#[test]
fn test_import_generate_annotate_export() {
    let workspace = TempDir::new().unwrap();
    let context = context(&workspace);

    let imported = import(&context, &workspace);
    assert!(imported.contains("4 bodies, 4 cutlist item(s)"));

    let generated = context
        .execute(&Commands::Generate {
            format: "json".to_string(),
        })
        .unwrap();
    let report: serde_json::Value = serde_json::from_str(&generated).unwrap();
    assert_eq!(report["sheets"].as_array().unwrap().len(), 3);
    assert_eq!(report["configurations"][2]["name"], "Config_CutList_2");

    let annotated = context
        .execute(&Commands::Annotate(AnnotateArgs {
            quantity: "2".to_string(),
            method: ManufacturingMethod::Lasercutting,
            surface: SurfaceTreatment::Painted,
            sheet: Some(3),
            format: "text".to_string(),
            ..AnnotateArgs::default()
        }))
        .unwrap();
    assert!(annotated.contains("Sheet_3"));
    assert!(annotated.contains("QUANTITY REQUIRED: 2"));

    let exported = context
        .execute(&Commands::Export {
            command: ExportCommands::Pdf { output: None },
        })
        .unwrap();
    assert!(exported.contains("frame_001.pdf"));
    assert!(workspace.path().join("frame_001.pdf").exists());

    let status = status_json(&context);
    let documents = status["documents"].as_array().unwrap();
    assert_eq!(documents.len(), 2);
    let drawing = documents
        .iter()
        .find(|d| d["kind"] == "Drawing")
        .unwrap();
    assert_eq!(drawing["active"], true);
    assert_eq!(drawing["views"], 9);
    assert_eq!(drawing["notes"], 1);
}

#[test]
fn test_session_persists_between_contexts() {
    let workspace = TempDir::new().unwrap();
    {
        let context = context(&workspace);
        import(&context, &workspace);
        context
            .execute(&Commands::Generate {
                format: "text".to_string(),
            })
            .unwrap();
    }

    let context = context(&workspace);
    let status = status_json(&context);
    let part = status["documents"]
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["kind"] == "Part")
        .unwrap()
        .clone();
    // Default configuration plus three synthesized ones.
    assert_eq!(part["children"].as_array().unwrap().len(), 4);

    let opened = context
        .execute(&Commands::Open {
            target: part["id"].as_str().unwrap().to_string(),
        })
        .unwrap();
    assert!(opened.starts_with("Active part"));
}

#[test]
fn test_dry_run_prints_note_without_placing() {
    let workspace = TempDir::new().unwrap();
    let context = context(&workspace);
    import(&context, &workspace);

    let preview = context
        .execute(&Commands::Annotate(AnnotateArgs {
            weld: Some("5".to_string()),
            dry_run: true,
            format: "text".to_string(),
            ..AnnotateArgs::default()
        }))
        .unwrap();
    assert!(preview.contains("ALL WELDS TO BE 5mm"));
}

#[test]
fn test_command_errors_surface() {
    let workspace = TempDir::new().unwrap();
    let context = context(&workspace);

    assert!(matches!(
        context.execute(&Commands::Generate {
            format: "text".to_string()
        }),
        Err(CommandError::NoActiveDocument)
    ));
    assert!(matches!(
        context.execute(&Commands::Open {
            target: "nothing-here".to_string()
        }),
        Err(CommandError::InvalidInput(_))
    ));

    import(&context, &workspace);
    context
        .execute(&Commands::Generate {
            format: "text".to_string(),
        })
        .unwrap();
    assert!(matches!(
        context.execute(&Commands::Export {
            command: ExportCommands::Dxf
        }),
        Err(CommandError::Unsupported(_))
    ));
}
