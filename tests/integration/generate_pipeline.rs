//! End-to-end generation against the in-memory host

use super::test_utils::{frame_part, host_with};
use std::path::PathBuf;
use weldsheet::drawing::{MissingViewPolicy, ViewKind};
use weldsheet::error::CommandError;
use weldsheet::host::{CadHost, HostCall, MemoryHost};
use weldsheet::orchestrator::{Orchestrator, PipelineSettings};
use weldsheet::part::{CutlistItem, PartDescription};
use weldsheet::types::DocumentKind;

/// K non-empty cutlist units give K configurations and K sheets of 3 views.
#[test]
fn test_one_sheet_per_nonempty_cutlist() {
    let (host, _) = host_with(&frame_part());
    let orchestrator = Orchestrator::new(host, PipelineSettings::default());

    let report = orchestrator.generate().unwrap();
    assert_eq!(report.configurations.len(), 3);
    assert_eq!(report.sheets.len(), 3);
    assert!(report.skipped_views.is_empty());

    let host = orchestrator.into_host();
    let drawing = host.drawing(&report.drawing.id).unwrap();
    assert_eq!(drawing.sheets.len(), 3);
    for sheet in &drawing.sheets {
        assert_eq!(sheet.views.len(), 3);
    }
}

#[test]
fn test_configuration_and_sheet_names_follow_cutlist_order() {
    let (host, part) = host_with(&frame_part());
    let orchestrator = Orchestrator::new(host, PipelineSettings::default());
    let report = orchestrator.generate().unwrap();

    let names: Vec<&str> = report.configurations.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Config_CutList_0", "Config_CutList_1", "Config_CutList_2"]
    );
    let sheets: Vec<&str> = report.sheets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(sheets, vec!["Sheet_1", "Sheet_2", "Sheet_3"]);

    let host = orchestrator.into_host();
    let part = host.part(&part).unwrap();
    assert_eq!(part.visible_bodies("Config_CutList_0").unwrap(), vec!["Leg<1>"]);
    assert_eq!(part.visible_bodies("Config_CutList_1").unwrap(), vec!["Rail<1>"]);
    assert_eq!(part.visible_bodies("Config_CutList_2").unwrap(), vec!["Brace<1>"]);
}

/// Every view on sheet i references Config_CutList_{i-1}.
#[test]
fn test_views_bind_to_their_sheet_configuration() {
    let (host, _) = host_with(&frame_part());
    let orchestrator = Orchestrator::new(host, PipelineSettings::default());
    let report = orchestrator.generate().unwrap();

    let host = orchestrator.into_host();
    let drawing = host.drawing(&report.drawing.id).unwrap();
    for (i, sheet) in drawing.sheets.iter().enumerate() {
        let expected = format!("Config_CutList_{}", i);
        let kinds: Vec<Option<ViewKind>> = sheet.views.iter().map(|v| v.kind()).collect();
        assert_eq!(
            kinds,
            vec![Some(ViewKind::Front), Some(ViewKind::Right), Some(ViewKind::Top)]
        );
        for view in &sheet.views {
            assert_eq!(view.configuration.as_deref(), Some(expected.as_str()));
            assert_eq!(view.anchor, view.kind().unwrap().anchor());
        }
    }
}

#[test]
fn test_second_run_reuses_configurations_and_creates_new_drawing() {
    let (host, part) = host_with(&frame_part());
    let orchestrator = Orchestrator::new(host, PipelineSettings::default());

    let first = orchestrator.generate().unwrap();
    orchestrator
        .with_host(|host| host.activate(&part).unwrap())
        .unwrap();
    let second = orchestrator.generate().unwrap();

    assert_ne!(first.drawing.id, second.drawing.id);
    assert!(second.configurations.iter().all(|c| !c.created));

    let host = orchestrator.into_host();
    // Default plus one per unit, no duplicates.
    assert_eq!(host.part(&part).unwrap().configurations.len(), 4);
    assert_eq!(host.call_count(HostCall::AddConfiguration), 3);
    assert_eq!(host.drawings_for(&PathBuf::from("frame.sldprt")).len(), 2);
    assert_eq!(host.drawing(&first.drawing.id).unwrap().sheets.len(), 3);
}

#[test]
fn test_all_empty_cutlists_create_no_document() {
    let description = PartDescription {
        path: PathBuf::from("empty.sldprt"),
        bodies: vec![],
        cutlists: vec![CutlistItem::new("a", &[]), CutlistItem::new("b", &[])],
    };
    let (host, _) = host_with(&description);
    let orchestrator = Orchestrator::new(host, PipelineSettings::default());

    assert!(matches!(
        orchestrator.generate(),
        Err(CommandError::NoValidCutlists)
    ));
    let host = orchestrator.into_host();
    assert_eq!(host.documents().count(), 1);
}

#[test]
fn test_generate_requires_a_part() {
    let (host, _) = host_with(&frame_part());
    let orchestrator = Orchestrator::new(host, PipelineSettings::default());
    orchestrator.generate().unwrap();

    // The new drawing is now active.
    let err = orchestrator.generate().unwrap_err();
    assert!(matches!(
        err,
        CommandError::WrongDocumentType {
            expected: DocumentKind::Part,
            found: DocumentKind::Drawing
        }
    ));
}

#[test]
fn test_no_active_document() {
    let orchestrator = Orchestrator::new(MemoryHost::new(), PipelineSettings::default());
    assert!(matches!(
        orchestrator.generate(),
        Err(CommandError::NoActiveDocument)
    ));
}

#[test]
fn test_missing_view_is_skipped_by_default() {
    let (mut host, _) = host_with(&frame_part());
    // Second view of the first sheet.
    host.null_on(HostCall::CreateStandardView, 1);
    let orchestrator = Orchestrator::new(host, PipelineSettings::default());

    let report = orchestrator.generate().unwrap();
    assert_eq!(report.skipped_views.len(), 1);
    assert_eq!(report.skipped_views[0].sheet, "Sheet_1");
    assert_eq!(report.skipped_views[0].kind, ViewKind::Right);
    assert_eq!(report.sheets[0].views.len(), 2);
    assert_eq!(report.sheets.len(), 3);
}

#[test]
fn test_missing_view_aborts_under_abort_policy() {
    let (mut host, _) = host_with(&frame_part());
    host.null_on(HostCall::CreateStandardView, 4);
    let settings = PipelineSettings {
        missing_view_policy: MissingViewPolicy::Abort,
        ..PipelineSettings::default()
    };
    let orchestrator = Orchestrator::new(host, settings);

    match orchestrator.generate() {
        Err(CommandError::ViewNotCreated { sheet, view }) => {
            assert_eq!(sheet, "Sheet_2");
            assert_eq!(view, "Right");
        }
        other => panic!("expected ViewNotCreated, got {:?}", other.map(|r| r.sheets.len())),
    }
}

#[test]
fn test_host_failure_aborts_the_run() {
    let (mut host, _) = host_with(&frame_part());
    host.fail_on(HostCall::ActivateConfiguration, 1);
    let orchestrator = Orchestrator::new(host, PipelineSettings::default());

    assert!(matches!(orchestrator.generate(), Err(CommandError::Host(_))));
    let host = orchestrator.into_host();
    assert_eq!(host.call_count(HostCall::NewDrawing), 0);
    assert_eq!(host.call_count(HostCall::ActivateConfiguration), 2);
}

#[test]
fn test_pdf_export_reports_counts() {
    let temp = tempfile::TempDir::new().unwrap();
    let (mut host, _) = host_with(&frame_part());
    host.null_on(HostCall::CreateStandardView, 0);
    let orchestrator = Orchestrator::new(host, PipelineSettings::default());
    orchestrator.generate().unwrap();

    let output = temp.path().join("frame.pdf");
    let report = orchestrator.export_pdf(Some(&output)).unwrap();
    assert_eq!(report.path, output);
    assert_eq!(report.warnings, 1);
    assert!(output.exists());

    orchestrator
        .with_host(|host| host.fail_on(HostCall::SaveAs, 0))
        .unwrap();
    assert!(matches!(
        orchestrator.export_pdf(Some(&output)),
        Err(CommandError::Host(_))
    ));
}

#[test]
fn test_pdf_export_of_unwritable_path_fails_with_counts() {
    let temp = tempfile::TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    std::fs::write(&blocker, b"").unwrap();

    let (host, _) = host_with(&frame_part());
    let orchestrator = Orchestrator::new(host, PipelineSettings::default());
    orchestrator.generate().unwrap();

    let err = orchestrator
        .export_pdf(Some(&blocker.join("out.pdf")))
        .unwrap_err();
    assert!(matches!(
        err,
        CommandError::OutputFailed {
            errors: 1,
            warnings: 0
        }
    ));
}

#[test]
fn test_orchestrator_is_generic_over_host() {
    fn active_kind<H: CadHost>(orchestrator: &Orchestrator<H>) -> Option<DocumentKind> {
        orchestrator
            .with_host(|host| host.active_document().ok().flatten().map(|d| d.kind))
            .ok()
            .flatten()
    }
    let (host, _) = host_with(&frame_part());
    let orchestrator = Orchestrator::new(host, PipelineSettings::default());
    assert_eq!(active_kind(&orchestrator), Some(DocumentKind::Part));
}
