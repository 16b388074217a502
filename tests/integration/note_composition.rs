//! Note composition and placement

use super::test_utils::{frame_part, host_with};
use weldsheet::drawing::Anchor;
use weldsheet::error::CommandError;
use weldsheet::host::HostCall;
use weldsheet::notes::{
    compose, header, ManufacturingMethod, NoteSelection, SectionType, SurfaceTreatment, Welding,
};
use weldsheet::orchestrator::{Orchestrator, PipelineSettings};
use weldsheet::types::DocumentKind;

#[test]
fn test_empty_selection_is_exactly_the_header() {
    let text = compose(&NoteSelection::default());
    assert_eq!(text, header(""));
    assert!(text.starts_with("NOTES:\nQUANTITY REQUIRED: \n"));
}

#[test]
fn test_fabricated_welded_galvanised_note() {
    let selection = NoteSelection {
        quantity_required: "4".to_string(),
        manufacturing_method: ManufacturingMethod::Fabrication,
        section_type: SectionType::None,
        welding: Welding::required("6"),
        surface_treatment: SurfaceTreatment::Galvanised,
    };
    let text = compose(&selection);

    assert!(text.starts_with("NOTES:\nQUANTITY REQUIRED: 4\n"));
    let fabrication = text.find("MANUFACTURE: FABRICATION.").unwrap();
    let welding = text.find("WELDING:\n").unwrap();
    let finish = text.find("FINISH: HOT DIP GALVANISE").unwrap();
    assert!(fabrication < welding && welding < finish);
    assert!(text.contains("ALL WELDS TO BE 6mm FILLET WELDS"));
    assert!(text.contains("MINIMUM THROAT THICKNESS 6mm."));
    assert!(!text.contains("MATERIAL:"));

    assert_eq!(compose(&selection), text);
}

#[test]
fn test_every_combination_starts_with_header() {
    for method in ManufacturingMethod::ALL {
        for section in SectionType::ALL {
            for surface in SurfaceTreatment::ALL {
                let selection = NoteSelection {
                    quantity_required: "2".to_string(),
                    manufacturing_method: method,
                    section_type: section,
                    welding: Welding::None,
                    surface_treatment: surface,
                };
                let text = compose(&selection);
                assert!(text.starts_with(&header("2")));
                let blocks = [method.block(), section.block(), surface.block()]
                    .into_iter()
                    .flatten()
                    .map(str::len)
                    .sum::<usize>();
                assert_eq!(text.len(), header("2").len() + blocks);
            }
        }
    }
}

#[test]
fn test_axis_labels_parse_leniently() {
    assert_eq!(
        "machined component".parse::<ManufacturingMethod>(),
        Ok(ManufacturingMethod::MachinedComponent)
    );
    assert_eq!("hot-rolled".parse::<SectionType>(), Ok(SectionType::HotRolled));
    assert_eq!(
        "METAL_SPRAY".parse::<SurfaceTreatment>(),
        Ok(SurfaceTreatment::MetalSpray)
    );
    assert!("anodised".parse::<SurfaceTreatment>().is_err());
}

#[test]
fn test_annotate_on_part_is_rejected() {
    let (host, _) = host_with(&frame_part());
    let orchestrator = Orchestrator::new(host, PipelineSettings::default());
    let err = orchestrator
        .annotate(&NoteSelection::default(), None)
        .unwrap_err();
    assert!(matches!(
        err,
        CommandError::WrongDocumentType {
            expected: DocumentKind::Drawing,
            found: DocumentKind::Part
        }
    ));
}

#[test]
fn test_note_lands_on_requested_sheet_at_configured_anchor() {
    let (host, _) = host_with(&frame_part());
    let anchor = Anchor::new(0.3, 0.02);
    let settings = PipelineSettings {
        note_anchor: anchor,
        ..PipelineSettings::default()
    };
    let orchestrator = Orchestrator::new(host, settings);
    let generated = orchestrator.generate().unwrap();

    let selection = NoteSelection {
        quantity_required: "1".to_string(),
        section_type: SectionType::Plate,
        ..NoteSelection::default()
    };
    let report = orchestrator.annotate(&selection, Some("Sheet_2")).unwrap();
    assert_eq!(report.anchor, anchor);

    let host = orchestrator.into_host();
    let drawing = host.drawing(&generated.drawing.id).unwrap();
    let sheet = drawing.sheet("Sheet_2").unwrap();
    assert_eq!(sheet.notes.len(), 1);
    assert_eq!(sheet.notes[0].text, compose(&selection));
    assert_eq!(sheet.notes[0].position, Some(anchor));
    assert!(drawing.sheet("Sheet_1").unwrap().notes.is_empty());
}

#[test]
fn test_unknown_sheet_fails_without_inserting() {
    let (host, _) = host_with(&frame_part());
    let orchestrator = Orchestrator::new(host, PipelineSettings::default());
    orchestrator.generate().unwrap();

    assert!(matches!(
        orchestrator.annotate(&NoteSelection::default(), Some("Sheet_9")),
        Err(CommandError::Host(_))
    ));
    let host = orchestrator.into_host();
    assert_eq!(host.call_count(HostCall::InsertNote), 0);
}
