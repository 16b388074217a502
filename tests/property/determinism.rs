//! Property-based tests for determinism guarantees

use proptest::prelude::*;
use std::path::PathBuf;
use weldsheet::drawing::configuration_name;
use weldsheet::host::MemoryHost;
use weldsheet::notes::{
    compose, ManufacturingMethod, NoteSelection, SectionType, SurfaceTreatment, Welding,
};
use weldsheet::orchestrator::{Orchestrator, PipelineSettings};
use weldsheet::part::{CutlistItem, PartDescription};
use weldsheet::partition::partition;

/// Cutlists of 0..4 bodies each, body names unique across the part.
fn cutlists() -> impl Strategy<Value = Vec<CutlistItem>> {
    prop::collection::vec(0usize..4, 0..8).prop_map(|sizes| {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &n)| CutlistItem {
                name: format!("item {}", i),
                bodies: (0..n).map(|b| format!("Body{}<{}>", i, b)).collect(),
            })
            .collect()
    })
}

fn selection() -> impl Strategy<Value = NoteSelection> {
    (
        ".{0,6}",
        0usize..4,
        0usize..5,
        prop::option::of("[0-9]{1,2}"),
        0usize..5,
    )
        .prop_map(|(quantity, method, section, weld, surface)| NoteSelection {
            quantity_required: quantity,
            manufacturing_method: ManufacturingMethod::ALL[method],
            section_type: SectionType::ALL[section],
            welding: weld.map(Welding::required).unwrap_or_default(),
            surface_treatment: SurfaceTreatment::ALL[surface],
        })
}

proptest! {
    /// Units are exactly the non-empty items, densely indexed, in order.
    #[test]
    fn partition_is_dense_and_ordered(items in cutlists()) {
        let units = partition(&items);
        let non_empty: Vec<&CutlistItem> = items.iter().filter(|i| !i.bodies.is_empty()).collect();
        prop_assert_eq!(units.len(), non_empty.len());
        for (i, (unit, item)) in units.iter().zip(non_empty).enumerate() {
            prop_assert_eq!(unit.index, i);
            prop_assert_eq!(&unit.item_name, &item.name);
            prop_assert_eq!(&unit.representative_body, &item.bodies[0]);
        }
    }

    /// K units give K sheets of three views bound to Config_CutList_{i-1}.
    #[test]
    fn generate_matches_unit_count(items in cutlists()) {
        let k = items.iter().filter(|i| !i.bodies.is_empty()).count();
        let mut host = MemoryHost::new();
        host.open_part(&PartDescription {
            path: PathBuf::from("prop.sldprt"),
            bodies: vec![],
            cutlists: items,
        });
        let orchestrator = Orchestrator::new(host, PipelineSettings::default());
        match orchestrator.generate() {
            Ok(report) => {
                prop_assert_eq!(report.sheets.len(), k);
                for (i, sheet) in report.sheets.iter().enumerate() {
                    prop_assert_eq!(sheet.views.len(), 3);
                    prop_assert_eq!(&sheet.configuration, &configuration_name(i));
                }
            }
            Err(_) => prop_assert_eq!(k, 0),
        }
    }

    /// Same selection, same bytes.
    #[test]
    fn note_composition_is_deterministic(selection in selection()) {
        let text = compose(&selection);
        prop_assert_eq!(compose(&selection.clone()), text.clone());
        let expected_prefix = format!("NOTES:\nQUANTITY REQUIRED: {}\n", selection.quantity_required);
        prop_assert!(text.starts_with(&expected_prefix));
    }
}
