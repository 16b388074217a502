//! Configuration Synthesis
//!
//! Turns each cutlist unit into a named part configuration whose show-state has exactly
//! one visible body: the unit's representative body. Creation is idempotent on the
//! configuration name; visibility is re-applied on every run.
//!
//! Every host call is checked. The first failure aborts the remaining steps for the unit
//! and is returned to the caller.

use crate::drawing::configuration_name;
use crate::error::HostError;
use crate::host::{CadHost, ConfigurationRequest};
use crate::partition::CutlistUnit;
use crate::types::DocumentId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Outcome of synthesizing one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesizedConfiguration {
    pub name: String,
    /// False when the configuration already existed from an earlier run.
    pub created: bool,
    pub visible_body: String,
}

/// Synthesize the configuration for one unit.
///
/// Steps, in order: create the configuration if absent (without activating it), activate
/// it, hide every body of the part, show the representative body, then force a rebuild so
/// the show-state is materialized before any view references the configuration.
pub fn synthesize<H: CadHost + ?Sized>(
    host: &mut H,
    part: &DocumentId,
    unit: &CutlistUnit,
) -> Result<SynthesizedConfiguration, HostError> {
    let name = configuration_name(unit.index);

    let existing = host.configuration_names(part)?;
    let created = !existing.iter().any(|n| *n == name);
    if created {
        host.add_configuration(part, &ConfigurationRequest::for_cutlist(&name))?;
        debug!(configuration = %name, "Created configuration");
    }

    host.activate_configuration(part, &name)?;

    // Every body of the part, not just this unit's group.
    for body in host.bodies(part)? {
        host.select_body(part, &body)?;
        host.hide_selected_bodies(part)?;
        host.clear_selection(part)?;
    }

    host.select_body(part, &unit.representative_body)?;
    host.show_selected_bodies(part)?;
    host.clear_selection(part)?;

    host.force_rebuild(part)?;

    Ok(SynthesizedConfiguration {
        name,
        created,
        visible_body: unit.representative_body.clone(),
    })
}

/// Synthesize configurations for all units in unit order.
pub fn synthesize_all<H: CadHost + ?Sized>(
    host: &mut H,
    part: &DocumentId,
    units: &[CutlistUnit],
) -> Result<Vec<SynthesizedConfiguration>, HostError> {
    let mut configurations = Vec::with_capacity(units.len());
    for unit in units {
        configurations.push(synthesize(host, part, unit)?);
    }
    info!(
        part = %part,
        total = configurations.len(),
        created = configurations.iter().filter(|c| c.created).count(),
        "Synthesized configurations"
    );
    Ok(configurations)
}
