//! Note Composition
//!
//! Maps a set of categorical selections to compliance/manufacturing note text. The note is
//! a fixed header followed by one optional block per axis, always in the same order:
//! manufacturing method, section type, welding, surface treatment. Each axis is a closed
//! enum whose variants carry their block; the `None` variant contributes nothing.
//!
//! Composition is pure. Placing the text on a sheet is the caller's job.

mod blocks;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ManufacturingMethod {
    #[default]
    None,
    Fabrication,
    Lasercutting,
    MachinedComponent,
}

impl ManufacturingMethod {
    pub const ALL: [ManufacturingMethod; 4] = [
        ManufacturingMethod::None,
        ManufacturingMethod::Fabrication,
        ManufacturingMethod::Lasercutting,
        ManufacturingMethod::MachinedComponent,
    ];

    pub const fn block(self) -> Option<&'static str> {
        match self {
            ManufacturingMethod::None => None,
            ManufacturingMethod::Fabrication => Some(blocks::FABRICATION),
            ManufacturingMethod::Lasercutting => Some(blocks::LASERCUTTING),
            ManufacturingMethod::MachinedComponent => Some(blocks::MACHINED_MANUFACTURE),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ManufacturingMethod::None => "None",
            ManufacturingMethod::Fabrication => "Fabrication",
            ManufacturingMethod::Lasercutting => "Lasercutting",
            ManufacturingMethod::MachinedComponent => "MachinedComponent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SectionType {
    #[default]
    None,
    Hollow,
    HotRolled,
    MachinedComponent,
    Plate,
}

impl SectionType {
    pub const ALL: [SectionType; 5] = [
        SectionType::None,
        SectionType::Hollow,
        SectionType::HotRolled,
        SectionType::MachinedComponent,
        SectionType::Plate,
    ];

    pub const fn block(self) -> Option<&'static str> {
        match self {
            SectionType::None => None,
            SectionType::Hollow => Some(blocks::HOLLOW_SECTION),
            SectionType::HotRolled => Some(blocks::HOT_ROLLED_SECTION),
            SectionType::MachinedComponent => Some(blocks::MACHINED_SECTION),
            SectionType::Plate => Some(blocks::PLATE),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SectionType::None => "None",
            SectionType::Hollow => "Hollow",
            SectionType::HotRolled => "HotRolled",
            SectionType::MachinedComponent => "MachinedComponent",
            SectionType::Plate => "Plate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SurfaceTreatment {
    #[default]
    None,
    Galvanised,
    ColdGal,
    Painted,
    MetalSpray,
}

impl SurfaceTreatment {
    pub const ALL: [SurfaceTreatment; 5] = [
        SurfaceTreatment::None,
        SurfaceTreatment::Galvanised,
        SurfaceTreatment::ColdGal,
        SurfaceTreatment::Painted,
        SurfaceTreatment::MetalSpray,
    ];

    pub const fn block(self) -> Option<&'static str> {
        match self {
            SurfaceTreatment::None => None,
            SurfaceTreatment::Galvanised => Some(blocks::GALVANISED),
            SurfaceTreatment::ColdGal => Some(blocks::COLD_GAL),
            SurfaceTreatment::Painted => Some(blocks::PAINTED),
            SurfaceTreatment::MetalSpray => Some(blocks::METAL_SPRAY),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SurfaceTreatment::None => "None",
            SurfaceTreatment::Galvanised => "Galvanised",
            SurfaceTreatment::ColdGal => "ColdGal",
            SurfaceTreatment::Painted => "Painted",
            SurfaceTreatment::MetalSpray => "MetalSpray",
        }
    }
}

/// Welding requirement; the thickness is free text and is not validated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Welding {
    #[default]
    None,
    Required { thickness: String },
}

impl Welding {
    pub fn required(thickness: impl Into<String>) -> Self {
        Welding::Required {
            thickness: thickness.into(),
        }
    }

    pub fn block(&self) -> Option<String> {
        match self {
            Welding::None => None,
            Welding::Required { thickness } => {
                let (size_pre, size_post) = blocks::WELD_SIZE;
                let (throat_pre, throat_post) = blocks::WELD_THROAT;
                Some(format!(
                    "{}{}{}{}{}{}{}",
                    blocks::WELDING_TITLE,
                    size_pre,
                    thickness,
                    size_post,
                    throat_pre,
                    thickness,
                    throat_post
                ))
            }
        }
    }
}

macro_rules! impl_axis_parse {
    ($ty:ident, $axis:literal) => {
        impl FromStr for $ty {
            type Err = String;

            /// Case-insensitive; spaces, dashes and underscores are ignored.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = normalize(s);
                $ty::ALL
                    .into_iter()
                    .find(|v| normalize(v.label()) == wanted)
                    .ok_or_else(|| {
                        let options: Vec<&str> = $ty::ALL.iter().map(|v| v.label()).collect();
                        format!(
                            "unknown {} '{}' (expected one of: {})",
                            $axis,
                            s,
                            options.join(", ")
                        )
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl_axis_parse!(ManufacturingMethod, "manufacturing method");
impl_axis_parse!(SectionType, "section type");
impl_axis_parse!(SurfaceTreatment, "surface treatment");

/// Selections collected from the note dialog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoteSelection {
    /// Free text, inserted verbatim.
    pub quantity_required: String,
    pub manufacturing_method: ManufacturingMethod,
    pub section_type: SectionType,
    pub welding: Welding,
    pub surface_treatment: SurfaceTreatment,
}

/// The optional axes, in the order their blocks appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteAxis {
    ManufacturingMethod,
    SectionType,
    Welding,
    SurfaceTreatment,
}

impl NoteAxis {
    pub const ORDER: [NoteAxis; 4] = [
        NoteAxis::ManufacturingMethod,
        NoteAxis::SectionType,
        NoteAxis::Welding,
        NoteAxis::SurfaceTreatment,
    ];

    /// This axis' block for `selection`, if it contributes one.
    pub fn block(self, selection: &NoteSelection) -> Option<Cow<'static, str>> {
        match self {
            NoteAxis::ManufacturingMethod => selection.manufacturing_method.block().map(Cow::Borrowed),
            NoteAxis::SectionType => selection.section_type.block().map(Cow::Borrowed),
            NoteAxis::Welding => selection.welding.block().map(Cow::Owned),
            NoteAxis::SurfaceTreatment => selection.surface_treatment.block().map(Cow::Borrowed),
        }
    }
}

/// Header block; always present.
pub fn header(quantity_required: &str) -> String {
    format!(
        "{}{}{}\n{}",
        blocks::HEADER_TITLE,
        blocks::HEADER_QUANTITY_PREFIX,
        quantity_required,
        blocks::HEADER_GENERAL
    )
}

/// Compose the note text for `selection`.
pub fn compose(selection: &NoteSelection) -> String {
    NoteAxis::ORDER
        .iter()
        .filter_map(|axis| axis.block(selection))
        .fold(header(&selection.quantity_required), |mut text, block| {
            text.push_str(&block);
            text
        })
}
