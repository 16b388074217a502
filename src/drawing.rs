//! Drawing vocabulary: naming contracts, sheet formats and the fixed view layout.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Template used for every generated drawing unless configured otherwise.
pub const DEFAULT_TEMPLATE_PATH: &str =
    r"C:\ProgramData\SOLIDWORKS\SOLIDWORKS 2023\templates\RSRG A3.DRWDOT";

/// Name of the configuration synthesized for the `index`-th emitted cutlist unit (0-based).
pub fn configuration_name(index: usize) -> String {
    format!("Config_CutList_{}", index)
}

/// Name of the `number`-th sheet (1-based).
pub fn sheet_name(number: usize) -> String {
    format!("Sheet_{}", number)
}

/// Point in sheet space, in metres from the sheet origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
}

impl Anchor {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Where composed notes are placed on the active sheet.
pub const DEFAULT_NOTE_ANCHOR: Anchor = Anchor::new(0.02, 0.05);

/// The three orthographic views placed on every sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewKind {
    Front,
    Right,
    Top,
}

impl ViewKind {
    /// Creation order on a sheet.
    pub const ALL: [ViewKind; 3] = [ViewKind::Front, ViewKind::Right, ViewKind::Top];

    pub const fn anchor(self) -> Anchor {
        match self {
            ViewKind::Front => Anchor::new(0.15, 0.15),
            ViewKind::Right => Anchor::new(0.25, 0.15),
            ViewKind::Top => Anchor::new(0.15, 0.25),
        }
    }

    /// Named orthographic projection the host creates the view from.
    pub const fn projection_name(self) -> &'static str {
        match self {
            ViewKind::Front => "*Front",
            ViewKind::Right => "*Right",
            ViewKind::Top => "*Top",
        }
    }

    pub fn from_projection_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.projection_name() == name)
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Front => f.write_str("Front"),
            ViewKind::Right => f.write_str("Right"),
            ViewKind::Top => f.write_str("Top"),
        }
    }
}

/// Paper sizes understood by the drawing template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaperSize {
    A0,
    A1,
    A2,
    A3,
    A4,
}

impl Default for PaperSize {
    fn default() -> Self {
        PaperSize::A3
    }
}

impl FromStr for PaperSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A0" => Ok(PaperSize::A0),
            "A1" => Ok(PaperSize::A1),
            "A2" => Ok(PaperSize::A2),
            "A3" => Ok(PaperSize::A3),
            "A4" => Ok(PaperSize::A4),
            other => Err(format!("unknown paper size '{}'", other)),
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaperSize::A0 => "A0",
            PaperSize::A1 => "A1",
            PaperSize::A2 => "A2",
            PaperSize::A3 => "A3",
            PaperSize::A4 => "A4",
        };
        f.write_str(s)
    }
}

/// Template and paper size shared by the document and every sheet in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetFormat {
    pub template: PathBuf,
    pub paper_size: PaperSize,
}

impl Default for SheetFormat {
    fn default() -> Self {
        Self {
            template: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            paper_size: PaperSize::A3,
        }
    }
}

/// Drawing scale as numerator:denominator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub numerator: f64,
    pub denominator: f64,
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            numerator: 1.0,
            denominator: 1.0,
        }
    }
}

/// Zone margins and grid; all zero means the template's own zones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneLayout {
    pub left_margin: f64,
    pub right_margin: f64,
    pub top_margin: f64,
    pub bottom_margin: f64,
    pub rows: u32,
    pub columns: u32,
}

/// Document-wide parameters fixed by the first sheet's setup call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetSetup {
    pub format: SheetFormat,
    pub scale: Scale,
    pub first_angle_projection: bool,
    pub zones: ZoneLayout,
}

impl SheetSetup {
    pub fn new(format: SheetFormat) -> Self {
        Self {
            format,
            scale: Scale::default(),
            first_angle_projection: false,
            zones: ZoneLayout::default(),
        }
    }
}

/// What the composer does when the host returns no view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingViewPolicy {
    /// Record the missing view and carry on with the sheet.
    #[default]
    Skip,
    /// Fail the whole generate run.
    Abort,
}

impl FromStr for MissingViewPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(MissingViewPolicy::Skip),
            "abort" => Ok(MissingViewPolicy::Abort),
            other => Err(format!(
                "unknown missing view policy '{}' (must be 'skip' or 'abort')",
                other
            )),
        }
    }
}
