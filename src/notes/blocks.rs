//! Fixed note text.

pub const HEADER_TITLE: &str = "NOTES:\n";

pub const HEADER_QUANTITY_PREFIX: &str = "QUANTITY REQUIRED: ";

pub const HEADER_GENERAL: &str = "\
ALL DIMENSIONS IN MILLIMETRES UNLESS OTHERWISE STATED.
DO NOT SCALE FROM THIS DRAWING.
REMOVE ALL BURRS AND SHARP EDGES.
";

pub const FABRICATION: &str = "\
MANUFACTURE: FABRICATION.
FABRICATE IN ACCORDANCE WITH BS EN 1090-2, EXECUTION CLASS EXC2.
";

pub const LASERCUTTING: &str = "\
MANUFACTURE: LASER CUT.
PROFILE TOLERANCES TO BS EN ISO 9013, RANGE 3. CUT EDGES TO BE FREE OF DROSS.
";

pub const MACHINED_MANUFACTURE: &str = "\
MANUFACTURE: MACHINED COMPONENT.
GENERAL TOLERANCES TO BS EN ISO 2768-mK UNLESS OTHERWISE STATED.
";

pub const HOLLOW_SECTION: &str = "\
MATERIAL: HOLLOW SECTION TO BS EN 10219, GRADE S355J2H.
";

pub const HOT_ROLLED_SECTION: &str = "\
MATERIAL: HOT ROLLED SECTION TO BS EN 10025-2, GRADE S355J2.
";

pub const MACHINED_SECTION: &str = "\
MATERIAL: BRIGHT BAR TO BS EN 10277, GRADE AS STATED IN TITLE BLOCK.
";

pub const PLATE: &str = "\
MATERIAL: PLATE TO BS EN 10025-2, GRADE S275JR.
";

pub const WELDING_TITLE: &str = "WELDING:\n";

/// First welding sentence, split around the thickness.
pub const WELD_SIZE: (&str, &str) = ("ALL WELDS TO BE ", "mm FILLET WELDS UNLESS OTHERWISE STATED.\n");

/// Second welding sentence, split around the thickness.
pub const WELD_THROAT: (&str, &str) = (
    "MINIMUM THROAT THICKNESS ",
    "mm. WELDING TO BS EN ISO 3834-3 BY QUALIFIED WELDERS.\n",
);

pub const GALVANISED: &str = "\
FINISH: HOT DIP GALVANISE TO BS EN ISO 1461 AFTER FABRICATION. PROVIDE VENT AND DRAIN HOLES.
";

pub const COLD_GAL: &str = "\
FINISH: COLD GALVANISE WITH ZINC RICH PAINT, MINIMUM 80 MICRONS DRY FILM THICKNESS.
";

pub const PAINTED: &str = "\
FINISH: BLAST CLEAN TO SA 2.5, PRIME AND PAINT TO SPECIFIED COLOUR.
";

pub const METAL_SPRAY: &str = "\
FINISH: THERMAL METAL SPRAY TO BS EN ISO 2063, SEALED.
";
