//! Screen presentation settings.
//!
//! The canvas reads only [`Grid`] from here; everything else is carried through
//! the codec untouched for the host application.

use borsh::{BorshDeserialize, BorshSerialize};

#[derive(Debug, Clone, PartialEq, BorshSerialize, BorshDeserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct DisplaySettings {
    pub default_stitch_font: String,
    /// One entry per palette item.
    pub symbols: Vec<Symbols>,
    pub symbol_settings: SymbolSettings,
    /// One entry per palette item.
    pub formats: Vec<Formats>,
    pub grid: Grid,
    pub view: View,
    pub zoom: u16,
    pub show_grid: bool,
    pub show_rulers: bool,
    pub show_centering_marks: bool,
    pub show_fabric_colors_with_symbols: bool,
    pub gaps_between_stitches: bool,
    pub outlined_stitches: bool,
    pub stitch_outline: StitchOutline,
    pub stitch_settings: StitchSettings,
}

impl DisplaySettings {
    /// Settings for a palette of `palette_size` items.
    #[must_use]
    pub fn new(palette_size: usize) -> Self {
        Self {
            default_stitch_font: String::from("CrossStitch3"),
            symbols: vec![Symbols::default(); palette_size],
            symbol_settings: SymbolSettings::default(),
            formats: vec![Formats::default(); palette_size],
            grid: Grid::default(),
            view: View::Solid,
            zoom: 100,
            show_grid: true,
            show_rulers: true,
            show_centering_marks: true,
            show_fabric_colors_with_symbols: false,
            gaps_between_stitches: false,
            outlined_stitches: true,
            stitch_outline: StitchOutline::default(),
            stitch_settings: StitchSettings::default(),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Symbol code points per stitch kind for one palette item.
#[derive(Debug, Default, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Symbols {
    pub full: Option<u16>,
    pub petite: Option<u16>,
    pub half: Option<u16>,
    pub quarter: Option<u16>,
    pub french_knot: Option<u16>,
    pub bead: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct SymbolSettings {
    pub screen_spacing: (u16, u16),
    pub printer_spacing: (u16, u16),
    pub scale_using_maximum_font_width: bool,
    pub scale_using_font_height: bool,
    pub stitch_size: u16,
    pub small_stitch_size: u16,
    pub draw_symbols_over_backstitches: bool,
    pub show_stitch_color: bool,
    pub use_large_half_stitch_symbol: bool,
    pub use_triangles_behind_quarter_stitches: bool,
}

impl Default for SymbolSettings {
    fn default() -> Self {
        Self {
            screen_spacing: (1, 1),
            printer_spacing: (1, 1),
            scale_using_maximum_font_width: true,
            scale_using_font_height: true,
            stitch_size: 100,
            small_stitch_size: 60,
            draw_symbols_over_backstitches: false,
            show_stitch_color: false,
            use_large_half_stitch_symbol: false,
            use_triangles_behind_quarter_stitches: false,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct Formats {
    pub symbol: SymbolFormat,
    pub back: LineFormat,
    pub straight: LineFormat,
    pub french: NodeFormat,
    pub bead: NodeFormat,
    pub special: LineFormat,
    pub font: FontFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SymbolFormat {
    pub use_alt_bg_color: bool,
    pub bg_color: String,
    pub fg_color: String,
}

impl Default for SymbolFormat {
    fn default() -> Self {
        Self {
            use_alt_bg_color: false,
            bg_color: String::from("FFFFFF"),
            fg_color: String::from("000000"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct LineFormat {
    pub use_alt_color: bool,
    pub color: String,
    pub style: LineStyle,
    pub thickness: f32,
}

impl Default for LineFormat {
    fn default() -> Self {
        Self {
            use_alt_color: false,
            color: String::from("000000"),
            style: LineStyle::Solid,
            thickness: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
pub enum LineStyle {
    Solid = 0,
    Barred = 1,
    Dotted = 2,
    ChainDotted = 3,
    Dashed = 4,
    Outlined = 5,
    Zebra = 6,
    ZigZag = 7,
    Morse = 8,
}

#[derive(Debug, Clone, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct NodeFormat {
    pub use_dot_style: bool,
    pub use_alt_color: bool,
    pub color: String,
    pub diameter: f32,
}

impl Default for NodeFormat {
    fn default() -> Self {
        Self {
            use_dot_style: true,
            use_alt_color: false,
            color: String::from("000000"),
            diameter: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct FontFormat {
    pub font_name: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub stitch_size: u16,
    pub small_stitch_size: u16,
}

impl Default for FontFormat {
    fn default() -> Self {
        Self {
            font_name: None,
            bold: false,
            italic: false,
            stitch_size: 100,
            small_stitch_size: 60,
        }
    }
}

/// Grid spacing and line styles.
#[derive(Debug, Clone, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct Grid {
    /// A major line is drawn every this many cells.
    pub major_line_every_stitches: u16,
    pub minor_screen_lines: GridLineStyle,
    pub major_screen_lines: GridLineStyle,
    pub minor_printer_lines: GridLineStyle,
    pub major_printer_lines: GridLineStyle,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            major_line_every_stitches: 10,
            minor_screen_lines: GridLineStyle::new("000000", 0.072),
            major_screen_lines: GridLineStyle::new("000000", 0.072),
            minor_printer_lines: GridLineStyle::new("000000", 0.144),
            major_printer_lines: GridLineStyle::new("000000", 0.504),
        }
    }
}

#[derive(Debug, Clone, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct GridLineStyle {
    pub color: String,
    pub thickness: f32,
}

impl GridLineStyle {
    #[must_use]
    pub fn new(color: &str, thickness: f32) -> Self {
        Self { color: color.to_owned(), thickness }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
pub enum View {
    Stitches = 0,
    Symbols = 1,
    Solid = 2,
    Information = 3,
    MachineEmbInfo = 4,
}

#[derive(Debug, Clone, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct StitchOutline {
    pub color: Option<String>,
    pub color_percentage: u16,
    pub thickness: f32,
}

impl Default for StitchOutline {
    fn default() -> Self {
        Self { color: None, color_percentage: 80, thickness: 0.2 }
    }
}

#[derive(Debug, Clone, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct StitchSettings {
    pub default_strands: DefaultStitchStrands,
    /// Entries 0..12 are for 1..=12 strands, entry 12 is the French knot.
    pub display_thickness: [f32; 13],
}

impl Default for StitchSettings {
    fn default() -> Self {
        Self {
            default_strands: DefaultStitchStrands::default(),
            display_thickness: [1.0, 1.5, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0, 5.5, 6.0, 6.5, 7.0, 4.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct DefaultStitchStrands {
    pub full: u16,
    pub petite: u16,
    pub half: u16,
    pub quarter: u16,
    pub back: u16,
    pub straight: u16,
    pub special: u16,
}

impl Default for DefaultStitchStrands {
    fn default() -> Self {
        Self { full: 2, petite: 2, half: 2, quarter: 2, back: 1, straight: 1, special: 2 }
    }
}
