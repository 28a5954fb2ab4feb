//! Print layout settings, carried through the codec for the host application.

use borsh::{BorshDeserialize, BorshSerialize};

#[derive(Debug, Clone, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct PrintSettings {
    pub font: Font,
    pub header: String,
    pub footer: String,
    pub margins: PageMargins,
    pub show_page_numbers: bool,
    pub show_adjacent_page_numbers: bool,
    pub center_chart_on_pages: bool,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            font: Font::default(),
            header: String::new(),
            footer: String::new(),
            margins: PageMargins::default(),
            show_page_numbers: true,
            show_adjacent_page_numbers: true,
            center_chart_on_pages: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Font {
    pub name: String,
    pub size: u16,
    /// CSS-style weight, 100..=900.
    pub weight: u16,
    pub italic: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self { name: String::from("Arial"), size: 12, weight: 400, italic: false }
    }
}

/// Page margins in inches.
#[derive(Debug, Clone, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct PageMargins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub header: f32,
    pub footer: f32,
}

impl Default for PageMargins {
    fn default() -> Self {
        Self { left: 0.5, right: 0.5, top: 0.5, bottom: 0.5, header: 0.5, footer: 0.5 }
    }
}
