//! Theming and color definitions.
//!
//! A [`Theme`] is built from a base16 palette and maps every
//! [`HighlightCategory`] to a ratatui [`Style`]. The renderer receives the
//! theme as a value; nothing here is global.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeName;
use crate::highlight::HighlightCategory;

/// Sixteen base16 colors, `base00` through `base0F`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette([u32; 16]);

impl Palette {
    /// Catppuccin Frappé.
    pub const FRAPPE: Self = Self([
        0x30_34_46, 0x29_2c_3c, 0x41_45_59, 0x51_57_6d, 0x62_68_80, 0xc6_d0_f5, 0xf2_d5_cf,
        0xba_bb_f1, 0xe7_82_84, 0xef_9f_76, 0xe5_c8_90, 0xa6_d1_89, 0x81_c8_be, 0x8c_aa_ee,
        0xca_9e_e6, 0xee_be_be,
    ]);

    /// Gruvbox dark, hard contrast.
    pub const GRUVBOX: Self = Self([
        0x1d_20_21, 0x3c_38_36, 0x50_49_45, 0x66_5c_54, 0xbd_ae_93, 0xd5_c4_a1, 0xeb_db_b2,
        0xfb_f1_c7, 0xfb_49_34, 0xfe_80_19, 0xfa_bd_2f, 0xb8_bb_26, 0x8e_c0_7c, 0x83_a5_98,
        0xd3_86_9b, 0xd6_5d_0e,
    ]);

    /// Color of slot `index` (0x0 to 0xF).
    #[allow(clippy::cast_possible_truncation)]
    pub const fn base(&self, index: usize) -> Color {
        let hex = self.0[index & 0xF];
        Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

/// Styles for every element the editor draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub text: Style,
    pub current_line: Style,
    pub gutter: Style,
    pub gutter_current: Style,
    pub selection_bg: Color,
    pub status: Style,
    pub status_dirty: Style,
    categories: [Style; HighlightCategory::ALL.len()],
}

impl Theme {
    pub fn named(name: ThemeName) -> Self {
        match name {
            ThemeName::Frappe => Self::from_palette(&Palette::FRAPPE),
            ThemeName::Gruvbox => Self::from_palette(&Palette::GRUVBOX),
        }
    }

    pub fn from_palette(palette: &Palette) -> Self {
        let fg = |index| Style::default().fg(palette.base(index));
        let categories = HighlightCategory::ALL.map(|category| match category {
            HighlightCategory::Default
            | HighlightCategory::Operator
            | HighlightCategory::Punctuation => fg(0x05),
            HighlightCategory::Comment => fg(0x03).add_modifier(Modifier::ITALIC),
            HighlightCategory::String => fg(0x0B),
            HighlightCategory::Number
            | HighlightCategory::Constant
            | HighlightCategory::Attribute => fg(0x09),
            HighlightCategory::Keyword => fg(0x0E),
            HighlightCategory::Function => fg(0x0D),
            HighlightCategory::Type => fg(0x0A),
            HighlightCategory::Escape => fg(0x0C),
            HighlightCategory::Variable => fg(0x08),
        });

        Self {
            text: Style::default().fg(palette.base(0x05)).bg(palette.base(0x00)),
            current_line: Style::default().bg(palette.base(0x01)),
            gutter: Style::default().fg(palette.base(0x03)).bg(palette.base(0x00)),
            gutter_current: Style::default()
                .fg(palette.base(0x07))
                .bg(palette.base(0x01)),
            selection_bg: palette.base(0x02),
            status: Style::default().fg(palette.base(0x05)).bg(palette.base(0x01)),
            status_dirty: Style::default()
                .fg(palette.base(0x0A))
                .bg(palette.base(0x01))
                .add_modifier(Modifier::BOLD),
            categories,
        }
    }

    /// Foreground style of a highlight category.
    pub fn category(&self, category: HighlightCategory) -> Style {
        self.categories[category as usize]
    }

    /// Style of one text cell.
    pub fn cell(&self, category: HighlightCategory, selected: bool) -> Style {
        let style = self.category(category);
        if selected {
            style.bg(self.selection_bg)
        } else {
            style
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::named(ThemeName::default())
    }
}
