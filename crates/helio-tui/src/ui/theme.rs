// Centralized theme: the regular palette plus a high-contrast variant
// selected by the accessibility menu's contrast toggle.

use helio_core::models::PriorityTone;
use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// COLOR PALETTE
// =============================================================================

pub const BG_APP: Color = Color::Rgb(0, 0, 0);
pub const BG_CARD: Color = Color::Rgb(18, 18, 18);
pub const BG_UNREAD: Color = Color::Rgb(16, 28, 44);
pub const BG_SELECTED: Color = Color::Rgb(32, 32, 32);

pub const TEXT_PRIMARY: Color = Color::Rgb(220, 220, 220);
pub const TEXT_MUTED: Color = Color::Rgb(128, 128, 128);

pub const ACCENT_PRIMARY: Color = Color::Rgb(86, 156, 214);
pub const ACCENT_SUCCESS: Color = Color::Rgb(106, 153, 85);
pub const ACCENT_WARNING: Color = Color::Rgb(206, 145, 120);
pub const ACCENT_ERROR: Color = Color::Rgb(244, 112, 112);

pub const BORDER_ACTIVE: Color = Color::Rgb(100, 100, 100);
pub const BORDER_INACTIVE: Color = Color::Rgb(60, 60, 60);

// High contrast: pure black/white/yellow
pub const HC_BG: Color = Color::Black;
pub const HC_TEXT: Color = Color::White;
pub const HC_ACCENT: Color = Color::Yellow;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub card: Color,
    pub unread: Color,
    pub selected: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub border_dim: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

pub fn palette(high_contrast: bool) -> Palette {
    if high_contrast {
        Palette {
            bg: HC_BG,
            card: HC_BG,
            unread: HC_BG,
            selected: Color::DarkGray,
            text: HC_TEXT,
            muted: HC_TEXT,
            accent: HC_ACCENT,
            border: HC_TEXT,
            border_dim: HC_TEXT,
            success: Color::LightGreen,
            warning: HC_ACCENT,
            error: Color::LightRed,
        }
    } else {
        Palette {
            bg: BG_APP,
            card: BG_CARD,
            unread: BG_UNREAD,
            selected: BG_SELECTED,
            text: TEXT_PRIMARY,
            muted: TEXT_MUTED,
            accent: ACCENT_PRIMARY,
            border: BORDER_ACTIVE,
            border_dim: BORDER_INACTIVE,
            success: ACCENT_SUCCESS,
            warning: ACCENT_WARNING,
            error: ACCENT_ERROR,
        }
    }
}

impl Palette {
    pub fn tone(&self, tone: PriorityTone) -> Color {
        match tone {
            PriorityTone::Calm => self.accent,
            PriorityTone::Caution => self.warning,
            PriorityTone::Danger => self.error,
        }
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }
}
