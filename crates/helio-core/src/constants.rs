use std::time::Duration;

/// Storage key holding the serialized notification collection
pub const NOTIFICATIONS_KEY: &str = "helione_notifications";

/// Storage key holding the font scale factor
pub const FONT_SCALE_KEY: &str = "helio_font_scale";

pub const FONT_SCALE_DEFAULT: f64 = 1.0;
pub const FONT_SCALE_MIN: f64 = 0.8;
pub const FONT_SCALE_MAX: f64 = 1.5;
pub const FONT_SCALE_STEP: f64 = 0.1;

/// Delay between the visibility flip and the expand flip when opening the panel
pub const PANEL_OPEN_DELAY: Duration = Duration::from_millis(50);

/// Delay between the collapse flip and hiding the panel when closing
pub const PANEL_CLOSE_DELAY: Duration = Duration::from_millis(300);

/// Badge text shown once the unread count passes this value
pub const BADGE_MAX: usize = 99;

/// Upper bound on characters collected for read-aloud
pub const READ_ALOUD_MAX_CHARS: usize = 20_000;

/// Calendar date format used once a notification is a week old
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Language tag handed to the speech engine
pub const SPEECH_LANG: &str = "pt-BR";
