pub mod header;
pub mod statusbar;

pub use header::render_header;
pub use statusbar::render_statusbar;
