pub mod accessibility_menu;
pub mod page;
pub mod panel;

pub use accessibility_menu::{render_menu, MenuProps};
pub use page::render_page;
pub use panel::{render_panel, PanelProps};
