/// Keys the widgets observe. Each controller owns its own handler and the
/// host forwards every key to all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Escape,
    Enter,
    Up,
    Down,
    Char(char),
}

/// What a pointer press landed on, as classified by the host's hit testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Panel,
    ToggleButton,
    Outside,
}
