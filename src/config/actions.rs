#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAction {
    Quit,
    Suspend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    /// Flip a popup between open and closed.
    Toggle,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowcaseAction {
    OpenModal,
    CycleSide,
    CycleSize,
    ToggleCentered,
}
