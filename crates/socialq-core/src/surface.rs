//! Text display targets.

/// Something that shows a line of text, typically a DOM element or a label.
///
/// Implementations use interior mutability: a surface is shared between its
/// owner (the page) and the counter that writes to it.
pub trait DisplaySurface {
    /// `false` once the element has been removed from its document.
    fn is_alive(&self) -> bool;

    /// Currently shown text.
    fn text(&self) -> String;

    fn set_text(&self, text: &str);
}
