//! Scrollable menu widget
//!
//! The widget owns item storage, the cursor and its own drawing. Callers
//! decide what goes in it and what selecting an item means.

use crate::display::Renderer;

/// One menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuItem<T> {
    /// Text shown in the menu
    pub label: &'static str,
    /// What selecting this entry leads to
    pub target: T,
    /// Caller-defined value carried with the entry
    pub cookie: u16,
}

/// Menu operation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuError {
    /// No room for another item
    Full,
}

/// Scrollable single-selection menu
pub trait MenuWidget<T: Copy> {
    /// Remove all items, reset the cursor and set a new title
    fn clear(&mut self, title: &'static str);

    /// Append an item
    fn add_item(&mut self, label: &'static str, target: T, cookie: u16) -> Result<(), MenuError>;

    /// Number of items
    fn len(&self) -> usize;

    /// Returns true if the menu has no items
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the selected item
    fn selected(&self) -> usize;

    /// Move the cursor to `index`
    ///
    /// Returns false and leaves the cursor alone if `index` is out of range.
    fn select(&mut self, index: usize) -> bool;

    /// Move the cursor by `delta` items
    fn move_selection(&mut self, delta: i32);

    /// Item at `index`
    fn item(&self, index: usize) -> Option<MenuItem<T>>;

    /// Item under the cursor
    fn selected_item(&self) -> Option<MenuItem<T>> {
        self.item(self.selected())
    }

    /// Current title
    fn title(&self) -> &'static str;

    /// Draw the menu into the renderer's back buffer
    fn draw(&self, renderer: &mut dyn Renderer);
}
