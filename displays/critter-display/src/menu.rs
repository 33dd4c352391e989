//! Dynamic menu widget
//!
//! Fixed-capacity list of entries with a wrapping cursor. Only the rows
//! around the cursor are drawn when the list is taller than the screen.

use critter_hal::{Color, MenuError, MenuItem, MenuWidget, Renderer};
use heapless::Vec;

/// Layout and colors used when drawing a menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuStyle {
    /// Y position of the first item row
    pub top: i16,
    /// Height of one row in pixels
    pub line_height: i16,
    /// Number of item rows shown at once
    pub visible_rows: usize,
    /// Title color
    pub title: Color,
    /// Unselected item color
    pub text: Color,
    /// Selected item color
    pub highlight: Color,
}

impl Default for MenuStyle {
    fn default() -> Self {
        Self {
            top: 14,
            line_height: 10,
            visible_rows: 9,
            title: Color::YELLOW,
            text: Color::WHITE,
            highlight: Color::GREEN,
        }
    }
}

/// Menu holding up to `N` entries
pub struct DynMenu<T, const N: usize> {
    title: &'static str,
    items: Vec<MenuItem<T>, N>,
    selected: usize,
    style: MenuStyle,
}

impl<T: Copy, const N: usize> Default for DynMenu<T, N> {
    fn default() -> Self {
        Self::new(MenuStyle::default())
    }
}

impl<T: Copy, const N: usize> DynMenu<T, N> {
    /// Create an empty, untitled menu
    pub const fn new(style: MenuStyle) -> Self {
        Self {
            title: "",
            items: Vec::new(),
            selected: 0,
            style,
        }
    }

    /// Drawing style
    pub fn style(&self) -> &MenuStyle {
        &self.style
    }

    /// Index of the first row drawn, keeping the cursor on screen
    pub fn first_visible(&self) -> usize {
        let rows = self.style.visible_rows.max(1);
        if self.selected >= rows {
            self.selected + 1 - rows
        } else {
            0
        }
    }
}

impl<T: Copy, const N: usize> MenuWidget<T> for DynMenu<T, N> {
    fn clear(&mut self, title: &'static str) {
        self.title = title;
        self.items.clear();
        self.selected = 0;
    }

    fn add_item(&mut self, label: &'static str, target: T, cookie: u16) -> Result<(), MenuError> {
        self.items
            .push(MenuItem {
                label,
                target,
                cookie,
            })
            .map_err(|_| MenuError::Full)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn selected(&self) -> usize {
        self.selected
    }

    fn select(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    fn move_selection(&mut self, delta: i32) {
        let len = self.items.len() as i32;
        if len == 0 {
            return;
        }
        // Wraps at both ends
        self.selected = (self.selected as i32 + delta).rem_euclid(len) as usize;
    }

    fn item(&self, index: usize) -> Option<MenuItem<T>> {
        self.items.get(index).copied()
    }

    fn title(&self) -> &'static str {
        self.title
    }

    fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.clear();

        renderer.set_color(self.style.title);
        renderer.move_cursor(0, 0);
        renderer.write_text(self.title);

        let first = self.first_visible();
        let rows = self.style.visible_rows.max(1);
        let mut y = self.style.top;
        for (index, item) in self.items.iter().enumerate().skip(first).take(rows) {
            renderer.move_cursor(0, y);
            if index == self.selected {
                renderer.set_color(self.style.highlight);
                renderer.write_text(">");
            } else {
                renderer.set_color(self.style.text);
                renderer.write_text(" ");
            }
            renderer.write_text(item.label);
            y += self.style.line_height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use critter_hal::{DisplayError, SpriteId};
    use heapless::String;

    /// Renderer that records every line of text written
    #[derive(Default)]
    struct TextLog {
        lines: Vec<String<32>, 16>,
        cleared: usize,
    }

    impl Renderer for TextLog {
        fn clear(&mut self) {
            self.cleared += 1;
            self.lines.clear();
        }
        fn move_cursor(&mut self, _x: i16, _y: i16) {
            let _ = self.lines.push(String::new());
        }
        fn set_color(&mut self, _color: Color) {}
        fn write_text(&mut self, text: &str) {
            if let Some(line) = self.lines.last_mut() {
                let _ = line.push_str(text);
            }
        }
        fn write_wrapped(&mut self, text: &str) {
            self.write_text(text);
        }
        fn draw_sprite(&mut self, _sprite: SpriteId) {}
        fn present(&mut self) -> Result<(), DisplayError> {
            Ok(())
        }
        fn dimensions(&self) -> (u16, u16) {
            (132, 132)
        }
    }

    fn filled(count: u16) -> DynMenu<u8, 8> {
        let mut menu = DynMenu::default();
        menu.clear("Test");
        for i in 0..count {
            menu.add_item("item", i as u8, i).unwrap();
        }
        menu
    }

    #[test]
    fn test_add_until_full() {
        let mut menu = filled(8);
        assert_eq!(menu.len(), 8);
        assert_eq!(menu.add_item("extra", 0, 0), Err(MenuError::Full));
    }

    #[test]
    fn test_clear_resets_cursor() {
        let mut menu = filled(4);
        menu.select(3);
        menu.clear("Other");
        assert_eq!(menu.selected(), 0);
        assert!(menu.is_empty());
        assert_eq!(menu.title(), "Other");
    }

    #[test]
    fn test_move_wraps() {
        let mut menu = filled(3);
        menu.move_selection(-1);
        assert_eq!(menu.selected(), 2);
        menu.move_selection(1);
        assert_eq!(menu.selected(), 0);
        menu.move_selection(7);
        assert_eq!(menu.selected(), 1);
    }

    #[test]
    fn test_move_on_empty_menu() {
        let mut menu: DynMenu<u8, 4> = DynMenu::default();
        menu.move_selection(1);
        assert_eq!(menu.selected(), 0);
        assert_eq!(menu.selected_item(), None);
    }

    #[test]
    fn test_select_out_of_range() {
        let mut menu = filled(3);
        assert!(menu.select(2));
        assert!(!menu.select(3));
        assert_eq!(menu.selected(), 2);
        assert_eq!(menu.selected_item().map(|i| i.cookie), Some(2));
    }

    #[test]
    fn test_draw_marks_selection() {
        let mut menu = filled(3);
        menu.select(1);
        let mut log = TextLog::default();
        menu.draw(&mut log);

        assert_eq!(log.cleared, 1);
        assert_eq!(log.lines[0].as_str(), "Test");
        assert_eq!(log.lines[1].as_str(), " item");
        assert_eq!(log.lines[2].as_str(), ">item");
        assert_eq!(log.lines[3].as_str(), " item");
    }

    #[test]
    fn test_scroll_keeps_cursor_visible() {
        let style = MenuStyle {
            visible_rows: 3,
            ..MenuStyle::default()
        };
        let mut menu: DynMenu<u8, 8> = DynMenu::new(style);
        menu.clear("Scroll");
        for i in 0..8 {
            menu.add_item("item", i, i as u16).unwrap();
        }
        menu.select(5);
        assert_eq!(menu.first_visible(), 3);

        let mut log = TextLog::default();
        menu.draw(&mut log);
        // Title plus three rows, the last one selected
        assert_eq!(log.lines.len(), 4);
        assert_eq!(log.lines[3].as_str(), ">item");
    }
}
