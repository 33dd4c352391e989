//! Screen layouts
//!
//! Each function draws one full screen into the renderer's back buffer.
//! Presenting the frame is up to the caller.

use core::fmt::Write;

use critter_hal::{Color, MenuWidget, Renderer};
use heapless::String;

use crate::catalog::{Creature, CATALOG_SIZE};
use crate::menu::MenuLevel;
use crate::state::AppState;

/// Distance of the hint line from the bottom edge
const HINT_OFFSET: i16 = 15;

/// Y position of the portrait and the starting banner
const PORTRAIT_Y: i16 = 12;

fn bottom_line(renderer: &dyn Renderer) -> i16 {
    let (_, height) = renderer.dimensions();
    (height as i16).saturating_sub(HINT_OFFSET)
}

/// Menu screen; the creature list adds a collected counter
pub fn draw_menu<M>(renderer: &mut dyn Renderer, menu: &M, level: MenuLevel, owned: usize)
where
    M: MenuWidget<AppState> + ?Sized,
{
    menu.draw(renderer);
    if level == MenuLevel::CreatureBrowse {
        let mut line: String<24> = String::new();
        let _ = write!(line, "Collected: {}/{}", owned, CATALOG_SIZE);
        let y = bottom_line(renderer);
        renderer.set_color(Color::WHITE);
        renderer.move_cursor(1, y);
        renderer.write_text(&line);
    }
}

/// Portrait, name and navigation hints of one creature
pub fn draw_creature(renderer: &mut dyn Renderer, creature: &Creature, is_starting: bool) {
    renderer.clear();
    renderer.move_cursor(0, PORTRAIT_Y);
    renderer.set_color(creature.color);
    renderer.draw_sprite(creature.sprite);
    if is_starting {
        renderer.set_color(Color::WHITE);
        renderer.move_cursor(0, PORTRAIT_Y);
        renderer.write_text("--starting-mon--");
    }

    renderer.move_cursor(10, 0);
    renderer.set_color(creature.color);
    renderer.write_text(creature.name);

    let y = bottom_line(renderer);
    renderer.set_color(Color::WHITE);
    renderer.move_cursor(43, y);
    renderer.write_text("|down|");
    renderer.set_color(Color::GREEN);
    renderer.move_cursor(5, y);
    renderer.write_text("<Back");
    renderer.move_cursor(90, y);
    renderer.write_text("desc>");
}

/// Wrapped description text of one creature
pub fn draw_description(renderer: &mut dyn Renderer, creature: &Creature) {
    renderer.clear();
    renderer.set_color(Color::WHITE);
    renderer.move_cursor(8, 5);
    renderer.write_wrapped(creature.description);
    let y = bottom_line(renderer);
    renderer.move_cursor(5, y);
    renderer.write_text("<Back");
}

/// Shown once on entry to trading
pub fn draw_trading(renderer: &mut dyn Renderer) {
    renderer.clear();
    renderer.set_color(Color::WHITE);
    renderer.move_cursor(10, 60);
    renderer.write_text("TRADING");
    renderer.move_cursor(10, 70);
    renderer.write_text("MONSTERS!");
}

/// Confirmation after granting the whole catalog
#[cfg(feature = "debug-unlock")]
pub fn draw_unlock_all(renderer: &mut dyn Renderer) {
    renderer.clear();
    renderer.set_color(Color::WHITE);
    renderer.move_cursor(2, 2);
    renderer.write_wrapped("ALL MONSTERS\nENABLED!");
}
