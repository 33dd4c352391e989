//! Menu level manager
//!
//! The game shares one menu widget between two levels. Switching level
//! always rebuilds the widget from scratch; the creature list remembers
//! which creature was selected across switches.

use critter_hal::MenuWidget;

use crate::catalog::{CreatureId, CATALOG_SIZE};
use crate::ownership::OwnershipStore;
use crate::state::{AppState, GameState};

/// Title of the top level menu
pub const TOP_MENU_TITLE: &str = "Badge Monsters";

/// Title of the creature list
pub const CREATURE_MENU_TITLE: &str = "Monsters";

/// Largest number of entries either level produces
pub const MENU_CAPACITY: usize = CATALOG_SIZE;

/// Top menu entries: label and target state, cookie is the position
const TOP_ENTRIES: [(&str, AppState); 3] = [
    ("Creatures", AppState::CreatureBrowse),
    ("Trade", AppState::Trading),
    ("Exit", AppState::Exit),
];

/// Which entries the menu widget holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuLevel {
    /// Top level game menu
    Top,
    /// Owned creatures
    CreatureBrowse,
}

/// Clear `menu` and fill it for `level`
///
/// The creature list gets one entry per owned creature in catalog order,
/// with the creature id as cookie. The previously browsed creature is
/// selected again if it is still listed; otherwise the first entry is
/// selected and becomes the current creature.
pub fn rebuild<M>(level: MenuLevel, game: &mut GameState, ownership: &OwnershipStore, menu: &mut M)
where
    M: MenuWidget<AppState> + ?Sized,
{
    match level {
        MenuLevel::Top => build_top(menu),
        MenuLevel::CreatureBrowse => build_creatures(game, ownership, menu),
    }
    game.menu_level = level;
    game.redraw_needed = true;
    debug!("menu level {} with {} entries", level, menu.len());
}

/// Store the selected creature before the creature list is left
pub fn remember_selection<M>(game: &mut GameState, menu: &M)
where
    M: MenuWidget<AppState> + ?Sized,
{
    let Some(item) = menu.selected_item() else {
        return;
    };
    match CreatureId::new(item.cookie) {
        Some(id) => game.last_browsed_creature_id = id,
        None => warn!("menu cookie {} is not a creature", item.cookie),
    }
}

fn build_top<M>(menu: &mut M)
where
    M: MenuWidget<AppState> + ?Sized,
{
    menu.clear(TOP_MENU_TITLE);
    for (cookie, (label, target)) in TOP_ENTRIES.iter().enumerate() {
        add(menu, label, *target, cookie as u16);
    }
    #[cfg(feature = "debug-unlock")]
    add(
        menu,
        "Force-unlock all",
        AppState::UnlockAll,
        TOP_ENTRIES.len() as u16,
    );
}

fn build_creatures<M>(game: &mut GameState, ownership: &OwnershipStore, menu: &mut M)
where
    M: MenuWidget<AppState> + ?Sized,
{
    menu.clear(CREATURE_MENU_TITLE);
    for id in ownership.owned_ids() {
        add(menu, id.creature().name, AppState::ShowCreature, id.raw());
    }

    let wanted = game.last_browsed_creature_id.raw();
    let restored = (0..menu.len()).find(|&i| menu.item(i).map(|item| item.cookie) == Some(wanted));
    match restored {
        Some(index) => {
            menu.select(index);
            game.current_creature_id = game.last_browsed_creature_id;
        }
        None => {
            menu.select(0);
            if let Some(item) = menu.item(0) {
                match CreatureId::new(item.cookie) {
                    Some(id) => game.current_creature_id = id,
                    None => warn!("menu cookie {} is not a creature", item.cookie),
                }
            }
        }
    }
}

fn add<M>(menu: &mut M, label: &'static str, target: AppState, cookie: u16)
where
    M: MenuWidget<AppState> + ?Sized,
{
    if menu.add_item(label, target, cookie).is_err() {
        warn!("menu full, dropped {}", label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tone;
    use critter_display::DynMenu;
    use critter_hal::Audio;

    struct Silent;

    impl Audio for Silent {
        fn beep(&mut self, _frequency_hz: u16, _duration_ms: u16) {}
    }

    fn id(raw: u16) -> CreatureId {
        CreatureId::new(raw).unwrap()
    }

    fn owning(raws: &[u16]) -> OwnershipStore {
        let mut store = OwnershipStore::new(Tone::new(900, 200));
        for &raw in raws {
            store.grant(id(raw), &mut Silent);
        }
        store
    }

    #[test]
    fn test_top_menu_entries() {
        let mut game = GameState::new(id(0));
        let mut menu: DynMenu<AppState, MENU_CAPACITY> = DynMenu::default();
        rebuild(MenuLevel::Top, &mut game, &owning(&[0]), &mut menu);

        assert_eq!(menu.title(), TOP_MENU_TITLE);
        assert_eq!(menu.item(0).map(|i| i.target), Some(AppState::CreatureBrowse));
        assert_eq!(menu.item(1).map(|i| i.target), Some(AppState::Trading));
        assert_eq!(menu.item(2).map(|i| i.target), Some(AppState::Exit));
        assert_eq!(menu.item(2).map(|i| i.cookie), Some(2));
        #[cfg(not(feature = "debug-unlock"))]
        assert_eq!(menu.len(), 3);
        #[cfg(feature = "debug-unlock")]
        assert_eq!(menu.item(3).map(|i| i.target), Some(AppState::UnlockAll));
        assert_eq!(game.menu_level, MenuLevel::Top);
        assert!(game.redraw_needed);
    }

    #[test]
    fn test_creature_list_matches_ownership() {
        let mut game = GameState::new(id(5));
        let mut menu: DynMenu<AppState, MENU_CAPACITY> = DynMenu::default();
        let store = owning(&[20, 5, 1]);
        rebuild(MenuLevel::CreatureBrowse, &mut game, &store, &mut menu);

        assert_eq!(menu.len(), store.owned_count());
        let cookies: heapless::Vec<u16, 4> = (0..menu.len())
            .filter_map(|i| menu.item(i).map(|item| item.cookie))
            .collect();
        assert_eq!(cookies.as_slice(), &[1, 5, 20]);
        assert_eq!(menu.item(1).map(|i| i.label), Some(id(5).creature().name));
        assert!(menu.item(0).map(|i| i.target == AppState::ShowCreature).unwrap_or(false));
    }

    #[test]
    fn test_creature_list_selects_last_browsed() {
        let mut game = GameState::new(id(1));
        game.last_browsed_creature_id = id(20);
        let mut menu: DynMenu<AppState, MENU_CAPACITY> = DynMenu::default();
        rebuild(MenuLevel::CreatureBrowse, &mut game, &owning(&[1, 5, 20]), &mut menu);

        assert_eq!(menu.selected(), 2);
        assert_eq!(game.current_creature_id, id(20));
    }

    #[test]
    fn test_creature_list_falls_back_to_first_entry() {
        let mut game = GameState::new(id(7));
        game.last_browsed_creature_id = id(12);
        let mut menu: DynMenu<AppState, MENU_CAPACITY> = DynMenu::default();
        rebuild(MenuLevel::CreatureBrowse, &mut game, &owning(&[3, 7]), &mut menu);

        assert_eq!(menu.selected(), 0);
        assert_eq!(game.current_creature_id, id(3));
    }

    #[test]
    fn test_remember_selection() {
        let mut game = GameState::new(id(1));
        let mut menu: DynMenu<AppState, MENU_CAPACITY> = DynMenu::default();
        rebuild(MenuLevel::CreatureBrowse, &mut game, &owning(&[1, 5, 20]), &mut menu);
        menu.move_selection(1);
        remember_selection(&mut game, &menu);
        assert_eq!(game.last_browsed_creature_id, id(5));
    }

    #[test]
    fn test_remember_ignores_bad_cookie() {
        let mut game = GameState::new(id(1));
        let mut menu: DynMenu<AppState, MENU_CAPACITY> = DynMenu::default();
        menu.clear(CREATURE_MENU_TITLE);
        menu.add_item("bogus", AppState::ShowCreature, 400).unwrap();
        remember_selection(&mut game, &menu);
        assert_eq!(game.last_browsed_creature_id, id(1));
    }
}
