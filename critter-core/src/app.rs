//! Application controller
//!
//! One `tick` per frame: read input, update the game state, drive the
//! beacon, and redraw if anything on screen changed. Nothing in a tick
//! blocks; every collaborator call is fire-and-forget or a poll.

use critter_hal::{
    Audio, ButtonInput, DeviceIdentity, IrTransport, KeyValueStore, Launcher, MenuWidget, Renderer,
};
use critter_protocol::{Button, ButtonMask, IrPacket, Opcode};

use crate::beacon::TradeBeacon;
use crate::catalog::CreatureId;
use crate::config::GameConfig;
use crate::menu::{self, MenuLevel};
use crate::ownership::{OwnershipStore, SaveReport};
use crate::state::{AppState, Event, GameState};
use crate::view;

/// Upper bound on received packets handled in one tick
pub const MAX_PACKETS_PER_TICK: usize = 8;

const UP: [Button; 1] = [Button::Up];
const DOWN: [Button; 1] = [Button::Down];
const CONFIRM: [Button; 2] = [Button::A, Button::EncoderSw];
const CONFIRM_OR_RIGHT: [Button; 3] = [Button::A, Button::EncoderSw, Button::Right];
const BACK: [Button; 2] = [Button::Left, Button::B];

/// Collaborators borrowed for the duration of one tick
pub struct BadgeIo<'a> {
    pub input: &'a mut dyn ButtonInput,
    pub renderer: &'a mut dyn Renderer,
    pub storage: &'a mut dyn KeyValueStore,
    pub ir: &'a mut dyn IrTransport,
    pub audio: &'a mut dyn Audio,
    pub identity: &'a dyn DeviceIdentity,
    pub launcher: &'a mut dyn Launcher,
}

/// Input of one tick after button mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Input {
    buttons: ButtonMask,
    rotary: i32,
}

impl Input {
    fn up(&self) -> bool {
        self.buttons.any_of(&UP) || self.rotary < 0
    }

    fn down(&self) -> bool {
        self.buttons.any_of(&DOWN) || self.rotary > 0
    }

    fn back(&self) -> bool {
        self.buttons.any_of(&BACK)
    }
}

/// The game's state machine and everything it owns
pub struct AppController<M> {
    game: GameState,
    ownership: OwnershipStore,
    beacon: TradeBeacon,
    menu: M,
    config: GameConfig,
    last_save: Option<SaveReport>,
}

impl<M: MenuWidget<AppState>> AppController<M> {
    /// Create a controller in `Init`
    pub fn new(menu: M, config: GameConfig) -> Self {
        Self {
            game: GameState::default(),
            ownership: OwnershipStore::new(config.grant_tone),
            beacon: TradeBeacon::new(config.beacon_interval_ticks, config.beacon_tone),
            menu,
            config,
            last_save: None,
        }
    }

    /// Current game state
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Current screen
    pub fn state(&self) -> AppState {
        self.game.current_app_state
    }

    /// Ownership of every creature
    pub fn ownership(&self) -> &OwnershipStore {
        &self.ownership
    }

    /// The menu widget
    pub fn menu(&self) -> &M {
        &self.menu
    }

    /// Beacon transmitter
    pub fn beacon(&self) -> &TradeBeacon {
        &self.beacon
    }

    /// Active configuration
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Result of the most recent save
    pub fn last_save(&self) -> Option<SaveReport> {
        self.last_save
    }

    /// Run one frame
    pub fn tick(&mut self, io: &mut BadgeIo<'_>) {
        let state = self.game.current_app_state;
        if state.is_interactive() {
            self.receive(io);
            let input = Input {
                buttons: io.input.latched_buttons(),
                rotary: io.input.rotary_delta(self.config.rotary_axis),
            };
            self.process_input(state, input, io);
        } else if state == AppState::Init {
            self.init(io);
        } else {
            self.exit(io);
            return;
        }
        self.render(io.renderer);
    }

    /// Load ownership, grant the starting creature, show the top menu
    fn init(&mut self, io: &mut BadgeIo<'_>) {
        self.ownership.load(io.storage);
        let initial = CreatureId::from_device_id(io.identity.device_id());
        self.game = GameState::new(initial);
        self.ownership.grant(initial, io.audio);
        io.ir.set_listening(true);
        info!(
            "init: starting creature {}, {} owned",
            initial.raw(),
            self.ownership.owned_count()
        );
        self.apply(Event::InitComplete, io);
    }

    /// Persist ownership and hand control back to the launcher
    fn exit(&mut self, io: &mut BadgeIo<'_>) {
        let report = self.ownership.save(io.storage);
        if report.is_complete() {
            info!("exit: saved {} creatures", report.written);
        } else {
            warn!("exit: {} of {} saves failed", report.failed, report.written + report.failed);
        }
        self.last_save = Some(report);
        io.ir.set_listening(false);
        io.launcher.return_to_launcher();
        self.apply(Event::ExitComplete, io);
        self.game.redraw_needed = false;
    }

    /// Drain received beacons
    fn receive(&mut self, io: &mut BadgeIo<'_>) {
        for _ in 0..MAX_PACKETS_PER_TICK {
            let Some(packet) = io.ir.poll_received() else {
                break;
            };
            self.handle_packet(packet, io);
        }
    }

    fn handle_packet(&mut self, packet: IrPacket, io: &mut BadgeIo<'_>) {
        match packet.beacon() {
            Ok(beacon) if beacon.opcode == Opcode::XmitMonster => {
                if let Some(id) = self.ownership.grant_raw(beacon.creature, io.audio) {
                    info!("received creature {}", id.raw());
                    if self.game.current_app_state.is_menu() {
                        self.game.redraw_needed = true;
                    }
                }
            }
            Ok(_) => {}
            Err(e) => debug!("ignored packet: {}", e),
        }
    }

    fn process_input(&mut self, state: AppState, input: Input, io: &mut BadgeIo<'_>) {
        match state {
            AppState::TopMenu => {
                if input.up() {
                    self.move_cursor(-1);
                } else if input.down() {
                    self.move_cursor(1);
                } else if input.buttons.any_of(&CONFIRM) {
                    if let Some(item) = self.menu.selected_item() {
                        self.apply(Event::Activate(item.target), io);
                    }
                }
            }
            AppState::CreatureBrowse => {
                if input.up() {
                    self.move_cursor(-1);
                } else if input.down() {
                    self.move_cursor(1);
                } else if input.back() {
                    self.apply(Event::Back, io);
                } else if input.buttons.any_of(&CONFIRM_OR_RIGHT) {
                    self.sync_current_creature();
                    self.apply(Event::Select, io);
                }
            }
            AppState::ShowCreature => {
                if input.back() {
                    self.apply(Event::Back, io);
                } else if input.buttons.any_of(&CONFIRM_OR_RIGHT) {
                    self.apply(Event::Select, io);
                }
            }
            AppState::ShowDescription => {
                if input.back() {
                    self.apply(Event::Back, io);
                }
            }
            AppState::Trading => self.trade(input, io),
            #[cfg(feature = "debug-unlock")]
            AppState::UnlockAll => {
                if !input.buttons.is_empty() {
                    self.apply(Event::UnlockComplete, io);
                }
            }
            AppState::Init | AppState::Exit => {}
        }
    }

    /// Beacon, show the trading screen once, cancel on any button
    fn trade(&mut self, input: Input, io: &mut BadgeIo<'_>) {
        self.beacon
            .tick(self.game.initial_creature_id, io.ir, io.audio);
        if !self.game.trading_active {
            self.game.trading_active = true;
            self.game.redraw_needed = true;
        }
        if input.buttons.any_of(&Button::ALL) {
            self.game.trading_active = false;
            self.apply(Event::CancelTrade, io);
        }
    }

    fn move_cursor(&mut self, delta: i32) {
        self.menu.move_selection(delta);
        if self.game.menu_level == MenuLevel::CreatureBrowse {
            self.sync_current_creature();
        }
        self.game.redraw_needed = true;
    }

    /// Take the current creature from the selected list entry
    fn sync_current_creature(&mut self) {
        if let Some(item) = self.menu.selected_item() {
            match CreatureId::new(item.cookie) {
                Some(id) => self.game.current_creature_id = id,
                None => warn!("menu cookie {} is not a creature", item.cookie),
            }
        }
    }

    /// Run a transition with its leave and enter actions
    fn apply(&mut self, event: Event, io: &mut BadgeIo<'_>) {
        let from = self.game.current_app_state;
        let to = from.transition(event);
        if to == from {
            trace!("no transition for {} in {}", event, from);
            return;
        }
        debug!("{} -> {} on {}", from, to, event);
        self.leave(from);
        self.game.current_app_state = to;
        self.enter(to, io);
    }

    fn leave(&mut self, state: AppState) {
        match state {
            AppState::CreatureBrowse => menu::remember_selection(&mut self.game, &self.menu),
            AppState::Trading => self.game.trading_active = false,
            _ => {}
        }
    }

    #[cfg_attr(not(feature = "debug-unlock"), allow(unused_variables))]
    fn enter(&mut self, state: AppState, io: &mut BadgeIo<'_>) {
        match state {
            AppState::TopMenu => {
                menu::rebuild(MenuLevel::Top, &mut self.game, &self.ownership, &mut self.menu);
            }
            AppState::CreatureBrowse => {
                menu::rebuild(
                    MenuLevel::CreatureBrowse,
                    &mut self.game,
                    &self.ownership,
                    &mut self.menu,
                );
            }
            AppState::ShowCreature | AppState::ShowDescription => {
                self.game.redraw_needed = true;
            }
            AppState::Trading => {
                self.beacon.reset();
                self.game.trading_active = false;
            }
            #[cfg(feature = "debug-unlock")]
            AppState::UnlockAll => {
                self.ownership.grant_all(io.audio);
                self.game.redraw_needed = true;
            }
            AppState::Init | AppState::Exit => {}
        }
    }

    /// Draw the current screen if it changed and present it
    fn render(&mut self, renderer: &mut dyn Renderer) {
        if !self.game.redraw_needed {
            return;
        }
        let creature = self.game.current_creature_id.creature();
        match self.game.current_app_state {
            AppState::TopMenu | AppState::CreatureBrowse => view::draw_menu(
                renderer,
                &self.menu,
                self.game.menu_level,
                self.ownership.owned_count(),
            ),
            AppState::ShowCreature => view::draw_creature(
                renderer,
                creature,
                self.game.current_creature_id == self.game.initial_creature_id,
            ),
            AppState::ShowDescription => view::draw_description(renderer, creature),
            AppState::Trading => view::draw_trading(renderer),
            #[cfg(feature = "debug-unlock")]
            AppState::UnlockAll => view::draw_unlock_all(renderer),
            AppState::Init | AppState::Exit => return,
        }
        match renderer.present() {
            Ok(()) => self.game.redraw_needed = false,
            Err(e) => warn!("present failed: {}", e),
        }
    }
}
