//! In-memory collaborators for driving the controller on the host

#![allow(dead_code)]

use std::collections::VecDeque;
use std::string::{String as StdString, ToString};
use std::vec::Vec as StdVec;

use critter_core::{AppController, AppState, BadgeIo, CreatureId, GameConfig, MENU_CAPACITY};
use critter_display::DynMenu;
use critter_hal::{
    Audio, ButtonInput, Color, DeviceIdentity, DisplayError, IrTransport, KeyValueStore, Launcher,
    Renderer, SpriteId, StorageError, StorageKey,
};
use critter_protocol::{Button, ButtonMask, IrPacket};
use heapless::{LinearMap, String};

/// Buttons and rotation handed out one tick at a time
#[derive(Default)]
pub struct ScriptedInput {
    script: VecDeque<(ButtonMask, i32)>,
}

impl ScriptedInput {
    pub fn push(&mut self, buttons: ButtonMask, rotary: i32) {
        self.script.push_back((buttons, rotary));
    }
}

impl ButtonInput for ScriptedInput {
    fn latched_buttons(&mut self) -> ButtonMask {
        // Rotation for the same tick stays queued until rotary_delta
        match self.script.front_mut() {
            Some((buttons, _)) => core::mem::replace(buttons, ButtonMask::EMPTY),
            None => ButtonMask::EMPTY,
        }
    }

    fn rotary_delta(&mut self, axis: u8) -> i32 {
        assert_eq!(axis, 0);
        self.script.pop_front().map(|(_, rotary)| rotary).unwrap_or(0)
    }
}

/// Renderer keeping the text of the last presented frame
#[derive(Default)]
pub struct RecordingRenderer {
    drawing: StdVec<StdString>,
    sprites: StdVec<SpriteId>,
    pub frame: StdVec<StdString>,
    pub frame_sprites: StdVec<SpriteId>,
    pub presents: usize,
    pub fail_presents: usize,
}

impl RecordingRenderer {
    /// Returns true if the last presented frame contains `text`
    pub fn shows(&self, text: &str) -> bool {
        self.frame.iter().any(|t| t == text)
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self) {
        self.drawing.clear();
        self.sprites.clear();
    }
    fn move_cursor(&mut self, _x: i16, _y: i16) {}
    fn set_color(&mut self, _color: Color) {}
    fn write_text(&mut self, text: &str) {
        self.drawing.push(text.to_string());
    }
    fn write_wrapped(&mut self, text: &str) {
        self.drawing.push(text.to_string());
    }
    fn draw_sprite(&mut self, sprite: SpriteId) {
        self.sprites.push(sprite);
    }
    fn present(&mut self) -> Result<(), DisplayError> {
        if self.fail_presents > 0 {
            self.fail_presents -= 1;
            return Err(DisplayError::Communication);
        }
        self.presents += 1;
        self.frame = self.drawing.clone();
        self.frame_sprites = self.sprites.clone();
        Ok(())
    }
    fn dimensions(&self) -> (u16, u16) {
        (132, 132)
    }
}

/// Key/value store over a fixed-capacity linear map
#[derive(Default, Clone)]
pub struct MemoryStore {
    pub entries: LinearMap<String<20>, i32, 32>,
}

impl MemoryStore {
    pub fn owning(ids: &[u16]) -> Self {
        let mut store = Self::default();
        for &raw in ids {
            let key = CreatureId::new(raw).unwrap().creature().storage_key();
            store.set_int(&key, 1).unwrap();
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get_int(&mut self, key: &StorageKey) -> Option<i32> {
        let k: String<20> = key.as_str().try_into().ok()?;
        self.entries.get(&k).copied()
    }

    fn set_int(&mut self, key: &StorageKey, value: i32) -> Result<(), StorageError> {
        let k: String<20> = key
            .as_str()
            .try_into()
            .map_err(|_| StorageError::KeyTooLong)?;
        self.entries
            .insert(k, value)
            .map(|_| ())
            .map_err(|_| StorageError::Full)
    }
}

/// IR transport with a scripted inbox and a log of sent packets
#[derive(Default)]
pub struct LoopbackIr {
    pub inbox: VecDeque<IrPacket>,
    pub sent: StdVec<IrPacket>,
    pub listening: bool,
}

impl IrTransport for LoopbackIr {
    fn send(&mut self, packet: IrPacket) {
        self.sent.push(packet);
    }
    fn poll_received(&mut self) -> Option<IrPacket> {
        if self.listening {
            self.inbox.pop_front()
        } else {
            None
        }
    }
    fn set_listening(&mut self, listening: bool) {
        self.listening = listening;
    }
}

#[derive(Default)]
pub struct BeepLog(pub StdVec<(u16, u16)>);

impl Audio for BeepLog {
    fn beep(&mut self, frequency_hz: u16, duration_ms: u16) {
        self.0.push((frequency_hz, duration_ms));
    }
}

pub struct FixedIdentity(pub u64);

impl DeviceIdentity for FixedIdentity {
    fn device_id(&self) -> u64 {
        self.0
    }
}

#[derive(Default)]
pub struct LauncherLog {
    pub returns: usize,
}

impl Launcher for LauncherLog {
    fn return_to_launcher(&mut self) {
        self.returns += 1;
    }
}

pub type Menu = DynMenu<AppState, MENU_CAPACITY>;

/// Controller wired to in-memory collaborators
pub struct Harness {
    pub app: AppController<Menu>,
    pub input: ScriptedInput,
    pub screen: RecordingRenderer,
    pub storage: MemoryStore,
    pub ir: LoopbackIr,
    pub audio: BeepLog,
    pub identity: FixedIdentity,
    pub launcher: LauncherLog,
}

impl Harness {
    pub fn new(device_id: u64) -> Self {
        Self::with_storage(device_id, MemoryStore::default())
    }

    pub fn with_storage(device_id: u64, storage: MemoryStore) -> Self {
        Self {
            app: AppController::new(Menu::default(), GameConfig::default()),
            input: ScriptedInput::default(),
            screen: RecordingRenderer::default(),
            storage,
            ir: LoopbackIr::default(),
            audio: BeepLog::default(),
            identity: FixedIdentity(device_id),
            launcher: LauncherLog::default(),
        }
    }

    /// Construct and run the `Init` tick
    pub fn started(device_id: u64, storage: MemoryStore) -> Self {
        let mut harness = Self::with_storage(device_id, storage);
        harness.tick();
        assert_eq!(harness.app.state(), AppState::TopMenu);
        harness
    }

    pub fn tick(&mut self) {
        let mut io = BadgeIo {
            input: &mut self.input,
            renderer: &mut self.screen,
            storage: &mut self.storage,
            ir: &mut self.ir,
            audio: &mut self.audio,
            identity: &self.identity,
            launcher: &mut self.launcher,
        };
        self.app.tick(&mut io);
    }

    pub fn ticks(&mut self, count: usize) {
        for _ in 0..count {
            self.tick();
        }
    }

    /// Press `button` during the next tick
    pub fn press(&mut self, button: Button) {
        self.input.push(ButtonMask::single(button), 0);
        self.tick();
    }

    /// Turn the navigation encoder during the next tick
    pub fn rotate(&mut self, delta: i32) {
        self.input.push(ButtonMask::EMPTY, delta);
        self.tick();
    }

    pub fn current(&self) -> u16 {
        self.app.game().current_creature_id.raw()
    }

    pub fn owned(&self, raw: u16) -> bool {
        self.app
            .ownership()
            .is_owned(CreatureId::new(raw).unwrap())
    }
}
