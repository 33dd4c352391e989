//! Frame task
//!
//! Owns the game and runs one `AppController::tick` per frame, paced by
//! the frame scheduler.

use defmt::*;
use embassy_futures::yield_now;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::{Instant, Timer};

use critter_core::scheduler::{FrameScheduler, FrameWait};
use critter_core::{AppController, AppState, BadgeIo, GameConfig, MENU_CAPACITY};
use critter_display::{DynMenu, GraphicsRenderer, MenuStyle, Sprite};

use crate::board::s6b33::{HEIGHT, WIDTH};
use crate::board::{
    BadgeIdentity, Beeper, CachedStore, ChannelIr, LatchedInput, RestartLauncher, S6b33,
};

/// The badge LCD
pub type BadgePanel =
    S6b33<Spi<'static, SPI0, Blocking>, Output<'static>, Output<'static>, Output<'static>>;

/// Creature portraits, indexed by sprite id; missing ones draw as outlines
static SPRITES: &[Sprite] = &[];

/// Frames between frame statistics log lines
const STATS_EVERY: u32 = 30 * 60;

/// Frame task - the game loop
#[embassy_executor::task]
pub async fn frame_task(panel: BadgePanel, identity: BadgeIdentity, config: GameConfig) {
    info!("Frame task started");

    let mut renderer = GraphicsRenderer::<_, WIDTH, HEIGHT>::new(panel, SPRITES);
    let menu: DynMenu<AppState, MENU_CAPACITY> = DynMenu::new(MenuStyle::default());
    let mut controller = AppController::new(menu, config);

    let mut input = LatchedInput;
    let mut storage = CachedStore;
    let mut ir = ChannelIr;
    let mut audio = Beeper;
    let mut launcher = RestartLauncher;

    let mut scheduler = FrameScheduler::new(
        u64::from(config.frame_period_us),
        Instant::now().as_micros(),
    );

    loop {
        let mut io = BadgeIo {
            input: &mut input,
            renderer: &mut renderer,
            storage: &mut storage,
            ir: &mut ir,
            audio: &mut audio,
            identity: &identity,
            launcher: &mut launcher,
        };
        controller.tick(&mut io);

        match scheduler.end_frame(Instant::now().as_micros()) {
            FrameWait::Sleep(us) => Timer::after_micros(us).await,
            FrameWait::Overrun(us) => {
                debug!("Frame overran by {} us in {}", us, controller.state());
                // Let the other tasks run before the next frame
                yield_now().await;
            }
        }

        let stats = scheduler.stats();
        if stats.frames % STATS_EVERY == 0 {
            debug!(
                "Frames: {}, overruns: {}, worst: {} us",
                stats.frames, stats.overruns, stats.worst_overrun_us
            );
        }
    }
}
