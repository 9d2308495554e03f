//! Tilesweep headless demo
//!
//! Walks the avatar around the stock level with scripted input, then
//! replays the same input and checks the state hashes match.

use anyhow::{bail, Context, Result};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use tilesweep::{
    GameConfig, GameLoop, InputRecording, InputState, MotionBody, TileGrid, VERSION,
    game::{
        events::GameEventData,
        input::Direction,
        level::demo_world,
        render::Renderer,
        tick::replay,
    },
};

/// Scripted route: (direction held, ticks held).
const ROUTE: &[(&[Direction], u32)] = &[
    (&[Direction::Up], 20),
    (&[Direction::Right], 40),
    (&[Direction::Down], 150),
    (&[Direction::Left], 80),
    (&[Direction::Up, Direction::Left], 30),
    (&[], 10),
];

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("Tilesweep v{}", VERSION);

    let config = GameConfig::from_env().context("invalid configuration")?;
    info!(
        speed = config.speed,
        tile_size = config.tile_size,
        clamp_horizontal = config.clamp_horizontal,
        "configuration loaded"
    );

    demo_walk(config)
}

/// Logs the avatar position every `every` frames.
struct TraceRenderer {
    frames: u64,
    every: u64,
}

impl Renderer for TraceRenderer {
    fn render(&mut self, _grid: &TileGrid, body: &MotionBody) {
        self.frames += 1;
        if self.frames % self.every == 0 {
            debug!(frame = self.frames, position = %body.position, "frame");
        }
    }
}

fn script_recording() -> InputRecording {
    let mut recording = InputRecording::new();
    let mut t = 0;

    for (directions, ticks) in ROUTE {
        let mut input = InputState::new();
        for &direction in *directions {
            input.set(direction, true);
        }
        for _ in 0..*ticks {
            recording.record(t, input);
            t += 1;
        }
    }

    recording.finalize(t.saturating_sub(1));
    recording
}

fn demo_walk(config: GameConfig) -> Result<()> {
    info!("=== Starting Demo Walk ===");

    let world = demo_world(&config).context("failed to load stock level")?;
    info!(
        columns = world.grid.columns(),
        rows = world.grid.rows(),
        spawn = %world.body.position,
        "level loaded"
    );

    let recording = script_recording();
    let ticks = recording.tick_count();
    info!(
        ticks,
        deltas = recording.delta_count(),
        hash = %hex::encode(recording.compute_hash()),
        "input scripted"
    );
    for delta in recording.deltas() {
        debug!(tick = delta.tick, flags = delta.input.flags, "input change");
    }

    let mut game = GameLoop::new(world.clone(), config.clone());
    let mut renderer = TraceRenderer { frames: 0, every: 30 };

    let events = game
        .run(ticks, &mut renderer, |t| recording.input_at(t - 1))
        .context("simulation failed")?;

    let mut last_tile = None;
    for event in &events {
        match &event.data {
            GameEventData::TileContact { tile, row, column, side: Some(side) } => {
                info!(tick = event.tick, %tile, row, column, ?side, "blocked");
            }
            GameEventData::WorldClamped { edge, position } => {
                info!(tick = event.tick, ?edge, %position, "world clamp");
            }
            _ => {}
        }
        if let Some(tile) = event.tile() {
            last_tile = Some(tile);
        }
    }

    // Print final results
    info!("=== Walk Results ===");
    info!(position = %game.world.body.position, "final position");
    if let Some(tile) = last_tile {
        info!("Last tile collided with: {:?}", tile);
    }
    info!("Total events: {}", events.len());

    let hash = game.world.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));

    // Verify determinism by replaying
    info!("=== Verifying Determinism ===");
    let (replay_final, replay_events) =
        replay(world, &recording, &config).context("replay failed")?;
    let replay_hash = replay_final.compute_hash();

    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash != replay_hash || events != replay_events {
        bail!("determinism failure: replay diverged");
    }
    info!("DETERMINISM VERIFIED: Hashes match!");

    Ok(())
}
