//! Simulation Tick
//!
//! One fixed step of the game loop. The host calls it once per frame;
//! elapsed wall time is ignored, so simulation speed follows the call
//! rate.

use tracing::{debug, warn};
#[cfg(feature = "debug-tracing")]
use tracing::trace;

use crate::config::GameConfig;
use crate::game::collision::{clamp_horizontal, clamp_vertical, resolve_collisions};
use crate::game::events::GameEvent;
use crate::game::grid::GridError;
use crate::game::input::{InputRecording, InputState};
use crate::game::render::Renderer;
use crate::game::state::World;

/// Errors that abort a tick.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    /// Grid lookup failed during collision.
    #[error("grid error at tick {tick}: {source}")]
    Grid {
        /// Tick that failed
        tick: u32,
        /// Underlying lookup error
        #[source]
        source: GridError,
    },
}

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Tick number just completed
    pub tick: u32,
    /// Events generated this tick
    pub events: Vec<GameEvent>,
}

impl TickResult {
    /// Tile of the last contact this tick, if any.
    pub fn last_tile(&self) -> Option<crate::game::tile::TileCode> {
        self.events.iter().rev().find_map(GameEvent::tile)
    }
}

/// Run one simulation tick.
///
/// Order:
/// 1. held input adds to velocity
/// 2. old position snapshot
/// 3. integration
/// 4. world clamp (vertical; horizontal only if configured)
/// 5. tile collision, horizontal pass then vertical pass
/// 6. velocity reset
///
/// If collision fails, the body and tick counter are restored and no
/// events are emitted: the tick did not happen.
pub fn tick(world: &mut World, config: &GameConfig) -> Result<TickResult, SimError> {
    let saved_body = world.body.clone();
    let tick = world.tick + 1;

    // 1. Apply input
    let input = world.input;
    world.body.apply_input(&input);

    // 2-3. Snapshot and integrate
    world.body.begin_tick();
    world.body.integrate();

    // 4. World bounds
    if let Some(edge) = clamp_vertical(&mut world.body, world.height) {
        debug!(tick, ?edge, y = world.body.y(), "world clamp");
        world.push_event(GameEvent::world_clamped(tick, edge, world.body.position));
    }
    if config.clamp_horizontal {
        if let Some(edge) = clamp_horizontal(&mut world.body, world.width) {
            debug!(tick, ?edge, x = world.body.x(), "world clamp");
            world.push_event(GameEvent::world_clamped(tick, edge, world.body.position));
        }
    }

    // 5. Tiles
    let contacts = match resolve_collisions(&mut world.body, &world.grid) {
        Ok(contacts) => contacts,
        Err(source) => {
            warn!(tick, %source, position = %world.body.position, "tick aborted");
            world.body = saved_body;
            world.discard_events();
            return Err(SimError::Grid { tick, source });
        }
    };
    for contact in contacts {
        world.push_event(GameEvent::tile_contact(
            tick,
            contact.tile,
            contact.row,
            contact.column,
            contact.side,
        ));
    }

    // 6. No momentum
    world.body.stop();

    world.tick = tick;

    #[cfg(feature = "debug-tracing")]
    trace!(tick, position = %world.body.position, input = input.flags, "tick complete");

    Ok(TickResult {
        tick,
        events: world.take_events(),
    })
}

/// Game loop driver: tick, then hand the frame to the renderer.
///
/// Frame scheduling stays with the caller; each `step` is one frame.
pub struct GameLoop {
    /// The simulated world
    pub world: World,
    /// Session configuration
    pub config: GameConfig,
}

impl GameLoop {
    /// Wrap a world.
    pub fn new(world: World, config: GameConfig) -> Self {
        Self { world, config }
    }

    /// Run one tick and render the result.
    pub fn step<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> Result<TickResult, SimError> {
        let result = tick(&mut self.world, &self.config)?;
        renderer.render(&self.world.grid, &self.world.body);
        Ok(result)
    }

    /// Run `frames` steps, sampling input from `input_for` before each.
    ///
    /// Stops at the first failed tick.
    pub fn run<R, F>(
        &mut self,
        frames: u32,
        renderer: &mut R,
        mut input_for: F,
    ) -> Result<Vec<GameEvent>, SimError>
    where
        R: Renderer + ?Sized,
        F: FnMut(u32) -> InputState,
    {
        let mut events = Vec::new();
        for _ in 0..frames {
            let input = input_for(self.world.tick + 1);
            self.world.set_input(input);
            events.extend(self.step(renderer)?.events);
        }
        Ok(events)
    }
}

/// Replay recorded input from `recording.start_tick` through `end_tick`.
///
/// Returns the final world and every event produced. An empty recording
/// runs no ticks.
pub fn replay(
    initial: World,
    recording: &InputRecording,
    config: &GameConfig,
) -> Result<(World, Vec<GameEvent>), SimError> {
    let mut world = initial;
    let mut all_events = Vec::new();

    for (_, input) in recording.replay_iter() {
        world.set_input(input);
        let result = tick(&mut world, config)?;
        all_events.extend(result.events);
    }

    Ok((world, all_events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::Vec2;
    use crate::game::body::MotionBody;
    use crate::game::events::{GameEventData, WorldEdge};
    use crate::game::grid::TileGrid;
    use crate::game::input::Direction;
    use crate::game::level::demo_world;
    use crate::game::render::NullRenderer;
    use crate::game::tile::{Side, TileCode};

    fn open_world(size: usize, body: MotionBody) -> World {
        let grid = TileGrid::new(size, size, 10.0, vec![TileCode::Empty; size * size]).unwrap();
        let extent = grid.pixel_width();
        World::new(grid, body, extent, extent)
    }

    fn held(direction: Direction) -> InputState {
        let mut input = InputState::new();
        input.set(direction, true);
        input
    }

    #[test]
    fn test_tick_moves_and_resets_velocity() {
        let config = GameConfig::default();
        let mut world = open_world(10, MotionBody::square(20.0, 20.0, 10.0, 2.0));
        world.set_input(InputState::from_bools(false, true, false, true));

        let result = tick(&mut world, &config).unwrap();

        assert_eq!(result.tick, 1);
        assert_eq!(world.tick, 1);
        assert_eq!(world.body.position, Vec2::new(22.0, 22.0));
        assert_eq!(world.body.old_position, Vec2::new(20.0, 20.0));
        assert!(world.body.velocity.is_zero());
        assert!(result.events.is_empty());
    }

    #[test]
    fn test_idle_tick_does_not_move() {
        let config = GameConfig::default();
        let mut world = open_world(10, MotionBody::square(20.0, 20.0, 10.0, 2.0));

        tick(&mut world, &config).unwrap();
        assert_eq!(world.body.position, Vec2::new(20.0, 20.0));
    }

    #[test]
    fn test_vertical_clamp_at_top() {
        let config = GameConfig::default();
        let mut world = open_world(10, MotionBody::new(20.0, 1.0, 10.0, 20.0, 6.0));
        world.set_input(held(Direction::Up));

        let result = tick(&mut world, &config).unwrap();

        // Integrated to y = -5, clamped to 0
        assert_eq!(world.body.y(), 0.0);
        assert_eq!(world.body.velocity.y, 0.0);
        assert!(matches!(
            result.events[0].data,
            GameEventData::WorldClamped { edge: WorldEdge::Top, .. }
        ));
    }

    #[test]
    fn test_vertical_clamp_at_bottom() {
        let config = GameConfig::default();
        let mut body = MotionBody::new(20.0, 70.0, 10.0, 20.0, 15.0);
        body.velocity = Vec2::ZERO;
        let mut world = open_world(10, body);
        world.height = 95.0;
        world.set_input(held(Direction::Down));

        tick(&mut world, &config).unwrap();

        assert!((world.body.y() - (95.0 - 20.0 - 0.001)).abs() < 1e-9);
        assert_eq!(world.body.velocity.y, 0.0);
    }

    #[test]
    fn test_horizontal_clamp_disabled_by_default() {
        // A body leaving the world sideways is caught by the grid lookup,
        // not by the clamp.
        let config = GameConfig::default();
        let mut world = open_world(4, MotionBody::square(1.0, 10.0, 5.0, 3.0));
        world.set_input(held(Direction::Left));

        let err = tick(&mut world, &config).unwrap_err();
        assert!(matches!(err, SimError::Grid { tick: 1, .. }));

        let config = GameConfig { clamp_horizontal: true, ..GameConfig::default() };
        let result = tick(&mut world, &config).unwrap();
        assert_eq!(world.body.x(), 0.0);
        assert!(matches!(
            result.events[0].data,
            GameEventData::WorldClamped { edge: WorldEdge::Left, .. }
        ));
    }

    #[test]
    fn test_failed_tick_restores_world() {
        let config = GameConfig::default();
        let mut world = open_world(4, MotionBody::square(34.0, 10.0, 5.0, 3.0));
        world.set_input(held(Direction::Right));
        let before_hash = world.compute_hash();
        let before_body = world.body.clone();

        let err = tick(&mut world, &config).unwrap_err();

        assert!(matches!(err, SimError::Grid { source: GridError::OutOfBounds { .. }, .. }));
        assert_eq!(world.body, before_body);
        assert_eq!(world.tick, 0);
        assert_eq!(world.compute_hash(), before_hash);
    }

    #[test]
    fn test_wall_stops_body_in_demo_level() {
        let config = GameConfig::default();
        let mut world = demo_world(&config).unwrap();
        world.set_input(held(Direction::Up));

        // The spawn sits in the decorated alcove under the ceiling row;
        // walking up must stop at the ceiling's bottom edge.
        let mut stopped = None;
        for _ in 0..40 {
            let result = tick(&mut world, &config).unwrap();
            if let Some(event) = result.events.iter().find(|e| e.is_correction()) {
                stopped = Some(event.clone());
                break;
            }
        }

        let event = stopped.expect("ceiling never reached");
        assert!(matches!(
            event.data,
            GameEventData::TileContact { tile: TileCode::CeilingWall, side: Some(Side::Bottom), row: 0, .. }
        ));
        assert_eq!(world.body.y(), config.tile_size);

        // Holding up keeps it there
        tick(&mut world, &config).unwrap();
        assert_eq!(world.body.y(), config.tile_size);
    }

    #[test]
    fn test_game_loop_renders_each_step() {
        let config = GameConfig::default();
        let world = open_world(10, MotionBody::square(20.0, 20.0, 10.0, 2.0));
        let mut game = GameLoop::new(world, config);

        let mut frames = Vec::new();
        let mut renderer = |_: &TileGrid, body: &MotionBody| frames.push(body.position);

        game.run(3, &mut renderer, |_| held(Direction::Right)).unwrap();

        assert_eq!(
            frames,
            vec![Vec2::new(22.0, 20.0), Vec2::new(24.0, 20.0), Vec2::new(26.0, 20.0)]
        );

        game.step(&mut NullRenderer).unwrap();
        assert_eq!(game.world.tick, 4);
    }

    #[test]
    fn test_replay_determinism() {
        // Clamped both ways so the walk cannot leave the grid
        let config = GameConfig { clamp_horizontal: true, ..GameConfig::default() };

        let mut recording = InputRecording::new();
        for t in 0..300u32 {
            let input = InputState::from_flags(((t / 17) % 16) as u8);
            recording.record(t, input);
        }
        recording.finalize(299);

        let (final1, events1) = replay(demo_world(&config).unwrap(), &recording, &config).unwrap();
        let (final2, events2) = replay(demo_world(&config).unwrap(), &recording, &config).unwrap();

        assert_eq!(final1.tick, 300);
        assert_eq!(final1.compute_hash(), final2.compute_hash());
        assert_eq!(events1, events2);
    }

    #[test]
    fn test_replay_empty_recording_runs_no_ticks() {
        let config = GameConfig::default();
        let initial = demo_world(&config).unwrap();
        let before = initial.compute_hash();

        let (world, events) = replay(initial, &InputRecording::new(), &config).unwrap();

        assert_eq!(world.tick, 0);
        assert!(events.is_empty());
        assert_eq!(world.compute_hash(), before);
    }

    #[test]
    fn test_independent_worlds() {
        let config = GameConfig::default();
        let mut a = demo_world(&config).unwrap();
        let mut b = demo_world(&config).unwrap();
        a.set_input(held(Direction::Right));

        for _ in 0..10 {
            tick(&mut a, &config).unwrap();
            tick(&mut b, &config).unwrap();
        }

        assert_ne!(a.body.position, b.body.position);
        assert_eq!(b.body.x(), config.spawn_x);
    }
}
