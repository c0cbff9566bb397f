//! Centralised gameplay constants.
//!
//! Every tuneable value lives here so it can be found and changed in one
//! place. [`crate::config::GameConfig::default`] mirrors the tunable ones, and
//! `assets/game.toml` can override any subset of those at startup. The arena
//! size and platform layout are fixed: the window and the level are built
//! from them.
//!
//! Positions are in **arena coordinates**: origin at the top-left corner of
//! the play field, x grows to the right and y grows downward. See
//! [`crate::level::Arena`] for the mapping into Bevy world space.

// ── Arena ─────────────────────────────────────────────────────────────────────

/// Width of the play field (pixels). The window is created at the same size.
/// Not configurable; [`PLATFORM_LAYOUT`] is laid out for 800×600.
pub const ARENA_WIDTH: f32 = 800.0;

/// Height of the play field (pixels).
pub const ARENA_HEIGHT: f32 = 600.0;

/// Downward gravity applied to every dynamic body (px/s²).
pub const GRAVITY: f32 = 300.0;

/// Thickness of the invisible walls that keep bodies inside the arena.
pub const WALL_THICKNESS: f32 = 40.0;

/// Static platform layout as `(center_x, center_y, width, height)`.
///
/// The first entry is the ground, stretched across the whole arena.
pub const PLATFORM_LAYOUT: [(f32, f32, f32, f32); 4] = [
    (400.0, 568.0, 800.0, 64.0),
    (600.0, 400.0, 400.0, 32.0),
    (50.0, 250.0, 400.0, 32.0),
    (750.0, 220.0, 400.0, 32.0),
];

// ── Player ────────────────────────────────────────────────────────────────────

/// Player spawn point (arena coordinates).
pub const PLAYER_START_X: f32 = 100.0;
pub const PLAYER_START_Y: f32 = 450.0;

/// Player body size (pixels).
pub const PLAYER_WIDTH: f32 = 32.0;
pub const PLAYER_HEIGHT: f32 = 48.0;

/// Horizontal run speed while a direction is held (px/s).
pub const PLAYER_SPEED: f32 = 160.0;

/// Upward launch speed of a jump (px/s).
pub const PLAYER_JUMP_SPEED: f32 = 330.0;

/// Restitution of the player body.
pub const PLAYER_BOUNCE: f32 = 0.2;

/// How far (pixels) the player's feet may sit from a platform top and still
/// count as standing on it.
pub const GROUND_TOLERANCE: f32 = 4.0;

// ── Stars (collectibles) ─────────────────────────────────────────────────────

/// Number of stars in the pool. The pool never grows or shrinks.
pub const STAR_COUNT: usize = 12;

/// Horizontal distance between neighbouring stars (pixels).
pub const STAR_SPACING: f32 = 70.0;

/// Position of the first star (arena coordinates).
pub const STAR_START_X: f32 = 14.0;
pub const STAR_START_Y: f32 = 0.0;

/// Collider radius of a star (pixels).
pub const STAR_RADIUS: f32 = 11.0;

/// Each star gets an independent restitution sampled from this range.
pub const STAR_BOUNCE_MIN: f32 = 0.4;
pub const STAR_BOUNCE_MAX: f32 = 0.8;

/// Points awarded for every collected star.
pub const POINTS_PER_STAR: u32 = 10;

// ── Bombs (hazards) ──────────────────────────────────────────────────────────

/// y coordinate of the line new bombs appear on.
pub const BOMB_SPAWN_Y: f32 = 16.0;

/// Collider radius of a bomb (pixels).
pub const BOMB_RADIUS: f32 = 7.0;

/// Horizontal launch speed is sampled from `[-BOMB_DRIFT_SPEED, BOMB_DRIFT_SPEED]`.
pub const BOMB_DRIFT_SPEED: f32 = 200.0;

/// Initial downward speed of a freshly spawned bomb (px/s).
pub const BOMB_FALL_SPEED: f32 = 20.0;

/// Upper bound on live bombs. Once reached, the oldest bomb is recycled
/// instead of spawning a new body.
pub const MAX_HAZARDS: usize = 64;

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Font size of the score label.
pub const SCORE_FONT_SIZE: f32 = 32.0;

/// Seconds between play clock ticks.
pub const CLOCK_TICK_SECS: f32 = 1.0;
