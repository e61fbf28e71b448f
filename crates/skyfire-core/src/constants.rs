//! Simulation constants and tuning defaults.

/// Fixed tick rate used by the headless driver (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the fixed tick rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Countdowns within this many seconds of zero count as expired. Summing
/// `DT` leaves rounding residue that would otherwise cost a whole tick.
pub const TIMER_EPSILON: f64 = 1e-9;

// --- Screen ---

/// Default half-width of the visible play field (world units).
pub const SCREEN_HALF_WIDTH: f64 = 30.0;

/// Default half-height of the visible play field (world units).
pub const SCREEN_HALF_HEIGHT: f64 = 40.0;

// --- Spawning ---

/// Enemies spawned per second.
pub const ENEMY_SPAWN_PER_SECOND: f64 = 0.5;

/// Horizontal inset used when a spawned entity has no clearance radius.
pub const ENEMY_INSET_DEFAULT: f64 = 1.5;

// --- Enemy firing ---

/// Base seconds between enemy fire attempts.
pub const BASE_FIRE_INTERVAL: f64 = 1.5;

/// Maximum random deviation applied to each fire interval.
pub const FIRE_RANDOM_OFFSET: f64 = 0.5;

/// Lower bound for any fire interval (seconds).
pub const MIN_FIRE_INTERVAL: f64 = 0.1;

/// Damage carried by every enemy projectile.
pub const ENEMY_PROJECTILE_DAMAGE: f64 = 1.0;

// --- Hero ---

/// Damage carried by hero projectiles.
pub const HERO_PROJECTILE_DAMAGE: f64 = 1.0;

/// Fan half-angle of the spread weapon (radians, ~10 degrees).
pub const SPREAD_HALF_ANGLE: f64 = 0.1745;

/// Starting shield level of the hero.
pub const HERO_START_HEALTH: f64 = 1.0;

/// Highest shield level a pickup can raise the hero to.
pub const HERO_MAX_HEALTH: f64 = 4.0;

// --- Progression ---

/// Score needed to clear level 1.
pub const BASE_SCORE_TO_LEVEL: u64 = 500;

/// Growth factor of the per-level threshold.
pub const LEVEL_GROWTH: f64 = 1.25;

// --- Power-ups ---

/// Seconds an uncollected power-up stays in play.
pub const POWER_UP_LIFETIME_SECS: f64 = 6.0;
