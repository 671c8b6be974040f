// Tuning constants for the blossom scene. Units are world pixels and ticks.

// Tree layout
pub const TRUNK_ORIGIN: [f32; 2] = [0.0, -250.0];
pub const TRUNK_HEADING_DEG: f32 = 90.0;
pub const TRUNK_LENGTH: f32 = 80.0;
pub const TRUNK_THICKNESS: f32 = 12.0;
pub const CROWN_LENGTH: f32 = 120.0; // first branch call
pub const CROWN_THICKNESS: f32 = 10.0;
pub const CROWN_ANGLE_DEG: f32 = 30.0;

// Branching
pub const MIN_BRANCH_LEN: f32 = 8.0; // shorter branches terminate
pub const CONTINUE_BRANCH_LEN: f32 = 15.0; // longer branches split in two
pub const TIP_MIN_DEPTH: u32 = 3; // tips record a point only deeper than this
pub const BACKOFF_MIN_DEPTH: u32 = 2;
pub const BACKOFF_MAX_LEN: f32 = 30.0;
pub const BACKOFF_CHANCE: f64 = 0.4;
pub const BACKOFF_MIN_TRUNK_DIST: f32 = 20.0;
pub const BLOSSOM_CHANCE: f64 = 0.7;
pub const BLOSSOM_RADIUS: f32 = 3.0;
pub const ANGLE_JITTER: [f32; 2] = [0.6, 1.4];
pub const LENGTH_JITTER: [f32; 2] = [0.65, 0.9];
pub const THICKNESS_DECAY: f32 = 0.7;

// Placement
pub const MIN_HORIZONTAL_DISTANCE: f32 = 30.0;
pub const MIN_VERTICAL_HEIGHT: f32 = -100.0;
pub const SCATTER_DISTANCE: [f32; 2] = [15.0, 25.0];
pub const TRUNK_EXCLUSION: f32 = 25.0;

// Glyphs
pub const BASE_FONT_SIZE: u32 = 14; // shrinks by one per depth level
pub const MIN_FONT_SIZE: u32 = 10;
pub const MIN_FALLING_FONT_SIZE: u32 = 8;
pub const SETTLED_FONT_SIZE: u32 = 10;
pub const BACKING_DISC_RADIUS: f32 = 6.0;
pub const PHASE_STEP_PER_GLYPH: f32 = 30.0;
pub const SWING_SPEED: [f32; 2] = [0.02, 0.04];
pub const SWING_AMPLITUDE: [f32; 2] = [3.0, 8.0];
pub const ROTATION_SPEED: [f32; 2] = [-5.0, 5.0];

// Physics
pub const GRAVITY: f32 = 0.05; // subtracted from vy every tick
pub const DRAG: f32 = 0.98; // vx multiplier every tick
pub const FLOAT_FREQUENCY: f32 = 1.2;
pub const GROUND_Y: f32 = -200.0;
pub const SETTLE_JITTER_X: f32 = 20.0;
pub const SETTLE_BAND: [f32; 2] = [-10.0, 5.0]; // relative to GROUND_Y
pub const SETTLED_NUDGE_CHANCE: f64 = 0.05;
pub const SETTLED_NUDGE: f32 = 1.0;
pub const SETTLED_X_LIMIT: f32 = 400.0;
pub const GROUND_HALF_WIDTH: f32 = 500.0;
pub const GROUND_DEPTH: f32 = 50.0;

// Wind
pub const WIND_INITIAL_STRENGTH: f32 = 2.0;
pub const WIND_DECAY: f32 = 0.995;
pub const WIND_CALM_THRESHOLD: f32 = 0.1;
pub const WIND_FALL_FRACTION: [f32; 2] = [0.3, 0.8];
pub const LAUNCH_VELOCITY_X: [f32; 2] = [-2.0, 2.0];
pub const LAUNCH_VELOCITY_Y: [f32; 2] = [-3.0, -1.0];
pub const WIND_GUST: [f32; 2] = [0.5, 1.5]; // multiplier on strength for swing
pub const SWING_WIND_GAIN: f32 = 3.0;
pub const FLOAT_WIND_GAIN: f32 = 0.5;
pub const FALL_DRIFT: f32 = 0.1; // scaled by strength

// Timing
pub const TICK_INTERVAL_MS: u64 = 33;
