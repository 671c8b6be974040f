use std::time::Duration;

use glam::Vec2;

use crate::constants::*;

/// Parameters for [`crate::branch::BranchGenerator`].
#[derive(Clone, Copy, Debug)]
pub struct TreeConfig {
    pub trunk_origin: Vec2,
    pub trunk_heading_deg: f32,
    pub trunk_length: f32,
    pub trunk_thickness: f32,
    pub crown_length: f32,
    pub crown_thickness: f32,
    pub crown_angle_deg: f32,
    /// Optional recursion cap; `None` lets branch length alone end recursion.
    pub max_depth: Option<u32>,
    pub min_branch_len: f32,
    pub continue_branch_len: f32,
    pub tip_min_depth: u32,
    pub backoff_min_depth: u32,
    pub backoff_max_len: f32,
    pub backoff_chance: f64,
    pub backoff_min_trunk_dist: f32,
    pub blossom_chance: f64,
    pub angle_jitter: (f32, f32),
    pub length_jitter: (f32, f32),
    pub thickness_decay: f32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            trunk_origin: Vec2::from(TRUNK_ORIGIN),
            trunk_heading_deg: TRUNK_HEADING_DEG,
            trunk_length: TRUNK_LENGTH,
            trunk_thickness: TRUNK_THICKNESS,
            crown_length: CROWN_LENGTH,
            crown_thickness: CROWN_THICKNESS,
            crown_angle_deg: CROWN_ANGLE_DEG,
            max_depth: None,
            min_branch_len: MIN_BRANCH_LEN,
            continue_branch_len: CONTINUE_BRANCH_LEN,
            tip_min_depth: TIP_MIN_DEPTH,
            backoff_min_depth: BACKOFF_MIN_DEPTH,
            backoff_max_len: BACKOFF_MAX_LEN,
            backoff_chance: BACKOFF_CHANCE,
            backoff_min_trunk_dist: BACKOFF_MIN_TRUNK_DIST,
            blossom_chance: BLOSSOM_CHANCE,
            angle_jitter: (ANGLE_JITTER[0], ANGLE_JITTER[1]),
            length_jitter: (LENGTH_JITTER[0], LENGTH_JITTER[1]),
            thickness_decay: THICKNESS_DECAY,
        }
    }
}

/// Parameters for [`crate::attachment`] selection and scattering.
#[derive(Clone, Copy, Debug)]
pub struct PlacementConfig {
    pub min_horizontal_distance: f32,
    pub min_vertical_height: f32,
    pub scatter_distance: (f32, f32),
    pub trunk_exclusion: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            min_horizontal_distance: MIN_HORIZONTAL_DISTANCE,
            min_vertical_height: MIN_VERTICAL_HEIGHT,
            scatter_distance: (SCATTER_DISTANCE[0], SCATTER_DISTANCE[1]),
            trunk_exclusion: TRUNK_EXCLUSION,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub drag: f32,
    pub float_frequency: f32,
    pub ground_y: f32,
    pub settle_jitter_x: f32,
    pub settle_band: (f32, f32),
    pub settled_nudge_chance: f64,
    pub settled_nudge: f32,
    pub settled_x_limit: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            drag: DRAG,
            float_frequency: FLOAT_FREQUENCY,
            ground_y: GROUND_Y,
            settle_jitter_x: SETTLE_JITTER_X,
            settle_band: (SETTLE_BAND[0], SETTLE_BAND[1]),
            settled_nudge_chance: SETTLED_NUDGE_CHANCE,
            settled_nudge: SETTLED_NUDGE,
            settled_x_limit: SETTLED_X_LIMIT,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct WindConfig {
    pub initial_strength: f32,
    pub decay: f32,
    pub calm_threshold: f32,
    pub fall_fraction: (f32, f32),
    pub launch_velocity_x: (f32, f32),
    pub launch_velocity_y: (f32, f32),
    pub gust: (f32, f32),
    pub swing_gain: f32,
    pub float_gain: f32,
    pub fall_drift: f32,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            initial_strength: WIND_INITIAL_STRENGTH,
            decay: WIND_DECAY,
            calm_threshold: WIND_CALM_THRESHOLD,
            fall_fraction: (WIND_FALL_FRACTION[0], WIND_FALL_FRACTION[1]),
            launch_velocity_x: (LAUNCH_VELOCITY_X[0], LAUNCH_VELOCITY_X[1]),
            launch_velocity_y: (LAUNCH_VELOCITY_Y[0], LAUNCH_VELOCITY_Y[1]),
            gust: (WIND_GUST[0], WIND_GUST[1]),
            swing_gain: SWING_WIND_GAIN,
            float_gain: FLOAT_WIND_GAIN,
            fall_drift: FALL_DRIFT,
        }
    }
}

/// Everything needed to build and animate one scene.
#[derive(Clone, Copy, Debug)]
pub struct SceneConfig {
    pub tree: TreeConfig,
    pub placement: PlacementConfig,
    pub physics: PhysicsConfig,
    pub wind: WindConfig,
    pub tick_interval: Duration,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            tree: TreeConfig::default(),
            placement: PlacementConfig::default(),
            physics: PhysicsConfig::default(),
            wind: WindConfig::default(),
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
        }
    }
}
