// Canvas
pub const CANVAS_WIDTH: f64 = 480.0;
pub const CANVAS_HEIGHT: f64 = 352.0;
pub const TILE_SIZE: f64 = 32.0;

// Frame pacing
pub const DEFAULT_FRAME_MS: u64 = 16;
/// Upper bound on a single frame's delta so a stalled terminal doesn't skip whole animations.
pub const MAX_FRAME_DELTA_SECONDS: f64 = 0.25;

// Stats
pub const IV_MAX: u32 = 31;
pub const HEALTH_STAT_BONUS: u32 = 10;
pub const OTHER_STAT_BONUS: u32 = 5;
pub const ATTACK_POWER: f64 = 40.0;
pub const LOW_HEALTH_THRESHOLD: f64 = 0.25;
pub const EXPERIENCE_AWARD_DIVISOR: f64 = 7.0;

// Battle stances (x, y)
pub const FRONT_START: (f64, f64) = (480.0, 30.0);
pub const FRONT_REST: (f64, f64) = (280.0, 30.0);
pub const FRONT_ATTACK: (f64, f64) = (260.0, 30.0);
pub const BACK_START: (f64, f64) = (-160.0, 96.0);
pub const BACK_REST: (f64, f64) = (30.0, 96.0);
pub const BACK_ATTACK: (f64, f64) = (50.0, 96.0);

// Battle timing (seconds)
pub const SLIDE_IN_SECONDS: f64 = 0.75;
pub const ATTACK_MESSAGE_SECONDS: f64 = 0.5;
pub const LUNGE_SECONDS: f64 = 0.1;
pub const FLASH_INTERVAL_SECONDS: f64 = 0.05;
pub const FLASH_DURATION_SECONDS: f64 = 0.5;
pub const FLASH_ALPHA: f64 = 0.5;
pub const PLAYER_FAINT_SLIDE_SECONDS: f64 = 0.2;
pub const OPPONENT_FAINT_SLIDE_SECONDS: f64 = 0.4;
pub const EXPERIENCE_MESSAGE_SECONDS: f64 = 1.5;
pub const RUN_MESSAGE_SECONDS: f64 = 2.0;
pub const BAR_TWEEN_SECONDS: f64 = 1.0;

// Transitions
pub const FADE_SECONDS: f64 = 0.5;

// Title carousel
pub const CAROUSEL_PERIOD_SECONDS: f64 = 3.0;
pub const CAROUSEL_SLIDE_SECONDS: f64 = 0.5;
pub const CAROUSEL_HOLD_SECONDS: f64 = 1.5;
pub const CAROUSEL_START: (f64, f64) = (480.0, 150.0);
pub const CAROUSEL_MID: (f64, f64) = (160.0, 150.0);
pub const CAROUSEL_END: (f64, f64) = (-160.0, 150.0);

// Overworld
pub const WALK_STEP_SECONDS: f64 = 0.25;
pub const DEFAULT_ENCOUNTER_CHANCE: f64 = 0.1;

// Party defaults
pub const DEFAULT_STARTING_LEVEL: u32 = 5;
pub const DEFAULT_OPPONENT_LEVEL_MIN: u32 = 3;
pub const DEFAULT_OPPONENT_LEVEL_MAX: u32 = 6;
pub const MAX_LEVEL: u32 = 100;
