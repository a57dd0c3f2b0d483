//! Physical constants and engine defaults.

/// Gravitational acceleration (m/s²) used by the soft-body world.
pub const GRAVITY: f32 = 9.8;

/// Fixed simulation substep (seconds). 1/60th of a second.
pub const DEFAULT_FIXED_DT: f32 = 1.0 / 60.0;

/// Largest frame delta the physics world accepts before clamping (seconds).
pub const DEFAULT_MAX_FRAME_DT: f32 = 0.1;

/// Maximum number of fixed substeps taken per frame.
pub const DEFAULT_MAX_SUBSTEPS: u32 = 10;

/// Default position (constraint projection) iterations per substep.
pub const DEFAULT_POSITION_ITERATIONS: u32 = 10;

/// Default velocity correction iterations per substep.
pub const DEFAULT_VELOCITY_ITERATIONS: u32 = 10;

/// Default total mass of a curtain soft body (kg).
pub const DEFAULT_TOTAL_MASS: f32 = 0.9;

/// Default collision margin (meters) kept between nodes and the ground.
pub const DEFAULT_COLLISION_MARGIN: f32 = 0.03;

/// Damping applied to the raw fold speed.
pub const DEFAULT_FOLD_RATE: f32 = 0.5;

/// Default number of accordion folds along the curtain height.
pub const DEFAULT_FOLD_LAYERS: u32 = 3;

/// Default fold amplitude.
pub const DEFAULT_FOLD_AMOUNT: f32 = 0.5;

/// Default fold speed.
pub const DEFAULT_FOLD_SPEED: f32 = 0.5;

/// Epsilon for floating-point comparisons.
pub const EPSILON: f32 = 1.0e-7;
