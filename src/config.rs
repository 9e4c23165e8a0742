//! Global tuning constants for the Gravity Well engine.

/// Lower bound on body mass; factory input is clamped to this.
pub const MASS_MIN: f64 = 10.0;

/// Upper bound on body mass, also the hard cap applied to merge products.
pub const MASS_MAX: f64 = 400.0;

/// Collision radius per unit sqrt-mass: `radius = sqrt(mass) * RADIUS_SCALE`.
pub const RADIUS_SCALE: f64 = 2.0;

/// Fixed multiplier converting the user-facing gravity parameter into the
/// effective gravitational constant.
pub const GRAVITY_SCALE: f64 = 0.1;

/// Mass multiplier applied to black holes when they act as a gravity source.
pub const BLACK_HOLE_BOOST: f64 = 5.0;

/// Default user-facing gravity strength.
pub const DEFAULT_GRAVITY: f64 = 150.0;

/// Default Barnes-Hut multipole acceptance parameter.
pub const DEFAULT_THETA: f64 = 0.5;

/// Additive softening term under the distance square root, preventing
/// force singularities at near-zero separation.
pub const DEFAULT_SOFTENING: f64 = 100.0;

/// Default cap on body speed, enforced by uniform velocity rescaling.
pub const DEFAULT_SPEED_LIMIT: f64 = 400.0;

/// Default scale on the summed collision radii when confirming an overlap.
pub const DEFAULT_COLLISION_SENSITIVITY: f64 = 0.85;

/// Population size at or below which the exact pairwise solver is used
/// instead of the Barnes-Hut tree.
pub const DEFAULT_PAIRWISE_CUTOFF: usize = 32;

/// Default cell size for the collision broad-phase uniform grid.
pub const DEFAULT_GRID_CELL_SIZE: f64 = 100.0;

/// Combined mass above which a merge sheds extra velocity.
pub const HEAVY_MASS_THRESHOLD: f64 = 300.0;

/// Inertia loss per unit of relative mass excess in a heavy merge.
pub const INERTIA_LOSS_RATE: f64 = 0.3;

/// Cap on the inertia loss factor regardless of combined mass.
pub const INERTIA_LOSS_MAX: f64 = 0.5;

/// Velocity damping multiplier applied on wall reflection.
pub const WALL_DAMPING: f64 = 0.8;

/// Default world extent on the x axis.
pub const DEFAULT_WORLD_WIDTH: f64 = 1600.0;

/// Default world extent on the y axis.
pub const DEFAULT_WORLD_HEIGHT: f64 = 900.0;

/// Margin inside the world edges where bodies are reflected.
pub const DEFAULT_WORLD_MARGIN: f64 = 10.0;

/// Minimum side length of the quadtree root region.
pub const MIN_TREE_EXTENT: f64 = 1000.0;

/// Padding factor applied to the body bounding box when sizing the root.
pub const TREE_PADDING: f64 = 1.1;

/// Subdivision stops here; deeper insertions aggregate as co-located.
pub const MAX_TREE_DEPTH: u32 = 32;

/// Step wall-clock budget used for the slow-step warning, in milliseconds.
pub const DEFAULT_STEP_BUDGET_MS: f64 = 16.0;
