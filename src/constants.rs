pub const DEFAULT_TRIALS: usize = 10;
pub const DEFAULT_MAX_COLLAPSES: usize = 5;
pub const DEFAULT_SEED: u64 = 0;
