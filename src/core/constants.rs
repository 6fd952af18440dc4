// Magazine
pub const MAGAZINE_SIZE: usize = 6;

// Inventory
pub const INVENTORY_CAPACITY: usize = 8;

// Stages: index 0 is stage 1
pub const STAGE_COUNT: u8 = 3;
pub const STAGE_STARTING_LIVES: [u32; 3] = [2, 4, 6];
pub const STAGE_BOX_SIZES: [usize; 3] = [0, 2, 4];

// Stage 3 "life support" warning fires at or below this many lives
pub const LIFE_SUPPORT_THRESHOLD: u32 = 2;

// Rounds before a stage is called a draw
pub const MAX_ROUNDS_PER_STAGE: u32 = 1_000;

// Infinite mode
pub const INFINITE_MODE_SEED_WINNINGS: u64 = 1_000;
pub const WAGER_INTERVAL: u32 = 3;

// Save system
pub const SAVE_VERSION_MAGIC: u64 = 0x4255_434B_5348_4F54; // "BUCKSHOT" in hex
pub const SAVE_FILE_NAME: &str = "save.dat";
