// Action gauge
pub const GAUGE_THRESHOLD: f64 = 10_000.0;
pub const BATCH_EPSILON_MS: f64 = 0.001;
pub const MAX_TURNS_PER_ENCOUNTER: u32 = 200;

// Interactive timing (milliseconds)
pub const FRAME_DELTA_CAP_MS: f64 = 1_000.0;
pub const MIN_TURN_DELAY_MS: f64 = 250.0;
pub const COMBAT_START_DELAY_MS: f64 = 500.0;
pub const INTER_COMBAT_COOLDOWN_MS: f64 = 200.0;
pub const STATUS_TICK_INTERVAL_MS: f64 = 1_000.0;
pub const DEATH_RECOVERY_MS: f64 = 10_000.0;

// Offline catch-up
pub const MAX_OFFLINE_MS: u64 = 72 * 60 * 60 * 1000;
pub const MAX_CATCHUP_ENCOUNTERS: u32 = 2_000;
pub const COMBAT_HISTORY_WINDOW: usize = 10;
pub const DEFAULT_COMBAT_DURATION_MS: f64 = 2_000.0;
pub const COMBAT_DURATION_SAFETY_MARGIN: f64 = 1.1;
pub const OFFLINE_DROP_RATE_FACTOR: f64 = 0.5;
pub const MAX_CAPTURE_SUMMARIES: usize = 50;

// Damage
pub const STAB_MULTIPLIER: f64 = 1.2;
pub const STAMINA_DEPLETED_MULTIPLIER: f64 = 0.5;
pub const DEFENSE_WEIGHT: f64 = 1.5;
pub const MIN_DAMAGE_POWER_DIVISOR: f64 = 20.0;
pub const DEFAULT_MOVE_NAME: &str = "Charge";
pub const DEFAULT_MOVE_POWER: u32 = 50;

// Stamina
pub const MAX_STAMINA: u32 = 100;
pub const STAMINA_COST_PER_ATTACK: u32 = 1;
pub const STAMINA_REGEN_PER_SECOND: u32 = 2;

// Passive regeneration outside of fights (% of max HP per second)
pub const PASSIVE_REGEN_PERCENT: f64 = 5.0;

// Status effects
pub const POISON_DURATION_SECONDS: u32 = 6;
pub const BURN_DURATION_SECONDS: u32 = 5;
pub const PARALYSIS_DURATION_SECONDS: u32 = 4;
pub const ENRAGED_DURATION_SECONDS: u32 = 10;
pub const POISON_DAMAGE_PERCENT: f64 = 6.0;
pub const BURN_DAMAGE_PERCENT: f64 = 4.0;
pub const DOT_SOURCE_ATTACK_DIVISOR: u32 = 20;
pub const PARALYSIS_SPEED_MULTIPLIER: f64 = 0.75;
pub const ENRAGED_SPEED_MULTIPLIER: f64 = 1.15;
pub const ENRAGE_HP_THRESHOLD: f64 = 0.3;

// Encounter tiers: (exp multiplier, currency multiplier)
pub const STANDARD_REWARD_MULTIPLIERS: (f64, f64) = (10.0, 1.0);
pub const ELITE_REWARD_MULTIPLIERS: (f64, f64) = (25.0, 3.0);
pub const BOSS_REWARD_MULTIPLIERS: (f64, f64) = (50.0, 10.0);

// Spawning
pub const ELITE_SPAWN_CHANCE: f64 = 0.05;
pub const BOSS_INTERVAL_KILLS: u32 = 25;
pub const SHINY_CHANCE: f64 = 1.0 / 1024.0;
pub const ELITE_LEVEL_BONUS: u32 = 2;
pub const BOSS_LEVEL_BONUS: u32 = 5;

// Capture
pub const DEFAULT_CATCH_RATE: f64 = 0.45;

// Fusion
pub const FUSION_EXP_TRANSFER_RATIO: f64 = 0.5;
pub const FUSION_SHARD_BASE: u32 = 5;

// Creature progression
pub const MAX_LEVEL: u32 = 100;
pub const MAX_TEAM_SIZE: usize = 6;
pub const MAX_IV: u32 = 31;
pub const PRESTIGE_STAT_BONUS: f64 = 0.1;
pub const HELD_ITEM_STAT_MULTIPLIER: f64 = 1.1;
pub const LUCKY_EGG_EXP_MULTIPLIER: f64 = 1.5;
