/// Number of candidates raced against each other in one round.
pub const DEFAULT_RELAY_SLICE_SIZE: usize = 3;

pub const DEFAULT_PING_TIMEOUT_MS: u64 = 10_000;

/// Path appended to a relay url to obtain its ping response.
pub const PING_PATH: &str = "/getaddr";
