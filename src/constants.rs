/// Name of the cookie carrying the opaque session id
pub const SESSION_COOKIE_NAME: &str = "pulselog_session";

/// Session lifetime in seconds (24 hours)
pub const SESSION_TTL_SECS: i64 = 86_400;

/// How often expired sessions are swept from the in-memory store
pub const SESSION_PURGE_INTERVAL_SECS: u64 = 600;

/// How long a request waits for a pooled database connection
pub const DB_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Default bcrypt work factor
pub const BCRYPT_COST: u32 = 10;

/// Username length bounds, counted in characters after trimming
pub const USERNAME_MIN_LEN: usize = 5;
pub const USERNAME_MAX_LEN: usize = 20;

/// Minimum password length; there is no maximum
pub const PASSWORD_MIN_LEN: usize = 8;

/// Column widths in the schema, counted in characters
pub const EMAIL_MAX_LEN: usize = 255;
pub const EXERCISE_MAX_LEN: usize = 100;

/// Number of workouts shown on the dashboard
pub const RECENT_WORKOUTS_LIMIT: i64 = 5;

// =============================================================================
// Error Messages
// =============================================================================

/// Shown for both unknown usernames and wrong passwords
pub const ERR_INVALID_CREDENTIALS: &str = "Invalid credentials";

pub const ERR_USERNAME_LENGTH: &str = "Username must be 5-20 characters";

pub const ERR_INVALID_EMAIL: &str = "Enter a valid email address";

pub const ERR_EMAIL_TOO_LONG: &str = "Email must be at most 255 characters";

pub const ERR_WEAK_PASSWORD: &str =
    "Password must be 8+ chars and include a lowercase, uppercase, number, and symbol";

pub const ERR_PASSWORD_MISMATCH: &str = "Passwords do not match";

pub const ERR_USERNAME_TAKEN: &str = "Username is already taken";

pub const ERR_EXERCISE_TOO_LONG: &str = "Exercise name must be at most 100 characters";

pub const ERR_SAVE_WORKOUT: &str = "Failed to save workout. Please try again.";

pub const ERR_LOAD_WORKOUTS: &str = "Failed to load workouts";

pub const ERR_SEARCH_WORKOUTS: &str = "Failed to search workouts";

pub const ERR_EMPTY_CITY: &str = "Please enter a city name";
