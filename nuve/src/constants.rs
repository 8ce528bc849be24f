// Env values used to build `Config`.
pub const NUVE_HOST: &str = "NUVE_HOST";
pub const NUVE_TIMEOUT: &str = "NUVE_TIMEOUT";
pub const NUVE_PROXY: &str = "NUVE_PROXY";
pub const NUVE_REALM: &str = "NUVE_REALM";

pub const DEFAULT_HOST: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_MILLIS: i64 = 3000;

// Resource paths. Identifiers are appended verbatim.
pub const ROOMS: &str = "/rooms/";
pub const SERVICES: &str = "/services/";
pub const TOKENS: &str = "/tokens";
pub const USERS: &str = "/users/";

pub const APPLICATION_JSON: &str = "application/json";
