// Realm announced by every Nuve deployment unless configured otherwise.
pub const MAUTH_REALM: &str = "http://marte3.dit.upm.es";
pub const MAUTH_SCHEME: &str = "MAuth";
pub const MAUTH_SIGNATURE_METHOD: &str = "HMAC_SHA1";

// Header fields, in wire order.
pub const REALM: &str = "realm";
pub const SIGNATURE_METHOD: &str = "mauth_signature_method";
pub const USERNAME: &str = "mauth_username";
pub const ROLE: &str = "mauth_role";
pub const SERVICE_ID: &str = "mauth_serviceid";
pub const CNONCE: &str = "mauth_cnonce";
pub const TIMESTAMP: &str = "mauth_timestamp";
pub const SIGNATURE: &str = "mauth_signature";

// Nonces are drawn from 0..NONCE_BOUND.
pub const NONCE_BOUND: u32 = 99999;

// Env values used by the credential providers.
pub const NUVE_SERVICE_ID: &str = "NUVE_SERVICE_ID";
pub const NUVE_SERVICE_KEY: &str = "NUVE_SERVICE_KEY";
