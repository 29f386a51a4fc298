//! Fixed registration OTP policy: store keys, sentinels and lifetimes

/// Subject line of every verification email
pub const OTP_SUBJECT: &str = "Verify Your email";

/// Value stored under both lock keys
pub const LOCKED_SENTINEL: &str = "locked";
/// Value stored under the cooldown key
pub const COOLDOWN_SENTINEL: &str = "true";

pub const ACCOUNT_LOCK_TTL_SECS: u64 = 1800;
pub const SPAM_LOCK_TTL_SECS: u64 = 3600;
pub const COOLDOWN_TTL_SECS: u64 = 60;
pub const REQUEST_WINDOW_SECS: u64 = 3600;
pub const OTP_TTL_SECS: u64 = 300;
pub const ATTEMPTS_TTL_SECS: u64 = 300;

/// Requests accepted per window; the next one trips the spam lock
pub const MAX_REQUESTS_PER_WINDOW: u32 = 2;

/// Store keys for one identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpKeys {
    pub account_lock: String,
    pub spam_lock: String,
    pub cooldown: String,
    pub request_count: String,
    pub otp: String,
    pub attempts: String,
}

impl OtpKeys {
    pub fn for_identity(identity: &str) -> Self {
        Self {
            account_lock: format!("otp_lock:{}", identity),
            spam_lock: format!("otp_spam_lock:{}", identity),
            cooldown: format!("otp_cooldown:{}", identity),
            request_count: format!("otp_request_count:{}", identity),
            otp: format!("otp:{}", identity),
            attempts: format!("otp_attempts:{}", identity),
        }
    }

    /// Keys removed together on successful or terminal verification
    pub fn verification_state(&self) -> [String; 2] {
        [self.otp.clone(), self.attempts.clone()]
    }
}
