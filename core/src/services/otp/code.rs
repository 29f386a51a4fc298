//! Passcode generation

use rand::{rngs::OsRng, Rng};

/// Lowest code that can be issued
pub const CODE_MIN: u32 = 1000;
/// Exclusive upper bound, so `9999` is never issued
pub const CODE_MAX: u32 = 9999;

/// Generate a 4-digit code from the operating system CSPRNG
pub fn generate_otp() -> String {
    OsRng.gen_range(CODE_MIN..CODE_MAX).to_string()
}
