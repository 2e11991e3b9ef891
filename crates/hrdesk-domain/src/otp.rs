//! One-time passcode format.

/// Number of decimal digits in a passcode.
pub const OTP_LEN: usize = 6;

/// Exclusive upper bound of the numeric passcode space (`10^OTP_LEN`).
pub const OTP_SPACE: u32 = 1_000_000;

/// Render a number from `0..OTP_SPACE` as a zero-padded passcode.
pub fn format_code(n: u32) -> String {
    format!("{:0width$}", n % OTP_SPACE, width = OTP_LEN)
}

/// `true` when `code` is exactly [`OTP_LEN`] ASCII digits.
pub fn is_well_formed(code: &str) -> bool {
    code.len() == OTP_LEN && code.bytes().all(|b| b.is_ascii_digit())
}
