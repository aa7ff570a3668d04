use chrono::Utc;
use rand::Rng;

pub const DEFAULT_KEY_PREFIX: &str = "key_";

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_SEGMENT_LEN: usize = 11;

/// Builds key values of the form `{prefix}{random}{base36 millis}`.
///
/// Uniqueness is probabilistic only; nothing checks a new value against the
/// values already stored.
#[derive(Debug, Clone)]
pub struct KeyGenerator {
    prefix: String,
}

impl KeyGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        let random: String = (0..RANDOM_SEGMENT_LEN)
            .map(|_| BASE36_DIGITS[rng.gen_range(0..BASE36_DIGITS.len())] as char)
            .collect();

        let millis = Utc::now().timestamp_millis().max(0) as u64;

        format!("{}{}{}", self.prefix, random, to_base36(millis))
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_PREFIX)
    }
}

/// Lowercase base-36 rendering of `n`.
pub fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36_DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();

    digits.into_iter().map(char::from).collect()
}
