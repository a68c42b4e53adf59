use std::net::IpAddr;
use std::time::{Duration, Instant};

use dashmap::DashMap;

const LOGIN_WINDOW: Duration = Duration::from_secs(15 * 60);
const LOGIN_MAX_FAILURES: u32 = 5;
const SIGNUP_WINDOW: Duration = Duration::from_secs(60 * 60);

/// Per-IP signup limiter using a fixed window.
pub struct SignupRateLimiter {
    /// ip -> (count, window_start)
    entries: DashMap<IpAddr, (u32, Instant)>,
    limit: u32,
}

impl SignupRateLimiter {
    pub fn new(limit: u32) -> Self {
        Self {
            entries: DashMap::new(),
            limit,
        }
    }

    /// Count a signup attempt. Returns Err with retry-after seconds when over the limit.
    pub fn check(&self, ip: IpAddr) -> Result<(), u64> {
        self.check_at(ip, Instant::now())
    }

    fn check_at(&self, ip: IpAddr, now: Instant) -> Result<(), u64> {
        let mut entry = self.entries.entry(ip).or_insert((0, now));
        let (count, start) = entry.value_mut();

        if now.duration_since(*start) > SIGNUP_WINDOW {
            *count = 1;
            *start = now;
            return Ok(());
        }

        if *count >= self.limit {
            let elapsed = now.duration_since(*start).as_secs();
            return Err(SIGNUP_WINDOW.as_secs().saturating_sub(elapsed));
        }

        *count += 1;
        Ok(())
    }

    /// Remove entries whose window started before `max_age` ago.
    pub fn cleanup(&self, max_age: Duration) {
        let now = Instant::now();
        self.entries.retain(|_, (_, start)| now.duration_since(*start) < max_age);
    }
}

/// Per-username login brute force limiter: 5 failures per 15 minutes.
pub struct LoginRateLimiter {
    /// lowercased username -> (failed_count, window_start)
    entries: DashMap<String, (u32, Instant)>,
}

impl Default for LoginRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginRateLimiter {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Does NOT increment the counter; call `record_failure()` on a bad password.
    pub fn check(&self, username: &str) -> Result<(), u64> {
        let now = Instant::now();

        let Some(entry) = self.entries.get(&username.to_lowercase()) else {
            return Ok(());
        };

        let (count, start) = entry.value();

        if now.duration_since(*start) > LOGIN_WINDOW {
            return Ok(());
        }

        if *count >= LOGIN_MAX_FAILURES {
            let elapsed = now.duration_since(*start).as_secs();
            return Err(LOGIN_WINDOW.as_secs().saturating_sub(elapsed));
        }

        Ok(())
    }

    pub fn record_failure(&self, username: &str) {
        let now = Instant::now();

        let mut entry = self.entries.entry(username.to_lowercase()).or_insert((0, now));
        let (count, start) = entry.value_mut();

        if now.duration_since(*start) > LOGIN_WINDOW {
            *count = 1;
            *start = now;
        } else {
            *count += 1;
        }
    }

    pub fn clear(&self, username: &str) {
        self.entries.remove(&username.to_lowercase());
    }

    pub fn cleanup(&self, max_age: Duration) {
        let now = Instant::now();
        self.entries.retain(|_, (_, start)| now.duration_since(*start) < max_age);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(last: u8) -> IpAddr {
        IpAddr::from([10, 0, 0, last])
    }

    #[test]
    fn signup_limit_applies_per_ip() {
        let limiter = SignupRateLimiter::new(2);
        let now = Instant::now();
        assert!(limiter.check_at(ip(1), now).is_ok());
        assert!(limiter.check_at(ip(1), now).is_ok());
        let retry = limiter.check_at(ip(1), now).unwrap_err();
        assert!(retry > 0 && retry <= SIGNUP_WINDOW.as_secs());
        assert!(limiter.check_at(ip(2), now).is_ok());
    }

    #[test]
    fn signup_window_resets() {
        let limiter = SignupRateLimiter::new(1);
        let start = Instant::now();
        assert!(limiter.check_at(ip(1), start).is_ok());
        assert!(limiter.check_at(ip(1), start).is_err());
        let later = start + SIGNUP_WINDOW + Duration::from_secs(1);
        assert!(limiter.check_at(ip(1), later).is_ok());
    }

    #[test]
    fn login_blocks_after_five_failures() {
        let limiter = LoginRateLimiter::new();
        for _ in 0..4 {
            limiter.record_failure("Maria@Example.com");
        }
        assert!(limiter.check("maria@example.com").is_ok());
        limiter.record_failure("maria@example.com");
        assert!(limiter.check("MARIA@example.com").is_err());
        assert!(limiter.check("joao@example.com").is_ok());
    }

    #[test]
    fn clear_forgets_failures() {
        let limiter = LoginRateLimiter::new();
        for _ in 0..5 {
            limiter.record_failure("maria");
        }
        limiter.clear("maria");
        assert!(limiter.check("maria").is_ok());
    }
}
