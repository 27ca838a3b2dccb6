use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use lazy_static::lazy_static;
use tokio::sync::Mutex;

lazy_static! {
    static ref COOLDOWNS: Mutex<Cooldowns> = Mutex::new(Cooldowns::new(COOLDOWN_SECONDS));
}

const COOLDOWN_SECONDS: u64 = 2;

/// Last use of each (user, command) pair, and when the user was last warned
pub struct Cooldowns {
    seconds: u64,
    last_used: HashMap<(u64, String), u64>,
    // Only warn once per cooldown period to avoid message spam
    last_warned: HashMap<(u64, String), u64>,
}

impl Cooldowns {
    fn new(seconds: u64) -> Self {
        Self {
            seconds,
            last_used: HashMap::new(),
            last_warned: HashMap::new(),
        }
    }

    /// Ok(()) if the command may run now (and records the use).
    /// Err((remaining_seconds, should_send_warning)) while cooling down.
    fn check(&mut self, user_id: u64, command: &str, now: u64) -> Result<(), (u64, bool)> {
        self.prune(now);
        let key = (user_id, command.to_string());

        if let Some(&last_time) = self.last_used.get(&key) {
            let elapsed = now.saturating_sub(last_time);
            if elapsed < self.seconds {
                let should_warn = match self.last_warned.get(&key) {
                    Some(&last_warning) => last_warning < last_time,
                    None => true,
                };
                if should_warn {
                    self.last_warned.insert(key, now);
                }
                return Err((self.seconds - elapsed, should_warn));
            }
        }

        self.last_used.insert(key, now);
        Ok(())
    }

    /// Forget pairs whose cooldown has run out
    fn prune(&mut self, now: u64) {
        let seconds = self.seconds;
        self.last_used.retain(|_, &mut last| now.saturating_sub(last) < seconds);
        let last_used = &self.last_used;
        self.last_warned.retain(|key, _| last_used.contains_key(key));
    }
}

/// Check if a user can execute a command (cooldown not active)
pub async fn check_cooldown(user_id: u64, command: &str) -> Result<(), (u64, bool)> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    COOLDOWNS.lock().await.check(user_id, command, now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_blocks_then_allows() {
        let mut cooldowns = Cooldowns::new(5);

        assert!(cooldowns.check(1, "$add", 100).is_ok());
        assert_eq!(cooldowns.check(1, "$add", 102), Err((3, true)));
        assert!(cooldowns.check(1, "$add", 105).is_ok());
    }

    #[test]
    fn test_warns_once_per_period() {
        let mut cooldowns = Cooldowns::new(5);

        cooldowns.check(1, "$add", 100).unwrap();
        assert_eq!(cooldowns.check(1, "$add", 101), Err((4, true)));
        assert_eq!(cooldowns.check(1, "$add", 102), Err((3, false)));

        cooldowns.check(1, "$add", 110).unwrap();
        assert_eq!(cooldowns.check(1, "$add", 111), Err((4, true)));
    }

    #[test]
    fn test_cooldowns_are_per_user_and_command() {
        let mut cooldowns = Cooldowns::new(5);

        cooldowns.check(1, "$add", 100).unwrap();
        assert!(cooldowns.check(2, "$add", 100).is_ok());
        assert!(cooldowns.check(1, "$remove", 100).is_ok());
    }

    #[test]
    fn test_expired_entries_are_dropped() {
        let mut cooldowns = Cooldowns::new(5);

        cooldowns.check(1, "$add", 100).unwrap();
        assert!(cooldowns.check(1, "$add", 101).is_err());
        cooldowns.check(2, "$remove", 103).unwrap();
        assert_eq!(cooldowns.last_used.len(), 2);
        assert_eq!(cooldowns.last_warned.len(), 1);

        cooldowns.check(3, "$help", 200).unwrap();
        assert_eq!(cooldowns.last_used.len(), 1);
        assert!(cooldowns.last_warned.is_empty());
    }
}
