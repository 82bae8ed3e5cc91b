/// Settle delays and bounded element waits

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}

/// Random pause inside `[min_ms, max_ms]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Jitter {
    pub min_ms: u32,
    pub max_ms: u32,
}

impl Jitter {
    pub fn new(min_ms: u32, max_ms: u32) -> Jitter {
        Jitter {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
        }
    }

    pub fn fixed(ms: u32) -> Jitter {
        Jitter::new(ms, ms)
    }

    /// Map a random roll onto the window
    pub fn pick(&self, roll: u32) -> Duration {
        let lo = u64::from(self.min_ms.min(self.max_ms));
        let hi = u64::from(self.min_ms.max(self.max_ms));
        let span = hi - lo + 1;
        Duration::from_millis(lo + u64::from(roll) % span)
    }

    pub fn sample(&self) -> Duration {
        let mut buf = [0u8; 4];
        let roll = match getrandom::getrandom(&mut buf) {
            Ok(()) => u32::from_le_bytes(buf),
            Err(e) => {
                log::debug!("no entropy for settle jitter, using lower bound: {}", e);
                0
            }
        };
        self.pick(roll)
    }
}

/// How long a locator keeps polling for an element that has not rendered yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WaitPolicy {
    pub timeout_ms: u32,
    pub poll_ms: u32,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        WaitPolicy {
            timeout_ms: 3000,
            poll_ms: 100,
        }
    }
}

impl WaitPolicy {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.timeout_ms))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.poll_ms.max(1)))
    }
}
