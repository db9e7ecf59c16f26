// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Collection of clock implementations.

use time::OffsetDateTime;

/// Generic definition of a clock.
pub trait Clock {
    /// Returns the current UTC time.
    fn now_utc(&self) -> OffsetDateTime;
}

/// Drops the sub-microsecond part of `ts`, which PostgreSQL timestamps cannot hold.
pub fn truncate_to_micros(ts: OffsetDateTime) -> OffsetDateTime {
    ts - time::Duration::nanoseconds(i64::from(ts.nanosecond() % 1000))
}

/// Clock backed by the system time, truncated to microseconds so that values handed out match
/// what a later database read returns.
#[derive(Clone, Default)]
pub struct SystemClock {}

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        truncate_to_micros(OffsetDateTime::now_utc())
    }
}

/// Test utilities.
#[cfg(any(test, feature = "testutils"))]
pub mod testutils {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// A clock that returns a preconfigured instant and that can be modified at will.
    ///
    /// Only supports microsecond-level precision.
    pub struct SettableClock {
        /// Current fake time in microseconds.
        now_us: AtomicU64,
    }

    /// Converts `now` to microseconds since the epoch, panicking on unsupported precision.
    fn to_micros(now: OffsetDateTime) -> u64 {
        let now_ns = now.unix_timestamp_nanos();
        assert!(now_ns % 1000 == 0, "Nanosecond precision not supported");
        u64::try_from(now_ns / 1000).unwrap()
    }

    impl SettableClock {
        /// Creates a new clock that returns `now` until reconfigured with `set`.
        pub fn new(now: OffsetDateTime) -> Self {
            Self { now_us: AtomicU64::new(to_micros(now)) }
        }

        /// Sets the new value of `now` that the clock returns.
        pub fn set(&self, now: OffsetDateTime) {
            self.now_us.store(to_micros(now), Ordering::SeqCst);
        }
    }

    impl Clock for SettableClock {
        fn now_utc(&self) -> OffsetDateTime {
            let now_us = self.now_us.load(Ordering::SeqCst);
            OffsetDateTime::from_unix_timestamp_nanos(now_us as i128 * 1000).unwrap()
        }
    }

}
