use chrono::{Local, NaiveDateTime, Timelike};

/// Source of wall-clock timestamps for newly stored records.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local time, truncated to whole seconds to match the wire format.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// Always reports the same instant. Used by tests and fixtures.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_drops_sub_second_precision() {
        assert_eq!(SystemClock.now().nanosecond(), 0);
    }
}
