//! Compact human-readable durations (`2d 10h`, `3h05m`, `45m`, `10s`).

use core::fmt;

use time::Duration;

pub const MINUTE: i64 = 60;
pub const HOUR: i64 = 3_600;
pub const DAY: i64 = 86_400;

/// Display a duration in the compact form used by the host's tray menu.
pub trait HumanDuration {
    type Displayer: fmt::Display;

    fn as_human(&self) -> Self::Displayer;
}

impl HumanDuration for Duration {
    type Displayer = HumanDurationDisplay;

    fn as_human(&self) -> Self::Displayer {
        HumanDurationDisplay(*self)
    }
}

/// [`fmt::Display`] adapter returned by [`HumanDuration::as_human`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDurationDisplay(Duration);

impl fmt::Display for HumanDurationDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_seconds = self.0.whole_seconds().max(0);

        let days = total_seconds / DAY;
        let hours = (total_seconds % DAY) / HOUR;
        let minutes = (total_seconds % HOUR) / MINUTE;
        let seconds = total_seconds % MINUTE;

        let mut out = String::new();
        if days > 0 {
            out.push_str(&format!("{days}d"));
        }
        if hours > 0 {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&format!("{hours}h"));
        }
        // Minutes are dropped once days are shown, and sit flush against hours.
        if minutes > 0 && days == 0 {
            if hours > 0 {
                out.push_str(&format!("{minutes:02}m"));
            } else {
                out.push_str(&format!("{minutes}m"));
            }
        }
        if out.is_empty() {
            out.push_str(&format!("{seconds}s"));
        }

        f.write_str(&out)
    }
}
