//! Wall-clock helpers for message timestamps.
//!
//! Timestamps are integer milliseconds since the Unix epoch. In the browser
//! they are rendered in the viewer's local time zone; SSR and native tests
//! render UTC so output is deterministic.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

/// Current time in epoch milliseconds.
#[allow(clippy::cast_possible_truncation)]
pub fn now_ms() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::now() as i64
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
    }
}

/// Time-of-day label for a message timestamp.
///
/// A zero timestamp means the sender never stamped the message; it is
/// shown as the current time.
pub fn time_label(timestamp_ms: i64) -> String {
    let ts = if timestamp_ms == 0 { now_ms() } else { timestamp_ms };
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_precision_loss)]
        let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(ts as f64));
        format!("{:02}:{:02}:{:02}", date.get_hours(), date.get_minutes(), date.get_seconds())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        utc_clock(ts)
    }
}

/// `HH:MM:SS` in UTC. Negative timestamps wrap to the previous day.
pub fn utc_clock(timestamp_ms: i64) -> String {
    let secs_of_day = timestamp_ms.div_euclid(1000).rem_euclid(86_400);
    format!("{:02}:{:02}:{:02}", secs_of_day / 3600, secs_of_day % 3600 / 60, secs_of_day % 60)
}
