/// Timestamped progress line, in the spirit of tracing's `info!`.
///
/// With a `chrono::Local` time as the first argument it also reports the
/// seconds elapsed since that time:
/// ```ignore
/// info_time!("resolved {} hotspots", count);
/// let started = Local::now();
/// info_time!(started, "finished {}", name);
/// ```
#[macro_export]
macro_rules! info_time {
    ($strfm:literal $(,)? $($arg:expr),*) => {{
        let local_now = Local::now();
        println!("{:<30} : {}", local_now, format!($strfm, $($arg),*));
    }};
    ($time:expr, $strfm:literal $(,)? $($arg:expr),*) => {{
        let local_now = Local::now();
        let elapsed = (local_now - $time)
            .num_microseconds()
            .map(|us| us as f64 / 1_000_000.0)
            .unwrap_or(0.0);
        println!(
            "{:<30} : {} ({elapsed} sec)",
            local_now,
            format!($strfm, $($arg),*)
        );
    }};
}
