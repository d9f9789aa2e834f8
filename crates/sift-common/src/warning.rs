//! Scanner warnings with colored terminal output.
//!
//! Content-level anomalies (a non-numeric `amount`, for instance) never abort a
//! run. They are reported here instead, once per unique message, so a large
//! document with thousands of identical problems does not flood stderr.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use std::sync::atomic::{AtomicBool, Ordering};

use owo_colors::{OwoColorize, Stream};

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// When set, warnings are still recorded but nothing is printed.
static QUIET: AtomicBool = AtomicBool::new(false);

/// Warn about a content-level anomaly (prints once per unique message).
///
/// Keep positions out of `message`: the message is the dedup key.
///
/// # Example
/// ```ignore
/// warn_once("Report", "non-numeric amount \"n/a\"");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if remember(format!("[{component}] {message}")) && !QUIET.load(Ordering::Relaxed) {
        eprintln!("{}", render(component, message));
    }
}

/// Record `key`, returning `true` the first time it is seen.
fn remember(key: String) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key)
}

/// Yellow when stderr is a terminal, plain otherwise.
fn render(component: &str, message: &str) -> String {
    let line = format!("[sift {component}] ⚠ {message}");
    line.if_supports_color(Stream::Stderr, OwoColorize::yellow)
        .to_string()
}

/// Silence (or re-enable) printing of warnings.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

/// Clear all recorded warnings (call before scanning a new document)
pub fn clear_warnings() {
    let mut guard = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests share the global registry, so they run one at a time.
    static SERIAL: Mutex<()> = Mutex::new(());

    fn is_recorded(component: &str, message: &str) -> bool {
        WARNED
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|set| set.contains(&format!("[{component}] {message}")))
    }

    fn recorded_count() -> usize {
        WARNED
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map_or(0, HashSet::len)
    }

    #[test]
    fn test_repeated_warning_recorded_once() {
        let _serial = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
        clear_warnings();
        set_quiet(true);

        for _ in 0..4 {
            warn_once("Report", "non-numeric amount \"n/a\"");
        }
        assert_eq!(recorded_count(), 1);
        assert!(!remember("[Report] non-numeric amount \"n/a\"".to_string()));

        warn_once("Report", "non-numeric amount \"x\"");
        assert_eq!(recorded_count(), 2);
        set_quiet(false);
    }

    #[test]
    fn test_component_is_part_of_the_key() {
        let _serial = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
        clear_warnings();
        set_quiet(true);

        warn_once("Report", "same text");
        warn_once("Cli", "same text");
        assert!(is_recorded("Report", "same text"));
        assert!(is_recorded("Cli", "same text"));
        assert_eq!(recorded_count(), 2);
        set_quiet(false);
    }

    #[test]
    fn test_quiet_still_records() {
        let _serial = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
        clear_warnings();
        set_quiet(true);

        warn_once("Report", "silenced");
        assert!(is_recorded("Report", "silenced"));
        assert!(QUIET.load(Ordering::Relaxed));

        set_quiet(false);
        assert!(!QUIET.load(Ordering::Relaxed));
    }

    #[test]
    fn test_clear_warnings_allows_repeat() {
        let _serial = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
        clear_warnings();
        assert!(remember("[Report] again".to_string()));
        assert!(!remember("[Report] again".to_string()));

        clear_warnings();
        assert_eq!(recorded_count(), 0);
        assert!(remember("[Report] again".to_string()));
    }

    #[test]
    fn test_render_without_color_is_plain() {
        owo_colors::set_override(false);
        let line = render("Report", "bad amount");
        owo_colors::unset_override();
        assert_eq!(line, "[sift Report] ⚠ bad amount");
    }
}
