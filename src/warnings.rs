use std::cell::RefCell;

thread_local! {
    static BUFFER: RefCell<Option<Vec<String>>> = const { RefCell::new(None) };
}

/// Activate buffering. While active, `buffered_eprintln!()` calls store
/// messages instead of printing to stderr.
pub fn activate() {
    BUFFER.with(|b| *b.borrow_mut() = Some(Vec::new()));
}

/// Deactivate buffering and return all collected messages.
pub fn drain() -> Vec<String> {
    BUFFER.with(|b| b.borrow_mut().take().unwrap_or_default())
}

/// Write a warning message. If buffering is active the message is stored;
/// otherwise it is printed to stderr immediately.
pub fn warn(msg: String) {
    let unbuffered = BUFFER.with(|b| match b.borrow_mut().as_mut() {
        Some(buf) => {
            buf.push(msg);
            None
        }
        None => Some(msg),
    });
    if let Some(msg) = unbuffered {
        eprintln!("{}", msg);
    }
}

/// Works like `eprintln!` but routes through the warning buffer when it is
/// active, so input problems are listed after the standings.
#[macro_export]
macro_rules! buffered_eprintln {
    ($($arg:tt)*) => {
        $crate::warnings::warn(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_collects_until_drained() {
        activate();
        buffered_eprintln!("first {}", 1);
        warn("second".to_string());
        let messages = drain();
        assert_eq!(messages, vec!["first 1".to_string(), "second".to_string()]);

        // Inactive again after drain
        assert!(drain().is_empty());
    }

    #[test]
    fn test_activate_resets_buffer() {
        activate();
        warn("stale".to_string());
        activate();
        assert!(drain().is_empty());
    }
}
