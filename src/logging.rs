// Log setup for the CLI

use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset or invalid
pub const DEFAULT_LEVEL: &str = "info";

/// Filter from `RUST_LOG`, falling back to `DEFAULT_LEVEL`
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Install the global subscriber, writing to stdout
pub fn init() {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// In-memory sink for captured log output
    #[derive(Clone, Default)]
    pub(crate) struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with a subscriber at the default level that writes into the returned buffer
    pub(crate) fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(DEFAULT_LEVEL))
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let result = tracing::subscriber::with_default(subscriber, f);
        (result, buf.contents())
    }

    #[test]
    fn test_default_level_shows_info_and_warn() {
        let ((), logs) = capture_logs(|| {
            tracing::debug!("hidden detail");
            tracing::info!("progress line");
            tracing::warn!("skipped something");
        });
        assert!(logs.contains("progress line"));
        assert!(logs.contains("skipped something"));
        assert!(!logs.contains("hidden detail"));
    }
}
