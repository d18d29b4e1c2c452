//! Logging initialization
//!
//! One subscriber per process, chosen by [`Profile`]. Output always goes to
//! stderr so command output on stdout stays machine-readable.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Where and how log events are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines, debug level
    Development,
    /// One JSON object per event, info level
    Production,
    /// Bare registry; see [`super::init_test_capture`]
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset
    pub fn default_directive(&self) -> &'static str {
        match self {
            Profile::Development => "depconstrain=debug",
            Profile::Production | Profile::Test => "depconstrain=info",
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the subscriber for `profile`
///
/// Only the first call in a process has any effect. `RUST_LOG` overrides the
/// profile's default filter.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(profile.filter())
            .init(),
        Profile::Production => tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(profile.filter())
            .init(),
        Profile::Test => tracing_subscriber::registry().init(),
    });
}
