//! # cashdesk-session: Host Layer for the Register Ledger
//!
//! Everything around the pure ledger that touches the outside world.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      cashdesk-session                                   │
//! │                                                                         │
//! │  config.rs ──► RegisterConfig (defaults → TOML → CASHDESK_* env)       │
//! │                                                                         │
//! │  sink.rs ────► ConsoleSink (stdout), TracingSink (log)                 │
//! │                                                                         │
//! │  state.rs ───► RegisterState (Arc<Mutex<Ledger>>)                      │
//! │                                                                         │
//! │  lib.rs ─────► init_tracing()                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Load `RegisterConfig`
//! 2. Initialize tracing with its filter
//! 3. `config.build_state()` and hand clones of the state to callers

pub mod config;
pub mod error;
pub mod sink;
pub mod state;

pub use config::{DiscountSetting, NoticeOutput, RegisterConfig};
pub use error::{SessionError, SessionResult};
pub use sink::{ConsoleSink, TracingSink};
pub use state::RegisterState;

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages (overrides `default_filter`)
/// - `RUST_LOG=cashdesk_session=trace` - Trace this crate only
/// - Otherwise `default_filter` (see [`config::DEFAULT_LOG_FILTER`])
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(default_filter: &str) -> SessionResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| SessionError::Tracing(err.to_string()))
}
