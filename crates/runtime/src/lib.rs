//! Runtime module - async pacing, event records and the JSONL log
//!
//! Bridges the synchronous [`Session`](honey_match_core::Session) state machine with a
//! tokio runtime:
//!
//! - [`config`]: `HONEY_MATCH_*` environment configuration
//! - [`driver`]: cascade pacing, autoplay and `[Session]` stderr lines
//! - [`protocol`]: serde records for events and the end-of-session summary
//! - [`log`]: background writer for the JSONL event log

pub mod config;
pub mod driver;
pub mod log;
pub mod protocol;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use honey_match_core::Session;
use honey_match_engine::Policy;

pub use config::{Pacing, RuntimeConfig};
pub use driver::{autoplay, drive, EventSink};
pub use log::EventLog;
pub use protocol::{EventBody, EventRecord, SummaryRecord};

/// Build a session from `config`: seeded when a seed is set, entropy otherwise
pub fn session_from_config(config: &RuntimeConfig) -> Result<Session<StdRng>> {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Session::new(config.game.clone(), rng).context("invalid game configuration")
}

/// Play one full session under `config` and return its summary record
pub async fn run_session(config: &RuntimeConfig, policy: Policy) -> Result<SummaryRecord> {
    let log = match &config.log_path {
        Some(path) => Some(EventLog::open(path).await?),
        None => None,
    };
    let mut sink = EventSink::new(log);

    let mut session = session_from_config(config)?;
    match config.seed {
        Some(seed) => eprintln!(
            "[Session] started seed={} moves={} pacing={}",
            seed,
            session.moves(),
            config.pacing.as_str()
        ),
        None => eprintln!(
            "[Session] started moves={} pacing={}",
            session.moves(),
            config.pacing.as_str()
        ),
    }

    let summary = autoplay(&mut session, config.pacing, policy, &mut sink).await?;
    sink.close().await?;
    Ok(summary.into())
}
