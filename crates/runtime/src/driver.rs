//! Session driver - paces cascades and publishes events
//!
//! In realtime pacing the driver sleeps through every step's minimum delay before
//! letting the session run it, which keeps a presentation layer in step with the
//! resolver. Headless pacing runs the same steps back to back.

use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use rand::Rng;

use honey_match_core::{Session, SessionEvent, SessionSummary};
use honey_match_engine::{play_move, Policy};

use crate::config::Pacing;
use crate::log::EventLog;
use crate::protocol::{EventBody, EventRecord};

/// Stderr lines plus the optional JSONL log
pub struct EventSink {
    log: Option<EventLog>,
    seq: u64,
    started_at: Instant,
    echo: bool,
}

impl EventSink {
    pub fn new(log: Option<EventLog>) -> Self {
        Self {
            log,
            seq: 0,
            started_at: Instant::now(),
            echo: true,
        }
    }

    /// Sink that only feeds the log file (no stderr lines)
    pub fn quiet(log: Option<EventLog>) -> Self {
        Self {
            echo: false,
            ..Self::new(log)
        }
    }

    /// Number of events published so far
    pub fn published(&self) -> u64 {
        self.seq
    }

    pub fn publish(&mut self, events: Vec<SessionEvent>) {
        for event in events {
            self.seq += 1;
            if self.echo {
                if let Some(line) = describe(&event) {
                    eprintln!("[Session] {}", line);
                }
            }
            if let Some(log) = &self.log {
                log.record(EventRecord {
                    seq: self.seq,
                    ts: self.started_at.elapsed().as_millis() as u64,
                    body: EventBody::from(&event),
                });
            }
        }
    }

    pub async fn close(self) -> Result<()> {
        match self.log {
            Some(log) => log.close().await,
            None => Ok(()),
        }
    }
}

fn describe(event: &SessionEvent) -> Option<String> {
    match event {
        SessionEvent::SwapStarted { .. } => None,
        SessionEvent::SwapRolledBack { from, to } => Some(format!(
            "swap ({},{})<->({},{}) rolled back",
            from.row, from.col, to.row, to.col
        )),
        SessionEvent::SwapCommitted {
            from,
            to,
            moves_left,
        } => Some(format!(
            "swap ({},{})<->({},{}) committed, {} moves left",
            from.row, from.col, to.row, to.col, moves_left
        )),
        SessionEvent::WeaponArmed {
            weapon, remaining, ..
        } => Some(format!("{} armed, {} left", weapon.as_str(), remaining)),
        SessionEvent::WeaponDetonated { weapon, cells, .. } => {
            Some(format!("{} hit {} cells", weapon.as_str(), cells))
        }
        SessionEvent::RoundResolved(report) => Some(format!(
            "round {}: removed {}, +{} points",
            report.round, report.removed, report.score.total
        )),
        SessionEvent::BonusGranted(bonus) => Some(format!("bonus {}", bonus.kind_str())),
        SessionEvent::Settled { score, moves_left } => {
            Some(format!("settled at {} points, {} moves left", score, moves_left))
        }
        SessionEvent::GameOver(summary) => Some(format!(
            "game over: {} points, max combo {}, {} moves used",
            summary.final_score, summary.max_combo_reached, summary.moves_used
        )),
    }
}

/// Walk the current cascade to its end; returns the number of steps run
pub async fn drive<R: Rng>(
    session: &mut Session<R>,
    pacing: Pacing,
    sink: &mut EventSink,
) -> usize {
    let mut steps = 0;
    sink.publish(session.take_events());
    while let Some(delay_ms) = session.pending_delay_ms() {
        match pacing {
            Pacing::Realtime => {
                tokio::time::sleep(Duration::from_millis(delay_ms as u64)).await;
                session.tick(delay_ms);
            }
            Pacing::Headless => {
                session.advance();
            }
        }
        steps += 1;
        sink.publish(session.take_events());
    }
    steps
}

/// Play until the session ends, choosing every swap with `policy`
pub async fn autoplay<R: Rng>(
    session: &mut Session<R>,
    pacing: Pacing,
    policy: Policy,
    sink: &mut EventSink,
) -> Result<SessionSummary> {
    sink.publish(session.take_events());
    while !session.game_over() {
        play_move(session, policy).map_err(|e| anyhow!("autoplay stalled: {}", e.message()))?;
        drive(session, pacing, sink).await;
    }
    session
        .summary()
        .ok_or_else(|| anyhow!("session ended without a summary"))
}
