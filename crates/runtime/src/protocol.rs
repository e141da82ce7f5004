//! Protocol module - JSON records for session events and summaries
//!
//! One record per line in the event log. Every record carries `type`, `seq` (per-session
//! sequence number) and `ts` (milliseconds since the session started). The summary uses
//! the camelCase field names persistence collaborators expect.

use serde::{Deserialize, Serialize};

use honey_match_core::{BonusGrant, SessionEvent, SessionSummary};
use honey_match_types::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl From<Position> for Cell {
    fn from(pos: Position) -> Self {
        Self {
            row: pos.row,
            col: pos.col,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusRecord {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weapon: Option<String>,
}

impl From<BonusGrant> for BonusRecord {
    fn from(bonus: BonusGrant) -> Self {
        let (amount, weapon) = match bonus {
            BonusGrant::Crypto { millis } => (Some(millis), None),
            BonusGrant::Gold { amount } => (Some(amount), None),
            BonusGrant::Weapon(kind) => (None, Some(kind.as_str().to_string())),
            BonusGrant::Multiplier(m) => (Some(m as u64), None),
            BonusGrant::ExtraMoves(n) => (Some(n as u64), None),
        };
        Self {
            kind: bonus.kind_str().to_string(),
            amount,
            weapon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub kind: String,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialRecord {
    pub cell: Cell,
    pub special: String,
}

/// Event payload, tagged by `type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventBody {
    SwapStarted {
        from: Cell,
        to: Cell,
    },
    SwapRolledBack {
        from: Cell,
        to: Cell,
    },
    SwapCommitted {
        from: Cell,
        to: Cell,
        moves_left: u32,
    },
    WeaponArmed {
        weapon: String,
        target: Cell,
        remaining: u32,
    },
    WeaponDetonated {
        weapon: String,
        target: Cell,
        cells: usize,
    },
    RoundResolved {
        round: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        weapon: Option<String>,
        matches: Vec<MatchRecord>,
        specials: Vec<SpecialRecord>,
        removed: usize,
        score: u64,
        multiplier: u32,
        currency: u64,
    },
    BonusGranted {
        bonus: BonusRecord,
    },
    Settled {
        score: u64,
        moves_left: u32,
    },
    GameOver {
        summary: SummaryRecord,
    },
}

impl From<&SessionEvent> for EventBody {
    fn from(event: &SessionEvent) -> Self {
        match event {
            SessionEvent::SwapStarted { from, to } => EventBody::SwapStarted {
                from: (*from).into(),
                to: (*to).into(),
            },
            SessionEvent::SwapRolledBack { from, to } => EventBody::SwapRolledBack {
                from: (*from).into(),
                to: (*to).into(),
            },
            SessionEvent::SwapCommitted {
                from,
                to,
                moves_left,
            } => EventBody::SwapCommitted {
                from: (*from).into(),
                to: (*to).into(),
                moves_left: *moves_left,
            },
            SessionEvent::WeaponArmed {
                weapon,
                target,
                remaining,
            } => EventBody::WeaponArmed {
                weapon: weapon.as_str().to_string(),
                target: (*target).into(),
                remaining: *remaining,
            },
            SessionEvent::WeaponDetonated {
                weapon,
                target,
                cells,
            } => EventBody::WeaponDetonated {
                weapon: weapon.as_str().to_string(),
                target: (*target).into(),
                cells: *cells,
            },
            SessionEvent::RoundResolved(report) => EventBody::RoundResolved {
                round: report.round,
                weapon: report.weapon.map(|w| w.as_str().to_string()),
                matches: report
                    .matches
                    .iter()
                    .map(|m| MatchRecord {
                        kind: m.kind.as_str().to_string(),
                        cells: m.positions.iter().map(|&p| p.into()).collect(),
                    })
                    .collect(),
                specials: report
                    .specials
                    .iter()
                    .filter_map(|(pos, special)| {
                        special.as_str().map(|name| SpecialRecord {
                            cell: (*pos).into(),
                            special: name.to_string(),
                        })
                    })
                    .collect(),
                removed: report.removed,
                score: report.score.total,
                multiplier: report.score.multiplier,
                currency: report.score.currency,
            },
            SessionEvent::BonusGranted(bonus) => EventBody::BonusGranted {
                bonus: (*bonus).into(),
            },
            SessionEvent::Settled { score, moves_left } => EventBody::Settled {
                score: *score,
                moves_left: *moves_left,
            },
            SessionEvent::GameOver(summary) => EventBody::GameOver {
                summary: (*summary).into(),
            },
        }
    }
}

/// One line of the event log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub seq: u64,
    pub ts: u64,
    #[serde(flatten)]
    pub body: EventBody,
}

/// End-of-session summary for persistence collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    pub final_score: u64,
    pub currency_earned: u64,
    pub max_combo_reached: u32,
    pub moves_used: u32,
    pub match_count: u32,
    pub bonus_count: u32,
    pub duration_ms: u64,
    pub gold_earned: u64,
    pub crypto_earned_millis: u64,
}

impl From<SessionSummary> for SummaryRecord {
    fn from(s: SessionSummary) -> Self {
        Self {
            final_score: s.final_score,
            currency_earned: s.currency_earned,
            max_combo_reached: s.max_combo_reached,
            moves_used: s.moves_used,
            match_count: s.match_count,
            bonus_count: s.bonus_count,
            duration_ms: s.duration_ms,
            gold_earned: s.gold_earned,
            crypto_earned_millis: s.crypto_earned_millis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use honey_match_types::WeaponKind;

    #[test]
    fn test_summary_uses_camel_case() {
        let summary = SessionSummary {
            final_score: 135,
            currency_earned: 1,
            max_combo_reached: 2,
            moves_used: 1,
            match_count: 3,
            bonus_count: 0,
            duration_ms: 10,
            gold_earned: 0,
            crypto_earned_millis: 0,
        };
        let v = serde_json::to_value(SummaryRecord::from(summary)).unwrap();
        assert_eq!(v["finalScore"], 135);
        assert_eq!(v["maxComboReached"], 2);
        assert_eq!(v["durationMs"], 10);
        assert!(v.get("final_score").is_none());
    }

    #[test]
    fn test_event_record_is_flat_and_tagged() {
        let event = SessionEvent::SwapCommitted {
            from: Position::new(0, 2),
            to: Position::new(1, 2),
            moves_left: 29,
        };
        let record = EventRecord {
            seq: 7,
            ts: 350,
            body: EventBody::from(&event),
        };
        let line = serde_json::to_string(&record).unwrap();
        let v: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(v["type"], "swap_committed");
        assert_eq!(v["seq"], 7);
        assert_eq!(v["from"]["col"], 2);
        assert_eq!(v["moves_left"], 29);

        let back: EventRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_weapon_bonus_record() {
        let record = BonusRecord::from(BonusGrant::Weapon(WeaponKind::BeeSwarm));
        assert_eq!(record.kind, "weapon");
        assert_eq!(record.weapon.as_deref(), Some(WeaponKind::BeeSwarm.as_str()));
        assert_eq!(record.amount, None);
    }
}
