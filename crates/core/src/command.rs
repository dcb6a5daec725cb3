//! Optimistic mutation commands over the in-memory snapshot.
//!
//! Toggles and budget edits flip local state immediately while the
//! confirming request runs in the background. `apply` performs the patch
//! and returns the inverse command, so rollback is just `apply` of the
//! inverse -- the revert path is exercised identically in tests and
//! production.

use serde::{Deserialize, Serialize};

use crate::budget::{apply_budget, BudgetType};
use crate::model::Snapshot;
use crate::types::{EntityId, EntityKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    SetStatus {
        kind: EntityKind,
        id: EntityId,
        status: String,
    },
    SetBudget {
        kind: EntityKind,
        id: EntityId,
        budget_type: BudgetType,
        amount: f64,
    },
}

impl Command {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::SetStatus { kind, .. } | Self::SetBudget { kind, .. } => *kind,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::SetStatus { id, .. } | Self::SetBudget { id, .. } => id,
        }
    }
}

/// Patch fields reachable uniformly across the three entity levels.
struct EntityFields<'a> {
    effective_status: &'a mut String,
    configured_status: &'a mut String,
    daily_budget: &'a mut f64,
    lifetime_budget: &'a mut f64,
}

fn find_entity<'a>(
    snapshot: &'a mut Snapshot,
    kind: EntityKind,
    id: &str,
) -> Option<EntityFields<'a>> {
    match kind {
        EntityKind::Campaign => snapshot.campaigns.iter_mut().find(|c| c.id == id).map(|c| {
            EntityFields {
                effective_status: &mut c.effective_status,
                configured_status: &mut c.configured_status,
                daily_budget: &mut c.daily_budget,
                lifetime_budget: &mut c.lifetime_budget,
            }
        }),
        EntityKind::AdSet => snapshot.ad_sets.iter_mut().find(|s| s.id == id).map(|s| {
            EntityFields {
                effective_status: &mut s.effective_status,
                configured_status: &mut s.configured_status,
                daily_budget: &mut s.daily_budget,
                lifetime_budget: &mut s.lifetime_budget,
            }
        }),
        EntityKind::Ad => snapshot.ads.iter_mut().find(|a| a.id == id).map(|a| {
            EntityFields {
                effective_status: &mut a.effective_status,
                configured_status: &mut a.configured_status,
                daily_budget: &mut a.daily_budget,
                lifetime_budget: &mut a.lifetime_budget,
            }
        }),
    }
}

/// Apply a command optimistically, returning the inverse command for
/// rollback. Returns `None` when the target entity is not in the
/// snapshot (e.g. it was replaced by a refresh mid-flight); there is
/// nothing to revert in that case.
pub fn apply(snapshot: &mut Snapshot, cmd: &Command) -> Option<Command> {
    match cmd {
        Command::SetStatus { kind, id, status } => {
            let fields = find_entity(snapshot, *kind, id)?;
            let inverse = Command::SetStatus {
                kind: *kind,
                id: id.clone(),
                status: fields.effective_status.clone(),
            };
            *fields.effective_status = status.clone();
            *fields.configured_status = status.clone();
            Some(inverse)
        }
        Command::SetBudget {
            kind,
            id,
            budget_type,
            amount,
        } => {
            let fields = find_entity(snapshot, *kind, id)?;
            // Invert to whichever field was previously live; with both
            // zero the inverse restores the inherited state.
            let inverse = if *fields.lifetime_budget > 0.0 {
                Command::SetBudget {
                    kind: *kind,
                    id: id.clone(),
                    budget_type: BudgetType::Lifetime,
                    amount: *fields.lifetime_budget,
                }
            } else {
                Command::SetBudget {
                    kind: *kind,
                    id: id.clone(),
                    budget_type: BudgetType::Daily,
                    amount: *fields.daily_budget,
                }
            };
            apply_budget(
                fields.daily_budget,
                fields.lifetime_budget,
                *budget_type,
                *amount,
            );
            Some(inverse)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Ad, Campaign};

    fn snapshot_with_campaign() -> Snapshot {
        Snapshot {
            campaigns: vec![Campaign {
                id: "c1".into(),
                effective_status: "ACTIVE".into(),
                configured_status: "ACTIVE".into(),
                daily_budget: 10.0,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn status_flip_and_rollback_restore_original() {
        let mut snapshot = snapshot_with_campaign();
        let cmd = Command::SetStatus {
            kind: EntityKind::Campaign,
            id: "c1".into(),
            status: "PAUSED".into(),
        };

        let inverse = apply(&mut snapshot, &cmd).unwrap();
        assert_eq!(snapshot.campaigns[0].effective_status, "PAUSED");
        assert_eq!(snapshot.campaigns[0].configured_status, "PAUSED");

        apply(&mut snapshot, &inverse).unwrap();
        assert_eq!(snapshot.campaigns[0].effective_status, "ACTIVE");
    }

    #[test]
    fn budget_set_zeroes_other_field() {
        let mut snapshot = snapshot_with_campaign();
        let cmd = Command::SetBudget {
            kind: EntityKind::Campaign,
            id: "c1".into(),
            budget_type: BudgetType::Lifetime,
            amount: 250.0,
        };
        apply(&mut snapshot, &cmd).unwrap();
        assert_eq!(snapshot.campaigns[0].lifetime_budget, 250.0);
        assert_eq!(snapshot.campaigns[0].daily_budget, 0.0);
    }

    #[test]
    fn daily_budget_save_round_trip() {
        let mut snapshot = Snapshot {
            ads: vec![Ad {
                id: "a1".into(),
                lifetime_budget: 99.0,
                ..Default::default()
            }],
            ..Default::default()
        };
        let cmd = Command::SetBudget {
            kind: EntityKind::Ad,
            id: "a1".into(),
            budget_type: BudgetType::Daily,
            amount: 25.5,
        };

        let inverse = apply(&mut snapshot, &cmd).unwrap();
        assert_eq!(snapshot.ads[0].daily_budget, 25.5);
        assert_eq!(snapshot.ads[0].lifetime_budget, 0.0);

        apply(&mut snapshot, &inverse).unwrap();
        assert_eq!(snapshot.ads[0].daily_budget, 0.0);
        assert_eq!(snapshot.ads[0].lifetime_budget, 99.0);
    }

    #[test]
    fn inherited_budget_rolls_back_to_both_zero() {
        let mut snapshot = Snapshot {
            ads: vec![Ad {
                id: "a1".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let cmd = Command::SetBudget {
            kind: EntityKind::Ad,
            id: "a1".into(),
            budget_type: BudgetType::Daily,
            amount: 5.0,
        };
        let inverse = apply(&mut snapshot, &cmd).unwrap();
        apply(&mut snapshot, &inverse).unwrap();
        assert_eq!(snapshot.ads[0].daily_budget, 0.0);
        assert_eq!(snapshot.ads[0].lifetime_budget, 0.0);
    }

    #[test]
    fn missing_entity_returns_none() {
        let mut snapshot = Snapshot::default();
        let cmd = Command::SetStatus {
            kind: EntityKind::AdSet,
            id: "nope".into(),
            status: "PAUSED".into(),
        };
        assert!(apply(&mut snapshot, &cmd).is_none());
    }
}
