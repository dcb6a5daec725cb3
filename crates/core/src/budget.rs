//! Budget-edit state machine.
//!
//! `Idle -> Editing -> Saving -> Idle` on success; a validation failure
//! keeps the editor in `Editing` with an inline error, and an upstream
//! failure returns it there. Amounts are decimal currency units; only
//! finite values strictly greater than zero may be submitted.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// Which budget field an entity holds. Exactly one is meaningfully
/// non-zero per entity; both zero means "inherited from parent".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetType {
    #[default]
    Daily,
    Lifetime,
}

impl BudgetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Lifetime => "lifetime",
        }
    }
}

/// Parse a user-entered amount. Accepts any finite number > 0.
pub fn parse_amount(input: &str) -> Result<f64, String> {
    match input.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        Ok(_) => Err("Budget must be greater than zero".to_string()),
        Err(_) => Err("Budget must be a number".to_string()),
    }
}

/// Apply a saved budget to an entity's fields: the chosen field takes the
/// amount, the other is zeroed (the two are mutually exclusive).
pub fn apply_budget(daily: &mut f64, lifetime: &mut f64, budget_type: BudgetType, amount: f64) {
    match budget_type {
        BudgetType::Daily => {
            *daily = amount;
            *lifetime = 0.0;
        }
        BudgetType::Lifetime => {
            *lifetime = amount;
            *daily = 0.0;
        }
    }
}

/// The editor state machine for one budget popover.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum BudgetEditor {
    #[default]
    Idle,
    Editing {
        entity_id: EntityId,
        budget_type: BudgetType,
        input: String,
        error: Option<String>,
    },
    Saving {
        entity_id: EntityId,
        budget_type: BudgetType,
        amount: f64,
    },
}

impl BudgetEditor {
    /// Open the editor for an entity, seeding the input from its current
    /// budget. Daily is preferred when non-zero; a fully inherited budget
    /// seeds an empty input.
    pub fn begin(&mut self, entity_id: EntityId, daily: f64, lifetime: f64) {
        let (budget_type, seed) = if daily > 0.0 {
            (BudgetType::Daily, format!("{daily}"))
        } else if lifetime > 0.0 {
            (BudgetType::Lifetime, format!("{lifetime}"))
        } else {
            (BudgetType::Daily, String::new())
        };
        *self = Self::Editing {
            entity_id,
            budget_type,
            input: seed,
            error: None,
        };
    }

    /// Replace the input text while editing. No-op in other states.
    pub fn set_input(&mut self, value: impl Into<String>) {
        if let Self::Editing { input, error, .. } = self {
            *input = value.into();
            *error = None;
        }
    }

    /// Attempt the transition to `Saving`.
    ///
    /// Returns the `(entity_id, budget_type, amount)` to send upstream on
    /// success. A validation failure is surfaced inline and the editor
    /// stays in `Editing`; calling from any other state is an error.
    pub fn submit(&mut self) -> Result<(EntityId, BudgetType, f64), String> {
        let Self::Editing {
            entity_id,
            budget_type,
            input,
            error,
        } = self
        else {
            return Err("No budget edit in progress".to_string());
        };

        match parse_amount(input) {
            Ok(amount) => {
                let id = entity_id.clone();
                let bt = *budget_type;
                *self = Self::Saving {
                    entity_id: id.clone(),
                    budget_type: bt,
                    amount,
                };
                Ok((id, bt, amount))
            }
            Err(msg) => {
                *error = Some(msg.clone());
                Err(msg)
            }
        }
    }

    /// Record the outcome of the upstream save. Success returns to
    /// `Idle`; failure restores `Editing` with the error so the user can
    /// retry without losing their input.
    pub fn complete(&mut self, result: Result<(), String>) {
        if let Self::Saving {
            entity_id,
            budget_type,
            amount,
        } = self
        {
            *self = match result {
                Ok(()) => Self::Idle,
                Err(msg) => Self::Editing {
                    entity_id: entity_id.clone(),
                    budget_type: *budget_type,
                    input: format!("{amount}"),
                    error: Some(msg),
                },
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- parse_amount ---------------------------------------------------------

    #[test]
    fn parse_accepts_decimal() {
        assert_eq!(parse_amount("25.50").unwrap(), 25.5);
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(parse_amount(" 10 ").unwrap(), 10.0);
    }

    #[test]
    fn parse_rejects_zero_and_negative() {
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("-5").is_err());
    }

    #[test]
    fn parse_rejects_non_numeric_and_non_finite() {
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("inf").is_err());
        assert!(parse_amount("NaN").is_err());
    }

    // -- apply_budget ---------------------------------------------------------

    #[test]
    fn daily_save_zeroes_lifetime() {
        let (mut daily, mut lifetime) = (0.0, 99.0);
        apply_budget(&mut daily, &mut lifetime, BudgetType::Daily, 25.5);
        assert_eq!(daily, 25.5);
        assert_eq!(lifetime, 0.0);
    }

    #[test]
    fn lifetime_save_zeroes_daily() {
        let (mut daily, mut lifetime) = (12.0, 0.0);
        apply_budget(&mut daily, &mut lifetime, BudgetType::Lifetime, 300.0);
        assert_eq!(daily, 0.0);
        assert_eq!(lifetime, 300.0);
    }

    // -- Editor state machine -------------------------------------------------

    #[test]
    fn begin_prefers_daily_seed() {
        let mut editor = BudgetEditor::Idle;
        editor.begin("c1".into(), 12.5, 100.0);
        assert_eq!(
            editor,
            BudgetEditor::Editing {
                entity_id: "c1".into(),
                budget_type: BudgetType::Daily,
                input: "12.5".into(),
                error: None,
            }
        );
    }

    #[test]
    fn begin_falls_back_to_lifetime_seed() {
        let mut editor = BudgetEditor::Idle;
        editor.begin("c1".into(), 0.0, 100.0);
        match editor {
            BudgetEditor::Editing { budget_type, input, .. } => {
                assert_eq!(budget_type, BudgetType::Lifetime);
                assert_eq!(input, "100");
            }
            other => panic!("expected Editing, got {other:?}"),
        }
    }

    #[test]
    fn inherited_budget_seeds_empty_input() {
        let mut editor = BudgetEditor::Idle;
        editor.begin("c1".into(), 0.0, 0.0);
        match editor {
            BudgetEditor::Editing { input, .. } => assert!(input.is_empty()),
            other => panic!("expected Editing, got {other:?}"),
        }
    }

    #[test]
    fn valid_submit_enters_saving() {
        let mut editor = BudgetEditor::Idle;
        editor.begin("c1".into(), 0.0, 0.0);
        editor.set_input("25.50");
        let (id, bt, amount) = editor.submit().unwrap();
        assert_eq!(id, "c1");
        assert_eq!(bt, BudgetType::Daily);
        assert_eq!(amount, 25.5);
        assert!(matches!(editor, BudgetEditor::Saving { .. }));
    }

    #[test]
    fn invalid_submit_stays_editing_with_error() {
        let mut editor = BudgetEditor::Idle;
        editor.begin("c1".into(), 0.0, 0.0);
        editor.set_input("-1");
        assert!(editor.submit().is_err());
        match &editor {
            BudgetEditor::Editing { error, .. } => assert!(error.is_some()),
            other => panic!("expected Editing, got {other:?}"),
        }
    }

    #[test]
    fn submit_from_idle_is_rejected() {
        let mut editor = BudgetEditor::Idle;
        assert!(editor.submit().is_err());
        assert_eq!(editor, BudgetEditor::Idle);
    }

    #[test]
    fn successful_save_returns_to_idle() {
        let mut editor = BudgetEditor::Idle;
        editor.begin("c1".into(), 5.0, 0.0);
        editor.submit().unwrap();
        editor.complete(Ok(()));
        assert_eq!(editor, BudgetEditor::Idle);
    }

    #[test]
    fn failed_save_restores_editing_with_error() {
        let mut editor = BudgetEditor::Idle;
        editor.begin("c1".into(), 5.0, 0.0);
        editor.submit().unwrap();
        editor.complete(Err("upstream rejected".into()));
        match editor {
            BudgetEditor::Editing { input, error, .. } => {
                assert_eq!(input, "5");
                assert_eq!(error.as_deref(), Some("upstream rejected"));
            }
            other => panic!("expected Editing, got {other:?}"),
        }
    }

    #[test]
    fn set_input_clears_previous_error() {
        let mut editor = BudgetEditor::Idle;
        editor.begin("c1".into(), 0.0, 0.0);
        editor.set_input("bad");
        let _ = editor.submit();
        editor.set_input("10");
        match &editor {
            BudgetEditor::Editing { error, .. } => assert!(error.is_none()),
            other => panic!("expected Editing, got {other:?}"),
        }
    }
}
