//! Instalment split validation and editing helpers for fee structures.

use crate::core::errors::{CampusError, Result};
use crate::domain::fee::{FeeComponent, FeesStructure, Instalment};

/// Outcome of comparing component and instalment totals.
///
/// Advisory state rather than an error: the editor keeps rendering its
/// red/green indicator while the user is mid-edit, and only the save path
/// hard-fails on an unbalanced split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
    pub component_total: i64,
    pub instalment_total: i64,
}

impl Reconciliation {
    pub fn balanced(&self) -> bool {
        self.delta() == 0
    }

    /// Positive when the components exceed the instalments.
    pub fn delta(&self) -> i64 {
        self.component_total - self.instalment_total
    }
}

/// Stateless helpers that operate over fee-structure snapshots.
pub struct InstalmentReconciler;

impl InstalmentReconciler {
    /// Total payable configured by the fee components.
    pub fn total_base_amount(components: &[FeeComponent]) -> i64 {
        components.iter().map(|c| c.base_amount).sum()
    }

    /// Total currently spread across the instalments.
    pub fn total_instalment_amount(instalments: &[Instalment]) -> i64 {
        instalments.iter().map(|i| i.base_amount).sum()
    }

    /// Compares the two totals for the caller's save-gating and indicators.
    pub fn reconciliation(
        components: &[FeeComponent],
        instalments: &[Instalment],
    ) -> Reconciliation {
        Reconciliation {
            component_total: Self::total_base_amount(components),
            instalment_total: Self::total_instalment_amount(instalments),
        }
    }

    /// A structure with the split disabled is always reconciled.
    pub fn is_reconciled(
        components: &[FeeComponent],
        instalments: &[Instalment],
        instalments_enabled: bool,
    ) -> bool {
        !instalments_enabled || Self::reconciliation(components, instalments).balanced()
    }

    /// Enables or disables the instalment split.
    ///
    /// Enabling returns `count` fresh zero-amount instalments numbered
    /// 1..=count with no windows set; disabling returns an empty list and the
    /// caller resets `number_of_instalments` to 1. Amounts and dates are not
    /// preserved across a disable/enable cycle.
    pub fn toggle_instalments(enable: bool, count: u32) -> Result<Vec<Instalment>> {
        if !enable {
            return Ok(Vec::new());
        }
        if count < 1 {
            return Err(CampusError::InvalidInput(
                "instalment count must be at least 1".into(),
            ));
        }
        Ok((1..=count).map(Instalment::empty).collect())
    }

    /// Replaces one instalment's amount with the sanitized `raw` value.
    ///
    /// Sibling amounts are deliberately not clamped; an unbalanced total is
    /// surfaced through [`Self::reconciliation`] so the editor warns without
    /// blocking keystrokes.
    pub fn set_instalment_amount(
        mut instalments: Vec<Instalment>,
        index: usize,
        raw: &str,
    ) -> Result<Vec<Instalment>> {
        let Some(slot) = instalments.get_mut(index) else {
            return Err(CampusError::InvalidInput(format!(
                "no instalment at index {index}"
            )));
        };
        slot.base_amount = Self::sanitize_amount(raw);
        Ok(instalments)
    }

    /// Strips non-digits, collapses leading zeros, and treats empty input as
    /// zero. Input wider than an `i64` saturates at `i64::MAX`.
    pub fn sanitize_amount(raw: &str) -> i64 {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            return 0;
        }
        trimmed.parse().unwrap_or(i64::MAX)
    }

    /// The save gate: every invariant that must hold before persistence.
    ///
    /// Checks amounts are non-negative, instalments are numbered 1..=N and
    /// match `number_of_instalments` when the split is enabled, every window
    /// is ordered, and the totals reconcile. Violations are rejected, never
    /// silently corrected.
    pub fn validate_for_persistence(structure: &FeesStructure) -> Result<()> {
        for component in &structure.components {
            if component.base_amount < 0 {
                return Err(CampusError::InvalidInput(format!(
                    "component {:?} has a negative amount",
                    component.name
                )));
            }
        }
        if structure.instalments_enabled() {
            if structure.instalments.len() != structure.number_of_instalments as usize {
                return Err(CampusError::InvalidInput(format!(
                    "expected {} instalments, found {}",
                    structure.number_of_instalments,
                    structure.instalments.len()
                )));
            }
        } else if !structure.instalments.is_empty() {
            return Err(CampusError::InvalidInput(
                "instalments present while the split is disabled".into(),
            ));
        }
        for (idx, instalment) in structure.instalments.iter().enumerate() {
            if instalment.instalment_number != idx as u32 + 1 {
                return Err(CampusError::InvalidInput(format!(
                    "instalment at position {} is numbered {}",
                    idx + 1,
                    instalment.instalment_number
                )));
            }
            if instalment.base_amount < 0 {
                return Err(CampusError::InvalidInput(format!(
                    "instalment {} has a negative amount",
                    instalment.instalment_number
                )));
            }
            instalment.validate()?;
        }
        if structure.instalments_enabled() {
            let reconciliation =
                Self::reconciliation(&structure.components, &structure.instalments);
            if !reconciliation.balanced() {
                return Err(CampusError::Unreconciled {
                    delta: reconciliation.delta(),
                });
            }
        }
        Ok(())
    }
}
