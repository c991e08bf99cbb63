use chrono::NaiveDate;

use crate::core::errors::CampusError;
use crate::core::services::InstalmentReconciler;
use crate::domain::fee::{FeeComponent, FeesStructure, Instalment};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn two_way_split(first: i64, second: i64) -> Vec<Instalment> {
    let mut instalments = InstalmentReconciler::toggle_instalments(true, 2).unwrap();
    instalments[0].base_amount = first;
    instalments[1].base_amount = second;
    instalments
}

#[test]
fn totals_sum_each_side_independently() {
    let components = vec![
        FeeComponent::new("Tuition", 4500),
        FeeComponent::new("Library", 1500),
    ];
    let instalments = two_way_split(3000, 3000);
    assert_eq!(InstalmentReconciler::total_base_amount(&components), 6000);
    assert_eq!(
        InstalmentReconciler::total_instalment_amount(&instalments),
        6000
    );
}

#[test]
fn matching_totals_reconcile() {
    let components = vec![FeeComponent::new("Tuition", 6000)];
    let instalments = two_way_split(3000, 3000);
    assert!(InstalmentReconciler::is_reconciled(
        &components,
        &instalments,
        true
    ));
    assert!(InstalmentReconciler::reconciliation(&components, &instalments).balanced());
}

#[test]
fn mismatched_totals_report_the_delta() {
    let components = vec![FeeComponent::new("Tuition", 6000)];
    let instalments = two_way_split(3000, 2500);
    let reconciliation = InstalmentReconciler::reconciliation(&components, &instalments);
    assert!(!reconciliation.balanced());
    assert_eq!(reconciliation.delta(), 500);
    assert!(!InstalmentReconciler::is_reconciled(
        &components,
        &instalments,
        true
    ));
}

#[test]
fn disabled_split_is_always_reconciled() {
    let components = vec![FeeComponent::new("Tuition", 6000)];
    assert!(InstalmentReconciler::is_reconciled(&components, &[], false));
}

#[test]
fn enabling_creates_fresh_numbered_instalments() {
    let instalments = InstalmentReconciler::toggle_instalments(true, 2).unwrap();
    assert_eq!(instalments.len(), 2);
    for (idx, instalment) in instalments.iter().enumerate() {
        assert_eq!(instalment.instalment_number, idx as u32 + 1);
        assert_eq!(instalment.base_amount, 0);
        assert!(instalment.start_date.is_none());
        assert!(instalment.end_date.is_none());
        assert!(instalment.online_start_date.is_none());
        assert!(instalment.online_end_date.is_none());
    }
}

#[test]
fn enabling_supports_more_than_two_instalments() {
    let instalments = InstalmentReconciler::toggle_instalments(true, 4).unwrap();
    let numbers: Vec<u32> = instalments.iter().map(|i| i.instalment_number).collect();
    assert_eq!(numbers, [1, 2, 3, 4]);
}

#[test]
fn enabling_rejects_a_zero_count() {
    assert!(matches!(
        InstalmentReconciler::toggle_instalments(true, 0),
        Err(CampusError::InvalidInput(_))
    ));
}

#[test]
fn disabling_discards_the_split() {
    assert!(InstalmentReconciler::toggle_instalments(false, 2)
        .unwrap()
        .is_empty());
}

#[test]
fn set_instalment_amount_sanitizes_raw_input() {
    let instalments = two_way_split(0, 0);
    let updated = InstalmentReconciler::set_instalment_amount(instalments, 0, "00500").unwrap();
    assert_eq!(updated[0].base_amount, 500);
    let updated = InstalmentReconciler::set_instalment_amount(updated, 0, "").unwrap();
    assert_eq!(updated[0].base_amount, 0);
}

#[test]
fn set_instalment_amount_leaves_siblings_unclamped() {
    let instalments = two_way_split(3000, 3000);
    let updated = InstalmentReconciler::set_instalment_amount(instalments, 1, "9000").unwrap();
    assert_eq!(updated[0].base_amount, 3000);
    assert_eq!(updated[1].base_amount, 9000);
}

#[test]
fn set_instalment_amount_rejects_an_out_of_range_index() {
    let instalments = two_way_split(0, 0);
    assert!(matches!(
        InstalmentReconciler::set_instalment_amount(instalments, 2, "10"),
        Err(CampusError::InvalidInput(_))
    ));
}

#[test]
fn sanitize_amount_filters_digits_and_leading_zeros() {
    assert_eq!(InstalmentReconciler::sanitize_amount("00500"), 500);
    assert_eq!(InstalmentReconciler::sanitize_amount(""), 0);
    assert_eq!(InstalmentReconciler::sanitize_amount("0"), 0);
    assert_eq!(InstalmentReconciler::sanitize_amount("12a3-4"), 1234);
    assert_eq!(InstalmentReconciler::sanitize_amount("abc"), 0);
    assert_eq!(
        InstalmentReconciler::sanitize_amount("99999999999999999999999"),
        i64::MAX
    );
}

fn balanced_structure() -> FeesStructure {
    let mut structure = FeesStructure::new("BA Semester 1");
    structure.add_component(FeeComponent::new("Tuition", 6000));
    structure.number_of_instalments = 2;
    structure.instalments = two_way_split(3000, 3000);
    structure
}

#[test]
fn save_gate_accepts_a_balanced_structure() {
    let structure = balanced_structure();
    assert!(InstalmentReconciler::validate_for_persistence(&structure).is_ok());
}

#[test]
fn save_gate_rejects_an_unbalanced_structure_with_the_delta() {
    let mut structure = balanced_structure();
    structure.instalments[1].base_amount = 2500;
    match InstalmentReconciler::validate_for_persistence(&structure) {
        Err(CampusError::Unreconciled { delta }) => assert_eq!(delta, 500),
        other => panic!("expected Unreconciled, got {other:?}"),
    }
}

#[test]
fn save_gate_rejects_a_count_mismatch() {
    let mut structure = balanced_structure();
    structure.instalments.pop();
    assert!(matches!(
        InstalmentReconciler::validate_for_persistence(&structure),
        Err(CampusError::InvalidInput(_))
    ));
}

#[test]
fn save_gate_rejects_instalments_while_disabled() {
    let mut structure = balanced_structure();
    structure.number_of_instalments = 1;
    assert!(matches!(
        InstalmentReconciler::validate_for_persistence(&structure),
        Err(CampusError::InvalidInput(_))
    ));
}

#[test]
fn save_gate_rejects_a_reversed_collection_window() {
    let mut structure = balanced_structure();
    structure.instalments[0].start_date = Some(date(2025, 8, 1));
    structure.instalments[0].end_date = Some(date(2025, 7, 1));
    assert!(matches!(
        InstalmentReconciler::validate_for_persistence(&structure),
        Err(CampusError::InvalidInput(_))
    ));
}

#[test]
fn save_gate_allows_a_single_day_window() {
    let mut structure = balanced_structure();
    structure.instalments[0].online_start_date = Some(date(2025, 8, 1));
    structure.instalments[0].online_end_date = Some(date(2025, 8, 1));
    assert!(InstalmentReconciler::validate_for_persistence(&structure).is_ok());
}

#[test]
fn save_gate_rejects_negative_amounts() {
    let mut structure = balanced_structure();
    structure.components[0].base_amount = -1;
    assert!(matches!(
        InstalmentReconciler::validate_for_persistence(&structure),
        Err(CampusError::InvalidInput(_))
    ));

    let mut structure = balanced_structure();
    structure.instalments[0].base_amount = -3000;
    assert!(matches!(
        InstalmentReconciler::validate_for_persistence(&structure),
        Err(CampusError::InvalidInput(_))
    ));
}

#[test]
fn save_gate_rejects_misnumbered_instalments() {
    let mut structure = balanced_structure();
    structure.instalments[1].instalment_number = 5;
    assert!(matches!(
        InstalmentReconciler::validate_for_persistence(&structure),
        Err(CampusError::InvalidInput(_))
    ));
}
