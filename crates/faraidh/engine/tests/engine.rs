//! End-to-end scenarios for the inheritance pipeline.

use faraidh_engine::{blocked_heirs, calculate, net_estate, settle};
use faraidh_types::{
    Beneficiary, CalcError, CalcWarning, CalculationResult, DistributionLine, EstateField,
    EstateInputs, HeirCategory, HeirCounts, ShareReason,
};
use HeirCategory::*;

fn counts(entries: &[(HeirCategory, u32)]) -> HeirCounts {
    entries.iter().copied().collect()
}

fn line<'a>(result: &'a CalculationResult, beneficiary: Beneficiary) -> &'a DistributionLine {
    result
        .distribution
        .iter()
        .find(|l| l.beneficiary == beneficiary)
        .unwrap_or_else(|| panic!("no line for {beneficiary}"))
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn husband_and_sole_daughter_leave_an_unclaimed_quarter() {
    let result = calculate(120_000_000.0, &counts(&[(Husband, 1), (Daughter, 1)]));
    assert!(result.errors.is_empty());

    // The daughter counts as a descendant, so the husband drops to 1/4.
    let husband = line(&result, Beneficiary::Heir(Husband));
    assert_eq!(husband.share_text, "1/4");
    assert_eq!(husband.reason, ShareReason::Furudh);
    assert_close(husband.amount, 30_000_000.0);

    let daughter = line(&result, Beneficiary::Heir(Daughter));
    assert_eq!(daughter.share_text, "1/2");
    assert_close(daughter.amount, 60_000_000.0);

    // No residuary heir exists, so the last quarter stays undistributed
    // (no Radd) and surfaces as a rounding warning.
    assert_eq!(result.distribution.len(), 2);
    match &result.warnings[..] {
        [CalcWarning::Rounding { residual }] => assert_close(*residual, 30_000_000.0),
        other => panic!("expected a rounding warning, got {other:?}"),
    }
}

#[test]
fn spouse_combination_is_a_structural_error() {
    let result = calculate(1_000_000.0, &counts(&[(Husband, 1), (Wife, 1)]));
    assert_eq!(result.errors, vec![CalcError::InvalidSpouseCombination]);
    assert!(result.distribution.is_empty());
}

#[test]
fn spouse_cardinality_is_enforced() {
    let result = calculate(1_000_000.0, &counts(&[(Wife, 5)]));
    assert_eq!(result.errors, vec![CalcError::TooManyWives]);
    assert!(result.distribution.is_empty());

    let result = calculate(1_000_000.0, &counts(&[(Husband, 2)]));
    assert_eq!(result.errors, vec![CalcError::TooManyHusbands]);
}

#[test]
fn no_heirs_at_all_is_an_error() {
    let result = calculate(1_000_000.0, &HeirCounts::new());
    assert_eq!(result.errors, vec![CalcError::NoValidHeirs]);
    assert!(result.distribution.is_empty());
}

#[test]
fn umariyyatayn_gives_mother_a_third_of_the_remainder() {
    let result = calculate(60_000.0, &counts(&[(Husband, 1), (Father, 1), (Mother, 1)]));
    assert!(result.errors.is_empty());

    assert_close(line(&result, Beneficiary::Heir(Husband)).amount, 30_000.0);

    let mother = line(&result, Beneficiary::Heir(Mother));
    assert_eq!(mother.share_text, "1/3");
    assert_close(mother.amount, 10_000.0);

    let father = line(&result, Beneficiary::Heir(Father));
    assert_eq!(father.reason, ShareReason::Asabah);
    assert_close(father.amount, 20_000.0);

    assert!(result.warnings.is_empty());
}

#[test]
fn son_and_daughter_split_the_residue_two_to_one() {
    let result = calculate(90_000.0, &counts(&[(Son, 1), (Daughter, 1)]));
    let son = line(&result, Beneficiary::Heir(Son));
    let daughter = line(&result, Beneficiary::Heir(Daughter));
    assert_eq!(son.share_text, "residuary");
    assert_eq!(son.reason, ShareReason::Asabah);
    assert_close(son.amount, 60_000.0);
    assert_close(daughter.amount, 30_000.0);
    assert!(result.warnings.is_empty());
}

#[test]
fn father_combines_his_sixth_with_the_residue() {
    let result = calculate(60_000.0, &counts(&[(Father, 1), (Daughter, 1)]));
    let daughter = line(&result, Beneficiary::Heir(Daughter));
    assert_close(daughter.amount, 30_000.0);

    // 1/6 fixed plus the 1/3 nobody else claims.
    let father = line(&result, Beneficiary::Heir(Father));
    assert_eq!(father.share_text, "1/6 + residuary");
    assert_close(father.amount, 30_000.0);
    assert!(result.warnings.is_empty());
}

#[test]
fn maternal_siblings_appear_as_one_pooled_line() {
    let heirs = counts(&[(Wife, 1), (MaternalBrother, 1), (MaternalSister, 1)]);
    let result = calculate(120_000.0, &heirs);

    let pooled = line(&result, Beneficiary::MaternalSiblings);
    assert_eq!(pooled.count, 2);
    assert_eq!(pooled.share_text, "1/3");
    assert_close(pooled.amount, 40_000.0);

    assert_close(line(&result, Beneficiary::Heir(Wife)).amount, 30_000.0);

    // 5/12 of the estate has no taker.
    match &result.warnings[..] {
        [CalcWarning::Rounding { residual }] => assert_close(*residual, 50_000.0),
        other => panic!("expected a rounding warning, got {other:?}"),
    }
}

#[test]
fn single_maternal_sibling_takes_a_sixth() {
    let result = calculate(60_000.0, &counts(&[(Wife, 1), (MaternalSister, 1)]));
    let pooled = line(&result, Beneficiary::MaternalSiblings);
    assert_eq!(pooled.count, 1);
    assert_eq!(pooled.share_text, "1/6");
    assert_close(pooled.amount, 10_000.0);
}

#[test]
fn oversubscribed_shares_are_normalized_naively() {
    // Husband 1/4, two daughters 2/3, mother 1/6: claims total 13/12.
    let heirs = counts(&[(Husband, 1), (Daughter, 2), (Mother, 1)]);
    let result = calculate(130_000.0, &heirs);

    assert_close(line(&result, Beneficiary::Heir(Husband)).amount, 30_000.0);
    let daughters = line(&result, Beneficiary::Heir(Daughter));
    assert_eq!(daughters.count, 2);
    assert_close(daughters.amount, 80_000.0);
    assert_close(line(&result, Beneficiary::Heir(Mother)).amount, 20_000.0);

    // The naive divisor lands the full estate, so no warning fires.
    assert_close(result.total_distributed(), 130_000.0);
    assert!(result.warnings.is_empty());
}

#[test]
fn a_full_brother_takes_the_residue_after_the_spouse() {
    let result = calculate(80_000.0, &counts(&[(Wife, 1), (FullBrother, 1)]));
    assert_close(line(&result, Beneficiary::Heir(Wife)).amount, 20_000.0);
    let brother = line(&result, Beneficiary::Heir(FullBrother));
    assert_eq!(brother.reason, ShareReason::Asabah);
    assert_close(brother.amount, 60_000.0);
    assert!(result.warnings.is_empty());
}

#[test]
fn a_sole_son_takes_everything() {
    let result = calculate(50_000.0, &counts(&[(Son, 1)]));
    assert_eq!(result.distribution.len(), 1);
    assert_close(line(&result, Beneficiary::Heir(Son)).amount, 50_000.0);
    assert!(result.warnings.is_empty());
}

#[test]
fn blocked_list_names_absent_categories_too() {
    let result = calculate(10_000.0, &counts(&[(Son, 1)]));
    assert!(result.blocked.contains(&FullBrother));
    assert!(result.blocked.contains(&GranddaughterFromSon));
    assert!(!result.blocked.contains(&Daughter));
}

#[test]
fn blocked_heirs_matches_the_result_blocked_list() {
    let heirs = counts(&[(Father, 1), (FullBrother, 2), (Wife, 1)]);
    let standalone = blocked_heirs(&heirs);
    let result = calculate(10_000.0, &heirs);
    let from_result: Vec<_> = result.blocked.clone();
    assert_eq!(standalone.into_iter().collect::<Vec<_>>(), from_result);
}

#[test]
fn identical_inputs_yield_identical_results() {
    let heirs = counts(&[(Wife, 2), (Son, 1), (Daughter, 3), (Mother, 1)]);
    let first = calculate(987_654.0, &heirs);
    let second = calculate(987_654.0, &heirs);
    assert_eq!(first, second);
}

#[test]
fn netting_matches_the_published_figures() {
    let inputs = EstateInputs {
        gross_estate: 100_000_000.0,
        bequest: 40_000_000.0,
        ..Default::default()
    };
    let netted = net_estate(&inputs).unwrap();
    assert_close(netted.applied_bequest, 33_333_333.333333332);
    assert_close(netted.net, 66_666_666.66666667);
    assert!(matches!(
        netted.warnings[..],
        [CalcWarning::BequestCapped { .. }]
    ));
}

#[test]
fn settle_runs_netting_and_distribution_together() {
    let inputs = EstateInputs {
        gross_estate: 100_000_000.0,
        bequest: 40_000_000.0,
        ..Default::default()
    };
    let result = settle(&inputs, &counts(&[(Son, 1)]));
    assert!(result.errors.is_empty());
    // The bequest warning from netting leads the warning list.
    assert!(matches!(
        result.warnings[0],
        CalcWarning::BequestCapped { .. }
    ));
    assert_close(
        line(&result, Beneficiary::Heir(Son)).amount,
        66_666_666.66666667,
    );
}

#[test]
fn settle_surfaces_netting_errors_without_distributing() {
    let inputs = EstateInputs {
        gross_estate: 1_000.0,
        asset_debt: -1.0,
        ..Default::default()
    };
    let result = settle(&inputs, &counts(&[(Son, 1)]));
    assert_eq!(
        result.errors,
        vec![CalcError::NegativeInput {
            field: EstateField::AssetDebt
        }]
    );
    assert!(result.distribution.is_empty());
}

#[test]
fn results_serialize_with_flat_heir_names() {
    let result = calculate(60_000.0, &counts(&[(Wife, 1), (MaternalSister, 1)]));
    let json = serde_json::to_value(&result).unwrap();
    let beneficiaries: Vec<_> = json["distribution"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["beneficiary"].as_str().unwrap().to_string())
        .collect();
    assert!(beneficiaries.contains(&"wife".to_string()));
    assert!(beneficiaries.contains(&"maternal_siblings".to_string()));
}
