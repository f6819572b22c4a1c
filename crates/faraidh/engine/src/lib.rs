//! Faraidh Engine - Islamic inheritance share distribution
//!
//! A pure rule engine: given a netted estate value and the head count of
//! each heir category, it resolves Hajb exclusions, assigns the statutory
//! Furudh fractions, hands the remainder to the Asabah residuaries, and
//! assembles per-category currency amounts with diagnostics.
//!
//! The stages run in a fixed sequence (netting, exclusion, fixed shares,
//! residue, assembly) because each consumes aggregate facts from the
//! previous one. There is no state across calls: identical inputs always
//! produce identical results.
//!
//! Known, deliberate gaps carried over from the rule set this engine
//! implements: no true Aul (over-subscription is normalized naively), no
//! Radd (unclaimed remainder stays undistributed and only surfaces as a
//! rounding warning), and no sisters-as-co-residuaries with daughters.

#![deny(unsafe_code)]

mod asabah;
mod furudh;
mod hajb;
mod netting;

use std::collections::BTreeMap;
use std::sync::OnceLock;

use faraidh_types::{
    Beneficiary, CalcError, CalcWarning, CalculationResult, DistributionLine, HeirCategory,
    HeirCounts, KinshipGroup, ShareReason,
};
use tracing::debug;

pub use hajb::blocked_heirs;
pub use netting::net_estate;

/// One entry of the static heir catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeirEntry {
    pub id: HeirCategory,
    pub group: KinshipGroup,
}

/// The ordered heir catalog, built once.
pub fn heir_list() -> &'static [HeirEntry] {
    static CATALOG: OnceLock<Vec<HeirEntry>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        HeirCategory::ALL
            .iter()
            .map(|&id| HeirEntry {
                id,
                group: id.group(),
            })
            .collect()
    })
}

/// Absolute tolerance, in currency units, before a rounding warning fires.
const ROUNDING_TOLERANCE: f64 = 1.0;

fn spouse_violation(heirs: &HeirCounts) -> Option<CalcError> {
    if heirs.is_present(HeirCategory::Husband) && heirs.is_present(HeirCategory::Wife) {
        return Some(CalcError::InvalidSpouseCombination);
    }
    if heirs.count(HeirCategory::Husband) > 1 {
        return Some(CalcError::TooManyHusbands);
    }
    if heirs.count(HeirCategory::Wife) > 4 {
        return Some(CalcError::TooManyWives);
    }
    None
}

#[derive(Clone, Copy, Debug)]
struct ResolvedShare {
    share: f64,
    text: &'static str,
    reason: ShareReason,
}

/// Compute the distribution of a netted estate across a set of heirs.
///
/// Structural input errors (spouse cardinality, nobody eligible) come back
/// as a result with an empty distribution and a populated error list; they
/// are never panics. Warnings never suppress the distribution.
pub fn calculate(net_estate: f64, heirs: &HeirCounts) -> CalculationResult {
    let mut result = CalculationResult::default();

    if let Some(error) = spouse_violation(heirs) {
        result.errors.push(error);
        return result;
    }

    let blocked = hajb::blocked_heirs(heirs);
    result.blocked = blocked.iter().copied().collect();
    let eligible = heirs.without(&blocked);
    debug!(blocked = result.blocked.len(), "hajb resolved");

    if eligible.is_empty() {
        result.errors.push(CalcError::NoValidHeirs);
        return result;
    }

    let facts = furudh::Facts::derive(&eligible);
    let fixed = furudh::assign_fixed_shares(&eligible, &facts);

    // Resolve entitlements into concrete fractions of the whole estate.
    let mut shares: BTreeMap<Beneficiary, ResolvedShare> = BTreeMap::new();
    let mut mother_awaits_remainder = false;
    for (beneficiary, entitlement) in &fixed {
        match *entitlement {
            furudh::FixedShare::Fraction { share, text } => {
                shares.insert(
                    *beneficiary,
                    ResolvedShare {
                        share,
                        text,
                        reason: ShareReason::Furudh,
                    },
                );
            }
            furudh::FixedShare::ThirdOfRemainder => mother_awaits_remainder = true,
        }
    }

    // Umariyyatayn: the mother takes a third of what the spouse leaves.
    if mother_awaits_remainder {
        let spouse_share = shares
            .get(&Beneficiary::Heir(HeirCategory::Husband))
            .or_else(|| shares.get(&Beneficiary::Heir(HeirCategory::Wife)))
            .map(|s| s.share)
            .unwrap_or(0.0);
        shares.insert(
            Beneficiary::Heir(HeirCategory::Mother),
            ResolvedShare {
                share: (1.0 - spouse_share) / 3.0,
                text: "1/3",
                reason: ShareReason::Furudh,
            },
        );
    }

    let mut total_share: f64 = shares.values().map(|s| s.share).sum();
    let remainder = 1.0 - total_share;
    debug!(total_share, remainder, "fixed shares assigned");

    let weights = asabah::residuary_weights(&eligible);
    if remainder > 0.0 && !weights.is_empty() {
        for (cat, residue) in asabah::distribute_residue(remainder, &weights, &eligible) {
            shares
                .entry(Beneficiary::Heir(cat))
                .and_modify(|existing| {
                    // Only the father combines a fixed sixth with residue.
                    existing.share += residue;
                    existing.text = "1/6 + residuary";
                    existing.reason = ShareReason::Asabah;
                })
                .or_insert(ResolvedShare {
                    share: residue,
                    text: "residuary",
                    reason: ShareReason::Asabah,
                });
        }
        total_share = 1.0;
    }

    // No Aul: over-subscribed estates are squeezed by a naive divisor
    // rather than a true proportional reduction.
    let divisor = total_share.max(1.0);

    let mut total_distributed = 0.0;
    for (beneficiary, resolved) in &shares {
        let count = match beneficiary {
            Beneficiary::MaternalSiblings => {
                eligible.count(HeirCategory::MaternalBrother)
                    + eligible.count(HeirCategory::MaternalSister)
            }
            Beneficiary::Heir(cat) => eligible.count(*cat),
        };
        let amount = resolved.share * net_estate / divisor;
        total_distributed += amount;
        result.distribution.push(DistributionLine {
            beneficiary: *beneficiary,
            count,
            share_text: resolved.text.to_string(),
            reason: resolved.reason,
            amount,
        });
    }

    // No Radd: with no residuary present the leftover stays undistributed
    // and is only reported here.
    let leftover = net_estate - total_distributed;
    if leftover.abs() > ROUNDING_TOLERANCE {
        result.warnings.push(CalcWarning::Rounding { residual: leftover });
    }
    debug!(
        lines = result.distribution.len(),
        total_distributed, leftover, "distribution assembled"
    );

    result
}

/// Net the estate and run the full distribution in one call.
///
/// Netting failures come back as a result with a populated error list and
/// no distribution; netting warnings are prepended to the engine's own.
pub fn settle(inputs: &faraidh_types::EstateInputs, heirs: &HeirCounts) -> CalculationResult {
    match netting::net_estate(inputs) {
        Ok(netted) => {
            let mut result = calculate(netted.net, heirs);
            let mut warnings = netted.warnings;
            warnings.append(&mut result.warnings);
            result.warnings = warnings;
            result
        }
        Err(error) => CalculationResult {
            errors: vec![error],
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heir_list_is_complete_and_ordered() {
        let list = heir_list();
        assert_eq!(list.len(), HeirCategory::ALL.len());
        assert_eq!(list[0].id, HeirCategory::Husband);
        assert_eq!(list[0].group, KinshipGroup::Spouse);
        assert_eq!(
            list.last().unwrap().group,
            KinshipGroup::Emancipator
        );
    }

    #[test]
    fn spouse_checks_fire_before_anything_else() {
        let both: HeirCounts = [(HeirCategory::Husband, 1), (HeirCategory::Wife, 1)]
            .into_iter()
            .collect();
        let result = calculate(1_000.0, &both);
        assert_eq!(result.errors, vec![CalcError::InvalidSpouseCombination]);
        assert!(result.distribution.is_empty());
        assert!(result.blocked.is_empty());
    }
}
