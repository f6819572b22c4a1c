//! Asabah (residuary) distribution.
//!
//! Whatever fraction the fixed shares leave over goes to the agnatic
//! residuaries, split proportionally by weight times head count. Hajb has
//! already removed farther agnates whenever a nearer one is present, so the
//! pool needs no additional priority skipping.

use std::collections::BTreeMap;

use faraidh_types::{HeirCategory, HeirCounts};
use HeirCategory::*;

/// Residuary-eligible categories in agnatic priority order.
pub(crate) const ASABAH_PRIORITY: [HeirCategory; 14] = [
    Son,
    GrandsonFromSon,
    Father,
    PaternalGrandfather,
    FullBrother,
    PaternalBrother,
    FullNephew,
    PaternalNephew,
    FullPaternalUncle,
    PaternalUncle,
    FullPaternalCousin,
    PaternalCousin,
    MaleEmancipator,
    FemaleEmancipator,
];

/// Build the residue pool for the eligible heir set.
///
/// Weights: a son counts double and pulls daughters in at weight one;
/// everyone else weighs one. The father and the paternal grandfather join
/// only when no son or grandson holds them to a fixed sixth instead.
pub(crate) fn residuary_weights(eligible: &HeirCounts) -> BTreeMap<HeirCategory, u32> {
    let male_line = eligible.is_present(Son) || eligible.is_present(GrandsonFromSon);
    let mut weights = BTreeMap::new();

    for cat in ASABAH_PRIORITY {
        if !eligible.is_present(cat) {
            continue;
        }
        match cat {
            Son => {
                weights.insert(Son, 2);
            }
            Father | PaternalGrandfather if male_line => {}
            _ => {
                weights.insert(cat, 1);
            }
        }
    }

    if eligible.is_present(Son) && eligible.is_present(Daughter) {
        weights.insert(Daughter, 1);
    }

    weights
}

/// Split `remainder` across the pool: share_c = (w_c * n_c / sum(w*n)) * remainder.
pub(crate) fn distribute_residue(
    remainder: f64,
    weights: &BTreeMap<HeirCategory, u32>,
    eligible: &HeirCounts,
) -> Vec<(HeirCategory, f64)> {
    let total_ratio: f64 = weights
        .iter()
        .map(|(&cat, &w)| f64::from(w * eligible.count(cat)))
        .sum();
    if total_ratio <= 0.0 {
        return Vec::new();
    }

    weights
        .iter()
        .map(|(&cat, &w)| {
            let ratio = f64::from(w * eligible.count(cat)) / total_ratio;
            (cat, ratio * remainder)
        })
        .collect()
}
