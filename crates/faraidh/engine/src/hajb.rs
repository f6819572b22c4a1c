//! Hajb (exclusion) resolution.
//!
//! A closer relative bars more distant ones from inheriting. The bulk of the
//! rules are a static blocker -> blocked table; a handful depend on
//! combinations and are applied after the table. Resolution is total: it
//! never fails, and an empty result simply means nobody is excluded.

use std::collections::BTreeSet;

use faraidh_types::{HeirCategory, HeirCounts};
use HeirCategory::*;

/// Static exclusion table: which categories a present blocker removes.
fn blocks(blocker: HeirCategory) -> &'static [HeirCategory] {
    match blocker {
        Son => &[
            GrandsonFromSon,
            GranddaughterFromSon,
            FullBrother,
            FullSister,
            PaternalBrother,
            PaternalSister,
            MaternalBrother,
            MaternalSister,
            FullNephew,
            PaternalNephew,
            FullPaternalUncle,
            PaternalUncle,
            FullPaternalCousin,
            PaternalCousin,
        ],
        Father => &[
            PaternalGrandfather,
            FullBrother,
            FullSister,
            PaternalBrother,
            PaternalSister,
            MaternalBrother,
            MaternalSister,
            FullNephew,
            PaternalNephew,
            FullPaternalUncle,
            PaternalUncle,
            FullPaternalCousin,
            PaternalCousin,
        ],
        PaternalGrandfather => &[
            FullPaternalUncle,
            PaternalUncle,
            FullPaternalCousin,
            PaternalCousin,
        ],
        GrandsonFromSon => &[
            FullNephew,
            PaternalNephew,
            FullPaternalUncle,
            PaternalUncle,
            FullPaternalCousin,
            PaternalCousin,
        ],
        FullBrother => &[
            PaternalBrother,
            PaternalSister,
            FullNephew,
            PaternalNephew,
            FullPaternalUncle,
            PaternalUncle,
            FullPaternalCousin,
            PaternalCousin,
        ],
        PaternalBrother => &[
            PaternalNephew,
            FullPaternalUncle,
            PaternalUncle,
            FullPaternalCousin,
            PaternalCousin,
        ],
        FullNephew => &[
            PaternalNephew,
            FullPaternalUncle,
            PaternalUncle,
            FullPaternalCousin,
            PaternalCousin,
        ],
        PaternalNephew => &[
            FullPaternalUncle,
            PaternalUncle,
            FullPaternalCousin,
            PaternalCousin,
        ],
        FullPaternalUncle => &[PaternalUncle, FullPaternalCousin, PaternalCousin],
        PaternalUncle => &[FullPaternalCousin, PaternalCousin],
        _ => &[],
    }
}

/// Resolve the full exclusion set for a raw heir input.
///
/// Categories are judged by raw presence, not post-exclusion presence, so a
/// blocker that is itself excluded still fires its own rules. The returned
/// set may name categories that were not present in the input at all.
pub fn blocked_heirs(heirs: &HeirCounts) -> BTreeSet<HeirCategory> {
    let mut blocked = BTreeSet::new();

    for (blocker, _) in heirs.present() {
        blocked.extend(blocks(blocker).iter().copied());
    }

    // Conditional rules, in fixed order.
    if heirs.is_present(Father) {
        blocked.insert(PaternalGrandfather);
    }
    if heirs.is_present(Mother) {
        blocked.insert(PaternalGrandmother);
        blocked.insert(MaternalGrandmother);
    }
    if heirs.is_present(PaternalGrandfather) {
        blocked.insert(PaternalGrandmother);
    }
    if heirs.count(Daughter) >= 2 && !heirs.is_present(Son) {
        blocked.insert(GranddaughterFromSon);
    }

    blocked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(entries: &[(HeirCategory, u32)]) -> HeirCounts {
        entries.iter().copied().collect()
    }

    #[test]
    fn father_blocks_paternal_grandfather_and_collaterals() {
        let blocked = blocked_heirs(&counts(&[(Father, 1)]));
        assert!(blocked.contains(&PaternalGrandfather));
        assert!(blocked.contains(&FullBrother));
        assert!(!blocked.contains(&Husband));
        assert!(!blocked.contains(&Mother));
    }

    #[test]
    fn son_blocks_all_collaterals_and_grandchildren() {
        let blocked = blocked_heirs(&counts(&[(Son, 1)]));
        for cat in [
            GrandsonFromSon,
            GranddaughterFromSon,
            FullBrother,
            FullSister,
            PaternalBrother,
            PaternalSister,
            MaternalBrother,
            MaternalSister,
            FullNephew,
            PaternalNephew,
            FullPaternalUncle,
            PaternalUncle,
            FullPaternalCousin,
            PaternalCousin,
        ] {
            assert!(blocked.contains(&cat), "son should block {cat}");
        }
        assert!(!blocked.contains(&Daughter));
        assert!(!blocked.contains(&Father));
    }

    #[test]
    fn mother_blocks_both_grandmothers() {
        let blocked = blocked_heirs(&counts(&[(Mother, 1)]));
        assert!(blocked.contains(&PaternalGrandmother));
        assert!(blocked.contains(&MaternalGrandmother));
        assert!(!blocked.contains(&PaternalGrandfather));
    }

    #[test]
    fn paternal_grandfather_blocks_only_paternal_grandmother() {
        let blocked = blocked_heirs(&counts(&[(PaternalGrandfather, 1)]));
        assert!(blocked.contains(&PaternalGrandmother));
        assert!(!blocked.contains(&MaternalGrandmother));
    }

    #[test]
    fn two_daughters_without_son_block_granddaughter() {
        let blocked = blocked_heirs(&counts(&[(Daughter, 2)]));
        assert!(blocked.contains(&GranddaughterFromSon));

        let one_daughter = blocked_heirs(&counts(&[(Daughter, 1)]));
        assert!(!one_daughter.contains(&GranddaughterFromSon));

        let with_son = blocked_heirs(&counts(&[(Daughter, 2), (Son, 1)]));
        // The son blocks her through the static table either way, but the
        // conditional daughter rule itself must not fire.
        assert!(with_son.contains(&GranddaughterFromSon));
    }

    #[test]
    fn no_heirs_means_no_exclusions() {
        assert!(blocked_heirs(&HeirCounts::new()).is_empty());
    }

    #[test]
    fn blocked_blocker_still_fires_its_rules() {
        // Father excludes the grandfather, but the grandfather's own rule
        // against the paternal grandmother still applies.
        let blocked = blocked_heirs(&counts(&[(Father, 1), (PaternalGrandfather, 1)]));
        assert!(blocked.contains(&PaternalGrandfather));
        assert!(blocked.contains(&PaternalGrandmother));
    }
}
