//! Furudh (fixed-share) assignment.
//!
//! Statutory fractions per eligible heir category. All conditions are
//! evaluated against the post-exclusion heir set, so a blocked category
//! never influences anyone's fraction.

use std::collections::BTreeMap;

use faraidh_types::{Beneficiary, HeirCategory, HeirCounts};
use HeirCategory::*;

/// Derived facts the share rules branch on.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Facts {
    /// Any child or child-of-son is present.
    pub has_descendant: bool,
    /// Two or more siblings of any kind, counted together.
    pub has_multiple_siblings: bool,
    /// Exactly one spouse, father, and mother survive and nobody else.
    pub is_umariyyatayn: bool,
}

impl Facts {
    pub fn derive(eligible: &HeirCounts) -> Self {
        let has_descendant = eligible.is_present(Son)
            || eligible.is_present(Daughter)
            || eligible.is_present(GrandsonFromSon)
            || eligible.is_present(GranddaughterFromSon);

        let sibling_count = eligible.count(FullBrother)
            + eligible.count(FullSister)
            + eligible.count(PaternalBrother)
            + eligible.count(PaternalSister)
            + eligible.count(MaternalBrother)
            + eligible.count(MaternalSister);

        let has_spouse = eligible.is_present(Husband) || eligible.is_present(Wife);
        let is_umariyyatayn = has_spouse
            && eligible.is_present(Father)
            && eligible.is_present(Mother)
            && eligible.present().count() == 3;

        Facts {
            has_descendant,
            has_multiple_siblings: sibling_count >= 2,
            is_umariyyatayn,
        }
    }
}

/// A fixed-share entitlement before resolution against the estate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum FixedShare {
    Fraction { share: f64, text: &'static str },
    /// Umariyyatayn marker for the mother: one third of what remains after
    /// the spouse's share, resolved once that share is known.
    ThirdOfRemainder,
}

fn fraction(share: f64, text: &'static str) -> FixedShare {
    FixedShare::Fraction { share, text }
}

/// Assign statutory fractions to the eligible heirs.
pub(crate) fn assign_fixed_shares(
    eligible: &HeirCounts,
    facts: &Facts,
) -> BTreeMap<Beneficiary, FixedShare> {
    let mut shares = BTreeMap::new();

    if eligible.is_present(Husband) {
        let entry = if facts.has_descendant {
            fraction(1.0 / 4.0, "1/4")
        } else {
            fraction(1.0 / 2.0, "1/2")
        };
        shares.insert(Beneficiary::Heir(Husband), entry);
    }

    // The wives' fraction is a household share, identical for one wife or four.
    if eligible.is_present(Wife) {
        let entry = if facts.has_descendant {
            fraction(1.0 / 8.0, "1/8")
        } else {
            fraction(1.0 / 4.0, "1/4")
        };
        shares.insert(Beneficiary::Heir(Wife), entry);
    }

    if eligible.is_present(Mother) {
        let entry = if facts.is_umariyyatayn {
            FixedShare::ThirdOfRemainder
        } else if facts.has_descendant || facts.has_multiple_siblings {
            fraction(1.0 / 6.0, "1/6")
        } else {
            fraction(1.0 / 3.0, "1/3")
        };
        shares.insert(Beneficiary::Heir(Mother), entry);
    }

    // Father: 1/6 whenever a descendant exists; with only female descendants
    // he additionally takes residue (enrolment happens in the asabah stage).
    // With no descendants at all he is purely residuary.
    if eligible.is_present(Father) {
        let male_line = eligible.is_present(Son) || eligible.is_present(GrandsonFromSon);
        let female_line =
            eligible.is_present(Daughter) || eligible.is_present(GranddaughterFromSon);
        if male_line || female_line {
            shares.insert(Beneficiary::Heir(Father), fraction(1.0 / 6.0, "1/6"));
        }
    }

    // Paternal grandfather: 1/6 only against a male-line descendant,
    // otherwise purely residuary. He never holds the father's
    // fixed-plus-residue combination.
    if eligible.is_present(PaternalGrandfather)
        && (eligible.is_present(Son) || eligible.is_present(GrandsonFromSon))
    {
        shares.insert(
            Beneficiary::Heir(PaternalGrandfather),
            fraction(1.0 / 6.0, "1/6"),
        );
    }

    // Maternal siblings share one pooled fraction regardless of sex.
    let maternal_count = eligible.count(MaternalBrother) + eligible.count(MaternalSister);
    if maternal_count > 0 {
        let entry = if maternal_count == 1 {
            fraction(1.0 / 6.0, "1/6")
        } else {
            fraction(1.0 / 3.0, "1/3")
        };
        shares.insert(Beneficiary::MaternalSiblings, entry);
    }

    // Daughters hold a fixed share only when no son turns them residuary.
    if !eligible.is_present(Son) && eligible.is_present(Daughter) {
        let entry = if eligible.count(Daughter) == 1 {
            fraction(1.0 / 2.0, "1/2")
        } else {
            fraction(2.0 / 3.0, "2/3")
        };
        shares.insert(Beneficiary::Heir(Daughter), entry);
    }

    // Sisters becoming residuaries alongside daughters is a recognized rule
    // this engine deliberately does not cover.

    shares
}
