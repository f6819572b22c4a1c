//! Faraidh Types - the shared vocabulary of the inheritance engine
//!
//! Everything here is plain data: the fixed heir catalog, per-calculation
//! heir counts, estate figures, and the result aggregate the engine returns.
//! No rule logic lives in this crate.

#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;
use thiserror::Error;

/// The kinship group a heir category belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KinshipGroup {
    Spouse,
    Descendants,
    Ascendants,
    Collaterals,
    Emancipator,
}

impl KinshipGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            KinshipGroup::Spouse => "spouse",
            KinshipGroup::Descendants => "descendants",
            KinshipGroup::Ascendants => "ascendants",
            KinshipGroup::Collaterals => "collaterals",
            KinshipGroup::Emancipator => "emancipator",
        }
    }
}

impl std::fmt::Display for KinshipGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the fixed kinship categories recognized by the engine.
///
/// The set is closed: it is domain knowledge, not derived data. Ordering
/// follows the canonical catalog order (spouses, then descendants through
/// the male line, ascendants, collaterals, emancipators).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HeirCategory {
    Husband,
    Wife,
    Son,
    Daughter,
    Father,
    Mother,
    GrandsonFromSon,
    GranddaughterFromSon,
    PaternalGrandfather,
    PaternalGrandmother,
    MaternalGrandmother,
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
    MaleEmancipator,
    FemaleEmancipator,
}

impl HeirCategory {
    /// Every category, in catalog order.
    pub const ALL: [HeirCategory; 25] = [
        HeirCategory::Husband,
        HeirCategory::Wife,
        HeirCategory::Son,
        HeirCategory::Daughter,
        HeirCategory::Father,
        HeirCategory::Mother,
        HeirCategory::GrandsonFromSon,
        HeirCategory::GranddaughterFromSon,
        HeirCategory::PaternalGrandfather,
        HeirCategory::PaternalGrandmother,
        HeirCategory::MaternalGrandmother,
        HeirCategory::FullBrother,
        HeirCategory::FullSister,
        HeirCategory::PaternalBrother,
        HeirCategory::PaternalSister,
        HeirCategory::MaternalBrother,
        HeirCategory::MaternalSister,
        HeirCategory::FullNephew,
        HeirCategory::PaternalNephew,
        HeirCategory::FullPaternalUncle,
        HeirCategory::PaternalUncle,
        HeirCategory::FullPaternalCousin,
        HeirCategory::PaternalCousin,
        HeirCategory::MaleEmancipator,
        HeirCategory::FemaleEmancipator,
    ];

    pub fn group(&self) -> KinshipGroup {
        match self {
            HeirCategory::Husband | HeirCategory::Wife => KinshipGroup::Spouse,
            HeirCategory::Son
            | HeirCategory::Daughter
            | HeirCategory::GrandsonFromSon
            | HeirCategory::GranddaughterFromSon => KinshipGroup::Descendants,
            HeirCategory::Father
            | HeirCategory::Mother
            | HeirCategory::PaternalGrandfather
            | HeirCategory::PaternalGrandmother
            | HeirCategory::MaternalGrandmother => KinshipGroup::Ascendants,
            HeirCategory::FullBrother
            | HeirCategory::FullSister
            | HeirCategory::PaternalBrother
            | HeirCategory::PaternalSister
            | HeirCategory::MaternalBrother
            | HeirCategory::MaternalSister
            | HeirCategory::FullNephew
            | HeirCategory::PaternalNephew
            | HeirCategory::FullPaternalUncle
            | HeirCategory::PaternalUncle
            | HeirCategory::FullPaternalCousin
            | HeirCategory::PaternalCousin => KinshipGroup::Collaterals,
            HeirCategory::MaleEmancipator | HeirCategory::FemaleEmancipator => {
                KinshipGroup::Emancipator
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HeirCategory::Husband => "husband",
            HeirCategory::Wife => "wife",
            HeirCategory::Son => "son",
            HeirCategory::Daughter => "daughter",
            HeirCategory::Father => "father",
            HeirCategory::Mother => "mother",
            HeirCategory::GrandsonFromSon => "grandson_from_son",
            HeirCategory::GranddaughterFromSon => "granddaughter_from_son",
            HeirCategory::PaternalGrandfather => "paternal_grandfather",
            HeirCategory::PaternalGrandmother => "paternal_grandmother",
            HeirCategory::MaternalGrandmother => "maternal_grandmother",
            HeirCategory::FullBrother => "full_brother",
            HeirCategory::FullSister => "full_sister",
            HeirCategory::PaternalBrother => "paternal_brother",
            HeirCategory::PaternalSister => "paternal_sister",
            HeirCategory::MaternalBrother => "maternal_brother",
            HeirCategory::MaternalSister => "maternal_sister",
            HeirCategory::FullNephew => "full_nephew",
            HeirCategory::PaternalNephew => "paternal_nephew",
            HeirCategory::FullPaternalUncle => "full_paternal_uncle",
            HeirCategory::PaternalUncle => "paternal_uncle",
            HeirCategory::FullPaternalCousin => "full_paternal_cousin",
            HeirCategory::PaternalCousin => "paternal_cousin",
            HeirCategory::MaleEmancipator => "male_emancipator",
            HeirCategory::FemaleEmancipator => "female_emancipator",
        }
    }
}

impl std::fmt::Display for HeirCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown heir category '{0}'")]
pub struct UnknownHeirCategory(pub String);

impl FromStr for HeirCategory {
    type Err = UnknownHeirCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeirCategory::ALL
            .iter()
            .find(|cat| cat.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownHeirCategory(s.to_string()))
    }
}

/// Per-calculation head counts, keyed by heir category.
///
/// Counts are unsigned, so the "non-negative integer" input invariant holds
/// by construction. A missing entry is a count of zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeirCounts(BTreeMap<HeirCategory, u32>);

impl HeirCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, heir: HeirCategory, count: u32) {
        if count == 0 {
            self.0.remove(&heir);
        } else {
            self.0.insert(heir, count);
        }
    }

    pub fn count(&self, heir: HeirCategory) -> u32 {
        self.0.get(&heir).copied().unwrap_or(0)
    }

    pub fn is_present(&self, heir: HeirCategory) -> bool {
        self.count(heir) > 0
    }

    /// Categories present with a nonzero count, in catalog order.
    pub fn present(&self) -> impl Iterator<Item = (HeirCategory, u32)> + '_ {
        self.0.iter().map(|(&heir, &count)| (heir, count))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A copy with every blocked category removed.
    pub fn without(&self, excluded: &BTreeSet<HeirCategory>) -> HeirCounts {
        HeirCounts(
            self.0
                .iter()
                .filter(|(heir, _)| !excluded.contains(heir))
                .map(|(&heir, &count)| (heir, count))
                .collect(),
        )
    }
}

impl FromIterator<(HeirCategory, u32)> for HeirCounts {
    fn from_iter<T: IntoIterator<Item = (HeirCategory, u32)>>(iter: T) -> Self {
        let mut counts = HeirCounts::new();
        for (heir, count) in iter {
            counts.set(heir, count);
        }
        counts
    }
}

/// Why a beneficiary receives a share.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShareReason {
    /// A statutory fixed fraction of the net estate.
    Furudh,
    /// A residuary share of whatever the fixed fractions leave over.
    Asabah,
}

impl std::fmt::Display for ShareReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShareReason::Furudh => f.write_str("Furudh"),
            ShareReason::Asabah => f.write_str("Asabah"),
        }
    }
}

/// The recipient of one distribution line.
///
/// Maternal siblings hold their fixed share jointly, so they appear as one
/// pooled line rather than two per-category lines. Modeling the pool as its
/// own variant keeps the assembler free of special cases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Beneficiary {
    MaternalSiblings,
    #[serde(untagged)]
    Heir(HeirCategory),
}

impl Beneficiary {
    pub fn as_str(&self) -> &'static str {
        match self {
            Beneficiary::Heir(heir) => heir.as_str(),
            Beneficiary::MaternalSiblings => "maternal_siblings",
        }
    }
}

impl std::fmt::Display for Beneficiary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the final distribution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistributionLine {
    pub beneficiary: Beneficiary,
    /// Head count behind this line; pooled lines carry the combined count.
    pub count: u32,
    /// Display fraction: a literal like "1/6", or "residuary" for Asabah.
    pub share_text: String,
    pub reason: ShareReason,
    /// Currency amount for the whole line, not per head.
    pub amount: f64,
}

/// Estate figure fields, used to point at the offending input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstateField {
    GrossEstate,
    AssetDebt,
    NonAssetDebt,
    FuneralExpenses,
    Bequest,
}

impl std::fmt::Display for EstateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EstateField::GrossEstate => "gross estate",
            EstateField::AssetDebt => "asset-related debt",
            EstateField::NonAssetDebt => "non-asset debt",
            EstateField::FuneralExpenses => "funeral expenses",
            EstateField::Bequest => "bequest",
        };
        f.write_str(name)
    }
}

/// Structural errors. Any of these halts the pipeline before distribution;
/// none of them is ever raised as a panic.
#[derive(Clone, Debug, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalcError {
    #[error("cannot have both husband and wife")]
    InvalidSpouseCombination,

    #[error("cannot have more than one husband")]
    TooManyHusbands,

    #[error("cannot have more than four wives")]
    TooManyWives,

    #[error("{field} cannot be negative")]
    NegativeInput { field: EstateField },

    #[error("liabilities exceed the gross estate")]
    LiabilitiesExceedEstate,

    #[error("no valid heirs remain after exclusion")]
    NoValidHeirs,
}

/// Non-fatal findings attached to an otherwise complete result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalcWarning {
    /// The requested bequest exceeded one third of the gross estate and was
    /// reduced; `excess` is the amount shaved off.
    BequestCapped { excess: f64 },
    /// The distributed total differs from the net estate by more than one
    /// currency unit; `residual` is the undistributed (or overdrawn) amount.
    Rounding { residual: f64 },
}

impl std::fmt::Display for CalcWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalcWarning::BequestCapped { excess } => {
                write!(f, "bequest capped at one third of the estate (excess {excess})")
            }
            CalcWarning::Rounding { residual } => {
                write!(f, "distribution leaves a residual of {residual}")
            }
        }
    }
}

/// Raw estate figures as entered, before netting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EstateInputs {
    pub gross_estate: f64,
    pub asset_debt: f64,
    pub non_asset_debt: f64,
    pub funeral_expenses: f64,
    /// Requested bequest; the engine caps it at one third of the gross estate.
    pub bequest: f64,
}

/// Output of the netting step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NettedEstate {
    /// Divisible estate after liabilities and the applied bequest.
    pub net: f64,
    /// Bequest actually deducted, after the one-third cap.
    pub applied_bequest: f64,
    /// Sum of debts and funeral expenses (bequest excluded).
    pub liabilities: f64,
    pub warnings: Vec<CalcWarning>,
}

/// Result aggregate of one calculation. Constructed once, never mutated by
/// the caller; identical inputs always produce an identical value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Distribution lines in catalog order; empty when `errors` is nonempty.
    pub distribution: Vec<DistributionLine>,
    pub errors: Vec<CalcError>,
    pub warnings: Vec<CalcWarning>,
    /// Categories excluded by Hajb, whether or not they were present.
    pub blocked: Vec<HeirCategory>,
}

impl CalculationResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn total_distributed(&self) -> f64 {
        self.distribution.iter().map(|line| line.amount).sum()
    }
}
