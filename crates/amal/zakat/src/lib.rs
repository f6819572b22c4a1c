//! Amal Zakat - obligation thresholds and amounts
//!
//! Pure assessment functions, one per wealth class. Monetary classes are
//! measured against the gold nisab (85 grams); agriculture against a fixed
//! harvest weight; livestock against bracket tables that yield in-kind
//! obligations rather than currency amounts.

#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Nisab threshold for monetary wealth, in grams of gold.
pub const GOLD_NISAB_GRAMS: f64 = 85.0;
/// Standard zakat rate on monetary wealth.
pub const MONETARY_RATE: f64 = 0.025;
/// Rice owed per person for zakat al-fitr, in kilograms.
pub const FITRAH_KG_PER_PERSON: f64 = 2.5;
/// Nisab threshold for harvests, in kilograms of staple grain.
pub const HARVEST_NISAB_KG: f64 = 520.0;

#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ZakatError {
    /// Monetary nisab is denominated in gold; a non-positive price makes
    /// the threshold meaningless.
    #[error("gold price per gram must be positive")]
    MissingGoldPrice,
}

/// Outcome of one assessment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ZakatAssessment {
    /// Below the threshold; `nisab` is the threshold that was not met
    /// (currency for monetary classes, kilograms for agriculture, head
    /// count for livestock).
    NotDue { nisab: f64 },
    /// Payable in currency.
    Due { amount: f64, nisab: f64 },
    /// Payable in kind (livestock).
    InKind { description: String },
}

fn monetary_nisab(gold_price_per_gram: f64) -> Result<f64, ZakatError> {
    if gold_price_per_gram <= 0.0 {
        return Err(ZakatError::MissingGoldPrice);
    }
    Ok(gold_price_per_gram * GOLD_NISAB_GRAMS)
}

fn against_nisab(base: f64, nisab: f64) -> ZakatAssessment {
    if base < nisab {
        ZakatAssessment::NotDue { nisab }
    } else {
        ZakatAssessment::Due {
            amount: base * MONETARY_RATE,
            nisab,
        }
    }
}

/// Zakat al-fitr owed by a household.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitrahDue {
    pub total_kg: f64,
    pub total_value: f64,
}

/// Zakat al-fitr: 2.5 kg of rice per person, valued at the local price.
/// Always due; there is no nisab.
pub fn fitrah(people: u32, rice_price_per_kg: f64) -> FitrahDue {
    let total_kg = f64::from(people) * FITRAH_KG_PER_PERSON;
    FitrahDue {
        total_kg,
        total_value: total_kg * rice_price_per_kg,
    }
}

/// Zakat on accumulated wealth held for a year.
pub fn maal(wealth: f64, gold_price_per_gram: f64) -> Result<ZakatAssessment, ZakatError> {
    Ok(against_nisab(wealth, monetary_nisab(gold_price_per_gram)?))
}

/// Zakat on professional income, assessed monthly against one twelfth of
/// the annual nisab.
pub fn income(
    monthly_income: f64,
    monthly_expenses: f64,
    gold_price_per_gram: f64,
) -> Result<ZakatAssessment, ZakatError> {
    let monthly_nisab = monetary_nisab(gold_price_per_gram)? / 12.0;
    Ok(against_nisab(monthly_income - monthly_expenses, monthly_nisab))
}

/// Zakat on trade: current assets plus capital and receivables, net of debt.
pub fn trade(
    assets: f64,
    capital: f64,
    receivables: f64,
    debt: f64,
    gold_price_per_gram: f64,
) -> Result<ZakatAssessment, ZakatError> {
    let net_assets = assets + capital + receivables - debt;
    Ok(against_nisab(net_assets, monetary_nisab(gold_price_per_gram)?))
}

/// How a harvest was watered; irrigation at cost halves the rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Irrigation {
    RainFed,
    Irrigated,
}

/// Zakat on a harvest: 10% rain-fed, 5% irrigated, above 520 kg.
///
/// The returned `nisab` is in kilograms; the due `amount` is the monetary
/// value of the owed grain at the given price.
pub fn agriculture(
    harvest_kg: f64,
    price_per_kg: f64,
    irrigation: Irrigation,
) -> ZakatAssessment {
    if harvest_kg < HARVEST_NISAB_KG {
        return ZakatAssessment::NotDue {
            nisab: HARVEST_NISAB_KG,
        };
    }
    let rate = match irrigation {
        Irrigation::RainFed => 0.10,
        Irrigation::Irrigated => 0.05,
    };
    ZakatAssessment::Due {
        amount: harvest_kg * rate * price_per_kg,
        nisab: HARVEST_NISAB_KG,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LivestockKind {
    Goat,
    Cattle,
    Camel,
}

/// Zakat on livestock, by the traditional bracket tables. The obligation
/// is in kind, described in words.
pub fn livestock(kind: LivestockKind, head_count: u32) -> ZakatAssessment {
    match kind {
        LivestockKind::Goat => goats(head_count),
        LivestockKind::Cattle => cattle(head_count),
        LivestockKind::Camel => camels(head_count),
    }
}

fn in_kind(description: impl Into<String>) -> ZakatAssessment {
    ZakatAssessment::InKind {
        description: description.into(),
    }
}

fn goats(count: u32) -> ZakatAssessment {
    match count {
        0..=39 => ZakatAssessment::NotDue { nisab: 40.0 },
        40..=120 => in_kind("1 goat (two years or older) or sheep (one year or older)"),
        121..=200 => in_kind("2 goats or sheep"),
        201..=399 => in_kind("3 goats or sheep"),
        _ => in_kind(format!("{} goats or sheep", count / 100)),
    }
}

fn cattle(count: u32) -> ZakatAssessment {
    match count {
        0..=29 => ZakatAssessment::NotDue { nisab: 30.0 },
        30..=39 => in_kind("1 tabi' (one-year-old calf)"),
        40..=59 => in_kind("1 musinnah (two-year-old cow)"),
        60..=69 => in_kind("2 tabi'"),
        70..=79 => in_kind("1 tabi' and 1 musinnah"),
        80..=89 => in_kind("2 musinnah"),
        90..=99 => in_kind("3 tabi'"),
        _ => {
            let musinnah = count / 40;
            let tabi = (count % 40) / 30;
            in_kind(format!(
                "{musinnah} musinnah and {tabi} tabi' (or {} tabi' if needed)",
                count / 30
            ))
        }
    }
}

fn camels(count: u32) -> ZakatAssessment {
    match count {
        0..=4 => ZakatAssessment::NotDue { nisab: 5.0 },
        5..=9 => in_kind("1 goat"),
        10..=14 => in_kind("2 goats"),
        15..=19 => in_kind("3 goats"),
        20..=24 => in_kind("4 goats"),
        25..=35 => in_kind("1 bint makhad (one-year-old she-camel)"),
        36..=45 => in_kind("1 bint labun (two-year-old she-camel)"),
        46..=60 => in_kind("1 hiqqah (three-year-old she-camel)"),
        61..=75 => in_kind("1 jadha'ah (four-year-old she-camel)"),
        76..=90 => in_kind("2 bint labun"),
        91..=120 => in_kind("2 hiqqah"),
        _ => in_kind(format!(
            "{} hiqqah and {} bint labun",
            count / 50,
            (count % 50) / 40
        )),
    }
}
