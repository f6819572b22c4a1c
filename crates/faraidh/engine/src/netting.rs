//! Estate netting: gross estate minus debts, funeral costs, and a capped
//! bequest. Numerically trivial, but it owns the input validation that
//! gates the whole pipeline.

use faraidh_types::{CalcError, CalcWarning, EstateField, EstateInputs, NettedEstate};
use tracing::{debug, warn};

/// Net the estate, capping the bequest at one third of the gross value.
///
/// Fails with `NegativeInput` for any negative figure and with
/// `LiabilitiesExceedEstate` when debts, funeral costs, and the applied
/// bequest together exceed the gross estate. Callers must not proceed to
/// distribution on an error.
pub fn net_estate(inputs: &EstateInputs) -> Result<NettedEstate, CalcError> {
    let fields = [
        (EstateField::GrossEstate, inputs.gross_estate),
        (EstateField::AssetDebt, inputs.asset_debt),
        (EstateField::NonAssetDebt, inputs.non_asset_debt),
        (EstateField::FuneralExpenses, inputs.funeral_expenses),
        (EstateField::Bequest, inputs.bequest),
    ];
    for (field, value) in fields {
        if value < 0.0 {
            return Err(CalcError::NegativeInput { field });
        }
    }

    let mut warnings = Vec::new();
    let cap = inputs.gross_estate / 3.0;
    let applied_bequest = if inputs.bequest > cap {
        let excess = inputs.bequest - cap;
        warn!(requested = inputs.bequest, cap, excess, "bequest capped at one third");
        warnings.push(CalcWarning::BequestCapped { excess });
        cap
    } else {
        inputs.bequest
    };

    let liabilities = inputs.asset_debt + inputs.non_asset_debt + inputs.funeral_expenses;
    if liabilities + applied_bequest > inputs.gross_estate {
        return Err(CalcError::LiabilitiesExceedEstate);
    }

    let net = (inputs.gross_estate - liabilities - applied_bequest).max(0.0);
    debug!(net, liabilities, applied_bequest, "estate netted");

    Ok(NettedEstate {
        net,
        applied_bequest,
        liabilities,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bequest_is_capped_at_a_third_with_warning() {
        let inputs = EstateInputs {
            gross_estate: 100_000_000.0,
            bequest: 40_000_000.0,
            ..Default::default()
        };
        let netted = net_estate(&inputs).unwrap();
        let cap = 100_000_000.0 / 3.0;
        assert!((netted.applied_bequest - cap).abs() < 1e-6);
        assert!((netted.net - (100_000_000.0 - cap)).abs() < 1e-6);
        match &netted.warnings[..] {
            [CalcWarning::BequestCapped { excess }] => {
                assert!((excess - (40_000_000.0 - cap)).abs() < 1e-6);
            }
            other => panic!("expected a bequest warning, got {other:?}"),
        }
    }

    #[test]
    fn bequest_within_the_cap_passes_untouched() {
        let inputs = EstateInputs {
            gross_estate: 90_000.0,
            bequest: 30_000.0,
            ..Default::default()
        };
        let netted = net_estate(&inputs).unwrap();
        assert_eq!(netted.applied_bequest, 30_000.0);
        assert_eq!(netted.net, 60_000.0);
        assert!(netted.warnings.is_empty());
    }

    #[test]
    fn each_negative_field_is_rejected_by_name() {
        let base = EstateInputs {
            gross_estate: 1_000.0,
            ..Default::default()
        };

        let mut inputs = base;
        inputs.funeral_expenses = -1.0;
        assert_eq!(
            net_estate(&inputs),
            Err(CalcError::NegativeInput {
                field: EstateField::FuneralExpenses
            })
        );

        let mut inputs = base;
        inputs.bequest = -5.0;
        assert_eq!(
            net_estate(&inputs),
            Err(CalcError::NegativeInput {
                field: EstateField::Bequest
            })
        );
    }

    #[test]
    fn liabilities_beyond_the_estate_fail() {
        let inputs = EstateInputs {
            gross_estate: 10_000.0,
            asset_debt: 6_000.0,
            non_asset_debt: 3_000.0,
            funeral_expenses: 2_000.0,
            bequest: 0.0,
        };
        assert_eq!(net_estate(&inputs), Err(CalcError::LiabilitiesExceedEstate));
    }

    #[test]
    fn capped_bequest_counts_toward_the_liability_check() {
        // Raw bequest would blow past the estate; after capping it fits.
        let inputs = EstateInputs {
            gross_estate: 9_000.0,
            asset_debt: 5_000.0,
            bequest: 9_000.0,
            ..Default::default()
        };
        let netted = net_estate(&inputs).unwrap();
        assert_eq!(netted.applied_bequest, 3_000.0);
        assert_eq!(netted.net, 1_000.0);
    }
}
