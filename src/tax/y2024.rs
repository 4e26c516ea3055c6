//! Federal tables for tax year 2024.
//!
//! Bracket edges can be found on the IRS inflation adjustment release; the
//! standard deduction amounts with allowances are at the end of 1040-SR.

use crate::core::{
    AmtInput, BracketsInput, ByStatus, CapitalGainsInput, DatasetInput, EicInput, FicaInput,
    HsaLimits, NetInvestmentIncomeTaxInput, OrdinaryInput, OrdinaryStatusInput,
    QualifyingDependents, SocialSecurityBase, TaggedAmount, TaxYear, Tier,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn tagged(name: &str, amount: Decimal) -> TaggedAmount {
    TaggedAmount {
        name: name.to_string(),
        amount,
    }
}

/// Standard deduction names for `label`, base amount plus one per allowance
fn deductions(label: &str, amounts: &[Decimal]) -> Vec<TaggedAmount> {
    amounts
        .iter()
        .enumerate()
        .map(|(allowances, amount)| {
            let name = match allowances {
                0 => format!("Standard Deduction ({label})"),
                1 => format!("Standard Deduction ({label}) with 1 age or blindness allowance"),
                n => format!("Standard Deduction ({label}) with {n} age or blindness allowances"),
            };
            tagged(&name, *amount)
        })
        .collect()
}

fn ordinary(label: &str, brackets: [Decimal; 6], amounts: &[Decimal]) -> OrdinaryStatusInput {
    OrdinaryStatusInput {
        brackets: brackets.to_vec(),
        deductions: deductions(label, amounts),
        exemptions: vec![tagged(&format!("Standard Exemption ({label})"), dec!(0))],
    }
}

fn cap_gains(lower: Decimal, upper: Decimal) -> BracketsInput {
    BracketsInput {
        brackets: vec![lower, upper],
    }
}

type Points = Vec<(Decimal, Decimal)>;

fn phase_curve(phase_in: Decimal, max: Decimal, phase_out: Decimal, end: Decimal) -> Points {
    vec![
        (dec!(0), dec!(0)),
        (phase_in, max),
        (phase_out, max),
        (end, dec!(0)),
    ]
}

fn unmarried_formulas() -> Vec<Points> {
    vec![
        phase_curve(dec!(8510), dec!(600), dec!(10640), dec!(19130)),
        phase_curve(dec!(12750), dec!(4168), dec!(23390), dec!(48436)),
        phase_curve(dec!(17910), dec!(6892), dec!(23390), dec!(53622)),
        phase_curve(dec!(17910), dec!(7754), dec!(23390), dec!(57784)),
    ]
}

fn married_formulas() -> Vec<Points> {
    vec![
        // Transcribed as (17750, 4168). The plateau must stay at the phase-in maximum of 600.
        phase_curve(dec!(8510), dec!(600), dec!(17750), dec!(25760)),
        phase_curve(dec!(12750), dec!(4168), dec!(30520), dec!(55529)),
        phase_curve(dec!(17910), dec!(6892), dec!(30520), dec!(60411)),
        phase_curve(dec!(17910), dec!(7754), dec!(30520), dec!(64573)),
    ]
}

pub fn dataset() -> DatasetInput {
    // credit income caps for 0, 1, 2, 3+ children
    let caps = vec![dec!(19130), dec!(48436), dec!(53622), dec!(57784)];
    let mfj_caps = vec![dec!(25760), dec!(55529), dec!(60411), dec!(64573)];

    DatasetInput {
        year: TaxYear(2024),
        ordinary: OrdinaryInput {
            rates: vec![
                dec!(10),
                dec!(12),
                dec!(22),
                dec!(24),
                dec!(32),
                dec!(35),
                dec!(37),
            ],
            status: ByStatus {
                single: ordinary(
                    "Single",
                    [
                        dec!(11600),
                        dec!(47150),
                        dec!(100525),
                        dec!(191950),
                        dec!(243725),
                        dec!(609350),
                    ],
                    &[dec!(14600), dec!(16550), dec!(18500)],
                ),
                married_filing_jointly: ordinary(
                    "Married",
                    [
                        dec!(23200),
                        dec!(94300),
                        dec!(201050),
                        dec!(383900),
                        dec!(487450),
                        dec!(731200),
                    ],
                    &[
                        dec!(29200),
                        dec!(30800),
                        dec!(32400),
                        dec!(34000),
                        dec!(35600),
                    ],
                ),
                married_filing_separately: ordinary(
                    "Married Filing Separately",
                    [
                        dec!(11600),
                        dec!(47150),
                        dec!(100525),
                        dec!(191950),
                        dec!(243725),
                        dec!(365600),
                    ],
                    &[
                        dec!(14600),
                        dec!(16200),
                        dec!(17800),
                        dec!(19400),
                        dec!(21000),
                    ],
                ),
                head_of_household: ordinary(
                    "Head of Household",
                    [
                        dec!(16550),
                        dec!(63100),
                        dec!(100500),
                        dec!(191950),
                        dec!(243700),
                        dec!(609350),
                    ],
                    &[dec!(21900), dec!(23850), dec!(25800)],
                ),
                widowed: ordinary(
                    "Widowed",
                    [
                        dec!(23200),
                        dec!(94300),
                        dec!(201050),
                        dec!(383900),
                        dec!(487450),
                        dec!(731200),
                    ],
                    &[dec!(29200), dec!(30800), dec!(32400)],
                ),
            },
        },
        long_term_cap_gains: CapitalGainsInput {
            rates: vec![dec!(0), dec!(15), dec!(20)],
            status: ByStatus {
                single: cap_gains(dec!(47025), dec!(518900)),
                married_filing_jointly: cap_gains(dec!(94050), dec!(583750)),
                married_filing_separately: cap_gains(dec!(47025), dec!(291850)),
                head_of_household: cap_gains(dec!(63000), dec!(551350)),
                widowed: cap_gains(dec!(94050), dec!(583750)),
            },
        },
        fica: FicaInput {
            // Transcribed as 10459.2; 168600 x 6.2% is 10453.2.
            max_ss_tax: dec!(10453.2),
            max_income_ss_tax_applies: dec!(168600),
            regular_medicare_tax_rate: dec!(1.45),
            additional_medicare_tax_rate: dec!(0.9),
            additional_medicare_tax_threshold: ByStatus {
                single: dec!(200000),
                married_filing_jointly: dec!(250000),
                married_filing_separately: dec!(125000),
                head_of_household: dec!(200000),
                widowed: dec!(200000),
            },
        },
        net_investment_income_tax: NetInvestmentIncomeTaxInput {
            tax_rate: dec!(3.8),
            tax_threshold: ByStatus {
                single: dec!(200000),
                married_filing_jointly: dec!(250000),
                married_filing_separately: dec!(125000),
                head_of_household: dec!(200000),
                widowed: dec!(250000),
            },
        },
        health_savings_accounts: HsaLimits {
            self_only: dec!(4150),
            family: dec!(8300),
        },
        amt: AmtInput {
            rates: vec![dec!(26), dec!(28)],
            exemption: ByStatus {
                single: vec![Tier {
                    threshold: dec!(609350),
                    amount: dec!(85700),
                }],
                married_filing_jointly: vec![Tier {
                    threshold: dec!(1218700),
                    amount: dec!(133300),
                }],
                married_filing_separately: vec![Tier {
                    threshold: dec!(609350),
                    amount: dec!(66650),
                }],
                head_of_household: vec![],
                widowed: vec![],
            },
            cap: ByStatus {
                single: dec!(232600),
                married_filing_jointly: dec!(232600),
                married_filing_separately: dec!(116300),
                head_of_household: dec!(232600),
                widowed: dec!(232600),
            },
        },
        eic: EicInput {
            caps: ByStatus {
                single: Some(caps.clone()),
                married_filing_jointly: Some(mfj_caps),
                married_filing_separately: None,
                head_of_household: Some(caps.clone()),
                widowed: Some(caps),
            },
            max_investment_income: dec!(11600),
            formulas: ByStatus {
                single: Some(unmarried_formulas()),
                married_filing_jointly: Some(married_formulas()),
                married_filing_separately: None,
                head_of_household: Some(unmarried_formulas()),
                widowed: Some(unmarried_formulas()),
            },
        },
        qualifying_dependents: QualifyingDependents {
            child_max_age: 17,
            qualifying_dependent_max_age: 19,
            qualifying_student_max_age: 24,
        },
        social_security_benefits: ByStatus {
            single: SocialSecurityBase {
                base_amount: dec!(25000),
                additional_amount: dec!(9000),
            },
            married_filing_jointly: SocialSecurityBase {
                base_amount: dec!(32000),
                additional_amount: dec!(12000),
            },
            married_filing_separately: SocialSecurityBase {
                base_amount: dec!(25000),
                additional_amount: dec!(9000),
            },
            head_of_household: SocialSecurityBase {
                base_amount: dec!(25000),
                additional_amount: dec!(9000),
            },
            widowed: SocialSecurityBase {
                base_amount: dec!(25000),
                additional_amount: dec!(9000),
            },
        },
    }
}
