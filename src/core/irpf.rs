//! Progressive IRPF schedules.
//!
//! Each region carries a combined state plus regional scale over the state
//! thresholds. Brackets are half-open `[floor, ceiling)`: income exactly on a
//! threshold starts the upper bracket.

use super::money::{format_eur_whole, round_cents};
use super::year::TaxYear;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Autonomous community whose regional scale applies
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    Madrid,
    Catalonia,
    Andalusia,
    Valencia,
    BalearicIslands,
    CanaryIslands,
    /// General scale for the remaining common-regime communities
    #[default]
    Other,
}

form_values!(Region, "autonomous community" {
    Madrid => "madrid",
    Catalonia => "catalonia",
    Andalusia => "andalusia",
    Valencia => "valencia",
    BalearicIslands => "balearic-islands",
    CanaryIslands => "canary-islands",
    Other => "other",
});

impl Region {
    pub fn name(&self) -> &'static str {
        match self {
            Region::Madrid => "Comunidad de Madrid",
            Region::Catalonia => "Catalunya",
            Region::Andalusia => "Andalucía",
            Region::Valencia => "Comunitat Valenciana",
            Region::BalearicIslands => "Illes Balears",
            Region::CanaryIslands => "Canarias",
            Region::Other => "Other (general scale)",
        }
    }
}

/// One marginal band of a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bracket {
    pub floor: Decimal,
    /// Exclusive upper bound, `None` for the top bracket
    pub ceiling: Option<Decimal>,
    /// Marginal rate as a fraction
    pub rate: Decimal,
}

impl Bracket {
    pub fn label(&self) -> String {
        match self.ceiling {
            Some(ceiling) => format!(
                "{} - {}",
                format_eur_whole(self.floor),
                format_eur_whole(ceiling)
            ),
            None => format!("Over {}", format_eur_whole(self.floor)),
        }
    }
}

const T1: Decimal = dec!(12450);
const T2: Decimal = dec!(20200);
const T3: Decimal = dec!(35200);
const T4: Decimal = dec!(60000);
const T5: Decimal = dec!(300000);

const fn scale(rates: [Decimal; 6]) -> [Bracket; 6] {
    [
        Bracket {
            floor: Decimal::ZERO,
            ceiling: Some(T1),
            rate: rates[0],
        },
        Bracket {
            floor: T1,
            ceiling: Some(T2),
            rate: rates[1],
        },
        Bracket {
            floor: T2,
            ceiling: Some(T3),
            rate: rates[2],
        },
        Bracket {
            floor: T3,
            ceiling: Some(T4),
            rate: rates[3],
        },
        Bracket {
            floor: T4,
            ceiling: Some(T5),
            rate: rates[4],
        },
        Bracket {
            floor: T5,
            ceiling: None,
            rate: rates[5],
        },
    ]
}

const GENERAL_2025: [Bracket; 6] = scale([
    dec!(0.19),
    dec!(0.24),
    dec!(0.30),
    dec!(0.37),
    dec!(0.45),
    dec!(0.47),
]);

const MADRID_2025: [Bracket; 6] = scale([
    dec!(0.18),
    dec!(0.227),
    dec!(0.278),
    dec!(0.359),
    dec!(0.43),
    dec!(0.45),
]);

const CATALONIA_2025: [Bracket; 6] = scale([
    dec!(0.20),
    dec!(0.24),
    dec!(0.31),
    dec!(0.385),
    dec!(0.46),
    dec!(0.50),
]);

const ANDALUSIA_2025: [Bracket; 6] = scale([
    dec!(0.19),
    dec!(0.24),
    dec!(0.295),
    dec!(0.37),
    dec!(0.45),
    dec!(0.47),
]);

const VALENCIA_2025: [Bracket; 6] = scale([
    dec!(0.19),
    dec!(0.24),
    dec!(0.30),
    dec!(0.375),
    dec!(0.465),
    dec!(0.54),
]);

const BALEARIC_2025: [Bracket; 6] = scale([
    dec!(0.19),
    dec!(0.245),
    dec!(0.305),
    dec!(0.38),
    dec!(0.465),
    dec!(0.49),
]);

const CANARY_2025: [Bracket; 6] = scale([
    dec!(0.185),
    dec!(0.235),
    dec!(0.295),
    dec!(0.37),
    dec!(0.46),
    dec!(0.505),
]);

/// Combined state and regional IRPF scales for 2025
pub static IRPF_BRACKETS_2025_BY_REGION: [(Region, &[Bracket]); 7] = [
    (Region::Madrid, &MADRID_2025),
    (Region::Catalonia, &CATALONIA_2025),
    (Region::Andalusia, &ANDALUSIA_2025),
    (Region::Valencia, &VALENCIA_2025),
    (Region::BalearicIslands, &BALEARIC_2025),
    (Region::CanaryIslands, &CANARY_2025),
    (Region::Other, &GENERAL_2025),
];

/// Income falling into one bracket and the tax due on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketSlice {
    pub label: String,
    pub floor: Decimal,
    pub ceiling: Option<Decimal>,
    /// Income taxed within this bracket
    pub taxable: Decimal,
    /// Marginal rate as a fraction
    pub rate: Decimal,
    /// Tax on this slice, rounded to the cent
    pub tax: Decimal,
}

/// The progressive scale for one region and tax year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrpfSchedule {
    pub year: TaxYear,
    pub region: Region,
    pub brackets: &'static [Bracket],
}

impl IrpfSchedule {
    pub fn for_region(year: TaxYear, region: Region) -> Self {
        let rules_year = year.rules_year();
        let fallback: &'static [Bracket] = &GENERAL_2025;
        let brackets = IRPF_BRACKETS_2025_BY_REGION
            .iter()
            .find(|(r, _)| *r == region)
            .map_or(fallback, |(_, brackets)| *brackets);
        IrpfSchedule {
            year: rules_year,
            region,
            brackets,
        }
    }

    /// General scale, used for withholding estimates
    pub fn general(year: TaxYear) -> Self {
        Self::for_region(year, Region::Other)
    }

    /// Split `income` across the brackets it reaches.
    ///
    /// Brackets entirely above the income are omitted, so zero income yields
    /// no slices. Slice incomes always sum to `income`.
    pub fn apply(&self, income: Decimal) -> Vec<BracketSlice> {
        self.brackets
            .iter()
            .filter(|b| income > b.floor)
            .map(|b| {
                let upper = b.ceiling.map_or(income, |ceiling| ceiling.min(income));
                let taxable = upper - b.floor;
                let tax = round_cents(taxable * b.rate);
                log::debug!(
                    "IRPF {} {}: {} @ {} = {}",
                    self.region,
                    b.label(),
                    taxable,
                    b.rate,
                    tax
                );
                BracketSlice {
                    label: b.label(),
                    floor: b.floor,
                    ceiling: b.ceiling,
                    taxable,
                    rate: b.rate,
                    tax,
                }
            })
            .collect()
    }

    /// Total tax on `income`, the sum of the slice taxes
    pub fn tax(&self, income: Decimal) -> Decimal {
        self.apply(income).iter().map(|s| s.tax).sum()
    }
}
