use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    Azn,
    Byr,
    Eur,
    Gel,
    Kgs,
    Kzt,
    Rur,
    Uah,
    Usd,
    Uzs,
}

impl Currency {
    pub const ALL: [Currency; 10] = [
        Currency::Azn,
        Currency::Byr,
        Currency::Eur,
        Currency::Gel,
        Currency::Kgs,
        Currency::Kzt,
        Currency::Rur,
        Currency::Uah,
        Currency::Usd,
        Currency::Uzs,
    ];

    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "AZN" => Ok(Currency::Azn),
            "BYR" => Ok(Currency::Byr),
            "EUR" => Ok(Currency::Eur),
            "GEL" => Ok(Currency::Gel),
            "KGS" => Ok(Currency::Kgs),
            "KZT" => Ok(Currency::Kzt),
            "RUR" => Ok(Currency::Rur),
            "UAH" => Ok(Currency::Uah),
            "USD" => Ok(Currency::Usd),
            "UZS" => Ok(Currency::Uzs),
            other => Err(Error::UnknownCurrency(other.to_string())),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Azn => "AZN",
            Currency::Byr => "BYR",
            Currency::Eur => "EUR",
            Currency::Gel => "GEL",
            Currency::Kgs => "KGS",
            Currency::Kzt => "KZT",
            Currency::Rur => "RUR",
            Currency::Uah => "UAH",
            Currency::Usd => "USD",
            Currency::Uzs => "UZS",
        }
    }

    /// Localized display name, as it appears inside the composite salary string.
    pub fn display_name(&self) -> &'static str {
        match self {
            Currency::Azn => "Манаты",
            Currency::Byr => "Белорусские рубли",
            Currency::Eur => "Евро",
            Currency::Gel => "Грузинский лари",
            Currency::Kgs => "Киргизский сом",
            Currency::Kzt => "Тенге",
            Currency::Rur => "Рубли",
            Currency::Uah => "Гривны",
            Currency::Usd => "Доллары",
            Currency::Uzs => "Узбекский сум",
        }
    }

    /// Conversion rate into roubles, the common unit for salary comparison.
    pub fn to_rub_rate(&self) -> Decimal {
        match self {
            Currency::Azn => Decimal::new(3568, 2),
            Currency::Byr => Decimal::new(2391, 2),
            Currency::Eur => Decimal::new(5990, 2),
            Currency::Gel => Decimal::new(2174, 2),
            Currency::Kgs => Decimal::new(76, 2),
            Currency::Kzt => Decimal::new(13, 2),
            Currency::Rur => Decimal::ONE,
            Currency::Uah => Decimal::new(164, 2),
            Currency::Usd => Decimal::new(6066, 2),
            Currency::Uzs => Decimal::new(55, 4),
        }
    }
}

/// Process-wide currency lookup. The display-name index is inverted from the
/// forward mapping at construction so the two can never drift apart.
#[derive(Debug, Clone)]
pub struct CurrencyTable {
    by_display_name: HashMap<&'static str, Currency>,
}

impl CurrencyTable {
    pub fn new() -> Self {
        let by_display_name = Currency::ALL
            .iter()
            .map(|c| (c.display_name(), *c))
            .collect();
        Self { by_display_name }
    }

    pub fn to_rub(&self, currency: Currency) -> Decimal {
        currency.to_rub_rate()
    }

    pub fn code_for_display_name(&self, name: &str) -> Result<Currency> {
        self.by_display_name
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownCurrency(name.to_string()))
    }
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self::new()
    }
}
