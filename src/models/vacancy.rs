use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::currency::{Currency, CurrencyTable};
use crate::models::experience::Experience;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vacancy {
    pub name: String,
    pub description: String,
    pub key_skills: Vec<String>,
    pub experience: Experience,
    pub premium: bool,
    pub employer_name: String,
    pub salary: Salary,
    pub area_name: String,
    pub published_at: DateTime<FixedOffset>,
}

/// Salary fork. `salary_from <= salary_to` is deliberately not enforced;
/// mean derivation must tolerate either ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Salary {
    pub salary_from: Decimal,
    pub salary_to: Decimal,
    pub salary_gross: bool,
    pub salary_currency: Currency,
}

impl Salary {
    /// Mean of the fork converted into roubles.
    pub fn rub_mean(&self, currencies: &CurrencyTable) -> Decimal {
        let rate = currencies.to_rub(self.salary_currency);
        (self.salary_from + self.salary_to) / Decimal::TWO * rate
    }
}

/// Narrow record used by the statistics path, where source files carry only
/// the salary-relevant columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRecord {
    pub name: String,
    pub salary_from: Decimal,
    pub salary_to: Decimal,
    pub salary_currency: Currency,
    pub area_name: String,
    pub published_at: DateTime<FixedOffset>,
}

impl SalaryRecord {
    pub fn rub_mean(&self, currencies: &CurrencyTable) -> Decimal {
        let rate = currencies.to_rub(self.salary_currency);
        (self.salary_from + self.salary_to) / Decimal::TWO * rate
    }
}
