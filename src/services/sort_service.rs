use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;

use crate::dto::table_query::SortSpec;
use crate::error::Result;
use crate::models::currency::CurrencyTable;
use crate::models::experience::Experience;
use crate::models::field::Field;
use crate::services::format_service::{parse_salary_display, FormattedRow};

/// One comparable key per sortable field. A single sort never mixes variants,
/// so the derived cross-variant ordering is irrelevant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Number(Decimal),
    Count(usize),
    Date(DateTime<FixedOffset>),
    Rank(u8),
    Text(String),
}

#[derive(Clone)]
pub struct SortService {
    currencies: CurrencyTable,
}

impl SortService {
    pub fn new(currencies: CurrencyTable) -> Self {
        Self { currencies }
    }

    pub fn sort_key(&self, row: &FormattedRow, field: Field) -> Result<SortKey> {
        let key = match field {
            Field::Salary => {
                let salary = parse_salary_display(&row.salary)?;
                let currency = self.currencies.code_for_display_name(&salary.currency_name)?;
                let rate = self.currencies.to_rub(currency);
                let from = Decimal::from(salary.from) * rate;
                let to = Decimal::from(salary.to) * rate;
                SortKey::Number((from + to) / Decimal::TWO)
            }
            Field::KeySkills => SortKey::Count(row.key_skills.split('\n').count()),
            Field::PublishedAt => SortKey::Date(row.published_at),
            Field::Experience => SortKey::Rank(Experience::from_label(&row.experience)?.rank()),
            other => SortKey::Text(row.get(other).unwrap_or_default().to_string()),
        };
        Ok(key)
    }

    /// Stable in both directions: descending flips the comparator instead of
    /// reversing the output, so equal keys keep their input order.
    pub fn sort(&self, rows: Vec<FormattedRow>, spec: &SortSpec) -> Result<Vec<FormattedRow>> {
        let Some(field) = spec.field else {
            return Ok(rows);
        };
        let mut keyed = rows
            .into_iter()
            .map(|row| Ok((self.sort_key(&row, field)?, row)))
            .collect::<Result<Vec<(SortKey, FormattedRow)>>>()?;
        if spec.descending {
            keyed.sort_by(|a, b| b.0.cmp(&a.0));
        } else {
            keyed.sort_by(|a, b| a.0.cmp(&b.0));
        }
        Ok(keyed.into_iter().map(|(_, row)| row).collect())
    }
}
