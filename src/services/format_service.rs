use chrono::{DateTime, FixedOffset};

use crate::error::{Error, Result};
use crate::models::field::Field;
use crate::models::vacancy::{Salary, Vacancy};

/// Display projection of one vacancy. The salary fork, gross flag and
/// currency collapse into a single composite string; filtering and sorting
/// recover the numeric parts through [`parse_salary_display`].
#[derive(Debug, Clone)]
pub struct FormattedRow {
    pub name: String,
    pub description: String,
    pub key_skills: String,
    pub experience: String,
    pub premium: String,
    pub employer_name: String,
    pub salary: String,
    pub area_name: String,
    pub published_at: DateTime<FixedOffset>,
}

impl FormattedRow {
    /// String-valued display fields, for the generic equality predicate and
    /// lexical sorting. Salary and the publication date have dedicated
    /// handling and are not reachable here.
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(&self.name),
            Field::Description => Some(&self.description),
            Field::KeySkills => Some(&self.key_skills),
            Field::Experience => Some(&self.experience),
            Field::Premium => Some(&self.premium),
            Field::EmployerName => Some(&self.employer_name),
            Field::AreaName => Some(&self.area_name),
            _ => None,
        }
    }
}

#[derive(Clone, Default)]
pub struct FormatService;

impl FormatService {
    pub fn new() -> Self {
        Self
    }

    pub fn format(&self, vacancy: &Vacancy) -> FormattedRow {
        FormattedRow {
            name: vacancy.name.clone(),
            description: vacancy.description.clone(),
            key_skills: vacancy.key_skills.join("\n"),
            experience: vacancy.experience.label().to_string(),
            premium: yes_no(vacancy.premium).to_string(),
            employer_name: vacancy.employer_name.clone(),
            salary: self.compose_salary(&vacancy.salary),
            area_name: vacancy.area_name.clone(),
            published_at: vacancy.published_at,
        }
    }

    /// `"{from} - {to} ({currency display name}) ({tax phrase})"`. Bounds are
    /// truncated toward zero. The token layout is load-bearing: the filter and
    /// sort engines parse it back through [`parse_salary_display`].
    pub fn compose_salary(&self, salary: &Salary) -> String {
        let gross = if salary.salary_gross {
            "Без вычета налогов"
        } else {
            "С вычетом налогов"
        };
        format!(
            "{} - {} ({}) ({})",
            salary.salary_from.trunc(),
            salary.salary_to.trunc(),
            salary.salary_currency.display_name(),
            gross
        )
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Да"
    } else {
        "Нет"
    }
}

/// Numeric bounds and currency name recovered from a composite salary string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalaryDisplay {
    pub from: i64,
    pub to: i64,
    pub currency_name: String,
}

/// The one parser for the composite salary layout, shared by the filter and
/// sort engines so the contract with [`FormatService::compose_salary`] lives
/// in a single place.
pub fn parse_salary_display(text: &str) -> Result<SalaryDisplay> {
    let malformed = || Error::MalformedSalaryDisplay(text.to_string());

    let mut tokens = text.split_whitespace();
    let from = tokens.next().ok_or_else(malformed)?;
    let to = tokens.nth(1).ok_or_else(malformed)?;

    let open = text.find('(').ok_or_else(malformed)?;
    let close = text[open + 1..].find(')').ok_or_else(malformed)?;
    let currency_name = text[open + 1..open + 1 + close].to_string();

    Ok(SalaryDisplay {
        from: from.parse().map_err(|_| malformed())?,
        to: to.parse().map_err(|_| malformed())?,
        currency_name,
    })
}
