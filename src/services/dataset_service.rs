use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::currency::Currency;
use crate::models::experience::Experience;
use crate::models::field::Field;
use crate::models::vacancy::{Salary, SalaryRecord, Vacancy};
use crate::utils::text;

const PUBLISHED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Reads HH CSV exports and turns raw rows into typed records. Rows with a
/// column-count mismatch, empty cells, or unparseable values are dropped;
/// unknown enumeration codes abort the load.
#[derive(Clone, Default)]
pub struct DatasetService;

/// One raw row with its cells normalized and addressable by CSV header name.
struct RawRow<'a> {
    columns: &'a HashMap<String, usize>,
    cells: Vec<String>,
}

impl RawRow<'_> {
    fn get(&self, field: Field) -> Option<&str> {
        let index = *self.columns.get(field.canonical())?;
        self.cells.get(index).map(String::as_str)
    }

    fn decimal(&self, field: Field) -> Option<Decimal> {
        Decimal::from_str(self.get(field)?).ok()
    }

    fn yes_no(&self, field: Field) -> Option<bool> {
        text::parse_yes_no(self.get(field)?)
    }

    fn published_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_str(self.get(Field::PublishedAt)?, PUBLISHED_AT_FORMAT).ok()
    }
}

impl DatasetService {
    pub fn new() -> Self {
        Self
    }

    /// Raw header + data rows. Tolerates a UTF-8 BOM. Zero rows and
    /// header-only sources are distinct fatal conditions.
    pub fn read_rows(&self, path: impl AsRef<Path>) -> Result<(Vec<String>, Vec<Vec<String>>)> {
        let raw = fs::read_to_string(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text::strip_bom(&raw).as_bytes());

        let mut rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        if rows.is_empty() {
            return Err(Error::EmptySource);
        }
        let header = rows.remove(0);
        if rows.is_empty() {
            return Err(Error::HeaderOnlySource);
        }
        Ok((header, rows))
    }

    pub fn load_from_path(&self, path: impl AsRef<Path>) -> Result<Vec<Vacancy>> {
        let (header, rows) = self.read_rows(path)?;
        self.load_vacancies(&header, rows)
    }

    pub fn load_vacancies(&self, header: &[String], rows: Vec<Vec<String>>) -> Result<Vec<Vacancy>> {
        let columns = column_index(header);
        let total = rows.len();
        let mut vacancies = Vec::with_capacity(total);
        for cells in rows {
            let Some(row) = prepare_row(&columns, header, cells) else {
                continue;
            };
            let Some(vacancy) = build_vacancy(&row)? else {
                continue;
            };
            vacancies.push(vacancy);
        }
        info!(
            loaded = vacancies.len(),
            dropped = total - vacancies.len(),
            "vacancy dataset loaded"
        );
        Ok(vacancies)
    }

    pub fn load_salary_records_from_path(&self, path: impl AsRef<Path>) -> Result<Vec<SalaryRecord>> {
        let (header, rows) = self.read_rows(path)?;
        self.load_salary_records(&header, rows)
    }

    /// Narrow loader for the statistics path: only the salary-relevant
    /// columns are required to be present.
    pub fn load_salary_records(
        &self,
        header: &[String],
        rows: Vec<Vec<String>>,
    ) -> Result<Vec<SalaryRecord>> {
        let columns = column_index(header);
        let total = rows.len();
        let mut records = Vec::with_capacity(total);
        for cells in rows {
            let Some(row) = prepare_row(&columns, header, cells) else {
                continue;
            };
            let Some(record) = build_salary_record(&row)? else {
                continue;
            };
            records.push(record);
        }
        info!(
            loaded = records.len(),
            dropped = total - records.len(),
            "salary dataset loaded"
        );
        Ok(records)
    }
}

fn column_index(header: &[String]) -> HashMap<String, usize> {
    header
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect()
}

/// Column-count and empty-cell screening plus per-cell normalization.
fn prepare_row<'a>(
    columns: &'a HashMap<String, usize>,
    header: &[String],
    cells: Vec<String>,
) -> Option<RawRow<'a>> {
    if cells.len() != header.len() || cells.iter().any(|cell| cell.is_empty()) {
        return None;
    }
    let cells = cells.iter().map(|cell| text::normalize(cell)).collect();
    Some(RawRow { columns, cells })
}

/// `Ok(None)` drops the row as malformed; enumeration misses abort the load.
fn build_vacancy(row: &RawRow) -> Result<Option<Vacancy>> {
    let (Some(name), Some(description), Some(skills), Some(experience_code)) = (
        row.get(Field::Name),
        row.get(Field::Description),
        row.get(Field::KeySkills),
        row.get(Field::Experience),
    ) else {
        return Ok(None);
    };
    let (Some(employer_name), Some(area_name), Some(currency_code)) = (
        row.get(Field::EmployerName),
        row.get(Field::AreaName),
        row.get(Field::SalaryCurrency),
    ) else {
        return Ok(None);
    };
    let experience = Experience::from_code(experience_code)?;
    let salary_currency = Currency::from_code(currency_code)?;

    let (Some(salary_from), Some(salary_to), Some(salary_gross), Some(premium), Some(published_at)) = (
        row.decimal(Field::Salary),
        row.decimal(Field::SalaryTo),
        row.yes_no(Field::SalaryGross),
        row.yes_no(Field::Premium),
        row.published_at(),
    ) else {
        return Ok(None);
    };

    Ok(Some(Vacancy {
        name: name.to_string(),
        description: description.to_string(),
        key_skills: skills.split('\n').map(str::to_string).collect(),
        experience,
        premium,
        employer_name: employer_name.to_string(),
        salary: Salary {
            salary_from,
            salary_to,
            salary_gross,
            salary_currency,
        },
        area_name: area_name.to_string(),
        published_at,
    }))
}

fn build_salary_record(row: &RawRow) -> Result<Option<SalaryRecord>> {
    let (Some(name), Some(area_name), Some(currency_code)) = (
        row.get(Field::Name),
        row.get(Field::AreaName),
        row.get(Field::SalaryCurrency),
    ) else {
        return Ok(None);
    };
    let salary_currency = Currency::from_code(currency_code)?;
    let (Some(salary_from), Some(salary_to), Some(published_at)) = (
        row.decimal(Field::Salary),
        row.decimal(Field::SalaryTo),
        row.published_at(),
    ) else {
        return Ok(None);
    };
    Ok(Some(SalaryRecord {
        name: name.to_string(),
        salary_from,
        salary_to,
        salary_currency,
        area_name: area_name.to_string(),
        published_at,
    }))
}
