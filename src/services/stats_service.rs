use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::currency::CurrencyTable;
use crate::models::vacancy::SalaryRecord;

const CITY_SHARE_THRESHOLD: Decimal = Decimal::from_parts(1, 0, 0, false, 2); // 0.01
const TOP_CITIES: usize = 10;

/// Aggregated salary statistics: year dynamics for the whole set and for one
/// profession, plus the top-city breakdowns.
#[derive(Debug, Clone)]
pub struct Report {
    pub profession: String,
    pub salary_by_year: BTreeMap<i32, i64>,
    pub count_by_year: BTreeMap<i32, usize>,
    pub profession_salary_by_year: BTreeMap<i32, i64>,
    pub profession_count_by_year: BTreeMap<i32, usize>,
    /// Cities holding more than 1% of vacancies, by descending mean salary.
    pub salary_by_city: Vec<(String, i64)>,
    /// Vacancy shares of at least 1%, descending, rounded to 4 places.
    pub share_by_city: Vec<(String, Decimal)>,
    /// Share not covered by the listed top cities.
    pub others_share: Decimal,
}

#[derive(Clone)]
pub struct StatsService {
    currencies: CurrencyTable,
}

impl StatsService {
    pub fn new(currencies: CurrencyTable) -> Self {
        Self { currencies }
    }

    /// Profession matching is a substring test against the vacancy title.
    /// Every year between the earliest and latest publication is reported,
    /// with zeroes for years that have no vacancies.
    pub fn build(&self, records: &[SalaryRecord], profession: &str) -> Result<Report> {
        if records.is_empty() {
            return Err(Error::HeaderOnlySource);
        }
        let total = records.len();

        let first_year = records.iter().map(|r| r.published_at.year()).min().unwrap_or(0);
        let last_year = records.iter().map(|r| r.published_at.year()).max().unwrap_or(0);

        let mut salary_sums: BTreeMap<i32, (Decimal, usize)> = BTreeMap::new();
        let mut count_by_year: BTreeMap<i32, usize> = BTreeMap::new();
        let mut profession_sums: BTreeMap<i32, (Decimal, usize)> = BTreeMap::new();
        let mut profession_count_by_year: BTreeMap<i32, usize> = BTreeMap::new();
        for year in first_year..=last_year {
            salary_sums.insert(year, (Decimal::ZERO, 0));
            count_by_year.insert(year, 0);
            profession_sums.insert(year, (Decimal::ZERO, 0));
            profession_count_by_year.insert(year, 0);
        }

        let mut city_sums: BTreeMap<&str, (Decimal, usize)> = BTreeMap::new();
        for record in records {
            let year = record.published_at.year();
            let rub = record.rub_mean(&self.currencies);
            accumulate(&mut salary_sums, year, rub);
            *count_by_year.entry(year).or_default() += 1;
            if record.name.contains(profession) {
                accumulate(&mut profession_sums, year, rub);
                *profession_count_by_year.entry(year).or_default() += 1;
            }
            accumulate(&mut city_sums, record.area_name.as_str(), rub);
        }

        // Cities above 1% of all vacancies, richest first.
        let mut salary_by_city: Vec<(String, i64)> = city_sums
            .iter()
            .filter(|(_, (_, count))| {
                Decimal::from(*count) / Decimal::from(total) > CITY_SHARE_THRESHOLD
            })
            .map(|(city, (sum, count))| (city.to_string(), truncated_mean(*sum, *count)))
            .collect();
        salary_by_city.sort_by(|a, b| b.1.cmp(&a.1));
        salary_by_city.truncate(TOP_CITIES);

        // Vacancy shares, rounded first, then thresholded.
        let mut share_by_city: Vec<(String, Decimal)> = city_sums
            .iter()
            .map(|(city, (_, count))| {
                let share = (Decimal::from(*count) / Decimal::from(total)).round_dp(4);
                (city.to_string(), share)
            })
            .filter(|(_, share)| *share >= CITY_SHARE_THRESHOLD)
            .collect();
        share_by_city.sort_by(|a, b| b.1.cmp(&a.1));
        share_by_city.truncate(TOP_CITIES);
        let listed: Decimal = share_by_city.iter().map(|(_, share)| *share).sum();
        let others_share = Decimal::ONE - listed;

        info!(
            records = total,
            years = last_year - first_year + 1,
            cities = share_by_city.len(),
            "statistics built"
        );

        Ok(Report {
            profession: profession.to_string(),
            salary_by_year: means(&salary_sums),
            count_by_year,
            profession_salary_by_year: means(&profession_sums),
            profession_count_by_year,
            salary_by_city,
            share_by_city,
            others_share,
        })
    }
}

fn accumulate<K: Ord>(sums: &mut BTreeMap<K, (Decimal, usize)>, key: K, value: Decimal) {
    let entry = sums.entry(key).or_insert((Decimal::ZERO, 0));
    entry.0 += value;
    entry.1 += 1;
}

fn means(sums: &BTreeMap<i32, (Decimal, usize)>) -> BTreeMap<i32, i64> {
    sums.iter()
        .map(|(&year, &(sum, count))| (year, truncated_mean(sum, count)))
        .collect()
}

fn truncated_mean(sum: Decimal, count: usize) -> i64 {
    if count == 0 {
        return 0;
    }
    (sum / Decimal::from(count)).trunc().to_i64().unwrap_or(0)
}
