use std::collections::HashSet;

use tracing::info;

use crate::dto::table_query::FilterCondition;
use crate::error::{Error, Result};
use crate::services::format_service::{parse_salary_display, FormattedRow};

#[derive(Clone, Default)]
pub struct FilterService;

impl FilterService {
    pub fn new() -> Self {
        Self
    }

    pub fn matches(&self, row: &FormattedRow, condition: &FilterCondition) -> Result<bool> {
        match condition {
            FilterCondition::Salary(amount) => {
                let salary = parse_salary_display(&row.salary)?;
                Ok(salary.from <= *amount && *amount <= salary.to)
            }
            FilterCondition::CurrencyName(name) => {
                let salary = parse_salary_display(&row.salary)?;
                Ok(salary.currency_name == *name)
            }
            FilterCondition::Skills(required) => {
                let lines: HashSet<&str> = row.key_skills.split('\n').collect();
                Ok(required.iter().all(|skill| lines.contains(skill.as_str())))
            }
            FilterCondition::PublishedOn(date) => {
                Ok(row.published_at.format("%d.%m.%Y").to_string() == *date)
            }
            FilterCondition::FieldEquals(field, value) => {
                Ok(row.get(*field).is_some_and(|actual| actual == value))
            }
        }
    }

    /// Keeps the rows satisfying the condition. An empty result is a hard
    /// failure so callers can report "nothing found" distinctly.
    pub fn apply(
        &self,
        rows: Vec<FormattedRow>,
        condition: Option<&FilterCondition>,
    ) -> Result<Vec<FormattedRow>> {
        let total = rows.len();
        let kept = match condition {
            None => rows,
            Some(condition) => {
                let mut kept = Vec::with_capacity(rows.len());
                for row in rows {
                    if self.matches(&row, condition)? {
                        kept.push(row);
                    }
                }
                kept
            }
        };
        if kept.is_empty() {
            return Err(Error::NoRowsMatched);
        }
        info!(total, kept = kept.len(), "filter applied");
        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn row(skills: &str, salary: &str) -> FormattedRow {
        FormattedRow {
            name: "Программист".to_string(),
            description: "Разработка".to_string(),
            key_skills: skills.to_string(),
            experience: "Нет опыта".to_string(),
            premium: "Нет".to_string(),
            employer_name: "Контур".to_string(),
            salary: salary.to_string(),
            area_name: "Екатеринбург".to_string(),
            published_at: DateTime::parse_from_str("2022-07-05T18:19:30+0300", "%Y-%m-%dT%H:%M:%S%z")
                .unwrap(),
        }
    }

    const SALARY: &str = "10 - 20 (Рубли) (С вычетом налогов)";

    #[test]
    fn salary_filter_is_inclusive_on_both_bounds() {
        let service = FilterService::new();
        let row = row("Python", SALARY);
        for (amount, expected) in [(9, false), (10, true), (15, true), (20, true), (21, false)] {
            let condition = FilterCondition::Salary(amount);
            assert_eq!(service.matches(&row, &condition).unwrap(), expected);
        }
    }

    #[test]
    fn skills_filter_requires_every_skill_as_an_exact_line() {
        let service = FilterService::new();
        let row = row("Python\nSQL\nGit", SALARY);
        let ok = FilterCondition::Skills(vec!["Python".to_string(), "Git".to_string()]);
        let missing = FilterCondition::Skills(vec!["Python".to_string(), "Java".to_string()]);
        let substring = FilterCondition::Skills(vec!["Py".to_string()]);
        assert!(service.matches(&row, &ok).unwrap());
        assert!(!service.matches(&row, &missing).unwrap());
        assert!(!service.matches(&row, &substring).unwrap());
    }

    #[test]
    fn date_filter_compares_the_reformatted_day() {
        let service = FilterService::new();
        let row = row("Python", SALARY);
        let hit = FilterCondition::PublishedOn("05.07.2022".to_string());
        let miss = FilterCondition::PublishedOn("06.07.2022".to_string());
        assert!(service.matches(&row, &hit).unwrap());
        assert!(!service.matches(&row, &miss).unwrap());
    }

    #[test]
    fn currency_filter_matches_the_full_display_name() {
        let service = FilterService::new();
        let row = row("Python", "10 - 20 (Белорусские рубли) (С вычетом налогов)");
        let hit = FilterCondition::CurrencyName("Белорусские рубли".to_string());
        let miss = FilterCondition::CurrencyName("Рубли".to_string());
        assert!(service.matches(&row, &hit).unwrap());
        assert!(!service.matches(&row, &miss).unwrap());
    }

    #[test]
    fn apply_returns_a_matching_subset() {
        let service = FilterService::new();
        let rows = vec![
            row("Python", SALARY),
            row("Java", SALARY),
            row("Python\nGit", SALARY),
        ];
        let condition = FilterCondition::Skills(vec!["Python".to_string()]);
        let kept = service.apply(rows, Some(&condition)).unwrap();
        assert_eq!(kept.len(), 2);
        for row in &kept {
            assert!(service.matches(row, &condition).unwrap());
        }
    }

    #[test]
    fn zero_matches_is_a_distinct_failure() {
        let service = FilterService::new();
        let rows = vec![row("Python", SALARY)];
        let condition = FilterCondition::FieldEquals(
            crate::models::field::Field::Name,
            "Аналитик".to_string(),
        );
        assert!(matches!(
            service.apply(rows, Some(&condition)),
            Err(Error::NoRowsMatched)
        ));
    }
}
