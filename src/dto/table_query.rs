use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::field::Field;

/// Validated table parameters. All user input is checked here, before any
/// loading starts, so bad parameters never cost a file read.
#[derive(Debug, Clone)]
pub struct TableQuery {
    pub filter: Option<FilterCondition>,
    pub sort: SortSpec,
    pub range: PageRange,
    pub columns: ColumnSelection,
}

/// One filter expression, already dispatched to its field-specific predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterCondition {
    /// Integer lies within the salary fork, bounds inclusive.
    Salary(i64),
    /// Exact match on the currency display name inside the composite string.
    CurrencyName(String),
    /// Every required skill is an exact line of the skills field.
    Skills(Vec<String>),
    /// Literal `DD.MM.YYYY` publication date.
    PublishedOn(String),
    /// Exact string equality on a display field.
    FieldEquals(Field, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: Option<Field>,
    pub descending: bool,
}

/// User-facing 1-based inclusive bounds; either may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    start: Option<usize>,
    end: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelection {
    All,
    Selected(Vec<Field>),
}

impl TableQuery {
    pub fn parse(
        filter_raw: &str,
        sort_raw: &str,
        direction_raw: &str,
        range_raw: &str,
        columns_raw: &str,
    ) -> Result<Self> {
        Ok(Self {
            filter: FilterCondition::parse(filter_raw)?,
            sort: SortSpec::parse(sort_raw, direction_raw)?,
            range: PageRange::parse(range_raw)?,
            columns: ColumnSelection::parse(columns_raw)?,
        })
    }
}

impl FilterCondition {
    pub fn parse(raw: &str) -> Result<Option<Self>> {
        if raw.is_empty() {
            return Ok(None);
        }
        let (label, value) = raw
            .split_once(": ")
            .ok_or_else(|| Error::InvalidFilterSyntax(raw.to_string()))?;
        let field = Field::from_label(label)
            .filter(Field::is_filterable)
            .ok_or_else(|| Error::InvalidFilterField(label.to_string()))?;

        let condition = match field {
            Field::Salary => {
                let amount = value
                    .parse::<i64>()
                    .map_err(|_| Error::InvalidFilterSyntax(raw.to_string()))?;
                FilterCondition::Salary(amount)
            }
            Field::SalaryCurrency => FilterCondition::CurrencyName(value.to_string()),
            Field::KeySkills => {
                FilterCondition::Skills(value.split(", ").map(str::to_string).collect())
            }
            Field::PublishedAt => FilterCondition::PublishedOn(value.to_string()),
            other => FilterCondition::FieldEquals(other, value.to_string()),
        };
        Ok(Some(condition))
    }
}

impl SortSpec {
    pub fn parse(field_raw: &str, direction_raw: &str) -> Result<Self> {
        let field = if field_raw.is_empty() {
            None
        } else {
            Some(
                Field::from_label(field_raw)
                    .filter(Field::is_sortable)
                    .ok_or_else(|| Error::InvalidSortField(field_raw.to_string()))?,
            )
        };
        let descending = match direction_raw {
            "" | "Нет" => false,
            "Да" => true,
            other => return Err(Error::InvalidSortDirection(other.to_string())),
        };
        Ok(Self { field, descending })
    }
}

impl PageRange {
    pub fn parse(raw: &str) -> Result<Self> {
        let mut bounds = raw.split_whitespace().map(|token| {
            token
                .parse::<usize>()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or_else(|| Error::InvalidRange(token.to_string()))
        });
        // Tokens past the second are ignored.
        let start = bounds.next().transpose()?;
        let end = bounds.next().transpose()?;
        Ok(Self { start, end })
    }

    /// 0-based half-open slice bounds. Overshooting bounds are returned as-is;
    /// the consumer clamps at its slice.
    pub fn resolve(&self, total: usize) -> (usize, usize) {
        let start = self.start.map(|s| s - 1).unwrap_or(0);
        let end = self.end.unwrap_or(total);
        (start, end)
    }
}

impl ColumnSelection {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Ok(Self::All);
        }
        let fields = raw
            .split(", ")
            .map(|label| {
                Field::from_label(label)
                    .filter(Field::is_displayed)
                    .ok_or_else(|| Error::InvalidColumnField(label.to_string()))
            })
            .collect::<Result<Vec<Field>>>()?;
        Ok(Self::Selected(fields))
    }
}
