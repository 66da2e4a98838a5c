use tracing::info;

use crate::dto::table_query::{ColumnSelection, TableQuery};
use crate::error::Result;
use crate::models::field::DISPLAY_FIELDS;
use crate::models::vacancy::Vacancy;
use crate::services::filter_service::FilterService;
use crate::services::format_service::{parse_salary_display, FormatService, FormattedRow};
use crate::services::sort_service::SortService;

/// Cells longer than this are cut and marked with an ellipsis.
const CELL_CHAR_LIMIT: usize = 100;
const ELLIPSIS: &str = "...";

/// Final display rows plus the active header list, ready for an external
/// renderer (console table, spreadsheet, chart, PDF).
#[derive(Debug, Clone)]
pub struct DisplayTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Clone)]
pub struct TableService {
    format_service: FormatService,
    filter_service: FilterService,
    sort_service: SortService,
}

impl TableService {
    pub fn new(
        format_service: FormatService,
        filter_service: FilterService,
        sort_service: SortService,
    ) -> Self {
        Self {
            format_service,
            filter_service,
            sort_service,
        }
    }

    /// load → format → filter → sort → truncate → paginate → select columns.
    /// Row ordinals are assigned over the whole sorted set, before the page
    /// slice, so a page deep in the table keeps its absolute numbering.
    pub fn assemble(&self, vacancies: &[Vacancy], query: &TableQuery) -> Result<DisplayTable> {
        let rows: Vec<FormattedRow> = vacancies
            .iter()
            .map(|vacancy| self.format_service.format(vacancy))
            .collect();
        let rows = self.filter_service.apply(rows, query.filter.as_ref())?;
        let rows = self.sort_service.sort(rows, &query.sort)?;

        let mut display: Vec<Vec<String>> = Vec::with_capacity(rows.len());
        for (ordinal, row) in rows.iter().enumerate() {
            let mut cells = vec![(ordinal + 1).to_string()];
            cells.extend(
                display_cells(row)?
                    .into_iter()
                    .map(|cell| truncate_cell(cell)),
            );
            display.push(cells);
        }

        let keep = kept_column_indexes(&query.columns);
        let headers: Vec<String> = keep.iter().map(|&i| column_label(i)).collect();

        let (start, end) = query.range.resolve(display.len());
        let end = end.min(display.len());
        let start = start.min(end);
        let page = &display[start..end];

        let rows: Vec<Vec<String>> = page
            .iter()
            .map(|cells| keep.iter().map(|&i| cells[i].clone()).collect())
            .collect();
        info!(rows = rows.len(), columns = headers.len(), "table assembled");

        Ok(DisplayTable { headers, rows })
    }
}

/// The nine display cells of one row, in canonical column order. The salary
/// bounds get thousands grouping only here, at the display edge, so the
/// filter/sort parsers upstream always see plain digits.
fn display_cells(row: &FormattedRow) -> Result<Vec<String>> {
    Ok(vec![
        row.name.clone(),
        row.description.clone(),
        row.key_skills.clone(),
        row.experience.clone(),
        row.premium.clone(),
        row.employer_name.clone(),
        group_salary_thousands(&row.salary)?,
        row.area_name.clone(),
        row.published_at.format("%d.%m.%Y").to_string(),
    ])
}

/// Rewrites the two numeric tokens of the composite string with
/// space-grouped thousands, leaving the rest of the layout intact.
fn group_salary_thousands(salary: &str) -> Result<String> {
    let parsed = parse_salary_display(salary)?;
    let mut tokens: Vec<String> = salary.split_whitespace().map(str::to_string).collect();
    tokens[0] = group_thousands(parsed.from);
    tokens[2] = group_thousands(parsed.to);
    Ok(tokens.join(" "))
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn truncate_cell(cell: String) -> String {
    if cell.chars().count() <= CELL_CHAR_LIMIT {
        return cell;
    }
    let mut cut: String = cell.chars().take(CELL_CHAR_LIMIT).collect();
    cut.push_str(ELLIPSIS);
    cut
}

/// Indexes into the ordinal-prefixed cell vector. The ordinal column is
/// always kept; selected columns keep canonical table order.
fn kept_column_indexes(columns: &ColumnSelection) -> Vec<usize> {
    let mut keep = vec![0];
    match columns {
        ColumnSelection::All => keep.extend(1..=DISPLAY_FIELDS.len()),
        ColumnSelection::Selected(fields) => {
            for (i, field) in DISPLAY_FIELDS.iter().enumerate() {
                if fields.contains(field) {
                    keep.push(i + 1);
                }
            }
        }
    }
    keep
}

fn column_label(index: usize) -> String {
    if index == 0 {
        "№".to_string()
    } else {
        DISPLAY_FIELDS[index - 1].label().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_are_grouped_with_spaces() {
        assert_eq!(group_thousands(80000), "80 000");
        assert_eq!(group_thousands(1234567), "1 234 567");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(-4500), "-4 500");
    }

    #[test]
    fn salary_display_groups_both_bounds() {
        let grouped =
            group_salary_thousands("10000 - 25000 (Рубли) (С вычетом налогов)").unwrap();
        assert_eq!(grouped, "10 000 - 25 000 (Рубли) (С вычетом налогов)");
    }

    #[test]
    fn long_cells_are_cut_to_the_limit_plus_marker() {
        let long: String = "б".repeat(150);
        let cut = truncate_cell(long);
        assert_eq!(cut.chars().count(), CELL_CHAR_LIMIT + ELLIPSIS.len());
        assert!(cut.ends_with(ELLIPSIS));

        let exact: String = "a".repeat(100);
        assert_eq!(truncate_cell(exact.clone()), exact);
    }

    #[test]
    fn selected_columns_keep_canonical_order() {
        use crate::models::field::Field;
        let selection =
            ColumnSelection::Selected(vec![Field::AreaName, Field::Name, Field::Salary]);
        let keep = kept_column_indexes(&selection);
        let labels: Vec<String> = keep.iter().map(|&i| column_label(i)).collect();
        assert_eq!(labels, vec!["№", "Название", "Оклад", "Название региона"]);
    }
}
