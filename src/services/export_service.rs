use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::*;

use crate::error::Result;
use crate::services::stats_service::Report;

pub struct ExportService;

impl ExportService {
    /// Generate the two-sheet statistics workbook from a built report.
    pub fn generate_report_xlsx(report: &Report) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();

        let header_format = Format::new().set_bold().set_border(FormatBorder::Thin);
        let cell_format = Format::new().set_border(FormatBorder::Thin);
        let percent_format = Format::new()
            .set_border(FormatBorder::Thin)
            .set_num_format("0.00%");

        // ── Sheet 1: year dynamics ──
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Статистика по годам")?;

        let year_headers = [
            "Год".to_string(),
            "Средняя зарплата".to_string(),
            format!("Средняя зарплата - {}", report.profession),
            "Количество вакансий".to_string(),
            format!("Количество вакансий - {}", report.profession),
        ];
        let mut widths = ColumnWidths::new(year_headers.len());
        for (col, head) in year_headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, head, &header_format)?;
            widths.observe(col, head);
        }

        for (i, (year, salary)) in report.salary_by_year.iter().enumerate() {
            let row = (i + 1) as u32;
            let cells = [
                *year as f64,
                *salary as f64,
                report.profession_salary_by_year[year] as f64,
                report.count_by_year[year] as f64,
                report.profession_count_by_year[year] as f64,
            ];
            for (col, value) in cells.iter().enumerate() {
                worksheet.write_number_with_format(row, col as u16, *value, &cell_format)?;
                widths.observe_number(col, *value);
            }
        }
        widths.apply(worksheet)?;

        // ── Sheet 2: city breakdowns, two blocks with a spacer column ──
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Статистика по городам")?;

        let mut widths = ColumnWidths::new(5);
        for (col, head) in [(0, "Город"), (1, "Уровень зарплат"), (3, "Город"), (4, "Доля вакансий")] {
            worksheet.write_string_with_format(0, col as u16, head, &header_format)?;
            widths.observe(col, head);
        }

        for (i, (city, salary)) in report.salary_by_city.iter().enumerate() {
            let row = (i + 1) as u32;
            worksheet.write_string_with_format(row, 0, city, &cell_format)?;
            worksheet.write_number_with_format(row, 1, *salary as f64, &cell_format)?;
            widths.observe(0, city);
            widths.observe_number(1, *salary as f64);
        }

        for (i, (city, share)) in report.share_by_city.iter().enumerate() {
            let row = (i + 1) as u32;
            let share = share.to_f64().unwrap_or(0.0);
            worksheet.write_string_with_format(row, 3, city, &cell_format)?;
            worksheet.write_number_with_format(row, 4, share, &percent_format)?;
            widths.observe(3, city);
            widths.observe_number(4, share);
        }
        widths.apply(worksheet)?;

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }
}

/// Tracks the longest cell text per column so columns can be sized to fit.
struct ColumnWidths {
    max_chars: Vec<usize>,
}

impl ColumnWidths {
    fn new(columns: usize) -> Self {
        Self {
            max_chars: vec![0; columns],
        }
    }

    fn observe(&mut self, col: usize, text: &str) {
        let len = text.chars().count();
        if len > self.max_chars[col] {
            self.max_chars[col] = len;
        }
    }

    fn observe_number(&mut self, col: usize, value: f64) {
        self.observe(col, &value.to_string());
    }

    fn apply(&self, worksheet: &mut Worksheet) -> Result<()> {
        for (col, chars) in self.max_chars.iter().enumerate() {
            if *chars > 0 {
                worksheet.set_column_width(col as u16, (*chars + 2) as f64)?;
            }
        }
        Ok(())
    }
}
