use std::fs;
use std::io::{self, Write};

use clap::{Parser, Subcommand};
use tabled::builder::Builder;
use tabled::settings::{object::Segment, Alignment, Modify, Style, Width};
use tracing::info;
use vacancy_report::config::{get_config, init_config};
use vacancy_report::dto::table_query::TableQuery;
use vacancy_report::services::export_service::ExportService;
use vacancy_report::services::table_service::DisplayTable;
use vacancy_report::AppState;

#[derive(Parser, Debug)]
#[command(name = "vacancy-report", version, about = "HH vacancy tables and salary reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a filtered, sorted, paginated vacancy table
    Table,
    /// Print salary statistics and write the XLSX report
    Report,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;

    let cli = Cli::parse();
    let state = AppState::new();
    match cli.command {
        Commands::Table => run_table(&state),
        Commands::Report => run_report(&state),
    }
}

fn run_table(state: &AppState) -> anyhow::Result<()> {
    let file_name = prompt("Введите название файла: ")?;
    let filter_raw = prompt("Введите параметр фильтрации: ")?;
    let sort_raw = prompt("Введите параметр сортировки: ")?;
    let direction_raw = prompt("Обратный порядок сортировки (Да / Нет): ")?;
    let range_raw = prompt("Введите диапазон вывода: ")?;
    let columns_raw = prompt("Введите требуемые столбцы: ")?;

    // Parameters are validated before the file is touched.
    let query = TableQuery::parse(&filter_raw, &sort_raw, &direction_raw, &range_raw, &columns_raw)?;

    let vacancies = state.dataset_service.load_from_path(&file_name)?;
    let table = state.table_service.assemble(&vacancies, &query)?;
    print_table(&table);
    Ok(())
}

fn run_report(state: &AppState) -> anyhow::Result<()> {
    let file_name = prompt("Введите название файла: ")?;
    let profession = prompt("Введите название профессии: ")?;

    let records = state.dataset_service.load_salary_records_from_path(&file_name)?;
    let report = state.stats_service.build(&records, &profession)?;

    println!("Динамика уровня зарплат по годам: {:?}", report.salary_by_year);
    println!(
        "Динамика количества вакансий по годам: {:?}",
        report.count_by_year
    );
    println!(
        "Динамика уровня зарплат по годам для выбранной профессии: {:?}",
        report.profession_salary_by_year
    );
    println!(
        "Динамика количества вакансий по годам для выбранной профессии: {:?}",
        report.profession_count_by_year
    );
    println!(
        "Уровень зарплат по городам (в порядке убывания): {:?}",
        report.salary_by_city
    );
    println!(
        "Доля вакансий по городам (в порядке убывания): {:?}",
        report.share_by_city
    );

    let buffer = ExportService::generate_report_xlsx(&report)?;
    let output_path = &get_config().report_output_path;
    fs::write(output_path, buffer)?;
    info!(path = %output_path, "report written");
    Ok(())
}

fn print_table(table: &DisplayTable) {
    let mut builder = Builder::default();
    builder.push_record(table.headers.clone());
    for row in &table.rows {
        builder.push_record(row.clone());
    }
    let mut rendered = builder.build();
    rendered.with(Style::ascii());
    rendered.with(
        Modify::new(Segment::all())
            .with(Width::wrap(get_config().table_max_col_width))
            .with(Alignment::left()),
    );
    println!("{rendered}");
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
