use std::io::Write;

use tempfile::NamedTempFile;
use vacancy_report::dto::table_query::TableQuery;
use vacancy_report::error::Error;
use vacancy_report::AppState;

const FULL_HEADER: &str = "name,description,key_skills,experience_id,premium,employer_name,salary_from,salary_to,salary_gross,salary_currency,area_name,published_at";

fn csv_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write fixture");
    file
}

/// Two-vacancy fixture: a rouble fork (10-20, net) and a dollar fork
/// (100-200, gross), preceded by a UTF-8 BOM as in real HH exports.
fn two_vacancies() -> NamedTempFile {
    let content = format!(
        "\u{feff}{FULL_HEADER}\n\
         Программист,Разработка,\"Python\nSQL\nGit\",between1And3,False,Контур,10,20,False,RUR,Екатеринбург,2022-07-05T18:19:30+0300\n\
         Аналитик,Анализ,Excel,noExperience,True,Яндекс,100,200,True,USD,Москва,2022-07-06T10:00:00+0300\n"
    );
    csv_file(&content)
}

fn query(filter: &str, sort: &str, direction: &str, range: &str, columns: &str) -> TableQuery {
    TableQuery::parse(filter, sort, direction, range, columns).expect("valid query")
}

#[test]
fn salary_filter_keeps_only_the_matching_fork() {
    let state = AppState::new();
    let file = two_vacancies();
    let vacancies = state.dataset_service.load_from_path(file.path()).unwrap();

    let table = state
        .table_service
        .assemble(&vacancies, &query("Оклад: 15", "", "", "", ""))
        .unwrap();

    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0][0], "1");
    assert_eq!(table.rows[0][1], "Программист");
    assert_eq!(table.rows[0][7], "10 - 20 (Рубли) (С вычетом налогов)");
}

#[test]
fn salary_sort_orders_by_rouble_converted_mean() {
    let state = AppState::new();
    let file = two_vacancies();
    let vacancies = state.dataset_service.load_from_path(file.path()).unwrap();

    let ascending = state
        .table_service
        .assemble(&vacancies, &query("", "Оклад", "Нет", "", ""))
        .unwrap();
    let names: Vec<&str> = ascending.rows.iter().map(|r| r[1].as_str()).collect();
    // USD fork converts to 9099 roubles, far above the 15-rouble RUR fork.
    assert_eq!(names, vec!["Программист", "Аналитик"]);

    let descending = state
        .table_service
        .assemble(&vacancies, &query("", "Оклад", "Да", "", ""))
        .unwrap();
    let names: Vec<&str> = descending.rows.iter().map(|r| r[1].as_str()).collect();
    assert_eq!(names, vec!["Аналитик", "Программист"]);
}

#[test]
fn skills_filter_needs_every_listed_skill() {
    let state = AppState::new();
    let file = two_vacancies();
    let vacancies = state.dataset_service.load_from_path(file.path()).unwrap();

    let hit = state
        .table_service
        .assemble(&vacancies, &query("Навыки: Python, Git", "", "", "", ""))
        .unwrap();
    assert_eq!(hit.rows.len(), 1);
    assert_eq!(hit.rows[0][1], "Программист");

    let miss = state
        .table_service
        .assemble(&vacancies, &query("Навыки: Python, Java", "", "", "", ""));
    assert!(matches!(miss, Err(Error::NoRowsMatched)));
}

#[test]
fn currency_and_date_filters_work_end_to_end() {
    let state = AppState::new();
    let file = two_vacancies();
    let vacancies = state.dataset_service.load_from_path(file.path()).unwrap();

    let dollars = state
        .table_service
        .assemble(
            &vacancies,
            &query("Идентификатор валюты оклада: Доллары", "", "", "", ""),
        )
        .unwrap();
    assert_eq!(dollars.rows.len(), 1);
    assert_eq!(dollars.rows[0][1], "Аналитик");

    let by_day = state
        .table_service
        .assemble(
            &vacancies,
            &query("Дата публикации вакансии: 05.07.2022", "", "", "", ""),
        )
        .unwrap();
    assert_eq!(by_day.rows.len(), 1);
    assert_eq!(by_day.rows[0][1], "Программист");
    assert_eq!(by_day.rows[0][9], "05.07.2022");
}

#[test]
fn column_selection_prepends_the_ordinal_column() {
    let state = AppState::new();
    let file = two_vacancies();
    let vacancies = state.dataset_service.load_from_path(file.path()).unwrap();

    let table = state
        .table_service
        .assemble(&vacancies, &query("", "", "", "", "Название, Оклад"))
        .unwrap();
    assert_eq!(table.headers, vec!["№", "Название", "Оклад"]);
    assert_eq!(table.rows[0], vec!["1", "Программист", "10 - 20 (Рубли) (С вычетом налогов)"]);
    assert_eq!(table.rows[1][0], "2");
}

#[test]
fn page_slice_keeps_absolute_ordinals_and_tolerates_overshoot() {
    let state = AppState::new();
    let file = two_vacancies();
    let vacancies = state.dataset_service.load_from_path(file.path()).unwrap();

    let table = state
        .table_service
        .assemble(&vacancies, &query("", "", "", "2 5", ""))
        .unwrap();
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0][0], "2");
    assert_eq!(table.rows[0][1], "Аналитик");
}

#[test]
fn overlong_fields_are_truncated_with_a_marker() {
    let state = AppState::new();
    let long_description = "о".repeat(150);
    let content = format!(
        "{FULL_HEADER}\n\
         Программист,{long_description},Python,noExperience,False,Контур,10,20,False,RUR,Москва,2022-07-05T18:19:30+0300\n"
    );
    let file = csv_file(&content);
    let vacancies = state.dataset_service.load_from_path(file.path()).unwrap();

    let table = state
        .table_service
        .assemble(&vacancies, &query("", "", "", "", ""))
        .unwrap();
    let cell = &table.rows[0][2];
    assert_eq!(cell.chars().count(), 103);
    assert!(cell.ends_with("..."));
}

#[test]
fn empty_and_header_only_sources_fail_distinctly() {
    let state = AppState::new();

    let empty = csv_file("");
    assert!(matches!(
        state.dataset_service.load_from_path(empty.path()),
        Err(Error::EmptySource)
    ));

    let header_only = csv_file(&format!("{FULL_HEADER}\n"));
    assert!(matches!(
        state.dataset_service.load_from_path(header_only.path()),
        Err(Error::HeaderOnlySource)
    ));
}

#[test]
fn malformed_rows_are_dropped_but_good_rows_survive() {
    let state = AppState::new();
    let content = format!(
        "{FULL_HEADER}\n\
         Программист,,Python,noExperience,False,Контур,10,20,False,RUR,Москва,2022-07-05T18:19:30+0300\n\
         Только,три,колонки\n\
         Аналитик,Анализ,Excel,noExperience,True,Яндекс,100,200,True,USD,Москва,2022-07-06T10:00:00+0300\n"
    );
    let file = csv_file(&content);
    let vacancies = state.dataset_service.load_from_path(file.path()).unwrap();
    assert_eq!(vacancies.len(), 1);
    assert_eq!(vacancies[0].name, "Аналитик");
}

#[test]
fn markup_and_booleans_are_normalized_into_the_table() {
    let state = AppState::new();
    let content = format!(
        "{FULL_HEADER}\n\
         Программист,<p>Опыт  работы   с  Linux</p>,Python,noExperience,True,Контур,10,20,False,RUR,Москва,2022-07-05T18:19:30+0300\n"
    );
    let file = csv_file(&content);
    let vacancies = state.dataset_service.load_from_path(file.path()).unwrap();

    let table = state
        .table_service
        .assemble(&vacancies, &query("", "", "", "", ""))
        .unwrap();
    assert_eq!(table.rows[0][2], "Опыт работы с Linux");
    assert_eq!(table.rows[0][5], "Да");
}
