use serde::{Deserialize, Serialize};

/// Canonical vacancy columns. Localized labels are what the user types in
/// filter/sort/column parameters; canonical names are the CSV header names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Name,
    Description,
    KeySkills,
    Experience,
    Premium,
    EmployerName,
    Salary,
    SalaryTo,
    SalaryGross,
    SalaryCurrency,
    AreaName,
    PublishedAt,
}

/// Columns of the rendered table, in display order. The three upper-bound /
/// gross / currency-code columns collapse into the composite salary column.
pub const DISPLAY_FIELDS: [Field; 9] = [
    Field::Name,
    Field::Description,
    Field::KeySkills,
    Field::Experience,
    Field::Premium,
    Field::EmployerName,
    Field::Salary,
    Field::AreaName,
    Field::PublishedAt,
];

impl Field {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Название" => Some(Field::Name),
            "Описание" => Some(Field::Description),
            "Навыки" => Some(Field::KeySkills),
            "Опыт работы" => Some(Field::Experience),
            "Премиум-вакансия" => Some(Field::Premium),
            "Компания" => Some(Field::EmployerName),
            "Оклад" => Some(Field::Salary),
            "Верхняя граница вилки оклада" => Some(Field::SalaryTo),
            "Оклад указан до вычета налогов" => Some(Field::SalaryGross),
            "Идентификатор валюты оклада" => Some(Field::SalaryCurrency),
            "Название региона" => Some(Field::AreaName),
            "Дата публикации вакансии" => Some(Field::PublishedAt),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Название",
            Field::Description => "Описание",
            Field::KeySkills => "Навыки",
            Field::Experience => "Опыт работы",
            Field::Premium => "Премиум-вакансия",
            Field::EmployerName => "Компания",
            Field::Salary => "Оклад",
            Field::SalaryTo => "Верхняя граница вилки оклада",
            Field::SalaryGross => "Оклад указан до вычета налогов",
            Field::SalaryCurrency => "Идентификатор валюты оклада",
            Field::AreaName => "Название региона",
            Field::PublishedAt => "Дата публикации вакансии",
        }
    }

    /// CSV header name of the column.
    pub fn canonical(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Description => "description",
            Field::KeySkills => "key_skills",
            Field::Experience => "experience_id",
            Field::Premium => "premium",
            Field::EmployerName => "employer_name",
            Field::Salary => "salary_from",
            Field::SalaryTo => "salary_to",
            Field::SalaryGross => "salary_gross",
            Field::SalaryCurrency => "salary_currency",
            Field::AreaName => "area_name",
            Field::PublishedAt => "published_at",
        }
    }

    pub fn is_displayed(&self) -> bool {
        DISPLAY_FIELDS.contains(self)
    }

    /// The collapsed salary columns cannot be filtered on directly, except the
    /// currency identifier which has a dedicated predicate over the composite.
    pub fn is_filterable(&self) -> bool {
        self.is_displayed() || *self == Field::SalaryCurrency
    }

    pub fn is_sortable(&self) -> bool {
        self.is_displayed()
    }
}
