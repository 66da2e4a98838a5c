use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Fixed, ordered experience buckets. Variant order doubles as sort rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Experience {
    NoExperience,
    Between1And3,
    Between3And6,
    MoreThan6,
}

impl Experience {
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "noExperience" => Ok(Experience::NoExperience),
            "between1And3" => Ok(Experience::Between1And3),
            "between3And6" => Ok(Experience::Between3And6),
            "moreThan6" => Ok(Experience::MoreThan6),
            other => Err(Error::UnknownExperienceCode(other.to_string())),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Experience::NoExperience => "Нет опыта",
            Experience::Between1And3 => "От 1 года до 3 лет",
            Experience::Between3And6 => "От 3 до 6 лет",
            Experience::MoreThan6 => "Более 6 лет",
        }
    }

    pub fn from_label(label: &str) -> Result<Self> {
        match label {
            "Нет опыта" => Ok(Experience::NoExperience),
            "От 1 года до 3 лет" => Ok(Experience::Between1And3),
            "От 3 до 6 лет" => Ok(Experience::Between3And6),
            "Более 6 лет" => Ok(Experience::MoreThan6),
            other => Err(Error::UnknownExperienceCode(other.to_string())),
        }
    }

    pub fn rank(&self) -> u8 {
        *self as u8
    }
}
