//! Author model and derived properties

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{format_medium_date, format_ymd};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub author_id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Display name, `family_name, first_name`. Empty when either part is
    /// blank so a half-filled record never renders a dangling comma.
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            return String::new();
        }
        format!("{}, {}", self.family_name, self.first_name)
    }

    /// Lifespan string, `(Oct 4, 1983 - Jan 2, 1990)`. A missing birth date
    /// renders as `unknown`; when both dates are absent the whole string is
    /// empty.
    pub fn lifespan(&self) -> String {
        let born = match self.date_of_birth {
            Some(date) => format_medium_date(date),
            None => "unknown".to_string(),
        };
        let died = self
            .date_of_death
            .map(format_medium_date)
            .unwrap_or_default();
        if born == "unknown" && died.is_empty() {
            return String::new();
        }
        format!("({born} - {died})")
    }

    /// Canonical URL path keyed by identity.
    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.author_id)
    }

    pub fn date_of_birth_ymd(&self) -> String {
        self.date_of_birth.map(format_ymd).unwrap_or_default()
    }

    pub fn date_of_death_ymd(&self) -> String {
        self.date_of_death.map(format_ymd).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(first: &str, family: &str) -> Author {
        Author {
            author_id: Uuid::new_v4(),
            first_name: first.to_string(),
            family_name: family.to_string(),
            date_of_birth: None,
            date_of_death: None,
        }
    }

    #[test]
    fn name_is_family_comma_first() {
        assert_eq!(author("Patrick", "Rothfuss").name(), "Rothfuss, Patrick");
    }

    #[test]
    fn name_is_empty_when_a_part_is_blank() {
        assert_eq!(author("", "Rothfuss").name(), "");
        assert_eq!(author("Patrick", "").name(), "");
    }

    #[test]
    fn lifespan_is_empty_without_dates() {
        assert_eq!(author("Patrick", "Rothfuss").lifespan(), "");
    }

    #[test]
    fn lifespan_with_birth_only_leaves_death_blank() {
        let mut a = author("Patrick", "Rothfuss");
        a.date_of_birth = NaiveDate::from_ymd_opt(1973, 6, 6);
        assert_eq!(a.lifespan(), "(Jun 6, 1973 - )");
    }

    #[test]
    fn lifespan_with_death_only_marks_birth_unknown() {
        let mut a = author("Unknown", "Scribe");
        a.date_of_death = NaiveDate::from_ymd_opt(1820, 12, 1);
        assert_eq!(a.lifespan(), "(unknown - Dec 1, 1820)");
    }

    #[test]
    fn url_is_keyed_by_identity() {
        let a = author("Patrick", "Rothfuss");
        assert_eq!(a.url(), format!("/catalog/author/{}", a.author_id));
    }
}
