//! Ephemeral view criteria for the member list

use serde::{Deserialize, Serialize};

use super::member::{Gender, Member, Region, Society};
use crate::utils::text::{contains_ignore_case, name_sort_key};

/// Conjunctive filter over the member collection.
///
/// Every `None` criterion is inactive. A blank name query is also inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub name_query: Option<String>,
    #[serde(default)]
    pub region: Option<Region>,
    #[serde(default)]
    pub parish: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub society: Option<Society>,
}

impl FilterCriteria {
    pub fn with_name(mut self, query: impl Into<String>) -> Self {
        self.name_query = Some(query.into());
        self
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    pub fn with_parish(mut self, parish: impl Into<String>) -> Self {
        self.parish = Some(parish.into());
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_society(mut self, society: Society) -> Self {
        self.society = Some(society);
        self
    }

    /// True when no criterion would exclude anything.
    pub fn is_empty(&self) -> bool {
        self.active_name_query().is_none()
            && self.region.is_none()
            && self.parish.is_none()
            && self.gender.is_none()
            && self.society.is_none()
    }

    fn active_name_query(&self) -> Option<&str> {
        self.name_query.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// Whether `member` satisfies every active criterion.
    pub fn matches(&self, member: &Member) -> bool {
        if let Some(query) = self.active_name_query() {
            if !contains_ignore_case(&member.full_name, query) {
                return false;
            }
        }
        if self.region.is_some_and(|r| r != member.region) {
            return false;
        }
        if self.parish.as_deref().is_some_and(|p| p != member.parish) {
            return false;
        }
        if self.gender.is_some_and(|g| g != member.gender) {
            return false;
        }
        if self.society.is_some() && self.society != member.society {
            return false;
        }
        true
    }
}

/// Ordering applied to the visible list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Name,
    BirthDate,
}

impl SortKey {
    /// Total order used by the engine. Stable sorts over this comparator
    /// keep insertion order only for fully identical records.
    pub fn compare(&self, a: &Member, b: &Member) -> std::cmp::Ordering {
        let by_name = || {
            name_sort_key(&a.full_name)
                .cmp(&name_sort_key(&b.full_name))
                .then_with(|| a.full_name.cmp(&b.full_name))
                .then_with(|| a.id.cmp(&b.id))
        };
        match self {
            Self::Name => by_name(),
            Self::BirthDate => a.birth_date.cmp(&b.birth_date).then_with(by_name),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "name" | "nome" => Ok(Self::Name),
            "birth_date" | "data_nascimento" => Ok(Self::BirthDate),
            other => Err(format!("Invalid SortKey: {other}")),
        }
    }
}
