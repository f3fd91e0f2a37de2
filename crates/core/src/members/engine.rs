//! Filter, sort and aggregate engine
//!
//! Pure functions over an in-memory member collection. Nothing here performs
//! I/O or reads the clock; callers pass `today`/`now` explicitly.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use congregate_domain::constants::{GROWTH_WINDOW_DAYS, UNSPECIFIED_LABEL};
use congregate_domain::utils::dates::years_before;
use congregate_domain::{
    AgeBracket, FilterCriteria, Gender, GenderBreakdown, GrowthTrend, Member, MemberStatistics,
    Share, SortKey, StatisticsScope,
};
use serde::Serialize;

/// Members satisfying every active criterion, in input order.
pub fn filter(members: &[Member], criteria: &FilterCriteria) -> Vec<Member> {
    if criteria.is_empty() {
        return members.to_vec();
    }
    members.iter().filter(|m| criteria.matches(m)).cloned().collect()
}

/// Stable in-place sort.
pub fn sort(members: &mut [Member], key: SortKey) {
    members.sort_by(|a, b| key.compare(a, b));
}

/// Bracket for a birth date relative to `today`.
///
/// Boundaries are calendar anniversaries: someone born exactly 18 years
/// before `today` is still `UpTo18`; one day earlier is `From19To30`.
pub fn age_bracket(birth_date: NaiveDate, today: NaiveDate) -> AgeBracket {
    if birth_date > today {
        return AgeBracket::Unknown;
    }
    if birth_date >= years_before(today, 18) {
        AgeBracket::UpTo18
    } else if birth_date >= years_before(today, 30) {
        AgeBracket::From19To30
    } else if birth_date >= years_before(today, 45) {
        AgeBracket::From31To45
    } else if birth_date >= years_before(today, 60) {
        AgeBracket::From46To60
    } else {
        AgeBracket::Over60
    }
}

/// Registrations in `(now - 30d, now]` against `(now - 60d, now - 30d]`.
pub fn growth(members: &[Member], now: DateTime<Utc>) -> GrowthTrend {
    let window = Duration::days(GROWTH_WINDOW_DAYS);
    let current_start = now - window;
    let previous_start = current_start - window;

    let mut current = 0;
    let mut previous = 0;
    for member in members {
        let created = member.created_at;
        if created > current_start && created <= now {
            current += 1;
        } else if created > previous_start && created <= current_start {
            previous += 1;
        }
    }
    GrowthTrend::new(current, previous)
}

fn bump(map: &mut BTreeMap<String, usize>, key: &str) {
    *map.entry(key.to_string()).or_insert(0) += 1;
}

fn label_or_unspecified(value: Option<&'static str>) -> &'static str {
    value.unwrap_or(UNSPECIFIED_LABEL)
}

/// Statistics record over `members`.
pub fn aggregate(members: &[Member], now: DateTime<Utc>) -> MemberStatistics {
    let today = now.date_naive();
    let total = members.len();
    let mut stats = MemberStatistics { total, ..MemberStatistics::default() };

    let mut male = 0;
    let mut female = 0;
    for member in members {
        match member.gender {
            Gender::Male => male += 1,
            Gender::Female => female += 1,
        }
        bump(&mut stats.by_region, member.region.label());

        let parish = member.parish.trim();
        bump(&mut stats.by_parish, if parish.is_empty() { UNSPECIFIED_LABEL } else { parish });

        bump(&mut stats.by_function, member.function.label());
        bump(&mut stats.by_society, label_or_unspecified(member.society.map(|s| s.label())));
        bump(
            &mut stats.by_baptismal_state,
            label_or_unspecified(member.baptismal_state.map(|s| s.label())),
        );

        *stats.age_brackets.entry(age_bracket(member.birth_date, today)).or_insert(0) += 1;
    }

    stats.by_gender =
        GenderBreakdown { male: Share::of(male, total), female: Share::of(female, total) };
    stats.growth = growth(members, now);
    stats
}

/// One page of a view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually served
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Slice `view` into 1-based pages. Page 0 is treated as page 1; a page
/// past the end is empty.
pub fn paginate<T: Clone>(view: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let page = page.max(1);
    let total_items = view.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let start = (page - 1).saturating_mul(page_size);
    let items = if start >= total_items {
        Vec::new()
    } else {
        view[start..(start + page_size).min(total_items)].to_vec()
    };
    Page { items, page, page_size, total_items, total_pages }
}

/// Visible subset plus its statistics
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MemberView {
    pub members: Vec<Member>,
    pub statistics: MemberStatistics,
}

/// Filter, sort and aggregate in one pass.
///
/// `scope` decides whether statistics describe the filtered view or the
/// whole collection.
pub fn build_view(
    all: &[Member],
    criteria: &FilterCriteria,
    sort_key: SortKey,
    scope: StatisticsScope,
    now: DateTime<Utc>,
) -> MemberView {
    let mut members = filter(all, criteria);
    sort(&mut members, sort_key);
    let statistics = match scope {
        StatisticsScope::Filtered => aggregate(&members, now),
        StatisticsScope::Full => aggregate(all, now),
    };
    MemberView { members, statistics }
}
