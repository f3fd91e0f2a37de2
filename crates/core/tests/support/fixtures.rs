//! Member fixtures

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use congregate_domain::{ChurchFunction, Gender, Member, MemberDraft, Region};

pub fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).single().unwrap()
}

pub fn member(id: &str, name: &str, gender: Gender, region: Region) -> Member {
    Member {
        id: id.to_string(),
        full_name: name.to_string(),
        birth_date: NaiveDate::from_ymd_opt(1990, 5, 20).unwrap(),
        gender,
        region,
        parish: region.parishes().first().copied().unwrap_or_default().to_string(),
        function: ChurchFunction::RegularMember,
        baptismal_state: None,
        society: None,
        phone: None,
        email: None,
        address: None,
        created_at: created_at(),
        updated_at: None,
    }
}

/// Ana (female, ESTE) and Bruno (male, SUL).
pub fn ana_and_bruno() -> Vec<Member> {
    vec![
        member("m-ana", "Ana", Gender::Female, Region::East),
        member("m-bruno", "Bruno", Gender::Male, Region::South),
    ]
}

pub fn valid_draft(name: &str) -> MemberDraft {
    MemberDraft {
        full_name: Some(name.to_string()),
        birth_date: NaiveDate::from_ymd_opt(1985, 2, 10),
        gender: Some(Gender::Female),
        region: Some(Region::West),
        parish: Some("Manica".to_string()),
        function: Some(ChurchFunction::Monitor),
        ..MemberDraft::default()
    }
}
