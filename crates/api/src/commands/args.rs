//! Argument groups shared by several commands

use chrono::NaiveDate;
use clap::Args;
use congregate_domain::utils::dates::parse_birth_date;
use congregate_domain::{
    BaptismalState, ChurchFunction, FilterCriteria, Gender, MemberDraft, Region, Society, SortKey,
};

use crate::context::AppContext;

fn birth_date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_birth_date(raw).ok_or_else(|| format!("data inválida: {raw} (use AAAA-MM-DD)"))
}

/// Dashboard filters and ordering
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive substring of the full name
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub region: Option<Region>,
    /// Exact parish name
    #[arg(long)]
    pub parish: Option<String>,
    #[arg(long)]
    pub gender: Option<Gender>,
    #[arg(long)]
    pub society: Option<Society>,
    /// `name` or `birth-date`
    #[arg(long, default_value = "name")]
    pub sort: SortKey,
}

impl FilterArgs {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            name_query: self.name.clone(),
            region: self.region,
            parish: self.parish.clone(),
            gender: self.gender,
            society: self.society,
        }
    }

    /// Apply to the registry and load the collection.
    ///
    /// # Errors
    /// The repository error.
    pub async fn load_into(&self, ctx: &AppContext) -> congregate_domain::Result<usize> {
        ctx.registry.set_criteria(self.criteria());
        ctx.registry.set_sort_key(self.sort);
        ctx.registry.refresh().await
    }
}

/// Member form fields; all optional so the same group serves add and edit
#[derive(Args, Debug, Clone, Default)]
pub struct MemberFields {
    /// Full name
    #[arg(long = "name")]
    pub full_name: Option<String>,
    /// Birth date, AAAA-MM-DD
    #[arg(long, value_parser = birth_date_arg)]
    pub birth_date: Option<NaiveDate>,
    #[arg(long)]
    pub gender: Option<Gender>,
    #[arg(long)]
    pub region: Option<Region>,
    #[arg(long)]
    pub parish: Option<String>,
    /// Pastor, Evangelista, Monitor or "Membro Normal"
    #[arg(long)]
    pub function: Option<ChurchFunction>,
    /// Batizado or Confirmado
    #[arg(long = "state")]
    pub baptismal_state: Option<BaptismalState>,
    #[arg(long)]
    pub society: Option<Society>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
}

impl MemberFields {
    pub fn draft(&self) -> MemberDraft {
        MemberDraft {
            full_name: self.full_name.clone(),
            birth_date: self.birth_date,
            gender: self.gender,
            region: self.region,
            parish: self.parish.clone(),
            function: self.function,
            baptismal_state: self.baptismal_state,
            society: self.society,
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Probe {
        #[command(flatten)]
        filters: FilterArgs,
    }

    #[derive(Parser)]
    struct Form {
        #[command(flatten)]
        fields: MemberFields,
    }

    #[test]
    fn filters_parse_labels_case_insensitively() {
        let probe = Probe::try_parse_from([
            "probe", "--region", "este", "--gender", "feminino", "--society", "jovens", "--sort",
            "birth-date", "--name", "ana",
        ])
        .unwrap();

        let criteria = probe.filters.criteria();
        assert_eq!(criteria.region, Some(Region::East));
        assert_eq!(criteria.gender, Some(Gender::Female));
        assert_eq!(criteria.society, Some(Society::Youth));
        assert_eq!(criteria.name_query.as_deref(), Some("ana"));
        assert_eq!(probe.filters.sort, SortKey::BirthDate);
    }

    #[test]
    fn unknown_region_is_rejected() {
        assert!(Probe::try_parse_from(["probe", "--region", "CENTRO"]).is_err());
    }

    #[test]
    fn form_builds_partial_draft() {
        let form = Form::try_parse_from([
            "form",
            "--name",
            "Ana",
            "--birth-date",
            "1990-04-12",
            "--function",
            "membro normal",
        ])
        .unwrap();

        let draft = form.fields.draft();
        assert_eq!(draft.full_name.as_deref(), Some("Ana"));
        assert_eq!(draft.birth_date, NaiveDate::from_ymd_opt(1990, 4, 12));
        assert_eq!(draft.function, Some(ChurchFunction::RegularMember));
        assert_eq!(draft.region, None);
    }

    #[test]
    fn bad_birth_date_is_rejected() {
        assert!(Form::try_parse_from(["form", "--birth-date", "12/04/1990"]).is_err());
    }
}
