//! Member registry types
//!
//! One `Member` is one congregant record as held by the remote store. Field
//! names on the wire follow the `members` table columns.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_domain_label_conversions;

/// Gender of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "Masculino")]
    Male,
    #[serde(rename = "Feminino")]
    Female,
}

impl_domain_label_conversions!(Gender {
    Male => "Masculino",
    Female => "Feminino",
});

/// Geographic region a parish belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "ESTE")]
    East,
    #[serde(rename = "OESTE")]
    West,
    #[serde(rename = "SUL")]
    South,
    #[serde(rename = "SUDUESTE")]
    Southwest,
    #[serde(rename = "NORTE")]
    North,
}

impl_domain_label_conversions!(Region {
    East => "ESTE",
    West => "OESTE",
    South => "SUL",
    Southwest => "SUDUESTE",
    North => "NORTE",
});

impl Region {
    /// Parishes that may be chosen for a member of this region.
    pub fn parishes(&self) -> &'static [&'static str] {
        match self {
            Self::East => &["Munhava", "Esturo", "Massagem"],
            Self::South => &["Manhangalene", "Costa do Sol"],
            Self::West => &["Bairro 4", "Manica", "Tete"],
            Self::Southwest => &["Manchanga", "Goi-Goi"],
            Self::North => &[],
        }
    }

    /// Whether `parish` is listed for this region (exact match).
    pub fn has_parish(&self, parish: &str) -> bool {
        self.parishes().iter().any(|p| *p == parish)
    }
}

/// Role a member holds in the church
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChurchFunction {
    #[serde(rename = "Pastor")]
    Pastor,
    #[serde(rename = "Evangelista")]
    Evangelist,
    #[serde(rename = "Monitor")]
    Monitor,
    #[serde(rename = "Membro Normal")]
    RegularMember,
}

impl_domain_label_conversions!(ChurchFunction {
    Pastor => "Pastor",
    Evangelist => "Evangelista",
    Monitor => "Monitor",
    RegularMember => "Membro Normal",
});

/// Sacramental state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BaptismalState {
    #[serde(rename = "Batizado")]
    Baptized,
    #[serde(rename = "Confirmado")]
    Confirmed,
}

impl_domain_label_conversions!(BaptismalState {
    Baptized => "Batizado",
    Confirmed => "Confirmado",
});

/// Society (sub-group) affiliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Society {
    #[serde(rename = "Dominical")]
    Sunday,
    #[serde(rename = "Jovens")]
    Youth,
    #[serde(rename = "SNF")]
    Snf,
    #[serde(rename = "SHV")]
    Shv,
    #[serde(rename = "SS")]
    Ss,
}

impl_domain_label_conversions!(Society {
    Sunday => "Dominical",
    Youth => "Jovens",
    Snf => "SNF",
    Shv => "SHV",
    Ss => "SS",
});

/// One congregant record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Server-assigned identifier; immutable and the sole join key
    pub id: String,
    #[serde(rename = "nome_completo")]
    pub full_name: String,
    #[serde(rename = "data_nascimento")]
    pub birth_date: NaiveDate,
    #[serde(rename = "genero")]
    pub gender: Gender,
    #[serde(rename = "regiao")]
    pub region: Region,
    #[serde(rename = "paroquia")]
    pub parish: String,
    #[serde(rename = "funcao")]
    pub function: ChurchFunction,
    #[serde(rename = "estado", default, skip_serializing_if = "Option::is_none")]
    pub baptismal_state: Option<BaptismalState>,
    #[serde(rename = "sociedade", default, skip_serializing_if = "Option::is_none")]
    pub society: Option<Society>,
    #[serde(rename = "telefone", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "endereco", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Member {
    /// Whether the record was edited after creation.
    pub fn was_edited(&self) -> bool {
        self.updated_at.is_some_and(|updated| updated != self.created_at)
    }

    /// Whether the stored parish is consistent with the stored region.
    pub fn parish_matches_region(&self) -> bool {
        self.region.has_parish(&self.parish)
    }
}
