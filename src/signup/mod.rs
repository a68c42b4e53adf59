//! Account creation: the JSON signup schema, the HTML signup form rules and
//! the registration service both of them feed.

pub mod form;
pub mod request;
pub mod service;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{NewAddress, NewUser};

pub const NAME_MAX: usize = 50;
pub const USERNAME_MAX: usize = 100;
/// Login accepts shorter usernames than signup.
pub const LOGIN_USERNAME_MAX: usize = 50;
pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 64;

pub const DEFAULT_CITY: &str = "Cidade";
pub const DEFAULT_REGION: &str = "Estado";
pub const DEFAULT_COUNTRY: &str = "Brasil";

/// Individual (pessoa física) or company (pessoa jurídica).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersonType {
    PF,
    PJ,
}

impl PersonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonType::PF => "PF",
            PersonType::PJ => "PJ",
        }
    }
}

/// How a customer describes their relationship with the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessDefinition {
    Petshop,
    BanhoTosa,
    ClinicaVeterinaria,
    PensandoNegocio,
    VendasOnline,
    OutroRamo,
    ConsumidorFinal,
    VendedorRepresentante,
    Dropshipping,
}

impl BusinessDefinition {
    pub const ALL: [BusinessDefinition; 9] = [
        BusinessDefinition::Petshop,
        BusinessDefinition::BanhoTosa,
        BusinessDefinition::ClinicaVeterinaria,
        BusinessDefinition::PensandoNegocio,
        BusinessDefinition::VendasOnline,
        BusinessDefinition::OutroRamo,
        BusinessDefinition::ConsumidorFinal,
        BusinessDefinition::VendedorRepresentante,
        BusinessDefinition::Dropshipping,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessDefinition::Petshop => "PETSHOP",
            BusinessDefinition::BanhoTosa => "BANHO_TOSA",
            BusinessDefinition::ClinicaVeterinaria => "CLINICA_VETERINARIA",
            BusinessDefinition::PensandoNegocio => "PENSANDO_NEGOCIO",
            BusinessDefinition::VendasOnline => "VENDAS_ONLINE",
            BusinessDefinition::OutroRamo => "OUTRO_RAMO",
            BusinessDefinition::ConsumidorFinal => "CONSUMIDOR_FINAL",
            BusinessDefinition::VendedorRepresentante => "VENDEDOR_REPRESENTANTE",
            BusinessDefinition::Dropshipping => "DROPSHIPPING",
        }
    }

    /// Label shown in the signup form.
    pub fn label(&self) -> &'static str {
        match self {
            BusinessDefinition::Petshop => "Petshop",
            BusinessDefinition::BanhoTosa => "Banho e tosa",
            BusinessDefinition::ClinicaVeterinaria => "Clínica veterinária",
            BusinessDefinition::PensandoNegocio => "Pensando em abrir um negócio",
            BusinessDefinition::VendasOnline => "Vendas online",
            BusinessDefinition::OutroRamo => "Outro ramo",
            BusinessDefinition::ConsumidorFinal => "Consumidor final",
            BusinessDefinition::VendedorRepresentante => "Vendedor / representante",
            BusinessDefinition::Dropshipping => "Dropshipping",
        }
    }
}

impl FromStr for BusinessDefinition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BusinessDefinition::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("Unknown business definition: {s}"))
    }
}

/// A validated signup: profile, plaintext password (hashed by the service)
/// and the optional first address.
#[derive(Debug, Clone)]
pub struct Registration {
    pub user: NewUser,
    pub password: String,
    pub address: Option<NewAddress>,
}

/// `None` for missing or blank values.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}
