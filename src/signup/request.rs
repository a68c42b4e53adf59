use serde::Deserialize;

use crate::brazil::birth_date;
use crate::models::{NewAddress, NewUser};

use super::{
    char_len, non_empty, BusinessDefinition, PersonType, Registration, DEFAULT_CITY,
    DEFAULT_COUNTRY, DEFAULT_REGION, NAME_MAX, PASSWORD_MAX, PASSWORD_MIN, USERNAME_MAX,
};

/// JSON body of `POST /api/signup`. `username` doubles as the e-mail address.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub person_type: Option<PersonType>,
    pub cpf: Option<String>,
    pub cnpj: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub company_name: Option<String>,
    pub trade_name: Option<String>,
    pub state_registration: Option<String>,
    pub state_registration_isento: Option<bool>,
    pub alternate_phone: Option<String>,
    pub pf_definition: Option<BusinessDefinition>,
    pub pj_definition: Option<BusinessDefinition>,
    pub marketing_opt_in: Option<bool>,
    pub address_label: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    #[serde(rename = "StreetNumber")]
    pub street_number: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

impl SignupRequest {
    /// Check the payload and turn it into a registration. All problems are
    /// reported at once.
    pub fn validate(self) -> Result<Registration, Vec<String>> {
        let mut errors = Vec::new();

        if self.name.is_empty() {
            errors.push("Name cannot be empty".to_string());
        } else if char_len(&self.name) > NAME_MAX {
            errors.push(format!("Name should be under {NAME_MAX} characters"));
        }

        if self.username.is_empty() {
            errors.push("Username cannot be empty".to_string());
        } else if char_len(&self.username) > USERNAME_MAX {
            errors.push(format!("Username should be under {USERNAME_MAX} characters"));
        }

        let password_len = char_len(&self.password);
        if password_len < PASSWORD_MIN {
            errors.push(format!("Password should be at least {PASSWORD_MIN} characters"));
        } else if password_len > PASSWORD_MAX {
            errors.push(format!("Password should be under {PASSWORD_MAX} characters"));
        }

        let cpf = non_empty(self.cpf);
        let cnpj = non_empty(self.cnpj);
        match self.person_type {
            Some(PersonType::PF) if cpf.is_none() => {
                errors.push("CPF is required for PF".to_string());
            }
            Some(PersonType::PJ) if cnpj.is_none() => {
                errors.push("CNPJ is required for PJ".to_string());
            }
            _ => {}
        }

        let birth_date = match non_empty(self.birth_date) {
            Some(raw) => match birth_date::parse(&raw) {
                Some(date) => Some(date),
                None => {
                    errors.push("Birth date is not a valid date".to_string());
                    None
                }
            },
            None => None,
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        let address = non_empty(self.address_line1).map(|line1| NewAddress {
            is_default: true,
            label: non_empty(self.address_label),
            address_line1: line1,
            address_line2: non_empty(self.address_line2),
            street_number: non_empty(self.street_number),
            district: non_empty(self.district),
            city: non_empty(self.city).unwrap_or_else(|| DEFAULT_CITY.to_string()),
            postal_code: non_empty(self.postal_code),
            region: non_empty(self.region).unwrap_or_else(|| DEFAULT_REGION.to_string()),
            country: non_empty(self.country).unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
        });

        let user = NewUser {
            name: self.name,
            email: self.username.clone(),
            username: self.username,
            person_type: self.person_type.map(|p| p.as_str().to_string()),
            cpf,
            cnpj,
            birth_date,
            gender: non_empty(self.gender),
            phone: non_empty(self.phone),
            whatsapp: non_empty(self.whatsapp),
            alternate_phone: non_empty(self.alternate_phone),
            company_name: non_empty(self.company_name),
            trade_name: non_empty(self.trade_name),
            state_registration: non_empty(self.state_registration),
            state_registration_exempt: self.state_registration_isento,
            pf_definition: self.pf_definition.map(|d| d.as_str().to_string()),
            pj_definition: self.pj_definition.map(|d| d.as_str().to_string()),
            marketing_opt_in: self.marketing_opt_in.unwrap_or(false),
        };

        Ok(Registration {
            user,
            password: self.password,
            address,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;

    fn parse(value: serde_json::Value) -> SignupRequest {
        serde_json::from_value(value).unwrap()
    }

    fn minimal() -> serde_json::Value {
        json!({ "name": "Maria", "username": "maria@example.com", "password": "password123" })
    }

    #[test]
    fn minimal_payload_is_accepted() {
        let reg = parse(minimal()).validate().unwrap();
        assert_eq!(reg.user.username, "maria@example.com");
        assert_eq!(reg.user.email, "maria@example.com");
        assert_eq!(reg.user.person_type, None);
        assert!(reg.address.is_none());
    }

    #[test]
    fn rejects_short_password_and_long_name() {
        let mut body = minimal();
        body["password"] = json!("short");
        body["name"] = json!("x".repeat(51));
        let errors = parse(body).validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn password_length_counts_characters_not_bytes() {
        let mut body = minimal();
        body["password"] = json!("çççççççç");
        assert!(parse(body.clone()).validate().is_ok());
        body["password"] = json!("ç".repeat(65));
        assert!(parse(body).validate().is_err());
    }

    #[test]
    fn pf_requires_cpf() {
        let mut body = minimal();
        body["personType"] = json!("PF");
        assert!(parse(body.clone()).validate().is_err());
        body["cpf"] = json!("");
        assert!(parse(body.clone()).validate().is_err());
        body["cpf"] = json!("529.982.247-25");
        let reg = parse(body).validate().unwrap();
        assert_eq!(reg.user.person_type.as_deref(), Some("PF"));
        assert_eq!(reg.user.cpf.as_deref(), Some("529.982.247-25"));
    }

    #[test]
    fn pj_requires_cnpj() {
        let mut body = minimal();
        body["personType"] = json!("PJ");
        body["cpf"] = json!("529.982.247-25");
        assert!(parse(body.clone()).validate().is_err());
        body["cnpj"] = json!("11.222.333/0001-81");
        assert!(parse(body).validate().is_ok());
    }

    #[test]
    fn unknown_person_type_fails_to_deserialize() {
        let mut body = minimal();
        body["personType"] = json!("PX");
        assert!(serde_json::from_value::<SignupRequest>(body).is_err());
    }

    #[test]
    fn birth_date_accepts_iso_and_rejects_garbage() {
        let mut body = minimal();
        body["birthDate"] = json!("1990-01-31");
        let reg = parse(body.clone()).validate().unwrap();
        assert_eq!(reg.user.birth_date, NaiveDate::from_ymd_opt(1990, 1, 31));

        body["birthDate"] = json!("ontem");
        assert!(parse(body).validate().is_err());
    }

    #[test]
    fn address_defaults_are_applied() {
        let mut body = minimal();
        body["addressLine1"] = json!("Rua das Flores");
        body["StreetNumber"] = json!("42");
        body["city"] = json!("");
        let address = parse(body).validate().unwrap().address.unwrap();
        assert!(address.is_default);
        assert_eq!(address.street_number.as_deref(), Some("42"));
        assert_eq!(address.city, "Cidade");
        assert_eq!(address.region, "Estado");
        assert_eq!(address.country, "Brasil");
    }

    #[test]
    fn address_without_first_line_is_ignored() {
        let mut body = minimal();
        body["city"] = json!("Campinas");
        assert!(parse(body).validate().unwrap().address.is_none());
    }
}
