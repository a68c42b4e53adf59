use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::brazil::{birth_date, cep, cnpj, cpf, phone};
use crate::models::{NewAddress, NewUser};

use super::{
    char_len, non_empty, BusinessDefinition, PersonType, Registration, DEFAULT_COUNTRY, NAME_MAX,
    PASSWORD_MAX, PASSWORD_MIN, USERNAME_MAX,
};

pub const GENDERS: [&str; 2] = ["Masculino", "Feminino"];

/// The signup page's form body. One struct serves both the PF and the PJ tab;
/// `person_type` says which rules apply. Checkboxes arrive as `Some("on")`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub person_type: String,
    pub name: String,
    pub email: String,
    pub confirm_email: String,
    pub password: String,
    pub confirm_password: String,
    pub cpf: String,
    pub cnpj: String,
    pub company_name: String,
    pub trade_name: String,
    pub state_registration: String,
    pub state_registration_exempt: Option<String>,
    pub birth_date: String,
    pub gender: String,
    pub phone: String,
    pub whatsapp: String,
    pub alternate_phone: String,
    pub definition: String,
    pub marketing_opt_in: Option<String>,
    pub terms: Option<String>,
    pub address_label: String,
    pub postal_code: String,
    pub region: String,
    pub district: String,
    pub city: String,
    pub address_line1: String,
    pub street_number: String,
    pub address_line2: String,
}

/// Per-field messages, keyed by form field name.
#[derive(Debug, Clone, Default)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

fn is_email(value: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });
    regex.is_match(value)
}

fn flag(value: &Option<String>) -> bool {
    matches!(value.as_deref(), Some("on" | "true" | "1"))
}

fn require(errors: &mut FieldErrors, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.add(field, message);
    }
}

/// Format a phone if one was typed.
fn optional_phone(value: &str) -> Option<String> {
    non_empty(Some(value.to_string())).map(|v| phone::format(&v))
}

impl SignupForm {
    pub fn person_type(&self) -> PersonType {
        if self.person_type.eq_ignore_ascii_case("PJ") {
            PersonType::PJ
        } else {
            PersonType::PF
        }
    }

    pub fn validate(&self) -> Result<Registration, FieldErrors> {
        let mut errors = FieldErrors::default();
        let person_type = self.person_type();

        self.check_account(&mut errors);

        match person_type {
            PersonType::PF => {
                if !cpf::is_valid(&self.cpf) {
                    errors.add("cpf", "CPF inválido");
                }
                require(&mut errors, "phone", &self.phone, "Telefone é obrigatório");
            }
            PersonType::PJ => {
                require(&mut errors, "company_name", &self.company_name, "Razão social é obrigatória");
                require(&mut errors, "trade_name", &self.trade_name, "Nome fantasia é obrigatório");
                if !cnpj::is_valid(&self.cnpj) {
                    errors.add("cnpj", "CNPJ inválido");
                }
                if !flag(&self.state_registration_exempt) && self.state_registration.trim().is_empty() {
                    errors.add(
                        "state_registration",
                        "Inscrição estadual é obrigatória (ou marque Isento)",
                    );
                }
                require(&mut errors, "whatsapp", &self.whatsapp, "WhatsApp é obrigatório");
            }
        }

        let birth = if self.birth_date.trim().is_empty() {
            errors.add("birth_date", "Data de nascimento é obrigatória");
            None
        } else if !birth_date::is_valid_br(&self.birth_date) {
            errors.add("birth_date", "Use o formato dd/mm/aaaa");
            None
        } else {
            birth_date::parse(&self.birth_date)
        };

        if !GENDERS.contains(&self.gender.as_str()) {
            errors.add("gender", "Selecione o gênero");
        }

        let definition = match self.definition.parse::<BusinessDefinition>() {
            Ok(d) => Some(d),
            Err(_) => {
                errors.add("definition", "Selecione o que te define melhor");
                None
            }
        };

        self.check_address(&mut errors);

        if !flag(&self.terms) {
            errors.add("terms", "Você deve aceitar os termos");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(self.to_registration(person_type, birth, definition))
    }

    fn check_account(&self, errors: &mut FieldErrors) {
        let name_message = match self.person_type() {
            PersonType::PF => "Nome completo é obrigatório",
            PersonType::PJ => "Nome do responsável é obrigatório",
        };
        require(errors, "name", &self.name, name_message);
        if char_len(&self.name) > NAME_MAX {
            errors.add("name", format!("O nome deve ter menos de {NAME_MAX} caracteres"));
        }

        if self.email.trim().is_empty() {
            errors.add("email", "Informe o e-mail");
        } else if char_len(&self.email) > USERNAME_MAX || !is_email(self.email.trim()) {
            errors.add("email", "Endereço de e-mail inválido");
        }
        require(errors, "confirm_email", &self.confirm_email, "Confirme o e-mail");
        if self.email.trim() != self.confirm_email.trim() {
            errors.add("confirm_email", "E-mails não coincidem");
        }

        let password_len = char_len(&self.password);
        if password_len < PASSWORD_MIN {
            errors.add("password", format!("Mínimo de {PASSWORD_MIN} caracteres"));
        } else if password_len > PASSWORD_MAX {
            errors.add("password", "Senha muito longa");
        }
        if self.password != self.confirm_password {
            errors.add("confirm_password", "Senhas não coincidem");
        }
    }

    fn check_address(&self, errors: &mut FieldErrors) {
        require(errors, "address_label", &self.address_label, "Nome identificador é obrigatório");
        if self.postal_code.trim().is_empty() {
            errors.add("postal_code", "CEP é obrigatório");
        } else if !cep::is_valid(self.postal_code.trim()) {
            errors.add("postal_code", "CEP inválido");
        }
        require(errors, "region", &self.region, "Estado é obrigatório");
        require(errors, "district", &self.district, "Bairro é obrigatório");
        require(errors, "city", &self.city, "Cidade é obrigatória");
        require(errors, "address_line1", &self.address_line1, "Endereço é obrigatório");
        require(errors, "street_number", &self.street_number, "Número é obrigatório");
    }

    fn to_registration(
        &self,
        person_type: PersonType,
        birth: Option<chrono::NaiveDate>,
        definition: Option<BusinessDefinition>,
    ) -> Registration {
        let email = self.email.trim().to_string();
        let is_pj = person_type == PersonType::PJ;
        let text = |v: &str| non_empty(Some(v.trim().to_string()));

        let user = NewUser {
            name: self.name.trim().to_string(),
            username: email.clone(),
            email,
            person_type: Some(person_type.as_str().to_string()),
            cpf: (!is_pj).then(|| cpf::format(&self.cpf)),
            cnpj: is_pj.then(|| cnpj::format(&self.cnpj)),
            birth_date: birth,
            gender: Some(self.gender.clone()),
            phone: optional_phone(&self.phone),
            whatsapp: optional_phone(&self.whatsapp),
            alternate_phone: optional_phone(&self.alternate_phone),
            company_name: if is_pj { text(&self.company_name) } else { None },
            trade_name: if is_pj { text(&self.trade_name) } else { None },
            state_registration: if is_pj { text(&self.state_registration) } else { None },
            state_registration_exempt: is_pj.then(|| flag(&self.state_registration_exempt)),
            pf_definition: if is_pj { None } else { definition.map(|d| d.as_str().to_string()) },
            pj_definition: if is_pj { definition.map(|d| d.as_str().to_string()) } else { None },
            marketing_opt_in: flag(&self.marketing_opt_in),
        };

        let address = NewAddress {
            is_default: true,
            label: text(&self.address_label),
            address_line1: self.address_line1.trim().to_string(),
            address_line2: text(&self.address_line2),
            street_number: text(&self.street_number),
            district: text(&self.district),
            city: self.city.trim().to_string(),
            postal_code: Some(cep::format(&self.postal_code)),
            region: self.region.trim().to_string(),
            country: DEFAULT_COUNTRY.to_string(),
        };

        Registration {
            user,
            password: self.password.clone(),
            address: Some(address),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn pf_form() -> SignupForm {
        SignupForm {
            person_type: "PF".to_string(),
            name: "Maria Souza".to_string(),
            email: "maria@example.com".to_string(),
            confirm_email: "maria@example.com".to_string(),
            password: "password123".to_string(),
            confirm_password: "password123".to_string(),
            cpf: "52998224725".to_string(),
            birth_date: "31/01/1990".to_string(),
            gender: "Feminino".to_string(),
            phone: "11987654321".to_string(),
            definition: "CONSUMIDOR_FINAL".to_string(),
            terms: Some("on".to_string()),
            address_label: "Casa".to_string(),
            postal_code: "01310100".to_string(),
            region: "SP".to_string(),
            district: "Bela Vista".to_string(),
            city: "São Paulo".to_string(),
            address_line1: "Avenida Paulista".to_string(),
            street_number: "1000".to_string(),
            ..Default::default()
        }
    }

    fn pj_form() -> SignupForm {
        SignupForm {
            person_type: "PJ".to_string(),
            cpf: String::new(),
            phone: String::new(),
            cnpj: "11222333000181".to_string(),
            company_name: "Pet Feliz LTDA".to_string(),
            trade_name: "Pet Feliz".to_string(),
            whatsapp: "11912345678".to_string(),
            state_registration: "123.456.789.110".to_string(),
            definition: "PETSHOP".to_string(),
            ..pf_form()
        }
    }

    #[test]
    fn valid_pf_form_is_normalized() {
        let reg = pf_form().validate().unwrap();
        assert_eq!(reg.user.person_type.as_deref(), Some("PF"));
        assert_eq!(reg.user.cpf.as_deref(), Some("529.982.247-25"));
        assert_eq!(reg.user.cnpj, None);
        assert_eq!(reg.user.phone.as_deref(), Some("(11) 98765-4321"));
        assert_eq!(reg.user.birth_date, NaiveDate::from_ymd_opt(1990, 1, 31));
        assert_eq!(reg.user.pf_definition.as_deref(), Some("CONSUMIDOR_FINAL"));
        let address = reg.address.unwrap();
        assert_eq!(address.postal_code.as_deref(), Some("01310-100"));
        assert_eq!(address.country, "Brasil");
    }

    #[test]
    fn pf_rejects_invalid_cpf() {
        let form = SignupForm {
            cpf: "529.982.247-26".to_string(),
            ..pf_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("cpf"), Some("CPF inválido"));
    }

    #[test]
    fn mismatched_confirmations_are_reported_on_the_confirm_fields() {
        let form = SignupForm {
            confirm_email: "outra@example.com".to_string(),
            confirm_password: "password124".to_string(),
            ..pf_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("confirm_email"), Some("E-mails não coincidem"));
        assert_eq!(errors.get("confirm_password"), Some("Senhas não coincidem"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn birth_date_must_be_day_month_year() {
        let form = SignupForm {
            birth_date: "1990-01-31".to_string(),
            ..pf_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("birth_date"), Some("Use o formato dd/mm/aaaa"));
    }

    #[test]
    fn terms_and_address_are_required() {
        let form = SignupForm {
            terms: None,
            postal_code: "0131".to_string(),
            street_number: String::new(),
            ..pf_form()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.get("terms").is_some());
        assert_eq!(errors.get("postal_code"), Some("CEP inválido"));
        assert_eq!(errors.get("street_number"), Some("Número é obrigatório"));
    }

    #[test]
    fn valid_pj_form() {
        let reg = pj_form().validate().unwrap();
        assert_eq!(reg.user.person_type.as_deref(), Some("PJ"));
        assert_eq!(reg.user.cnpj.as_deref(), Some("11.222.333/0001-81"));
        assert_eq!(reg.user.cpf, None);
        assert_eq!(reg.user.whatsapp.as_deref(), Some("(11) 91234-5678"));
        assert_eq!(reg.user.pj_definition.as_deref(), Some("PETSHOP"));
        assert_eq!(reg.user.pf_definition, None);
        assert_eq!(reg.user.state_registration_exempt, Some(false));
    }

    #[test]
    fn pj_needs_state_registration_unless_exempt() {
        let missing = SignupForm {
            state_registration: String::new(),
            ..pj_form()
        };
        let errors = missing.validate().unwrap_err();
        assert!(errors.get("state_registration").is_some());

        let exempt = SignupForm {
            state_registration: String::new(),
            state_registration_exempt: Some("on".to_string()),
            ..pj_form()
        };
        let reg = exempt.validate().unwrap();
        assert_eq!(reg.user.state_registration_exempt, Some(true));
        assert_eq!(reg.user.state_registration, None);
    }

    #[test]
    fn pj_requires_whatsapp_and_company_names() {
        let form = SignupForm {
            whatsapp: String::new(),
            company_name: String::new(),
            trade_name: " ".to_string(),
            ..pj_form()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.get("whatsapp").is_some());
        assert!(errors.get("company_name").is_some());
        assert!(errors.get("trade_name").is_some());
    }

    #[test]
    fn unknown_gender_or_definition_is_rejected() {
        let form = SignupForm {
            gender: "Outro".to_string(),
            definition: "PADARIA".to_string(),
            ..pf_form()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.get("gender").is_some());
        assert!(errors.get("definition").is_some());
    }
}
