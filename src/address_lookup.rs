use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Address fields resolved from a CEP.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostalAddress {
    pub cep: String,
    pub street: String,
    pub complement: String,
    pub district: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug)]
pub enum LookupError {
    NotFound,
    Upstream(String),
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::NotFound => write!(f, "CEP not found"),
            LookupError::Upstream(msg) => write!(f, "Address lookup failed: {msg}"),
        }
    }
}

#[async_trait]
pub trait AddressLookup: Send + Sync {
    /// Resolve an 8-digit CEP (digits only).
    async fn lookup(&self, cep_digits: &str) -> Result<PostalAddress, LookupError>;
}

/// ViaCEP's JSON shape. Unknown CEPs come back as `{"erro": true}` with 200.
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    cep: String,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    complemento: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
    #[serde(default, deserialize_with = "deserialize_erro")]
    erro: bool,
}

/// ViaCEP has sent `erro` both as a boolean and as the string `"true"`.
fn deserialize_erro<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::String(s) => s == "true",
        _ => false,
    })
}

impl From<ViaCepResponse> for PostalAddress {
    fn from(r: ViaCepResponse) -> Self {
        PostalAddress {
            cep: r.cep,
            street: r.logradouro,
            complement: r.complemento,
            district: r.bairro,
            city: r.localidade,
            state: r.uf,
        }
    }
}

pub struct ViaCep {
    client: reqwest::Client,
    base_url: String,
}

impl ViaCep {
    pub fn new(base_url: &str) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AddressLookup for ViaCep {
    async fn lookup(&self, cep_digits: &str) -> Result<PostalAddress, LookupError> {
        let url = format!("{}/ws/{cep_digits}/json/", self.base_url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::Upstream(e.to_string()))?;

        // ViaCEP answers 400 for malformed CEPs.
        if resp.status() == reqwest::StatusCode::BAD_REQUEST {
            return Err(LookupError::NotFound);
        }
        if !resp.status().is_success() {
            return Err(LookupError::Upstream(format!("HTTP {}", resp.status())));
        }

        let body: ViaCepResponse = resp
            .json()
            .await
            .map_err(|e| LookupError::Upstream(format!("Invalid response: {e}")))?;

        if body.erro {
            return Err(LookupError::NotFound);
        }

        Ok(body.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_viacep_fields() {
        let raw = r#"{
            "cep": "01310-100",
            "logradouro": "Avenida Paulista",
            "complemento": "de 612 a 1510 - lado par",
            "bairro": "Bela Vista",
            "localidade": "São Paulo",
            "uf": "SP",
            "ibge": "3550308",
            "ddd": "11"
        }"#;
        let parsed: ViaCepResponse = serde_json::from_str(raw).unwrap();
        assert!(!parsed.erro);
        let address = PostalAddress::from(parsed);
        assert_eq!(address.street, "Avenida Paulista");
        assert_eq!(address.city, "São Paulo");
        assert_eq!(address.state, "SP");
    }

    #[test]
    fn recognizes_error_payloads() {
        let as_bool: ViaCepResponse = serde_json::from_str(r#"{"erro": true}"#).unwrap();
        let as_str: ViaCepResponse = serde_json::from_str(r#"{"erro": "true"}"#).unwrap();
        assert!(as_bool.erro);
        assert!(as_str.erro);
    }
}
