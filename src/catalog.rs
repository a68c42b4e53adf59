use serde::Serialize;
use uuid::Uuid;

use crate::media::{self, ImageOptions};
use crate::models::Product;

/// Card shown in product carousels and returned by the products API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price_in_cents: i64,
    pub price: String,
    pub image_url: String,
}

impl ProductCard {
    pub fn from_product(product: &Product, cloud_name: &str) -> Self {
        let opts = ImageOptions {
            transformations: Some("f_auto,q_auto"),
            ..Default::default()
        };

        ProductCard {
            id: product.id,
            title: product.title.clone(),
            description: product.description.clone(),
            price_in_cents: product.price_in_cents,
            price: format_brl(product.price_in_cents),
            image_url: media::cloudinary_url(cloud_name, &product.image, &opts),
        }
    }
}

/// `1234567` -> `R$ 12.345,67`
pub fn format_brl(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let reais = (cents / 100).to_string();

    let mut grouped = String::with_capacity(reais.len() + reais.len() / 3);
    for (i, c) in reais.chars().enumerate() {
        if i > 0 && (reais.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    format!("{sign}R$ {grouped},{:02}", cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_reais() {
        assert_eq!(format_brl(0), "R$ 0,00");
        assert_eq!(format_brl(5), "R$ 0,05");
        assert_eq!(format_brl(1290), "R$ 12,90");
        assert_eq!(format_brl(123456), "R$ 1.234,56");
        assert_eq!(format_brl(100000000), "R$ 1.000.000,00");
    }
}
