use askama::Template;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use serde::Deserialize;

use crate::auth::extractor::SessionUser;
use crate::catalog::ProductCard;
use crate::db;
use crate::error::AppError;
use crate::models::{Product, UserSummary};
use crate::state::SharedState;

/// One image in the home page banner carousel.
pub struct BannerSlide {
    pub image_url: &'static str,
    pub alt: &'static str,
    pub href: Option<&'static str>,
}

pub static BANNER_SLIDES: [BannerSlide; 4] = [
    BannerSlide {
        image_url: "https://placehold.co/1600x360/0c7/fff?text=Frete+Gr%C3%A1tis+%7C+Pedidos+%3E+R%24250",
        alt: "Frete Grátis",
        href: None,
    },
    BannerSlide {
        image_url: "https://placehold.co/1600x360/07a/fff?text=Novidades+para+Pets",
        alt: "Novidades",
        href: Some("/search?q=novidade"),
    },
    BannerSlide {
        image_url: "https://placehold.co/1600x360/b60/fff?text=Promo%C3%A7%C3%B5es+da+Semana",
        alt: "Promoções",
        href: Some("/search?q=promo"),
    },
    BannerSlide {
        image_url: "https://placehold.co/1600x360/333/fff?text=Cuidados+e+Higiene+Pet",
        alt: "Cuidados Pet",
        href: None,
    },
];

/// A titled row of product cards.
pub struct CarouselSection {
    pub title: String,
    pub products: Vec<ProductCard>,
}

#[derive(Template)]
#[template(path = "home.html")]
#[allow(dead_code)]
struct HomeTemplate {
    user: Option<UserSummary>,
    slides: &'static [BannerSlide],
    sections: Vec<CarouselSection>,
}

#[derive(Template)]
#[template(path = "search.html")]
#[allow(dead_code)]
struct SearchTemplate {
    user: Option<UserSummary>,
    query: String,
    section: CarouselSection,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

fn cards(products: &[Product], cloud_name: &str) -> Vec<ProductCard> {
    products
        .iter()
        .map(|p| ProductCard::from_product(p, cloud_name))
        .collect()
}

pub async fn index(
    session: Option<SessionUser>,
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let cloud = &state.config.cloudinary_cloud_name;

    let featured = db::products::list_sellable(&state.pool, None, None).await?;
    let mut sections = vec![CarouselSection {
        title: "Destaques".to_string(),
        products: cards(&featured, cloud),
    }];

    for category in db::categories::list_with_products(&state.pool).await? {
        let products = db::products::list_sellable(&state.pool, Some(category.id), None).await?;
        sections.push(CarouselSection {
            title: category.name,
            products: cards(&products, cloud),
        });
    }

    let template = HomeTemplate {
        user: session.map(|s| s.0),
        slides: &BANNER_SLIDES,
        sections,
    };
    Ok(Html(template.render().unwrap_or_default()))
}

pub async fn search(
    session: Option<SessionUser>,
    State(state): State<SharedState>,
    Query(q): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let query = q.q.unwrap_or_default().trim().to_string();

    let products = if query.is_empty() {
        Vec::new()
    } else {
        db::products::list_sellable(&state.pool, None, Some(&query)).await?
    };

    let template = SearchTemplate {
        user: session.map(|s| s.0),
        section: CarouselSection {
            title: format!("Resultados para \"{query}\""),
            products: cards(&products, &state.config.cloudinary_cloud_name),
        },
        query,
    };
    Ok(Html(template.render().unwrap_or_default()))
}
