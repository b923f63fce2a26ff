//! Rendering of selector output for the command line

use std::fmt::Write as _;

use clap::ValueEnum;
use libeatgo::types::{Category, Region, RestaurantDetail, RestaurantId, RestaurantSummary};
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub logged_in: bool,
    pub storage: String,
}

fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn regions(format: OutputFormat, regions: &[Region]) -> Result<String> {
    match format {
        OutputFormat::Json => json(regions),
        OutputFormat::Text => Ok(regions
            .iter()
            .map(|r| format!("{}\t{}", r.id, r.name))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

pub fn categories(format: OutputFormat, categories: &[Category]) -> Result<String> {
    match format {
        OutputFormat::Json => json(categories),
        OutputFormat::Text => Ok(categories
            .iter()
            .map(|c| format!("{}\t{}", c.id, c.name))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

pub fn restaurants(format: OutputFormat, restaurants: &[RestaurantSummary]) -> Result<String> {
    match format {
        OutputFormat::Json => json(restaurants),
        OutputFormat::Text if restaurants.is_empty() => Ok("No restaurants found".to_string()),
        OutputFormat::Text => Ok(restaurants
            .iter()
            .map(|r| match &r.address {
                Some(address) => format!("{}\t{}\t{}", r.id, r.name, address),
                None => format!("{}\t{}", r.id, r.name),
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

pub fn restaurant(format: OutputFormat, restaurant: &RestaurantDetail) -> Result<String> {
    if format == OutputFormat::Json {
        return json(restaurant);
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", restaurant.name);
    if let Some(address) = &restaurant.address {
        let _ = writeln!(out, "주소: {}", address);
    }

    if !restaurant.menu_items.is_empty() {
        let _ = writeln!(out, "메뉴");
        for item in &restaurant.menu_items {
            let _ = writeln!(out, "  - {}", item.name);
        }
    }

    if !restaurant.reviews.is_empty() {
        let _ = writeln!(out, "리뷰");
        for review in &restaurant.reviews {
            let _ = writeln!(
                out,
                "  {}: {} ({}점)",
                review.name, review.description, review.score
            );
        }
    }

    Ok(out.trim_end().to_string())
}

/// After a review post: the refreshed restaurant, or a plain confirmation
/// when the refresh didn't bring back restaurant `id`
pub fn review(
    format: OutputFormat,
    restaurant: Option<&RestaurantDetail>,
    id: RestaurantId,
) -> Result<String> {
    match restaurant {
        Some(restaurant) if restaurant.id == id => self::restaurant(format, restaurant),
        _ => Ok("Review submitted".to_string()),
    }
}

pub fn session(format: OutputFormat, status: &SessionStatus) -> Result<String> {
    match format {
        OutputFormat::Json => json(status),
        OutputFormat::Text if status.logged_in => {
            Ok(format!("Logged in (token in {} storage)", status.storage))
        }
        OutputFormat::Text => Ok("Logged out".to_string()),
    }
}
