use chrono::{Duration, Utc};
use cookbook_client::client::types::{MealPlanFilter, RecipeFilter};
use cookbook_client::{ApiEndpoints, CookbookClient, FileTokenStore, Session};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Smoke binary: restores a session from the token file, verifies it and
/// lists recipes plus the coming week of meal plans.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let endpoints = ApiEndpoints::from_env()?;
    let token_file =
        env::var("COOKBOOK_TOKEN_FILE").unwrap_or_else(|_| ".cookbook_token".to_string());

    let session = Session::new(Box::new(FileTokenStore::new(&token_file)));
    let mut client = CookbookClient::new(endpoints, session);

    // Log in if credentials are provided and no stored session survives.
    match client.verify_token().await? {
        Some(user) => tracing::info!("Session restored for {} <{}>", user.name, user.email),
        None => {
            let email = env::var("COOKBOOK_EMAIL").ok();
            let password = env::var("COOKBOOK_PASSWORD").ok();
            match (email, password) {
                (Some(email), Some(password)) => {
                    let auth = client.login(&email, &password).await?;
                    if let Some(error) = auth.error {
                        tracing::error!("Login rejected: {}", error);
                        std::process::exit(1);
                    }
                }
                _ => tracing::info!(
                    "No stored session and no COOKBOOK_EMAIL/COOKBOOK_PASSWORD set, browsing anonymously"
                ),
            }
        }
    }

    let recipes = client
        .get_recipes(&RecipeFilter::default())
        .await?
        .ok()
        .unwrap_or_default();
    tracing::info!("Backend has {} recipes", recipes.len());
    for recipe in recipes.iter().take(5) {
        tracing::info!(
            "  {} ({} min, serves {})",
            recipe.title,
            recipe.cooking_time,
            recipe.servings
        );
    }

    if client.is_authenticated() {
        let today = Utc::now().date_naive();
        let plans = client
            .get_meal_plans(&MealPlanFilter {
                start_date: Some(today),
                end_date: Some(today + Duration::days(7)),
            })
            .await?
            .ok()
            .unwrap_or_default();
        tracing::info!("{} meals planned for the coming week", plans.len());
        for plan in &plans {
            tracing::info!(
                "  {} {}: {}",
                plan.meal_date,
                plan.meal_type,
                plan.recipe_title.as_deref().unwrap_or("(untitled)")
            );
        }
    }

    Ok(())
}
