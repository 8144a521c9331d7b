//! Type definitions for the cookbook backend API.
//!
//! This module contains the data structures exchanged with the four cookbook
//! endpoints: request and response types for auth, recipes, ingredients and
//! meal plans, plus the typed query filters used by list/delete calls.
//!
//! ## Key Types
//!
//! - [`Recipe`] - Recipe record with cooking metadata and timestamps
//! - [`Ingredient`] - Flat reference data for the ingredient catalog
//! - [`MealPlan`] - A recipe scheduled on a calendar date and meal slot
//! - [`AuthResponse`] - Single response shape for register/login/verify,
//!   including the 401/409 payloads the client passes through as data
//!
//! ## API Compatibility
//!
//! The backend serializes timestamps and decimals as plain strings, so
//! `created_at`/`updated_at` and `calories_per_100g` are carried as opaque
//! `String`s rather than parsed values. Most response fields are defaulted
//! to tolerate rows with NULL columns.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A registered user as returned by the auth endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
}

/// Response payload of the auth endpoint for all three actions.
///
/// The same shape covers the success case (`token` + `user`), the 401
/// invalid-credentials case and the 409 email-taken case (`error` only).
/// The client deliberately does not turn 401/409 into failures, so callers
/// inspect these fields to decide what happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Session token, present on successful register/login
    #[serde(default)]
    pub token: Option<String>,
    /// The authenticated user, present on success and on verify
    #[serde(default)]
    pub user: Option<User>,
    /// Server-side error message for the 401/409 soft statuses
    #[serde(default)]
    pub error: Option<String>,
}

/// Action-tagged request body for the auth endpoint.
///
/// The auth endpoint is a single URL that dispatches on the `action` field
/// of the JSON body.
#[derive(Debug, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum AuthRequest {
    Register {
        email: String,
        password: String,
        name: String,
    },
    Login {
        email: String,
        password: String,
    },
    Verify {
        token: String,
    },
}

/// A recipe record.
///
/// Ownership (`user_id`) is enforced server-side; the client only carries it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub cooking_time: i32,
    #[serde(default)]
    pub servings: i32,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub instructions: String,
    /// Creation timestamp, in whatever string format the backend emits
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Display name of the recipe author, joined in by the backend
    #[serde(default)]
    pub author_name: Option<String>,
}

/// An entry in the ingredient catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub unit: String,
    /// Stringified decimal as sent by the backend
    #[serde(default)]
    pub calories_per_100g: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A recipe scheduled into a calendar slot.
///
/// Carries denormalized recipe fields so calendar views render without a
/// second lookup. Uniqueness of (date, meal_type) per user is a backend
/// concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub id: i64,
    pub user_id: i64,
    pub recipe_id: i64,
    pub meal_date: NaiveDate,
    /// Meal slot, e.g. "breakfast" | "lunch" | "dinner"
    pub meal_type: String,
    #[serde(default)]
    pub recipe_title: Option<String>,
    #[serde(default)]
    pub recipe_image: Option<String>,
    #[serde(default)]
    pub cooking_time: Option<i32>,
    #[serde(default)]
    pub servings: Option<i32>,
    #[serde(default)]
    pub created_at: Option<String>,
}

// Request types for creating/updating resources.
// Optional fields are skipped entirely when serializing so partial payloads
// send only what the caller set.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewRecipe {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooking_time: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Partial recipe update; `id` addresses the record, everything else is
/// applied only when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeUpdate {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooking_time: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl RecipeUpdate {
    /// Update payload touching nothing but the addressed record.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            title: None,
            description: None,
            image_url: None,
            cooking_time: None,
            servings: None,
            difficulty: None,
            category_id: None,
            instructions: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIngredient {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Numeric on the way in; the backend stores and echoes it as a string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_per_100g: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMealPlan {
    pub recipe_id: i64,
    pub meal_date: NaiveDate,
    pub meal_type: String,
}

// Typed query filters.
//
// Inclusion policy, uniform across every accessor: a parameter is emitted
// iff its field is `Some`, including `Some("")`. `None` means absent.

/// Filter for recipe listing. All fields optional; an empty filter lists
/// everything.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub category: Option<String>,
    pub search: Option<String>,
    pub id: Option<String>,
}

/// Filter for ingredient listing.
#[derive(Debug, Clone, Default)]
pub struct IngredientFilter {
    pub search: Option<String>,
}

/// Date-range filter for meal plan listing.
#[derive(Debug, Clone, Default)]
pub struct MealPlanFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Addresses meal plans for deletion: either by `id` or by
/// (`meal_date`, `meal_type`). Which combinations are valid is decided by
/// the backend; the client serializes whatever is set, an empty `meal_type`
/// string included.
#[derive(Debug, Clone, Default)]
pub struct MealPlanSelector {
    pub id: Option<i64>,
    pub meal_date: Option<NaiveDate>,
    pub meal_type: Option<String>,
}
