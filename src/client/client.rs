use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::client::session::{token_preview, Session};
use crate::client::types::*;

/// The four backend endpoint URLs. Each one is a single URL multiplexing
/// HTTP verbs; the auth endpoint additionally dispatches on the `action`
/// field of the request body.
#[derive(Debug, Clone)]
pub struct ApiEndpoints {
    pub auth: String,
    pub recipes: String,
    pub ingredients: String,
    pub meal_planner: String,
}

impl ApiEndpoints {
    /// Read the endpoint set from `COOKBOOK_AUTH_URL`, `COOKBOOK_RECIPES_URL`,
    /// `COOKBOOK_INGREDIENTS_URL` and `COOKBOOK_MEAL_PLANNER_URL`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            auth: std::env::var("COOKBOOK_AUTH_URL").context("COOKBOOK_AUTH_URL is not set")?,
            recipes: std::env::var("COOKBOOK_RECIPES_URL")
                .context("COOKBOOK_RECIPES_URL is not set")?,
            ingredients: std::env::var("COOKBOOK_INGREDIENTS_URL")
                .context("COOKBOOK_INGREDIENTS_URL is not set")?,
            meal_planner: std::env::var("COOKBOOK_MEAL_PLANNER_URL")
                .context("COOKBOOK_MEAL_PLANNER_URL is not set")?,
        })
    }
}

/// Tagged outcome of an API call.
///
/// The backend uses 401 and 409 as part of normal control flow (bad
/// credentials, email or ingredient already taken, missing auth on a
/// mutation), so the client does not turn them into failures. They come
/// back as `Unauthorized`/`Conflict` carrying the body's `error` message,
/// and only the remaining non-success statuses fail the call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<T> {
    Ok(T),
    /// The server answered 401; the session token is missing, invalid or
    /// expired, or the credentials were wrong.
    Unauthorized { message: Option<String> },
    /// The server answered 409; the resource already exists.
    Conflict { message: Option<String> },
}

impl<T> ApiResult<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, ApiResult::Ok(_))
    }

    /// The success payload, if any.
    pub fn ok(self) -> Option<T> {
        match self {
            ApiResult::Ok(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        match self {
            ApiResult::Ok(value) => ApiResult::Ok(f(value)),
            ApiResult::Unauthorized { message } => ApiResult::Unauthorized { message },
            ApiResult::Conflict { message } => ApiResult::Conflict { message },
        }
    }
}

/// Fallback message when a failed response carries no parseable error body.
const GENERIC_FAILURE: &str = "Request failed";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

pub struct CookbookClient {
    http: Client,
    endpoints: ApiEndpoints,
    session: Session,
}

impl CookbookClient {
    pub fn new(endpoints: ApiEndpoints, session: Session) -> Self {
        Self {
            http: Client::new(),
            endpoints,
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn set_token(&mut self, token: Option<String>) -> Result<()> {
        self.session.set_token(token)
    }

    /// Send a request with the client's header convention and translate the
    /// response.
    ///
    /// Every request gets `Content-Type: application/json` and, when a token
    /// is held, `X-Auth-Token`. The body is always parsed as JSON. Statuses
    /// 401 and 409 become [`ApiResult::Unauthorized`]/[`ApiResult::Conflict`];
    /// any other non-success status fails with the body's `error` message or
    /// a fixed fallback. One attempt per call, no retry or timeout.
    async fn request<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<ApiResult<T>> {
        let mut builder = builder.header("Content-Type", "application/json");
        if let Some(token) = self.session.token() {
            tracing::debug!("Attaching auth token: {}...", token_preview(token));
            builder = builder.header("X-Auth-Token", token);
        }

        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::CONFLICT {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error);
            tracing::debug!("Soft status {}: {:?}", status, message);
            return Ok(if status == StatusCode::UNAUTHORIZED {
                ApiResult::Unauthorized { message }
            } else {
                ApiResult::Conflict { message }
            });
        }

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            tracing::error!("Request failed with status {}: {}", status, message);
            anyhow::bail!(message);
        }

        let parsed = response.json().await?;
        Ok(ApiResult::Ok(parsed))
    }

    /// Fold a soft status back into the auth payload shape. The auth
    /// endpoint answers 401/409 with an `{error}` body, which is the same
    /// contract as a success with no token, so callers get one shape to
    /// inspect.
    fn fold_auth(outcome: ApiResult<AuthResponse>) -> AuthResponse {
        match outcome {
            ApiResult::Ok(data) => data,
            ApiResult::Unauthorized { message } | ApiResult::Conflict { message } => AuthResponse {
                token: None,
                user: None,
                error: message,
            },
        }
    }

    // Auth operations

    /// Register a new account. On success the response carries a token,
    /// which is stored in the session. An already-registered email comes
    /// back as a payload with `error` set and no token.
    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<AuthResponse> {
        let body = AuthRequest::Register {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        };
        let data = Self::fold_auth(
            self.request(self.http.post(&self.endpoints.auth).json(&body))
                .await?,
        );
        if let Some(token) = &data.token {
            self.session.set_token(Some(token.clone()))?;
            tracing::info!("Registered and authenticated as {}", email);
        }
        Ok(data)
    }

    /// Log in with existing credentials. Bad credentials come back as a
    /// payload with `error` set and no token stored.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthResponse> {
        let body = AuthRequest::Login {
            email: email.to_string(),
            password: password.to_string(),
        };
        let data = Self::fold_auth(
            self.request(self.http.post(&self.endpoints.auth).json(&body))
                .await?,
        );
        if let Some(token) = &data.token {
            self.session.set_token(Some(token.clone()))?;
            tracing::info!("Authenticated as {}", email);
        }
        Ok(data)
    }

    /// Check the held token against the backend. Short-circuits to `None`
    /// without a network call when no token is held; an invalid or expired
    /// token yields a payload without a `user`, hence `None` as well.
    pub async fn verify_token(&self) -> Result<Option<User>> {
        let Some(token) = self.session.token() else {
            tracing::debug!("No session token held, skipping verification");
            return Ok(None);
        };
        let body = AuthRequest::Verify {
            token: token.to_string(),
        };
        let data = Self::fold_auth(
            self.request(self.http.post(&self.endpoints.auth).json(&body))
                .await?,
        );
        Ok(data.user)
    }

    /// Drop the session token, in memory and in the store.
    pub fn logout(&mut self) -> Result<()> {
        tracing::info!("Logging out");
        self.session.set_token(None)
    }

    // Recipe operations

    pub async fn get_recipes(&self, filter: &RecipeFilter) -> Result<ApiResult<Vec<Recipe>>> {
        let mut url = self.endpoints.recipes.clone();
        let mut params = vec![];
        if let Some(category) = &filter.category {
            params.push(format!("category={}", urlencoding::encode(category)));
        }
        if let Some(search) = &filter.search {
            params.push(format!("search={}", urlencoding::encode(search)));
        }
        if let Some(id) = &filter.id {
            params.push(format!("id={}", urlencoding::encode(id)));
        }
        append_query(&mut url, &params);

        tracing::debug!("Fetching recipes: {}", url);
        self.request(self.http.get(&url)).await
    }

    pub async fn get_recipe(&self, id: i64) -> Result<ApiResult<Recipe>> {
        let url = format!("{}?id={}", self.endpoints.recipes, id);
        self.request(self.http.get(&url)).await
    }

    pub async fn create_recipe(&self, recipe: &NewRecipe) -> Result<ApiResult<Recipe>> {
        self.request(self.http.post(&self.endpoints.recipes).json(recipe))
            .await
    }

    pub async fn update_recipe(&self, update: &RecipeUpdate) -> Result<ApiResult<Recipe>> {
        self.request(self.http.put(&self.endpoints.recipes).json(update))
            .await
    }

    pub async fn delete_recipe(&self, id: i64) -> Result<ApiResult<()>> {
        let url = format!("{}?id={}", self.endpoints.recipes, id);
        // DELETE responses carry a JSON confirmation body; parse and discard.
        let outcome: ApiResult<serde_json::Value> = self.request(self.http.delete(&url)).await?;
        Ok(outcome.map(|_| ()))
    }

    // Ingredient operations

    pub async fn get_ingredients(
        &self,
        filter: &IngredientFilter,
    ) -> Result<ApiResult<Vec<Ingredient>>> {
        let mut url = self.endpoints.ingredients.clone();
        let mut params = vec![];
        if let Some(search) = &filter.search {
            params.push(format!("search={}", urlencoding::encode(search)));
        }
        append_query(&mut url, &params);

        self.request(self.http.get(&url)).await
    }

    /// Add an ingredient to the catalog. A duplicate name comes back as
    /// [`ApiResult::Conflict`].
    pub async fn create_ingredient(
        &self,
        ingredient: &NewIngredient,
    ) -> Result<ApiResult<Ingredient>> {
        self.request(self.http.post(&self.endpoints.ingredients).json(ingredient))
            .await
    }

    pub async fn delete_ingredient(&self, id: i64) -> Result<ApiResult<()>> {
        let url = format!("{}?id={}", self.endpoints.ingredients, id);
        let outcome: ApiResult<serde_json::Value> = self.request(self.http.delete(&url)).await?;
        Ok(outcome.map(|_| ()))
    }

    // Meal plan operations

    pub async fn get_meal_plans(&self, filter: &MealPlanFilter) -> Result<ApiResult<Vec<MealPlan>>> {
        let mut url = self.endpoints.meal_planner.clone();
        let mut params = vec![];
        if let Some(start) = filter.start_date {
            params.push(format!("start_date={}", start));
        }
        if let Some(end) = filter.end_date {
            params.push(format!("end_date={}", end));
        }
        append_query(&mut url, &params);

        tracing::debug!("Fetching meal plans: {}", url);
        self.request(self.http.get(&url)).await
    }

    pub async fn create_meal_plan(&self, plan: &NewMealPlan) -> Result<ApiResult<MealPlan>> {
        self.request(self.http.post(&self.endpoints.meal_planner).json(plan))
            .await
    }

    /// Delete meal plans by id or by (date, meal slot). Every field that is
    /// set on the selector is serialized, an empty `meal_type` included.
    pub async fn delete_meal_plan(&self, selector: &MealPlanSelector) -> Result<ApiResult<()>> {
        let mut url = self.endpoints.meal_planner.clone();
        let mut params = vec![];
        if let Some(id) = selector.id {
            params.push(format!("id={}", id));
        }
        if let Some(date) = selector.meal_date {
            params.push(format!("meal_date={}", date));
        }
        if let Some(meal_type) = &selector.meal_type {
            params.push(format!("meal_type={}", urlencoding::encode(meal_type)));
        }
        append_query(&mut url, &params);

        let outcome: ApiResult<serde_json::Value> = self.request(self.http.delete(&url)).await?;
        Ok(outcome.map(|_| ()))
    }
}

fn append_query(url: &mut String, params: &[String]) {
    if !params.is_empty() {
        url.push('?');
        url.push_str(&params.join("&"));
    }
}
