//! # Cookbook HTTP Client
//!
//! This module provides the HTTP client for the cookbook backend, covering
//! authentication, recipes, the ingredient catalog and meal planning.
//!
//! ## Modules
//!
//! - [`session`] - Session token lifecycle and pluggable persistence
//! - [`client`] - Main HTTP client implementation with all API methods
//! - [`types`] - Type definitions for API requests and responses
//!
//! ## Quick Start
//!
//! ```no_run
//! use cookbook_client::client::{ApiEndpoints, CookbookClient};
//! use cookbook_client::client::session::Session;
//! use cookbook_client::client::types::RecipeFilter;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let endpoints = ApiEndpoints::from_env()?;
//! let mut client = CookbookClient::new(endpoints, Session::ephemeral());
//!
//! // Log in; bad credentials come back as a payload, not an error
//! let auth = client.login("cook@example.com", "password").await?;
//! if let Some(error) = auth.error {
//!     anyhow::bail!("login rejected: {}", error);
//! }
//!
//! // Browse soups
//! let soups = client
//!     .get_recipes(&RecipeFilter {
//!         category: Some("Soups".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("Found {} soups", soups.ok().map_or(0, |r| r.len()));
//! # Ok(())
//! # }
//! ```

#[allow(clippy::module_inception)]
pub mod client;
pub mod session;
pub mod types;

pub use client::{ApiEndpoints, ApiResult, CookbookClient};
pub use session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};
pub use types::*;
