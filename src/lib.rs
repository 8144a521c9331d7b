//! # Cookbook Client Library
//!
//! A typed async client for a recipe-management backend made of four HTTP
//! endpoints: auth, recipes, ingredients and meal planner. The [`client`]
//! module holds the transport client, the session/token lifecycle and the
//! per-resource accessors.
//!
//! The backend treats HTTP 401 and 409 as part of normal control flow
//! (wrong credentials, email or ingredient already taken), so the client
//! surfaces them as data through [`client::ApiResult`] instead of failing
//! the call.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cookbook_client::{ApiEndpoints, CookbookClient, Session};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut client = CookbookClient::new(ApiEndpoints::from_env()?, Session::ephemeral());
//! client.login("cook@example.com", "password").await?;
//! # Ok(())
//! # }
//! ```

pub mod client;

pub use client::{ApiEndpoints, ApiResult, CookbookClient, FileTokenStore, Session};
