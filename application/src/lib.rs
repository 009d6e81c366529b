//! Application provides HTTP API for interacting with the [`Service`].

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod api;
pub mod args;
pub mod config;
mod context;
pub mod error;
pub mod guard;
pub mod pages;
pub mod session;

use std::sync::Arc;

use axum::{middleware, Extension, Router};
// Used in binary.
use axum_client_ip as _;
use refinery as _;
use tower_http as _;
use tracing_subscriber as _;
// Used in tests.
#[cfg(test)]
use axum_test as _;
#[cfg(test)]
use jsonwebtoken as _;
#[cfg(test)]
use serde_json as _;

pub use self::{
    args::Args,
    config::Config,
    context::{Authorized, Context},
    error::{AsError, Error},
};

/// [`Service`] with filled infrastructure dependencies.
///
/// [`Service`]: service::Service
pub type Service = service::Service<service::infra::Postgres>;

/// Builds the application [`Router`] on top of the provided [`Service`].
///
/// Every request under the protected admin area prefix passes the
/// [`guard::Guard`] before reaching any handler.
pub fn app(service: Service, auth: &config::Auth) -> Router {
    let guard = guard::Guard::new(&auth.guard);

    Router::new()
        .nest("/api", api::router())
        .merge(pages::router(&guard))
        .fallback(|| async { Error::from(error::CommonError::NotFound) })
        .layer(middleware::from_fn_with_state(
            Arc::new(guard),
            guard::enforce,
        ))
        .layer(Extension(session::CookieSettings {
            secure: auth.cookie_secure,
            max_age: auth.session_ttl,
        }))
        .layer(Extension(service))
}
