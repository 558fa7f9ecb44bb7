//! HTTP surface: `/auth` for accounts, `/todo` behind the bearer-token
//! middleware, plus `/` and `/health`.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
