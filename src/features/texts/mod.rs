//! Text sharing feature: plain-text documents persisted as one JSON record each.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/texts` | Create a text document |
//! | GET | `/api/texts` | List text summaries, most recently modified first |
//! | GET | `/api/texts/{id}` | Get a full text document |
//! | PUT | `/api/texts/{id}` | Replace title/content (and optionally author) |
//! | DELETE | `/api/texts/{id}` | Delete a text document |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::TextService;
