//! File sharing feature: binary uploads kept as-is in the file store.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/upload` | Upload a file (multipart field `file`) |
//! | GET | `/api/files` | List stored files, newest first |
//! | GET | `/api/download/{filename}` | Download a stored file as an attachment |
//! | DELETE | `/api/delete/{filename}` | Delete a stored file |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::FileService;
