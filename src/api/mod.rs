//! API Module
//!
//! HTTP handlers and routing for the transcript REST API.
//!
//! # Endpoints
//! - `GET /` - Service info
//! - `GET /health` - Liveness check
//! - `GET /api/v1/transcript/health` - Health including cache status
//! - `GET /api/v1/transcript/backends` - Transcript backend chain and availability
//! - `GET /api/v1/transcript/:video_id` - Transcript by video id
//! - `GET /api/v1/transcript/?url=` - Transcript by URL
//! - `POST /api/v1/transcript/` - Transcript by id or URL in a JSON body
//! - `DELETE /api/v1/transcript/:video_id/cache` - Drop cached entries of a video
//! - `GET /api/v1/transcript/cache/stats` - Cache statistics
//! - `DELETE /api/v1/transcript/cache/clear` - Drop every cached transcript

pub mod extract;
pub mod handlers;
pub mod routes;

pub use extract::{ApiJson, ApiQuery};
pub use handlers::*;
pub use routes::create_router;
