//! # Sympto Web
//!
//! HTTP API over a [`TriageEngine`](sympto::rag::TriageEngine).
//!
//! ## Quick Start
//!
//! ```bash
//! # Build the knowledge base, then serve it
//! sympto build
//! cargo run -p sympto-web -- --knowledge knowledge --port 3000
//! ```
//!
//! ## API Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/api/health` | Liveness and version |
//! | GET | `/api/stats` | Knowledge base statistics |
//! | POST | `/api/triage` | Full triage advisory for a message |
//! | POST | `/api/match` | Closest vocabulary entries |
//! | POST | `/api/predict` | Disease prediction from free text |
//! | POST | `/api/rank` | Rank diseases for explicit symptoms |
//! | POST | `/api/reload` | Reload the knowledge base from disk |

pub mod routes;
pub mod settings;
pub mod state;

pub use routes::create_router;
pub use settings::Settings;
pub use state::AppState;
