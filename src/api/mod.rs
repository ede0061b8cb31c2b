//! HTTP API module for the attendance and payroll engine.
//!
//! This module provides the REST endpoints for clock events, HR
//! approval of attendance, and payroll generation and finalization.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ApprovalRequest, ClockRequest, GenerateRequest, PayrollQuery};
pub use response::ApiError;
pub use state::AppState;
