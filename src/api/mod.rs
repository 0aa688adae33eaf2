//! HTTP layer for the intéressement engine.
//!
//! Serves the HTML form and result page, plus a JSON endpoint exposing the
//! same estimate.

mod handlers;
mod html;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use html::{escape_html, render_form_page, render_result_page};
pub use request::{ENTERED_DURING_YEAR, EstimateRequest, FormRejection, FormSubmission};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
