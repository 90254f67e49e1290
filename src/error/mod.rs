//! Error handling for surimon.
//!
//! Every failure the dashboard can hit is classified into one of a small set
//! of domain errors, all of which end up as operator-visible text:
//!
//! - [`FetchFailure`] - a telemetry request failed (transport, HTTP status, body decode)
//! - [`StreamError`] - the live log subscription failed, either for the whole
//!   connection ([`StreamError::Transport`]) or for a single message
//!   ([`StreamError::Decode`])
//! - [`ConfigSaveError`] - a step of the save / update / reload chain failed
//! - [`ChartRenderError`] - a series could not be prepared for drawing
//!
//! [`DashError`] unifies them for callers that need a single type.
//!
//! | Category | Retryable |
//! |----------|-----------|
//! | Network | Yes |
//! | Server | Yes |
//! | Data | No |
//! | Rendering | No |
//! | Configuration | No |
//! | System | No |

mod category;
mod control;
mod dash_error;
mod fetch;
mod render;
mod stream;

pub use category::ErrorCategory;
pub use control::{ChainStep, ConfigSaveError};
pub use dash_error::{DashError, DashResult};
pub use fetch::{generic_status_message, FailureKind, FetchFailure};
pub use render::ChartRenderError;
pub use stream::StreamError;
