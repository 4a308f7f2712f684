//! Access gating for Explore
//!
//! Three route classes, each with its own contract:
//!
//! - **Public**: `/_info` and the CORS preflight of `/basic-search`, no
//!   credential.
//! - **API key**: `/basic-search`, `Authorization: key <value>` forwarded to
//!   the search index.
//! - **Session**: everything else, the configured client secret.

mod credentials;
mod gate;
mod middleware;

pub use credentials::*;
pub use gate::*;
pub use middleware::*;
