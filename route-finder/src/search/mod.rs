//! Search request coordination.
//!
//! Tracks what the user typed in the origin and destination fields, turns
//! the two resolved endpoints into a [`SearchRequest`], and runs the
//! `Idle → Submitting → Success | Failed` lifecycle of each attempt.
//!
//! Every submit gets a fresh [`RequestId`]. Only a response tagged with the
//! current id may change the session, which is how superseded and cleared
//! searches are cancelled without aborting the network call.

mod config;
mod coordinator;
mod error;
mod query;
mod session;

pub use config::{PayloadPolicy, SearchConfig};
pub use coordinator::{Completion, RouteBackend, SearchCoordinator, SearchRequest, SearchTicket};
pub use error::{SearchError, SelectError};
pub use query::{Field, QueryState};
pub use session::{RequestId, SearchSession, SessionState};
