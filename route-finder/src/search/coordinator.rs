//! Search request coordinator.

use std::future::Future;

use tracing::{debug, info, warn};

use crate::domain::{Location, LocationId, RegionKey, Route};

use super::config::PayloadPolicy;
use super::error::{SearchError, SelectError};
use super::query::{Field, QueryState};
use super::session::{RequestId, SearchSession, SessionState};

/// Request for a route search between two regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchRequest {
    pub origin_key: RegionKey,
    pub destination_key: RegionKey,
}

impl SearchRequest {
    /// Build a request from two resolved endpoints.
    pub fn between(origin: &Location, destination: &Location) -> Self {
        Self {
            origin_key: origin.region_key(),
            destination_key: destination.region_key(),
        }
    }
}

/// Remote route search.
///
/// Ranking by price and duration happens behind this trait; callers keep
/// the order they receive.
pub trait RouteBackend: Send + Sync {
    fn search_routes(
        &self,
        request: SearchRequest,
    ) -> impl Future<Output = Result<Vec<Route>, SearchError>> + Send;
}

/// A search the coordinator has issued and is waiting on.
///
/// The caller performs `request` and hands the outcome back to
/// [`SearchCoordinator::complete`] tagged with `request_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    pub request_id: RequestId,
    pub request: SearchRequest,
}

/// What happened to a completed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The session moved to this terminal state.
    Applied(SessionState),
    /// The response was for a superseded or cleared request and was dropped.
    Stale,
}

/// Owns both query fields and the search session for one screen.
///
/// All methods are synchronous. The only asynchronous step, the search call
/// itself, happens between [`submit`](Self::submit) and
/// [`complete`](Self::complete) outside the coordinator.
#[derive(Debug, Clone, Default)]
pub struct SearchCoordinator {
    origin: QueryState,
    destination: QueryState,
    session: SearchSession,
    policy: PayloadPolicy,
}

impl SearchCoordinator {
    pub fn new(policy: PayloadPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn field(&self, field: Field) -> &QueryState {
        match field {
            Field::Origin => &self.origin,
            Field::Destination => &self.destination,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut QueryState {
        match field {
            Field::Origin => &mut self.origin,
            Field::Destination => &mut self.destination,
        }
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// The user edited a field.
    pub fn set_text(&mut self, field: Field, text: impl Into<String>, locations: &[Location]) {
        self.field_mut(field).set_text(text, locations);
    }

    /// The user picked a candidate in a field.
    pub fn select(
        &mut self,
        field: Field,
        id: &LocationId,
        locations: &[Location],
    ) -> Result<(), SelectError> {
        self.field_mut(field).select(field, id, locations)
    }

    /// Submit a search for the current endpoints.
    ///
    /// A field the user never picked a candidate for falls back to its first
    /// candidate, which then becomes that field's resolved location. If
    /// either field has nothing to fall back to, nothing happens and `None`
    /// is returned: the session is untouched and no request is issued.
    ///
    /// Submitting while a search is in flight supersedes it.
    pub fn submit(&mut self) -> Option<SearchTicket> {
        let (Some(origin), Some(destination)) = (
            self.origin.endpoint().cloned(),
            self.destination.endpoint().cloned(),
        ) else {
            debug!("submit ignored: origin or destination unresolved");
            return None;
        };

        let request = SearchRequest::between(&origin, &destination);
        self.origin.resolve(origin);
        self.destination.resolve(destination);

        let superseding = self.session.state() == SessionState::Submitting;
        let request_id = self.session.begin();
        if superseding {
            debug!("search {request_id} supersedes the search in flight");
        }
        info!(
            "search {request_id}: {} -> {}",
            request.origin_key, request.destination_key
        );

        Some(SearchTicket {
            request_id,
            request,
        })
    }

    /// Deliver the outcome of a search issued by [`submit`](Self::submit).
    pub fn complete(
        &mut self,
        request_id: RequestId,
        outcome: Result<Vec<Route>, SearchError>,
    ) -> Completion {
        if !self.session.is_current(request_id) {
            debug!(
                "discarding stale response for search {request_id} (current {})",
                self.session.request_id()
            );
            return Completion::Stale;
        }

        let outcome = match outcome {
            Err(e) if e.is_payload() && self.policy == PayloadPolicy::Lenient => {
                warn!("search {request_id}: {e}; showing no routes");
                Ok(Vec::new())
            }
            Err(e) => {
                warn!("search {request_id} failed: {e}");
                Err(e)
            }
            ok => ok,
        };

        if self.session.finish(request_id, outcome) {
            Completion::Applied(self.session.state())
        } else {
            Completion::Stale
        }
    }

    /// Reset both fields and the session.
    ///
    /// Any search in flight becomes stale.
    pub fn clear(&mut self) {
        self.origin.clear();
        self.destination.clear();
        self.session.reset();
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::RouteId;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Type(Field, String),
        Submit,
        Succeed,
        Fail,
        Clear,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let field = prop_oneof![Just(Field::Origin), Just(Field::Destination)];
        prop_oneof![
            (field, "[A-Za-z]{0,3}").prop_map(|(f, t)| Op::Type(f, t)),
            Just(Op::Submit),
            Just(Op::Succeed),
            Just(Op::Fail),
            Just(Op::Clear),
        ]
    }

    fn catalog() -> Vec<Location> {
        ["Kyiv", "Lviv", "Berlin", "Lisbon", "Krakow"]
            .iter()
            .enumerate()
            .map(|(i, name)| Location::new(i.to_string(), *name, RegionKey::new(i as u64)).unwrap())
            .collect()
    }

    fn run(ops: &[Op]) -> (SearchCoordinator, Vec<RequestId>) {
        let catalog = catalog();
        let mut coordinator = SearchCoordinator::default();
        let mut issued = Vec::new();
        for op in ops {
            match op {
                Op::Type(field, text) => coordinator.set_text(*field, text.clone(), &catalog),
                Op::Submit => issued.extend(coordinator.submit().map(|t| t.request_id)),
                Op::Succeed => {
                    let id = coordinator.session().request_id();
                    let route = Route::new(
                        RouteId::new("r").unwrap(),
                        RegionKey::new(0),
                        RegionKey::new(1),
                        1.0,
                        1,
                        Vec::new(),
                    )
                    .unwrap();
                    coordinator.complete(id, Ok(vec![route]));
                }
                Op::Fail => {
                    let id = coordinator.session().request_id();
                    let err = SearchError::Transport { message: "x".into() };
                    coordinator.complete(id, Err(err));
                }
                Op::Clear => coordinator.clear(),
            }
        }
        (coordinator, issued)
    }

    proptest! {
        /// Clear from any reachable state yields the same idle session
        #[test]
        fn clear_is_idempotent(ops in proptest::collection::vec(op_strategy(), 0..20)) {
            let (mut coordinator, _) = run(&ops);
            coordinator.clear();
            let once = coordinator.clone();
            coordinator.clear();

            for c in [&once, &coordinator] {
                prop_assert_eq!(c.session().state(), SessionState::Idle);
                prop_assert!(c.session().routes().is_empty());
                prop_assert!(c.session().last_error().is_none());
                prop_assert_eq!(c.field(Field::Origin), &QueryState::new());
                prop_assert_eq!(c.field(Field::Destination), &QueryState::new());
            }
        }

        /// Request ids only grow, and nothing older than the current id is accepted
        #[test]
        fn stale_ids_never_apply(ops in proptest::collection::vec(op_strategy(), 0..20)) {
            let (mut coordinator, issued) = run(&ops);
            prop_assert!(issued.windows(2).all(|w| w[0] < w[1]));

            let before = coordinator.session().clone();
            let current = before.request_id();
            for id in issued.into_iter().filter(|id| *id != current) {
                prop_assert_eq!(coordinator.complete(id, Ok(Vec::new())), Completion::Stale);
            }
            prop_assert_eq!(coordinator.session(), &before);
        }
    }
}
