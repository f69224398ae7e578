//! Hash router: ordered routes, first match wins, not-found fallback.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use crate::error::{PatternError, RouterError};
use crate::navigation::location::{Location, SubscriptionId};
use crate::navigation::pattern::{PatternMatcher, RouteParams};

pub type RouteHandler = Rc<dyn Fn(&RouteParams) -> Result<(), RouterError>>;

struct Route {
    matcher: PatternMatcher,
    handler: RouteHandler,
}

/// What a resolution did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Matched { pattern: String, params: RouteParams },
    /// No pattern matched. The not-found handler, if any, has run.
    RouteNotFound { path: String },
}

struct RouterInner {
    location: Rc<dyn Location>,
    routes: RefCell<Vec<Route>>,
    not_found: RefCell<Option<RouteHandler>>,
    subscription: Cell<Option<SubscriptionId>>,
    current_path: RefCell<Option<String>>,
}

/// Cheap to clone; clones share routes and listening state.
#[derive(Clone)]
pub struct Router {
    inner: Rc<RouterInner>,
}

/// Split a fragment into the path used for matching and its parsed query.
///
/// An empty path resolves to `/`. The fragment arrives without its `#`, so
/// any `#` still present is part of the path.
pub fn split_location(fragment: &str) -> (String, Vec<(String, String)>) {
    let (path, query) = match fragment.split_once('?') {
        Some((path, query)) => (path, parse_query(query)),
        None => (fragment, Vec::new()),
    };
    let path = if path.is_empty() { "/" } else { path };
    (path.to_string(), query)
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    let decode = |s: &str| {
        urlencoding::decode(s)
            .map(|d| d.into_owned())
            .unwrap_or_else(|_| s.to_string())
    };
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (decode(k), decode(v)),
            None => (decode(pair), String::new()),
        })
        .collect()
}

impl Router {
    pub fn new(location: Rc<dyn Location>) -> Self {
        Router {
            inner: Rc::new(RouterInner {
                location,
                routes: RefCell::new(Vec::new()),
                not_found: RefCell::new(None),
                subscription: Cell::new(None),
                current_path: RefCell::new(None),
            }),
        }
    }

    /// Register a route. Identical patterns are not de-duplicated; the first
    /// one registered shadows the rest.
    pub fn register<F>(&self, pattern: &str, handler: F) -> Result<&Self, PatternError>
    where
        F: Fn(&RouteParams) -> Result<(), RouterError> + 'static,
    {
        let matcher = PatternMatcher::compile(pattern)?;
        debug!(pattern, params = matcher.param_names().len(), "route registered");
        self.inner.routes.borrow_mut().push(Route {
            matcher,
            handler: Rc::new(handler),
        });
        Ok(self)
    }

    pub fn register_not_found<F>(&self, handler: F) -> &Self
    where
        F: Fn(&RouteParams) -> Result<(), RouterError> + 'static,
    {
        *self.inner.not_found.borrow_mut() = Some(Rc::new(handler));
        self
    }

    pub fn route_count(&self) -> usize {
        self.inner.routes.borrow().len()
    }

    /// Resolve whatever the location currently holds.
    pub fn resolve_current_location(&self) -> Result<Dispatch, RouterError> {
        let fragment = self.inner.location.fragment();
        self.resolve(&fragment)
    }

    fn resolve(&self, fragment: &str) -> Result<Dispatch, RouterError> {
        let (path, query) = split_location(fragment);
        *self.inner.current_path.borrow_mut() = Some(path.clone());

        // The routes borrow ends before any handler runs so handlers may
        // navigate or register routes themselves.
        let found = self.inner.routes.borrow().iter().find_map(|route| {
            route.matcher.match_path(&path).map(|params| {
                (
                    route.matcher.pattern().to_string(),
                    params,
                    Rc::clone(&route.handler),
                )
            })
        });

        match found {
            Some((pattern, params, handler)) => {
                let params = params.with_query(query);
                debug!(%path, %pattern, "route matched");
                handler(&params).map_err(|err| {
                    warn!(%path, %pattern, error = %err, "route handler failed");
                    err
                })?;
                Ok(Dispatch::Matched { pattern, params })
            }
            None => {
                let handler = self.inner.not_found.borrow().clone();
                match handler {
                    Some(handler) => {
                        debug!(%path, "no route matched, using not-found handler");
                        handler(&RouteParams::for_path(path.clone()).with_query(query))?;
                    }
                    None => warn!(%path, "no route matched and no not-found handler"),
                }
                Ok(Dispatch::RouteNotFound { path })
            }
        }
    }

    /// Listen for location changes and resolve the current location once.
    ///
    /// Calling `start` while already listening only re-resolves.
    pub fn start(&self) -> Result<Dispatch, RouterError> {
        if self.inner.subscription.get().is_none() {
            let weak: Weak<RouterInner> = Rc::downgrade(&self.inner);
            let id = self.inner.location.subscribe(Rc::new(move |fragment: &str| {
                match weak.upgrade() {
                    Some(inner) => Router { inner }.resolve(fragment).map(|_| ()),
                    None => Ok(()),
                }
            }));
            self.inner.subscription.set(Some(id));
            debug!("router listening");
        }
        self.resolve_current_location()
    }

    /// Stop listening. The mounted view is left alone; tearing it down is up
    /// to the caller.
    pub fn stop(&self) {
        if let Some(id) = self.inner.subscription.take() {
            self.inner.location.unsubscribe(id);
            debug!("router stopped");
        }
    }

    pub fn is_listening(&self) -> bool {
        self.inner.subscription.get().is_some()
    }

    /// Write `path` into the location. Resolution happens through the same
    /// change listener a user navigation would trigger.
    pub fn navigate_to(&self, path: &str) -> Result<(), RouterError> {
        self.inner.location.set_fragment(path)
    }

    /// Path of the most recent resolution.
    pub fn current_path(&self) -> Option<String> {
        self.inner.current_path.borrow().clone()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let patterns: Vec<String> = self
            .inner
            .routes
            .borrow()
            .iter()
            .map(|r| r.matcher.pattern().to_string())
            .collect();
        f.debug_struct("Router")
            .field("routes", &patterns)
            .field("listening", &self.is_listening())
            .finish()
    }
}
