//! Single-page router: a static route table, lazily loaded views, and a
//! before-each step that copies the route's title onto the document.

use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;

use crate::{Error, Result};

pub const INDEX_TITLE: &str = "Phonetic Dictionary - AI 合成英文发音";

/// A page view. Rendering is left to the UI layer.
pub trait View: Send + Sync {
    fn name(&self) -> &str;
}

/// The application's only page.
#[derive(Debug, Default)]
pub struct IndexView;

impl View for IndexView {
    fn name(&self) -> &str {
        "Index"
    }
}

pub type ViewLoader = fn() -> Arc<dyn View>;

fn load_index() -> Arc<dyn View> {
    tracing::debug!("loading Index view");
    Arc::new(IndexView)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMeta {
    pub title: String,
}

pub struct Route {
    pub path: String,
    pub meta: RouteMeta,
    loader: ViewLoader,
    view: OnceCell<Arc<dyn View>>,
}

impl Route {
    pub fn new(path: impl Into<String>, title: impl Into<String>, loader: ViewLoader) -> Self {
        Self {
            path: path.into(),
            meta: RouteMeta {
                title: title.into(),
            },
            loader,
            view: OnceCell::new(),
        }
    }

    /// Loads the view on first use; later calls return the same instance.
    pub fn view(&self) -> Arc<dyn View> {
        self.view.get_or_init(self.loader).clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.view.get().is_some()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path)
            .field("meta", &self.meta)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// Document state the router is allowed to touch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
}

/// History-mode location handling under a base path.
#[derive(Debug, Clone)]
pub struct History {
    base: String,
    entries: Vec<String>,
}

impl History {
    pub fn new(base: &str) -> Self {
        let base = base.trim_start_matches('.').trim_end_matches('/').to_string();
        Self {
            base,
            entries: Vec::new(),
        }
    }

    /// Strips the base, query and fragment; always starts with `/`.
    pub fn normalize(&self, location: &str) -> String {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let path = match path.strip_prefix(self.base.as_str()) {
            Some(rest) if !self.base.is_empty() && (rest.is_empty() || rest.starts_with('/')) => {
                rest
            }
            _ => path,
        };
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        }
    }

    pub fn push(&mut self, path: String) {
        self.entries.push(path);
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of a successful navigation.
#[derive(Clone)]
pub struct Navigation {
    pub path: String,
    pub title: String,
    pub view: Arc<dyn View>,
}

impl fmt::Debug for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigation")
            .field("path", &self.path)
            .field("title", &self.title)
            .field("view", &self.view.name())
            .finish()
    }
}

#[derive(Debug)]
pub struct Router {
    routes: Vec<Route>,
    history: History,
    document: Document,
}

impl Router {
    /// The application's route table: `/` serves the Index view.
    pub fn new(base: &str) -> Self {
        Self::with_routes(base, vec![Route::new("/", INDEX_TITLE, load_index)])
    }

    pub fn with_routes(base: &str, routes: Vec<Route>) -> Self {
        Self {
            routes,
            history: History::new(base),
            document: Document::default(),
        }
    }

    pub fn resolve(&self, location: &str) -> Option<&Route> {
        let path = self.history.normalize(location);
        self.routes.iter().find(|r| r.path == path)
    }

    /// Resolves `location`, sets the document title, then loads the view.
    ///
    /// Unknown paths fail with `RouteNotFound` and change nothing.
    pub fn navigate(&mut self, location: &str) -> Result<Navigation> {
        let path = self.history.normalize(location);
        let route = self
            .routes
            .iter()
            .find(|r| r.path == path)
            .ok_or_else(|| Error::RouteNotFound {
                path: location.to_string(),
            })?;

        before_each(&mut self.document, route);

        let view = route.view();
        self.history.push(path.clone());
        tracing::debug!(path = %path, view = view.name(), "navigated");
        Ok(Navigation {
            path,
            title: route.meta.title.clone(),
            view,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new("/")
    }
}

fn before_each(document: &mut Document, to: &Route) {
    document.title = to.meta.title.clone();
}
