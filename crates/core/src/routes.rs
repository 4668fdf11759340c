//! Route table mapping URL paths to views
//!
//! The table is static: it is built once and only ever read. Route metadata
//! is advisory; a navigation guard outside this crate decides what to do with
//! it.

use std::collections::HashMap;

use crate::{Error, Result, Role};

/// Views the client can display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    AdminLogin,
    ProfessionalLogin,
    CustomerLogin,
    AdminDashboard,
    CustomerDashboard,
    Register,
    CustomerInfo,
    ProfessionalInfo,
    Services,
    CreateService,
    UpdateService,
    ProfessionalDashboard,
    CreateRequest,
    SearchResults,
    ServiceRequests,
    PendingRequests,
    AcceptedRequests,
}

/// Access metadata attached to a route
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub role: Option<Role>,
}

impl RouteMeta {
    /// Metadata for a route that requires a session of `role`
    pub const fn authenticated(role: Role) -> Self {
        Self {
            requires_auth: true,
            role: Some(role),
        }
    }

    /// Whether a guard holding sessions for `active` roles would let the
    /// navigation through
    pub fn permits(&self, active: &[Role]) -> bool {
        if !self.requires_auth {
            return true;
        }
        match self.role {
            Some(role) => active.contains(&role),
            None => !active.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(&'static str),
    Param(&'static str),
}

fn parse_pattern(path: &'static str) -> Vec<Segment> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| match s.strip_prefix(':') {
            Some(name) => Segment::Param(name),
            None => Segment::Literal(s),
        })
        .collect()
}

/// A single entry of the route table
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub path: &'static str,
    pub name: &'static str,
    pub view: View,
    pub meta: RouteMeta,
    segments: Vec<Segment>,
}

impl RouteEntry {
    pub fn new(path: &'static str, name: &'static str, view: View) -> Self {
        Self {
            path,
            name,
            view,
            meta: RouteMeta::default(),
            segments: parse_pattern(path),
        }
    }

    #[must_use]
    pub fn with_meta(mut self, meta: RouteMeta) -> Self {
        self.meta = meta;
        self
    }

    fn capture(&self, parts: &[&str]) -> Option<HashMap<String, String>> {
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert((*name).to_string(), (*part).to_string());
                }
            }
        }
        Some(params)
    }
}

/// A route matched against a concrete path
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    pub entry: &'a RouteEntry,
    pub params: HashMap<String, String>,
}

impl RouteMatch<'_> {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Outcome of resolving a path
#[derive(Debug, Clone)]
pub enum Resolution<'a> {
    Matched(RouteMatch<'a>),
    Redirect(&'static str),
    NotFound,
}

/// Static lookup table of client routes
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    redirects: Vec<(&'static str, &'static str)>,
}

impl RouteTable {
    pub const fn new(entries: Vec<RouteEntry>) -> Self {
        Self {
            entries,
            redirects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_redirect(mut self, from: &'static str, to: &'static str) -> Self {
        self.redirects.push((from, to));
        self
    }

    /// The routes of the household services application
    pub fn standard() -> Self {
        let customer = RouteMeta::authenticated(Role::Customer);
        let professional = RouteMeta::authenticated(Role::Professional);

        Self::new(vec![
            RouteEntry::new("/home", "Home", View::Home),
            RouteEntry::new("/admin/login", "AdminLogin", View::AdminLogin),
            RouteEntry::new(
                "/professional/login",
                "ProfessionalLogin",
                View::ProfessionalLogin,
            ),
            RouteEntry::new("/customer/login", "CustomerLogin", View::CustomerLogin),
            RouteEntry::new("/admin/dashboard", "AdminDashboard", View::AdminDashboard),
            RouteEntry::new(
                "/customer/dashboard",
                "CustomerDashboard",
                View::CustomerDashboard,
            ),
            RouteEntry::new("/register", "Register", View::Register),
            RouteEntry::new("/admin/customer-info", "CustomerInfo", View::CustomerInfo),
            RouteEntry::new(
                "/admin/professional-info",
                "ProfessionalInfo",
                View::ProfessionalInfo,
            ),
            RouteEntry::new("/admin/services", "Services", View::Services),
            RouteEntry::new("/admin/create-service", "CreateService", View::CreateService),
            RouteEntry::new(
                "/admin/update-service/:id",
                "UpdateService",
                View::UpdateService,
            ),
            RouteEntry::new(
                "/professional/dashboard",
                "ProfessionalDashboard",
                View::ProfessionalDashboard,
            ),
            RouteEntry::new(
                "/customer/create-request",
                "CreateRequest",
                View::CreateRequest,
            )
            .with_meta(customer),
            RouteEntry::new(
                "/customer/search-results",
                "SearchResults",
                View::SearchResults,
            )
            .with_meta(customer),
            RouteEntry::new(
                "/customer/service-requests",
                "ServiceRequests",
                View::ServiceRequests,
            )
            .with_meta(customer),
            RouteEntry::new(
                "/professional/pending-requests",
                "PendingRequests",
                View::PendingRequests,
            )
            .with_meta(professional),
            RouteEntry::new(
                "/professional/accepted-requests",
                "AcceptedRequests",
                View::AcceptedRequests,
            )
            .with_meta(professional),
        ])
        .with_redirect("/", "/home")
    }

    /// Resolve a concrete path, ignoring any query string or fragment
    pub fn resolve(&self, path: &str) -> Resolution<'_> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = match path.trim_end_matches('/') {
            "" => "/",
            other => other,
        };

        if let Some(&(_, to)) = self.redirects.iter().find(|(from, _)| *from == trimmed) {
            return Resolution::Redirect(to);
        }

        let parts: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
        self.entries
            .iter()
            .find_map(|entry| {
                entry
                    .capture(&parts)
                    .map(|params| RouteMatch { entry, params })
            })
            .map_or(Resolution::NotFound, Resolution::Matched)
    }

    pub fn by_name(&self, name: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Build the concrete path of a named route
    pub fn href(&self, name: &str, params: &[(&str, &str)]) -> Result<String> {
        let entry = self
            .by_name(name)
            .ok_or_else(|| Error::RouteNotFound(name.to_string()))?;

        let mut path = String::new();
        for segment in &entry.segments {
            path.push('/');
            match segment {
                Segment::Literal(literal) => path.push_str(literal),
                Segment::Param(param) => {
                    let value = params
                        .iter()
                        .find(|(key, _)| key == param)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| Error::MissingRouteParam {
                            route: name.to_string(),
                            param: (*param).to_string(),
                        })?;
                    path.push_str(value);
                }
            }
        }
        Ok(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched<'a>(resolution: Resolution<'a>) -> RouteMatch<'a> {
        match resolution {
            Resolution::Matched(m) => m,
            other => panic!("expected a match, got {other:?}"),
        }
    }

    #[test]
    fn test_root_redirects_home() {
        let table = RouteTable::standard();
        assert!(matches!(table.resolve("/"), Resolution::Redirect("/home")));
        assert!(matches!(table.resolve(""), Resolution::Redirect("/home")));
    }

    #[test]
    fn test_literal_match() {
        let table = RouteTable::standard();
        let m = matched(table.resolve("/admin/services"));
        assert_eq!(m.entry.name, "Services");
        assert_eq!(m.entry.view, View::Services);
        assert!(m.params.is_empty());
        assert!(!m.entry.meta.requires_auth);
    }

    #[test]
    fn test_param_extraction() {
        let table = RouteTable::standard();
        let m = matched(table.resolve("/admin/update-service/42"));
        assert_eq!(m.entry.view, View::UpdateService);
        assert_eq!(m.param("id"), Some("42"));
    }

    #[test]
    fn test_trailing_slash_and_query_ignored() {
        let table = RouteTable::standard();
        let m = matched(table.resolve("/customer/search-results/?q=plumbing"));
        assert_eq!(m.entry.view, View::SearchResults);
    }

    #[test]
    fn test_not_found() {
        let table = RouteTable::standard();
        assert!(matches!(table.resolve("/nowhere"), Resolution::NotFound));
        // Parameter segments never match an empty segment
        assert!(matches!(
            table.resolve("/admin/update-service"),
            Resolution::NotFound
        ));
        assert!(matches!(
            table.resolve("/admin/update-service/1/extra"),
            Resolution::NotFound
        ));
    }

    #[test]
    fn test_role_metadata() {
        let table = RouteTable::standard();
        let m = matched(table.resolve("/customer/create-request"));
        assert_eq!(m.entry.meta, RouteMeta::authenticated(Role::Customer));

        let m = matched(table.resolve("/professional/accepted-requests"));
        assert_eq!(m.entry.meta.role, Some(Role::Professional));

        let guarded = table.iter().filter(|e| e.meta.requires_auth).count();
        assert_eq!(guarded, 5);
        assert_eq!(table.len(), 18);
    }

    #[test]
    fn test_meta_permits() {
        let meta = RouteMeta::authenticated(Role::Customer);
        assert!(!meta.permits(&[]));
        assert!(!meta.permits(&[Role::Admin]));
        assert!(meta.permits(&[Role::Admin, Role::Customer]));

        assert!(RouteMeta::default().permits(&[]));

        let any = RouteMeta {
            requires_auth: true,
            role: None,
        };
        assert!(!any.permits(&[]));
        assert!(any.permits(&[Role::Professional]));
    }

    #[test]
    fn test_href() {
        let table = RouteTable::standard();
        assert_eq!(
            table.href("UpdateService", &[("id", "7")]).unwrap(),
            "/admin/update-service/7"
        );
        assert_eq!(table.href("Home", &[]).unwrap(), "/home");
        assert!(matches!(
            table.href("UpdateService", &[]),
            Err(Error::MissingRouteParam { param, .. }) if param == "id"
        ));
        assert!(matches!(
            table.href("Nope", &[]),
            Err(Error::RouteNotFound(_))
        ));
    }

    #[test]
    fn test_names_unique() {
        let table = RouteTable::standard();
        let mut names: Vec<_> = table.iter().map(|e| e.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), table.len());
    }
}
