//! Navigation shell
//!
//! Static route table of the dashboard front end. Landing and auth render
//! bare; the five working pages render under the header bar. There are no
//! route guards here, access control belongs to the store.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    /// Landing page, showing the dashboard
    Landing,
    Auth,
    Financial,
    Members,
    Products,
    Workshops,
    Goals,
    NotFound,
}

impl Page {
    /// API path serving this page's data, if it has any
    pub fn data_endpoint(&self) -> Option<&'static str> {
        match self {
            Page::Landing => Some("/api/v1/pages/dashboard"),
            Page::Financial => Some("/api/v1/pages/financial"),
            Page::Members => Some("/api/v1/pages/members"),
            Page::Products => Some("/api/v1/pages/products"),
            Page::Workshops => Some("/api/v1/pages/workshops"),
            Page::Goals => Some("/api/v1/pages/goals"),
            Page::Auth | Page::NotFound => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub page: Page,
    pub with_header: bool,
}

pub const ROUTES: [Route; 7] = [
    Route { path: "/", page: Page::Landing, with_header: false },
    Route { path: "/auth", page: Page::Auth, with_header: false },
    Route { path: "/financial", page: Page::Financial, with_header: true },
    Route { path: "/members", page: Page::Members, with_header: true },
    Route { path: "/products", page: Page::Products, with_header: true },
    Route { path: "/workshops", page: Page::Workshops, with_header: true },
    Route { path: "/goals", page: Page::Goals, with_header: true },
];

/// Header bar link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
}

pub const NAV_ITEMS: [NavItem; 6] = [
    NavItem { path: "/", label: "Dashboard" },
    NavItem { path: "/financial", label: "Financial" },
    NavItem { path: "/members", label: "Members" },
    NavItem { path: "/products", label: "Products" },
    NavItem { path: "/workshops", label: "Workshops" },
    NavItem { path: "/goals", label: "Goals" },
];

/// What the front end should render for a path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
    pub path: String,
    pub page: Page,
    pub with_header: bool,
    pub data_endpoint: Option<&'static str>,
    /// Header links, empty when the header is not shown
    pub nav: Vec<NavItem>,
}

/// Resolve a browser path; anything unknown is the not-found page.
pub fn resolve(path: &str) -> ResolvedRoute {
    let path = normalize(path);

    let (page, with_header) = ROUTES
        .iter()
        .find(|route| route.path == path)
        .map(|route| (route.page, route.with_header))
        .unwrap_or((Page::NotFound, false));

    ResolvedRoute {
        page,
        with_header,
        data_endpoint: page.data_endpoint(),
        nav: if with_header { NAV_ITEMS.to_vec() } else { Vec::new() },
        path,
    }
}

/// Drop query, fragment and trailing slashes
fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
