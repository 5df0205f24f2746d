//! Path to page table for the web front-end's URLs
//!
//! Lets the CLI accept a link copied from the browser (`studyshare open
//! /image/<id>`) and run the matching command.

/// A page of the front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Image(String),
    Upload,
    Profile,
    Saved,
    Login,
    ProfileSetup,
}

/// Whether a page is rendered with the navigation bar and footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    WithChrome,
    Standalone,
}

impl Route {
    /// Parse a path, or a full URL, into a route.
    ///
    /// Query strings, fragments, and one trailing slash are ignored.
    /// Unknown paths return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use studyshare::routes::{Layout, Route};
    ///
    /// let route = Route::parse("https://share.example.edu/image/x1?ref=home").unwrap();
    /// assert_eq!(route, Route::Image("x1".to_string()));
    /// assert_eq!(route.layout(), Layout::WithChrome);
    /// assert!(Route::parse("/admin").is_none());
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        let path = match url::Url::parse(input) {
            Ok(url) => url.path().to_string(),
            Err(_) => input
                .split(['?', '#'])
                .next()
                .unwrap_or_default()
                .to_string(),
        };

        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Some(Self::Home),
            ["image", id] => Some(Self::Image((*id).to_string())),
            ["upload"] => Some(Self::Upload),
            ["profile"] => Some(Self::Profile),
            ["saved"] => Some(Self::Saved),
            ["login"] => Some(Self::Login),
            ["profile-setup"] => Some(Self::ProfileSetup),
            _ => None,
        }
    }

    /// Canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Image(id) => format!("/image/{}", id),
            Self::Upload => "/upload".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::Saved => "/saved".to_string(),
            Self::Login => "/login".to_string(),
            Self::ProfileSetup => "/profile-setup".to_string(),
        }
    }

    pub fn layout(&self) -> Layout {
        match self {
            Self::Login | Self::ProfileSetup => Layout::Standalone,
            _ => Layout::WithChrome,
        }
    }

    /// Only the home page offers the search box.
    pub fn shows_search(&self) -> bool {
        matches!(self, Self::Home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_page() {
        let cases = [
            ("/", Route::Home),
            ("/image/x1", Route::Image("x1".to_string())),
            ("/upload", Route::Upload),
            ("/profile", Route::Profile),
            ("/saved", Route::Saved),
            ("/login", Route::Login),
            ("/profile-setup", Route::ProfileSetup),
        ];
        for (path, expected) in cases {
            let route = Route::parse(path).unwrap();
            assert_eq!(route, expected, "path {}", path);
            assert_eq!(route.path(), path);
        }
    }

    #[test]
    fn test_parse_tolerates_trailing_slash_and_query() {
        assert_eq!(Route::parse("/saved/"), Some(Route::Saved));
        assert_eq!(Route::parse("/upload?draft=1#top"), Some(Route::Upload));
        assert_eq!(Route::parse(""), Some(Route::Home));
    }

    #[test]
    fn test_parse_full_url() {
        assert_eq!(
            Route::parse("http://localhost:5173/profile"),
            Some(Route::Profile)
        );
    }

    #[test]
    fn test_parse_unknown_paths() {
        assert_eq!(Route::parse("/image"), None);
        assert_eq!(Route::parse("/image/x1/edit"), None);
        assert_eq!(Route::parse("/settings"), None);
    }

    #[test]
    fn test_layouts() {
        assert_eq!(Route::Login.layout(), Layout::Standalone);
        assert_eq!(Route::ProfileSetup.layout(), Layout::Standalone);
        assert_eq!(Route::Home.layout(), Layout::WithChrome);
        assert_eq!(Route::Image("x1".into()).layout(), Layout::WithChrome);
    }

    #[test]
    fn test_search_only_on_home() {
        assert!(Route::Home.shows_search());
        for route in [
            Route::Image("x1".into()),
            Route::Upload,
            Route::Profile,
            Route::Saved,
            Route::Login,
            Route::ProfileSetup,
        ] {
            assert!(!route.shows_search(), "{:?}", route);
        }
    }
}
