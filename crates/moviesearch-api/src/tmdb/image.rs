//! TMDB image and page URL helpers.

use std::fmt;
use std::str::FromStr;

/// Base URL for TMDB image assets.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// TMDB public site, shown as the "Powered by TMDB" link.
pub const TMDB_HOME_URL: &str = "https://www.themoviedb.org/";

/// Image size token used in asset URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    /// 500px wide rendition (posters).
    #[default]
    W500,
    /// Original upload (backdrops).
    Original,
}

impl ImageSize {
    /// Returns the URL path token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::W500 => "w500",
            Self::Original => "original",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "w500" => Ok(Self::W500),
            "original" => Ok(Self::Original),
            other => Err(format!(
                "invalid image size: {other} (expected \"w500\" or \"original\")"
            )),
        }
    }
}

/// Resolves a relative image path to an absolute asset URL.
///
/// Returns `None` when the movie has no image, so the caller can render a
/// placeholder. The URL is not checked for reachability.
#[must_use]
pub fn poster_url(path: Option<&str>, size: ImageSize) -> Option<String> {
    let path = path.filter(|p| !p.is_empty())?;
    Some(format!("{IMAGE_BASE_URL}{size}{path}"))
}

/// Returns the public TMDB page for a movie.
#[must_use]
pub fn movie_page_url(id: u64) -> String {
    format!("{TMDB_HOME_URL}movie/{id}")
}
