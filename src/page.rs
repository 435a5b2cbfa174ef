use std::fs;

use tracing::{debug, warn};

const DEFAULT_TEMPLATE: &str = include_str!("../templates/index.html");
const ASSET_QUERY: &str = "{{ asset_query }}";

/// The form page served at `/`, rendered once at startup.
#[derive(Debug, Clone)]
pub struct IndexPage {
    html: String,
}

impl IndexPage {
    /// Load the template from disk, falling back to the bundled copy.
    pub fn load(template_path: &str, asset_version: Option<&str>) -> Self {
        let template = match fs::read_to_string(template_path) {
            Ok(content) => {
                debug!("Loaded page template from {}", template_path);
                content
            }
            Err(e) => {
                warn!("Using bundled page template, could not read {}: {}", template_path, e);
                DEFAULT_TEMPLATE.to_string()
            }
        };
        Self::from_template(&template, asset_version)
    }

    pub fn from_template(template: &str, asset_version: Option<&str>) -> Self {
        // Cache busting: a new version string forces clients to refetch assets
        let query = asset_version
            .map(|v| format!("?v={}", crate::render::escape_html(v)))
            .unwrap_or_default();
        Self {
            html: template.replace(ASSET_QUERY, &query),
        }
    }

    pub fn html(&self) -> &str {
        &self.html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_template_links_assets() {
        let page = IndexPage::from_template(DEFAULT_TEMPLATE, None);
        assert!(page.html().contains("/static/style.css\""));
        assert!(page.html().contains("/static/script.js\""));
        assert!(!page.html().contains(ASSET_QUERY));
    }

    #[test]
    fn asset_version_busts_caches() {
        let page = IndexPage::from_template(DEFAULT_TEMPLATE, Some("20240501"));
        assert!(page.html().contains("/static/style.css?v=20240501\""));
        assert!(page.html().contains("/static/script.js?v=20240501\""));
    }

    #[test]
    fn missing_template_falls_back_to_bundled() {
        let page = IndexPage::load("/no/such/template.html", None);
        assert!(page.html().contains("id=\"sentence\""));
    }

    #[test]
    fn reads_template_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, "<link href=\"/static/a.css{{ asset_query }}\">").unwrap();

        let page = IndexPage::load(path.to_str().unwrap(), Some("7"));
        assert_eq!(page.html(), "<link href=\"/static/a.css?v=7\">");
    }
}
