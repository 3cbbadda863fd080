use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Site database model. A site is a physical location owning devices.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SiteRow {
    pub id: i64,
    pub name: String,
}

impl SiteRow {
    /// Canonical URL of the site detail view.
    pub fn link(&self) -> String {
        format!("/api/v1/sites/{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_points_at_detail_view() {
        let site = SiteRow {
            id: 7,
            name: "north-field".to_string(),
        };
        assert_eq!(site.link(), "/api/v1/sites/7");
    }
}
