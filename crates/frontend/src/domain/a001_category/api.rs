use contracts::domain::a001_category::catalog::{fallback_categories, fallback_category};
use contracts::domain::a001_category::Category;
use gloo_net::http::Request;

use crate::shared::api_error::ApiError;
use crate::shared::api_utils::{read_json, send};

fn list_url(base: &str, title: Option<&str>) -> String {
    match title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => format!("{}/api/categories?title={}", base, urlencoding::encode(t)),
        None => format!("{}/api/categories", base),
    }
}

async fn fetch_categories(base: &str, title: Option<&str>) -> Result<Vec<Category>, ApiError> {
    let response = send(Request::get(&list_url(base, title))).await?;
    read_json(response).await
}

/// Active categories matching `title`; the built-in catalog is used when the
/// backend cannot be reached
pub async fn list_categories(base: &str, title: Option<&str>) -> Vec<Category> {
    match fetch_categories(base, title).await {
        Ok(categories) => categories
            .into_iter()
            .filter(|c| c.status.is_active())
            .collect(),
        Err(e) => {
            log::warn!("Failed to fetch categories, using built-in catalog: {}", e);
            fallback_categories(title)
        }
    }
}

pub async fn get_category(base: &str, id: i64) -> Option<Category> {
    let result = match send(Request::get(&format!("{}/api/categories/{}", base, id))).await {
        Ok(response) => read_json::<Category>(response).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(category) => Some(category),
        Err(e) => {
            log::warn!("Failed to fetch category {}, using built-in catalog: {}", id, e);
            fallback_category(id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_url() {
        assert_eq!(list_url("", None), "/api/categories");
        assert_eq!(list_url("", Some("  ")), "/api/categories");
        assert_eq!(
            list_url("http://localhost:8080", Some("связь")),
            "http://localhost:8080/api/categories?title=%D1%81%D0%B2%D1%8F%D0%B7%D1%8C"
        );
    }
}
