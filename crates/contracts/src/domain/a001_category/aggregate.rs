use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::enums::CategoryStatus;

// ============================================================================
// Aggregate
// ============================================================================

/// Категория услуг с базовой ценой (справочные данные)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub short_description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub base_price: f64,

    /// Идентификатор изображения на сервере изображений
    #[serde(rename = "imageUUID", default, skip_serializing_if = "Option::is_none")]
    pub image_uuid: Option<String>,

    #[serde(default)]
    pub status: CategoryStatus,
}

impl Category {
    /// URL изображения категории, если оно загружено
    pub fn image_url(&self, image_base: &str) -> Option<String> {
        self.image_uuid.as_ref().map(|uuid| {
            format!(
                "{}/categories/{}.jpg",
                image_base.trim_end_matches('/'),
                uuid
            )
        })
    }

    /// Краткий текст для карточки: короткое описание, иначе полное
    pub fn summary(&self) -> &str {
        if !self.short_description.trim().is_empty() {
            &self.short_description
        } else {
            self.description.as_deref().unwrap_or("")
        }
    }

    /// Совпадение названия с поисковой строкой без учёта регистра
    pub fn matches_title(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty() || self.title.to_lowercase().contains(&query.to_lowercase())
    }
}

// ============================================================================
// Sorting
// ============================================================================

/// Поле сортировки каталога
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategorySortBy {
    #[default]
    Price,
    Alphabet,
}

/// Направление сортировки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Настройки сортировки каталога (сбрасываются при выходе)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFilters {
    pub sort_by: CategorySortBy,
    pub order: SortOrder,
}

impl CategoryFilters {
    pub fn compare(&self, a: &Category, b: &Category) -> Ordering {
        let ordering = match self.sort_by {
            CategorySortBy::Price => a.base_price.total_cmp(&b.base_price),
            CategorySortBy::Alphabet => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        };
        self.order.apply(ordering)
    }

    /// Отсортировать категории согласно настройкам (стабильно)
    pub fn sort(&self, categories: &mut [Category]) {
        categories.sort_by(|a, b| self.compare(a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: i64, title: &str, price: f64) -> Category {
        Category {
            id,
            title: title.to_string(),
            short_description: String::new(),
            description: None,
            base_price: price,
            image_uuid: None,
            status: CategoryStatus::Active,
        }
    }

    #[test]
    fn test_sort_by_price() {
        let mut items = vec![
            category(1, "Связь", 1200.0),
            category(2, "Образование", 15000.0),
            category(3, "Транспорт", 2500.0),
        ];
        CategoryFilters::default().sort(&mut items);
        assert_eq!(items.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 3, 2]);

        let desc = CategoryFilters {
            sort_by: CategorySortBy::Price,
            order: SortOrder::Desc,
        };
        desc.sort(&mut items);
        assert_eq!(items.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_by_alphabet_ignores_case() {
        let mut items = vec![
            category(1, "banking", 1.0),
            category(2, "Airlines", 1.0),
            category(3, "cinema", 1.0),
        ];
        let filters = CategoryFilters {
            sort_by: CategorySortBy::Alphabet,
            order: SortOrder::Asc,
        };
        filters.sort(&mut items);
        assert_eq!(items.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2, 1, 3]);
    }

    #[test]
    fn test_image_url() {
        let mut c = category(1, "Связь", 1.0);
        assert_eq!(c.image_url("http://127.0.0.1:9000"), None);
        c.image_uuid = Some("abc".into());
        assert_eq!(
            c.image_url("http://127.0.0.1:9000/"),
            Some("http://127.0.0.1:9000/categories/abc.jpg".to_string())
        );
    }

    #[test]
    fn test_deserialize_backend_shape() {
        let json = r#"{"id":7,"title":"Связь","basePrice":1200.5,"imageUUID":"u-1","status":"DELETED"}"#;
        let c: Category = serde_json::from_str(json).unwrap();
        assert_eq!(c.id, 7);
        assert_eq!(c.base_price, 1200.5);
        assert_eq!(c.image_uuid.as_deref(), Some("u-1"));
        assert_eq!(c.status, CategoryStatus::Deleted);
        assert_eq!(c.summary(), "");
    }
}
