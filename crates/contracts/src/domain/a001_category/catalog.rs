//! Встроенный каталог категорий.
//!
//! Используется клиентом, когда бэкенд недоступен, чтобы страница каталога
//! не оставалась пустой.

use once_cell::sync::Lazy;

use super::aggregate::Category;
use crate::enums::CategoryStatus;

static FALLBACK_CATEGORIES: Lazy<Vec<Category>> = Lazy::new(|| {
    [
        (1, "Образовательные услуги", "Услуги в сфере образования и обучения", 15000.0),
        (2, "Медицинские услуги", "Услуги здравоохранения и медицинского обслуживания", 3500.0),
        (3, "Транспортные услуги", "Услуги общественного и частного транспорта", 2500.0),
        (4, "Коммунальные услуги", "Жилищно-коммунальные услуги", 4500.0),
        (5, "Услуги связи", "Телефонная связь, интернет и телевидение", 1200.0),
        (6, "Бытовые услуги", "Ремонт, уборка и другие бытовые услуги", 2800.0),
    ]
    .into_iter()
    .map(|(id, title, short, price)| Category {
        id,
        title: title.to_string(),
        short_description: short.to_string(),
        description: None,
        base_price: price,
        image_uuid: None,
        status: CategoryStatus::Active,
    })
    .collect()
});

/// Категории встроенного каталога, отфильтрованные по названию
pub fn fallback_categories(title: Option<&str>) -> Vec<Category> {
    FALLBACK_CATEGORIES
        .iter()
        .filter(|c| title.map_or(true, |t| c.matches_title(t)))
        .cloned()
        .collect()
}

/// Категория встроенного каталога по идентификатору
pub fn fallback_category(id: i64) -> Option<Category> {
    FALLBACK_CATEGORIES.iter().find(|c| c.id == id).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_is_case_insensitive() {
        let found = fallback_categories(Some("СВЯЗИ"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 5);
    }

    #[test]
    fn test_empty_filter_returns_all() {
        assert_eq!(fallback_categories(None).len(), 6);
        assert_eq!(fallback_categories(Some("  ")).len(), 6);
    }

    #[test]
    fn test_lookup_by_id() {
        assert_eq!(fallback_category(3).map(|c| c.base_price), Some(2500.0));
        assert!(fallback_category(99).is_none());
    }
}
