use contracts::domain::a001_category::{Category, CategoryFilters};

#[derive(Clone, Debug, Default)]
pub struct CategoriesListState {
    pub items: Vec<Category>,
    pub loading: bool,
    /// Title the current items were searched by
    pub searched_title: Option<String>,
}

impl CategoriesListState {
    pub fn loaded(&mut self, items: Vec<Category>, title: Option<String>) {
        self.items = items;
        self.searched_title = title;
        self.loading = false;
    }

    pub fn sorted(&self, filters: &CategoryFilters) -> Vec<Category> {
        let mut items = self.items.clone();
        filters.sort(&mut items);
        items
    }
}
