use mongodb::bson::{Document, doc};

use crate::recipe::Recipe;

/// Search predicate built from the four optional filter fields.
///
/// Blank inputs never produce a clause, so an all-blank filter matches every
/// recipe. Present clauses are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub name: Option<String>,
    pub cuisine: Option<String>,
    pub category: Option<String>,
    pub occasion: Option<String>,
}

impl RecipeFilter {
    pub fn build(
        name: Option<&str>,
        cuisine: Option<&str>,
        category: Option<&str>,
        occasion: Option<&str>,
    ) -> Self {
        Self {
            name: non_blank(name),
            cuisine: non_blank(cuisine),
            category: non_blank(category),
            occasion: non_blank(occasion),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clause_count() == 0
    }

    pub fn clause_count(&self) -> usize {
        [&self.name, &self.cuisine, &self.category, &self.occasion]
            .iter()
            .filter(|clause| clause.is_some())
            .count()
    }

    pub fn to_document(&self) -> Document {
        let mut query = Document::new();
        if let Some(name) = &self.name {
            query.insert("name", doc! { "$regex": regex::escape(name), "$options": "i" });
        }
        if let Some(cuisine) = &self.cuisine {
            query.insert("cuisine", cuisine.as_str());
        }
        if let Some(category) = &self.category {
            query.insert("category", category.as_str());
        }
        if let Some(occasion) = &self.occasion {
            query.insert("occasion", occasion.as_str());
        }
        query
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(name) = &self.name {
            if !recipe.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }

        equals(&self.cuisine, &recipe.cuisine)
            && equals(&self.category, &recipe.category)
            && equals(&self.occasion, &recipe.occasion)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|value| !value.is_empty()).map(str::to_string)
}

fn equals(expected: &Option<String>, actual: &Option<String>) -> bool {
    match expected {
        Some(expected) => actual.as_deref() == Some(expected.as_str()),
        None => true,
    }
}
