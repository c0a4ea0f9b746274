use std::sync::RwLock;

use mongodb::bson::Bson;
use mongodb::bson::oid::ObjectId;

use crate::filter::RecipeFilter;
use crate::recipe::{NewRecipe, Recipe};
use crate::store::{RecipeStore, StoreError, today_stamp};

/// Process-local backend selected with `MOCK_DB=1`. Keeps insertion order.
#[derive(Debug, Default)]
pub struct MemoryRecipeStore {
    recipes: RwLock<Vec<Recipe>>,
}

impl MemoryRecipeStore {
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.recipes.read().expect("recipe store lock poisoned").len()
    }
}

impl RecipeStore for MemoryRecipeStore {
    fn search(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, StoreError> {
        let recipes = self.recipes.read().expect("recipe store lock poisoned");
        Ok(recipes.iter().filter(|recipe| filter.matches(recipe)).cloned().collect())
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Recipe>, StoreError> {
        let recipes = self.recipes.read().expect("recipe store lock poisoned");
        Ok(recipes.iter().find(|recipe| has_id(recipe, id)).cloned())
    }

    fn insert(&self, recipe: &NewRecipe) -> Result<String, StoreError> {
        let mut document = Recipe::from_new(recipe, today_stamp());
        let id = ObjectId::new();
        document.id = Some(Bson::ObjectId(id));

        self.recipes.write().expect("recipe store lock poisoned").push(document);
        log::info!("Inserted recipe {:?} as {} (in memory)", recipe.name, id);
        Ok(id.to_hex())
    }

    fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let mut recipes = self.recipes.write().expect("recipe store lock poisoned");
        let position = recipes
            .iter()
            .position(|recipe| has_id(recipe, id))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        recipes.remove(position);
        Ok(())
    }
}

fn has_id(recipe: &Recipe, id: &str) -> bool {
    recipe.id_hex().as_deref() == Some(id)
}
