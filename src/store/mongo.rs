use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Bson, Document, doc};
use mongodb::sync::Collection;

use crate::filter::RecipeFilter;
use crate::recipe::{NewRecipe, Recipe};
use crate::store::{RecipeStore, StoreError, today_stamp};

#[derive(Debug, Clone)]
pub struct MongoRecipeStore {
    collection: Collection<Recipe>,
}

impl MongoRecipeStore {
    pub fn new(collection: Collection<Recipe>) -> Self {
        Self { collection }
    }
}

impl RecipeStore for MongoRecipeStore {
    fn search(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, StoreError> {
        if filter.is_empty() {
            log::debug!("Listing every recipe");
        } else {
            log::debug!("Searching recipes with {} clause(s)", filter.clause_count());
        }

        let cursor = self
            .collection
            .clone_with_type::<Document>()
            .find(filter.to_document())
            .run()
            .map_err(|err| StoreError::Read(err.to_string()))?;

        let mut recipes = Vec::new();
        for result in cursor {
            let document = result.map_err(|err| StoreError::Read(err.to_string()))?;
            match decode_recipe(document) {
                Ok(recipe) => recipes.push(recipe),
                Err((id, err)) => log::warn!("Skipping unreadable recipe {}: {}", id, err),
            }
        }
        Ok(recipes)
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Recipe>, StoreError> {
        let document = self
            .collection
            .clone_with_type::<Document>()
            .find_one(doc! { "_id": id_filter(id) })
            .run()
            .map_err(|err| StoreError::Read(err.to_string()))?;

        document
            .map(decode_recipe)
            .transpose()
            .map_err(|(id, err)| StoreError::Read(format!("recipe {id}: {err}")))
    }

    fn insert(&self, recipe: &NewRecipe) -> Result<String, StoreError> {
        let document = Recipe::from_new(recipe, today_stamp());
        let result = self
            .collection
            .insert_one(&document)
            .run()
            .map_err(|err| StoreError::Write(err.to_string()))?;

        let id = result
            .inserted_id
            .as_object_id()
            .map(|id| id.to_hex())
            .ok_or_else(|| StoreError::Write(String::from("insert returned a non-ObjectId id")))?;

        log::info!("Inserted recipe {:?} as {}", recipe.name, id);
        Ok(id)
    }

    fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id_filter(id) })
            .run()
            .map_err(|err| StoreError::Write(err.to_string()))?;

        if result.deleted_count == 0 {
            log::warn!("Delete of recipe {} removed nothing", id);
            return Err(StoreError::NotFound(id.to_string()));
        }

        log::info!("Deleted recipe {}", id);
        Ok(())
    }
}

/// Hex strings address ObjectIds; anything else is matched as a plain string id.
fn id_filter(id: &str) -> Bson {
    match ObjectId::parse_str(id) {
        Ok(object_id) => Bson::ObjectId(object_id),
        Err(_) => Bson::String(id.to_string()),
    }
}

fn decode_recipe(document: Document) -> Result<Recipe, (String, bson::de::Error)> {
    let id = document.get("_id").map_or_else(|| String::from("<no id>"), ToString::to_string);
    bson::from_document(document).map_err(|err| (id, err))
}

#[cfg(test)]
mod tests {
    use std::env;

    use uuid::Uuid;

    use super::*;
    use crate::recipe::{Category, Cuisine, Occasion};
    use crate::settings::MongoSettings;
    use crate::store::connection::{connect, resolve_collection};

    #[test]
    fn id_filter_accepts_object_and_legacy_ids() {
        let object_id = ObjectId::new();
        assert_eq!(id_filter(&object_id.to_hex()), Bson::ObjectId(object_id));
        assert_eq!(id_filter("legacy-1"), Bson::String(String::from("legacy-1")));
    }

    #[test]
    fn decode_reports_id_of_unreadable_document() {
        let readable = doc! { "_id": "legacy-1", "name": Bson::Null, "ingredients": "x" };
        let recipe = decode_recipe(readable).expect("legacy document should decode");
        assert_eq!(recipe.id_hex().as_deref(), Some("legacy-1"));

        let broken = doc! { "_id": "legacy-2", "step": "not a list" };
        let (id, _) = decode_recipe(broken).expect_err("step must be a list");
        assert_eq!(id, "\"legacy-2\"");
    }

    #[test]
    fn round_trip_against_live_server() {
        let uri = match env::var("RECIPE_BOOK_TEST_URI") {
            Ok(value) => value,
            Err(_) => {
                eprintln!("skipping live round trip: RECIPE_BOOK_TEST_URI not provided");
                return;
            }
        };

        let client = connect(&uri).expect("failed to connect using RECIPE_BOOK_TEST_URI");
        let settings = MongoSettings {
            uri,
            database: format!("recipes-{}", Uuid::new_v4().simple()),
            collection: String::from("recipes"),
        };
        let store = MongoRecipeStore::new(resolve_collection(&client, &settings));

        let sushi = NewRecipe {
            name: String::from("Sushi"),
            cuisine: Some(Cuisine::Asian),
            category: Some(Category::Fish),
            occasion: Some(Occasion::Healthy),
            ingredients: String::from("Rice\nFish"),
            steps: vec![String::from("Cook rice"), String::from("Roll")],
        };
        let curry = NewRecipe {
            name: String::from("Green curry"),
            cuisine: Some(Cuisine::Asian),
            category: Some(Category::Curry),
            occasion: Some(Occasion::Spicy),
            ingredients: String::from("Paste"),
            steps: vec![String::from("Simmer")],
        };

        let sushi_id = store.insert(&sushi).expect("insert sushi");
        store.insert(&curry).expect("insert curry");

        let raw = store.collection.clone_with_type::<Document>();
        raw.insert_one(doc! { "_id": "legacy-1", "name": Bson::Null, "ingredients": "Bread" })
            .run()
            .expect("insert legacy recipe");
        raw.insert_one(doc! { "_id": "legacy-2", "name": "Broken", "step": 3 })
            .run()
            .expect("insert unreadable recipe");

        let all = store.search(&RecipeFilter::default()).expect("search all");
        assert_eq!(all.len(), 3);
        let legacy = store.get_by_id("legacy-1").expect("fetch legacy").expect("legacy exists");
        assert_eq!(legacy.ingredients, "Bread");
        store.delete_by_id("legacy-1").expect("delete legacy");

        let found = store
            .search(&RecipeFilter::build(Some("sushi"), None, None, None))
            .expect("search by name");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id_hex().as_deref(), Some(sushi_id.as_str()));

        let fetched = store.get_by_id(&sushi_id).expect("fetch").expect("recipe should exist");
        assert_eq!(fetched.steps, sushi.steps);
        assert_eq!(fetched.cuisine.as_deref(), Some("Asian"));

        assert_eq!(store.get_by_id("not-an-id").expect("malformed id"), None);

        store.delete_by_id(&sushi_id).expect("delete");
        assert_eq!(store.get_by_id(&sushi_id).expect("fetch after delete"), None);
        assert_eq!(
            store.delete_by_id(&sushi_id),
            Err(StoreError::NotFound(sushi_id.clone()))
        );

        let _ = client.database(&settings.database).drop().run();
    }
}
