use std::fmt;

use mongodb::bson::Bson;
use serde::{Deserialize, Deserializer, Serialize};

use crate::i18n::tr;

pub const NAME_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Usually an ObjectId; older documents may carry any other BSON value.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Bson>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub occasion: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: String,
    #[serde(rename = "step", default, deserialize_with = "null_as_default")]
    pub steps: Vec<String>,
    #[serde(default)]
    pub last_update: Option<String>,
}

impl Recipe {
    pub fn from_new(new_recipe: &NewRecipe, last_update: String) -> Self {
        Self {
            id: None,
            name: new_recipe.name.clone(),
            cuisine: new_recipe.cuisine.map(|value| value.label().to_string()),
            category: new_recipe.category.map(|value| value.label().to_string()),
            occasion: new_recipe.occasion.map(|value| value.label().to_string()),
            ingredients: new_recipe.ingredients.clone(),
            steps: new_recipe.steps.clone(),
            last_update: Some(last_update),
        }
    }

    /// Identifier as shown in the UI and passed back to the store.
    pub fn id_hex(&self) -> Option<String> {
        self.id.as_ref().map(|id| match id {
            Bson::ObjectId(object_id) => object_id.to_hex(),
            Bson::String(value) => value.clone(),
            other => other.to_string(),
        })
    }

    pub fn cuisine_label(&self) -> &str {
        self.cuisine.as_deref().unwrap_or("N/A")
    }

    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("N/A")
    }

    pub fn occasion_label(&self) -> &str {
        self.occasion.as_deref().unwrap_or("N/A")
    }

    pub fn to_pretty_json(&self) -> Result<String, String> {
        let value = serde_json::json!({
            "id": self.id_hex(),
            "name": self.name,
            "cuisine": self.cuisine,
            "category": self.category,
            "occasion": self.occasion,
            "ingredients": self.ingredients,
            "steps": self.steps,
            "last_update": self.last_update,
        });
        serde_json::to_string_pretty(&value).map_err(|error| error.to_string())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewRecipe {
    pub name: String,
    pub cuisine: Option<Cuisine>,
    pub category: Option<Category>,
    pub occasion: Option<Occasion>,
    pub ingredients: String,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingName,
    NameTooLong,
    MissingIngredients,
}

impl ValidationError {
    pub fn message(self) -> &'static str {
        match self {
            ValidationError::MissingName => tr("Recipe name is required!"),
            ValidationError::NameTooLong => tr("Recipe name must be at most 50 characters."),
            ValidationError::MissingIngredients => tr("Ingredients are required!"),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl NewRecipe {
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::MissingName);
        } else if name.chars().count() > NAME_MAX_CHARS {
            errors.push(ValidationError::NameTooLong);
        }

        if self.ingredients.trim().is_empty() {
            errors.push(ValidationError::MissingIngredients);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cuisine {
    African,
    American,
    Asian,
    European,
    Indian,
    MiddleEastern,
}

pub const ALL_CUISINES: &[Cuisine] = &[
    Cuisine::African,
    Cuisine::American,
    Cuisine::Asian,
    Cuisine::European,
    Cuisine::Indian,
    Cuisine::MiddleEastern,
];

impl Cuisine {
    pub const fn label(self) -> &'static str {
        match self {
            Cuisine::African => "African",
            Cuisine::American => "American",
            Cuisine::Asian => "Asian",
            Cuisine::European => "European",
            Cuisine::Indian => "Indian",
            Cuisine::MiddleEastern => "Middle Eastern",
        }
    }
}

impl fmt::Display for Cuisine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(tr(self.label()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Bread,
    Rice,
    Pasta,
    Curry,
    Salad,
    Soup,
    Meat,
    Fish,
    Dessert,
    Others,
}

pub const ALL_CATEGORIES: &[Category] = &[
    Category::Bread,
    Category::Rice,
    Category::Pasta,
    Category::Curry,
    Category::Salad,
    Category::Soup,
    Category::Meat,
    Category::Fish,
    Category::Dessert,
    Category::Others,
];

impl Category {
    pub const fn label(self) -> &'static str {
        match self {
            Category::Bread => "Bread",
            Category::Rice => "Rice",
            Category::Pasta => "Pasta",
            Category::Curry => "Curry",
            Category::Salad => "Salad",
            Category::Soup => "Soup",
            Category::Meat => "Meat",
            Category::Fish => "Fish",
            Category::Dessert => "Dessert",
            Category::Others => "Others (source etc.)",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(tr(self.label()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occasion {
    QuickAndEasy,
    Spicy,
    Healthy,
    Party,
    Vegetarian,
}

pub const ALL_OCCASIONS: &[Occasion] = &[
    Occasion::QuickAndEasy,
    Occasion::Spicy,
    Occasion::Healthy,
    Occasion::Party,
    Occasion::Vegetarian,
];

impl Occasion {
    pub const fn label(self) -> &'static str {
        match self {
            Occasion::QuickAndEasy => "Quick & Easy",
            Occasion::Spicy => "Spicy",
            Occasion::Healthy => "Healthy",
            Occasion::Party => "Party",
            Occasion::Vegetarian => "Vegetarian",
        }
    }
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(tr(self.label()))
    }
}
