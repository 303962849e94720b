use bson::oid::ObjectId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Identity shared by every record, a MongoDB object id that travels as hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(ObjectId);

impl Id {
    pub fn new() -> Self {
        Id(ObjectId::new())
    }

    pub fn oid(&self) -> ObjectId {
        self.0
    }
}

impl Default for Id {
    fn default() -> Self {
        Id::new()
    }
}

impl From<ObjectId> for Id {
    fn from(oid: ObjectId) -> Self {
        Id(oid)
    }
}

impl FromStr for Id {
    type Err = bson::oid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s).map(Id)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        hex.parse().map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: Id,
    pub name: String,
    pub category: Option<String>,
    // e.g. grams, ml, cups
    pub unit: Option<String>,
    pub calories_per_unit: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRequest {
    #[serde(default)]
    pub name: String,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub calories_per_unit: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InventoryStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl InventoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InventoryStatus::InStock => "IN_STOCK",
            InventoryStatus::LowStock => "LOW_STOCK",
            InventoryStatus::OutOfStock => "OUT_OF_STOCK",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Id,
    pub ingredient_id: Id,
    pub quantity: f64,
    pub expiration_date: Option<NaiveDate>,
    // e.g. Pantry, Fridge, Freezer
    pub location: Option<String>,
    pub min_stock_level: f64,
    pub status: InventoryStatus,
}

/// Body of `POST /inventory`. There is no status field: status is always derived.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRequest {
    pub ingredient_id: Id,
    pub quantity: f64,
    pub expiration_date: Option<NaiveDate>,
    pub location: Option<String>,
    #[serde(default)]
    pub min_stock_level: f64,
}

/// Body of `PUT /inventory/<id>`. The ingredient of an item never changes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryUpdate {
    pub quantity: f64,
    pub expiration_date: Option<NaiveDate>,
    pub location: Option<String>,
    #[serde(default)]
    pub min_stock_level: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredientLink {
    pub ingredient_id: Id,
    pub quantity: f64,
    pub unit: Option<String>,
    pub notes: Option<String>,
}

/// A recipe together with the links it owns.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Id,
    pub title: String,
    pub description: Option<String>,
    pub instructions: String,
    pub category: Option<String>,
    // minutes
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub servings: Option<u32>,
    pub ingredients: Vec<RecipeIngredientLink>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// An empty recipe under a fresh identity, to be filled by the aggregate assembly.
    pub fn draft(now: DateTime<Utc>) -> Self {
        Recipe {
            id: Id::new(),
            title: String::new(),
            description: None,
            instructions: String::new(),
            category: None,
            prep_time: None,
            cook_time: None,
            servings: None,
            ingredients: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRequest {
    pub ingredient_id: Id,
    pub quantity: f64,
    pub unit: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub instructions: String,
    pub category: Option<String>,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub servings: Option<u32>,
    #[serde(default)]
    pub ingredients: Vec<LinkRequest>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDetail {
    pub ingredient: Ingredient,
    pub quantity: f64,
    pub unit: Option<String>,
    pub notes: Option<String>,
}

/// What recipe reads return: the recipe with every link's ingredient resolved.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    pub id: Id,
    pub title: String,
    pub description: Option<String>,
    pub instructions: String,
    pub category: Option<String>,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub servings: Option<u32>,
    pub ingredients: Vec<LinkDetail>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecipeDetail {
    /// `resolved` holds the ingredient of each link, in link order.
    pub fn assemble(recipe: Recipe, resolved: Vec<Ingredient>) -> Self {
        let ingredients = recipe
            .ingredients
            .into_iter()
            .zip(resolved)
            .map(|(link, ingredient)| LinkDetail {
                ingredient,
                quantity: link.quantity,
                unit: link.unit,
                notes: link.notes,
            })
            .collect();
        RecipeDetail {
            id: recipe.id,
            title: recipe.title,
            description: recipe.description,
            instructions: recipe.instructions,
            category: recipe.category,
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            servings: recipe.servings,
            ingredients,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}
