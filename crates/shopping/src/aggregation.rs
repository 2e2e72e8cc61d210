use std::collections::HashMap;

use larder_recipe::{Ingredient, Recipe};

use crate::{ItemStatus, ShoppingListItem};

/// Running totals of ingredients, keyed by lowercase name, unit and
/// category.
///
/// Items keep the order in which their key was first seen, along with the
/// name spelling of that first occurrence. Quantities in different units
/// are never converted into each other.
#[derive(Default, Debug)]
pub struct IngredientTally {
    index: HashMap<(String, String, String), usize>,
    items: Vec<ShoppingListItem>,
}

impl IngredientTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, ingredient: &Ingredient) {
        let key = (
            ingredient.name.to_lowercase(),
            ingredient.unit_id.to_owned(),
            ingredient.category_id.to_owned(),
        );

        if let Some(pos) = self.index.get(&key) {
            self.items[*pos].quantity += ingredient.quantity;
            return;
        }

        self.index.insert(key, self.items.len());
        self.items.push(ShoppingListItem {
            id: larder_shared::new_id(),
            name: ingredient.name.to_owned(),
            category_id: ingredient.category_id.to_owned(),
            quantity: ingredient.quantity,
            unit_id: ingredient.unit_id.to_owned(),
            status: ItemStatus::Pending,
        });
    }

    pub fn add_recipe(&mut self, recipe: &Recipe) {
        for ingredient in &recipe.ingredients {
            self.add(ingredient);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<ShoppingListItem> {
        self.items
    }
}

/// Merges the ingredients of every recipe, in order. A recipe listed twice
/// counts twice.
pub fn aggregate<'a>(recipes: impl IntoIterator<Item = &'a Recipe>) -> Vec<ShoppingListItem> {
    let mut tally = IngredientTally::new();

    for recipe in recipes {
        tally.add_recipe(recipe);
    }

    tally.into_items()
}
