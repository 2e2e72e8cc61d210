use larder_catalog::Labels;
use larder_pantry::PantryItem;
use larder_recipe::{Ingredient, Recipe};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feasibility {
    CanMake,
    PartiallyCanMake,
}

/// An ingredient the pantry lacks or holds too little of.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingIngredient {
    pub name: String,
    pub required_quantity: f64,
    pub available_quantity: f64,
    pub unit_id: String,
    pub unit: String,
    pub category_id: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub recipe: Recipe,
    pub status: Feasibility,
    pub missing_ingredients: Vec<MissingIngredient>,
}

/// First pantry item with the same name, ignoring case, in the same unit.
pub fn find_match<'a>(ingredient: &Ingredient, pantry: &'a [PantryItem]) -> Option<&'a PantryItem> {
    let name = ingredient.name.to_lowercase();

    pantry
        .iter()
        .find(|item| item.unit_id == ingredient.unit_id && item.name.to_lowercase() == name)
}

/// Classifies one recipe against the pantry.
///
/// Returns `None` when nothing the recipe needs is available, or when the
/// recipe lists no ingredients at all.
pub fn assess(
    recipe: &Recipe,
    pantry: &[PantryItem],
    labels: &Labels,
) -> Option<(Feasibility, Vec<MissingIngredient>)> {
    if recipe.ingredients.is_empty() {
        return None;
    }

    let missing = recipe
        .ingredients
        .iter()
        .filter_map(|ingredient| {
            let available = match find_match(ingredient, pantry) {
                Some(item) if item.quantity >= ingredient.quantity => return None,
                Some(item) => item.quantity,
                None => 0.0,
            };

            Some(MissingIngredient {
                name: ingredient.name.to_owned(),
                required_quantity: ingredient.quantity,
                available_quantity: available,
                unit_id: ingredient.unit_id.to_owned(),
                unit: labels.unit(&ingredient.unit_id),
                category_id: ingredient.category_id.to_owned(),
                category: labels.category(&ingredient.category_id),
            })
        })
        .collect::<Vec<_>>();

    match missing.len() {
        0 => Some((Feasibility::CanMake, missing)),
        n if n < recipe.ingredients.len() => Some((Feasibility::PartiallyCanMake, missing)),
        _ => None,
    }
}

/// Recipes that can be made come first, then the partial ones. Within each
/// group the input order is kept.
pub fn suggest(recipes: Vec<Recipe>, pantry: &[PantryItem], labels: &Labels) -> Vec<Suggestion> {
    let mut suggestions = recipes
        .into_iter()
        .filter_map(|recipe| {
            let (status, missing_ingredients) = assess(&recipe, pantry, labels)?;

            Some(Suggestion {
                recipe,
                status,
                missing_ingredients,
            })
        })
        .collect::<Vec<_>>();

    suggestions.sort_by_key(|s| s.status);

    suggestions
}

impl super::Query {
    /// Every recipe checked against the owner's current pantry.
    pub async fn suggestions(&self, owner_id: &str) -> larder_shared::Result<Vec<Suggestion>> {
        let recipes = larder_recipe::Query(self.0.clone()).list().await?;
        let pantry = larder_pantry::Query(self.0.clone()).stock(owner_id).await?;
        let labels = larder_catalog::Query(self.0.clone()).labels().await?;

        let suggestions = suggest(recipes, &pantry, &labels);

        tracing::debug!(
            owner_id,
            pantry = pantry.len(),
            suggestions = suggestions.len(),
            "recipe suggestions computed"
        );

        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn ingredient(name: &str, quantity: f64, unit_id: &str) -> Ingredient {
        Ingredient {
            name: name.to_owned(),
            quantity,
            unit_id: unit_id.to_owned(),
            category_id: "dairy".to_owned(),
        }
    }

    fn recipe(title: &str, ingredients: Vec<Ingredient>) -> Recipe {
        Recipe {
            id: title.to_lowercase(),
            owner_id: "john".to_owned(),
            title: title.to_owned(),
            instructions: String::new(),
            servings: 1,
            ingredients,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn item(name: &str, quantity: f64, unit_id: &str) -> PantryItem {
        PantryItem {
            id: name.to_lowercase(),
            owner_id: "john".to_owned(),
            name: name.to_owned(),
            quantity,
            unit_id: unit_id.to_owned(),
            category_id: "dairy".to_owned(),
            expiration_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            location: "fridge".to_owned(),
            created_at: 0,
            updated_at: 0,
        }
    }

    fn labels() -> Labels {
        Labels::default()
            .with_unit("pcs", "pcs")
            .with_unit("ml", "ml")
            .with_category("dairy", "Dairy & Eggs")
    }

    #[test]
    fn test_omelette_is_partially_makeable() {
        let omelette = recipe(
            "Omelette",
            vec![ingredient("eggs", 3.0, "pcs"), ingredient("milk", 100.0, "ml")],
        );
        let pantry = vec![item("eggs", 6.0, "pcs"), item("milk", 50.0, "ml")];

        let (status, missing) = assess(&omelette, &pantry, &labels()).unwrap();

        assert_eq!(status, Feasibility::PartiallyCanMake);
        assert_eq!(
            missing,
            vec![MissingIngredient {
                name: "milk".to_owned(),
                required_quantity: 100.0,
                available_quantity: 50.0,
                unit_id: "ml".to_owned(),
                unit: "ml".to_owned(),
                category_id: "dairy".to_owned(),
                category: "Dairy & Eggs".to_owned(),
            }]
        );
    }

    #[test]
    fn test_exact_quantities_can_make() {
        let omelette = recipe(
            "Omelette",
            vec![ingredient("Eggs", 3.0, "pcs"), ingredient("milk", 100.0, "ml")],
        );
        let pantry = vec![item("EGGS", 3.0, "pcs"), item("Milk", 100.0, "ml")];

        let (status, missing) = assess(&omelette, &pantry, &labels()).unwrap();

        assert_eq!(status, Feasibility::CanMake);
        assert!(missing.is_empty());
    }

    #[test]
    fn test_unit_must_match() {
        let pancake = recipe(
            "Pancake",
            vec![
                ingredient("flour", 200.0, "g"),
                ingredient("milk", 300.0, "ml"),
                ingredient("eggs", 2.0, "pcs"),
            ],
        );
        let pantry = vec![
            item("flour", 1.0, "kg"),
            item("milk", 1000.0, "ml"),
            item("eggs", 12.0, "pcs"),
        ];

        let (status, missing) = assess(&pancake, &pantry, &labels()).unwrap();

        assert_eq!(status, Feasibility::PartiallyCanMake);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].name, "flour");
        assert_eq!(missing[0].available_quantity, 0.0);
        assert_eq!(missing[0].unit, "g");
    }

    #[test]
    fn test_first_match_wins() {
        let cereal = recipe("Cereal", vec![ingredient("milk", 200.0, "ml")]);
        let pantry = vec![item("milk", 100.0, "ml"), item("Milk", 500.0, "ml")];

        assert!(assess(&cereal, &pantry, &labels()).is_none());
    }

    #[test]
    fn test_nothing_available_is_excluded() {
        let omelette = recipe(
            "Omelette",
            vec![ingredient("eggs", 3.0, "pcs"), ingredient("milk", 100.0, "ml")],
        );
        let empty = recipe("Empty", vec![]);
        let pantry = vec![item("egg", 6.0, "pcs")];

        assert!(assess(&omelette, &pantry, &labels()).is_none());
        assert!(assess(&empty, &pantry, &labels()).is_none());
    }

    #[test]
    fn test_zero_quantity_needs_a_match() {
        let seasoning = recipe("Seasoning", vec![ingredient("salt", 0.0, "pinch")]);
        assert!(assess(&seasoning, &[], &labels()).is_none());

        let fried_egg = recipe(
            "Fried egg",
            vec![ingredient("salt", 0.0, "pinch"), ingredient("eggs", 1.0, "pcs")],
        );
        let pantry = vec![item("eggs", 6.0, "pcs")];

        let (status, missing) = assess(&fried_egg, &pantry, &labels()).unwrap();
        assert_eq!(status, Feasibility::PartiallyCanMake);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].name, "salt");
        assert_eq!(missing[0].required_quantity, 0.0);
        assert_eq!(missing[0].available_quantity, 0.0);

        let pantry = vec![item("eggs", 6.0, "pcs"), item("Salt", 0.0, "pinch")];
        let (status, missing) = assess(&fried_egg, &pantry, &labels()).unwrap();
        assert_eq!(status, Feasibility::CanMake);
        assert!(missing.is_empty());
    }

    #[test]
    fn test_suggest_orders_can_make_first() {
        let recipes = vec![
            recipe(
                "Omelette",
                vec![ingredient("eggs", 3.0, "pcs"), ingredient("milk", 100.0, "ml")],
            ),
            recipe("Boiled eggs", vec![ingredient("eggs", 2.0, "pcs")]),
            recipe("Latte", vec![ingredient("coffee", 1.0, "pcs")]),
            recipe(
                "Scrambled eggs",
                vec![ingredient("eggs", 4.0, "pcs"), ingredient("butter", 1.0, "pcs")],
            ),
            recipe("Fried egg", vec![ingredient("eggs", 1.0, "pcs")]),
        ];
        let pantry = vec![item("eggs", 6.0, "pcs"), item("milk", 50.0, "ml")];

        let suggestions = suggest(recipes, &pantry, &labels());

        assert_eq!(
            suggestions
                .iter()
                .map(|s| (s.recipe.title.as_str(), s.status))
                .collect::<Vec<_>>(),
            vec![
                ("Boiled eggs", Feasibility::CanMake),
                ("Fried egg", Feasibility::CanMake),
                ("Omelette", Feasibility::PartiallyCanMake),
                ("Scrambled eggs", Feasibility::PartiallyCanMake),
            ]
        );
    }
}
