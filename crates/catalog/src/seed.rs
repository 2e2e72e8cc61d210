use crate::{CategoryInput, UnitInput};

const UNITS: [(&str, &str); 9] = [
    ("gram", "g"),
    ("kilogram", "kg"),
    ("milliliter", "ml"),
    ("liter", "l"),
    ("piece", "pcs"),
    ("teaspoon", "tsp"),
    ("tablespoon", "tbsp"),
    ("cup", "cup"),
    ("pinch", "pinch"),
];

const CATEGORIES: [&str; 9] = [
    "Produce",
    "Dairy & Eggs",
    "Meat & Seafood",
    "Bakery",
    "Pantry Staples",
    "Frozen",
    "Beverages",
    "Spices & Condiments",
    "Other",
];

impl super::Command {
    /// Inserts the default vocabulary, skipping names that already exist.
    ///
    /// Returns how many units and categories were created.
    pub async fn seed_defaults(&self) -> larder_shared::Result<(usize, usize)> {
        let query = super::Query(self.0.read_db.clone());

        let existing_units = query
            .list_units()
            .await?
            .into_iter()
            .map(|u| u.name)
            .collect::<Vec<_>>();

        let mut units = 0;
        for (name, abbreviation) in UNITS {
            if existing_units.iter().any(|n| n == name) {
                continue;
            }

            self.create_unit(UnitInput {
                name: name.to_owned(),
                abbreviation: Some(abbreviation.to_owned()),
            })
            .await?;
            units += 1;
        }

        let existing_categories = query
            .list_categories()
            .await?
            .into_iter()
            .map(|c| c.name)
            .collect::<Vec<_>>();

        let mut categories = 0;
        for name in CATEGORIES {
            if existing_categories.iter().any(|n| n == name) {
                continue;
            }

            self.create_category(CategoryInput {
                name: name.to_owned(),
                description: None,
            })
            .await?;
            categories += 1;
        }

        tracing::info!(units, categories, "catalog seeded");

        Ok((units, categories))
    }
}
