use larder_mealplan::DateRange;
use larder_shared::Metadata;

use crate::{ShoppingList, aggregate};

/// `"{title} ({start})"` for a single day, `"{title} ({start} - {end})"`
/// otherwise.
pub fn list_name(title: &str, range: &DateRange) -> String {
    format!("{title} ({range})")
}

impl super::Command {
    /// Builds and saves a shopping list covering every recipe of a meal plan.
    ///
    /// Everything is read before the single insert, so a failure leaves no
    /// partial list behind.
    pub async fn generate_from_meal_plan(
        &self,
        meal_plan_id: impl Into<String>,
        metadata: &Metadata,
    ) -> larder_shared::Result<ShoppingList> {
        let meal_plan = larder_mealplan::Query(self.0.read_db.clone())
            .get(meal_plan_id, metadata)
            .await?;

        let recipes = larder_recipe::Query(self.0.read_db.clone())
            .resolve(&meal_plan.recipe_ids)
            .await?;

        let items = aggregate(&recipes);
        let range = meal_plan.date_range();
        let now = larder_shared::timestamp();

        let list = ShoppingList {
            id: larder_shared::new_id(),
            owner_id: metadata.trigger_by()?,
            group_id: None,
            meal_plan_id: Some(meal_plan.id.to_owned()),
            name: list_name(&meal_plan.title, &range),
            start_date: range.start,
            end_date: range.end,
            items,
            created_at: now,
            updated_at: now,
        };

        self.insert(&list).await?;

        tracing::info!(
            meal_plan_id = %meal_plan.id,
            shopping_list_id = %list.id,
            recipes = recipes.len(),
            "shopping list generated from meal plan"
        );

        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use larder_mealplan::MealPlanType;

    use super::*;

    #[test]
    fn test_list_name() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 17).unwrap();

        assert_eq!(
            list_name("Busy week", &MealPlanType::Weekly.date_range(date)),
            "Busy week (2024-01-14 - 2024-01-20)"
        );
        assert_eq!(
            list_name("Sunday roast", &MealPlanType::Daily.date_range(date)),
            "Sunday roast (2024-01-17)"
        );
    }
}
