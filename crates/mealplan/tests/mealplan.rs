use chrono::NaiveDate;
use larder_catalog::{CategoryInput, UnitInput};
use larder_mealplan::{Command, Feasibility, MealPlanInput, MealPlanType, Query};
use larder_pantry::PantryItemInput;
use larder_recipe::{Ingredient, RecipeInput};
use larder_shared::{Metadata, State};
use temp_dir::TempDir;

mod helpers;

struct Catalog {
    pcs: String,
    ml: String,
    dairy: String,
}

async fn catalog(state: &State) -> anyhow::Result<Catalog> {
    let cmd = larder_catalog::Command(state.clone());
    let mut ids = vec![];
    for (name, abbreviation) in [("piece", "pcs"), ("milliliter", "ml")] {
        let unit = cmd
            .create_unit(UnitInput {
                name: name.to_owned(),
                abbreviation: Some(abbreviation.to_owned()),
            })
            .await?;
        ids.push(unit.id);
    }

    let dairy = cmd
        .create_category(CategoryInput {
            name: "Dairy & Eggs".to_owned(),
            description: None,
        })
        .await?;

    Ok(Catalog {
        pcs: ids[0].to_owned(),
        ml: ids[1].to_owned(),
        dairy: dairy.id,
    })
}

async fn recipe(
    state: &State,
    title: &str,
    ingredients: Vec<(&str, f64, &str)>,
    catalog: &Catalog,
) -> anyhow::Result<String> {
    let recipe = larder_recipe::Command(state.clone())
        .create(
            RecipeInput {
                title: title.to_owned(),
                instructions: String::new(),
                servings: 2,
                ingredients: ingredients
                    .into_iter()
                    .map(|(name, quantity, unit_id)| Ingredient {
                        name: name.to_owned(),
                        quantity,
                        unit_id: unit_id.to_owned(),
                        category_id: catalog.dairy.to_owned(),
                    })
                    .collect(),
            },
            &Metadata::by("john"),
        )
        .await?;

    Ok(recipe.id)
}

fn plan(recipe_ids: Vec<String>) -> MealPlanInput {
    MealPlanInput {
        title: "Week 3".to_owned(),
        date: NaiveDate::from_ymd_opt(2024, 1, 17).unwrap(),
        plan_type: MealPlanType::Weekly,
        recipe_ids,
    }
}

#[tokio::test]
async fn test_meal_plan_crud() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let catalog = catalog(&state).await?;
    let cmd = Command(state.clone());
    let query = Query(state.read_db.clone());
    let john = Metadata::by("john");
    let albert = Metadata::by("albert");

    let omelette = recipe(
        &state,
        "Omelette",
        vec![("eggs", 3.0, catalog.pcs.as_str())],
        &catalog,
    )
    .await?;
    let latte = recipe(
        &state,
        "Latte",
        vec![("milk", 200.0, catalog.ml.as_str())],
        &catalog,
    )
    .await?;

    let empty = cmd.create(plan(vec![]), &john).await;
    assert!(matches!(empty, Err(larder_shared::Error::Validate(_))));

    let dangling = cmd
        .create(plan(vec![omelette.to_owned(), "missing".to_owned()]), &john)
        .await
        .unwrap_err();
    assert_eq!(dangling.to_string(), "recipe not found");

    let meal_plan = cmd
        .create(
            plan(vec![latte.to_owned(), omelette.to_owned(), latte.to_owned()]),
            &john,
        )
        .await?;
    assert_eq!(
        meal_plan.date_range().start,
        NaiveDate::from_ymd_opt(2024, 1, 14).unwrap()
    );

    let detail = query.get_detail(&meal_plan.id, &john).await?;
    assert_eq!(
        detail.recipes.iter().map(|r| r.title.as_str()).collect::<Vec<_>>(),
        vec!["Latte", "Omelette", "Latte"]
    );

    assert!(matches!(
        query.get(&meal_plan.id, &albert).await,
        Err(larder_shared::Error::Forbidden)
    ));
    assert!(query.list("albert").await?.is_empty());

    let updated = cmd
        .update(
            &meal_plan.id,
            MealPlanInput {
                plan_type: MealPlanType::Daily,
                ..plan(vec![omelette.to_owned()])
            },
            &john,
        )
        .await?;
    assert_eq!(updated.plan_type, MealPlanType::Daily);
    assert_eq!(query.get(&meal_plan.id, &john).await?, updated);

    assert!(matches!(
        cmd.delete(&meal_plan.id, &albert).await,
        Err(larder_shared::Error::Forbidden)
    ));
    cmd.delete(&meal_plan.id, &john).await?;
    assert!(matches!(
        query.get(&meal_plan.id, &john).await,
        Err(larder_shared::Error::NotFound(_))
    ));

    Ok(())
}

#[tokio::test]
async fn test_suggestions_from_pantry() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let catalog = catalog(&state).await?;
    let query = Query(state.read_db.clone());

    recipe(
        &state,
        "Omelette",
        vec![("eggs", 3.0, catalog.pcs.as_str()), ("milk", 100.0, catalog.ml.as_str())],
        &catalog,
    )
    .await?;
    recipe(
        &state,
        "Boiled eggs",
        vec![("Eggs", 2.0, catalog.pcs.as_str())],
        &catalog,
    )
    .await?;
    recipe(
        &state,
        "Milkshake",
        vec![("ice cream", 2.0, catalog.pcs.as_str())],
        &catalog,
    )
    .await?;

    let pantry = larder_pantry::Command(state.clone());
    let stock = [
        ("eggs", 6.0, catalog.pcs.as_str()),
        ("milk", 50.0, catalog.ml.as_str()),
    ];
    for (name, quantity, unit_id) in stock {
        pantry
            .create(
                PantryItemInput {
                    name: name.to_owned(),
                    quantity,
                    unit_id: unit_id.to_owned(),
                    category_id: catalog.dairy.to_owned(),
                    expiration_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
                    location: "fridge".to_owned(),
                },
                &Metadata::by("john"),
            )
            .await?;
    }

    let suggestions = query.suggestions("john").await?;
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].recipe.title, "Boiled eggs");
    assert_eq!(suggestions[0].status, Feasibility::CanMake);
    assert_eq!(suggestions[1].recipe.title, "Omelette");
    assert_eq!(suggestions[1].status, Feasibility::PartiallyCanMake);
    assert_eq!(suggestions[1].missing_ingredients[0].name, "milk");
    assert_eq!(suggestions[1].missing_ingredients[0].available_quantity, 50.0);
    assert_eq!(suggestions[1].missing_ingredients[0].unit, "ml");
    assert_eq!(suggestions[1].missing_ingredients[0].category, "Dairy & Eggs");

    assert!(query.suggestions("albert").await?.is_empty());

    Ok(())
}
