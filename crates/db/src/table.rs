use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum User {
    Table,
    Id,
    Email,
    Name,
    Password,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Unit {
    Table,
    Id,
    Name,
    Abbreviation,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum FoodCategory {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum PantryItem {
    Table,
    Id,
    OwnerId,
    Name,
    Quantity,
    UnitId,
    CategoryId,
    ExpirationDate,
    Location,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum PantryLog {
    Table,
    Id,
    OwnerId,
    PantryItemId,
    Name,
    Quantity,
    UnitId,
    CategoryId,
    Kind,
    Date,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Recipe {
    Table,
    Id,
    OwnerId,
    Title,
    Instructions,
    Servings,
    Ingredients,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum MealPlan {
    Table,
    Id,
    OwnerId,
    Title,
    Date,
    PlanType,
    RecipeIds,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum ShoppingList {
    Table,
    Id,
    OwnerId,
    GroupId,
    MealPlanId,
    Name,
    StartDate,
    EndDate,
    Items,
    CreatedAt,
    UpdatedAt,
}
