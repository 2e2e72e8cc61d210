use axum::http::{Method, StatusCode};
use serde_json::json;

mod helpers;

use helpers::{TestApp, id};

#[tokio::test]
async fn test_units_and_categories() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let john = app.register("john@example.com").await?;

    let (status, unit) = app
        .post("/api/units", &john, json!({"name": "gram", "abbreviation": "g"}))
        .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .post("/api/units", &john, json!({"name": "gram"}))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Unit 'gram' already exists");

    let unit_id = id(&unit);
    let (status, updated) = app
        .request(
            Method::PUT,
            &format!("/api/units/{unit_id}"),
            Some(&john),
            Some(json!({"name": "grams", "abbreviation": "g"})),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "grams");

    let (status, category) = app
        .post(
            "/api/categories",
            &john,
            json!({"name": "Produce", "description": "Fruit and vegetables"}),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (_, categories) = app.get("/api/categories", &john).await?;
    assert_eq!(categories[0]["description"], "Fruit and vegetables");

    let category_id = id(&category);
    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/categories/{category_id}"),
            Some(&john),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .get(&format!("/api/categories/{category_id}"), &john)
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/units/{unit_id}"),
            Some(&john),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, units) = app.get("/api/units", &john).await?;
    assert_eq!(units, json!([]));

    Ok(())
}
