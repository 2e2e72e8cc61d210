use larder_catalog::{CategoryInput, Command, Query, UnitInput};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_unit_crud() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = Command(state.clone());
    let query = Query(state.read_db.clone());

    let gram = cmd
        .create_unit(UnitInput {
            name: "gram".to_owned(),
            abbreviation: Some("g".to_owned()),
        })
        .await?;
    let piece = cmd
        .create_unit(UnitInput {
            name: "piece".to_owned(),
            abbreviation: None,
        })
        .await?;

    let duplicate = cmd
        .create_unit(UnitInput {
            name: " gram ".to_owned(),
            abbreviation: None,
        })
        .await;
    assert!(matches!(duplicate, Err(larder_shared::Error::User(_))));

    let units = query.list_units().await?;
    assert_eq!(
        units.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(),
        vec!["gram", "piece"]
    );

    let renamed = cmd
        .update_unit(
            &piece.id,
            UnitInput {
                name: "pieces".to_owned(),
                abbreviation: Some("pcs".to_owned()),
            },
        )
        .await?;
    assert_eq!(renamed.label(), "pcs");

    let clash = cmd
        .update_unit(
            &piece.id,
            UnitInput {
                name: "gram".to_owned(),
                abbreviation: None,
            },
        )
        .await;
    assert!(matches!(clash, Err(larder_shared::Error::User(_))));

    cmd.delete_unit(&gram.id).await?;
    assert!(query.find_unit(&gram.id).await?.is_none());
    assert!(matches!(
        cmd.delete_unit(&gram.id).await,
        Err(larder_shared::Error::NotFound(_))
    ));

    Ok(())
}

#[tokio::test]
async fn test_labels_and_seed() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = Command(state.clone());
    let query = Query(state.read_db.clone());

    let dairy = cmd
        .create_category(CategoryInput {
            name: "Dairy & Eggs".to_owned(),
            description: Some("milk, butter, eggs".to_owned()),
        })
        .await?;

    let (units, categories) = cmd.seed_defaults().await?;
    assert_eq!(units, 9);
    assert_eq!(categories, 8);

    let (units, categories) = cmd.seed_defaults().await?;
    assert_eq!((units, categories), (0, 0));

    let labels = query.labels().await?;
    assert_eq!(labels.category(&dairy.id), "Dairy & Eggs");
    assert_eq!(labels.unit("missing"), "missing");

    let ml = query
        .list_units()
        .await?
        .into_iter()
        .find(|u| u.name == "milliliter")
        .unwrap();
    assert_eq!(labels.unit(&ml.id), "ml");

    Ok(())
}
