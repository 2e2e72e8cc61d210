use larder_user::{Command, LoginInput, Query, RegisterInput};
use temp_dir::TempDir;

mod helpers;

fn register_input(email: &str, password: &str) -> RegisterInput {
    RegisterInput {
        email: email.to_owned(),
        name: "John Doe".to_owned(),
        password: password.to_owned(),
    }
}

#[tokio::test]
async fn validate_unique_emails() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = Command(state);

    cmd.register(register_input("john.doe@larder.localhost", "my_password"))
        .await?;
    let user_2 = cmd
        .register(register_input("John.Doe@larder.localhost", "my_password_v2"))
        .await;

    assert_eq!(
        user_2.unwrap_err().to_string(),
        "Email already exists".to_owned()
    );

    Ok(())
}

#[tokio::test]
async fn validate_register_input() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = Command(state);

    let short_password = cmd
        .register(register_input("john.doe@larder.localhost", "short"))
        .await;
    assert!(matches!(
        short_password,
        Err(larder_shared::Error::Validate(_))
    ));

    let bad_email = cmd.register(register_input("john.doe", "my_password")).await;
    assert!(matches!(bad_email, Err(larder_shared::Error::Validate(_))));

    Ok(())
}

#[tokio::test]
async fn login_with_registered_credentials() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = Command(state.clone());
    let query = Query(state.read_db.clone());

    let user = cmd
        .register(register_input("john.doe@larder.localhost", "my_password"))
        .await?;

    let logged = cmd
        .login(LoginInput {
            email: "john.doe@larder.localhost".to_owned(),
            password: "my_password".to_owned(),
        })
        .await?;
    assert_eq!(logged.id, user.id);

    let wrong = cmd
        .login(LoginInput {
            email: "john.doe@larder.localhost".to_owned(),
            password: "not_my_password".to_owned(),
        })
        .await;
    assert!(matches!(wrong, Err(larder_shared::Error::User(_))));

    let unknown = cmd
        .login(LoginInput {
            email: "albert@larder.localhost".to_owned(),
            password: "my_password".to_owned(),
        })
        .await;
    assert!(matches!(unknown, Err(larder_shared::Error::User(_))));

    let found = query.find_by_id(&user.id).await?.unwrap();
    assert_eq!(found.email, "john.doe@larder.localhost");
    assert_eq!(found.name, "John Doe");

    Ok(())
}
