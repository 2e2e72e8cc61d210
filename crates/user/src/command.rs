use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use larder_db::table::User;
use larder_shared::State;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use validator::Validate;

use crate::{
    UserView,
    query::{FindType, find},
};

#[derive(Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(min = 8, max = 64))]
    pub password: String,
}

#[derive(Deserialize, Validate)]
pub struct LoginInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Clone)]
pub struct Command(pub State);

impl Command {
    pub async fn register(&self, input: RegisterInput) -> larder_shared::Result<UserView> {
        input.validate()?;

        let email = input.email.trim().to_lowercase();

        if find(&self.0.read_db, FindType::Email(email.to_owned()))
            .await?
            .is_some()
        {
            larder_shared::user!("Email already exists");
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)?
            .to_string();

        let user = UserView {
            id: larder_shared::new_id(),
            email,
            name: input.name.trim().to_owned(),
            created_at: larder_shared::timestamp(),
        };

        let statement = Query::insert()
            .into_table(User::Table)
            .columns([
                User::Id,
                User::Email,
                User::Name,
                User::Password,
                User::CreatedAt,
            ])
            .values_panic([
                user.id.to_owned().into(),
                user.email.to_owned().into(),
                user.name.to_owned().into(),
                password_hash.into(),
                user.created_at.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.0.write_db)
            .await?;

        tracing::info!(user_id = %user.id, "user registered");

        Ok(user)
    }

    /// Checks credentials and returns the user they belong to.
    pub async fn login(&self, input: LoginInput) -> larder_shared::Result<UserView> {
        input.validate()?;

        let email = input.email.trim().to_lowercase();

        let Some(user) = find(&self.0.read_db, FindType::Email(email)).await? else {
            larder_shared::user!("Invalid email or password. Please try again.");
        };

        let parsed_hash = PasswordHash::new(&user.password)?;

        if Argon2::default()
            .verify_password(input.password.as_bytes(), &parsed_hash)
            .is_err()
        {
            larder_shared::user!("Invalid email or password. Please try again.");
        }

        Ok(user.into())
    }
}
