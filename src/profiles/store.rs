use sqlx::SqliteExecutor;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::error::{is_unique_violation, SocialError, SocialResult};

use super::{Gender, Profile};

const PROFILE_COLUMNS: &str = "id,email,name,gender,created_at,updated_at";

#[derive(Debug, Clone)]
pub struct NewProfile {
    pub name: String,
    pub email: String,
    pub gender: Option<Gender>,
}

/// Emails are compared and stored lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub async fn find_by_email<'e, E>(executor: E, email: &str) -> SocialResult<Option<Profile>>
where
    E: SqliteExecutor<'e>,
{
    let profile = sqlx::query_as::<_, Profile>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profiles WHERE email=?"
    ))
    .bind(normalize_email(email))
    .fetch_optional(executor)
    .await?;

    Ok(profile)
}

pub async fn exists<'e, E>(executor: E, email: &str) -> SocialResult<bool>
where
    E: SqliteExecutor<'e>,
{
    let found = sqlx::query("SELECT 1 FROM profiles WHERE email=?")
        .bind(normalize_email(email))
        .fetch_optional(executor)
        .await?;

    Ok(found.is_some())
}

/// Inserts a profile. The unique index on `email` is what rejects duplicates,
/// so two racing registrations of one address cannot both land.
pub async fn create<'e, E>(executor: E, new_profile: &NewProfile) -> SocialResult<Profile>
where
    E: SqliteExecutor<'e>,
{
    let now = OffsetDateTime::now_utc();
    let profile = Profile {
        id: Uuid::now_v7(),
        email: normalize_email(&new_profile.email),
        name: new_profile.name.trim().to_owned(),
        gender: new_profile.gender,
        created_at: now,
        updated_at: now,
    };

    let inserted = sqlx::query(
        "INSERT INTO profiles (id,email,name,gender,created_at,updated_at) VALUES (?,?,?,?,?,?)",
    )
    .bind(profile.id)
    .bind(&profile.email)
    .bind(&profile.name)
    .bind(profile.gender)
    .bind(profile.created_at)
    .bind(profile.updated_at)
    .execute(executor)
    .await;

    match inserted {
        Ok(_) => {
            info!(profile_id = %profile.id, email = %profile.email, "profile created");
            Ok(profile)
        }
        Err(err) if is_unique_violation(&err) => Err(SocialError::DuplicateEmail),
        Err(err) => Err(err.into()),
    }
}
