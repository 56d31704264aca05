use axum::{debug_handler, extract::State, http::StatusCode, Json};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{error::{SocialError, SocialResult}, res::ApiResponse, AppResult, AppState};

use super::{store::{self, NewProfile}, Gender, Profile, ProfileSummary};

const MAX_NAME_LEN: usize = 200;
const MAX_EMAIL_LEN: usize = 254;

#[derive(Debug, Deserialize)]
pub struct NewProfileForm {
    pub name: String,
    pub email: String,
    pub gender: Option<String>,
}

pub fn validate(form: NewProfileForm) -> SocialResult<NewProfile> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(SocialError::validation("name is required"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(SocialError::validation(format!("name must be at most {MAX_NAME_LEN} characters")));
    }

    let email = store::normalize_email(&form.email);
    if email.len() > MAX_EMAIL_LEN || !looks_like_email(&email) {
        return Err(SocialError::validation("enter a valid email address"));
    }

    let gender = match form.gender.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(code) => Some(
            Gender::from_code(code)
                .ok_or_else(|| SocialError::validation(format!("{code:?} is not a valid gender")))?,
        ),
    };

    Ok(NewProfile {
        name: name.to_owned(),
        email,
        gender,
    })
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
}

pub async fn register(db_pool: &SqlitePool, form: NewProfileForm) -> SocialResult<Profile> {
    let new_profile = validate(form)?;

    if store::exists(db_pool, &new_profile.email).await? {
        return Err(SocialError::DuplicateEmail);
    }

    store::create(db_pool, &new_profile).await
}

#[debug_handler(state = AppState)]
pub(crate) async fn new_profile(
    State(db_pool): State<SqlitePool>,
    Json(form): Json<NewProfileForm>,
) -> AppResult<ApiResponse> {
    let profile = register(&db_pool, form).await?;

    Ok(
        ApiResponse::ok(ProfileSummary::from(&profile))?
            .with_status(StatusCode::CREATED)
            .with_message("User profile created successfully")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, gender: Option<&str>) -> NewProfileForm {
        NewProfileForm {
            name: name.to_owned(),
            email: email.to_owned(),
            gender: gender.map(str::to_owned),
        }
    }

    #[test]
    fn valid_form_is_normalized() {
        let profile = validate(form("  Bob Stone ", " Bob@X.com", Some("M"))).unwrap();
        assert_eq!(profile.name, "Bob Stone");
        assert_eq!(profile.email, "bob@x.com");
        assert_eq!(profile.gender, Some(Gender::Male));
    }

    #[test]
    fn blank_gender_is_none() {
        let profile = validate(form("Bob", "bob@x.com", Some(""))).unwrap();
        assert_eq!(profile.gender, None);
    }

    #[test]
    fn malformed_input_is_a_validation_error() {
        for bad in [
            form("", "bob@x.com", None),
            form("Bob", "bob.x.com", None),
            form("Bob", "@x.com", None),
            form("Bob", "bob@", None),
            form("Bob", "bob@x.com", Some("Q")),
            form("Bob", "bob@x.com", Some("m")),
        ] {
            let err = validate(bad).unwrap_err();
            assert!(matches!(err, SocialError::Validation(_)), "{err:?}");
        }
    }
}
