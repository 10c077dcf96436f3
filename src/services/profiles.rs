use chrono::Utc;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::user::UserProfile;
use crate::forms::profiles::ProfileFormPayload;
use crate::repository::{UserReader, UserWriter};

use super::{ServiceError, ServiceResult, ensure_photographer, internal};

/// Profile of the calling photographer.
pub fn get_profile<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<UserProfile>
where
    R: UserReader,
{
    ensure_photographer(user)?;

    repo.get_user_profile(user.id)
        .map_err(internal("get user profile"))?
        .ok_or_else(|| ServiceError::NotFound {
            entity: "profile",
            ids: vec![user.id.get()],
        })
}

/// Create or replace the profile of the calling photographer.
pub fn save_profile<R>(
    user: &AuthenticatedUser,
    payload: ProfileFormPayload,
    repo: &R,
) -> ServiceResult<UserProfile>
where
    R: UserReader + UserWriter,
{
    ensure_photographer(user)?;

    let owner = repo
        .get_user_by_id(user.id)
        .map_err(internal("get user by id"))?
        .ok_or_else(|| ServiceError::not_found("user"))?;

    let profile = UserProfile {
        user_id: owner.id,
        address: payload.address,
        phone: payload.phone,
        company: payload.company,
        homepage: payload.homepage,
        birthday: payload.birthday,
        updated_at: Utc::now().naive_utc(),
    };

    repo.save_user_profile(&profile)
        .map_err(internal("save user profile"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Company, PersonName, Phone, UserEmail, UserId, UserRole};
    use crate::domain::user::User;
    use crate::repository::test::TestRepository;
    use chrono::DateTime;

    fn sample_user(id: i32, role: UserRole) -> User {
        User {
            id: UserId::new(id).unwrap(),
            email: UserEmail::new(format!("user{id}@example.com")).unwrap(),
            first_name: PersonName::new("Berenice").unwrap(),
            last_name: PersonName::new("Abbott").unwrap(),
            password_hash: "hash".into(),
            role,
            enabled: true,
            created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        }
    }

    fn identity(id: i32, role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser::from(&sample_user(id, role))
    }

    #[test]
    fn missing_profile_is_not_found() {
        let repo = TestRepository::new().with_users(vec![sample_user(1, UserRole::Photographer)]);

        let err = get_profile(&identity(1, UserRole::Photographer), &repo).unwrap_err();

        assert!(matches!(err, ServiceError::NotFound { entity: "profile", .. }));
    }

    #[test]
    fn saving_replaces_every_field() {
        let repo = TestRepository::new().with_users(vec![sample_user(1, UserRole::Photographer)]);
        let user = identity(1, UserRole::Photographer);

        save_profile(
            &user,
            ProfileFormPayload {
                phone: Some(Phone::new("030 1234").unwrap()),
                company: Some(Company::new("Studio Nord").unwrap()),
                ..Default::default()
            },
            &repo,
        )
        .unwrap();
        save_profile(
            &user,
            ProfileFormPayload {
                phone: Some(Phone::new("030 9876").unwrap()),
                ..Default::default()
            },
            &repo,
        )
        .unwrap();

        let profile = get_profile(&user, &repo).unwrap();
        assert_eq!(profile.user_id, 1);
        assert_eq!(profile.phone.unwrap().as_str(), "030 9876");
        assert!(profile.company.is_none());
    }

    #[test]
    fn customers_have_no_profile() {
        let repo = TestRepository::new().with_users(vec![sample_user(2, UserRole::Customer)]);

        let err = save_profile(
            &identity(2, UserRole::Customer),
            ProfileFormPayload::default(),
            &repo,
        )
        .unwrap_err();

        assert_eq!(err, ServiceError::Unauthorized);
    }
}
