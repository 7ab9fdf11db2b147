//! Unit tests for the auth crate
//!
//! Use-case level coverage against the in-memory Credential Store.

#[cfg(test)]
mod register_tests {
    use crate::application::{RegisterInput, RegisterUseCase};
    use crate::error::AuthError;
    use crate::infra::memory::InMemoryUserRepository;
    use crate::presentation::dto::PublicUserResponse;
    use std::sync::Arc;

    fn input(email: &str, password: &str) -> RegisterInput {
        RegisterInput {
            email: email.to_string(),
            password: password.to_string(),
            display_name: None,
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn test_register_returns_projection_without_password() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let use_case = RegisterUseCase::new(repo.clone());

        let user = use_case.execute(input("a@x.com", "secret1")).await.unwrap();

        let json = serde_json::to_value(PublicUserResponse::from(&user)).unwrap();
        let object = json.as_object().unwrap();
        assert!(object.keys().all(|k| !k.to_lowercase().contains("password")));
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["role"], "user");
        assert_eq!(json["isVerified"], false);

        // A fresh id was assigned
        assert!(!json["id"].as_str().unwrap().is_empty());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_register_assigns_distinct_ids() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let use_case = RegisterUseCase::new(repo.clone());

        let a = use_case.execute(input("a@x.com", "secret1")).await.unwrap();
        let b = use_case.execute(input("b@x.com", "secret2")).await.unwrap();

        assert_ne!(a.user_id, b.user_id);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let use_case = RegisterUseCase::new(repo.clone());

        use_case.execute(input("a@x.com", "secret1")).await.unwrap();
        let result = use_case.execute(input("a@x.com", "other-password")).await;

        assert!(matches!(result, Err(AuthError::EmailTaken)));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_register_email_uniqueness_is_case_insensitive() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let use_case = RegisterUseCase::new(repo.clone());

        use_case.execute(input("a@x.com", "secret1")).await.unwrap();
        let result = use_case.execute(input("A@X.COM", "secret2")).await;

        assert!(matches!(result, Err(AuthError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_register_rejects_malformed_input() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let use_case = RegisterUseCase::new(repo.clone());

        let result = use_case.execute(input("", "secret1")).await;
        assert!(matches!(result, Err(AuthError::Validation(_))));

        let result = use_case.execute(input("a@x.com", "")).await;
        assert!(matches!(result, Err(AuthError::Validation(_))));

        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_concurrent_registration_single_winner() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let use_case_a = RegisterUseCase::new(repo.clone());
        let use_case_b = RegisterUseCase::new(repo.clone());

        let (a, b) = tokio::join!(
            use_case_a.execute(input("race@x.com", "secret1")),
            use_case_b.execute(input("race@x.com", "secret2")),
        );

        // Exactly one registration wins, no duplicated record
        assert_eq!(a.is_ok() as usize + b.is_ok() as usize, 1);
        assert_eq!(repo.len().await, 1);
    }
}

#[cfg(test)]
mod login_tests {
    use crate::application::config::AuthConfig;
    use crate::application::token::AccessClaims;
    use crate::application::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};
    use crate::domain::entity::user::User;
    use crate::error::AuthError;
    use crate::infra::memory::InMemoryUserRepository;
    use std::sync::Arc;

    async fn registered_user(repo: &Arc<InMemoryUserRepository>) -> User {
        RegisterUseCase::new(repo.clone())
            .execute(RegisterInput {
                email: "a@x.com".to_string(),
                password: "secret1".to_string(),
                display_name: Some("Ada".to_string()),
                avatar_url: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_login_mints_token_with_subject_claim() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(AuthConfig::with_random_secret());
        let user = registered_user(&repo).await;

        let output = LoginUseCase::new(repo.clone(), config.clone())
            .execute(LoginInput {
                email: "a@x.com".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();

        // Compact three-segment token
        assert_eq!(output.access_token.split('.').count(), 3);

        // Decoded subject equals the user's id; lifetime follows config
        let claims: AccessClaims = config.signer().verify(&output.access_token).unwrap();
        assert_eq!(claims.sub, user.user_id.to_string());
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.exp - claims.iat, config.token_ttl_secs());
    }

    #[tokio::test]
    async fn test_login_failures_are_uniform() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(AuthConfig::with_random_secret());
        registered_user(&repo).await;

        let use_case = LoginUseCase::new(repo.clone(), config.clone());

        let wrong_password = use_case
            .execute(LoginInput {
                email: "a@x.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .await
            .unwrap_err();

        let unknown_account = use_case
            .execute(LoginInput {
                email: "never-registered@x.com".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap_err();

        // Identical outcome and message for both failure causes
        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_account, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_account.to_string());
        assert_eq!(wrong_password.to_string(), "Invalid credentials");
        assert_eq!(wrong_password.status_code().as_u16(), 401);
        assert_eq!(unknown_account.status_code().as_u16(), 401);
    }

    #[tokio::test]
    async fn test_login_matches_normalized_email() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(AuthConfig::with_random_secret());
        registered_user(&repo).await;

        let output = LoginUseCase::new(repo.clone(), config.clone())
            .execute(LoginInput {
                email: "  A@X.com ".to_string(),
                password: "secret1".to_string(),
            })
            .await;

        assert!(output.is_ok());
    }
}

#[cfg(test)]
mod current_user_tests {
    use crate::application::config::AuthConfig;
    use crate::application::token::AccessClaims;
    use crate::application::{CurrentUserUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};
    use crate::error::AuthError;
    use crate::infra::memory::InMemoryUserRepository;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_current_user_roundtrip() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(AuthConfig::with_random_secret());

        let user = RegisterUseCase::new(repo.clone())
            .execute(RegisterInput {
                email: "a@x.com".to_string(),
                password: "secret1".to_string(),
                display_name: None,
                avatar_url: None,
            })
            .await
            .unwrap();

        let token = LoginUseCase::new(repo.clone(), config.clone())
            .execute(LoginInput {
                email: "a@x.com".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap()
            .access_token;

        let claims = CurrentUserUseCase::new(config.clone()).execute(&token).unwrap();
        assert_eq!(claims.subject_id().unwrap(), user.user_id);
    }

    #[tokio::test]
    async fn test_tokens_from_other_secrets_rejected() {
        let config = Arc::new(AuthConfig::with_random_secret());
        let other = AuthConfig::with_random_secret();

        let foreign = other
            .signer()
            .sign(&AccessClaims {
                sub: uuid::Uuid::new_v4().to_string(),
                email: "a@x.com".to_string(),
                iat: chrono::Utc::now().timestamp(),
                exp: chrono::Utc::now().timestamp() + 3600,
            })
            .unwrap();

        let result = CurrentUserUseCase::new(config).execute(&foreign);
        assert!(matches!(result, Err(AuthError::TokenInvalid)));
    }

    #[tokio::test]
    async fn test_expired_token_rejected() {
        let config = Arc::new(AuthConfig::with_random_secret());

        let now = chrono::Utc::now().timestamp();
        let stale = config
            .signer()
            .sign(&AccessClaims {
                sub: uuid::Uuid::new_v4().to_string(),
                email: "a@x.com".to_string(),
                iat: now - 7200,
                exp: now - 3600,
            })
            .unwrap();

        let result = CurrentUserUseCase::new(config).execute(&stale);
        assert!(matches!(result, Err(AuthError::TokenInvalid)));
    }
}

#[cfg(test)]
mod update_profile_tests {
    use crate::application::{RegisterInput, RegisterUseCase, UpdateProfileUseCase};
    use crate::domain::entity::user::{ProfilePatch, User};
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::user_id::UserId;
    use crate::error::AuthError;
    use crate::infra::memory::InMemoryUserRepository;
    use std::sync::Arc;
    use std::time::Duration;

    async fn registered_user(repo: &Arc<InMemoryUserRepository>) -> User {
        RegisterUseCase::new(repo.clone())
            .execute(RegisterInput {
                email: "a@x.com".to_string(),
                password: "secret1".to_string(),
                display_name: Some("Ada".to_string()),
                avatar_url: Some("https://cdn.example.com/ada.png".to_string()),
            })
            .await
            .unwrap()
    }

    fn name_patch(name: &str) -> ProfilePatch {
        ProfilePatch {
            display_name: Some(name.to_string()),
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn test_patch_touches_only_provided_fields() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let before = registered_user(&repo).await;

        tokio::time::sleep(Duration::from_millis(5)).await;

        let after = UpdateProfileUseCase::new(repo.clone())
            .execute(&before.user_id, name_patch("New Name"))
            .await
            .unwrap();

        assert_eq!(after.display_name.as_deref(), Some("New Name"));
        assert_eq!(after.email, before.email);
        assert_eq!(after.password_hash, before.password_hash);
        assert_eq!(after.avatar_url, before.avatar_url);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
    }

    #[tokio::test]
    async fn test_patch_empty_string_overwrites() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let user = registered_user(&repo).await;

        let after = UpdateProfileUseCase::new(repo.clone())
            .execute(&user.user_id, name_patch(""))
            .await
            .unwrap();

        assert_eq!(after.display_name.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_patch_is_idempotent_on_fields() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let user = registered_user(&repo).await;
        let use_case = UpdateProfileUseCase::new(repo.clone());

        let first = use_case
            .execute(&user.user_id, name_patch("New Name"))
            .await
            .unwrap();
        let second = use_case
            .execute(&user.user_id, name_patch("New Name"))
            .await
            .unwrap();

        // Same final profile fields, only the timestamp moves
        assert_eq!(second.display_name, first.display_name);
        assert_eq!(second.avatar_url, first.avatar_url);
        assert_eq!(second.email, first.email);
    }

    #[tokio::test]
    async fn test_unknown_subject_is_unauthorized() {
        let repo = Arc::new(InMemoryUserRepository::new());
        registered_user(&repo).await;

        let result = UpdateProfileUseCase::new(repo.clone())
            .execute(&UserId::new(), name_patch("Anyone"))
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, AuthError::SubjectNotFound));
        assert_eq!(err.to_string(), "User not found");
        assert_eq!(err.status_code().as_u16(), 401);
    }

    #[tokio::test]
    async fn test_update_is_atomic_per_subject() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let user = registered_user(&repo).await;
        let use_case_a = UpdateProfileUseCase::new(repo.clone());
        let use_case_b = UpdateProfileUseCase::new(repo.clone());

        let (a, b) = tokio::join!(
            use_case_a.execute(&user.user_id, name_patch("Left")),
            use_case_b.execute(&user.user_id, name_patch("Right")),
        );
        a.unwrap();
        b.unwrap();

        // Whichever write landed last, the record is one of the two full
        // states, never a torn mix
        let stored = repo.find_by_id(&user.user_id).await.unwrap().unwrap();
        let name = stored.display_name.as_deref().unwrap();
        assert!(name == "Left" || name == "Right");
        assert_eq!(stored.email, user.email);
        assert_eq!(repo.len().await, 1);
    }
}
