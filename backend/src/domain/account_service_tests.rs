//! Tests for the account service.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockPasswordHasher, MockTokenService, MockUserRepository};
use crate::domain::{ErrorCode, Role, UserAccount, UserId, Username};

fn account(username: &str, role: Role, password_hash: &str) -> UserAccount {
    let created_at = Utc
        .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp");
    UserAccount {
        user: User::new(
            UserId::new(11),
            Username::new(username).expect("valid username"),
            role,
            created_at,
        ),
        password_hash: password_hash.to_owned(),
    }
}

#[fixture]
fn tokens() -> MockTokenService {
    let mut tokens = MockTokenService::new();
    tokens
        .expect_issue()
        .returning(|user| Ok(format!("token-for-{}", user.username())));
    tokens
}

fn service(
    users: MockUserRepository,
    hasher: MockPasswordHasher,
    tokens: MockTokenService,
) -> AccountServiceImpl<MockUserRepository> {
    AccountServiceImpl::new(Arc::new(users), Arc::new(hasher), Arc::new(tokens))
}

fn registration(username: &str, role: &str) -> Registration {
    Registration::try_from_parts(Some(username), Some("pw123"), Some(role))
        .expect("valid registration")
}

fn credentials(username: &str, password: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts(Some(username), Some(password)).expect("valid credentials")
}

#[rstest]
#[tokio::test]
async fn register_hashes_password_and_returns_session(tokens: MockTokenService) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .withf(|username| username == "alice")
        .times(1)
        .returning(|_| Ok(None));
    users
        .expect_create()
        .withf(|new_user| {
            new_user.username.as_ref() == "alice"
                && new_user.role == Role::User
                && new_user.password_hash == "hashed:pw123"
        })
        .times(1)
        .returning(|new_user| {
            Ok(account(
                new_user.username.as_ref(),
                new_user.role,
                &new_user.password_hash,
            ))
        });
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .times(1)
        .returning(|password| Ok(format!("hashed:{password}")));

    let session = service(users, hasher, tokens)
        .register(&registration("alice", "user"))
        .await
        .expect("registration succeeds");

    assert_eq!(session.user.username().as_ref(), "alice");
    assert_eq!(session.user.role(), Role::User);
    assert_eq!(session.token, "token-for-alice");
}

#[rstest]
#[tokio::test]
async fn register_rejects_taken_username_without_hashing(tokens: MockTokenService) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .returning(|name| Ok(Some(account(name, Role::User, "h"))));
    users.expect_create().never();
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().never();

    let err = service(users, hasher, tokens)
        .register(&registration("alice", "provider"))
        .await
        .expect_err("duplicate must fail");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), USERNAME_TAKEN_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn register_reports_unique_violation_race_as_conflict(tokens: MockTokenService) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| Ok(None));
    users
        .expect_create()
        .returning(|new_user| Err(UserPersistenceError::duplicate_username(new_user.username.as_ref())));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().returning(|_| Ok("h".to_owned()));

    let err = service(users, hasher, tokens)
        .register(&registration("alice", "user"))
        .await
        .expect_err("race must fail");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn register_maps_store_failures(
    tokens: MockTokenService,
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .return_once(move |_| Err(failure));

    let err = service(users, MockPasswordHasher::new(), tokens)
        .register(&registration("alice", "user"))
        .await
        .expect_err("store failure must surface");

    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn login_returns_session_for_matching_password(tokens: MockTokenService) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .returning(|name| Ok(Some(account(name, Role::Provider, "stored-hash"))));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .withf(|password, hash| password == "pw123" && hash == "stored-hash")
        .times(1)
        .returning(|_, _| Ok(true));

    let session = service(users, hasher, tokens)
        .login(&credentials("pat", "pw123"))
        .await
        .expect("login succeeds");

    assert_eq!(session.user.role(), Role::Provider);
    assert_eq!(session.token, "token-for-pat");
}

#[derive(Debug, Clone, Copy)]
enum LoginFailure {
    UnknownUser,
    WrongPassword,
    CorruptHash,
}

#[rstest]
#[case(LoginFailure::UnknownUser)]
#[case(LoginFailure::WrongPassword)]
#[case(LoginFailure::CorruptHash)]
#[tokio::test]
async fn login_failures_are_indistinguishable(#[case] failure: LoginFailure) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(move |name| match failure {
        LoginFailure::UnknownUser => Ok(None),
        LoginFailure::WrongPassword | LoginFailure::CorruptHash => {
            Ok(Some(account(name, Role::User, "stored-hash")))
        }
    });
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().returning(move |_, _| match failure {
        LoginFailure::CorruptHash => Err(PasswordHashError::malformed_hash("not phc")),
        LoginFailure::UnknownUser | LoginFailure::WrongPassword => Ok(false),
    });
    let mut tokens = MockTokenService::new();
    tokens.expect_issue().never();

    let err = service(users, hasher, tokens)
        .login(&credentials("alice", "nope"))
        .await
        .expect_err("login must fail");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), INVALID_CREDENTIALS_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn signing_failures_are_internal() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .returning(|name| Ok(Some(account(name, Role::User, "h"))));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().returning(|_, _| Ok(true));
    let mut tokens = MockTokenService::new();
    tokens
        .expect_issue()
        .returning(|_| Err(TokenError::signing("no key")));

    let err = service(users, hasher, tokens)
        .login(&credentials("alice", "pw123"))
        .await
        .expect_err("signing failure must surface");

    assert_eq!(err.code(), ErrorCode::InternalError);
}
