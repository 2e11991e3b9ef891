use chrono::{Duration, Utc};
use uuid::Uuid;

use hrdesk_api::domain::repository::PasswordHasher;
use hrdesk_api::domain::types::PhoneGrant;
use hrdesk_api::error::ApiError;
use hrdesk_api::infra::password::BcryptHasher;
use hrdesk_api::usecase::account::{
    LoginInput, LoginUseCase, RegisterInput, RegisterUseCase, ResetPasswordInput,
    ResetPasswordUseCase,
};
use hrdesk_api::usecase::otp::{SendOtpInput, SendOtpUseCase, VerifyOtpInput, VerifyOtpUseCase};
use hrdesk_api::usecase::token::issue_grant_token;
use hrdesk_auth_types::token::validate_access_token;
use hrdesk_domain::user::UserRole;

use crate::helpers::{
    MockGrantRepo, MockOtpRepo, MockSms, MockUserRepo, TEST_SECRET, fast_hasher, test_user,
};

fn register_input(email: &str, password: &str) -> RegisterInput {
    RegisterInput {
        email: email.to_owned(),
        password: password.to_owned(),
        fullname: Some("Grace Hopper".to_owned()),
        phone: Some("0555999888".to_owned()),
    }
}

fn login_usecase(users: MockUserRepo) -> LoginUseCase<MockUserRepo, BcryptHasher> {
    LoginUseCase {
        users,
        hasher: fast_hasher(),
        jwt_secret: TEST_SECRET.to_owned(),
    }
}

// ── Register ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_and_then_login() {
    let users = MockUserRepo::empty();
    let register = RegisterUseCase {
        users: users.clone(),
        hasher: fast_hasher(),
    };

    let user = register
        .execute(register_input("grace@example.com", "cobol"))
        .await
        .unwrap();
    assert_eq!(user.role, UserRole::User);
    assert_eq!(user.fullname, "Grace Hopper");
    assert_ne!(user.password_hash.as_deref(), Some("cobol"));

    let output = login_usecase(users)
        .execute(LoginInput {
            email: "grace@example.com".to_owned(),
            password: "cobol".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(output.user.id, user.id);

    let info = validate_access_token(&output.access_token, TEST_SECRET).unwrap();
    assert_eq!(info.user_id, user.id);
    assert_eq!(info.role, UserRole::User);
    assert_eq!(info.access_token_exp, output.access_token_exp);
}

#[tokio::test]
async fn should_reject_duplicate_email_without_creating_user() {
    let existing = test_user();
    let users = MockUserRepo::new(vec![existing.clone()]);
    let uc = RegisterUseCase {
        users: users.clone(),
        hasher: fast_hasher(),
    };

    let result = uc.execute(register_input(&existing.email, "pw")).await;
    assert!(
        matches!(result, Err(ApiError::EmailTaken)),
        "expected EmailTaken, got {result:?}"
    );
    assert_eq!(users.users.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_phone_bound_to_another_account() {
    let existing = test_user();
    let uc = RegisterUseCase {
        users: MockUserRepo::new(vec![existing.clone()]),
        hasher: fast_hasher(),
    };

    let mut input = register_input("new@example.com", "pw");
    input.phone = existing.phone.clone();
    let result = uc.execute(input).await;
    assert!(
        matches!(result, Err(ApiError::PhoneTaken)),
        "expected PhoneTaken, got {result:?}"
    );
}

#[tokio::test]
async fn should_require_email_and_password() {
    let uc = RegisterUseCase {
        users: MockUserRepo::empty(),
        hasher: fast_hasher(),
    };

    let result = uc.execute(register_input("  ", "pw")).await;
    assert!(matches!(result, Err(ApiError::MissingField("email"))));

    let result = uc.execute(register_input("a@example.com", "")).await;
    assert!(matches!(result, Err(ApiError::MissingField("password"))));
}

#[tokio::test]
async fn should_store_blank_phone_as_none() {
    let users = MockUserRepo::empty();
    let uc = RegisterUseCase {
        users: users.clone(),
        hasher: fast_hasher(),
    };

    let mut input = register_input("nophone@example.com", "pw");
    input.phone = Some("   ".to_owned());
    let user = uc.execute(input).await.unwrap();
    assert!(user.phone.is_none());
}

#[tokio::test]
async fn should_reject_values_wider_than_their_columns() {
    let users = MockUserRepo::empty();
    let uc = RegisterUseCase {
        users: users.clone(),
        hasher: fast_hasher(),
    };

    let mut input = register_input("long@example.com", "pw");
    input.fullname = Some("x".repeat(41));
    let result = uc.execute(input).await;
    assert!(matches!(result, Err(ApiError::InvalidField("fullname"))));

    let mut input = register_input("long@example.com", "pw");
    input.phone = Some("0".repeat(21));
    let result = uc.execute(input).await;
    assert!(matches!(result, Err(ApiError::InvalidField("phone"))));

    let mut input = register_input("ok@example.com", "pw");
    input.fullname = Some("x".repeat(40));
    assert!(uc.execute(input).await.is_ok());
    assert_eq!(users.users.lock().unwrap().len(), 1);
}

// ── Login ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_wrong_password_and_unknown_email_alike() {
    let mut user = test_user();
    user.password_hash = Some(fast_hasher().hash("right").await.unwrap());
    let users = MockUserRepo::new(vec![user.clone()]);

    let wrong_password = login_usecase(users.clone())
        .execute(LoginInput {
            email: user.email.clone(),
            password: "wrong".to_owned(),
        })
        .await;
    assert!(matches!(wrong_password, Err(ApiError::InvalidCredentials)));

    let unknown = login_usecase(users)
        .execute(LoginInput {
            email: "ghost@example.com".to_owned(),
            password: "right".to_owned(),
        })
        .await;
    assert!(matches!(unknown, Err(ApiError::InvalidCredentials)));
}

#[tokio::test]
async fn should_reject_login_for_account_without_password() {
    let user = test_user();
    let result = login_usecase(MockUserRepo::new(vec![user.clone()]))
        .execute(LoginInput {
            email: user.email,
            password: "anything".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(ApiError::InvalidCredentials)));
}

#[tokio::test]
async fn should_require_login_fields() {
    let result = login_usecase(MockUserRepo::empty())
        .execute(LoginInput {
            email: String::new(),
            password: "pw".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(ApiError::MissingField("email"))));

    let result = login_usecase(MockUserRepo::empty())
        .execute(LoginInput {
            email: "a@example.com".to_owned(),
            password: " ".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(ApiError::MissingField("password"))));
}

// ── Reset password ────────────────────────────────────────────────────────────

fn active_grant(phone: &str) -> PhoneGrant {
    let now = Utc::now();
    PhoneGrant {
        id: Uuid::now_v7(),
        phone: phone.to_owned(),
        created_at: now,
        expires_at: now + Duration::minutes(20),
        consumed_at: None,
    }
}

fn reset_usecase(
    users: MockUserRepo,
    grants: MockGrantRepo,
) -> ResetPasswordUseCase<MockUserRepo, MockGrantRepo, BcryptHasher> {
    ResetPasswordUseCase {
        users,
        grants,
        hasher: fast_hasher(),
        jwt_secret: TEST_SECRET.to_owned(),
    }
}

#[tokio::test]
async fn should_reset_password_once_per_grant() {
    let user = test_user();
    let phone = user.phone.clone().unwrap();
    let grant = active_grant(&phone);
    let users = MockUserRepo::new(vec![user.clone()]);
    let grants = MockGrantRepo::for_users(&users);
    grants.grants.lock().unwrap().push(grant.clone());
    let token = issue_grant_token(&grant, TEST_SECRET).unwrap();

    let uc = reset_usecase(users.clone(), grants.clone());
    uc.execute(ResetPasswordInput {
        new_password: "fresh".to_owned(),
        reset_token: Some(token.clone()),
    })
    .await
    .unwrap();

    let stored = users.get(user.id).unwrap().password_hash.unwrap();
    assert!(fast_hasher().verify("fresh", &stored).await.unwrap());
    assert!(grants.grants.lock().unwrap()[0].consumed_at.is_some());

    let replay = uc
        .execute(ResetPasswordInput {
            new_password: "again".to_owned(),
            reset_token: Some(token),
        })
        .await;
    assert!(
        matches!(replay, Err(ApiError::VerificationRequired)),
        "expected VerificationRequired, got {replay:?}"
    );
}

#[tokio::test]
async fn should_require_grant_token() {
    let uc = reset_usecase(MockUserRepo::new(vec![test_user()]), MockGrantRepo::empty());

    for reset_token in [None, Some(String::new()), Some("garbage".to_owned())] {
        let result = uc
            .execute(ResetPasswordInput {
                new_password: "pw".to_owned(),
                reset_token,
            })
            .await;
        assert!(matches!(result, Err(ApiError::VerificationRequired)));
    }
}

#[tokio::test]
async fn should_reject_empty_new_password_before_token() {
    let uc = reset_usecase(MockUserRepo::empty(), MockGrantRepo::empty());
    let result = uc
        .execute(ResetPasswordInput {
            new_password: String::new(),
            reset_token: None,
        })
        .await;
    assert!(matches!(result, Err(ApiError::MissingField("newPassword"))));
}

#[tokio::test]
async fn should_reject_token_whose_grant_row_is_missing() {
    let grant = active_grant("0555000111");
    let token = issue_grant_token(&grant, TEST_SECRET).unwrap();

    let uc = reset_usecase(MockUserRepo::new(vec![test_user()]), MockGrantRepo::empty());
    let result = uc
        .execute(ResetPasswordInput {
            new_password: "pw".to_owned(),
            reset_token: Some(token),
        })
        .await;
    assert!(matches!(result, Err(ApiError::VerificationRequired)));
}

#[tokio::test]
async fn should_report_unregistered_phone_on_reset() {
    let grant = active_grant("0000000000");
    let grants = MockGrantRepo::empty();
    grants.grants.lock().unwrap().push(grant.clone());
    let token = issue_grant_token(&grant, TEST_SECRET).unwrap();

    let uc = reset_usecase(MockUserRepo::new(vec![test_user()]), grants.clone());
    let result = uc
        .execute(ResetPasswordInput {
            new_password: "pw".to_owned(),
            reset_token: Some(token),
        })
        .await;
    assert!(matches!(result, Err(ApiError::PhoneNotRegistered)));
    assert!(grants.grants.lock().unwrap()[0].consumed_at.is_none());
}

#[tokio::test]
async fn should_recover_account_through_phone_verification() {
    let hasher = fast_hasher();
    let mut user = test_user();
    user.password_hash = Some(hasher.hash("old-secret").await.unwrap());
    let phone = user.phone.clone().unwrap();

    let users = MockUserRepo::new(vec![user.clone()]);
    let otps = MockOtpRepo::empty();
    let grants = MockGrantRepo::for_users(&users);
    let sms = MockSms::ok();

    SendOtpUseCase {
        users: users.clone(),
        otps: otps.clone(),
        sms: sms.clone(),
    }
    .execute(SendOtpInput { phone })
    .await
    .unwrap();
    let code = sms.sent.lock().unwrap()[0].1.clone();

    let verified = VerifyOtpUseCase {
        otps,
        grants: grants.clone(),
        jwt_secret: TEST_SECRET.to_owned(),
    }
    .execute(VerifyOtpInput { otp: code })
    .await
    .unwrap();

    let reset = reset_usecase(users.clone(), grants);
    reset
        .execute(ResetPasswordInput {
            new_password: "new-secret".to_owned(),
            reset_token: Some(verified.reset_token.clone()),
        })
        .await
        .unwrap();

    let login = login_usecase(users);
    let output = login
        .execute(LoginInput {
            email: user.email.clone(),
            password: "new-secret".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(output.user.id, user.id);

    let old = login
        .execute(LoginInput {
            email: user.email.clone(),
            password: "old-secret".to_owned(),
        })
        .await;
    assert!(matches!(old, Err(ApiError::InvalidCredentials)));

    let replay = reset
        .execute(ResetPasswordInput {
            new_password: "third-secret".to_owned(),
            reset_token: Some(verified.reset_token),
        })
        .await;
    assert!(
        matches!(replay, Err(ApiError::VerificationRequired)),
        "expected VerificationRequired, got {replay:?}"
    );
}
