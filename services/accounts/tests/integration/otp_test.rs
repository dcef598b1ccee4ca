use accounts::domain::types::{BackgroundTask, OTP_MAX_ATTEMPTS};
use accounts::error::AccountsServiceError;
use accounts::usecase::otp::{
    OTP_INVALID, OTP_MISSING, OTP_VERIFIED, OtpGenerator, OtpPurpose, PASSWORD_RESET, ResetPasswordInput,
    ResetPasswordUseCase, SendOtpInput, SendOtpUseCase, VerifyOtpInput, VerifyOtpUseCase,
};

use crate::helpers::{
    MockOtpRepo, MockUserRepo, RecordingTasks, RendezvousOtpRepo, test_otp, test_user,
};

// ── SendOtpUseCase ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_fail_send_otp_for_unknown_email_without_side_effects() {
    let otp = MockOtpRepo::empty();
    let tasks = RecordingTasks::default();
    let usecase = SendOtpUseCase {
        users: MockUserRepo::empty(),
        otp: otp.generator(),
        tasks: tasks.clone(),
    };

    for purpose in [OtpPurpose::Verification, OtpPurpose::PasswordReset] {
        let result = usecase
            .execute(SendOtpInput {
                email: "nobody@b.com".to_owned(),
                purpose,
            })
            .await;
        assert!(
            matches!(result, Err(AccountsServiceError::UserNotFound)),
            "expected UserNotFound, got {result:?}"
        );
    }

    assert_eq!(otp.count(), 0);
    assert!(tasks.submitted().is_empty());
}

#[tokio::test]
async fn should_reject_malformed_email() {
    let usecase = SendOtpUseCase {
        users: MockUserRepo::empty(),
        otp: MockOtpRepo::empty().generator(),
        tasks: RecordingTasks::default(),
    };
    let result = usecase
        .execute(SendOtpInput {
            email: "not-an-email".to_owned(),
            purpose: OtpPurpose::Verification,
        })
        .await;
    assert!(matches!(result, Err(AccountsServiceError::InvalidEmail)));
}

#[tokio::test]
async fn should_store_code_and_queue_mail() {
    let user = test_user();
    let otp = MockOtpRepo::empty();
    let tasks = RecordingTasks::default();
    let usecase = SendOtpUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        otp: otp.generator(),
        tasks: tasks.clone(),
    };

    let outcome = usecase
        .execute(SendOtpInput {
            email: "A@B.com".to_owned(),
            purpose: OtpPurpose::Verification,
        })
        .await
        .unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.message, "OTP has been sent to your email");
    assert_eq!(otp.count(), 1);

    let code = otp.codes.lock().unwrap()[0].code.clone();
    let submitted = tasks.submitted();
    assert_eq!(submitted.len(), 1);
    match &submitted[0] {
        BackgroundTask::SendMail(mail) => {
            assert_eq!(mail.subject, "OTP");
            assert_eq!(mail.recipients, vec![user.email.clone()]);
            assert!(mail.body.contains(&code));
        }
        other => panic!("expected SendMail, got {other:?}"),
    }
}

#[tokio::test]
async fn should_reuse_pending_code() {
    let user = test_user();
    let otp = MockOtpRepo::new(vec![test_otp(user.id, "246810")]);
    let tasks = RecordingTasks::default();
    let usecase = SendOtpUseCase {
        users: MockUserRepo::new(vec![user]),
        otp: otp.generator(),
        tasks: tasks.clone(),
    };

    let outcome = usecase
        .execute(SendOtpInput {
            email: "a@b.com".to_owned(),
            purpose: OtpPurpose::PasswordReset,
        })
        .await
        .unwrap();

    assert_eq!(
        outcome.message,
        "Password reset token has been sent to your email"
    );
    assert_eq!(otp.count(), 1);
    let BackgroundTask::SendMail(mail) = &tasks.submitted()[0] else {
        panic!("expected SendMail");
    };
    assert_eq!(mail.subject, "Forgot Password");
    assert!(mail.body.contains("246810"));
}

// ── VerifyOtpUseCase ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_verify_correct_code_and_consume_it() {
    let user = test_user();
    let code = test_otp(user.id, "123456");
    let code_id = code.id;
    let otp = MockOtpRepo::new(vec![code]);
    let usecase = VerifyOtpUseCase {
        users: MockUserRepo::new(vec![user]),
        otp: otp.generator(),
    };

    let outcome = usecase
        .execute(VerifyOtpInput {
            email: "a@b.com".to_owned(),
            otp: "123456".to_owned(),
        })
        .await
        .unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.message, OTP_VERIFIED);
    assert!(otp.get(code_id).unwrap().used_at.is_some());

    // A consumed code cannot be replayed.
    let replay = usecase
        .execute(VerifyOtpInput {
            email: "a@b.com".to_owned(),
            otp: "123456".to_owned(),
        })
        .await
        .unwrap();
    assert!(!replay.success);
    assert_eq!(replay.message, OTP_MISSING);
}

#[tokio::test]
async fn should_report_wrong_code_as_value() {
    let user = test_user();
    let code = test_otp(user.id, "123456");
    let code_id = code.id;
    let otp = MockOtpRepo::new(vec![code]);
    let usecase = VerifyOtpUseCase {
        users: MockUserRepo::new(vec![user]),
        otp: otp.generator(),
    };

    let outcome = usecase
        .execute(VerifyOtpInput {
            email: "a@b.com".to_owned(),
            otp: "654321".to_owned(),
        })
        .await
        .unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.message, OTP_INVALID);

    let stored = otp.get(code_id).unwrap();
    assert_eq!(stored.attempts, 1);
    assert!(stored.used_at.is_none());
}

#[tokio::test]
async fn should_lock_code_after_max_attempts() {
    let user = test_user();
    let otp = MockOtpRepo::new(vec![test_otp(user.id, "123456")]);
    let usecase = VerifyOtpUseCase {
        users: MockUserRepo::new(vec![user]),
        otp: otp.generator(),
    };

    for _ in 0..OTP_MAX_ATTEMPTS {
        let outcome = usecase
            .execute(VerifyOtpInput {
                email: "a@b.com".to_owned(),
                otp: "000000".to_owned(),
            })
            .await
            .unwrap();
        assert_eq!(outcome.message, OTP_INVALID);
    }

    let outcome = usecase
        .execute(VerifyOtpInput {
            email: "a@b.com".to_owned(),
            otp: "123456".to_owned(),
        })
        .await
        .unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.message, OTP_MISSING);
}

#[tokio::test]
async fn should_accept_code_once_under_concurrent_checks() {
    let user = test_user();
    let codes = MockOtpRepo::new(vec![test_otp(user.id, "123456")]);
    let generator = OtpGenerator {
        codes: RendezvousOtpRepo::new(codes, 2),
        ttl_secs: 600,
    };

    let (first, second) = tokio::join!(
        generator.check_otp(user.id, "123456"),
        generator.check_otp(user.id, "123456"),
    );
    let (first, second) = (first.unwrap(), second.unwrap());

    assert_ne!(first.success, second.success);
    let loser = if first.success { second } else { first };
    assert_eq!(loser.message, OTP_MISSING);
}

#[tokio::test]
async fn should_report_missing_code() {
    let usecase = VerifyOtpUseCase {
        users: MockUserRepo::new(vec![test_user()]),
        otp: MockOtpRepo::empty().generator(),
    };
    let outcome = usecase
        .execute(VerifyOtpInput {
            email: "a@b.com".to_owned(),
            otp: "123456".to_owned(),
        })
        .await
        .unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.message, OTP_MISSING);
}

// ── ResetPasswordUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_not_reset_password_with_wrong_token() {
    let user = test_user();
    let users = MockUserRepo::new(vec![user.clone()]);
    let usecase = ResetPasswordUseCase {
        users: users.clone(),
        otp: MockOtpRepo::new(vec![test_otp(user.id, "123456")]).generator(),
    };

    let outcome = usecase
        .execute(ResetPasswordInput {
            email: "a@b.com".to_owned(),
            token: "000000".to_owned(),
            new_password: "brand-new-password".to_owned(),
        })
        .await
        .unwrap();

    assert!(!outcome.success);
    assert_eq!(users.password_update_count(), 0);
}

#[tokio::test]
async fn should_reset_password_with_valid_token() {
    let user = test_user();
    let users = MockUserRepo::new(vec![user.clone()]);
    let usecase = ResetPasswordUseCase {
        users: users.clone(),
        otp: MockOtpRepo::new(vec![test_otp(user.id, "123456")]).generator(),
    };

    let outcome = usecase
        .execute(ResetPasswordInput {
            email: "a@b.com".to_owned(),
            token: "123456".to_owned(),
            new_password: "brand-new-password".to_owned(),
        })
        .await
        .unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.message, PASSWORD_RESET);
    let updates = users.password_updates.lock().unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, user.id);
    assert_ne!(updates[0].1, user.password_hash);
}

#[tokio::test]
async fn should_fail_reset_for_unknown_email() {
    let otp = MockOtpRepo::empty();
    let usecase = ResetPasswordUseCase {
        users: MockUserRepo::empty(),
        otp: otp.generator(),
    };
    let result = usecase
        .execute(ResetPasswordInput {
            email: "nobody@b.com".to_owned(),
            token: "123456".to_owned(),
            new_password: "brand-new-password".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(AccountsServiceError::UserNotFound)));
    assert_eq!(otp.count(), 0);
}

#[tokio::test]
async fn should_reject_weak_reset_password() {
    let user = test_user();
    let users = MockUserRepo::new(vec![user.clone()]);
    let usecase = ResetPasswordUseCase {
        users: users.clone(),
        otp: MockOtpRepo::new(vec![test_otp(user.id, "123456")]).generator(),
    };
    let result = usecase
        .execute(ResetPasswordInput {
            email: "a@b.com".to_owned(),
            token: "123456".to_owned(),
            new_password: "short".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(AccountsServiceError::WeakPassword)));
    assert_eq!(users.password_update_count(), 0);
}
