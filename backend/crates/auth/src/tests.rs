//! Auth crate tests
//!
//! Exercises the two-step login flow end to end against in-memory
//! repository fakes and a recording mailer.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use platform::client::ClientFingerprint;
use platform::mailer::{MailError, Mailer};
use uuid::Uuid;

use crate::application::{
    CheckSessionUseCase, SeedStaffInput, SeedStaffUseCase, SignInInput, SignInUseCase,
    SignOutUseCase, SignUpInput, SignUpUseCase, StaffSignInInput, StaffSignInUseCase,
    VerifyOtpInput, VerifyOtpUseCase,
};
use crate::application::config::AuthConfig;
use crate::domain::entity::{
    auth_session::AuthSession, credentials::Credentials, otp_device::OtpDevice,
    pending_auth::PendingAuth, user::User,
};
use crate::domain::repository::{
    AuthSessionRepository, CredentialsRepository, OtpDeviceRepository, PendingAuthRepository,
    UserRepository,
};
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_role::UserRole,
    user_status::UserStatus,
};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// In-memory fakes
// ============================================================================

#[derive(Clone, Default)]
struct MemRepo {
    users: Arc<Mutex<Vec<User>>>,
    credentials: Arc<Mutex<Vec<Credentials>>>,
    devices: Arc<Mutex<HashMap<Uuid, OtpDevice>>>,
    pending: Arc<Mutex<HashMap<Uuid, PendingAuth>>>,
    sessions: Arc<Mutex<HashMap<Uuid, AuthSession>>>,
}

impl UserRepository for MemRepo {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.user_id == *user_id)
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.user_name.canonical() == user_name.canonical()))
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.email == *email))
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        if let Some(slot) = users.iter_mut().find(|u| u.user_id == user.user_id) {
            *slot = user.clone();
        }
        Ok(())
    }
}

impl CredentialsRepository for MemRepo {
    async fn create(&self, credentials: &Credentials) -> AuthResult<()> {
        self.credentials.lock().unwrap().push(credentials.clone());
        Ok(())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<Credentials>> {
        Ok(self
            .credentials
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.user_id == *user_id)
            .cloned())
    }

    async fn update(&self, credentials: &Credentials) -> AuthResult<()> {
        let mut all = self.credentials.lock().unwrap();
        if let Some(slot) = all.iter_mut().find(|c| c.user_id == credentials.user_id) {
            *slot = credentials.clone();
        }
        Ok(())
    }
}

impl OtpDeviceRepository for MemRepo {
    async fn create(&self, device: &OtpDevice) -> AuthResult<()> {
        let mut devices = self.devices.lock().unwrap();
        if devices.contains_key(device.user_id.as_uuid()) {
            return Err(AuthError::Internal("duplicate device".to_string()));
        }
        devices.insert(*device.user_id.as_uuid(), device.clone());
        Ok(())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<OtpDevice>> {
        Ok(self.devices.lock().unwrap().get(user_id.as_uuid()).cloned())
    }

    async fn update(&self, device: &OtpDevice) -> AuthResult<()> {
        self.devices
            .lock()
            .unwrap()
            .insert(*device.user_id.as_uuid(), device.clone());
        Ok(())
    }
}

impl PendingAuthRepository for MemRepo {
    async fn create(&self, pending: &PendingAuth) -> AuthResult<()> {
        self.pending
            .lock()
            .unwrap()
            .insert(pending.pending_id, pending.clone());
        Ok(())
    }

    async fn find_by_id(&self, pending_id: Uuid) -> AuthResult<Option<PendingAuth>> {
        Ok(self.pending.lock().unwrap().get(&pending_id).cloned())
    }

    async fn delete(&self, pending_id: Uuid) -> AuthResult<()> {
        self.pending.lock().unwrap().remove(&pending_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();
        let mut pending = self.pending.lock().unwrap();
        let before = pending.len();
        pending.retain(|_, p| p.expires_at_ms >= now_ms);
        Ok((before - pending.len()) as u64)
    }
}

impl AuthSessionRepository for MemRepo {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        session_id: Uuid,
        fingerprint_hash: &[u8],
    ) -> AuthResult<Option<AuthSession>> {
        let sessions = self.sessions.lock().unwrap();
        match sessions.get(&session_id) {
            Some(s) if s.client_fingerprint_hash != fingerprint_hash => {
                Err(AuthError::SessionFingerprintMismatch)
            }
            Some(s) => Ok(Some(s.clone())),
            None => Ok(None),
        }
    }

    async fn update(&self, session: &AuthSession) -> AuthResult<()> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> AuthResult<()> {
        self.sessions.lock().unwrap().remove(&session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at_ms >= now_ms);
        Ok((before - sessions.len()) as u64)
    }
}

/// Recording mailer with a switchable failure mode
#[derive(Clone, Default)]
struct MockMailer {
    sent: Arc<Mutex<Vec<(String, String, String)>>>,
    fail: Arc<AtomicBool>,
}

impl Mailer for MockMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(MailError::Transport("connection refused".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

// ============================================================================
// Test harness
// ============================================================================

const PASSWORD: &str = "CorrectHorse#42";

struct Harness {
    repo: Arc<MemRepo>,
    mailer: Arc<MockMailer>,
    config: Arc<AuthConfig>,
}

impl Harness {
    fn new() -> Self {
        Self {
            repo: Arc::new(MemRepo::default()),
            mailer: Arc::new(MockMailer::default()),
            config: Arc::new(AuthConfig::development()),
        }
    }

    async fn register(&self, user_name: &str, email: &str) -> String {
        let use_case =
            SignUpUseCase::new(self.repo.clone(), self.repo.clone(), self.config.clone());
        use_case
            .execute(SignUpInput {
                user_name: user_name.to_string(),
                email: email.to_string(),
                password: PASSWORD.to_string(),
            })
            .await
            .unwrap()
            .public_id
    }

    async fn login(&self, email: &str) -> AuthResult<crate::application::SignInOutput> {
        let use_case = SignInUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.repo.clone(),
            self.mailer.clone(),
            self.config.clone(),
        );
        use_case
            .execute(SignInInput {
                email: email.to_string(),
                password: PASSWORD.to_string(),
            })
            .await
    }

    async fn verify(
        &self,
        pending_token: &str,
        code: &str,
    ) -> AuthResult<crate::application::VerifyOtpOutput> {
        let use_case = VerifyOtpUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.repo.clone(),
            self.config.clone(),
        );
        use_case
            .execute(
                VerifyOtpInput {
                    pending_token: pending_token.to_string(),
                    code: code.to_string(),
                },
                fingerprint(),
            )
            .await
    }

    async fn seed_staff(&self, user_name: &str, email: &str) -> AuthResult<Option<String>> {
        let use_case =
            SeedStaffUseCase::new(self.repo.clone(), self.repo.clone(), self.config.clone());
        use_case
            .execute(SeedStaffInput {
                user_name: user_name.to_string(),
                email: email.to_string(),
                password: PASSWORD.to_string(),
            })
            .await
    }

    async fn staff_login(
        &self,
        email: &str,
        password: &str,
    ) -> AuthResult<crate::application::StaffSignInOutput> {
        let use_case = StaffSignInUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.repo.clone(),
            self.config.clone(),
        );
        use_case
            .execute(
                StaffSignInInput {
                    email: email.to_string(),
                    password: password.to_string(),
                },
                fingerprint(),
            )
            .await
    }

    /// Current valid code for the user's device
    fn current_code(&self, email: &str) -> String {
        let users = self.repo.users.lock().unwrap();
        let user = users.iter().find(|u| u.email.as_str() == email).unwrap();
        let devices = self.repo.devices.lock().unwrap();
        let device = devices.get(user.user_id.as_uuid()).unwrap();
        device.secret.current_code(email).unwrap()
    }

    fn wrong_code(&self, email: &str) -> String {
        let code = self.current_code(email);
        let last = code.as_bytes()[5] - b'0';
        format!("{}{}", &code[..5], (last + 5) % 10)
    }

    fn device_of(&self, email: &str) -> OtpDevice {
        let users = self.repo.users.lock().unwrap();
        let user = users.iter().find(|u| u.email.as_str() == email).unwrap();
        self.repo
            .devices
            .lock()
            .unwrap()
            .get(user.user_id.as_uuid())
            .unwrap()
            .clone()
    }

    fn mutate_device(&self, email: &str, f: impl FnOnce(&mut OtpDevice)) {
        let users = self.repo.users.lock().unwrap();
        let user = users.iter().find(|u| u.email.as_str() == email).unwrap();
        let mut devices = self.repo.devices.lock().unwrap();
        f(devices.get_mut(user.user_id.as_uuid()).unwrap());
    }

    fn mutate_user(&self, email: &str, f: impl FnOnce(&mut User)) {
        let mut users = self.repo.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.email.as_str() == email)
            .unwrap();
        f(user);
    }
}

fn fingerprint() -> ClientFingerprint {
    ClientFingerprint::new([42u8; 32], None, Some("TestAgent/1.0".to_string()))
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_duplicate_user_name_refused() {
    let h = Harness::new();
    h.register("Asha Kumar", "asha@example.com").await;

    let use_case = SignUpUseCase::new(h.repo.clone(), h.repo.clone(), h.config.clone());
    let result = use_case
        .execute(SignUpInput {
            user_name: "asha kumar".to_string(),
            email: "other@example.com".to_string(),
            password: PASSWORD.to_string(),
        })
        .await;

    assert!(matches!(result, Err(AuthError::UserNameTaken)));
}

#[tokio::test]
async fn test_register_duplicate_email_refused() {
    let h = Harness::new();
    h.register("Asha Kumar", "asha@example.com").await;

    let use_case = SignUpUseCase::new(h.repo.clone(), h.repo.clone(), h.config.clone());
    let result = use_case
        .execute(SignUpInput {
            user_name: "Someone Else".to_string(),
            email: "Asha@Example.com".to_string(),
            password: PASSWORD.to_string(),
        })
        .await;

    assert!(matches!(result, Err(AuthError::EmailTaken)));
}

// ============================================================================
// Password step
// ============================================================================

#[tokio::test]
async fn test_full_login_flow_authenticates() {
    let h = Harness::new();
    h.register("Asha Kumar", "asha@example.com").await;

    // No device yet; first login provisions one silently
    let output = h.login("asha@example.com").await.unwrap();

    let device = h.device_of("asha@example.com");
    assert_eq!(device.send_count_hour, 1);
    assert!(device.last_sent_at.is_some());
    assert_eq!(h.mailer.sent.lock().unwrap().len(), 1);
    assert_eq!(h.repo.pending.lock().unwrap().len(), 1);

    // The dispatched code authenticates and consumes the marker
    let code = h.current_code("asha@example.com");
    let verified = h.verify(&output.pending_token, &code).await.unwrap();

    assert_eq!(verified.user_role, "applicant");
    assert!(h.repo.pending.lock().unwrap().is_empty());
    assert_eq!(h.repo.sessions.lock().unwrap().len(), 1);

    let device = h.device_of("asha@example.com");
    assert_eq!(device.failed_attempts, 0);
    assert!(device.locked_until.is_none());
}

#[tokio::test]
async fn test_login_unknown_email_is_invalid_credentials() {
    let h = Harness::new();
    let result = h.login("nobody@example.com").await;
    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    assert!(h.mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_wrong_password_is_invalid_credentials() {
    let h = Harness::new();
    h.register("Asha Kumar", "asha@example.com").await;

    let use_case = SignInUseCase::new(
        h.repo.clone(),
        h.repo.clone(),
        h.repo.clone(),
        h.mailer.clone(),
        h.config.clone(),
    );
    let result = use_case
        .execute(SignInInput {
            email: "asha@example.com".to_string(),
            password: "WrongBattery#42".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    assert!(h.mailer.sent.lock().unwrap().is_empty());
    assert!(h.repo.pending.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_staff_account_redirected_before_dispatch() {
    let h = Harness::new();
    h.register("Studio Manager", "manager@example.com").await;
    h.mutate_user("manager@example.com", |u| u.user_role = UserRole::Staff);

    let result = h.login("manager@example.com").await;

    assert!(matches!(result, Err(AuthError::StaffRedirect)));
    assert!(h.mailer.sent.lock().unwrap().is_empty());
    assert!(h.repo.devices.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_disabled_account_refused_before_dispatch() {
    let h = Harness::new();
    h.register("Asha Kumar", "asha@example.com").await;
    h.mutate_user("asha@example.com", |u| {
        u.user_status = UserStatus::Disabled
    });

    let result = h.login("asha@example.com").await;

    assert!(matches!(result, Err(AuthError::AccountDisabled)));
    assert!(h.mailer.sent.lock().unwrap().is_empty());
    assert!(h.repo.devices.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_repeated_logins_keep_single_device() {
    let h = Harness::new();
    h.register("Asha Kumar", "asha@example.com").await;

    h.login("asha@example.com").await.unwrap();
    h.login("asha@example.com").await.unwrap();

    assert_eq!(h.repo.devices.lock().unwrap().len(), 1);
    assert_eq!(h.device_of("asha@example.com").send_count_hour, 2);
}

// ============================================================================
// Staff login
// ============================================================================

#[tokio::test]
async fn test_staff_login_establishes_session_without_otp() {
    let h = Harness::new();
    h.seed_staff("Studio Manager", "manager@example.com")
        .await
        .unwrap()
        .unwrap();

    let output = h.staff_login("manager@example.com", PASSWORD).await.unwrap();

    assert_eq!(output.user_role, "staff");
    // No code dispatch, no device, no pending marker; just a session
    assert!(h.mailer.sent.lock().unwrap().is_empty());
    assert!(h.repo.devices.lock().unwrap().is_empty());
    assert!(h.repo.pending.lock().unwrap().is_empty());
    assert_eq!(h.repo.sessions.lock().unwrap().len(), 1);

    let check = CheckSessionUseCase::new(h.repo.clone(), h.config.clone());
    assert!(check.is_valid(&output.session_token, &[42u8; 32]).await);
}

#[tokio::test]
async fn test_staff_login_refuses_applicant_account() {
    let h = Harness::new();
    h.register("Asha Kumar", "asha@example.com").await;

    let result = h.staff_login("asha@example.com", PASSWORD).await;

    // Same refusal as a wrong password; the endpoint reveals nothing
    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    assert!(h.repo.sessions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_staff_login_wrong_password_refused() {
    let h = Harness::new();
    h.seed_staff("Studio Manager", "manager@example.com")
        .await
        .unwrap();

    let result = h.staff_login("manager@example.com", "WrongBattery#42").await;

    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    assert!(h.repo.sessions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_staff_login_disabled_account_refused() {
    let h = Harness::new();
    h.seed_staff("Studio Manager", "manager@example.com")
        .await
        .unwrap();
    h.mutate_user("manager@example.com", |u| {
        u.user_status = UserStatus::Disabled
    });

    let result = h.staff_login("manager@example.com", PASSWORD).await;
    assert!(matches!(result, Err(AuthError::AccountDisabled)));
}

#[tokio::test]
async fn test_seed_staff_is_idempotent() {
    let h = Harness::new();

    let first = h
        .seed_staff("Studio Manager", "manager@example.com")
        .await
        .unwrap();
    let second = h
        .seed_staff("Studio Manager", "manager@example.com")
        .await
        .unwrap();

    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(h.repo.users.lock().unwrap().len(), 1);
}

// ============================================================================
// Dispatch rate limiting
// ============================================================================

#[tokio::test]
async fn test_seventh_dispatch_within_hour_refused() {
    let h = Harness::new();
    h.register("Asha Kumar", "asha@example.com").await;

    for _ in 0..6 {
        h.login("asha@example.com").await.unwrap();
    }

    let result = h.login("asha@example.com").await;
    assert!(matches!(result, Err(AuthError::RateLimited)));

    // Exactly 6 mails went out; the refusal created no pending marker
    assert_eq!(h.mailer.sent.lock().unwrap().len(), 6);
    assert_eq!(h.repo.pending.lock().unwrap().len(), 6);
    assert_eq!(h.device_of("asha@example.com").send_count_hour, 6);
}

#[tokio::test]
async fn test_dispatch_allowed_again_after_window() {
    let h = Harness::new();
    h.register("Asha Kumar", "asha@example.com").await;

    for _ in 0..6 {
        h.login("asha@example.com").await.unwrap();
    }

    // Age the window past the rolling hour
    h.mutate_device("asha@example.com", |d| {
        d.last_send_count_reset = Some(Utc::now() - Duration::seconds(3601));
    });

    h.login("asha@example.com").await.unwrap();
    assert_eq!(h.device_of("asha@example.com").send_count_hour, 1);
}

#[tokio::test]
async fn test_dispatch_failure_creates_no_pending_state() {
    let h = Harness::new();
    h.register("Asha Kumar", "asha@example.com").await;
    h.mailer.fail.store(true, Ordering::SeqCst);

    let result = h.login("asha@example.com").await;

    assert!(matches!(result, Err(AuthError::DispatchFailed)));
    assert!(h.repo.pending.lock().unwrap().is_empty());
    // The failed send is not counted against the quota
    assert_eq!(h.device_of("asha@example.com").send_count_hour, 0);
}

// ============================================================================
// Code step and lockout
// ============================================================================

#[tokio::test]
async fn test_five_failures_lock_out_correct_code() {
    let h = Harness::new();
    h.register("Asha Kumar", "asha@example.com").await;
    let output = h.login("asha@example.com").await.unwrap();

    let wrong = h.wrong_code("asha@example.com");
    for _ in 0..5 {
        let result = h.verify(&output.pending_token, &wrong).await;
        assert!(matches!(result, Err(AuthError::InvalidCode)));
    }

    let device = h.device_of("asha@example.com");
    assert_eq!(device.failed_attempts, 5);
    assert!(device.locked_until.is_some());

    // Sixth attempt is refused even with the correct code
    let code = h.current_code("asha@example.com");
    let result = h.verify(&output.pending_token, &code).await;
    assert!(matches!(result, Err(AuthError::AccountLocked)));
}

#[tokio::test]
async fn test_lockout_recovery_after_expiry() {
    let h = Harness::new();
    h.register("Asha Kumar", "asha@example.com").await;
    let output = h.login("asha@example.com").await.unwrap();

    let wrong = h.wrong_code("asha@example.com");
    for _ in 0..5 {
        let _ = h.verify(&output.pending_token, &wrong).await;
    }

    // Age the lock past its expiry
    h.mutate_device("asha@example.com", |d| {
        d.locked_until = Some(Utc::now() - Duration::seconds(1));
    });

    let code = h.current_code("asha@example.com");
    h.verify(&output.pending_token, &code).await.unwrap();

    let device = h.device_of("asha@example.com");
    assert_eq!(device.failed_attempts, 0);
    assert!(device.locked_until.is_none());
}

#[tokio::test]
async fn test_garbage_code_counts_as_failure() {
    let h = Harness::new();
    h.register("Asha Kumar", "asha@example.com").await;
    let output = h.login("asha@example.com").await.unwrap();

    let result = h.verify(&output.pending_token, "not-a-code").await;
    assert!(matches!(result, Err(AuthError::InvalidCode)));
    assert_eq!(h.device_of("asha@example.com").failed_attempts, 1);
}

#[tokio::test]
async fn test_verify_with_forged_token_is_session_expired() {
    let h = Harness::new();
    h.register("Asha Kumar", "asha@example.com").await;
    h.login("asha@example.com").await.unwrap();

    let code = h.current_code("asha@example.com");
    let result = h.verify("bogus.token", &code).await;
    assert!(matches!(result, Err(AuthError::SessionExpired)));
}

#[tokio::test]
async fn test_verify_with_expired_marker_is_session_expired() {
    let h = Harness::new();
    h.register("Asha Kumar", "asha@example.com").await;
    let output = h.login("asha@example.com").await.unwrap();

    // Age the marker past its TTL
    {
        let mut pending = h.repo.pending.lock().unwrap();
        for marker in pending.values_mut() {
            marker.expires_at_ms = Utc::now().timestamp_millis() - 1;
        }
    }

    let code = h.current_code("asha@example.com");
    let result = h.verify(&output.pending_token, &code).await;
    assert!(matches!(result, Err(AuthError::SessionExpired)));
    // Expired markers are discarded on sight
    assert!(h.repo.pending.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_verify_with_vanished_device_is_device_missing() {
    let h = Harness::new();
    h.register("Asha Kumar", "asha@example.com").await;
    let output = h.login("asha@example.com").await.unwrap();
    let code = h.current_code("asha@example.com");

    h.repo.devices.lock().unwrap().clear();

    let result = h.verify(&output.pending_token, &code).await;
    assert!(matches!(result, Err(AuthError::DeviceMissing)));
}

// ============================================================================
// Sessions
// ============================================================================

#[tokio::test]
async fn test_session_check_and_fingerprint_binding() {
    let h = Harness::new();
    h.register("Asha Kumar", "asha@example.com").await;
    let output = h.login("asha@example.com").await.unwrap();
    let code = h.current_code("asha@example.com");
    let verified = h.verify(&output.pending_token, &code).await.unwrap();

    let check = CheckSessionUseCase::new(h.repo.clone(), h.config.clone());
    assert!(check.is_valid(&verified.session_token, &[42u8; 32]).await);

    // A different client fingerprint does not see the session
    assert!(!check.is_valid(&verified.session_token, &[1u8; 32]).await);
}

#[tokio::test]
async fn test_logout_deletes_session() {
    let h = Harness::new();
    h.register("Asha Kumar", "asha@example.com").await;
    let output = h.login("asha@example.com").await.unwrap();
    let code = h.current_code("asha@example.com");
    let verified = h.verify(&output.pending_token, &code).await.unwrap();

    let sign_out = SignOutUseCase::new(h.repo.clone(), h.config.clone());
    sign_out.execute(&verified.session_token).await.unwrap();

    assert!(h.repo.sessions.lock().unwrap().is_empty());

    let check = CheckSessionUseCase::new(h.repo.clone(), h.config.clone());
    assert!(!check.is_valid(&verified.session_token, &[42u8; 32]).await);
}
