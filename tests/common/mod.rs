#![allow(dead_code)]

use async_trait::async_trait;
use freshbay::{
    auth::AuthClient,
    error::AuthError,
    models::{AuthSession, AuthUser, SignUpMetadata, SignUpRequest},
};
use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use tokio::sync::Notify;

pub const VALID_TOKEN: &str = "valid-token";

/// In-memory auth provider that records every call.
#[derive(Default)]
pub struct FakeAuth {
    sign_ups: Mutex<Vec<SignUpRequest>>,
    /// Queued sign-up results; empty means success
    sign_up_results: Mutex<VecDeque<Result<(), String>>>,
    /// When set, sign-up waits for a notification before settling
    sign_up_gate: Option<Arc<Notify>>,
    /// When set, current_user waits for a notification before settling
    probe_gate: Option<Arc<Notify>>,
    user: Option<AuthUser>,
    current_user_calls: AtomicUsize,
    sign_outs: AtomicUsize,
}

impl FakeAuth {
    pub fn accepting() -> Self {
        Self::default()
    }

    pub fn rejecting(message: &str) -> Self {
        let fake = Self::default();
        fake.queue_sign_up_error(message);
        fake
    }

    pub fn with_user(mut self, user: AuthUser) -> Self {
        self.user = Some(user);
        self
    }

    pub fn held(mut self, gate: Arc<Notify>) -> Self {
        self.sign_up_gate = Some(gate);
        self
    }

    pub fn probe_held(mut self, gate: Arc<Notify>) -> Self {
        self.probe_gate = Some(gate);
        self
    }

    pub fn queue_sign_up_error(&self, message: &str) {
        self.sign_up_results
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn sign_ups(&self) -> Vec<SignUpRequest> {
        self.sign_ups.lock().unwrap().clone()
    }

    pub fn sign_up_count(&self) -> usize {
        self.sign_ups.lock().unwrap().len()
    }

    pub fn current_user_calls(&self) -> usize {
        self.current_user_calls.load(Ordering::SeqCst)
    }

    pub fn sign_outs(&self) -> usize {
        self.sign_outs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthClient for FakeAuth {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<(), AuthError> {
        self.sign_ups.lock().unwrap().push(request.clone());

        if let Some(gate) = &self.sign_up_gate {
            gate.notified().await;
        }

        let result = self.sign_up_results.lock().unwrap().pop_front();
        match result {
            Some(Err(message)) => Err(AuthError::api(400, message)),
            _ => Ok(()),
        }
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthError> {
        self.current_user_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.probe_gate {
            gate.notified().await;
        }

        if access_token == VALID_TOKEN {
            Ok(self.user.clone())
        } else {
            Ok(None)
        }
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        match &self.user {
            Some(user) if user.email.as_deref() == Some(email) && password == "correct-horse" => {
                Ok(AuthSession {
                    access_token: VALID_TOKEN.to_string(),
                    refresh_token: None,
                    expires_in: Some(3600),
                    user: user.clone(),
                })
            }
            _ => Err(AuthError::api(400, "Invalid login credentials")),
        }
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), AuthError> {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn test_user() -> AuthUser {
    AuthUser {
        id: "user-1".to_string(),
        email: Some("jane@example.com".to_string()),
        user_metadata: SignUpMetadata {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            ..Default::default()
        },
        created_at: None,
    }
}

/// Poll `check` until it holds, failing the test after one second.
pub async fn wait_until(mut check: impl FnMut() -> bool) {
    for _ in 0..200 {
        if check() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached in time");
}
