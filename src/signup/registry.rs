use super::controller::SignupController;
use crate::navigation::RecordingNavigator;
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

/// A rendered signup form: its controller plus the navigator it reports to.
#[derive(Clone)]
pub struct FormSession {
    pub controller: Arc<SignupController>,
    pub navigator: Arc<RecordingNavigator>,
}

struct Entry {
    form: FormSession,
    touched: Instant,
}

/// Live signup forms keyed by the token embedded in each rendered form.
///
/// Reposting the same form reaches the same controller, so its `loading`
/// flag rejects duplicate submissions. Idle forms expire after `ttl` and are
/// unmounted when evicted. At most `max_forms` are kept; inserting beyond
/// that evicts the least recently touched form.
pub struct FormRegistry {
    ttl: Duration,
    max_forms: usize,
    forms: Mutex<HashMap<String, Entry>>,
}

pub const DEFAULT_MAX_FORMS: usize = 10_000;

impl FormRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            max_forms: DEFAULT_MAX_FORMS,
            forms: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_max_forms(mut self, max_forms: usize) -> Self {
        self.max_forms = max_forms.max(1);
        self
    }

    pub fn new_token() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Register a form under `token`, evicting expired ones.
    pub async fn insert(&self, token: String, form: FormSession) {
        let mut forms = self.forms.lock().await;
        let now = Instant::now();

        forms.retain(|_, entry| {
            let keep = now.duration_since(entry.touched) < self.ttl;
            if !keep {
                entry.form.controller.unmount();
            }
            keep
        });

        while forms.len() >= self.max_forms && !forms.contains_key(&token) {
            let Some(oldest) = forms
                .iter()
                .min_by_key(|(_, entry)| entry.touched)
                .map(|(key, _)| key.clone())
            else {
                break;
            };
            if let Some(entry) = forms.remove(&oldest) {
                tracing::debug!("Signup form limit reached, evicting {}", oldest);
                entry.form.controller.unmount();
            }
        }

        if let Some(previous) = forms.insert(
            token,
            Entry {
                form,
                touched: now,
            },
        ) {
            previous.form.controller.unmount();
        }

        tracing::debug!("{} signup forms live", forms.len());
    }

    /// Look up a live form and refresh its expiry.
    pub async fn get(&self, token: &str) -> Option<FormSession> {
        let mut forms = self.forms.lock().await;
        let now = Instant::now();

        let expired = match forms.get_mut(token) {
            Some(entry) if now.duration_since(entry.touched) < self.ttl => {
                entry.touched = now;
                return Some(entry.form.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            if let Some(entry) = forms.remove(token) {
                tracing::debug!("Signup form {} expired", token);
                entry.form.controller.unmount();
            }
        }

        None
    }

    /// Drop a form and unmount its controller.
    pub async fn remove(&self, token: &str) {
        if let Some(entry) = self.forms.lock().await.remove(token) {
            entry.form.controller.unmount();
        }
    }

    pub async fn len(&self) -> usize {
        self.forms.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
