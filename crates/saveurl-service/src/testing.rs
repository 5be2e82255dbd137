//! Fixtures shared by the service unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use saveurl_database::MemoryStore;
use saveurl_database::store::UserStore;
use saveurl_entity::user::{CreateUser, User};
use saveurl_mail::{MailError, Mailer, OutgoingMail};

use crate::context::RequestContext;

/// Mailer that keeps every message and can be told to fail.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingMail>>,
    pub fail: AtomicBool,
}

impl RecordingMailer {
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().expect("lock").clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn deliver(&self, mail: OutgoingMail) -> Result<(), MailError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(MailError::Transport("relay unavailable".into()));
        }
        self.sent.lock().expect("lock").push(mail);
        Ok(())
    }
}

/// Insert a verified user and return its context.
pub async fn verified_user(store: &MemoryStore, email: &str, name: &str) -> (User, RequestContext) {
    let user = UserStore::create(
        store,
        &CreateUser {
            name: name.into(),
            email: email.into(),
            password_hash: "hash".into(),
            verification_code: "000000".into(),
            verification_code_expiry: Utc::now() + Duration::minutes(15),
        },
    )
    .await
    .expect("create user");
    store.mark_verified(user.id).await.expect("verify");
    let ctx = RequestContext::new(user.id, user.email.clone(), user.name.clone());
    (user, ctx)
}
