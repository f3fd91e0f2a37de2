//! In-memory member store
//!
//! Keeps rows sorted by name like the remote store, assigns identifiers and
//! timestamps, and can be told to fail or to stall a call.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use congregate_core::MemberRepository;
use congregate_domain::{CongregateError, Member, MemberDraft, Result as DomainResult};
use parking_lot::Mutex;
use tokio::sync::Notify;

#[derive(Default)]
struct Calls {
    list: AtomicUsize,
    get: AtomicUsize,
    create: AtomicUsize,
    update: AtomicUsize,
    delete: AtomicUsize,
}

/// In-memory mock for `MemberRepository`.
#[derive(Clone, Default)]
pub struct InMemoryMemberRepository {
    rows: Arc<Mutex<Vec<Member>>>,
    next_id: Arc<AtomicUsize>,
    calls: Arc<Calls>,
    fail_list: Arc<Mutex<Option<CongregateError>>>,
    fail_writes: Arc<Mutex<Option<CongregateError>>>,
    gate: Arc<Mutex<Option<Arc<Notify>>>>,
}

impl InMemoryMemberRepository {
    /// Create a new mock seeded with the provided rows.
    pub fn new(rows: Vec<Member>) -> Self {
        let repo = Self::default();
        *repo.rows.lock() = rows;
        repo
    }

    /// Make every `list_all` fail with `err` until cleared.
    pub fn failing_list(self, err: CongregateError) -> Self {
        *self.fail_list.lock() = Some(err);
        self
    }

    pub fn set_list_failure(&self, err: Option<CongregateError>) {
        *self.fail_list.lock() = err;
    }

    /// Make create/update/delete fail with `err`.
    pub fn failing_writes(self, err: CongregateError) -> Self {
        *self.fail_writes.lock() = Some(err);
        self
    }

    /// Stall writes until the returned handle is notified.
    pub fn stall_writes(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.gate.lock() = Some(Arc::clone(&notify));
        notify
    }

    pub fn rows(&self) -> Vec<Member> {
        self.rows.lock().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.calls.list.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.calls.create.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.calls.update.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.calls.delete.load(Ordering::SeqCst)
    }

    async fn before_write(&self) -> DomainResult<()> {
        let gate = self.gate.lock().clone();
        if let Some(notify) = gate {
            notify.notified().await;
        }
        match self.fail_writes.lock().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn sort_rows(rows: &mut [Member]) {
        rows.sort_by(|a, b| a.full_name.cmp(&b.full_name));
    }
}

fn not_found(id: &str) -> CongregateError {
    CongregateError::NotFound(format!("member {id}"))
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn list_all(&self) -> DomainResult<Vec<Member>> {
        self.calls.list.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.fail_list.lock().clone() {
            return Err(err);
        }
        let mut rows = self.rows.lock().clone();
        Self::sort_rows(&mut rows);
        Ok(rows)
    }

    async fn get(&self, id: &str) -> DomainResult<Member> {
        self.calls.get.fetch_add(1, Ordering::SeqCst);
        self.rows.lock().iter().find(|m| m.id == id).cloned().ok_or_else(|| not_found(id))
    }

    async fn create(&self, draft: &MemberDraft) -> DomainResult<Member> {
        self.calls.create.fetch_add(1, Ordering::SeqCst);
        self.before_write().await?;
        let (Some(full_name), Some(birth_date), Some(gender), Some(region), Some(function)) =
            (draft.full_name.clone(), draft.birth_date, draft.gender, draft.region, draft.function)
        else {
            return Err(CongregateError::Validation(
                "Por favor, preencha todos os campos obrigatórios".to_string(),
            ));
        };
        let id = format!("new-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let member = Member {
            id,
            full_name,
            birth_date,
            gender,
            region,
            parish: draft.parish.clone().unwrap_or_default(),
            function,
            baptismal_state: draft.baptismal_state,
            society: draft.society,
            phone: draft.phone.clone(),
            email: draft.email.clone(),
            address: draft.address.clone(),
            created_at: Utc::now(),
            updated_at: None,
        };
        self.rows.lock().push(member.clone());
        Ok(member)
    }

    async fn update(&self, id: &str, draft: &MemberDraft) -> DomainResult<Member> {
        self.calls.update.fetch_add(1, Ordering::SeqCst);
        self.before_write().await?;
        let mut rows = self.rows.lock();
        let slot = rows.iter_mut().find(|m| m.id == id).ok_or_else(|| not_found(id))?;
        let mut updated = draft.apply_to(slot);
        updated.updated_at = Some(Utc::now());
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.calls.delete.fetch_add(1, Ordering::SeqCst);
        self.before_write().await?;
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|m| m.id != id);
        if rows.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}
