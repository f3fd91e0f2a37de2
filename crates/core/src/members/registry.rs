//! Member registry view-state
//!
//! Holds the transient, non-authoritative copy of the member collection plus
//! the active filter and sort. Every mutation goes to the repository first;
//! afterwards the whole collection is refetched.
//!
//! Only one mutation may be outstanding at a time. A second one fails with
//! `CongregateError::Busy` without touching the repository.
//!
//! Concurrent edits from other clients are not detected: the last write
//! reaching the store wins.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use congregate_domain::{
    ConfirmPrompt, CongregateError, FilterCriteria, Member, MemberDraft, Result, Route, Severity,
    SortKey, StatisticsScope,
};
use parking_lot::RwLock;
use tracing::{error, info, instrument, warn};

use super::engine::{self, MemberView};
use super::ports::MemberRepository;
use crate::feedback_ports::{Confirmer, Navigator, Notifier};

pub(crate) mod messages {
    pub const LOAD_FAILED: &str = "Erro ao carregar dados dos membros";
    pub const LOAD_OK: &str = "Dados atualizados com sucesso";
    pub const DETAIL_FAILED: &str = "Erro ao carregar dados do membro";
    pub const CREATED: &str = "Membro cadastrado com sucesso!";
    pub const CREATE_FAILED: &str = "Ocorreu um erro ao cadastrar o membro";
    pub const UPDATED: &str = "Membro atualizado com sucesso!";
    pub const UPDATE_FAILED: &str = "Erro ao atualizar membro";
    pub const DELETED: &str = "Membro excluído com sucesso";
    pub const DELETE_FAILED: &str = "Erro ao excluir membro";
    pub const BUSY: &str = "Aguarde a conclusão da operação em andamento";
}

#[derive(Debug, Default)]
struct RegistryState {
    members: Vec<Member>,
    loaded: bool,
    criteria: FilterCriteria,
    sort: SortKey,
}

/// Clears the in-flight flag when the mutation ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// In-memory registry backed by a `MemberRepository`
pub struct MemberRegistry {
    repository: Arc<dyn MemberRepository>,
    notifier: Arc<dyn Notifier>,
    confirmer: Arc<dyn Confirmer>,
    navigator: Arc<dyn Navigator>,
    scope: StatisticsScope,
    state: RwLock<RegistryState>,
    in_flight: AtomicBool,
}

impl MemberRegistry {
    pub fn new(
        repository: Arc<dyn MemberRepository>,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            repository,
            notifier,
            confirmer,
            navigator,
            scope: StatisticsScope::default(),
            state: RwLock::new(RegistryState::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Choose which collection statistics describe.
    pub fn with_statistics_scope(mut self, scope: StatisticsScope) -> Self {
        self.scope = scope;
        self
    }

    /* ---------------------------------------------------------------------- */
    /* Reads */
    /* ---------------------------------------------------------------------- */

    /// Fetch the whole collection and replace the local copy.
    ///
    /// On failure the previous copy is kept; if nothing was ever loaded the
    /// navigator is sent to the member list.
    ///
    /// # Errors
    /// The repository error.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<usize> {
        let count = self.reload().await?;
        self.notifier.notify(Severity::Success, messages::LOAD_OK);
        Ok(count)
    }

    async fn reload(&self) -> Result<usize> {
        match self.repository.list_all().await {
            Ok(members) => {
                let count = members.len();
                let mut state = self.state.write();
                state.members = members;
                state.loaded = true;
                drop(state);
                info!(count, "member collection loaded");
                Ok(count)
            }
            Err(err) => {
                error!(error = %err, "failed to load members");
                self.notifier.notify(Severity::Error, messages::LOAD_FAILED);
                if !self.is_loaded() {
                    self.navigator.navigate(Route::Members);
                }
                Err(err)
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.state.read().loaded
    }

    /// Local copy in repository order.
    pub fn members(&self) -> Vec<Member> {
        self.state.read().members.clone()
    }

    /// Local lookup without a remote call.
    pub fn find(&self, id: &str) -> Option<Member> {
        self.state.read().members.iter().find(|m| m.id == id).cloned()
    }

    /// Remote lookup for the view and edit screens.
    ///
    /// # Errors
    /// The repository error; the dashboard is shown instead.
    #[instrument(skip(self))]
    pub async fn load_member(&self, id: &str) -> Result<Member> {
        match self.repository.get(id).await {
            Ok(member) => Ok(member),
            Err(err) => {
                warn!(member_id = %id, error = %err, "failed to load member");
                self.notifier.notify(Severity::Error, messages::DETAIL_FAILED);
                self.navigator.navigate(Route::Dashboard);
                Err(err)
            }
        }
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.state.read().criteria.clone()
    }

    pub fn set_criteria(&self, criteria: FilterCriteria) {
        self.state.write().criteria = criteria;
    }

    pub fn sort_key(&self) -> SortKey {
        self.state.read().sort
    }

    pub fn set_sort_key(&self, key: SortKey) {
        self.state.write().sort = key;
    }

    /// Filtered, sorted view with statistics.
    pub fn view(&self, now: DateTime<Utc>) -> MemberView {
        let state = self.state.read();
        engine::build_view(&state.members, &state.criteria, state.sort, self.scope, now)
    }

    /* ---------------------------------------------------------------------- */
    /* Mutations */
    /* ---------------------------------------------------------------------- */

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn begin_mutation(&self) -> Result<InFlight<'_>> {
        if self.in_flight.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).is_err()
        {
            warn!("mutation rejected, another one is in flight");
            return Err(CongregateError::Busy(messages::BUSY.to_string()));
        }
        Ok(InFlight(&self.in_flight))
    }

    async fn reload_after_mutation(&self) {
        if let Err(err) = self.reload().await {
            warn!(error = %err, "refetch after mutation failed, local copy kept");
        }
    }

    fn surface_failure(&self, err: &CongregateError, fallback: &str) {
        let message = match err {
            CongregateError::Validation(message) => message.as_str(),
            _ => fallback,
        };
        self.notifier.notify(Severity::Error, message);
    }

    /// Create a member, then refetch.
    ///
    /// # Errors
    /// `Busy`, input `Validation`, or the repository error.
    #[instrument(skip(self, draft))]
    pub async fn add(&self, draft: MemberDraft) -> Result<Member> {
        let _guard = self.begin_mutation()?;
        let draft = draft.normalized();
        if let Err(err) = draft.validate_for_create(Utc::now().date_naive()) {
            self.notifier.notify(Severity::Warning, err.message());
            return Err(err);
        }

        let created = match self.repository.create(&draft).await {
            Ok(member) => member,
            Err(err) => {
                error!(error = %err, "member create failed");
                self.surface_failure(&err, messages::CREATE_FAILED);
                return Err(err);
            }
        };

        self.notifier.notify(Severity::Success, messages::CREATED);
        self.reload_after_mutation().await;
        self.navigator.navigate(Route::Dashboard);
        Ok(created)
    }

    /// Patch a member. The returned row replaces the local copy before the
    /// refetch.
    ///
    /// # Errors
    /// `Busy`, `NotFound`, input `Validation`, or the repository error.
    #[instrument(skip(self, draft))]
    pub async fn edit(&self, id: &str, draft: MemberDraft) -> Result<Member> {
        let _guard = self.begin_mutation()?;
        let draft = draft.normalized();

        let existing = match self.find(id) {
            Some(member) => member,
            None => match self.repository.get(id).await {
                Ok(member) => member,
                Err(err) => {
                    self.surface_failure(&err, messages::UPDATE_FAILED);
                    return Err(err);
                }
            },
        };
        if let Err(err) = draft.validate_for_update(&existing, Utc::now().date_naive()) {
            self.notifier.notify(Severity::Warning, err.message());
            return Err(err);
        }

        let updated = match self.repository.update(id, &draft).await {
            Ok(member) => member,
            Err(err) => {
                error!(member_id = %id, error = %err, "member update failed");
                self.surface_failure(&err, messages::UPDATE_FAILED);
                return Err(err);
            }
        };

        info!(member_id = %id, "member updated");
        {
            let mut state = self.state.write();
            if let Some(slot) = state.members.iter_mut().find(|m| m.id == updated.id) {
                *slot = updated.clone();
            }
        }
        self.notifier.notify(Severity::Success, messages::UPDATED);
        self.reload_after_mutation().await;
        self.navigator.navigate(Route::Dashboard);
        Ok(updated)
    }

    /// Delete a member after explicit confirmation.
    ///
    /// # Errors
    /// `Busy`, `Cancelled` when the prompt is declined, `NotFound`, or the
    /// repository error.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<()> {
        let _guard = self.begin_mutation()?;

        let name = match self.find(id) {
            Some(member) => member.full_name,
            None => match self.repository.get(id).await {
                Ok(member) => member.full_name,
                Err(err) => {
                    self.surface_failure(&err, messages::DELETE_FAILED);
                    return Err(err);
                }
            },
        };

        if !self.confirmer.confirm(&ConfirmPrompt::delete_member(&name)).await {
            info!(member_id = %id, "delete cancelled by user");
            return Err(CongregateError::Cancelled(format!("delete of member {id}")));
        }

        if let Err(err) = self.repository.delete(id).await {
            error!(member_id = %id, error = %err, "member delete failed");
            self.notifier.notify(Severity::Error, messages::DELETE_FAILED);
            return Err(err);
        }

        info!(member_id = %id, "member deleted");
        self.state.write().members.retain(|m| m.id != id);
        self.notifier.notify(Severity::Success, messages::DELETED);
        self.reload_after_mutation().await;
        Ok(())
    }
}
