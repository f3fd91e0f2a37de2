//! Member registry behaviour against an in-memory store

mod support;

use std::sync::Arc;

use chrono::Utc;
use congregate_core::MemberRegistry;
use congregate_domain::{
    CongregateError, FilterCriteria, MemberDraft, Region, Route, Severity, StatisticsScope,
};
use support::feedback::{RecordingNavigator, RecordingNotifier, ScriptedConfirmer};
use support::fixtures::{ana_and_bruno, valid_draft};
use support::repositories::InMemoryMemberRepository;

struct Harness {
    registry: Arc<MemberRegistry>,
    repo: InMemoryMemberRepository,
    notifier: RecordingNotifier,
    navigator: RecordingNavigator,
    confirmer: ScriptedConfirmer,
}

fn harness(repo: InMemoryMemberRepository, confirm: bool) -> Harness {
    let notifier = RecordingNotifier::default();
    let navigator = RecordingNavigator::default();
    let confirmer = ScriptedConfirmer::always(confirm);
    let registry = MemberRegistry::new(
        Arc::new(repo.clone()),
        Arc::new(notifier.clone()),
        Arc::new(confirmer.clone()),
        Arc::new(navigator.clone()),
    );
    Harness { registry: Arc::new(registry), repo, notifier, navigator, confirmer }
}

#[tokio::test]
async fn refresh_loads_rows_in_name_order() {
    let h = harness(InMemoryMemberRepository::new(ana_and_bruno().into_iter().rev().collect()), true);

    let count = h.registry.refresh().await.unwrap();

    assert_eq!(count, 2);
    let names: Vec<_> = h.registry.members().into_iter().map(|m| m.full_name).collect();
    assert_eq!(names, ["Ana", "Bruno"]);
    assert!(h.notifier.contains(Severity::Success, "Dados atualizados com sucesso"));
}

#[tokio::test]
async fn first_load_failure_routes_to_member_list() {
    let repo = InMemoryMemberRepository::new(ana_and_bruno())
        .failing_list(CongregateError::Remote("boom".into()));
    let h = harness(repo, true);

    let err = h.registry.refresh().await.unwrap_err();

    assert!(matches!(err, CongregateError::Remote(_)));
    assert!(!h.registry.is_loaded());
    assert_eq!(h.navigator.last(), Some(Route::Members));
    assert!(h.notifier.contains(Severity::Error, "Erro ao carregar dados dos membros"));
}

#[tokio::test]
async fn later_load_failure_keeps_previous_copy() {
    let h = harness(InMemoryMemberRepository::new(ana_and_bruno()), true);
    h.registry.refresh().await.unwrap();

    h.repo.set_list_failure(Some(CongregateError::Remote("offline".into())));
    assert!(h.registry.refresh().await.is_err());

    assert_eq!(h.registry.members().len(), 2);
    assert!(h.navigator.routes().is_empty());
}

#[tokio::test]
async fn filtered_view_and_statistics() {
    let h = harness(InMemoryMemberRepository::new(ana_and_bruno()), true);
    h.registry.refresh().await.unwrap();
    h.registry.set_criteria(FilterCriteria::default().with_region(Region::East));

    let view = h.registry.view(Utc::now());

    assert_eq!(view.members.len(), 1);
    assert_eq!(view.members[0].full_name, "Ana");
    assert_eq!(view.statistics.total, 1);
}

#[tokio::test]
async fn full_scope_statistics_ignore_filter() {
    let repo = InMemoryMemberRepository::new(ana_and_bruno());
    let notifier = RecordingNotifier::default();
    let registry = MemberRegistry::new(
        Arc::new(repo),
        Arc::new(notifier),
        Arc::new(ScriptedConfirmer::always(true)),
        Arc::new(RecordingNavigator::default()),
    )
    .with_statistics_scope(StatisticsScope::Full);
    registry.refresh().await.unwrap();
    registry.set_criteria(FilterCriteria::default().with_region(Region::East));

    let view = registry.view(Utc::now());

    assert_eq!(view.members.len(), 1);
    assert_eq!(view.statistics.total, 2);
}

#[tokio::test]
async fn create_then_list_includes_new_member() {
    let h = harness(InMemoryMemberRepository::new(ana_and_bruno()), true);
    h.registry.refresh().await.unwrap();
    let lists_before = h.repo.list_calls();

    let created = h.registry.add(valid_draft("Carla")).await.unwrap();

    assert!(!created.id.is_empty());
    assert_eq!(h.repo.list_calls(), lists_before + 1, "mutation triggers a refetch");
    assert!(h.registry.find(&created.id).is_some());
    assert!(h.notifier.contains(Severity::Success, "Membro cadastrado com sucesso!"));
    assert_eq!(h.navigator.last(), Some(Route::Dashboard));
}

#[tokio::test]
async fn create_without_birth_date_never_reaches_store() {
    let h = harness(InMemoryMemberRepository::default(), true);
    let draft = MemberDraft { birth_date: None, ..valid_draft("Carla") };

    let err = h.registry.add(draft).await.unwrap_err();

    assert_eq!(err, CongregateError::Validation("Por favor, preencha a Data de Nascimento".into()));
    assert_eq!(h.repo.create_calls(), 0);
    assert_eq!(
        h.notifier.last(),
        Some((Severity::Warning, "Por favor, preencha a Data de Nascimento".to_string()))
    );
}

#[tokio::test]
async fn create_without_gender_never_reaches_store() {
    let h = harness(InMemoryMemberRepository::default(), true);
    let draft = MemberDraft { gender: None, ..valid_draft("Carla") };

    let err = h.registry.add(draft).await.unwrap_err();

    assert_eq!(err, CongregateError::Validation("Campo \"Gênero\" é obrigatório".into()));
    assert_eq!(h.repo.create_calls(), 0);
}

#[tokio::test]
async fn created_member_appears_only_through_refetch() {
    let h = harness(InMemoryMemberRepository::new(ana_and_bruno()), true);
    h.registry.refresh().await.unwrap();
    h.repo.set_list_failure(Some(CongregateError::Remote("offline".into())));

    let created = h.registry.add(valid_draft("Carla")).await.unwrap();

    assert_eq!(h.repo.create_calls(), 1);
    assert!(h.registry.find(&created.id).is_none());
    assert_eq!(h.registry.view(Utc::now()).members.len(), 2);
}

#[tokio::test]
async fn store_validation_message_is_surfaced() {
    let repo = InMemoryMemberRepository::default().failing_writes(CongregateError::Validation(
        "Campo \"Região\" é obrigatório".into(),
    ));
    let h = harness(repo, true);

    let err = h.registry.add(valid_draft("Carla")).await.unwrap_err();

    assert!(matches!(err, CongregateError::Validation(_)));
    assert!(h.notifier.contains(Severity::Error, "Campo \"Região\" é obrigatório"));
}

#[tokio::test]
async fn update_replaces_local_copy() {
    let h = harness(InMemoryMemberRepository::new(ana_and_bruno()), true);
    h.registry.refresh().await.unwrap();
    let draft = MemberDraft { full_name: Some("Ana Maria".into()), ..MemberDraft::default() };

    let updated = h.registry.edit("m-ana", draft).await.unwrap();

    assert_eq!(updated.full_name, "Ana Maria");
    assert!(updated.updated_at.is_some());
    assert_eq!(h.registry.find("m-ana").unwrap().full_name, "Ana Maria");
    assert!(h.notifier.contains(Severity::Success, "Membro atualizado com sucesso!"));
}

#[tokio::test]
async fn update_missing_member_is_not_found() {
    let h = harness(InMemoryMemberRepository::new(ana_and_bruno()), true);

    let err = h
        .registry
        .edit("ghost", MemberDraft { full_name: Some("X".into()), ..MemberDraft::default() })
        .await
        .unwrap_err();

    assert!(matches!(err, CongregateError::NotFound(_)));
    assert_eq!(h.repo.update_calls(), 0);
    assert!(h.notifier.contains(Severity::Error, "Erro ao atualizar membro"));
}

#[tokio::test]
async fn update_with_mismatched_parish_is_rejected() {
    let h = harness(InMemoryMemberRepository::new(ana_and_bruno()), true);
    h.registry.refresh().await.unwrap();
    let draft = MemberDraft { region: Some(Region::West), ..MemberDraft::default() };

    let err = h.registry.edit("m-ana", draft).await.unwrap_err();

    assert!(matches!(err, CongregateError::Validation(_)));
    assert_eq!(h.repo.update_calls(), 0);
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let h = harness(InMemoryMemberRepository::new(ana_and_bruno()), false);
    h.registry.refresh().await.unwrap();

    let err = h.registry.remove("m-ana").await.unwrap_err();

    assert!(matches!(err, CongregateError::Cancelled(_)));
    assert_eq!(h.repo.delete_calls(), 0);
    let prompt = &h.confirmer.prompts()[0];
    assert_eq!(prompt.title, "Confirmar Exclusão");
    assert!(prompt.message.contains("\"Ana\""));
}

#[tokio::test]
async fn delete_then_list_excludes_member() {
    let h = harness(InMemoryMemberRepository::new(ana_and_bruno()), true);
    h.registry.refresh().await.unwrap();

    h.registry.remove("m-ana").await.unwrap();

    assert!(h.registry.find("m-ana").is_none());
    assert!(h.repo.rows().iter().all(|m| m.id != "m-ana"));
    assert!(h.notifier.contains(Severity::Success, "Membro excluído com sucesso"));
}

#[tokio::test]
async fn delete_missing_member_is_not_found() {
    let h = harness(InMemoryMemberRepository::new(ana_and_bruno()), true);

    let err = h.registry.remove("ghost").await.unwrap_err();

    assert!(matches!(err, CongregateError::NotFound(_)));
    assert_eq!(h.repo.delete_calls(), 0);
}

#[tokio::test]
async fn delete_failure_keeps_local_row() {
    let repo = InMemoryMemberRepository::new(ana_and_bruno())
        .failing_writes(CongregateError::Remote("referenced elsewhere".into()));
    let h = harness(repo, true);
    h.registry.refresh().await.unwrap();

    assert!(h.registry.remove("m-ana").await.is_err());

    assert!(h.registry.find("m-ana").is_some());
    assert!(h.notifier.contains(Severity::Error, "Erro ao excluir membro"));
}

#[tokio::test]
async fn second_mutation_while_in_flight_is_busy() {
    let h = harness(InMemoryMemberRepository::new(ana_and_bruno()), true);
    h.registry.refresh().await.unwrap();
    let release = h.repo.stall_writes();

    let registry = Arc::clone(&h.registry);
    let first = tokio::spawn(async move { registry.add(valid_draft("Carla")).await });
    while !h.registry.is_busy() {
        tokio::task::yield_now().await;
    }

    let err = h.registry.remove("m-ana").await.unwrap_err();
    assert!(matches!(err, CongregateError::Busy(_)));
    assert_eq!(h.repo.delete_calls(), 0);

    release.notify_one();
    assert!(first.await.unwrap().is_ok());
    assert!(!h.registry.is_busy());
}

#[tokio::test]
async fn load_member_failure_routes_to_dashboard() {
    let h = harness(InMemoryMemberRepository::default(), true);

    assert!(h.registry.load_member("ghost").await.is_err());

    assert!(h.notifier.contains(Severity::Error, "Erro ao carregar dados do membro"));
    assert_eq!(h.navigator.last(), Some(Route::Dashboard));
}
