mod common;

use assert_matches::assert_matches;
use tracker_app::pages::{
    ChatPanel, DetailsPage, FormPage, ListPage, MSG_CREATED, MSG_DELETED, MSG_OPERATION_FAILED,
};
use tracker_app::AppError;
use tracker_assistant::{ChatService, RosterContext};
use tracker_client::StudentStore;
use tracker_core::form::FormField;
use tracker_core::routes::Route;
use tracker_core::{FilterCriteria, Grade, SortField};

use common::{seeded_store, toast_messages, toasts, RecordingModel};

fn names<S: StudentStore>(page: &ListPage<S>) -> Vec<String> {
    page.rows().iter().map(|r| r.record.name.clone()).collect()
}

// ---------------------------------------------------------------------------
// List page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_exposes_filter_values() {
    let toasts = toasts();
    let mut page = ListPage::new(seeded_store(), toasts.clone());
    page.load().await.unwrap();

    assert_eq!(page.rows().len(), 3);
    assert_eq!(page.roster().classes(), &[9, 10]);
    assert_eq!(page.roster().sections(), &["A".to_string(), "B".to_string()]);
    assert!(page.error().is_none());
}

#[tokio::test]
async fn filters_combine() {
    let mut page = ListPage::new(seeded_store(), toasts());
    page.load().await.unwrap();

    page.set_filters(FilterCriteria {
        class: "10".into(),
        ..FilterCriteria::default()
    });
    assert_eq!(names(&page), vec!["John Doe", "Jane Smith"]);

    page.set_filters(FilterCriteria {
        name: "jo".into(),
        class: "10".into(),
        section: "A".into(),
    });
    assert_eq!(names(&page), vec!["John Doe"]);
}

#[tokio::test]
async fn sorting_by_total_twice_reverses() {
    let mut page = ListPage::new(seeded_store(), toasts());
    page.load().await.unwrap();

    page.sort(SortField::Total);
    let ascending = names(&page);
    assert_eq!(ascending, vec!["Madonna", "Jane Smith", "John Doe"]);

    page.sort(SortField::Total);
    let mut descending = names(&page);
    descending.reverse();
    assert_eq!(descending, ascending);
}

#[tokio::test]
async fn unreachable_store_reports_fetch_failure() {
    let store = seeded_store();
    store.set_failing(true);
    let toasts = toasts();
    let mut page = ListPage::new(store, toasts.clone());

    assert_matches!(page.load().await, Err(AppError::FetchFailure(_)));
    assert_eq!(
        page.error(),
        Some("Failed to load students. Please try again later.")
    );
    assert!(page.rows().is_empty());
    assert_eq!(toast_messages(&toasts), vec![MSG_OPERATION_FAILED]);
}

#[tokio::test]
async fn failed_delete_keeps_row() {
    let store = seeded_store();
    let toasts = toasts();
    let mut page = ListPage::new(store.clone(), toasts.clone());
    page.load().await.unwrap();

    store.set_failing(true);
    let result = page.delete("2", &|_: &str| true).await;

    assert_matches!(result, Err(AppError::MutationFailure(_)));
    assert_eq!(page.rows().len(), 3);
    assert_eq!(toast_messages(&toasts), vec![MSG_OPERATION_FAILED]);
}

#[tokio::test]
async fn delete_of_unknown_id_is_not_found() {
    let mut page = ListPage::new(seeded_store(), toasts());
    page.load().await.unwrap();

    assert_matches!(
        page.delete("99", &|_: &str| true).await,
        Err(AppError::NotFound(id)) if id == "99"
    );
    assert_eq!(page.rows().len(), 3);
}

// ---------------------------------------------------------------------------
// Full flow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_view_and_delete_round_trip() {
    let store = seeded_store();
    let toasts = toasts();

    let mut form = FormPage::create(store.clone(), toasts.clone());
    for (field, value) in [
        (FormField::Name, "Mary Ann Lee"),
        (FormField::Class, "11"),
        (FormField::Section, "C"),
        (FormField::Math, "85"),
        (FormField::Science, "80"),
        (FormField::English, "75"),
    ] {
        form.set(field, value);
    }
    assert_eq!(form.form().grade(), Grade::A);
    assert_eq!(form.submit().await.unwrap(), Route::List);

    let mut list = ListPage::new(store.clone(), toasts.clone());
    list.load().await.unwrap();
    let added = list
        .rows()
        .iter()
        .find(|r| r.record.name == "Mary Ann Lee")
        .cloned()
        .unwrap();
    assert_eq!(added.last_name, "Ann Lee");

    let mut details = DetailsPage::new(store.clone());
    let shown = details.load(added.id()).await.unwrap();
    assert_eq!(shown.record.total, 240);
    assert_eq!(details.badge_class(), Some("grade-a"));

    assert!(list.delete(added.id(), &|_: &str| true).await.unwrap());
    assert_eq!(list.rows().len(), 3);
    assert_eq!(list.roster().classes(), &[9, 10]);

    assert_eq!(toast_messages(&toasts), vec![MSG_CREATED, MSG_DELETED]);
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

#[tokio::test]
async fn chat_sends_roster_as_context() {
    let store = seeded_store();
    let students = store.list().await.unwrap();
    let model = RecordingModel::default();
    let mut panel = ChatPanel::new(ChatService::new(
        model.clone(),
        RosterContext::new(&students),
    ));

    let reply = panel.send("Who has the highest total?").await.unwrap();
    assert_eq!(reply.content, "John Doe has the highest total.");

    let prompts = model.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Student 3:\nStudent ID: 3\nName: Madonna"));
    assert!(prompts[0].contains("Question: Who has the highest total?"));
}

#[tokio::test]
async fn chat_window_is_limited() {
    let model = RecordingModel::default();
    let mut panel = ChatPanel::new(ChatService::new(model.clone(), RosterContext::default()));
    for question in ["one", "two", "three"] {
        panel.send(question).await.unwrap();
    }
    let last = model.prompts().pop().unwrap();
    assert!(!last.contains("You are an AI assistant"));
    assert!(!last.contains("Question: one"));
    assert_eq!(last.matches("\n\n---\n\n").count(), 3);
}
