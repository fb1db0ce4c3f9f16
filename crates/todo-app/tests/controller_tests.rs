mod common;

use common::*;
use std::sync::Arc;
use todo_core::TodoError;
use todo_domain::{Priority, TaskInput};
use todo_persistence::{DocumentStore, MemoryDocumentStore};
use todo_app::{IdentityProvider, LocalIdentityProvider, TodoController, TodoRepository};

async fn signed_in(store: Arc<dyn DocumentStore>) -> TodoController {
    let mut controller = TodoController::new(store);
    controller.on_auth_state_changed(Some(ada())).await.unwrap();
    controller
}

#[tokio::test]
async fn test_blank_list_name_makes_no_insert() {
    let mut store = MockStore::new();
    store.expect_list_documents().times(1).returning(|_| Ok(vec![]));
    store.expect_insert_document().never();

    let mut controller = signed_in(Arc::new(store)).await;
    for blank in ["", "   ", "\t\n"] {
        *controller.new_list_name_mut() = blank.to_string();
        let result = controller.submit_new_list().await;
        assert!(matches!(result, Err(TodoError::ValidationSkipped(_))));
    }
}

#[tokio::test]
async fn test_blank_task_title_makes_no_insert() {
    let mut controller = signed_in(Arc::new(mock_with_two_lists(3))).await;

    controller.task_input_mut("home").title = "  ".to_string();
    controller.task_input_mut("home").description = "has a description".to_string();
    let result = controller.submit_new_task("home").await;
    assert!(matches!(result, Err(TodoError::ValidationSkipped(_))));

    // No pending input at all is also blank.
    let result = controller.submit_new_task("work").await;
    assert!(matches!(result, Err(TodoError::ValidationSkipped(_))));

    // Skipped input is left for the user to fix.
    assert_eq!(
        controller.task_input("home").unwrap().description,
        "has a description"
    );
}

#[tokio::test]
async fn test_new_list_inserts_once_with_creation_metadata() {
    let mut store = MockStore::new();
    store.expect_list_documents().returning(|_| Ok(vec![]));
    store
        .expect_insert_document()
        .times(1)
        .withf(|path, fields| {
            path.as_str() == "users/ada/todoLists"
                && fields["name"] == "Groceries"
                && fields["createdBy"] == "ada@example.com"
                && fields.contains_key("createdAt")
                && !fields.contains_key("id")
        })
        .returning(|_, _| Ok("l1".to_string()));

    let mut controller = signed_in(Arc::new(store)).await;
    *controller.new_list_name_mut() = "Groceries".to_string();

    let id = controller.submit_new_list().await.unwrap();
    assert_eq!(id, "l1");
    assert_eq!(controller.new_list_name(), "");
}

#[tokio::test]
async fn test_new_task_defaults_to_low_priority() {
    let mut store = MockStore::new();
    store.expect_list_documents().returning(|_| Ok(vec![]));
    store
        .expect_insert_document()
        .times(1)
        .withf(|path, fields| {
            path.as_str() == "users/ada/todoLists/home/tasks"
                && fields["title"] == "Buy milk"
                && fields["priority"] == "low"
                && fields.contains_key("createdAt")
        })
        .returning(|_, _| Ok("t7".to_string()));

    let mut controller = signed_in(Arc::new(store)).await;
    controller.task_input_mut("home").title = "Buy milk".to_string();

    assert_eq!(controller.submit_new_task("home").await.unwrap(), "t7");
}

#[tokio::test]
async fn test_submitted_task_appears_and_input_resets() {
    let store = Arc::new(MemoryDocumentStore::new());
    let mut controller = signed_in(store).await;

    *controller.new_list_name_mut() = "Errands".to_string();
    let list_id = controller.submit_new_list().await.unwrap();

    *controller.task_input_mut(&list_id) = TaskInput::new("Post office")
        .with_description("parcel")
        .with_priority(Priority::High);
    let task_id = controller.submit_new_task(&list_id).await.unwrap();

    let high = controller.tasks_by_priority(&list_id, Priority::High);
    assert_eq!(high.len(), 1);
    assert_eq!(high[0].id, task_id);
    assert_eq!(high[0].description.as_deref(), Some("parcel"));
    assert_eq!(controller.task_input(&list_id), Some(&TaskInput::default()));
}

#[tokio::test]
async fn test_created_list_is_listed_with_name_and_id() {
    let store = Arc::new(MemoryDocumentStore::new());
    let mut controller = signed_in(store.clone()).await;

    *controller.new_list_name_mut() = "Reading".to_string();
    let id = controller.submit_new_list().await.unwrap();

    let list = controller.list(&id).unwrap();
    assert_eq!(list.name, "Reading");

    let fetched = TodoRepository::new(store)
        .list_all_todo_lists(&ada())
        .await
        .unwrap();
    assert!(fetched.iter().any(|l| l.id == id && l.name == "Reading"));
}

#[tokio::test]
async fn test_sign_out_clears_mirror_and_next_user_sees_only_own_lists() {
    let store = Arc::new(MemoryDocumentStore::new());
    let mut controller = signed_in(store.clone()).await;

    *controller.new_list_name_mut() = "Ada's list".to_string();
    let list_id = controller.submit_new_list().await.unwrap();
    controller.task_input_mut(&list_id).title = "half typed".to_string();
    assert_eq!(controller.lists().len(), 1);

    controller.on_auth_state_changed(None).await.unwrap();
    assert!(controller.lists().is_empty());
    assert!(controller.task_input(&list_id).is_none());
    assert!(!controller.session().is_signed_in());

    controller.on_auth_state_changed(Some(bob())).await.unwrap();
    assert!(controller.lists().is_empty());
    assert_eq!(controller.session().user(), Some(&bob()));
}

#[tokio::test]
async fn test_switching_user_without_sign_out_drops_previous_lists() {
    let store = Arc::new(MemoryDocumentStore::new());
    let mut controller = signed_in(store).await;
    *controller.new_list_name_mut() = "Ada's list".to_string();
    controller.submit_new_list().await.unwrap();

    controller.on_auth_state_changed(Some(bob())).await.unwrap();

    assert!(controller.lists().is_empty());
}

#[tokio::test]
async fn test_writes_without_session_are_unavailable() {
    let mut store = MockStore::new();
    store.expect_list_documents().never();
    store.expect_insert_document().never();

    let mut controller = TodoController::new(Arc::new(store));
    *controller.new_list_name_mut() = "Anything".to_string();

    assert!(matches!(
        controller.submit_new_list().await,
        Err(TodoError::StoreUnavailable(_))
    ));
    assert!(matches!(
        controller.refresh().await,
        Err(TodoError::StoreUnavailable(_))
    ));
}

#[tokio::test]
async fn test_failed_refresh_keeps_mirror() {
    let mut store = MockStore::new();
    let mut calls = 0;
    store.expect_list_documents().returning(move |path| {
        if path.as_str() == "users/ada/todoLists" {
            calls += 1;
            if calls > 1 {
                return Err(TodoError::StoreUnavailable("timeout".into()));
            }
            return Ok(vec![list_doc("home", "Home")]);
        }
        Ok(vec![])
    });

    let mut controller = signed_in(Arc::new(store)).await;
    assert_eq!(controller.lists().len(), 1);

    assert!(controller.refresh().await.is_err());
    assert_eq!(controller.lists().len(), 1);
}

#[tokio::test]
async fn test_change_priority_refetches() {
    let mut store = mock_with_two_lists(6);
    store
        .expect_update_fields()
        .times(1)
        .returning(|_, _, _| Ok(()));

    let mut controller = signed_in(Arc::new(store)).await;
    controller
        .change_priority("home", "t1", Priority::Medium)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_follow_auth_and_logout() {
    let provider = LocalIdentityProvider::new();
    let mut events = provider.subscribe();
    let store = Arc::new(MemoryDocumentStore::new());
    TodoRepository::new(store.clone())
        .create_todo_list(&ada(), "Existing")
        .await
        .unwrap();

    let mut controller = TodoController::new(store);
    provider.sign_in(ada());
    assert!(controller.follow_auth(&mut events).await);
    assert_eq!(controller.lists().len(), 1);

    controller.logout(&provider).await.unwrap();
    assert!(controller.lists().is_empty());
    assert_eq!(provider.current_user(), None);
}
