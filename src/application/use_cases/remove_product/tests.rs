use super::*;
use crate::application::test_support::{
    sample_product, MemoryRepository, RecordingReporter, ScriptedStorage, Step,
};
use crate::catalog::domain::DestroyStatus;
use std::time::Duration;

fn urls(files: &[&str]) -> Vec<String> {
    files.iter().map(|f| ScriptedStorage::url_for(f)).collect()
}

fn id(value: &str) -> ProductId {
    ProductId::new(value).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_remove_cleans_every_image() {
    let repository = MemoryRepository::default().with_product(sample_product(
        "p1",
        &urls(&["a.jpg", "b.jpg", "c.jpg"]),
    ));
    let storage = ScriptedStorage::new();
    let reporter = RecordingReporter::default();
    let use_case = RemoveProductUseCase::new(repository.clone(), storage.clone(), reporter.clone());

    let response = use_case.execute(&id("p1")).await.unwrap();

    assert!(response.success);
    assert_eq!(
        response.message,
        "Product removed successfully. 3/3 images deleted from Cloudinary."
    );
    assert_eq!((response.assets_cleaned, response.assets_total), (3, 3));
    assert!(!repository.contains(&id("p1")));
    assert_eq!(storage.destroy_calls().len(), 3);
    assert!(reporter.errors().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_remove_with_unresolvable_url_still_deletes_record() {
    let images = vec![
        ScriptedStorage::url_for("a.jpg"),
        "https://images.example.com/legacy/b.jpg".to_string(),
    ];
    let repository = MemoryRepository::default().with_product(sample_product("p2", &images));
    let storage = ScriptedStorage::new();
    let reporter = RecordingReporter::default();
    let use_case = RemoveProductUseCase::new(repository.clone(), storage.clone(), reporter.clone());

    let response = use_case.execute(&id("p2")).await.unwrap();

    assert_eq!(
        response.message,
        "Product removed successfully. 1/2 images deleted from Cloudinary."
    );
    assert_eq!(storage.destroy_calls(), vec!["c2store/a"]);
    assert!(!repository.contains(&id("p2")));

    let errors = reporter.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("images.example.com/legacy/b.jpg"));
    assert!(reporter
        .messages()
        .last()
        .unwrap()
        .starts_with("Completed: ⚠️  Product removed successfully. 1/2"));
}

#[tokio::test(start_paused = true)]
async fn test_remove_with_hung_storage_reports_zero_of_one() {
    let repository =
        MemoryRepository::default().with_product(sample_product("p3", &urls(&["slow.jpg"])));
    let storage = ScriptedStorage::new()
        .script_destroy("c2store/slow", vec![Step::Hang, Step::Hang, Step::Hang]);
    let reporter = RecordingReporter::default();
    let use_case = RemoveProductUseCase::new(repository.clone(), storage.clone(), reporter.clone());

    let started = tokio::time::Instant::now();
    let response = use_case.execute(&id("p3")).await.unwrap();

    assert_eq!(
        response.message,
        "Product removed successfully. 0/1 images deleted from Cloudinary."
    );
    assert_eq!(storage.destroy_calls().len(), 3);
    assert!(!repository.contains(&id("p3")));
    // three timed-out attempts with two backoffs in between
    assert!(started.elapsed() >= Duration::from_secs(47));

    let outcome = &response.cleanup.outcomes()[0];
    assert_eq!(outcome.attempts, 3);
    assert!(outcome
        .error()
        .unwrap()
        .to_string()
        .contains("timed out after 15000ms"));
}

#[tokio::test(start_paused = true)]
async fn test_remove_with_every_cleanup_failing_still_deletes_record() {
    let repository = MemoryRepository::default()
        .with_product(sample_product("p4", &urls(&["a.jpg", "b.jpg"])));
    let storage = ScriptedStorage::new()
        .script_destroy(
            "c2store/a",
            vec![
                Step::Fail("503".to_string()),
                Step::Fail("503".to_string()),
                Step::Fail("503".to_string()),
            ],
        )
        .script_destroy(
            "c2store/b",
            vec![
                Step::Status(DestroyStatus::Other("error".to_string())),
                Step::Status(DestroyStatus::Other("error".to_string())),
                Step::Status(DestroyStatus::Other("error".to_string())),
            ],
        );
    let reporter = RecordingReporter::default();
    let use_case = RemoveProductUseCase::new(repository.clone(), storage, reporter.clone());

    let response = use_case.execute(&id("p4")).await.unwrap();

    assert_eq!((response.assets_cleaned, response.assets_total), (0, 2));
    assert!(!repository.contains(&id("p4")));
    assert_eq!(reporter.errors().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_remove_already_gone_image_counts_as_cleaned() {
    let repository =
        MemoryRepository::default().with_product(sample_product("p5", &urls(&["gone.jpg"])));
    let storage = ScriptedStorage::new().script_destroy(
        "c2store/gone",
        vec![Step::Status(DestroyStatus::NotFound)],
    );
    let use_case =
        RemoveProductUseCase::new(repository, storage.clone(), RecordingReporter::default());

    let response = use_case.execute(&id("p5")).await.unwrap();

    assert_eq!(response.assets_cleaned, 1);
    assert_eq!(storage.destroy_calls().len(), 1);
}

#[tokio::test]
async fn test_remove_unknown_product_touches_nothing() {
    let repository = MemoryRepository::default();
    let storage = ScriptedStorage::new();
    let use_case =
        RemoveProductUseCase::new(repository, storage.clone(), RecordingReporter::default());

    let err = use_case.execute(&id("missing")).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CatalogError>(),
        Some(CatalogError::ProductNotFound { id }) if id == "missing"
    ));
    assert!(storage.destroy_calls().is_empty());
}

#[tokio::test]
async fn test_remove_lookup_failure_is_fatal() {
    let repository = MemoryRepository::default()
        .with_product(sample_product("p6", &urls(&["a.jpg"])))
        .failing_lookup();
    let storage = ScriptedStorage::new();
    let use_case =
        RemoveProductUseCase::new(repository, storage.clone(), RecordingReporter::default());

    let err = use_case.execute(&id("p6")).await.unwrap_err();

    match err.downcast_ref::<CatalogError>() {
        Some(CatalogError::RecordStore { stage, details }) => {
            assert_eq!(stage, "lookup");
            assert!(details.contains("connection reset"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(storage.destroy_calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_remove_record_delete_failure_is_fatal() {
    let repository = MemoryRepository::default()
        .with_product(sample_product("p7", &urls(&["a.jpg"])))
        .failing_delete();
    let storage = ScriptedStorage::new();
    let use_case = RemoveProductUseCase::new(
        repository.clone(),
        storage.clone(),
        RecordingReporter::default(),
    );

    let err = use_case.execute(&id("p7")).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CatalogError>(),
        Some(CatalogError::RecordStore { stage, .. }) if stage == "record deletion"
    ));
    // cleanup already ran before the record store failed
    assert_eq!(storage.destroy_calls(), vec!["c2store/a"]);
    assert!(repository.contains(&id("p7")));
}

#[tokio::test(start_paused = true)]
async fn test_remove_honours_custom_policy() {
    let repository =
        MemoryRepository::default().with_product(sample_product("p8", &urls(&["a.jpg"])));
    let storage = ScriptedStorage::new().script_destroy(
        "c2store/a",
        vec![Step::Fail("503".to_string()), Step::Fail("503".to_string())],
    );
    let use_case =
        RemoveProductUseCase::new(repository, storage.clone(), RecordingReporter::default())
            .with_cleanup_policy(RetryPolicy::new(1, Duration::from_secs(5), Duration::ZERO));

    let response = use_case.execute(&id("p8")).await.unwrap();

    assert_eq!(response.assets_cleaned, 0);
    assert_eq!(storage.destroy_calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_remove_reports_progress_per_image() {
    let repository = MemoryRepository::default()
        .with_product(sample_product("p9", &urls(&["a.jpg", "b.jpg"])));
    let reporter = RecordingReporter::default();
    let use_case = RemoveProductUseCase::new(repository, ScriptedStorage::new(), reporter.clone());

    use_case.execute(&id("p9")).await.unwrap();

    let messages = reporter.messages();
    assert!(messages.contains(&"Progress: 1/2".to_string()));
    assert!(messages.contains(&"Progress: 2/2".to_string()));
    assert!(messages
        .last()
        .unwrap()
        .starts_with("Completed: ✅ Product removed successfully. 2/2"));
}

#[test]
fn test_deletion_stage_display() {
    assert_eq!(DeletionStage::Lookup.to_string(), "lookup");
    assert_eq!(DeletionStage::CleanupAssets.to_string(), "asset cleanup");
    assert_eq!(DeletionStage::DeleteRecord.to_string(), "record deletion");
    assert_eq!(DeletionStage::Report.to_string(), "report");
}
