use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use storesync_resolver::KeyLookup;
use storesync_sync::{
    ApplyError, ApplyService, CategoryStrategy, FetchService, ServiceError, SyncEngine,
    SyncError, SyncOptions,
};
use storesync_types::{
    Category, CategoryDraft, CategoryUpdateAction, Key, Reference, ResourceId, ResourceKind,
};

struct NoopLookup;

#[async_trait]
impl KeyLookup for NoopLookup {
    async fn lookup_keys(
        &self,
        _kind: ResourceKind,
        _ids: Vec<ResourceId>,
    ) -> Result<HashMap<ResourceId, Option<Key>>, storesync_resolver::LookupError> {
        Ok(HashMap::new())
    }
}

struct MockFetch {
    existing: Mutex<HashMap<Key, Category>>,
    fail: bool,
    forget_after_first: bool,
    calls: Mutex<Vec<usize>>,
}

impl MockFetch {
    fn empty() -> Self {
        Self {
            existing: Mutex::new(HashMap::new()),
            fail: false,
            forget_after_first: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with_existing(self, category: Category) -> Self {
        self.existing
            .lock()
            .unwrap()
            .insert(category.key.clone(), category);
        self
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::empty()
        }
    }

    fn forgetting_after_first_call(mut self) -> Self {
        self.forget_after_first = true;
        self
    }

    fn call_sizes(&self) -> Vec<usize> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FetchService<Category> for MockFetch {
    async fn fetch_existing_by_keys(
        &self,
        keys: &[Key],
    ) -> Result<HashMap<Key, Category>, ServiceError> {
        self.calls.lock().unwrap().push(keys.len());
        if self.fail {
            return Err(ServiceError::new("backend unavailable"));
        }
        let mut store = self.existing.lock().unwrap();
        let found = keys
            .iter()
            .filter_map(|key| store.get(key).map(|category| (key.clone(), category.clone())))
            .collect();
        if self.forget_after_first {
            store.clear();
        }
        Ok(found)
    }
}

struct MockApply {
    creates: Mutex<Vec<CategoryDraft>>,
    updates: Mutex<Vec<(Key, Vec<CategoryUpdateAction>)>>,
    conflicts_remaining: Mutex<usize>,
    fail_create_keys: HashSet<Key>,
    fail_updates: bool,
}

impl MockApply {
    fn ok() -> Self {
        Self {
            creates: Mutex::new(Vec::new()),
            updates: Mutex::new(Vec::new()),
            conflicts_remaining: Mutex::new(0),
            fail_create_keys: HashSet::new(),
            fail_updates: false,
        }
    }

    fn conflicting(times: usize) -> Self {
        Self {
            conflicts_remaining: Mutex::new(times),
            ..Self::ok()
        }
    }

    fn failing_create_for(mut self, key: &str) -> Self {
        self.fail_create_keys.insert(Key::new(key));
        self
    }

    fn failing_updates() -> Self {
        Self {
            fail_updates: true,
            ..Self::ok()
        }
    }

    fn created_keys(&self) -> Vec<Key> {
        self.creates
            .lock()
            .unwrap()
            .iter()
            .map(|draft| draft.key.clone())
            .collect()
    }

    fn updates(&self) -> Vec<(Key, Vec<CategoryUpdateAction>)> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApplyService<CategoryDraft, Category, CategoryUpdateAction> for MockApply {
    async fn create(&self, draft: &CategoryDraft) -> Result<Category, ApplyError> {
        if self.fail_create_keys.contains(&draft.key) {
            return Err(ApplyError::Failed {
                message: "draft rejected".into(),
            });
        }
        self.creates.lock().unwrap().push(draft.clone());
        Ok(category_from(draft))
    }

    async fn update(
        &self,
        existing: &Category,
        actions: &[CategoryUpdateAction],
    ) -> Result<Category, ApplyError> {
        {
            let mut remaining = self.conflicts_remaining.lock().unwrap();
            if *remaining > 0 {
                *remaining -= 1;
                return Err(ApplyError::Conflict {
                    message: "version mismatch".into(),
                });
            }
        }
        if self.fail_updates {
            return Err(ApplyError::Failed {
                message: "update rejected".into(),
            });
        }
        self.updates
            .lock()
            .unwrap()
            .push((existing.key.clone(), actions.to_vec()));
        Ok(existing.clone())
    }
}

fn draft(key: &str, name: &str) -> CategoryDraft {
    CategoryDraft {
        key: Key::new(key),
        name: name.into(),
        slug: key.into(),
        description: None,
        parent: None,
        order_hint: None,
        meta_title: None,
        meta_description: None,
        custom: None,
        assets: Vec::new(),
    }
}

fn existing(key: &str, name: &str) -> Category {
    Category {
        id: ResourceId::new(format!("id-{key}")),
        key: Key::new(key),
        name: name.into(),
        slug: key.into(),
        description: None,
        parent: None,
        order_hint: None,
        meta_title: None,
        meta_description: None,
        custom: None,
        assets: Vec::new(),
        version: 1,
    }
}

fn category_from(draft: &CategoryDraft) -> Category {
    Category {
        id: ResourceId::new(format!("id-{}", draft.key)),
        key: draft.key.clone(),
        name: draft.name.clone(),
        slug: draft.slug.clone(),
        description: draft.description.clone(),
        parent: draft.parent.clone(),
        order_hint: draft.order_hint.clone(),
        meta_title: draft.meta_title.clone(),
        meta_description: draft.meta_description.clone(),
        custom: draft.custom.clone(),
        assets: draft.assets.clone(),
        version: 1,
    }
}

fn engine(
    options: SyncOptions<CategoryStrategy>,
    fetch: Arc<MockFetch>,
    apply: Arc<MockApply>,
) -> SyncEngine<CategoryStrategy> {
    SyncEngine::new(CategoryStrategy, options, Arc::new(NoopLookup), fetch, apply)
}

fn capturing_errors(
    options: SyncOptions<CategoryStrategy>,
) -> (SyncOptions<CategoryStrategy>, Arc<Mutex<Vec<String>>>) {
    let errors: Arc<Mutex<Vec<String>>> = Arc::default();
    let sink = Arc::clone(&errors);
    let options =
        options.with_error_callback(move |error| sink.lock().unwrap().push(error.to_string()));
    (options, errors)
}

// ── Create path ──────────────────────────────────────────────────

#[tokio::test]
async fn creates_drafts_with_no_existing_match() {
    let fetch = Arc::new(MockFetch::empty());
    let apply = Arc::new(MockApply::ok());
    let engine = engine(SyncOptions::new(), Arc::clone(&fetch), Arc::clone(&apply));

    let report = engine
        .sync(vec![draft("summer", "Summer"), draft("winter", "Winter")])
        .await;

    assert_eq!(report.processed, 2);
    assert_eq!(report.created, 2);
    assert_eq!(report.updated, 0);
    assert_eq!(report.failed, 0);
    assert_eq!(
        apply.created_keys(),
        vec![Key::new("summer"), Key::new("winter")]
    );
}

#[tokio::test]
async fn before_create_can_veto_a_create() {
    let fetch = Arc::new(MockFetch::empty());
    let apply = Arc::new(MockApply::ok());
    let options = SyncOptions::new().with_before_create(|_draft| None);
    let engine = engine(options, Arc::clone(&fetch), Arc::clone(&apply));

    let report = engine.sync(vec![draft("summer", "Summer")]).await;

    assert_eq!(report.processed, 1);
    assert_eq!(report.created, 0);
    assert_eq!(report.failed, 0);
    assert!(apply.created_keys().is_empty());
}

#[tokio::test]
async fn before_create_can_transform_the_draft() {
    let fetch = Arc::new(MockFetch::empty());
    let apply = Arc::new(MockApply::ok());
    let options = SyncOptions::new().with_before_create(|mut draft: CategoryDraft| {
        draft.name = format!("[imported] {}", draft.name);
        Some(draft)
    });
    let engine = engine(options, fetch, Arc::clone(&apply));

    engine.sync(vec![draft("summer", "Summer")]).await;

    let created = apply.creates.lock().unwrap().clone();
    assert_eq!(created[0].name, "[imported] Summer");
}

#[tokio::test]
async fn failed_create_is_counted_and_reported() {
    let fetch = Arc::new(MockFetch::empty());
    let apply = Arc::new(MockApply::ok().failing_create_for("summer"));
    let (options, errors) = capturing_errors(SyncOptions::new());
    let engine = engine(options, fetch, Arc::clone(&apply));

    let report = engine
        .sync(vec![draft("summer", "Summer"), draft("winter", "Winter")])
        .await;

    assert_eq!(report.processed, 2);
    assert_eq!(report.created, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(apply.created_keys(), vec![Key::new("winter")]);
    let errors = errors.lock().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("failed to create 'summer'"));
}

// ── Update path ──────────────────────────────────────────────────

#[tokio::test]
async fn updates_drafts_whose_existing_state_differs() {
    let fetch = Arc::new(MockFetch::empty().with_existing(existing("summer", "Old name")));
    let apply = Arc::new(MockApply::ok());
    let engine = engine(SyncOptions::new(), fetch, Arc::clone(&apply));

    let report = engine.sync(vec![draft("summer", "Summer")]).await;

    assert_eq!(report.processed, 1);
    assert_eq!(report.updated, 1);
    assert_eq!(report.created, 0);
    let updates = apply.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, Key::new("summer"));
    assert_eq!(
        updates[0].1,
        vec![CategoryUpdateAction::ChangeName {
            name: "Summer".into()
        }]
    );
}

#[tokio::test]
async fn identical_resources_produce_no_apply_call() {
    let fetch = Arc::new(MockFetch::empty().with_existing(existing("summer", "Summer")));
    let apply = Arc::new(MockApply::ok());
    let engine = engine(SyncOptions::new(), fetch, Arc::clone(&apply));

    let report = engine.sync(vec![draft("summer", "Summer")]).await;

    assert_eq!(report.processed, 1);
    assert_eq!(report.created, 0);
    assert_eq!(report.updated, 0);
    assert_eq!(report.failed, 0);
    assert!(apply.updates().is_empty());
}

#[tokio::test]
async fn before_update_filtering_to_empty_skips_the_apply() {
    let fetch = Arc::new(MockFetch::empty().with_existing(existing("summer", "Old name")));
    let apply = Arc::new(MockApply::ok());
    let options =
        SyncOptions::new().with_before_update(|_actions, _draft, _existing| Vec::new());
    let engine = engine(options, fetch, Arc::clone(&apply));

    let report = engine.sync(vec![draft("summer", "Summer")]).await;

    assert_eq!(report.processed, 1);
    assert_eq!(report.updated, 0);
    assert_eq!(report.failed, 0);
    assert!(apply.updates().is_empty());
}

#[tokio::test]
async fn failed_update_is_not_retried() {
    let fetch = Arc::new(MockFetch::empty().with_existing(existing("summer", "Old name")));
    let apply = Arc::new(MockApply::failing_updates());
    let (options, errors) = capturing_errors(SyncOptions::new());
    let engine = engine(options, Arc::clone(&fetch), apply);

    let report = engine.sync(vec![draft("summer", "Summer")]).await;

    assert_eq!(report.failed, 1);
    assert_eq!(report.updated, 0);
    // One batch fetch, no conflict re-fetch.
    assert_eq!(fetch.call_sizes(), vec![1]);
    assert!(errors.lock().unwrap()[0].contains("failed to update 'summer'"));
}

// ── Conflict retries ─────────────────────────────────────────────

#[tokio::test]
async fn conflicted_update_is_refetched_and_retried() {
    let fetch = Arc::new(MockFetch::empty().with_existing(existing("summer", "Old name")));
    let apply = Arc::new(MockApply::conflicting(1));
    let engine = engine(SyncOptions::new(), Arc::clone(&fetch), Arc::clone(&apply));

    let report = engine.sync(vec![draft("summer", "Summer")]).await;

    assert_eq!(report.updated, 1);
    assert_eq!(report.failed, 0);
    // Batch fetch plus one single-key re-fetch.
    assert_eq!(fetch.call_sizes(), vec![1, 1]);
    assert_eq!(apply.updates().len(), 1);
}

#[tokio::test]
async fn persistent_conflict_exhausts_retries() {
    let fetch = Arc::new(MockFetch::empty().with_existing(existing("summer", "Old name")));
    let apply = Arc::new(MockApply::conflicting(10));
    let (options, errors) = capturing_errors(SyncOptions::new().with_conflict_retries(2));
    let engine = engine(options, Arc::clone(&fetch), apply);

    let report = engine.sync(vec![draft("summer", "Summer")]).await;

    assert_eq!(report.failed, 1);
    assert_eq!(report.updated, 0);
    assert_eq!(fetch.call_sizes(), vec![1, 1, 1]);
    assert!(errors.lock().unwrap()[0].contains("version conflict persisted after 2 retries"));
}

#[tokio::test]
async fn resource_disappearing_during_retry_fails_the_item() {
    let fetch = Arc::new(
        MockFetch::empty()
            .with_existing(existing("summer", "Old name"))
            .forgetting_after_first_call(),
    );
    let apply = Arc::new(MockApply::conflicting(1));
    let (options, errors) = capturing_errors(SyncOptions::new());
    let engine = engine(options, fetch, apply);

    let report = engine.sync(vec![draft("summer", "Summer")]).await;

    assert_eq!(report.failed, 1);
    assert!(errors.lock().unwrap()[0].contains("disappeared"));
}

// ── Validation and resolution failures ───────────────────────────

#[tokio::test]
async fn blank_key_drafts_fail_without_reaching_the_services() {
    let fetch = Arc::new(MockFetch::empty());
    let apply = Arc::new(MockApply::ok());
    let (options, errors) = capturing_errors(SyncOptions::new());
    let engine = engine(options, Arc::clone(&fetch), Arc::clone(&apply));

    let report = engine
        .sync(vec![draft("  ", "Nameless"), draft("summer", "Summer")])
        .await;

    assert_eq!(report.processed, 2);
    assert_eq!(report.created, 1);
    assert_eq!(report.failed, 1);
    assert!(errors.lock().unwrap()[0].contains("blank key"));
    // The blank draft is excluded from the batch fetch.
    assert_eq!(fetch.call_sizes(), vec![1]);
}

#[tokio::test]
async fn unresolvable_reference_fails_only_the_affected_draft() {
    let fetch = Arc::new(MockFetch::empty());
    let apply = Arc::new(MockApply::ok());
    let (options, errors) = capturing_errors(SyncOptions::new());
    let engine = engine(options, fetch, Arc::clone(&apply));

    let mut orphaned = draft("orphaned", "Orphaned");
    orphaned.parent = Some(Reference::by_id(ResourceKind::Category, "no-such-id"));

    let report = engine.sync(vec![orphaned, draft("summer", "Summer")]).await;

    assert_eq!(report.processed, 2);
    assert_eq!(report.created, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(apply.created_keys(), vec![Key::new("summer")]);
    assert!(errors.lock().unwrap()[0].contains("no-such-id"));
}

#[tokio::test]
async fn fetch_failure_fails_every_draft_of_the_batch() {
    let fetch = Arc::new(MockFetch::failing());
    let apply = Arc::new(MockApply::ok());
    let (options, errors) = capturing_errors(SyncOptions::new());
    let engine = engine(options, fetch, Arc::clone(&apply));

    let report = engine
        .sync(vec![draft("summer", "Summer"), draft("winter", "Winter")])
        .await;

    assert_eq!(report.processed, 2);
    assert_eq!(report.failed, 2);
    assert_eq!(report.created, 0);
    assert!(apply.created_keys().is_empty());
    let errors = errors.lock().unwrap();
    assert_eq!(errors.len(), 2);
    assert!(errors[0].contains("backend unavailable"));
}

// ── Batching and hooks ───────────────────────────────────────────

#[tokio::test]
async fn drafts_are_processed_in_sequential_batches() {
    let fetch = Arc::new(MockFetch::empty());
    let apply = Arc::new(MockApply::ok());
    let options = SyncOptions::new().with_batch_size(2);
    let engine = engine(options, Arc::clone(&fetch), apply);

    let drafts = (0..5)
        .map(|n| draft(&format!("cat-{n}"), "Category"))
        .collect();
    let report = engine.sync(drafts).await;

    assert_eq!(report.processed, 5);
    assert_eq!(report.created, 5);
    assert_eq!(fetch.call_sizes(), vec![2, 2, 1]);
}

#[tokio::test]
async fn zero_batch_size_set_directly_still_terminates() {
    let fetch = Arc::new(MockFetch::empty());
    let apply = Arc::new(MockApply::ok());
    let mut options = SyncOptions::new();
    // Bypasses the builder clamp on purpose.
    options.batch_size = 0;
    let engine = engine(options, Arc::clone(&fetch), Arc::clone(&apply));

    let report = engine
        .sync(vec![draft("summer", "Summer"), draft("winter", "Winter")])
        .await;

    assert_eq!(report.processed, 2);
    assert_eq!(report.created, 2);
    assert_eq!(fetch.call_sizes(), vec![1, 1]);
}

#[tokio::test]
async fn diff_warnings_reach_the_warning_callback() {
    let mut with_parent = existing("summer", "Old name");
    with_parent.parent = Some(Reference::by_key(ResourceKind::Category, "root"));
    let fetch = Arc::new(MockFetch::empty().with_existing(with_parent));
    let apply = Arc::new(MockApply::ok());

    let warnings: Arc<Mutex<Vec<String>>> = Arc::default();
    let sink = Arc::clone(&warnings);
    let options = SyncOptions::new()
        .with_warning_callback(move |message| sink.lock().unwrap().push(message.to_string()));
    let engine = engine(options, fetch, apply);

    let report = engine.sync(vec![draft("summer", "Summer")]).await;

    assert_eq!(report.updated, 1);
    let warnings = warnings.lock().unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("'summer' (parent)"));
}

#[tokio::test]
async fn empty_input_yields_an_empty_report() {
    let fetch = Arc::new(MockFetch::empty());
    let apply = Arc::new(MockApply::ok());
    let engine = engine(SyncOptions::new(), Arc::clone(&fetch), apply);

    let report = engine.sync(Vec::new()).await;

    assert_eq!(report.processed, 0);
    assert!(fetch.call_sizes().is_empty());
    assert!(report
        .human_summary()
        .contains("0 resource(s) were processed in total (0 created, 0 updated and 0 failed"));
}

// ── Error display ────────────────────────────────────────────────

#[test]
fn sync_errors_name_the_resource() {
    let error = SyncError::Create {
        key: Key::new("summer"),
        message: "gateway timeout".into(),
    };
    assert_eq!(
        error.to_string(),
        "failed to create 'summer': gateway timeout"
    );

    let error = SyncError::RetriesExhausted {
        key: Key::new("summer"),
        retries: 1,
    };
    assert!(error.to_string().contains("after 1 retries"));
}
