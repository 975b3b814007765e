/*!
 * Pipeline Semantics Tests
 * Ordering, merge, short-circuit, failure propagation, and diagnostics
 * invariance of the execution engine
 */

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use railguard::{
    allow_if, create_pipeline, require_auth, require_role, Decision, Pipeline, PipelineObserver,
    PipelineOptions, PolicyStep, StepResult,
};
use serde_json::{json, Map, Value};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

type JsonCtx = Map<String, Value>;

fn obj(value: Value) -> JsonCtx {
    value.as_object().expect("object literal").clone()
}

fn enriching(name: &str, patch: Value) -> PolicyStep<JsonCtx> {
    let patch = obj(patch);
    PolicyStep::from_fn(name, move |_ctx| StepResult::enrich(patch.clone()))
}

fn counting(name: &str, counter: Arc<AtomicUsize>) -> PolicyStep<JsonCtx> {
    PolicyStep::from_fn(name, move |_ctx| {
        counter.fetch_add(1, Ordering::SeqCst);
        StepResult::next()
    })
}

#[tokio::test]
async fn test_zero_steps_allow_with_context_unchanged() {
    let pipeline: Pipeline<JsonCtx> =
        create_pipeline("empty", Vec::new(), PipelineOptions::default());

    let initial = obj(json!({"user": {"id": 1}, "count": 3}));
    let result = pipeline.evaluate(initial.clone()).await.unwrap();

    assert_eq!(result.decision, Decision::Allow);
    assert_eq!(result.context, initial);
}

#[tokio::test]
async fn test_first_decision_wins_and_later_steps_never_run() {
    let ran_after = Arc::new(AtomicUsize::new(0));

    let pipeline = create_pipeline(
        "gated",
        vec![
            enriching("resolve_tenant", json!({"tenant": "acme"})),
            require_auth("/login"),
            counting("never", ran_after.clone()),
        ],
        PipelineOptions::default(),
    );

    let result = pipeline.evaluate(obj(json!({"user": null}))).await.unwrap();

    assert_eq!(result.decision, Decision::redirect("/login"));
    // Context carries exactly the patches applied before the short-circuit
    assert_eq!(result.context, obj(json!({"user": null, "tenant": "acme"})));
    assert_eq!(ran_after.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_auth_then_role_redirects_without_reaching_role_check() {
    let role_checked = Arc::new(AtomicUsize::new(0));
    let probe = role_checked.clone();

    let pipeline = create_pipeline(
        "admin-area",
        vec![
            require_auth("/login"),
            PolicyStep::from_fn("role_probe", move |_ctx: &JsonCtx| {
                probe.fetch_add(1, Ordering::SeqCst);
                StepResult::next()
            }),
            require_role("admin"),
        ],
        PipelineOptions::default(),
    );

    let result = pipeline.evaluate(obj(json!({"user": null}))).await.unwrap();
    assert_eq!(result.decision, Decision::redirect("/login"));
    assert_eq!(role_checked.load(Ordering::SeqCst), 0);

    let result = pipeline
        .evaluate(obj(json!({"user": {"role": "admin"}})))
        .await
        .unwrap();
    assert_eq!(result.decision, Decision::Allow);
    assert_eq!(role_checked.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_overlapping_patches_last_write_wins() {
    let pipeline = create_pipeline(
        "merge",
        vec![
            enriching("first", json!({"region": "eu", "plan": "free"})),
            enriching("second", json!({"plan": "pro"})),
        ],
        PipelineOptions::default(),
    );

    let result = pipeline.evaluate(obj(json!({}))).await.unwrap();

    assert_eq!(result.decision, Decision::Allow);
    assert_eq!(result.context, obj(json!({"region": "eu", "plan": "pro"})));
}

#[tokio::test]
async fn test_enriched_context_reaches_downstream_steps() {
    let pipeline = create_pipeline(
        "entitlements",
        vec![
            PolicyStep::<JsonCtx>::new("load_permissions", |_ctx| async {
                Ok(StepResult::enrich(
                    json!({"permissions": ["billing:read"]})
                        .as_object()
                        .unwrap()
                        .clone(),
                ))
            }),
            allow_if(|ctx: &JsonCtx| {
                ctx.get("permissions")
                    .and_then(Value::as_array)
                    .map(|perms| perms.contains(&json!("billing:read")))
                    .unwrap_or(false)
            }),
        ],
        PipelineOptions::default(),
    );

    let result = pipeline.evaluate(obj(json!({}))).await.unwrap();
    assert_eq!(result.decision, Decision::Allow);
}

#[tokio::test]
async fn test_step_failure_aborts_with_no_decision() {
    let pipeline = create_pipeline(
        "fragile",
        vec![
            enriching("fine", json!({"a": 1})),
            PolicyStep::<JsonCtx>::new("lookup", |_ctx| async {
                Err(anyhow::anyhow!("backend unavailable"))
            }),
        ],
        PipelineOptions::default(),
    );

    let err = pipeline.evaluate(obj(json!({}))).await.unwrap_err();
    assert_eq!(err.pipeline(), "fragile");
    assert_eq!(err.step(), "lookup");
    assert_eq!(
        err.to_string(),
        "step 'lookup' failed in pipeline 'fragile'"
    );
}

#[tokio::test]
async fn test_debug_toggle_never_changes_the_result() {
    let steps = || {
        vec![
            enriching("resolve", json!({"tenant": "acme"})),
            require_auth::<JsonCtx>("/login"),
        ]
    };

    let quiet = create_pipeline("area", steps(), PipelineOptions::default());
    let loud = create_pipeline("area", steps(), PipelineOptions { debug: true });

    for ctx in [json!({"user": null}), json!({"user": {"id": 1}})] {
        let a = quiet.evaluate(obj(ctx.clone())).await.unwrap();
        let b = loud.evaluate(obj(ctx)).await.unwrap();
        assert_eq!(a, b);
    }
}

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl PipelineObserver for RecordingObserver {
    fn step_entered(&self, pipeline: &str, step: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("[{pipeline}] enter {step}"));
    }

    fn context_enriched(&self, pipeline: &str, step: &str, patch: &dyn fmt::Debug) {
        self.events
            .lock()
            .unwrap()
            .push(format!("[{pipeline}] enrich {step} {patch:?}"));
    }

    fn decision_reached(&self, pipeline: &str, decision: &Decision) {
        self.events
            .lock()
            .unwrap()
            .push(format!("[{pipeline}] decision {decision:?}"));
    }
}

#[tokio::test]
async fn test_observer_sees_entry_enrichment_and_decision_in_order() {
    let observer = Arc::new(RecordingObserver::default());

    let pipeline = create_pipeline(
        "traced",
        vec![
            enriching("resolve", json!({"tenant": "acme"})),
            require_auth("/login"),
        ],
        PipelineOptions::default(),
    )
    .with_observer(observer.clone());

    pipeline.evaluate(obj(json!({"user": null}))).await.unwrap();

    let events = observer.events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            "[traced] enter resolve".to_string(),
            "[traced] enrich resolve {\"tenant\": String(\"acme\")}".to_string(),
            "[traced] enter require_auth".to_string(),
            "[traced] decision Redirect { to: \"/login\" }".to_string(),
        ]
    );
}

fn arbitrary_ctx() -> impl Strategy<Value = JsonCtx> {
    proptest::collection::btree_map(any::<u8>(), any::<i64>(), 0..8).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(k, v)| (format!("k{k}"), json!(v)))
            .collect()
    })
}

proptest! {
    // Same pipeline, equal contexts, no nondeterministic step work: results
    // are equal by value.
    #[test]
    fn determinism_over_equal_contexts(ctx in arbitrary_ctx()) {
        let pipeline = create_pipeline(
            "deterministic",
            vec![
                enriching("stamp", json!({"stamped": true})),
                allow_if(|ctx: &JsonCtx| !ctx.contains_key("k0")),
            ],
            PipelineOptions::default(),
        );

        let first = tokio_test::block_on(pipeline.evaluate(ctx.clone())).unwrap();
        let second = tokio_test::block_on(pipeline.evaluate(ctx)).unwrap();

        prop_assert_eq!(first, second);
    }

    // Merge is shallow last-write-wins over any overlapping key set.
    #[test]
    fn last_write_wins_over_any_patches(
        first in arbitrary_ctx(),
        second in arbitrary_ctx(),
    ) {
        let mut expected = first.clone();
        for (k, v) in second.clone() {
            expected.insert(k, v);
        }

        let pipeline = create_pipeline(
            "merge",
            vec![
                PolicyStep::from_fn("first", move |_ctx: &JsonCtx| {
                    StepResult::enrich(first.clone())
                }),
                PolicyStep::from_fn("second", move |_ctx: &JsonCtx| {
                    StepResult::enrich(second.clone())
                }),
            ],
            PipelineOptions::default(),
        );

        let result = tokio_test::block_on(pipeline.evaluate(JsonCtx::new())).unwrap();
        prop_assert_eq!(result.decision, Decision::Allow);
        prop_assert_eq!(result.context, expected);
    }
}
