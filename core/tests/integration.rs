//! End-to-end sync flows against the live server.
//!
//! # Design
//! Starts the real server on a random port, then drives the sync controller
//! through create, toggle, filter, and delete flows over real HTTP using
//! ureq — including a live rollback when the server rejects a patch for a
//! task deleted out from under the controller.

use tasktrack_core::{
    HttpMethod, HttpRequest, HttpResponse, NoticeKind, Outcome, RefreshOutcome, StatusFilter,
    SyncController,
};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// handle status interpretation.
fn execute(req: &HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body.as_deref()) {
        (HttpMethod::Get, _) => agent.get(&req.url).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.url).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.url)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.url).send_empty(),
        (HttpMethod::Patch, Some(body)) => agent
            .patch(&req.url)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Patch, None) => agent.patch(&req.url).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

/// Start the real server on a random port and return its base URL.
fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            tasktrack_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn optimistic_sync_lifecycle() {
    let base_url = start_server();
    let mut ctrl = SyncController::new(&base_url);

    // Step 1: initial fetch — empty list.
    let refresh = ctrl.refresh();
    let outcome = ctrl.apply_refresh(refresh.generation, execute(&refresh.request)).unwrap();
    assert_eq!(outcome, RefreshOutcome::Applied);
    assert!(ctrl.tasks().is_empty());

    // Step 2: create two tasks through the optimistic flow.
    let req = ctrl.begin_create("Buy milk", "").unwrap();
    assert!(ctrl.tasks()[0].id.starts_with("tmp-"));
    let outcome = ctrl.complete_create(execute(&req)).unwrap();
    assert!(matches!(outcome, Outcome::Confirmed(_)));
    assert_eq!(ctrl.tasks()[0].id, "1");
    assert_eq!(ctrl.tasks()[0].description, "");
    assert!(!ctrl.tasks()[0].done);

    let req = ctrl.begin_create("Walk dog", "around the park").unwrap();
    let outcome = ctrl.complete_create(execute(&req)).unwrap();
    assert!(matches!(outcome, Outcome::Confirmed(_)));
    assert_eq!(ctrl.tasks().len(), 2);
    assert_eq!(ctrl.tasks()[0].id, "2");

    // Step 3: toggle the first task done.
    let req = ctrl.begin_toggle("1").unwrap();
    let outcome = ctrl.complete_toggle(execute(&req)).unwrap();
    assert!(matches!(outcome, Outcome::Confirmed(_)));
    let task = ctrl.tasks().iter().find(|t| t.id == "1").unwrap();
    assert!(task.done);

    // Step 4: completed filter shows only the toggled task.
    let refresh = ctrl.set_status(StatusFilter::Completed);
    ctrl.apply_refresh(refresh.generation, execute(&refresh.request)).unwrap();
    assert_eq!(ctrl.tasks().len(), 1);
    assert_eq!(ctrl.tasks()[0].id, "1");

    // Step 5: a rapid filter change supersedes the in-flight fetch.
    let stale = ctrl.set_status(StatusFilter::Active);
    let newer = ctrl.set_search("park");
    let stale_response = execute(&stale.request);
    let newer_response = execute(&newer.request);
    let outcome = ctrl.apply_refresh(newer.generation, newer_response).unwrap();
    assert_eq!(outcome, RefreshOutcome::Applied);
    let outcome = ctrl.apply_refresh(stale.generation, stale_response).unwrap();
    assert_eq!(outcome, RefreshOutcome::Stale);
    assert_eq!(ctrl.tasks().len(), 1);
    assert_eq!(ctrl.tasks()[0].id, "2", "search matched the description");

    // Step 6: back to the unfiltered view.
    ctrl.set_status(StatusFilter::All);
    let refresh = ctrl.set_search("");
    ctrl.apply_refresh(refresh.generation, execute(&refresh.request)).unwrap();
    assert_eq!(ctrl.tasks().len(), 2);

    // Step 7: delete the second task.
    let req = ctrl.begin_delete("2").unwrap();
    assert_eq!(ctrl.tasks().len(), 1);
    let outcome = ctrl.complete_delete(execute(&req)).unwrap();
    assert!(matches!(outcome, Outcome::Confirmed(_)));

    let refresh = ctrl.refresh();
    ctrl.apply_refresh(refresh.generation, execute(&refresh.request)).unwrap();
    assert_eq!(ctrl.tasks().len(), 1);
    assert_eq!(ctrl.tasks()[0].id, "1");
}

#[test]
fn failing_patch_rolls_back_against_live_server() {
    let base_url = start_server();
    let mut ctrl = SyncController::new(&base_url);

    let req = ctrl.begin_create("Doomed", "").unwrap();
    ctrl.complete_create(execute(&req)).unwrap();
    let id = ctrl.tasks()[0].id.clone();

    // Begin the toggle, then delete the task out-of-band before the patch
    // lands — the server will answer 404.
    let patch_req = ctrl.begin_toggle(&id).unwrap();
    assert!(ctrl.tasks()[0].done, "optimistically flipped");

    let err = ctrl.begin_delete("nonexistent").unwrap_err();
    assert!(matches!(err, tasktrack_core::SyncError::ActionPending));

    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();
    let out_of_band = agent
        .delete(&format!("{base_url}/tasks/{id}"))
        .call()
        .unwrap();
    assert_eq!(out_of_band.status().as_u16(), 200);

    let outcome = ctrl.complete_toggle(execute(&patch_req)).unwrap();
    let Outcome::RolledBack(notice) = outcome else {
        panic!("expected RolledBack");
    };
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.message, "Task not found.");
    assert!(!ctrl.tasks()[0].done, "rolled back to the pre-toggle value");

    // A refresh then reconciles the mirror with the server's reality.
    let refresh = ctrl.refresh();
    ctrl.apply_refresh(refresh.generation, execute(&refresh.request)).unwrap();
    assert!(ctrl.tasks().is_empty());
}
