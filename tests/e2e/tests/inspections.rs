use anyhow::Result;
use e2e_tests::test_utils::{fill, new_form, spawn_server};
use inspection_form::notify::messages;
use inspection_form::{
    delete_inspection, ApiError, ErrorClass, FileSizeLimit, HttpInspectionApi, InspectionApi,
    NotificationKind, SubmissionPhase, SubmitError,
};
use inspection_server::config::UploadLimits;
use std::time::Instant;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_submit_list_show_delete() -> Result<()> {
    let server = spawn_server(UploadLimits::default()).await?;
    let api = HttpInspectionApi::new(server.url.as_str());
    let (mut form, previews, toasts) = new_form(FileSizeLimit::default());

    fill(
        &mut form,
        &[
            ("front.png", "front bytes", "Front bumper"),
            ("side.png", "side bytes", "Driver side"),
            ("rear.png", "rear bytes", "Rear"),
        ],
    )?;
    assert_eq!(previews.live_count(), 3);

    let created = form.submit(&api).await?;
    assert_eq!(created.total_images, 3);
    let descriptions: Vec<&str> = created
        .images
        .iter()
        .map(|image| image.description.as_str())
        .collect();
    assert_eq!(descriptions, ["Front bumper", "Driver side", "Rear"]);

    // Reset to one empty slot, previews released
    assert_eq!(form.phase(), SubmissionPhase::Idle);
    assert!(form.slots().is_pristine());
    assert_eq!(previews.live_count(), 0);

    let active = toasts.active(Instant::now());
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].message, messages::SUBMITTED);
    assert_eq!(active[0].kind, NotificationKind::Success);

    let listed = api.list_inspections().await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);

    let fetched = api.get_inspection(&created.id).await?;
    assert_eq!(fetched, created);

    let image = reqwest::get(format!("{}{}", server.url, created.images[1].url)).await?;
    assert!(image.status().is_success());
    assert_eq!(&image.bytes().await?[..], b"side bytes");

    delete_inspection(&api, toasts.as_ref(), &created.id).await?;
    assert!(api.list_inspections().await?.is_empty());
    assert!(toasts
        .active(Instant::now())
        .iter()
        .any(|toast| toast.message == messages::DELETED));

    let missing = api.get_inspection(&created.id).await;
    assert_eq!(missing, Err(ApiError::NotFound(created.id.clone())));

    server.stop().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_server_size_limit_keeps_collection() -> Result<()> {
    let server = spawn_server(UploadLimits {
        max_file_size: 8,
        ..UploadLimits::default()
    })
    .await?;
    let api = HttpInspectionApi::new(server.url.as_str());
    let (mut form, previews, toasts) = new_form(FileSizeLimit::default());

    fill(&mut form, &[("big.png", "larger than eight", "Too big")])?;

    let err = form.submit(&api).await.unwrap_err();
    assert_eq!(err, SubmitError::Api(ApiError::PayloadTooLarge));
    assert_eq!(err.classification(), Some(ErrorClass::PayloadTooLarge));

    // Nothing was stored and the user keeps their work
    assert!(server.state.list().is_empty());
    assert_eq!(form.phase(), SubmissionPhase::Idle);
    assert_eq!(form.slots().len(), 1);
    assert_eq!(form.slots().last().description(), "Too big");
    assert_eq!(previews.live_count(), 1);

    let active = toasts.active(Instant::now());
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].message, messages::PAYLOAD_TOO_LARGE);
    assert_eq!(active[0].kind, NotificationKind::Error);

    server.stop().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_server_rejection_keeps_collection() -> Result<()> {
    let server = spawn_server(UploadLimits::default()).await?;
    let api = HttpInspectionApi::new(server.url.as_str());
    let (mut form, previews, toasts) = new_form(FileSizeLimit::default());

    // Accepted locally, refused by the server's image name check
    fill(&mut form, &[("..", "bytes", "Dot dot")])?;

    let err = form.submit(&api).await.unwrap_err();
    match &err {
        SubmitError::Api(ApiError::ServerRejected { status, .. }) => assert_eq!(*status, 400),
        other => panic!("expected a server rejection, got {:?}", other),
    }
    assert_eq!(err.classification(), Some(ErrorClass::ServerRejected));

    assert!(server.state.list().is_empty());
    assert_eq!(form.phase(), SubmissionPhase::Idle);
    assert_eq!(form.slots().len(), 1);
    assert_eq!(form.slots().last().file().map(|f| f.name()), Some(".."));
    assert_eq!(form.slots().last().description(), "Dot dot");
    assert_eq!(previews.live_count(), 1);

    let active = toasts.active(Instant::now());
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].kind, NotificationKind::Error);
    assert!(active[0].message.starts_with("Error creating inspection: "));

    server.stop().await;
    Ok(())
}

#[test]
fn test_default_size_limit_matches_server() {
    assert_eq!(
        UploadLimits::default().max_file_size,
        FileSizeLimit::default().max_bytes()
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_local_validation_sends_nothing() -> Result<()> {
    let server = spawn_server(UploadLimits::default()).await?;
    let api = HttpInspectionApi::new(server.url.as_str());
    let (mut form, _previews, toasts) = new_form(FileSizeLimit::new(4));

    fill(&mut form, &[("big.png", "over four bytes", "Too big")])?;

    let err = form.submit(&api).await.unwrap_err();
    assert_eq!(err.classification(), Some(ErrorClass::SizeExceeded));
    assert!(form.slots().last().size_error());
    assert!(server.state.list().is_empty());

    let active = toasts.active(Instant::now());
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].kind, NotificationKind::Error);
    assert_eq!(
        active[0].message,
        "File \"big.png\" exceeds the maximum size of 4 bytes"
    );

    server.stop().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_unreachable_backend_is_transport_error() -> Result<()> {
    let server = spawn_server(UploadLimits::default()).await?;
    let url = server.url.clone();
    server.stop().await;

    let api = HttpInspectionApi::new(url);
    let (mut form, _previews, _toasts) = new_form(FileSizeLimit::default());
    fill(&mut form, &[("a.png", "bytes", "Anything")])?;

    let err = form.submit(&api).await.unwrap_err();
    assert_eq!(err.classification(), Some(ErrorClass::TransportError));
    assert_eq!(form.slots().last().description(), "Anything");

    Ok(())
}
