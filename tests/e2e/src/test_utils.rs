use actix_web::dev::ServerHandle;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use common::HEALTH_PATH;
use inspection_form::{
    DigestPreviewStore, FileSizeLimit, FormConfig, InspectionForm, PreviewStore, SelectedFile,
    ToastQueue,
};
use inspection_server::config::UploadLimits;
use inspection_server::configure;
use inspection_server::state::AppState;
use std::sync::{Arc, Once};
use std::time::Duration;
use tokio::time::sleep;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("e2e_tests=debug,inspection_server=info,warn")
            .with_test_writer()
            .try_init();
    });
}

/// Server bound to an ephemeral loopback port
pub struct TestServer {
    pub url: String,
    pub state: web::Data<AppState>,
    handle: ServerHandle,
}

impl TestServer {
    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// Start the backend in-process and wait until it answers health checks
pub async fn spawn_server(limits: UploadLimits) -> Result<TestServer> {
    init_tracing();

    let state = web::Data::new(AppState::new(limits));
    let app_state = state.clone();
    let server = HttpServer::new(move || App::new().configure(configure(app_state.clone())))
        .workers(1)
        .bind("127.0.0.1:0")
        .context("Failed to bind test server")?;

    let addr = server
        .addrs()
        .first()
        .copied()
        .context("Test server has no bound address")?;
    let server = server.run();
    let handle = server.handle();
    tokio::spawn(server);

    let url = format!("http://{}", addr);
    wait_for_server(&url).await?;

    Ok(TestServer { url, state, handle })
}

pub async fn wait_for_server(url: &str) -> Result<()> {
    let client = reqwest::Client::new();
    let health_url = format!("{}{}", url, HEALTH_PATH);

    for _ in 0..50 {
        if let Ok(response) = client.get(&health_url).send().await {
            if response.status().is_success() {
                return Ok(());
            }
        }
        sleep(Duration::from_millis(100)).await;
    }

    anyhow::bail!("Server did not become ready within 5 seconds");
}

/// Form wired to a digest preview store and an in-memory toast queue
pub fn new_form(max_file_size: FileSizeLimit) -> (InspectionForm, Arc<DigestPreviewStore>, Arc<ToastQueue>) {
    let config = FormConfig {
        max_file_size,
        ..FormConfig::default()
    };
    let previews = Arc::new(DigestPreviewStore::new());
    let toasts = Arc::new(ToastQueue::new(config.toast_ttl));
    let form = InspectionForm::new(
        &config,
        previews.clone() as Arc<dyn PreviewStore>,
        toasts.clone(),
    );
    (form, previews, toasts)
}

/// Fill the form's trailing slots with the given images and descriptions
pub fn fill(form: &mut InspectionForm, images: &[(&str, &str, &str)]) -> Result<()> {
    for (index, (name, content, description)) in images.iter().enumerate() {
        if index > 0 {
            form.add_empty_slot()?;
        }
        let id = form.slots().last().id();
        let file = SelectedFile::new(*name, content.as_bytes().to_vec()).with_content_type("image/png");
        form.select_files(id, &[file])?;
        form.update_description(id, *description)?;
    }
    Ok(())
}
