#![allow(dead_code)]

use std::sync::Arc;

use comicforge::adapter::inbound::http::{router, AppState};
use comicforge::application::image::Illustrator;
use comicforge::application::story::{StoryConfig, StoryWriter};
use comicforge::testkit::fake::{ScriptedImageModel, ScriptedLlm};
use tokio::net::TcpListener;

/// A story reply in the shape the writer expects.
pub const STORY_REPLY: &str = r#"{
  "comics": [
    {"prompt": "Bubble white dog floating past the moon, warm colors", "caption": "Bubble drifts into orbit."},
    {"prompt": "Bubble white dog chasing a comet, warm colors", "caption": "Bubble spots a comet to chase."},
    {"prompt": "Bubble white dog asleep in a rocket, warm colors", "caption": "Bubble naps on the way home."}
  ]
}"#;

/// The real story writer and illustrator over scripted providers.
pub struct Harness {
    pub llm: Arc<ScriptedLlm>,
    pub images: Arc<ScriptedImageModel>,
    pub state: AppState,
}

impl Harness {
    pub fn new(llm: ScriptedLlm, images: ScriptedImageModel) -> Self {
        let llm = Arc::new(llm);
        let images = Arc::new(images);
        let state = AppState::new(
            Arc::new(StoryWriter::new(llm.clone(), StoryConfig::default())),
            Arc::new(Illustrator::new(images.clone())),
        );
        Self { llm, images, state }
    }

    pub fn happy() -> Self {
        Self::new(
            ScriptedLlm::replying(STORY_REPLY),
            ScriptedImageModel::returning(vec![
                "https://replicate.delivery/out-0.webp".to_string(),
                "https://replicate.delivery/out-1.webp".to_string(),
            ]),
        )
    }

    /// Serve the router on an ephemeral port and return its base URL.
    pub async fn spawn(&self) -> String {
        spawn(router(self.state.clone())).await
    }
}

/// Serve `app` on an ephemeral port and return its base URL.
pub async fn spawn(app: axum::Router) -> String {
    let (listener, base) = bind().await;
    serve_on(listener, app);
    base
}

/// Bind an ephemeral port before the app exists, for stubs that must know
/// their own URL.
pub async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    (listener, format!("http://{addr}"))
}

pub fn serve_on(listener: TcpListener, app: axum::Router) {
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve test router");
    });
}
