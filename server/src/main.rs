use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use clap::Parser;
use tower_http::services::ServeDir;

mod classifier;
mod error;
mod handlers;
mod preprocess;
mod state;

use crate::classifier::{Classifier, LinearModel};
use crate::handlers::{labels_handler, predict_handler};
use crate::state::AppState;

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON model file with `labels`, `input_side`, `weights` and `bias`.
    #[arg(long)]
    model: PathBuf,
    #[arg(long)]
    public_dir: Option<PathBuf>,
    /// Defaults to `$PORT`, then 3000.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let model = match LinearModel::load(&args.model).await {
        Ok(model) => model,
        Err(error) => {
            log::error!("Failed to load model {}: {error}", args.model.display());
            std::process::exit(1);
        }
    };
    log::info!(
        "Loaded model {} labels={:?} input={}x{}",
        args.model.display(),
        model.labels(),
        model.input_side(),
        model.input_side()
    );
    let state = AppState {
        classifier: Arc::new(model),
    };

    let public_dir = args
        .public_dir
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../public"));

    let app = Router::new()
        .route("/labels", get(labels_handler))
        .route("/predict", post(predict_handler))
        .fallback_service(ServeDir::new(public_dir).append_index_html_on_directories(true))
        .with_state(state);

    let port: u16 = args
        .port
        .or_else(|| {
            std::env::var("PORT")
                .ok()
                .and_then(|value| value.parse().ok())
        })
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    log::info!("Sketchpad running at http://localhost:{port}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server");
    axum::serve(listener, app).await.expect("Server crashed");
}
