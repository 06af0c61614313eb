use migration::run_all_migrations;
use std::path::Path;
use util::config;

#[tokio::main]
async fn main() {
    let path = config::database_path();

    let url = if path.starts_with("sqlite:") {
        path
    } else {
        if let Some(parent) = Path::new(&path).parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        format!("sqlite://{path}?mode=rwc")
    };

    run_all_migrations(&url).await;
}
