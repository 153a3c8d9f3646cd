//! Native dev server: serves the built site and reports its markup audit.

use crate::config::{MotionConfig, ServerConfig};
use crate::log::Logger;
use crate::markup::{self, MarkupReport, Presence};
use crate::memory::MemoryPage;
use axum::{extract::State, routing::get, Json, Router};
use serde_json::json;
use std::{fs, path::Path, sync::Arc};
use tower_http::services::{ServeDir, ServeFile};

const INDEX_FILE: &str = "index.html";

#[derive(Clone)]
struct AppState {
    report: Arc<MarkupReport>,
}

/// Audits `index.html` under `site_dir`; an unreadable file audits as empty markup.
pub fn audit_site(site_dir: &Path, logger: &Logger) -> MarkupReport {
    let index = site_dir.join(INDEX_FILE);
    let markup = fs::read_to_string(&index).unwrap_or_else(|error| {
        logger.warn(
            "index_unreadable",
            json!({ "path": index.display().to_string(), "error": error.to_string() }),
        );
        String::new()
    });
    markup::audit(&MemoryPage::parse(&markup))
}

fn app(site_dir: &Path, report: MarkupReport) -> Router {
    let static_service =
        ServeDir::new(site_dir).not_found_service(ServeFile::new(site_dir.join(INDEX_FILE)));

    Router::new()
        .route("/api/markup", get(get_markup))
        .fallback_service(static_service)
        .with_state(AppState {
            report: Arc::new(report),
        })
}

async fn get_markup(State(state): State<AppState>) -> Json<MarkupReport> {
    Json(state.report.as_ref().clone())
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env();
    let motion = MotionConfig::from_env();
    let logger = Logger::new(config.log_level);

    let report = audit_site(&config.site_dir, &logger);
    let missing: Vec<&str> = report
        .missing(Presence::Optional)
        .map(|finding| finding.dependency.selector)
        .collect();
    logger.info(
        "markup_audit",
        json!({ "siteDir": config.site_dir.display().to_string(), "missingOptional": missing }),
    );
    if let Err(error) = report.check() {
        if motion.strict_markup {
            logger.error("markup_invalid", json!({ "error": error.to_string() }));
            return Err(error.into());
        }
        logger.warn("markup_incomplete", json!({ "error": error.to_string() }));
    }

    let bind_address = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    logger.info(
        "server_listening",
        json!({ "url": format!("http://127.0.0.1:{}", config.port) }),
    );
    axum::serve(listener, app(&config.site_dir, report)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::PORTFOLIO;
    use crate::log::LogLevel;

    fn quiet() -> Logger {
        Logger::new(LogLevel::Error)
    }

    #[tokio::test]
    async fn markup_endpoint_returns_the_startup_report() {
        let report = markup::audit(&MemoryPage::parse(PORTFOLIO));
        let state = AppState {
            report: Arc::new(report.clone()),
        };

        let Json(served) = get_markup(State(state)).await;
        assert_eq!(served, report);
        assert!(served.check().is_ok());
    }

    #[test]
    fn missing_index_audits_as_empty_markup() {
        let report = audit_site(Path::new("/nonexistent/portfolio-site"), &quiet());

        assert!(report.check().is_err());
        assert!(report.findings.iter().all(|finding| finding.count == 0));
    }

    #[test]
    fn index_on_disk_is_audited() {
        let dir = std::env::temp_dir().join(format!("portfolio-motion-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        fs::write(dir.join(INDEX_FILE), PORTFOLIO).expect("write index");

        let report = audit_site(&dir, &quiet());
        let _ = fs::remove_dir_all(&dir);

        assert!(report.check().is_ok());
        let orbs = report
            .findings
            .iter()
            .find(|finding| finding.dependency.selector == markup::GRADIENT_ORB)
            .expect("orb finding");
        assert_eq!(orbs.count, 3);
    }
}
