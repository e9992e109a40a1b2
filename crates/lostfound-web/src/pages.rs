use axum::{
    extract::{Multipart, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse},
};
use lostfound_store::{filter, load_or_empty};
use lostfound_types::{Report, ReportKind, StatusFilter, SubmitForm, View, now_second_precision};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::form::{self, Submission};
use crate::state::AppState;

const STYLE_CSS: &str = include_str!("../assets/style.css");

const SUBMIT_SUCCESS: &str = "Report saved! Thank you for taking part.";
const SUBMIT_FAILED: &str = "Your report could not be saved. Please try again later.";

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub view: Option<String>,
    pub status: Option<String>,
}

/// One report as shown in the list.
#[derive(Debug, Clone, Serialize)]
pub struct ReportCard {
    pub id: u64,
    pub kind: ReportKind,
    pub status_label: &'static str,
    pub item_name: String,
    pub location: String,
    pub description: String,
    pub reporter_name: String,
    pub reported_at: String,
    pub photo: Option<String>,
}

impl From<Report> for ReportCard {
    fn from(report: Report) -> Self {
        Self {
            id: report.id,
            kind: report.kind,
            status_label: report.kind.status_label(),
            reported_at: report.reported_at_display(),
            item_name: report.item_name,
            location: report.location,
            description: report.description,
            reporter_name: report.reporter_name,
            photo: report.photo,
        }
    }
}

/// Everything one response renders. Built fresh by each handler and never
/// mutated after rendering.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageState {
    pub view: View,
    pub status: StatusFilter,
    pub form: SubmitForm,
    pub form_error: Option<String>,
    pub success: Option<String>,
    /// Newest first.
    pub reports: Vec<ReportCard>,
    /// Size of the whole collection before filtering.
    pub total_reports: usize,
}

impl PageState {
    pub fn new(view: View) -> Self {
        Self {
            view,
            ..Default::default()
        }
    }
}

fn render(state: &AppState, page: &PageState) -> Result<Html<String>, AppError> {
    let html = state.renderer.render(&state.site.context(), page)?;
    Ok(Html(html))
}

/// GET /: navigation and list filter changes.
pub async fn show_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let view = View::from_param(query.view.as_deref());
    let page = match view {
        View::Reports => {
            let status = StatusFilter::from_param(query.status.as_deref());
            report_list(&state, status).await?
        }
        other => PageState::new(other),
    };
    render(&state, &page)
}

async fn report_list(state: &AppState, status: StatusFilter) -> Result<PageState, AppError> {
    let store = state.store.clone();
    let reports = tokio::task::spawn_blocking(move || load_or_empty(store.as_ref())).await?;

    let total_reports = reports.len();
    let cards = filter(reports, status)
        .into_iter()
        .rev()
        .map(ReportCard::from)
        .collect();

    Ok(PageState {
        view: View::Reports,
        status,
        reports: cards,
        total_reports,
        ..Default::default()
    })
}

/// POST /submit: validates the report form and appends it to the store.
pub async fn submit_report(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let Submission { form, photo } = form::read_submission(multipart).await?;

    let photo = lostfound_media::encode(photo.as_ref()).unwrap_or_else(|e| {
        warn!("Storing report without its photo: {}", e);
        None
    });

    let mut page = PageState::new(View::Submit);

    let new_report = match form.validate(photo, now_second_precision()) {
        Ok(report) => report,
        Err(e) => {
            page.form = form;
            page.form_error = Some(e.to_string());
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, render(&state, &page)?));
        }
    };

    let store = state.store.clone();
    let saved = tokio::task::spawn_blocking(move || store.append(new_report)).await?;

    match saved {
        Ok(report) => {
            info!("Accepted {} report #{} for {:?}", report.kind.as_str(), report.id, report.item_name);
            page.success = Some(SUBMIT_SUCCESS.to_string());
            Ok((StatusCode::OK, render(&state, &page)?))
        }
        Err(e) => {
            error!("Failed to save report: {}", e);
            page.form = form;
            page.form_error = Some(SUBMIT_FAILED.to_string());
            Ok((StatusCode::INTERNAL_SERVER_ERROR, render(&state, &page)?))
        }
    }
}

pub async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLE_CSS)
}

pub async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::NaiveDate;
    use http_body_util::BodyExt;
    use lostfound_store::{JsonFileStore, MemoryStore, ReportStore};
    use lostfound_types::NewReport;
    use tower::ServiceExt;

    use super::*;
    use crate::state::SiteInfo;

    const BOUNDARY: &str = "lostfound-test-boundary";

    fn site(logo_path: PathBuf) -> SiteInfo {
        SiteInfo {
            name: "Campus Lost & Found".into(),
            logo_path,
        }
    }

    fn app_with(store: Arc<dyn ReportStore>) -> Router {
        let state = AppState::new(store, site(PathBuf::from("does-not-exist.png"))).unwrap();
        crate::router(state, 1024 * 1024)
    }

    fn seeded(item: &str, kind: ReportKind, second: u32) -> NewReport {
        NewReport {
            reporter_name: "Budi".into(),
            kind,
            item_name: item.into(),
            location: "Hall B".into(),
            description: "Seen near the stairs".into(),
            photo: None,
            reported_at: NaiveDate::from_ymd_opt(2025, 4, 1)
                .unwrap()
                .and_hms_opt(8, 0, second)
                .unwrap(),
        }
    }

    fn multipart_body(fields: &[(&str, &str)], photo: Option<(&str, &str, &[u8])>) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((file_name, content_type, bytes)) = photo {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"photo\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn submit_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/submit")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    const WALLET: &[(&str, &str)] = &[
        ("reporter_name", "Ana"),
        ("kind", "lost"),
        ("item_name", "Wallet"),
        ("location", "Library"),
        ("description", "Black leather"),
    ];

    #[tokio::test]
    async fn home_is_the_default_view() {
        let app = app_with(Arc::new(MemoryStore::new()));
        let (status, html) = get(app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Vision"));
        assert!(html.contains("<option value=\"home\" selected>"));
    }

    #[tokio::test]
    async fn contact_view_lists_details() {
        let app = app_with(Arc::new(MemoryStore::new()));
        let (status, html) = get(app, "/?view=contact").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("lostfound@ecampus.ut.ac.id"));
    }

    #[tokio::test]
    async fn empty_store_shows_placeholder() {
        let app = app_with(Arc::new(MemoryStore::new()));
        let (_, html) = get(app, "/?view=reports").await;
        assert!(html.contains("No reports have been recorded yet."));
    }

    #[tokio::test]
    async fn list_is_newest_first_and_filtered() {
        let store: Arc<dyn ReportStore> = Arc::new(MemoryStore::with_reports(vec![
            seeded("Umbrella", ReportKind::Found, 1).into_report(1),
            seeded("Laptop", ReportKind::Lost, 2).into_report(2),
            seeded("Helmet", ReportKind::Found, 3).into_report(3),
        ]));

        let (_, all) = get(app_with(store.clone()), "/?view=reports").await;
        let helmet = all.find("Helmet").unwrap();
        let laptop = all.find("Laptop").unwrap();
        let umbrella = all.find("Umbrella").unwrap();
        assert!(helmet < laptop && laptop < umbrella);

        let (_, found) = get(app_with(store.clone()), "/?view=reports&status=found").await;
        assert!(found.contains("Helmet") && found.contains("Umbrella"));
        assert!(!found.contains("Laptop"));
        assert!(found.contains("<option value=\"found\" selected>"));

        let (_, lost) = get(app_with(store), "/?view=reports&status=lost").await;
        assert!(lost.contains("Laptop"));
        assert!(!lost.contains("Helmet"));
    }

    #[tokio::test]
    async fn filter_with_no_matches_says_so() {
        let store =
            MemoryStore::with_reports(vec![seeded("Laptop", ReportKind::Lost, 1).into_report(1)]);
        let app = app_with(Arc::new(store));
        let (_, html) = get(app, "/?view=reports&status=found").await;
        assert!(html.contains("No reports match this filter."));
    }

    #[tokio::test]
    async fn incomplete_form_is_rejected_and_kept() {
        let store = Arc::new(MemoryStore::new());
        let app = app_with(store.clone());
        let fields = [
            ("reporter_name", "Ana"),
            ("kind", "found"),
            ("item_name", "Keys"),
            ("location", ""),
            ("description", "Three keys on a ring"),
        ];
        let (status, html) = send(app, submit_request(multipart_body(&fields, None))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(html.contains("Please complete all required fields: Location"));
        assert!(html.contains("value=\"Keys\""));
        assert!(html.contains("Three keys on a ring"));
        assert!(html.contains("<option value=\"found\" selected>"));
        assert!(store.load().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejected_form_keeps_kind_whatever_its_case() {
        let store = Arc::new(MemoryStore::new());
        let fields = [
            ("reporter_name", "Ana"),
            ("kind", " Found "),
            ("item_name", ""),
            ("location", "Canteen"),
            ("description", "Blue umbrella"),
        ];
        let (status, html) =
            send(app_with(store.clone()), submit_request(multipart_body(&fields, None))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(html.contains("<option value=\"found\" selected>"));
        assert!(!html.contains("<option value=\"lost\" selected>"));
        assert!(store.load().unwrap().is_empty());
    }

    #[tokio::test]
    async fn wallet_submission_is_stored_and_listed() {
        let dir = tempfile::TempDir::new().unwrap();
        let store: Arc<dyn ReportStore> =
            Arc::new(JsonFileStore::open(&dir.path().join("reports.json")).unwrap());

        let (status, html) = send(
            app_with(store.clone()),
            submit_request(multipart_body(WALLET, None)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(SUBMIT_SUCCESS));
        assert!(!html.contains("value=\"Wallet\""));

        let all = store.load().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, 1);
        assert_eq!(all[0].kind, ReportKind::Lost);
        assert_eq!(all[0].photo, None);

        let (_, lost) = get(app_with(store.clone()), "/?view=reports&status=lost").await;
        assert!(lost.contains("Wallet"));
        let (_, found) = get(app_with(store), "/?view=reports&status=found").await;
        assert!(!found.contains("Wallet"));
    }

    #[tokio::test]
    async fn photo_is_stored_as_data_uri() {
        let store = Arc::new(MemoryStore::new());
        let body = multipart_body(WALLET, Some(("wallet.png", "image/png", b"abc".as_slice())));
        let (status, _) = send(app_with(store.clone()), submit_request(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            store.load().unwrap()[0].photo.as_deref(),
            Some("data:image/png;base64,YWJj")
        );
    }

    #[tokio::test]
    async fn blank_file_input_means_no_photo() {
        let store = Arc::new(MemoryStore::new());
        let body = multipart_body(WALLET, Some(("", "application/octet-stream", b"".as_slice())));
        let (status, _) = send(app_with(store.clone()), submit_request(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(store.load().unwrap()[0].photo, None);
    }

    #[tokio::test]
    async fn corrupt_document_lists_empty_and_refuses_writes() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("reports.json");
        std::fs::write(&path, "not json at all").unwrap();
        let store: Arc<dyn ReportStore> = Arc::new(JsonFileStore::open(&path).unwrap());

        let (status, html) = get(app_with(store.clone()), "/?view=reports").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("No reports have been recorded yet."));

        let (status, html) =
            send(app_with(store), submit_request(multipart_body(WALLET, None))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(html.contains(SUBMIT_FAILED));
        assert!(html.contains("value=\"Wallet\""));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json at all");
    }

    #[tokio::test]
    async fn missing_logo_is_404() {
        let app = app_with(Arc::new(MemoryStore::new()));
        let (status, _) = get(app, "/logo").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn present_logo_is_served_and_shown() {
        let dir = tempfile::TempDir::new().unwrap();
        let logo = dir.path().join("logo.png");
        std::fs::write(&logo, b"fake-png-bytes").unwrap();
        let state = AppState::new(Arc::new(MemoryStore::new()), site(logo)).unwrap();
        let app = crate::router(state, 1024);

        let (status, body) = get(app.clone(), "/logo").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "fake-png-bytes");
        let (_, html) = get(app, "/").await;
        assert!(html.contains("sidebar__logo"));
    }

    #[tokio::test]
    async fn stylesheet_and_health() {
        let app = app_with(Arc::new(MemoryStore::new()));
        let (status, css) = get(app.clone(), "/static/style.css").await;
        assert_eq!(status, StatusCode::OK);
        assert!(css.contains(".report-card"));
        let (status, body) = get(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }
}
