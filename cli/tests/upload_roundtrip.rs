use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, HttpServer, web};
use clap::Parser;
use futures_util::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use common::model::report::ReportField;
use report_cli::{Cli, run};

const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const DOCUMENT: &[u8] = b"PK\x03\x04generated report";

#[derive(Debug, Clone)]
struct ReceivedPart {
    name: String,
    filename: Option<String>,
    content_type: Option<String>,
    body: Vec<u8>,
}

/// Stand-in for the report generator: records the last upload and serves one document.
struct MockService {
    upload_status: StatusCode,
    upload_body: Value,
    document: Option<Vec<u8>>,
    uploads: AtomicUsize,
    received: Mutex<Vec<ReceivedPart>>,
}

impl MockService {
    fn replying(upload_status: StatusCode, upload_body: Value) -> Self {
        Self {
            upload_status,
            upload_body,
            document: Some(DOCUMENT.to_vec()),
            uploads: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        }
    }

    fn received(&self) -> Vec<ReceivedPart> {
        self.received.lock().unwrap().clone()
    }

    fn text(&self, name: &str) -> Option<String> {
        self.received()
            .into_iter()
            .find(|p| p.name == name && p.filename.is_none())
            .map(|p| String::from_utf8(p.body).unwrap())
    }
}

async fn upload(mut payload: Multipart, service: web::Data<MockService>) -> HttpResponse {
    service.uploads.fetch_add(1, Ordering::SeqCst);

    let mut parts = Vec::new();
    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
        };
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()))
            .unwrap_or_default();
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()));
        let content_type = field.content_type().map(|m| m.essence_str().to_string());

        let mut body = Vec::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(bytes) => body.extend_from_slice(&bytes),
                Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
            }
        }
        parts.push(ReceivedPart {
            name,
            filename,
            content_type,
            body,
        });
    }

    *service.received.lock().unwrap() = parts;
    HttpResponse::build(service.upload_status).json(service.upload_body.clone())
}

async fn document(service: web::Data<MockService>) -> HttpResponse {
    match &service.document {
        Some(bytes) => HttpResponse::Ok()
            .content_type("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
            .body(bytes.clone()),
        None => HttpResponse::NotFound().finish(),
    }
}

fn start(service: MockService) -> (String, web::Data<MockService>) {
    let data = web::Data::new(service);
    let app_data = data.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_data.clone())
            .route("/upload", web::post().to(upload))
            .route("/files/{name}", web::get().to(document))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    (format!("http://{addr}"), data)
}

struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    fn new() -> Self {
        let workspace = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        workspace.write("data.xlsx", b"PK\x03\x04spreadsheet");
        workspace.write("tmpl.docx", b"PK\x03\x04template");
        workspace.write("photo.png", b"\x89PNG\r\n\x1a\n");
        workspace.write("notes.txt", b"not a spreadsheet");
        workspace
    }

    fn write(&self, name: &str, bytes: &[u8]) {
        std::fs::write(self.path(name), bytes).unwrap();
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn arg(&self, name: &str) -> String {
        self.path(name).to_string_lossy().into_owned()
    }

    fn out_dir(&self) -> PathBuf {
        self.path("out")
    }

    fn cli(&self, server: &str, extra: &[&str]) -> Cli {
        let mut args = vec![
            "report-cli".to_string(),
            "--server".to_string(),
            server.to_string(),
            "--output-dir".to_string(),
            self.out_dir().to_string_lossy().into_owned(),
        ];
        args.extend(extra.iter().map(|a| a.to_string()));
        Cli::try_parse_from(args).unwrap()
    }
}

fn is_empty_dir(path: &Path) -> bool {
    std::fs::read_dir(path).map_or(true, |mut entries| entries.next().is_none())
}

#[actix_web::test]
async fn full_report_is_uploaded_and_saved() {
    let workspace = Workspace::new();
    let (server, service) = start(MockService::replying(
        StatusCode::OK,
        json!({ "downloadUrl": "/files/report123.docx" }),
    ));

    let cli = workspace.cli(
        &server,
        &[
            "--file",
            &workspace.arg("data.xlsx"),
            "--template",
            &workspace.arg("tmpl.docx"),
            "--image",
            &workspace.arg("photo.png"),
            "--measurement",
            "FLUKE-1777",
            "--measurement",
            "Custom meter,999,2024.1.1",
            "--client",
            "ACME",
            "--start",
            "2025-06-03 09:05",
        ],
    );
    let report = run(cli).await.unwrap();

    assert_eq!(report.download_url, "/files/report123.docx");
    let saved = workspace.out_dir().join("report123.docx");
    assert_eq!(report.saved_to.as_deref(), Some(saved.as_path()));
    assert_eq!(std::fs::read(&saved).unwrap(), DOCUMENT);

    let received = service.received();
    let names: Vec<_> = received.iter().map(|p| p.name.as_str()).collect();
    let mut expected = vec!["file", "templateFile", "images"];
    expected.extend(ReportField::ALL.iter().map(|f| f.form_name()));
    expected.push("measurements");
    assert_eq!(names, expected);

    assert_eq!(received[0].filename.as_deref(), Some("data.xlsx"));
    assert_eq!(received[0].content_type.as_deref(), Some(XLSX));
    assert_eq!(received[0].body, b"PK\x03\x04spreadsheet");
    assert_eq!(received[2].filename.as_deref(), Some("photo.png"));

    assert_eq!(service.text("client").as_deref(), Some("ACME"));
    assert_eq!(service.text("startMonth").as_deref(), Some("6"));
    assert_eq!(service.text("startMinute").as_deref(), Some("5"));
    assert_eq!(service.text("endYear").as_deref(), Some(""));

    let measurements: Value = serde_json::from_str(&service.text("measurements").unwrap()).unwrap();
    assert_eq!(
        measurements,
        json!([
            { "measurement": "FLUKE-1777", "certificateNo": "11111", "certificateDate": "2025.6.23" },
            { "measurement": "Custom meter", "certificateNo": "999", "certificateDate": "2024.1.1" }
        ])
    );
}

#[actix_web::test]
async fn spreadsheet_only_run_can_skip_download() {
    let workspace = Workspace::new();
    let (server, service) = start(MockService::replying(
        StatusCode::OK,
        json!({ "downloadUrl": "/files/plain.docx" }),
    ));

    let cli = workspace.cli(&server, &["--file", &workspace.arg("data.xlsx"), "--no-download"]);
    let report = run(cli).await.unwrap();

    assert_eq!(report.download_url, "/files/plain.docx");
    assert_eq!(report.saved_to, None);
    assert!(is_empty_dir(&workspace.out_dir()));

    let received = service.received();
    assert!(received.iter().all(|p| p.name != "templateFile"));
    assert_eq!(service.text("measurements").as_deref(), Some(r#"[{"measurement":"","certificateNo":"","certificateDate":""}]"#));
}

#[actix_web::test]
async fn server_message_is_reported() {
    let workspace = Workspace::new();
    let (server, _service) = start(MockService::replying(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "message": "server busy" }),
    ));

    let cli = workspace.cli(&server, &["--file", &workspace.arg("data.xlsx")]);
    let err = run(cli).await.unwrap_err();

    assert_eq!(err.to_string(), "server busy");
    assert!(is_empty_dir(&workspace.out_dir()));
}

#[actix_web::test]
async fn error_code_in_ok_response_is_a_failure() {
    let workspace = Workspace::new();
    let (server, _service) = start(MockService::replying(
        StatusCode::OK,
        json!({ "code": 1, "msg": "template has no placeholders" }),
    ));

    let cli = workspace.cli(&server, &["--file", &workspace.arg("data.xlsx")]);
    let err = run(cli).await.unwrap_err();

    assert_eq!(err.to_string(), "template has no placeholders");
}

#[actix_web::test]
async fn rejected_spreadsheet_never_reaches_server() {
    let workspace = Workspace::new();
    let (server, service) = start(MockService::replying(
        StatusCode::OK,
        json!({ "downloadUrl": "/files/x.docx" }),
    ));

    let cli = workspace.cli(&server, &["--file", &workspace.arg("notes.txt")]);
    let err = run(cli).await.unwrap_err();

    assert!(format!("{err:#}").contains("Please upload a valid Excel file (.xls or .xlsx)"));
    assert_eq!(service.uploads.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn missing_document_is_a_download_failure() {
    let workspace = Workspace::new();
    let mut service = MockService::replying(
        StatusCode::OK,
        json!({ "downloadUrl": "/files/report123.docx" }),
    );
    service.document = None;
    let (server, _service) = start(service);

    let cli = workspace.cli(&server, &["--file", &workspace.arg("data.xlsx")]);
    let err = run(cli).await.unwrap_err();

    assert_eq!(err.to_string(), "Download failed, please try again later");
    assert!(is_empty_dir(&workspace.out_dir()));
}
