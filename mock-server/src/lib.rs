//! In-memory emulation of the z/OSMF jobs and TSO REST endpoints.
//!
//! Enough of z/OSMF to exercise a client end to end: Basic auth and the CSRF
//! header are enforced, submitted JCL becomes a finished job with three spool
//! files, and TSO address spaces answer a handful of commands.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, Request, State},
    http::{HeaderMap, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const CSRF_HEADER: &str = "x-csrf-zosmf-header";

/// Catalogued member the emulator can submit by name.
pub const SAMPLE_JCL_DATA_SET: &str = "IBMUSER.JCL(IEFBR14)";
const SAMPLE_JCL: &str = "//IEFBR14 JOB (ACCT),'CATALOGUED',CLASS=A\n//STEP1    EXEC PGM=IEFBR14\n";

/// A job document as z/OSMF renders it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct JobDoc {
    pub jobid: String,
    pub jobname: String,
    pub owner: String,
    pub status: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub class: String,
    pub retcode: Option<String>,
    pub subsystem: String,
    pub job_correlator: String,
    pub phase: i64,
    pub phase_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_data: Option<Vec<Value>>,
}

/// A spool file document.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SpoolFileDoc {
    pub jobid: String,
    pub jobname: String,
    pub id: i64,
    pub ddname: String,
    pub stepname: String,
    pub class: String,
    pub recfm: String,
    pub lrecl: i64,
    pub byte_count: i64,
    pub record_count: i64,
    pub subsystem: String,
}

struct StoredJob {
    doc: JobDoc,
    jcl: String,
    spool: Vec<(SpoolFileDoc, String)>,
}

struct TsoSession {
    user: String,
    pending: Vec<String>,
}

#[derive(Default)]
pub struct MockState {
    jobs: BTreeMap<String, StoredJob>,
    next_job_number: u32,
    tso: HashMap<String, TsoSession>,
    /// Data set members by upper-cased `DSN(MEMBER)`.
    data_sets: HashMap<String, String>,
}

impl MockState {
    /// State with the sample JCL member catalogued.
    pub fn seeded() -> Self {
        let mut state = Self::default();
        state
            .data_sets
            .insert(SAMPLE_JCL_DATA_SET.to_string(), SAMPLE_JCL.to_string());
        state
    }
}

pub type Db = Arc<RwLock<MockState>>;

/// Authenticated user id, upper-cased as z/OS reports it.
#[derive(Clone, Debug)]
struct AuthUser(String);

/// z/OSMF style error body.
#[derive(Debug)]
struct ZosmfError {
    status: StatusCode,
    message: String,
}

impl ZosmfError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ZosmfError {
    fn into_response(self) -> Response {
        let body = json!({
            "rc": 4,
            "reason": 0,
            "category": 6,
            "message": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(MockState::seeded()));
    Router::new()
        .route("/zosmf/restjobs/jobs", get(list_jobs).put(submit_job))
        .route("/zosmf/restjobs/jobs/{jobname}/{jobid}", get(job_status))
        .route("/zosmf/restjobs/jobs/{jobname}/{jobid}/files", get(spool_files))
        .route(
            "/zosmf/restjobs/jobs/{jobname}/{jobid}/files/{file}/records",
            get(spool_records),
        )
        .route("/zosmf/tsoApp/tso", post(start_tso))
        .route(
            "/zosmf/tsoApp/tso/{key}",
            get(receive_tso).put(send_tso).delete(stop_tso),
        )
        .layer(middleware::from_fn(require_zosmf_headers))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn require_zosmf_headers(mut request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let mutating = method == Method::PUT || method == Method::POST || method == Method::DELETE;
    if mutating && !request.headers().contains_key(CSRF_HEADER) {
        return ZosmfError::new(StatusCode::FORBIDDEN, "X-CSRF-ZOSMF-HEADER required").into_response();
    }
    let Some(user) = basic_user(request.headers()) else {
        return ZosmfError::new(StatusCode::UNAUTHORIZED, "authentication required").into_response();
    };
    request.extensions_mut().insert(AuthUser(user));
    next.run(request).await
}

fn basic_user(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("authorization")?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = String::from_utf8(STANDARD.decode(encoded.trim()).ok()?).ok()?;
    let (user, _password) = decoded.split_once(':')?;
    if user.is_empty() {
        return None;
    }
    Some(user.to_uppercase())
}

/// `*` matches any run of characters; everything else matches itself,
/// ignoring case.
fn wildcard_match(pattern: &str, name: &str) -> bool {
    let pattern = pattern.to_uppercase();
    let name = name.to_uppercase();
    let parts: Vec<&str> = pattern.split('*').collect();
    if parts.len() == 1 {
        return pattern == name;
    }
    let mut rest = name.as_str();
    for (i, part) in parts.iter().enumerate() {
        if i == 0 {
            match rest.strip_prefix(part) {
                Some(r) => rest = r,
                None => return false,
            }
        } else if i == parts.len() - 1 {
            return rest.ends_with(part);
        } else {
            match rest.find(part) {
                Some(pos) => rest = &rest[pos + part.len()..],
                None => return false,
            }
        }
    }
    true
}

// --- jobs ---

#[derive(Deserialize)]
struct JobListQuery {
    owner: Option<String>,
    prefix: Option<String>,
    jobid: Option<String>,
    #[serde(rename = "max-jobs")]
    max_jobs: Option<usize>,
}

async fn list_jobs(
    State(db): State<Db>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Query(query): Query<JobListQuery>,
) -> Json<Vec<JobDoc>> {
    let owner = query.owner.unwrap_or(user);
    let prefix = query.prefix.unwrap_or_else(|| "*".to_string());
    let max_jobs = query.max_jobs.unwrap_or(1000);
    let state = db.read().await;
    let jobs = state
        .jobs
        .values()
        .map(|j| &j.doc)
        .filter(|j| wildcard_match(&owner, &j.owner))
        .filter(|j| wildcard_match(&prefix, &j.jobname))
        .filter(|j| query.jobid.as_deref().is_none_or(|id| id.eq_ignore_ascii_case(&j.jobid)))
        .take(max_jobs)
        .cloned()
        .collect();
    Json(jobs)
}

#[derive(Deserialize)]
struct SubmitFile {
    file: String,
}

async fn submit_job(
    State(db): State<Db>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    headers: HeaderMap,
    body: String,
) -> Result<(StatusCode, Json<JobDoc>), ZosmfError> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let jcl = if content_type.starts_with("application/json") {
        let request: SubmitFile = serde_json::from_str(&body)
            .map_err(|e| ZosmfError::new(StatusCode::BAD_REQUEST, format!("invalid JSON: {e}")))?;
        let name = data_set_name(&request.file);
        let member = db.read().await.data_sets.get(&name).cloned();
        member.ok_or_else(|| {
            ZosmfError::new(StatusCode::BAD_REQUEST, format!("data set {} not found", request.file))
        })?
    } else {
        body
    };

    let jobname = parse_job_name(&jcl)
        .ok_or_else(|| ZosmfError::new(StatusCode::BAD_REQUEST, "no JOB statement found"))?;

    let mut state = db.write().await;
    state.next_job_number += 1;
    let jobid = format!("JOB{:05}", state.next_job_number);
    let doc = JobDoc {
        jobid: jobid.clone(),
        jobname: jobname.clone(),
        owner: user,
        status: "OUTPUT".to_string(),
        job_type: "JOB".to_string(),
        class: "A".to_string(),
        retcode: Some("CC 0000".to_string()),
        subsystem: "JES2".to_string(),
        job_correlator: format!("J{}", Uuid::new_v4().simple()),
        phase: 20,
        phase_name: "Job is on the hard copy queue".to_string(),
        step_data: None,
    };
    let spool = build_spool(&doc, &jcl);
    state.jobs.insert(
        jobid.clone(),
        StoredJob {
            doc: doc.clone(),
            jcl,
            spool,
        },
    );
    tracing::info!(jobid = %jobid, jobname = %jobname, "job submitted");
    Ok((StatusCode::CREATED, Json(doc)))
}

/// `//'HLQ.JCL(MEMBER)'` to `HLQ.JCL(MEMBER)`.
fn data_set_name(file: &str) -> String {
    let name = file.strip_prefix("//").unwrap_or(file);
    name.trim_matches('\'').to_uppercase()
}

fn parse_job_name(jcl: &str) -> Option<String> {
    let first = jcl.lines().find(|l| l.starts_with("//") && !l.starts_with("//*"))?;
    let mut words = first[2..].split_whitespace();
    let name = words.next()?;
    (words.next()? == "JOB").then(|| name.to_uppercase())
}

fn build_spool(doc: &JobDoc, jcl: &str) -> Vec<(SpoolFileDoc, String)> {
    let jesmsglg = format!(
        " $HASP373 {} STARTED - INIT 1    - CLASS A        - SYS MOCK\n $HASP395 {} ENDED - RC=0000\n",
        doc.jobname, doc.jobname
    );
    let jesjcl = jcl
        .lines()
        .enumerate()
        .map(|(i, l)| format!("{:>10} {l}\n", i + 1))
        .collect::<String>();
    let jesysmsg = "IEF142I STEP1 - STEP WAS EXECUTED - COND CODE 0000\n".to_string();

    [("JESMSGLG", jesmsglg), ("JESJCL", jesjcl), ("JESYSMSG", jesysmsg)]
        .into_iter()
        .enumerate()
        .map(|(i, (ddname, content))| {
            let file = SpoolFileDoc {
                jobid: doc.jobid.clone(),
                jobname: doc.jobname.clone(),
                id: i as i64 + 2,
                ddname: ddname.to_string(),
                stepname: "JES2".to_string(),
                class: "H".to_string(),
                recfm: "UA".to_string(),
                lrecl: 133,
                byte_count: content.len() as i64,
                record_count: content.lines().count() as i64,
                subsystem: "JES2".to_string(),
            };
            (file, content)
        })
        .collect()
}

fn find_job<'a>(state: &'a MockState, jobname: &str, jobid: &str) -> Result<&'a StoredJob, ZosmfError> {
    state
        .jobs
        .get(&jobid.to_uppercase())
        .filter(|j| j.doc.jobname.eq_ignore_ascii_case(jobname))
        .ok_or_else(|| ZosmfError::new(StatusCode::NOT_FOUND, format!("job {jobname}({jobid}) not found")))
}

async fn job_status(
    State(db): State<Db>,
    Path((jobname, jobid)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<JobDoc>, ZosmfError> {
    let state = db.read().await;
    let job = find_job(&state, &jobname, &jobid)?;
    let mut doc = job.doc.clone();
    if query.get("step-data").is_some_and(|v| v == "Y") {
        doc.step_data = Some(vec![json!({
            "smfid": "MOCK",
            "completion": "CC 0000",
            "active": false,
            "step-number": 1,
            "step-name": "STEP1",
            "program-name": "IEFBR14",
        })]);
    }
    Ok(Json(doc))
}

async fn spool_files(
    State(db): State<Db>,
    Path((jobname, jobid)): Path<(String, String)>,
) -> Result<Json<Vec<SpoolFileDoc>>, ZosmfError> {
    let state = db.read().await;
    let job = find_job(&state, &jobname, &jobid)?;
    Ok(Json(job.spool.iter().map(|(f, _)| f.clone()).collect()))
}

async fn spool_records(
    State(db): State<Db>,
    Path((jobname, jobid, file)): Path<(String, String, String)>,
) -> Result<String, ZosmfError> {
    let state = db.read().await;
    let job = find_job(&state, &jobname, &jobid)?;
    if file.eq_ignore_ascii_case("JCL") {
        return Ok(job.jcl.clone());
    }
    let id: i64 = file
        .parse()
        .map_err(|_| ZosmfError::new(StatusCode::BAD_REQUEST, format!("invalid file id {file}")))?;
    job.spool
        .iter()
        .find(|(f, _)| f.id == id)
        .map(|(_, content)| content.clone())
        .ok_or_else(|| ZosmfError::new(StatusCode::NOT_FOUND, format!("spool file {id} not found")))
}

// --- TSO ---

fn tso_body(key: &str, lines: &[String], prompt: bool) -> Value {
    let mut data: Vec<Value> = lines
        .iter()
        .map(|l| json!({"TSO MESSAGE": {"VERSION": "0100", "DATA": l}}))
        .collect();
    if prompt {
        data.push(json!({"TSO PROMPT": {"VERSION": "0100", "HIDDEN": "FALSE"}}));
    }
    json!({
        "servletKey": key,
        "queueID": "4",
        "ver": "0100",
        "reused": false,
        "timeout": false,
        "tsoData": data,
    })
}

fn invalid_key(key: &str) -> Json<Value> {
    Json(json!({
        "servletKey": key,
        "ver": "0100",
        "msgData": [{
            "messageText": format!("IZUG1126E: z/OSMF cannot find the TSO/E address space for servlet key {key}."),
            "messageId": "IZUG1126E",
        }],
    }))
}

fn run_command(user: &str, command: &str) -> Vec<String> {
    let verb = command.split_whitespace().next().unwrap_or_default().to_uppercase();
    let mut lines = match verb.as_str() {
        "TIME" => vec!["IKJ56650I TIME-12:00:00 PM. CPU-00:00:00 SERVICE-42 SESSION-00:00:01".to_string()],
        "LISTUSER" | "LU" => vec![format!("USER={user}  NAME=MOCK USER  OWNER=SYS1")],
        "STATUS" => vec!["IKJ56192I NO JOBS FOUND".to_string()],
        _ => vec![format!("IKJ56500I COMMAND {verb} NOT FOUND")],
    };
    lines.push("READY ".to_string());
    lines
}

async fn start_tso(
    State(db): State<Db>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ZosmfError> {
    if query.get("acct").is_none_or(|a| a.is_empty()) {
        return Err(ZosmfError::new(StatusCode::BAD_REQUEST, "acct parameter required"));
    }
    let key = format!("{user}-{}", Uuid::new_v4().simple());
    let lines = vec![
        format!("IKJ56455I {user} LOGON IN PROGRESS AT 12:00:00 ON JANUARY 1, 2026"),
        "IKJ56951I NO BROADCAST MESSAGES".to_string(),
        "READY ".to_string(),
    ];
    db.write().await.tso.insert(
        key.clone(),
        TsoSession {
            user,
            pending: Vec::new(),
        },
    );
    tracing::info!(servlet_key = %key, "TSO address space started");
    Ok(Json(tso_body(&key, &lines, true)))
}

async fn send_tso(
    State(db): State<Db>,
    Path(key): Path<String>,
    Json(request): Json<Value>,
) -> Json<Value> {
    let mut state = db.write().await;
    let Some(session) = state.tso.get_mut(&key) else {
        return invalid_key(&key);
    };
    let command = request["TSO RESPONSE"]["DATA"].as_str().unwrap_or_default();
    let output = run_command(&session.user, command);
    session.pending.extend(output);
    // Output is queued and handed out by the next GET.
    Json(tso_body(&key, &[], false))
}

async fn receive_tso(State(db): State<Db>, Path(key): Path<String>) -> Json<Value> {
    let mut state = db.write().await;
    let Some(session) = state.tso.get_mut(&key) else {
        return invalid_key(&key);
    };
    let lines: Vec<String> = session.pending.drain(..).collect();
    Json(tso_body(&key, &lines, true))
}

async fn stop_tso(State(db): State<Db>, Path(key): Path<String>) -> Result<Json<Value>, ZosmfError> {
    db.write()
        .await
        .tso
        .remove(&key)
        .ok_or_else(|| ZosmfError::new(StatusCode::NOT_FOUND, format!("servlet key {key} not found")))?;
    tracing::info!(servlet_key = %key, "TSO address space stopped");
    Ok(Json(json!({"servletKey": key, "ver": "0100", "reused": false, "timeout": false})))
}
