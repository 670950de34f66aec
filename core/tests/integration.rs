//! Job and TSO lifecycles against the live mock z/OSMF server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every facade over
//! real HTTP with `UreqTransport`. Validates that header construction,
//! status classification and JSON mapping agree with the server.

use std::sync::Arc;

use zosmf_core::{
    ApiError, CommonJobParms, GetJobParms, GetJobs, IssueTso, Protocol, SendTso, StartTso,
    StopTso, SubmitJobs, UreqTransport, ZosConnection, ZosmfClient, ZosmfRequest,
};

const JCL: &str = "//LIFECYC  JOB (ACCT),'LIFECYCLE',CLASS=A\n//STEP1    EXEC PGM=IEFBR14\n";

/// Start the mock server on a random port and return a client for it.
fn start_server() -> ZosmfClient {
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
            mock_zosmf::run(listener).await
        })
        .unwrap();
    });

    let connection = ZosConnection::new("127.0.0.1", &addr.port().to_string(), "ibmuser", "sys1")
        .with_protocol(Protocol::Http);
    ZosmfClient::with_transport(connection, Arc::new(UreqTransport::new()))
}

#[test]
fn job_lifecycle() {
    let client = start_server();
    let get_jobs = GetJobs::new(client.clone());
    let submit_jobs = SubmitJobs::new(client.clone());

    // Step 1: nothing submitted yet.
    assert!(get_jobs.get_jobs().unwrap().is_empty(), "expected no jobs");

    // Step 2: submit JCL.
    let submitted = submit_jobs.submit_jcl(JCL, None, None).unwrap();
    assert_eq!(submitted.job_name.as_deref(), Some("LIFECYC"));
    let job_id = submitted.job_id.clone().unwrap();

    // Step 3: the listings find it.
    let by_prefix = get_jobs.get_jobs_by_prefix("LIFE*").unwrap();
    assert_eq!(by_prefix.len(), 1);
    let by_owner = get_jobs.get_jobs_by_owner("IBMUSER").unwrap();
    assert_eq!(by_owner.len(), 1);
    let both = get_jobs.get_jobs_by_owner_and_prefix("*", "LIFECYC").unwrap();
    assert_eq!(both[0].job_id.as_deref(), Some(job_id.as_str()));
    let none = get_jobs
        .get_jobs_common(&GetJobParms::builder().owner("*").prefix("NOPE*").build())
        .unwrap();
    assert!(none.is_empty());

    // Step 4: single-job lookups.
    let job = get_jobs.get_job(&job_id).unwrap();
    assert_eq!(job, submitted);
    let status = get_jobs.get_status_for_job(&job).unwrap();
    assert_eq!(status.status.as_deref(), Some("OUTPUT"));
    let with_steps = get_jobs
        .get_status_common(&CommonJobParms::new(&job_id, "LIFECYC").with_step_data())
        .unwrap();
    assert_eq!(with_steps.step_data.unwrap()[0].program_name.as_deref(), Some("IEFBR14"));

    // Step 5: spool files and their content.
    let files = get_jobs.get_spool_files_for_job(&job).unwrap();
    assert_eq!(files.len(), 3);
    let log = get_jobs.get_spool_content(&files[0]).unwrap();
    assert!(log.contains("$HASP395 LIFECYC ENDED"));

    // Step 6: JCL comes back as submitted.
    assert_eq!(get_jobs.get_jcl_for_job(&job).unwrap(), JCL);
    assert_eq!(
        get_jobs
            .get_jcl_common(&CommonJobParms::new(&job_id, "LIFECYC"))
            .unwrap(),
        JCL
    );

    // Step 7: unknown jobs.
    let err = get_jobs.get_job("JOB99999").unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
    let err = get_jobs.get_status("LIFECYC", "JOB99999").unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 404, .. }));

    // Step 8: submitting a data set the host does not have.
    let err = submit_jobs.submit_job("NO.SUCH.JCL(MEMBER)").unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 400, .. }));
}

#[test]
fn submit_catalogued_data_set() {
    let client = start_server();
    let submitted = SubmitJobs::new(client.clone())
        .submit_job(mock_zosmf::SAMPLE_JCL_DATA_SET)
        .unwrap();
    assert_eq!(submitted.job_name.as_deref(), Some("IEFBR14"));
    assert_eq!(submitted.owner.as_deref(), Some("IBMUSER"));

    let get_jobs = GetJobs::new(client);
    let job = get_jobs.get_job(submitted.job_id.as_deref().unwrap()).unwrap();
    assert!(get_jobs.get_jcl_for_job(&job).unwrap().contains("EXEC PGM=IEFBR14"));
}

#[test]
fn tso_issue_lifecycle() {
    let client = start_server();

    let response = IssueTso::new(client.clone())
        .issue_tso_command("IZUACCT", "TIME", None)
        .unwrap();

    assert!(response.success);
    assert!(response.start_ready);
    let output = response.command_responses.unwrap();
    assert!(output.starts_with("IKJ56650I TIME-"), "got {output}");
    assert!(output.ends_with("READY "));
    assert!(response.stop_response.unwrap().success);
    // One PUT answer without a prompt, one GET answer with it.
    assert_eq!(response.zosmf_responses.len(), 2);
}

#[test]
fn tso_step_by_step() {
    let client = start_server();

    let start = StartTso::new(client.clone()).start("IZUACCT", None).unwrap();
    assert!(start.success);
    assert!(start.messages.contains("LOGON IN PROGRESS"));
    let key = start.servlet_key.unwrap();

    let sent = SendTso::new(client.clone())
        .send_data_to_tso_collect(&key, "LISTUSER")
        .unwrap();
    assert!(sent.command_response.contains("USER=IBMUSER"));

    let stopped = StopTso::new(client.clone()).stop(&key).unwrap();
    assert!(stopped.success);

    // The address space is gone.
    let err = SendTso::new(client.clone())
        .send_data_to_tso_collect(&key, "TIME")
        .unwrap_err();
    assert!(matches!(err, ApiError::Tso(_)));
    let stopped_again = StopTso::new(client).stop(&key).unwrap();
    assert!(!stopped_again.success);
}

#[test]
fn start_without_account_is_rejected_locally() {
    let client = start_server();
    let err = StartTso::new(client).start(" ", None).unwrap_err();
    assert!(matches!(err, ApiError::InvalidArgument(_)));
}

#[test]
fn missing_credentials_yield_401_response() {
    let client = start_server();
    let port = client.connection().port().to_string();
    let anonymous = ZosConnection::new("127.0.0.1", &port, "", "").with_protocol(Protocol::Http);

    let response = ZosmfRequest::get_json(format!("{}/zosmf/restjobs/jobs", anonymous.base_url()))
        .execute(&anonymous, &UreqTransport::new())
        .unwrap();

    assert_eq!(response.status_code, Some(401));
    assert_eq!(
        response.phrase,
        Some(zosmf_core::ResponsePhrase::Text("Unauthorized".to_string()))
    );
}

#[test]
fn unreachable_host_yields_empty_response() {
    // Bind then drop to get a port nothing listens on.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let connection =
        ZosConnection::new("127.0.0.1", &port.to_string(), "ibmuser", "sys1").with_protocol(Protocol::Http);

    let response = ZosmfRequest::get_json(format!("{}/zosmf/restjobs/jobs", connection.base_url()))
        .execute(&connection, &UreqTransport::new())
        .unwrap();
    assert!(response.is_empty());

    let err = GetJobs::new(ZosmfClient::new(connection)).get_jobs().unwrap_err();
    assert!(matches!(err, ApiError::NoResponse));
}

#[test]
fn spool_content_larger_than_ten_mib_is_read_whole() {
    use std::io::{BufRead, BufReader, Write};

    let line = "IEF142I STEP1 - STEP WAS EXECUTED - COND CODE 0000                          \n";
    let body = line.repeat(11 * 1024 * 1024 / line.len() + 1);
    assert!(body.len() > 11 * 1024 * 1024);

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let served = body.clone();
    std::thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut header = String::new();
        while reader.read_line(&mut header).unwrap() > 0 && !header.ends_with("\r\n\r\n") {}
        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            served.len()
        )
        .unwrap();
        stream.write_all(served.as_bytes()).unwrap();
    });

    let connection =
        ZosConnection::new("127.0.0.1", &port.to_string(), "ibmuser", "sys1").with_protocol(Protocol::Http);
    let content = GetJobs::new(ZosmfClient::new(connection))
        .get_spool_content_by_id("BIGJOB", "JOB00001", 2)
        .unwrap();
    assert_eq!(content.len(), body.len());
}
