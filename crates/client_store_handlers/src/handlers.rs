//! Create/get/update request handlers.
//!
//! # Responsibility
//! - Translate one request envelope into one client service call.
//! - Map every outcome onto a structured response envelope.
//!
//! # Invariants
//! - Storage errors become `500 {message, error}` with the backend text verbatim.
//! - Unparsable input becomes `400 {message, error}`; the store is not called.
//! - Handlers hold no state between invocations and never retry.

use crate::envelope::{ClientInput, RequestEnvelope, RequestError, ResponseEnvelope};
use client_store_core::{
    ClientFields, ClientId, ClientRepository, ClientService, IdGenerator, RepoError,
};
use log::{error, info, warn};
use serde_json::json;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

pub const ID_PATH_PARAMETER: &str = "id";

const CREATED_MESSAGE: &str = "Client created successfully!";
const UPDATED_MESSAGE: &str = "Client updated successfully!";
const NOT_FOUND_MESSAGE: &str = "Client not found";
const INVALID_REQUEST_MESSAGE: &str = "Invalid request.";
const CREATE_FAILED_MESSAGE: &str = "Failed to create client.";
const GET_FAILED_MESSAGE: &str = "Failed to get client.";
const UPDATE_FAILED_MESSAGE: &str = "Failed to update client.";

/// Handles a create request: `201 {message, ClientID}`.
pub fn create_client<R, G>(
    service: &ClientService<R, G>,
    request: &RequestEnvelope,
) -> ResponseEnvelope
where
    R: ClientRepository,
    G: IdGenerator,
{
    let started_at = Instant::now();
    let fields: ClientFields = match request.json_body::<ClientInput>() {
        Ok(input) => input.into(),
        Err(err) => return bad_request("client_create", &err),
    };

    match service.create_client(fields) {
        Ok(client_id) => {
            info!(
                "event=client_create module=handler status=ok client_id={} duration_ms={}",
                client_id,
                started_at.elapsed().as_millis()
            );
            ResponseEnvelope::json(
                STATUS_CREATED,
                &json!({ "message": CREATED_MESSAGE, "ClientID": client_id }),
            )
        }
        Err(err) => storage_failure("client_create", CREATE_FAILED_MESSAGE, &err, started_at),
    }
}

/// Handles a get request: `200` with the full record, or `404`.
pub fn get_client<R, G>(
    service: &ClientService<R, G>,
    request: &RequestEnvelope,
) -> ResponseEnvelope
where
    R: ClientRepository,
    G: IdGenerator,
{
    let started_at = Instant::now();
    let client_id = match request.path_parameter(ID_PATH_PARAMETER) {
        Ok(raw) => ClientId::from(raw),
        Err(err) => return bad_request("client_get", &err),
    };

    match service.get_client(&client_id) {
        Ok(Some(client)) => match serde_json::to_value(&client) {
            Ok(record) => {
                info!(
                    "event=client_get module=handler status=ok client_id={} duration_ms={}",
                    client_id,
                    started_at.elapsed().as_millis()
                );
                ResponseEnvelope::json(STATUS_OK, &record)
            }
            Err(err) => {
                let err = RepoError::InvalidData(err.to_string());
                storage_failure("client_get", GET_FAILED_MESSAGE, &err, started_at)
            }
        },
        Ok(None) => {
            info!(
                "event=client_get module=handler status=not_found client_id={} duration_ms={}",
                client_id,
                started_at.elapsed().as_millis()
            );
            ResponseEnvelope::json(STATUS_NOT_FOUND, &json!({ "message": NOT_FOUND_MESSAGE }))
        }
        Err(err) => storage_failure("client_get", GET_FAILED_MESSAGE, &err, started_at),
    }
}

/// Handles an update request: `200 {message, updatedAttributes}`.
///
/// A missing identifier is created by the store rather than rejected.
pub fn update_client<R, G>(
    service: &ClientService<R, G>,
    request: &RequestEnvelope,
) -> ResponseEnvelope
where
    R: ClientRepository,
    G: IdGenerator,
{
    let started_at = Instant::now();
    let client_id = match request.path_parameter(ID_PATH_PARAMETER) {
        Ok(raw) => ClientId::from(raw),
        Err(err) => return bad_request("client_update", &err),
    };
    let fields: ClientFields = match request.json_body::<ClientInput>() {
        Ok(input) => input.into(),
        Err(err) => return bad_request("client_update", &err),
    };

    match service.update_client(&client_id, &fields) {
        Ok(updated) => {
            info!(
                "event=client_update module=handler status=ok client_id={} duration_ms={}",
                client_id,
                started_at.elapsed().as_millis()
            );
            ResponseEnvelope::json(
                STATUS_OK,
                &json!({ "message": UPDATED_MESSAGE, "updatedAttributes": updated }),
            )
        }
        Err(err) => storage_failure("client_update", UPDATE_FAILED_MESSAGE, &err, started_at),
    }
}

/// The three request handlers, addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    Create,
    Get,
    Update,
}

impl HandlerKind {
    /// Runs the selected handler against `service`.
    pub fn handle<R, G>(
        self,
        service: &ClientService<R, G>,
        request: &RequestEnvelope,
    ) -> ResponseEnvelope
    where
        R: ClientRepository,
        G: IdGenerator,
    {
        match self {
            Self::Create => create_client(service, request),
            Self::Get => get_client(service, request),
            Self::Update => update_client(service, request),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Create => "createClient",
            Self::Get => "getClient",
            Self::Update => "updateClient",
        }
    }
}

impl Display for HandlerKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn bad_request(event: &'static str, err: &RequestError) -> ResponseEnvelope {
    warn!("event={event} module=handler status=invalid_request error={err}");
    ResponseEnvelope::json(
        STATUS_BAD_REQUEST,
        &json!({ "message": INVALID_REQUEST_MESSAGE, "error": err.to_string() }),
    )
}

fn storage_failure(
    event: &'static str,
    message: &'static str,
    err: &RepoError,
    started_at: Instant,
) -> ResponseEnvelope {
    error!(
        "event={event} module=handler status=error duration_ms={} error={err:?}",
        started_at.elapsed().as_millis()
    );
    ResponseEnvelope::json(
        STATUS_INTERNAL_ERROR,
        &json!({ "message": message, "error": err.to_string() }),
    )
}

#[cfg(test)]
mod tests {
    use super::{
        create_client, get_client, update_client, HandlerKind, STATUS_BAD_REQUEST,
        STATUS_CREATED, STATUS_INTERNAL_ERROR, STATUS_NOT_FOUND, STATUS_OK,
    };
    use crate::envelope::RequestEnvelope;
    use client_store_core::db::{ensure_table, open_db_in_memory};
    use client_store_core::{
        Client, ClientFields, ClientId, ClientRepository, ClientService, DbError, RepoError,
        RepoResult, SqliteClientRepository, TableName,
    };
    use rusqlite::Connection;
    use serde_json::{json, Value};
    use std::cell::Cell;

    const SIMULATED_FAILURE: &str = "simulated throttling: rate exceeded";

    /// Store that fails every call and counts attempts.
    #[derive(Default)]
    struct FailingRepository {
        calls: Cell<usize>,
    }

    impl FailingRepository {
        fn fail<T>(&self) -> RepoResult<T> {
            self.calls.set(self.calls.get() + 1);
            Err(RepoError::Db(DbError::Sqlite(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(5),
                Some(SIMULATED_FAILURE.to_string()),
            ))))
        }
    }

    impl ClientRepository for FailingRepository {
        fn put_client(&self, _client: &Client) -> RepoResult<()> {
            self.fail()
        }

        fn get_client(&self, _id: &ClientId) -> RepoResult<Option<Client>> {
            self.fail()
        }

        fn update_client(&self, _id: &ClientId, _fields: &ClientFields) -> RepoResult<ClientFields> {
            self.fail()
        }
    }

    fn provisioned_conn() -> Connection {
        let conn = open_db_in_memory().unwrap();
        ensure_table(&conn, &table()).unwrap();
        conn
    }

    fn table() -> TableName {
        TableName::parse("Clients").unwrap()
    }

    fn body(name: &str, email: &str, phone: &str) -> String {
        json!({ "name": name, "email": email, "phone": phone }).to_string()
    }

    fn by_id(id: &str) -> RequestEnvelope {
        RequestEnvelope::default().with_path_parameter("id", id)
    }

    #[test]
    fn create_get_update_scenario() {
        let conn = provisioned_conn();
        let service = ClientService::new(SqliteClientRepository::new(&conn, table()));

        let created = create_client(
            &service,
            &RequestEnvelope::with_body(body("Alice", "a@x.com", "555")),
        );
        assert_eq!(created.status_code, STATUS_CREATED);
        let created_body = created.body_json().unwrap();
        assert_eq!(created_body["message"], "Client created successfully!");
        let id = created_body["ClientID"].as_str().unwrap().to_string();

        let fetched = get_client(&service, &by_id(&id));
        assert_eq!(fetched.status_code, STATUS_OK);
        assert_eq!(
            fetched.body_json().unwrap(),
            json!({ "ClientID": id, "Name": "Alice", "Email": "a@x.com", "Phone": "555" })
        );

        let mut update_request = by_id(&id);
        update_request.body = Some(body("Alicia", "a@x.com", "556"));
        let updated = update_client(&service, &update_request);
        assert_eq!(updated.status_code, STATUS_OK);
        let updated_body = updated.body_json().unwrap();
        assert_eq!(updated_body["message"], "Client updated successfully!");
        assert_eq!(
            updated_body["updatedAttributes"],
            json!({ "Name": "Alicia", "Email": "a@x.com", "Phone": "556" })
        );

        let refetched = get_client(&service, &by_id(&id)).body_json().unwrap();
        assert_eq!(
            refetched,
            json!({ "ClientID": id, "Name": "Alicia", "Email": "a@x.com", "Phone": "556" })
        );
    }

    #[test]
    fn get_missing_returns_not_found_message() {
        let conn = provisioned_conn();
        let service = ClientService::new(SqliteClientRepository::new(&conn, table()));

        let response = get_client(&service, &by_id("never-created"));
        assert_eq!(response.status_code, STATUS_NOT_FOUND);
        assert_eq!(
            response.body_json().unwrap(),
            json!({ "message": "Client not found" })
        );
    }

    #[test]
    fn identical_creates_yield_distinct_retrievable_ids() {
        let conn = provisioned_conn();
        let service = ClientService::new(SqliteClientRepository::new(&conn, table()));
        let request = RequestEnvelope::with_body(body("Bob", "b@x.com", "777"));

        let ids: Vec<String> = (0..2)
            .map(|_| {
                let response = create_client(&service, &request);
                assert_eq!(response.status_code, STATUS_CREATED);
                response.body_json().unwrap()["ClientID"]
                    .as_str()
                    .unwrap()
                    .to_string()
            })
            .collect();
        assert_ne!(ids[0], ids[1]);

        for id in &ids {
            let fetched = get_client(&service, &by_id(id));
            assert_eq!(fetched.status_code, STATUS_OK);
            assert_eq!(fetched.body_json().unwrap()["Name"], "Bob");
        }
    }

    #[test]
    fn create_with_absent_fields_stores_them_as_absent() {
        let conn = provisioned_conn();
        let service = ClientService::new(SqliteClientRepository::new(&conn, table()));

        let created = create_client(&service, &RequestEnvelope::with_body(r#"{"name":"Solo"}"#));
        assert_eq!(created.status_code, STATUS_CREATED);
        let id = created.body_json().unwrap()["ClientID"]
            .as_str()
            .unwrap()
            .to_string();

        let record = get_client(&service, &by_id(&id)).body_json().unwrap();
        assert_eq!(record, json!({ "ClientID": id, "Name": "Solo" }));
    }

    #[test]
    fn update_of_unknown_id_creates_record() {
        let conn = provisioned_conn();
        let service = ClientService::new(SqliteClientRepository::new(&conn, table()));

        let mut request = by_id("fresh-id");
        request.body = Some(body("New", "n@x.com", "1"));
        assert_eq!(update_client(&service, &request).status_code, STATUS_OK);

        let fetched = get_client(&service, &by_id("fresh-id"));
        assert_eq!(fetched.status_code, STATUS_OK);
        assert_eq!(fetched.body_json().unwrap()["ClientID"], "fresh-id");
    }

    #[test]
    fn storage_failures_pass_message_through_without_retry() {
        let cases: [(HandlerKind, RequestEnvelope, &str); 3] = [
            (
                HandlerKind::Create,
                RequestEnvelope::with_body(body("A", "B", "C")),
                "Failed to create client.",
            ),
            (HandlerKind::Get, by_id("x"), "Failed to get client."),
            (
                HandlerKind::Update,
                RequestEnvelope::with_body(body("A", "B", "C")).with_path_parameter("id", "x"),
                "Failed to update client.",
            ),
        ];

        for (kind, request, message) in cases {
            let repo = FailingRepository::default();
            let service = ClientService::new(&repo);

            let response = kind.handle(&service, &request);
            assert_eq!(response.status_code, STATUS_INTERNAL_ERROR, "{kind}");
            assert_eq!(
                response.body_json().unwrap(),
                json!({ "message": message, "error": SIMULATED_FAILURE }),
                "{kind}"
            );
            assert_eq!(repo.calls.get(), 1, "{kind} must not retry");
        }
    }

    #[test]
    fn missing_table_surfaces_sqlite_error_text() {
        let conn = open_db_in_memory().unwrap();
        let service = ClientService::new(SqliteClientRepository::new(&conn, table()));

        let response = get_client(&service, &by_id("x"));
        assert_eq!(response.status_code, STATUS_INTERNAL_ERROR);
        let error = response.body_json().unwrap()["error"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(error.contains("no such table"), "{error}");
    }

    #[test]
    fn malformed_input_is_rejected_before_storage() {
        let repo = FailingRepository::default();
        let service = ClientService::new(&repo);

        let cases = [
            (HandlerKind::Create, RequestEnvelope::with_body("{not json")),
            (HandlerKind::Create, RequestEnvelope::default()),
            (HandlerKind::Get, RequestEnvelope::default()),
            (HandlerKind::Update, by_id("x")),
            (
                HandlerKind::Update,
                RequestEnvelope::with_body(body("A", "B", "C")),
            ),
            (HandlerKind::Get, by_id("")),
            (HandlerKind::Get, by_id("   ")),
            (
                HandlerKind::Update,
                RequestEnvelope::with_body(body("A", "B", "C")).with_path_parameter("id", ""),
            ),
        ];

        for (kind, request) in cases {
            let response = kind.handle(&service, &request);
            assert_eq!(response.status_code, STATUS_BAD_REQUEST, "{kind}");
            let payload: Value = response.body_json().unwrap();
            assert_eq!(payload["message"], "Invalid request.");
            assert!(payload["error"].is_string());
        }
        assert_eq!(repo.calls.get(), 0);
    }

    #[test]
    fn handler_kind_names_match_function_names() {
        assert_eq!(HandlerKind::Create.to_string(), "createClient");
        assert_eq!(HandlerKind::Get.to_string(), "getClient");
        assert_eq!(HandlerKind::Update.name(), "updateClient");
    }
}
