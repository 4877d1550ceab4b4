//! In-process clinic server for behaviour tests.
//!
//! Each world owns a single-threaded runtime, an in-memory store, and a
//! clock the scenarios can move forward. The server is wired the same way as
//! the binary, minus CORS and Swagger.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::{Arc, Mutex, MutexGuard};

use actix_web::dev::ServerHandle;
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};
use awc::Client;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use clinic_backend::Trace;
use clinic_backend::domain::{
    AppointmentService, BlogCatalogueService, ContactInboxService, DEFAULT_STAFF,
    DoctorDirectoryService, PatientDirectoryService, ReviewBoardService, StaffAccountService,
    TRACE_ID_HEADER, TokenAccessGate, seed_staff,
};
use clinic_backend::inbound::http::configure_api;
use clinic_backend::inbound::http::health::{HealthState, live, ready};
use clinic_backend::inbound::http::state::{HttpState, HttpStatePorts};
use clinic_backend::outbound::ClinicRepositories;
use clinic_backend::outbound::memory::InMemoryStore;
use clinic_backend::outbound::security::{Argon2PasswordHasher, JwtTokenCodec, TokenSecret};
use mockable::Clock;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

/// Clock shared between the server and the scenario steps.
pub(crate) struct SteppingClock(Mutex<DateTime<Utc>>);

impl SteppingClock {
    fn starting_at(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub(crate) fn advance(&self, delta: TimeDelta) {
        *self.guard() += delta;
    }

    fn guard(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.0.lock().expect("clock mutex")
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.guard()
    }
}

pub(crate) struct ClinicWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) store: Arc<InMemoryStore>,
    pub(crate) clock: Arc<SteppingClock>,
    pub(crate) bearer: Option<String>,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_trace_id: Option<String>,
    pub(crate) remembered_id: Option<String>,
}

pub(crate) type SharedWorld = Rc<RefCell<ClinicWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        let ctx = self.world.borrow();
        let server = ctx.server.clone();
        ctx.local.block_on(&ctx.runtime, async move {
            server.stop(true).await;
        });
    }
}

/// Mid-morning local time so "today" never straddles midnight.
fn scenario_start() -> DateTime<Utc> {
    Local::now()
        .date_naive()
        .and_hms_opt(10, 0, 0)
        .and_then(|naive| Local.from_local_datetime(&naive).single())
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
}

fn build_state(repositories: &ClinicRepositories, clock: Arc<dyn Clock>) -> HttpState {
    let secret = TokenSecret::new(b"behaviour-test-secret-behaviour-test".to_vec());
    let codec = Arc::new(JwtTokenCodec::new(&secret, Arc::clone(&clock)));
    let appointments = Arc::new(AppointmentService::new(
        Arc::clone(&repositories.appointments),
        Arc::clone(&repositories.patients),
        Arc::clone(&clock),
    ));
    HttpState::new(HttpStatePorts {
        access: Arc::new(TokenAccessGate::new(
            codec.clone(),
            Arc::clone(&repositories.users),
        )),
        staff: Arc::new(StaffAccountService::new(
            Arc::clone(&repositories.users),
            Arc::new(Argon2PasswordHasher::new()),
            codec,
            Arc::clone(&clock),
        )),
        appointments: appointments.clone(),
        appointments_query: appointments,
        patients: Arc::new(PatientDirectoryService::new(
            Arc::clone(&repositories.patients),
            Arc::clone(&clock),
        )),
        doctors: Arc::new(DoctorDirectoryService::new(
            Arc::clone(&repositories.doctors),
            Arc::clone(&clock),
        )),
        reviews: Arc::new(ReviewBoardService::new(
            Arc::clone(&repositories.reviews),
            Arc::clone(&clock),
        )),
        blog: Arc::new(BlogCatalogueService::new(
            Arc::clone(&repositories.blog),
            Arc::clone(&clock),
        )),
        contact: Arc::new(ContactInboxService::new(
            Arc::clone(&repositories.contact),
            clock,
        )),
    })
}

async fn spawn_clinic_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let http_data = web::Data::new(http_state);
    let health = web::Data::new(HealthState::new());
    health.mark_ready();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(http_data.clone())
            .app_data(health.clone())
            .wrap(Trace)
            .configure(configure_api)
            .service(ready)
            .service(live)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);
    Ok((format!("http://{addr}"), handle))
}

/// Start a fresh server over an empty store.
pub(crate) fn spawn_world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();
    let store = Arc::new(InMemoryStore::new());
    let clock = Arc::new(SteppingClock::starting_at(scenario_start()));
    let repositories = ClinicRepositories::from_store(store.clone());
    let state = build_state(&repositories, clock.clone());

    let (base_url, server) = local
        .block_on(&runtime, spawn_clinic_server(state))
        .expect("clinic server starts");

    WorldFixture {
        world: Rc::new(RefCell::new(ClinicWorld {
            runtime,
            local,
            base_url,
            server,
            store,
            clock,
            bearer: None,
            last_status: None,
            last_body: None,
            last_trace_id: None,
            remembered_id: None,
        })),
    }
}

/// Run `operation` on the world's runtime with the server's base URL.
pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

/// Run a future against the world's in-memory store.
pub(crate) fn with_store<R, F>(
    world: &SharedWorld,
    operation: impl FnOnce(Arc<InMemoryStore>, Arc<SteppingClock>) -> F,
) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let future = operation(ctx.store.clone(), ctx.clock.clone());
    ctx.local.block_on(&ctx.runtime, future)
}

/// Create the default staff accounts directly in the store.
pub(crate) fn seed_default_staff(world: &SharedWorld) {
    with_store(world, |store, clock| async move {
        seed_staff(
            &DEFAULT_STAFF,
            store.as_ref(),
            &Argon2PasswordHasher::new(),
            clock.as_ref(),
        )
        .await
        .expect("seed default staff")
    });
}

pub(crate) struct JsonRequest<'a> {
    pub(crate) method: Method,
    pub(crate) path: &'a str,
    pub(crate) payload: Option<Value>,
}

impl<'a> JsonRequest<'a> {
    pub(crate) fn get(path: &'a str) -> Self {
        Self {
            method: Method::GET,
            path,
            payload: None,
        }
    }

    pub(crate) fn send(method: Method, path: &'a str, payload: Value) -> Self {
        Self {
            method,
            path,
            payload: Some(payload),
        }
    }
}

/// Send a JSON request, attaching the stored bearer token when present,
/// and record the response on the world.
pub(crate) fn perform_json_request(world: &SharedWorld, spec: JsonRequest<'_>) {
    let bearer = world.borrow().bearer.clone();
    let (status, trace_id, body) = with_world_async(world, |base_url| async move {
        let mut request =
            Client::default().request(spec.method, format!("{base_url}{}", spec.path));
        if let Some(token) = bearer {
            request = request.insert_header((header::AUTHORIZATION, format!("Bearer {token}")));
        }
        let mut response = match spec.payload {
            Some(payload) => request.send_json(&payload).await.expect("request sent"),
            None => request.send().await.expect("request sent"),
        };
        let status = response.status().as_u16();
        let trace_id = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.body().await.expect("response body");
        let json: Value = serde_json::from_slice(&body).expect("JSON response");
        (status, trace_id, json)
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_trace_id = trace_id;
    ctx.last_body = Some(body);
}

/// Log in through the API and keep the issued token for later requests.
pub(crate) fn sign_in(world: &SharedWorld, username: &str, password: &str) {
    world.borrow_mut().bearer = None;
    perform_json_request(
        world,
        JsonRequest::send(
            Method::POST,
            "/api/auth/login",
            serde_json::json!({ "username": username, "password": password }),
        ),
    );
    let token = {
        let ctx = world.borrow();
        assert_eq!(ctx.last_status, Some(200), "login should succeed");
        ctx.last_body
            .as_ref()
            .and_then(|body| body.get("token"))
            .and_then(Value::as_str)
            .map(str::to_owned)
            .expect("token in login response")
    };
    world.borrow_mut().bearer = Some(token);
}

/// Read a field from the last response body.
pub(crate) fn last_body_field(world: &SharedWorld, pointer: &str) -> Value {
    world
        .borrow()
        .last_body
        .as_ref()
        .and_then(|body| body.pointer(pointer))
        .cloned()
        .unwrap_or(Value::Null)
}
