//! View controller: owns the session's view state and turns operator
//! actions into API calls.
//!
//! Every action reads the form it needs, releases the state lock, performs
//! one HTTP call and then writes either the result or a single log line.
//! No action returns an error; failures only ever show up in the log.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::config::{RefreshPolicy, Settings};
use crate::error::ApiError;
use crate::models::TaskInput;
use crate::state::ViewState;

/// Operator actions, one per button of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Register,
    Login,
    ListAidRequests,
    CreateAidRequest,
    CreateDonor,
    ListDonors,
    CreateVolunteer,
    ListVolunteers,
    CreateTask,
    ListTasks,
    AssignTask,
}

/// The lists that can be refreshed from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    AidRequests,
    Donors,
    Volunteers,
    Tasks,
}

impl ListKind {
    const COUNT: usize = 4;

    fn index(self) -> usize {
        match self {
            ListKind::AidRequests => 0,
            ListKind::Donors => 1,
            ListKind::Volunteers => 2,
            ListKind::Tasks => 3,
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            ListKind::AidRequests => "Load aid requests failed",
            ListKind::Donors => "Load donors failed",
            ListKind::Volunteers => "Load volunteers failed",
            ListKind::Tasks => "Load tasks failed",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum AuthFlow {
    Register,
    Login,
}

struct Session {
    view: ViewState,
    /// Highest refresh sequence applied per list.
    applied: [u64; ListKind::COUNT],
}

/// Decrements the in-flight counter when the action finishes.
struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn start(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        InFlight(counter.clone())
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct ViewController {
    api: ApiClient,
    policy: RefreshPolicy,
    session: Arc<Mutex<Session>>,
    issued: Arc<[AtomicU64; ListKind::COUNT]>,
    in_flight: Arc<AtomicUsize>,
}

impl ViewController {
    pub fn new(api: ApiClient, policy: RefreshPolicy) -> Self {
        Self {
            api,
            policy,
            session: Arc::new(Mutex::new(Session {
                view: ViewState::default(),
                applied: [0; ListKind::COUNT],
            })),
            issued: Arc::new(Default::default()),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ApiError> {
        let api = ApiClient::new(&settings.api_base)?;
        Ok(Self::new(api, settings.refresh_policy))
    }

    pub fn api_base(&self) -> &str {
        self.api.base_url()
    }

    pub fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    /// Number of actions started through [`ViewController::spawn`] that
    /// have not finished yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Copy of the current view state for rendering.
    pub async fn snapshot(&self) -> ViewState {
        self.session.lock().await.view.clone()
    }

    /// Edit view state in place, typically form fields.
    pub async fn update<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> R {
        f(&mut self.session.lock().await.view)
    }

    pub async fn has_token(&self) -> bool {
        self.session.lock().await.view.has_token()
    }

    /// Start `action` on `handle` without waiting for it. The action counts
    /// as in flight from this call until it completes.
    pub fn spawn(&self, handle: &Handle, action: Action) -> JoinHandle<()> {
        let guard = InFlight::start(&self.in_flight);
        let controller = self.clone();
        handle.spawn(async move {
            controller.run(action).await;
            drop(guard);
        })
    }

    pub async fn run(&self, action: Action) {
        debug!(?action, "running action");
        match action {
            Action::Register => self.register().await,
            Action::Login => self.login().await,
            Action::ListAidRequests => self.list_aid_requests().await,
            Action::CreateAidRequest => self.create_aid_request().await,
            Action::CreateDonor => self.create_donor().await,
            Action::ListDonors => self.list_donors().await,
            Action::CreateVolunteer => self.create_volunteer().await,
            Action::ListVolunteers => self.list_volunteers().await,
            Action::CreateTask => self.create_task().await,
            Action::ListTasks => self.list_tasks().await,
            Action::AssignTask => self.assign_task().await,
        }
    }

    async fn log_info(&self, message: &str) {
        info!("{message}");
        self.session.lock().await.view.log.info(message);
    }

    async fn log_failure(&self, what: &str, err: ApiError) {
        warn!(error = %err, "{what}");
        self.session
            .lock()
            .await
            .view
            .log
            .error(format!("{what}: {err}"));
    }

    pub async fn register(&self) {
        self.authenticate(AuthFlow::Register).await
    }

    pub async fn login(&self) {
        self.authenticate(AuthFlow::Login).await
    }

    /// Both flows post the same credential form and keep the returned token.
    async fn authenticate(&self, flow: AuthFlow) {
        let creds = self.session.lock().await.view.credentials.clone();
        let result = match flow {
            AuthFlow::Register => self.api.register(&creds).await,
            AuthFlow::Login => self.api.login(&creds).await,
        };
        match (flow, result) {
            (AuthFlow::Register, Ok(token)) => {
                self.session.lock().await.view.token = Some(token);
                self.log_info("Registered & token stored").await;
            }
            (AuthFlow::Login, Ok(token)) => {
                self.session.lock().await.view.token = Some(token);
                self.log_info("Logged in & token stored").await;
            }
            (AuthFlow::Register, Err(err)) => self.log_failure("Register failed", err).await,
            (AuthFlow::Login, Err(err)) => self.log_failure("Login failed", err).await,
        }
    }

    /// Forget the held token.
    pub async fn sign_out(&self) {
        self.session.lock().await.view.token = None;
        self.log_info("Signed out").await;
    }

    pub async fn clear_log(&self) {
        self.session.lock().await.view.log.clear();
    }

    fn issue(&self, kind: ListKind) -> u64 {
        self.issued[kind.index()].fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Write a list response into its slot, or log the failure. Under
    /// `LatestIssuedWins` a response older than the one already shown is
    /// dropped.
    async fn apply_list<T>(
        &self,
        kind: ListKind,
        seq: u64,
        result: Result<Vec<T>, ApiError>,
        slot: impl FnOnce(&mut ViewState) -> &mut Vec<T>,
    ) {
        let items = match result {
            Ok(items) => items,
            Err(err) => return self.log_failure(kind.failure_message(), err).await,
        };
        let mut guard = self.session.lock().await;
        let session = &mut *guard;
        if self.policy == RefreshPolicy::LatestIssuedWins {
            let applied = &mut session.applied[kind.index()];
            if seq < *applied {
                debug!(?kind, seq, newest = *applied, "dropping stale refresh");
                return;
            }
            *applied = seq;
        }
        debug!(?kind, seq, count = items.len(), "list refreshed");
        *slot(&mut session.view) = items;
    }

    pub async fn list_aid_requests(&self) {
        let seq = self.issue(ListKind::AidRequests);
        let result = self.api.list_aid_requests().await;
        self.apply_list(ListKind::AidRequests, seq, result, |s| &mut s.aid_requests)
            .await;
    }

    /// Needs a held token. Without one nothing is sent and the rejection
    /// is logged.
    pub async fn create_aid_request(&self) {
        let (input, token) = {
            let session = self.session.lock().await;
            let token = session.view.token.clone().filter(|t| !t.is_empty());
            (session.view.aid_form.clone(), token)
        };
        let Some(token) = token else {
            warn!("create aid request attempted without a token");
            self.session
                .lock()
                .await
                .view
                .log
                .error("Create aid request rejected: sign in first");
            return;
        };
        match self.api.create_aid_request(&input, &token).await {
            Ok(()) => {
                self.log_info("Aid request created").await;
                self.list_aid_requests().await;
            }
            Err(err) => self.log_failure("Create aid request failed", err).await,
        }
    }

    pub async fn create_donor(&self) {
        let input = self.session.lock().await.view.donor_form.clone();
        match self.api.create_donor(&input).await {
            Ok(()) => {
                self.log_info("Donor created").await;
                self.list_donors().await;
            }
            Err(err) => self.log_failure("Create donor failed", err).await,
        }
    }

    pub async fn list_donors(&self) {
        let seq = self.issue(ListKind::Donors);
        let result = self.api.list_donors().await;
        self.apply_list(ListKind::Donors, seq, result, |s| &mut s.donors)
            .await;
    }

    pub async fn create_volunteer(&self) {
        let input = self.session.lock().await.view.volunteer_form.to_input();
        match self.api.create_volunteer(&input).await {
            Ok(()) => {
                self.log_info("Volunteer created").await;
                self.list_volunteers().await;
            }
            Err(err) => self.log_failure("Create volunteer failed", err).await,
        }
    }

    pub async fn list_volunteers(&self) {
        let seq = self.issue(ListKind::Volunteers);
        let result = self.api.list_volunteers().await;
        self.apply_list(ListKind::Volunteers, seq, result, |s| &mut s.volunteers)
            .await;
    }

    pub async fn create_task(&self) {
        let input = TaskInput {
            title: self.session.lock().await.view.task_title.clone(),
        };
        match self.api.create_task(&input).await {
            Ok(()) => {
                self.log_info("Task created").await;
                self.list_tasks().await;
            }
            Err(err) => self.log_failure("Task create failed", err).await,
        }
    }

    pub async fn list_tasks(&self) {
        let seq = self.issue(ListKind::Tasks);
        let result = self.api.list_tasks().await;
        self.apply_list(ListKind::Tasks, seq, result, |s| &mut s.tasks)
            .await;
    }

    /// The server may accept the call without assigning anyone, so success
    /// is only reported as an attempt.
    pub async fn assign_task(&self) {
        let task_id = self.session.lock().await.view.assign_task_id.trim().to_string();
        match self.api.assign_task(&task_id).await {
            Ok(()) => {
                self.log_info("Task assignment attempted").await;
                self.list_tasks().await;
            }
            Err(err) => self.log_failure("Assign failed", err).await,
        }
    }
}
