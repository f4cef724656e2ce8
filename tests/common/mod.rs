//! Shared test support: a scripted in-memory data engine
//!
//! Status reads consume a per-collaborator script; the last entry repeats
//! forever. Every call is recorded so tests can assert on ordering.

#![allow(dead_code)]

use async_trait::async_trait;
use fraudshare::adapters::data_engine::{
    ApiResponse, ApiResult, ClientFactory, DataEngineApi, MountBody, QueryBody, ReportPoll,
    StatusSample, ValidationStart,
};
use fraudshare::core::lifecycle::LifecycleDriver;
use fraudshare::core::poller::PollBudget;
use fraudshare::domain::{CollaboratorId, DataEngineError, QualityReport, ReportId};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A remote call as seen by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Mount(String),
    Status(String),
    Query(String),
    Append(String),
    Export(String),
    StartValidation(String),
    GetReport(String),
}

/// One scripted answer to a status read
#[derive(Debug, Clone)]
pub enum StatusStep {
    Sample(StatusSample),
    TransportError,
}

impl From<&str> for StatusStep {
    fn from(status: &str) -> Self {
        StatusStep::Sample(StatusSample::readable(status))
    }
}

#[derive(Default)]
struct EngineState {
    status_scripts: HashMap<String, VecDeque<StatusStep>>,
    calls: Vec<Call>,
    mount_bodies: Vec<(String, MountBody)>,
    state_change_response: Option<ApiResponse>,
    query_responses: HashMap<String, Result<String, (u16, String)>>,
    validations: HashMap<String, ValidationStart>,
    report_scripts: HashMap<String, VecDeque<ReportPoll>>,
    appended: Vec<(String, Vec<u8>, String)>,
}

/// In-memory engine whose answers are scripted by the test
#[derive(Clone, Default)]
pub struct ScriptedEngine {
    state: Arc<Mutex<EngineState>>,
    handles: Arc<AtomicUsize>,
}

pub fn clean_report() -> ReportPoll {
    ReportPoll::Finished(QualityReport::default())
}

pub fn failed_report() -> ReportPoll {
    ReportPoll::Finished(QualityReport {
        fail: vec![serde_json::json!({"rule": "not_null", "column": "account_number"})],
        error: vec![],
    })
}

pub fn report_id_for(id: &str) -> String {
    format!("report-{id}")
}

pub fn collaborator(id: &str) -> CollaboratorId {
    CollaboratorId::new(id).unwrap()
}

/// Budget that never sleeps
pub fn fast_budget(max_tries: u32) -> PollBudget {
    PollBudget::new(max_tries, Duration::ZERO)
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the successive status reads of `id`
    pub fn with_statuses<S: Into<StatusStep>>(self, id: &str, steps: Vec<S>) -> Self {
        self.state.lock().unwrap().status_scripts.insert(
            id.to_string(),
            steps.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Answer every mount/append/export with `response` instead of 204
    pub fn with_state_change_response(self, response: ApiResponse) -> Self {
        self.state.lock().unwrap().state_change_response = Some(response);
        self
    }

    pub fn with_query(self, id: &str, csv_text: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .query_responses
            .insert(id.to_string(), Ok(csv_text.to_string()));
        self
    }

    pub fn with_query_error(self, id: &str, status: u16, message: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .query_responses
            .insert(id.to_string(), Err((status, message.to_string())));
        self
    }

    /// Start validations of `id` under [`report_id_for`] and script the report
    pub fn with_reports(self, id: &str, reports: Vec<ReportPoll>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let report_id = report_id_for(id);
            state.validations.insert(
                id.to_string(),
                ValidationStart::Started(ReportId::new(report_id.clone()).unwrap()),
            );
            state
                .report_scripts
                .insert(report_id, reports.into_iter().collect());
        }
        self
    }

    pub fn with_clean_validation(self, id: &str) -> Self {
        self.with_reports(id, vec![clean_report()])
    }

    pub fn with_validation_rejected(self, id: &str, status_code: u16, body: &str) -> Self {
        self.state.lock().unwrap().validations.insert(
            id.to_string(),
            ValidationStart::Rejected {
                status_code,
                body: body.to_string(),
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    pub fn mount_bodies(&self) -> Vec<(String, MountBody)> {
        self.state.lock().unwrap().mount_bodies.clone()
    }

    pub fn appended(&self) -> Vec<(String, Vec<u8>, String)> {
        self.state.lock().unwrap().appended.clone()
    }

    /// Number of client handles the factory has handed out
    pub fn handles_created(&self) -> usize {
        self.handles.load(Ordering::SeqCst)
    }

    pub fn client(&self) -> Box<dyn DataEngineApi> {
        Box::new(self.clone())
    }

    pub fn factory(&self) -> Arc<dyn ClientFactory> {
        Arc::new(self.clone())
    }

    /// Lifecycle driver on this engine with sleep-free budgets
    pub fn driver(&self, max_tries: u32) -> LifecycleDriver {
        LifecycleDriver::new(self.factory(), fast_budget(max_tries))
            .with_quality_budget(fast_budget(10))
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn state_change_response(&self) -> ApiResponse {
        self.state
            .lock()
            .unwrap()
            .state_change_response
            .clone()
            .unwrap_or_else(ApiResponse::no_content)
    }
}

fn next_scripted<T: Clone>(script: Option<&mut VecDeque<T>>) -> Option<T> {
    let script = script?;
    if script.len() > 1 {
        script.pop_front()
    } else {
        script.front().cloned()
    }
}

impl ClientFactory for ScriptedEngine {
    fn create_client(&self) -> ApiResult<Box<dyn DataEngineApi>> {
        self.handles.fetch_add(1, Ordering::SeqCst);
        Ok(self.client())
    }
}

#[async_trait]
impl DataEngineApi for ScriptedEngine {
    async fn mount(&self, id: &CollaboratorId, body: &MountBody) -> ApiResult<ApiResponse> {
        self.record(Call::Mount(id.to_string()));
        self.state
            .lock()
            .unwrap()
            .mount_bodies
            .push((id.to_string(), body.clone()));
        Ok(self.state_change_response())
    }

    async fn status(&self, id: &CollaboratorId) -> ApiResult<StatusSample> {
        self.record(Call::Status(id.to_string()));
        let step = {
            let mut state = self.state.lock().unwrap();
            next_scripted(state.status_scripts.get_mut(id.as_str()))
        };
        match step {
            Some(StatusStep::Sample(sample)) => Ok(sample),
            Some(StatusStep::TransportError) => Err(DataEngineError::ConnectionFailed(
                "connection reset".to_string(),
            )),
            None => Ok(StatusSample::unreadable(404, "unknown collaborator")),
        }
    }

    async fn query(&self, id: &CollaboratorId, _body: &QueryBody) -> ApiResult<String> {
        self.record(Call::Query(id.to_string()));
        let state = self.state.lock().unwrap();
        match state.query_responses.get(id.as_str()) {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err((status, message))) => Err(DataEngineError::QueryFailed {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(String::new()),
        }
    }

    async fn append(
        &self,
        id: &CollaboratorId,
        payload: Vec<u8>,
        file_name: &str,
    ) -> ApiResult<ApiResponse> {
        self.record(Call::Append(id.to_string()));
        self.state
            .lock()
            .unwrap()
            .appended
            .push((id.to_string(), payload, file_name.to_string()));
        Ok(self.state_change_response())
    }

    async fn export(&self, id: &CollaboratorId) -> ApiResult<ApiResponse> {
        self.record(Call::Export(id.to_string()));
        Ok(self.state_change_response())
    }

    async fn start_validation(&self, id: &CollaboratorId) -> ApiResult<ValidationStart> {
        self.record(Call::StartValidation(id.to_string()));
        let state = self.state.lock().unwrap();
        Ok(state
            .validations
            .get(id.as_str())
            .cloned()
            .unwrap_or_else(|| ValidationStart::Rejected {
                status_code: 404,
                body: "no such collaborator".to_string(),
            }))
    }

    async fn get_report(&self, report_id: &ReportId) -> ApiResult<ReportPoll> {
        self.record(Call::GetReport(report_id.to_string()));
        let mut state = self.state.lock().unwrap();
        Ok(next_scripted(state.report_scripts.get_mut(report_id.as_str()))
            .unwrap_or(ReportPoll::Pending))
    }
}
