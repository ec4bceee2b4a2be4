use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use pramanik_client::{
    adapters::{Adapters, ConfiguredWallet, HttpBackend, MemoryNotifier, PinataClient},
    config::Config,
    form::RequestForm,
    telemetry,
};
use serde_json::{Value, json};

pub const RECEIVER: &str = "0x21fF6FcC89e8ed65318059527d390FaF6aC5830a";
pub const SIGNER: &str = "0x8ba1f109551bD432803012645Ac136ddd64DBA72";
pub const API_KEY: &str = "test-api-key";
pub const SECRET_API_KEY: &str = "test-secret-key";

pub type HttpForm = RequestForm<ConfiguredWallet, HttpBackend, PinataClient, MemoryNotifier>;

#[derive(Debug, Clone)]
pub struct PinnedUpload {
    pub api_key: Option<String>,
    pub secret_api_key: Option<String>,
    pub part_name: String,
    pub file_name: Option<String>,
    pub len: usize,
}

/// Behaviour of the fake services and everything they received.
#[derive(Debug, Default)]
pub struct Recorded {
    pub issued_documents: Value,
    pub issued_status: Option<StatusCode>,
    pub request_status: Option<StatusCode>,
    pub pin_status: Option<StatusCode>,
    pub pin_hash: Option<String>,
    pub reject_wallet: bool,

    pub issued_queries: Vec<Value>,
    pub requests: Vec<Value>,
    pub uploads: Vec<PinnedUpload>,
    pub rpc_methods: Vec<String>,
}

#[derive(Clone, Default)]
pub struct FakeState(pub Arc<Mutex<Recorded>>);

impl FakeState {
    pub fn with<T>(&self, f: impl FnOnce(&mut Recorded) -> T) -> T {
        f(&mut self.0.lock().unwrap())
    }
}

async fn issued_documents(State(state): State<FakeState>, Json(body): Json<Value>) -> Response {
    state.with(|r| {
        r.issued_queries.push(body);
        match r.issued_status {
            Some(status) => status.into_response(),
            None => Json(r.issued_documents.clone()).into_response(),
        }
    })
}

async fn request_document(State(state): State<FakeState>, Json(body): Json<Value>) -> Response {
    state.with(|r| {
        r.requests.push(body);
        match r.request_status {
            Some(status) => (status, Json(json!({ "error": "rejected" }))).into_response(),
            None => Json(json!({ "message": "Request created", "status": "Pending" }))
                .into_response(),
        }
    })
}

async fn pin_file(
    State(state): State<FakeState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    let field = multipart.next_field().await.unwrap().unwrap();
    let part_name = field.name().unwrap_or_default().to_string();
    let file_name = field.file_name().map(str::to_string);
    let bytes = field.bytes().await.unwrap();

    state.with(|r| {
        r.uploads.push(PinnedUpload {
            api_key: header("pinata_api_key"),
            secret_api_key: header("pinata_secret_api_key"),
            part_name,
            file_name,
            len: bytes.len(),
        });
        match r.pin_status {
            Some(status) => status.into_response(),
            None => Json(json!({
                "IpfsHash": r
                    .pin_hash
                    .clone()
                    .unwrap_or_else(|| format!("QmPinned{}", r.uploads.len())),
                "PinSize": bytes.len(),
                "Timestamp": "2024-05-01T10:00:00.000Z",
            }))
            .into_response(),
        }
    })
}

async fn wallet_rpc(State(state): State<FakeState>, Json(body): Json<Value>) -> Json<Value> {
    let method = body["method"].as_str().unwrap_or_default().to_string();
    let id = body["id"].clone();
    state.with(|r| {
        r.rpc_methods.push(method);
        if r.reject_wallet {
            Json(json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": 4001, "message": "User rejected the request." },
            }))
        } else {
            Json(json!({ "jsonrpc": "2.0", "id": id, "result": [SIGNER] }))
        }
    })
}

pub struct FakeServices {
    pub base_url: String,
    pub state: FakeState,
}

// Backend, pinning service and wallet node on one random local port
pub async fn spawn_fake_services(state: FakeState) -> FakeServices {
    telemetry::init_tracing();

    let app = Router::new()
        .route("/user/getIssuedDocuments", post(issued_documents))
        .route("/user/requestDocument", post(request_document))
        .route("/pinning/pinFileToIPFS", post(pin_file))
        .route("/rpc", post(wallet_rpc))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("failed to run fake services");
    });

    FakeServices {
        base_url: format!("http://{addr}"),
        state,
    }
}

impl FakeServices {
    /// Settings pointing every adapter at the fake services.
    pub fn settings(&self) -> HashMap<String, String> {
        HashMap::from([
            ("backend.base_url".to_string(), self.base_url.clone()),
            ("backend.receiver".to_string(), RECEIVER.to_string()),
            (
                "pinning.endpoint".to_string(),
                format!("{}/pinning/pinFileToIPFS", self.base_url),
            ),
            ("pinning.api_key".to_string(), API_KEY.to_string()),
            (
                "pinning.secret_api_key".to_string(),
                SECRET_API_KEY.to_string(),
            ),
            ("wallet.rpc_url".to_string(), format!("{}/rpc", self.base_url)),
        ])
    }

    pub async fn mounted_form(&self, settings: HashMap<String, String>) -> (HttpForm, MemoryNotifier) {
        let config = Config::load_with_sources(Some(settings)).unwrap();
        let adapters = Adapters::from_config(&config).unwrap();
        let notifier = MemoryNotifier::new();

        let mut form = RequestForm::new(
            adapters.wallet,
            adapters.backend,
            adapters.pinning,
            notifier.clone(),
            config.backend.receiver,
        );
        form.mount().await;
        (form, notifier)
    }
}
