//! # API REST
//!
//! REST API for the odontogram.
//!
//! Handles:
//! - HTTP endpoints with axum (chart page load, form submission, per-tooth save)
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, status codes, CORS)
//!
//! Uses `api-shared` for request/response types and `odonto-core` for all
//! chart and storage logic.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    ArchRes, CreatePatientReq, CreatePatientRes, ErrorRes, HealthRes, HealthService, LayoutRes,
    OdontogramPayloadReq, SaveToothReq, SaveToothRes, StatusOptionRes, ToothRecordRes,
    ToothRecordsRes,
};
use odonto_core::chart::OdontogramDocument;
use odonto_core::editor::ChartLayout;
use odonto_core::odonto_types::{Color, Mark, ToothStatus};
use odonto_core::{
    CoreConfig, OdontoError, OdontoResult, OdontogramService, PatientId, SqliteStore,
};

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    store: Arc<SqliteStore>,
    service: OdontogramService,
    layout: Arc<ChartLayout>,
}

impl AppState {
    pub fn new(store: Arc<SqliteStore>, layout: ChartLayout) -> Self {
        Self {
            service: OdontogramService::new(store.clone()),
            store,
            layout: Arc::new(layout),
        }
    }

    /// Opens the configured database and builds the state around it.
    pub fn from_config(cfg: &CoreConfig) -> OdontoResult<Self> {
        let store = Arc::new(SqliteStore::open(cfg)?);
        let layout = ChartLayout::standard().with_initial_color(cfg.default_color());
        Ok(Self::new(store, layout))
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        create_patient,
        delete_patient,
        get_odontogram,
        put_odontogram,
        save_tooth,
        list_teeth,
        get_layout,
    ),
    components(schemas(
        HealthRes,
        ErrorRes,
        CreatePatientReq,
        CreatePatientRes,
        OdontogramPayloadReq,
        SaveToothReq,
        SaveToothRes,
        ToothRecordRes,
        ToothRecordsRes,
        ArchRes,
        StatusOptionRes,
        LayoutRes,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router with Swagger UI mounted at `/swagger-ui`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/layout", get(get_layout))
        .route("/patients", post(create_patient))
        .route("/patients/:id", delete(delete_patient))
        .route(
            "/patients/:id/odontogram",
            get(get_odontogram).put(put_odontogram),
        )
        .route("/patients/:id/odontogram/teeth", get(list_teeth))
        .route("/patients/:id/odontogram/teeth/:tooth", post(save_tooth))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `addr` and serves [`router`] until the server stops.
pub async fn serve(state: AppState, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}

type ApiError = (StatusCode, Json<ErrorRes>);

/// Maps core errors to status codes. Server-side failures are logged with
/// detail and reported to the client without it.
fn api_error(context: &'static str, e: OdontoError) -> ApiError {
    let status = match &e {
        OdontoError::InvalidInput(_)
        | OdontoError::InvalidToothCode(_)
        | OdontoError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
        OdontoError::PatientNotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let error = if status.is_server_error() {
        tracing::error!("{} error: {:?}", context, e);
        "Internal error".to_string()
    } else {
        tracing::warn!("{} rejected: {}", context, e);
        e.to_string()
    };

    (status, Json(ErrorRes { error }))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
///
/// Reports `ok: false` when the database does not answer.
#[axum::debug_handler]
async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::report(state.store.ping()))
}

#[utoipa::path(
    get,
    path = "/layout",
    responses(
        (status = 200, description = "Fixed chart layout and toolbar options", body = LayoutRes)
    )
)]
/// Chart geometry and toolbar options the page renders.
///
/// Arches come in display order, teeth in each arch left to right.
#[axum::debug_handler]
async fn get_layout(State(state): State<AppState>) -> Json<LayoutRes> {
    let layout = &state.layout;
    Json(LayoutRes {
        arches: layout
            .arches
            .iter()
            .map(|arch| ArchRes {
                label: arch.label.to_string(),
                is_deciduous: arch.is_deciduous,
                teeth: arch.teeth.iter().map(ToString::to_string).collect(),
            })
            .collect(),
        surfaces: layout.surfaces.iter().map(ToString::to_string).collect(),
        colors: Color::ALL.iter().map(ToString::to_string).collect(),
        marks: Mark::ALL
            .iter()
            .filter(|m| !m.is_none())
            .map(ToString::to_string)
            .collect(),
        statuses: ToothStatus::ALL
            .iter()
            .map(|s| StatusOptionRes {
                key: s.key().to_string(),
                label: s.label().to_string(),
            })
            .collect(),
        initial_color: layout.initial_color.to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/patients",
    request_body = CreatePatientReq,
    responses(
        (status = 201, description = "Patient created", body = CreatePatientRes),
        (status = 400, description = "Bad request", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Creates a patient with an empty odontogram.
#[axum::debug_handler]
async fn create_patient(
    State(state): State<AppState>,
    Json(req): Json<CreatePatientReq>,
) -> Result<(StatusCode, Json<CreatePatientRes>), ApiError> {
    let id = state
        .store
        .create_patient(&req.full_name)
        .map_err(|e| api_error("Create patient", e))?;
    Ok((StatusCode::CREATED, Json(CreatePatientRes { id })))
}

#[utoipa::path(
    delete,
    path = "/patients/{id}",
    params(("id" = i64, Path, description = "Patient id")),
    responses(
        (status = 204, description = "Patient and odontogram deleted"),
        (status = 404, description = "Patient not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Deletes a patient; their odontogram rows go with them.
#[axum::debug_handler]
async fn delete_patient(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<PatientId>,
) -> Result<StatusCode, ApiError> {
    let removed = state
        .store
        .delete_patient(id)
        .map_err(|e| api_error("Delete patient", e))?;

    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(api_error("Delete patient", OdontoError::PatientNotFound(id)))
    }
}

#[utoipa::path(
    get,
    path = "/patients/{id}/odontogram",
    params(("id" = i64, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Canonical odontogram document"),
        (status = 404, description = "Patient not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Loads the patient's chart for the editor.
///
/// Stored payloads that no longer parse are served as an empty chart.
#[axum::debug_handler]
async fn get_odontogram(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<PatientId>,
) -> Result<Json<OdontogramDocument>, ApiError> {
    let document = state
        .service
        .load(id)
        .map_err(|e| api_error("Load odontogram", e))?;
    Ok(Json(document))
}

#[utoipa::path(
    put,
    path = "/patients/{id}/odontogram",
    params(("id" = i64, Path, description = "Patient id")),
    request_body = OdontogramPayloadReq,
    responses(
        (status = 204, description = "Odontogram replaced"),
        (status = 400, description = "Payload is not a JSON object", body = ErrorRes),
        (status = 404, description = "Patient not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Accepts the submitted chart form and stores its canonical form.
#[axum::debug_handler]
async fn put_odontogram(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<PatientId>,
    Json(req): Json<OdontogramPayloadReq>,
) -> Result<StatusCode, ApiError> {
    state
        .service
        .submit(id, &req.payload)
        .map_err(|e| api_error("Submit odontogram", e))?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/patients/{id}/odontogram/teeth/{tooth}",
    params(
        ("id" = i64, Path, description = "Patient id"),
        ("tooth" = String, Path, description = "FDI tooth code, e.g. 11 or 85")
    ),
    request_body = SaveToothReq,
    responses(
        (status = 200, description = "Tooth saved", body = SaveToothRes),
        (status = 400, description = "Unknown tooth code or status", body = ErrorRes),
        (status = 404, description = "Patient not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Saves the whole-tooth status and notes for one tooth.
#[axum::debug_handler]
async fn save_tooth(
    State(state): State<AppState>,
    AxumPath((id, tooth)): AxumPath<(PatientId, String)>,
    Json(req): Json<SaveToothReq>,
) -> Result<Json<SaveToothRes>, ApiError> {
    let tooth = state
        .service
        .save_tooth(id, &tooth, &req.status, &req.notes)
        .map_err(|e| api_error("Save tooth", e))?;

    Ok(Json(SaveToothRes {
        tooth: tooth.to_string(),
        status: req.status.trim().to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/odontogram/teeth",
    params(("id" = i64, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Saved per-tooth rows", body = ToothRecordsRes),
        (status = 404, description = "Patient not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Lists the per-tooth rows saved for a patient, ordered by tooth code.
#[axum::debug_handler]
async fn list_teeth(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<PatientId>,
) -> Result<Json<ToothRecordsRes>, ApiError> {
    let rows = state
        .service
        .tooth_records(id)
        .map_err(|e| api_error("List teeth", e))?;

    let records = rows
        .into_iter()
        .map(|row| ToothRecordRes {
            tooth: row.tooth.to_string(),
            status: row.status.map(|s| s.key().to_string()),
            notes: row.notes,
            surface_data: row.surface_data,
            updated_at: row.updated_at.to_string(),
        })
        .collect();

    Ok(Json(ToothRecordsRes { records }))
}
