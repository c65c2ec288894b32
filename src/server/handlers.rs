//! HTTP request handlers

use std::sync::Arc;

use axum::{
    extract::State,
    response::Html,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::error::{Result, ServerError};
use super::state::AppState;
use crate::record::{ChurnPrediction, CustomerRecord};

/// Liveness probe; succeeds whenever the process is up.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn index() -> &'static str {
    "Telco Churn Scoring API - POST /score, GET /model/info, GET /demo, GET /health"
}

/// Scoring request. The identifier and categorical fields are optional;
/// missing numerics default to zero.
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(rename = "CustomerID")]
    pub customer_id: Option<String>,
    #[serde(rename = "Gender")]
    pub gender: Option<String>,
    #[serde(rename = "Tenure", default)]
    pub tenure: f64,
    #[serde(rename = "MonthlyCharges", default)]
    pub monthly_charges: f64,
    #[serde(rename = "TotalCharges", default)]
    pub total_charges: f64,
    #[serde(rename = "Contract")]
    pub contract: Option<String>,
    #[serde(rename = "InternetService")]
    pub internet_service: Option<String>,
}

impl ScoreRequest {
    /// Fill documented defaults and build the record to score. The churn
    /// field is unused during scoring.
    fn into_record(self) -> CustomerRecord {
        CustomerRecord {
            customer_id: self
                .customer_id
                .unwrap_or_else(|| Uuid::new_v4().simple().to_string()),
            gender: self.gender.unwrap_or_else(|| "Female".to_string()),
            tenure: self.tenure,
            monthly_charges: self.monthly_charges,
            total_charges: self.total_charges,
            contract: self.contract.unwrap_or_else(|| "Month-to-month".to_string()),
            internet_service: self
                .internet_service
                .unwrap_or_else(|| "Fiber optic".to_string()),
            churn: "No".to_string(),
        }
    }
}

/// Score one customer through the loaded pipeline.
pub async fn score(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ChurnPrediction>> {
    let engine = state.engine.as_ref().ok_or(ServerError::ModelUnavailable)?;

    let record = request.into_record();
    let prediction = engine
        .predict(&record)
        .map_err(|e| ServerError::Internal(e.to_string()))?;

    Ok(Json(prediction))
}

/// Artifact presence and the latest metrics snapshot. A missing or
/// malformed metrics file yields a null metrics field, not an error.
pub async fn model_info(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let metrics = std::fs::read_to_string(&state.config.metrics_path)
        .ok()
        .and_then(|s| serde_json::from_str::<serde_json::Value>(&s).ok())
        .unwrap_or(serde_json::Value::Null);

    Json(json!({
        "modelExists": state.config.model_path.exists(),
        "modelPath": state.config.model_path.display().to_string(),
        "metrics": metrics,
    }))
}

/// Static demo form posting to /score.
pub async fn demo() -> Html<&'static str> {
    Html(DEMO_HTML)
}

const DEMO_HTML: &str = r#"<!doctype html><meta charset='utf-8'>
<title>Telco Churn - Demo</title>
<style>
  body{font-family:system-ui,Segoe UI,Roboto,Helvetica,Arial,sans-serif;max-width:720px;margin:40px auto;padding:0 12px}
  label{display:block;margin:8px 0}
  input{padding:6px 8px;width:320px}
  button{padding:8px 14px;margin-top:12px;cursor:pointer}
  pre{background:#111;color:#0f0;padding:12px;border-radius:8px;white-space:pre-wrap}
</style>
<h1>Telco Churn - Demo</h1>
<form onsubmit='send(event)'>
  <label>CustomerID <input id='CustomerID' value='C9999'></label>
  <label>Gender <input id='Gender' value='Female'></label>
  <label>Tenure <input id='Tenure' type='number' value='3'></label>
  <label>MonthlyCharges <input id='MonthlyCharges' type='number' value='120'></label>
  <label>TotalCharges <input id='TotalCharges' type='number' value='360'></label>
  <label>Contract <input id='Contract' value='Month-to-month'></label>
  <label>InternetService <input id='InternetService' value='Fiber optic'></label>
  <button>Score</button>
</form>
<pre id='out'></pre>
<script>
async function send(e){
  e.preventDefault();
  const body = {
    CustomerID: CustomerID.value,
    Gender: Gender.value,
    Tenure: parseFloat(Tenure.value),
    MonthlyCharges: parseFloat(MonthlyCharges.value),
    TotalCharges: parseFloat(TotalCharges.value),
    Contract: Contract.value,
    InternetService: InternetService.value
  };
  const r = await fetch('/score',{method:'POST',headers:{'Content-Type':'application/json'},body:JSON.stringify(body)});
  document.getElementById('out').textContent = await r.text();
}
</script>
"#;
