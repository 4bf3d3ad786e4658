use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use rmcp::Json;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    GetPromptRequestParams, GetPromptResult, ListPromptsResult, PaginatedRequestParams,
    ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::RoleServer;
use rmcp::{prompt, prompt_handler, prompt_router, tool, tool_handler, tool_router};

use commute_calc::{CalculationEngine, Results};

pub mod domains;
pub mod error;
mod prompts;
pub mod types;

pub use error::{McpError, McpResult};
pub use types::*;

const QUIET_DEPENDENCIES: &str = "rmcp=warn,serve_inner=warn";

/// Log level from `COMMUTE_CALC_LOG_LEVEL`, then `RUST_LOG`, default `info`.
pub fn log_level_with<F>(mut get: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    get("COMMUTE_CALC_LOG_LEVEL")
        .or_else(|| get("RUST_LOG"))
        .unwrap_or_else(|| "info".to_string())
}

/// Filter for `log_env` with rmcp internals kept at warn. An unparseable
/// `log_env` falls back to `info`.
pub fn log_filter(log_env: &str) -> EnvFilter {
    EnvFilter::try_new(format!("{log_env},{QUIET_DEPENDENCIES}"))
        .unwrap_or_else(|_| EnvFilter::new(format!("info,{QUIET_DEPENDENCIES}")))
}

/// MCP front end over a single [`CalculationEngine`] session.
///
/// Every tool locks the engine for the duration of the call, so calls are
/// applied one at a time and each sees the effects of the previous one.
#[derive(Clone)]
pub struct CommuteMcpHandler {
    engine: Arc<Mutex<CalculationEngine>>,
    tool_router: rmcp::handler::server::tool::ToolRouter<CommuteMcpHandler>,
    prompt_router: rmcp::handler::server::router::prompt::PromptRouter<CommuteMcpHandler>,
}

impl Default for CommuteMcpHandler {
    fn default() -> Self {
        Self::new(CalculationEngine::new())
    }
}

#[tool_router]
#[prompt_router]
impl CommuteMcpHandler {
    pub fn new(engine: CalculationEngine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        }
    }

    pub fn tool_count(&self) -> usize {
        self.tool_router.list_all().len()
    }

    pub fn prompt_count(&self) -> usize {
        self.prompt_router.list_all().len()
    }

    /// Run `op` against the engine with logging.
    async fn with_engine<T, F>(&self, name: &str, op: F) -> McpResult<T>
    where
        F: FnOnce(&mut CalculationEngine) -> McpResult<T>,
    {
        let start = Instant::now();
        debug!("Starting operation: {}", name);

        let mut engine = self.engine.lock().await;
        let result = op(&mut engine);

        let duration = start.elapsed();
        match &result {
            Ok(_) => debug!("Operation completed successfully: {} in {:?}", name, duration),
            Err(e) => debug!("Operation failed: {} in {:?} - error: {}", name, duration, e),
        }
        result
    }

    fn results_for(
        engine: &CalculationEngine,
        distance_miles: Option<f64>,
        trip_count: Option<f64>,
    ) -> McpResult<Results> {
        let d = distance_miles.unwrap_or(engine.distance_miles());
        let t = trip_count.unwrap_or(engine.trip_count());
        Ok(engine.compute(d, t)?)
    }

    #[tool(
        name = "compute",
        description = "Compute time, cost, calories and CO2 for driving, biking and walking. \
                       Uses the session distance and trip count unless overridden."
    )]
    async fn compute(&self, params: Parameters<ComputeParams>) -> Result<Json<Results>, String> {
        let p = params.0;
        let results = self
            .with_engine("compute", |e| {
                Self::results_for(e, p.distance_miles, p.trip_count)
            })
            .await?;
        Ok(Json(results))
    }

    #[tool(
        name = "set_trip",
        description = "Set the session distance (miles) and trip count, then return fresh results"
    )]
    async fn set_trip(&self, params: Parameters<TripParams>) -> Result<Json<Results>, String> {
        let p = params.0;
        let results = self
            .with_engine("set_trip", |e| {
                domains::settings::stage(e, |s| {
                    s.set_distance_miles(p.distance_miles)?;
                    s.set_trip_count(p.trip_count)?;
                    Ok(())
                })?;
                Ok(e.results())
            })
            .await?;
        Ok(Json(results))
    }

    #[tool(
        name = "set_drive_category",
        description = "Select the vehicle category (average, small_sedan, medium_sedan, \
                       large_sedan, sport_utility, minivan). Custom cost values stay in effect."
    )]
    async fn set_drive_category(
        &self,
        params: Parameters<DriveCategoryParams>,
    ) -> Result<Json<ObjectResult>, String> {
        let category = params.0.category;
        let value = self
            .with_engine("set_drive_category", |e| {
                e.drive_mut().set_category(category);
                Ok(serde_json::to_value(e.drive())?)
            })
            .await?;
        Ok(Json(ObjectResult { value }))
    }

    #[tool(
        name = "set_drive_costs",
        description = "Customise driving costs: gas price, MPG, annual miles and annual gas, \
                       maintenance and tire spend. All values are applied or none are."
    )]
    async fn set_drive_costs(
        &self,
        params: Parameters<DriveCostsParams>,
    ) -> Result<Json<ObjectResult>, String> {
        let p = params.0;
        let value = self
            .with_engine("set_drive_costs", |e| {
                domains::settings::apply_drive_costs(e, &p)?;
                Ok(serde_json::to_value(e.drive())?)
            })
            .await?;
        Ok(Json(ObjectResult { value }))
    }

    #[tool(
        name = "set_bike_costs",
        description = "Customise biking costs: annual parts and maintenance spend (or a spend \
                       bracket) and annual miles biked"
    )]
    async fn set_bike_costs(
        &self,
        params: Parameters<BikeCostsParams>,
    ) -> Result<Json<ObjectResult>, String> {
        let p = params.0;
        let value = self
            .with_engine("set_bike_costs", |e| {
                domains::settings::apply_bike_costs(e, &p)?;
                Ok(serde_json::to_value(e.bike())?)
            })
            .await?;
        Ok(Json(ObjectResult { value }))
    }

    #[tool(
        name = "set_walk_costs",
        description = "Customise walking costs: shoe price (or a spend bracket) and miles per pair"
    )]
    async fn set_walk_costs(
        &self,
        params: Parameters<WalkCostsParams>,
    ) -> Result<Json<ObjectResult>, String> {
        let p = params.0;
        let value = self
            .with_engine("set_walk_costs", |e| {
                domains::settings::apply_walk_costs(e, &p)?;
                Ok(serde_json::to_value(e.walk())?)
            })
            .await?;
        Ok(Json(ObjectResult { value }))
    }

    #[tool(
        name = "set_person",
        description = "Update the person used for calorie estimates: sex (with population \
                       defaults), weight, height, age and activity level, for one mode or all"
    )]
    async fn set_person(
        &self,
        params: Parameters<PersonParams>,
    ) -> Result<Json<Results>, String> {
        let p = params.0;
        let results = self
            .with_engine("set_person", |e| {
                domains::settings::apply_person(e, &p)?;
                Ok(e.results())
            })
            .await?;
        Ok(Json(results))
    }

    #[tool(
        name = "reset_defaults",
        description = "Restore every mode, the person and the session distance and trips \
                       to defaults"
    )]
    async fn reset_defaults(&self) -> Result<Json<Results>, String> {
        let results = self
            .with_engine("reset_defaults", |e| {
                e.reset();
                Ok(e.results())
            })
            .await?;
        Ok(Json(results))
    }

    #[tool(
        name = "get_chart",
        description = "Get the chart series for the chosen units (time: hours|minutes|audiobooks, \
                       cost: dollars|coffees, calories: total|per_hour, co2: pounds|trees)"
    )]
    async fn get_chart(
        &self,
        params: Parameters<ChartParams>,
    ) -> Result<Json<ChartResult>, String> {
        let p = params.0;
        let chart = self
            .with_engine("get_chart", |e| {
                let results = Self::results_for(e, p.distance_miles, p.trip_count)?;
                Ok(domains::chart::build_chart(&results, &p))
            })
            .await?;
        Ok(Json(chart))
    }

    #[tool(
        name = "get_settings",
        description = "Get the current session: distance, trips and every mode's parameters"
    )]
    async fn get_settings(&self) -> Result<Json<CalculationEngine>, String> {
        let engine = self.with_engine("get_settings", |e| Ok(e.clone())).await?;
        Ok(Json(engine))
    }

    #[prompt(
        name = "compare-commute",
        description = "Compare driving, biking and walking for a commute"
    )]
    async fn compare_commute(&self, params: Parameters<CompareCommuteParams>) -> GetPromptResult {
        let engine = self.engine.lock().await;
        let distance = params.0.distance_miles.unwrap_or(engine.distance_miles());
        let trips = params.0.trip_count.unwrap_or(engine.trip_count());

        prompts::compare_commute_prompt(distance, trips)
    }
}

#[tool_handler]
#[prompt_handler(router = self.prompt_router)]
impl rmcp::ServerHandler for CommuteMcpHandler {
    fn get_info(&self) -> ServerInfo {
        let capabilities = ServerCapabilities::builder()
            .enable_tools()
            .enable_prompts()
            .build();
        ServerInfo::new(capabilities).with_instructions(
            "Commute calculator MCP server - estimates time, cost, calories and CO2 for \
             driving, biking and walking, with adjustable vehicle, spend and person settings.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commute_calc::{DriveCategory, Sex, SpendBracket, TimeUnit};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[tokio::test]
    async fn handler_creation() {
        let handler = CommuteMcpHandler::default();
        let _clone = handler.clone();
        let tools = handler.tool_router.list_all();
        for name in [
            "compute",
            "set_trip",
            "set_drive_category",
            "set_drive_costs",
            "set_bike_costs",
            "set_walk_costs",
            "set_person",
            "reset_defaults",
            "get_chart",
            "get_settings",
        ] {
            assert!(tools.iter().any(|t| t.name == name), "missing tool {name}");
        }
        assert_eq!(handler.tool_count(), 10);
        assert_eq!(handler.prompt_count(), 1);
    }

    #[tokio::test]
    async fn compute_uses_session_defaults() {
        let handler = CommuteMcpHandler::default();
        let r = handler
            .compute(Parameters(ComputeParams::default()))
            .await
            .expect("compute")
            .0;
        assert!(close(r.cost_usd.drive, 0.1730));
        assert_eq!(r.distance_miles, 1.0);
    }

    #[tokio::test]
    async fn compute_rejects_negative_distance() {
        let handler = CommuteMcpHandler::default();
        let err = handler
            .compute(Parameters(ComputeParams {
                distance_miles: Some(-4.0),
                trip_count: None,
            }))
            .await
            .err()
            .expect("should fail");
        assert!(err.contains("distance_miles"));
    }

    #[tokio::test]
    async fn set_trip_persists_for_later_calls() {
        let handler = CommuteMcpHandler::default();
        handler
            .set_trip(Parameters(TripParams {
                distance_miles: 5.0,
                trip_count: 10.0,
            }))
            .await
            .expect("set_trip");
        let r = handler
            .compute(Parameters(ComputeParams::default()))
            .await
            .expect("compute")
            .0;
        assert!(close(r.time_hours.walk, 50.0 / 3.25));

        let bad = handler
            .set_trip(Parameters(TripParams {
                distance_miles: 8.0,
                trip_count: -1.0,
            }))
            .await;
        assert!(bad.is_err());
        let settings = handler.get_settings().await.expect("settings").0;
        assert_eq!(settings.distance_miles(), 5.0);
    }

    #[tokio::test]
    async fn drive_category_and_costs_flow_into_results() {
        let handler = CommuteMcpHandler::default();
        handler
            .set_drive_category(Parameters(DriveCategoryParams {
                category: DriveCategory::SmallSedan,
            }))
            .await
            .expect("category");
        let out = handler
            .set_drive_costs(Parameters(DriveCostsParams {
                gas_price: Some(3.536),
                ..Default::default()
            }))
            .await
            .expect("costs")
            .0;
        assert!(out.value["overrides"]["gas_price"].is_number());

        let r = handler
            .compute(Parameters(ComputeParams::default()))
            .await
            .expect("compute")
            .0;
        assert!(close(r.cost_usd.drive, 0.1 + 0.0468 + 0.0068));
    }

    #[tokio::test]
    async fn bike_and_walk_brackets() {
        let handler = CommuteMcpHandler::default();
        handler
            .set_bike_costs(Parameters(BikeCostsParams {
                spend_bracket: Some(SpendBracket::From150To200),
                ..Default::default()
            }))
            .await
            .expect("bike");
        handler
            .set_walk_costs(Parameters(WalkCostsParams {
                shoe_lifetime_miles: Some(0.0),
                ..Default::default()
            }))
            .await
            .err()
            .expect("zero lifetime rejected");
        let r = handler
            .compute(Parameters(ComputeParams::default()))
            .await
            .unwrap()
            .0;
        assert!(close(r.cost_usd.bike, 175.0 / 1500.0));
        assert!(close(r.cost_usd.walk, 0.0375));
    }

    #[tokio::test]
    async fn person_and_reset() {
        let handler = CommuteMcpHandler::default();
        let male = handler.reset_defaults().await.unwrap().0;
        let female = handler
            .set_person(Parameters(PersonParams {
                sex: Some(Sex::Female),
                ..Default::default()
            }))
            .await
            .unwrap()
            .0;
        assert!(female.calories_total.walk < male.calories_total.walk);

        let reset = handler.reset_defaults().await.unwrap().0;
        assert_eq!(reset, male);
    }

    #[tokio::test]
    async fn chart_uses_requested_units() {
        let handler = CommuteMcpHandler::default();
        let chart = handler
            .get_chart(Parameters(ChartParams {
                distance_miles: Some(2.0),
                time_unit: Some(TimeUnit::Minutes),
                ..Default::default()
            }))
            .await
            .unwrap()
            .0;
        assert_eq!(chart.time.label, "Time (Minutes)");
        assert!(close(chart.time.values.walk, 2.0 / 3.25 * 60.0));
    }

    #[tokio::test]
    async fn compare_prompt_defaults_to_session() {
        let handler = CommuteMcpHandler::default();
        let p = handler
            .compare_commute(Parameters(CompareCommuteParams {
                distance_miles: None,
                trip_count: Some(20.0),
            }))
            .await;
        assert!(p.description.unwrap_or_default().contains("20 trips of 1 miles"));
    }
}
