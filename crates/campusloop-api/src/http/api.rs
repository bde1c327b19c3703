//! CampusApi trait implementation for HttpCampusApi.

use async_trait::async_trait;
use campusloop_common::{
    ChatMessage, Errand, ErrandId, ErrandRecord, ErrandStatus, Match, MatchRecord, PlanId,
    Profile, UserId,
};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};

use super::client::HttpCampusApi;
use crate::geometry::{point_wkt, RouteGeometry};
use crate::{ApiError, CampusApi, EmergencyRequest, NewErrand};

/// `{"id": ..., "status": "created"}` acknowledgement for created resources.
#[derive(Debug, Deserialize)]
struct Created {
    id: String,
}

#[async_trait]
impl CampusApi for HttpCampusApi {
    async fn create_travel_plan(
        &self,
        user: &UserId,
        route: &RouteGeometry,
    ) -> Result<PlanId, ApiError> {
        let builder = self
            .request(Method::POST, "/travel-plans")
            .await
            .json(&travel_plan_body(user, route));
        let created: Created = self.send_json(builder).await?;
        Ok(PlanId::new(created.id))
    }

    async fn get_matches(&self, plan: &PlanId) -> Result<Vec<Match>, ApiError> {
        let path = format!("/travel-plans/{}/matches", urlencoding::encode(plan.as_str()));
        let builder = self.request(Method::GET, &path).await;
        // The server encodes an empty result as `null`.
        let records: Option<Vec<MatchRecord>> = self.send_json(builder).await?;
        Ok(records
            .unwrap_or_default()
            .into_iter()
            .map(Match::from)
            .collect())
    }

    async fn create_errand(&self, errand: &NewErrand) -> Result<ErrandId, ApiError> {
        let builder = self
            .request(Method::POST, "/errand-requests")
            .await
            .json(&errand_body(errand));
        let created: Created = self.send_json(builder).await?;
        Ok(ErrandId::new(created.id))
    }

    async fn get_pending_errands(&self) -> Result<Vec<Errand>, ApiError> {
        let builder = self.request(Method::GET, "/errand-requests").await;
        let records: Option<Vec<ErrandRecord>> = self.send_json(builder).await?;
        Ok(records
            .unwrap_or_default()
            .into_iter()
            .map(Errand::from)
            .collect())
    }

    async fn update_errand_status(
        &self,
        id: &ErrandId,
        status: ErrandStatus,
    ) -> Result<(), ApiError> {
        let path = format!("/errand-requests/{}/status", urlencoding::encode(id.as_str()));
        let builder = self
            .request(Method::PUT, &path)
            .await
            .json(&json!({ "status": status }));
        self.send_ack(builder).await
    }

    async fn toggle_emergency(&self, request: &EmergencyRequest) -> Result<(), ApiError> {
        let builder = self
            .request(Method::POST, "/emergency")
            .await
            .json(&emergency_body(request));
        self.send_ack(builder).await
    }

    async fn get_profile(&self) -> Result<Profile, ApiError> {
        let builder = self.request(Method::GET, "/profile").await;
        self.send_json(builder).await
    }

    async fn get_chat_history(&self, errand: &ErrandId) -> Result<Vec<ChatMessage>, ApiError> {
        let builder = self.request(Method::GET, &chat_path(errand)).await;
        let history: Option<Vec<ChatMessage>> = self.send_json(builder).await?;
        Ok(history.unwrap_or_default())
    }

    async fn send_message(
        &self,
        errand: &ErrandId,
        sender: &UserId,
        content: &str,
    ) -> Result<(), ApiError> {
        let builder = self
            .request(Method::POST, &chat_path(errand))
            .await
            .json(&json!({ "sender_id": sender, "content": content }));
        self.send_ack(builder).await
    }
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

fn chat_path(errand: &ErrandId) -> String {
    format!("/errand-requests/{}/chat", urlencoding::encode(errand.as_str()))
}

pub(crate) fn travel_plan_body(user: &UserId, route: &RouteGeometry) -> Value {
    json!({
        "user_id": user,
        "route_geom": route.to_wkt(),
    })
}

pub(crate) fn errand_body(errand: &NewErrand) -> Value {
    json!({
        "user_id": errand.user_id,
        "title": errand.title,
        "description": errand.description,
        "category": errand.category,
        "pickup_geom": point_wkt(errand.pickup),
        "dropoff_geom": point_wkt(errand.dropoff),
        "reward_estimate": errand.reward_estimate,
    })
}

/// The server uses `-1` for "no target building".
pub(crate) fn emergency_body(request: &EmergencyRequest) -> Value {
    let building_id = request.target.map(|b| i64::from(b.0)).unwrap_or(-1);
    json!({
        "active": request.active,
        "message": request.message,
        "building_id": building_id,
    })
}
