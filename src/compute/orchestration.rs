//! Orchestrations

use super::client::Client;
use super::error::{ApiError, Result};
use super::http::{decode_json, expect_status, request, RequestParams};
use crate::response::{AllOrchestrations, Orchestration};
use reqwest::{Method, StatusCode};
use std::fmt;

const RESOURCE: &str = "orchestration";

/// State change requested through `?action=`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestrationAction {
    Start,
    Stop,
}

impl fmt::Display for OrchestrationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrchestrationAction::Start => f.write_str("START"),
            OrchestrationAction::Stop => f.write_str("STOP"),
        }
    }
}

impl Client {
    /// Every orchestration in the account container
    pub async fn all_orchestrations(&self) -> Result<AllOrchestrations> {
        let cookie = self.require_auth()?;

        let params =
            RequestParams::new(Method::GET, self.container_url(RESOURCE)).cookie(Some(cookie));

        let mut resp: AllOrchestrations =
            request(&self.http, params, decode_json(StatusCode::OK)).await?;

        for orchestration in &mut resp.result {
            self.strip_orchestration(orchestration);
        }
        Ok(resp)
    }

    /// Details of one orchestration
    pub async fn orchestration_details(&self, name: &str) -> Result<Orchestration> {
        let cookie = self.require_auth()?;

        if name.is_empty() {
            return Err(ApiError::Empty("orchestration name"));
        }

        let params = RequestParams::new(Method::GET, self.object_url(RESOURCE, name)?)
            .cookie(Some(cookie));

        let mut resp: Orchestration =
            request(&self.http, params, decode_json(StatusCode::OK)).await?;

        self.strip_orchestration(&mut resp);
        Ok(resp)
    }

    /// Start or stop every object of an orchestration
    pub async fn update_orchestration_state(
        &self,
        name: &str,
        action: OrchestrationAction,
    ) -> Result<Orchestration> {
        let cookie = self.require_auth()?;

        if name.is_empty() {
            return Err(ApiError::Empty("orchestration name"));
        }

        let url = format!("{}?action={}", self.object_url(RESOURCE, name)?, action);
        let params = RequestParams::new(Method::PUT, url).cookie(Some(cookie));

        let mut resp: Orchestration =
            request(&self.http, params, decode_json(StatusCode::OK)).await?;

        self.strip_orchestration(&mut resp);
        Ok(resp)
    }

    /// Delete an orchestration; it must be stopped first
    pub async fn delete_orchestration(&self, name: &str) -> Result<()> {
        let cookie = self.require_auth()?;

        if name.is_empty() {
            return Err(ApiError::Empty("orchestration name"));
        }

        let params = RequestParams::new(Method::DELETE, self.object_url(RESOURCE, name)?)
            .cookie(Some(cookie));

        request(&self.http, params, expect_status(StatusCode::NO_CONTENT)).await
    }

    fn strip_orchestration(&self, orchestration: &mut Orchestration) {
        self.strip(&mut orchestration.account);
        self.strip(&mut orchestration.name);
        self.strip(&mut orchestration.user);

        let instances = orchestration
            .oplans
            .iter_mut()
            .flat_map(|oplan| oplan.objects.iter_mut())
            .flat_map(|object| object.instances.iter_mut());
        for instance in instances {
            self.strip(&mut instance.name);
        }
    }
}
