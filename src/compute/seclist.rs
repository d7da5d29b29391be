//! Security lists
//!
//! A security list groups instances that share inbound and outbound
//! packet policies. Instances are added to a list through security
//! associations.

use super::client::Client;
use super::error::{ApiError, Result};
use super::http::{decode_json, expect_status, request, RequestParams};
use crate::response::{AllSecLists, Policy, SecList};
use reqwest::{Method, StatusCode};
use serde::Serialize;

const RESOURCE: &str = "seclist";

#[derive(Serialize)]
struct SecListParams<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'a str,
    name: String,
    outbound_cidr_policy: Policy,
    policy: Policy,
}

impl Client {
    /// Create a security list
    ///
    /// `policy` applies to inbound traffic, `outbound_cidr_policy` to
    /// traffic leaving the list.
    pub async fn create_sec_list(
        &self,
        description: &str,
        name: &str,
        outbound_cidr_policy: Policy,
        policy: Policy,
    ) -> Result<SecList> {
        let cookie = self.require_auth()?;

        if name.is_empty() {
            return Err(ApiError::Empty("secure list name"));
        }

        let body = serde_json::to_value(SecListParams {
            description,
            name: self.qualified_name(name),
            outbound_cidr_policy,
            policy,
        })?;

        let params = RequestParams::new(Method::POST, self.resource_url(RESOURCE))
            .body(body)
            .cookie(Some(cookie));

        let mut resp: SecList =
            request(&self.http, params, decode_json(StatusCode::CREATED)).await?;

        self.strip_sec_list(&mut resp);
        Ok(resp)
    }

    /// Delete a security list
    pub async fn delete_sec_list(&self, name: &str) -> Result<()> {
        let cookie = self.require_auth()?;

        if name.is_empty() {
            return Err(ApiError::Empty("secure list"));
        }

        let params = RequestParams::new(Method::DELETE, self.object_url(RESOURCE, name)?)
            .cookie(Some(cookie));

        request(&self.http, params, expect_status(StatusCode::NO_CONTENT)).await
    }

    /// Every security list in the account container
    pub async fn all_sec_lists(&self) -> Result<AllSecLists> {
        let cookie = self.require_auth()?;

        let params =
            RequestParams::new(Method::GET, self.container_url(RESOURCE)).cookie(Some(cookie));

        let mut resp: AllSecLists =
            request(&self.http, params, decode_json(StatusCode::OK)).await?;

        for list in &mut resp.result {
            self.strip_sec_list(list);
        }
        Ok(resp)
    }

    /// Details of one security list
    pub async fn sec_list_details(&self, name: &str) -> Result<SecList> {
        let cookie = self.require_auth()?;

        if name.is_empty() {
            return Err(ApiError::Empty("secure list name"));
        }

        let params = RequestParams::new(Method::GET, self.object_url(RESOURCE, name)?)
            .cookie(Some(cookie));

        let mut resp: SecList = request(&self.http, params, decode_json(StatusCode::OK)).await?;

        self.strip_sec_list(&mut resp);
        Ok(resp)
    }

    /// Update policies, description and optionally the name of a list
    ///
    /// An empty `new_name` keeps `current_name`.
    pub async fn update_sec_list(
        &self,
        description: &str,
        current_name: &str,
        new_name: &str,
        outbound_cidr_policy: Policy,
        policy: Policy,
    ) -> Result<SecList> {
        let cookie = self.require_auth()?;

        if current_name.is_empty() {
            return Err(ApiError::Empty("secure list name"));
        }

        let new_name = if new_name.is_empty() {
            current_name
        } else {
            new_name
        };

        let body = serde_json::to_value(SecListParams {
            description,
            name: self.qualified_name(new_name),
            outbound_cidr_policy,
            policy,
        })?;

        let params = RequestParams::new(Method::PUT, self.object_url(RESOURCE, current_name)?)
            .body(body)
            .cookie(Some(cookie));

        let mut resp: SecList = request(&self.http, params, decode_json(StatusCode::OK)).await?;

        self.strip_sec_list(&mut resp);
        Ok(resp)
    }

    fn strip_sec_list(&self, list: &mut SecList) {
        self.strip(&mut list.account);
        self.strip(&mut list.name);
    }
}
