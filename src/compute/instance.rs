//! Compute instances
//!
//! Instances are launched through orchestrations or launch plans; this
//! module only reads and deletes them.

use super::client::Client;
use super::error::{ApiError, Result};
use super::http::{decode_json, expect_status, request, MediaType, RequestParams};
use crate::response::{AllInstanceNames, AllInstances, Instance};
use reqwest::{Method, StatusCode};

const RESOURCE: &str = "instance";

impl Client {
    /// Every instance in the account container
    pub async fn all_instances(&self) -> Result<AllInstances> {
        let cookie = self.require_auth()?;

        let params =
            RequestParams::new(Method::GET, self.container_url(RESOURCE)).cookie(Some(cookie));

        let mut resp: AllInstances =
            request(&self.http, params, decode_json(StatusCode::OK)).await?;

        for instance in &mut resp.result {
            self.strip_instance(instance);
        }
        Ok(resp)
    }

    /// Names of every instance in the account container
    pub async fn all_instance_names(&self) -> Result<AllInstanceNames> {
        let cookie = self.require_auth()?;

        let params = RequestParams::new(Method::GET, self.container_url(RESOURCE))
            .cookie(Some(cookie))
            .accept(MediaType::Directory);

        let mut resp: AllInstanceNames =
            request(&self.http, params, decode_json(StatusCode::OK)).await?;

        for name in &mut resp.result {
            self.strip(name);
        }
        Ok(resp)
    }

    /// Details of one instance, `name` being `<name>/<id>`
    pub async fn instance_details(&self, name: &str) -> Result<Instance> {
        let cookie = self.require_auth()?;

        if name.is_empty() {
            return Err(ApiError::Empty("instance name"));
        }

        let params = RequestParams::new(Method::GET, self.object_url(RESOURCE, name)?)
            .cookie(Some(cookie));

        let mut resp: Instance = request(&self.http, params, decode_json(StatusCode::OK)).await?;

        self.strip_instance(&mut resp);
        Ok(resp)
    }

    /// Delete one instance
    pub async fn delete_instance(&self, name: &str) -> Result<()> {
        let cookie = self.require_auth()?;

        if name.is_empty() {
            return Err(ApiError::Empty("instance name"));
        }

        let params = RequestParams::new(Method::DELETE, self.object_url(RESOURCE, name)?)
            .cookie(Some(cookie));

        request(&self.http, params, expect_status(StatusCode::NO_CONTENT)).await
    }

    fn strip_instance(&self, instance: &mut Instance) {
        self.strip(&mut instance.account);
        self.strip(&mut instance.name);
    }
}
