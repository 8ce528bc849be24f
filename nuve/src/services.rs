use bytes::Bytes;
use http::Method;
use nuve_core::Result;

use crate::constants::SERVICES;
use crate::types::{encode, CreateServiceRequest, DeleteServiceRequest};
use crate::Client;

impl Client {
    /// Register a new service. Only the superservice may do this.
    pub async fn create_service(&self, name: &str, key: &str) -> Result<Bytes> {
        let body = encode(&CreateServiceRequest { name, key })?;
        self.send(Method::POST, SERVICES, Some(body), None).await
    }

    pub async fn get_services(&self) -> Result<Bytes> {
        self.send(Method::GET, SERVICES, None, None).await
    }

    pub async fn get_service(&self, service: &str) -> Result<Bytes> {
        self.send(Method::GET, &format!("{SERVICES}{service}"), None, None)
            .await
    }

    /// Delete a service, `forced` also removes its rooms.
    pub async fn delete_service(&self, service: &str, forced: bool) -> Result<Bytes> {
        let body = encode(&DeleteServiceRequest { forced })?;
        self.send(
            Method::DELETE,
            &format!("{SERVICES}{service}"),
            Some(body),
            None,
        )
        .await
    }
}
