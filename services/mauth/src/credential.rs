// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::{Debug, Formatter};

use nuve_core::{utils::Redact, SigningCredential};

/// Credential is the identity of a Nuve service: its id and shared key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Service id, sent as `mauth_serviceid`.
    pub service_id: String,
    /// Shared secret used as the HMAC key.
    pub service_key: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(service_id: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            service_key: service_key.into(),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("service_id", &self.service_id)
            .field("service_key", &Redact::from(&self.service_key))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.service_id.is_empty()
    }
}
