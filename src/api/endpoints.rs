//! Static descriptors for every backend capability.
//!
//! Each descriptor fixes the verb, path, whether the session token is
//! attached, and the fallback policy. The verbs match the backend's
//! contract exactly: forecast is POST with a JSON body, and a wrong verb
//! comes back as a plain 405 server failure.

use std::fmt;

use serde_json::Value;

use crate::api::models::{
    AlertItem, AnalyticsData, AuthResponse, BackendUser, ChatResponse, CustomerData, FileItem,
    ForecastData, Report, UploadResponse,
};
use crate::api::substitute;
use crate::resilience::{Fallback, PolicyKind};

/// HTTP verb used by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Verb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Verb::Get),
            "POST" => Ok(Verb::Post),
            other => Err(format!("unsupported verb: {other}")),
        }
    }
}

impl From<Verb> for reqwest::Method {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::Get => reqwest::Method::GET,
            Verb::Post => reqwest::Method::POST,
        }
    }
}

/// A backend capability whose successful response body is a `T`.
#[derive(Debug)]
pub struct Endpoint<T> {
    /// Stable name used in logs and metric labels.
    pub name: &'static str,
    pub verb: Verb,
    pub path: &'static str,
    /// Attach `Authorization: Bearer <token>` when a token is stored.
    pub auth: bool,
    pub fallback: Fallback<T>,
}

impl<T> Endpoint<T> {
    pub const fn info(&self) -> EndpointInfo {
        EndpointInfo {
            name: self.name,
            verb: self.verb,
            path: self.path,
            auth: self.auth,
            policy: self.fallback.kind(),
        }
    }
}

/// Type-erased view of an [`Endpoint`], for diagnostics and listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointInfo {
    pub name: &'static str,
    pub verb: Verb,
    pub path: &'static str,
    pub auth: bool,
    pub policy: PolicyKind,
}

pub const LOGIN: Endpoint<AuthResponse> = Endpoint {
    name: "login",
    verb: Verb::Post,
    path: "/login",
    auth: false,
    fallback: Fallback::Strict,
};

pub const SIGNUP: Endpoint<AuthResponse> = Endpoint {
    name: "signup",
    verb: Verb::Post,
    path: "/signup",
    auth: false,
    fallback: Fallback::Strict,
};

pub const PROFILE: Endpoint<BackendUser> = Endpoint {
    name: "profile",
    verb: Verb::Get,
    path: "/me",
    auth: true,
    fallback: Fallback::Strict,
};

pub const ANALYTICS: Endpoint<AnalyticsData> = Endpoint {
    name: "analytics",
    verb: Verb::Get,
    path: "/analytics",
    auth: true,
    fallback: Fallback::AuthTolerant(substitute::analytics),
};

pub const FORECAST: Endpoint<ForecastData> = Endpoint {
    name: "forecast",
    verb: Verb::Post,
    path: "/forecast",
    auth: true,
    fallback: Fallback::AuthTolerant(substitute::forecast),
};

pub const FILES: Endpoint<Vec<FileItem>> = Endpoint {
    name: "files",
    verb: Verb::Get,
    path: "/files",
    auth: true,
    fallback: Fallback::AuthTolerant(substitute::files),
};

pub const REPORTS: Endpoint<Vec<Report>> = Endpoint {
    name: "reports",
    verb: Verb::Get,
    path: "/reports",
    auth: true,
    fallback: Fallback::AuthTolerant(substitute::reports),
};

pub const CUSTOMERS: Endpoint<CustomerData> = Endpoint {
    name: "customers",
    verb: Verb::Get,
    path: "/customers",
    auth: true,
    fallback: Fallback::AuthTolerant(substitute::customers),
};

pub const ALERTS: Endpoint<Vec<AlertItem>> = Endpoint {
    name: "alerts",
    verb: Verb::Get,
    path: "/alerts",
    auth: true,
    fallback: Fallback::AuthTolerant(substitute::alerts),
};

pub const CHAT: Endpoint<ChatResponse> = Endpoint {
    name: "chat",
    verb: Verb::Post,
    path: "/llm",
    auth: true,
    fallback: Fallback::AlwaysSubstitute(substitute::chat),
};

pub const UPLOAD: Endpoint<UploadResponse> = Endpoint {
    name: "upload",
    verb: Verb::Post,
    path: "/upload-sales-data",
    auth: true,
    fallback: Fallback::Strict,
};

pub const HEALTH: Endpoint<Value> = Endpoint {
    name: "health",
    verb: Verb::Get,
    path: "/health",
    auth: false,
    fallback: Fallback::Strict,
};

/// Every descriptor, in a stable order.
pub fn catalog() -> Vec<EndpointInfo> {
    vec![
        LOGIN.info(),
        SIGNUP.info(),
        PROFILE.info(),
        ANALYTICS.info(),
        FORECAST.info(),
        FILES.info(),
        REPORTS.info(),
        CUSTOMERS.info(),
        ALERTS.info(),
        CHAT.info(),
        UPLOAD.info(),
        HEALTH.info(),
    ]
}
