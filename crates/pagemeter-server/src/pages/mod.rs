//! Rendered pages.
//!
//! Each page is a handler over a [`Responder`]; which path serves which page,
//! and which counter it feeds, comes from config.

pub mod render;

use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, MethodRouter};
use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;

use crate::app_state::AppState;
use crate::interceptor::{Emit, Responder};

const GANDALF_TEMPLATE: &str = include_str!("../../templates/gandalf.html");
const COLOMBO_TEMPLATE: &str = include_str!("../../templates/colombo.html");

/// Asia/Colombo is UTC+05:30 all year.
const COLOMBO_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Gandalf,
    Colombo,
}

impl Page {
    pub fn method_router(self) -> MethodRouter<AppState> {
        match self {
            Page::Gandalf => get(gandalf),
            Page::Colombo => get(colombo),
        }
    }
}

pub async fn gandalf(mut res: Responder) -> Response {
    res.set_status(StatusCode::OK);
    res.html(render::render(GANDALF_TEMPLATE, &[("title", "Gandalf")]))
}

pub async fn colombo(mut res: Responder) -> Response {
    let Some(now) = time_in_colombo(Utc::now()) else {
        tracing::error!(offset_secs = COLOMBO_OFFSET_SECS, "invalid Colombo offset");
        res.set_status(StatusCode::INTERNAL_SERVER_ERROR);
        return res.text("internal error".into());
    };
    res.set_status(StatusCode::OK);
    res.html(render::render(
        COLOMBO_TEMPLATE,
        &[("title", "Colombo"), ("time_in_colombo", now.as_str())],
    ))
}

/// Wall-clock time in Colombo, e.g. `10/14/2026, 3:04:05 PM`.
pub fn time_in_colombo(now: DateTime<Utc>) -> Option<String> {
    let tz = FixedOffset::east_opt(COLOMBO_OFFSET_SECS)?;
    Some(now.with_timezone(&tz).format("%-m/%-d/%Y, %-I:%M:%S %p").to_string())
}
