//! Executes plain-data `HttpRequest`s over the network with reqwest's
//! blocking client.
//!
//! 4xx/5xx responses come back as data; only failures to obtain a response
//! at all become `ApiError::Transport`. No timeouts and no retries are
//! configured, and the body is read in full whatever its size.

use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use reqwest::Method;

use crate::error::ApiError;
use crate::form::{FormPart, MultipartForm};
use crate::http::{HttpBody, HttpMethod, HttpRequest, HttpResponse};

/// Build the client used for every call.
pub fn http_client() -> Result<Client, ApiError> {
    Ok(Client::builder().timeout(None::<Duration>).build()?)
}

/// Perform one blocking round-trip.
pub fn execute(client: &Client, request: HttpRequest) -> Result<HttpResponse, ApiError> {
    let HttpRequest {
        method,
        url,
        headers,
        body,
    } = request;

    let mut builder = client.request(to_method(method), &url);
    for (name, value) in &headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder = match body {
        Some(HttpBody::Bytes(bytes)) => builder.body(bytes),
        Some(HttpBody::Multipart(form)) => builder.multipart(to_form(form)?),
        None => builder,
    };

    let response = builder.send()?;
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    let bytes = response.bytes()?;

    Ok(HttpResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn to_form(form: MultipartForm) -> Result<Form, ApiError> {
    let mut out = Form::new();
    for part in form.parts {
        out = match part {
            FormPart::Text { name, value } => out.text(name, value),
            FormPart::File { name, photo } => {
                let file = Part::bytes(photo.bytes)
                    .file_name(photo.file_name)
                    .mime_str(&photo.content_type)?;
                out.part(name, file)
            }
        };
    }
    Ok(out)
}
