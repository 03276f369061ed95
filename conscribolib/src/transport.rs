//! Блокирующий HTTP-транспорт на reqwest; пул соединений живёт вместе с клиентом.

use crate::{
    error::{ConscriboError, Result},
    traits::{Headers, HttpResponse, Transport},
};
use reqwest::header::CONTENT_TYPE;

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(transport)?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn post(&self, url: &str, body: String, headers: &Headers) -> Result<HttpResponse> {
        let mut req = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .body(body);
        for (k, v) in headers {
            req = req.header(k.as_str(), v.as_str());
        }

        let resp = req.send().map_err(transport)?;
        let status = resp.status().as_u16();
        let text = resp.text().map_err(transport)?;
        Ok(HttpResponse { status, text })
    }
}

fn transport(e: reqwest::Error) -> ConscriboError {
    ConscriboError::Transport(e.to_string())
}
