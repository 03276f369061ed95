//! Унифицированные трэйты: доменный объект -> XML-запрос, XML-ответ -> доменный объект,
//! и синхронный транспорт, через который они ходят.

use crate::{
    api::response::ApiResponse,
    error::Result,
    xml::Element,
};
use std::collections::BTreeMap;

/// Заголовки протокола, отправляемые с каждым запросом.
pub type Headers = BTreeMap<String, String>;

pub trait ToRequest {
    fn to_element(&self) -> Element;

    /// Полный документ с декларацией, без отступов.
    fn to_document(&self) -> Result<String> {
        self.to_element().to_document()
    }
}

pub trait FromResponse: Sized {
    /// Реализации обязаны вызвать `raise_for_status` до чтения полей.
    fn from_response(res: &ApiResponse) -> Result<Self>;

    fn from_xml(xml: &str) -> Result<Self> {
        Self::from_response(&ApiResponse::parse(xml)?)
    }
}

/// Ответ транспорта до проверки статуса.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub text: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait Transport {
    fn post(&self, url: &str, body: String, headers: &Headers) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post(&self, url: &str, body: String, headers: &Headers) -> Result<HttpResponse> {
        (**self).post(url, body, headers)
    }
}
