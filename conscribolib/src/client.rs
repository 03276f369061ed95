//! Сессия поверх транспорта: аутентификация при создании, затем запросы.
//!
//! Клиент существует только в аутентифицированном состоянии: `connect`
//! либо возвращает готовую сессию, либо ошибку. Состояние сессии
//! неизменяемо, поэтому методы принимают `&self`.

use crate::{
    api::{
        request::{AddChangeTransactionRequest, AuthenticateRequest, TransactionListRequest},
        response::{ApiResponse, AuthenticateResult, StatusResult, TransactionListResult},
    },
    error::{ConscriboError, Result},
    model::{Credentials, Transaction},
    traits::{FromResponse, Headers, ToRequest, Transport},
};
use chrono::NaiveDate;
use log::{debug, info};

pub const API_VERSION: &str = "0.20110602";
pub const API_VERSION_HEADER: &str = "X-Conscribo-API-Version";
pub const SESSION_ID_HEADER: &str = "X-Conscribo-SessionId";

/// Заголовки до аутентификации: только версия протокола.
pub fn base_headers() -> Headers {
    let mut h = Headers::new();
    h.insert(API_VERSION_HEADER.into(), API_VERSION.into());
    h
}

#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    id: String,
    headers: Headers,
}

impl Session {
    fn authenticated(id: String) -> Self {
        let mut headers = base_headers();
        headers.insert(SESSION_ID_HEADER.into(), id.clone());
        Self { id, headers }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("id", &"***").finish()
    }
}

#[derive(Debug)]
pub struct Client<T: Transport> {
    transport: T,
    endpoint: String,
    session: Session,
}

impl<T: Transport> Client<T> {
    pub fn connect(transport: T, endpoint: impl Into<String>, credentials: &Credentials) -> Result<Self> {
        let endpoint = endpoint.into();
        let req = AuthenticateRequest::new(credentials.api_key.as_str(), credentials.passphrase.as_str());
        let res: AuthenticateResult = execute(&transport, &endpoint, &base_headers(), &req)?;
        info!("authenticated against {endpoint}");

        Ok(Self {
            transport,
            endpoint,
            session: Session::authenticated(res.session_id),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Один фильтр по дате, один запрос; без кэша и без автопагинации.
    pub fn list_transactions(&self, date_start: NaiveDate, date_end: NaiveDate) -> Result<Vec<Transaction>> {
        let mut req = TransactionListRequest::default();
        req.filter_date(Some(date_start), Some(date_end));
        self.list(&req)
    }

    /// Произвольный подготовленный запрос, например с `limit`/`offset`.
    pub fn list(&self, req: &TransactionListRequest) -> Result<Vec<Transaction>> {
        let res: TransactionListResult = self.call(req)?;
        Ok(res.transactions)
    }

    pub fn add_change_transaction(&self, tx: &Transaction) -> Result<()> {
        let _: StatusResult = self.call(&AddChangeTransactionRequest::new(tx))?;
        Ok(())
    }

    fn call<R: ToRequest, M: FromResponse>(&self, req: &R) -> Result<M> {
        execute(&self.transport, &self.endpoint, self.session.headers(), req)
    }
}

/// HTTP-статус проверяется до разбора XML, статус API: до чтения полей.
fn execute<T, R, M>(transport: &T, endpoint: &str, headers: &Headers, req: &R) -> Result<M>
where
    T: Transport,
    R: ToRequest,
    M: FromResponse,
{
    let element = req.to_element();
    let command = element.child_text("command").unwrap_or_default().to_owned();
    let body = element.to_document()?;

    let resp = transport.post(endpoint, body, headers)?;
    debug!("{command}: HTTP {}", resp.status);
    if !resp.is_success() {
        return Err(ConscriboError::HttpStatus {
            status: resp.status,
            body: resp.text,
        });
    }

    M::from_response(&ApiResponse::parse(&resp.text)?)
}
