//! Входящие ответы: общий разбор `<success>`/`<notifications>` и
//! типизированные результаты поверх проверенного дерева.

use crate::{
    error::{ConscriboError, Result},
    model::Transaction,
    traits::FromResponse,
    xml::Element,
};
use log::debug;

/// Разобранный, но ещё не проверенный ответ API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    root: Element,
}

impl ApiResponse {
    pub fn parse(xml: &str) -> Result<Self> {
        Ok(Self {
            root: Element::parse(xml)?,
        })
    }

    pub fn from_element(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Отсутствующий `<success>` считается неуспехом.
    pub fn success(&self) -> bool {
        self.root.child_text("success") == Some("1")
    }

    pub fn notifications(&self) -> Vec<String> {
        self.root
            .find_all("notifications/notification")
            .into_iter()
            .map(|n| n.text().to_owned())
            .collect()
    }

    pub fn raise_for_status(&self) -> Result<()> {
        if self.success() {
            Ok(())
        } else {
            Err(ConscriboError::Api(self.notifications()))
        }
    }
}

/// Ответ, у которого важен только статус.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusResult;

impl FromResponse for StatusResult {
    fn from_response(res: &ApiResponse) -> Result<Self> {
        res.raise_for_status()?;
        Ok(StatusResult)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticateResult {
    pub session_id: String,
}

impl FromResponse for AuthenticateResult {
    fn from_response(res: &ApiResponse) -> Result<Self> {
        res.raise_for_status()?;
        let session_id = res
            .root()
            .child_text("sessionId")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConscriboError::Mapping("response has no <sessionId>".into()))?;
        Ok(Self {
            session_id: session_id.to_owned(),
        })
    }
}

/// Только проводки с маркером, в порядке документа.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionListResult {
    pub transactions: Vec<Transaction>,
}

impl FromResponse for TransactionListResult {
    fn from_response(res: &ApiResponse) -> Result<Self> {
        res.raise_for_status()?;
        let nodes = res.root().find_all("transactions/transaction");
        let total = nodes.len();

        let mut transactions = Vec::with_capacity(total);
        for node in nodes {
            if let Some(tx) = Transaction::from_element(node)? {
                transactions.push(tx);
            }
        }
        debug!(
            "listTransactions: {} of {} transactions carry a marker",
            transactions.len(),
            total
        );
        Ok(Self { transactions })
    }
}
