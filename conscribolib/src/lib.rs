//! conscribolib: клиент XML-over-HTTP API Conscribo: сессия, выборка проводок
//! по датам и отображение XML-ответов в доменные модели.

pub mod client;
pub mod error;
pub mod marker;
pub mod model;
pub mod traits;
pub mod transport;
pub mod xml;

pub mod api {
    pub mod request;
    pub mod response;
    pub mod transaction;
}

pub mod export {
    pub mod csv;
}
