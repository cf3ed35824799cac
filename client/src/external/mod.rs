//! Clients for external services consumed by the dashboard

pub mod crm;

pub use crm::CrmClient;
