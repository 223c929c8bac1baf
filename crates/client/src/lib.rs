//! Persistence client for the students REST API.
//!
//! [`StudentStore`] is the CRUD interface the page controllers depend on.
//! [`HttpStudentStore`] talks to a JSON REST API (one collection URL,
//! `/{id}` per record) using [`reqwest`]; [`MemoryStudentStore`] keeps
//! records in process and is used as a test double.

pub mod http;
pub mod memory;
pub mod store;

pub use http::HttpStudentStore;
pub use memory::MemoryStudentStore;
pub use store::{StoreError, StudentStore};
