pub mod context;
pub mod determinism;
pub mod importer;
pub mod reporting;
pub mod validator;

pub mod error;
