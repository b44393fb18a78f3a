#![allow(missing_docs)]

pub(crate) mod db;
pub(crate) mod http;

pub(crate) use db::{get_test_connection, get_test_database_state};
pub(crate) use http::{assert_error_response, get_header, json_body};
