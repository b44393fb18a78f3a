use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{app_state::DatabaseState, db::initialize};

pub(crate) fn get_test_connection() -> Connection {
    let connection =
        Connection::open_in_memory().expect("could not create in-memory SQLite database");
    initialize(&connection).expect("could not initialize test DB");

    connection
}

pub(crate) fn get_test_database_state() -> DatabaseState {
    DatabaseState {
        db_connection: Arc::new(Mutex::new(get_test_connection())),
    }
}
