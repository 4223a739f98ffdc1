//! Classification of driver errors into repository errors.

use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};

use crate::domain::ports::ProfileRepositoryError;

const DUPLICATE_KEY: i32 = 11000;

pub(super) fn map_mongo_error(error: MongoError) -> ProfileRepositoryError {
    let message = error.to_string();
    match *error.kind {
        ErrorKind::Io(_)
        | ErrorKind::ServerSelection { .. }
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::DnsResolve { .. } => ProfileRepositoryError::connection(message),
        ErrorKind::Write(WriteFailure::WriteError(ref write)) if write.code == DUPLICATE_KEY => {
            ProfileRepositoryError::duplicate(message)
        }
        ErrorKind::Command(ref command) if command.code == DUPLICATE_KEY => {
            ProfileRepositoryError::duplicate(message)
        }
        _ => ProfileRepositoryError::query(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn io_failures_are_connection_errors() {
        let err = MongoError::from(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        assert!(matches!(
            map_mongo_error(err),
            ProfileRepositoryError::Connection { .. }
        ));
    }

    #[test]
    fn other_failures_are_query_errors() {
        let err = MongoError::custom("unexpected");
        assert!(matches!(
            map_mongo_error(err),
            ProfileRepositoryError::Query { .. }
        ));
    }
}
