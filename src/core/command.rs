use async_trait::async_trait;
use crate::core::library::LibraryError;

#[derive(Debug)]
pub enum CommandError {
    Access {
        message: String,
        reason_code: Option<String>,
    },
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    DuplicateKey {
        message: String,
    },
    DuplicateIsbn {
        message: String,
    },
    InvalidArgument {
        message: String,
    },
    NotFound {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Serialization {
        message: String,
    },
    // one entry per rejected field
    Validation {
        errors: Vec<String>,
    },
    Other {
        message: String,
        reason_code: Option<String>,
    },
}

impl CommandError {
    pub fn validation(errors: Vec<String>) -> CommandError {
        CommandError::Validation { errors }
    }

    pub fn not_found(message: &str) -> CommandError {
        CommandError::NotFound { message: message.to_string() }
    }

    // messages reported back to the client
    pub fn messages(&self) -> Vec<String> {
        match self {
            CommandError::Validation { errors } => errors.clone(),
            CommandError::Access { message, .. } |
            CommandError::Database { message, .. } |
            CommandError::DuplicateKey { message } |
            CommandError::DuplicateIsbn { message } |
            CommandError::InvalidArgument { message } |
            CommandError::NotFound { message } |
            CommandError::Runtime { message, .. } |
            CommandError::Serialization { message } |
            CommandError::Other { message, .. } => vec![message.clone()],
        }
    }
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        match other {
            LibraryError::Database { message, reason_code, retryable } => {
                CommandError::Database { message, reason_code, retryable }
            }
            LibraryError::AccessDenied { message, reason_code } => {
                CommandError::Access { message, reason_code }
            }
            LibraryError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            LibraryError::DuplicateIsbn { message } => {
                CommandError::DuplicateIsbn { message }
            }
            LibraryError::InvalidArgument { message } => {
                CommandError::InvalidArgument { message }
            }
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                CommandError::Runtime { message, reason_code, retryable }
            }
            LibraryError::Validation { message, .. } => {
                CommandError::Validation { errors: vec![message] }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code, retryable: false }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::CommandError;
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_convert_library_error() {
        let err = CommandError::from(LibraryError::duplicate_isbn("This ISBN already exists"));
        assert!(matches!(err, CommandError::DuplicateIsbn { .. }));
        assert_eq!(vec!["This ISBN already exists".to_string()], err.messages());

        let err = CommandError::from(LibraryError::invalid_argument("Book id can't be null"));
        assert!(matches!(err, CommandError::InvalidArgument { .. }));

        let err = CommandError::from(LibraryError::unavailable("throttled", None, true));
        assert!(matches!(err, CommandError::Runtime { retryable: true, .. }));

        let err = CommandError::from(LibraryError::validation("bad sort", None));
        assert_eq!(vec!["bad sort".to_string()], err.messages());
    }

    #[tokio::test]
    async fn test_should_report_every_validation_message() {
        let err = CommandError::validation(vec!["title must not be empty".to_string(),
                                                "isbn must not be empty".to_string()]);
        assert_eq!(2, err.messages().len());
    }
}
