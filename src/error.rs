use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that end the program before or during a session.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("cannot create log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;

    use super::AppError;

    #[test]
    fn io_errors_convert_with_question_mark() {
        fn fails() -> Result<(), AppError> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))?;
            Ok(())
        }

        let error = fails().unwrap_err();
        assert!(matches!(error, AppError::Io(_)));
        assert_eq!(error.to_string(), "terminal I/O failed: gone");
    }

    #[test]
    fn log_file_error_names_the_path() {
        let error = AppError::LogFile {
            path: PathBuf::from("/nowhere/snake.log"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };

        assert_eq!(
            error.to_string(),
            "cannot create log file /nowhere/snake.log: missing"
        );
    }
}
