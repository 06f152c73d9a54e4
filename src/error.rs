/// Application-level error: a user-facing message plus the process exit code.
///
/// Exit code 1 covers output failures: writing the table to stdout (via
/// `From<std::io::Error>`) and creating or writing a `--export` /
/// `--export-json` file. Usage errors never reach this type;
/// clap reports them itself and exits with status 2.
///
/// Per-file ingest problems never become an `AppError`; they are logged and the
/// file is skipped.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::new(1, format!("I/O error: {e}"))
    }
}
