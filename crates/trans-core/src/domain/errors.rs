use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TransResult<T> = Result<T, TransError>;
pub type FormatResult<T> = TransResult<T>;
pub type ParseResult<T> = TransResult<T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransErrorCategory {
    Success,
    FormatError,
    ParseError,
    NumericError,
    IoSystemError,
    InternalError,
}

impl TransErrorCategory {
    pub const fn exit_status(self) -> ExitStatusPlaceholder {
        match self {
            Self::Success => ExitStatusPlaceholder {
                exit_code: 0,
                rust_category: "Success",
                severity: "INFO",
            },
            Self::FormatError => ExitStatusPlaceholder {
                exit_code: 2,
                rust_category: "FormatError",
                severity: "ERROR",
            },
            Self::ParseError => ExitStatusPlaceholder {
                exit_code: 3,
                rust_category: "ParseError",
                severity: "ERROR",
            },
            Self::NumericError => ExitStatusPlaceholder {
                exit_code: 4,
                rust_category: "NumericError",
                severity: "ERROR",
            },
            Self::IoSystemError => ExitStatusPlaceholder {
                exit_code: 5,
                rust_category: "IoSystemError",
                severity: "ERROR",
            },
            Self::InternalError => ExitStatusPlaceholder {
                exit_code: 6,
                rust_category: "InternalError",
                severity: "ERROR",
            },
        }
    }

    pub const fn exit_code(self) -> i32 {
        self.exit_status().exit_code
    }

    pub const fn rust_category(self) -> &'static str {
        self.exit_status().rust_category
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatusPlaceholder {
    pub exit_code: i32,
    pub rust_category: &'static str,
    pub severity: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransError {
    category: TransErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl TransError {
    pub fn new(
        category: TransErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn format(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(TransErrorCategory::FormatError, placeholder, message)
    }

    pub fn parse(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(TransErrorCategory::ParseError, placeholder, message)
    }

    pub fn numeric(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(TransErrorCategory::NumericError, placeholder, message)
    }

    pub fn io_system(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(TransErrorCategory::IoSystemError, placeholder, message)
    }

    pub fn internal(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(TransErrorCategory::InternalError, placeholder, message)
    }

    pub const fn category(&self) -> TransErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!(
            "{}: [{}] {}",
            self.category.exit_status().severity,
            self.placeholder,
            self.message
        )
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        self.category
            .is_fatal()
            .then(|| format!("FATAL EXIT CODE: {}", self.exit_code()))
    }
}

impl Display for TransError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.rust_category(),
            self.placeholder,
            self.message
        )
    }
}

impl Error for TransError {}
