use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    TooLong { field: &'static str, max: usize, actual: usize },
    NotPositive { field: &'static str },
    InvalidPhoneNumber { input: String },
    InvalidMoney { input: String },
    InvalidUrl { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooLong { field, max, actual } => {
                write!(f, "{field} is too long: {actual} characters (max {max})")
            }
            Self::NotPositive { field } => write!(f, "{field} must be greater than zero"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidMoney { input } => write!(f, "invalid money amount: {input}"),
            Self::InvalidUrl { input } => write!(f, "invalid base url: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "phones" };
        assert_eq!(err.to_string(), "phones must not be empty");

        let err = ValidationError::TooLong {
            field: "mes",
            max: 800,
            actual: 801,
        };
        assert_eq!(err.to_string(), "mes is too long: 801 characters (max 800)");

        let err = ValidationError::NotPositive { field: "maxsms" };
        assert_eq!(err.to_string(), "maxsms must be greater than zero");

        let err = ValidationError::InvalidPhoneNumber {
            input: "bad".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid phone number: bad");

        let err = ValidationError::InvalidMoney {
            input: "1,44".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid money amount: 1,44");

        let err = ValidationError::InvalidUrl {
            input: "ftp://x".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid base url: ftp://x");
    }
}
