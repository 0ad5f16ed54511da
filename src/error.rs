//! Error types.

use std::fmt;

/// Errors returned by the write path.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteError {
    /// The observation cannot be stored: its value is NaN or infinite.
    InvalidMetric {
        /// Metric name of the rejected write.
        name: String,
        /// The offending value.
        value: f64,
    },
}

impl WriteError {
    pub(crate) fn check_value(name: &str, value: f64) -> Result<(), WriteError> {
        if value.is_finite() {
            Ok(())
        } else {
            #[cfg(feature = "logging")]
            log::warn!("rejecting write to '{name}': value {value} is not finite");
            Err(WriteError::InvalidMetric {
                name: name.to_owned(),
                value,
            })
        }
    }
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteError::InvalidMetric { name, value } => {
                write!(f, "invalid metric '{name}': value {value} is not finite")
            }
        }
    }
}

impl std::error::Error for WriteError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_value() {
        assert!(WriteError::check_value("cpu", 0.0).is_ok());
        assert!(WriteError::check_value("cpu", -1e300).is_ok());
        assert!(WriteError::check_value("cpu", f64::NAN).is_err());
        assert!(WriteError::check_value("cpu", f64::INFINITY).is_err());
        assert!(WriteError::check_value("cpu", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_display() {
        let err = WriteError::InvalidMetric {
            name: "cpu".to_string(),
            value: f64::INFINITY,
        };
        assert_eq!(err.to_string(), "invalid metric 'cpu': value inf is not finite");
    }
}
