//! Unit tests for all error variants.
//!
//! Tests Display implementations, std::error::Error implementations,
//! and From conversions.

use gyrodrive_errors::{
    Result,
    common::{ErrorCategory, ErrorContext, ErrorSeverity, GyroDriveError, ResultExt},
    startup::StartupError,
    telemetry::TelemetryError,
    validation::ValidationError,
};

mod telemetry_error_tests {
    use super::*;

    #[test]
    fn test_all_variants_display() -> Result<()> {
        let variants = vec![
            TelemetryError::incomplete(4, 28),
            TelemetryError::invalid_number(27, "nan?"),
            TelemetryError::ResidualOverflow { dropped: 70000 },
        ];

        for variant in variants {
            let msg = variant.to_string();
            assert!(!msg.is_empty(), "TelemetryError variant should have display message");
        }
        Ok(())
    }

    #[test]
    fn test_invalid_number_keeps_text() {
        let err = TelemetryError::invalid_number(25, "1.2.3");
        assert!(err.to_string().contains("'1.2.3'"));
        assert!(err.to_string().contains("25"));
    }
}

mod startup_error_tests {
    use super::*;

    #[test]
    fn test_display_names_endpoint() {
        let err = StartupError::invalid_endpoint("phone:99999", "port out of range");
        assert!(err.to_string().contains("phone:99999"));
        assert!(err.to_string().contains("port out of range"));
    }

    #[test]
    fn test_critical() {
        let err: GyroDriveError = StartupError::connect_timeout("10.0.0.5:5555", 100).into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.category(), ErrorCategory::Startup);
    }
}

mod conversion_tests {
    use super::*;

    #[test]
    fn test_from_validation() {
        let err: GyroDriveError = ValidationError::required("screen.width").into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "scores.json");
        let err: GyroDriveError = io.into();
        assert_eq!(err.category(), ErrorCategory::IO);
        assert!(err.to_string().contains("scores.json"));
    }

    #[test]
    fn test_question_mark_propagation() {
        fn load() -> Result<()> {
            Err::<(), _>(ValidationError::required("telemetry.header_marker"))?;
            Ok(())
        }
        let result = load();
        assert!(matches!(
            result,
            Err(GyroDriveError::Validation(ValidationError::Required(_)))
        ));
    }

    #[test]
    fn test_context_wraps_message() {
        let result: std::result::Result<(), ValidationError> =
            Err(ValidationError::constraint("min_speed > max_speed"));
        let ctx = ErrorContext::new("load_config").with("file", "gyrodrive.yaml");
        let err = result.context(ctx);
        let Err(err) = err else {
            panic!("context must keep the error");
        };
        let msg = err.to_string();
        assert!(msg.contains("load_config"));
        assert!(msg.contains("min_speed > max_speed"));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn test_context_exposes_source() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "game.yaml");
        let result: std::result::Result<(), std::io::Error> = Err(io);
        let Err(err) = result.with_context("read_config") else {
            panic!("context must keep the error");
        };
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("I/O error: game.yaml"));
    }
}
