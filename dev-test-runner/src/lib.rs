//! Message types shaped exactly like prost output for
//! `fixtures/errors.schema.json`, with the generated error impls included
//! next to them.
#![allow(clippy::all)]

pub mod example {
    pub mod app {
        #[derive(Clone, PartialEq, Debug, Default)]
        pub struct ConfigError {
            pub key: String,
            pub value: String,
            pub message: String,
        }

        #[derive(Clone, PartialEq, Debug, Default)]
        pub struct NotFoundError {
            pub entity: String,
        }

        #[derive(Clone, PartialEq, Debug, Default)]
        pub struct IoError {
            pub path: String,
            pub cause: ::core::option::Option<NotFoundError>,
        }

        #[derive(Clone, PartialEq, Debug, Default)]
        pub struct OtherError {
            pub message: String,
        }

        #[derive(Clone, PartialEq, Debug, Default)]
        pub struct QuotaError {
            pub limit: u32,
            pub severity: i32,
        }

        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(i32)]
        pub enum Severity {
            Unspecified = 0,
            Low = 1,
            High = 2,
        }

        impl Severity {
            pub fn as_str_name(&self) -> &'static str {
                match self {
                    Self::Unspecified => "SEVERITY_UNSPECIFIED",
                    Self::Low => "LOW",
                    Self::High => "HIGH",
                }
            }
        }

        impl ::core::convert::TryFrom<i32> for Severity {
            type Error = i32;

            fn try_from(value: i32) -> ::core::result::Result<Self, i32> {
                match value {
                    0 => Ok(Self::Unspecified),
                    1 => Ok(Self::Low),
                    2 => Ok(Self::High),
                    other => Err(other),
                }
            }
        }

        #[derive(Clone, PartialEq, Debug, Default)]
        pub struct ApplicationError {
            pub kind: ::core::option::Option<application_error::Kind>,
        }

        pub mod application_error {
            #[derive(Clone, PartialEq, Debug)]
            pub enum Kind {
                ConfigError(super::ConfigError),
                IoError(super::IoError),
                OtherError(super::OtherError),
                LegacyMessage(String),
            }
        }

        #[derive(Clone, PartialEq, Debug, Default)]
        pub struct Request {
            pub path: String,
            pub labels: ::std::collections::HashMap<String, String>,
        }

        include!(concat!(env!("OUT_DIR"), "/example/app.errors.rs"));
    }

    pub mod audit {
        #[derive(Clone, PartialEq, Debug, Default)]
        pub struct AuditError {
            pub resource: String,
            pub reason: ::core::option::Option<super::app::NotFoundError>,
            pub tags: Vec<String>,
            pub attempt: ::core::option::Option<u32>,
        }

        #[derive(Clone, PartialEq, Debug, Default)]
        pub struct Envelope {
            pub payload: Vec<u8>,
        }

        pub mod envelope {
            #[derive(Clone, PartialEq, Debug, Default)]
            pub struct DecodeError {
                pub offset: u64,
            }
        }

        #[derive(Clone, PartialEq, Debug, Default)]
        pub struct ReportError {
            pub trace_id: String,
            pub reason: ::core::option::Option<report_error::Reason>,
        }

        pub mod report_error {
            #[derive(Clone, PartialEq, Debug)]
            pub enum Reason {
                Audit(super::AuditError),
                Decode(super::envelope::DecodeError),
                App(super::super::app::ApplicationError),
            }
        }

        include!(concat!(env!("OUT_DIR"), "/example/audit.errors.rs"));
    }
}

/// Generated source of each fixture unit, for inspection in tests.
pub mod generated {
    pub const APP: &str = include_str!(concat!(env!("OUT_DIR"), "/example/app.errors.rs"));
    pub const AUDIT: &str = include_str!(concat!(env!("OUT_DIR"), "/example/audit.errors.rs"));
}
