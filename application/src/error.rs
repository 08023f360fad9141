//! [`Error`]-related definitions.

use std::{convert::Infallible, fmt};

use derive_more::Error as StdError;
use itertools::Itertools as _;
use service::{command, domain::period, infra::database, query};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// Application [`Error`] reported to the user.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Create a new [`Error`] representing an internal failure.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_ERROR",
            message: msg.to_string(),
            backtrace: None,
        }
    }

    /// Create a new [`Error`] representing invalid user input.
    #[must_use]
    pub fn invalid_input(msg: &impl ToString) -> Self {
        Self {
            code: "INVALID_INPUT",
            message: msg.to_string(),
            backtrace: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("\n{trace}"))),
        )
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for Infallible {
    fn try_as_error(&self) -> Option<Error> {
        match *self {}
    }
}

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

impl AsError for period::Error {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "INVALID_WEEK_NUMBER"]
                #[message = "Week number must be in `1..=52` range"]
                InvalidWeekNumber,

                #[code = "INVALID_DONEM_NUMBER"]
                #[message = "Dönem number must be in `1..=52` range"]
                InvalidDonemNumber,
            }
        }

        Some(match self {
            Self::InvalidWeekNumber(_) => Error::InvalidWeekNumber.into(),
            Self::InvalidDonemNumber(_) => Error::InvalidDonemNumber.into(),
        })
    }
}

impl AsError for query::availability::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "ROOM_NOT_EXISTS"]
                #[message = "`Room` with the provided ID does not exist"]
                RoomNotExists,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::Period(e) => e.try_as_error(),
            Self::RoomNotExists(_) => Some(Error::RoomNotExists.into()),
        }
    }
}

impl AsError for command::create_reservation::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "CUSTOMER_NOT_EXISTS"]
                #[message = "`Customer` with the provided ID does not exist"]
                CustomerNotExists,

                #[code = "INVALID_DATE_RANGE"]
                #[message = "Start of the stay is after its end"]
                InvalidDateRange,

                #[code = "ROOM_NOT_AVAILABLE"]
                #[message = "`Room` is occupied for the selected days"]
                RoomNotAvailable,

                #[code = "ROOM_NOT_EXISTS"]
                #[message = "`Room` with the provided ID does not exist"]
                RoomNotExists,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::CustomerNotExists(_) => {
                Some(Error::CustomerNotExists.into())
            }
            Self::InvalidDateRange(_) => Some(Error::InvalidDateRange.into()),
            Self::RoomNotAvailable(..) => Some(Error::RoomNotAvailable.into()),
            Self::RoomNotExists(_) => Some(Error::RoomNotExists.into()),
        }
    }
}

impl AsError for command::cancel_reservation::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "ALREADY_CANCELED"]
                #[message = "`Reservation` is canceled already"]
                AlreadyCanceled,

                #[code = "RESERVATION_NOT_EXISTS"]
                #[message = "`Reservation` with the provided ID does not \
                             exist"]
                ReservationNotExists,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::AlreadyCanceled(_) => Some(Error::AlreadyCanceled.into()),
            Self::ReservationNotExists(_) => {
                Some(Error::ReservationNotExists.into())
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use service::{
        command::create_reservation,
        domain::{period, room},
    };

    use super::AsError as _;

    #[test]
    fn maps_domain_errors() {
        let err = period::Error::InvalidDonemNumber(53).as_error();

        assert_eq!(err.code, "INVALID_DONEM_NUMBER");
        assert!(err.backtrace.is_none());
    }

    #[test]
    fn keeps_trace_of_traced_errors() {
        let err = tracerr::new!(
            create_reservation::ExecutionError::RoomNotExists(room::Id::new())
        )
        .into_error();

        assert_eq!(err.code, "ROOM_NOT_EXISTS");
        assert!(err.backtrace.is_some());
        assert!(err.to_string().starts_with("[ROOM_NOT_EXISTS]: "));
    }
}
