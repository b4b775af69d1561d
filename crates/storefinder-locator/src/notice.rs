//! User-facing notifications raised by a search.

use std::fmt;

use crate::error::QueryError;

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    EmptyPostalCode,
    InvalidPostalCode { postal_code: String },
    InvalidRadius { radius_miles: f64 },
    GeocodeFailed { postal_code: String, reason: String },
    NoResults { postal_code: String, radius_miles: f64 },
}

impl From<&QueryError> for Notice {
    fn from(err: &QueryError) -> Self {
        match err {
            QueryError::EmptyPostalCode => Notice::EmptyPostalCode,
            QueryError::InvalidPostalCode(code) => Notice::InvalidPostalCode {
                postal_code: code.clone(),
            },
            QueryError::InvalidRadius(radius) => Notice::InvalidRadius {
                radius_miles: *radius,
            },
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::EmptyPostalCode => f.write_str("Please enter a zip code."),
            Notice::InvalidPostalCode { postal_code } => {
                write!(f, "\"{postal_code}\" is not a valid zip code.")
            }
            Notice::InvalidRadius { radius_miles } => {
                write!(f, "Search radius must be more than 0 miles (got {radius_miles}).")
            }
            Notice::GeocodeFailed { postal_code, .. } => {
                write!(f, "Could not find a location for \"{postal_code}\".")
            }
            Notice::NoResults { radius_miles, .. } => {
                write!(f, "No locations found within {radius_miles} miles.")
            }
        }
    }
}

/// The blocking alert channel. One call per notice.
pub trait Notifier {
    fn notify(&self, notice: &Notice);
}

/// Collects notices instead of showing them.
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: std::cell::RefCell<Vec<Notice>>,
}

impl NoticeLog {
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<Notice> {
        self.notices.borrow().last().cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notices.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notices.borrow().is_empty()
    }
}

impl Notifier for NoticeLog {
    fn notify(&self, notice: &Notice) {
        self.notices.borrow_mut().push(notice.clone());
    }
}
