use thiserror::Error;
use uuid::Uuid;

use crate::{error::HttpError, models::negotiationmodel::ProposalStatus};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Booking {0} not found")]
    BookingNotFound(Uuid),

    #[error("Booking {0} is cancelled and accepts no schedule proposals")]
    BookingCancelled(Uuid),

    #[error("Proposal {0} not found")]
    ProposalNotFound(Uuid),

    #[error("Proposal {0} is already {1:?} and cannot be responded to")]
    InvalidProposalStatus(Uuid, ProposalStatus),

    #[error("Proposal {0} is the latest entry of its negotiation and cannot be deleted")]
    LatestEntryProtected(Uuid),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Notification error: {0}")]
    Notification(String),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::BookingNotFound(_) | ServiceError::ProposalNotFound(_) => {
                HttpError::not_found(error.to_string())
            }

            ServiceError::BookingCancelled(_) | ServiceError::Validation(_) => {
                HttpError::bad_request(error.to_string())
            }

            ServiceError::InvalidProposalStatus(_, _) | ServiceError::LatestEntryProtected(_) => {
                HttpError::conflict(error.to_string())
            }

            ServiceError::Database(_) | ServiceError::Notification(_) => {
                HttpError::server_error(error.to_string())
            }
        }
    }
}
