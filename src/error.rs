//! Defines the app level error type.

use crate::stores::StoreError;

/// Shown when the session user is missing or unreadable.
pub const SESSION_ERROR_MESSAGE: &str = "Votre session a expiré, veuillez vous reconnecter.";

/// The errors that may occur while submitting or listing bills.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum Error {
    /// The selected file does not have one of the accepted image extensions.
    ///
    /// Callers should pass in the name of the rejected file.
    #[error("unsupported file format for \"{0}\"")]
    UnsupportedFileFormat(String),

    /// The session storage does not hold a user.
    #[error("no user in the session storage")]
    MissingSession,

    /// The session storage holds a user that could not be parsed.
    #[error("could not read the session user: {0}")]
    InvalidSession(String),

    /// The store rejected the receipt upload.
    ///
    /// The draft stays blocked until a new file is uploaded successfully.
    #[error("could not upload the receipt: {0}")]
    Upload(StoreError),

    /// The store rejected the bill update.
    ///
    /// The draft is kept so the user can submit again.
    #[error("could not update the bill: {0}")]
    Update(StoreError),

    /// The store could not list the bills.
    #[error("could not fetch the bills: {0}")]
    ListFetch(StoreError),

    /// The amount entered in the form is not an integer.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

impl Error {
    /// The message to show the user for this error.
    ///
    /// Store failures are shown verbatim (e.g., "Erreur 404"). Errors the user
    /// can act on have a French message; anything else uses the display text.
    pub fn user_message(&self) -> String {
        match self {
            Error::Upload(error) | Error::Update(error) | Error::ListFetch(error) => {
                error.message.clone()
            }
            Error::UnsupportedFileFormat(_) => crate::file::FILE_FORMAT_ERROR_MESSAGE.to_owned(),
            Error::MissingSession | Error::InvalidSession(_) => SESSION_ERROR_MESSAGE.to_owned(),
            Error::InvalidAmount(amount) => {
                format!("Le montant \"{amount}\" n'est pas un nombre entier valide.")
            }
            error => error.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}
