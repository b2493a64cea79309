//! State management-specific error types.

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// A write was requested without a signed-in user
    #[error("You must be signed in to make changes")]
    NotSignedIn,

    /// Another save is still in flight
    #[error("A save is already in progress")]
    SaveInProgress,

    /// The current screen has nothing to save
    #[error("Nothing to save on the {screen} screen")]
    NothingToSave { screen: String },

    /// The network thread is gone
    #[error("Network channel closed: {0}")]
    ChannelClosed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_error_display() {
        let error = StateError::NotSignedIn;
        assert!(error.to_string().contains("signed in"));

        let error = StateError::SaveInProgress;
        assert!(error.to_string().contains("in progress"));

        let error = StateError::NothingToSave {
            screen: "Dashboard".to_string(),
        };
        assert!(error.to_string().contains("Dashboard"));

        let error = StateError::ChannelClosed("sending on a closed channel".to_string());
        assert!(error.to_string().contains("closed channel"));
    }
}
