//! Library error types.

/// Errors raised at shape API boundaries.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// A scaling operation received a negative factor.
    #[error("negative scale factor {factor}")]
    NegativeScaleFactor {
        /// The offending factor, rendered for display.
        factor: String,
    },
}

impl ShapeError {
    /// Build a [`ShapeError::NegativeScaleFactor`] from any scalar type.
    pub fn negative_scale_factor<T: core::fmt::Debug>(factor: &T) -> Self {
        Self::NegativeScaleFactor {
            factor: format!("{factor:?}"),
        }
    }
}
