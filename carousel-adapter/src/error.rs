use alloc::string::String;

/// Fatal configuration errors. Neither is retried: fix the markup or the selector.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CarouselError {
    #[error("carousel container `{selector}` not found")]
    ContainerNotFound { selector: String },

    #[error("carousel track `{selector}` not found inside the container")]
    TrackNotFound { selector: String },
}

pub type Result<T, E = CarouselError> = core::result::Result<T, E>;
