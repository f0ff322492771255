use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AppError {
    #[error("Give the playlist a name before saving.")]
    PlaylistNameMissing,

    #[error("The playlist is empty. Add some tracks first.")]
    EmptyPlaylist,

    #[error("The playlist is still being saved.")]
    SaveInProgress,

    #[error("Configuration error: {0}")]
    Config(String),
}
