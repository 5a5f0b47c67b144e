/// Errors raised while constructing a [`crate::Segmenter`].
///
/// `segment` itself never fails for well-formed input; every error this
/// crate can produce is surfaced at construction time.
#[derive(Debug, thiserror::Error)]
pub enum SegmenterError {
    /// `language` was not one of the ISO 639-1 codes this crate knows about.
    #[error("unknown language code {0:?}, expected one of {1}")]
    UnknownLanguage(String, &'static str),

    /// An incompatible combination of constructor flags was requested.
    #[error("incompatible Segmenter options: {0}")]
    IncompatibleOptions(&'static str),

    /// A language profile failed to compile its regexes. This only happens
    /// if a profile shipped with this crate is itself malformed; it is not a
    /// condition that can be triggered by caller input.
    #[error("internal error building language profile: {0}")]
    ProfileBuild(#[from] onig::Error),
}

/// Crate-internal fallible type used while regexes are compiled.
pub(crate) type BuildResult<T> = Result<T, onig::Error>;
