/// Configuration for the read direction of [`UtcCodec`](crate::UtcCodec).
///
/// # Examples
///
/// ```rust
/// use utc_codec::{CodecOptions, Token, UtcCodec};
///
/// let codec = UtcCodec::new(CodecOptions { nullable: true });
/// assert_eq!(codec.read(Token::Null), Ok(None));
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecOptions {
    /// Whether the value being read may be absent.
    ///
    /// When `true`, a null token or an empty string reads as `None`. When
    /// `false`, both fail with [`Error::NullValue`](crate::Error::NullValue).
    ///
    /// # Default
    ///
    /// `false`
    pub nullable: bool,
}

impl CodecOptions {
    /// Options for a target that requires a value.
    pub const fn new() -> Self {
        Self { nullable: false }
    }

    /// Sets [`nullable`](Self::nullable).
    #[must_use]
    pub const fn nullable(mut self, yes: bool) -> Self {
        self.nullable = yes;
        self
    }
}
