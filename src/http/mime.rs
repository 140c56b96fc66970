/// Values for the `Content-Type` header.
///
/// This type has no variants and cannot be constructed; it only scopes the
/// constants.
pub enum ContentType {}

impl ContentType {
    pub const TEXT_HTML: &'static str = "text/html";
    pub const TEXT_PLAIN: &'static str = "text/plain";
}
