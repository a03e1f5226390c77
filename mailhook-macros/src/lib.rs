extern crate proc_macro;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod http_error;

/// Derive macro for mapping error variants to an HTTP status, a response message
/// and a numeric `errcode`
///
/// Derive `HttpError` by adding `#[http_error(...)]` to each variant
///
/// `http_error` accepts up to three arguments
/// - status code (required, always first)
/// - response message (optional string literal)
/// - `errcode = N` (optional)
///
/// ### Status Code
///
/// May be specified as a `StatusCode` constant (e.g. `BAD_REQUEST`) or a number (e.g. `400`)
///
/// The `StatusCode` value is returned by calling `http_code()`;
///
/// ### Response Message
///
/// The response message is a string literal which supports basic interpolation.
/// - Tuple variants can interpolate indices: `"first arg {0}, second arg {1}"`
/// - Struct variants can interpolate by field names: `message field = {message}`
///
/// When omitted, the `Display` implementation is used. Provide a message only when
/// the caller should see something different from what gets logged.
///
/// The response message is returned by calling `http_message()`;
///
/// ### Errcode
///
/// Webhook callers branch on a numeric code rather than the HTTP status, so each
/// variant may carry its own `errcode`. Variants without one fall back to the
/// numeric HTTP status.
///
/// The errcode is returned by calling `err_code()`;
///
/// ### Example
///
/// ```rust,no_compile
/// #[derive(Debug, thiserror::Error, mailhook::HttpError)]
/// enum ApiError {
///     #[error("missing key parameter")]
///     #[http_error(BAD_REQUEST, errcode = 40012)]
///     MissingKey,
///
///     #[error("smtp error: {0}")]
///     #[http_error(INTERNAL_SERVER_ERROR, "Failed to send email: {0}", errcode = 40004)]
///     Delivery(String),
///
///     #[error("not found")]
///     #[http_error(404)]
///     NotFound,
/// }
///
/// impl IntoResponse for ApiError {
///     fn into_response(self) -> Response {
///         if self.http_code().is_server_error() {
///             tracing::error!("Error Status {}: {}", self.http_code(), self);
///         }
///
///         let body = Json(json!({
///             "errcode": self.err_code(),
///             "errmsg": self.http_message(),
///         }));
///         (self.http_code(), body).into_response()
///     }
/// }
/// ```
#[proc_macro_derive(HttpError, attributes(http_error))]
pub fn http_error_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    http_error::http_error_derive_impl(input)
}
