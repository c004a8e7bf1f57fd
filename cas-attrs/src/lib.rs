mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::ToTokens;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// This trait can be derived for any struct with named fields, or a unit struct.
///
/// The information of the error can be customized using the `error` attribute by adding the
/// corresponding tags to it:
/// ```ignore
/// use cas_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = format!("`{}` is not defined", name),
///     labels = ["this variable"],
///     help = "bind a value to the variable before evaluating",
/// )]
/// pub struct UndefinedVariable {
///     name: String,
/// }
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | The message displayed at the top of the error when it is displayed.          |
/// | `labels`    | A list of labels, one for each span the error points to.                     |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
///
/// Each tag accepts an expression. `message` and `help` should evaluate to something that
/// implements [`ToString`], and `labels` to something iterable over such values. The expression
/// is evaluated with the members of the struct in scope, so they can be used in the expression
/// (tuple structs are not supported).
///
/// The generated code refers to the `cas_error` and `ariadne` crates by name, so both must be
/// dependencies of the crate using the derive.
///
/// [`ErrorKind`]: https://docs.rs/cas-error/latest/cas_error/trait.ErrorKind.html
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    target.into_token_stream().into()
}
