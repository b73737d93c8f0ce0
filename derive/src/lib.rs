//! Proc macros for deriving parsers from grammar descriptions.
//!
//! The description is compiled while the macro expands, so a malformed
//! grammar is reported at the derive site instead of at first use.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod error;
mod generate;

#[proc_macro_derive(Parser, attributes(grammar_file, grammar_inline, grammar_whitespace))]
pub fn derive(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    generate::generate(ast)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
