use proc_macro2::{Span, TokenStream};
use std::fmt::{self, Display};

pub type Result<T> = std::result::Result<T, DeriveError>;

#[derive(Debug, Clone, PartialEq)]
pub enum DeriveError {
    MissingGrammarSource,
    MultipleGrammarSources,
    /// The description did not compile.
    Grammar(String),
    /// A symbol that cannot be used as an enum variant.
    InvalidRuleName(String),
    Other(String),
}

impl DeriveError {
    pub fn to_compile_error(&self) -> TokenStream {
        syn::Error::new(Span::call_site(), self).to_compile_error()
    }
}

impl Display for DeriveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DeriveError::MissingGrammarSource => write!(f, "No grammar source provided"),
            DeriveError::MultipleGrammarSources => {
                write!(f, "At most one grammar source can be provided")
            }
            DeriveError::Grammar(ref s) => write!(f, "Invalid grammar: {}", s),
            DeriveError::InvalidRuleName(ref s) => {
                write!(f, "Rule name is not a valid identifier: {}", s)
            }
            DeriveError::Other(ref s) => write!(f, "Derive error: {}", s),
        }
    }
}

impl From<syn::Error> for DeriveError {
    fn from(e: syn::Error) -> DeriveError {
        DeriveError::Other(format!("syn error: {}", e))
    }
}

impl From<grammar::Error> for DeriveError {
    fn from(e: grammar::Error) -> DeriveError {
        DeriveError::Grammar(e.to_string())
    }
}
