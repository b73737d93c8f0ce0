use proc_macro2::TokenStream;
use quote::quote;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use syn::{Attribute, DeriveInput, Generics, Ident, Lit, Meta};

use grammar::{Compiler, Grammar, DEFAULT_WHITESPACE};

use crate::error::{DeriveError, Result};

const GRAMMAR_FILE_ATTR: &str = "grammar_file";
const GRAMMAR_INLINE_ATTR: &str = "grammar_inline";
const GRAMMAR_WHITESPACE_ATTR: &str = "grammar_whitespace";

/// Where a derive gets its description from.
#[derive(Debug, PartialEq)]
enum GrammarSource {
    Inline(String),
    /// Absolute path, resolved against the deriving crate's manifest dir.
    File(PathBuf),
}

impl GrammarSource {
    fn load(&self) -> Result<String> {
        match self {
            GrammarSource::Inline(s) => Ok(s.clone()),
            GrammarSource::File(path) => fs::read_to_string(path).map_err(|e| {
                DeriveError::Other(format!(
                    "read grammar file: {}, {}",
                    path.to_string_lossy(),
                    e
                ))
            }),
        }
    }

    /// Expression producing the description in generated code. Files are
    /// pulled in with `include_str!` so edits trigger a rebuild.
    fn expr(&self) -> TokenStream {
        match self {
            GrammarSource::Inline(s) => quote! { #s },
            GrammarSource::File(path) => {
                let path = path.to_string_lossy().into_owned();
                quote! { include_str!(#path) }
            }
        }
    }
}

pub fn generate(ast: DeriveInput) -> Result<TokenStream> {
    let source = grammar_source(&ast)?;
    let whitespace = whitespace_from_ast(&ast)?;

    let grammar = Compiler::new()
        .whitespace(whitespace.as_str())
        .compile(&source.load()?)?;

    let generated_rules = generate_rule_enum(&grammar)?;
    let generated_impl = generate_impl(&ast.ident, &ast.generics, &source, &whitespace);

    Ok(quote! {
        #generated_rules
        #generated_impl
    })
}

/// String values of the `name = "..."` attributes with the given names.
fn string_attrs<'a>(
    ast: &'a DeriveInput,
    names: &'a [&'a str],
) -> impl Iterator<Item = Result<(String, String)>> + 'a {
    ast.attrs
        .iter()
        .filter(move |attr: &&Attribute| names.iter().any(|name| attr.path.is_ident(name)))
        .map(|attr| match attr.parse_meta() {
            Ok(Meta::NameValue(val)) => match val.lit {
                Lit::Str(s) => {
                    let name = val
                        .path
                        .get_ident()
                        .map(|ident| ident.to_string())
                        .unwrap_or_default();
                    Ok((name, s.value()))
                }
                _ => Err(DeriveError::Other("attribute not a string".to_owned())),
            },
            Ok(_) => Err(DeriveError::Other("attribute not a name value".to_owned())),
            Err(e) => Err(e.into()),
        })
}

/// Load the grammar source from a derive attribute.
///
/// There must be exactly 1 attribute specifying the grammar source. The source
/// may either be written inline, or a path to a description file relative to
/// the crate root.
fn grammar_source(ast: &DeriveInput) -> Result<GrammarSource> {
    let sources = string_attrs(ast, &[GRAMMAR_FILE_ATTR, GRAMMAR_INLINE_ATTR])
        .collect::<Result<Vec<_>>>()?;

    let (attr, value) = match sources.len() {
        0 => return Err(DeriveError::MissingGrammarSource),
        1 => &sources[0],
        _ => return Err(DeriveError::MultipleGrammarSources),
    };

    if attr == GRAMMAR_FILE_ATTR {
        let root = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into());
        Ok(GrammarSource::File(Path::new(&root).join(value)))
    } else {
        Ok(GrammarSource::Inline(value.clone()))
    }
}

/// The whitespace pattern, if one is given. At most one is allowed.
fn whitespace_from_ast(ast: &DeriveInput) -> Result<String> {
    let mut patterns = string_attrs(ast, &[GRAMMAR_WHITESPACE_ATTR])
        .collect::<Result<Vec<_>>>()?;

    match patterns.len() {
        0 => Ok(DEFAULT_WHITESPACE.to_owned()),
        1 => Ok(patterns.remove(0).1),
        _ => Err(DeriveError::Other(
            "at most one whitespace pattern can be provided".to_owned(),
        )),
    }
}

/// Generate the parser implementation. The grammar is compiled once, the
/// first time it is needed.
fn generate_impl(
    name: &Ident,
    generics: &Generics,
    source: &GrammarSource,
    whitespace: &str,
) -> TokenStream {
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let description = source.expr();

    quote! {
        impl #impl_generics ::grammatic::Parser<Rule> for #name #ty_generics #where_clause {
            fn grammar() -> &'static ::grammatic::Grammar {
                static GRAMMAR: ::grammatic::__private::OnceCell<::grammatic::Grammar> =
                    ::grammatic::__private::OnceCell::new();
                GRAMMAR.get_or_init(|| {
                    ::grammatic::Compiler::new()
                        .whitespace(#whitespace)
                        .compile(#description)
                        .expect("grammar checked when the parser was derived")
                })
            }
        }
    }
}

/// Generate enum variants for each rule, in definition order.
fn generate_rule_enum(grammar: &Grammar) -> Result<TokenStream> {
    let names: Vec<&str> = grammar.rules().map(|rule| rule.name()).collect();
    let variants = names
        .iter()
        .map(|name| {
            syn::parse_str::<Ident>(name)
                .map_err(|_| DeriveError::InvalidRuleName((*name).to_owned()))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(quote! {
        #[allow(non_camel_case_types)]
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        pub enum Rule {
            #( #variants ),*
        }

        impl ::grammatic::ParserRule for Rule {
            fn name(self) -> &'static str {
                match self {
                    #( Rule::#variants => #names ),*
                }
            }
        }
    })
}
