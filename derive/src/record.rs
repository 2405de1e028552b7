use proc_macro::TokenStream;
use proc_macro2::{TokenStream as TokenStream2, TokenTree};
use quote::{ToTokens, quote};
use syn::{
    Data, DeriveInput, Error, Field, Fields, Generics, Ident, LitStr, Meta, Path,
    Result, Token, Type,
    ext::IdentExt,
    parse::{Parse, ParseStream},
    parse_quote,
};

pub(crate) fn expand_record(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new_spanned(
            input,
            "`Record` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new_spanned(
            input,
            "`Record` may only be derived on structs with named fields.",
        ))?
    };

    let document = parse_document(input)?;

    let fields = fields
        .named
        .iter()
        .map(FieldMetadata::parse)
        .map(Result::transpose)
        .flatten() // Skip fields without an attribute.
        .collect::<Result<Vec<_>>>()?;

    let type_params: Vec<Ident> = input
        .generics
        .type_params()
        .map(|p| p.ident.clone())
        .collect();

    let mut generics = input.generics.clone();
    let is_pinned = document.is_some();

    let document = match document {
        Some(document) => document.into_token_stream(),
        None => {
            generics.params.push(parse_quote!(__D: ::docbind::Document));
            quote!(__D)
        }
    };

    add_bounds(&mut generics, &fields, &type_params, &document, is_pinned);

    let bindings = fields.iter().map(|field| field.binding(&document));

    let name = &input.ident;
    let (impl_generics, _, where_clause) = generics.split_for_impl();
    let (_, ty_generics, _) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::docbind::Record<#document> for #name #ty_generics #where_clause {
            const BINDINGS: &'static [::docbind::Binding<Self, #document>] = &[
                #(#bindings),*
            ];
        }

        impl #impl_generics ::docbind::Field<#document> for #name #ty_generics #where_clause {
            const RECORD: bool = true;

            fn decode_value(
                &mut self,
                value: &#document,
            ) -> ::core::result::Result<(), <#document as ::docbind::Document>::Error> {
                ::docbind::decode_into(value, self)
            }

            fn encode_value(&self) -> #document {
                ::docbind::encode(self)
            }
        }
    };

    Ok(expanded.into())
}

/// Read the document type pinned by a `record(document = T)` attribute.
fn parse_document(input: &DeriveInput) -> Result<Option<Type>> {
    let mut document = None;

    for attr in input.attrs.iter().filter(|a| a.path().is_ident("record")) {
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("document") {
                Err(meta.error("Expected `document = T`."))?
            }

            if document.is_some() {
                Err(meta.error("The document type may only be given once."))?
            }

            document = Some(meta.value()?.parse::<Type>()?);
            Ok(())
        })?;
    }

    Ok(document)
}

/// Require every bound field type to be transferable with the document, and
/// every type parameter to be `'static`.
///
/// With a pinned document, only field types mentioning a type parameter are
/// bounded. Bounding the rest would make self-referencing records unprovable.
fn add_bounds(
    generics: &mut Generics,
    fields: &[FieldMetadata],
    type_params: &[Ident],
    document: &TokenStream2,
    is_pinned: bool,
) {
    let where_clause = generics.make_where_clause();

    for param in type_params {
        where_clause.predicates.push(parse_quote!(#param: 'static));
    }

    for field in fields.iter().filter(|f| f.converter.is_none()) {
        let ty = &field.ty;

        if !is_pinned || mentions_any(ty.to_token_stream(), type_params) {
            where_clause
                .predicates
                .push(parse_quote!(#ty: ::docbind::Field<#document>));
        }
    }
}

fn mentions_any(tokens: TokenStream2, idents: &[Ident]) -> bool {
    tokens.into_iter().any(|tree| match tree {
        TokenTree::Ident(ident) => idents.contains(&ident),
        TokenTree::Group(group) => mentions_any(group.stream(), idents),
        _ => false,
    })
}

#[derive(Debug)]
struct FieldMetadata {
    name: Ident,
    ty: Type,
    key: LitStr,
    converter: Option<Path>,
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Option<Self>> {
        let name = field.ident.clone().unwrap();

        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("field")) else {
            return Ok(None);
        };

        let FieldAttribute { key, converter } = match &attr.meta {
            Meta::Path(_) => FieldAttribute::default(),
            Meta::List(list) => list.parse_args()?,
            Meta::NameValue(_) => Err(Error::new_spanned(
                attr,
                "Expected `#[field]`, `#[field(\"key\")]` or `#[field(\"key\", with = path)]`.",
            ))?,
        };

        // Default to the field name, without any raw identifier prefix.
        let key = key.unwrap_or_else(|| LitStr::new(&name.unraw().to_string(), name.span()));

        Ok(Some(Self {
            name,
            ty: field.ty.clone(),
            key,
            converter,
        }))
    }

    fn binding(&self, document: &TokenStream2) -> TokenStream2 {
        let FieldMetadata {
            name,
            key,
            converter,
            ..
        } = self;

        if let Some(converter) = converter {
            quote! {
                ::docbind::Binding::<Self, #document>::custom(
                    #key,
                    |document, key, record| #converter::decode(document, key, &mut record.#name),
                    |document, key, record| #converter::encode(document, key, &record.#name),
                )
            }
        } else {
            quote! {
                ::docbind::Binding::<Self, #document>::generic(
                    #key,
                    |document, key, record| ::docbind::decode_field(document, key, &mut record.#name),
                    |document, key, record| ::docbind::encode_field(document, key, &record.#name),
                )
            }
        }
    }
}

#[derive(Debug, Default)]
struct FieldAttribute {
    key: Option<LitStr>,
    converter: Option<Path>,
}

impl Parse for FieldAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let key = if input.peek(LitStr) {
            Some(input.parse::<LitStr>()?)
        } else {
            None
        };

        if key.is_some() && !input.is_empty() {
            input.parse::<Token![,]>()?;
        }

        let converter = if !input.is_empty() {
            let ident = input.parse::<Ident>()?;

            if ident != "with" {
                Err(Error::new_spanned(
                    ident,
                    "Field converter must be given as `with = path`.",
                ))?
            }

            input.parse::<Token![=]>()?;
            Some(input.parse::<Path>()?)
        } else {
            None
        };

        if !input.is_empty() {
            Err(input.error("Unexpected tokens after the field converter."))?
        }

        Ok(Self { key, converter })
    }
}
