use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr};

/// Derive macro for `stackdom::Tag`, the intrinsic tag enum.
///
/// The generated builders pass variants to `::stackdom::make_builder`, which
/// takes a `stackdom::Tag`, so deriving this on any other enum does not
/// compile. Every variant must be a unit variant. The element name defaults to the
/// lowercased variant name and can be overridden with `#[tag(name = "...")]`.
///
/// Generates:
/// - `ALL`, `as_str()` and `from_name()` on the enum
/// - a `Display` impl printing the element name
/// - one builder function per variant, named after the element, with the
///   signature `fn(props: Option<Props>, children: impl IntoChildren<M>)`
///
/// # Example
/// ```ignore
/// #[derive(Clone, Copy, IntrinsicTags)]
/// pub enum Tag {
///     Div,
///     #[tag(name = "a")]
///     Anchor,
/// }
///
/// // generated: `pub fn div(..)` and `pub fn a(..)`
/// div(None, || {
///     a(None, "Home");
/// });
/// ```
#[proc_macro_derive(IntrinsicTags, attributes(tag))]
pub fn derive_intrinsic_tags(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let enum_name = &input.ident;
    let vis = &input.vis;

    let variants = match &input.data {
        Data::Enum(data) => &data.variants,
        _ => panic!("IntrinsicTags can only be derived for enums"),
    };

    let mut tags = Vec::new();
    for variant in variants {
        if !matches!(variant.fields, Fields::Unit) {
            panic!(
                "IntrinsicTags variant `{}` must not carry fields",
                variant.ident
            );
        }

        let mut name: Option<String> = None;
        for attr in variant.attrs.iter().filter(|a| a.path().is_ident("tag")) {
            let parsed = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let lit: LitStr = meta.value()?.parse()?;
                    name = Some(lit.value());
                    Ok(())
                } else {
                    Err(meta.error("unsupported tag attribute, expected `name`"))
                }
            });
            if let Err(err) = parsed {
                return err.to_compile_error().into();
            }
        }

        let name = name.unwrap_or_else(|| variant.ident.to_string().to_lowercase());
        tags.push(TagVariant {
            ident: variant.ident.clone(),
            builder: format_ident!("{}", name),
            name,
        });
    }

    let idents: Vec<_> = tags.iter().map(|t| &t.ident).collect();
    let names: Vec<_> = tags.iter().map(|t| &t.name).collect();

    let builders = tags.iter().map(|tag| {
        let ident = &tag.ident;
        let builder = &tag.builder;
        let doc = format!(
            "Records a `<{}>` element into the innermost active build scope.\n\n\
             A closure as `children` nests the elements it records; any other \
             value becomes the element's `children` property.",
            tag.name
        );
        quote! {
            #[doc = #doc]
            #vis fn #builder<M>(
                props: Option<::stackdom::Props>,
                children: impl ::stackdom::IntoChildren<M>,
            ) {
                ::stackdom::make_builder(#enum_name::#ident).build(props, children)
            }
        }
    });

    let expanded = quote! {
        impl #enum_name {
            /// Every intrinsic tag, in declaration order.
            #vis const ALL: &'static [#enum_name] = &[#(#enum_name::#idents),*];

            /// The element name used by renderers.
            #vis const fn as_str(self) -> &'static str {
                match self {
                    #(#enum_name::#idents => #names,)*
                }
            }

            /// Look up a tag by its element name.
            #vis fn from_name(name: &str) -> Option<Self> {
                match name {
                    #(#names => Some(#enum_name::#idents),)*
                    _ => None,
                }
            }
        }

        impl ::core::fmt::Display for #enum_name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        #(#builders)*
    };

    TokenStream::from(expanded)
}

struct TagVariant {
    ident: syn::Ident,
    name: String,
    builder: syn::Ident,
}
